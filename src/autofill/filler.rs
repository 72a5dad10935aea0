use serde_json::Value;
use tracing::{debug, info, warn};

use crate::autofill::fill_model::{
    FillConfig, FillOutcome, FillResult, PASSWORD_MASK, SELECT_ALL_CLICKS, SkipReason,
    VALIDATION_EVENTS,
};
use crate::autofill::site_handler::SiteHandler;
use crate::driver::page_driver::PageDriver;
use crate::error::AutofillError;
use crate::form::classifier::classify;
use crate::form::form_model::{DomType, FieldDescriptor, FormDescriptor, SemanticFieldType};
use crate::profile::flatten::{flatten_autofill_data, is_truthy, value_text};
use crate::profile::profile_model::{AutofillValues, UserData};
use crate::trace::{logger::TraceLogger, trace::FillTraceEvent};

pub const GENERIC_HANDLER: &str = "generic";

// ============================================================================
// Single-field dispatch
// ============================================================================

/// Put one value into one field through the driver.
///
/// Text-like fields are select-all clicked, cleared and typed with a human
/// keystroke delay; selects pick the option by value; checkboxes and radios
/// are checked only for truthy values; file inputs are always skipped.
/// `change` and `blur` are dispatched after every successful fill.
pub fn fill_field(
    driver: &mut dyn PageDriver,
    field: &FieldDescriptor,
    value: &Value,
    config: &FillConfig,
) -> Result<FillOutcome, AutofillError> {
    let selector = field.selector.as_str();

    let displayed = match field.dom_type {
        DomType::File => return Ok(FillOutcome::Skipped(SkipReason::FileInput)),

        DomType::Checkbox | DomType::Radio => {
            if !is_truthy(value) {
                return Ok(FillOutcome::Skipped(SkipReason::Falsy));
            }
            driver.wait_for_selector(selector, config.wait_timeout_ms)?;
            driver.check(selector)?;
            value_text(value).unwrap_or_else(|| "true".to_string())
        }

        DomType::Select => {
            let Some(text) = value_text(value) else {
                return Ok(FillOutcome::Skipped(SkipReason::NoValue));
            };
            driver.wait_for_selector(selector, config.wait_timeout_ms)?;
            driver.select_option(selector, &text)?;
            text
        }

        _ => {
            let Some(text) = value_text(value) else {
                return Ok(FillOutcome::Skipped(SkipReason::NoValue));
            };
            driver.wait_for_selector(selector, config.wait_timeout_ms)?;
            driver.click(selector, SELECT_ALL_CLICKS)?;
            driver.fill(selector, "")?;
            driver.type_text(selector, &text, config.typing_delay())?;
            text
        }
    };

    driver.dispatch_events(selector, VALIDATION_EVENTS)?;

    if field.dom_type == DomType::Password {
        Ok(FillOutcome::Filled(PASSWORD_MASK.to_string()))
    } else {
        Ok(FillOutcome::Filled(displayed))
    }
}

/// Value the generic path uses for a field: classify it, then look the type's
/// data key up in the flattened data.
pub fn resolve_generic_value<'a>(
    field: &FieldDescriptor,
    data: &'a AutofillValues,
) -> (SemanticFieldType, Option<&'a Value>) {
    let field_type = classify(field);
    let value = field_type
        .data_key()
        .and_then(|key| data.get(key))
        .filter(|v| !v.is_null());
    (field_type, value)
}

// ============================================================================
// Shared per-field bookkeeping
// ============================================================================

/// What every fill path shares: timing config and the optional trace sink.
pub struct FillContext<'a> {
    pub config: &'a FillConfig,
    pub tracer: Option<&'a TraceLogger>,
}

impl<'a> FillContext<'a> {
    pub fn new(config: &'a FillConfig) -> Self {
        Self {
            config,
            tracer: None,
        }
    }

    /// Fill a field whose value has already been matched, catching and
    /// logging any failure. Returns a result only when the field was filled.
    pub fn fill_matched(
        &self,
        driver: &mut dyn PageDriver,
        handler: &str,
        form: &FormDescriptor,
        field: &FieldDescriptor,
        matched: &str,
        value: &Value,
    ) -> Option<FillResult> {
        let event = FillTraceEvent::now(handler, form, field).with_match(matched);

        match fill_field(driver, field, value, self.config) {
            Ok(outcome) => {
                self.trace(event.with_outcome(&outcome));
                match outcome {
                    FillOutcome::Filled(value) => {
                        debug!(selector = %field.selector, matched, "field filled");
                        Some(FillResult {
                            selector: field.selector.clone(),
                            field_type: matched.to_string(),
                            value,
                        })
                    }
                    FillOutcome::Skipped(reason) => {
                        debug!(selector = %field.selector, reason = reason.as_str(), "field skipped");
                        None
                    }
                }
            }
            Err(e) => {
                warn!(selector = %field.selector, "error filling field: {}", e);
                self.trace(event.with_error(&e));
                None
            }
        }
    }

    /// Record a field no value was found for.
    pub fn skip_unmatched(&self, handler: &str, form: &FormDescriptor, field: &FieldDescriptor) {
        self.trace(
            FillTraceEvent::now(handler, form, field)
                .with_outcome(&FillOutcome::Skipped(SkipReason::NoValue)),
        );
    }

    fn trace(&self, event: FillTraceEvent) {
        if let Some(tracer) = self.tracer {
            tracer.log(&event);
        }
    }
}

// ============================================================================
// Autofiller: per-form loop over the generic path or a site handler
// ============================================================================

pub struct Autofiller<'a> {
    config: FillConfig,
    site_handler: Option<&'a dyn SiteHandler>,
    tracer: Option<&'a TraceLogger>,
}

impl<'a> Autofiller<'a> {
    pub fn new(config: FillConfig) -> Self {
        Self {
            config,
            site_handler: None,
            tracer: None,
        }
    }

    /// Consult this handler for every form instead of the generic path.
    pub fn with_site_handler(mut self, handler: &'a dyn SiteHandler) -> Self {
        self.site_handler = Some(handler);
        self
    }

    pub fn with_tracer(mut self, tracer: &'a TraceLogger) -> Self {
        self.tracer = Some(tracer);
        self
    }

    pub fn config(&self) -> &FillConfig {
        &self.config
    }

    fn context(&self) -> FillContext<'_> {
        FillContext {
            config: &self.config,
            tracer: self.tracer,
        }
    }

    /// Fill every form in order and collect what was filled.
    ///
    /// A failing form is logged and the remaining forms still run; an empty
    /// result means nothing was filled.
    pub fn fill_forms(
        &self,
        driver: &mut dyn PageDriver,
        forms: &[FormDescriptor],
        data: &UserData,
    ) -> Vec<FillResult> {
        let ctx = self.context();
        let flattened = flatten_autofill_data(data);
        let mut results = Vec::new();

        for form in forms {
            let outcome = match self.site_handler {
                Some(handler) => handler.fill_form(driver, form, data, &ctx),
                None => Ok(fill_form_generic(driver, form, &flattened, &ctx)),
            };

            match outcome {
                Ok(filled) => {
                    info!(form = form.index, filled = filled.len(), "form processed");
                    results.extend(filled);
                }
                Err(e) => warn!(form = form.index, "error filling form: {}", e),
            }
        }

        results
    }
}

/// Generic classification-driven fill of one form, top to bottom.
pub fn fill_form_generic(
    driver: &mut dyn PageDriver,
    form: &FormDescriptor,
    data: &AutofillValues,
    ctx: &FillContext<'_>,
) -> Vec<FillResult> {
    let mut results = Vec::new();

    for field in &form.fields {
        let (field_type, value) = resolve_generic_value(field, data);

        let Some(value) = value else {
            ctx.skip_unmatched(GENERIC_HANDLER, form, field);
            continue;
        };

        let matched = field_type.to_string();
        if let Some(result) = ctx.fill_matched(driver, GENERIC_HANDLER, form, field, &matched, value) {
            results.push(result);
        }
    }

    results
}
