use serde::Serialize;
use tracing::{info, warn};

use crate::{
    analysis::analyzer::{AnalysisResult, analyze_missing_fields},
    autofill::{
        fill_model::{FillConfig, FillResult},
        filler::Autofiller,
        site_handler::SiteHandlerRegistry,
    },
    driver::page_driver::PageDriver,
    form::{form_model::FormDescriptor, scanner::scan_html},
    profile::profile_model::UserData,
    trace::logger::TraceLogger,
};

pub mod analysis;
pub mod autofill;
pub mod cli;
pub mod driver;
pub mod error;
pub mod form;
pub mod profile;
pub mod report;
pub mod trace;

/// Everything one automation pass over a page produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutofillRun {
    pub url: String,
    pub forms: Vec<FormDescriptor>,
    pub analysis: AnalysisResult,
    /// False when the pass stopped at the completeness check.
    pub attempted: bool,
    pub filled: Vec<FillResult>,
}

/// Scan the page HTML, check the profile against it and, when complete (or
/// `force`d), fill every form through the driver.
///
/// The site handler registered for the URL's host is used when present;
/// otherwise the generic classification path fills the page.
#[allow(clippy::too_many_arguments)]
pub fn autofill_page(
    driver: &mut dyn PageDriver,
    url: &str,
    html: &str,
    profile: &UserData,
    registry: &SiteHandlerRegistry,
    config: FillConfig,
    tracer: &TraceLogger,
    force: bool,
) -> AutofillRun {
    let forms = scan_html(html);
    let analysis = analyze_missing_fields(&forms, profile);

    info!(
        url,
        forms = forms.len(),
        missing = analysis.missing_fields.len(),
        "page analyzed"
    );

    if !analysis.complete && !force {
        warn!(url, "required profile data missing, skipping autofill");
        return AutofillRun {
            url: url.to_string(),
            forms,
            analysis,
            attempted: false,
            filled: vec![],
        };
    }

    let mut autofiller = Autofiller::new(config).with_tracer(tracer);
    if let Some(handler) = registry.handler_for(url) {
        autofiller = autofiller.with_site_handler(handler);
    }

    let filled = autofiller.fill_forms(driver, &forms, profile);
    if filled.is_empty() {
        warn!(url, "autofill pass filled nothing");
    }

    AutofillRun {
        url: url.to_string(),
        forms,
        analysis,
        attempted: true,
        filled,
    }
}
