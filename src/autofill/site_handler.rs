use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::autofill::fill_model::FillResult;
use crate::autofill::filler::FillContext;
use crate::driver::page_driver::PageDriver;
use crate::error::AutofillError;
use crate::form::form_model::{FieldDescriptor, FormDescriptor};
use crate::profile::flatten::flatten_autofill_data;
use crate::profile::profile_model::{AutofillValues, UserData};

// ============================================================================
// SiteHandler trait: per-site override of matching and filling
// ============================================================================

/// Fills a whole form its own way. Consulted instead of the generic
/// classification path when one is selected for the current site.
pub trait SiteHandler {
    fn name(&self) -> &str;

    /// Flatten, match and fill one form, returning what was filled. An error
    /// abandons this form only.
    fn fill_form(
        &self,
        driver: &mut dyn PageDriver,
        form: &FormDescriptor,
        data: &UserData,
        ctx: &FillContext<'_>,
    ) -> Result<Vec<FillResult>, AutofillError>;
}

// ============================================================================
// Synonym matcher
// ============================================================================

/// Known synonyms per data key, tried in this order. Synonyms are already
/// normalized (lowercase, no separators).
const SYNONYMS: &[(&str, &[&str])] = &[
    ("email", &["email", "mail"]),
    ("phone", &["phone", "mobile", "telephone", "cellphone"]),
    ("linkedin", &["linkedin"]),
    ("github", &["github"]),
    ("portfolio", &["portfolio", "website", "personalsite", "homepage"]),
    ("first_name", &["firstname", "fname", "givenname", "forename"]),
    ("last_name", &["lastname", "lname", "surname", "familyname"]),
    ("address", &["address", "street"]),
    ("city", &["city", "town"]),
    ("state", &["state", "province", "region"]),
    ("zip_code", &["zipcode", "zip", "postalcode", "postcode"]),
    ("country", &["country"]),
    ("cover_letter", &["coverletter", "motivation"]),
    ("summary", &["summary", "aboutyou", "aboutme"]),
    ("sponsorship", &["sponsorship", "sponsor"]),
    ("work_authorization", &["workauthorization", "authorized", "righttowork", "eligible"]),
    ("relocation", &["relocation", "relocate"]),
    ("salary_expectation", &["salary", "compensation"]),
    ("notice_period", &["noticeperiod", "startdate", "availability"]),
    ("company", &["currentcompany", "company", "employer"]),
    ("job_title", &["jobtitle", "currenttitle", "position"]),
    ("full_name", &["fullname", "yourname", "name"]),
];

/// Lowercase and drop everything that is not a letter or digit.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Name, label, autocomplete, placeholder and id squashed into one string.
pub fn field_signature(field: &FieldDescriptor) -> String {
    normalize(&format!(
        "{} {} {} {} {}",
        field.name, field.label, field.autocomplete, field.placeholder, field.id
    ))
}

/// First data entry whose key has a synonym occurring in the field's
/// signature. Keys outside the synonym table match on their own normalized
/// name, after every table entry.
pub fn match_value<'a>(
    field: &FieldDescriptor,
    data: &'a AutofillValues,
) -> Option<(&'a str, &'a Value)> {
    let signature = field_signature(field);
    if signature.is_empty() {
        return None;
    }

    let present = move |key: &str| {
        data.get_key_value(key)
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.as_str(), v))
    };

    for (key, synonyms) in SYNONYMS {
        if synonyms.iter().any(|s| signature.contains(s)) {
            if let Some(hit) = present(*key) {
                return Some(hit);
            }
        }
    }

    data.iter()
        .filter(|(key, value)| {
            !value.is_null() && !SYNONYMS.iter().any(|(known, _)| *known == key.as_str())
        })
        .find(|(key, _)| {
            let needle = normalize(key);
            !needle.is_empty() && signature.contains(&needle)
        })
        .map(|(k, v)| (k.as_str(), v))
}

/// The default handler: liberal synonym substring matching over the
/// flattened data, then the shared fill dispatch.
#[derive(Debug, Default, Clone, Copy)]
pub struct SynonymSiteHandler;

impl SiteHandler for SynonymSiteHandler {
    fn name(&self) -> &str {
        "synonym"
    }

    fn fill_form(
        &self,
        driver: &mut dyn PageDriver,
        form: &FormDescriptor,
        data: &UserData,
        ctx: &FillContext<'_>,
    ) -> Result<Vec<FillResult>, AutofillError> {
        let flattened = flatten_autofill_data(data);
        let mut results = Vec::new();

        for field in &form.fields {
            match match_value(field, &flattened) {
                Some((key, value)) => {
                    if let Some(result) =
                        ctx.fill_matched(driver, self.name(), form, field, key, value)
                    {
                        results.push(result);
                    }
                }
                None => ctx.skip_unmatched(self.name(), form, field),
            }
        }

        Ok(results)
    }
}

// ============================================================================
// Registry of site handlers keyed by host
// ============================================================================

#[derive(Default)]
pub struct SiteHandlerRegistry {
    handlers: HashMap<String, Box<dyn SiteHandler>>,
}

impl SiteHandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, host: &str, handler: Box<dyn SiteHandler>) {
        self.handlers.insert(host.trim().to_lowercase(), handler);
    }

    /// Build a handler from its configured name. Unknown names yield `None`.
    pub fn handler_by_name(name: &str) -> Option<Box<dyn SiteHandler>> {
        match name {
            "synonym" | "default" => Some(Box::new(SynonymSiteHandler)),
            _ => None,
        }
    }

    /// Handler for the page's host, or a parent domain of it. `None` means
    /// the generic path.
    pub fn handler_for(&self, url: &str) -> Option<&dyn SiteHandler> {
        let parsed = reqwest::Url::parse(url).ok()?;
        let mut host = parsed.host_str()?.to_lowercase();

        loop {
            if let Some(handler) = self.handlers.get(&host) {
                debug!(host = %host, handler = handler.name(), "site handler selected");
                return Some(handler.as_ref());
            }
            let parent = match host.split_once('.') {
                Some((_, parent)) if parent.contains('.') => parent.to_string(),
                _ => return None,
            };
            host = parent;
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
