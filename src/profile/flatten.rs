use serde_json::Value;

use crate::profile::profile_model::{
    AutofillValues, PersonalInfo, ProfileDataMap, RESUME_PRESENT, UserData, UserRecord,
};

/// Keys read from contact records, in the order they appear in the data map.
const PERSONAL_KEYS: &[&str] = &[
    "first_name",
    "last_name",
    "full_name",
    "email",
    "phone",
    "address",
    "city",
    "state",
    "zip_code",
    "country",
    "linkedin",
    "portfolio",
    "github",
];

fn user_field<'a>(user: &'a UserRecord, key: &str) -> Option<&'a str> {
    match key {
        "first_name" => user.first_name.as_deref(),
        "last_name" => user.last_name.as_deref(),
        "full_name" => user.full_name.as_deref(),
        "email" => user.email.as_deref(),
        "phone" => user.phone.as_deref(),
        _ => None,
    }
}

fn personal_field<'a>(info: &'a PersonalInfo, key: &str) -> Option<&'a str> {
    match key {
        "first_name" => info.first_name.as_deref(),
        "last_name" => info.last_name.as_deref(),
        "full_name" => info.full_name.as_deref(),
        "email" => info.email.as_deref(),
        "phone" => info.phone.as_deref(),
        "address" => info.address.as_deref(),
        "city" => info.city.as_deref(),
        "state" => info.state.as_deref(),
        "zip_code" => info.zip_code.as_deref(),
        "country" => info.country.as_deref(),
        "linkedin" => info.linkedin.as_deref(),
        "portfolio" => info.portfolio.as_deref(),
        "github" => info.github.as_deref(),
        _ => None,
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// First non-blank value for `key`: `user`, then `personal_info`, then
/// `cv_data.personal_info`.
fn lookup_personal(data: &UserData, key: &str) -> Option<String> {
    let from_user = data.user.as_ref().and_then(|u| user_field(u, key));
    let from_personal = data.personal_info.as_ref().and_then(|p| personal_field(p, key));
    let from_cv = data
        .cv_data
        .as_ref()
        .and_then(|cv| cv.personal_info.as_ref())
        .and_then(|p| personal_field(p, key));

    non_blank(from_user)
        .or_else(|| non_blank(from_personal))
        .or_else(|| non_blank(from_cv))
}

/// Build the semantic-key view of a profile used by the completeness check.
///
/// `full_name` is synthesized from first and last name when absent, and
/// `resume` is always present.
pub fn build_profile_data_map(data: &UserData) -> ProfileDataMap {
    let mut map = ProfileDataMap::default();

    for key in PERSONAL_KEYS {
        map.values.insert(*key, lookup_personal(data, key));
    }

    if !map.has("full_name") {
        let synthesized = [map.get("first_name"), map.get("last_name")]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        map.values
            .insert("full_name", non_blank(Some(synthesized.as_str())));
    }

    let cover_letter = data.cover_letter.as_ref().and_then(|c| c.content.as_deref());
    map.values.insert("cover_letter", non_blank(cover_letter));

    let resume = data
        .cv_data
        .as_ref()
        .and_then(|cv| non_blank(cv.resume_path.as_deref()))
        .unwrap_or_else(|| RESUME_PRESENT.to_string());
    map.values.insert("resume", Some(resume));

    map
}

/// Data-map keys that only exist for the completeness check and are never
/// typed into a page.
const CHECK_ONLY_KEYS: &[&str] = &["resume"];

/// Flatten the profile, job and screening answers into one key/value map for
/// autofill. Screening answers keep their JSON type so booleans stay booleans.
///
/// `resume` is left out: its data-map value is a presence marker or a local
/// file path, not text for a form field.
pub fn flatten_autofill_data(data: &UserData) -> AutofillValues {
    let profile = build_profile_data_map(data);
    let mut values = AutofillValues::new();

    for key in profile.keys().filter(|k| !CHECK_ONLY_KEYS.contains(k)) {
        if let Some(value) = profile.get(key) {
            values.insert(key.to_string(), Value::String(value.to_string()));
        }
    }

    if let Some(job) = &data.job {
        let job_fields = [
            ("job_title", job.title.as_deref()),
            ("company", job.company.as_deref()),
            ("job_url", job.url.as_deref()),
            ("job_location", job.location.as_deref()),
        ];
        for (key, value) in job_fields {
            if let Some(value) = non_blank(value) {
                values.insert(key.to_string(), Value::String(value));
            }
        }
    }

    if let Some(summary) = data.cv_data.as_ref().and_then(|cv| non_blank(cv.summary.as_deref())) {
        values.insert("summary".to_string(), Value::String(summary));
    }

    for (key, value) in &data.answers {
        if !value.is_null() {
            values.insert(key.clone(), value.clone());
        }
    }

    values
}

// ============================================================================
// Value helpers shared by the fill paths
// ============================================================================

/// Truthiness used for checkbox and radio decisions.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => {
            let s = s.trim().to_lowercase();
            !(s.is_empty() || s == "false" || s == "no" || s == "0")
        }
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

/// Text form of a value for typing or option selection. Null and empty
/// strings have no text form.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
