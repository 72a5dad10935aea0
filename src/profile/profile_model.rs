use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// UserData: the object bag supplied by the backend
// ============================================================================

/// Profile, CV and job records for one automation pass. Every part is
/// optional; absent or null values mean "no data".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default)]
    pub user: Option<UserRecord>,
    #[serde(default)]
    pub personal_info: Option<PersonalInfo>,
    #[serde(default)]
    pub cv_data: Option<CvData>,
    #[serde(default)]
    pub cover_letter: Option<CoverLetter>,
    #[serde(default)]
    pub job: Option<JobInfo>,
    /// Free-form screening answers keyed by data key, e.g. `sponsorship: false`.
    #[serde(default)]
    pub answers: BTreeMap<String, Value>,
}

/// Account-level user record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRecord {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Contact details, either top-level or nested in the CV.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
    pub github: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CvData {
    pub personal_info: Option<PersonalInfo>,
    pub summary: Option<String>,
    pub resume_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverLetter {
    pub content: Option<String>,
}

/// The job being applied to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobInfo {
    pub title: Option<String>,
    pub company: Option<String>,
    pub url: Option<String>,
    pub location: Option<String>,
}

// ============================================================================
// Flattened views
// ============================================================================

/// Value reported for `resume` when the profile carries no file path.
/// Resume presence is validated upstream.
pub const RESUME_PRESENT: &str = "provided";

/// Profile values keyed by semantic data key (`first_name`, `email`, ...).
/// Built once per analysis call; read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDataMap {
    pub(crate) values: BTreeMap<&'static str, Option<String>>,
}

impl ProfileDataMap {
    /// Non-empty value for a key, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|v| v.as_deref())
            .filter(|v| !v.trim().is_empty())
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.keys().copied()
    }
}

/// Flattened profile plus job data handed to the autofill path.
pub type AutofillValues = BTreeMap<String, Value>;
