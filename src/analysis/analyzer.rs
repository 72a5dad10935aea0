use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::form::classifier::classify;
use crate::form::form_model::{FieldDescriptor, FormDescriptor, SemanticFieldType};
use crate::profile::flatten::build_profile_data_map;
use crate::profile::profile_model::{ProfileDataMap, UserData};

pub const MISSING_DATA_REASON: &str = "Required data missing in profile";

/// One required field the profile cannot fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingFieldReport {
    pub form_index: i64,
    pub selector: String,
    pub label: String,
    pub detected_type: SemanticFieldType,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub missing_fields: Vec<MissingFieldReport>,
    pub complete: bool,
}

// ============================================================================
// Requiredness
// ============================================================================

pub fn label_indicates_required(label: &str) -> bool {
    label.contains('*') || label.to_lowercase().contains("required")
}

pub fn label_indicates_optional(label: &str) -> bool {
    label.to_lowercase().contains("optional")
}

/// A field needs data when it is marked required (attribute or label) and its
/// label does not call it optional.
pub fn is_needed(field: &FieldDescriptor) -> bool {
    (field.required || label_indicates_required(&field.label))
        && !label_indicates_optional(&field.label)
}

// ============================================================================
// Completeness check
// ============================================================================

/// Report every needed field whose profile data is absent or empty.
///
/// Needed fields the classifier cannot place (`Unknown`) are always reported,
/// so an unrecognised mandatory question blocks automation.
pub fn analyze_missing_fields(forms: &[FormDescriptor], profile: &UserData) -> AnalysisResult {
    let data = build_profile_data_map(profile);
    analyze_with_data_map(forms, &data)
}

/// Same as [`analyze_missing_fields`] against an already built data map.
pub fn analyze_with_data_map(forms: &[FormDescriptor], data: &ProfileDataMap) -> AnalysisResult {
    let mut missing_fields = Vec::new();

    for form in forms {
        for field in &form.fields {
            if !is_needed(field) {
                continue;
            }

            let detected_type = classify(field);
            let has_data = detected_type
                .data_key()
                .is_some_and(|key| data.has(key));

            if !has_data {
                debug!(
                    form = form.index,
                    selector = %field.selector,
                    field_type = %detected_type,
                    "required field has no profile data"
                );
                missing_fields.push(MissingFieldReport {
                    form_index: form.index,
                    selector: field.selector.clone(),
                    label: field.label.clone(),
                    detected_type,
                    reason: MISSING_DATA_REASON.to_string(),
                });
            }
        }
    }

    AnalysisResult {
        complete: missing_fields.is_empty(),
        missing_fields,
    }
}
