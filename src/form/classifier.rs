use std::sync::LazyLock;

use regex::Regex;

use crate::form::form_model::{FieldDescriptor, SemanticFieldType};

// ============================================================================
// Pattern table (declaration order breaks ties)
// ============================================================================

/// Raw patterns per type, in the order they are tried.
///
/// A field's concatenated text can match several types ("email_address"
/// contains "address"); the earlier entry wins.
const FIELD_PATTERNS: &[(SemanticFieldType, &[&str])] = &[
    (
        SemanticFieldType::FirstName,
        &[r"first[\s_-]?name", r"\bfname\b", r"given[\s_-]?name", r"forename"],
    ),
    (
        SemanticFieldType::LastName,
        &[r"last[\s_-]?name", r"\blname\b", r"surname", r"family[\s_-]?name"],
    ),
    (
        SemanticFieldType::FullName,
        &[
            r"full[\s_-]?name",
            r"legal[\s_-]?name",
            r"your[\s_-]?name",
            r"(?:applicant|candidate)[\s_-]?name",
            r"^name\b",
        ],
    ),
    (SemanticFieldType::Email, &[r"e[\s_-]?mail"]),
    (
        SemanticFieldType::Phone,
        &[r"phone", r"mobile", r"\btel\b", r"telephone", r"\bcell\b"],
    ),
    (
        SemanticFieldType::Address,
        &[r"address", r"street", r"\baddr\b"],
    ),
    (SemanticFieldType::City, &[r"\bcity\b", r"\btown\b", r"locality"]),
    (SemanticFieldType::State, &[r"\bstate\b", r"province", r"\bregion\b"]),
    (
        SemanticFieldType::ZipCode,
        &[r"\bzip", r"postal", r"post[\s_-]?code"],
    ),
    (SemanticFieldType::Country, &[r"country", r"\bnation\b"]),
    (SemanticFieldType::Linkedin, &[r"linked[\s_-]?in"]),
    (
        SemanticFieldType::Portfolio,
        &[r"portfolio", r"website", r"personal[\s_-]?site", r"home[\s_-]?page"],
    ),
    (SemanticFieldType::Github, &[r"git[\s_-]?hub"]),
    (
        SemanticFieldType::CoverLetter,
        &[r"cover[\s_-]?letter", r"motivation"],
    ),
    (
        SemanticFieldType::Resume,
        &[r"resume", r"résumé", r"\bcv\b", r"curriculum"],
    ),
];

/// Fallback keyed by the `autocomplete` attribute token.
const AUTOCOMPLETE_TABLE: &[(&str, SemanticFieldType)] = &[
    ("given-name", SemanticFieldType::FirstName),
    ("family-name", SemanticFieldType::LastName),
    ("name", SemanticFieldType::FullName),
    ("email", SemanticFieldType::Email),
    ("tel", SemanticFieldType::Phone),
    ("tel-national", SemanticFieldType::Phone),
    ("street-address", SemanticFieldType::Address),
    ("address-line1", SemanticFieldType::Address),
    ("address-level2", SemanticFieldType::City),
    ("address-level1", SemanticFieldType::State),
    ("postal-code", SemanticFieldType::ZipCode),
    ("country", SemanticFieldType::Country),
    ("country-name", SemanticFieldType::Country),
    ("url", SemanticFieldType::Portfolio),
];

static COMPILED_PATTERNS: LazyLock<Vec<(SemanticFieldType, Vec<Regex>)>> = LazyLock::new(|| {
    FIELD_PATTERNS
        .iter()
        .map(|(field_type, patterns)| {
            let compiled = patterns
                .iter()
                .map(|p| Regex::new(&format!("(?i){}", p)).expect("static field pattern"))
                .collect();
            (*field_type, compiled)
        })
        .collect()
});

// ============================================================================
// Classification
// ============================================================================

/// Text the patterns are tested against: the non-empty of name, id, label and
/// placeholder, space separated.
pub fn search_text(field: &FieldDescriptor) -> String {
    [
        field.name.as_str(),
        field.id.as_str(),
        field.label.as_str(),
        field.placeholder.as_str(),
    ]
    .iter()
    .map(|s| s.trim())
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
    .to_lowercase()
}

/// Assign a semantic type to a field. First matching type wins, then the
/// autocomplete table, then `Unknown`.
pub fn classify(field: &FieldDescriptor) -> SemanticFieldType {
    let text = search_text(field);

    for (field_type, patterns) in COMPILED_PATTERNS.iter() {
        if patterns.iter().any(|re| re.is_match(&text)) {
            return *field_type;
        }
    }

    classify_autocomplete(&field.autocomplete).unwrap_or(SemanticFieldType::Unknown)
}

/// Look up an `autocomplete` value. Section and address-type prefixes such as
/// `"shipping postal-code"` are ignored; only the last token counts.
pub fn classify_autocomplete(autocomplete: &str) -> Option<SemanticFieldType> {
    let token = autocomplete.split_whitespace().last()?.to_lowercase();

    AUTOCOMPLETE_TABLE
        .iter()
        .find(|(key, _)| *key == token)
        .map(|(_, field_type)| *field_type)
}
