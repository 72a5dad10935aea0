use form_autofill::form::classifier::{classify, classify_autocomplete, search_text};
use form_autofill::form::form_model::{DomType, FieldDescriptor, SemanticFieldType};

fn text_field(name: &str, label: &str) -> FieldDescriptor {
    FieldDescriptor::new(format!("[name=\"{}\"]", name), DomType::Text)
        .with_name(name)
        .with_label(label)
}

// ============================================================================
// Pattern matching on textual signals
// ============================================================================

#[test]
fn classifies_common_application_fields() {
    let cases = [
        (text_field("first_name", "First Name"), SemanticFieldType::FirstName),
        (text_field("fname", ""), SemanticFieldType::FirstName),
        (text_field("surname", "Surname"), SemanticFieldType::LastName),
        (text_field("applicant", "Full legal name"), SemanticFieldType::FullName),
        (text_field("name", "Name"), SemanticFieldType::FullName),
        (text_field("contact", "E-mail"), SemanticFieldType::Email),
        (text_field("mobile", "Mobile number"), SemanticFieldType::Phone),
        (text_field("street", "Street address"), SemanticFieldType::Address),
        (text_field("city", "City"), SemanticFieldType::City),
        (text_field("province", "State / Province"), SemanticFieldType::State),
        (text_field("postal", "Postal code"), SemanticFieldType::ZipCode),
        (text_field("country", "Country"), SemanticFieldType::Country),
        (text_field("li", "LinkedIn profile"), SemanticFieldType::Linkedin),
        (text_field("site", "Personal website"), SemanticFieldType::Portfolio),
        (text_field("gh", "GitHub"), SemanticFieldType::Github),
        (text_field("letter", "Cover Letter"), SemanticFieldType::CoverLetter),
        (text_field("upload", "Attach your CV"), SemanticFieldType::Resume),
    ];

    for (field, expected) in cases {
        assert_eq!(classify(&field), expected, "field {:?}", field.label);
    }
}

#[test]
fn placeholder_and_id_are_signals_too() {
    let by_placeholder =
        FieldDescriptor::new("input.x", DomType::Text).with_placeholder("Your phone number");
    assert_eq!(classify(&by_placeholder), SemanticFieldType::Phone);

    let by_id = FieldDescriptor::new("#zip", DomType::Text).with_id("zip");
    assert_eq!(classify(&by_id), SemanticFieldType::ZipCode);
}

#[test]
fn matching_is_case_insensitive() {
    let field = text_field("EMAIL", "YOUR EMAIL ADDRESS");
    assert_eq!(classify(&field), SemanticFieldType::Email);
}

#[test]
fn email_address_label_is_email_not_address() {
    let field = text_field("email_address", "Your Email");
    assert_eq!(classify(&field), SemanticFieldType::Email);
}

// ============================================================================
// Declaration order decides ties
// ============================================================================

#[test]
fn earlier_type_wins_when_several_match() {
    let field = text_field("full_name_or_email", "");
    assert_eq!(classify(&field), SemanticFieldType::FullName);

    // github url: portfolio patterns do not fire, github does
    let github = text_field("github_url", "GitHub URL");
    assert_eq!(classify(&github), SemanticFieldType::Github);

    // "LinkedIn website" matches linkedin and portfolio; linkedin is declared first
    let linkedin = text_field("profile", "LinkedIn website");
    assert_eq!(classify(&linkedin), SemanticFieldType::Linkedin);
}

#[test]
fn classification_is_stable_across_calls() {
    let field = text_field("first_name_last_name", "Name and email");
    let first = classify(&field);
    for _ in 0..50 {
        assert_eq!(classify(&field), first);
    }
    assert_eq!(first, SemanticFieldType::FirstName);
}

// ============================================================================
// Autocomplete fallback
// ============================================================================

#[test]
fn given_name_autocomplete_falls_back_to_first_name() {
    let field = FieldDescriptor::new("#f1", DomType::Text)
        .with_id("f1")
        .with_label("Field 1")
        .with_autocomplete("given-name");
    assert_eq!(classify(&field), SemanticFieldType::FirstName);
}

#[test]
fn autocomplete_table_covers_contact_tokens() {
    assert_eq!(classify_autocomplete("tel"), Some(SemanticFieldType::Phone));
    assert_eq!(classify_autocomplete("postal-code"), Some(SemanticFieldType::ZipCode));
    assert_eq!(classify_autocomplete("family-name"), Some(SemanticFieldType::LastName));
    assert_eq!(classify_autocomplete("address-level2"), Some(SemanticFieldType::City));
    assert_eq!(classify_autocomplete("Country-Name"), Some(SemanticFieldType::Country));
    assert_eq!(classify_autocomplete("new-password"), None);
}

#[test]
fn text_patterns_beat_autocomplete() {
    let field = text_field("city", "City").with_autocomplete("postal-code");
    assert_eq!(classify(&field), SemanticFieldType::City);
}

#[test]
fn unrecognized_field_is_unknown() {
    let field = text_field("q17", "How did you hear about us?").with_autocomplete("off");
    assert_eq!(classify(&field), SemanticFieldType::Unknown);
}

#[test]
fn search_text_joins_signals_lowercased() {
    let field = FieldDescriptor::new("#a", DomType::Text)
        .with_name("Name")
        .with_id("Id")
        .with_label("Label")
        .with_placeholder("Hint");
    assert_eq!(search_text(&field), "name id label hint");
}

#[test]
fn unknown_has_no_data_key() {
    assert_eq!(SemanticFieldType::Unknown.data_key(), None);
    assert_eq!(SemanticFieldType::ZipCode.data_key(), Some("zip_code"));
    assert_eq!(SemanticFieldType::CoverLetter.to_string(), "cover_letter");
}

#[test]
fn bare_name_label_is_full_name() {
    let field = FieldDescriptor::new("div > input", DomType::Text).with_label("Name");
    assert_eq!(classify(&field), SemanticFieldType::FullName);
}
