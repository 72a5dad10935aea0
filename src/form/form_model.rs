use serde::{Deserialize, Serialize};
use std::fmt;

/// Index used for the synthetic group of fields that live outside any `<form>`.
pub const STANDALONE_FORM_INDEX: i64 = -1;
pub const STANDALONE_FORM_SELECTOR: &str = "body";

/// Kind of control a field is, as seen in the DOM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomType {
    Text,
    Email,
    Password,
    Tel,
    Url,
    Number,
    Date,
    Search,
    Textarea,
    Select,
    Checkbox,
    Radio,
    File,
}

impl DomType {
    /// Resolve the control kind from a tag name and its `type` attribute.
    ///
    /// Unknown `<input>` types fall back to `Text`, as browsers do.
    pub fn from_element(tag: &str, input_type: Option<&str>) -> DomType {
        match tag {
            "textarea" => return DomType::Textarea,
            "select" => return DomType::Select,
            _ => {}
        }

        match input_type.map(|t| t.trim().to_lowercase()).as_deref() {
            Some("email") => DomType::Email,
            Some("password") => DomType::Password,
            Some("tel") => DomType::Tel,
            Some("url") => DomType::Url,
            Some("number") => DomType::Number,
            Some("date") | Some("datetime-local") | Some("month") | Some("week") => DomType::Date,
            Some("search") => DomType::Search,
            Some("checkbox") => DomType::Checkbox,
            Some("radio") => DomType::Radio,
            Some("file") => DomType::File,
            _ => DomType::Text,
        }
    }
}

impl fmt::Display for DomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DomType::Text => "text",
            DomType::Email => "email",
            DomType::Password => "password",
            DomType::Tel => "tel",
            DomType::Url => "url",
            DomType::Number => "number",
            DomType::Date => "date",
            DomType::Search => "search",
            DomType::Textarea => "textarea",
            DomType::Select => "select",
            DomType::Checkbox => "checkbox",
            DomType::Radio => "radio",
            DomType::File => "file",
        };
        f.write_str(name)
    }
}

/// Snapshot of one detected input's identifying attributes at scan time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub selector: String,
    pub dom_type: DomType,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub autocomplete: String,
}

impl FieldDescriptor {
    /// Bare text field with only a selector; the other attributes start empty.
    pub fn new(selector: impl Into<String>, dom_type: DomType) -> Self {
        Self {
            selector: selector.into(),
            dom_type,
            name: String::new(),
            id: String::new(),
            label: String::new(),
            placeholder: String::new(),
            required: false,
            autocomplete: String::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_autocomplete(mut self, autocomplete: impl Into<String>) -> Self {
        self.autocomplete = autocomplete.into();
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

/// A detected `<form>` (or the synthetic standalone group) with its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDescriptor {
    pub index: i64,
    pub selector: String,
    #[serde(default)]
    pub action: String,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

fn default_method() -> String {
    "get".to_string()
}

impl FormDescriptor {
    pub fn standalone(fields: Vec<FieldDescriptor>) -> Self {
        Self {
            index: STANDALONE_FORM_INDEX,
            selector: STANDALONE_FORM_SELECTOR.to_string(),
            action: String::new(),
            method: default_method(),
            fields,
        }
    }

    pub fn is_standalone(&self) -> bool {
        self.index == STANDALONE_FORM_INDEX
    }

    /// Stable identity of the form's shape: its selector plus every field selector.
    pub fn fingerprint(&self) -> String {
        use sha1::{Digest, Sha1};

        let mut hasher = Sha1::new();
        hasher.update(self.selector.as_bytes());
        for field in &self.fields {
            hasher.update(b"\n");
            hasher.update(field.selector.as_bytes());
        }
        format!("{:x}", hasher.finalize())
    }
}

/// Closed set of field meanings the classifier can recognise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticFieldType {
    FirstName,
    LastName,
    FullName,
    Email,
    Phone,
    Address,
    City,
    State,
    ZipCode,
    Country,
    Linkedin,
    Portfolio,
    Github,
    CoverLetter,
    Resume,
    Unknown,
}

impl SemanticFieldType {
    /// Key used for this type in profile and flattened autofill data.
    /// `Unknown` has no data key.
    pub fn data_key(&self) -> Option<&'static str> {
        let key = match self {
            SemanticFieldType::FirstName => "first_name",
            SemanticFieldType::LastName => "last_name",
            SemanticFieldType::FullName => "full_name",
            SemanticFieldType::Email => "email",
            SemanticFieldType::Phone => "phone",
            SemanticFieldType::Address => "address",
            SemanticFieldType::City => "city",
            SemanticFieldType::State => "state",
            SemanticFieldType::ZipCode => "zip_code",
            SemanticFieldType::Country => "country",
            SemanticFieldType::Linkedin => "linkedin",
            SemanticFieldType::Portfolio => "portfolio",
            SemanticFieldType::Github => "github",
            SemanticFieldType::CoverLetter => "cover_letter",
            SemanticFieldType::Resume => "resume",
            SemanticFieldType::Unknown => return None,
        };
        Some(key)
    }
}

impl fmt::Display for SemanticFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.data_key().unwrap_or("unknown"))
    }
}
