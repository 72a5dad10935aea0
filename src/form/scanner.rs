use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::form::form_model::{DomType, FieldDescriptor, FormDescriptor};

static FORM_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("form").expect("static selector"));
static CONTROL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("input, textarea, select").expect("static selector"));
static LABEL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("label[for]").expect("static selector"));

/// `<input>` types that are never filled.
const NON_FILLABLE_TYPES: &[&str] = &["hidden", "submit", "button", "reset", "image"];

// ============================================================================
// Entry points
// ============================================================================

/// Parse raw HTML and scan it.
pub fn scan_html(html: &str) -> Vec<FormDescriptor> {
    let document = Html::parse_document(html);
    scan_document(&document)
}

/// Detect every form on the page plus the standalone group.
///
/// Forms come back in document order; a form (or the standalone group) with no
/// fillable fields is left out.
pub fn scan_document(document: &Html) -> Vec<FormDescriptor> {
    let mut forms = Vec::new();

    for (index, form_el) in document.select(&FORM_SELECTOR).enumerate() {
        let fields: Vec<FieldDescriptor> = form_el
            .select(&CONTROL_SELECTOR)
            .filter(|el| is_fillable(el) && is_visible(el))
            .map(|el| to_field(document, &el))
            .collect();

        if fields.is_empty() {
            debug!(index, "form has no fillable fields, dropping");
            continue;
        }

        let attrs = form_el.value();
        forms.push(FormDescriptor {
            index: index as i64,
            selector: derive_selector(&form_el),
            action: attrs.attr("action").unwrap_or_default().to_string(),
            method: attrs
                .attr("method")
                .map(|m| m.trim().to_lowercase())
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "get".to_string()),
            fields,
        });
    }

    let standalone: Vec<FieldDescriptor> = document
        .select(&CONTROL_SELECTOR)
        .filter(|el| !inside_form(el) && is_fillable(el) && is_visible(el))
        .map(|el| to_field(document, &el))
        .collect();

    if !standalone.is_empty() {
        forms.push(FormDescriptor::standalone(standalone));
    }

    debug!(count = forms.len(), "scan complete");
    forms
}

// ============================================================================
// Field filters
// ============================================================================

fn is_fillable(el: &ElementRef) -> bool {
    let attrs = el.value();
    if attrs.attr("disabled").is_some() {
        return false;
    }

    if attrs.name() != "input" {
        return true;
    }

    let input_type = attrs.attr("type").unwrap_or("text").trim().to_lowercase();
    !NON_FILLABLE_TYPES.contains(&input_type.as_str())
}

/// Static approximation of rendered visibility: the element and its ancestors
/// carry no `hidden` attribute and no inline `display:none`/`visibility:hidden`.
fn is_visible(el: &ElementRef) -> bool {
    std::iter::once(*el)
        .chain(el.ancestors().filter_map(ElementRef::wrap))
        .all(|node| !is_hidden_node(&node))
}

fn is_hidden_node(el: &ElementRef) -> bool {
    let attrs = el.value();
    if attrs.attr("hidden").is_some() {
        return true;
    }

    match attrs.attr("style") {
        Some(style) => {
            let compact: String = style
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_lowercase();
            compact.contains("display:none") || compact.contains("visibility:hidden")
        }
        None => false,
    }
}

fn inside_form(el: &ElementRef) -> bool {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| a.value().name() == "form")
}

// ============================================================================
// Descriptor construction
// ============================================================================

fn to_field(document: &Html, el: &ElementRef) -> FieldDescriptor {
    let attrs = el.value();
    let attr = |name: &str| attrs.attr(name).unwrap_or_default().trim().to_string();

    let required = attrs.attr("required").is_some()
        || attrs
            .attr("aria-required")
            .is_some_and(|v| v.eq_ignore_ascii_case("true"));

    FieldDescriptor {
        selector: derive_selector(el),
        dom_type: DomType::from_element(attrs.name(), attrs.attr("type")),
        name: attr("name"),
        id: attr("id"),
        label: derive_label(document, el),
        placeholder: attr("placeholder"),
        required,
        autocomplete: attr("autocomplete"),
    }
}

/// Locator that can be resolved again at fill time: `#id`, then
/// `[name="..."]`, then a structural tag/class path below `<body>`.
///
/// The structural path is not guaranteed unique; repeated markup yields
/// identical paths.
pub fn derive_selector(el: &ElementRef) -> String {
    let attrs = el.value();

    if let Some(id) = attrs.attr("id").filter(|id| !id.trim().is_empty()) {
        return format!("#{}", id);
    }

    if let Some(name) = attrs.attr("name").filter(|n| !n.trim().is_empty()) {
        return format!("[name=\"{}\"]", name);
    }

    let mut steps = Vec::new();
    for node in std::iter::once(*el).chain(el.ancestors().filter_map(ElementRef::wrap)) {
        let tag = node.value().name();
        if tag == "body" || tag == "html" {
            break;
        }

        let mut step = tag.to_string();
        for class in node.value().attr("class").unwrap_or_default().split_whitespace() {
            step.push('.');
            step.push_str(class);
        }
        steps.push(step);
    }

    steps.reverse();
    steps.join(" > ")
}

/// Human-readable label for a field, first non-empty of: `<label for>`,
/// wrapping `<label>`, preceding sibling `<label>`, placeholder, name.
pub fn derive_label(document: &Html, el: &ElementRef) -> String {
    let attrs = el.value();

    if let Some(id) = attrs.attr("id").filter(|id| !id.is_empty()) {
        let text = document
            .select(&LABEL_SELECTOR)
            .filter(|label| label.value().attr("for") == Some(id))
            .map(|label| label_text(&label))
            .find(|text| !text.is_empty());
        if let Some(text) = text {
            return text;
        }
    }

    if let Some(wrapper) = el
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| a.value().name() == "label")
    {
        let text = label_text(&wrapper);
        if !text.is_empty() {
            return text;
        }
    }

    if let Some(prev) = el.prev_siblings().find_map(ElementRef::wrap) {
        if prev.value().name() == "label" {
            let text = label_text(&prev);
            if !text.is_empty() {
                return text;
            }
        }
    }

    attrs
        .attr("placeholder")
        .filter(|p| !p.trim().is_empty())
        .or_else(|| attrs.attr("name"))
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Whitespace-collapsed text of a label, skipping text that belongs to nested
/// controls (option lists of a wrapped `<select>`, textarea contents).
fn label_text(label: &ElementRef) -> String {
    let mut raw = String::new();
    collect_text(label, &mut raw);
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text(el: &ElementRef, out: &mut String) {
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push(' ');
        } else if let Some(child_el) = ElementRef::wrap(child) {
            if !matches!(child_el.value().name(), "select" | "textarea" | "script" | "style") {
                collect_text(&child_el, out);
            }
        }
    }
}
