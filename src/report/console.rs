use crate::analysis::analyzer::AnalysisResult;
use crate::autofill::fill_model::FillResult;
use crate::form::classifier::classify;
use crate::form::form_model::FormDescriptor;

// ============================================================================
// Terminal rendering of scan, analysis and fill results
// ============================================================================

/// Format detected forms, one line per field with its classified type.
///
/// ```text
/// === Form 0: #apply (post /submit) ===
///   [email]      #email  "Email *"  (required)
/// ```
pub fn format_scan_report(forms: &[FormDescriptor]) -> String {
    let mut out = String::new();

    if forms.is_empty() {
        out.push_str("No fillable forms detected.\n");
        return out;
    }

    for form in forms {
        if form.is_standalone() {
            out.push_str("=== Standalone fields ===\n");
        } else {
            out.push_str(&format!(
                "=== Form {}: {} ({} {}) ===\n",
                form.index,
                form.selector,
                form.method,
                if form.action.is_empty() { "-" } else { form.action.as_str() }
            ));
        }

        for field in &form.fields {
            let field_type = classify(field).to_string();
            out.push_str(&format!(
                "  {:<14} {:<8} {}  \"{}\"{}\n",
                format!("[{}]", field_type),
                field.dom_type.to_string(),
                field.selector,
                field.label,
                if field.required { "  (required)" } else { "" }
            ));
        }
        out.push('\n');
    }

    out
}

/// Format a completeness check.
pub fn format_analysis_report(result: &AnalysisResult) -> String {
    let mut out = String::new();

    if result.complete {
        out.push_str("\u{2713} Profile covers every required field.\n");
        return out;
    }

    out.push_str(&format!(
        "\u{2717} {} required field(s) missing data:\n",
        result.missing_fields.len()
    ));
    for missing in &result.missing_fields {
        out.push_str(&format!(
            "    [form {}] {} \"{}\" ({}): {}\n",
            missing.form_index, missing.selector, missing.label, missing.detected_type, missing.reason
        ));
    }

    out
}

/// Format the fields an autofill pass filled.
pub fn format_fill_report(results: &[FillResult]) -> String {
    let mut out = String::new();

    if results.is_empty() {
        out.push_str("Nothing was filled.\n");
        return out;
    }

    out.push_str(&format!("Filled {} field(s):\n", results.len()));
    for result in results {
        out.push_str(&format!(
            "  \u{2713} {:<14} {} = {}\n",
            result.field_type,
            result.selector,
            truncate(&result.value, 60)
        ));
    }

    out
}

fn truncate(value: &str, max_chars: usize) -> String {
    let single_line = value.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= max_chars {
        single_line
    } else {
        let cut: String = single_line.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}
