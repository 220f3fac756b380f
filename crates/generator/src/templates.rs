//! Template loading and management

use provider_codegen_common::{GeneratorError, Result};
use std::collections::HashMap;
use tera::{Tera, Value};

pub const DNS_PROVIDERS_TEMPLATE: &str = "dnsproviders.go";
pub const AUTOCERT_PROVIDERS_TEMPLATE: &str = "autocert_providers.go";

/// Load all templates
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    tera.register_filter("go_quote", go_quote_filter);

    tera.add_raw_template(
        DNS_PROVIDERS_TEMPLATE,
        include_str!("../templates/dnsproviders.go.tera"),
    )
    .map_err(|e| {
        GeneratorError::Generation(format!("Failed to load dnsproviders.go template: {}", e))
    })?;

    tera.add_raw_template(
        AUTOCERT_PROVIDERS_TEMPLATE,
        include_str!("../templates/autocert_providers.go.tera"),
    )
    .map_err(|e| {
        GeneratorError::Generation(format!(
            "Failed to load autocert_providers.go template: {}",
            e
        ))
    })?;

    Ok(tera)
}

/// Filter to render a string as a Go interpreted string literal
fn go_quote_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("go_quote filter expects a string"))?;

    Ok(Value::String(go_quote(s)))
}

pub(crate) fn go_quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for ch in s.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}

/// Whether `name` can be used as a Go package identifier
pub(crate) fn is_go_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}
