//! Shared property-value formatting.
//!
//! The formatter output is part of the export contract and must stay
//! deterministic: 3 fixed decimals, two-digit scientific notation below
//! a magnitude of 1e-3, `Yes`/`No` for booleans, `N/A` for anything
//! non-finite or null.

use serde_json::Value;

/// Unit suffix for a known property name, lowercased lookup. Unknown
/// keys carry no unit.
pub fn unit_for(key: &str) -> Option<&'static str> {
    match key.to_lowercase().as_str() {
        "molecular_weight" | "mw" | "molecular weight" => Some("g/mol"),
        "tpsa" | "topological_polar_surface_area" | "topological polar surface area" => Some("Å²"),
        "log_s_(esol)" | "log_s_(ali)" | "log_s_(silicos-it)" | "esol" | "ali" => Some("mg/ml"),
        "log_kp_(skin_permeation)" | "log kp (skin permeation)" | "log_kp" | "skin_permeation"
        | "skin permeation" => Some("cm/s"),
        _ => None,
    }
}

/// `molecular_weight` -> `Molecular Weight`.
pub fn humanize_key(key: &str) -> String {
    key.replace('_', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_number(v: f64) -> String {
    if !v.is_finite() {
        return "N/A".to_string();
    }
    if v != 0.0 && v.abs() < 0.001 {
        format!("{:.2e}", v)
    } else {
        format!("{:.3}", v)
    }
}

/// Format a raw JSON property value, without unit.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "N/A".to_string(),
        Value::Bool(b) => if *b { "Yes" } else { "No" }.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(v) => format_number(v),
            None => "N/A".to_string(),
        },
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Format a property value and append the deterministic unit suffix
/// looked up from the property name. Only numeric values carry units.
pub fn format_property(key: &str, value: &Value) -> String {
    let formatted = format_value(value);
    if value.is_number() {
        if let Some(unit) = unit_for(key) {
            return format!("{} {}", formatted, unit);
        }
    }
    formatted
}
