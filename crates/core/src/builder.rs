//! New-agent row validation.
//!
//! A new-agent row without a name is how a user deletes it, so a blank name
//! skips the row silently. `integrate` is read from an explicit table of
//! literal forms instead of truthiness; anything unrecognized skips the row
//! with a warning rather than guessing.

use crate::agent::{INSTANCE_SUFFIX, NewAgent};
use crate::row::{RawRow, text_field};
use serde_json::Value;
use tracing::warn;

/// Validate and default one raw new-agent row.
pub fn build_new_agent(row: &RawRow) -> Option<NewAgent> {
    let name = text_field(row, "name");
    if name.is_empty() {
        return None;
    }

    let integrate = match parse_integrate(row.get("integrate")) {
        Ok(flag) => flag,
        Err(raw) => {
            warn!(agent = %name, value = %raw, "Skipping new agent: unrecognized integrate value");
            return None;
        }
    };

    let mut instance_name = text_field(row, "instance_name");
    if instance_name.is_empty() {
        instance_name = format!("{}{INSTANCE_SUFFIX}", name.to_lowercase());
    }

    Some(NewAgent {
        name,
        instance_name,
        integrate,
    })
}

/// Interpret the `integrate` cell.
///
/// Only an absent key defaults to `true`; an explicit `null` is `false`. On failure the offending value is
/// returned as text for the warning.
pub fn parse_integrate(value: Option<&Value>) -> Result<bool, String> {
    match value {
        None => Ok(true),
        Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(1) => Ok(true),
            Some(0) => Ok(false),
            _ => Err(n.to_string()),
        },
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "on" | "1" => Ok(true),
            "false" | "no" | "n" | "off" | "0" | "" => Ok(false),
            _ => Err(s.clone()),
        },
        Some(other) => Err(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> RawRow {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn blank_name_is_skipped() {
        assert!(build_new_agent(&row(json!({ "name": "   ", "instance_name": "x_i" }))).is_none());
        assert!(build_new_agent(&row(json!({ "name": null }))).is_none());
        assert!(build_new_agent(&row(json!({}))).is_none());
    }

    #[test]
    fn instance_name_derived_from_lowercased_name() {
        let agent = build_new_agent(&row(json!({ "name": "Driver", "instance_name": "" }))).unwrap();
        assert_eq!(agent.name(), "Driver");
        assert_eq!(agent.instance_name(), "driver_i");
    }

    #[test]
    fn explicit_instance_name_is_trimmed_and_kept() {
        let agent =
            build_new_agent(&row(json!({ "name": " spi ", "instance_name": " spi0 " }))).unwrap();
        assert_eq!(agent.name(), "spi");
        assert_eq!(agent.instance_name(), "spi0");
    }

    #[test]
    fn integrate_defaults_to_true_when_absent() {
        let agent = build_new_agent(&row(json!({ "name": "uart" }))).unwrap();
        assert!(agent.integrate());
    }

    #[test]
    fn integrate_false_is_respected() {
        let agent = build_new_agent(&row(json!({ "name": "uart", "integrate": false }))).unwrap();
        assert!(!agent.integrate());
    }

    #[test]
    fn integrate_literal_forms() {
        assert_eq!(parse_integrate(Some(&json!("Yes"))), Ok(true));
        assert_eq!(parse_integrate(Some(&json!(" off "))), Ok(false));
        assert_eq!(parse_integrate(Some(&json!(1))), Ok(true));
        assert_eq!(parse_integrate(Some(&json!(0))), Ok(false));
        assert_eq!(parse_integrate(Some(&json!(""))), Ok(false));
        assert_eq!(parse_integrate(Some(&Value::Null)), Ok(false));
    }

    #[test]
    fn explicit_null_integrate_is_false() {
        let agent = build_new_agent(&row(json!({ "name": "spi", "integrate": null }))).unwrap();
        assert!(!agent.integrate());
    }

    #[test]
    fn unrecognized_integrate_skips_row() {
        assert!(parse_integrate(Some(&json!("ture"))).is_err());
        assert!(parse_integrate(Some(&json!(2))).is_err());
        assert!(parse_integrate(Some(&json!([true]))).is_err());
        assert!(build_new_agent(&row(json!({ "name": "spi", "integrate": "maybe" }))).is_none());
    }
}
