//! JSON Schema loading for configuration files.
//!
//! Schemas are bundled into the binary so validation does not depend on the
//! working directory. The `schema_version` const inside each schema is checked
//! against the version the Rust side expects before compiling, so a schema
//! edit that forgets to bump one side fails loudly.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;

use crate::catalog::CATEGORIES_SCHEMA_VERSION;

const CATEGORIES_SCHEMA: &str = include_str!("../schema/categories.schema.json");

/// A compiled schema plus the label used in error messages.
pub(crate) struct CompiledSchema {
    label: &'static str,
    compiled: JSONSchema,
}

impl CompiledSchema {
    /// Validate an instance, joining every violation into one error.
    pub(crate) fn validate(&self, instance: &Value) -> Result<()> {
        if let Err(errors) = self.compiled.validate(instance) {
            let details = errors
                .map(|err| format!("{}: {}", err.instance_path, err))
                .collect::<Vec<_>>()
                .join("\n");
            bail!("{} failed schema validation:\n{}", self.label, details);
        }
        Ok(())
    }
}

pub(crate) fn categories_schema() -> Result<CompiledSchema> {
    compile(
        "category list",
        CATEGORIES_SCHEMA,
        CATEGORIES_SCHEMA_VERSION,
    )
}

fn compile(label: &'static str, raw: &str, expected_version: &str) -> Result<CompiledSchema> {
    let schema: Value =
        serde_json::from_str(raw).with_context(|| format!("parsing bundled {label} schema"))?;

    let version = extract_schema_version(&schema, "/properties/schema_version/const")
        .ok_or_else(|| anyhow!("{label} schema missing schema_version const"))?;
    if version != expected_version {
        bail!("{label} schema declares '{version}', expected {expected_version}");
    }

    let compiled = JSONSchema::compile(&schema)
        .map_err(|err| anyhow!("compiling bundled {label} schema: {err}"))?;
    Ok(CompiledSchema { label, compiled })
}

fn extract_schema_version(schema: &Value, pointer: &str) -> Option<String> {
    let version = schema.pointer(pointer).and_then(Value::as_str)?;
    if version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        Some(version.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bundled_schema_compiles() {
        categories_schema().unwrap();
    }

    #[test]
    fn reports_instance_path_of_violation() {
        let schema = categories_schema().unwrap();
        let err = schema
            .validate(&json!({
                "schema_version": CATEGORIES_SCHEMA_VERSION,
                "categories": [{"id": "Bad Id", "name": "x", "name_zh": "y"}]
            }))
            .unwrap_err();
        assert!(err.to_string().contains("/categories/0/id"), "{err}");
    }

    #[test]
    fn rejects_version_mismatch_between_schema_and_code() {
        assert!(compile("category list", CATEGORIES_SCHEMA, "healthcards_categories_v2").is_err());
    }
}
