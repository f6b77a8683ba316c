//! Declarative response schemas for structured generation.
//!
//! A [`ResponseSchema`] is a plain description of the JSON object a
//! structured generation call must return: named typed fields plus a
//! required-field list. It renders to the Gemini REST schema form and
//! validates raw model output before anything downstream sees it — a
//! syntactically valid JSON blob missing a required field is a hard
//! failure, not a best-effort partial result.

use crate::error::{AuthoringError, Result};

/// The type of a schema field.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// A string value.
    Str,
    /// A numeric value.
    Number,
    /// A boolean value.
    Bool,
    /// An array of strings.
    StrArray,
    /// An array of objects, each conforming to the nested schema.
    ObjectArray(ResponseSchema),
}

/// One named field of an object schema.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    pub description: Option<String>,
    pub required: bool,
}

/// A declarative object schema: ordered named fields + required list.
#[derive(Debug, Clone, Default)]
pub struct ResponseSchema {
    fields: Vec<Field>,
}

impl ResponseSchema {
    /// Create an empty object schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required field.
    pub fn required(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(Field {
            name: name.into(),
            kind,
            description: None,
            required: true,
        });
        self
    }

    /// Add an optional field.
    pub fn optional(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(Field {
            name: name.into(),
            kind,
            description: None,
            required: false,
        });
        self
    }

    /// Set the description of the most recently added field.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        if let Some(field) = self.fields.last_mut() {
            field.description = Some(description.into());
        }
        self
    }

    /// The fields of this schema, in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Render to the Gemini REST schema form (`"type": "STRING"` etc.).
    pub fn to_gemini(&self) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for field in &self.fields {
            properties.insert(field.name.clone(), Self::kind_to_gemini(field));
            if field.required {
                required.push(serde_json::Value::String(field.name.clone()));
            }
        }

        serde_json::json!({
            "type": "OBJECT",
            "properties": properties,
            "required": required,
        })
    }

    fn kind_to_gemini(field: &Field) -> serde_json::Value {
        let mut value = match &field.kind {
            FieldKind::Str => serde_json::json!({ "type": "STRING" }),
            FieldKind::Number => serde_json::json!({ "type": "NUMBER" }),
            FieldKind::Bool => serde_json::json!({ "type": "BOOLEAN" }),
            FieldKind::StrArray => serde_json::json!({
                "type": "ARRAY",
                "items": { "type": "STRING" },
            }),
            FieldKind::ObjectArray(item) => serde_json::json!({
                "type": "ARRAY",
                "items": item.to_gemini(),
            }),
        };

        if let Some(description) = &field.description {
            value["description"] = serde_json::Value::String(description.clone());
        }

        value
    }

    /// Parse raw model output and validate it against this schema.
    ///
    /// Fails with [`AuthoringError::SchemaValidation`] when the output
    /// is not valid JSON, is not an object, misses a required field,
    /// or holds a value of the wrong type.
    pub fn parse_and_validate(&self, raw: &str) -> Result<serde_json::Value> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| AuthoringError::SchemaValidation {
                reason: format!("response is not valid JSON: {}", e),
            })?;
        self.validate(&value)?;
        Ok(value)
    }

    /// Validate an already-parsed value against this schema.
    pub fn validate(&self, value: &serde_json::Value) -> Result<()> {
        let object = value
            .as_object()
            .ok_or_else(|| AuthoringError::SchemaValidation {
                reason: "response is not a JSON object".to_string(),
            })?;

        for field in &self.fields {
            match object.get(&field.name) {
                None | Some(serde_json::Value::Null) => {
                    if field.required {
                        return Err(AuthoringError::SchemaValidation {
                            reason: format!("missing required field '{}'", field.name),
                        });
                    }
                }
                Some(found) => Self::validate_kind(&field.name, &field.kind, found)?,
            }
        }

        Ok(())
    }

    fn validate_kind(name: &str, kind: &FieldKind, value: &serde_json::Value) -> Result<()> {
        let mismatch = |expected: &str| AuthoringError::SchemaValidation {
            reason: format!("field '{}' is not a {}", name, expected),
        };

        match kind {
            FieldKind::Str => {
                value.as_str().ok_or_else(|| mismatch("string"))?;
            }
            FieldKind::Number => {
                value.as_f64().ok_or_else(|| mismatch("number"))?;
            }
            FieldKind::Bool => {
                value.as_bool().ok_or_else(|| mismatch("boolean"))?;
            }
            FieldKind::StrArray => {
                let items = value.as_array().ok_or_else(|| mismatch("string array"))?;
                if items.iter().any(|item| !item.is_string()) {
                    return Err(mismatch("string array"));
                }
            }
            FieldKind::ObjectArray(item_schema) => {
                let items = value.as_array().ok_or_else(|| mismatch("object array"))?;
                for item in items {
                    item_schema.validate(item)?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details_schema() -> ResponseSchema {
        ResponseSchema::new()
            .required("title", FieldKind::Str)
            .describe("A compelling, SEO-friendly blog post title.")
            .required("angle", FieldKind::Str)
            .required("keywords", FieldKind::StrArray)
    }

    #[test]
    fn test_gemini_rendering() {
        let schema = details_schema().to_gemini();

        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(schema["properties"]["title"]["type"], "STRING");
        assert_eq!(
            schema["properties"]["title"]["description"],
            "A compelling, SEO-friendly blog post title."
        );
        assert_eq!(schema["properties"]["keywords"]["type"], "ARRAY");
        assert_eq!(schema["properties"]["keywords"]["items"]["type"], "STRING");

        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(required, vec!["title", "angle", "keywords"]);
    }

    #[test]
    fn test_nested_object_array_rendering() {
        let schema = ResponseSchema::new()
            .required(
                "faqs",
                FieldKind::ObjectArray(
                    ResponseSchema::new()
                        .required("question", FieldKind::Str)
                        .required("answer", FieldKind::Str),
                ),
            )
            .to_gemini();

        assert_eq!(schema["properties"]["faqs"]["items"]["type"], "OBJECT");
        assert_eq!(
            schema["properties"]["faqs"]["items"]["properties"]["question"]["type"],
            "STRING"
        );
    }

    #[test]
    fn test_parse_and_validate_accepts_conforming_json() {
        let value = details_schema()
            .parse_and_validate(r#"{"title":"T","angle":"A","keywords":["a","b"]}"#)
            .unwrap();

        assert_eq!(value["title"], "T");
    }

    #[test]
    fn test_missing_required_field_is_hard_failure() {
        let result = details_schema().parse_and_validate(r#"{"title":"T","angle":"A"}"#);

        match result {
            Err(AuthoringError::SchemaValidation { reason }) => {
                assert!(reason.contains("keywords"));
            }
            other => panic!("expected SchemaValidation, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_invalid_json_is_hard_failure() {
        let result = details_schema().parse_and_validate("not json at all");
        assert!(matches!(
            result,
            Err(AuthoringError::SchemaValidation { .. })
        ));
    }

    #[test]
    fn test_wrong_type_rejected() {
        let result =
            details_schema().parse_and_validate(r#"{"title":"T","angle":"A","keywords":"oops"}"#);
        assert!(matches!(
            result,
            Err(AuthoringError::SchemaValidation { .. })
        ));
    }

    #[test]
    fn test_optional_field_may_be_absent() {
        let schema = ResponseSchema::new()
            .required("title", FieldKind::Str)
            .optional("subtitle", FieldKind::Str);

        assert!(schema.parse_and_validate(r#"{"title":"T"}"#).is_ok());
        assert!(schema
            .parse_and_validate(r#"{"title":"T","subtitle":null}"#)
            .is_ok());
    }
}
