//! Firefly request schema
//!
//! The accepted shape of a generation request is kept as a JSON Schema
//! document. The same document drives input validation and can be published
//! as documentation via [`payload_schema`]. The one rule JSON Schema cannot
//! express (seed count equals variation count) is checked after decoding.
//!
//! ## Example
//!
//! ```rust,ignore
//! use siumai_provider_firefly::schema::validate;
//! use serde_json::json;
//!
//! let payload = validate(&json!({ "prompt": "  a lighthouse  " }))?;
//! assert_eq!(payload.prompt, "a lighthouse");
//! assert_eq!(payload.num_variations, 1);
//! ```

use jsonschema::error::ValidationErrorKind;
use serde_json::{Value, json};

use crate::error::{FireflyError, Result};
use crate::types::{
    DEFAULT_DIMENSION, DEFAULT_LOCALE, ImageGenPayload, MAX_DIMENSION, MAX_VARIATIONS,
    MIN_DIMENSION,
};

/// Longest accepted negative prompt, in characters.
pub const MAX_NEGATIVE_PROMPT_CHARS: u32 = 1024;

lazy_static::lazy_static! {
    static ref PAYLOAD_SCHEMA: Value = build_schema();
    static ref PAYLOAD_VALIDATOR: std::result::Result<jsonschema::Validator, String> =
        jsonschema::options()
            .should_validate_formats(true)
            .build(&PAYLOAD_SCHEMA)
            .map_err(|e| e.to_string());
}

fn build_schema() -> Value {
    let dimension = json!({
        "type": "integer",
        "minimum": MIN_DIMENSION,
        "maximum": MAX_DIMENSION,
        "default": DEFAULT_DIMENSION
    });
    let strength = json!({ "type": "integer", "minimum": 0, "maximum": 100 });

    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "ImageGenPayload",
        "description": "Body of the Adobe Firefly v3 images/generate request",
        "type": "object",
        "required": ["prompt"],
        "properties": {
            "prompt": { "type": "string", "minLength": 1 },
            "numVariations": {
                "type": "integer",
                "minimum": 1,
                "maximum": MAX_VARIATIONS,
                "default": 1
            },
            "seeds": { "type": "array", "items": { "type": "integer" } },
            "size": {
                "type": "object",
                "properties": { "width": dimension, "height": dimension },
                "default": {}
            },
            "negativePrompt": { "type": "string", "maxLength": MAX_NEGATIVE_PROMPT_CHARS },
            "contentClass": { "enum": ["photo", "art"] },
            "visualIntensity": { "type": "integer", "minimum": 2, "maximum": 10 },
            "style": {
                "type": "object",
                "properties": {
                    "presets": { "type": "array", "items": { "type": "string" } },
                    "strength": strength,
                    "imageReference": { "$ref": "#/$defs/PublicBinaryInput" }
                }
            },
            "structure": {
                "type": "object",
                "properties": {
                    "strength": strength,
                    "imageReference": { "$ref": "#/$defs/PublicBinaryInput" }
                }
            },
            "promptBiasingLocaleCode": { "type": "string", "default": DEFAULT_LOCALE },
            "tileable": { "type": "boolean", "default": false }
        },
        "$defs": {
            "PublicBinaryInput": {
                "type": "object",
                "properties": {
                    "url": { "type": "string", "format": "uri" },
                    "uploadId": { "type": "string" }
                }
            }
        }
    })
}

/// The JSON Schema every generation payload is checked against.
pub fn payload_schema() -> &'static Value {
    &PAYLOAD_SCHEMA
}

/// Validate a raw request and turn it into a [`ImageGenPayload`].
///
/// Applies defaults for omitted fields, trims the prompt and rejects the
/// first offending field with [`FireflyError::Validation`].
pub fn validate(raw: &Value) -> Result<ImageGenPayload> {
    let validator = PAYLOAD_VALIDATOR
        .as_ref()
        .map_err(|e| FireflyError::Configuration(format!("Invalid payload schema: {e}")))?;

    if let Some(err) = validator.iter_errors(raw).next() {
        return Err(FireflyError::validation(field_path(&err), err.to_string()));
    }

    let mut payload: ImageGenPayload = serde_json::from_value(raw.clone())
        .map_err(|e| FireflyError::validation("$", e.to_string()))?;

    payload.prompt = payload.prompt.trim().to_string();
    if payload.prompt.is_empty() {
        return Err(FireflyError::validation("prompt", "prompt must not be blank"));
    }

    if let Some(seeds) = &payload.seeds
        && seeds.len() != payload.num_variations as usize
    {
        return Err(FireflyError::validation(
            "seeds",
            format!(
                "len(seeds) must match numVariations (got {} seeds for {} variations)",
                seeds.len(),
                payload.num_variations
            ),
        ));
    }

    Ok(payload)
}

/// Dotted field path of a schema error, e.g. `size.width` or `seeds.1`.
fn field_path(err: &jsonschema::ValidationError<'_>) -> String {
    let pointer = err.instance_path.to_string();
    let mut segments: Vec<String> = pointer
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| s.replace("~1", "/").replace("~0", "~"))
        .collect();

    if let ValidationErrorKind::Required { property } = &err.kind
        && let Some(name) = property.as_str()
    {
        segments.push(name.to_string());
    }

    if segments.is_empty() {
        "$".to_string()
    } else {
        segments.join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContentClass, Size};

    fn field_of(raw: Value) -> String {
        validate(&raw)
            .unwrap_err()
            .field()
            .expect("validation error")
            .to_string()
    }

    #[test]
    fn applies_defaults() {
        let payload = validate(&json!({ "prompt": "  a red kite  " })).unwrap();
        assert_eq!(payload.prompt, "a red kite");
        assert_eq!(payload.num_variations, 1);
        assert_eq!(payload.size, Size::default());
        assert_eq!(payload.prompt_biasing_locale_code, "en-US");
        assert!(!payload.tileable);
        assert!(payload.seeds.is_none());
    }

    #[test]
    fn accepts_full_range_of_variations_and_sizes() {
        for n in 1..=4u32 {
            for (w, h) in [(1, 1), (1024, 768), (2688, 2688)] {
                let payload = validate(&json!({
                    "prompt": "p",
                    "numVariations": n,
                    "size": { "width": w, "height": h }
                }))
                .unwrap();
                assert_eq!(payload.num_variations, n);
                assert_eq!(payload.size, Size { width: w, height: h });
            }
        }
    }

    #[test]
    fn partial_size_fills_missing_edge() {
        let payload = validate(&json!({ "prompt": "p", "size": { "width": 640 } })).unwrap();
        assert_eq!(payload.size, Size { width: 640, height: 1024 });
    }

    #[test]
    fn rejects_out_of_range_fields() {
        assert_eq!(field_of(json!({ "prompt": "p", "numVariations": 0 })), "numVariations");
        assert_eq!(field_of(json!({ "prompt": "p", "numVariations": 5 })), "numVariations");
        assert_eq!(
            field_of(json!({ "prompt": "p", "size": { "width": 2689 } })),
            "size.width"
        );
        assert_eq!(
            field_of(json!({ "prompt": "p", "size": { "height": 0 } })),
            "size.height"
        );
        assert_eq!(field_of(json!({ "prompt": "p", "visualIntensity": 1 })), "visualIntensity");
        assert_eq!(field_of(json!({ "prompt": "p", "visualIntensity": 11 })), "visualIntensity");
        assert_eq!(
            field_of(json!({ "prompt": "p", "style": { "strength": 101 } })),
            "style.strength"
        );
        assert_eq!(
            field_of(json!({ "prompt": "p", "structure": { "strength": -1 } })),
            "structure.strength"
        );
        assert_eq!(field_of(json!({ "prompt": "p", "contentClass": "sketch" })), "contentClass");
    }

    #[test]
    fn negative_prompt_length_limit() {
        let ok = "x".repeat(1024);
        assert!(validate(&json!({ "prompt": "p", "negativePrompt": ok })).is_ok());

        let too_long = "x".repeat(1025);
        assert_eq!(
            field_of(json!({ "prompt": "p", "negativePrompt": too_long })),
            "negativePrompt"
        );
    }

    #[test]
    fn rejects_missing_or_blank_prompt() {
        assert_eq!(field_of(json!({})), "prompt");
        assert_eq!(field_of(json!({ "prompt": "" })), "prompt");
        assert_eq!(field_of(json!({ "prompt": "   " })), "prompt");
    }

    #[test]
    fn seeds_must_match_variations() {
        let err = validate(&json!({ "prompt": "p", "numVariations": 2, "seeds": [1] })).unwrap_err();
        assert_eq!(err.field(), Some("seeds"));

        let err = validate(&json!({ "prompt": "p", "seeds": [1, 2] })).unwrap_err();
        assert_eq!(err.field(), Some("seeds"));

        let payload =
            validate(&json!({ "prompt": "p", "numVariations": 3, "seeds": [1, 2, 3] })).unwrap();
        assert_eq!(payload.seeds, Some(vec![1, 2, 3]));
    }

    #[test]
    fn keeps_optional_creative_settings() {
        let payload = validate(&json!({
            "prompt": "p",
            "contentClass": "art",
            "visualIntensity": 6,
            "style": { "presets": ["watercolor"], "strength": 40 },
            "structure": { "imageReference": { "uploadId": "abc" } },
            "promptBiasingLocaleCode": "de-DE",
            "tileable": true
        }))
        .unwrap();

        assert_eq!(payload.content_class, Some(ContentClass::Art));
        assert_eq!(payload.visual_intensity, Some(6));
        assert_eq!(payload.style.unwrap().strength, Some(40));
        assert_eq!(
            payload.structure.unwrap().image_reference.unwrap().upload_id.as_deref(),
            Some("abc")
        );
        assert_eq!(payload.prompt_biasing_locale_code, "de-DE");
        assert!(payload.tileable);
    }

    #[test]
    fn schema_documents_defaults() {
        let schema = payload_schema();
        assert_eq!(schema["properties"]["numVariations"]["default"], json!(1));
        assert_eq!(
            schema["properties"]["promptBiasingLocaleCode"]["default"],
            json!("en-US")
        );
        assert_eq!(schema["required"], json!(["prompt"]));
    }
}
