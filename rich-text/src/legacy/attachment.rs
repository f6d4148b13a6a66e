use super::{ATTACHMENT_ATTRIBUTE, ATTRIBUTES_ATTRIBUTE};
use crate::attributes::{to_domain_key, Attributes};
use crate::error::RichTextError;
use crate::fragment::{nodes, serializer, Handle};
use serde_json::{Map, Value};

/// Presentation keys, stored apart from the attachment payload
pub const COMPOSED_ATTRIBUTES: [&str; 2] = ["caption", "presentation"];

/// Keys the editor understands, in its own camelCase
pub const LEGACY_ATTRIBUTES: [&str; 12] = [
    "sgid",
    "contentType",
    "url",
    "href",
    "filename",
    "filesize",
    "width",
    "height",
    "previewable",
    "content",
    "caption",
    "presentation",
];

/// An attachment in the editor's JSON form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacyAttachment {
    attributes: Map<String, Value>,
}

impl LegacyAttachment {
    /// Build from wire or domain attributes.
    ///
    /// Keys are converted to camelCase and filtered; `filesize`, `width` and `height` become
    /// integers when they parse as one, `previewable` becomes a boolean.
    pub fn from_attributes(attributes: &Attributes) -> Self {
        let mut converted = Map::new();
        for (key, value) in attributes.iter() {
            let key = to_domain_key(key);
            if LEGACY_ATTRIBUTES.contains(&key.as_str()) {
                let value = typecast(&key, value);
                converted.insert(key, value);
            }
        }
        Self {
            attributes: converted,
        }
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Everything but the composed keys
    pub fn attachment_attributes(&self) -> Map<String, Value> {
        self.attributes
            .iter()
            .filter(|(key, _)| !COMPOSED_ATTRIBUTES.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Only the composed keys
    pub fn composed_attributes(&self) -> Map<String, Value> {
        self.attributes
            .iter()
            .filter(|(key, _)| COMPOSED_ATTRIBUTES.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    pub fn content(&self) -> Option<&str> {
        self.attributes.get("content").and_then(Value::as_str)
    }

    /// The `<figure>` wrapper the editor expects
    pub fn to_node(&self) -> Result<Handle, RichTextError> {
        let attachment = to_json(&self.attachment_attributes())?;
        let composed = self.composed_attributes();

        let mut attrs = vec![(ATTACHMENT_ATTRIBUTE, attachment.as_str())];
        let composed = if composed.is_empty() {
            None
        } else {
            Some(to_json(&composed)?)
        };
        if let Some(composed) = &composed {
            attrs.push((ATTRIBUTES_ATTRIBUTE, composed.as_str()));
        }

        Ok(nodes::create_element("figure", attrs))
    }

    pub fn to_html(&self) -> Result<String, RichTextError> {
        serializer::serialize_node(&self.to_node()?)
    }
}

fn to_json(map: &Map<String, Value>) -> Result<String, RichTextError> {
    serde_json::to_string(map).map_err(|e| RichTextError::Serialization(e.to_string()))
}

fn typecast(key: &str, value: &str) -> Value {
    match key {
        "filesize" | "width" | "height" => value
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::from(value)),
        "previewable" => Value::Bool(matches!(value.trim(), "true" | "1")),
        _ => Value::from(value),
    }
}
