//! Legacy editor format (Trix)
//!
//! The editor stores attachments as a wrapper element (usually `<figure>`) carrying two JSON
//! payloads in attributes:
//!
//!     <figure data-trix-attachment='{"sgid":"123","contentType":"text/plain","width":200}'
//!             data-trix-attributes='{"caption":"Captioned"}'></figure>
//!
//! On the way in, [`normalize`] swaps every such wrapper for a canonical marker element. On the
//! way out, [`LegacyAttachment`] rebuilds the wrapper from a marker.
//!
//! Malformed JSON is handled according to [`MalformedPayloadPolicy`]. The default aborts the
//! whole pass with [`RichTextError::MalformedLegacyPayload`]; `Skip` leaves the offending
//! wrapper in place and keeps going.

mod attachment;

pub use attachment::{LegacyAttachment, COMPOSED_ATTRIBUTES, LEGACY_ATTRIBUTES};

use crate::attributes::{filter_allowed, Attributes, Direction};
use crate::error::RichTextError;
use crate::fragment::{nodes, Fragment, Handle, Selector};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Attribute holding the attachment JSON
pub const ATTACHMENT_ATTRIBUTE: &str = "data-trix-attachment";

/// Attribute holding the presentation JSON (caption, presentation)
pub const ATTRIBUTES_ATTRIBUTE: &str = "data-trix-attributes";

/// What to do with a wrapper whose JSON does not parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPayloadPolicy {
    /// Fail the whole normalization
    #[default]
    Abort,
    /// Leave the wrapper untouched and continue
    Skip,
}

/// Replace every legacy wrapper in `fragment` with a `tag_name` marker.
///
/// Returns a new fragment; `fragment` is left as it was.
pub fn normalize(
    fragment: &Fragment,
    tag_name: &str,
    policy: MalformedPayloadPolicy,
) -> Result<Fragment, RichTextError> {
    let selector = Selector::with_attribute(ATTACHMENT_ATTRIBUTE);
    fragment.try_replace(&selector, |node| match marker_from_wrapper(node, tag_name) {
        Ok(marker) => Ok(marker),
        Err(error) if policy == MalformedPayloadPolicy::Skip => {
            warn!(%error, "skipping malformed legacy attachment");
            Ok(node.clone())
        }
        Err(error) => Err(error),
    })
}

fn marker_from_wrapper(node: &Handle, tag_name: &str) -> Result<Handle, RichTextError> {
    let mut payload = parse_payload(node, ATTACHMENT_ATTRIBUTE)?;
    payload.extend(parse_payload(node, ATTRIBUTES_ATTRIBUTE)?);

    let attributes: Attributes = payload
        .into_iter()
        .filter_map(|(key, value)| attribute_value(value).map(|value| (key, value)))
        .collect();
    let attributes = filter_allowed(&attributes, Direction::Wire);

    debug!(
        wrapper = nodes::local_name(node).unwrap_or_default(),
        attributes = attributes.len(),
        "normalized legacy attachment"
    );
    Ok(nodes::create_element(tag_name, attributes.iter()))
}

/// JSON object in `attribute`; a missing attribute reads as an empty object
fn parse_payload(node: &Handle, attribute: &str) -> Result<Map<String, Value>, RichTextError> {
    let Some(raw) = nodes::attribute(node, attribute) else {
        return Ok(Map::new());
    };

    let malformed = |message: String| RichTextError::MalformedLegacyPayload {
        attribute: attribute.to_string(),
        message,
    };
    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(malformed(format!("expected a JSON object, got {}", json_type(&other)))),
        Err(error) => Err(malformed(error.to_string())),
    }
}

/// Attribute text for a JSON value; `null` drops the attribute
fn attribute_value(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        nested => Some(nested.to_string()),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
