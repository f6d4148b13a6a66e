use super::{Attachable, PlainTextRender};
use crate::attributes::Attributes;
use crate::fragment::serializer::html_escape;
use std::any::Any;

/// Plain text shown for a missing attachable without a caption
pub const DEFAULT_MISSING_PLACEHOLDER: &str = "☒";

/// Fallback for markers that resolve to nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingAttachable {
    caption: Option<String>,
    placeholder: String,
}

impl MissingAttachable {
    pub fn new(caption: Option<&str>, placeholder: &str) -> Self {
        Self {
            caption: caption.filter(|c| !c.is_empty()).map(str::to_string),
            placeholder: placeholder.to_string(),
        }
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }
}

impl Default for MissingAttachable {
    fn default() -> Self {
        Self::new(None, DEFAULT_MISSING_PLACEHOLDER)
    }
}

impl Attachable for MissingAttachable {
    fn kind(&self) -> &str {
        "missing"
    }

    fn to_rich_text_attributes(&self, attributes: Attributes) -> Attributes {
        attributes
    }

    fn rich_text_render(&self) -> String {
        format!(
            "<span class=\"rich-text-missing-attachment\">{}</span>",
            html_escape(self.caption().unwrap_or(&self.placeholder))
        )
    }

    fn plain_text(&self) -> Option<&dyn PlainTextRender> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl PlainTextRender for MissingAttachable {
    fn plain_text_render(&self) -> String {
        self.caption().unwrap_or(&self.placeholder).to_string()
    }
}
