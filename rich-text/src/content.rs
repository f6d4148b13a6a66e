//! Rich-text content
//!
//! [`Content`] owns one parsed fragment. Legacy editor wrappers are normalized into markers when
//! the content is built, so everything downstream only ever sees canonical markers.
//! Attachments are derived on every call; nothing is cached between calls.
//!
//! The stored and transported form is the HTML string. [`ContentCodec`] and the serde impls
//! both go through it, never through the tree.

use crate::attachables::{Attachable, AttachableRegistry};
use crate::attachment::{self, Attachment};
use crate::attributes::Attributes;
use crate::error::RichTextError;
use crate::fragment::{nodes, Fragment, IntoFragment, Selector};
use crate::legacy::{self, MalformedPayloadPolicy};
use crate::minification::fragment_by_minifying_attachments;
use crate::plain_text::fragment_to_plain_text;
use indexmap::IndexSet;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::rc::Rc;

/// Settings threaded through one [`Content`]
#[derive(Debug, Clone)]
pub struct ContentOptions {
    tag_name: String,
    malformed_payload: MalformedPayloadPolicy,
    registry: Rc<AttachableRegistry>,
}

impl ContentOptions {
    /// Options using the process-wide tag name as it is right now
    pub fn new() -> Self {
        Self {
            tag_name: attachment::tag_name(),
            malformed_payload: MalformedPayloadPolicy::default(),
            registry: Rc::new(AttachableRegistry::default()),
        }
    }

    pub fn with_tag_name(mut self, tag_name: &str) -> Self {
        self.tag_name = tag_name.to_ascii_lowercase();
        self
    }

    pub fn with_registry(mut self, registry: Rc<AttachableRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_malformed_payload_policy(mut self, policy: MalformedPayloadPolicy) -> Self {
        self.malformed_payload = policy;
        self
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn malformed_payload_policy(&self) -> MalformedPayloadPolicy {
        self.malformed_payload
    }

    pub fn registry(&self) -> &AttachableRegistry {
        &self.registry
    }
}

impl Default for ContentOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// A parsed rich-text document
#[derive(Clone)]
pub struct Content {
    fragment: Fragment,
    options: ContentOptions,
}

impl Content {
    /// Parse `html` with default options
    pub fn new(html: &str) -> Result<Self, RichTextError> {
        Self::with_options(html, ContentOptions::default())
    }

    /// Build from HTML or a fragment, normalizing legacy attachments on the way in
    pub fn with_options<T: IntoFragment>(
        source: T,
        options: ContentOptions,
    ) -> Result<Self, RichTextError> {
        let fragment = Fragment::wrap(source)?;
        let fragment = legacy::normalize(&fragment, &options.tag_name, options.malformed_payload)?;
        Ok(Self { fragment, options })
    }

    pub fn fragment(&self) -> &Fragment {
        &self.fragment
    }

    pub fn options(&self) -> &ContentOptions {
        &self.options
    }

    pub fn render(&self) -> Result<String, RichTextError> {
        self.fragment.render()
    }

    /// Distinct `href`s of every anchor, in first-occurrence order
    pub fn links(&self) -> Vec<String> {
        let links: IndexSet<String> = self
            .fragment
            .query(&Selector::descendant("a"))
            .filter_map(|anchor| nodes::attribute(&anchor, "href"))
            .collect();
        links.into_iter().collect()
    }

    /// One attachment per marker, in document order
    pub fn attachments(&self) -> Vec<Attachment> {
        self.fragment
            .query(&self.marker_selector())
            .map(|node| Attachment::from_node(node, &self.options.registry))
            .collect()
    }

    pub fn attachables(&self) -> Vec<Rc<dyn Attachable>> {
        self.attachments()
            .into_iter()
            .map(|attachment| attachment.attachable().clone())
            .collect()
    }

    pub fn to_plain_text(&self) -> String {
        fragment_to_plain_text(&self.fragment, &self.options.tag_name, &self.options.registry)
    }

    /// HTML with each marker's body filled with its attachable's rendering
    pub fn render_attachments(&self) -> Result<String, RichTextError> {
        let rendered = self
            .fragment
            .try_replace(&self.marker_selector(), |node| {
                let attachment = Attachment::from_node(node.clone(), &self.options.registry);
                let body = Fragment::parse(&attachment.attachable().rich_text_render())?;
                let marker = nodes::shallow_clone(node);
                nodes::move_children(body.root(), &marker);
                Ok::<_, RichTextError>(marker)
            })?;
        rendered.render()
    }

    /// HTML with every marker turned back into the editor's `<figure>` form
    pub fn to_legacy_html(&self) -> Result<String, RichTextError> {
        let converted = self.fragment.try_replace(&self.marker_selector(), |node| {
            Attachment::from_node(node.clone(), &self.options.registry)
                .to_legacy_format(None)
                .to_node()
        })?;
        converted.render()
    }

    /// Same content with marker bodies stripped
    pub fn minified(&self) -> Result<Self, RichTextError> {
        Ok(Self {
            fragment: fragment_by_minifying_attachments(&self.fragment, &self.options.tag_name)?,
            options: self.options.clone(),
        })
    }

    /// New content with one marker per attachable appended at the end.
    ///
    /// Attachables that describe no allow-listed attribute are skipped.
    pub fn append_attachables<I>(&self, attachables: I) -> Self
    where
        I: IntoIterator<Item = Rc<dyn Attachable>>,
    {
        let fragment = self.fragment.deep_clone();
        for attachable in attachables {
            if let Some(attachment) = Attachment::from_attachable_with_tag_name(
                attachable,
                Attributes::new(),
                &self.options.tag_name,
            ) {
                fragment.append(attachment.node().clone());
            }
        }
        Self {
            fragment,
            options: self.options.clone(),
        }
    }

    /// True when the content holds nothing but whitespace
    pub fn is_empty(&self) -> bool {
        self.fragment.is_blank()
    }

    fn marker_selector(&self) -> Selector {
        Selector::descendant(&self.options.tag_name)
    }
}

impl Default for Content {
    fn default() -> Self {
        Self {
            fragment: Fragment::empty(),
            options: ContentOptions::default(),
        }
    }
}

impl PartialEq for Content {
    fn eq(&self, other: &Self) -> bool {
        match (self.render(), other.render()) {
            (Ok(mine), Ok(theirs)) => mine == theirs,
            _ => false,
        }
    }
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Content")
            .field("fragment", &self.fragment)
            .field("tag_name", &self.options.tag_name)
            .finish()
    }
}

/// Stores content as its HTML string
#[derive(Debug, Clone, Default)]
pub struct ContentCodec {
    options: ContentOptions,
}

impl ContentCodec {
    pub fn new(options: ContentOptions) -> Self {
        Self { options }
    }

    pub fn encode(&self, content: &Content) -> Result<String, RichTextError> {
        content.render()
    }

    pub fn decode(&self, html: &str) -> Result<Content, RichTextError> {
        Content::with_options(html, self.options.clone())
    }
}

impl Serialize for Content {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let html = self.render().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&html)
    }
}

impl<'de> Deserialize<'de> for Content {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let html = String::deserialize(deserializer)?;
        Content::new(&html).map_err(serde::de::Error::custom)
    }
}
