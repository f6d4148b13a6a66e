//! Attachments: one marker element paired with its resolved attachable
//!
//! # Marker tag name
//!
//! The marker tag defaults to [`DEFAULT_TAG_NAME`]. A process-wide default can be changed with
//! [`use_tag_name`]; treat it as configure-once-at-startup. Changing it while other threads
//! parse or render is not guarded against. Code that needs a different tag for a single
//! document should pass it explicitly through [`crate::content::ContentOptions`] instead.

use crate::attachables::{Attachable, AttachableRegistry};
use crate::attributes::{filter_allowed, Attributes, Direction, ATTRIBUTES};
use crate::error::RichTextError;
use crate::fragment::{nodes, serializer, Handle};
use crate::legacy::LegacyAttachment;
use once_cell::sync::Lazy;
use std::fmt;
use std::rc::Rc;
use std::sync::RwLock;

pub const DEFAULT_TAG_NAME: &str = "rich-text-attachment";

static TAG_NAME: Lazy<RwLock<String>> = Lazy::new(|| RwLock::new(DEFAULT_TAG_NAME.to_string()));

/// Current process-wide marker tag name
pub fn tag_name() -> String {
    match TAG_NAME.read() {
        Ok(name) => name.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Change the process-wide marker tag name (stored lowercase, as the parser sees tags)
pub fn use_tag_name(name: &str) {
    let mut current = match TAG_NAME.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    *current = name.to_ascii_lowercase();
}

/// A marker element and what it resolved to
#[derive(Clone)]
pub struct Attachment {
    node: Handle,
    attachable: Rc<dyn Attachable>,
    // rcdom empties every descendant once the root drops, so a discovered marker holds it
    _tree: Option<Handle>,
}

impl Attachment {
    /// Build a marker for `attachable` under the process-wide tag name.
    ///
    /// Returns `None` when no allow-listed attribute survives, as there is nothing to render.
    pub fn from_attachable(attachable: Rc<dyn Attachable>, attributes: Attributes) -> Option<Self> {
        Self::from_attachable_with_tag_name(attachable, attributes, &tag_name())
    }

    pub fn from_attachable_with_tag_name(
        attachable: Rc<dyn Attachable>,
        attributes: Attributes,
        tag_name: &str,
    ) -> Option<Self> {
        let attributes = attachable.to_rich_text_attributes(attributes);
        let node = Self::node_from_attributes(&attributes, tag_name)?;
        Some(Self {
            node,
            attachable,
            _tree: None,
        })
    }

    /// Wrap an existing marker, resolving its attachable through `registry`.
    ///
    /// The attachment keeps the tree around the marker alive, so it stays usable after the
    /// [`crate::Content`] it came from is dropped.
    pub fn from_node(node: Handle, registry: &AttachableRegistry) -> Self {
        let attributes = filter_allowed(&Attributes::from_node(&node), Direction::Wire);
        let attachable = registry.resolve(&attributes);
        let tree = nodes::parent_of(&node).map(|_| nodes::root_of(&node));
        Self {
            node,
            attachable,
            _tree: tree,
        }
    }

    /// A marker element carrying the allow-listed subset of `attributes`
    pub fn node_from_attributes(attributes: &Attributes, tag_name: &str) -> Option<Handle> {
        let allowed = filter_allowed(attributes, Direction::Wire);
        if allowed.is_empty() {
            return None;
        }
        Some(nodes::create_element(tag_name, allowed.iter()))
    }

    pub fn node(&self) -> &Handle {
        &self.node
    }

    pub fn attachable(&self) -> &Rc<dyn Attachable> {
        &self.attachable
    }

    /// Raw attribute of the marker
    pub fn attribute(&self, name: &str) -> Option<String> {
        nodes::attribute(&self.node, name)
    }

    /// Allow-listed, non-empty marker attributes in allow-list order
    pub fn attributes(&self) -> Attributes {
        ATTRIBUTES
            .iter()
            .filter_map(|name| {
                self.attribute(name)
                    .filter(|value| !value.is_empty())
                    .map(|value| (*name, value))
            })
            .collect()
    }

    pub fn caption(&self) -> String {
        self.attribute("caption").unwrap_or_default()
    }

    /// Editor (legacy JSON) form of this attachment.
    ///
    /// `content` defaults to the attachable's rendered HTML.
    pub fn to_legacy_format(&self, content: Option<&str>) -> LegacyAttachment {
        let mut attributes = self.attributes();
        let content = match content {
            Some(content) => content.to_string(),
            None => self.attachable.rich_text_render(),
        };
        attributes.insert("content", content);

        LegacyAttachment::from_attributes(&self.attachable.to_rich_text_attributes(attributes))
    }

    pub fn to_plain_text(&self) -> String {
        match self.attachable.plain_text() {
            Some(renderer) => renderer.plain_text_render(),
            None => self.caption(),
        }
    }

    /// The marker element as HTML
    pub fn to_html(&self) -> Result<String, RichTextError> {
        serializer::serialize_node(&self.node)
    }

    /// Forward a named operation to the attachable
    pub fn invoke(&self, capability: &str, args: &[&str]) -> Result<String, RichTextError> {
        self.attachable
            .invoke(capability, args)
            .ok_or_else(|| RichTextError::NoSuchCapability {
                capability: capability.to_string(),
                attachable: self.attachable.kind().to_string(),
            })
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("tag", &nodes::local_name(&self.node))
            .field("attributes", &self.attributes())
            .field("attachable", &self.attachable)
            .finish()
    }
}
