//! Attachable registry for attachable resolution
//!
//! Sources are evaluated in registration order and the first one whose predicate accepts the
//! marker attributes decides the outcome. A source that matches but cannot produce a value
//! yields the missing attachable; resolution never falls through to later sources and never
//! fails.

use super::missing::{MissingAttachable, DEFAULT_MISSING_PLACEHOLDER};
use super::record::{NullRecordResolver, RecordResolver};
use super::remote_image::RemoteImage;
use super::Attachable;
use crate::attributes::Attributes;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, warn};

/// A way of turning marker attributes into an attachable
///
/// # Examples
///
/// ```ignore
/// struct MentionSource;
///
/// impl AttachableSource for MentionSource {
///     fn name(&self) -> &str {
///         "mention"
///     }
///
///     fn matches(&self, attributes: &Attributes) -> bool {
///         attributes.get("content-type") == Some("application/vnd.mention")
///     }
///
///     fn resolve(&self, attributes: &Attributes) -> Option<Rc<dyn Attachable>> {
///         // Build the attachable from the attributes
///         todo!()
///     }
/// }
/// ```
pub trait AttachableSource {
    /// The name of this source (e.g., "record", "remote-image")
    fn name(&self) -> &str;

    /// Whether the attributes are meant for this source
    fn matches(&self, attributes: &Attributes) -> bool;

    /// Produce the attachable; `None` degrades to missing
    fn resolve(&self, attributes: &Attributes) -> Option<Rc<dyn Attachable>>;
}

/// Records referenced by `sgid`
pub struct RecordSource {
    resolver: Rc<dyn RecordResolver>,
}

impl RecordSource {
    pub fn new(resolver: Rc<dyn RecordResolver>) -> Self {
        Self { resolver }
    }
}

impl AttachableSource for RecordSource {
    fn name(&self) -> &str {
        "record"
    }

    fn matches(&self, attributes: &Attributes) -> bool {
        attributes.contains("sgid")
    }

    fn resolve(&self, attributes: &Attributes) -> Option<Rc<dyn Attachable>> {
        let sgid = attributes.get("sgid")?;
        match self.resolver.locate_signed(sgid) {
            Ok(record) => Some(record),
            Err(failure) => {
                warn!(sgid, %failure, "record attachment degraded to missing");
                None
            }
        }
    }
}

/// Remote resources described by `url` + `content-type`
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoteImageSource;

impl AttachableSource for RemoteImageSource {
    fn name(&self) -> &str {
        "remote-image"
    }

    fn matches(&self, attributes: &Attributes) -> bool {
        attributes.contains("url") && attributes.contains("content-type")
    }

    fn resolve(&self, attributes: &Attributes) -> Option<Rc<dyn Attachable>> {
        RemoteImage::from_attributes(attributes).map(|image| Rc::new(image) as Rc<dyn Attachable>)
    }
}

/// Ordered collection of attachable sources
///
/// # Examples
///
/// ```ignore
/// let mut registry = AttachableRegistry::with_defaults(Rc::new(store));
/// registry.register(MentionSource);
///
/// let attachable = registry.resolve(&attributes);
/// ```
pub struct AttachableRegistry {
    sources: Vec<Box<dyn AttachableSource>>,
    missing_placeholder: String,
}

impl AttachableRegistry {
    /// Create a new registry with no sources; everything resolves to missing
    pub fn new() -> Self {
        AttachableRegistry {
            sources: Vec::new(),
            missing_placeholder: DEFAULT_MISSING_PLACEHOLDER.to_string(),
        }
    }

    /// Register a source after the existing ones
    ///
    /// If a source with the same name already exists, it is replaced in its position.
    pub fn register<S: AttachableSource + 'static>(&mut self, source: S) {
        let position = self
            .sources
            .iter()
            .position(|existing| existing.name() == source.name());
        match position {
            Some(index) => self.sources[index] = Box::new(source),
            None => self.sources.push(Box::new(source)),
        }
    }

    /// Check if a source exists
    pub fn has(&self, name: &str) -> bool {
        self.sources.iter().any(|source| source.name() == name)
    }

    /// Source names in evaluation order
    pub fn names(&self) -> Vec<&str> {
        self.sources.iter().map(|source| source.name()).collect()
    }

    /// Plain text used by missing attachables that carry no caption
    pub fn with_missing_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.missing_placeholder = placeholder.into();
        self
    }

    pub fn missing_placeholder(&self) -> &str {
        &self.missing_placeholder
    }

    /// Resolve wire attributes to an attachable; total, missing is the fallback
    pub fn resolve(&self, attributes: &Attributes) -> Rc<dyn Attachable> {
        let Some(source) = self.sources.iter().find(|source| source.matches(attributes)) else {
            return self.missing(attributes);
        };

        debug!(source = source.name(), "attachable source matched");
        source
            .resolve(attributes)
            .unwrap_or_else(|| self.missing(attributes))
    }

    fn missing(&self, attributes: &Attributes) -> Rc<dyn Attachable> {
        Rc::new(MissingAttachable::new(
            attributes.get("caption"),
            &self.missing_placeholder,
        ))
    }

    /// Create a registry with the built-in sources: records first, then remote images
    pub fn with_defaults(resolver: Rc<dyn RecordResolver>) -> Self {
        let mut registry = Self::new();

        registry.register(RecordSource::new(resolver));
        registry.register(RemoteImageSource);

        registry
    }
}

impl Default for AttachableRegistry {
    fn default() -> Self {
        Self::with_defaults(Rc::new(NullRecordResolver))
    }
}

impl fmt::Debug for AttachableRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttachableRegistry")
            .field("sources", &self.names())
            .field("missing_placeholder", &self.missing_placeholder)
            .finish()
    }
}
