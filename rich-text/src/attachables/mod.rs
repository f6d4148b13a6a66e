//! Attachables: what an attachment marker points at
//!
//! Every marker resolves to exactly one [`Attachable`]. The built-in variants are:
//!
//! | Variant                        | Chosen when                           | Source name    |
//! |--------------------------------|---------------------------------------|----------------|
//! | record ([`StoredRecord`], ...) | `sgid` present and resolvable         | `record`       |
//! | [`RemoteImage`]                | `url` and `content-type` present      | `remote-image` |
//! | [`MissingAttachable`]          | anything else, or a failed resolution | (fallback)     |
//!
//! Resolution is driven by which attributes are present and is open for extension: implement
//! [`AttachableSource`] and register it on an [`AttachableRegistry`]. Call sites never match on
//! concrete variants; they go through the capability surface of the trait.
//!
//! Capabilities:
//! - [`Attachable::to_rich_text_attributes`] and [`Attachable::rich_text_render`] are required
//! - [`PlainTextRender`] is optional, exposed through [`Attachable::plain_text`]
//! - anything else is reachable by name through [`Attachable::invoke`]

mod missing;
mod record;
mod registry;
mod remote_image;

pub use missing::{MissingAttachable, DEFAULT_MISSING_PLACEHOLDER};
pub use record::{MemoryRecordStore, NullRecordResolver, RecordResolver, StoredRecord};
pub use registry::{AttachableRegistry, AttachableSource, RecordSource, RemoteImageSource};
pub use remote_image::RemoteImage;

use crate::attributes::Attributes;
use std::any::Any;
use std::fmt;

/// A value an attachment marker can resolve to
pub trait Attachable: fmt::Debug {
    /// Short name of the variant (e.g., "record", "remote-image", "missing")
    fn kind(&self) -> &str;

    /// Attributes describing this attachable, layered over `attributes`
    fn to_rich_text_attributes(&self, attributes: Attributes) -> Attributes;

    /// HTML body rendered inside the attachment
    fn rich_text_render(&self) -> String;

    /// Plain-text capability, when the attachable has one
    fn plain_text(&self) -> Option<&dyn PlainTextRender> {
        None
    }

    /// Signed identifier of the underlying record, if any
    fn sgid(&self) -> Option<&str> {
        None
    }

    /// Whether `other` refers to the same record
    fn is(&self, other: &dyn Attachable) -> bool {
        match (self.sgid(), other.sgid()) {
            (Some(mine), Some(theirs)) => self.kind() == other.kind() && mine == theirs,
            _ => false,
        }
    }

    /// Named operations beyond the fixed surface. `None` means unsupported.
    fn invoke(&self, _capability: &str, _args: &[&str]) -> Option<String> {
        None
    }

    fn as_any(&self) -> &dyn Any;
}

/// Optional plain-text rendering of an attachable
pub trait PlainTextRender {
    fn plain_text_render(&self) -> String;
}
