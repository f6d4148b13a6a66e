//! Attachment pipeline for rich-text HTML
//!
//!     This crate parses rich-text editor HTML, finds the attachment markers inside it, resolves
//!     each marker into a typed attachable and renders the result back: as canonical HTML, as
//!     plain text, or in the legacy editor (Trix) form.
//!
//!     This is a pure lib, that is, it powers rich-text-cli but is shell agnostic: no code here
//!     should print to stdout, read env vars or exit the process.
//!
//! Architecture
//!
//!     raw HTML → Fragment → legacy::normalize → Content → Attachment → AttachableRegistry
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # RichTextError, ResolutionFailure
//!     ├── fragment                # Parse tree, queries, serialization (html5ever)
//!     │   ├── nodes.rs            # Tree surgery helpers
//!     │   ├── query.rs            # XPath-like selectors
//!     │   └── serializer.rs
//!     ├── attributes.rs           # Wire/domain keys and the allow-list
//!     ├── attachables             # Attachable trait, variants and the registry
//!     ├── attachment.rs           # Marker + attachable, process-wide tag name
//!     ├── legacy                  # Trix wrappers in and out
//!     ├── minification.rs
//!     ├── plain_text.rs
//!     └── content.rs              # Content, ContentOptions, ContentCodec
//!
//! Markers
//!
//!     A marker is a custom element (`<rich-text-attachment>` unless configured otherwise) whose
//!     attributes are limited to a fixed allow-list and always emitted in allow-list order:
//!
//!         <rich-text-attachment sgid="..." content-type="..." caption="..."></rich-text-attachment>
//!
//!     Anything else found on a marker is dropped when the marker is built.
//!
//! Resolution
//!
//!     Which attachable a marker stands for is decided by the attributes it carries, through an
//!     ordered list of sources (see attachables/registry.rs). Resolution is total: a failed
//!     lookup turns into the missing attachable instead of an error, so one bad reference never
//!     breaks the rendering of a whole document.
//!
//! Tag Name
//!
//!     The marker tag name has a process-wide default ([`use_tag_name`]), meant to be set once
//!     at startup. Prefer passing it explicitly through [`ContentOptions`].
//!
//! Library Choices
//!
//!     We never write an HTML parser or serializer: html5ever does both, and markup5ever_rcdom
//!     holds the tree. Legacy payloads go through serde_json, key casing through heck, and
//!     ordered attribute maps are indexmap's.
//!
pub mod attachables;
pub mod attachment;
pub mod attributes;
pub mod content;
pub mod error;
pub mod fragment;
pub mod legacy;
pub mod minification;
pub mod plain_text;

pub use attachables::{
    Attachable, AttachableRegistry, AttachableSource, MemoryRecordStore, MissingAttachable,
    NullRecordResolver, PlainTextRender, RecordResolver, RemoteImage, StoredRecord,
};
pub use attachment::{tag_name, use_tag_name, Attachment, DEFAULT_TAG_NAME};
pub use attributes::{filter_allowed, to_domain_key, to_wire_key, Attributes, Direction};
pub use content::{Content, ContentCodec, ContentOptions};
pub use error::{ResolutionFailure, RichTextError};
pub use fragment::{Fragment, Selector};
pub use legacy::{LegacyAttachment, MalformedPayloadPolicy};
pub use minification::fragment_by_minifying_attachments;
