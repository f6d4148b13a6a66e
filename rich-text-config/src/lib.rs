//! Shared configuration loader for the rich-text toolchain.
//!
//! `defaults/rich-text.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`RichTextConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use rich_text::{AttachableRegistry, ContentOptions, MalformedPayloadPolicy, RecordResolver};
use serde::Deserialize;
use std::path::Path;
use std::rc::Rc;

const DEFAULT_TOML: &str = include_str!("../defaults/rich-text.default.toml");

/// Top-level configuration consumed by rich-text applications.
#[derive(Debug, Clone, Deserialize)]
pub struct RichTextConfig {
    pub attachments: AttachmentsConfig,
    pub legacy: LegacyConfig,
    pub plain_text: PlainTextConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentsConfig {
    pub tag_name: String,
}

/// Legacy editor (Trix) ingestion.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyConfig {
    pub malformed_payload: MalformedPayload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum MalformedPayload {
    #[serde(rename = "abort")]
    Abort,
    #[serde(rename = "skip")]
    Skip,
}

impl From<MalformedPayload> for MalformedPayloadPolicy {
    fn from(config: MalformedPayload) -> Self {
        match config {
            MalformedPayload::Abort => MalformedPayloadPolicy::Abort,
            MalformedPayload::Skip => MalformedPayloadPolicy::Skip,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlainTextConfig {
    pub missing_placeholder: String,
}

impl RichTextConfig {
    /// Content options for this configuration, resolving records through `resolver`.
    pub fn content_options(&self, resolver: Rc<dyn RecordResolver>) -> ContentOptions {
        let registry = AttachableRegistry::with_defaults(resolver)
            .with_missing_placeholder(self.plain_text.missing_placeholder.as_str());

        ContentOptions::new()
            .with_tag_name(&self.attachments.tag_name)
            .with_malformed_payload_policy(self.legacy.malformed_payload.into())
            .with_registry(Rc::new(registry))
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<RichTextConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<RichTextConfig, ConfigError> {
    Loader::new().build()
}
