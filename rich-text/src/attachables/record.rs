//! Application records referenced by signed identifiers
//!
//! Issuing and verifying signed ids is not done here. A [`RecordResolver`] is handed an opaque
//! sgid and either returns the record or says why it could not. Whatever the reason, the
//! registry turns the failure into a missing attachable.

use super::{Attachable, PlainTextRender};
use crate::attributes::Attributes;
use crate::error::ResolutionFailure;
use crate::fragment::serializer::html_escape;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Looks up records by signed identifier
pub trait RecordResolver {
    fn locate_signed(&self, sgid: &str) -> Result<Rc<dyn Attachable>, ResolutionFailure>;
}

/// Resolver for setups without a record store; every lookup fails
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRecordResolver;

impl RecordResolver for NullRecordResolver {
    fn locate_signed(&self, _sgid: &str) -> Result<Rc<dyn Attachable>, ResolutionFailure> {
        Err(ResolutionFailure::NotFound)
    }
}

/// In-memory record store keyed by sgid
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RefCell<HashMap<String, Rc<dyn Attachable>>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store every record under its own sgid
    pub fn from_records(records: impl IntoIterator<Item = StoredRecord>) -> Self {
        let store = Self::new();
        for record in records {
            store.insert(record.sgid.clone(), Rc::new(record));
        }
        store
    }

    pub fn insert(&self, sgid: impl Into<String>, record: Rc<dyn Attachable>) {
        self.records.borrow_mut().insert(sgid.into(), record);
    }

    pub fn remove(&self, sgid: &str) -> Option<Rc<dyn Attachable>> {
        self.records.borrow_mut().remove(sgid)
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl RecordResolver for MemoryRecordStore {
    fn locate_signed(&self, sgid: &str) -> Result<Rc<dyn Attachable>, ResolutionFailure> {
        if sgid.trim().is_empty() || sgid.chars().any(char::is_whitespace) {
            return Err(ResolutionFailure::Malformed);
        }
        self.records
            .borrow()
            .get(sgid)
            .cloned()
            .ok_or(ResolutionFailure::NotFound)
    }
}

fn default_content_type() -> String {
    "application/octet-stream".to_string()
}

/// A plain application record that can be attached to rich text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub sgid: String,
    pub name: String,
    #[serde(default = "default_content_type")]
    pub content_type: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub filesize: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub previewable: bool,
}

impl StoredRecord {
    pub fn new(sgid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            sgid: sgid.into(),
            name: name.into(),
            content_type: default_content_type(),
            filename: None,
            filesize: None,
            url: None,
            previewable: false,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}

impl Attachable for StoredRecord {
    fn kind(&self) -> &str {
        "record"
    }

    fn to_rich_text_attributes(&self, mut attributes: Attributes) -> Attributes {
        attributes.insert("sgid", &self.sgid);
        attributes.insert("content-type", &self.content_type);
        if let Some(filename) = &self.filename {
            attributes.insert("filename", filename);
        }
        if let Some(filesize) = self.filesize {
            attributes.insert("filesize", filesize.to_string());
        }
        if let Some(url) = &self.url {
            attributes.insert("url", url);
        }
        if self.previewable {
            attributes.insert("previewable", "true");
        }
        attributes
    }

    fn rich_text_render(&self) -> String {
        format!(
            "<span class=\"rich-text-record\">{}</span>",
            html_escape(&self.name)
        )
    }

    fn plain_text(&self) -> Option<&dyn PlainTextRender> {
        Some(self)
    }

    fn sgid(&self) -> Option<&str> {
        Some(&self.sgid)
    }

    fn invoke(&self, capability: &str, _args: &[&str]) -> Option<String> {
        match capability {
            "name" => Some(self.name.clone()),
            "filename" => self.filename.clone(),
            "url" => self.url.clone(),
            _ => None,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl PlainTextRender for StoredRecord {
    fn plain_text_render(&self) -> String {
        self.name.clone()
    }
}
