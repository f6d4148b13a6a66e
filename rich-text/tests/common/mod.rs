//! Shared fixtures for the integration tests.

use once_cell::sync::Lazy;
use regex::Regex;
use rich_text::{
    AttachableRegistry, Content, ContentOptions, MemoryRecordStore, StoredRecord,
    DEFAULT_TAG_NAME,
};
use std::rc::Rc;

/// Opening tag of an element, capturing its name and attribute text
static OPENING_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<([a-z][a-z0-9-]*)((?:\s[^>]*)?)>").expect("valid opening tag regex"));

/// Attribute names of every `tag` element in `html`, in order of appearance
pub fn attribute_names(html: &str, tag: &str) -> Vec<Vec<String>> {
    static ATTRIBUTE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r#"\s([a-z][a-z0-9-]*)=""#).expect("valid attribute regex"));

    OPENING_TAG
        .captures_iter(html)
        .filter(|caps| &caps[1] == tag)
        .map(|caps| {
            ATTRIBUTE
                .captures_iter(&caps[2])
                .map(|attr| attr[1].to_string())
                .collect()
        })
        .collect()
}

/// A store holding a single user record, `user-1` / "Jon Doe"
pub fn user_store() -> Rc<MemoryRecordStore> {
    Rc::new(MemoryRecordStore::from_records([StoredRecord::new(
        "user-1", "Jon Doe",
    )]))
}

pub fn options_with_store(store: Rc<MemoryRecordStore>) -> ContentOptions {
    ContentOptions::new()
        .with_tag_name(DEFAULT_TAG_NAME)
        .with_registry(Rc::new(AttachableRegistry::with_defaults(store)))
}

/// Parse `html` with the default tag and the user store, checking it renders to something
pub fn from_html(html: &str) -> Content {
    let content = Content::with_options(html, options_with_store(user_store()))
        .expect("content should parse");
    assert!(!content.render().expect("content should render").is_empty());
    content
}

/// A legacy editor figure for a text attachment with a caption
pub const TRIX_FIGURE: &str = r#"<figure
    data-trix-attachment='{"sgid": "123", "contentType": "text/plain", "width": 200, "height": 100}'
    data-trix-attributes='{"caption": "Captioned"}'
></figure>"#;
