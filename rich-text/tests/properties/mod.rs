//! Property-based tests for the content pipeline
//!
//! These check the invariants that must hold for any input, not just the fixtures:
//! - link extraction returns every distinct href once, in first-occurrence order
//! - allow-listed attribute keys survive the wire/domain round trip
//! - the stored form of content decodes to content that renders identically

use proptest::prelude::*;
use rich_text::attributes::ATTRIBUTES;
use rich_text::{
    to_domain_key, to_wire_key, Attachable, Attachment, Attributes, Content, ContentCodec,
    ContentOptions, RemoteImage, DEFAULT_TAG_NAME,
};
use std::rc::Rc;

fn options() -> ContentOptions {
    ContentOptions::new().with_tag_name(DEFAULT_TAG_NAME)
}

/// Generate short hrefs from a small alphabet so repeats are common
fn href_strategy() -> impl Strategy<Value = String> {
    prop_oneof!["http://example\\.com/[a-c]", "/[a-c]{1,2}", "#[a-b]",]
}

/// Generate plain text without markup characters
fn text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,12}"
}

/// Generate keys in any of the casings markers and payloads use
fn key_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(ATTRIBUTES.to_vec()).prop_flat_map(|key| {
        let domain = to_domain_key(key);
        let snake = key.replace('-', "_");
        prop::sample::select(vec![key.to_string(), domain, snake])
    })
}

proptest! {
    #[test]
    fn links_are_distinct_and_ordered(hrefs in prop::collection::vec(href_strategy(), 0..12)) {
        let html: String = hrefs
            .iter()
            .map(|href| format!("<p><a href=\"{href}\">link</a></p>"))
            .collect();
        let content = Content::with_options(html.as_str(), options()).unwrap();

        let mut expected: Vec<String> = Vec::new();
        for href in &hrefs {
            if !expected.contains(href) {
                expected.push(href.clone());
            }
        }
        prop_assert_eq!(content.links(), expected);
    }

    #[test]
    fn allow_listed_keys_round_trip(key in key_strategy()) {
        let wire = to_wire_key(&key);
        prop_assert!(ATTRIBUTES.contains(&wire.as_str()));
        prop_assert_eq!(to_wire_key(&to_domain_key(&wire)), wire.clone());
        let domain = to_domain_key(&wire);
        prop_assert_eq!(to_domain_key(&to_wire_key(&domain)), domain);
    }

    #[test]
    fn stored_form_renders_identically(
        paragraphs in prop::collection::vec(text_strategy(), 0..5),
        with_break in any::<bool>(),
    ) {
        let mut html: String = paragraphs.iter().map(|p| format!("<p>{p}</p>")).collect();
        if with_break {
            html.push_str("<div>a<br></div>");
        }
        let codec = ContentCodec::new(options());
        let content = codec.decode(&html).unwrap();
        let decoded = codec.decode(&codec.encode(&content).unwrap()).unwrap();
        prop_assert_eq!(decoded.render().unwrap(), content.render().unwrap());
    }

    #[test]
    fn unknown_attributes_never_rendered(
        name in "data-[a-z]{1,6}|on[a-z]{1,6}|class|style",
        value in "[a-z]{1,6}",
    ) {
        let image: Rc<dyn Attachable> = Rc::new(RemoteImage {
            url: "http://example.com/cat.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            width: None,
            height: None,
        });
        let extra: Attributes = [(name.as_str(), value.as_str())].into_iter().collect();
        let attachment =
            Attachment::from_attachable_with_tag_name(image, extra, DEFAULT_TAG_NAME).unwrap();

        let html = attachment.to_html().unwrap();
        let needle = format!("{name}=");
        prop_assert!(!html.contains(&needle));
    }
}
