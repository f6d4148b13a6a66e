//! Plain-text rendering of content

use crate::common::from_html;
use rich_text::{AttachableRegistry, Content, ContentOptions, DEFAULT_TAG_NAME};
use std::rc::Rc;

#[test]
fn test_line_break_becomes_newline() {
    assert_eq!(from_html("<div>a<br></div>").to_plain_text(), "a\n");
}

#[test]
fn test_attachments_render_their_plain_text() {
    let content = from_html(
        r#"Hello <rich-text-attachment sgid="user-1"></rich-text-attachment>, see <rich-text-attachment url="http://x.test/cat.jpg" content-type="image/jpeg" caption="the cat"></rich-text-attachment>.<br>Bye"#,
    );
    assert_eq!(content.to_plain_text(), "Hello Jon Doe, see the cat.\nBye");
}

#[test]
fn test_missing_placeholder_comes_from_registry() {
    let registry = AttachableRegistry::default().with_missing_placeholder("[deleted]");
    let options = ContentOptions::new()
        .with_tag_name(DEFAULT_TAG_NAME)
        .with_registry(Rc::new(registry));
    let content = Content::with_options(
        r#"<p>x <rich-text-attachment sgid="gone"></rich-text-attachment></p>"#,
        options,
    )
    .unwrap();

    assert_eq!(content.to_plain_text(), "x [deleted]");
}

#[test]
fn test_remote_image_without_caption_is_empty() {
    let content = from_html(
        r#"[<rich-text-attachment url="http://x.test/cat.jpg" content-type="image/jpeg"></rich-text-attachment>]"#,
    );
    assert_eq!(content.to_plain_text(), "[]");
}
