//! Content behavior: rendering, links, attachment discovery and resolution

use crate::common::{attribute_names, from_html, options_with_store, user_store, TRIX_FIGURE};
use insta::assert_snapshot;
use rich_text::{
    Attachable, Attachment, Attributes, Content, ContentCodec, MissingAttachable, RecordResolver,
    RemoteImage, RichTextError, StoredRecord,
};
use std::rc::Rc;

// ============================================================================
// RENDERING
// ============================================================================

#[test]
fn test_equality() {
    let html = "<div>test</div>";
    let content = from_html(html);
    assert!(content.render().unwrap().contains(html));
    assert_eq!(content, from_html(html));
}

#[test]
fn test_serializes() {
    let content = from_html("Hello!");
    let codec = ContentCodec::new(options_with_store(user_store()));

    let stored = codec.encode(&content).unwrap();
    assert_eq!(stored, "Hello!");
    assert_eq!(
        codec.decode(&stored).unwrap().render().unwrap(),
        content.render().unwrap()
    );
}

#[test]
fn test_stored_form_keeps_head_level_elements() {
    let html = "<style>p{color:red}</style><p>a</p>";
    let codec = ContentCodec::new(options_with_store(user_store()));

    let content = codec.decode(html).unwrap();
    assert_eq!(codec.encode(&content).unwrap(), html);
    assert_eq!(codec.decode(&codec.encode(&content).unwrap()).unwrap(), content);
}

#[test]
fn test_keeps_newlines_consistent() {
    let html = "<div>a<br></div>";
    assert!(from_html(html).render().unwrap().contains(html));
}

#[test]
fn test_extracts_links() {
    let html = r#"<a href="http://example.com/1">first link</a><br><a href="http://example.com/1">second link</a>"#;
    assert_eq!(from_html(html).links(), vec!["http://example.com/1"]);
}

// ============================================================================
// ATTACHMENTS
// ============================================================================

#[test]
fn test_extracts_attachables() {
    let store = user_store();
    let record = store.locate_signed("user-1").unwrap();
    let content = Content::with_options(
        r#"<rich-text-attachment sgid="user-1" caption="Captioned"></rich-text-attachment>"#,
        options_with_store(store),
    )
    .unwrap();

    let attachments = content.attachments();
    assert_eq!(attachments.len(), 1);

    let attachment = &attachments[0];
    assert_eq!(attachment.caption(), "Captioned");
    assert!(attachment.attachable().is(&*record));
    assert!(Rc::ptr_eq(attachment.attachable(), &record));
    assert_eq!(attachment.to_plain_text(), "Jon Doe");
}

#[test]
fn test_extracts_remote_image_attachables() {
    let content = from_html(
        r#"<rich-text-attachment content-type="image" url="http://example.com/cat.jpg" width="200" height="100" caption="Captioned"></rich-text-attachment>"#,
    );

    let attachments = content.attachments();
    assert_eq!(attachments.len(), 1);
    assert_eq!(attachments[0].caption(), "Captioned");

    let image = attachments[0]
        .attachable()
        .as_any()
        .downcast_ref::<RemoteImage>()
        .expect("should resolve to a remote image");
    assert_eq!(image.url, "http://example.com/cat.jpg");
    assert_eq!(image.width.as_deref(), Some("200"));
    assert_eq!(image.height.as_deref(), Some("100"));
}

#[test]
fn test_handles_destroyed_attachables_as_missing() {
    let store = user_store();
    let html = r#"<rich-text-attachment sgid="user-1" caption="User mention"></rich-text-attachment>"#;
    store.remove("user-1");

    let content = Content::with_options(html, options_with_store(store)).unwrap();
    let attachments = content.attachments();
    assert_eq!(attachments.len(), 1);

    let missing = attachments[0]
        .attachable()
        .as_any()
        .downcast_ref::<MissingAttachable>()
        .expect("should resolve to missing");
    assert_eq!(missing.caption(), Some("User mention"));
    assert_eq!(content.to_plain_text(), "User mention");
}

#[test]
fn test_extracts_missing_attachables() {
    let content = from_html(
        r#"<rich-text-attachment sgid="missing" caption="Captioned"></rich-text-attachment>"#,
    );
    let attachments = content.attachments();
    assert_eq!(attachments.len(), 1);
    assert_eq!(attachments[0].attachable().kind(), "missing");
}

#[test]
fn test_unresolvable_attachment_does_not_break_rendering() {
    let content = from_html(
        r#"<p>before</p><rich-text-attachment sgid="nope"></rich-text-attachment><p>after</p>"#,
    );
    assert_snapshot!(
        content.render_attachments().unwrap(),
        @r#"<p>before</p><rich-text-attachment sgid="nope"><span class="rich-text-missing-attachment">☒</span></rich-text-attachment><p>after</p>"#
    );
}

#[test]
fn test_converts_trix_formatted_attachments() {
    let content = from_html(TRIX_FIGURE);
    assert_eq!(content.attachments().len(), 1);
    assert!(content.render().unwrap().contains(
        r#"<rich-text-attachment sgid="123" content-type="text/plain" width="200" height="100" caption="Captioned"></rich-text-attachment>"#
    ));
}

#[test]
fn test_malformed_trix_payload_fails_the_whole_content() {
    let html = r#"<p>ok</p><figure data-trix-attachment='{"sgid": '></figure>"#;
    let error = Content::with_options(html, options_with_store(user_store())).unwrap_err();
    assert!(matches!(error, RichTextError::MalformedLegacyPayload { .. }));
}

// ============================================================================
// BUILDING MARKERS
// ============================================================================

#[test]
fn test_unknown_attributes_never_rendered() {
    let record: Rc<dyn Attachable> = Rc::new(StoredRecord::new("user-1", "Jon Doe"));
    let extra: Attributes = [
        ("caption", "Jon"),
        ("onclick", "steal()"),
        ("data-id", "9"),
        ("contentType", "application/vnd.user"),
    ]
    .into_iter()
    .collect();

    let attachment =
        Attachment::from_attachable_with_tag_name(record, extra, "rich-text-attachment").unwrap();
    let content = from_html("<p>x</p>").append_attachables([attachment.attachable().clone()]);
    let html = attachment.to_html().unwrap();

    assert_eq!(
        attribute_names(&html, "rich-text-attachment"),
        vec![vec!["sgid", "content-type", "caption"]]
    );
    assert!(!content.render().unwrap().contains("onclick"));
}

#[test]
fn test_legacy_export() {
    let content = from_html(
        r#"<rich-text-attachment sgid="user-1" caption="Mention"></rich-text-attachment>"#,
    );
    let legacy = content.attachments()[0].to_legacy_format(None);

    assert_eq!(legacy.content(), Some(r#"<span class="rich-text-record">Jon Doe</span>"#));
    assert_snapshot!(
        content.to_legacy_html().unwrap(),
        @r#"<figure data-trix-attachment="{&quot;content&quot;:&quot;<span class=\&quot;rich-text-record\&quot;>Jon Doe</span>&quot;,&quot;contentType&quot;:&quot;application/octet-stream&quot;,&quot;sgid&quot;:&quot;user-1&quot;}" data-trix-attributes="{&quot;caption&quot;:&quot;Mention&quot;}"></figure>"#
    );
}

#[test]
fn test_legacy_export_normalizes_back() {
    let content = from_html(
        r#"<div><rich-text-attachment sgid="user-1" caption="Mention"></rich-text-attachment></div>"#,
    );
    let round_tripped = from_html(&content.to_legacy_html().unwrap());

    assert_eq!(
        round_tripped.render().unwrap(),
        r#"<div><rich-text-attachment sgid="user-1" content-type="application/octet-stream" caption="Mention"></rich-text-attachment></div>"#
    );
}
