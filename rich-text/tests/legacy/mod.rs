//! Legacy editor wrappers through the public API

use crate::common::{from_html, options_with_store, user_store, TRIX_FIGURE};
use insta::assert_snapshot;
use rich_text::legacy::{normalize, ATTACHMENT_ATTRIBUTE};
use rich_text::{Content, Fragment, LegacyAttachment, MalformedPayloadPolicy, RichTextError};

#[test]
fn test_custom_tag_through_options() {
    let content = Content::with_options(
        TRIX_FIGURE,
        options_with_store(user_store()).with_tag_name("Arbitrary-Tag"),
    )
    .unwrap();

    assert_eq!(content.attachments().len(), 1);
    assert_snapshot!(
        content.render().unwrap(),
        @r#"<arbitrary-tag sgid="123" content-type="text/plain" width="200" height="100" caption="Captioned"></arbitrary-tag>"#
    );
}

#[test]
fn test_wrapper_children_are_dropped() {
    let html = r#"<figure data-trix-attachment='{"url":"http://x.test/a.png","contentType":"image/png"}'><img src="http://x.test/a.png"><figcaption>Cat</figcaption></figure>"#;
    assert_snapshot!(
        from_html(html).render().unwrap(),
        @r#"<rich-text-attachment content-type="image/png" url="http://x.test/a.png"></rich-text-attachment>"#
    );
}

#[test]
fn test_several_wrappers_in_one_document() {
    let html = r#"<div>
<figure data-trix-attachment='{"sgid":"user-1"}'></figure>
<span data-trix-attachment='{"sgid":"gone"}' data-trix-attributes='{"caption":"Old"}'></span>
</div>"#;
    let content = from_html(html);
    let kinds: Vec<String> = content
        .attachables()
        .iter()
        .map(|attachable| attachable.kind().to_string())
        .collect();
    assert_eq!(kinds, vec!["record", "missing"]);
    assert_eq!(content.to_plain_text(), "\nJon Doe\nOld\n");
}

#[test]
fn test_skip_policy_keeps_going() {
    let html = r#"<figure data-trix-attachment="{broken"></figure><figure data-trix-attachment='{"sgid":"user-1"}'></figure>"#;

    let error = Content::with_options(html, options_with_store(user_store())).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Malformed legacy payload in 'data-trix-attachment': key must be a string at line 1 column 2"
    );

    let content = Content::with_options(
        html,
        options_with_store(user_store())
            .with_malformed_payload_policy(MalformedPayloadPolicy::Skip),
    )
    .unwrap();
    assert_eq!(content.attachments().len(), 1);
    assert!(content.render().unwrap().contains(ATTACHMENT_ATTRIBUTE));
}

#[test]
fn test_normalize_is_a_pure_transform() {
    let fragment = Fragment::parse(TRIX_FIGURE).unwrap();
    let first = normalize(&fragment, "x-a", MalformedPayloadPolicy::Abort).unwrap();
    let second = normalize(&first, "x-a", MalformedPayloadPolicy::Abort).unwrap();

    assert_eq!(first.render().unwrap(), second.render().unwrap());
    assert!(fragment.render().unwrap().starts_with("<figure"));
}

#[test]
fn test_non_object_payload() {
    let fragment = Fragment::parse(r#"<figure data-trix-attachment='"just a string"'></figure>"#).unwrap();
    let error = normalize(&fragment, "x-a", MalformedPayloadPolicy::Abort).unwrap_err();
    assert_eq!(
        error,
        RichTextError::MalformedLegacyPayload {
            attribute: ATTACHMENT_ATTRIBUTE.to_string(),
            message: "expected a JSON object, got a string".to_string(),
        }
    );
}

#[test]
fn test_legacy_attachment_from_marker_attributes() {
    let content = from_html(
        r#"<rich-text-attachment content-type="image/png" url="http://x.test/a.png" filesize="2048" previewable="true" presentation="gallery"></rich-text-attachment>"#,
    );
    let legacy: LegacyAttachment = content.attachments()[0].to_legacy_format(Some(""));

    assert_eq!(legacy.get("filesize"), Some(&serde_json::json!(2048)));
    assert_eq!(legacy.get("previewable"), Some(&serde_json::json!(true)));
    assert_eq!(legacy.content(), Some(""));
    assert_eq!(
        serde_json::Value::Object(legacy.composed_attributes()),
        serde_json::json!({"presentation": "gallery"})
    );
}
