//! Minification of attachment markers

use crate::common::from_html;
use insta::assert_snapshot;
use rich_text::fragment_by_minifying_attachments;

#[test]
fn test_rendered_attachments_minify_back() {
    let content = from_html(
        r#"<p>Hi <rich-text-attachment sgid="user-1" caption="Jon"></rich-text-attachment></p>"#,
    );
    let rendered = content.render_attachments().unwrap();
    assert_snapshot!(
        rendered,
        @r#"<p>Hi <rich-text-attachment sgid="user-1" caption="Jon"><span class="rich-text-record">Jon Doe</span></rich-text-attachment></p>"#
    );

    let minified = fragment_by_minifying_attachments(rendered.as_str(), "rich-text-attachment").unwrap();
    assert_eq!(minified.render().unwrap(), content.render().unwrap());
}

#[test]
fn test_nested_markers_collapse_to_outer() {
    let html = r#"<rich-text-attachment url="a"><rich-text-attachment url="b"><b>x</b></rich-text-attachment></rich-text-attachment>"#;
    let minified = fragment_by_minifying_attachments(html, "rich-text-attachment").unwrap();
    assert_snapshot!(
        minified.render().unwrap(),
        @r#"<rich-text-attachment url="a"></rich-text-attachment>"#
    );
}

#[test]
fn test_content_minified_keeps_options() {
    let content = from_html(r#"<rich-text-attachment sgid="user-1"><i>stale</i></rich-text-attachment>"#);
    let minified = content.minified().unwrap();

    assert_eq!(
        minified.render().unwrap(),
        r#"<rich-text-attachment sgid="user-1"></rich-text-attachment>"#
    );
    assert_eq!(minified.attachables()[0].kind(), "record");
    assert!(content.render().unwrap().contains("stale"));
}
