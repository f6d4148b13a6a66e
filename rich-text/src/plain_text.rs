//! Plain-text rendering of fragments
//!
//! Text is kept as decoded by the parser, `<br>` becomes a newline, attachment markers become
//! their attachment's plain text and every other tag is stripped. `<script>`, `<style>` and
//! `<template>` contribute nothing.

use crate::attachables::AttachableRegistry;
use crate::attachment::Attachment;
use crate::fragment::{nodes, Fragment, Handle};
use markup5ever_rcdom::NodeData;

const SKIPPED: [&str; 3] = ["script", "style", "template"];

/// Plain text for `fragment`, resolving `tag_name` markers through `registry`
pub fn fragment_to_plain_text(
    fragment: &Fragment,
    tag_name: &str,
    registry: &AttachableRegistry,
) -> String {
    let mut output = String::new();
    for child in fragment.root().children.borrow().iter() {
        write_node(&mut output, child, tag_name, registry);
    }
    output
}

fn write_node(output: &mut String, node: &Handle, tag_name: &str, registry: &AttachableRegistry) {
    match &node.data {
        NodeData::Text { contents } => output.push_str(&contents.borrow()),
        NodeData::Element { .. } => {
            let name = nodes::local_name(node).unwrap_or_default();
            if name == "br" {
                output.push('\n');
            } else if name == tag_name {
                output.push_str(&Attachment::from_node(node.clone(), registry).to_plain_text());
            } else if !SKIPPED.contains(&name) {
                for child in node.children.borrow().iter() {
                    write_node(output, child, tag_name, registry);
                }
            }
        }
        _ => {}
    }
}
