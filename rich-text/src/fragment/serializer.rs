//! HTML serialization of fragment trees
//!
//! Pipeline: RcDom handles → html5ever serializer → UTF-8 string. Attribute order is the
//! order stored on the node, so markers built through the attribute normalizer keep the
//! allow-list order.

use crate::error::RichTextError;
use html5ever::{serialize, serialize::SerializeOpts, serialize::TraversalScope};
use markup5ever_rcdom::{Handle, SerializableHandle};

/// Serialize every child of `root` (the root itself is not emitted)
pub fn serialize_children(root: &Handle) -> Result<String, RichTextError> {
    let mut output = Vec::new();
    for child in root.children.borrow().iter() {
        write_node(&mut output, child)?;
    }
    into_string(output)
}

/// Serialize a single node including its own tag
pub fn serialize_node(node: &Handle) -> Result<String, RichTextError> {
    let mut output = Vec::new();
    write_node(&mut output, node)?;
    into_string(output)
}

fn write_node(output: &mut Vec<u8>, node: &Handle) -> Result<(), RichTextError> {
    // IncludeNode serializes the element AND its children
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    let serializable = SerializableHandle::from(node.clone());
    serialize(output, &serializable, opts)
        .map_err(|e| RichTextError::Serialization(format!("HTML serialization failed: {e}")))
}

fn into_string(output: Vec<u8>) -> Result<String, RichTextError> {
    String::from_utf8(output)
        .map_err(|e| RichTextError::Serialization(format!("UTF-8 conversion failed: {e}")))
}

/// Escape HTML special characters in text
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
