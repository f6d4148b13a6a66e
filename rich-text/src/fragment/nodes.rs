//! Node construction and tree surgery over `markup5ever_rcdom` handles.

use html5ever::{ns, Attribute, LocalName, QualName};
use markup5ever_rcdom::{Handle, Node, NodeData};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Create an HTML element with attributes, in the given order
pub fn create_element<'a>(tag: &str, attrs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    new_node(NodeData::Element {
        name: qual_name,
        attrs: RefCell::new(attributes),
        template_contents: Default::default(),
        mathml_annotation_xml_integration_point: false,
    })
}

/// Create a text node
pub fn create_text(text: &str) -> Handle {
    new_node(NodeData::Text {
        contents: RefCell::new(text.to_string().into()),
    })
}

fn new_node(data: NodeData) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data,
    })
}

/// Local name of an element node, `None` for every other node kind.
pub fn local_name(node: &Handle) -> Option<&str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(&*name.local),
        _ => None,
    }
}

/// Value of the attribute `name` on an element node.
pub fn attribute(node: &Handle, name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// Every attribute of an element node in source order.
pub fn attributes(node: &Handle) -> Vec<(String, String)> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
            .collect(),
        _ => Vec::new(),
    }
}

/// Append `child` to `parent`, wiring the parent back-reference.
pub fn append_child(parent: &Handle, child: Handle) {
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child);
}

/// Parent of a node, if it is still attached to one.
pub fn parent_of(node: &Handle) -> Option<Handle> {
    let weak = node.parent.take();
    let parent = weak.as_ref().and_then(|w| w.upgrade());
    node.parent.set(weak);
    parent
}

/// Topmost ancestor of `node` (the node itself when it has no parent).
pub fn root_of(node: &Handle) -> Handle {
    let mut current = node.clone();
    while let Some(parent) = parent_of(&current) {
        current = parent;
    }
    current
}

/// Detach `node` from its parent. The node keeps its own children.
pub fn detach(node: &Handle) {
    if let Some(parent) = parent_of(node) {
        parent
            .children
            .borrow_mut()
            .retain(|child| !Rc::ptr_eq(child, node));
    }
    node.parent.set(None);
}

/// Put `replacement` where `node` sits in its parent.
///
/// A detached `node` is left alone; so is a replacement that is the node itself.
pub fn replace_node(node: &Handle, replacement: Handle) {
    if Rc::ptr_eq(node, &replacement) {
        return;
    }
    let Some(parent) = parent_of(node) else {
        return;
    };

    let mut children = parent.children.borrow_mut();
    if let Some(position) = children.iter().position(|child| Rc::ptr_eq(child, node)) {
        replacement.parent.set(Some(Rc::downgrade(&parent)));
        node.parent.set(None);
        children[position] = replacement;
    }
}

/// Copy a node without any of its descendants.
pub fn shallow_clone(node: &Handle) -> Handle {
    let data = match &node.data {
        NodeData::Document => NodeData::Document,
        NodeData::Doctype {
            name,
            public_id,
            system_id,
        } => NodeData::Doctype {
            name: name.clone(),
            public_id: public_id.clone(),
            system_id: system_id.clone(),
        },
        NodeData::Text { contents } => NodeData::Text {
            contents: RefCell::new(contents.borrow().clone()),
        },
        NodeData::Comment { contents } => NodeData::Comment {
            contents: contents.clone(),
        },
        NodeData::Element {
            name,
            attrs,
            mathml_annotation_xml_integration_point,
            ..
        } => NodeData::Element {
            name: name.clone(),
            attrs: RefCell::new(attrs.borrow().clone()),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: *mathml_annotation_xml_integration_point,
        },
        NodeData::ProcessingInstruction { target, contents } => {
            NodeData::ProcessingInstruction {
                target: target.clone(),
                contents: contents.clone(),
            }
        }
    };
    new_node(data)
}

/// Copy a node and its whole subtree, template contents included.
pub fn deep_clone(node: &Handle) -> Handle {
    let copy = shallow_clone(node);

    if let (
        NodeData::Element {
            template_contents: source,
            ..
        },
        NodeData::Element {
            template_contents: target,
            ..
        },
    ) = (&node.data, &copy.data)
    {
        if let Some(contents) = source.borrow().as_ref() {
            *target.borrow_mut() = Some(deep_clone(contents));
        }
    }

    for child in node.children.borrow().iter() {
        append_child(&copy, deep_clone(child));
    }
    copy
}

/// Move every child of `from` to the end of `to`.
pub fn move_children(from: &Handle, to: &Handle) {
    let children = std::mem::take(&mut *from.children.borrow_mut());
    for child in children {
        append_child(to, child);
    }
}
