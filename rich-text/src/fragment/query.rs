//! Structural node selection
//!
//! Selectors are a small XPath-like subset, not CSS:
//!
//!     //name                 every descendant element called `name`
//!     /name                  direct children of the fragment root called `name`
//!     //*                    every descendant element
//!     //name[@attr]          ... carrying the attribute `attr`
//!     //name[@attr='value']  ... whose `attr` equals `value`
//!
//! Matching walks the tree in document order (pre-order, depth first).

use crate::error::RichTextError;
use markup5ever_rcdom::{Handle, NodeData};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    Descendant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NameTest {
    Any,
    Local(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttributeTest {
    name: String,
    value: Option<String>,
}

/// A parsed selector pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    axis: Axis,
    name: NameTest,
    attribute: Option<AttributeTest>,
}

impl Selector {
    /// Parse a selector such as `//a[@href]`
    pub fn parse(source: &str) -> Result<Self, RichTextError> {
        let invalid = || RichTextError::InvalidSelector(source.to_string());

        let (axis, rest) = if let Some(rest) = source.strip_prefix("//") {
            (Axis::Descendant, rest)
        } else if let Some(rest) = source.strip_prefix('/') {
            (Axis::Child, rest)
        } else {
            return Err(invalid());
        };

        let (name, attribute) = match rest.find('[') {
            Some(open) => {
                let body = rest[open + 1..].strip_suffix(']').ok_or_else(invalid)?;
                let test = parse_attribute_test(body).ok_or_else(invalid)?;
                (&rest[..open], Some(test))
            }
            None => (rest, None),
        };

        let name = match name {
            "*" => NameTest::Any,
            name if is_name(name) => NameTest::Local(name.to_ascii_lowercase()),
            _ => return Err(invalid()),
        };

        Ok(Self {
            axis,
            name,
            attribute,
        })
    }

    /// Every descendant element named `tag`
    pub fn descendant(tag: &str) -> Self {
        Self {
            axis: Axis::Descendant,
            name: NameTest::Local(tag.to_ascii_lowercase()),
            attribute: None,
        }
    }

    /// Every descendant element carrying `attribute`, whatever its name
    pub fn with_attribute(attribute: &str) -> Self {
        Self {
            axis: Axis::Descendant,
            name: NameTest::Any,
            attribute: Some(AttributeTest {
                name: attribute.to_string(),
                value: None,
            }),
        }
    }

    pub fn matches(&self, node: &Handle) -> bool {
        let NodeData::Element { name, attrs, .. } = &node.data else {
            return false;
        };

        if let NameTest::Local(expected) = &self.name {
            if &*name.local != expected.as_str() {
                return false;
            }
        }

        match &self.attribute {
            None => true,
            Some(test) => attrs.borrow().iter().any(|attr| {
                &*attr.name.local == test.name.as_str()
                    && test
                        .value
                        .as_deref()
                        .map_or(true, |value| &*attr.value == value)
            }),
        }
    }

    /// Lazily select the matching nodes below `root`
    pub fn select<'s>(&'s self, root: &Handle) -> Query<'s> {
        let stack = root.children.borrow().iter().rev().cloned().collect();
        Query {
            selector: self,
            stack,
        }
    }
}

fn parse_attribute_test(body: &str) -> Option<AttributeTest> {
    let body = body.strip_prefix('@')?;
    match body.split_once('=') {
        Some((name, quoted)) => {
            let value = quoted
                .strip_prefix('\'')
                .and_then(|v| v.strip_suffix('\''))
                .or_else(|| quoted.strip_prefix('"').and_then(|v| v.strip_suffix('"')))?;
            is_name(name).then(|| AttributeTest {
                name: name.to_string(),
                value: Some(value.to_string()),
            })
        }
        None => is_name(body).then(|| AttributeTest {
            name: body.to_string(),
            value: None,
        }),
    }
}

fn is_name(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}

/// Matching nodes in document order.
///
/// Children are only expanded when their parent is reached, so the walk is lazy; it
/// cannot be restarted.
pub struct Query<'s> {
    selector: &'s Selector,
    stack: Vec<Handle>,
}

impl Iterator for Query<'_> {
    type Item = Handle;

    fn next(&mut self) -> Option<Handle> {
        while let Some(node) = self.stack.pop() {
            if self.selector.axis == Axis::Descendant {
                self.stack
                    .extend(node.children.borrow().iter().rev().cloned());
            }
            if self.selector.matches(&node) {
                return Some(node);
            }
        }
        None
    }
}
