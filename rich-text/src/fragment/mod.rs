//! HTML fragments
//!
//! A [`Fragment`] is an owned, mutable parse tree for a piece of rich-text HTML that does not
//! need a full document around it.
//!
//! # Library Choice
//!
//! Parsing and serialization go through `html5ever` with the `markup5ever_rcdom` tree, the
//! same stack used for HTML export elsewhere in the toolchain. The input goes through the
//! fragment parsing algorithm with `<body>` as the context element, so head-level elements
//! (`<style>`, `<meta>`, `<title>`) stay where they were written, and the parser's error
//! recovery (unclosed tags, stray end tags, entity decoding) applies unchanged.
//!
//! # Transformations
//!
//! [`Fragment::replace`] and [`Fragment::try_replace`] never touch the receiver: they work on
//! a deep copy and return it. Queries are lazy iterators in document order; collect them
//! before mutating the tree they walk.

pub mod nodes;
pub mod query;
pub mod serializer;

use crate::error::RichTextError;
use html5ever::tendril::TendrilSink;
use html5ever::{local_name, ns, parse_fragment, ParseOpts, QualName};
use markup5ever_rcdom::{NodeData, RcDom};

pub use markup5ever_rcdom::Handle;
pub use query::{Query, Selector};

/// A parsed HTML fragment
#[derive(Clone)]
pub struct Fragment {
    root: Handle,
}

/// Anything [`Fragment::wrap`] accepts.
pub trait IntoFragment {
    fn into_fragment(self) -> Result<Fragment, RichTextError>;
}

impl IntoFragment for Fragment {
    fn into_fragment(self) -> Result<Fragment, RichTextError> {
        Ok(self)
    }
}

impl IntoFragment for &Fragment {
    fn into_fragment(self) -> Result<Fragment, RichTextError> {
        Ok(self.clone())
    }
}

impl IntoFragment for &str {
    fn into_fragment(self) -> Result<Fragment, RichTextError> {
        Fragment::parse(self)
    }
}

impl IntoFragment for String {
    fn into_fragment(self) -> Result<Fragment, RichTextError> {
        Fragment::parse(&self)
    }
}

impl IntoFragment for &String {
    fn into_fragment(self) -> Result<Fragment, RichTextError> {
        Fragment::parse(self)
    }
}

impl Fragment {
    /// Parse an HTML string.
    ///
    /// The parser is lenient: a `Parse` error only comes back when it produced no root
    /// element at all.
    pub fn parse(html: &str) -> Result<Self, RichTextError> {
        let context = QualName::new(None, ns!(html), local_name!("body"));
        let dom = parse_fragment(RcDom::default(), ParseOpts::default(), context, vec![], false)
            .from_utf8()
            .one(html.as_bytes());

        let root = find_root(&dom.document)
            .ok_or_else(|| RichTextError::Parse("fragment has no root element".to_string()))?;

        // Dropping the document clears every subtree still attached to it
        nodes::detach(&root);

        Ok(Self { root })
    }

    /// A fragment with no content
    pub fn empty() -> Self {
        Self {
            root: nodes::create_element("html", []),
        }
    }

    /// Wrap HTML (or an existing fragment, which is returned as is)
    pub fn wrap<T: IntoFragment>(source: T) -> Result<Self, RichTextError> {
        source.into_fragment()
    }

    /// The container whose children make up the fragment
    pub fn root(&self) -> &Handle {
        &self.root
    }

    /// Serialize back to HTML
    pub fn render(&self) -> Result<String, RichTextError> {
        serializer::serialize_children(&self.root)
    }

    /// Matching nodes in document order
    pub fn query<'s>(&self, selector: &'s Selector) -> Query<'s> {
        selector.select(&self.root)
    }

    /// True when there is nothing but whitespace in the fragment
    pub fn is_blank(&self) -> bool {
        self.root.children.borrow().iter().all(|child| match &child.data {
            NodeData::Text { contents } => contents.borrow().trim().is_empty(),
            _ => false,
        })
    }

    /// An independent copy of the whole tree
    pub fn deep_clone(&self) -> Self {
        Self {
            root: nodes::deep_clone(&self.root),
        }
    }

    /// Append a node at the end of the fragment
    pub fn append(&self, node: Handle) {
        nodes::append_child(&self.root, node);
    }

    /// Copy of this fragment with every match of `selector` swapped for `mapper(node)`
    pub fn replace<F>(&self, selector: &Selector, mut mapper: F) -> Self
    where
        F: FnMut(&Handle) -> Handle,
    {
        let fragment = self.deep_clone();
        let matches: Vec<Handle> = fragment.query(selector).collect();
        for node in matches {
            let replacement = mapper(&node);
            nodes::replace_node(&node, replacement);
        }
        fragment
    }

    /// Like [`Fragment::replace`], stopping at the first mapper error
    pub fn try_replace<F, E>(&self, selector: &Selector, mut mapper: F) -> Result<Self, E>
    where
        F: FnMut(&Handle) -> Result<Handle, E>,
    {
        let fragment = self.deep_clone();
        let matches: Vec<Handle> = fragment.query(selector).collect();
        for node in matches {
            let replacement = mapper(&node)?;
            nodes::replace_node(&node, replacement);
        }
        Ok(fragment)
    }
}

impl std::fmt::Debug for Fragment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.render() {
            Ok(html) => f.debug_tuple("Fragment").field(&html).finish(),
            Err(_) => f.write_str("Fragment(<unserializable>)"),
        }
    }
}

fn find_root(document: &Handle) -> Option<Handle> {
    let root = document
        .children
        .borrow()
        .iter()
        .find(|node| nodes::local_name(node) == Some("html"))
        .cloned();
    root
}
