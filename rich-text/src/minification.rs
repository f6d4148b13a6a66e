//! Strip rendered bodies from attachment markers
//!
//! Markers may carry rendered content between their tags (see
//! [`crate::content::Content::render_attachments`]). Storage only needs the attributes, so the
//! minification pass swaps each marker for a childless copy of itself.

use crate::error::RichTextError;
use crate::fragment::{nodes, Fragment, IntoFragment, Selector};

/// Copy of `content` whose `tag_name` markers have no descendants
pub fn fragment_by_minifying_attachments<T: IntoFragment>(
    content: T,
    tag_name: &str,
) -> Result<Fragment, RichTextError> {
    let fragment = Fragment::wrap(content)?;
    Ok(fragment.replace(&Selector::descendant(tag_name), nodes::shallow_clone))
}
