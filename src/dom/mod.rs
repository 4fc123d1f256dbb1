//! Document abstraction for the description toggle component
//!
//! The original behavior ran against the live browser DOM through implicit
//! global lookups. Here the document is an explicit dependency passed into
//! every handler, so the full toggle behavior runs (and is tested) without a
//! live page. [`memory::MemoryDocument`] is the shipped implementation; an
//! embedder with a real DOM binds these traits to it instead.

pub mod memory;

pub use memory::{MemoryDocument, MemoryElement};

/// A single document element
///
/// Handles are cheap clones referring to the same underlying node, matching
/// DOM reference semantics. Class mutation goes through shared references
/// because that is how the host DOM behaves.
pub trait Element: Clone {
    /// The element's id attribute, if any.
    fn id(&self) -> Option<String>;

    fn has_class(&self, class: &str) -> bool;

    fn add_class(&self, class: &str);

    fn remove_class(&self, class: &str);

    /// Full height of the element's content, including clipped overflow.
    fn scroll_height(&self) -> u32;

    /// Rendered height of the element's box.
    fn client_height(&self) -> u32;

    /// First descendant carrying the given class, depth-first.
    fn descendant_with_class(&self, class: &str) -> Option<Self>;
}

/// A queryable document
pub trait Document {
    type El: Element;

    /// Element with exactly the given id.
    fn element_by_id(&self, id: &str) -> Option<Self::El>;

    /// All elements whose id starts with the given prefix, document order.
    fn elements_with_id_prefix(&self, prefix: &str) -> Vec<Self::El>;

    /// All elements carrying the given class, document order.
    fn elements_by_class(&self, class: &str) -> Vec<Self::El>;

    /// The element immediately following this one under the same parent.
    fn next_sibling(&self, element: &Self::El) -> Option<Self::El>;
}
