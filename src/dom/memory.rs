//! In-memory document implementation
//!
//! A small element tree with DOM-like reference semantics: [`MemoryElement`]
//! handles are `Rc` clones of shared nodes, so class changes made through one
//! handle are visible through every other. Heights are fixed at construction,
//! standing in for the browser's layout engine.

use std::cell::RefCell;
use std::rc::Rc;

use super::{Document, Element};

#[derive(Debug)]
struct ElementData {
    id: Option<String>,
    classes: Vec<String>,
    scroll_height: u32,
    client_height: u32,
    children: Vec<MemoryElement>,
}

/// Handle to a node in a [`MemoryDocument`]
#[derive(Debug, Clone)]
pub struct MemoryElement {
    inner: Rc<RefCell<ElementData>>,
}

impl MemoryElement {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ElementData {
                id: None,
                classes: Vec::new(),
                scroll_height: 0,
                client_height: 0,
                children: Vec::new(),
            })),
        }
    }

    pub fn with_id<S: Into<String>>(self, id: S) -> Self {
        self.inner.borrow_mut().id = Some(id.into());
        self
    }

    pub fn with_class<S: Into<String>>(self, class: S) -> Self {
        let class = class.into();
        {
            let mut data = self.inner.borrow_mut();
            if !data.classes.contains(&class) {
                data.classes.push(class);
            }
        }
        self
    }

    /// Set the layout heights reported for this element.
    pub fn with_heights(self, scroll_height: u32, client_height: u32) -> Self {
        {
            let mut data = self.inner.borrow_mut();
            data.scroll_height = scroll_height;
            data.client_height = client_height;
        }
        self
    }

    pub fn with_child(self, child: MemoryElement) -> Self {
        self.inner.borrow_mut().children.push(child);
        self
    }

    /// Snapshot of the element's current class list, for assertions.
    pub fn classes(&self) -> Vec<String> {
        self.inner.borrow().classes.clone()
    }

    fn same_node(&self, other: &MemoryElement) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn children(&self) -> Vec<MemoryElement> {
        self.inner.borrow().children.clone()
    }
}

impl Default for MemoryElement {
    fn default() -> Self {
        Self::new()
    }
}

impl Element for MemoryElement {
    fn id(&self) -> Option<String> {
        self.inner.borrow().id.clone()
    }

    fn has_class(&self, class: &str) -> bool {
        self.inner.borrow().classes.iter().any(|c| c == class)
    }

    fn add_class(&self, class: &str) {
        let mut data = self.inner.borrow_mut();
        if !data.classes.iter().any(|c| c == class) {
            data.classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.inner.borrow_mut().classes.retain(|c| c != class);
    }

    fn scroll_height(&self) -> u32 {
        self.inner.borrow().scroll_height
    }

    fn client_height(&self) -> u32 {
        self.inner.borrow().client_height
    }

    fn descendant_with_class(&self, class: &str) -> Option<Self> {
        for child in self.children() {
            if child.has_class(class) {
                return Some(child);
            }
            if let Some(found) = child.descendant_with_class(class) {
                return Some(found);
            }
        }
        None
    }
}

/// Document over an in-memory element tree
#[derive(Debug, Default)]
pub struct MemoryDocument {
    roots: Vec<MemoryElement>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self { roots: Vec::new() }
    }

    pub fn push(&mut self, element: MemoryElement) {
        self.roots.push(element);
    }

    /// Depth-first walk of the whole tree in document order.
    fn walk(&self) -> Vec<MemoryElement> {
        let mut out = Vec::new();
        fn visit(element: &MemoryElement, out: &mut Vec<MemoryElement>) {
            out.push(element.clone());
            for child in element.children() {
                visit(&child, out);
            }
        }
        for root in &self.roots {
            visit(root, &mut out);
        }
        out
    }

    /// Sibling lists the element could belong to: the root list plus every
    /// node's child list.
    fn sibling_lists(&self) -> Vec<Vec<MemoryElement>> {
        let mut lists = vec![self.roots.clone()];
        for element in self.walk() {
            lists.push(element.children());
        }
        lists
    }
}

impl Document for MemoryDocument {
    type El = MemoryElement;

    fn element_by_id(&self, id: &str) -> Option<MemoryElement> {
        self.walk()
            .into_iter()
            .find(|el| el.id().as_deref() == Some(id))
    }

    fn elements_with_id_prefix(&self, prefix: &str) -> Vec<MemoryElement> {
        self.walk()
            .into_iter()
            .filter(|el| el.id().map(|id| id.starts_with(prefix)).unwrap_or(false))
            .collect()
    }

    fn elements_by_class(&self, class: &str) -> Vec<MemoryElement> {
        self.walk()
            .into_iter()
            .filter(|el| el.has_class(class))
            .collect()
    }

    fn next_sibling(&self, element: &MemoryElement) -> Option<MemoryElement> {
        for list in self.sibling_lists() {
            if let Some(pos) = list.iter().position(|el| el.same_node(element)) {
                return list.get(pos + 1).cloned();
            }
        }
        None
    }
}
