//! Episode description toggle component
//!
//! Switches episode description containers between a truncated and a fully
//! expanded rendering by flipping CSS state classes, and shows the toggle
//! control only when the description actually overflows its box.
//!
//! Every operation takes the document explicitly. Errors (missing container,
//! missing control) are logged and absorbed: the page keeps working with the
//! DOM untouched, matching how the original behaved in the browser.

use tracing::{debug, error};

use crate::config::DescriptionConfig;
use crate::dom::{Document, Element};
use crate::errors::{DomError, DomResult};

/// Handlers for the description toggle lifecycle
#[derive(Debug, Clone)]
pub struct DescriptionController {
    config: DescriptionConfig,
}

impl DescriptionController {
    pub fn new(config: DescriptionConfig) -> Self {
        Self { config }
    }

    /// Content-ready handler: collapse every description on the page.
    ///
    /// Scans for elements whose id carries the description prefix and sets
    /// each to the collapsed state, so pages always start truncated.
    pub fn on_content_ready<D: Document>(&self, doc: &D) {
        for element in doc.elements_with_id_prefix(&self.config.id_prefix) {
            if let Some(id) = element.id() {
                let guid = id
                    .strip_prefix(&self.config.id_prefix)
                    .unwrap_or(&id)
                    .to_string();
                self.set_expanded(doc, &guid, false);
            }
        }
    }

    /// Set a description's expansion state by GUID.
    ///
    /// Returns `true` if the state classes were applied. A GUID with no
    /// matching container logs an error and returns `false`; the DOM is left
    /// unchanged.
    pub fn set_expanded<D: Document>(&self, doc: &D, guid: &str, expanded: bool) -> bool {
        match self.apply_state(doc, guid, expanded) {
            Ok(()) => true,
            Err(e) => {
                error!("Description container not found for GUID {}: {}", guid, e);
                false
            }
        }
    }

    /// Toggle a description between its two states by raw identifier.
    ///
    /// The identifier is sanitized to `[A-Za-z0-9-]` before lookup. The
    /// container must carry a nested toggle control; a missing container or
    /// control logs an error and returns `false`.
    pub fn toggle<D: Document>(&self, doc: &D, raw_guid: &str) -> bool {
        match self.flip_state(doc, raw_guid) {
            Ok(expanded) => {
                debug!("Toggled description {} (expanded: {})", raw_guid, expanded);
                true
            }
            Err(e) => {
                error!("Toggle failed for GUID {}: {}", raw_guid, e);
                false
            }
        }
    }

    /// Full-load handler: reveal toggle buttons only where content overflows.
    ///
    /// For each description container, the button is assumed to be the next
    /// sibling element; containers without one are skipped.
    pub fn sync_toggle_buttons<D: Document>(&self, doc: &D) {
        for container in doc.elements_by_class(&self.config.container_class) {
            let Some(button) = doc.next_sibling(&container) else {
                continue;
            };
            if container.scroll_height() > container.client_height() {
                button.remove_class(&self.config.hidden_class);
            } else {
                button.add_class(&self.config.hidden_class);
            }
        }
    }

    fn container_id(&self, guid: &str) -> String {
        format!("{}{}", self.config.id_prefix, guid)
    }

    fn apply_state<D: Document>(&self, doc: &D, guid: &str, expanded: bool) -> DomResult<()> {
        let id = self.container_id(guid);
        let container = doc
            .element_by_id(&id)
            .ok_or_else(|| DomError::element_not_found(format!("#{id}")))?;

        if expanded {
            container.add_class(&self.config.expanded_class);
            container.remove_class(&self.config.collapsed_class);
        } else {
            container.remove_class(&self.config.expanded_class);
            container.add_class(&self.config.collapsed_class);
        }
        Ok(())
    }

    /// Flip collapsed <-> expanded; returns the new expanded state.
    fn flip_state<D: Document>(&self, doc: &D, raw_guid: &str) -> DomResult<bool> {
        let guid = sanitize_guid(raw_guid);
        let id = self.container_id(&guid);
        let container = doc
            .element_by_id(&id)
            .ok_or_else(|| DomError::element_not_found(format!("#{id}")))?;

        // The control must exist before any class changes so a broken DOM
        // stays untouched.
        container
            .descendant_with_class(&self.config.toggle_button_class)
            .ok_or_else(|| {
                DomError::control_not_found(
                    self.config.toggle_button_class.clone(),
                    format!("#{id}"),
                )
            })?;

        let expand = container.has_class(&self.config.collapsed_class);
        self.apply_state(doc, &guid, expand)?;
        Ok(expand)
    }
}

impl Default for DescriptionController {
    fn default() -> Self {
        Self::new(DescriptionConfig::default())
    }
}

/// Strip characters outside the safe alphanumeric/hyphen set.
///
/// Raw GUIDs come straight out of feed data and can contain characters that
/// are not valid in an id selector.
fn sanitize_guid(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect()
}
