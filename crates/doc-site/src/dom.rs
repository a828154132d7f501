//! The slice of the DOM the page controllers need.
//!
//! Everything is addressed by element id or class name, matching the contract
//! of the generated page markup. A missing element is reported through the
//! return value (`false` / `None`), never as an error.

/// Id/class oriented DOM operations.
pub trait Dom {
    /// Whether an element with `id` exists.
    fn exists(&self, id: &str) -> bool;

    /// Ids of all elements carrying `class`, in document order. Elements
    /// without an id are skipped.
    fn ids_with_class(&self, class: &str) -> Vec<String>;

    fn has_class(&self, id: &str, class: &str) -> bool;

    /// Toggle `class` on `id`. Returns whether the class is now present, or
    /// `None` if the element is missing.
    fn toggle_class(&mut self, id: &str, class: &str) -> Option<bool>;

    /// Rendered text of `id`.
    fn text(&self, id: &str) -> Option<String>;

    fn set_text(&mut self, id: &str, text: &str) -> bool;

    /// Inline style property of `id`; `None` when unset or the element is
    /// missing.
    fn style(&self, id: &str, property: &str) -> Option<String>;

    /// Set an inline style property. An empty `value` clears it.
    fn set_style(&mut self, id: &str, property: &str, value: &str) -> bool;

    /// Remove the first element with `id` from the document.
    fn remove(&mut self, id: &str) -> bool;

    /// Append `html`, whose root element has id `child_id`, as the last child
    /// of `parent_id`.
    fn append_html(&mut self, parent_id: &str, child_id: &str, html: &str) -> bool;
}

/// A headless [`Dom`] holding a flat list of elements.
///
/// Used to drive the page controllers outside a browser. Appended fragments
/// are kept as opaque HTML; only their root id is tracked.
#[derive(Debug, Clone, Default)]
pub struct MemoryDom {
    elements: Vec<MemoryElement>,
}

/// One element of a [`MemoryDom`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryElement {
    pub id: String,
    pub parent: Option<String>,
    pub classes: Vec<String>,
    pub text: String,
    pub styles: Vec<(String, String)>,
    pub html: Option<String>,
}

impl MemoryDom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element with the given classes and text.
    pub fn insert(&mut self, id: &str, classes: &[&str], text: &str) -> &mut Self {
        self.elements.push(MemoryElement {
            id: id.to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            text: text.to_string(),
            ..MemoryElement::default()
        });
        self
    }

    pub fn element(&self, id: &str) -> Option<&MemoryElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    fn element_mut(&mut self, id: &str) -> Option<&mut MemoryElement> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Number of elements with `id`; a well-formed page never has more than one.
    pub fn count(&self, id: &str) -> usize {
        self.elements.iter().filter(|e| e.id == id).count()
    }

    /// HTML of an element created through [`Dom::append_html`].
    pub fn html(&self, id: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.html.as_deref())
    }
}

impl Dom for MemoryDom {
    fn exists(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    fn ids_with_class(&self, class: &str) -> Vec<String> {
        self.elements
            .iter()
            .filter(|e| !e.id.is_empty() && e.classes.iter().any(|c| c == class))
            .map(|e| e.id.clone())
            .collect()
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.element(id)
            .is_some_and(|e| e.classes.iter().any(|c| c == class))
    }

    fn toggle_class(&mut self, id: &str, class: &str) -> Option<bool> {
        let element = self.element_mut(id)?;
        if let Some(pos) = element.classes.iter().position(|c| c == class) {
            element.classes.remove(pos);
            Some(false)
        } else {
            element.classes.push(class.to_string());
            Some(true)
        }
    }

    fn text(&self, id: &str) -> Option<String> {
        self.element(id).map(|e| e.text.clone())
    }

    fn set_text(&mut self, id: &str, text: &str) -> bool {
        match self.element_mut(id) {
            Some(element) => {
                element.text = text.to_string();
                true
            }
            None => false,
        }
    }

    fn style(&self, id: &str, property: &str) -> Option<String> {
        self.element(id)?
            .styles
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.clone())
    }

    fn set_style(&mut self, id: &str, property: &str, value: &str) -> bool {
        let Some(element) = self.element_mut(id) else {
            return false;
        };
        element.styles.retain(|(p, _)| p != property);
        if !value.is_empty() {
            element.styles.push((property.to_string(), value.to_string()));
        }
        true
    }

    fn remove(&mut self, id: &str) -> bool {
        match self.elements.iter().position(|e| e.id == id) {
            Some(pos) => {
                self.elements.remove(pos);
                // Children go with their parent.
                self.elements.retain(|e| e.parent.as_deref() != Some(id));
                true
            }
            None => false,
        }
    }

    fn append_html(&mut self, parent_id: &str, child_id: &str, html: &str) -> bool {
        if !self.exists(parent_id) {
            return false;
        }
        self.elements.push(MemoryElement {
            id: child_id.to_string(),
            parent: Some(parent_id.to_string()),
            html: Some(html.to_string()),
            ..MemoryElement::default()
        });
        true
    }
}
