//! Object instances passed into templates.

use indexmap::IndexMap;

use super::Value;

/// An object instance: a class with ancestors, fields, and optional string
/// and iteration capabilities.
///
/// Type checks against named classes or interfaces go through
/// [`ObjectValue::instance_of`].
#[derive(Clone, Debug)]
pub struct ObjectValue {
    class: String,
    ancestors: Vec<String>,
    fields: IndexMap<String, Value>,
    string_form: Option<String>,
    items: Option<Vec<Value>>,
}

impl ObjectValue {
    /// Create an object of the given class with no fields or capabilities.
    pub fn new(class: impl Into<String>) -> Self {
        ObjectValue {
            class: class.into(),
            ancestors: Vec::new(),
            fields: IndexMap::new(),
            string_form: None,
            items: None,
        }
    }

    /// Declare a parent class or implemented interface.
    #[must_use]
    pub fn implementing(mut self, ancestor: impl Into<String>) -> Self {
        self.ancestors.push(ancestor.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Give the object a string conversion.
    #[must_use]
    pub fn with_string_form(mut self, text: impl Into<String>) -> Self {
        self.string_form = Some(text.into());
        self
    }

    /// Make the object iterable over the given items.
    #[must_use]
    pub fn with_items(mut self, items: Vec<Value>) -> Self {
        self.items = Some(items);
        self
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn string_form(&self) -> Option<&str> {
        self.string_form.as_deref()
    }

    pub fn items(&self) -> Option<&[Value]> {
        self.items.as_deref()
    }

    #[inline]
    pub fn is_stringable(&self) -> bool {
        self.string_form.is_some()
    }

    #[inline]
    pub fn is_iterable(&self) -> bool {
        self.items.is_some()
    }

    /// Whether the object is an instance of `type_name`: its own class or
    /// any declared ancestor. A leading namespace separator is ignored.
    pub fn instance_of(&self, type_name: &str) -> bool {
        let wanted = type_name.trim_start_matches('\\');
        self.class == wanted || self.ancestors.iter().any(|ancestor| ancestor == wanted)
    }
}
