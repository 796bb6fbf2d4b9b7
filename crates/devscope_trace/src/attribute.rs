//! Nested attribute trees as they appear in state snapshots.
//!
//! The tree mirrors the source format loosely: every piece the source may
//! omit is optional here, and the [`Flattener`](crate::Flattener) decides
//! what is an error. That keeps the XML reader free of validation logic.

/// Category tag marking primary (plain) data.
pub const PRIMARY_CATEGORY: &str = "P";

/// The value part of an attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeValue {
    /// Scalar text, typed later according to the attribute's type tag.
    Text(String),
    /// Nested attributes.
    Nested(Vec<AttributeNode>),
}

/// One attribute of a state snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeNode {
    /// Attribute name.
    pub name: Option<String>,
    /// Declared type tag (`Integer`, `Float`, `Boolean`, `String`, ...).
    pub type_tag: Option<String>,
    /// Category tag; [`PRIMARY_CATEGORY`] enables type coercion.
    pub category: Option<String>,
    /// Scalar text or nested attributes.
    pub value: Option<AttributeValue>,
    /// Line and column of the node in its source, when known.
    pub position: Option<(u32, u32)>,
}

impl AttributeNode {
    /// Creates a primary-category scalar attribute.
    #[must_use]
    pub fn primary(name: impl Into<String>, type_tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self::scalar(name, type_tag, PRIMARY_CATEGORY, text)
    }

    /// Creates a scalar attribute with an explicit category.
    #[must_use]
    pub fn scalar(
        name: impl Into<String>,
        type_tag: impl Into<String>,
        category: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            type_tag: Some(type_tag.into()),
            category: Some(category.into()),
            value: Some(AttributeValue::Text(text.into())),
            position: None,
        }
    }

    /// Creates a nested attribute.
    #[must_use]
    pub fn nested(name: impl Into<String>, children: Vec<AttributeNode>) -> Self {
        Self {
            name: Some(name.into()),
            type_tag: None,
            category: None,
            value: Some(AttributeValue::Nested(children)),
            position: None,
        }
    }

    /// Creates a node with every field missing.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            name: None,
            type_tag: None,
            category: None,
            value: None,
            position: None,
        }
    }

    /// Sets the source position.
    #[must_use]
    pub const fn at(mut self, line: u32, column: u32) -> Self {
        self.position = Some((line, column));
        self
    }

    /// Returns true if the category marks primary data.
    #[must_use]
    pub fn is_primary(&self) -> bool {
        self.category.as_deref() == Some(PRIMARY_CATEGORY)
    }

    /// Returns the nested children, if this is a nested node.
    #[must_use]
    pub fn children(&self) -> Option<&[AttributeNode]> {
        match &self.value {
            Some(AttributeValue::Nested(children)) => Some(children),
            _ => None,
        }
    }

    /// Counts scalar leaves below (and including) this node.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node.children() {
                Some(children) => stack.extend(children),
                None => count += 1,
            }
        }
        count
    }
}
