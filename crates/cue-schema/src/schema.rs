use std::collections::BTreeSet;
use std::fmt;

use cue_json::value::fold_key;

/// Scalar field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Filled from a JSON boolean.
    Bool,
    /// Filled from a JSON number.
    Number,
    /// Filled from a JSON string.
    String,
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "boolean"),
            Self::Number => write!(f, "number"),
            Self::String => write!(f, "string"),
        }
    }
}

/// The declared kind of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// A scalar.
    Primitive(Primitive),
    /// A concrete record type, by name.
    Nested(String),
    /// An abstract base type, resolved to one of its variants by shape.
    Abstract(String),
    /// A list whose elements all have the given kind.
    List(Box<FieldKind>),
}

impl FieldKind {
    /// Boolean field.
    pub const BOOL: FieldKind = FieldKind::Primitive(Primitive::Bool);
    /// Number field.
    pub const NUMBER: FieldKind = FieldKind::Primitive(Primitive::Number);
    /// String field.
    pub const STRING: FieldKind = FieldKind::Primitive(Primitive::String);

    /// A concrete record field.
    pub fn nested(type_name: impl Into<String>) -> Self {
        Self::Nested(type_name.into())
    }

    /// An abstract field.
    pub fn abstract_type(base: impl Into<String>) -> Self {
        Self::Abstract(base.into())
    }

    /// A list of `element`.
    pub fn list_of(element: FieldKind) -> Self {
        Self::List(Box::new(element))
    }

    /// The referenced type name for record and abstract kinds.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::Nested(name) | Self::Abstract(name) => Some(name),
            Self::Primitive(_) | Self::List(_) => None,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => write!(f, "{p}"),
            Self::Nested(name) => write!(f, "object ({name})"),
            Self::Abstract(base) => write!(f, "object (any {base})"),
            Self::List(inner) => write!(f, "array of {inner}"),
        }
    }
}

/// One declared field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    kind: FieldKind,
}

impl FieldDescriptor {
    /// Create a field descriptor.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Field name as declared. JSON keys match it case-insensitively.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared kind.
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }
}

/// The schema of a concrete record type: its name and ordered fields.
///
/// ```
/// use cue_schema::{FieldKind, RecordDescriptor};
///
/// let dialog = RecordDescriptor::new("ShowDialogParameters")
///     .string("character")
///     .string("text")
///     .string("position");
/// assert_eq!(dialog.fields().len(), 3);
///
/// let root = RecordDescriptor::new("CommandsRoot")
///     .list("Commands", FieldKind::nested("CommandData"));
/// assert!(root.field_named("commands").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDescriptor {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl RecordDescriptor {
    /// A record with no fields yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field of any kind.
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldDescriptor::new(name, kind));
        self
    }

    /// Append a boolean field.
    pub fn boolean(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::BOOL)
    }

    /// Append a number field.
    pub fn number(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::NUMBER)
    }

    /// Append a string field.
    pub fn string(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::STRING)
    }

    /// Append a field holding a concrete record.
    pub fn nested(self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.field(name, FieldKind::nested(type_name))
    }

    /// Append a field holding any variant of `base`.
    pub fn abstract_field(self, name: impl Into<String>, base: impl Into<String>) -> Self {
        self.field(name, FieldKind::abstract_type(base))
    }

    /// Append a list field.
    pub fn list(self, name: impl Into<String>, element: FieldKind) -> Self {
        self.field(name, FieldKind::list_of(element))
    }

    /// Type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Case-insensitive field lookup.
    pub fn field_named(&self, name: &str) -> Option<&FieldDescriptor> {
        let folded = fold_key(name);
        self.fields.iter().find(|f| fold_key(&f.name) == folded)
    }

    /// The case-folded set of field names used for variant matching.
    pub fn shape(&self) -> BTreeSet<String> {
        self.fields.iter().map(|f| fold_key(&f.name)).collect()
    }
}
