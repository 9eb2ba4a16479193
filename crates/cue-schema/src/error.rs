use std::collections::BTreeSet;
use std::fmt;

use cue_json::ValueKind;

/// Alias for `Result<T, SchemaError>`.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Alias for `Result<T, MapError>`.
pub type MapResult<T> = Result<T, MapError>;

/// Errors about types: registry validation and variant resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// No variant of the base type has exactly the object's key set.
    #[error("no variant of {base} matches keys {}", format_keys(.keys))]
    Unresolved {
        /// Abstract base type.
        base: String,
        /// The object's case-folded key set.
        keys: BTreeSet<String>,
    },

    /// More than one variant matches the object's key set.
    #[error("object matches several variants of {base}: {}", .candidates.join(", "))]
    Ambiguous {
        /// Abstract base type.
        base: String,
        /// Matching variant names, in registration order.
        candidates: Vec<String>,
    },

    /// The type name is not registered.
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// A type name was registered twice with different descriptors.
    #[error("type registered twice: {0}")]
    DuplicateType(String),

    /// Two fields of one record share a name under case folding.
    #[error("record {record} declares field \"{field}\" twice")]
    DuplicateField {
        /// Record declaring the field.
        record: String,
        /// Field name.
        field: String,
    },

    /// A field refers to a type that is not registered.
    #[error("field {record}.{field} refers to undefined type {target}")]
    UndefinedType {
        /// Record declaring the field.
        record: String,
        /// Field name.
        field: String,
        /// Referenced type.
        target: String,
    },

    /// An abstract field refers to a concrete record.
    #[error("field {record}.{field} is abstract but {target} has no variants")]
    NotAbstract {
        /// Record declaring the field.
        record: String,
        /// Field name.
        field: String,
        /// Referenced type.
        target: String,
    },

    /// A nested field refers to an abstract base.
    #[error("field {record}.{field} is nested but {target} is abstract")]
    NotConcrete {
        /// Record declaring the field.
        record: String,
        /// Field name.
        field: String,
        /// Referenced type.
        target: String,
    },
}

fn format_keys(keys: &BTreeSet<String>) -> String {
    let inner: Vec<&str> = keys.iter().map(String::as_str).collect();
    format!("{{{}}}", inner.join(", "))
}

/// Errors raised while mapping a value tree onto a schema.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapError {
    /// Variant resolution failed for an abstract field.
    #[error("at {path}: {source}")]
    Schema {
        /// Where the abstract field sits.
        path: FieldPath,
        /// The resolver's error.
        source: SchemaError,
    },

    /// A present field holds the wrong kind of value.
    #[error("at {path}: expected {expected}, found {found}")]
    FieldType {
        /// Where the field sits.
        path: FieldPath,
        /// Declared kind, rendered.
        expected: String,
        /// Kind actually found.
        found: ValueKind,
    },

    /// The top-level value is not the object or array the target needs.
    #[error("root value must be {expected}, found {found}")]
    RootShape {
        /// What the target type needs.
        expected: String,
        /// Kind actually found.
        found: ValueKind,
    },

    /// A mapped instance did not fit the native type it was decoded into.
    #[error("at {path}: cannot convert {found} into {expected}")]
    Conversion {
        /// Where the field sits.
        path: FieldPath,
        /// Native type expected.
        expected: String,
        /// What was there.
        found: String,
    },
}

impl MapError {
    /// The field path, when the error has one.
    pub fn path(&self) -> Option<&FieldPath> {
        match self {
            Self::Schema { path, .. } | Self::FieldType { path, .. } | Self::Conversion { path, .. } => {
                Some(path)
            }
            Self::RootShape { .. } => None,
        }
    }
}

/// One step from a parent value to a child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object field, by declared name.
    Field(String),
    /// Array element.
    Index(usize),
}

/// Location of a field inside the mapped document, e.g. `Commands[0].Parameters`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Whether this is the document root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Segments from the root down.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Descend into a field.
    pub fn push_field(&mut self, name: impl Into<String>) {
        self.0.push(PathSegment::Field(name.into()));
    }

    /// Descend into an array element.
    pub fn push_index(&mut self, index: usize) {
        self.0.push(PathSegment::Index(index));
    }

    /// Go back up one step.
    pub fn pop(&mut self) {
        self.0.pop();
    }

    /// A copy of this path extended by a field.
    pub fn join(&self, name: impl Into<String>) -> Self {
        let mut path = self.clone();
        path.push_field(name);
        path
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => write!(f, "{name}")?,
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}
