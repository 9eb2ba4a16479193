//! Static schema tables for native types.
//!
//! A type that can be filled from a value tree implements [`Mapped`]. Records
//! additionally implement [`Record`], and closed sets of variants behind an
//! abstract base implement [`Variants`]. These tables are what the
//! [`RegistryBuilder`](crate::RegistryBuilder) collects at startup.

use crate::error::{FieldPath, MapError, MapResult};
use crate::instance::{FieldValue, Instance};
use crate::schema::{FieldKind, RecordDescriptor};

/// A native type with a declared field kind.
pub trait Mapped: Sized {
    /// The kind a field of this type is declared with.
    fn kind() -> FieldKind;

    /// Convert a mapped field value. `path` locates the value for errors.
    fn from_field(value: FieldValue, path: &FieldPath) -> MapResult<Self>;
}

/// A concrete record type.
pub trait Record: Mapped {
    /// Registered type name.
    const TYPE_NAME: &'static str;

    /// The record's field table.
    fn descriptor() -> RecordDescriptor;

    /// Unwrap a mapped value that must be an instance of this record.
    fn instance(value: FieldValue, path: &FieldPath) -> MapResult<Instance> {
        match value {
            FieldValue::Record(inst) if inst.type_name() == Self::TYPE_NAME => Ok(inst),
            other => Err(conversion(path, Self::TYPE_NAME, &other)),
        }
    }
}

/// A closed set of concrete variants behind an abstract base type.
pub trait Variants: Mapped {
    /// Abstract base type name.
    const BASE: &'static str;

    /// Field tables of every variant, in registration order.
    fn variants() -> Vec<RecordDescriptor>;

    /// Unwrap a mapped value that must be some resolved variant.
    fn instance(value: FieldValue, path: &FieldPath) -> MapResult<Instance> {
        match value {
            FieldValue::Record(inst) => Ok(inst),
            other => Err(conversion(path, Self::BASE, &other)),
        }
    }

    /// Error for a resolved variant the native type has no case for.
    fn unknown_variant(inst: &Instance, path: &FieldPath) -> MapError {
        MapError::Conversion {
            path: path.clone(),
            expected: Self::BASE.to_string(),
            found: format!("record {}", inst.type_name()),
        }
    }
}

/// Conversion error for a value that does not fit `expected`.
pub fn conversion(path: &FieldPath, expected: &str, found: &FieldValue) -> MapError {
    MapError::Conversion {
        path: path.clone(),
        expected: expected.to_string(),
        found: found.describe(),
    }
}

impl Instance {
    /// Move a field out and convert it. The error path gets the field name
    /// appended.
    pub fn take_as<T: Mapped>(&mut self, name: &str, path: &FieldPath) -> MapResult<T> {
        T::from_field(self.take(name), &path.join(name))
    }
}

impl Mapped for bool {
    fn kind() -> FieldKind {
        FieldKind::BOOL
    }

    fn from_field(value: FieldValue, path: &FieldPath) -> MapResult<Self> {
        match value {
            FieldValue::Bool(b) => Ok(b),
            other => Err(conversion(path, "boolean", &other)),
        }
    }
}

impl Mapped for f64 {
    fn kind() -> FieldKind {
        FieldKind::NUMBER
    }

    fn from_field(value: FieldValue, path: &FieldPath) -> MapResult<Self> {
        match value {
            FieldValue::Number(n) => Ok(n),
            other => Err(conversion(path, "number", &other)),
        }
    }
}

impl Mapped for String {
    fn kind() -> FieldKind {
        FieldKind::STRING
    }

    fn from_field(value: FieldValue, path: &FieldPath) -> MapResult<Self> {
        match value {
            FieldValue::Text(s) => Ok(s),
            other => Err(conversion(path, "string", &other)),
        }
    }
}

/// An absent list decodes as empty. Use `Option<Vec<T>>` to tell the two apart.
impl<T: Mapped> Mapped for Vec<T> {
    fn kind() -> FieldKind {
        FieldKind::list_of(T::kind())
    }

    fn from_field(value: FieldValue, path: &FieldPath) -> MapResult<Self> {
        match value {
            FieldValue::Unset => Ok(Vec::new()),
            FieldValue::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                let mut path = path.clone();
                for (i, item) in items.into_iter().enumerate() {
                    path.push_index(i);
                    out.push(T::from_field(item, &path)?);
                    path.pop();
                }
                Ok(out)
            }
            other => Err(conversion(path, "list", &other)),
        }
    }
}

/// `None` for unset nested and list fields. Primitive fields are never unset,
/// so `Option<bool>` and friends are always `Some`.
impl<T: Mapped> Mapped for Option<T> {
    fn kind() -> FieldKind {
        T::kind()
    }

    fn from_field(value: FieldValue, path: &FieldPath) -> MapResult<Self> {
        match value {
            FieldValue::Unset => Ok(None),
            other => T::from_field(other, path).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_conversions() {
        let root = FieldPath::root();
        assert!(bool::from_field(FieldValue::Bool(true), &root).unwrap());
        assert_eq!(f64::from_field(FieldValue::Number(2.5), &root).unwrap(), 2.5);
        assert_eq!(
            String::from_field(FieldValue::Text("x".into()), &root).unwrap(),
            "x"
        );
    }

    #[test]
    fn mismatch_is_conversion_error() {
        let path = FieldPath::root().join("text");
        let err = String::from_field(FieldValue::Number(1.0), &path).unwrap_err();
        assert_eq!(err.to_string(), "at text: cannot convert number into string");
    }

    #[test]
    fn list_errors_point_at_element() {
        let path = FieldPath::root().join("names");
        let value = FieldValue::List(vec![
            FieldValue::Text("a".into()),
            FieldValue::Bool(true),
        ]);
        let err = Vec::<String>::from_field(value, &path).unwrap_err();
        assert_eq!(err.path().map(ToString::to_string).as_deref(), Some("names[1]"));
    }

    #[test]
    fn unset_list_and_option() {
        let root = FieldPath::root();
        assert!(Vec::<f64>::from_field(FieldValue::Unset, &root).unwrap().is_empty());
        assert_eq!(Option::<Vec<f64>>::from_field(FieldValue::Unset, &root).unwrap(), None);
        assert_eq!(
            Option::<Vec<f64>>::kind(),
            FieldKind::list_of(FieldKind::NUMBER)
        );
    }
}
