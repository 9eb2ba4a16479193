use cue_json::{Object, Value};

use crate::schema::{FieldKind, Primitive};

/// The value held by one field of a mapped [`Instance`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// Absent or `null` in the document, for nested and list fields.
    #[default]
    Unset,
    /// A boolean field.
    Bool(bool),
    /// A number field.
    Number(f64),
    /// A string field.
    Text(String),
    /// A nested record, possibly a resolved variant.
    Record(Instance),
    /// A list of values of one kind.
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// The value an absent field takes.
    pub fn default_for(kind: &FieldKind) -> Self {
        match kind {
            FieldKind::Primitive(Primitive::Bool) => Self::Bool(false),
            FieldKind::Primitive(Primitive::Number) => Self::Number(0.0),
            FieldKind::Primitive(Primitive::String) => Self::Text(String::new()),
            FieldKind::Nested(_) | FieldKind::Abstract(_) | FieldKind::List(_) => Self::Unset,
        }
    }

    /// Whether the field was left unset.
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// The nested record, if this is one.
    pub fn as_record(&self) -> Option<&Instance> {
        match self {
            Self::Record(inner) => Some(inner),
            _ => None,
        }
    }

    /// The list elements, if this is a list.
    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Short description for conversion errors.
    pub fn describe(&self) -> String {
        match self {
            Self::Unset => "unset".to_string(),
            Self::Bool(_) => "boolean".to_string(),
            Self::Number(_) => "number".to_string(),
            Self::Text(_) => "string".to_string(),
            Self::Record(inner) => format!("record {}", inner.type_name()),
            Self::List(_) => "list".to_string(),
        }
    }

    /// Convert back into a value tree. `Unset` becomes `null`.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Unset => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(*n),
            Self::Text(s) => Value::String(s.clone()),
            Self::Record(inner) => inner.to_value(),
            Self::List(items) => Value::Array(items.iter().map(FieldValue::to_value).collect()),
        }
    }
}

/// A mapped record: the concrete type name and one value per declared field,
/// in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    type_name: String,
    fields: Vec<(String, FieldValue)>,
}

impl Instance {
    /// An instance with every field at its default.
    pub fn with_defaults<'a>(
        type_name: impl Into<String>,
        fields: impl IntoIterator<Item = (&'a str, &'a FieldKind)>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            fields: fields
                .into_iter()
                .map(|(name, kind)| (name.to_string(), FieldValue::default_for(kind)))
                .collect(),
        }
    }

    /// Concrete type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[(String, FieldValue)] {
        &self.fields
    }

    /// Field lookup by declared name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Overwrite a declared field. Returns `false` for undeclared names.
    pub fn set(&mut self, name: &str, value: FieldValue) -> bool {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Move a field out, leaving it unset.
    pub fn take(&mut self, name: &str) -> FieldValue {
        self.fields
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, v)| std::mem::take(v))
            .unwrap_or_default()
    }

    /// Convert back into a JSON object keyed by declared field names.
    pub fn to_value(&self) -> Value {
        let obj: Object = self
            .fields
            .iter()
            .map(|(name, value)| (name.clone(), value.to_value()))
            .collect();
        Value::Object(obj)
    }
}

impl From<&Instance> for Value {
    fn from(instance: &Instance) -> Self {
        instance.to_value()
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        instance.to_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dialog() -> Instance {
        let kinds = [
            ("character", FieldKind::STRING),
            ("visible", FieldKind::BOOL),
            ("delay", FieldKind::NUMBER),
            ("next", FieldKind::nested("Other")),
        ];
        Instance::with_defaults("Dialog", kinds.iter().map(|(n, k)| (*n, k)))
    }

    #[test]
    fn defaults_per_kind() {
        let inst = dialog();
        assert_eq!(inst.get("character"), Some(&FieldValue::Text(String::new())));
        assert_eq!(inst.get("visible"), Some(&FieldValue::Bool(false)));
        assert_eq!(inst.get("delay"), Some(&FieldValue::Number(0.0)));
        assert!(inst.get("next").is_some_and(FieldValue::is_unset));
    }

    #[test]
    fn set_and_take() {
        let mut inst = dialog();
        assert!(inst.set("character", FieldValue::Text("Bob".into())));
        assert!(!inst.set("missing", FieldValue::Bool(true)));
        assert_eq!(inst.take("character"), FieldValue::Text("Bob".into()));
        assert!(inst.get("character").is_some_and(FieldValue::is_unset));
        assert_eq!(inst.take("missing"), FieldValue::Unset);
    }

    #[test]
    fn to_value_keeps_declaration_order() {
        let mut inst = dialog();
        inst.set("character", FieldValue::Text("Bob".into()));
        assert_eq!(
            cue_json::to_string(&inst.to_value()),
            r#"{"character":"Bob","visible":false,"delay":0,"next":null}"#
        );
    }

    #[test]
    fn describe_record() {
        let value = FieldValue::Record(dialog());
        assert_eq!(value.describe(), "record Dialog");
        assert_eq!(FieldValue::List(vec![]).describe(), "list");
    }
}
