use cue_json::{Object, Value};

use crate::config::MapConfig;
use crate::error::{FieldPath, MapError, MapResult, SchemaError};
use crate::instance::{FieldValue, Instance};
use crate::registry::SchemaRegistry;
use crate::resolver::VariantResolver;
use crate::schema::{FieldKind, Primitive, RecordDescriptor};
use crate::typed::{Mapped, conversion};

/// Binds value trees onto registered record types.
///
/// Mapping is a plain recursion over the value tree. The first failure aborts
/// the whole call; no partial instance is returned. Recursion depth follows
/// the value tree, which the parser caps at `cue_json::parser::MAX_DEPTH`.
///
/// ```
/// use cue_json::parse;
/// use cue_schema::{FieldKind, FieldValue, Mapper, RecordDescriptor, SchemaRegistry};
///
/// let registry = SchemaRegistry::builder()
///     .add_variant("Shape", RecordDescriptor::new("Circle").number("radius"))
///     .add_variant("Shape", RecordDescriptor::new("Rect").number("w").number("h"))
///     .build()
///     .unwrap();
///
/// let value = parse(r#"[{"radius": 2}, {"W": 3, "h": 4}]"#).unwrap();
/// let mapped = Mapper::new(&registry)
///     .map(&value, &FieldKind::list_of(FieldKind::abstract_type("Shape")))
///     .unwrap();
///
/// let names: Vec<_> = mapped
///     .as_list()
///     .unwrap()
///     .iter()
///     .filter_map(FieldValue::as_record)
///     .map(|r| r.type_name())
///     .collect();
/// assert_eq!(names, vec!["Circle", "Rect"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Mapper<'r> {
    registry: &'r SchemaRegistry,
    resolver: VariantResolver<'r>,
}

impl<'r> Mapper<'r> {
    /// A mapper with default options.
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Self::with_config(registry, MapConfig::default())
    }

    /// A mapper with explicit options.
    pub fn with_config(registry: &'r SchemaRegistry, config: MapConfig) -> Self {
        Self {
            registry,
            resolver: VariantResolver::new(registry).with_matching(config.matching),
        }
    }

    /// The registry this mapper reads.
    pub fn registry(&self) -> &'r SchemaRegistry {
        self.registry
    }

    /// Map a document root onto `target`.
    ///
    /// Record targets need an object at the root, list targets an array.
    pub fn map(&self, value: &Value, target: &FieldKind) -> MapResult<FieldValue> {
        let fits = match target {
            FieldKind::Nested(_) | FieldKind::Abstract(_) => matches!(value, Value::Object(_)),
            FieldKind::List(_) => matches!(value, Value::Array(_)),
            FieldKind::Primitive(_) => false,
        };
        if !fits {
            let expected = match target {
                FieldKind::Primitive(_) => "object or array".to_string(),
                other => other.to_string(),
            };
            return Err(MapError::RootShape {
                expected,
                found: value.kind(),
            });
        }
        self.map_kind(value, target, &mut FieldPath::root())
    }

    /// Map a document root onto the registered record `type_name`.
    pub fn map_record(&self, value: &Value, type_name: &str) -> MapResult<Instance> {
        match self.map(value, &FieldKind::nested(type_name))? {
            FieldValue::Record(instance) => Ok(instance),
            other => Err(conversion(&FieldPath::root(), type_name, &other)),
        }
    }

    /// Map a document root straight into a native type.
    pub fn decode<T: Mapped>(&self, value: &Value) -> MapResult<T> {
        let mapped = self.map(value, &T::kind())?;
        T::from_field(mapped, &FieldPath::root())
    }

    fn map_kind(&self, value: &Value, kind: &FieldKind, path: &mut FieldPath) -> MapResult<FieldValue> {
        if value.is_null() {
            return Ok(FieldValue::default_for(kind));
        }

        match kind {
            FieldKind::Primitive(primitive) => coerce(value, *primitive, path),
            FieldKind::Nested(type_name) => {
                let object = expect_object(value, kind, path)?;
                let descriptor = self
                    .registry
                    .record(type_name)
                    .ok_or_else(|| schema_error(path, SchemaError::UnknownType(type_name.clone())))?;
                self.map_object(object, descriptor, path)
            }
            FieldKind::Abstract(base) => {
                let object = expect_object(value, kind, path)?;
                let descriptor = self
                    .resolver
                    .resolve_object(base, object)
                    .map_err(|source| schema_error(path, source))?;
                self.map_object(object, descriptor, path)
            }
            FieldKind::List(element) => {
                let Value::Array(items) = value else {
                    return Err(field_type(path, kind, value));
                };
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    path.push_index(i);
                    out.push(self.map_kind(item, element, path)?);
                    path.pop();
                }
                Ok(FieldValue::List(out))
            }
        }
    }

    fn map_object(
        &self,
        object: &Object,
        descriptor: &RecordDescriptor,
        path: &mut FieldPath,
    ) -> MapResult<FieldValue> {
        let mut instance = Instance::with_defaults(
            descriptor.name(),
            descriptor.fields().iter().map(|f| (f.name(), f.kind())),
        );

        for field in descriptor.fields() {
            // Absent keys keep the default.
            let Some(raw) = object.get(field.name()) else {
                continue;
            };
            path.push_field(field.name());
            let mapped = self.map_kind(raw, field.kind(), path)?;
            path.pop();
            instance.set(field.name(), mapped);
        }

        Ok(FieldValue::Record(instance))
    }
}

fn coerce(value: &Value, primitive: Primitive, path: &FieldPath) -> MapResult<FieldValue> {
    match (primitive, value) {
        (Primitive::Bool, Value::Bool(b)) => Ok(FieldValue::Bool(*b)),
        (Primitive::Number, Value::Number(n)) => Ok(FieldValue::Number(*n)),
        (Primitive::String, Value::String(s)) => Ok(FieldValue::Text(s.clone())),
        _ => Err(field_type(path, &FieldKind::Primitive(primitive), value)),
    }
}

fn expect_object<'v>(value: &'v Value, kind: &FieldKind, path: &FieldPath) -> MapResult<&'v Object> {
    value.as_object().ok_or_else(|| field_type(path, kind, value))
}

fn field_type(path: &FieldPath, kind: &FieldKind, value: &Value) -> MapError {
    MapError::FieldType {
        path: path.clone(),
        expected: kind.to_string(),
        found: value.kind(),
    }
}

fn schema_error(path: &FieldPath, source: SchemaError) -> MapError {
    MapError::Schema {
        path: path.clone(),
        source,
    }
}
