use std::collections::{BTreeSet, HashMap, HashSet};

use cue_json::value::fold_key;

use crate::error::{SchemaError, SchemaResult};
use crate::schema::{FieldKind, RecordDescriptor};
use crate::typed::{Record, Variants};

/// Variants of one base that share a field set. Objects with that shape can
/// never be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeConflict {
    /// Abstract base type.
    pub base: String,
    /// Conflicting variants, in registration order.
    pub variants: Vec<String>,
    /// The shared, case-folded field set.
    pub fields: BTreeSet<String>,
}

/// Collects record types and abstract bases before validation.
///
/// ```
/// use cue_schema::{FieldKind, RecordDescriptor, SchemaRegistry};
///
/// let registry = SchemaRegistry::builder()
///     .add_variant("Shape", RecordDescriptor::new("Circle").number("radius"))
///     .add_variant("Shape", RecordDescriptor::new("Rect").number("w").number("h"))
///     .add_record(RecordDescriptor::new("Drawing").list("shapes", FieldKind::abstract_type("Shape")))
///     .build()
///     .unwrap();
///
/// assert!(registry.is_abstract("Shape"));
/// assert_eq!(registry.variants("Shape").map(|v| v.len()), Some(2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    records: Vec<RecordDescriptor>,
    bases: Vec<(String, Vec<String>)>,
}

impl RegistryBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a native record type.
    pub fn record<T: Record>(self) -> Self {
        self.add_record(T::descriptor())
    }

    /// Register a native abstract type and all of its variants.
    pub fn variants<A: Variants>(self) -> Self {
        A::variants()
            .into_iter()
            .fold(self.add_base(A::BASE), |builder, variant| {
                builder.add_variant(A::BASE, variant)
            })
    }

    /// Register a concrete record type.
    pub fn add_record(mut self, descriptor: RecordDescriptor) -> Self {
        self.records.push(descriptor);
        self
    }

    /// Declare an abstract base type. Variants declare it implicitly.
    pub fn add_base(mut self, base: impl Into<String>) -> Self {
        let base = base.into();
        if !self.bases.iter().any(|(name, _)| *name == base) {
            self.bases.push((base, Vec::new()));
        }
        self
    }

    /// Register a concrete record as a variant of `base`.
    pub fn add_variant(self, base: impl Into<String>, descriptor: RecordDescriptor) -> Self {
        let base = base.into();
        let variant = descriptor.name().to_string();
        let mut builder = self.add_base(base.clone()).add_record(descriptor);
        if let Some((_, variants)) = builder.bases.iter_mut().find(|(name, _)| *name == base) {
            if !variants.contains(&variant) {
                variants.push(variant);
            }
        }
        builder
    }

    /// Validate and freeze the registry.
    ///
    /// Registering the same descriptor twice is allowed; two different
    /// descriptors under one name are not.
    pub fn build(self) -> SchemaResult<SchemaRegistry> {
        let mut records: Vec<RecordDescriptor> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for descriptor in self.records {
            match index.get(descriptor.name()) {
                Some(&existing) if records[existing] == descriptor => continue,
                Some(_) => return Err(SchemaError::DuplicateType(descriptor.name().to_string())),
                None => {
                    check_fields(&descriptor)?;
                    index.insert(descriptor.name().to_string(), records.len());
                    records.push(descriptor);
                }
            }
        }

        let mut bases: Vec<(String, Vec<usize>)> = Vec::new();
        let mut base_index: HashMap<String, usize> = HashMap::new();
        for (base, variants) in self.bases {
            if index.contains_key(&base) {
                return Err(SchemaError::DuplicateType(base));
            }
            let members = variants
                .iter()
                .filter_map(|variant| index.get(variant).copied())
                .collect();
            base_index.insert(base.clone(), bases.len());
            bases.push((base, members));
        }

        let registry = SchemaRegistry {
            records,
            index,
            bases,
            base_index,
        };
        registry.check_references()?;
        Ok(registry)
    }
}

fn check_fields(descriptor: &RecordDescriptor) -> SchemaResult<()> {
    let mut seen = HashSet::new();
    for field in descriptor.fields() {
        if !seen.insert(fold_key(field.name())) {
            return Err(SchemaError::DuplicateField {
                record: descriptor.name().to_string(),
                field: field.name().to_string(),
            });
        }
    }
    Ok(())
}

/// The validated, read-only set of record types and abstract bases.
///
/// Built once at startup and shared by reference with resolvers and mappers.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    records: Vec<RecordDescriptor>,
    index: HashMap<String, usize>,
    bases: Vec<(String, Vec<usize>)>,
    base_index: HashMap<String, usize>,
}

impl SchemaRegistry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// A concrete record by name.
    pub fn record(&self, name: &str) -> Option<&RecordDescriptor> {
        self.index.get(name).map(|&i| &self.records[i])
    }

    /// Whether `name` is an abstract base.
    pub fn is_abstract(&self, name: &str) -> bool {
        self.base_index.contains_key(name)
    }

    /// Variants of an abstract base, in registration order.
    pub fn variants(&self, base: &str) -> Option<Vec<&RecordDescriptor>> {
        let &i = self.base_index.get(base)?;
        Some(self.bases[i].1.iter().map(|&r| &self.records[r]).collect())
    }

    /// Abstract base names, in registration order.
    pub fn bases(&self) -> impl Iterator<Item = &str> {
        self.bases.iter().map(|(name, _)| name.as_str())
    }

    /// Concrete records, in registration order.
    pub fn records(&self) -> impl Iterator<Item = &RecordDescriptor> {
        self.records.iter()
    }

    /// Groups of variants under one base whose field sets are identical.
    pub fn shape_conflicts(&self) -> Vec<ShapeConflict> {
        let mut conflicts = Vec::new();
        for (base, members) in &self.bases {
            let mut groups: Vec<(BTreeSet<String>, Vec<String>)> = Vec::new();
            for &r in members {
                let record = &self.records[r];
                let shape = record.shape();
                match groups.iter_mut().find(|(fields, _)| *fields == shape) {
                    Some((_, names)) => names.push(record.name().to_string()),
                    None => groups.push((shape, vec![record.name().to_string()])),
                }
            }
            conflicts.extend(
                groups
                    .into_iter()
                    .filter(|(_, names)| names.len() > 1)
                    .map(|(fields, variants)| ShapeConflict {
                        base: base.clone(),
                        variants,
                        fields,
                    }),
            );
        }
        conflicts
    }

    fn check_references(&self) -> SchemaResult<()> {
        for record in &self.records {
            for field in record.fields() {
                self.check_kind(record, field.name(), field.kind())?;
            }
        }
        Ok(())
    }

    fn check_kind(&self, record: &RecordDescriptor, field: &str, kind: &FieldKind) -> SchemaResult<()> {
        let error = |target: &str| (record.name().to_string(), field.to_string(), target.to_string());
        match kind {
            FieldKind::Primitive(_) => Ok(()),
            FieldKind::List(inner) => self.check_kind(record, field, inner),
            FieldKind::Nested(target) => {
                if self.is_abstract(target) {
                    let (record, field, target) = error(target);
                    Err(SchemaError::NotConcrete { record, field, target })
                } else if self.record(target).is_none() {
                    let (record, field, target) = error(target);
                    Err(SchemaError::UndefinedType { record, field, target })
                } else {
                    Ok(())
                }
            }
            FieldKind::Abstract(target) => {
                if self.record(target).is_some() {
                    let (record, field, target) = error(target);
                    Err(SchemaError::NotAbstract { record, field, target })
                } else if !self.is_abstract(target) {
                    let (record, field, target) = error(target);
                    Err(SchemaError::UndefinedType { record, field, target })
                } else {
                    Ok(())
                }
            }
        }
    }
}
