//! Schema-driven mapping from [`cue_json::Value`] trees onto typed records.
//!
//! Types are described by explicit [`RecordDescriptor`] tables collected in a
//! [`SchemaRegistry`]. When a field is declared abstract, the concrete variant
//! is inferred from the JSON object's key set: the one variant whose field
//! names match exactly (case-insensitively) wins. There is no type tag in the
//! data.
//!
//! This crate performs no I/O and no logging.

/// Mapping options.
pub mod config;
/// Error types used throughout the crate.
pub mod error;
/// Mapped output: records and field values.
pub mod instance;
/// The recursive object mapper.
pub mod mapper;
/// Registry of record types and abstract bases.
pub mod registry;
/// Shape-based variant resolution.
pub mod resolver;
/// Schema descriptors.
pub mod schema;
/// Conversion from mapped instances into native Rust types.
pub mod typed;

pub use config::{MapConfig, VariantMatching};
pub use error::{FieldPath, MapError, MapResult, PathSegment, SchemaError, SchemaResult};
pub use instance::{FieldValue, Instance};
pub use mapper::Mapper;
pub use registry::{RegistryBuilder, SchemaRegistry, ShapeConflict};
pub use resolver::VariantResolver;
pub use schema::{FieldDescriptor, FieldKind, Primitive, RecordDescriptor};
pub use typed::{Mapped, Record, Variants};
