//! The script schema, registered once at startup.

use cue_schema::{SchemaRegistry, SchemaResult};

use crate::data::{CommandData, CommandsRoot};
use crate::params::Parameters;

/// Build the registry for dialog scripts: every parameter variant, the
/// command entry, and the document root.
pub fn script_schema() -> SchemaResult<SchemaRegistry> {
    SchemaRegistry::builder()
        .variants::<Parameters>()
        .record::<CommandData>()
        .record::<CommandsRoot>()
        .build()
}
