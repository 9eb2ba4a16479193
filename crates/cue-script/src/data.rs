//! Script records: the command list and one command entry.

use cue_schema::{FieldKind, FieldPath, FieldValue, MapResult, Mapped, Record, RecordDescriptor, Variants};

use crate::params::Parameters;

/// One command entry: `{"CommandName": ..., "Parameters": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandData {
    /// Name the command factory dispatches on.
    pub command_name: String,
    /// Parameters resolved to their concrete variant, `None` when absent or null.
    pub parameters: Option<Parameters>,
}

impl Mapped for CommandData {
    fn kind() -> FieldKind {
        FieldKind::nested(Self::TYPE_NAME)
    }

    fn from_field(value: FieldValue, path: &FieldPath) -> MapResult<Self> {
        let mut inst = Self::instance(value, path)?;
        Ok(Self {
            command_name: inst.take_as("CommandName", path)?,
            parameters: inst.take_as("Parameters", path)?,
        })
    }
}

impl Record for CommandData {
    const TYPE_NAME: &'static str = "CommandData";

    fn descriptor() -> RecordDescriptor {
        RecordDescriptor::new(Self::TYPE_NAME)
            .string("CommandName")
            .abstract_field("Parameters", Parameters::BASE)
    }
}

/// Document root: `{"Commands": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandsRoot {
    /// `None` when the document has no `Commands` array.
    pub commands: Option<Vec<CommandData>>,
}

impl Mapped for CommandsRoot {
    fn kind() -> FieldKind {
        FieldKind::nested(Self::TYPE_NAME)
    }

    fn from_field(value: FieldValue, path: &FieldPath) -> MapResult<Self> {
        let mut inst = Self::instance(value, path)?;
        Ok(Self {
            commands: inst.take_as("Commands", path)?,
        })
    }
}

impl Record for CommandsRoot {
    const TYPE_NAME: &'static str = "CommandsRoot";

    fn descriptor() -> RecordDescriptor {
        RecordDescriptor::new(Self::TYPE_NAME).list("Commands", CommandData::kind())
    }
}
