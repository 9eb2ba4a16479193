//! Parameter records for the built-in commands.
//!
//! The JSON carries no type tag for parameters. Which record a `Parameters`
//! object becomes is decided by its key set alone, so every variant of
//! [`Parameters`] must have a distinct set of field names.

use cue_schema::{FieldKind, FieldPath, FieldValue, MapResult, Mapped, Record, RecordDescriptor, Variants};

/// Parameters of `ShowDialog`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShowDialogParameters {
    /// Speaking character.
    pub character: String,
    /// Line of dialog.
    pub text: String,
    /// Where the speaker stands, e.g. `Left`.
    pub position: String,
}

impl Mapped for ShowDialogParameters {
    fn kind() -> FieldKind {
        FieldKind::nested(Self::TYPE_NAME)
    }

    fn from_field(value: FieldValue, path: &FieldPath) -> MapResult<Self> {
        let mut inst = Self::instance(value, path)?;
        Ok(Self {
            character: inst.take_as("character", path)?,
            text: inst.take_as("text", path)?,
            position: inst.take_as("position", path)?,
        })
    }
}

impl Record for ShowDialogParameters {
    const TYPE_NAME: &'static str = "ShowDialogParameters";

    fn descriptor() -> RecordDescriptor {
        RecordDescriptor::new(Self::TYPE_NAME)
            .string("character")
            .string("text")
            .string("position")
    }
}

/// Parameters of `SwitchScene`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SwitchSceneParameters {
    /// Target scene. Keyed `sceneName` in scripts.
    pub scene_name: String,
}

impl Mapped for SwitchSceneParameters {
    fn kind() -> FieldKind {
        FieldKind::nested(Self::TYPE_NAME)
    }

    fn from_field(value: FieldValue, path: &FieldPath) -> MapResult<Self> {
        let mut inst = Self::instance(value, path)?;
        Ok(Self {
            scene_name: inst.take_as("sceneName", path)?,
        })
    }
}

impl Record for SwitchSceneParameters {
    const TYPE_NAME: &'static str = "SwitchSceneParameters";

    fn descriptor() -> RecordDescriptor {
        RecordDescriptor::new(Self::TYPE_NAME).string("sceneName")
    }
}

/// Any command parameters. The variant is picked by shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parameters {
    /// `{character, text, position}`.
    ShowDialog(ShowDialogParameters),
    /// `{sceneName}`.
    SwitchScene(SwitchSceneParameters),
}

impl Parameters {
    /// Registered type name of the resolved variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::ShowDialog(_) => ShowDialogParameters::TYPE_NAME,
            Self::SwitchScene(_) => SwitchSceneParameters::TYPE_NAME,
        }
    }
}

impl Mapped for Parameters {
    fn kind() -> FieldKind {
        FieldKind::abstract_type(Self::BASE)
    }

    fn from_field(value: FieldValue, path: &FieldPath) -> MapResult<Self> {
        let inst = <Self as Variants>::instance(value, path)?;
        let type_name = inst.type_name();
        if type_name == ShowDialogParameters::TYPE_NAME {
            ShowDialogParameters::from_field(FieldValue::Record(inst), path).map(Self::ShowDialog)
        } else if type_name == SwitchSceneParameters::TYPE_NAME {
            SwitchSceneParameters::from_field(FieldValue::Record(inst), path).map(Self::SwitchScene)
        } else {
            Err(Self::unknown_variant(&inst, path))
        }
    }
}

impl Variants for Parameters {
    const BASE: &'static str = "BaseParameters";

    fn variants() -> Vec<RecordDescriptor> {
        vec![
            ShowDialogParameters::descriptor(),
            SwitchSceneParameters::descriptor(),
        ]
    }
}
