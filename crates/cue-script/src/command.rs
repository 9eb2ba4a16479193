//! Executable commands.

use std::fmt;

use crate::context::GameContext;
use crate::params::{ShowDialogParameters, SwitchSceneParameters};

/// A command built from one script entry.
pub trait Command: fmt::Debug + Send {
    /// Command name as written in the script.
    fn name(&self) -> &str;

    /// Apply the command to the stage.
    fn execute(&self, context: &mut GameContext);
}

/// `ShowDialog`: a character speaks a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowDialogCommand {
    params: ShowDialogParameters,
}

impl ShowDialogCommand {
    /// Registered command name.
    pub const NAME: &'static str = "ShowDialog";

    /// Wrap resolved parameters.
    pub fn new(params: ShowDialogParameters) -> Self {
        Self { params }
    }

    /// The parameters.
    pub fn params(&self) -> &ShowDialogParameters {
        &self.params
    }
}

impl Command for ShowDialogCommand {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn execute(&self, context: &mut GameContext) {
        let p = &self.params;
        context.show_dialog(&p.character, &p.text, &p.position);
    }
}

/// `SwitchScene`: move the stage to another scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchSceneCommand {
    params: SwitchSceneParameters,
}

impl SwitchSceneCommand {
    /// Registered command name.
    pub const NAME: &'static str = "SwitchScene";

    /// Wrap resolved parameters.
    pub fn new(params: SwitchSceneParameters) -> Self {
        Self { params }
    }

    /// The parameters.
    pub fn params(&self) -> &SwitchSceneParameters {
        &self.params
    }
}

impl Command for SwitchSceneCommand {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn execute(&self, context: &mut GameContext) {
        context.switch_scene(&self.params.scene_name);
    }
}
