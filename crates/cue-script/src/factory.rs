//! Command name to constructor registry.

use cue_schema::Record;
use tracing::warn;

use crate::command::{Command, ShowDialogCommand, SwitchSceneCommand};
use crate::data::CommandData;
use crate::error::{ScriptError, ScriptResult};
use crate::params::{Parameters, ShowDialogParameters, SwitchSceneParameters};

/// Builds a command from resolved parameters. Returns `None` when the
/// parameters are not the variant the command takes.
pub type Constructor = fn(Parameters) -> Option<Box<dyn Command>>;

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    parameter_type: &'static str,
    construct: Constructor,
}

/// Maps command names to their parameter type and constructor.
#[derive(Debug, Clone, Default)]
pub struct CommandFactory {
    entries: Vec<Entry>,
}

impl CommandFactory {
    /// A factory with nothing registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// A factory with `ShowDialog` and `SwitchScene` registered.
    pub fn with_builtins() -> Self {
        let mut factory = Self::new();
        factory.register(ShowDialogCommand::NAME, ShowDialogParameters::TYPE_NAME, |params| {
            match params {
                Parameters::ShowDialog(p) => Some(Box::new(ShowDialogCommand::new(p)) as Box<dyn Command>),
                Parameters::SwitchScene(_) => None,
            }
        });
        factory.register(SwitchSceneCommand::NAME, SwitchSceneParameters::TYPE_NAME, |params| {
            match params {
                Parameters::SwitchScene(p) => Some(Box::new(SwitchSceneCommand::new(p)) as Box<dyn Command>),
                Parameters::ShowDialog(_) => None,
            }
        });
        factory
    }

    /// Register a command. A name that is already taken keeps its first
    /// registration; returns `false` in that case.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        parameter_type: &'static str,
        construct: Constructor,
    ) -> bool {
        let name = name.into();
        if self.contains(&name) {
            warn!(command = %name, "command_already_registered");
            return false;
        }
        self.entries.push(Entry {
            name,
            parameter_type,
            construct,
        });
        true
    }

    /// Whether a command name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    /// Parameter type a command takes.
    pub fn parameter_type(&self, name: &str) -> Option<&'static str> {
        self.entry(name).map(|e| e.parameter_type)
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Build the command for one script entry.
    pub fn create(&self, data: CommandData) -> ScriptResult<Box<dyn Command>> {
        let entry = self
            .entry(&data.command_name)
            .ok_or_else(|| ScriptError::UnknownCommand(data.command_name.clone()))?;
        let params = data
            .parameters
            .ok_or_else(|| ScriptError::MissingParameters(data.command_name.clone()))?;
        let found = params.type_name();

        (entry.construct)(params).ok_or_else(|| ScriptError::ParameterMismatch {
            command: data.command_name,
            expected: entry.parameter_type.to_string(),
            found: found.to_string(),
        })
    }

    fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }
}
