//! Dialog scripts for Cue.
//!
//! A script is a JSON document with a `Commands` array. Each entry names a
//! command and carries untagged `Parameters`; the parameter record is picked
//! by the object's key set. Loaded commands run from a FIFO queue, one per
//! step, against a [`GameContext`] that records what happened on stage.

pub mod command;
pub mod config;
pub mod context;
pub mod data;
pub mod error;
pub mod factory;
pub mod loader;
pub mod params;
pub mod runner;
pub mod schema;

pub use command::{Command, ShowDialogCommand, SwitchSceneCommand};
pub use config::LoaderConfig;
pub use context::{GameContext, StageEvent};
pub use data::{CommandData, CommandsRoot};
pub use error::{ScriptError, ScriptResult};
pub use factory::{CommandFactory, Constructor};
pub use loader::{LoadedScript, ScriptLoader};
pub use params::{Parameters, ShowDialogParameters, SwitchSceneParameters};
pub use runner::ScriptRunner;
pub use schema::script_schema;
