//! Script loading: text or files in, commands out.
//!
//! Loading is parse, then map onto [`CommandsRoot`], then build one command
//! per entry through the [`CommandFactory`]. Any failure fails the whole
//! script.

use std::fs;
use std::path::{Path, PathBuf};

use cue_json::Value;
use cue_schema::{Mapper, Record, SchemaRegistry};
use tracing::{debug, info, warn};

use crate::command::Command;
use crate::config::LoaderConfig;
use crate::data::{CommandData, CommandsRoot};
use crate::error::{ScriptError, ScriptResult};
use crate::factory::CommandFactory;
use crate::schema::script_schema;

/// One loaded script file.
#[derive(Debug)]
pub struct LoadedScript {
    /// Where the script came from.
    pub path: PathBuf,
    /// Commands in script order.
    pub commands: Vec<Box<dyn Command>>,
}

/// Loads dialog scripts.
#[derive(Debug, Clone)]
pub struct ScriptLoader {
    registry: SchemaRegistry,
    factory: CommandFactory,
    config: LoaderConfig,
}

impl ScriptLoader {
    /// Build the script schema and a factory with the built-in commands.
    pub fn new(config: LoaderConfig) -> ScriptResult<Self> {
        let registry = script_schema()?;
        for conflict in registry.shape_conflicts() {
            warn!(
                base = %conflict.base,
                variants = ?conflict.variants,
                "variants_share_shape"
            );
        }
        Ok(Self {
            registry,
            factory: CommandFactory::with_builtins(),
            config,
        })
    }

    /// Replace the command factory.
    pub fn with_factory(mut self, factory: CommandFactory) -> Self {
        self.factory = factory;
        self
    }

    /// The script schema.
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// The command factory.
    pub fn factory(&self) -> &CommandFactory {
        &self.factory
    }

    /// The loader configuration.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// A mapper over the script schema using this loader's matching rule.
    pub fn mapper(&self) -> Mapper<'_> {
        Mapper::with_config(&self.registry, self.config.map_config())
    }

    /// Parse and map script text into command entries.
    pub fn parse_str(&self, source: &str) -> ScriptResult<Vec<CommandData>> {
        let value = cue_json::parse(source)?;
        let root: CommandsRoot = self.mapper().decode(&value)?;
        root.commands.ok_or(ScriptError::MissingCommands)
    }

    /// Parse and map script text, then re-express the mapped document as a
    /// value tree with declared field names and every declared field present.
    pub fn normalize_str(&self, source: &str) -> ScriptResult<Value> {
        let value = cue_json::parse(source)?;
        let root = self.mapper().map_record(&value, CommandsRoot::TYPE_NAME)?;
        Ok(root.to_value())
    }

    /// Load script text into commands.
    pub fn load_str(&self, source: &str) -> ScriptResult<Vec<Box<dyn Command>>> {
        let entries = self.parse_str(source)?;
        let mut commands = Vec::with_capacity(entries.len());
        for (index, data) in entries.into_iter().enumerate() {
            match self.factory.create(data) {
                Ok(command) => commands.push(command),
                Err(ScriptError::UnknownCommand(name)) if self.config.skip_unknown_commands => {
                    warn!(command = %name, index, "unknown_command_skipped");
                }
                Err(err) => return Err(err),
            }
        }
        debug!(commands = commands.len(), "script_built");
        Ok(commands)
    }

    /// Load one script file.
    pub fn load_file(&self, path: &Path) -> ScriptResult<Vec<Box<dyn Command>>> {
        let source = fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let commands = self.load_str(&source).map_err(|err| ScriptError::File {
            path: path.to_path_buf(),
            source: Box::new(err),
        })?;
        info!(path = %path.display(), commands = commands.len(), "script_loaded");
        Ok(commands)
    }

    /// Load every script in a directory, sorted by path. Stops at the first
    /// script that fails.
    pub fn load_dir(&self, dir: &Path) -> ScriptResult<Vec<LoadedScript>> {
        let files = self.script_files(dir)?;
        if files.is_empty() {
            return Err(ScriptError::NoScripts(dir.to_path_buf()));
        }
        files
            .into_iter()
            .map(|path| {
                let commands = self.load_file(&path)?;
                Ok(LoadedScript { path, commands })
            })
            .collect()
    }

    /// Script files directly inside `dir`, sorted by path.
    pub fn script_files(&self, dir: &Path) -> ScriptResult<Vec<PathBuf>> {
        let io_err = |source| ScriptError::Io {
            path: dir.to_path_buf(),
            source,
        };
        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.is_file() && self.is_script(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn is_script(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.config.extension))
    }
}
