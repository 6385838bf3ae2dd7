// src/config/model.rs

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::Color;

/// Configuration exactly as read from disk.
///
/// ```json
/// {
///   "commands": [
///     { "label": "api", "color": "green", "cmd": "cargo run", "path": "./api" }
///   ]
/// }
/// ```
///
/// Files written by older xrun releases use capitalised keys (`Commands`,
/// `Label`, `Color`, `CmdStr`, `ExecPath`); those are accepted as aliases.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawConfigFile {
    #[serde(default, alias = "Commands")]
    pub commands: Vec<CommandConfig>,
}

/// One entry of `commands`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandConfig {
    /// Text shown inside the `[label]` prefix.
    #[serde(alias = "Label")]
    pub label: String,

    /// Color name; unknown names fall back to white.
    #[serde(default, alias = "Color")]
    pub color: Color,

    /// Shell command line, run through the host interpreter.
    #[serde(alias = "CmdStr")]
    pub cmd: String,

    /// Working directory for the command.
    #[serde(default = "default_path", alias = "ExecPath")]
    pub path: PathBuf,
}

fn default_path() -> PathBuf {
    PathBuf::from(".")
}

impl RawConfigFile {
    /// The config written by `xrun --init`.
    pub fn starter() -> Self {
        Self {
            commands: vec![CommandConfig {
                label: "echo".to_string(),
                color: Color::Green,
                cmd: "echo 'Hello, World!'".to_string(),
                path: default_path(),
            }],
        }
    }
}

/// Immutable description of one command to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub label: String,
    pub color: Color,
    pub command_line: String,
    pub working_dir: PathBuf,
}

impl From<CommandConfig> for CommandSpec {
    fn from(cfg: CommandConfig) -> Self {
        Self {
            label: cfg.label,
            color: cfg.color,
            command_line: cfg.cmd,
            working_dir: cfg.path,
        }
    }
}

/// Validated configuration: an ordered, non-empty list of commands.
///
/// Obtain one through `ConfigFile::try_from(RawConfigFile)` (see
/// `validate.rs`) or [`crate::config::load_and_validate`].
#[derive(Debug, Clone)]
pub struct ConfigFile {
    commands: Vec<CommandSpec>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(commands: Vec<CommandSpec>) -> Self {
        Self { commands }
    }

    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<CommandSpec> {
        self.commands
    }

    /// Resolve relative working directories against `base`.
    pub fn with_base_dir(mut self, base: &Path) -> Self {
        for spec in self.commands.iter_mut() {
            if spec.working_dir.is_relative() {
                spec.working_dir = base.join(&spec.working_dir);
            }
        }
        self
    }
}
