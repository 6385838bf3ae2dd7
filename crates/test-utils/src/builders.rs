use std::path::{Path, PathBuf};

use xrun::config::{CommandConfig, CommandSpec, ConfigFile, RawConfigFile};
use xrun::types::Color;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn with_command(mut self, command: CommandConfig) -> Self {
        self.config.commands.push(command);
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a single command, usable either as config entry or as a
/// ready-made `CommandSpec`.
pub struct CommandBuilder {
    command: CommandConfig,
}

impl CommandBuilder {
    pub fn new(label: &str, cmd: &str) -> Self {
        Self {
            command: CommandConfig {
                label: label.to_string(),
                color: Color::White,
                cmd: cmd.to_string(),
                path: PathBuf::from("."),
            },
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.command.color = color;
        self
    }

    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.command.path = path.as_ref().to_path_buf();
        self
    }

    pub fn build(self) -> CommandConfig {
        self.command
    }

    pub fn spec(self) -> CommandSpec {
        CommandSpec::from(self.command)
    }
}
