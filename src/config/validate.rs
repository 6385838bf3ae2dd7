// src/config/validate.rs

use crate::config::model::{CommandSpec, ConfigFile, RawConfigFile};
use crate::errors::{Result, XrunError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::XrunError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        let commands = raw.commands.into_iter().map(CommandSpec::from).collect();
        Ok(ConfigFile::new_unchecked(commands))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_commands(cfg)?;
    validate_commands(cfg)?;
    Ok(())
}

fn ensure_has_commands(cfg: &RawConfigFile) -> Result<()> {
    if cfg.commands.is_empty() {
        return Err(XrunError::ConfigError(
            "config must contain at least one entry in `commands`".to_string(),
        ));
    }
    Ok(())
}

fn validate_commands(cfg: &RawConfigFile) -> Result<()> {
    for (idx, command) in cfg.commands.iter().enumerate() {
        if command.label.trim().is_empty() {
            return Err(XrunError::ConfigError(format!(
                "command #{} has an empty label",
                idx + 1
            )));
        }
        if command.cmd.trim().is_empty() {
            return Err(XrunError::ConfigError(format!(
                "command '{}' has an empty `cmd`",
                command.label
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::CommandConfig;
    use crate::types::Color;
    use std::path::PathBuf;

    fn command(label: &str, cmd: &str) -> CommandConfig {
        CommandConfig {
            label: label.to_string(),
            color: Color::Blue,
            cmd: cmd.to_string(),
            path: PathBuf::from("."),
        }
    }

    #[test]
    fn empty_command_list_is_rejected() {
        let err = ConfigFile::try_from(RawConfigFile::default()).unwrap_err();
        assert!(matches!(err, XrunError::ConfigError(msg) if msg.contains("at least one")));
    }

    #[test]
    fn blank_label_or_cmd_is_rejected() {
        let raw = RawConfigFile {
            commands: vec![command("  ", "echo hi")],
        };
        assert!(ConfigFile::try_from(raw).is_err());

        let raw = RawConfigFile {
            commands: vec![command("a", "   ")],
        };
        match ConfigFile::try_from(raw) {
            Err(XrunError::ConfigError(msg)) => assert!(msg.contains("'a'")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn order_is_preserved_and_duplicates_allowed() {
        let raw = RawConfigFile {
            commands: vec![command("b", "echo 1"), command("a", "echo 2"), command("b", "echo 3")],
        };
        let cfg = ConfigFile::try_from(raw).unwrap();
        let labels: Vec<_> = cfg.commands().iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["b", "a", "b"]);
        assert_eq!(cfg.commands()[2].command_line, "echo 3");
    }
}
