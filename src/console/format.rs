// src/console/format.rs

//! Pure formatting helpers for everything xrun prints.

use crate::config::CommandSpec;
use crate::types::Color;

const BANNER: &str = r"
▄   ▄  ▄▄▄ █  ▐▌▄▄▄▄
 ▀▄▀  █    ▀▄▄▞▘█   █
▄▀ ▀▄ █         █   █

";

/// Notice printed once when an interrupt is received.
pub const INTERRUPT_NOTICE: &str = "\nReceived interrupt. Stopping all commands...";

/// The `[label]` prefix in the command's color.
pub fn label_prefix(label: &str, color: Color) -> String {
    color.paint(&format!("[{label}]"))
}

/// One line of command output: `<colored [label]> <line>`.
pub fn decorate(label: &str, color: Color, line: &str) -> String {
    format!("{} {}", label_prefix(label, color), line)
}

pub fn starting_notice(spec: &CommandSpec) -> String {
    spec.color.paint(&format!("Running command: {}", spec.label))
}

pub fn startup_failure(spec: &CommandSpec, error: &dyn std::fmt::Display) -> String {
    decorate(
        &spec.label,
        spec.color,
        &format!("failed to start: {error}"),
    )
}

pub fn banner() -> String {
    Color::Cyan.paint(BANNER)
}

/// Header, one `label -> cmd` row per command, and footer.
pub fn command_listing(commands: &[CommandSpec]) -> Vec<String> {
    let mut lines = Vec::with_capacity(commands.len() + 2);
    lines.push(Color::Yellow.paint("Configured Commands:"));
    for spec in commands {
        lines.push(format!(
            "{}  {}",
            spec.color.paint(&format!("{} -> ", spec.label)),
            spec.command_line
        ));
    }
    lines.push(Color::Yellow.paint("========================"));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn spec(label: &str, color: Color) -> CommandSpec {
        CommandSpec {
            label: label.to_string(),
            color,
            command_line: "npm run dev".to_string(),
            working_dir: PathBuf::from("."),
        }
    }

    #[test]
    fn decorated_line_has_colored_label_then_text() {
        assert_eq!(
            decorate("web", Color::Blue, "listening on :3000"),
            "\x1b[34m[web]\x1b[0m listening on :3000"
        );
    }

    #[test]
    fn empty_line_keeps_the_prefix() {
        assert_eq!(decorate("A", Color::Red, ""), "\x1b[31m[A]\x1b[0m ");
    }

    #[test]
    fn listing_brackets_commands_with_header_and_footer() {
        let lines = command_listing(&[spec("web", Color::Green), spec("db", Color::Gray)]);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Configured Commands:"));
        assert_eq!(lines[1], "\x1b[32mweb -> \x1b[0m  npm run dev");
        assert!(lines[3].contains("===="));
    }

    #[test]
    fn starting_notice_is_painted_whole() {
        assert_eq!(
            starting_notice(&spec("web", Color::Pink)),
            "\x1b[38;5;207mRunning command: web\x1b[0m"
        );
    }
}
