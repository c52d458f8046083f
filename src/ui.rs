//! Terminal output for piper: status labels, tables, color detection.
//!
//! Results go to stdout, errors to stderr.
//!
//! # No-color detection (in priority order):
//! 1. `--no-color` CLI flag (highest priority)
//! 2. `NO_COLOR` environment variable (any value)
//! 3. `TERM=dumb` environment variable
//! 4. `--color` mode, where `auto` means "stdout is a TTY"

use anstream::{eprintln, println};
use anstyle::{AnsiColor, Color, Style};
use comfy_table::{Cell, ContentArrangement, Table, presets};
use std::io::IsTerminal;

/// Color mode for output
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorMode {
    /// Always emit ANSI colors
    Always,
    /// Emit colors only if stdout is a TTY
    #[default]
    Auto,
    /// Never emit ANSI colors
    Never,
}

/// Resolved display settings
#[derive(Debug, Clone)]
pub struct Ui {
    pub color_enabled: bool,
}

impl Ui {
    pub fn new(mode: ColorMode, force_no_color: bool) -> Self {
        let color_enabled = Self::resolve_color(mode, force_no_color);

        if !color_enabled {
            anstream::ColorChoice::write_global(anstream::ColorChoice::Never);
        }

        Self { color_enabled }
    }

    fn resolve_color(mode: ColorMode, force_no_color: bool) -> bool {
        if force_no_color {
            return false;
        }

        if std::env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
            return false;
        }

        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }

    fn style_label(&self, color: AnsiColor) -> Style {
        if self.color_enabled {
            Style::new().fg_color(Some(Color::Ansi(color))).bold()
        } else {
            Style::new()
        }
    }

    /// Print OK label (green) with message to stdout
    pub fn ok(&self, msg: impl AsRef<str>) {
        let label = self.style_label(AnsiColor::Green);
        println!("{label}OK{label:#} {}", msg.as_ref());
    }

    /// Print WARN label (yellow) with message to stdout
    pub fn warn(&self, msg: impl AsRef<str>) {
        let label = self.style_label(AnsiColor::Yellow);
        println!("{label}WARN{label:#} {}", msg.as_ref());
    }

    /// Print WARN label (yellow) with message to stderr, keeping stdout for results
    pub fn warn_stderr(&self, msg: impl AsRef<str>) {
        let label = self.style_label(AnsiColor::Yellow);
        eprintln!("{label}WARN{label:#} {}", msg.as_ref());
    }

    /// Print ERROR label (red) with message to stderr
    pub fn err(&self, msg: impl AsRef<str>) {
        let label = self.style_label(AnsiColor::Red);
        eprintln!("{label}ERROR{label:#} {}", msg.as_ref());
    }

    /// Print INFO label (cyan) with message to stdout
    pub fn info(&self, msg: impl AsRef<str>) {
        let label = self.style_label(AnsiColor::Cyan);
        println!("{label}INFO{label:#} {}", msg.as_ref());
    }

    pub fn dim(&self, s: impl AsRef<str>) -> String {
        if self.color_enabled {
            let st = Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack)));
            format!("{st}{}{st:#}", s.as_ref())
        } else {
            s.as_ref().to_string()
        }
    }

    pub fn bold(&self, s: impl AsRef<str>) -> String {
        if self.color_enabled {
            let st = Style::new().bold();
            format!("{st}{}{st:#}", s.as_ref())
        } else {
            s.as_ref().to_string()
        }
    }

    /// Marker shown next to the current profile in listings
    pub fn icon_current(&self) -> &'static str {
        if self.color_enabled { "●" } else { "*" }
    }

    /// Borderless table for listings
    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.load_preset(presets::NOTHING);
        table
    }

    pub fn cell(&self, content: impl Into<String>) -> Cell {
        Cell::new(content.into())
    }

    /// Header cell (bold when color enabled)
    pub fn header_cell(&self, content: impl Into<String>) -> Cell {
        let cell = Cell::new(content.into());
        if self.color_enabled {
            cell.add_attribute(comfy_table::Attribute::Bold)
        } else {
            cell
        }
    }

    /// Colored cell using comfy-table's own styling so widths stay correct
    pub fn colored_cell(&self, content: impl Into<String>, color: comfy_table::Color) -> Cell {
        let cell = Cell::new(content.into());
        if self.color_enabled { cell.fg(color) } else { cell }
    }

    /// Print a line to stdout
    pub fn println(&self, msg: impl AsRef<str>) {
        println!("{}", msg.as_ref());
    }

    pub fn newline(&self) {
        println!();
    }

    /// Print a bold section header
    pub fn section(&self, title: impl AsRef<str>) {
        println!("{}", self.bold(title));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn test_color_mode_parse() {
        assert_eq!(ColorMode::from_str("always", true).unwrap(), ColorMode::Always);
        assert_eq!(ColorMode::from_str("auto", true).unwrap(), ColorMode::Auto);
        assert_eq!(ColorMode::from_str("NEVER", true).unwrap(), ColorMode::Never);
        assert!(ColorMode::from_str("invalid", true).is_err());
    }

    #[test]
    fn test_ui_force_no_color() {
        let ui = Ui::new(ColorMode::Always, true);
        assert!(!ui.color_enabled);
    }

    #[test]
    fn test_ui_never_mode() {
        let ui = Ui::new(ColorMode::Never, false);
        assert!(!ui.color_enabled);
    }

    #[test]
    fn test_plain_text_without_color() {
        let ui = Ui::new(ColorMode::Never, false);
        assert_eq!(ui.dim("test"), "test");
        assert_eq!(ui.bold("test"), "test");
        assert_eq!(ui.icon_current(), "*");
    }

    #[test]
    fn test_table_renders_rows() {
        let ui = Ui::new(ColorMode::Never, false);
        let mut table = ui.table();
        table.set_header(vec![ui.header_cell("Profile")]);
        table.add_row(vec![ui.colored_cell("alice", comfy_table::Color::Green)]);
        let rendered = table.to_string();
        assert!(rendered.contains("Profile"));
        assert!(rendered.contains("alice"));
    }
}
