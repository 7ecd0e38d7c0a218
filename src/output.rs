//! # Terminal Output
//!
//! Helpers for the human-readable part of the CLI output: whether to use
//! colors and emoji, and how to print status lines about generated files.
//!
//! Color is decided once from `--color` and the environment:
//! - `--color=always|never` wins over everything else
//! - `NO_COLOR` (any value) and `CLICOLOR=0` disable colors
//! - `CLICOLOR_FORCE=1` enables colors even without a TTY
//! - `TERM=dumb` disables colors
//!
//! Otherwise the `console` crate's TTY detection decides.

use std::env;
use std::fmt::Display;
use std::path::Path;

use clap::ValueEnum;
use console::style;

/// Value of the `--color` flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorWhen {
    #[default]
    Auto,
    Always,
    Never,
}

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    pub fn new(when: ColorWhen) -> Self {
        let use_color = match when {
            ColorWhen::Always => true,
            ColorWhen::Never => false,
            ColorWhen::Auto => detect_color_support(),
        };
        console::set_colors_enabled(use_color);
        Self { use_color }
    }

    /// Prints `<marker> <message>` to stdout.
    pub fn status(&self, emoji_str: &str, plain: &str, message: impl Display) {
        println!("{} {}", emoji(self, emoji_str, plain), message);
    }

    /// Formats a path for display: bold when colors are on.
    pub fn path(&self, path: &Path) -> String {
        if self.use_color {
            style(path.display()).bold().to_string()
        } else {
            path.display().to_string()
        }
    }
}

fn detect_color_support() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
        return false;
    }
    if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
        return true;
    }
    if env::var("TERM").is_ok_and(|v| v == "dumb") {
        return false;
    }
    console::Term::stdout().features().colors_supported()
}

/// Returns `emoji_str` when colors are enabled, else the plain marker.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}
