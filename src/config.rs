//! # Configuration
//!
//! A plain `key = value` text file next to the tool. Only `font_num` is
//! recognized; anything else is ignored.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{PatchError, Result};

/// Default location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    /// Also repaint the ASCII digits.
    pub font_num: bool,
}

impl Config {
    /// Parse config text. Lines without `=` are skipped; keys and values
    /// are trimmed, and boolean values are case-insensitive.
    pub fn parse(text: &str) -> Self {
        let mut cfg = Config::default();
        for line in text.lines() {
            let Some((key, value)) = line.trim().split_once('=') else {
                continue;
            };
            if key.trim() == "font_num" {
                cfg.font_num = value.trim().eq_ignore_ascii_case("true");
            }
        }
        cfg
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| PatchError::ConfigUnavailable {
            path: PathBuf::from(path),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    /// Load `path`, falling back to defaults if it can't be read.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("{e}; using default settings");
                Self::default()
            }
        }
    }
}
