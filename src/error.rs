//! Structured error types for the patch pipeline.
//!
//! Two of the variants are benign: a missing configuration file falls back to
//! defaults, and an unknown language tag ends the run without touching the
//! host binary. Everything else is fatal.

use std::path::PathBuf;

/// The unified error type returned by all public fontpatch functions.
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    /// The key=value configuration file could not be read.
    #[error("config file {} unavailable: {source}", .path.display())]
    ConfigUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The language tag has no codepoint ranges.
    #[error("language '{0}' has no font range")]
    UnsupportedLanguage(String),

    /// No `.ttf`/`.otf` file was found in the font directory.
    #[error("no TTF/OTF font found in {}", .0.display())]
    FontAssetMissing(PathBuf),

    /// A font file was found but could not be read or parsed.
    #[error("font {} is unusable: {reason}", .path.display())]
    FontInvalid { path: PathBuf, reason: String },

    /// No magic occurrence decompressed to exactly the expected table size.
    #[error("no valid font bundle found ({candidates} candidate(s) rejected)")]
    BundleNotFound { candidates: usize },

    /// The recompressed table does not fit in the space the old one occupied.
    #[error("compressed bundle too large: {compressed} bytes, budget is {budget}")]
    BundleTooLarge { compressed: usize, budget: usize },

    /// A codepoint range is empty, reversed, or leaves the BMP.
    #[error("invalid codepoint range [{start:#X}, {end:#X})")]
    InvalidRange { start: u32, end: u32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PatchError {
    /// Whether this error must abort the run with a non-zero exit code.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            PatchError::ConfigUnavailable { .. } | PatchError::UnsupportedLanguage(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PatchError>;
