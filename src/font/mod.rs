//! # Font Discovery
//!
//! The replacement glyphs come from whatever font the user drops into the
//! font directory. The first `.ttf` wins, then the first `.otf`, in file
//! name order so repeated runs pick the same file.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{PatchError, Result};
use crate::glyph::TrueTypeFace;

/// Default font directory, relative to the working directory.
pub const DEFAULT_FONT_DIR: &str = "font";

const FONT_EXTENSIONS: [&str; 2] = ["ttf", "otf"];

/// Raw bytes of the chosen font file.
#[derive(Debug, Clone)]
pub struct FontAsset {
    pub path: PathBuf,
    pub data: Vec<u8>,
}

impl FontAsset {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).map_err(|e| PatchError::FontInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }

    /// Parse the font for rasterization.
    pub fn face(&self) -> Result<TrueTypeFace<'_>> {
        TrueTypeFace::parse(&self.data).map_err(|e| PatchError::FontInvalid {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }
}

/// Pick the font file to rasterize with. A missing directory counts as an
/// empty one.
pub fn pick_font(dir: &Path) -> Result<PathBuf> {
    let mut files: Vec<PathBuf> = match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file())
            .collect(),
        Err(_) => Vec::new(),
    };
    files.sort();

    for ext in FONT_EXTENSIONS {
        if let Some(found) = files.iter().find(|p| has_extension(p, ext)) {
            info!(font = %found.display(), "using font");
            return Ok(found.clone());
        }
    }
    Err(PatchError::FontAssetMissing(dir.to_path_buf()))
}

/// Locate and read the font in `dir`.
pub fn load_font(dir: &Path) -> Result<FontAsset> {
    FontAsset::load(&pick_font(dir)?)
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}
