//! # Bundle Locator
//!
//! The host binary is opaque. The only self-describing signals are the zstd
//! frame magic and the fact that the glyph table has a fixed size, so every
//! magic occurrence is a candidate and a candidate is accepted only if its
//! frame decompresses to exactly that size. Decoys that fail to decode, or
//! decode to anything shorter or longer, are skipped.

use std::io::Read;

use memchr::memmem;
use tracing::debug;

use super::BundleLocation;
use crate::error::{PatchError, Result};

/// Lazily yields every offset where `magic` occurs in `haystack`, in
/// ascending order. Overlapping occurrences are all reported.
#[derive(Debug, Clone)]
pub struct MagicScanner<'a> {
    haystack: &'a [u8],
    finder: memmem::Finder<'a>,
    pos: usize,
}

impl<'a> MagicScanner<'a> {
    pub fn new(haystack: &'a [u8], magic: &'a [u8]) -> Self {
        Self {
            haystack,
            finder: memmem::Finder::new(magic),
            pos: 0,
        }
    }
}

impl Iterator for MagicScanner<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        // An empty needle matches everywhere.
        if self.finder.needle().is_empty() || self.pos >= self.haystack.len() {
            return None;
        }
        let found = self.finder.find(&self.haystack[self.pos..])?;
        let offset = self.pos + found;
        self.pos = offset + 1;
        Some(offset)
    }
}

/// Outcome of trying one candidate offset.
#[derive(Debug)]
enum Candidate {
    Accepted(Vec<u8>),
    /// Decoded, but to the wrong length. Lengths past the cap read as `expected + 1`.
    WrongSize(usize),
    Corrupt(std::io::Error),
}

fn try_candidate(stream: &[u8], expected: usize) -> Candidate {
    match inflate_capped(stream, expected) {
        Ok(table) if table.len() == expected => Candidate::Accepted(table),
        Ok(table) => Candidate::WrongSize(table.len()),
        Err(e) => Candidate::Corrupt(e),
    }
}

/// Decompress the single frame at the start of `stream`, reading at most
/// `expected + 1` bytes of output. Bytes after the frame are left alone.
fn inflate_capped(stream: &[u8], expected: usize) -> std::io::Result<Vec<u8>> {
    let decoder = zstd::stream::read::Decoder::with_buffer(stream)?.single_frame();
    let mut out = Vec::with_capacity(expected);
    decoder.take(expected as u64 + 1).read_to_end(&mut out)?;
    Ok(out)
}

/// Find the compressed table inside `buffer`.
///
/// The budget is the distance from the accepted offset to the next magic
/// occurrence, or to the end of the buffer if there is none.
pub fn locate(buffer: &[u8], magic: &[u8], expected_size: usize) -> Result<BundleLocation> {
    let mut candidates = MagicScanner::new(buffer, magic);
    let mut rejected = 0usize;

    while let Some(offset) = candidates.next() {
        match try_candidate(&buffer[offset..], expected_size) {
            Candidate::Accepted(table) => {
                let end = candidates.next().unwrap_or(buffer.len());
                debug!(offset, budget = end - offset, rejected, "bundle candidate accepted");
                return Ok(BundleLocation {
                    offset,
                    table,
                    budget: end - offset,
                });
            }
            Candidate::WrongSize(len) => {
                debug!(offset, len, expected_size, "bundle candidate has wrong size");
                rejected += 1;
            }
            Candidate::Corrupt(e) => {
                debug!(offset, error = %e, "bundle candidate does not decode");
                rejected += 1;
            }
        }
    }

    Err(PatchError::BundleNotFound {
        candidates: rejected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::ZSTD_MAGIC;

    const SMALL: usize = 4096;

    fn frame(len: usize, fill: u8) -> Vec<u8> {
        zstd::bulk::compress(&vec![fill; len], 3).unwrap()
    }

    #[test]
    fn test_scanner_finds_overlapping_occurrences() {
        let hay = b"aaaa";
        let found: Vec<usize> = MagicScanner::new(hay, b"aa").collect();
        assert_eq!(found, vec![0, 1, 2]);
    }

    #[test]
    fn test_scanner_adjacent_magic() {
        let mut hay = ZSTD_MAGIC.to_vec();
        hay.extend_from_slice(&ZSTD_MAGIC);
        let found: Vec<usize> = MagicScanner::new(&hay, &ZSTD_MAGIC).collect();
        assert_eq!(found, vec![0, 4]);
    }

    #[test]
    fn test_scanner_magic_straddling_and_at_end() {
        let mut hay = vec![0x28, 0xB5];
        hay.extend_from_slice(&ZSTD_MAGIC);
        hay.extend_from_slice(&[0x2F, 0xFD, 0x00]);
        hay.extend_from_slice(&ZSTD_MAGIC);
        let found: Vec<usize> = MagicScanner::new(&hay, &ZSTD_MAGIC).collect();
        assert_eq!(found, vec![2, 9]);
    }

    #[test]
    fn test_scanner_empty_magic_yields_nothing() {
        assert_eq!(MagicScanner::new(b"abc", b"").count(), 0);
        assert_eq!(MagicScanner::new(b"", &ZSTD_MAGIC).count(), 0);
    }

    #[test]
    fn test_locate_single_frame_at_end() {
        let mut buf = b"header bytes".to_vec();
        let offset = buf.len();
        let f = frame(SMALL, 7);
        buf.extend_from_slice(&f);

        let loc = locate(&buf, &ZSTD_MAGIC, SMALL).unwrap();
        assert_eq!(loc.offset, offset);
        assert_eq!(loc.budget, f.len());
        assert!(loc.table.iter().all(|&b| b == 7));
    }

    #[test]
    fn test_locate_rejects_wrong_size_before_valid() {
        let mut buf = frame(SMALL - 1, 1);
        buf.extend_from_slice(&frame(SMALL + 1, 2));
        let valid_at = buf.len();
        buf.extend_from_slice(&frame(SMALL, 3));
        buf.extend_from_slice(&[0u8; 20]);

        let loc = locate(&buf, &ZSTD_MAGIC, SMALL).unwrap();
        assert_eq!(loc.offset, valid_at);
        assert_eq!(loc.table.len(), SMALL);
        assert_eq!(loc.budget, buf.len() - valid_at);
    }

    #[test]
    fn test_locate_valid_before_decoys() {
        let mut buf = vec![0x11; 8];
        let f = frame(SMALL, 9);
        buf.extend_from_slice(&f);
        buf.extend_from_slice(&[0x22; 5]);
        let next_magic = buf.len();
        buf.extend_from_slice(&ZSTD_MAGIC);
        buf.extend_from_slice(&[0xFF; 30]);

        let loc = locate(&buf, &ZSTD_MAGIC, SMALL).unwrap();
        assert_eq!(loc.offset, 8);
        assert_eq!(loc.budget, next_magic - 8);
    }

    #[test]
    fn test_locate_ignores_truncated_frame() {
        let full = frame(SMALL, 4);
        let buf = full[..full.len() - 3].to_vec();
        let err = locate(&buf, &ZSTD_MAGIC, SMALL).unwrap_err();
        assert!(matches!(err, PatchError::BundleNotFound { candidates: 1 }));
    }

    #[test]
    fn test_locate_no_magic() {
        let err = locate(&[0u8; 64], &ZSTD_MAGIC, SMALL).unwrap_err();
        assert!(matches!(err, PatchError::BundleNotFound { candidates: 0 }));
    }

    #[test]
    fn test_locate_counts_garbage_candidates() {
        let mut buf = ZSTD_MAGIC.to_vec();
        buf.extend_from_slice(&[0xFF; 50]);
        buf.extend_from_slice(&ZSTD_MAGIC);
        let err = locate(&buf, &ZSTD_MAGIC, SMALL).unwrap_err();
        assert!(matches!(err, PatchError::BundleNotFound { candidates: 2 }));
    }
}
