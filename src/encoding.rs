//! Whole-file loading
//!
//! Input files are mapped and copied into one owned byte buffer before any
//! line is looked at. Bytes pass through untouched; the only exception is a
//! file that opens with a UTF-16 byte order mark, which is transcoded to UTF-8
//! so that its lines can be split on `\n` like any other file.

use crate::error::{Error, Result};
use encoding_rs::Encoding;
use std::fs::File;
use std::path::Path;

/// Detect a UTF-16 BOM (Byte Order Mark) at the start of content
fn detect_utf16_bom(content: &[u8]) -> Option<&'static Encoding> {
    Encoding::for_bom(content)
        .map(|(encoding, _)| encoding)
        .filter(|&encoding| encoding == encoding_rs::UTF_16LE || encoding == encoding_rs::UTF_16BE)
}

/// Transcode BOM-marked UTF-16 content to UTF-8, dropping the BOM
///
/// Returns `None` for everything else, including UTF-8 with a BOM.
pub fn transcode_utf16(content: &[u8]) -> Option<Vec<u8>> {
    let encoding = detect_utf16_bom(content)?;
    let (text, _, had_errors) = encoding.decode(content);

    if had_errors {
        log::debug!(
            "Unpaired {} surrogates replaced during transcoding",
            encoding.name()
        );
    }

    Some(text.into_owned().into_bytes())
}

/// Load a whole file into memory
pub fn load_bytes(path: &Path) -> Result<Vec<u8>> {
    let read_err = |source| Error::Read {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_err)?;
    let len = file.metadata().map_err(read_err)?.len();

    // Mapping a zero-length file is not portable
    if len == 0 {
        return Ok(Vec::new());
    }

    // SAFETY: the map is read-only and dropped before this function returns;
    // the copy is what callers keep.
    let mmap = unsafe { memmap2::Mmap::map(&file) }.map_err(read_err)?;

    match transcode_utf16(&mmap) {
        Some(utf8) => {
            log::debug!("{:?}: UTF-16 input transcoded to UTF-8", path);
            Ok(utf8)
        }
        None => Ok(mmap.to_vec()),
    }
}
