//! Capture-time EXIF carry-over for converted files.
//!
//! Conversion drops all source metadata by construction: the encoder
//! writes none, and when the caller asks to keep capture times a fresh
//! Exif block containing at most the three allow-listed timestamp tags
//! is rebuilt from the source and spliced into the output JPEG. A source
//! without readable EXIF produces an output without an EXIF block.

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

use exif::experimental::Writer;
use exif::{Field, In, Reader, Tag};
use tracing::debug;

use crate::utils::{PipelineError, PipelineResult};

/// Tags carried through a keep-datetimes conversion. Everything else,
/// the orientation tag included, is dropped.
const KEEP_TAGS: [Tag; 3] = [Tag::DateTimeOriginal, Tag::DateTimeDigitized, Tag::DateTime];

const EXIF_HEADER: &[u8] = b"Exif\0\0";

/// Build an EXIF payload holding the allow-listed tags from `src`.
///
/// Returns `None` when the source has no readable metadata or none of
/// the allow-listed tags are present.
pub fn capture_time_exif(src: &Path) -> PipelineResult<Option<Vec<u8>>> {
    let file = File::open(src)?;
    let mut reader = BufReader::new(file);

    let parsed = match Reader::new().read_from_container(&mut reader) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!("No readable EXIF in {}: {e}", src.display());
            return Ok(None);
        }
    };

    let kept: Vec<&Field> = parsed
        .fields()
        .filter(|f| f.ifd_num == In::PRIMARY && KEEP_TAGS.contains(&f.tag))
        .collect();

    if kept.is_empty() {
        return Ok(None);
    }

    let mut writer = Writer::new();
    for field in &kept {
        writer.push_field(field);
    }

    let mut buf = Cursor::new(Vec::new());
    writer
        .write(&mut buf, false)
        .map_err(|e| PipelineError::encode(format!("failed to build EXIF block: {e}")))?;

    Ok(Some(buf.into_inner()))
}

/// Splice an EXIF payload into a freshly encoded JPEG as its APP1 segment.
///
/// `exif_payload` is a raw TIFF structure as produced by
/// [`capture_time_exif`]; the segment is inserted immediately after SOI.
pub fn splice_exif(jpeg: &[u8], exif_payload: &[u8]) -> PipelineResult<Vec<u8>> {
    if jpeg.len() < 2 || jpeg[0] != 0xFF || jpeg[1] != 0xD8 {
        return Err(PipelineError::encode("encoder produced no JPEG SOI marker"));
    }

    // Segment length counts the two length bytes plus the Exif header.
    let segment_len = exif_payload.len() + EXIF_HEADER.len() + 2;
    if segment_len > u16::MAX as usize {
        return Err(PipelineError::encode("EXIF block too large for an APP1 segment"));
    }

    let mut out = Vec::with_capacity(jpeg.len() + segment_len + 2);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&(segment_len as u16).to_be_bytes());
    out.extend_from_slice(EXIF_HEADER);
    out.extend_from_slice(exif_payload);
    out.extend_from_slice(&jpeg[2..]);
    Ok(out)
}
