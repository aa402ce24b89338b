//! HEIC/HEIF to JPEG conversion.
//!
//! Decodes via libheif with the container's transformations applied,
//! squares up any EXIF orientation on top of that, normalises to 8-bit
//! three-channel RGB and encodes at the requested quality. The
//! destination is the source path with its extension replaced by `.jpg`;
//! an existing destination is a skip, never an overwrite.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageBuffer, RgbImage, imageops};
use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};
use tracing::debug;

use crate::processing::metadata;
use crate::utils::{PipelineError, PipelineResult, jpeg_sibling};

/// Outcome of one conversion attempt.
#[derive(Debug)]
pub enum Conversion {
    /// The destination was written
    Written(PathBuf),
    /// The destination already existed; nothing was touched
    AlreadyExists(PathBuf),
}

/// Convert one file to a JPEG sibling at the given quality.
///
/// With `keep_datetimes`, the capture-time tags are copied from the
/// source's EXIF into the output; all other metadata is dropped.
pub fn convert_to_jpeg(
    src: &Path,
    quality: u8,
    keep_datetimes: bool,
) -> PipelineResult<Conversion> {
    let dest = jpeg_sibling(src);
    if dest.exists() {
        return Ok(Conversion::AlreadyExists(dest));
    }

    let exif_payload = if keep_datetimes {
        metadata::capture_time_exif(src)?
    } else {
        None
    };

    let decoded = decode_rgb(src)?;
    let upright = apply_orientation(decoded, exif_orientation(src));

    let mut encoded = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut encoded, quality);
    encoder
        .encode(
            upright.as_raw(),
            upright.width(),
            upright.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| PipelineError::encode(format!("JPEG encode failed: {e}")))?;

    let bytes = match exif_payload {
        Some(payload) => metadata::splice_exif(&encoded, &payload)?,
        None => encoded,
    };

    fs::write(&dest, bytes)?;
    debug!("Converted {} → {}", src.display(), dest.display());
    Ok(Conversion::Written(dest))
}

// ── Decoding ──────────────────────────────────────────────────────────────────────────

/// Decode the primary image into interleaved 8-bit RGB.
///
/// libheif applies the container's rotation/mirror transforms during
/// decode, so the returned pixels already honour irot/imir boxes.
fn decode_rgb(src: &Path) -> PipelineResult<RgbImage> {
    let path = src
        .to_str()
        .ok_or_else(|| PipelineError::decode(format!("non-UTF-8 path: {}", src.display())))?;

    let ctx = HeifContext::read_from_file(path)
        .map_err(|e| PipelineError::decode(format!("failed to open '{path}': {e}")))?;
    let handle = ctx
        .primary_image_handle()
        .map_err(|e| PipelineError::decode(format!("no primary image in '{path}': {e}")))?;

    let heif = LibHeif::new();
    let image = heif
        .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)
        .map_err(|e| PipelineError::decode(format!("decode failed for '{path}': {e}")))?;

    let planes = image.planes();
    let plane = planes
        .interleaved
        .ok_or_else(|| PipelineError::decode("decoder returned no interleaved RGB plane"))?;

    let width = plane.width;
    let height = plane.height;
    let row_bytes = width as usize * 3;

    // Rows are stride-padded; copy them out tightly packed.
    let mut data = Vec::with_capacity(row_bytes * height as usize);
    for row in plane.data.chunks(plane.stride).take(height as usize) {
        data.extend_from_slice(&row[..row_bytes]);
    }

    ImageBuffer::from_raw(width, height, data)
        .ok_or_else(|| PipelineError::decode("decoded buffer has unexpected size"))
}

/// EXIF orientation code for `src`, defaulting to 1 (upright).
fn exif_orientation(src: &Path) -> u32 {
    let Ok(file) = File::open(src) else { return 1 };
    let mut reader = BufReader::new(file);
    let Ok(parsed) = exif::Reader::new().read_from_container(&mut reader) else {
        return 1;
    };

    parsed
        .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|f| f.value.get_uint(0))
        .unwrap_or(1)
}

/// Apply an EXIF orientation transform so the pixel data reads upright.
///
/// Codes follow the EXIF specification; 1 and unrecognised values are
/// the identity.
pub(crate) fn apply_orientation(image: RgbImage, orientation: u32) -> RgbImage {
    match orientation {
        2 => imageops::flip_horizontal(&image),
        3 => imageops::rotate180(&image),
        4 => imageops::flip_vertical(&image),
        5 => imageops::rotate270(&imageops::flip_horizontal(&image)),
        6 => imageops::rotate90(&image),
        7 => imageops::rotate90(&imageops::flip_horizontal(&image)),
        8 => imageops::rotate270(&image),
        _ => image,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use std::fs;

    const A: Rgb<u8> = Rgb([255, 0, 0]);
    const B: Rgb<u8> = Rgb([0, 255, 0]);

    /// 2x1 image: A on the left, B on the right.
    fn two_pixels() -> RgbImage {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, A);
        img.put_pixel(1, 0, B);
        img
    }

    #[test]
    fn orientation_1_is_identity() {
        let img = apply_orientation(two_pixels(), 1);
        assert_eq!(img.dimensions(), (2, 1));
        assert_eq!(*img.get_pixel(0, 0), A);
        assert_eq!(*img.get_pixel(1, 0), B);
    }

    #[test]
    fn orientation_2_mirrors_horizontally() {
        let img = apply_orientation(two_pixels(), 2);
        assert_eq!(img.dimensions(), (2, 1));
        assert_eq!(*img.get_pixel(0, 0), B);
        assert_eq!(*img.get_pixel(1, 0), A);
    }

    #[test]
    fn orientation_3_rotates_half_turn() {
        let img = apply_orientation(two_pixels(), 3);
        assert_eq!(img.dimensions(), (2, 1));
        assert_eq!(*img.get_pixel(0, 0), B);
        assert_eq!(*img.get_pixel(1, 0), A);
    }

    #[test]
    fn orientation_6_rotates_clockwise() {
        let img = apply_orientation(two_pixels(), 6);
        assert_eq!(img.dimensions(), (1, 2));
        assert_eq!(*img.get_pixel(0, 0), A);
        assert_eq!(*img.get_pixel(0, 1), B);
    }

    #[test]
    fn orientation_8_rotates_counter_clockwise() {
        let img = apply_orientation(two_pixels(), 8);
        assert_eq!(img.dimensions(), (1, 2));
        assert_eq!(*img.get_pixel(0, 0), B);
        assert_eq!(*img.get_pixel(0, 1), A);
    }

    #[test]
    fn orientation_unknown_is_identity() {
        let img = apply_orientation(two_pixels(), 42);
        assert_eq!(img.dimensions(), (2, 1));
        assert_eq!(*img.get_pixel(0, 0), A);
    }

    #[test]
    fn existing_destination_is_skipped_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("photo.heic");
        let dest = dir.path().join("photo.jpg");
        fs::write(&src, b"not a real heic").unwrap();
        fs::write(&dest, b"previous output").unwrap();

        let outcome = convert_to_jpeg(&src, 90, false).unwrap();
        assert!(matches!(outcome, Conversion::AlreadyExists(p) if p == dest));
        assert_eq!(fs::read(&dest).unwrap(), b"previous output");
    }

    #[test]
    fn corrupt_source_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("broken.heic");
        fs::write(&src, b"garbage bytes").unwrap();

        let err = convert_to_jpeg(&src, 90, false).unwrap_err();
        assert!(matches!(err, PipelineError::Decode(_)));
        // No destination appears on failure.
        assert!(!dir.path().join("broken.jpg").exists());
    }
}
