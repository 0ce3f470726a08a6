//! Coarse perceptual image signatures.
//!
//! A signature reduces an image to a `size * size`-bit integer: the image is
//! shrunk to a `size x size` grid, collapsed to black and white, and the
//! resulting bits are packed in raster order. Two images are considered
//! duplicates when their signatures are exactly equal; there is no distance
//! metric and no partial credit.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::DynamicImage;
use thiserror::Error;

/// A bit-packed image fingerprint.
///
/// Width is `size * size` bits for a sensitivity of `size`, so `u128` allows
/// sensitivities up to [`MAX_SENSITIVITY`].
pub type Signature = u128;

/// Default signature grid size (a 4x4 grid, 16-bit signatures).
///
/// Intentionally coarse: lossy compression and minor edits shift pixels, and
/// a finer grid would miss those duplicates.
pub const DEFAULT_SENSITIVITY: u32 = 4;

/// Largest supported grid size: 11x11 = 121 bits, the most that fit a `u128`.
pub const MAX_SENSITIVITY: u32 = 11;

/// Luma values above this cutoff become white bits.
///
/// Midpoint threshold over the 0-255 luminance range, no dithering.
const BLACK_WHITE_CUTOFF: u8 = 127;

/// Errors that can occur while decoding a directory entry as an image.
///
/// Decode failures are recoverable: the input directory may legitimately
/// contain non-image files or subdirectories, and those entries are simply
/// skipped.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The entry could not be opened and decoded as an image.
    #[error("{} cannot be opened as an image: {source}", path.display())]
    Unreadable {
        /// Path of the offending entry
        path: PathBuf,
        /// The underlying decode error
        #[source]
        source: image::ImageError,
    },
}

/// Decode the file at `path` into pixel data.
///
/// # Errors
///
/// Returns [`DecodeError::Unreadable`] if the entry is not a readable image
/// (wrong format, truncated file, or a directory).
pub fn decode_image(path: &Path) -> Result<DynamicImage, DecodeError> {
    image::open(path).map_err(|source| DecodeError::Unreadable {
        path: path.to_path_buf(),
        source,
    })
}

/// Compute the signature of a decoded image on a `size x size` grid.
///
/// Steps, in order:
/// 1. Resize to `size x size` with nearest-neighbor resampling (fixed so the
///    same pixels always produce the same signature).
/// 2. Collapse to 8-bit grayscale; non-grayscale color modes go through RGB.
/// 3. Threshold at the luminance midpoint: luma > 127 is a 1 bit.
/// 4. Pack bits in row-major order, most significant bit first.
///
/// An all-black 4x4 image signs to 0; an all-white 4x4 image signs to 65535.
///
/// `size` must be in `1..=MAX_SENSITIVITY`; the CLI enforces this at parse
/// time.
#[must_use]
pub fn signature(image: &DynamicImage, size: u32) -> Signature {
    debug_assert!(
        (1..=MAX_SENSITIVITY).contains(&size),
        "sensitivity {size} out of range"
    );

    let reduced = image.resize_exact(size, size, FilterType::Nearest);
    let mono = reduced.to_luma8();

    let mut sig: Signature = 0;
    for pixel in mono.pixels() {
        sig <<= 1;
        if pixel.0[0] > BLACK_WHITE_CUTOFF {
            sig |= 1;
        }
    }

    sig
}
