//! Image decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::error::ImageError;
use image::{DynamicImage, ImageDecoder, ImageReader};

use super::{DecodeError, DecodedImage, Orientation};
use crate::config::RenderConfig;

/// Decode an uploaded image to RGB pixels at its natural size.
///
/// The format is sniffed from the bytes, not taken from a file name. When
/// `config.apply_exif_orientation` is set, the EXIF orientation is applied so
/// width and height match what the browser displays.
///
/// # Errors
///
/// - `DecodeError::Empty` for a zero-length input
/// - `DecodeError::InvalidFormat` if the bytes are not a recognized image
/// - `DecodeError::TooLarge` if the image exceeds `config.max_source_pixels`
/// - `DecodeError::CorruptedFile` if decoding fails part way
pub fn decode_image(bytes: &[u8], config: &RenderConfig) -> Result<DecodedImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let decoder = reader.into_decoder().map_err(map_image_error)?;
    let (width, height) = decoder.dimensions();
    if width as u64 * height as u64 > config.max_source_pixels {
        return Err(DecodeError::TooLarge {
            width,
            height,
            limit: config.max_source_pixels,
        });
    }

    let img = DynamicImage::from_decoder(decoder).map_err(map_image_error)?;

    let img = if config.apply_exif_orientation {
        apply_orientation(img, extract_orientation(bytes))
    } else {
        img
    };

    let decoded = DecodedImage::from_rgb_image(img.into_rgb8());
    tracing::debug!(
        width = decoded.width,
        height = decoded.height,
        "Decoded source image"
    );
    Ok(decoded)
}

fn map_image_error(err: ImageError) -> DecodeError {
    match err {
        ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        other => DecodeError::CorruptedFile(other.to_string()),
    }
}

/// Extract EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
