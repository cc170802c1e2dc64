//! Image normalization: decode fetched bytes, fix the color mode, re-encode to disk.
//!
//! The input format is sniffed from the bytes; the output format comes from the target
//! file extension. Alpha-capable categories (transparent, animated GIF) are converted
//! to RGBA, everything else to RGB with the alpha channel dropped.

use crate::error::{Error, Result};
use crate::types::ImageType;
use image::codecs::jpeg::JpegEncoder;
use image::error::{ImageFormatHint, UnsupportedError, UnsupportedErrorKind};
use image::{DynamicImage, ImageError, ImageFormat};
use std::io::Cursor;
use std::path::PathBuf;

/// JPEG quality used for re-encoding
pub const JPEG_QUALITY: u8 = 98;

/// Decode `bytes` and convert to the color mode required by `category`
///
/// # Errors
/// Returns [`Error::Image`] if the bytes are not a supported image.
pub fn normalize(bytes: &[u8], category: ImageType) -> Result<DynamicImage> {
    let decoded = image::load_from_memory(bytes)?;
    let converted = if category.keeps_alpha() {
        DynamicImage::ImageRgba8(decoded.to_rgba8())
    } else {
        DynamicImage::ImageRgb8(decoded.to_rgb8())
    };
    Ok(converted)
}

/// Encode `image` in `format`
///
/// # Errors
/// Returns [`Error::Image`] if the encoder rejects the image, including an
/// alpha-carrying image written as JPEG.
pub fn encode(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    match format {
        ImageFormat::Jpeg => {
            if image.color().has_alpha() {
                return Err(Error::Image(ImageError::Unsupported(
                    UnsupportedError::from_format_and_kind(
                        ImageFormatHint::Exact(ImageFormat::Jpeg),
                        UnsupportedErrorKind::Color(image.color().into()),
                    ),
                )));
            }
            let encoder = JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
            image.write_with_encoder(encoder)?;
        }
        other => image.write_to(&mut buffer, other)?,
    }
    Ok(buffer.into_inner())
}

/// Normalize `bytes` for `category` and write them to `path`
///
/// The output format is chosen from the extension of `path`. Decoding and encoding run
/// on the blocking thread pool; nothing is written unless encoding succeeds.
///
/// # Errors
/// Returns [`Error::Image`] for undecodable bytes, an unknown target extension or an
/// encoder failure, and [`Error::Io`] if the file cannot be written.
pub async fn save_image(bytes: Vec<u8>, category: ImageType, path: PathBuf) -> Result<PathBuf> {
    let format = ImageFormat::from_path(&path)?;

    let encoded = tokio::task::spawn_blocking(move || {
        let image = normalize(&bytes, category)?;
        encode(&image, format)
    })
    .await
    .map_err(|e| Error::Other(format!("image task failed: {}", e)))??;

    tokio::fs::write(&path, encoded).await?;
    Ok(path)
}
