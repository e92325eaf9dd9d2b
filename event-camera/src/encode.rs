use crate::filter::Filter;
use crate::models::{Frame, Quality};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbaImage};

/// Error type for still encoding
#[derive(Debug)]
pub enum EncodeError {
    /// Pixel buffer does not match the frame dimensions
    InvalidFrame(String),
    EncoderError(String),
}

impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeError::InvalidFrame(msg) => write!(f, "Invalid frame: {}", msg),
            EncodeError::EncoderError(msg) => write!(f, "JPEG encode error: {}", msg),
        }
    }
}

impl std::error::Error for EncodeError {}

/// Bakes `filter` into the frame and encodes it as JPEG at the quality
/// selected by the HD toggle.
pub fn encode_still(frame: Frame, filter: Filter, quality: Quality) -> Result<Vec<u8>, EncodeError> {
    let Frame {
        width,
        height,
        mut rgba,
    } = frame;

    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidFrame(format!(
            "empty frame {}x{}",
            width, height
        )));
    }

    filter.apply_rgba(&mut rgba);

    let img = RgbaImage::from_raw(width, height, rgba).ok_or_else(|| {
        EncodeError::InvalidFrame(format!("buffer too small for {}x{}", width, height))
    })?;
    let rgb = DynamicImage::ImageRgba8(img).to_rgb8();

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, quality.jpeg_quality())
        .encode_image(&rgb)
        .map_err(|e| EncodeError::EncoderError(e.to_string()))?;

    log::debug!(
        "Encoded {}x{} still ({} bytes, filter={}, quality={})",
        width,
        height,
        jpeg.len(),
        filter.id(),
        quality.tag()
    );

    Ok(jpeg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> Frame {
        let mut rgba = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                rgba.extend_from_slice(&[(x * 7 % 256) as u8, (y * 5 % 256) as u8, 128, 255]);
            }
        }
        Frame {
            width,
            height,
            rgba,
        }
    }

    #[test]
    fn test_encode_produces_jpeg() {
        let jpeg = encode_still(gradient(64, 48), Filter::Vintage, Quality::Hd).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);

        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!(decoded.width(), 64);
        assert_eq!(decoded.height(), 48);
    }

    #[test]
    fn test_standard_quality_is_smaller() {
        let hd = encode_still(gradient(128, 96), Filter::None, Quality::Hd).unwrap();
        let std = encode_still(gradient(128, 96), Filter::None, Quality::Standard).unwrap();
        assert!(std.len() < hd.len());
    }

    #[test]
    fn test_rejects_short_buffer() {
        let frame = Frame {
            width: 10,
            height: 10,
            rgba: vec![0; 12],
        };
        assert!(matches!(
            encode_still(frame, Filter::None, Quality::Hd),
            Err(EncodeError::InvalidFrame(_))
        ));
    }
}
