//! Still-image capture from a video frame.

use derma_core::{ImageBlob, ImageMime};
use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;

use crate::device::VideoFrame;
use crate::error::MediaError;

pub const CAPTURE_FILE_NAME: &str = "derma-capture.jpg";

/// Encode `frame` as a JPEG.
///
/// Selfie previews are shown mirrored; with `mirror` set the still is
/// flipped horizontally so it matches what the user saw.
///
/// # Errors
///
/// Returns `MediaError::FrameNotReady` for a zero-sized frame and
/// `MediaError::Encode` if the buffer does not match its dimensions or the
/// encoder fails.
pub fn encode_frame(frame: &VideoFrame, mirror: bool, quality: u8) -> Result<ImageBlob, MediaError> {
    if !frame.is_ready() {
        return Err(MediaError::FrameNotReady);
    }

    let mut image = RgbImage::from_raw(frame.width, frame.height, frame.rgb.clone())
        .ok_or_else(|| {
            MediaError::Encode(format!(
                "frame buffer of {} bytes does not match {}x{}",
                frame.rgb.len(),
                frame.width,
                frame.height
            ))
        })?;
    if mirror {
        image::imageops::flip_horizontal_in_place(&mut image);
    }

    let mut data = Vec::new();
    JpegEncoder::new_with_quality(&mut data, quality)
        .encode_image(&image)
        .map_err(|e| MediaError::Encode(e.to_string()))?;

    Ok(ImageBlob::new(data, ImageMime::Jpeg, CAPTURE_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Left half red, right half blue.
    fn split_frame(width: u32, height: u32) -> VideoFrame {
        let mut rgb = Vec::new();
        for _ in 0..height {
            for x in 0..width {
                if x < width / 2 {
                    rgb.extend_from_slice(&[255, 0, 0]);
                } else {
                    rgb.extend_from_slice(&[0, 0, 255]);
                }
            }
        }
        VideoFrame { width, height, rgb }
    }

    fn decode(blob: &ImageBlob) -> RgbImage {
        image::load_from_memory(&blob.data).unwrap().to_rgb8()
    }

    #[test]
    fn mirrored_capture_swaps_left_and_right() {
        let blob = encode_frame(&split_frame(32, 16), true, 90).unwrap();
        assert_eq!(blob.mime, ImageMime::Jpeg);
        assert_eq!(blob.file_name, CAPTURE_FILE_NAME);

        let decoded = decode(&blob);
        assert_eq!(decoded.dimensions(), (32, 16));
        let left = decoded.get_pixel(4, 8);
        assert!(left[2] > left[0], "left edge should now be blue: {left:?}");
    }

    #[test]
    fn unmirrored_capture_keeps_orientation() {
        let decoded = decode(&encode_frame(&split_frame(32, 16), false, 90).unwrap());
        let left = decoded.get_pixel(4, 8);
        assert!(left[0] > left[2], "left edge should stay red: {left:?}");
    }

    #[test]
    fn zero_sized_frame_is_not_ready() {
        let frame = VideoFrame {
            width: 0,
            height: 0,
            rgb: Vec::new(),
        };
        assert!(matches!(encode_frame(&frame, true, 90), Err(MediaError::FrameNotReady)));
    }

    #[test]
    fn short_buffer_is_an_encode_error() {
        let frame = VideoFrame {
            width: 4,
            height: 4,
            rgb: vec![0; 5],
        };
        assert!(matches!(encode_frame(&frame, false, 90), Err(MediaError::Encode(_))));
    }
}
