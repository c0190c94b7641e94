//! Generated placeholder image.

use std::sync::{Arc, OnceLock};

use image::{DynamicImage, Rgb, RgbImage};

/// Placeholder dimensions, matching the transform-service output.
pub const PLACEHOLDER_WIDTH: u32 = 400;
/// Placeholder height.
pub const PLACEHOLDER_HEIGHT: u32 = 300;

const FILL: Rgb<u8> = Rgb([0xcc, 0xcc, 0xcc]);
const BORDER: Rgb<u8> = Rgb([0x99, 0x99, 0x99]);
const BORDER_THICKNESS: u32 = 4;

/// Returns the shared placeholder image.
///
/// Generated in-process on first use: no network, no I/O, cannot fail.
/// Terminates every fallback chain.
#[must_use]
pub fn placeholder_image() -> Arc<DynamicImage> {
    static PLACEHOLDER: OnceLock<Arc<DynamicImage>> = OnceLock::new();
    PLACEHOLDER
        .get_or_init(|| {
            let mut canvas =
                RgbImage::from_pixel(PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT, FILL);
            for (x, y, pixel) in canvas.enumerate_pixels_mut() {
                let near_edge = x < BORDER_THICKNESS
                    || y < BORDER_THICKNESS
                    || x >= PLACEHOLDER_WIDTH - BORDER_THICKNESS
                    || y >= PLACEHOLDER_HEIGHT - BORDER_THICKNESS;
                if near_edge {
                    *pixel = BORDER;
                }
            }
            Arc::new(DynamicImage::ImageRgb8(canvas))
        })
        .clone()
}
