//! Overlay Builder - transparent layer with the bottom scrim band

use image::{Rgba, RgbaImage};

use crate::layout::BAND_MAX;
use crate::templates::Template;

pub const GRADIENT_MAX_ALPHA: u32 = 200;
pub const SOLID_ALPHA: u8 = 180;

/// Height of the bottom band: `min(250 * scale, height / 4)`.
pub fn band_height(canvas_height: u32, scale: f64) -> u32 {
    let scaled = (BAND_MAX * scale) as u32;
    scaled.min(canvas_height / 4)
}

/// Gradient alpha for `row` (0 = top edge of the band).
pub fn band_alpha(row: u32, band_height: u32) -> u8 {
    if band_height == 0 {
        return 0;
    }
    let row = row.min(band_height - 1);
    (GRADIENT_MAX_ALPHA * row / band_height) as u8
}

/// Scrim color for one band row.
pub fn band_pixel(template: &Template, row: u32, band_height: u32) -> Rgba<u8> {
    if template.gradient {
        Rgba([0, 0, 0, band_alpha(row, band_height)])
    } else {
        template.primary.with_alpha(SOLID_ALPHA)
    }
}

/// Allocate a fully transparent layer and paint the scrim band into it.
pub fn build_overlay(width: u32, height: u32, scale: f64, template: &Template) -> RgbaImage {
    let mut overlay = RgbaImage::new(width, height);
    let band = band_height(height, scale);
    let top = height - band;
    let stride = width as usize * 4;

    for (row, line) in overlay
        .chunks_exact_mut(stride)
        .skip(top as usize)
        .enumerate()
    {
        let pixel = band_pixel(template, row as u32, band);
        for dst in line.chunks_exact_mut(4) {
            dst.copy_from_slice(&pixel.0);
        }
    }

    tracing::debug!(band, gradient = template.gradient, "scrim band painted");
    overlay
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::resolve_template;

    #[test]
    fn test_band_height() {
        assert_eq!(band_height(1000, 1.0), 250);
        assert_eq!(band_height(630, 0.63), 157);
        assert_eq!(band_height(1920, 1.35), 337);
    }

    #[test]
    fn test_gradient_ramp() {
        assert_eq!(band_alpha(0, 250), 0);
        assert_eq!(band_alpha(125, 250), 100);
        assert_eq!(band_alpha(249, 250), 199);
        let ramp: Vec<u8> = (0..250).map(|r| band_alpha(r, 250)).collect();
        assert!(ramp.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(band_alpha(3, 0), 0);
    }

    #[test]
    fn test_gradient_overlay() {
        let overlay = build_overlay(800, 1000, 1.0, resolve_template("modern"));
        assert_eq!(overlay.dimensions(), (800, 1000));
        assert_eq!(overlay.get_pixel(400, 100)[3], 0);
        assert_eq!(overlay.get_pixel(400, 749)[3], 0);
        assert_eq!(overlay.get_pixel(0, 750).0, [0, 0, 0, 0]);
        assert_eq!(overlay.get_pixel(799, 999).0, [0, 0, 0, 199]);
    }

    #[test]
    fn test_solid_overlay() {
        let luxury = resolve_template("luxury");
        let overlay = build_overlay(800, 1000, 1.0, luxury);
        assert_eq!(overlay.get_pixel(10, 749)[3], 0);
        for y in [750, 900, 999] {
            assert_eq!(overlay.get_pixel(10, y).0, [44, 62, 80, SOLID_ALPHA]);
        }
    }
}
