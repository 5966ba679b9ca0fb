//! Layout math against the 800x1000 reference canvas.
//!
//! Every absolute pixel constant below is authored at reference size and
//! multiplied by [`scale`] before use.

pub const REFERENCE_WIDTH: f64 = 800.0;
pub const REFERENCE_HEIGHT: f64 = 1000.0;

pub const MARGIN: f64 = 30.0;
pub const PRICE_TOP: f64 = 220.0;
pub const PRICE_ADVANCE: f64 = 55.0;
pub const ADDRESS_ADVANCE: f64 = 40.0;
pub const DETAILS_ADVANCE: f64 = 35.0;
pub const SCHOOL_BOTTOM: f64 = 70.0;
pub const FOOTER_BOTTOM: f64 = 40.0;

pub const BAND_MAX: f64 = 250.0;

pub const BANNER_WIDTH: f64 = 180.0;
pub const BANNER_HEIGHT: f64 = 50.0;
pub const BANNER_RIGHT: f64 = 20.0;
pub const BANNER_TOP: f64 = 30.0;
pub const BANNER_TEXT_TOP: f64 = 42.0;

pub const SIZE_PRICE: f64 = 42.0;
pub const SIZE_ADDRESS: f64 = 28.0;
pub const SIZE_DETAILS: f64 = 24.0;
pub const SIZE_BANNER: f64 = 20.0;
pub const SIZE_STORY: f64 = 20.0;
pub const SIZE_INSIGHTS: f64 = 18.0;

/// Uniform scale factor: `min(width / 800, height / 1000)`.
pub fn scale(width: u32, height: u32) -> f64 {
    (width as f64 / REFERENCE_WIDTH).min(height as f64 / REFERENCE_HEIGHT)
}

/// Scaled reference constant, truncated to whole pixels.
pub fn px(value: f64, scale: f64) -> i32 {
    (value * scale) as i32
}

/// Scaled font size, never below one pixel.
pub fn font_px(size: f64, scale: f64) -> f32 {
    ((size * scale) as i32).max(1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_scale_is_one() {
        assert_eq!(scale(800, 1000), 1.0);
    }

    #[test]
    fn test_scale_uses_tighter_axis() {
        assert_eq!(scale(1200, 630), 0.63);
        assert_eq!(scale(1080, 1920), 1.35);
        assert_eq!(scale(1200, 627), 0.627);
    }

    #[test]
    fn test_px_truncates() {
        assert_eq!(px(MARGIN, 0.63), 18);
        assert_eq!(px(PRICE_TOP, 1.35), 297);
        assert_eq!(font_px(SIZE_PRICE, 0.63), 26.0);
        assert_eq!(font_px(1.0, 0.1), 1.0);
    }
}
