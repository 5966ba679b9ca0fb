//! Compositor - background resize, "over" blending, flattening

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbImage, RgbaImage};

/// Stretch the background to exactly `width` x `height` with an alpha channel.
pub fn resize_background(background: &DynamicImage, width: u32, height: u32) -> RgbaImage {
    let rgba = background.to_rgba8();
    if rgba.dimensions() == (width, height) {
        return rgba;
    }
    imageops::resize(&rgba, width, height, FilterType::CatmullRom)
}

/// Non-premultiplied source-over for a single pixel.
pub fn blend_over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    match src[3] {
        0 => return dst,
        255 => return src,
        _ => {}
    }

    let sa = f32::from(src[3]) / 255.0;
    let da = f32::from(dst[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);

    let mut out = [0u8; 4];
    for c in 0..3 {
        let sc = f32::from(src[c]) / 255.0;
        let dc = f32::from(dst[c]) / 255.0;
        let v = (sc * sa + dc * da * (1.0 - sa)) / out_a;
        out[c] = (v * 255.0).round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round() as u8;
    Rgba(out)
}

/// Blend `overlay` onto `base` in place. Both must share dimensions.
pub fn composite(base: &mut RgbaImage, overlay: &RgbaImage) {
    debug_assert_eq!(base.dimensions(), overlay.dimensions());
    for (dst, src) in base.pixels_mut().zip(overlay.pixels()) {
        *dst = blend_over(*dst, *src);
    }
}

/// Drop the alpha channel.
pub fn flatten(canvas: RgbaImage) -> RgbImage {
    DynamicImage::ImageRgba8(canvas).to_rgb8()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transparent_overlay_is_identity() {
        let mut base = RgbaImage::from_fn(64, 48, |x, y| Rgba([(x * 3) as u8, (y * 5) as u8, 77, 255]));
        let expected = base.clone();
        composite(&mut base, &RgbaImage::new(64, 48));
        assert_eq!(base, expected);
    }

    #[test]
    fn test_blend_half_black() {
        let out = blend_over(Rgba([200, 100, 50, 255]), Rgba([0, 0, 0, 128]));
        assert_eq!(out[3], 255);
        assert_eq!(out[0], 100);
        assert_eq!(out[1], 50);
    }

    #[test]
    fn test_opaque_source_replaces() {
        let src = Rgba([243, 156, 18, 255]);
        assert_eq!(blend_over(Rgba([1, 2, 3, 255]), src), src);
    }

    #[test]
    fn test_resize_stretches() {
        let bg = DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 30, image::Rgb([9, 9, 9])));
        let resized = resize_background(&bg, 80, 100);
        assert_eq!(resized.dimensions(), (80, 100));
        assert_eq!(resized.get_pixel(10, 10).0, [9, 9, 9, 255]);
    }

    #[test]
    fn test_flatten_drops_alpha() {
        let rgb = flatten(RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 255])));
        assert_eq!(rgb.get_pixel(1, 1).0, [10, 20, 30]);
    }
}
