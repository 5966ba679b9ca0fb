//! Output Writer - encoding and deterministic paths
//!
//! Paths are `<dir>/<format>_<template>.<ext>`. Two renders of the same pair
//! overwrite each other unless the caller supplies a namespace.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::pipeline::{RenderError, RenderResult};

pub const JPEG_QUALITY: u8 = 95;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputEncoding {
    #[default]
    Png,
    Jpeg,
}

impl OutputEncoding {
    pub fn extension(self) -> &'static str {
        match self {
            OutputEncoding::Png => "png",
            OutputEncoding::Jpeg => "jpg",
        }
    }
}

/// Keep `[A-Za-z0-9_-]`; empty results mean no namespace.
pub fn sanitize_namespace(raw: &str) -> Option<String> {
    let clean: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    (!clean.is_empty()).then_some(clean)
}

pub fn output_path(
    dir: &Path,
    format: &str,
    template: &str,
    namespace: Option<&str>,
    encoding: OutputEncoding,
) -> PathBuf {
    let stem = match namespace.and_then(sanitize_namespace) {
        Some(ns) => format!("{format}_{template}_{ns}"),
        None => format!("{format}_{template}"),
    };
    dir.join(format!("{stem}.{}", encoding.extension()))
}

pub fn encode(canvas: &RgbImage, encoding: OutputEncoding) -> RenderResult<Vec<u8>> {
    let (width, height) = canvas.dimensions();
    let mut buf = Vec::new();
    match encoding {
        OutputEncoding::Png => PngEncoder::new(&mut buf).write_image(
            canvas.as_raw(),
            width,
            height,
            ExtendedColorType::Rgb8,
        )?,
        OutputEncoding::Jpeg => JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY).write_image(
            canvas.as_raw(),
            width,
            height,
            ExtendedColorType::Rgb8,
        )?,
    }
    Ok(buf)
}

/// Write `bytes` to `path`, creating the parent directory if needed.
pub fn persist(path: &Path, bytes: &[u8]) -> RenderResult<()> {
    let wrap = |source| RenderError::Persist { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(wrap)?;
    }
    fs::write(path, bytes).map_err(wrap)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "flyer written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_path() {
        let p = output_path(Path::new("generated"), "flyer", "luxury", None, OutputEncoding::Png);
        assert_eq!(p, Path::new("generated").join("flyer_luxury.png"));
        let j = output_path(Path::new("out"), "instagram", "modern", None, OutputEncoding::Jpeg);
        assert!(j.ends_with("instagram_modern.jpg"));
    }

    #[test]
    fn test_namespace_is_sanitized() {
        let p = output_path(Path::new("g"), "flyer", "modern", Some("../listing 42"), OutputEncoding::Png);
        assert!(p.ends_with("flyer_modern_listing42.png"));
        assert_eq!(sanitize_namespace("/.."), None);
        let q = output_path(Path::new("g"), "flyer", "modern", Some("///"), OutputEncoding::Png);
        assert!(q.ends_with("flyer_modern.png"));
    }

    #[test]
    fn test_png_roundtrip_is_lossless() {
        let canvas = RgbImage::from_fn(5, 4, |x, y| image::Rgb([x as u8 * 40, y as u8 * 60, 7]));
        let bytes = encode(&canvas, OutputEncoding::Png).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(decoded, canvas);
    }

    #[test]
    fn test_persist_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("flyer_modern.png");
        persist(&path, b"data").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"data");
    }
}
