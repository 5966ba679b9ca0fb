//! Font resolution and glyph drawing.
//!
//! Resolution walks an ordered list of (bold, regular) TrueType candidates.
//! A candidate is taken only if both variants load. The chain terminates in
//! the built-in 8x8 bitmap face, which always succeeds.

use ab_glyph::{FontVec, PxScale};
use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS, MISC_FONTS};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CELL: u32 = 8;
/// Reference pixels per bitmap cell multiple.
const BUILTIN_STEP: u32 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Bold,
    Regular,
}

/// Paths for one font family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontCandidate {
    pub bold: PathBuf,
    pub regular: PathBuf,
}

impl FontCandidate {
    pub fn new(bold: impl Into<PathBuf>, regular: impl Into<PathBuf>) -> Self {
        Self { bold: bold.into(), regular: regular.into() }
    }
}

/// Platform locations tried after any configured candidates.
pub fn system_candidates() -> Vec<FontCandidate> {
    vec![
        FontCandidate::new(
            "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
            "/System/Library/Fonts/Supplemental/Arial.ttf",
        ),
        FontCandidate::new("/Library/Fonts/Arial Bold.ttf", "/Library/Fonts/Arial.ttf"),
        FontCandidate::new(
            "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        ),
        FontCandidate::new(
            "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        ),
        FontCandidate::new(r"C:\Windows\Fonts\arialbd.ttf", r"C:\Windows\Fonts\arial.ttf"),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FontSource {
    File { bold: PathBuf, regular: PathBuf },
    Builtin,
}

enum Face {
    TrueType { bold: FontVec, regular: FontVec },
    Builtin,
}

/// Fonts for every text role of a render.
pub struct FontSet {
    face: Face,
    source: FontSource,
}

impl std::fmt::Debug for FontSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSet").field("source", &self.source).finish()
    }
}

impl FontSet {
    pub fn builtin() -> Self {
        Self { face: Face::Builtin, source: FontSource::Builtin }
    }

    pub fn resolve(candidates: &[FontCandidate]) -> Self {
        for candidate in candidates {
            match (load_font(&candidate.bold), load_font(&candidate.regular)) {
                (Ok(bold), Ok(regular)) => {
                    tracing::debug!(bold = %candidate.bold.display(), "font family resolved");
                    return Self {
                        face: Face::TrueType { bold, regular },
                        source: FontSource::File {
                            bold: candidate.bold.clone(),
                            regular: candidate.regular.clone(),
                        },
                    };
                }
                (Err(e), _) | (_, Err(e)) => {
                    tracing::debug!(candidate = %candidate.bold.display(), error = %e, "font candidate rejected");
                }
            }
        }
        tracing::warn!("no TrueType font family available, using built-in face");
        Self::builtin()
    }

    pub fn source(&self) -> &FontSource {
        &self.source
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.face, Face::Builtin)
    }

    /// Rendered width of `text` in pixels.
    pub fn measure(&self, weight: FontWeight, size: f32, text: &str) -> u32 {
        match &self.face {
            Face::TrueType { bold, regular } => {
                let font = if weight == FontWeight::Bold { bold } else { regular };
                text_size(PxScale::from(size), font, text).0
            }
            Face::Builtin => text.chars().count() as u32 * CELL * builtin_factor(size),
        }
    }

    /// Draw `text` with its top-left corner at `(x, y)`.
    pub fn draw(
        &self,
        canvas: &mut RgbaImage,
        color: Rgba<u8>,
        (x, y): (i32, i32),
        weight: FontWeight,
        size: f32,
        text: &str,
    ) {
        match &self.face {
            Face::TrueType { bold, regular } => {
                let font = if weight == FontWeight::Bold { bold } else { regular };
                draw_text_mut(canvas, color, x, y, PxScale::from(size), font, text);
            }
            Face::Builtin => draw_bitmap_text(canvas, color, (x, y), builtin_factor(size), text),
        }
    }
}

fn load_font(path: &Path) -> Result<FontVec, String> {
    let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
    FontVec::try_from_vec(bytes).map_err(|e| e.to_string())
}

fn builtin_factor(size: f32) -> u32 {
    (size as u32 / BUILTIN_STEP).max(1)
}

fn glyph(ch: char) -> Option<[u8; 8]> {
    let ch = if ch == '•' { '·' } else { ch };
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| MISC_FONTS.get(ch))
}

fn draw_bitmap_text(canvas: &mut RgbaImage, color: Rgba<u8>, (x, y): (i32, i32), factor: u32, text: &str) {
    let advance = (CELL * factor) as i32;
    for (i, ch) in text.chars().enumerate() {
        let Some(rows) = glyph(ch) else { continue };
        let origin_x = x + i as i32 * advance;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..CELL {
                if bits & (1 << col) == 0 {
                    continue;
                }
                let px = origin_x + (col * factor) as i32;
                let py = y + (row as u32 * factor) as i32;
                draw_filled_rect_mut(canvas, Rect::at(px, py).of_size(factor, factor), color);
            }
        }
    }
}
