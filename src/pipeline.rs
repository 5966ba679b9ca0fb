//! Render Pipeline - Single Entry Point
//!
//! Resolve format + template, scale, resize, overlay, select content, draw
//! text, composite, write. Only decode and persist failures are fatal; every
//! other fallback is recorded as a [`Degradation`] on the report.

use chrono::{DateTime, Utc};
use image::{DynamicImage, RgbImage};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::compositor::{composite, flatten, resize_background};
use crate::config::EngineConfig;
use crate::content::{school_line, select_optional_block, OptionalBlock};
use crate::fonts::{FontSet, FontSource};
use crate::formats::{lookup_format, resolve_format, Format, DEFAULT_FORMAT};
use crate::hashing::{compute_job_hash, sha256_hex};
use crate::layout::scale;
use crate::listing::{AuxiliaryData, ListingContent};
use crate::output::{encode, output_path, persist};
use crate::overlay::build_overlay;
use crate::price::format_price;
use crate::templates::{lookup_template, resolve_template, Template, DEFAULT_TEMPLATE};
use crate::text::{plan_text, render_plan, PlanInput, TextPlan, DEFAULT_FOOTER};
use crate::ENGINE_VERSION;

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Background decode failed: {0}")]
    BackgroundDecode(#[source] image::ImageError),

    #[error("Background has zero dimension: {width}x{height}")]
    EmptyBackground { width: u32, height: u32 },

    #[error("Encoding error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A recoverable fallback taken during a render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Degradation {
    UnknownFormat { requested: String },
    UnknownTemplate { requested: String },
    PriceUnparsed { raw: String },
    DefaultFont,
    OptionalBlockOmitted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderRequest {
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_template")]
    pub template: String,
    pub listing: ListingContent,
    #[serde(default)]
    pub auxiliary: Option<AuxiliaryData>,
    /// Replaces the default contact line.
    #[serde(default)]
    pub footer: Option<String>,
    /// Appended to the file name to avoid collisions between listings.
    #[serde(default)]
    pub namespace: Option<String>,
}

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

fn default_template() -> String {
    DEFAULT_TEMPLATE.to_string()
}

impl RenderRequest {
    pub fn new(listing: ListingContent) -> Self {
        Self {
            format: default_format(),
            template: default_template(),
            listing,
            auxiliary: None,
            footer: None,
            namespace: None,
        }
    }

    pub fn format(mut self, key: impl Into<String>) -> Self {
        self.format = key.into();
        self
    }

    pub fn template(mut self, key: impl Into<String>) -> Self {
        self.template = key.into();
        self
    }

    pub fn auxiliary(mut self, aux: AuxiliaryData) -> Self {
        self.auxiliary = Some(aux);
        self
    }

    pub fn namespace(mut self, ns: impl Into<String>) -> Self {
        self.namespace = Some(ns.into());
        self
    }
}

/// A composited canvas that has not been written yet.
#[derive(Debug)]
pub struct ComposedFlyer {
    pub canvas: RgbImage,
    pub format: Format,
    pub template: &'static Template,
    pub scale: f64,
    pub price_display: String,
    pub optional_block: Option<OptionalBlock>,
    pub plan: TextPlan,
    pub degradations: Vec<Degradation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedFlyer {
    pub path: PathBuf,
    pub format: String,
    pub template: String,
    pub width: u32,
    pub height: u32,
    pub scale: f64,
    pub price_display: String,
    pub optional_block: Option<OptionalBlock>,
    pub degradations: Vec<Degradation>,
    pub font_source: FontSource,
    pub sha256: String,
    pub job_hash: String,
    pub engine_version: String,
    pub created_at: DateTime<Utc>,
}

pub fn decode_background(bytes: &[u8]) -> RenderResult<DynamicImage> {
    let image = image::load_from_memory(bytes).map_err(RenderError::BackgroundDecode)?;
    check_dimensions(&image)?;
    Ok(image)
}

fn check_dimensions(image: &DynamicImage) -> RenderResult<()> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyBackground { width, height });
    }
    Ok(())
}

/// The flyer engine. Fonts are resolved once; renders share them read-only.
pub struct FlyerEngine {
    config: EngineConfig,
    fonts: FontSet,
}

impl FlyerEngine {
    pub fn new(config: EngineConfig) -> Self {
        let fonts = FontSet::resolve(&config.font_candidates());
        Self { config, fonts }
    }

    pub fn with_fonts(config: EngineConfig, fonts: FontSet) -> Self {
        Self { config, fonts }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    /// Build the final opaque canvas without touching the filesystem.
    pub fn compose(&self, request: &RenderRequest, background: &DynamicImage) -> RenderResult<ComposedFlyer> {
        check_dimensions(background)?;
        let mut degradations = vec![];

        let format = lookup_format(&request.format).unwrap_or_else(|| {
            tracing::warn!(requested = %request.format, "unknown format, using default");
            degradations.push(Degradation::UnknownFormat { requested: request.format.clone() });
            resolve_format(DEFAULT_FORMAT)
        });
        let template = lookup_template(&request.template).unwrap_or_else(|| {
            tracing::warn!(requested = %request.template, "unknown template, using default");
            degradations.push(Degradation::UnknownTemplate { requested: request.template.clone() });
            resolve_template(DEFAULT_TEMPLATE)
        });

        let scale = scale(format.width, format.height);
        tracing::debug!(format = format.id, template = template.id, scale, "render started");

        let mut canvas = resize_background(background, format.width, format.height);
        let mut overlay = build_overlay(format.width, format.height, scale, template);

        let price = format_price(&request.listing.price);
        if !price.parsed {
            tracing::warn!(raw = %request.listing.price, "price unparseable, showing raw value");
            degradations.push(Degradation::PriceUnparsed { raw: request.listing.price.to_string() });
        }

        let aux = request.auxiliary.as_ref();
        let optional_block = select_optional_block(&format, aux);
        if optional_block.is_none() && aux.is_some() && format.is_print_like() {
            tracing::warn!("auxiliary data incomplete, optional block omitted");
            degradations.push(Degradation::OptionalBlockOmitted);
        }
        let school = school_line(&format, aux);

        if self.fonts.is_builtin() {
            degradations.push(Degradation::DefaultFont);
        }

        let plan = plan_text(
            &PlanInput {
                format: &format,
                template,
                scale,
                listing: &request.listing,
                price_display: &price.text,
                optional: optional_block.as_ref(),
                school_line: school.as_deref(),
                footer: request.footer.as_deref().unwrap_or(DEFAULT_FOOTER),
            },
            &self.fonts,
        );
        render_plan(&mut overlay, &plan, &self.fonts);

        composite(&mut canvas, &overlay);

        Ok(ComposedFlyer {
            canvas: flatten(canvas),
            format,
            template,
            scale,
            price_display: price.text,
            optional_block,
            plan,
            degradations,
        })
    }

    /// Compose, encode, and persist. Returns the report with the output path.
    pub fn render(&self, request: &RenderRequest, background: &DynamicImage) -> RenderResult<RenderedFlyer> {
        let composed = self.compose(request, background)?;
        let encoding = self.config.encoding;

        let bytes = encode(&composed.canvas, encoding)?;
        let path = output_path(
            &self.config.output_dir,
            composed.format.id,
            composed.template.id,
            request.namespace.as_deref(),
            encoding,
        );
        persist(&path, &bytes)?;

        Ok(RenderedFlyer {
            path,
            format: composed.format.id.to_string(),
            template: composed.template.id.to_string(),
            width: composed.format.width,
            height: composed.format.height,
            scale: composed.scale,
            price_display: composed.price_display,
            optional_block: composed.optional_block,
            degradations: composed.degradations,
            font_source: self.fonts.source().clone(),
            sha256: sha256_hex(&bytes),
            job_hash: compute_job_hash(composed.format.id, composed.template.id, request, ENGINE_VERSION)?,
            engine_version: ENGINE_VERSION.to_string(),
            created_at: Utc::now(),
        })
    }

    /// Decode `bytes` then [`render`](Self::render).
    pub fn render_bytes(&self, request: &RenderRequest, background: &[u8]) -> RenderResult<RenderedFlyer> {
        let image = decode_background(background)?;
        self.render(request, &image)
    }
}

impl Default for FlyerEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_engine_is_shareable() {
        assert_send_sync::<FlyerEngine>();
    }

    #[test]
    fn test_concurrent_compose_is_deterministic() {
        let engine = FlyerEngine::with_fonts(EngineConfig::default(), FontSet::builtin());
        let background = DynamicImage::ImageRgb8(RgbImage::from_pixel(16, 16, Rgb([120, 80, 40])));
        let request = RenderRequest::new(ListingContent::new("5 Oak Ct", "725000", "4", "3")).format("facebook");

        let (a, b) = std::thread::scope(|scope| {
            let a = scope.spawn(|| engine.compose(&request, &background).unwrap());
            let b = scope.spawn(|| engine.compose(&request, &background).unwrap());
            (a.join().unwrap(), b.join().unwrap())
        });
        assert_eq!(a.canvas, b.canvas);
        assert_eq!(a.canvas.dimensions(), (1200, 630));
        assert_eq!(a.price_display, "$725K");
    }
}
