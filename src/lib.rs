//! FlyerForge Core - Listing Flyer Composition Engine
//!
//! One render call: background photo + scrim band + positioned text +
//! "FOR SALE" badge, for a named format and visual template.
//!
//! # Guarantees
//! 1. Unknown format/template keys fall back to `flyer` / `modern`
//! 2. One layout definition, scaled uniformly to every format
//! 3. Narrative outranks metrics, first matching rule wins
//! 4. Missing fonts, prices, or auxiliary data degrade, never abort
//! 5. Only background decode and output persistence are fatal

pub mod compositor;
pub mod config;
pub mod content;
pub mod fonts;
pub mod formats;
pub mod hashing;
pub mod layout;
pub mod listing;
pub mod output;
pub mod overlay;
pub mod pipeline;
pub mod price;
pub mod templates;
pub mod text;

pub use config::EngineConfig;
pub use content::{select_optional_block, OptionalBlock};
pub use formats::{resolve_format, Format};
pub use listing::{AuxiliaryData, ListingContent, MetricValue, MortgageSummary, NeighborhoodInsights, NeighborhoodStory};
pub use output::OutputEncoding;
pub use pipeline::{
    decode_background, ComposedFlyer, Degradation, FlyerEngine, RenderError, RenderRequest, RenderResult,
    RenderedFlyer,
};
pub use price::{format_price, PriceInput};
pub use templates::{resolve_template, Rgb, Template};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
