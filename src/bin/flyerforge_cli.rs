//! FlyerForge CLI - Bridge interface for the web app
//!
//! Commands: formats, templates, render
//! Outputs JSON to stdout, logs to stderr
//! Returns 1 on bad input, 2 on render failure

use base64::Engine as _;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use flyerforge_core::{
    fonts::FontCandidate, formats::all_formats, templates::all_templates, EngineConfig, FlyerEngine,
    OutputEncoding, RenderRequest,
};

#[derive(Parser)]
#[command(name = "flyerforge-cli")]
#[command(about = "FlyerForge CLI - Listing flyer composition")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Engine config (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory, overrides the config file
    #[arg(short, long, env = "FLYERFORGE_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Preferred bold font, tried before system fonts
    #[arg(long, env = "FLYERFORGE_FONT_BOLD", requires = "font_regular")]
    font_bold: Option<PathBuf>,

    /// Preferred regular font, tried before system fonts
    #[arg(long, env = "FLYERFORGE_FONT_REGULAR", requires = "font_bold")]
    font_regular: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered output formats
    Formats,

    /// List registered visual templates
    Templates,

    /// Render a flyer
    Render {
        /// Background image file
        #[arg(short, long)]
        background: PathBuf,

        /// JSON payload (RenderRequest)
        #[arg(short, long)]
        payload: String,

        /// Append a random id to the output file name
        #[arg(long)]
        unique: bool,

        /// Encode as JPEG instead of PNG
        #[arg(long)]
        jpeg: bool,

        /// Include the encoded image as base64 in the output
        #[arg(long = "base64")]
        inline: bool,
    },
}

/// Set `RUST_LOG` for levels (default: warn,flyerforge_core=info).
/// Set `RUST_LOG_FORMAT=json` for JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,flyerforge_core=info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry().with(filter).with(fmt_layer.json()).init();
    } else {
        tracing_subscriber::registry().with(filter).with(fmt_layer).init();
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => println!(r#"{{"success": false, "error": "{e}"}}"#),
    }
}

fn failure(error: impl std::fmt::Display, code: u8) -> ExitCode {
    print_json(&serde_json::json!({ "success": false, "error": error.to_string() }));
    ExitCode::from(code)
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Formats => {
            print_json(&serde_json::json!(all_formats()));
            ExitCode::SUCCESS
        }

        Commands::Templates => {
            let templates: Vec<_> = all_templates()
                .iter()
                .map(|t| serde_json::json!({
                    "id": t.id,
                    "primary": t.primary.to_hex(),
                    "accent": t.accent.to_hex(),
                    "text": t.text_color.to_hex(),
                    "banner": [t.banner.0, t.banner.1, t.banner.2],
                    "gradient": t.gradient,
                }))
                .collect();
            print_json(&serde_json::json!(templates));
            ExitCode::SUCCESS
        }

        Commands::Render { background, payload, unique, jpeg, inline } => {
            let mut config = match &cli.config {
                Some(path) => match EngineConfig::load(path) {
                    Ok(c) => c,
                    Err(e) => return failure(e, 1),
                },
                None => EngineConfig::default(),
            };
            if let Some(dir) = cli.output_dir {
                config.output_dir = dir;
            }
            if let (Some(bold), Some(regular)) = (cli.font_bold, cli.font_regular) {
                config.fonts.insert(0, FontCandidate { bold, regular });
            }
            if jpeg {
                config.encoding = OutputEncoding::Jpeg;
            }

            let mut request: RenderRequest = match serde_json::from_str(&payload) {
                Ok(r) => r,
                Err(e) => return failure(format!("Invalid payload: {e}"), 1),
            };
            if unique {
                request.namespace = Some(uuid::Uuid::new_v4().simple().to_string());
            }

            let bytes = match std::fs::read(&background) {
                Ok(b) => b,
                Err(e) => return failure(format!("{}: {e}", background.display()), 1),
            };

            let engine = FlyerEngine::new(config);
            let flyer = match engine.render_bytes(&request, &bytes) {
                Ok(f) => f,
                Err(e) => return failure(e, 2),
            };

            let path = flyer.path.clone();
            let mut output = serde_json::json!({ "success": true, "flyer": flyer });
            if inline {
                match std::fs::read(&path) {
                    Ok(data) => {
                        output["image"] = base64::engine::general_purpose::STANDARD.encode(data).into();
                    }
                    Err(e) => return failure(e, 2),
                }
            }
            print_json(&output);
            ExitCode::SUCCESS
        }
    }
}
