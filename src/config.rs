//! Engine configuration
//!
//! Loaded from JSON; every field has a default so `{}` is a valid config.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::fonts::FontCandidate;
use crate::output::OutputEncoding;
use crate::pipeline::{RenderError, RenderResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub encoding: OutputEncoding,
    /// Tried in order before the platform defaults.
    #[serde(default)]
    pub fonts: Vec<FontCandidate>,
    #[serde(default = "default_true")]
    pub system_fonts: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("generated")
}

fn default_true() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            encoding: OutputEncoding::default(),
            fonts: vec![],
            system_fonts: true,
        }
    }
}

impl EngineConfig {
    pub fn load(path: &Path) -> RenderResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| RenderError::Config(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&content)
            .map_err(|e| RenderError::Config(format!("{}: {e}", path.display())))
    }

    /// Full resolution chain, configured candidates first.
    pub fn font_candidates(&self) -> Vec<FontCandidate> {
        let mut candidates = self.fonts.clone();
        if self.system_fonts {
            candidates.extend(crate::fonts::system_candidates());
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_uses_defaults() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.output_dir, PathBuf::from("generated"));
        assert_eq!(config.encoding, OutputEncoding::Png);
        assert!(config.system_fonts);
    }

    #[test]
    fn test_configured_fonts_come_first() {
        let config: EngineConfig = serde_json::from_str(
            r#"{"fonts": [{"bold": "/f/b.ttf", "regular": "/f/r.ttf"}], "encoding": "jpeg"}"#,
        )
        .unwrap();
        let chain = config.font_candidates();
        assert_eq!(chain[0], FontCandidate::new("/f/b.ttf", "/f/r.ttf"));
        assert!(chain.len() > 1);
        assert_eq!(config.encoding, OutputEncoding::Jpeg);
    }

    #[test]
    fn test_load_reports_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.json");
        fs::write(&path, "{ not json").unwrap();
        let err = EngineConfig::load(&path).unwrap_err();
        assert!(matches!(err, RenderError::Config(_)));
    }
}
