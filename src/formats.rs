//! Format Registry - canvas sizes per publishing surface

use serde::Serialize;

pub const DEFAULT_FORMAT: &str = "flyer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Format {
    pub id: &'static str,
    pub width: u32,
    pub height: u32,
}

impl Format {
    /// Formats that get the narrative / metrics block.
    pub fn is_print_like(&self) -> bool {
        matches!(self.id, "flyer" | "linkedin")
    }

    /// Formats that get the short "near school" line.
    pub fn is_social(&self) -> bool {
        matches!(self.id, "instagram" | "facebook")
    }
}

static FORMATS: [Format; 4] = [
    Format { id: "flyer", width: 800, height: 1000 },
    Format { id: "instagram", width: 1080, height: 1920 },
    Format { id: "facebook", width: 1200, height: 630 },
    Format { id: "linkedin", width: 1200, height: 627 },
];

pub fn lookup_format(key: &str) -> Option<Format> {
    FORMATS.iter().copied().find(|f| f.id == key)
}

/// Lookup with fallback to `flyer` (800x1000).
pub fn resolve_format(key: &str) -> Format {
    lookup_format(key).unwrap_or(FORMATS[0])
}

pub fn all_formats() -> &'static [Format] {
    &FORMATS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_dimensions() {
        let expected = [
            ("flyer", 800, 1000),
            ("instagram", 1080, 1920),
            ("facebook", 1200, 630),
            ("linkedin", 1200, 627),
        ];
        for (key, w, h) in expected {
            let f = resolve_format(key);
            assert_eq!((f.id, f.width, f.height), (key, w, h));
        }
    }

    #[test]
    fn test_unknown_format_falls_back() {
        let f = resolve_format("tiktok");
        assert_eq!((f.id, f.width, f.height), ("flyer", 800, 1000));
        assert!(lookup_format("tiktok").is_none());
    }

    #[test]
    fn test_format_groups() {
        assert!(resolve_format("linkedin").is_print_like());
        assert!(!resolve_format("linkedin").is_social());
        assert!(resolve_format("facebook").is_social());
        assert!(!resolve_format("instagram").is_print_like());
    }
}
