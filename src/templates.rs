//! Template System - Visual Style Contracts
//!
//! Templates are static. Unknown keys resolve to `modern`, never an error.

use serde::{Deserialize, Serialize};
use std::fmt;

pub type TemplateId = &'static str;

pub const DEFAULT_TEMPLATE: TemplateId = "modern";

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    pub fn with_alpha(self, alpha: u8) -> image::Rgba<u8> {
        image::Rgba([self.0, self.1, self.2, alpha])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: TemplateId,
    pub primary: Rgb,
    pub accent: Rgb,
    pub text_color: Rgb,
    pub banner: Rgb,
    /// Gradient scrim when true, solid band in `primary` otherwise.
    pub gradient: bool,
}

static TEMPLATES: [Template; 3] = [
    Template {
        id: "modern",
        primary: Rgb(0x66, 0x7e, 0xea),
        accent: Rgb(0xFF, 0xD7, 0x00),
        text_color: Rgb::WHITE,
        banner: Rgb(102, 126, 234),
        gradient: true,
    },
    Template {
        id: "luxury",
        primary: Rgb(0x2c, 0x3e, 0x50),
        accent: Rgb(0xf3, 0x9c, 0x12),
        text_color: Rgb(0xec, 0xf0, 0xf1),
        banner: Rgb(243, 156, 18),
        gradient: false,
    },
    Template {
        id: "classic",
        primary: Rgb(0x34, 0x49, 0x5e),
        accent: Rgb(0xe7, 0x4c, 0x3c),
        text_color: Rgb::WHITE,
        banner: Rgb(231, 76, 60),
        gradient: true,
    },
];

/// Exact lookup. `None` for unregistered keys.
pub fn lookup_template(key: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == key)
}

/// Lookup with fallback to the `modern` template.
pub fn resolve_template(key: &str) -> &'static Template {
    lookup_template(key).unwrap_or(&TEMPLATES[0])
}

pub fn all_templates() -> &'static [Template] {
    &TEMPLATES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_templates() {
        let luxury = resolve_template("luxury");
        assert_eq!(luxury.primary, Rgb::from_hex("#2c3e50").unwrap());
        assert_eq!(luxury.banner, Rgb(243, 156, 18));
        assert!(!luxury.gradient);

        let classic = resolve_template("classic");
        assert_eq!(classic.accent.to_hex(), "#e74c3c");
        assert!(classic.gradient);
    }

    #[test]
    fn test_unknown_template_falls_back() {
        assert_eq!(resolve_template("retro").id, DEFAULT_TEMPLATE);
        assert_eq!(resolve_template("").id, DEFAULT_TEMPLATE);
        assert!(lookup_template("retro").is_none());
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Rgb::from_hex("FFD700"), Some(Rgb(255, 215, 0)));
        assert_eq!(Rgb::from_hex("#12345"), None);
        assert_eq!(Rgb::from_hex("#zzzzzz"), None);
    }
}
