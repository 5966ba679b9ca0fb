//! Listing input records.
//!
//! Everything in [`AuxiliaryData`] is optional. Upstream collaborators send
//! partial records and placeholder strings ("Data unavailable"), so metric
//! fields accept either numbers or text.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::price::{group_thousands, PriceInput};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingContent {
    pub address: String,
    pub price: PriceInput,
    pub bedrooms: MetricValue,
    pub bathrooms: MetricValue,
}

impl ListingContent {
    pub fn new(
        address: impl Into<String>,
        price: impl Into<PriceInput>,
        bedrooms: impl Into<MetricValue>,
        bathrooms: impl Into<MetricValue>,
    ) -> Self {
        Self {
            address: address.into(),
            price: price.into(),
            bedrooms: bedrooms.into(),
            bathrooms: bathrooms.into(),
        }
    }
}

/// A number or a free-text placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            MetricValue::Number(v) => Some(*v),
            MetricValue::Text(s) => s.trim().replace(',', "").parse().ok(),
        }
    }

    /// Integral numbers rendered with thousands separators, text verbatim.
    pub fn grouped(&self) -> String {
        match self {
            MetricValue::Number(v) if v.fract() == 0.0 && *v >= 0.0 => group_thousands(*v as u64),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(v) if v.fract() == 0.0 => write!(f, "{}", *v as i64),
            MetricValue::Number(v) => write!(f, "{v}"),
            MetricValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for MetricValue {
    fn from(s: &str) -> Self {
        MetricValue::Text(s.to_string())
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Number(v)
    }
}

impl From<u32> for MetricValue {
    fn from(v: u32) -> Self {
        MetricValue::Number(f64::from(v))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuxiliaryData {
    #[serde(default)]
    pub neighborhood: Option<NeighborhoodInsights>,
    #[serde(default)]
    pub mortgage: Option<MortgageSummary>,
}

impl AuxiliaryData {
    /// Non-empty narrative headline, if any.
    pub fn headline(&self) -> Option<&str> {
        self.neighborhood
            .as_ref()
            .and_then(|n| n.story.as_ref())
            .and_then(|s| s.headline.as_deref())
            .map(str::trim)
            .filter(|h| !h.is_empty())
    }

    pub fn top_school(&self) -> Option<&str> {
        self.neighborhood
            .as_ref()
            .and_then(|n| n.top_school.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NeighborhoodInsights {
    #[serde(default)]
    pub walkability_score: Option<MetricValue>,
    #[serde(default)]
    pub schools_nearby: Option<MetricValue>,
    #[serde(default)]
    pub restaurants_nearby: Option<MetricValue>,
    #[serde(default)]
    pub parks_nearby: Option<MetricValue>,
    #[serde(default)]
    pub top_school: Option<String>,
    #[serde(default)]
    pub story: Option<NeighborhoodStory>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NeighborhoodStory {
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub narrative: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MortgageSummary {
    #[serde(default)]
    pub monthly_payment: Option<MetricValue>,
    #[serde(default)]
    pub down_payment: Option<MetricValue>,
    #[serde(default)]
    pub loan_amount: Option<MetricValue>,
    #[serde(default)]
    pub interest_rate: Option<String>,
    #[serde(default)]
    pub total_interest: Option<MetricValue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_auxiliary_json() {
        let aux: AuxiliaryData = serde_json::from_str(
            r#"{"neighborhood": {"walkability_score": "Data unavailable", "schools_nearby": 4}}"#,
        )
        .unwrap();
        let n = aux.neighborhood.as_ref().unwrap();
        assert_eq!(n.walkability_score, Some(MetricValue::from("Data unavailable")));
        assert_eq!(n.schools_nearby.as_ref().unwrap().to_string(), "4");
        assert!(aux.mortgage.is_none());
        assert!(aux.headline().is_none());
    }

    #[test]
    fn test_blank_headline_is_absent() {
        let aux = AuxiliaryData {
            neighborhood: Some(NeighborhoodInsights {
                story: Some(NeighborhoodStory {
                    headline: Some("   ".into()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            mortgage: None,
        };
        assert!(aux.headline().is_none());
    }

    #[test]
    fn test_metric_display() {
        assert_eq!(MetricValue::from(4.5).to_string(), "4.5");
        assert_eq!(MetricValue::from(5u32).to_string(), "5");
        assert_eq!(MetricValue::from(14410.0).grouped(), "14,410");
        assert_eq!(MetricValue::from("1,200").as_number(), Some(1200.0));
    }

    #[test]
    fn test_listing_from_json_strings() {
        let listing: ListingContent = serde_json::from_str(
            r#"{"address": "1 Main St", "price": "2850000", "bedrooms": "5", "bathrooms": 4.5}"#,
        )
        .unwrap();
        assert_eq!(listing.price, PriceInput::from("2850000"));
        assert_eq!(listing.bedrooms.to_string(), "5");
        assert_eq!(listing.bathrooms.to_string(), "4.5");
    }
}
