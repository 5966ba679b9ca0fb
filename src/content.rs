//! Content Selector - ordered rules, first match wins
//!
//! Narrative outranks metrics. Rule order is part of the contract.

use serde::Serialize;

use crate::formats::Format;
use crate::listing::{AuxiliaryData, MetricValue};
use crate::price::format_currency;

const MISSING: &str = "N/A";

/// The single optional block chosen for a render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum OptionalBlock {
    Headline(String),
    Insights(String),
}

impl OptionalBlock {
    pub fn text(&self) -> &str {
        match self {
            OptionalBlock::Headline(t) | OptionalBlock::Insights(t) => t,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            OptionalBlock::Headline(_) => "headline",
            OptionalBlock::Insights(_) => "insights",
        }
    }
}

/// A predicate paired with the block it produces.
pub struct ContentRule {
    pub name: &'static str,
    pub select: fn(&Format, &AuxiliaryData) -> Option<OptionalBlock>,
}

pub static CONTENT_RULES: [ContentRule; 2] = [
    ContentRule { name: "narrative_headline", select: narrative_headline },
    ContentRule { name: "metrics_line", select: metrics_line },
];

fn narrative_headline(format: &Format, aux: &AuxiliaryData) -> Option<OptionalBlock> {
    if !format.is_print_like() {
        return None;
    }
    aux.headline().map(|h| OptionalBlock::Headline(h.to_string()))
}

fn metrics_line(format: &Format, aux: &AuxiliaryData) -> Option<OptionalBlock> {
    if !format.is_print_like() {
        return None;
    }
    let (hood, mortgage) = (aux.neighborhood.as_ref()?, aux.mortgage.as_ref()?);

    let walk = show(hood.walkability_score.as_ref());
    let payment = match mortgage.monthly_payment.as_ref() {
        Some(MetricValue::Number(v)) => format_currency(*v),
        Some(other) => match other.as_number() {
            Some(v) => format_currency(v),
            None => format!("${other}"),
        },
        None => MISSING.to_string(),
    };
    let schools = show(hood.schools_nearby.as_ref());

    Some(OptionalBlock::Insights(format!(
        "Walk Score: {walk} • {payment}/mo • {schools} Schools"
    )))
}

fn show(value: Option<&MetricValue>) -> String {
    value.map_or_else(|| MISSING.to_string(), MetricValue::to_string)
}

/// Evaluate [`CONTENT_RULES`] top to bottom.
pub fn select_optional_block(format: &Format, aux: Option<&AuxiliaryData>) -> Option<OptionalBlock> {
    let aux = aux?;
    CONTENT_RULES.iter().find_map(|rule| {
        let block = (rule.select)(format, aux)?;
        tracing::debug!(rule = rule.name, "optional block selected");
        Some(block)
    })
}

/// Independent social-format line: "Near <top school>".
pub fn school_line(format: &Format, aux: Option<&AuxiliaryData>) -> Option<String> {
    if !format.is_social() {
        return None;
    }
    aux?.top_school().map(|school| format!("Near {school}"))
}
