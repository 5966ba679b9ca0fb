//! Text Block Renderer
//!
//! Layout is planned first as plain data ([`TextPlan`]), then drawn onto
//! the overlay. The vertical cursor starts at `h - 220` and advances by a
//! scaled amount after each stacked block.

use image::RgbaImage;
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use serde::Serialize;

use crate::content::OptionalBlock;
use crate::fonts::{FontSet, FontWeight};
use crate::formats::Format;
use crate::layout::*;
use crate::listing::ListingContent;
use crate::templates::{Rgb, Template};

pub const BANNER_LABEL: &str = "FOR SALE";
pub const DEFAULT_FOOTER: &str = "Contact: Your Real Estate Agent";

const DETAILS_COLOR: Rgb = Rgb(0xE0, 0xE0, 0xE0);
const INSIGHTS_COLOR: Rgb = Rgb(0xC0, 0xC0, 0xC0);
const SCHOOL_COLOR: Rgb = Rgb(0xD0, 0xD0, 0xD0);
const FOOTER_COLOR: Rgb = Rgb(0xB0, 0xB0, 0xB0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRole {
    Price,
    Address,
    Details,
    Headline,
    Insights,
    School,
    Footer,
    Banner,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    pub role: TextRole,
    pub text: String,
    pub origin: (i32, i32),
    pub weight: FontWeight,
    pub size: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Banner {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub fill: Rgb,
    pub label: TextBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextPlan {
    pub blocks: Vec<TextBlock>,
    pub banner: Banner,
}

impl TextPlan {
    pub fn block(&self, role: TextRole) -> Option<&TextBlock> {
        self.blocks.iter().find(|b| b.role == role)
    }
}

/// Everything the planner reads for one render.
pub struct PlanInput<'a> {
    pub format: &'a Format,
    pub template: &'a Template,
    pub scale: f64,
    pub listing: &'a ListingContent,
    pub price_display: &'a str,
    pub optional: Option<&'a OptionalBlock>,
    pub school_line: Option<&'a str>,
    pub footer: &'a str,
}

pub fn details_line(listing: &ListingContent) -> String {
    format!("{} Bedrooms  •  {} Bathrooms", listing.bedrooms, listing.bathrooms)
}

pub fn plan_text(input: &PlanInput<'_>, fonts: &FontSet) -> TextPlan {
    let s = input.scale;
    let height = input.format.height as i32;
    let margin = px(MARGIN, s);
    let block = |role, text: &str, y, weight, size, color| TextBlock {
        role,
        text: text.to_string(),
        origin: (margin, y),
        weight,
        size: font_px(size, s),
        color,
    };

    let mut blocks = Vec::with_capacity(7);
    let mut y = height - px(PRICE_TOP, s);

    blocks.push(block(TextRole::Price, input.price_display, y, FontWeight::Bold, SIZE_PRICE, input.template.accent));
    y += px(PRICE_ADVANCE, s);

    blocks.push(block(
        TextRole::Address,
        input.listing.address.as_str(),
        y,
        FontWeight::Regular,
        SIZE_ADDRESS,
        input.template.text_color,
    ));
    y += px(ADDRESS_ADVANCE, s);

    blocks.push(block(
        TextRole::Details,
        details_line(input.listing).as_str(),
        y,
        FontWeight::Regular,
        SIZE_DETAILS,
        DETAILS_COLOR,
    ));

    if let Some(optional) = input.optional {
        y += px(DETAILS_ADVANCE, s);
        blocks.push(match optional {
            OptionalBlock::Headline(text) => {
                block(TextRole::Headline, text.as_str(), y, FontWeight::Bold, SIZE_STORY, input.template.accent)
            }
            OptionalBlock::Insights(text) => {
                block(TextRole::Insights, text.as_str(), y, FontWeight::Regular, SIZE_INSIGHTS, INSIGHTS_COLOR)
            }
        });
    }

    if let Some(school) = input.school_line {
        blocks.push(block(
            TextRole::School,
            school,
            height - px(SCHOOL_BOTTOM, s),
            FontWeight::Regular,
            SIZE_DETAILS,
            SCHOOL_COLOR,
        ));
    }

    blocks.push(block(
        TextRole::Footer,
        input.footer,
        height - px(FOOTER_BOTTOM, s),
        FontWeight::Regular,
        SIZE_DETAILS,
        FOOTER_COLOR,
    ));

    TextPlan { blocks, banner: plan_banner(input, fonts) }
}

fn plan_banner(input: &PlanInput<'_>, fonts: &FontSet) -> Banner {
    let s = input.scale;
    let width = px(BANNER_WIDTH, s);
    let height = px(BANNER_HEIGHT, s);
    let x = input.format.width as i32 - width - px(BANNER_RIGHT, s);
    let size = font_px(SIZE_BANNER, s);
    let text_width = fonts.measure(FontWeight::Bold, size, BANNER_LABEL) as i32;

    Banner {
        x,
        y: px(BANNER_TOP, s),
        width: width.max(1) as u32,
        height: height.max(1) as u32,
        fill: input.template.banner,
        label: TextBlock {
            role: TextRole::Banner,
            text: BANNER_LABEL.to_string(),
            origin: (x + (width - text_width) / 2, px(BANNER_TEXT_TOP, s)),
            weight: FontWeight::Bold,
            size,
            color: Rgb::WHITE,
        },
    }
}

/// `place`: draw one left-aligned block at its anchor.
pub fn place(overlay: &mut RgbaImage, block: &TextBlock, fonts: &FontSet) {
    fonts.draw(overlay, block.color.with_alpha(255), block.origin, block.weight, block.size, &block.text);
}

pub fn render_plan(overlay: &mut RgbaImage, plan: &TextPlan, fonts: &FontSet) {
    let banner = &plan.banner;
    draw_filled_rect_mut(
        overlay,
        Rect::at(banner.x, banner.y).of_size(banner.width, banner.height),
        banner.fill.with_alpha(255),
    );
    place(overlay, &banner.label, fonts);

    for block in &plan.blocks {
        place(overlay, block, fonts);
    }
}
