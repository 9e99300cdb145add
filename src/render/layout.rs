//! Layout constants and the width-measurement pass
//!
//! The wrap helpers here run in both the measurement pass and the draw pass,
//! so the two always agree on line counts.

use ab_glyph::FontArc;

use super::canvas::measure_text;
use crate::item::{FlavorText, ItemRecord, Sanctum};

// Card geometry, in pixels
pub const HEADER_MARGIN: u32 = 10;
pub const FONT_HEIGHT: f32 = 18.0;
pub const LINE_HEIGHT: f32 = 20.0;
pub const NAME_OFFSET: f32 = 3.0;
pub const NAME_FONT_HEIGHT: f32 = 23.0;
pub const SEPARATOR_WIDTH: u32 = 221;
pub const SEPARATOR_MARGIN_TOP: f32 = 4.0;
pub const SEPARATOR_MARGIN_BOTTOM: f32 = 7.0;

/// Generous height bound for the working buffer; the card is shrunk to its
/// true content height after drawing.
pub const MAX_CANVAS_HEIGHT: u32 = 1200;

/// Horizontal shear applied to flavor text lines.
pub const FLAVOR_SKEW: f32 = -0.3;
/// Optical x correction applied to skewed flavor lines.
pub const FLAVOR_X_NUDGE: f32 = 5.0;

/// Wrap threshold for modifier lines, in display characters.
pub const MODIFIER_WRAP_LIMIT: usize = 88;
/// Wrap threshold for single-line flavor text.
pub const FLAVOR_WRAP_LIMIT: usize = 90;

/// Greedily wrap one line at word boundaries. Words are never split; a word
/// longer than the limit gets its own line.
pub fn wrap_line(text: &str, limit: usize) -> Vec<String> {
    if text.chars().count() <= limit {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split(' ') {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if candidate.chars().count() > limit && !current.is_empty() {
            lines.push(current);
            current = word.to_string();
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Wrap a modifier pool for display, preserving line order.
pub fn wrap_pool(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .flat_map(|line| wrap_line(line, MODIFIER_WRAP_LIMIT))
        .collect()
}

/// Display lines for flavor text. Pre-split multi-line flavor text is left
/// untouched; a single line is reflowed only when the raw text exceeds the
/// flavor threshold.
pub fn flavor_lines(flavor: &FlavorText) -> Vec<String> {
    if flavor.lines.len() > 1 {
        return flavor.lines.clone();
    }
    if flavor.flavor_text.chars().count() <= FLAVOR_WRAP_LIMIT {
        if flavor.lines.is_empty() {
            return vec![flavor.flavor_text.clone()];
        }
        return flavor.lines.clone();
    }
    wrap_line(&flavor.flavor_text, FLAVOR_WRAP_LIMIT)
}

/// One sanctum boon/affliction summary line.
pub struct SanctumLine {
    pub label: &'static str,
    pub value: String,
    pub affliction: bool,
}

impl SanctumLine {
    pub fn full_text(&self) -> String {
        format!("{}: {}", self.label, self.value)
    }
}

/// Sanctum summary lines in display order.
pub fn sanctum_lines(sanctum: &Sanctum) -> Vec<SanctumLine> {
    let mut lines = Vec::new();
    let groups: [(&'static str, &[String], bool); 4] = [
        ("Minor Boon", &sanctum.minor_boons, false),
        ("Major Boon", &sanctum.major_boons, false),
        ("Minor Affliction", &sanctum.minor_afflictions, true),
        ("Major Affliction", &sanctum.major_afflictions, true),
    ];
    for (label, values, affliction) in groups {
        for value in values {
            lines.push(SanctumLine {
                label,
                value: value.clone(),
                affliction,
            });
        }
    }
    lines
}

/// Compute the final canvas width for an item.
///
/// Wrapped modifier lines, flavor lines, and sanctum summaries are measured
/// at body size; name lines at name size with the header ornament width and
/// margin added on top. The two side margins double as corner-ornament
/// clearance.
pub fn compute_card_width(item: &ItemRecord, font: &FontArc, header_width: u32) -> u32 {
    let mut max_width = 0f32;

    let mut body_lines = wrap_pool(&item.affixes);
    body_lines.extend(wrap_pool(&item.runes));
    body_lines.extend(wrap_pool(&item.implicits));
    body_lines.extend(wrap_pool(&item.enchants));
    if let Some(flavor) = &item.flavor_text {
        body_lines.extend(flavor_lines(flavor));
    }
    for line in sanctum_lines(&item.sanctum) {
        body_lines.push(line.full_text());
    }

    for line in &body_lines {
        max_width = max_width.max(measure_text(font, line, FONT_HEIGHT));
    }

    for line in &item.item_name.lines {
        let width = measure_text(font, line, NAME_FONT_HEIGHT);
        if width > max_width {
            max_width = width + (header_width + HEADER_MARGIN) as f32;
        }
    }

    max_width.ceil() as u32 + header_width * 2
}
