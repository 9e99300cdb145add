//! Card rendering
//!
//! Draws one item record onto a freshly allocated canvas. Sections live in an
//! ordered table of `{predicate, draw}` entries walked top to bottom; each
//! draw routine centers its content on the canvas midline and advances the
//! shared vertical cursor. Header chrome and the item name are painted last
//! so they overlay the top margin.

use image::{Rgba, RgbaImage};

use super::assets::RenderAssets;
use super::canvas::Canvas;
use super::colors;
use super::error::RenderError;
use super::layout::{
    compute_card_width, flavor_lines, sanctum_lines, wrap_pool, FLAVOR_SKEW,
    FLAVOR_X_NUDGE, FONT_HEIGHT, HEADER_MARGIN, LINE_HEIGHT, MAX_CANVAS_HEIGHT,
    NAME_FONT_HEIGHT, NAME_OFFSET, SEPARATOR_MARGIN_BOTTOM, SEPARATOR_MARGIN_TOP,
    SEPARATOR_WIDTH,
};
use crate::item::{ElementalDamage, ItemRecord, Rarity};

/// Render one item into a finished card image.
///
/// Fails before any drawing if the record is structurally malformed; optional
/// fields that are absent simply skip their section.
pub fn render_item(item: &ItemRecord, assets: &RenderAssets) -> Result<RgbaImage, RenderError> {
    if item.item_name.lines.is_empty() {
        return Err(RenderError::MalformedItem(
            "item name has no display lines".into(),
        ));
    }

    let width = compute_card_width(item, &assets.font, assets.header_width);
    log::debug!("rendering '{}' at width {}", item.item_name.name, width);

    let mut canvas = Canvas::new(width, MAX_CANVAS_HEIGHT, assets.font.clone());
    canvas.fill(colors::BACKGROUND);

    let mut ctx = RenderContext {
        canvas,
        assets,
        width: width as f32,
        y: (assets.header_height + HEADER_MARGIN) as f32,
    };

    for section in SECTIONS {
        if (section.present)(item) {
            (section.draw)(&mut ctx, item);
        }
    }

    draw_header_chrome(&mut ctx);
    draw_item_name(&mut ctx, item);

    let content_height = ctx.y.ceil() as u32 + HEADER_MARGIN;
    ctx.canvas.shrink_to_height(content_height);
    Ok(ctx.canvas.into_image())
}

/// Per-render drawing state: the canvas plus the vertical cursor.
struct RenderContext<'a> {
    canvas: Canvas,
    assets: &'a RenderAssets,
    width: f32,
    y: f32,
}

impl RenderContext<'_> {
    fn center(&self) -> f32 {
        self.width / 2.0
    }

    /// Draw one centered body line and advance the cursor.
    fn text_line(&mut self, text: &str, color: Rgba<u8>) {
        self.canvas
            .draw_text_centered(text, self.center(), self.y, FONT_HEIGHT, color);
        self.y += LINE_HEIGHT;
    }

    /// Draw a multi-color line: each fragment is measured and centered so the
    /// whole concatenation balances around the canvas midline.
    fn composite_line(&mut self, fragments: &[Fragment]) {
        let widths: Vec<f32> = fragments
            .iter()
            .map(|f| self.canvas.measure_text(&f.text, FONT_HEIGHT))
            .collect();
        for (fragment, offset) in fragments.iter().zip(fragment_offsets(&widths)) {
            self.canvas.draw_text_centered(
                &fragment.text,
                self.center() + offset,
                self.y,
                FONT_HEIGHT,
                fragment.color,
            );
        }
        self.y += LINE_HEIGHT;
    }

    /// Centered separator graphic with its fixed margins.
    fn separator(&mut self) {
        self.y += SEPARATOR_MARGIN_TOP;
        let x = (self.center() - SEPARATOR_WIDTH as f32 / 2.0) as i64;
        self.canvas.draw_image(&self.assets.separator, x, self.y as i64);
        self.y += SEPARATOR_MARGIN_BOTTOM;
    }

    /// Wrapped modifier pool in a single color, optionally followed by a
    /// separator.
    fn modifier_block(&mut self, lines: &[String], color: Rgba<u8>, trailing_separator: bool) {
        for line in wrap_pool(lines) {
            self.text_line(&line, color);
        }
        if trailing_separator {
            self.separator();
        }
    }
}

/// One independently colored piece of a composite line.
struct Fragment {
    text: String,
    color: Rgba<u8>,
}

impl Fragment {
    fn new(text: impl Into<String>, color: Rgba<u8>) -> Self {
        Fragment {
            text: text.into(),
            color,
        }
    }
}

/// Horizontal offset of each fragment's midpoint from the canvas center:
/// `Σ(widths before)/2 − Σ(widths after)/2`. Keeps the concatenation
/// contiguous and centered as a whole.
fn fragment_offsets(widths: &[f32]) -> Vec<f32> {
    let total: f32 = widths.iter().sum();
    let mut before = 0.0;
    widths
        .iter()
        .map(|w| {
            let after = total - before - w;
            let offset = before / 2.0 - after / 2.0;
            before += w;
            offset
        })
        .collect()
}

/// Stat names whose values quality does not scale.
const QUALITY_EXEMPT: [&str; 3] = ["Reduced Attribute Requirements", "Block Chance", "Charges"];

/// Whether a base-stat value should be highlighted in the affix color.
///
/// Approximate by design: besides the quality rule, a stat counts as boosted
/// when its name appears as a case-insensitive substring of any modifier
/// line. The source data is free-form localized text, so there is no exact
/// stat id to match on.
fn is_base_value_boosted(item: &ItemRecord, name: &str) -> bool {
    // Radius is an unscaleable property
    if name == "Radius" {
        return false;
    }
    if item.quality > 0 && !QUALITY_EXEMPT.contains(&name) {
        return true;
    }
    let needle = name.to_lowercase();
    item.modifier_lines()
        .any(|line| line.to_lowercase().contains(&needle))
}

fn boosted_color(item: &ItemRecord, name: &str) -> Rgba<u8> {
    if is_base_value_boosted(item, name) {
        colors::AFFIX
    } else {
        colors::WHITE
    }
}

/// One row of the base stats block.
enum StatRow {
    Pair {
        name: &'static str,
        /// Name used for the boosted check; "Evasion Rating" is commonly
        /// written as "Evasion" in modifier text, for example.
        boost_name: &'static str,
        value: String,
    },
    Elemental(Vec<ElementalDamage>),
}

/// Base stat rows in display order. Falsy values produce no row.
fn base_stat_rows(item: &ItemRecord) -> Vec<StatRow> {
    fn pair(rows: &mut Vec<StatRow>, name: &'static str, boost_name: &'static str, value: String) {
        rows.push(StatRow::Pair {
            name,
            boost_name,
            value,
        });
    }

    let mut rows = Vec::new();
    if let Some(block) = item.block_chance {
        pair(&mut rows, "Block Chance", "Block Chance", format!("{}%", block));
    }
    if item.stats.armour > 0 {
        pair(&mut rows, "Armour", "Armour", item.stats.armour.to_string());
    }
    if item.stats.evasion_rating > 0 {
        pair(&mut rows, "Evasion Rating", "Evasion", item.stats.evasion_rating.to_string());
    }
    if item.stats.energy_shield > 0 {
        pair(&mut rows, "Energy Shield", "Energy Shield", item.stats.energy_shield.to_string());
    }
    if item.stats.spirit > 0 {
        pair(&mut rows, "Spirit", "Spirit", item.stats.spirit.to_string());
    }
    if let Some(damage) = item.physical_damage {
        pair(&mut rows, "Physical Damage", "Physical Damage", format!("{}-{}", damage.min, damage.max));
    }
    if !item.elemental_damage.is_empty() {
        rows.push(StatRow::Elemental(item.elemental_damage.clone()));
    }
    if let Some(crit) = item.critical_hit_chance {
        pair(&mut rows, "Critical Hit Chance", "Critical Hit Chance", format!("{:.2}%", crit));
    }
    if let Some(speed) = item.attacks_per_second {
        pair(&mut rows, "Attacks Per Second", "Attack Speed", speed.to_string());
    }
    if let Some(reload) = item.reload_time {
        pair(&mut rows, "Reload Time", "Attack Speed", reload.to_string());
    }
    if let Some(limit) = item.limited_to {
        pair(&mut rows, "Limited To", "Limited To", limit.to_string());
    }
    if let Some(radius) = item.radius.as_deref().filter(|r| !r.is_empty()) {
        pair(&mut rows, "Radius", "Radius", radius.to_string());
    }
    if let Some(slots) = item.charm_slots {
        pair(&mut rows, "Charm Slots", "Charm Slots", slots.to_string());
    }

    rows
}

fn quality_fragments(item: &ItemRecord) -> Vec<Fragment> {
    let label = match &item.quality_type {
        Some(kind) => format!("Quality ({}): ", kind),
        None => "Quality: ".to_string(),
    };
    vec![
        Fragment::new(label, colors::GREY),
        Fragment::new(format!("+{}%", item.quality), colors::AFFIX),
    ]
}

/// Requirement fragments with comma joiners attached only when a later
/// fragment follows, so nothing dangles.
fn requirement_fragments(item: &ItemRecord) -> Vec<Fragment> {
    let req = &item.requirements;
    let attr_color = boosted_color(item, "Reduced Attribute Requirements");
    let mut fragments = vec![Fragment::new("Requires: ", colors::GREY)];

    if let Some(level) = req.level {
        let joiner = if req.has_attribute() { ", " } else { "" };
        fragments.push(Fragment::new(format!("Level {}{}", level, joiner), colors::WHITE));
    }
    if let Some(strength) = req.strength {
        let joiner = if req.dexterity.is_some() || req.intelligence.is_some() { ", " } else { "" };
        fragments.push(Fragment::new(format!("{} Str{}", strength, joiner), attr_color));
    }
    if let Some(dexterity) = req.dexterity {
        let joiner = if req.intelligence.is_some() { ", " } else { "" };
        fragments.push(Fragment::new(format!("{} Dex{}", dexterity, joiner), attr_color));
    }
    if let Some(intelligence) = req.intelligence {
        fragments.push(Fragment::new(format!("{} Int", intelligence), attr_color));
    }

    fragments
}

fn flask_fragments(item: &ItemRecord) -> Option<Vec<Fragment>> {
    let recovery = item.flask_recovery.as_ref()?;
    let (amount, kind) = recovery.amount()?;
    let value_color = boosted_color(item, "Flask Recovery");
    Some(vec![
        Fragment::new("Recovers ", colors::GREY),
        Fragment::new(amount.to_string(), value_color),
        Fragment::new(format!(" {} over ", kind), colors::GREY),
        Fragment::new(format!("{} Seconds", recovery.over), value_color),
    ])
}

fn charge_fragments(item: &ItemRecord) -> Option<Vec<Fragment>> {
    let charges = item.charges?;
    let value_color = boosted_color(item, "Charges");
    Some(vec![
        Fragment::new("Consumes ", colors::GREY),
        Fragment::new(charges.consumes.to_string(), value_color),
        Fragment::new(" of ", colors::GREY),
        Fragment::new(format!("{} Charges on use", charges.max), value_color),
    ])
}

/// One entry in the fixed section order.
struct Section {
    name: &'static str,
    present: fn(&ItemRecord) -> bool,
    draw: fn(&mut RenderContext, &ItemRecord),
}

/// The fixed top-to-bottom section order of the card body.
const SECTIONS: &[Section] = &[
    Section { name: "item_class", present: always, draw: draw_item_class },
    Section { name: "stack_size", present: has_stack_size, draw: draw_stack_size },
    Section { name: "quality", present: has_quality, draw: draw_quality },
    Section { name: "base_stats", present: has_base_stats, draw: draw_base_stats },
    Section { name: "flask_recovery", present: has_flask_recovery, draw: draw_flask_recovery },
    Section { name: "charges", present: has_charges, draw: draw_charges },
    Section { name: "item_level", present: has_item_level, draw: draw_item_level },
    Section { name: "requirements", present: has_requirements, draw: draw_requirements },
    Section { name: "meta_separator", present: has_meta_block, draw: draw_separator_only },
    Section { name: "area_level", present: has_area_level, draw: draw_area_level },
    Section { name: "number_of_trials", present: has_trials, draw: draw_number_of_trials },
    Section { name: "sanctum", present: has_sanctum, draw: draw_sanctum },
    Section { name: "trial_separator", present: is_trial_card, draw: draw_separator_only },
    Section { name: "enchants", present: has_enchants, draw: draw_enchants },
    Section { name: "runes", present: has_runes, draw: draw_runes },
    Section { name: "implicits", present: has_implicits, draw: draw_implicits },
    Section { name: "affixes", present: has_affixes, draw: draw_affixes },
    Section { name: "corrupted", present: is_corrupted, draw: draw_corrupted },
    Section { name: "mirrored", present: is_mirrored, draw: draw_mirrored },
    Section { name: "unmodifiable", present: is_unmodifiable, draw: draw_unmodifiable },
    Section { name: "unidentified", present: is_unidentified, draw: draw_unidentified },
    Section { name: "flavor_text", present: has_flavor_text, draw: draw_flavor_text },
];

// Section presence predicates

fn always(_item: &ItemRecord) -> bool {
    true
}

fn has_stack_size(item: &ItemRecord) -> bool {
    item.stack_size.is_some()
}

fn has_quality(item: &ItemRecord) -> bool {
    item.quality > 0
}

fn has_base_stats(item: &ItemRecord) -> bool {
    !base_stat_rows(item).is_empty()
}

fn has_flask_recovery(item: &ItemRecord) -> bool {
    item.flask_recovery
        .as_ref()
        .and_then(|recovery| recovery.amount())
        .is_some()
}

fn has_charges(item: &ItemRecord) -> bool {
    item.charges.is_some()
}

fn has_item_level(item: &ItemRecord) -> bool {
    item.item_level.is_some()
}

fn has_requirements(item: &ItemRecord) -> bool {
    item.requirements.has_any()
}

/// The separator closing the item-level/requirements block. Suppressed when
/// neither was drawn, so a bare card goes straight from stats to modifiers.
fn has_meta_block(item: &ItemRecord) -> bool {
    has_item_level(item) || has_requirements(item)
}

fn has_area_level(item: &ItemRecord) -> bool {
    item.area_level.is_some()
}

fn has_trials(item: &ItemRecord) -> bool {
    item.number_of_trials.is_some()
}

fn has_sanctum(item: &ItemRecord) -> bool {
    !item.sanctum.is_empty()
}

fn has_area_data(item: &ItemRecord) -> bool {
    has_area_level(item) || has_trials(item) || has_sanctum(item)
}

/// Trial cards are overworld Normal/Magic items carrying area, trial, or
/// sanctum data; gear cards never get this separator.
fn is_trial_card(item: &ItemRecord) -> bool {
    matches!(item.item_rarity, Rarity::Normal | Rarity::Magic) && has_area_data(item)
}

fn has_enchants(item: &ItemRecord) -> bool {
    !item.enchants.is_empty()
}

fn has_runes(item: &ItemRecord) -> bool {
    !item.runes.is_empty()
}

fn has_implicits(item: &ItemRecord) -> bool {
    !item.implicits.is_empty()
}

fn has_affixes(item: &ItemRecord) -> bool {
    !item.affixes.is_empty()
}

fn is_corrupted(item: &ItemRecord) -> bool {
    item.corrupted
}

fn is_mirrored(item: &ItemRecord) -> bool {
    item.mirrored
}

fn is_unmodifiable(item: &ItemRecord) -> bool {
    item.unmodifiable
}

fn is_unidentified(item: &ItemRecord) -> bool {
    !item.identified
}

fn has_flavor_text(item: &ItemRecord) -> bool {
    item.flavor_text.is_some()
}

// Section draw routines

fn draw_item_class(ctx: &mut RenderContext, item: &ItemRecord) {
    ctx.text_line(&item.item_class, colors::GREY);
}

fn draw_stack_size(ctx: &mut RenderContext, item: &ItemRecord) {
    if let Some(stack) = item.stack_size {
        ctx.composite_line(&[
            Fragment::new("Stack Size: ", colors::GREY),
            Fragment::new(format!("{}/{}", stack.current, stack.max), colors::WHITE),
        ]);
    }
}

fn draw_quality(ctx: &mut RenderContext, item: &ItemRecord) {
    ctx.composite_line(&quality_fragments(item));
}

fn draw_base_stats(ctx: &mut RenderContext, item: &ItemRecord) {
    for row in base_stat_rows(item) {
        match row {
            StatRow::Pair {
                name,
                boost_name,
                value,
            } => {
                ctx.composite_line(&[
                    Fragment::new(format!("{}: ", name), colors::GREY),
                    Fragment::new(value, boosted_color(item, boost_name)),
                ]);
            }
            StatRow::Elemental(ranges) => draw_elemental_damage(ctx, &ranges),
        }
    }
}

fn elemental_fragments(ranges: &[ElementalDamage]) -> Vec<Fragment> {
    let mut fragments = vec![Fragment::new("Elemental Damage: ", colors::GREY)];
    for (i, range) in ranges.iter().enumerate() {
        let mut text = format!("{}-{}", range.min, range.max);
        if i + 1 < ranges.len() {
            text.push_str(", ");
        }
        fragments.push(Fragment::new(text, colors::element_color(range.element)));
    }
    fragments
}

fn draw_elemental_damage(ctx: &mut RenderContext, ranges: &[ElementalDamage]) {
    ctx.composite_line(&elemental_fragments(ranges));
}

fn draw_flask_recovery(ctx: &mut RenderContext, item: &ItemRecord) {
    if let Some(fragments) = flask_fragments(item) {
        ctx.composite_line(&fragments);
    }
}

fn draw_charges(ctx: &mut RenderContext, item: &ItemRecord) {
    if let Some(fragments) = charge_fragments(item) {
        ctx.composite_line(&fragments);
    }
}

fn draw_item_level(ctx: &mut RenderContext, item: &ItemRecord) {
    if let Some(level) = item.item_level {
        ctx.separator();
        ctx.text_line(&format!("Item Level: {}", level), colors::WHITE);
    }
}

fn draw_requirements(ctx: &mut RenderContext, item: &ItemRecord) {
    ctx.composite_line(&requirement_fragments(item));
}

fn draw_separator_only(ctx: &mut RenderContext, _item: &ItemRecord) {
    ctx.separator();
}

fn draw_area_level(ctx: &mut RenderContext, item: &ItemRecord) {
    if let Some(level) = item.area_level {
        ctx.text_line(&format!("Area Level: {}", level), colors::WHITE);
    }
}

fn draw_number_of_trials(ctx: &mut RenderContext, item: &ItemRecord) {
    if let Some(trials) = item.number_of_trials {
        ctx.text_line(&format!("Number of Trials: {}", trials), colors::WHITE);
    }
}

fn draw_sanctum(ctx: &mut RenderContext, item: &ItemRecord) {
    for line in sanctum_lines(&item.sanctum) {
        let value_color = if line.affliction {
            colors::CORRUPTED
        } else {
            colors::ENCHANT
        };
        ctx.composite_line(&[
            Fragment::new(format!("{}: ", line.label), colors::GREY),
            Fragment::new(line.value, value_color),
        ]);
    }
}

fn draw_enchants(ctx: &mut RenderContext, item: &ItemRecord) {
    ctx.modifier_block(&item.enchants, colors::ENCHANT, true);
}

fn draw_runes(ctx: &mut RenderContext, item: &ItemRecord) {
    ctx.modifier_block(&item.runes, colors::ENCHANT, true);
}

fn draw_implicits(ctx: &mut RenderContext, item: &ItemRecord) {
    ctx.modifier_block(&item.implicits, colors::AFFIX, true);
}

fn draw_affixes(ctx: &mut RenderContext, item: &ItemRecord) {
    ctx.modifier_block(&item.affixes, colors::AFFIX, false);
}

fn draw_corrupted(ctx: &mut RenderContext, _item: &ItemRecord) {
    ctx.separator();
    ctx.text_line("Corrupted", colors::CORRUPTED);
}

fn draw_mirrored(ctx: &mut RenderContext, _item: &ItemRecord) {
    ctx.separator();
    ctx.text_line("Mirrored", colors::CORRUPTED);
}

fn draw_unmodifiable(ctx: &mut RenderContext, _item: &ItemRecord) {
    ctx.separator();
    ctx.text_line("Unmodifiable", colors::CORRUPTED);
}

fn draw_unidentified(ctx: &mut RenderContext, _item: &ItemRecord) {
    ctx.text_line("Unidentified", colors::CORRUPTED);
}

fn draw_flavor_text(ctx: &mut RenderContext, item: &ItemRecord) {
    let Some(flavor) = &item.flavor_text else {
        return;
    };
    ctx.separator();
    for line in flavor_lines(flavor) {
        // Compensate the shear against the line midline so the skewed run
        // stays visually centered
        let adjusted_x =
            ctx.center() - FLAVOR_SKEW * (ctx.y - LINE_HEIGHT / 2.0) + FLAVOR_X_NUDGE;
        ctx.canvas.draw_text_skewed(
            &line,
            adjusted_x,
            ctx.y,
            FONT_HEIGHT,
            colors::UNIQUE,
            FLAVOR_SKEW,
        );
        ctx.y += LINE_HEIGHT;
    }
}

/// Tile the middle ornament across the full width, then cap both ends.
fn draw_header_chrome(ctx: &mut RenderContext) {
    let width = ctx.canvas.width() as i64;
    let step = (ctx.assets.header_width.max(2) - 1) as i64;
    let mut x = 0i64;
    while x < width {
        ctx.canvas.draw_image(&ctx.assets.header_middle, x, 0);
        x += step;
    }
    ctx.canvas.draw_image(&ctx.assets.header_left, 0, 0);
    ctx.canvas.draw_image(
        &ctx.assets.header_right,
        width - ctx.assets.header_width as i64,
        0,
    );
}

fn draw_item_name(ctx: &mut RenderContext, item: &ItemRecord) {
    let color = colors::name_color(item.item_rarity);
    let center = ctx.center();
    ctx.canvas.draw_text_centered(
        &item.item_name.lines[0],
        center,
        NAME_OFFSET,
        NAME_FONT_HEIGHT,
        color,
    );
    if let Some(second) = item.item_name.lines.get(1) {
        ctx.canvas.draw_text_centered(
            second,
            center,
            NAME_FONT_HEIGHT - NAME_OFFSET,
            NAME_FONT_HEIGHT,
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ab_glyph::FontArc;

    use super::super::canvas::measure_text;

    fn base_item() -> ItemRecord {
        serde_json::from_str(
            r#"{
                "itemClass": "Wands",
                "itemRarity": "Magic",
                "itemName": { "name": "test", "lines": ["Test Wand"] }
            }"#,
        )
        .unwrap()
    }

    fn present_sections(item: &ItemRecord) -> Vec<&'static str> {
        SECTIONS
            .iter()
            .filter(|section| (section.present)(item))
            .map(|section| section.name)
            .collect()
    }

    /// Assets backed by a real font and synthetic 1x1 ornament images, so
    /// full renders run without the game's asset files.
    fn test_assets() -> RenderAssets {
        let font =
            FontArc::try_from_slice(include_bytes!("../../tests/fixtures/DejaVuSans.ttf")).unwrap();
        RenderAssets {
            font,
            separator: RgbaImage::new(1, 1),
            header_left: RgbaImage::new(1, 1),
            header_middle: RgbaImage::new(1, 1),
            header_right: RgbaImage::new(1, 1),
            header_width: 44,
            header_height: 14,
        }
    }

    #[test]
    fn test_fragment_offsets_balance() {
        let widths = [10.0, 20.0, 30.0];
        let offsets = fragment_offsets(&widths);
        assert_eq!(offsets, vec![-25.0, -10.0, 15.0]);

        // Fragments tile contiguously and the whole run is centered
        let left_edge = offsets[0] - widths[0] / 2.0;
        let right_edge = offsets[2] + widths[2] / 2.0;
        assert_eq!(left_edge, -30.0);
        assert_eq!(right_edge, 30.0);
        assert_eq!(offsets[0] + widths[0] / 2.0, offsets[1] - widths[1] / 2.0);
    }

    #[test]
    fn test_quality_boosts_base_stats() {
        let mut item = base_item();
        item.stats.armour = 400;
        assert!(!is_base_value_boosted(&item, "Armour"));

        item.quality = 20;
        assert!(is_base_value_boosted(&item, "Armour"));
        // Exempt names ignore quality
        assert!(!is_base_value_boosted(&item, "Block Chance"));
        assert!(!is_base_value_boosted(&item, "Charges"));
        // Radius never boosts
        assert!(!is_base_value_boosted(&item, "Radius"));
    }

    #[test]
    fn test_affix_substring_boosts_stat() {
        let mut item = base_item();
        item.affixes.push("100% increased Evasion Rating when on Full Life".into());
        assert!(is_base_value_boosted(&item, "Evasion"));
        assert!(is_base_value_boosted(&item, "evasion rating"));
        assert!(!is_base_value_boosted(&item, "Armour"));
    }

    #[test]
    fn test_quality_section_presence() {
        let mut item = base_item();
        assert!(!present_sections(&item).contains(&"quality"));

        item.quality = 20;
        assert!(present_sections(&item).contains(&"quality"));
        assert_eq!(quality_fragments(&item)[1].text, "+20%");

        item.quality_type = Some("Catalyst".into());
        assert_eq!(quality_fragments(&item)[0].text, "Quality (Catalyst): ");
    }

    #[test]
    fn test_base_stat_rows_skip_falsy_values() {
        let item = base_item();
        assert!(base_stat_rows(&item).is_empty());

        let mut item = base_item();
        item.stats.energy_shield = 820;
        item.critical_hit_chance = Some(10.0);
        let rows = base_stat_rows(&item);
        assert_eq!(rows.len(), 2);
        match &rows[0] {
            StatRow::Pair { name, value, .. } => {
                assert_eq!(*name, "Energy Shield");
                assert_eq!(value, "820");
            }
            StatRow::Elemental(_) => panic!("expected pair row"),
        }
        match &rows[1] {
            StatRow::Pair { value, .. } => assert_eq!(value, "10.00%"),
            StatRow::Elemental(_) => panic!("expected pair row"),
        }
    }

    #[test]
    fn test_requirement_fragments_omit_absent_attributes() {
        let mut item = base_item();
        item.requirements.level = Some(78);
        item.requirements.dexterity = Some(165);
        item.requirements.intelligence = Some(64);

        let fragments = requirement_fragments(&item);
        let texts: Vec<&str> = fragments.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, ["Requires: ", "Level 78, ", "165 Dex, ", "64 Int"]);
        // No strength fragment and no dangling comma
        assert!(!texts.iter().any(|t| t.contains("Str")));
        assert!(!texts.last().unwrap().ends_with(", "));
    }

    #[test]
    fn test_requirement_level_only_has_no_joiner() {
        let mut item = base_item();
        item.requirements.level = Some(56);
        let fragments = requirement_fragments(&item);
        assert_eq!(fragments[1].text, "Level 56");
    }

    #[test]
    fn test_flask_and_charge_fragments() {
        let mut item = base_item();
        item.flask_recovery = Some(serde_json::from_str(r#"{"life": 2000, "over": 3.0}"#).unwrap());
        item.charges = Some(serde_json::from_str(r#"{"consumes": 10, "max": 75}"#).unwrap());

        let flask = flask_fragments(&item).unwrap();
        let texts: Vec<&str> = flask.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, ["Recovers ", "2000", " Life over ", "3 Seconds"]);

        let charges = charge_fragments(&item).unwrap();
        let texts: Vec<&str> = charges.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, ["Consumes ", "10", " of ", "75 Charges on use"]);
        // Charges is quality-exempt, so the values stay white
        assert_eq!(charges[1].color, colors::WHITE);
    }

    #[test]
    fn test_trial_separator_rarity_gate() {
        let mut item = base_item();
        item.area_level = Some(65);
        assert!(present_sections(&item).contains(&"trial_separator"));

        item.item_rarity = Rarity::Rare;
        assert!(!present_sections(&item).contains(&"trial_separator"));

        let mut bare = base_item();
        bare.item_rarity = Rarity::Normal;
        assert!(!present_sections(&bare).contains(&"trial_separator"));
    }

    #[test]
    fn test_unidentified_corrupted_magic_item_sections() {
        let mut item = base_item();
        item.affixes.push("+26 to Strength".into());
        item.corrupted = true;
        item.identified = false;

        assert_eq!(
            present_sections(&item),
            ["item_class", "affixes", "corrupted", "unidentified"]
        );
    }

    #[test]
    fn test_rate_values_render_without_padded_zeros() {
        let mut item = base_item();
        item.attacks_per_second = Some(1.4);
        item.reload_time = Some(0.75);

        let rows = base_stat_rows(&item);
        match &rows[0] {
            StatRow::Pair { value, .. } => assert_eq!(value, "1.4"),
            StatRow::Elemental(_) => panic!("expected pair row"),
        }
        match &rows[1] {
            StatRow::Pair { value, .. } => assert_eq!(value, "0.75"),
            StatRow::Elemental(_) => panic!("expected pair row"),
        }
    }

    #[test]
    fn test_render_twice_yields_identical_images() {
        let assets = test_assets();
        let mut item = base_item();
        item.quality = 20;
        item.stats.armour = 400;
        item.item_level = Some(80);
        item.requirements.level = Some(64);
        item.affixes.push("+26 to Strength".into());
        item.corrupted = true;

        let first = render_item(&item, &assets).unwrap();
        let second = render_item(&item, &assets).unwrap();
        assert_eq!(first.dimensions(), second.dimensions());
        assert_eq!(first.as_raw(), second.as_raw());
        assert!(first.height() > 0 && first.height() <= MAX_CANVAS_HEIGHT);
    }

    #[test]
    fn test_card_width_covers_widest_line() {
        let assets = test_assets();
        let mut item = base_item();
        item.affixes.push("Allies in your Presence deal 25% increased Damage".into());

        let narrow = compute_card_width(&item, &assets.font, assets.header_width);
        let card = render_item(&item, &assets).unwrap();
        assert_eq!(card.width(), narrow);

        let widest = measure_text(&assets.font, &item.affixes[0], FONT_HEIGHT);
        assert!(card.width() as f32 >= widest);

        // Adding a longer line never narrows the card
        item.affixes
            .push("Recover 4% of maximum Life when you Suppress Spell Damage from a Hit".into());
        let wide = compute_card_width(&item, &assets.font, assets.header_width);
        assert!(wide >= narrow);
    }

    #[test]
    fn test_empty_name_lines_abort_before_drawing() {
        let assets = test_assets();
        let mut item = base_item();
        item.item_name.lines.clear();

        let err = render_item(&item, &assets);
        assert!(matches!(err, Err(RenderError::MalformedItem(_))));
    }

    #[test]
    fn test_elemental_fragments_joined_with_commas() {
        let ranges: Vec<ElementalDamage> = serde_json::from_str(
            r#"[
                {"element": "Fire", "min": 10, "max": 20},
                {"element": "Lightning", "min": 46, "max": 224}
            ]"#,
        )
        .unwrap();
        let fragments = elemental_fragments(&ranges);
        assert_eq!(fragments[0].text, "Elemental Damage: ");
        assert_eq!(fragments[1].text, "10-20, ");
        assert_eq!(fragments[2].text, "46-224");
        assert_eq!(fragments[1].color, colors::FIRE);
        assert_eq!(fragments[2].color, colors::LIGHTNING);
    }
}
