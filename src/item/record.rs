//! Item record definitions
//!
//! The structured item description produced by the external item-text parser.
//! Field names mirror the parser's camelCase JSON output, so a parsed item can
//! be deserialized directly into an [`ItemRecord`].

use serde::{Deserialize, Serialize};

/// Item rarity tiers, as named by the game's item text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Normal,
    Magic,
    Rare,
    Unique,
    Currency,
    Quest,
}

impl Rarity {
    /// Get rarity name
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Normal => "Normal",
            Rarity::Magic => "Magic",
            Rarity::Rare => "Rare",
            Rarity::Unique => "Unique",
            Rarity::Currency => "Currency",
            Rarity::Quest => "Quest",
        }
    }

    /// Key used to select per-rarity image assets (`separator-{key}.png` etc.)
    pub fn asset_key(&self) -> &'static str {
        self.name()
    }

    /// Rare and Unique cards carry the header ornaments at natural size;
    /// every other rarity scales them down to 2/3.
    pub fn is_premium(&self) -> bool {
        matches!(self, Rarity::Rare | Rarity::Unique)
    }
}

/// Display name of an item: a filesystem-safe base name plus one or two
/// rendered name lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemName {
    pub name: String,
    pub lines: Vec<String>,
}

/// Defensive base stats. Zero means the stat is absent from the item text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseStats {
    #[serde(default)]
    pub armour: u32,
    #[serde(default)]
    pub evasion_rating: u32,
    #[serde(default)]
    pub energy_shield: u32,
    #[serde(default)]
    pub spirit: u32,
}

/// A min-max damage range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DamageRange {
    pub min: u32,
    pub max: u32,
}

/// Damage element for elemental damage ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Element {
    #[serde(alias = "fire")]
    Fire,
    #[serde(alias = "cold")]
    Cold,
    #[serde(alias = "lightning")]
    Lightning,
}

/// One elemental damage line entry. An item carries between zero and three.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ElementalDamage {
    pub element: Element,
    pub min: u32,
    pub max: u32,
}

/// Stack size of stackable items (currency and the like).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StackSize {
    pub current: u32,
    pub max: u32,
}

/// Flask recovery: exactly one of the resource fields is populated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlaskRecovery {
    #[serde(default)]
    pub mana: Option<u32>,
    #[serde(default)]
    pub life: Option<u32>,
    #[serde(default)]
    pub energy_shield: Option<u32>,
    pub over: f64,
}

impl FlaskRecovery {
    /// The recovered amount and its resource label, if any resource is set.
    pub fn amount(&self) -> Option<(u32, &'static str)> {
        if let Some(life) = self.life {
            Some((life, "Life"))
        } else if let Some(mana) = self.mana {
            Some((mana, "Mana"))
        } else {
            self.energy_shield.map(|es| (es, "Energy Shield"))
        }
    }
}

/// Flask/charm charge consumption.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Charges {
    pub consumes: u32,
    pub max: u32,
}

/// Attribute and level requirements. Zero/absent means no requirement.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Requirements {
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default)]
    pub strength: Option<u32>,
    #[serde(default)]
    pub dexterity: Option<u32>,
    #[serde(default)]
    pub intelligence: Option<u32>,
}

impl Requirements {
    pub fn has_any(&self) -> bool {
        self.level.is_some()
            || self.strength.is_some()
            || self.dexterity.is_some()
            || self.intelligence.is_some()
    }

    pub fn has_attribute(&self) -> bool {
        self.strength.is_some() || self.dexterity.is_some() || self.intelligence.is_some()
    }
}

/// Sanctum relic boons and afflictions, each an ordered list of labels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sanctum {
    #[serde(default)]
    pub minor_boons: Vec<String>,
    #[serde(default)]
    pub major_boons: Vec<String>,
    #[serde(default)]
    pub minor_afflictions: Vec<String>,
    #[serde(default)]
    pub major_afflictions: Vec<String>,
}

impl Sanctum {
    pub fn is_empty(&self) -> bool {
        self.minor_boons.is_empty()
            && self.major_boons.is_empty()
            && self.minor_afflictions.is_empty()
            && self.major_afflictions.is_empty()
    }
}

/// Flavor text: the raw string plus the parser's pre-split display lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlavorText {
    pub flavor_text: String,
    #[serde(default)]
    pub lines: Vec<String>,
}

fn default_true() -> bool {
    true
}

/// A fully parsed item, immutable during rendering.
///
/// Modifier pools default to empty vectors rather than being optional, so
/// section presence checks are uniform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub item_class: String,
    pub item_rarity: Rarity,
    pub item_name: ItemName,

    // Modifier pools, insertion order = display order
    #[serde(default)]
    pub enchants: Vec<String>,
    #[serde(default)]
    pub runes: Vec<String>,
    #[serde(default)]
    pub implicits: Vec<String>,
    #[serde(default)]
    pub affixes: Vec<String>,

    // Scalar and structured stats
    #[serde(default)]
    pub quality: u32,
    #[serde(default)]
    pub quality_type: Option<String>,
    #[serde(default)]
    pub block_chance: Option<u32>,
    #[serde(default)]
    pub stats: BaseStats,
    #[serde(default)]
    pub physical_damage: Option<DamageRange>,
    #[serde(default)]
    pub elemental_damage: Vec<ElementalDamage>,
    #[serde(default)]
    pub critical_hit_chance: Option<f64>,
    #[serde(default)]
    pub attacks_per_second: Option<f64>,
    #[serde(default)]
    pub reload_time: Option<f64>,
    #[serde(default)]
    pub charm_slots: Option<u32>,
    #[serde(default)]
    pub limited_to: Option<u32>,
    #[serde(default)]
    pub radius: Option<String>,
    #[serde(default)]
    pub stack_size: Option<StackSize>,
    #[serde(default)]
    pub flask_recovery: Option<FlaskRecovery>,
    #[serde(default)]
    pub charges: Option<Charges>,

    // Requirements and meta stats
    #[serde(default)]
    pub requirements: Requirements,
    #[serde(default)]
    pub item_level: Option<u32>,
    #[serde(default)]
    pub area_level: Option<u32>,
    #[serde(default)]
    pub number_of_trials: Option<u32>,
    #[serde(default)]
    pub sanctum: Sanctum,

    // Flags
    #[serde(default)]
    pub corrupted: bool,
    #[serde(default)]
    pub mirrored: bool,
    #[serde(default)]
    pub unmodifiable: bool,
    #[serde(default = "default_true")]
    pub identified: bool,

    #[serde(default)]
    pub flavor_text: Option<FlavorText>,
}

impl ItemRecord {
    /// All modifier lines in display order, for the boosted-stat check.
    pub fn modifier_lines(&self) -> impl Iterator<Item = &String> {
        self.enchants
            .iter()
            .chain(&self.runes)
            .chain(&self.implicits)
            .chain(&self.affixes)
    }
}
