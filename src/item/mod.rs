//! Item record model

pub mod record;

pub use record::{
    BaseStats, Charges, DamageRange, Element, ElementalDamage, FlaskRecovery, FlavorText,
    ItemName, ItemRecord, Rarity, Requirements, Sanctum, StackSize,
};
