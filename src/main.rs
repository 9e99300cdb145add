//! Cardforge - Entry Point
//!
//! Batch driver: reads parsed item records (JSON files) from an input
//! directory, renders each one, and writes the finished cards as PNGs.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use cardforge::render::RenderAssets;
use cardforge::{render_item, ItemRecord, Rarity};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let items_dir = PathBuf::from(args.next().unwrap_or_else(|| "items".into()));
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "out".into()));
    let assets_dir = PathBuf::from(args.next().unwrap_or_else(|| "assets".into()));

    log::info!("Starting Cardforge v{}", env!("CARGO_PKG_VERSION"));

    fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;

    // Assets are immutable after load, so one set per rarity serves the batch
    let mut assets: HashMap<Rarity, RenderAssets> = HashMap::new();

    let mut rendered = 0usize;
    let mut failed = 0usize;

    for entry in fs::read_dir(&items_dir)
        .with_context(|| format!("failed to read item directory {}", items_dir.display()))?
    {
        let path = entry?.path();
        if path.extension().map_or(true, |ext| ext != "json") {
            continue;
        }
        match render_one(&path, &out_dir, &assets_dir, &mut assets) {
            Ok(out_path) => {
                rendered += 1;
                log::info!("{} created", out_path.display());
            }
            Err(e) => {
                failed += 1;
                log::error!("{}: {:#}", path.display(), e);
            }
        }
    }

    log::info!("Done: {} rendered, {} failed", rendered, failed);
    Ok(())
}

fn render_one(
    path: &Path,
    out_dir: &Path,
    assets_dir: &Path,
    assets: &mut HashMap<Rarity, RenderAssets>,
) -> Result<PathBuf> {
    let data = fs::read_to_string(path)?;
    let item: ItemRecord = serde_json::from_str(&data).context("invalid item record")?;

    if !assets.contains_key(&item.item_rarity) {
        let loaded = RenderAssets::load(assets_dir, item.item_rarity)?;
        assets.insert(item.item_rarity, loaded);
    }
    let rarity_assets = &assets[&item.item_rarity];

    let card = render_item(&item, rarity_assets)?;
    let out_path = out_dir.join(format!("{}.png", item.item_name.name));
    card.save(&out_path)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    Ok(out_path)
}
