//! Subcommand implementations. Each returns the text to print.

use std::path::Path;
use std::time::SystemTime;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use mosaic_api::{GalleryImage, ItemId, Ratio};
use mosaic_kernel::{layout_tiles, FileProbe, Gallery, GalleryConfig, PrefStore, Preferences, Tile};
use mosaic_layout::{positioned, Item, Row};
use serde::Serialize;

use crate::cli::{LayoutArgs, OutputFormat};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp", "tif", "tiff"];

// =========================================================================
// layout
// =========================================================================

pub async fn run_layout(args: &LayoutArgs, store: Option<PrefStore>) -> Result<String> {
    let config = load_config(args)?;
    let (mut gallery, _events) = Gallery::with_store(config, store);

    if let Some(dir) = &args.dir {
        let images = scan_dir(dir)?;
        if images.is_empty() {
            tracing::warn!("No images found in {}", dir.display());
        }
        gallery.load_images(images);
        let measured = gallery.measure_missing(&FileProbe::new()).await;
        tracing::debug!("Measured {} images", measured);
    } else if let Some(ratios) = &args.ratios {
        let parsed = parse_ratios(ratios)?;
        let images = parsed
            .iter()
            .enumerate()
            .map(|(i, (raw, _))| GalleryImage::new(format!("#{}", i + 1), raw.clone(), DateTime::<Utc>::default()))
            .collect();
        gallery.load_images(images);
        for (i, (_, ratio)) in parsed.iter().enumerate() {
            let id = ItemId::new(format!("#{}", i + 1));
            gallery.record_dimensions(&id, ratio.width(), ratio.height());
        }
    }

    let columns = gallery
        .config()
        .clamp_columns(args.columns.unwrap_or(gallery.requested_columns()));
    let tiles = gallery.tiles();
    let rows = layout_tiles(&tiles, args.width, columns, gallery.config());

    match args.format {
        OutputFormat::Text => Ok(render_text(&gallery, &rows, &tiles, args.width, columns)),
        OutputFormat::Json => render_json(&gallery, &rows, &tiles, args.width, columns),
    }
}

fn load_config(args: &LayoutArgs) -> Result<GalleryConfig> {
    let mut config = match &args.config {
        Some(path) => GalleryConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => GalleryConfig::default(),
    };
    if let Some(gap) = args.gap {
        config.gap = gap;
    }
    if let Some(placeholder) = args.placeholder {
        config.placeholder_ratio = placeholder;
    }
    Ok(config)
}

/// Collect image files in `dir`, newest first (ties broken by name).
fn scan_dir(dir: &Path) -> Result<Vec<GalleryImage>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    let mut images = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() || !has_image_extension(&path) {
            continue;
        }
        let modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        let name = entry.file_name().to_string_lossy().into_owned();
        images.push(GalleryImage::new(
            name,
            path.display().to_string(),
            DateTime::<Utc>::from(modified),
        ));
    }

    images.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
    Ok(images)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

fn parse_ratios(raw: &[String]) -> Result<Vec<(String, Ratio)>> {
    raw.iter()
        .map(|s| {
            let ratio = s
                .parse::<Ratio>()
                .with_context(|| format!("Invalid aspect ratio: {s:?}"))?;
            Ok((s.trim().to_string(), ratio))
        })
        .collect()
}

// =========================================================================
// Output
// =========================================================================

fn render_text(gallery: &Gallery, rows: &[Row<'_, Tile>], tiles: &[Item<Tile>], width: f32, columns: usize) -> String {
    let grid = gallery.config().grid(columns);
    let mut lines = vec![format!(
        "{} items, {} columns, width {}, height {}",
        tiles.len(),
        columns,
        width,
        grid.height_for_width(tiles, width)
    )];

    for (index, row) in rows.iter().enumerate() {
        let marker = if row.is_partial() { " (partial)" } else { "" };
        lines.push(format!("row {}: height {}{}", index, row.height(), marker));
        lines.extend(row.items.iter().map(|placed| {
            let ratio = gallery
                .state()
                .ratio(&placed.item.id)
                .map(|r| r.to_string())
                .unwrap_or_else(|| "?".to_string());
            format!(
                "  {:<24} {:>5} x {:<5} {}",
                placed.item.id, placed.width, placed.height, ratio
            )
        }));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[derive(Serialize)]
struct LayoutOutput<'a> {
    width: f32,
    columns: usize,
    height: f32,
    rows: Vec<RowOutput<'a>>,
}

#[derive(Serialize)]
struct RowOutput<'a> {
    height: f32,
    partial: bool,
    items: Vec<TileOutput<'a>>,
}

#[derive(Serialize)]
struct TileOutput<'a> {
    id: &'a ItemId,
    source: Option<&'a str>,
    ratio: Option<Ratio>,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

fn render_json(
    gallery: &Gallery,
    rows: &[Row<'_, Tile>],
    tiles: &[Item<Tile>],
    width: f32,
    columns: usize,
) -> Result<String> {
    let config = gallery.config();
    let mut output = LayoutOutput {
        width,
        columns,
        height: config.grid(columns).height_for_width(tiles, width),
        rows: rows
            .iter()
            .map(|row| RowOutput {
                height: row.height(),
                partial: row.is_partial(),
                items: Vec::with_capacity(row.len()),
            })
            .collect(),
    };

    for placed in positioned(rows, config.gap, config.row_spacing()) {
        let source = match &placed.item.payload {
            Tile::Image(image) => Some(image.image_url.as_str()),
            Tile::Pending { .. } => None,
        };
        if let Some(row) = output.rows.get_mut(placed.row) {
            row.items.push(TileOutput {
                id: &placed.item.id,
                source,
                ratio: gallery.state().ratio(&placed.item.id),
                x: placed.rect.x,
                y: placed.rect.y,
                width: placed.rect.width,
                height: placed.rect.height,
            });
        }
    }

    serde_json::to_string_pretty(&output).context("Failed to serialize layout")
}

// =========================================================================
// columns
// =========================================================================

pub fn run_columns(value: Option<usize>, store: &PrefStore, config: &GalleryConfig) -> Result<String> {
    match value {
        Some(0) => bail!("Column count must be at least 1"),
        Some(columns) => {
            store
                .save(&Preferences { grid_columns: Some(columns) })
                .with_context(|| format!("Failed to save preferences: {}", store.path().display()))?;
            Ok(format!(
                "Saved {} columns (layout uses {})",
                columns,
                config.clamp_columns(columns)
            ))
        }
        None => {
            let saved = store
                .load()
                .with_context(|| format!("Failed to load preferences: {}", store.path().display()))?;
            let columns = saved
                .and_then(|p| p.grid_columns)
                .unwrap_or(config.default_columns);
            Ok(format!(
                "{} columns (layout uses {})",
                columns,
                config.clamp_columns(columns)
            ))
        }
    }
}
