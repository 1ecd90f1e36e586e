use std::fs;
use std::path::Path;

use anyhow::{Context, bail};
use verso_types::{BatchStatus, TextEntry};

use crate::state::AppState;

fn print_entry(entry: &TextEntry) {
    let tag = entry
        .tag
        .as_deref()
        .map(|tag| format!(" [{tag}]"))
        .unwrap_or_default();
    if entry.is_translated() {
        println!("{}{}: {} => {}", entry.id, tag, entry.original_text, entry.translated_text);
    } else {
        println!("{}{}: {}", entry.id, tag, entry.original_text);
    }
}

pub async fn list(state: &AppState, search: Option<&str>) -> anyhow::Result<()> {
    let entries = match search {
        Some(term) => state.memory.search(term).await,
        None => state.memory.entries().await,
    };

    if entries.is_empty() {
        println!("No entries.");
    }
    for entry in &entries {
        print_entry(entry);
    }

    Ok(())
}

pub async fn translate(state: &AppState) -> anyhow::Result<()> {
    let batch = state.memory.untranslated().await;
    if batch.is_empty() {
        println!("No new text to translate or all texts already have translations.");
        return Ok(());
    }

    let response = state
        .batch
        .request_batch_translation(&state.memory, &state.resources, &batch)
        .await;

    match response.status {
        BatchStatus::Success => {
            println!("{}", response.message.unwrap_or_default());
            Ok(())
        }
        BatchStatus::Error => bail!(
            "translation request failed: {}",
            response.error.unwrap_or_default()
        ),
    }
}

pub async fn remove_last(state: &AppState) -> anyhow::Result<()> {
    match state.memory.remove_last().await? {
        Some(entry) => println!("Removed {}: {}", entry.id, entry.original_text),
        None => println!("No copy to delete."),
    }
    Ok(())
}

pub async fn clear(state: &AppState) -> anyhow::Result<()> {
    let len = state.memory.len().await;
    state.memory.clear().await?;
    println!("Cleared {len} entries.");
    Ok(())
}

pub async fn set_mode(state: &AppState, active: Option<bool>) -> anyhow::Result<()> {
    let active = match active {
        Some(active) => active,
        None => !state.memory.mode_active().await,
    };
    state.memory.set_mode_active(active).await?;
    println!("Translation mode {}.", if active { "on" } else { "off" });
    Ok(())
}

pub async fn set_tags(state: &AppState, enabled: bool) -> anyhow::Result<()> {
    state.memory.set_tags_enabled(enabled).await?;
    println!("Entry tags {}.", if enabled { "on" } else { "off" });
    Ok(())
}

pub async fn export(state: &AppState, output: Option<&Path>) -> anyhow::Result<()> {
    let json = state.memory.export_json().await?;
    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
            println!("Exported to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Replace the whole collection with the entries in `file`
pub async fn import(state: &AppState, file: &Path) -> anyhow::Result<()> {
    let data =
        fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;
    let entries: Vec<TextEntry> = serde_json::from_str(&data)
        .with_context(|| format!("{} must contain a list of entries", file.display()))?;

    let len = entries.len();
    state.memory.replace_all(entries).await?;
    println!("Imported {len} entries.");
    Ok(())
}
