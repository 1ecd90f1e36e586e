use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use verso_config::Config;

fn verso_root() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("verso")
}

fn profiles_dir() -> PathBuf {
    verso_root().join("profiles")
}

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

fn read_profile(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read profile {}", path.display()))?;
    let profile: Profile = serde_json::from_str(&data)
        .with_context(|| format!("invalid profile {}", path.display()))?;
    Ok(profile.value)
}

/// Load a user profile by name, falling back to main, then to environment defaults
pub fn load_user_profile(name: &str) -> anyhow::Result<Config> {
    let profile_file = profiles_dir().join(format!("{name}.json"));
    if profile_file.exists() {
        tracing::info!("Loading profile {}", profile_file.display());
        return read_profile(&profile_file);
    }

    let main_file = profiles_dir().join("main.json");
    if name != "main" && main_file.exists() {
        tracing::warn!("Profile {name} not found, falling back to main profile");
        return read_profile(&main_file);
    }

    tracing::debug!("No profile found, using environment defaults");
    Ok(Config::new())
}

/// Write the effective config as a named profile
pub fn save_profile(name: &str, config: &Config) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(profiles_dir())?;

    let profile = Profile {
        name: name.into(),
        value: config.clone(),
    };
    let file = profiles_dir().join(format!("{name}.json"));
    fs::write(&file, serde_json::to_string_pretty(&profile)?)?;
    tracing::info!("Saved profile: {name}");
    Ok(file)
}
