use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use promptkeep_core::store_keys;
use promptkeep_history::HistorySettings;
use promptkeep_page::SendIntentVocabulary;
use promptkeep_page::intent::DEFAULT_SEND_INTENT;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptkeepConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    /// Button-label fragments that mark a click as "send". Added in v1.
    #[serde(default = "default_vocabulary")]
    pub send_intent_vocabulary: Vec<String>,
    #[serde(default = "jiff::Timestamp::now")]
    pub created_at: jiff::Timestamp,
}

impl Default for PromptkeepConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            store_path: default_store_path(),
            max_entries: default_max_entries(),
            send_intent_vocabulary: default_vocabulary(),
            created_at: jiff::Timestamp::now(),
        }
    }
}

impl PromptkeepConfig {
    pub fn vocabulary(&self) -> SendIntentVocabulary {
        SendIntentVocabulary::new(&self.send_intent_vocabulary)
    }

    pub fn history_settings(&self) -> HistorySettings {
        HistorySettings {
            key: store_keys::PROMPTS.to_string(),
            max_entries: self.max_entries,
        }
    }
}

fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("promptkeep")
        .join("store.json")
}

fn default_max_entries() -> usize {
    store_keys::DEFAULT_MAX_ENTRIES
}

fn default_vocabulary() -> Vec<String> {
    DEFAULT_SEND_INTENT.iter().map(|t| t.to_string()).collect()
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("promptkeep"))
}

pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Load the user config, or defaults when none has been saved.
pub fn load_config() -> eyre::Result<PromptkeepConfig> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(path: &Path) -> eyre::Result<PromptkeepConfig> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(PromptkeepConfig::default());
        }
        Err(e) => {
            return Err(eyre::eyre!(
                "failed to read config at {}: {e}",
                path.display()
            ));
        }
    };

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: PromptkeepConfig = serde_json::from_value(migrated)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &PromptkeepConfig) -> eyre::Result<()> {
    if config.max_entries == 0 {
        return Err(eyre::eyre!("max_entries must be at least 1"));
    }
    Ok(())
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update promptkeep."
        ));
    }

    // v0 → v1: add send_intent_vocabulary with the built-in terms
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("send_intent_vocabulary")
            .or_insert_with(|| serde_json::json!(default_vocabulary()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added send_intent_vocabulary)");
    }

    Ok(json)
}

pub fn save_config(config: &PromptkeepConfig) -> eyre::Result<()> {
    save_config_to(config, &config_path()?)
}

pub fn save_config_to(config: &PromptkeepConfig, path: &Path) -> eyre::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
