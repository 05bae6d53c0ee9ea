use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use dirs::home_dir;

use crate::errors::FormError;

const DEFAULT_DIR_NAME: &str = ".venture_form";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Limits and defaults that shape validation and rendering of the group form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub max_tags: usize,
    pub max_tag_len: usize,
    pub min_trip_name_len: usize,
    pub min_destination_len: usize,
    pub min_description_len: usize,
    pub min_meeting_point_len: usize,
    pub default_age_min: u32,
    pub default_age_max: u32,
    /// Path fragment that marks a page as editing an existing group.
    pub edit_path_marker: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            max_tags: 10,
            max_tag_len: 20,
            min_trip_name_len: 3,
            min_destination_len: 2,
            min_description_len: 10,
            min_meeting_point_len: 5,
            default_age_min: 18,
            default_age_max: 60,
            edit_path_marker: "/editar/".into(),
        }
    }
}

impl FormConfig {
    pub fn validate(&self) -> Result<(), FormError> {
        if self.max_tags == 0 {
            return Err(FormError::Config("max_tags must be at least 1".into()));
        }
        if self.max_tag_len == 0 {
            return Err(FormError::Config("max_tag_len must be at least 1".into()));
        }
        if self.default_age_min > self.default_age_max {
            return Err(FormError::Config(format!(
                "default age range is inverted ({} > {})",
                self.default_age_min, self.default_age_max
            )));
        }
        if self.edit_path_marker.trim().is_empty() {
            return Err(FormError::Config("edit_path_marker cannot be empty".into()));
        }
        Ok(())
    }
}

/// Returns the application data directory, defaulting to `~/.venture_form`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("VENTURE_FORM_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        Self {
            path: base.join(CONFIG_FILE),
        }
    }

    /// Loads the config file, falling back to defaults when it does not exist.
    pub fn load(&self) -> Result<FormConfig, FormError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(FormConfig::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: FormConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &FormConfig) -> Result<(), FormError> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), FormError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
