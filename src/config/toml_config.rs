use crate::config::DEFAULT_REPEAT_WINDOW_SECS;
use crate::domain::model::ApplicantId;
use crate::domain::ports::SkillSettings;
use crate::utils::error::{Result, SkillError};
use crate::utils::validation::{self, Validate};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File-based skill settings, for deployments that version the seed pool
/// alongside the code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub skill: SkillSection,
    pub draw: DrawSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillSection {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawSection {
    pub applicants: Vec<ApplicantId>,
    pub repeat_window_secs: Option<u64>,
}

impl TomlConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|error| SkillError::ConfigError {
            message: format!("Failed to parse {}: {}", path.display(), error),
        })
    }

    fn window_secs(&self) -> u64 {
        self.draw
            .repeat_window_secs
            .unwrap_or(DEFAULT_REPEAT_WINDOW_SECS)
    }
}

impl SkillSettings for TomlConfig {
    fn skill_name(&self) -> &str {
        &self.skill.name
    }

    fn seed_applicants(&self) -> &[ApplicantId] {
        &self.draw.applicants
    }

    fn repeat_window(&self) -> Duration {
        Duration::seconds(self.window_secs() as i64)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("skill.name", &self.skill.name)?;
        validation::validate_seed_applicants("draw.applicants", &self.draw.applicants)?;
        validation::validate_repeat_window("draw.repeat_window_secs", self.window_secs())?;
        Ok(())
    }
}
