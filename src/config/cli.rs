use crate::config::{DEFAULT_REPEAT_WINDOW_SECS, DEFAULT_SEED_APPLICANTS, DEFAULT_SKILL_NAME};
use crate::domain::model::{ApplicantId, Ledger};
use crate::domain::ports::{PersistenceGateway, SkillSettings};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use chrono::Duration;
use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "lottery-skill")]
#[command(about = "Runs one conversation turn of the lottery-drawing skill")]
pub struct CliConfig {
    /// Request to dispatch: launch, draw, no, help, stop or end
    #[arg(long, default_value = "launch")]
    pub request: String,

    /// Winner count for a draw request
    #[arg(long)]
    pub winner_count: Option<u32>,

    #[arg(long, default_value = "local-session")]
    pub session_key: String,

    /// Directory holding one JSON ledger per session key
    #[arg(long, default_value = "./lottery-sessions")]
    pub store_path: String,

    /// TOML settings file; overrides the flags below
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, value_delimiter = ',')]
    pub applicants: Vec<ApplicantId>,

    #[arg(long, default_value_t = DEFAULT_REPEAT_WINDOW_SECS)]
    pub repeat_window_secs: u64,

    #[arg(long, default_value = DEFAULT_SKILL_NAME)]
    pub skill_name: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl SkillSettings for CliConfig {
    fn skill_name(&self) -> &str {
        &self.skill_name
    }

    fn seed_applicants(&self) -> &[ApplicantId] {
        if self.applicants.is_empty() {
            &DEFAULT_SEED_APPLICANTS
        } else {
            &self.applicants
        }
    }

    fn repeat_window(&self) -> Duration {
        Duration::seconds(self.repeat_window_secs as i64)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("skill_name", &self.skill_name)?;
        validation::validate_non_empty_string("session_key", &self.session_key)?;
        validation::validate_seed_applicants("applicants", self.seed_applicants())?;
        validation::validate_repeat_window("repeat_window_secs", self.repeat_window_secs)?;
        Ok(())
    }
}

/// Persistence gateway for local runs: one JSON file per session key.
#[derive(Debug, Clone)]
pub struct FileGateway {
    base_path: PathBuf,
}

impl FileGateway {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn ledger_path(&self, session_key: &str) -> PathBuf {
        // Session keys come from the host and may contain path-hostile
        // characters.
        let safe: String = session_key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        self.base_path.join(format!("{safe}.json"))
    }
}

impl PersistenceGateway for FileGateway {
    async fn load(&self, session_key: &str) -> Result<Option<Ledger>> {
        let path = self.ledger_path(session_key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    async fn save(&self, session_key: &str, ledger: &Ledger) -> Result<()> {
        let path = self.ledger_path(session_key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_vec_pretty(ledger)?;
        fs::write(&path, payload)?;
        Ok(())
    }
}
