#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod toml_config;

use crate::domain::model::ApplicantId;

// Process-wide defaults; overridable through CLI flags, a TOML file, or
// Lambda environment variables, never through persisted state.
pub const DEFAULT_SEED_APPLICANTS: [ApplicantId; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
pub const DEFAULT_REPEAT_WINDOW_SECS: u64 = 60;
pub const DEFAULT_SKILL_NAME: &str = "Lottery Skill";
