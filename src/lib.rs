pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::{CliConfig, FileGateway};

#[cfg(feature = "lambda")]
pub use crate::config::lambda::{DynamoGateway, LambdaConfig};

pub use crate::config::toml_config::TomlConfig;
pub use crate::core::engine::SkillEngine;
pub use crate::domain::model::{Ledger, ResponseSpec, SkillRequest};
pub use crate::domain::ports::{PersistenceGateway, RequestHandler, SkillSettings};
pub use crate::utils::error::{Result, SkillError};
