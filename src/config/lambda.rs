use crate::config::{DEFAULT_REPEAT_WINDOW_SECS, DEFAULT_SEED_APPLICANTS, DEFAULT_SKILL_NAME};
use crate::domain::model::{ApplicantId, Ledger};
use crate::domain::ports::{PersistenceGateway, SkillSettings};
use crate::utils::error::{Result, SkillError};
use crate::utils::validation::{self, Validate};
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoClient;
use chrono::Duration;
use std::env;

#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub skill_name: String,
    pub table_name: String,
    pub seed_applicants: Vec<ApplicantId>,
    pub repeat_window_secs: u64,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        let seed_applicants = match env::var("SEED_APPLICANTS") {
            Ok(raw) => parse_applicant_list(&raw)?,
            Err(_) => DEFAULT_SEED_APPLICANTS.to_vec(),
        };

        Ok(Self {
            skill_name: env::var("SKILL_NAME").unwrap_or_else(|_| DEFAULT_SKILL_NAME.to_string()),
            table_name: env::var("TABLE_NAME").unwrap_or_else(|_| "LotteryTable".to_string()),
            seed_applicants,
            repeat_window_secs: env::var("REPEAT_WINDOW_SECS")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(DEFAULT_REPEAT_WINDOW_SECS),
        })
    }
}

fn parse_applicant_list(raw: &str) -> Result<Vec<ApplicantId>> {
    raw.split(',')
        .map(|part| {
            part.trim()
                .parse()
                .map_err(|_| SkillError::InvalidConfigValueError {
                    field: "SEED_APPLICANTS".to_string(),
                    value: part.trim().to_string(),
                    reason: "Applicant identifiers must be whole numbers".to_string(),
                })
        })
        .collect()
}

impl SkillSettings for LambdaConfig {
    fn skill_name(&self) -> &str {
        &self.skill_name
    }

    fn seed_applicants(&self) -> &[ApplicantId] {
        &self.seed_applicants
    }

    fn repeat_window(&self) -> Duration {
        Duration::seconds(self.repeat_window_secs as i64)
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("SKILL_NAME", &self.skill_name)?;
        validation::validate_non_empty_string("TABLE_NAME", &self.table_name)?;
        validation::validate_seed_applicants("SEED_APPLICANTS", &self.seed_applicants)?;
        validation::validate_repeat_window("REPEAT_WINDOW_SECS", self.repeat_window_secs)?;
        Ok(())
    }
}

/// DynamoDB-backed persistence: one item per session key, with the ledger
/// serialized into a single document attribute (partition key `id`,
/// document attribute `attributes`).
#[derive(Debug, Clone)]
pub struct DynamoGateway {
    client: DynamoClient,
    table_name: String,
}

impl DynamoGateway {
    pub fn new(client: DynamoClient, table_name: String) -> Self {
        Self { client, table_name }
    }
}

impl PersistenceGateway for DynamoGateway {
    async fn load(&self, session_key: &str) -> Result<Option<Ledger>> {
        let resp = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(session_key.to_string()))
            .send()
            .await
            .map_err(|error| SkillError::PersistenceError {
                message: format!("DynamoDB get_item failed: {error}"),
            })?;

        let Some(item) = resp.item else {
            return Ok(None);
        };
        match item.get("attributes") {
            Some(AttributeValue::S(payload)) => Ok(Some(serde_json::from_str(payload)?)),
            _ => Ok(None),
        }
    }

    async fn save(&self, session_key: &str, ledger: &Ledger) -> Result<()> {
        let payload = serde_json::to_string(ledger)?;
        self.client
            .put_item()
            .table_name(&self.table_name)
            .item("id", AttributeValue::S(session_key.to_string()))
            .item("attributes", AttributeValue::S(payload))
            .send()
            .await
            .map_err(|error| SkillError::PersistenceError {
                message: format!("DynamoDB put_item failed: {error}"),
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applicant_list_parses_and_rejects_garbage() {
        assert_eq!(parse_applicant_list("1, 2,3").unwrap(), vec![1, 2, 3]);
        assert!(parse_applicant_list("1,two").is_err());
    }
}
