use crate::domain::model::{ApplicantId, Ledger, ResponseSpec, SkillRequest};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::Duration;

/// Keyed load/save of the persisted ledger. `load` returns `Ok(None)` when no
/// record exists for the key; the engine substitutes a fresh default.
pub trait PersistenceGateway: Send + Sync {
    fn load(
        &self,
        session_key: &str,
    ) -> impl std::future::Future<Output = Result<Option<Ledger>>> + Send;
    fn save(
        &self,
        session_key: &str,
        ledger: &Ledger,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Process-wide skill configuration. Not persisted; changes only by
/// redeployment.
pub trait SkillSettings: Send + Sync {
    fn skill_name(&self) -> &str;
    fn seed_applicants(&self) -> &[ApplicantId];
    fn repeat_window(&self) -> Duration;
}

#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn handle(&self, session_key: &str, request: SkillRequest) -> Result<ResponseSpec>;
}
