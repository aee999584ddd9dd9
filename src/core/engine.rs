use async_trait::async_trait;
use chrono::Utc;

use crate::core::dialog;
use crate::domain::model::{Ledger, ResponseSpec, SkillRequest};
use crate::domain::ports::{PersistenceGateway, RequestHandler, SkillSettings};
use crate::utils::error::Result;

/// Drives one conversation turn end to end: load the ledger, let the dialog
/// controller decide and mutate a working copy, persist at most once, then
/// hand the abstract response back to the caller.
pub struct SkillEngine<G: PersistenceGateway, C: SkillSettings> {
    gateway: G,
    settings: C,
}

impl<G: PersistenceGateway, C: SkillSettings> SkillEngine<G, C> {
    pub fn new(gateway: G, settings: C) -> Self {
        Self { gateway, settings }
    }

    async fn run_turn(&self, session_key: &str, request: &SkillRequest) -> Result<ResponseSpec> {
        let mut ledger = match self.gateway.load(session_key).await {
            Ok(Some(ledger)) => ledger,
            Ok(None) => {
                tracing::debug!(session_key, "no persisted ledger, starting fresh");
                Ledger::default()
            }
            // A failed load is treated as "no record": the turn proceeds on a
            // default ledger rather than failing the conversation.
            Err(error) => {
                tracing::warn!(%error, session_key, "ledger load failed, starting fresh");
                Ledger::default()
            }
        };
        ledger.ensure_defaults(self.settings.seed_applicants());

        let outcome = dialog::respond(
            &self.settings,
            &mut ledger,
            request,
            Utc::now(),
            &mut rand::thread_rng(),
        )?;

        if outcome.persist {
            self.gateway.save(session_key, &ledger).await?;
        }

        Ok(outcome.response)
    }
}

#[async_trait]
impl<G: PersistenceGateway, C: SkillSettings> RequestHandler for SkillEngine<G, C> {
    async fn handle(&self, session_key: &str, request: SkillRequest) -> Result<ResponseSpec> {
        match self.run_turn(session_key, &request).await {
            Ok(response) => Ok(response),
            // The mutation was not durably committed; apologize and leave the
            // previously persisted state in force.
            Err(error) => {
                tracing::error!(%error, session_key, "turn failed, sending apology");
                Ok(dialog::recovery_response())
            }
        }
    }
}
