use chrono::DateTime;
use lottery_skill::adapters::text;
use lottery_skill::core::dialog;
use lottery_skill::domain::model::{
    DialogState, Directive, LastActionKind, Ledger, SkillRequest,
};
use lottery_skill::domain::ports::PersistenceGateway;
use lottery_skill::utils::error::{Result, SkillError};
use lottery_skill::{CliConfig, RequestHandler, SkillEngine};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone, Default)]
struct MemoryGateway {
    records: Arc<Mutex<HashMap<String, Ledger>>>,
}

impl MemoryGateway {
    async fn get(&self, session_key: &str) -> Option<Ledger> {
        self.records.lock().await.get(session_key).cloned()
    }

    async fn put(&self, session_key: &str, ledger: Ledger) {
        self.records
            .lock()
            .await
            .insert(session_key.to_string(), ledger);
    }
}

impl PersistenceGateway for MemoryGateway {
    async fn load(&self, session_key: &str) -> Result<Option<Ledger>> {
        Ok(self.records.lock().await.get(session_key).cloned())
    }

    async fn save(&self, session_key: &str, ledger: &Ledger) -> Result<()> {
        self.records
            .lock()
            .await
            .insert(session_key.to_string(), ledger.clone());
        Ok(())
    }
}

struct FailingSaveGateway;

impl PersistenceGateway for FailingSaveGateway {
    async fn load(&self, _session_key: &str) -> Result<Option<Ledger>> {
        Ok(None)
    }

    async fn save(&self, _session_key: &str, _ledger: &Ledger) -> Result<()> {
        Err(SkillError::PersistenceError {
            message: "table unavailable".to_string(),
        })
    }
}

fn settings() -> CliConfig {
    CliConfig {
        request: "launch".to_string(),
        winner_count: None,
        session_key: "test-session".to_string(),
        store_path: "./unused".to_string(),
        config: None,
        applicants: vec![],
        repeat_window_secs: 60,
        skill_name: "Lottery Skill".to_string(),
        verbose: false,
    }
}

fn draw_request(count: &str) -> SkillRequest {
    let mut slots = HashMap::new();
    slots.insert("winnerCount".to_string(), count.to_string());
    SkillRequest::Intent {
        name: "DrawLotsIntent".to_string(),
        slots,
        dialog_state: DialogState::Completed,
    }
}

fn intent(name: &str) -> SkillRequest {
    SkillRequest::Intent {
        name: name.to_string(),
        slots: HashMap::new(),
        dialog_state: DialogState::Completed,
    }
}

#[tokio::test]
async fn first_request_initializes_the_seed_pool() {
    let gateway = MemoryGateway::default();
    let engine = SkillEngine::new(gateway.clone(), settings());

    let response = engine.handle("user-1", SkillRequest::Launch).await.unwrap();

    let spoken = text::render(response.speech.as_ref().unwrap());
    assert!(spoken.contains("There are 10 applicants"), "got: {spoken}");
    // Launch never mutates, so nothing was persisted.
    assert!(gateway.get("user-1").await.is_none());
}

#[tokio::test]
async fn launch_is_idempotent_after_a_draw() {
    let gateway = MemoryGateway::default();
    let engine = SkillEngine::new(gateway.clone(), settings());

    engine.handle("user-1", draw_request("3")).await.unwrap();
    let stored = gateway.get("user-1").await.unwrap();

    for _ in 0..3 {
        engine.handle("user-1", SkillRequest::Launch).await.unwrap();
    }

    assert_eq!(gateway.get("user-1").await.unwrap(), stored);
}

#[tokio::test]
async fn drawing_three_winners_from_the_seed_pool() {
    let gateway = MemoryGateway::default();
    let engine = SkillEngine::new(gateway.clone(), settings());

    let response = engine.handle("user-1", draw_request("3")).await.unwrap();

    let stored = gateway.get("user-1").await.unwrap();
    assert_eq!(stored.pool().len(), 7);
    assert_eq!(stored.winner_history.len(), 1);
    let winners = &stored.winner_history[0].winners;
    assert_eq!(winners.len(), 3);
    assert!(winners.iter().all(|w| (1..=10).contains(w)));
    assert_eq!(stored.last_action.kind, LastActionKind::Repeat);

    let card = response.card.unwrap();
    assert!(card.body.starts_with("Winners: "));
    let spoken = text::render(response.speech.as_ref().unwrap());
    assert!(spoken.contains("I repeat."));
}

#[tokio::test]
async fn immediate_follow_up_repeats_without_a_new_draw() {
    let gateway = MemoryGateway::default();
    let engine = SkillEngine::new(gateway.clone(), settings());

    engine.handle("user-1", draw_request("3")).await.unwrap();
    let winners_before = gateway.get("user-1").await.unwrap().winner_history[0]
        .winners
        .clone();

    // Within the repeat window even an incomplete draw request re-announces.
    let response = engine
        .handle(
            "user-1",
            SkillRequest::Intent {
                name: "DrawLotsIntent".to_string(),
                slots: HashMap::new(),
                dialog_state: DialogState::Started,
            },
        )
        .await
        .unwrap();

    let stored = gateway.get("user-1").await.unwrap();
    assert_eq!(stored.pool().len(), 7);
    assert_eq!(stored.winner_history.len(), 1);
    assert_eq!(stored.winner_history[0].winners, winners_before);
    assert!(response.card.is_none());
    let spoken = text::render(response.speech.as_ref().unwrap());
    assert!(spoken.contains("The winners are"));
}

#[tokio::test]
async fn invalid_counts_never_touch_the_store() {
    for raw in ["0", "eleven", "-3", "99"] {
        let gateway = MemoryGateway::default();
        let engine = SkillEngine::new(gateway.clone(), settings());

        let response = engine.handle("user-1", draw_request(raw)).await.unwrap();

        assert!(
            gateway.get("user-1").await.is_none(),
            "count {raw:?} must not persist"
        );
        assert_eq!(
            response.directive,
            Some(Directive::ElicitSlot {
                slot: "winnerCount".to_string()
            })
        );
    }
}

#[tokio::test]
async fn overdraw_against_a_depleted_pool_reprompts() {
    let gateway = MemoryGateway::default();
    // A previous lifetime drew seven of the ten; the repeat window is long
    // expired.
    let mut ledger = Ledger::default();
    ledger.ensure_defaults(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    ledger.record_draw(
        vec![4, 5, 6, 7, 8, 9, 10],
        vec![1, 2, 3],
        DateTime::UNIX_EPOCH,
    );
    ledger.set_last_action(LastActionKind::Repeat, DateTime::UNIX_EPOCH);
    gateway.put("user-1", ledger.clone()).await;

    let engine = SkillEngine::new(gateway.clone(), settings());
    let response = engine.handle("user-1", draw_request("5")).await.unwrap();

    assert_eq!(gateway.get("user-1").await.unwrap(), ledger);
    assert_eq!(
        response.directive,
        Some(Directive::ElicitSlot {
            slot: "winnerCount".to_string()
        })
    );
    let spoken = text::render(response.speech.as_ref().unwrap());
    assert!(spoken.contains("3 applicants remain"), "got: {spoken}");
}

#[tokio::test]
async fn negative_confirmation_resets_the_repeat_state() {
    let gateway = MemoryGateway::default();
    let engine = SkillEngine::new(gateway.clone(), settings());

    engine.handle("user-1", draw_request("3")).await.unwrap();
    let response = engine
        .handle("user-1", intent("AMAZON.NoIntent"))
        .await
        .unwrap();

    let stored = gateway.get("user-1").await.unwrap();
    assert_eq!(stored.last_action.kind, LastActionKind::None);
    assert_eq!(stored.last_action.timestamp, DateTime::UNIX_EPOCH);
    assert_eq!(stored.pool().len(), 7);
    assert_eq!(stored.winner_history.len(), 1);
    assert!(response.end_session);
}

#[tokio::test]
async fn help_and_stop_leave_the_store_untouched() {
    let gateway = MemoryGateway::default();
    let engine = SkillEngine::new(gateway.clone(), settings());

    engine.handle("user-1", draw_request("2")).await.unwrap();
    let stored = gateway.get("user-1").await.unwrap();

    engine
        .handle("user-1", intent("AMAZON.HelpIntent"))
        .await
        .unwrap();
    engine
        .handle("user-1", intent("AMAZON.StopIntent"))
        .await
        .unwrap();
    engine
        .handle(
            "user-1",
            SkillRequest::SessionEnded {
                reason: Some("USER_INITIATED".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(gateway.get("user-1").await.unwrap(), stored);
}

#[tokio::test]
async fn sessions_are_isolated_by_key() {
    let gateway = MemoryGateway::default();
    let engine = SkillEngine::new(gateway.clone(), settings());

    engine.handle("alice", draw_request("3")).await.unwrap();
    engine.handle("bob", draw_request("5")).await.unwrap();

    assert_eq!(gateway.get("alice").await.unwrap().pool().len(), 7);
    assert_eq!(gateway.get("bob").await.unwrap().pool().len(), 5);
}

#[tokio::test]
async fn failed_save_surfaces_an_apology() {
    let engine = SkillEngine::new(FailingSaveGateway, settings());

    let response = engine.handle("user-1", draw_request("3")).await.unwrap();

    assert_eq!(response, dialog::recovery_response());
    assert!(!response.end_session);
}
