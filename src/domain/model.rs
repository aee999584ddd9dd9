use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::error::{Result, SkillError};

pub type ApplicantId = u32;

/// One completed draw: the instant it happened and who won, in draw order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerRecord {
    pub timestamp: DateTime<Utc>,
    pub winners: Vec<ApplicantId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LastActionKind {
    #[serde(rename = "NONE")]
    None,
    #[serde(rename = "REPEAT")]
    Repeat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastAction {
    pub kind: LastActionKind,
    pub timestamp: DateTime<Utc>,
}

impl Default for LastAction {
    fn default() -> Self {
        Self {
            kind: LastActionKind::None,
            timestamp: DateTime::UNIX_EPOCH,
        }
    }
}

/// The persisted aggregate for one session key: remaining applicant pool,
/// append-only winner history, and the last-action marker that drives the
/// repeat window.
///
/// `applicants` stays `None` until the first turn initializes it from the
/// seed configuration, so a record that has never drawn is distinguishable
/// from one whose pool was legitimately emptied by draws.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub applicants: Option<Vec<ApplicantId>>,
    #[serde(default)]
    pub winner_history: Vec<WinnerRecord>,
    #[serde(default)]
    pub last_action: LastAction,
}

impl Ledger {
    pub fn ensure_defaults(&mut self, seed: &[ApplicantId]) {
        if self.applicants.is_none() {
            self.applicants = Some(seed.to_vec());
        }
    }

    pub fn pool(&self) -> &[ApplicantId] {
        self.applicants.as_deref().unwrap_or(&[])
    }

    /// Commits a sampler result: the drawn winners join the history and the
    /// surviving applicants replace the pool. Both happen together so a
    /// persisted ledger never holds a half-applied draw.
    pub fn record_draw(
        &mut self,
        winners: Vec<ApplicantId>,
        remaining: Vec<ApplicantId>,
        now: DateTime<Utc>,
    ) {
        self.applicants = Some(remaining);
        self.winner_history.push(WinnerRecord {
            timestamp: now,
            winners,
        });
    }

    pub fn set_last_action(&mut self, kind: LastActionKind, now: DateTime<Utc>) {
        self.last_action = LastAction {
            kind,
            timestamp: now,
        };
    }

    pub fn clear_last_action(&mut self) {
        self.last_action = LastAction::default();
    }

    pub fn last_winners(&self) -> Result<&[ApplicantId]> {
        self.winner_history
            .last()
            .map(|record| record.winners.as_slice())
            .ok_or(SkillError::EmptyHistory)
    }

    /// True while the most recent announcement is still eligible for a
    /// re-read: the last action was an announcement, it happened within the
    /// repeat window, and there is a history entry to read back.
    pub fn awaiting_repeat(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.last_action.kind == LastActionKind::Repeat
            && now - self.last_action.timestamp <= window
            && !self.winner_history.is_empty()
    }
}

/// Host-reported dialog collection state for multi-slot intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DialogState {
    Started,
    InProgress,
    Completed,
}

/// Inbound request, already stripped of transport framing by the host.
#[derive(Debug, Clone)]
pub enum SkillRequest {
    Launch,
    Intent {
        name: String,
        slots: std::collections::HashMap<String, String>,
        dialog_state: DialogState,
    },
    SessionEnded {
        reason: Option<String>,
    },
}

/// A piece of spoken output. Pacing and emphasis are expressed abstractly;
/// each presentation adapter renders them in its own dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Pause { seconds: u32 },
    Emphasized(Vec<Segment>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Speech {
    pub segments: Vec<Segment>,
}

impl Speech {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new().text(text)
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.segments.push(Segment::Text(text.into()));
        self
    }

    pub fn pause_secs(mut self, seconds: u32) -> Self {
        self.segments.push(Segment::Pause { seconds });
        self
    }

    pub fn emphasized(mut self, inner: Speech) -> Self {
        self.segments.push(Segment::Emphasized(inner.segments));
        self
    }

    pub fn append(mut self, mut other: Speech) -> Self {
        self.segments.append(&mut other.segments);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub body: String,
}

/// Host directives asking the platform to keep collecting dialog input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    DelegateDialog,
    ElicitSlot { slot: String },
}

/// Abstract description of one response turn. Presentation adapters turn
/// this into a platform response object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseSpec {
    pub speech: Option<Speech>,
    pub reprompt: Option<Speech>,
    pub card: Option<Card>,
    pub directive: Option<Directive>,
    pub end_session: bool,
}

impl ResponseSpec {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn speak(speech: Speech) -> Self {
        Self {
            speech: Some(speech),
            ..Self::default()
        }
    }

    pub fn with_reprompt(mut self, reprompt: Speech) -> Self {
        self.reprompt = Some(reprompt);
        self
    }

    pub fn with_card(mut self, card: Card) -> Self {
        self.card = Some(card);
        self
    }

    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directive = Some(directive);
        self
    }

    pub fn ending_session(mut self) -> Self {
        self.end_session = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::UNIX_EPOCH + Duration::days(20_000)
    }

    #[test]
    fn ensure_defaults_initializes_missing_pool_only() {
        let mut ledger = Ledger::default();
        ledger.ensure_defaults(&[1, 2, 3]);
        assert_eq!(ledger.pool(), &[1, 2, 3]);

        // An emptied pool is a real state and must not be re-seeded.
        ledger.applicants = Some(vec![]);
        ledger.ensure_defaults(&[1, 2, 3]);
        assert!(ledger.pool().is_empty());
    }

    #[test]
    fn record_draw_partitions_the_pool() {
        let mut ledger = Ledger::default();
        ledger.ensure_defaults(&[1, 2, 3, 4, 5]);
        ledger.record_draw(vec![2, 4], vec![1, 3, 5], now());

        assert_eq!(ledger.pool(), &[1, 3, 5]);
        assert_eq!(ledger.winner_history.len(), 1);
        assert_eq!(ledger.last_winners().unwrap(), &[2, 4]);

        let mut all: Vec<_> = ledger.pool().to_vec();
        all.extend(&ledger.winner_history[0].winners);
        all.sort_unstable();
        assert_eq!(all, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn last_winners_fails_on_empty_history() {
        let ledger = Ledger::default();
        assert!(matches!(
            ledger.last_winners(),
            Err(SkillError::EmptyHistory)
        ));
    }

    #[test]
    fn awaiting_repeat_honors_window_and_history() {
        let window = Duration::seconds(60);
        let mut ledger = Ledger::default();
        ledger.ensure_defaults(&[1, 2]);

        // Flag set but nothing was ever drawn: not repeatable.
        ledger.set_last_action(LastActionKind::Repeat, now());
        assert!(!ledger.awaiting_repeat(now(), window));

        ledger.record_draw(vec![1], vec![2], now());
        ledger.set_last_action(LastActionKind::Repeat, now());
        assert!(ledger.awaiting_repeat(now() + Duration::seconds(60), window));
        assert!(!ledger.awaiting_repeat(now() + Duration::seconds(61), window));

        ledger.clear_last_action();
        assert!(!ledger.awaiting_repeat(now(), window));
        assert_eq!(ledger.last_action, LastAction::default());
    }

    #[test]
    fn ledger_roundtrips_through_json() {
        let mut ledger = Ledger::default();
        ledger.ensure_defaults(&[1, 2, 3]);
        ledger.record_draw(vec![3], vec![1, 2], now());
        ledger.set_last_action(LastActionKind::Repeat, now());

        let json = serde_json::to_string(&ledger).unwrap();
        assert!(json.contains("\"REPEAT\""));
        let back: Ledger = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ledger);
    }

    #[test]
    fn legacy_record_without_pool_deserializes() {
        let ledger: Ledger = serde_json::from_str("{}").unwrap();
        assert!(ledger.applicants.is_none());
        assert!(ledger.winner_history.is_empty());
        assert_eq!(ledger.last_action, LastAction::default());
    }
}
