//! The dialog controller: decides, per inbound request, whether to collect
//! missing input, perform a draw, repeat the last announcement, or reset
//! state, and applies the matching ledger mutations. Pure apart from the
//! injected randomness source; the engine supplies `now` and persists the
//! outcome.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::core::{sampler, speech};
use crate::domain::model::{
    DialogState, Directive, Ledger, LastActionKind, ResponseSpec, SkillRequest,
};
use crate::domain::ports::SkillSettings;
use crate::utils::error::{Result, SkillError};
use crate::utils::validation;

pub const WINNER_COUNT_SLOT: &str = "winnerCount";

/// What one turn decided: the response to render, and whether the ledger
/// mutation must be made durable before responding.
#[derive(Debug)]
pub struct Outcome {
    pub response: ResponseSpec,
    pub persist: bool,
}

impl Outcome {
    fn respond(response: ResponseSpec) -> Self {
        Self {
            response,
            persist: false,
        }
    }

    fn persist(response: ResponseSpec) -> Self {
        Self {
            response,
            persist: true,
        }
    }
}

enum Intent {
    DrawLots,
    No,
    Help,
    Stop,
    Other,
}

impl Intent {
    fn from_name(name: &str) -> Self {
        match name {
            "DrawLotsIntent" => Self::DrawLots,
            "AMAZON.NoIntent" => Self::No,
            "AMAZON.HelpIntent" => Self::Help,
            "AMAZON.CancelIntent" | "AMAZON.StopIntent" => Self::Stop,
            _ => Self::Other,
        }
    }
}

pub fn respond<C: SkillSettings, R: Rng>(
    settings: &C,
    ledger: &mut Ledger,
    request: &SkillRequest,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<Outcome> {
    match request {
        SkillRequest::Launch => Ok(launch(ledger)),
        SkillRequest::Intent {
            name,
            slots,
            dialog_state,
        } => match Intent::from_name(name) {
            Intent::DrawLots => draw_lots(settings, ledger, slots, *dialog_state, now, rng),
            Intent::No => Ok(negative_confirmation(ledger)),
            Intent::Help => Ok(help(settings)),
            Intent::Stop => Ok(stop()),
            Intent::Other => {
                tracing::debug!(intent = %name, "no handler for intent");
                Ok(Outcome::respond(fallback_response()))
            }
        },
        SkillRequest::SessionEnded { reason } => Ok(session_ended(reason.as_deref())),
    }
}

fn launch(ledger: &Ledger) -> Outcome {
    let applicant_count = ledger.pool().len();
    tracing::info!(applicant_count, "launch");
    Outcome::respond(
        ResponseSpec::speak(speech::launch_prompt(applicant_count))
            .with_reprompt(speech::start_reprompt()),
    )
}

fn draw_lots<C: SkillSettings, R: Rng>(
    settings: &C,
    ledger: &mut Ledger,
    slots: &std::collections::HashMap<String, String>,
    dialog_state: DialogState,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<Outcome> {
    if ledger.awaiting_repeat(now, settings.repeat_window()) {
        if let Ok(winners) = ledger.last_winners() {
            let winners = winners.to_vec();
            tracing::info!(?winners, "repeating last announcement");
            ledger.set_last_action(LastActionKind::Repeat, now);
            return Ok(Outcome::persist(
                ResponseSpec::speak(speech::winners_speech(&winners))
                    .with_reprompt(speech::repeat_reprompt()),
            ));
        }
        // Repeat flag without any history: fall through to a fresh draw.
    }

    new_draw(settings, ledger, slots, dialog_state, now, rng)
}

fn new_draw<C: SkillSettings, R: Rng>(
    settings: &C,
    ledger: &mut Ledger,
    slots: &std::collections::HashMap<String, String>,
    dialog_state: DialogState,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<Outcome> {
    if ledger.pool().is_empty() {
        tracing::info!("draw requested against an exhausted pool");
        return Ok(Outcome::respond(
            ResponseSpec::speak(speech::pool_exhausted()).with_reprompt(speech::start_reprompt()),
        ));
    }

    if dialog_state != DialogState::Completed {
        tracing::debug!(?dialog_state, "dialog incomplete, delegating slot collection");
        return Ok(Outcome::respond(
            ResponseSpec::empty().with_directive(Directive::DelegateDialog),
        ));
    }

    let raw = slots.get(WINNER_COUNT_SLOT).map(String::as_str);
    let count = match validation::parse_winner_count(raw, ledger.pool().len()) {
        Ok(count) => count,
        Err(SkillError::InvalidSlotValue { value, reason, .. }) => {
            tracing::debug!(%value, %reason, "re-prompting for winner count");
            let prompt = speech::elicit_count_prompt(ledger.pool().len());
            return Ok(Outcome::respond(
                ResponseSpec::speak(prompt.clone())
                    .with_reprompt(prompt)
                    .with_directive(Directive::ElicitSlot {
                        slot: WINNER_COUNT_SLOT.to_string(),
                    }),
            ));
        }
        Err(other) => return Err(other),
    };

    let (winners, remaining) = sampler::sample(rng, ledger.pool(), count);
    tracing::info!(?winners, remaining = remaining.len(), "draw complete");
    ledger.record_draw(winners.clone(), remaining, now);
    ledger.set_last_action(LastActionKind::Repeat, now);

    Ok(Outcome::persist(
        ResponseSpec::speak(speech::draw_announcement(&winners))
            .with_reprompt(speech::repeat_reprompt())
            .with_card(speech::winners_card(settings.skill_name(), &winners)),
    ))
}

fn negative_confirmation(ledger: &mut Ledger) -> Outcome {
    ledger.clear_last_action();
    Outcome::persist(ResponseSpec::speak(speech::closing_ack()).ending_session())
}

fn help<C: SkillSettings>(settings: &C) -> Outcome {
    Outcome::respond(
        ResponseSpec::speak(speech::help_speech(settings.skill_name()))
            .with_reprompt(speech::start_reprompt()),
    )
}

fn stop() -> Outcome {
    Outcome::respond(ResponseSpec::speak(speech::goodbye()).ending_session())
}

fn session_ended(reason: Option<&str>) -> Outcome {
    tracing::info!(reason = reason.unwrap_or("unknown"), "session ended");
    Outcome::respond(ResponseSpec::empty().ending_session())
}

/// Response for requests nothing else matched.
pub fn fallback_response() -> ResponseSpec {
    ResponseSpec::speak(speech::fallback_speech()).with_reprompt(speech::fallback_reprompt())
}

/// Generic apology used when a turn failed mid-flight, e.g. the save did not
/// go through. The session stays open.
pub fn recovery_response() -> ResponseSpec {
    ResponseSpec::speak(speech::recovery_speech()).with_reprompt(speech::fallback_reprompt())
}
