//! Mapping between the voice platform's JSON envelope and the core
//! request/response model. Pure serde types, shared by the Lambda binary and
//! its tests.

use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::adapters::ssml;
use crate::domain::model::{DialogState, Directive, ResponseSpec, SkillRequest, Speech};

#[derive(Debug, Deserialize)]
pub struct RequestEnvelope {
    pub session: Option<Session>,
    pub request: Request,
}

#[derive(Debug, Deserialize)]
pub struct Session {
    pub user: Option<User>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    #[serde(rename = "LaunchRequest")]
    Launch,
    #[serde(rename = "IntentRequest", rename_all = "camelCase")]
    Intent {
        intent: IntentPayload,
        dialog_state: Option<DialogState>,
    },
    #[serde(rename = "SessionEndedRequest")]
    SessionEnded { reason: Option<String> },
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Deserialize)]
pub struct IntentPayload {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

#[derive(Debug, Deserialize)]
pub struct Slot {
    pub value: Option<String>,
}

impl RequestEnvelope {
    /// The persistence identity for this request: the platform user id.
    pub fn session_key(&self) -> Option<&str> {
        self.session
            .as_ref()
            .and_then(|session| session.user.as_ref())
            .map(|user| user.user_id.as_str())
    }

    /// Maps the envelope onto the core request model. `None` means the
    /// request type itself was unrecognized.
    pub fn to_skill_request(&self) -> Option<SkillRequest> {
        match &self.request {
            Request::Launch => Some(SkillRequest::Launch),
            Request::Intent {
                intent,
                dialog_state,
            } => {
                let slots = intent
                    .slots
                    .iter()
                    .filter_map(|(name, slot)| {
                        slot.value.clone().map(|value| (name.clone(), value))
                    })
                    .collect();
                Some(SkillRequest::Intent {
                    name: intent.name.clone(),
                    slots,
                    dialog_state: dialog_state.unwrap_or(DialogState::Completed),
                })
            }
            Request::SessionEnded { reason } => Some(SkillRequest::SessionEnded {
                reason: reason.clone(),
            }),
            Request::Unrecognized => None,
        }
    }
}

fn ssml_output(speech: &Speech) -> Value {
    json!({ "type": "SSML", "ssml": ssml::render(speech) })
}

fn directive_value(directive: &Directive) -> Value {
    match directive {
        Directive::DelegateDialog => json!({ "type": "Dialog.Delegate" }),
        Directive::ElicitSlot { slot } => {
            json!({ "type": "Dialog.ElicitSlot", "slotToElicit": slot })
        }
    }
}

/// Renders the abstract response description as a platform response object.
pub fn render_response(spec: &ResponseSpec) -> Value {
    let mut response = serde_json::Map::new();

    if let Some(speech) = &spec.speech {
        response.insert("outputSpeech".to_string(), ssml_output(speech));
    }
    if let Some(reprompt) = &spec.reprompt {
        response.insert(
            "reprompt".to_string(),
            json!({ "outputSpeech": ssml_output(reprompt) }),
        );
    }
    if let Some(card) = &spec.card {
        response.insert(
            "card".to_string(),
            json!({ "type": "Simple", "title": card.title, "content": card.body }),
        );
    }
    if let Some(directive) = &spec.directive {
        response.insert(
            "directives".to_string(),
            Value::Array(vec![directive_value(directive)]),
        );
    }
    response.insert("shouldEndSession".to_string(), json!(spec.end_session));

    json!({ "version": "1.0", "response": Value::Object(response) })
}
