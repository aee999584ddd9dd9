pub mod dialog;
pub mod engine;
pub mod sampler;
pub mod speech;

pub use crate::domain::model::{
    ApplicantId, Card, DialogState, Directive, Ledger, LastAction, LastActionKind, ResponseSpec,
    Segment, SkillRequest, Speech, WinnerRecord,
};
pub use crate::domain::ports::{PersistenceGateway, RequestHandler, SkillSettings};
pub use crate::utils::error::Result;
pub use engine::SkillEngine;
