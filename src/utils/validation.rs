use crate::domain::model::ApplicantId;
use crate::utils::error::{Result, SkillError};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_seed_applicants(field_name: &str, applicants: &[ApplicantId]) -> Result<()> {
    if applicants.is_empty() {
        return Err(SkillError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: String::new(),
            reason: "Applicant pool cannot be empty".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for applicant in applicants {
        if !seen.insert(applicant) {
            return Err(SkillError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: applicant.to_string(),
                reason: "Applicant identifiers must be unique".to_string(),
            });
        }
    }

    Ok(())
}

pub fn validate_repeat_window(field_name: &str, seconds: u64) -> Result<()> {
    if seconds == 0 || seconds > 3600 {
        return Err(SkillError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: seconds.to_string(),
            reason: "Repeat window must be between 1 and 3600 seconds".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SkillError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Parses the raw winner-count slot value and bounds it against the remaining
/// pool. Drawing more winners than applicants remain is undefined for the
/// sampler, so an oversized count is rejected here like any other bad value.
pub fn parse_winner_count(raw: Option<&str>, pool_size: usize) -> Result<usize> {
    let invalid = |value: &str, reason: &str| SkillError::InvalidSlotValue {
        slot: "winnerCount".to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let raw = raw.ok_or_else(|| invalid("", "Slot value is missing"))?;

    let count: usize = raw
        .trim()
        .parse()
        .map_err(|_| invalid(raw, "Not a whole number"))?;

    if count < 1 {
        return Err(invalid(raw, "Winner count must be at least 1"));
    }
    if count > pool_size {
        return Err(invalid(raw, "Winner count exceeds the remaining pool"));
    }

    Ok(count)
}
