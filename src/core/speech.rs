//! Assembly of the abstract spoken responses. Pacing and emphasis are kept
//! as segments; adapters decide the concrete markup dialect.

use crate::domain::model::{ApplicantId, Card, Speech};

pub fn launch_prompt(applicant_count: usize) -> Speech {
    Speech::plain(format!(
        "There are {applicant_count} applicants in the pool. Shall I start the draw?"
    ))
}

pub fn start_reprompt() -> Speech {
    Speech::plain("Shall I start the draw?")
}

fn winner_list(winners: &[ApplicantId]) -> Speech {
    let mut speech = Speech::new();
    for (i, winner) in winners.iter().enumerate() {
        if i > 0 {
            speech = speech.pause_secs(1).text(", ");
        }
        speech = speech.text(winner.to_string());
    }
    speech
}

fn announcement_once(winners: &[ApplicantId]) -> Speech {
    Speech::new().emphasized(
        Speech::new()
            .text("The winners are, ")
            .pause_secs(1)
            .append(winner_list(winners))
            .pause_secs(1)
            .text("."),
    )
}

/// The emphasized winner read-out, spoken twice so a missed name can still
/// be caught.
pub fn winners_speech(winners: &[ApplicantId]) -> Speech {
    announcement_once(winners)
        .pause_secs(1)
        .text("I repeat. ")
        .append(announcement_once(winners))
}

/// Announcement for a fresh draw: a suspense pause, then the read-out.
pub fn draw_announcement(winners: &[ApplicantId]) -> Speech {
    Speech::new()
        .text("Drawing now. ")
        .pause_secs(3)
        .text("The draw is complete. Announcing the winners. ")
        .append(winners_speech(winners))
        .text(" ")
        .append(repeat_reprompt())
}

pub fn repeat_reprompt() -> Speech {
    Speech::plain("Shall I read the winners again?")
}

pub fn winners_card(skill_name: &str, winners: &[ApplicantId]) -> Card {
    let list = winners
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    Card {
        title: skill_name.to_string(),
        body: format!("Winners: {list}"),
    }
}

pub fn elicit_count_prompt(pool_size: usize) -> Speech {
    Speech::plain(format!(
        "How many winners should I draw? {pool_size} applicants remain."
    ))
}

pub fn pool_exhausted() -> Speech {
    Speech::plain("There are no applicants left in the pool.")
}

pub fn help_speech(skill_name: &str) -> Speech {
    Speech::plain(format!("This is {skill_name}. Shall I start the draw?"))
}

pub fn closing_ack() -> Speech {
    Speech::plain("Okay.")
}

pub fn goodbye() -> Speech {
    Speech::plain("Goodbye.")
}

pub fn fallback_speech() -> Speech {
    Speech::plain("Sorry, I didn't catch that.")
}

pub fn fallback_reprompt() -> Speech {
    Speech::plain("Could you say that again, please?")
}

pub fn recovery_speech() -> Speech {
    Speech::plain("Sorry, something went wrong. Please try again.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Segment;

    #[test]
    fn winners_speech_reads_the_list_twice() {
        let speech = winners_speech(&[3, 7]);

        let emphasized = speech
            .segments
            .iter()
            .filter(|segment| matches!(segment, Segment::Emphasized(_)))
            .count();
        assert_eq!(emphasized, 2);
    }

    #[test]
    fn draw_announcement_opens_with_a_suspense_pause() {
        let speech = draw_announcement(&[1]);
        assert!(matches!(
            speech.segments[1],
            Segment::Pause { seconds: 3 }
        ));
    }

    #[test]
    fn card_lists_winners_in_draw_order() {
        let card = winners_card("Lottery Skill", &[9, 2, 5]);
        assert_eq!(card.title, "Lottery Skill");
        assert_eq!(card.body, "Winners: 9, 2, 5");
    }
}
