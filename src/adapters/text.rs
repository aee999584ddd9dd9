use crate::domain::model::{Segment, Speech};

/// Flattens a speech description to plain text, dropping pacing markers.
pub fn render(speech: &Speech) -> String {
    let mut out = String::new();
    render_segments(&mut out, &speech.segments);
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn render_segments(out: &mut String, segments: &[Segment]) {
    for segment in segments {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Pause { .. } => out.push(' '),
            Segment::Emphasized(inner) => render_segments(out, inner),
        }
    }
}
