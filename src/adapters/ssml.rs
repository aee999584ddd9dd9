use crate::domain::model::{Segment, Speech};

/// Renders a speech description as an SSML document.
pub fn render(speech: &Speech) -> String {
    let mut out = String::from("<speak>");
    render_segments(&mut out, &speech.segments);
    out.push_str("</speak>");
    out
}

fn render_segments(out: &mut String, segments: &[Segment]) {
    for segment in segments {
        match segment {
            Segment::Text(text) => out.push_str(&escape(text)),
            Segment::Pause { seconds } => {
                out.push_str(&format!("<break time=\"{seconds}s\"/>"));
            }
            Segment::Emphasized(inner) => {
                out.push_str("<prosody volume=\"x-loud\">");
                render_segments(out, inner);
                out.push_str("</prosody>");
            }
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
