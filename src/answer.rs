//! Answer assembly and plain-text presentation.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::pipeline::PipelineResult;

/// Marker appended to a shortened excerpt.
const ELLIPSIS: char = '…';

/// Combine an answer body with its source and metadata lines.
pub fn assemble(
    body: &str,
    source_url: Option<&str>,
    content_length: usize,
    retrieved_at: DateTime<Utc>,
) -> String {
    let timestamp = retrieved_at.to_rfc3339_opts(SecondsFormat::Secs, true);
    match source_url {
        Some(url) => format!(
            "{}\n\nSource: {url}\nExtracted {content_length} characters | Retrieved {timestamp}",
            body.trim()
        ),
        None => format!(
            "{}\n\nSource: none (general knowledge)\nAnswered {timestamp}",
            body.trim()
        ),
    }
}

/// First `max_chars` characters of `text`, cut back to a word boundary
/// when one is near, with an ellipsis when anything was dropped.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let Some((end, _)) = text.char_indices().nth(max_chars) else {
        return text.to_owned();
    };
    let head = &text[..end];
    // Only back off to whitespace within the last fifth of the excerpt.
    let floor = head.len() - head.len() / 5;
    let cut = match head.rfind(char::is_whitespace) {
        Some(space) if space >= floor => &head[..space],
        _ => head,
    };
    let mut out = cut.trim_end().to_owned();
    out.push(ELLIPSIS);
    out
}

/// Human-readable rendering for terminals.
pub fn render_text(result: &PipelineResult) -> String {
    match result {
        PipelineResult::Success { answer, .. } => answer.clone(),
        PipelineResult::Failure { reason, message } => format!("[{reason}] {message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::FailureReason;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap()
    }

    #[test]
    fn assemble_with_source() {
        let text = assemble(
            "  IIT Bombay is a public university.\n",
            Some("https://www.iitb.ac.in/"),
            512,
            fixed_time(),
        );
        assert_eq!(
            text,
            "IIT Bombay is a public university.\n\n\
             Source: https://www.iitb.ac.in/\n\
             Extracted 512 characters | Retrieved 2025-03-01T12:30:00Z"
        );
    }

    #[test]
    fn assemble_without_source() {
        let text = assemble("General answer.", None, 0, fixed_time());
        assert!(text.contains("Source: none (general knowledge)"));
        assert!(text.ends_with("Answered 2025-03-01T12:30:00Z"));
    }

    #[test]
    fn short_text_excerpt_is_unchanged() {
        assert_eq!(excerpt("short text", 100), "short text");
    }

    #[test]
    fn long_text_excerpt_breaks_on_word() {
        let text = "alpha beta gamma delta epsilon";
        // 20 chars: "alpha beta gamma del" -> back off to "alpha beta gamma".
        assert_eq!(excerpt(text, 20), "alpha beta gamma…");
    }

    #[test]
    fn excerpt_without_nearby_space_cuts_hard() {
        let text = "a ".to_owned() + &"x".repeat(50);
        let out = excerpt(&text, 20);
        assert_eq!(out.chars().count(), 21);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn excerpt_counts_characters_not_bytes() {
        let text = "é".repeat(30);
        let out = excerpt(&text, 10);
        assert_eq!(out, format!("{}…", "é".repeat(10)));
    }

    #[test]
    fn render_failure_includes_reason() {
        let result = PipelineResult::Failure {
            reason: FailureReason::NoSourceFound,
            message: "Nothing found.".into(),
        };
        assert_eq!(render_text(&result), "[no source found] Nothing found.");
    }
}
