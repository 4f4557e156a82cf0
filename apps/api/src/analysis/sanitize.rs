//! Input and output text hygiene for the analysis pipeline.
//!
//! Input side: strip the "Resume:" marker and note-to-model lines, then cap
//! the length. Output side: drop prompt-echo lines from the match result.

/// Appended when the resume text is cut at `MAX_RESUME_CHARS`.
pub const TRUNCATION_MARKER: &str = "... [Content truncated for analysis]";

/// Hard cap on resume characters forwarded to the generation API.
pub const MAX_RESUME_CHARS: usize = 3000;

/// Line prefixes the model tends to echo back from the match prompt.
/// Matched case-insensitively at line start after leading whitespace.
/// Keep in sync with `MATCH_PROMPT_TEMPLATE` wording.
pub const MATCH_ECHO_PREFIXES: &[&str] = &[
    "you are an expert resume reviewer",
    "given the following resume",
    "respond with a match percentage",
    "do not provide detailed feedback yet",
    "resume:",
    "do not repeat this prompt",
];

/// Strips everything up to and including the first literal "Resume:" marker,
/// then drops any line starting with "note to model" (case-insensitive).
pub fn prepare_resume_text(text: &str) -> String {
    let content = match text.find("Resume:") {
        Some(idx) => text[idx + "Resume:".len()..].trim(),
        None => text,
    };

    content
        .lines()
        .filter(|line| !starts_with_ignore_case(line, "note to model"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cuts `text` to `MAX_RESUME_CHARS` characters and appends the marker.
/// Counts characters, not bytes, so multi-byte content never splits a code
/// point. Text at or under the cap passes through untouched.
pub fn truncate_for_analysis(text: &str) -> String {
    if text.chars().count() > MAX_RESUME_CHARS {
        let cut: String = text.chars().take(MAX_RESUME_CHARS).collect();
        format!("{cut}{TRUNCATION_MARKER}")
    } else {
        text.to_string()
    }
}

/// Drops match-result lines that echo the prompt, rejoins, and trims.
/// Idempotent: a filtered result passes through unchanged.
pub fn sanitize_match_result(raw: &str) -> String {
    raw.lines()
        .filter(|line| {
            !MATCH_ECHO_PREFIXES
                .iter()
                .any(|prefix| starts_with_ignore_case(line, prefix))
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn starts_with_ignore_case(line: &str, prefix: &str) -> bool {
    line.trim_start()
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
