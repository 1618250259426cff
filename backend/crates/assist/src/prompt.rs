//! Prompt Templates
//!
//! Prompt construction for the assist endpoints and the Markdown
//! framing applied to upstream responses.

/// Assist flavor requested by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistKind {
    Hint,
    Debug,
    Explain,
}

impl AssistKind {
    /// Parse the wire value; unknown values yield None
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "hint" => Some(AssistKind::Hint),
            "debug" => Some(AssistKind::Debug),
            "explain" => Some(AssistKind::Explain),
            _ => None,
        }
    }

    /// Emoji prefix for the formatted response
    pub fn emoji(&self) -> &'static str {
        match self {
            AssistKind::Hint => "💡",
            AssistKind::Debug => "🔍",
            AssistKind::Explain => "📚",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssistKind::Hint => "hint",
            AssistKind::Debug => "debug",
            AssistKind::Explain => "explain",
        }
    }
}

/// Tutor system prompt shared by every assist flavor
pub fn system_prompt(language: &str) -> String {
    format!(
        "You are an expert programming tutor helping students learn {language}. \
         Be encouraging, clear, and educational. Keep responses concise (under \
         200 words). Never give complete solutions; guide students to discover \
         answers themselves."
    )
}

/// Build the user message for an assist request
///
/// An unrecognized flavor falls back to the hint template.
pub fn build_assist_message(
    kind: Option<AssistKind>,
    challenge: &str,
    code: &str,
    language: &str,
) -> String {
    match kind {
        Some(AssistKind::Debug) => format!(
            "I'm stuck on this {language} code for \"{challenge}\":\n\n\
             ```{language}\n{code}\n```\n\n\
             Help me debug this. Tell me:\n\
             1. What error or issue you see\n\
             2. Why it's happening\n\
             3. How to fix it (general guidance, not exact code)"
        ),
        Some(AssistKind::Explain) => format!(
            "Explain the programming concept of \"{challenge}\" in {language}.\n\n\
             Context, here's what I'm working with:\n\n\
             ```{language}\n{code}\n```\n\n\
             Make it beginner-friendly with:\n\
             1. What this concept does\n\
             2. Why it's useful\n\
             3. A simple analogy or example"
        ),
        Some(AssistKind::Hint) | None => format!(
            "I'm learning {language} and working on: \"{challenge}\".\n\n\
             My current code:\n\
             ```{language}\n{code}\n```\n\n\
             Give me a helpful hint to move forward (not the complete solution). Focus on:\n\
             1. What I should think about next\n\
             2. A small step to try\n\
             3. A programming concept to remember"
        ),
    }
}

/// Build the user message for a code explanation request
pub fn build_explain_message(code: &str, language: &str) -> String {
    format!("Please explain this {language} code in simple terms:\n\n```{language}\n{code}\n```")
}

/// Frame the upstream response with the flavor's emoji and a
/// capitalized label
///
/// Unrecognized flavors get the generic robot emoji but keep their
/// caller-supplied label.
pub fn format_response(use_case: &str, text: &str) -> String {
    let emoji = AssistKind::parse(use_case).map_or("🤖", |k| k.emoji());
    let label = capitalize(use_case);
    format!("{emoji} **AI {label}**:\n\n{text}")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kinds() {
        assert_eq!(AssistKind::parse("hint"), Some(AssistKind::Hint));
        assert_eq!(AssistKind::parse("debug"), Some(AssistKind::Debug));
        assert_eq!(AssistKind::parse("explain"), Some(AssistKind::Explain));
        assert_eq!(AssistKind::parse("other"), None);
    }

    #[test]
    fn test_format_response() {
        let formatted = format_response("hint", "Try a loop.");
        assert_eq!(formatted, "💡 **AI Hint**:\n\nTry a loop.");

        let unknown = format_response("review", "Looks fine.");
        assert_eq!(unknown, "🤖 **AI Review**:\n\nLooks fine.");
    }

    #[test]
    fn test_assist_message_falls_back_to_hint() {
        let message = build_assist_message(None, "fizzbuzz", "let x = 1;", "rust");
        assert!(message.contains("helpful hint"));
        assert!(message.contains("```rust\nlet x = 1;\n```"));
    }

    #[test]
    fn test_debug_message_names_challenge() {
        let message = build_assist_message(
            Some(AssistKind::Debug),
            "linked lists",
            "let x = 1;",
            "rust",
        );
        assert!(message.contains("debug"));
        assert!(message.contains("\"linked lists\""));
    }

    #[test]
    fn test_explain_message_fences_code() {
        let message = build_explain_message("print('hi')", "python");
        assert!(message.contains("python code"));
        assert!(message.contains("```python\nprint('hi')\n```"));
    }
}
