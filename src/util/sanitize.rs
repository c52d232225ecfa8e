use regex::Regex;
use std::sync::LazyLock;

// CSI sequences (ESC[ ... cmd); covers the styling/movement codes feeds could smuggle in.
static CSI: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\x1B\[[0-9;?]*[ -/]*[@-~]").ok());

/// Makes untrusted feed text safe for a terminal: strips ANSI escapes and
/// control characters, folds line breaks into spaces, caps the length.
pub fn sanitize_for_terminal(s: &str) -> String {
    let no_ansi = match CSI.as_ref() {
        Some(r) => r.replace_all(s, "").into_owned(),
        None => s.to_string(),
    };

    let cleaned: String = no_ansi
        .chars()
        .map(|ch| if matches!(ch, '\n' | '\r' | '\t') { ' ' } else { ch })
        .filter(|ch| !ch.is_control())
        .collect();

    // 200 chars keeps one story on a line or two
    cleaned.trim().chars().take(200).collect()
}
