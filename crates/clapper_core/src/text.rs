//! Helpers for LLM text output.

/// Extract items from a numbered or bulleted list.
///
/// Keeps lines starting with a digit or `-`, strips the leading marker
/// characters (digits, `.`, `-`, `)` and spaces) and drops empty results.
///
/// ```
/// use clapper_core::parse_numbered_list;
///
/// let text = "Here you go:\n1. Storm over the plains\n2) Bridge at dawn\n- Shardblade gleam\n";
/// assert_eq!(
///     parse_numbered_list(text),
///     vec!["Storm over the plains", "Bridge at dawn", "Shardblade gleam"]
/// );
/// ```
pub fn parse_numbered_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| {
            line.chars()
                .next()
                .is_some_and(|c| c.is_ascii_digit() || c == '-')
        })
        .map(|line| {
            line.trim_start_matches(|c: char| c.is_ascii_digit() || matches!(c, '.' | '-' | ')' | ' '))
                .trim()
                .to_string()
        })
        .filter(|item| !item.is_empty())
        .collect()
}
