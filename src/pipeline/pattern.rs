/// Characters escaped in node names before they are placed in a pattern.
pub const SPECIAL_CHARS: &str = r"\.^$*+?{}[]()|-";

/// Escape every regex metacharacter in `name` with a backslash.
pub fn escape_regex(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    for c in name.chars() {
        if SPECIAL_CHARS.contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn alternation<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(|name| escape_regex(name.as_ref()))
        .collect::<Vec<_>>()
        .join("|")
}

/// `(name1|name2|...)`, or an empty string when there are no names.
pub fn build_regex_pattern<S: AsRef<str>>(names: &[S]) -> String {
    if names.is_empty() {
        return String::new();
    }
    format!("({})", alternation(names))
}

/// Region selector that matches `keyword` case-insensitively while rejecting
/// any of the `excluded` names.
///
/// With nothing to exclude this is the bare `(?i)<keyword>` match.
pub fn build_exclusion_pattern<S: AsRef<str>>(excluded: &[S], keyword: &str) -> String {
    if excluded.is_empty() {
        return format!("(?i){}", keyword);
    }
    format!("^(?!.*{}).*(?i){}", build_regex_pattern(excluded), keyword)
}
