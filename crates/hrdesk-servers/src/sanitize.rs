use once_cell::sync::Lazy;
use regex::Regex;

// Anything but word characters, whitespace and hyphens
static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").expect("valid regex"));

/// Strip the punctuation LLMs tend to add around names (`Alice,` or `"Bob"`)
///
/// Returns `None` when nothing usable is left.
pub fn clean_employee_name(raw: &str) -> Option<String> {
    let cleaned = PUNCTUATION.replace_all(raw, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}
