use regex::Regex;
use scraper::ElementRef;
use std::sync::OnceLock;

/// Visible text of an element: all descendant text nodes, whitespace runs collapsed, trimmed.
pub fn element_text(el: ElementRef<'_>) -> String {
    let raw: String = el.text().collect();
    collapse_whitespace(&raw)
}

pub fn collapse_whitespace(raw: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\s+").unwrap());
    re.replace_all(raw.trim(), " ").into_owned()
}

/// Region heading text minus its label prefix ("Região Sul" -> "Sul").
pub fn region_name(heading: &str, prefix: &str) -> String {
    let heading = heading.trim();
    heading
        .strip_prefix(prefix)
        .unwrap_or(heading)
        .trim()
        .to_string()
}
