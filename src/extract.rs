/// Token and delimiter sets vary between anchor-file revisions, so they are
/// carried as data rather than hard-coded in the splitting logic.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    pub status_tokens: Vec<String>,
    pub delimiters: Vec<char>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            status_tokens: vec![
                "מתקשה מאוד".to_string(),
                "מתקשה".to_string(),
                "כן".to_string(),
                "לא".to_string(),
                "לא ידוע".to_string(),
            ],
            delimiters: vec!['-', '–', '—', ':', ';'],
        }
    }
}

pub fn is_status_token(fragment: &str, cfg: &ExtractConfig) -> bool {
    let t = fragment.trim();
    cfg.status_tokens.iter().any(|tok| tok == t)
}

pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

// List-style cells carry bullets that the delimiter split doesn't consume.
fn strip_bullets(s: &str) -> &str {
    s.trim_start_matches(|c: char| c == '•' || c == '*' || c.is_whitespace())
}

/// Returns the first descriptive fragment of a status cell, or `None` when
/// the cell holds nothing beyond status tokens.
pub fn extract_description(raw: &str, cfg: &ExtractConfig) -> Option<String> {
    let fragments = raw.split(|c: char| c == '\n' || c == '\r' || cfg.delimiters.contains(&c));
    for fragment in fragments {
        let fragment = collapse_whitespace(strip_bullets(fragment));
        if fragment.is_empty() || is_status_token(&fragment, cfg) {
            continue;
        }
        return Some(fragment);
    }
    None
}
