use chrono::Utc;

// @module: Small text and timestamp helpers

/// Capitalize each whitespace-separated word: first letter uppercased, the
/// rest lowercased, words re-joined with single spaces.
pub fn capitalize_words(text: &str) -> String {
    text.split_whitespace()
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}

/// Batch creation timestamp in the TiddlyWiki `created` field format:
/// UTC YYYYMMDDHHMMSS plus a fixed 000 millisecond suffix.
pub fn export_timestamp() -> String {
    format!("{}000", Utc::now().format("%Y%m%d%H%M%S"))
}
