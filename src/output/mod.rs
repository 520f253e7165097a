// Output formatting — terminal display and heatmap generation.

pub mod html;
pub mod terminal;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing, this respects UTF-8 character boundaries and will
/// never panic on multi-byte characters in incident descriptions.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate_chars("ROBBERY", 20), "ROBBERY");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate_chars("BURGLARY FROM VEHICLE", 8), "BURGLARY...");
    }

    #[test]
    fn test_truncate_multibyte_safe() {
        let text = "café déjà vu";
        let out = truncate_chars(text, 5);
        assert_eq!(out, "café ...");
    }
}
