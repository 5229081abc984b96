//! Quote sequence loading
//!
//! The rotation content arrives as one block of prose; sentences split on
//! terminal punctuation become the ordered sequence the narrator walks.

/// Split `source` into quotes on sentence-terminal punctuation, keeping the
/// terminator. Whitespace-only and punctuation-only fragments are dropped.
pub fn parse_quotes(source: &str) -> Vec<String> {
    let mut quotes = Vec::new();
    let mut current = String::new();

    for ch in source.chars() {
        current.push(ch);
        if matches!(ch, '.' | '!' | '?' | '…') {
            push_fragment(&mut quotes, &current);
            current.clear();
        }
    }
    // A trailing unterminated sentence still counts
    push_fragment(&mut quotes, &current);

    quotes
}

fn push_fragment(quotes: &mut Vec<String>, fragment: &str) {
    let trimmed = fragment.trim();
    if trimmed.chars().any(char::is_alphanumeric) {
        quotes.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_terminal_punctuation() {
        let quotes = parse_quotes("Il silenzio parla. L'eleganza risiede nella semplicità! Dove?");
        assert_eq!(
            quotes,
            vec![
                "Il silenzio parla.",
                "L'eleganza risiede nella semplicità!",
                "Dove?",
            ]
        );
    }

    #[test]
    fn test_trims_and_drops_empty_fragments() {
        let quotes = parse_quotes("  Prima frase.   \n\n  Seconda frase.  ... ");
        assert_eq!(quotes, vec!["Prima frase.", "Seconda frase."]);
    }

    #[test]
    fn test_keeps_unterminated_tail() {
        let quotes = parse_quotes("Una frase. E un finale senza punto");
        assert_eq!(quotes, vec!["Una frase.", "E un finale senza punto"]);
    }

    #[test]
    fn test_empty_source() {
        assert!(parse_quotes("").is_empty());
        assert!(parse_quotes("  \n ").is_empty());
    }
}
