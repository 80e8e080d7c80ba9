/// Splits a raw input line into its lower-cased command name and the trimmed
/// remainder.
///
/// Leading and trailing whitespace is dropped and the name ends at the first
/// run of whitespace. Normalizing `"name remainder"` again yields the same pair.
pub fn normalize(raw: &str) -> (String, String) {
    let line = raw.trim();
    match line.split_once(char::is_whitespace) {
        Some((name, remainder)) => (name.to_lowercase(), remainder.trim().to_string()),
        None => (line.to_lowercase(), String::new()),
    }
}

/// The line handed to a command's parser.
pub(crate) fn parser_line(name: &str, remainder: &str) -> String {
    format!("{} {}", name, remainder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_folds() {
        assert_eq!(
            normalize("  Run   Away  \n"),
            ("run".to_string(), "Away".to_string())
        );
    }

    #[test]
    fn test_normalize_without_arguments() {
        assert_eq!(normalize("HELP\n"), ("help".to_string(), String::new()));
        assert_eq!(normalize("   \n"), (String::new(), String::new()));
    }

    #[test]
    fn test_normalize_keeps_inner_remainder_spacing() {
        let (name, remainder) = normalize("ban\tnotch  for  griefing \r\n");
        assert_eq!(name, "ban");
        assert_eq!(remainder, "notch  for  griefing");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let (name, remainder) = normalize("  Run   Away  \n");
        let again = normalize(&parser_line(&name, &remainder));
        assert_eq!(again, (name, remainder));
    }
}
