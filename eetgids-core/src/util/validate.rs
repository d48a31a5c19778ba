pub fn is_valid_email(email: &str) -> bool {
    fast_chemail::is_valid_email(email)
}

pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Trims the input and maps blank strings to `None`.
pub fn non_blank(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_test() {
        assert!(!is_valid_email("foo"));
        assert!(!is_valid_email("foo@bar"));
        assert!(is_valid_email("foo@bar.nl"));
        assert!(is_valid_email("info@de-gouden-lepel.nl"));
    }

    #[test]
    fn blank_strings() {
        assert!(is_blank(""));
        assert!(is_blank(" \t\n"));
        assert!(!is_blank(" x "));
        assert_eq!(None, non_blank(Some("  ".into())));
        assert_eq!(Some("x".to_string()), non_blank(Some(" x ".into())));
        assert_eq!(None, non_blank(None));
    }
}
