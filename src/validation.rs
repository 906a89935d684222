// src/validation.rs
//
// Input format validators used by the console and by Customer invariants

use regex::Regex;
use std::sync::OnceLock;

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[A-Za-z0-9+_.-]+@[^@\s]+\.[^@\s]+$").unwrap())
}

pub fn is_valid_email(value: &str) -> bool {
    email_pattern().is_match(value.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emails() {
        assert!(is_valid_email("MARY.SMITH@sakilacustomer.org"));
        assert!(is_valid_email("  linda.williams@sakilacustomer.org "));
        assert!(!is_valid_email("mary.smith"));
        assert!(!is_valid_email("mary@"));
        assert!(!is_valid_email("mary@@sakila.org"));
        assert!(!is_valid_email(""));
    }
}
