use uuid::Uuid;

/// Checks the basic `local@domain.tld` shape: no whitespace, exactly one
/// non-empty local part, and a domain with a non-empty host and TLD.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Parses a path/body identifier in the canonical 8-4-4-4-12 hyphenated hex
/// form. Hex digits are accepted case-insensitively. Anything else is rejected
/// before the store is touched.
pub fn parse_id(raw: &str) -> Option<Uuid> {
    let bytes = raw.as_bytes();
    if bytes.len() != 36 {
        return None;
    }
    for (i, &b) in bytes.iter().enumerate() {
        match i {
            8 | 13 | 18 | 23 => {
                if b != b'-' {
                    return None;
                }
            }
            _ => {
                if !b.is_ascii_hexdigit() {
                    return None;
                }
            }
        }
    }
    Uuid::parse_str(raw).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        assert!(is_valid_email("jo@x.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));
    }

    #[test]
    fn test_email_missing_at() {
        assert!(!is_valid_email("jox.com"));
    }

    #[test]
    fn test_email_missing_tld() {
        assert!(!is_valid_email("jo@x"));
    }

    #[test]
    fn test_email_empty_local_part() {
        assert!(!is_valid_email("@x.com"));
    }

    #[test]
    fn test_email_with_whitespace() {
        assert!(!is_valid_email("jo e@x.com"));
    }

    #[test]
    fn test_email_double_at() {
        assert!(!is_valid_email("jo@@x.com"));
    }

    #[test]
    fn test_email_empty_tld() {
        assert!(!is_valid_email("jo@x."));
    }

    #[test]
    fn test_parse_id_canonical() {
        let id = parse_id("550e8400-e29b-41d4-a716-446655440000");
        assert!(id.is_some());
    }

    #[test]
    fn test_parse_id_uppercase_hex_accepted() {
        assert!(parse_id("550E8400-E29B-41D4-A716-446655440000").is_some());
    }

    #[test]
    fn test_parse_id_rejects_simple_form() {
        // Undashed UUIDs parse with the uuid crate but are not canonical here.
        assert!(parse_id("550e8400e29b41d4a716446655440000").is_none());
    }

    #[test]
    fn test_parse_id_rejects_bad_length() {
        assert!(parse_id("550e8400-e29b-41d4-a716").is_none());
    }

    #[test]
    fn test_parse_id_rejects_non_hex() {
        assert!(parse_id("550e8400-e29b-41d4-a716-44665544zzzz").is_none());
    }

    #[test]
    fn test_parse_id_rejects_misplaced_dashes() {
        assert!(parse_id("550e84-00e29b-41d4-a716-446655440000").is_none());
    }
}
