use rand::Rng;

pub const SHORT_ID_LENGTH: usize = 6;
pub const SHORT_ID_ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Top-level route segments. A short ID equal to one of these would be
/// shadowed by the route and could never be resolved.
const RESERVED: &[&str] = &[
    "admin",
    "new",
    "logout",
    "delete",
    "shorten",
    "loginadmin",
];

/// Generates a random short ID: `SHORT_ID_LENGTH` characters drawn uniformly
/// from `[a-z0-9]`. No uniqueness check is made against stored links.
#[must_use]
pub fn generate_short_id() -> String {
    let mut rng = rand::thread_rng();
    loop {
        let id: String = (0..SHORT_ID_LENGTH)
            .map(|_| SHORT_ID_ALPHABET[rng.gen_range(0..SHORT_ID_ALPHABET.len())] as char)
            .collect();
        if !is_reserved(&id) {
            return id;
        }
    }
}

#[must_use]
pub fn is_reserved(segment: &str) -> bool {
    RESERVED.contains(&segment)
}

/// Returns true if `s` has the shape of a generated short ID.
#[must_use]
pub fn is_well_formed(s: &str) -> bool {
    s.len() == SHORT_ID_LENGTH && s.bytes().all(|b| SHORT_ID_ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_short_id_format() {
        for _ in 0..1000 {
            let id = generate_short_id();
            assert_eq!(id.len(), 6);
            assert!(is_well_formed(&id), "bad short id: {id}");
        }
    }

    #[test]
    fn test_short_id_never_reserved() {
        for _ in 0..1000 {
            assert!(!is_reserved(&generate_short_id()));
        }
    }

    #[test]
    fn test_reserved_matches_route_segments() {
        for segment in ["admin", "new", "logout", "delete", "shorten", "loginadmin"] {
            assert!(is_reserved(segment), "{segment}");
        }
        assert!(!is_reserved("static"));
        assert!(!is_reserved("abc123"));
    }

    #[test]
    fn test_short_ids_vary() {
        let ids: HashSet<String> = (0..100).map(|_| generate_short_id()).collect();
        assert!(ids.len() > 90);
    }

    #[test]
    fn test_alphabet_coverage() {
        let mut seen = HashSet::new();
        for _ in 0..2000 {
            seen.extend(generate_short_id().bytes());
        }
        assert_eq!(seen.len(), SHORT_ID_ALPHABET.len());
    }

    #[test]
    fn test_is_well_formed() {
        assert!(is_well_formed("a1b2c3"));
        assert!(!is_well_formed("A1B2C3"));
        assert!(!is_well_formed("abc"));
        assert!(!is_well_formed("abc-12"));
        assert!(!is_well_formed("abcdefg"));
    }
}
