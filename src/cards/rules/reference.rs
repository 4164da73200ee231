/// Jurisdictions where Black and White holders may neither reside nor shop.
pub const BANNED_COUNTRIES: [&str; 4] = ["China", "Vietnam", "India", "Iran"];

/// Exact, case-sensitive membership test against [`BANNED_COUNTRIES`].
pub fn is_banned_country(country: &str) -> bool {
    BANNED_COUNTRIES.contains(&country)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_is_exact() {
        assert!(is_banned_country("Vietnam"));
        assert!(!is_banned_country("vietnam"));
        assert!(!is_banned_country(" Iran"));
        assert!(!is_banned_country("USA"));
    }
}
