//! Version - Crate version triple, read from the package manifest.

pub const MAJOR: &str = env!("CARGO_PKG_VERSION_MAJOR");
pub const MINOR: &str = env!("CARGO_PKG_VERSION_MINOR");
pub const TINY: &str = env!("CARGO_PKG_VERSION_PATCH");
pub const PRE: Option<&str> = match env!("CARGO_PKG_VERSION_PRE").as_bytes() {
    [] => None,
    _ => Some(env!("CARGO_PKG_VERSION_PRE")),
};

/// Dotted version string.
pub const STRING: &str = env!("CARGO_PKG_VERSION");

pub fn string() -> &'static str {
    STRING
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_matches_triple() {
        let mut expected = format!("{MAJOR}.{MINOR}.{TINY}");
        if let Some(pre) = PRE {
            expected.push('-');
            expected.push_str(pre);
        }
        assert_eq!(string(), expected);
    }

    #[test]
    fn test_triple_is_numeric() {
        for part in [MAJOR, MINOR, TINY] {
            assert!(part.parse::<u64>().is_ok(), "{part}");
        }
    }
}
