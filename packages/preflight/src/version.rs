//! Version parsing and the minimum-version compatibility predicate fed to
//! the version gate.

/// Parse a `major.minor.patch` version string, ignoring any pre-release or
/// build suffix (`7.10.2-SNAPSHOT` parses as `(7, 10, 2)`).
pub fn parse(raw: &str) -> Option<(u64, u64, u64)> {
    let core = raw.split(['-', '+']).next()?;
    let mut parts = core.split('.');

    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    let patch = parts.next()?.parse().ok()?;

    if parts.next().is_some() {
        return None;
    }

    Some((major, minor, patch))
}

/// Predicate accepting any parseable version >= `min`. Unparseable reported
/// versions are incompatible.
pub fn at_least(min: (u64, u64, u64)) -> impl Fn(&str) -> bool + Send + Sync + 'static {
    move |raw| matches!(parse(raw), Some(version) if version >= min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_versions() {
        assert_eq!(parse("7.10.2"), Some((7, 10, 2)));
        assert_eq!(parse("8.0.0"), Some((8, 0, 0)));
    }

    #[test]
    fn ignores_prerelease_and_build_suffixes() {
        assert_eq!(parse("7.10.2-SNAPSHOT"), Some((7, 10, 2)));
        assert_eq!(parse("7.10.2+build.1"), Some((7, 10, 2)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse("unknown"), None);
        assert_eq!(parse("7.10"), None);
        assert_eq!(parse("7.10.2.1"), None);
        assert_eq!(parse(""), None);
    }

    #[test]
    fn at_least_orders_numerically() {
        let compatible = at_least((7, 0, 0));
        assert!(compatible("7.0.0"));
        assert!(compatible("7.10.2"));
        assert!(compatible("10.0.0"));
        assert!(!compatible("6.8.23"));
        assert!(!compatible("unknown"));
    }
}
