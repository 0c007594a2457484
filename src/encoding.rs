//! Exposition format implementations.

use std::borrow::Cow;

pub mod text;

/// Enum for determining how metric names will be escaped.
///
/// Gauge names derived from type and method names contain `.`, which is not a
/// valid character in legacy OpenMetrics names.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EscapingScheme {
    /// Replaces all legacy-invalid characters with underscores.
    #[default]
    UnderscoreEscaping,
    /// Similar to UnderscoreEscaping, except that dots are
    /// converted to `_dot_` and pre-existing underscores are converted to `__`.
    DotsEscaping,
    /// Indicates that a name will not be escaped.
    NoEscaping,
}

fn is_valid_legacy_char(c: char, i: usize) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == ':' || (c.is_ascii_digit() && i > 0)
}

fn is_valid_legacy_metric_name(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    name.chars()
        .enumerate()
        .all(|(i, c)| is_valid_legacy_char(c, i))
}

pub(crate) fn escape_name(name: &str, scheme: EscapingScheme) -> Cow<'_, str> {
    if name.is_empty() {
        return name.into();
    }
    match scheme {
        EscapingScheme::NoEscaping => name.into(),
        EscapingScheme::UnderscoreEscaping if is_valid_legacy_metric_name(name) => name.into(),
        EscapingScheme::UnderscoreEscaping => name
            .chars()
            .enumerate()
            .map(|(i, c)| if is_valid_legacy_char(c, i) { c } else { '_' })
            .collect::<String>()
            .into(),
        EscapingScheme::DotsEscaping => {
            let mut escaped = String::with_capacity(name.len());
            for (i, c) in name.chars().enumerate() {
                if c == '_' {
                    escaped.push_str("__");
                } else if c == '.' {
                    escaped.push_str("_dot_");
                } else if is_valid_legacy_char(c, i) {
                    escaped.push(c);
                } else {
                    escaped.push_str("__");
                }
            }
            escaped.into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_name_is_legacy_valid() {
        assert!(is_valid_legacy_metric_name("Avalid_23name"));
        assert!(is_valid_legacy_metric_name("_Avalid_23name"));
        assert!(is_valid_legacy_metric_name("avalid:name"));
        assert!(!is_valid_legacy_metric_name("1valid_23name"));
        assert!(!is_valid_legacy_metric_name("Pool.getCount"));
        assert!(!is_valid_legacy_metric_name(""));
    }

    #[test]
    fn test_escape_name() {
        assert_eq!(
            "Pool_getCount",
            escape_name("Pool.getCount", EscapingScheme::UnderscoreEscaping)
        );
        assert_eq!(
            "pool_size",
            escape_name("pool_size", EscapingScheme::UnderscoreEscaping)
        );
        assert_eq!(
            "_pool",
            escape_name("1pool", EscapingScheme::UnderscoreEscaping)
        );
        assert_eq!(
            "Pool_dot_get__count",
            escape_name("Pool.get_count", EscapingScheme::DotsEscaping)
        );
        assert_eq!(
            "Pool.getCount",
            escape_name("Pool.getCount", EscapingScheme::NoEscaping)
        );
        assert_eq!("", escape_name("", EscapingScheme::DotsEscaping));
    }
}
