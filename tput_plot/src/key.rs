use std::cmp::Ordering;
use std::fmt;

/// Key by which throughput samples are grouped: a window size when plotting a
/// single file, a trial name when plotting several.
///
/// Numeric keys are ordered numerically (so that `10` comes after `5`) and
/// labels lexicographically; all numeric keys come before all labels.
#[derive(Debug, Clone)]
pub enum GroupKey {
    Numeric(f64),
    Label(String),
}

impl GroupKey {
    pub fn numeric(value: f64) -> Self {
        // `-0.0` and `0.0` should be the same group
        if value == 0f64 {
            Self::Numeric(0f64)
        } else {
            Self::Numeric(value)
        }
    }

    pub fn label(label: impl Into<String>) -> Self {
        Self::Label(label.into())
    }
}

impl From<f64> for GroupKey {
    fn from(value: f64) -> Self {
        Self::numeric(value)
    }
}

impl From<&str> for GroupKey {
    fn from(label: &str) -> Self {
        Self::label(label)
    }
}

impl From<String> for GroupKey {
    fn from(label: String) -> Self {
        Self::Label(label)
    }
}

impl PartialEq for GroupKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GroupKey {}

impl PartialOrd for GroupKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GroupKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Numeric(a), Self::Numeric(b)) => a.total_cmp(b),
            (Self::Label(a), Self::Label(b)) => a.cmp(b),
            (Self::Numeric(_), Self::Label(_)) => Ordering::Less,
            (Self::Label(_), Self::Numeric(_)) => Ordering::Greater,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // window sizes are usually integers; show them as such unless they
            // don't fit an `i64`
            Self::Numeric(value)
                if value.fract() == 0f64 && value.abs() < i64::MAX as f64 =>
            {
                write!(f, "{}", *value as i64)
            }
            Self::Numeric(value) => write!(f, "{}", value),
            Self::Label(label) => write!(f, "{}", label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_keys_sort_numerically() {
        let mut keys: Vec<GroupKey> =
            vec![5f64.into(), 1f64.into(), 10f64.into()];
        keys.sort();
        let labels: Vec<_> = keys.iter().map(|key| key.to_string()).collect();
        assert_eq!(labels, vec!["1", "5", "10"]);
    }

    #[test]
    fn labels_sort_lexicographically() {
        let mut keys: Vec<GroupKey> = vec!["b".into(), "a".into(), "10".into()];
        keys.sort();
        assert_eq!(
            keys,
            vec![GroupKey::from("10"), "a".into(), "b".into()]
        );
    }

    #[test]
    fn numeric_before_label() {
        assert!(GroupKey::from(1000f64) < GroupKey::from("1"));
    }

    #[test]
    fn negative_zero_is_zero() {
        assert_eq!(GroupKey::numeric(-0f64), GroupKey::numeric(0f64));
    }

    #[test]
    fn display() {
        assert_eq!(GroupKey::from(1024f64).to_string(), "1024");
        assert_eq!(GroupKey::from(2.5).to_string(), "2.5");
        assert_eq!(GroupKey::from("trial").to_string(), "trial");
    }

    #[test]
    fn display_huge_windows() {
        let a = GroupKey::from(1e19).to_string();
        let b = GroupKey::from(1e20).to_string();
        assert_ne!(a, b);
        assert_eq!(b, 1e20f64.to_string());
        assert_eq!(GroupKey::from(-4096f64).to_string(), "-4096");
    }
}
