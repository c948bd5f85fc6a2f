//! Dotted numeric software versions (`1.3.7`, `v2.0`).

use crate::ReportError;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A version as a sequence of numeric components.
///
/// Missing trailing components count as zero, so `1.2` and `1.2.0` are
/// equal. Equality follows the ordering rather than the stored components.
#[derive(Clone, Debug)]
pub struct Version {
    parts: Vec<u64>,
}

impl Version {
    pub fn parts(&self) -> &[u64] {
        &self.parts
    }
}

impl FromStr for Version {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let body = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);
        if body.is_empty() {
            return Err(ReportError::VersionParse(s.to_owned()));
        }
        let parts = body
            .split('.')
            .map(|part| {
                // `u64::from_str` accepts a leading '+'
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(ReportError::VersionParse(s.to_owned()));
                }
                part.parse()
                    .map_err(|_| ReportError::VersionParse(s.to_owned()))
            })
            .collect::<Result<Vec<u64>, _>>()?;
        Ok(Version { parts })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.parts.iter().map(u64::to_string).collect();
        f.write_str(&parts.join("."))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        (0..len)
            .map(|i| {
                let a = self.parts.get(i).copied().unwrap_or(0);
                let b = other.parts.get(i).copied().unwrap_or(0);
                a.cmp(&b)
            })
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

/// Returns true iff `a` is strictly lower than `b`.
///
/// An unknown `a` is lower than any known version; nothing is lower than
/// an unknown `b`.
pub fn is_lower_version(a: Option<&Version>, b: Option<&Version>) -> bool {
    match (a, b) {
        (_, None) => false,
        (None, Some(_)) => true,
        (Some(a), Some(b)) => a < b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        s.parse().unwrap()
    }

    fn lower(a: &str, b: &str) -> bool {
        is_lower_version(Some(&v(a)), Some(&v(b)))
    }

    #[test]
    fn test_parse() {
        assert_eq!(v("1.3.7").parts(), &[1, 3, 7]);
        assert_eq!(v("v2.10").parts(), &[2, 10]);
        assert_eq!(v("7").parts(), &[7]);
        assert_eq!(v("1.3.7").to_string(), "1.3.7");

        for bad in &["", "v", "1..2", "1.2.", ".1", "1.2-rc1", "a.b", "1.+2", "1.2.3x"] {
            assert!(bad.parse::<Version>().is_err(), "{:?} should not parse", bad);
        }
    }

    #[test]
    fn test_lower_component_wise() {
        assert!(lower("1.2.9", "1.3.0"));
        assert!(lower("1.3.0", "1.3.1"));
        assert!(lower("1.9.0", "1.10.0"));
        assert!(!lower("2.0.0", "1.99.99"));
        assert!(!lower("1.3.0", "1.3.0"));
    }

    #[test]
    fn test_antisymmetry() {
        let versions = ["0.9", "1.0.0", "1.0.1", "1.2.9", "1.3.0", "1.10.0", "2"];
        for a in versions.iter() {
            for b in versions.iter() {
                let (ab, ba) = (lower(a, b), lower(b, a));
                assert!(!(ab && ba), "{} vs {}", a, b);
                if a == b {
                    assert!(!ab && !ba);
                } else {
                    assert!(ab ^ ba, "{} vs {}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_unknown_versions() {
        assert!(is_lower_version(None, Some(&v("1.0.0"))));
        assert!(!is_lower_version(Some(&v("1.0.0")), None));
        assert!(!is_lower_version(None, None));
    }

    // Missing trailing components are read as zero.
    #[test]
    fn test_length_mismatch_pads_with_zero() {
        assert_eq!(v("1.2"), v("1.2.0"));
        assert!(!lower("1.2", "1.2.0"));
        assert!(!lower("1.2.0", "1.2"));
        assert!(lower("1.2", "1.2.1"));
        assert!(!lower("1.3", "1.2.9"));
    }

    #[test]
    fn test_baseline_classification() {
        let baseline = v("1.3.0");
        let behind: Vec<bool> = ["1.2.9", "1.3.0", "1.3.1"]
            .iter()
            .map(|s| is_lower_version(Some(&v(s)), Some(&baseline)))
            .collect();
        assert_eq!(behind, vec![true, false, false]);
    }
}
