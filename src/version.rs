use std::{fmt, str::FromStr};

/// Client application version made of dot-separated integers.
///
/// Ordering compares components numerically from the left; when one version
/// is a prefix of the other, the shorter one is lower (`1.2 < 1.2.0`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct AppVersion(Vec<u64>);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid version component {component:?} in {input:?}")]
pub struct VersionParseError {
    input: String,
    component: String,
}

impl FromStr for AppVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split('.')
            .map(|part| {
                part.trim().parse::<u64>().map_err(|_| VersionParseError {
                    input: s.to_string(),
                    component: part.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(AppVersion)
    }
}

impl fmt::Display for AppVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = self.0.iter();
        if let Some(first) = parts.next() {
            write!(f, "{first}")?;
        }
        for part in parts {
            write!(f, ".{part}")?;
        }
        Ok(())
    }
}

impl AppVersion {
    /// Whether a client reporting `self` may talk to a server requiring `minimum`.
    pub fn satisfies(&self, minimum: &AppVersion) -> bool {
        self >= minimum
    }
}

/// Decide whether a raw `app-version` header value is admitted.
///
/// Missing and malformed values are both refused.
pub fn admits(header: Option<&str>, minimum: &AppVersion) -> bool {
    header
        .and_then(|raw| raw.parse::<AppVersion>().ok())
        .is_some_and(|v| v.satisfies(minimum))
}
