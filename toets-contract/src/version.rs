//! Contract version — semantic versioning of the external schema.

use std::fmt;
use std::str::FromStr;

/// The contract version this build produces.
///
/// History:
/// - 1.0.0 — initial external schema
/// - 1.1.0 — added `system.disposition`
/// - 1.2.0 — added `system.suppressed_rules`
pub const CONTRACT_VERSION: &str = "1.2.0";

/// A parsed `major.minor.patch` contract version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContractVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ContractVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// The version this build produces.
    pub fn current() -> Self {
        CONTRACT_VERSION
            .parse()
            .expect("CONTRACT_VERSION is well-formed")
    }

    /// A producer at this version can serve a consumer expecting
    /// `other` when majors match and the producer is not older.
    pub fn can_serve(&self, other: &ContractVersion) -> bool {
        self.major == other.major && *self >= *other
    }
}

impl fmt::Display for ContractVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for ContractVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('.');
        let mut next = |name: &str| {
            parts
                .next()
                .ok_or_else(|| format!("missing {name} component in '{s}'"))?
                .parse::<u32>()
                .map_err(|_| format!("invalid {name} component in '{s}'"))
        };
        let version = Self {
            major: next("major")?,
            minor: next("minor")?,
            patch: next("patch")?,
        };
        if parts.next().is_some() {
            return Err(format!("too many components in '{s}'"));
        }
        Ok(version)
    }
}
