//! Payer identity (the phone number entered at checkout).

use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Length of a phone number accepted under [`IdentityPolicy::Strict`].
pub const IDENTITY_LENGTH: usize = 10;

/// Prefixes accepted under [`IdentityPolicy::Strict`] when none are configured.
pub const DEFAULT_PREFIXES: &[&str] = &["06", "07"];

/// A non-blank payer identity string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PayerIdentity(String);

impl PayerIdentity {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PayerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deployment-wide rule for payer identities.
///
/// Exactly one policy is active per process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IdentityPolicy {
    /// Accept anything; a missing identity is allowed.
    #[default]
    Lenient,
    /// Require a fixed-length numeric phone number with a recognized prefix.
    Strict { prefixes: Vec<String> },
}

impl IdentityPolicy {
    /// Strict policy with the default prefixes.
    pub fn strict() -> Self {
        IdentityPolicy::Strict {
            prefixes: DEFAULT_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            IdentityPolicy::Lenient => "lenient",
            IdentityPolicy::Strict { .. } => "strict",
        }
    }

    /// Applies the policy to a raw identity.
    ///
    /// Blank input counts as absent. Returns `Ok(None)` only under the lenient policy.
    pub fn check(&self, raw: Option<&str>) -> Result<Option<PayerIdentity>, DomainError> {
        let identity = raw.map(str::trim).filter(|s| !s.is_empty());

        match self {
            IdentityPolicy::Lenient => Ok(identity.map(|s| PayerIdentity(s.to_string()))),
            IdentityPolicy::Strict { prefixes } => {
                let identity = identity.ok_or(DomainError::InvalidIdentity)?;
                let well_formed = identity.len() == IDENTITY_LENGTH
                    && identity.bytes().all(|b| b.is_ascii_digit())
                    && prefixes.iter().any(|p| identity.starts_with(p.as_str()));
                if !well_formed {
                    return Err(DomainError::InvalidIdentity);
                }
                Ok(Some(PayerIdentity(identity.to_string())))
            }
        }
    }
}

impl FromStr for IdentityPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lenient" => Ok(IdentityPolicy::Lenient),
            "strict" => Ok(IdentityPolicy::strict()),
            other => Err(format!(
                "Unknown identity policy: {}. Supported: lenient, strict",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_accepts_anything() {
        let policy = IdentityPolicy::Lenient;
        let identity = policy.check(Some("not a phone")).unwrap().unwrap();
        assert_eq!(identity.as_str(), "not a phone");
    }

    #[test]
    fn test_lenient_treats_blank_as_absent() {
        let policy = IdentityPolicy::Lenient;
        assert_eq!(policy.check(None).unwrap(), None);
        assert_eq!(policy.check(Some("   ")).unwrap(), None);
    }

    #[test]
    fn test_lenient_trims_identity() {
        let identity = IdentityPolicy::Lenient
            .check(Some(" 0712345678 "))
            .unwrap()
            .unwrap();
        assert_eq!(identity.to_string(), "0712345678");
    }

    #[test]
    fn test_strict_accepts_recognized_numbers() {
        let policy = IdentityPolicy::strict();
        assert!(policy.check(Some("0712345678")).unwrap().is_some());
        assert!(policy.check(Some("0687654321")).unwrap().is_some());
    }

    #[test]
    fn test_strict_rejects_malformed_numbers() {
        let policy = IdentityPolicy::strict();
        for raw in ["0812345678", "071234567", "07123456789", "07123a5678", "+255712345"] {
            assert!(
                matches!(policy.check(Some(raw)), Err(DomainError::InvalidIdentity)),
                "{} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_strict_rejects_missing_identity() {
        let policy = IdentityPolicy::strict();
        assert!(matches!(policy.check(None), Err(DomainError::InvalidIdentity)));
        assert!(matches!(policy.check(Some("")), Err(DomainError::InvalidIdentity)));
    }

    #[test]
    fn test_strict_with_custom_prefixes() {
        let policy = IdentityPolicy::Strict {
            prefixes: vec!["075".into()],
        };
        assert!(policy.check(Some("0751234567")).is_ok());
        assert!(policy.check(Some("0712345678")).is_err());
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("lenient".parse::<IdentityPolicy>().unwrap(), IdentityPolicy::Lenient);
        assert_eq!("STRICT".parse::<IdentityPolicy>().unwrap(), IdentityPolicy::strict());
        assert!("sometimes".parse::<IdentityPolicy>().is_err());
    }
}
