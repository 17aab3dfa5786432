//! Platform facts supplied by the transport.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use vigil_core::SupportCriterion;

/// Facts about the target platform, as detected by the transport.
///
/// The matching logic in [`supported`](Self::supported) belongs to the
/// provider; the lifecycle only asks the question.
pub trait Platform: Send + Sync + fmt::Debug {
    /// Platform name (`ubuntu`, `windows_server_2019`, `aws`).
    fn name(&self) -> &str;

    /// Most specific platform family (`debian`, `windows`, `cloud`).
    fn family(&self) -> &str;

    /// Platform release (`18.04`, `10.0.17763`).
    fn release(&self) -> &str;

    /// Whether any of `criteria` matches this platform.
    fn supported(&self, criteria: &[SupportCriterion]) -> bool;
}

const UNKNOWN_FAMILY: &str = "unknown";

/// Static platform facts with the standard matching rules.
///
/// `families` is the family hierarchy, most specific first
/// (`ubuntu` → `["debian", "linux", "unix"]`).
///
/// ```
/// use vigil_core::SupportCriterion;
/// use vigil_resource::{Platform, PlatformFacts};
///
/// let ubuntu = PlatformFacts::new("ubuntu", "18.04").with_families(["debian", "linux", "unix"]);
/// assert_eq!(ubuntu.family(), "debian");
/// assert!(ubuntu.supported(&[SupportCriterion::family("linux")]));
/// assert!(ubuntu.supported(&[SupportCriterion::platform("ubuntu").with_release("18.*")]));
/// assert!(!ubuntu.supported(&[SupportCriterion::family("windows")]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformFacts {
    name: String,
    release: String,
    #[serde(default)]
    families: Vec<String>,
}

impl PlatformFacts {
    /// Facts for a platform with no known family.
    pub fn new(name: impl Into<String>, release: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            release: release.into(),
            families: Vec::new(),
        }
    }

    /// Set the family hierarchy, most specific first.
    pub fn with_families<I, S>(mut self, families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.families = families.into_iter().map(Into::into).collect();
        self
    }

    /// The family hierarchy, most specific first.
    pub fn families(&self) -> &[String] {
        &self.families
    }

    fn in_family(&self, family: &str) -> bool {
        self.families.iter().any(|f| f == family)
    }

    fn matches(&self, criterion: &SupportCriterion) -> bool {
        let platform_ok = criterion
            .platform
            .as_deref()
            .is_none_or(|p| self.name == p || self.in_family(p));
        let family_ok = criterion
            .platform_family
            .as_deref()
            .is_none_or(|f| self.in_family(f));
        let name_ok = criterion
            .platform_name
            .as_deref()
            .is_none_or(|n| self.name == n);
        let release_ok = criterion
            .release
            .as_deref()
            .is_none_or(|r| release_matches(&self.release, r));

        platform_ok && family_ok && name_ok && release_ok
    }
}

impl Platform for PlatformFacts {
    fn name(&self) -> &str {
        &self.name
    }

    fn family(&self) -> &str {
        self.families
            .first()
            .map_or(UNKNOWN_FAMILY, String::as_str)
    }

    fn release(&self) -> &str {
        &self.release
    }

    fn supported(&self, criteria: &[SupportCriterion]) -> bool {
        criteria.iter().any(|c| self.matches(c))
    }
}

/// Exact match, or a `*` wildcard pattern over the whole release string.
fn release_matches(release: &str, pattern: &str) -> bool {
    if !pattern.contains('*') {
        return release == pattern;
    }
    let expr = format!("^{}$", regex::escape(pattern).replace(r"\*", ".*"));
    // `expr` is built from escaped input so it always compiles.
    Regex::new(&expr).is_ok_and(|re| re.is_match(release))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn ubuntu() -> PlatformFacts {
        PlatformFacts::new("ubuntu", "18.04").with_families(["debian", "linux", "unix"])
    }

    #[rstest]
    #[case(SupportCriterion::platform("ubuntu"), true)]
    #[case(SupportCriterion::platform("linux"), true)]
    #[case(SupportCriterion::platform("windows"), false)]
    #[case(SupportCriterion::family("unix"), true)]
    #[case(SupportCriterion::family("ubuntu"), false)]
    #[case(SupportCriterion::name("ubuntu"), true)]
    #[case(SupportCriterion::name("debian"), false)]
    #[case(SupportCriterion::platform("ubuntu").with_release("18.04"), true)]
    #[case(SupportCriterion::platform("ubuntu").with_release("18.*"), true)]
    #[case(SupportCriterion::platform("ubuntu").with_release("16.*"), false)]
    #[case(SupportCriterion::platform("ubuntu").with_release("8.*"), false)]
    #[case(SupportCriterion::family("linux").with_name("centos"), false)]
    fn single_criterion(#[case] criterion: SupportCriterion, #[case] expected: bool) {
        assert_eq!(ubuntu().supported(&[criterion]), expected);
    }

    #[test]
    fn criteria_are_alternatives() {
        let criteria = [
            SupportCriterion::family("windows"),
            SupportCriterion::platform("ubuntu"),
        ];
        assert!(ubuntu().supported(&criteria));
    }

    #[test]
    fn empty_criteria_list_matches_nothing() {
        assert!(!ubuntu().supported(&[]));
    }

    #[test]
    fn family_defaults_to_unknown() {
        let facts = PlatformFacts::new("aws", "train-aws: v1.0");
        assert_eq!(facts.family(), "unknown");
        assert!(facts.supported(&[SupportCriterion::platform("aws")]));
    }

    #[test]
    fn wildcard_escapes_other_characters() {
        assert!(release_matches("10.0.17763", "10.0.*"));
        assert!(!release_matches("1000", "10.*"));
        assert!(release_matches("anything", "*"));
    }
}
