//! Feature keys and permission sets.
//!
//! A [`FeatureKey`] gates one screen of the dashboard. [`FeatureKey::ALL`]
//! is the single authority for the enumerated set: admin accounts with an
//! empty stored permission set are granted every key listed there at login,
//! so growing the enum automatically grows admin access without a data
//! migration.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One feature of the dashboard that can be granted to an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKey {
    Dashboard,
    Orders,
    Employees,
    Ads,
    Reports,
    Settings,
    Fulfillment,
}

/// Error returned when parsing an unknown feature key.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown feature key: {0}")]
pub struct FeatureKeyError(pub String);

impl FeatureKey {
    /// Every feature key, in sidebar order.
    pub const ALL: [Self; 7] = [
        Self::Dashboard,
        Self::Orders,
        Self::Employees,
        Self::Ads,
        Self::Reports,
        Self::Settings,
        Self::Fulfillment,
    ];

    /// The canonical wire/storage name of the key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Orders => "orders",
            Self::Employees => "employees",
            Self::Ads => "ads",
            Self::Reports => "reports",
            Self::Settings => "settings",
            Self::Fulfillment => "fulfillment",
        }
    }
}

impl std::fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FeatureKey {
    type Err = FeatureKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dashboard" => Ok(Self::Dashboard),
            "orders" => Ok(Self::Orders),
            "employees" => Ok(Self::Employees),
            "ads" => Ok(Self::Ads),
            "reports" => Ok(Self::Reports),
            "settings" => Ok(Self::Settings),
            "fulfillment" => Ok(Self::Fulfillment),
            _ => Err(FeatureKeyError(s.to_owned())),
        }
    }
}

/// A set of granted feature keys.
///
/// Backed by a `BTreeSet` so serialization order is stable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeSet<FeatureKey>);

impl PermissionSet {
    /// An empty permission set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// The full permission set: every key in [`FeatureKey::ALL`].
    #[must_use]
    pub fn full() -> Self {
        FeatureKey::ALL.into_iter().collect()
    }

    /// Whether the set grants the given key.
    #[must_use]
    pub fn contains(&self, key: FeatureKey) -> bool {
        self.0.contains(&key)
    }

    /// Whether the set grants nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of granted keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Grant a key. Returns `true` if it was newly granted.
    pub fn insert(&mut self, key: FeatureKey) -> bool {
        self.0.insert(key)
    }

    /// Revoke a key. Returns `true` if it was present.
    pub fn remove(&mut self, key: FeatureKey) -> bool {
        self.0.remove(&key)
    }

    /// Iterate over granted keys in stable order.
    pub fn iter(&self) -> impl Iterator<Item = FeatureKey> + '_ {
        self.0.iter().copied()
    }

    /// Keys present in exactly one of `self` and `other`.
    ///
    /// Used to determine which grants an edit actually changes.
    #[must_use]
    pub fn symmetric_difference(&self, other: &Self) -> Vec<FeatureKey> {
        self.0.symmetric_difference(&other.0).copied().collect()
    }

    /// Parse a stored list of key names.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureKeyError`] on the first unknown key name.
    pub fn from_names<I, S>(names: I) -> Result<Self, FeatureKeyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|n| n.as_ref().parse())
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }

    /// The storage representation: key names in stable order.
    #[must_use]
    pub fn to_names(&self) -> Vec<String> {
        self.0.iter().map(|k| k.as_str().to_owned()).collect()
    }
}

impl FromIterator<FeatureKey> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = FeatureKey>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for PermissionSet {
    type Item = FeatureKey;
    type IntoIter = std::collections::btree_set::IntoIter<FeatureKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_key_roundtrip() {
        for key in FeatureKey::ALL {
            let parsed: FeatureKey = key.as_str().parse().unwrap();
            assert_eq!(parsed, key);
        }
    }

    #[test]
    fn test_key_rejects_unknown() {
        assert!("billing".parse::<FeatureKey>().is_err());
    }

    #[test]
    fn test_key_serde_lowercase() {
        let json = serde_json::to_string(&FeatureKey::Fulfillment).unwrap();
        assert_eq!(json, "\"fulfillment\"");
    }

    #[test]
    fn test_full_set_covers_every_key() {
        let full = PermissionSet::full();
        assert_eq!(full.len(), FeatureKey::ALL.len());
        for key in FeatureKey::ALL {
            assert!(full.contains(key));
        }
    }

    #[test]
    fn test_from_names() {
        let set = PermissionSet::from_names(["orders", "dashboard"]).unwrap();
        assert!(set.contains(FeatureKey::Orders));
        assert!(set.contains(FeatureKey::Dashboard));
        assert!(!set.contains(FeatureKey::Settings));
    }

    #[test]
    fn test_from_names_unknown_key() {
        assert!(PermissionSet::from_names(["orders", "nonsense"]).is_err());
    }

    #[test]
    fn test_to_names_stable_order() {
        let set: PermissionSet = [FeatureKey::Settings, FeatureKey::Dashboard]
            .into_iter()
            .collect();
        assert_eq!(set.to_names(), vec!["dashboard", "settings"]);
    }

    #[test]
    fn test_symmetric_difference() {
        let a = PermissionSet::from_names(["orders", "ads"]).unwrap();
        let b = PermissionSet::from_names(["orders", "reports"]).unwrap();
        let diff = a.symmetric_difference(&b);
        assert_eq!(diff, vec![FeatureKey::Ads, FeatureKey::Reports]);
    }

    #[test]
    fn test_serde_as_list() {
        let set = PermissionSet::from_names(["orders"]).unwrap();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "[\"orders\"]");

        let parsed: PermissionSet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, set);
    }
}
