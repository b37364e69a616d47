use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::leg::canonical_flight_number;

/// Flight numbers that must always appear as solo rows, whatever their
/// registration says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExceptionSet(BTreeSet<String>);

impl ExceptionSet {
    pub fn new<I, S>(numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(numbers.into_iter().map(Into::into).collect())
    }

    pub fn empty() -> Self {
        Self(BTreeSet::new())
    }

    pub fn contains(&self, flight_number: &str) -> bool {
        self.0.contains(flight_number)
    }

    pub fn insert(&mut self, flight_number: impl Into<String>) -> bool {
        self.0.insert(flight_number.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// The same set with every number uppercased and normalised the way
    /// extracted legs are, so it compares equal to their flight numbers.
    pub fn canonical(&self, airline: &str) -> Self {
        let prefix = airline.to_uppercase();
        self.iter()
            .map(|n| canonical_flight_number(&prefix, &n.to_uppercase()))
            .filter(|n| !n.is_empty())
            .collect()
    }
}

/// The AR155x services share tails with regular rotations at COR.
impl Default for ExceptionSet {
    fn default() -> Self {
        Self::new(["AR1550", "AR1551", "AR1552", "AR1553"])
    }
}

impl<S: Into<String>> FromIterator<S> for ExceptionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_holds_the_four_ar155x_services() {
        let set = ExceptionSet::default();
        assert_eq!(set.len(), 4);
        for n in ["AR1550", "AR1551", "AR1552", "AR1553"] {
            assert!(set.contains(n), "missing {n}");
        }
        assert!(!set.contains("AR1554"));
    }

    #[test]
    fn canonical_prefixes_bare_numbers() {
        let set = ExceptionSet::new(["1550", "ar1551", "AR1552", " "]).canonical("AR");
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            ["AR1550", "AR1551", "AR1552"]
        );
    }

    #[test]
    fn serde_is_a_plain_list() {
        let set = ExceptionSet::new(["AR2", "AR1"]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["AR1","AR2"]"#);
        let back: ExceptionSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
