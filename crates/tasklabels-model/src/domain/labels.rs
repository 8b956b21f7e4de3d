use std::{collections::BTreeMap, fmt, sync::Arc};

use serde::{Deserialize, Serialize};

/// Immutable key-value label set attached to a logical task.
///
/// The map is fully materialized when the set is built and is never mutated afterwards.
/// Cloning is cheap: clones share the same underlying map.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSet(Arc<BTreeMap<String, String>>);

impl LabelSet {
    /// Create an empty label set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap an already materialized map.
    pub fn from_map(map: BTreeMap<String, String>) -> Self {
        Self(Arc::new(map))
    }

    /// Returns `true` if no labels are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of labels in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get the value for a key, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|s| s.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterate through all labels as `(&str, &str)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy the labels out into an owned map.
    ///
    /// Merge implementations start from this copy, so the parent set is never touched.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.0.as_ref().clone()
    }

    /// Returns `true` if both sets share the same allocation.
    pub fn ptr_eq(&self, other: &LabelSet) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<K, V> FromIterator<(K, V)> for LabelSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl fmt::Display for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}={v}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::LabelSet;

    #[test]
    fn empty_has_no_labels() {
        let set = LabelSet::empty();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert!(set.get("service").is_none());
    }

    #[test]
    fn from_iter_collects_pairs() {
        let set: LabelSet = [("service", "api"), ("region", "eu")].into_iter().collect();

        assert_eq!(set.len(), 2);
        assert_eq!(set.get("service"), Some("api"));
        assert!(set.contains_key("region"));
    }

    #[test]
    fn iteration_is_key_ordered() {
        let set: LabelSet = [("b", "2"), ("a", "1"), ("c", "3")].into_iter().collect();
        let keys: Vec<_> = set.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b", "c"]);
    }

    #[test]
    fn to_map_is_detached_copy() {
        let set: LabelSet = [("a", "1")].into_iter().collect();
        let mut copy = set.to_map();
        copy.insert("b".into(), "2".into());

        assert_eq!(set.len(), 1);
        assert!(set.get("b").is_none());
    }

    #[test]
    fn clones_share_storage() {
        let set: LabelSet = [("a", "1")].into_iter().collect();
        let clone = set.clone();
        assert!(set.ptr_eq(&clone));
        assert_eq!(set, clone);
    }

    #[test]
    fn display_lists_pairs() {
        let set: LabelSet = [("b", "2"), ("a", "1")].into_iter().collect();
        assert_eq!(set.to_string(), "{a=1, b=2}");
        assert_eq!(LabelSet::empty().to_string(), "{}");
    }

    #[test]
    fn serializes_as_plain_object() {
        let set: LabelSet = [("a", "1")].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"a":"1"}"#);
    }
}
