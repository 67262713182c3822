//! Scalar and list-of-scalar comparisons.

use super::Delta;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;

/// Before/after pair for a scalar field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueDiff<T> {
    pub from: T,
    pub to: T,
}

impl<T: PartialEq> Delta for ValueDiff<T> {
    fn is_empty(&self) -> bool {
        self.from == self.to
    }
}

impl ValueDiff<bool> {
    /// True when this is exactly the `from` → `to` transition.
    #[must_use]
    pub const fn is_transition(&self, from: bool, to: bool) -> bool {
        self.from == from && self.to == to
    }
}

/// Compare two values, producing a pair only when they differ.
pub fn diff_value<T: PartialEq + Clone>(from: &T, to: &T) -> Option<ValueDiff<T>> {
    if from == to {
        None
    } else {
        Some(ValueDiff {
            from: from.clone(),
            to: to.clone(),
        })
    }
}

/// Like [`diff_value`], but suppressed entirely when `excluded` is set.
pub fn diff_value_unless<T: PartialEq + Clone>(
    excluded: bool,
    from: &T,
    to: &T,
) -> Option<ValueDiff<T>> {
    if excluded {
        None
    } else {
        diff_value(from, to)
    }
}

/// Added and deleted members of a set of strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StringsDiff {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deleted: Vec<String>,
}

impl Delta for StringsDiff {
    fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty()
    }
}

/// Set difference of two string lists; duplicates are ignored and output
/// is sorted.
pub fn diff_strings(base: &[String], revision: &[String]) -> Option<StringsDiff> {
    let base: BTreeSet<&String> = base.iter().collect();
    let revision: BTreeSet<&String> = revision.iter().collect();
    let diff = StringsDiff {
        added: revision.difference(&base).map(|s| (*s).clone()).collect(),
        deleted: base.difference(&revision).map(|s| (*s).clone()).collect(),
    };
    super::non_empty(diff)
}

/// Added and deleted members of a list of arbitrary values (enums).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValuesDiff {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deleted: Vec<Value>,
}

impl Delta for ValuesDiff {
    fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty()
    }
}

/// Membership difference of two value lists, preserving document order.
pub fn diff_values(base: &[Value], revision: &[Value]) -> Option<ValuesDiff> {
    let diff = ValuesDiff {
        added: revision
            .iter()
            .filter(|v| !base.contains(v))
            .cloned()
            .collect(),
        deleted: base
            .iter()
            .filter(|v| !revision.contains(v))
            .cloned()
            .collect(),
    };
    super::non_empty(diff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_diff_value() {
        assert_eq!(diff_value(&1, &1), None);
        assert_eq!(diff_value(&1, &2), Some(ValueDiff { from: 1, to: 2 }));
        assert_eq!(diff_value_unless(true, &"a", &"b"), None);
    }

    #[test]
    fn test_diff_strings_sorted_and_deduplicated() {
        let diff = diff_strings(&strings(&["b", "a", "a"]), &strings(&["c", "b", "d"]))
            .expect("changed");
        assert_eq!(diff.added, strings(&["c", "d"]));
        assert_eq!(diff.deleted, strings(&["a"]));
        assert!(diff_strings(&strings(&["x", "y"]), &strings(&["y", "x"])).is_none());
    }

    #[test]
    fn test_diff_values() {
        let diff = diff_values(&[json!("a"), json!(1)], &[json!(1), json!(null)]).expect("changed");
        assert_eq!(diff.added, vec![json!(null)]);
        assert_eq!(diff.deleted, vec![json!("a")]);
    }
}
