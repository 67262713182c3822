//! Documentation-only sections: `info` and top-level `tags`.
//!
//! Neither can break a client, so both prune to nothing.

use super::{diff_extensions, ExtensionsDiff};
use crate::diff::{
    diff_maps, diff_value, diff_value_unless, non_empty, Breaking, Delta, DiffState, Diffable,
    Direction, MapDiff, ValueDiff,
};
use crate::error::Result;
use crate::model::{Info, Tag};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoDiff {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<ValueDiff<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<ValueDiff<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<ValueDiff<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<ValueDiff<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ValueDiff<Option<Value>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<ValueDiff<Option<Value>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ExtensionsDiff>,
}

impl Delta for InfoDiff {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Diffable for Info {
    type Delta = InfoDiff;

    fn diff(&self, revision: &Self, state: &mut DiffState<'_>) -> Result<InfoDiff> {
        Ok(InfoDiff {
            title: diff_value(&self.title, &revision.title),
            description: diff_value_unless(
                state.exclude_description(),
                &self.description,
                &revision.description,
            ),
            terms_of_service: diff_value(&self.terms_of_service, &revision.terms_of_service),
            version: diff_value(&self.version, &revision.version),
            contact: diff_value(&self.contact, &revision.contact),
            license: diff_value(&self.license, &revision.license),
            extensions: diff_extensions(&self.extensions, &revision.extensions)?,
        })
    }
}

impl Breaking for InfoDiff {
    fn retain_breaking(&mut self, _direction: Direction) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDiff {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<ValueDiff<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ValueDiff<Option<Value>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ExtensionsDiff>,
}

impl Delta for TagDiff {
    fn is_empty(&self) -> bool {
        self.description.is_none() && self.external_docs.is_none() && self.extensions.is_none()
    }
}

/// Tags keyed by name.
pub type TagsDiff = MapDiff<TagDiff>;

impl Diffable for Tag {
    type Delta = TagDiff;

    fn diff(&self, revision: &Self, state: &mut DiffState<'_>) -> Result<TagDiff> {
        Ok(TagDiff {
            description: diff_value_unless(
                state.exclude_description(),
                &self.description,
                &revision.description,
            ),
            external_docs: diff_value(&self.external_docs, &revision.external_docs),
            extensions: diff_extensions(&self.extensions, &revision.extensions)?,
        })
    }
}

fn index_tags(tags: &[Tag]) -> IndexMap<String, &Tag> {
    tags.iter().map(|tag| (tag.name.clone(), tag)).collect()
}

pub fn diff_tags(state: &mut DiffState<'_>, base: &[Tag], revision: &[Tag]) -> Result<Option<TagsDiff>> {
    let diff = diff_maps(&index_tags(base), &index_tags(revision), state)?;
    Ok(non_empty(diff))
}

impl Breaking for TagsDiff {
    fn retain_breaking(&mut self, _direction: Direction) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffOptions;
    use crate::model::Document;

    #[test]
    fn test_info_version_change() {
        let options = DiffOptions::default();
        let document = Document::default();
        let mut state = DiffState::new(&options, &document, &document);

        let base = Info {
            title: "Pets".to_string(),
            version: "1.0.0".to_string(),
            ..Info::default()
        };
        let revision = Info {
            version: "1.1.0".to_string(),
            ..base.clone()
        };
        let mut diff = base.diff(&revision, &mut state).expect("diff");
        assert_eq!(
            diff.version,
            Some(ValueDiff {
                from: "1.0.0".to_string(),
                to: "1.1.0".to_string()
            })
        );
        diff.retain_breaking(Direction::Unspecified);
        assert!(diff.is_empty());
    }

    #[test]
    fn test_tags_by_name() {
        let options = DiffOptions::default();
        let document = Document::default();
        let mut state = DiffState::new(&options, &document, &document);

        let tag = |name: &str, description: &str| Tag {
            name: name.to_string(),
            description: Some(description.to_string()),
            ..Tag::default()
        };
        let base = vec![tag("pets", "Pets"), tag("store", "Store")];
        let revision = vec![tag("pets", "All pets"), tag("users", "Users")];

        let mut diff = diff_tags(&mut state, &base, &revision)
            .expect("diff")
            .expect("changed");
        assert_eq!(diff.counts(), (1, 1, 1));
        diff.retain_breaking(Direction::Unspecified);
        assert!(diff.is_empty());
    }
}
