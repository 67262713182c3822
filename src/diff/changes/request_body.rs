use super::{diff_content, diff_extensions, ContentDiff, ExtensionsDiff};
use crate::diff::{
    diff_value, diff_value_unless, is_false, Breaking, Delta, DiffState, Diffable, Direction,
    ValueDiff,
};
use crate::error::Result;
use crate::model::{Referenced, RequestBody};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBodyDiff {
    #[serde(skip_serializing_if = "is_false")]
    pub added: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ExtensionsDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<ValueDiff<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<ValueDiff<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentDiff>,
    /// Whether the revision's body must be sent
    #[serde(skip)]
    revision_required: bool,
}

impl Delta for RequestBodyDiff {
    fn is_empty(&self) -> bool {
        !self.added
            && !self.deleted
            && self.extensions.is_none()
            && self.description.is_none()
            && self.required.is_none()
            && self.content.is_none()
    }
}

impl Diffable for RequestBody {
    type Delta = RequestBodyDiff;

    fn diff(&self, revision: &Self, state: &mut DiffState<'_>) -> Result<RequestBodyDiff> {
        Ok(RequestBodyDiff {
            added: false,
            deleted: false,
            extensions: diff_extensions(&self.extensions, &revision.extensions)?,
            description: diff_value_unless(
                state.exclude_description(),
                &self.description,
                &revision.description,
            ),
            required: diff_value(&self.required, &revision.required),
            content: diff_content(state, &self.content, &revision.content)?,
            revision_required: revision.required,
        })
    }
}

/// Compare the optional request bodies of two operations.
///
/// A body on one side only is an addition or deletion. A dangling
/// revision body counts as required when judging the addition.
pub fn diff_request_body(
    state: &mut DiffState<'_>,
    base: Option<&Referenced<RequestBody>>,
    revision: Option<&Referenced<RequestBody>>,
) -> Result<Option<RequestBodyDiff>> {
    let delta = match (base, revision) {
        (None, None) => return Ok(None),
        (None, Some(revision)) => RequestBodyDiff {
            added: true,
            revision_required: revision.value.as_ref().map_or(true, |body| body.required),
            ..RequestBodyDiff::default()
        },
        (Some(_), None) => RequestBodyDiff {
            deleted: true,
            ..RequestBodyDiff::default()
        },
        (Some(base), Some(revision)) => base.diff(revision, state)?,
    };
    Ok(crate::diff::non_empty(delta))
}

impl Breaking for RequestBodyDiff {
    /// The given direction is ignored: bodies are request data.
    fn retain_breaking(&mut self, _direction: Direction) {
        if !self.revision_required {
            self.added = false;
        }
        self.extensions = None;
        self.description = None;
        if self
            .required
            .as_ref()
            .is_some_and(|d| !d.is_transition(false, true))
        {
            self.required = None;
        }
        if let Some(content) = &mut self.content {
            content.retain_breaking_with(Direction::Request, self.revision_required);
            if content.is_empty() {
                self.content = None;
            }
        }
    }
}

/// Component request bodies: only changes to existing bodies break.
impl Breaking for crate::diff::MapDiff<RequestBodyDiff> {
    fn retain_breaking(&mut self, direction: Direction) {
        self.retain_keys(false, false);
        self.retain_breaking_modified(direction);
    }
}
