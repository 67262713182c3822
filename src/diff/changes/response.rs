use super::{diff_content, diff_extensions, ContentDiff, ExtensionsDiff, HeadersDiff};
use crate::diff::{
    diff_maps, diff_value_unless, non_empty, retain_breaking_opt, Breaking, Delta, DiffState,
    Diffable, Direction, MapDiff, ValueDiff,
};
use crate::error::Result;
use crate::model::Response;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDiff {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ExtensionsDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<ValueDiff<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HeadersDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentDiff>,
}

impl Delta for ResponseDiff {
    fn is_empty(&self) -> bool {
        self.extensions.is_none()
            && self.description.is_none()
            && self.headers.is_none()
            && self.content.is_none()
    }
}

/// Responses keyed by status code (or `default`).
pub type ResponsesDiff = MapDiff<ResponseDiff>;

impl Diffable for Response {
    type Delta = ResponseDiff;

    fn diff(&self, revision: &Self, state: &mut DiffState<'_>) -> Result<ResponseDiff> {
        Ok(ResponseDiff {
            extensions: diff_extensions(&self.extensions, &revision.extensions)?,
            description: diff_value_unless(
                state.exclude_description(),
                &self.description,
                &revision.description,
            ),
            headers: non_empty(diff_maps(&self.headers, &revision.headers, state)?),
            content: diff_content(state, &self.content, &revision.content)?,
        })
    }
}

impl Breaking for ResponseDiff {
    /// The given direction is ignored: responses are response data.
    fn retain_breaking(&mut self, _direction: Direction) {
        let direction = Direction::Response;
        self.extensions = None;
        self.description = None;
        retain_breaking_opt(&mut self.headers, direction);
        retain_breaking_opt(&mut self.content, direction);
    }
}

/// A new status code is something clients may ignore; a removed one
/// is a promise withdrawn.
impl Breaking for ResponsesDiff {
    fn retain_breaking(&mut self, direction: Direction) {
        self.retain_keys(false, true);
        self.retain_breaking_modified(direction);
    }
}
