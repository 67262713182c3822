use super::{
    diff_example, diff_examples, diff_extensions, diff_schema_opt, diff_single_content,
    ExamplesDiff, ExtensionsDiff, SchemaDiff, SingleContentDiff,
};
use crate::diff::{
    diff_value, diff_value_unless, retain_breaking_opt, Breaking, Delta, DiffState, Diffable,
    Direction, MapDiff, ValueDiff,
};
use crate::error::Result;
use crate::model::Header;
use serde::Serialize;
use serde_json::Value;

/// Header objects keyed by header name.
pub type HeadersDiff = MapDiff<HeaderDiff>;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderDiff {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ExtensionsDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<ValueDiff<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<ValueDiff<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<ValueDiff<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ValueDiff<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explode: Option<ValueDiff<Option<bool>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<SingleContentDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<ValueDiff<Option<Value>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<ExamplesDiff>,
}

impl Delta for HeaderDiff {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Diffable for Header {
    type Delta = HeaderDiff;

    fn diff(&self, revision: &Self, state: &mut DiffState<'_>) -> Result<HeaderDiff> {
        Ok(HeaderDiff {
            extensions: diff_extensions(&self.extensions, &revision.extensions)?,
            description: diff_value_unless(
                state.exclude_description(),
                &self.description,
                &revision.description,
            ),
            deprecated: diff_value(&self.deprecated, &revision.deprecated),
            required: diff_value(&self.required, &revision.required),
            style: diff_value(&self.style, &revision.style),
            explode: diff_value(&self.explode, &revision.explode),
            schema: diff_schema_opt(state, self.schema, revision.schema)?,
            content: diff_single_content(state, &self.content, &revision.content)?,
            example: diff_example(state, &self.example, &revision.example),
            examples: diff_examples(state, &self.examples, &revision.examples)?,
        })
    }
}

impl Breaking for HeaderDiff {
    fn retain_breaking(&mut self, direction: Direction) {
        self.extensions = None;
        self.description = None;
        self.deprecated = None;
        self.example = None;
        self.examples = None;
        if let Some(required) = &self.required {
            if !direction.keeps_change(required.to) {
                self.required = None;
            }
        }
        retain_breaking_opt(&mut self.schema, direction);
        retain_breaking_opt(&mut self.content, direction);
    }
}

/// A header that disappears from a response breaks its readers; a new one
/// only matters where the client has to send it.
impl Breaking for HeadersDiff {
    fn retain_breaking(&mut self, direction: Direction) {
        self.retain_keys(direction.keeps_tightening(), direction.keeps_loosening());
        self.retain_breaking_modified(direction);
    }
}
