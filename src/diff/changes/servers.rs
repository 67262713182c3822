use super::{diff_extensions, ExtensionsDiff};
use crate::diff::{
    diff_maps, diff_strings, diff_value, diff_value_unless, non_empty, retain_breaking_opt,
    Breaking, Delta, DiffState, Diffable, Direction, MapDiff, StringsDiff, ValueDiff,
};
use crate::error::Result;
use crate::model::{Server, ServerVariable};
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerVariableDiff {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<ValueDiff<String>>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<StringsDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<ValueDiff<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ExtensionsDiff>,
}

impl Delta for ServerVariableDiff {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Diffable for ServerVariable {
    type Delta = ServerVariableDiff;

    fn diff(&self, revision: &Self, state: &mut DiffState<'_>) -> Result<ServerVariableDiff> {
        Ok(ServerVariableDiff {
            default: diff_value(&self.default, &revision.default),
            enum_values: diff_strings(&self.enum_values, &revision.enum_values),
            description: diff_value_unless(
                state.exclude_description(),
                &self.description,
                &revision.description,
            ),
            extensions: diff_extensions(&self.extensions, &revision.extensions)?,
        })
    }
}

impl Breaking for ServerVariableDiff {
    fn retain_breaking(&mut self, _direction: Direction) {
        self.description = None;
        self.extensions = None;
        if let Some(values) = &mut self.enum_values {
            values.added.clear();
            if values.is_empty() {
                self.enum_values = None;
            }
        }
    }
}

impl Breaking for MapDiff<ServerVariableDiff> {
    fn retain_breaking(&mut self, direction: Direction) {
        self.retain_keys(false, false);
        self.retain_breaking_modified(direction);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerDiff {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<ValueDiff<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<MapDiff<ServerVariableDiff>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ExtensionsDiff>,
}

impl Delta for ServerDiff {
    fn is_empty(&self) -> bool {
        self.description.is_none() && self.variables.is_none() && self.extensions.is_none()
    }
}

/// Servers keyed by URL.
pub type ServersDiff = MapDiff<ServerDiff>;

impl Diffable for Server {
    type Delta = ServerDiff;

    fn diff(&self, revision: &Self, state: &mut DiffState<'_>) -> Result<ServerDiff> {
        Ok(ServerDiff {
            description: diff_value_unless(
                state.exclude_description(),
                &self.description,
                &revision.description,
            ),
            variables: non_empty(diff_maps(&self.variables, &revision.variables, state)?),
            extensions: diff_extensions(&self.extensions, &revision.extensions)?,
        })
    }
}

fn index_servers(servers: &[Server]) -> IndexMap<String, &Server> {
    servers.iter().map(|server| (server.url.clone(), server)).collect()
}

pub fn diff_servers(
    state: &mut DiffState<'_>,
    base: &[Server],
    revision: &[Server],
) -> Result<Option<ServersDiff>> {
    let diff = diff_maps(&index_servers(base), &index_servers(revision), state)?;
    Ok(non_empty(diff))
}

impl Breaking for ServerDiff {
    fn retain_breaking(&mut self, direction: Direction) {
        self.description = None;
        self.extensions = None;
        retain_breaking_opt(&mut self.variables, direction);
    }
}

impl Breaking for ServersDiff {
    fn retain_breaking(&mut self, direction: Direction) {
        self.retain_keys(false, true);
        self.retain_breaking_modified(direction);
    }
}
