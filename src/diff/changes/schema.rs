//! Schema comparison.
//!
//! Schemas are compared by arena handle through the per-diff
//! [`SchemaDiffCache`](crate::diff::SchemaDiffCache), which makes recursive
//! schema graphs terminate and compares each handle pair once.

use super::{diff_extensions, ExtensionsDiff};
use crate::diff::cache::{CacheLookup, SchemaPair};
use crate::diff::{
    diff_maps_with, diff_strings, diff_value, diff_value_unless, diff_values, is_false, is_zero,
    non_empty, retain_breaking_boxed, Breaking, Delta, DiffState, Direction, MapDiff, StringsDiff,
    ValueDiff, ValuesDiff,
};
use crate::error::Result;
use crate::model::{Schema, SchemaId};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

type TextDiff = Option<ValueDiff<Option<String>>>;
type FlagDiff = Option<ValueDiff<bool>>;
type NumberDiff = Option<ValueDiff<Option<f64>>>;
type CountDiff = Option<ValueDiff<Option<u64>>>;

/// Delta between two schema nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDiff {
    #[serde(skip_serializing_if = "is_false")]
    pub schema_added: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub schema_deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ExtensionsDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: TextDiff,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: TextDiff,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: TextDiff,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: TextDiff,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: FlagDiff,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only: FlagDiff,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_only: FlagDiff,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: FlagDiff,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<ValuesDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<ValueDiff<Option<Value>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<ValueDiff<Option<Value>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_of: NumberDiff,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: NumberDiff,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: NumberDiff,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: FlagDiff,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: FlagDiff,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: CountDiff,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: CountDiff,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: TextDiff,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: CountDiff,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: CountDiff,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_items: FlagDiff,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_properties: CountDiff,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_properties: CountDiff,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<StringsDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<MapDiff<SchemaDiff>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties_allowed: Option<ValueDiff<Option<bool>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Box<SchemaDiff>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaDiff>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_of: Option<SchemaListDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub one_of: Option<SchemaListDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub any_of: Option<SchemaListDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<SchemaDiff>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<DiscriminatorDiff>,
}

impl Delta for SchemaDiff {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Positional comparison of a composition keyword (`allOf`, `oneOf`, `anyOf`).
///
/// Members are compared index by index; trailing members only present on
/// one side are counted as added or deleted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaListDiff {
    #[serde(skip_serializing_if = "is_zero")]
    pub added: usize,
    #[serde(skip_serializing_if = "is_zero")]
    pub deleted: usize,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub modified: BTreeMap<usize, SchemaDiff>,
}

impl Delta for SchemaListDiff {
    fn is_empty(&self) -> bool {
        self.added == 0 && self.deleted == 0 && self.modified.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscriminatorDiff {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_name: TextDiff,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapping: Option<MapDiff<ValueDiff<String>>>,
}

impl Delta for DiscriminatorDiff {
    fn is_empty(&self) -> bool {
        self.property_name.is_none() && self.mapping.is_none()
    }
}

/// Compare two optional schema handles.
///
/// An absent schema on one side yields `schemaAdded`/`schemaDeleted`.
pub fn diff_schema(
    state: &mut DiffState<'_>,
    base: Option<SchemaId>,
    revision: Option<SchemaId>,
) -> Result<SchemaDiff> {
    let (base, revision) = match (base, revision) {
        (None, None) => return Ok(SchemaDiff::default()),
        (None, Some(_)) => {
            return Ok(SchemaDiff {
                schema_added: true,
                ..SchemaDiff::default()
            })
        }
        (Some(_), None) => {
            return Ok(SchemaDiff {
                schema_deleted: true,
                ..SchemaDiff::default()
            })
        }
        (Some(base), Some(revision)) => (base, revision),
    };

    let pair = SchemaPair::new(base, revision);
    match state.cache.begin(pair) {
        CacheLookup::InProgress => Ok(SchemaDiff::default()),
        CacheLookup::Done(delta) => Ok(delta),
        CacheLookup::Miss => match compare_nodes(state, base, revision) {
            Ok(delta) => {
                state.cache.finish(pair, &delta);
                Ok(delta)
            }
            Err(err) => {
                state.cache.abandon(pair);
                Err(err)
            }
        },
    }
}

/// [`diff_schema`] wrapped as an optional child.
pub fn diff_schema_opt(
    state: &mut DiffState<'_>,
    base: Option<SchemaId>,
    revision: Option<SchemaId>,
) -> Result<Option<SchemaDiff>> {
    Ok(non_empty(diff_schema(state, base, revision)?))
}

fn diff_child(
    state: &mut DiffState<'_>,
    base: Option<SchemaId>,
    revision: Option<SchemaId>,
) -> Result<Option<Box<SchemaDiff>>> {
    Ok(diff_schema_opt(state, base, revision)?.map(Box::new))
}

fn compare_nodes(state: &mut DiffState<'_>, base: SchemaId, revision: SchemaId) -> Result<SchemaDiff> {
    let b: &Schema = state.base_schema(base);
    let r: &Schema = state.revision_schema(revision);
    let exclude_description = state.exclude_description();
    let exclude_examples = state.exclude_examples();

    let properties = diff_maps_with(&b.properties, &r.properties, |bp, rp| {
        diff_schema(state, Some(*bp), Some(*rp))
    })?;

    Ok(SchemaDiff {
        schema_added: false,
        schema_deleted: false,
        extensions: diff_extensions(&b.extensions, &r.extensions)?,
        title: diff_value_unless(exclude_description, &b.title, &r.title),
        description: diff_value_unless(exclude_description, &b.description, &r.description),
        schema_type: diff_value(&b.schema_type, &r.schema_type),
        format: diff_value(&b.format, &r.format),
        nullable: diff_value(&b.nullable, &r.nullable),
        read_only: diff_value(&b.read_only, &r.read_only),
        write_only: diff_value(&b.write_only, &r.write_only),
        deprecated: diff_value(&b.deprecated, &r.deprecated),
        enum_values: diff_values(&b.enum_values, &r.enum_values),
        default: diff_value(&b.default, &r.default),
        example: diff_value_unless(exclude_examples, &b.example, &r.example),
        multiple_of: diff_value(&b.multiple_of, &r.multiple_of),
        minimum: diff_value(&b.minimum, &r.minimum),
        maximum: diff_value(&b.maximum, &r.maximum),
        exclusive_minimum: diff_value(&b.exclusive_minimum, &r.exclusive_minimum),
        exclusive_maximum: diff_value(&b.exclusive_maximum, &r.exclusive_maximum),
        min_length: diff_value(&b.min_length, &r.min_length),
        max_length: diff_value(&b.max_length, &r.max_length),
        pattern: diff_value(&b.pattern, &r.pattern),
        min_items: diff_value(&b.min_items, &r.min_items),
        max_items: diff_value(&b.max_items, &r.max_items),
        unique_items: diff_value(&b.unique_items, &r.unique_items),
        min_properties: diff_value(&b.min_properties, &r.min_properties),
        max_properties: diff_value(&b.max_properties, &r.max_properties),
        required: diff_strings(&b.required, &r.required),
        properties: non_empty(properties),
        additional_properties_allowed: diff_value(
            &b.additional_properties.allowed(),
            &r.additional_properties.allowed(),
        ),
        additional_properties: diff_child(
            state,
            b.additional_properties.schema(),
            r.additional_properties.schema(),
        )?,
        items: diff_child(state, b.items, r.items)?,
        all_of: diff_schema_list(state, &b.all_of, &r.all_of)?,
        one_of: diff_schema_list(state, &b.one_of, &r.one_of)?,
        any_of: diff_schema_list(state, &b.any_of, &r.any_of)?,
        not: diff_child(state, b.not, r.not)?,
        discriminator: diff_discriminator(b, r)?,
    })
}

fn diff_schema_list(
    state: &mut DiffState<'_>,
    base: &[SchemaId],
    revision: &[SchemaId],
) -> Result<Option<SchemaListDiff>> {
    let mut result = SchemaListDiff {
        added: revision.len().saturating_sub(base.len()),
        deleted: base.len().saturating_sub(revision.len()),
        modified: BTreeMap::new(),
    };
    for (index, (b, r)) in base.iter().zip(revision).enumerate() {
        let delta = diff_schema(state, Some(*b), Some(*r))?;
        if !delta.is_empty() {
            result.modified.insert(index, delta);
        }
    }
    Ok(non_empty(result))
}

fn diff_discriminator(base: &Schema, revision: &Schema) -> Result<Option<DiscriminatorDiff>> {
    let property = |schema: &Schema| schema.discriminator.as_ref().map(|d| d.property_name.clone());
    let mapping = |schema: &Schema| {
        schema
            .discriminator
            .as_ref()
            .map(|d| d.mapping.clone())
            .unwrap_or_default()
    };
    let mapping_diff = diff_maps_with(&mapping(base), &mapping(revision), |from: &String, to: &String| {
        Ok(ValueDiff {
            from: from.clone(),
            to: to.clone(),
        })
    })?;
    Ok(non_empty(DiscriminatorDiff {
        property_name: diff_value(&property(base), &property(revision)),
        mapping: non_empty(mapping_diff),
    }))
}

// ============================================================================
// Breaking-change rules
// ============================================================================

/// True when a lower (`lower = true`) or upper bound moved inward.
fn is_tightened<T: PartialOrd>(diff: &ValueDiff<Option<T>>, lower: bool) -> bool {
    match (&diff.from, &diff.to) {
        (None, Some(_)) => true,
        (Some(from), Some(to)) => {
            if lower {
                to > from
            } else {
                to < from
            }
        }
        _ => false,
    }
}

fn retain_bound<T: PartialOrd>(slot: &mut Option<ValueDiff<Option<T>>>, lower: bool, direction: Direction) {
    if let Some(diff) = slot {
        let tightened = is_tightened(diff, lower);
        if !direction.keeps_change(tightened) {
            *slot = None;
        }
    }
}

/// For flags where `true` restricts accepted values.
fn retain_restricting_flag(slot: &mut FlagDiff, direction: Direction) {
    if let Some(diff) = slot {
        if !direction.keeps_change(diff.to) {
            *slot = None;
        }
    }
}

/// `keep_added`/`keep_deleted` per side: a member added to `allOf`
/// narrows the schema, one added to `oneOf`/`anyOf` widens it.
fn retain_list(slot: &mut Option<SchemaListDiff>, narrows_on_add: bool, direction: Direction) {
    if let Some(list) = slot {
        if !direction.keeps_change(narrows_on_add) {
            list.added = 0;
        }
        if !direction.keeps_change(!narrows_on_add) {
            list.deleted = 0;
        }
        list.modified.retain(|_, delta| {
            delta.retain_breaking(direction);
            !delta.is_empty()
        });
        if list.is_empty() {
            *slot = None;
        }
    }
}

impl Breaking for SchemaDiff {
    fn retain_breaking(&mut self, direction: Direction) {
        // A newly declared schema constrains what clients send; a removed
        // one drops guarantees about what they receive.
        if !direction.keeps_tightening() {
            self.schema_added = false;
        }
        if !direction.keeps_loosening() {
            self.schema_deleted = false;
        }

        self.extensions = None;
        self.title = None;
        self.description = None;
        self.read_only = None;
        self.write_only = None;
        self.deprecated = None;
        self.default = None;
        self.example = None;

        if let Some(diff) = &self.nullable {
            if !direction.keeps_change(!diff.to) {
                self.nullable = None;
            }
        }

        if let Some(values) = &mut self.enum_values {
            if !direction.keeps_loosening() {
                values.added.clear();
            }
            if !direction.keeps_tightening() {
                values.deleted.clear();
            }
            if values.is_empty() {
                self.enum_values = None;
            }
        }

        retain_bound(&mut self.minimum, true, direction);
        retain_bound(&mut self.maximum, false, direction);
        retain_bound(&mut self.min_length, true, direction);
        retain_bound(&mut self.max_length, false, direction);
        retain_bound(&mut self.min_items, true, direction);
        retain_bound(&mut self.max_items, false, direction);
        retain_bound(&mut self.min_properties, true, direction);
        retain_bound(&mut self.max_properties, false, direction);
        retain_restricting_flag(&mut self.exclusive_minimum, direction);
        retain_restricting_flag(&mut self.exclusive_maximum, direction);
        retain_restricting_flag(&mut self.unique_items, direction);

        if let Some(required) = &mut self.required {
            if !direction.keeps_tightening() {
                required.added.clear();
            }
            if !direction.keeps_loosening() {
                required.deleted.clear();
            }
            if required.is_empty() {
                self.required = None;
            }
        }

        if let Some(properties) = &mut self.properties {
            properties.retain_breaking(direction);
            if properties.is_empty() {
                self.properties = None;
            }
        }

        if let Some(diff) = &self.additional_properties_allowed {
            let closed = diff.to == Some(false);
            if !direction.keeps_change(closed) {
                self.additional_properties_allowed = None;
            }
        }
        retain_breaking_boxed(&mut self.additional_properties, direction);
        retain_breaking_boxed(&mut self.items, direction);
        retain_breaking_boxed(&mut self.not, direction);

        retain_list(&mut self.all_of, true, direction);
        retain_list(&mut self.one_of, false, direction);
        retain_list(&mut self.any_of, false, direction);

        if let Some(discriminator) = &mut self.discriminator {
            if let Some(mapping) = &mut discriminator.mapping {
                mapping.added.clear();
                if mapping.is_empty() {
                    discriminator.mapping = None;
                }
            }
            if discriminator.is_empty() {
                self.discriminator = None;
            }
        }
    }
}

/// Properties and component schemas: additions never break; removals
/// break readers of responses.
impl Breaking for MapDiff<SchemaDiff> {
    fn retain_breaking(&mut self, direction: Direction) {
        self.retain_keys(false, direction.keeps_loosening());
        self.retain_breaking_modified(direction);
    }
}
