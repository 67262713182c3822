//! Media type, content and encoding comparison.

use super::{
    diff_example, diff_examples, diff_extensions, diff_schema_opt, ExamplesDiff, ExtensionsDiff,
    HeadersDiff, SchemaDiff,
};
use crate::diff::{
    diff_maps, diff_value, is_false, non_empty, retain_breaking_opt, Breaking, Delta, DiffState,
    Diffable, Direction, MapDiff, ValueDiff,
};
use crate::error::{DiffErrorKind, Result, SpecDiffError};
use crate::model::{Content, Encoding, MediaType};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

// ============================================================================
// Media type
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaTypeDiff {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ExtensionsDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<ValueDiff<Option<Value>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<ExamplesDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<MapDiff<EncodingDiff>>,
}

impl Delta for MediaTypeDiff {
    fn is_empty(&self) -> bool {
        self.extensions.is_none()
            && self.schema.is_none()
            && self.example.is_none()
            && self.examples.is_none()
            && self.encoding.is_none()
    }
}

impl Diffable for MediaType {
    type Delta = MediaTypeDiff;

    fn diff(&self, revision: &Self, state: &mut DiffState<'_>) -> Result<MediaTypeDiff> {
        Ok(MediaTypeDiff {
            extensions: diff_extensions(&self.extensions, &revision.extensions)?,
            schema: diff_schema_opt(state, self.schema, revision.schema)?,
            example: diff_example(state, &self.example, &revision.example),
            examples: diff_examples(state, &self.examples, &revision.examples)?,
            encoding: non_empty(diff_maps(&self.encoding, &revision.encoding, state)?),
        })
    }
}

impl Breaking for MediaTypeDiff {
    fn retain_breaking(&mut self, direction: Direction) {
        self.extensions = None;
        self.example = None;
        self.examples = None;
        retain_breaking_opt(&mut self.schema, direction);
        retain_breaking_opt(&mut self.encoding, direction);
    }
}

/// Encodings for new or removed properties follow the schema; only changes
/// to an existing encoding matter.
impl Breaking for MapDiff<EncodingDiff> {
    fn retain_breaking(&mut self, direction: Direction) {
        self.retain_keys(false, false);
        self.retain_breaking_modified(direction);
    }
}

// ============================================================================
// Content (multiple media types)
// ============================================================================

/// Content map of a request body or response, keyed by media type name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDiff {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub media_type_added: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub media_type_deleted: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub media_type_modified: BTreeMap<String, MediaTypeDiff>,
}

impl Delta for ContentDiff {
    fn is_empty(&self) -> bool {
        self.media_type_added.is_empty()
            && self.media_type_deleted.is_empty()
            && self.media_type_modified.is_empty()
    }
}

impl From<MapDiff<MediaTypeDiff>> for ContentDiff {
    fn from(diff: MapDiff<MediaTypeDiff>) -> Self {
        Self {
            media_type_added: diff.added,
            media_type_deleted: diff.deleted,
            media_type_modified: diff.modified,
        }
    }
}

pub fn diff_content(
    state: &mut DiffState<'_>,
    base: &Content,
    revision: &Content,
) -> Result<Option<ContentDiff>> {
    let diff = diff_maps(base, revision, state)?;
    Ok(non_empty(ContentDiff::from(diff)))
}

impl ContentDiff {
    /// Prune with knowledge of whether the enclosing body is required.
    ///
    /// A new media type only forces a client change when the body must be
    /// sent; a removed one only hurts clients reading it.
    ///
    /// Conservative for required bodies: an added media type is kept even
    /// though clients sending an existing one are still served.
    pub fn retain_breaking_with(&mut self, direction: Direction, body_required: bool) {
        if !(body_required && direction.keeps_tightening()) {
            self.media_type_added.clear();
        }
        if !direction.keeps_loosening() {
            self.media_type_deleted.clear();
        }
        self.media_type_modified.retain(|_, delta| {
            delta.retain_breaking(direction);
            !delta.is_empty()
        });
    }
}

impl Breaking for ContentDiff {
    fn retain_breaking(&mut self, direction: Direction) {
        self.retain_breaking_with(direction, true);
    }
}

// ============================================================================
// Single-media-type content (parameters and headers)
// ============================================================================

/// `content` of a parameter or header, which holds exactly one media type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleContentDiff {
    #[serde(skip_serializing_if = "is_false")]
    pub media_type_added: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub media_type_deleted: bool,
    /// The media type name itself changed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<ValueDiff<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ExtensionsDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<ValueDiff<Option<Value>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<ExamplesDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<MapDiff<EncodingDiff>>,
}

impl Delta for SingleContentDiff {
    fn is_empty(&self) -> bool {
        !self.media_type_added
            && !self.media_type_deleted
            && self.media_type.is_none()
            && self.extensions.is_none()
            && self.schema.is_none()
            && self.example.is_none()
            && self.examples.is_none()
            && self.encoding.is_none()
    }
}

/// The one media type of a parameter/header content map.
pub fn single_media_type(content: &Content) -> Result<(&String, &MediaType)> {
    match content.first() {
        Some(entry) if content.len() == 1 => Ok(entry),
        _ => Err(SpecDiffError::diff(
            "content",
            DiffErrorKind::AmbiguousMediaType {
                count: content.len(),
            },
        )),
    }
}

/// Compare parameter or header content.
///
/// Content that does not hold exactly one media type on both sides is
/// logged and reported as unchanged.
pub fn diff_single_content(
    state: &mut DiffState<'_>,
    base: &Content,
    revision: &Content,
) -> Result<Option<SingleContentDiff>> {
    match (base.is_empty(), revision.is_empty()) {
        (true, true) => return Ok(None),
        (true, false) => {
            return Ok(Some(SingleContentDiff {
                media_type_added: true,
                ..SingleContentDiff::default()
            }))
        }
        (false, true) => {
            return Ok(Some(SingleContentDiff {
                media_type_deleted: true,
                ..SingleContentDiff::default()
            }))
        }
        (false, false) => {}
    }

    let pair = single_media_type(base).and_then(|b| single_media_type(revision).map(|r| (b, r)));
    let ((base_name, base_media), (revision_name, revision_media)) = match pair {
        Ok(pair) => pair,
        Err(err) if err.is_ambiguous_media_type() => {
            tracing::debug!("Skipping content comparison: {err}");
            return Ok(None);
        }
        Err(err) => return Err(err),
    };

    let media = base_media.diff(revision_media, state)?;
    Ok(non_empty(SingleContentDiff {
        media_type_added: false,
        media_type_deleted: false,
        media_type: diff_value(base_name, revision_name),
        extensions: media.extensions,
        schema: media.schema,
        example: media.example,
        examples: media.examples,
        encoding: media.encoding,
    }))
}

impl Breaking for SingleContentDiff {
    fn retain_breaking(&mut self, direction: Direction) {
        if !direction.keeps_tightening() {
            self.media_type_added = false;
        }
        if !direction.keeps_loosening() {
            self.media_type_deleted = false;
        }
        self.extensions = None;
        self.example = None;
        self.examples = None;
        retain_breaking_opt(&mut self.schema, direction);
        retain_breaking_opt(&mut self.encoding, direction);
    }
}

// ============================================================================
// Encoding
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodingDiff {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ValueDiff<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HeadersDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ValueDiff<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explode: Option<ValueDiff<Option<bool>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_reserved: Option<ValueDiff<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ExtensionsDiff>,
}

impl Delta for EncodingDiff {
    fn is_empty(&self) -> bool {
        self.content_type.is_none()
            && self.headers.is_none()
            && self.style.is_none()
            && self.explode.is_none()
            && self.allow_reserved.is_none()
            && self.extensions.is_none()
    }
}

impl Diffable for Encoding {
    type Delta = EncodingDiff;

    fn diff(&self, revision: &Self, state: &mut DiffState<'_>) -> Result<EncodingDiff> {
        Ok(EncodingDiff {
            content_type: diff_value(&self.content_type, &revision.content_type),
            headers: non_empty(diff_maps(&self.headers, &revision.headers, state)?),
            style: diff_value(&self.style, &revision.style),
            explode: diff_value(&self.explode, &revision.explode),
            allow_reserved: diff_value(&self.allow_reserved, &revision.allow_reserved),
            extensions: diff_extensions(&self.extensions, &revision.extensions)?,
        })
    }
}

impl Breaking for EncodingDiff {
    fn retain_breaking(&mut self, direction: Direction) {
        self.extensions = None;
        if let Some(diff) = &self.allow_reserved {
            if !diff.is_transition(true, false) {
                self.allow_reserved = None;
            }
        }
        retain_breaking_opt(&mut self.headers, direction);
    }
}
