use serde_json::{Map, Value};
use tracing::debug;

use crate::error::SurveyError;

/// A named scoring rule: which statements count toward the scale, and the
/// normalization constants for its T-score transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    pub name: String,

    /// Normative mean of the raw score.
    pub mean: f64,

    /// Scaling divisor of the T-transform. The source format calls this
    /// "variance" but applies it directly, not squared; the name is kept.
    pub variance: f64,

    /// Weight applied to the correction scale's T-score when this scale
    /// is scored. Zero means the scale is never adjusted.
    pub correction: f64,

    /// Statement indices that count when answered YES.
    pub positive: Vec<usize>,

    /// Statement indices that count when answered NO.
    pub negative: Vec<usize>,
}

impl Scale {
    /// Read one scale object. `statement_count` bounds the index lists.
    fn from_json(obj: &Map<String, Value>, statement_count: usize) -> Result<Self, SurveyError> {
        let name = match obj.get("name").and_then(Value::as_str) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => return Err(SurveyError::invalid_field("name")),
        };
        let scope = || format!("scale \"{name}\"");

        let mean = read_positive_number(obj, "mean").map_err(|e| e.in_scope(scope()))?;
        let variance = read_positive_number(obj, "variance").map_err(|e| e.in_scope(scope()))?;

        // Absent or non-numeric correction reads as zero weight.
        let correction = obj.get("correction").and_then(Value::as_f64).unwrap_or(0.0);

        let positive = read_statement_indices(obj, "positive", statement_count)
            .map_err(|e| e.in_scope(scope()))?;
        let negative = read_statement_indices(obj, "negative", statement_count)
            .map_err(|e| e.in_scope(scope()))?;

        Ok(Scale {
            name,
            mean,
            variance,
            correction,
            positive,
            negative,
        })
    }
}

/// A validated, immutable survey definition.
///
/// Built once by [`SurveyDefinition::from_json`]; construction either fully
/// succeeds or fails with the first validation error, so no half-validated
/// definition is ever observable. After a successful load every statement
/// index referenced by any scale is in range and the correction-scale name
/// has been resolved to an index. The definition holds only owned data, so
/// one instance can be shared across threads and scored concurrently.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyDefinition {
    description: String,
    statements: Vec<String>,
    primary_scales: Vec<Scale>,
    additional_scales: Vec<Scale>,
    correction_scale: Option<usize>,
}

impl SurveyDefinition {
    /// Build a definition from an untrusted survey document.
    ///
    /// Validation order: `description`, `statements`, `primary_scales`,
    /// `additional_scales`, `correction_scale`. The first failure aborts
    /// the load with the offending field wrapped in its enclosing scale
    /// and group names.
    pub fn from_json(doc: &Value) -> Result<Self, SurveyError> {
        let description = match doc.get("description").and_then(Value::as_str) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => return Err(SurveyError::invalid_field("description")),
        };

        let statements = read_statements(doc)?;
        let statement_count = statements.len();

        let primary_scales = read_scales(doc, "primary_scales", statement_count)?;
        let additional_scales = read_scales(doc, "additional_scales", statement_count)?;
        let correction_scale = resolve_correction_scale(doc, &additional_scales)?;

        debug!(
            statements = statement_count,
            primary = primary_scales.len(),
            additional = additional_scales.len(),
            corrected = correction_scale.is_some(),
            "loaded survey definition"
        );

        Ok(Self {
            description,
            statements,
            primary_scales,
            additional_scales,
            correction_scale,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Statement prompts, in answer order.
    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    /// Number of statements; every answer sequence must have this length.
    pub fn statement_count(&self) -> usize {
        self.statements.len()
    }

    pub fn primary_scales(&self) -> &[Scale] {
        &self.primary_scales
    }

    pub fn additional_scales(&self) -> &[Scale] {
        &self.additional_scales
    }

    /// Index into [`Self::additional_scales`] of the scale whose T-score
    /// corrects primary scales, if one is configured.
    pub fn correction_scale(&self) -> Option<usize> {
        self.correction_scale
    }
}

fn read_statements(doc: &Value) -> Result<Vec<String>, SurveyError> {
    let items = doc
        .get("statements")
        .and_then(Value::as_array)
        .ok_or_else(|| SurveyError::invalid_field("statements"))?;

    let mut statements = Vec::with_capacity(items.len());
    for item in items {
        match item.as_str() {
            Some(text) => statements.push(text.to_string()),
            None => return Err(SurveyError::invalid_field("statements")),
        }
    }
    Ok(statements)
}

fn read_scales(
    doc: &Value,
    group: &'static str,
    statement_count: usize,
) -> Result<Vec<Scale>, SurveyError> {
    let items = doc
        .get(group)
        .and_then(Value::as_array)
        .ok_or_else(|| SurveyError::invalid_field(group))?;

    let mut scales = Vec::with_capacity(items.len());
    for item in items {
        let obj = item
            .as_object()
            .ok_or_else(|| SurveyError::invalid_field(group))?;
        let scale = Scale::from_json(obj, statement_count).map_err(|e| e.in_scope(group))?;
        scales.push(scale);
    }
    Ok(scales)
}

fn read_positive_number(obj: &Map<String, Value>, field: &'static str) -> Result<f64, SurveyError> {
    obj.get(field)
        .and_then(Value::as_f64)
        .filter(|n| *n > 0.0)
        .ok_or_else(|| SurveyError::invalid_field(field))
}

/// Read an index list. Every element must be an integer in
/// `[0, statement_count)`. Duplicates are kept; each occurrence counts
/// separately when the scale is scored.
fn read_statement_indices(
    obj: &Map<String, Value>,
    field: &'static str,
    statement_count: usize,
) -> Result<Vec<usize>, SurveyError> {
    let items = obj
        .get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| SurveyError::invalid_field(field))?;

    let mut indices = Vec::with_capacity(items.len());
    for item in items {
        let index = item
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .filter(|i| *i < statement_count)
            .ok_or_else(|| SurveyError::invalid_field(field))?;
        indices.push(index);
    }
    Ok(indices)
}

fn resolve_correction_scale(
    doc: &Value,
    additional_scales: &[Scale],
) -> Result<Option<usize>, SurveyError> {
    match doc.get("correction_scale") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(name)) => additional_scales
            .iter()
            .position(|scale| scale.name == *name)
            .map(Some)
            .ok_or_else(|| SurveyError::UnknownReference(name.clone())),
        Some(_) => Err(SurveyError::invalid_field("correction_scale")),
    }
}
