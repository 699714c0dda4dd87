//! Offline query client serving a captured query-service response.
//!
//! Accepted shapes:
//! - a JSON array of row objects keyed by the configured column names
//!   (or the canonical `id`/`score`/`payload`);
//! - the query-service envelope `{"data": [[...]], "metadata": {"<column>": {"placeInOrder": n}}}`.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use serde_json::{Map, Value};

use dcloud_core::error::{Error, Result};
use dcloud_core::traits::QueryClient;
use dcloud_core::types::{ColumnNames, QueryRequest, ResultRow};

#[derive(Debug, Clone, Default)]
pub struct ReplayClient {
    rows: Vec<ResultRow>,
}

impl ReplayClient {
    pub fn new(rows: Vec<ResultRow>) -> Self { Self { rows } }

    pub fn from_json(text: &str, columns: &ColumnNames) -> anyhow::Result<Self> {
        let value: Value = serde_json::from_str(text).context("replay response is not valid JSON")?;
        Ok(Self::new(parse_response(value, columns)?))
    }

    pub fn from_path(path: &Path, columns: &ColumnNames) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read replay response {}", path.display()))?;
        Self::from_json(&text, columns)
    }

    pub fn rows(&self) -> &[ResultRow] { &self.rows }
}

impl QueryClient for ReplayClient {
    fn read_data(&self, _request: &QueryRequest) -> anyhow::Result<Vec<ResultRow>> {
        Ok(self.rows.clone())
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    data: Vec<Vec<Value>>,
    metadata: HashMap<String, ColumnMeta>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ColumnMeta {
    place_in_order: usize,
}

fn parse_response(value: Value, columns: &ColumnNames) -> anyhow::Result<Vec<ResultRow>> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(map) => Ok(row_from_object(&map, columns)?),
                _ => Err(anyhow::anyhow!("replay row {index} is not a JSON object")),
            })
            .collect(),
        Value::Object(_) => {
            let envelope: Envelope =
                serde_json::from_value(value).context("unrecognised replay envelope")?;
            Ok(rows_from_envelope(&envelope, columns)?)
        }
        _ => Err(anyhow::anyhow!(
            "replay response must be a JSON array or a query-service envelope"
        )),
    }
}

fn row_from_object(map: &Map<String, Value>, columns: &ColumnNames) -> Result<ResultRow> {
    let field = |name: &str, canonical: &str| map.get(name).or_else(|| map.get(canonical));
    Ok(ResultRow {
        id: as_string(field(&columns.record_id, "id"), &columns.record_id)?,
        score: as_float(field(&columns.score, "score"), &columns.score)?,
        payload: as_string(field(&columns.chunk_text, "payload"), &columns.chunk_text)?,
    })
}

fn rows_from_envelope(envelope: &Envelope, columns: &ColumnNames) -> Result<Vec<ResultRow>> {
    let position = |name: &str| {
        envelope
            .metadata
            .get(name)
            .map(|meta| meta.place_in_order)
            .ok_or_else(|| Error::MissingColumn(name.to_string()))
    };
    let (id_at, score_at, payload_at) =
        (position(&columns.record_id)?, position(&columns.score)?, position(&columns.chunk_text)?);

    envelope
        .data
        .iter()
        .map(|values| {
            Ok(ResultRow {
                id: as_string(values.get(id_at), &columns.record_id)?,
                score: as_float(values.get(score_at), &columns.score)?,
                payload: as_string(values.get(payload_at), &columns.chunk_text)?,
            })
        })
        .collect()
}

fn as_string(value: Option<&Value>, column: &str) -> Result<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(Error::ColumnType { column: column.to_string(), expected: "string" }),
    }
}

fn as_float(value: Option<&Value>, column: &str) -> Result<Option<f64>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(_) => Err(Error::ColumnType { column: column.to_string(), expected: "number" }),
    }
}
