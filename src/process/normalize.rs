use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, instrument};

use super::convert::{clean_str, coerce_int, parse_int, parse_text};
use super::raw_table::RawTable;
use super::resolve::resolve;

/// One normalized row: semantic field name → typed JSON value.
pub type NormalizedRecord = Map<String, Value>;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("{table}: missing required columns: {}", .fields.join(", "))]
    MissingColumns {
        table: &'static str,
        fields: Vec<&'static str>,
    },

    #[error("{table}: normalized row {row} does not fit the record type")]
    Record {
        table: &'static str,
        row: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("{table}: row {row} has no usable value for key field {field}")]
    MissingKey {
        table: &'static str,
        row: usize,
        field: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Integer count. Missing/unparsable cells and absent columns read 0.
    Int,
    /// Integer that stays null when missing or unparsable.
    NullableInt,
    /// Free text.
    Text,
    /// Uppercased code (team, position).
    Code,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub kind: FieldKind,
    pub required: bool,
    /// Part of the destination's conflict key: every row needs a real value.
    pub key: bool,
}

impl FieldSpec {
    pub const fn required(
        name: &'static str,
        aliases: &'static [&'static str],
        kind: FieldKind,
    ) -> Self {
        Self {
            name,
            aliases,
            kind,
            required: true,
            key: false,
        }
    }

    /// A required field whose cells must all hold a usable value.
    pub const fn key(
        name: &'static str,
        aliases: &'static [&'static str],
        kind: FieldKind,
    ) -> Self {
        Self {
            name,
            aliases,
            kind,
            required: true,
            key: true,
        }
    }

    pub const fn optional(
        name: &'static str,
        aliases: &'static [&'static str],
        kind: FieldKind,
    ) -> Self {
        Self {
            name,
            aliases,
            kind,
            required: false,
            key: false,
        }
    }

    /// Typed value for one cell (`cell` is `None` when the column was not
    /// resolved). Only key fields can come back empty.
    fn value(&self, cell: Option<&str>) -> Option<Value> {
        let value = match self.kind {
            FieldKind::Int if self.key => Value::from(cell.and_then(parse_int)?),
            FieldKind::Int => Value::from(cell.map(coerce_int).unwrap_or(0)),
            FieldKind::NullableInt => cell.and_then(parse_int).map_or(Value::Null, Value::from),
            FieldKind::Text | FieldKind::Code => {
                let text = cell.and_then(parse_text).map(|s| {
                    if self.kind == FieldKind::Code {
                        s.to_uppercase()
                    } else {
                        s
                    }
                });
                match text {
                    Some(s) => Value::String(s),
                    None if self.key => return None,
                    None if self.required => Value::String(String::new()),
                    None => Value::Null,
                }
            }
        };
        Some(value)
    }
}

/// Keep rows whose field value, uppercased and rewritten, is in `allowed`.
#[derive(Debug, Clone, Copy)]
pub struct CategoryFilter {
    pub field: &'static str,
    pub allowed: &'static [&'static str],
    pub rewrites: &'static [(&'static str, &'static str)],
}

impl CategoryFilter {
    /// The canonical value if the row survives the filter.
    pub fn apply(&self, raw: &str) -> Option<String> {
        let upper = clean_str(raw).to_uppercase();
        let value = self
            .rewrites
            .iter()
            .find(|(from, _)| *from == upper)
            .map(|(_, to)| to.to_string())
            .unwrap_or(upper);
        self.allowed.contains(&value.as_str()).then_some(value)
    }
}

/// Declarative shape of one normalized table.
#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
    pub filter: Option<CategoryFilter>,
}

/// Resolve, project, rename, filter and coerce `raw` per `spec`.
///
/// Fails before producing any row if a required field has no matching alias,
/// and on the first kept row whose key cell is missing or unparsable.
/// Every declared field is present in every emitted record.
#[instrument(level = "debug", skip_all, fields(table = spec.name, rows = raw.len()))]
pub fn normalize(raw: &RawTable, spec: &TableSpec) -> Result<Vec<NormalizedRecord>, NormalizeError> {
    let available: HashSet<&str> = raw.headers.iter().map(String::as_str).collect();

    let mut columns: Vec<(&FieldSpec, Option<usize>)> = Vec::with_capacity(spec.fields.len());
    let mut missing = Vec::new();
    for field in spec.fields {
        let column = resolve(&available, field.aliases);
        match column {
            Some(c) => debug!(field = field.name, column = c, "resolved"),
            None if field.required => missing.push(field.name),
            None => debug!(field = field.name, "absent"),
        }
        columns.push((field, column.and_then(|c| raw.column_index(c))));
    }
    if !missing.is_empty() {
        return Err(NormalizeError::MissingColumns {
            table: spec.name,
            fields: missing,
        });
    }

    let filter = spec.filter.map(|f| {
        let col = columns
            .iter()
            .find(|(field, _)| field.name == f.field)
            .and_then(|(_, col)| *col);
        (f, col)
    });

    let mut out = Vec::with_capacity(raw.len());
    for row in 0..raw.len() {
        let category = match &filter {
            Some((f, col)) => match f.apply(col.map_or("", |c| raw.cell(row, c))) {
                Some(v) => Some((f.field, v)),
                None => continue,
            },
            None => None,
        };

        let mut record = Map::with_capacity(columns.len());
        for (field, col) in &columns {
            let value = match &category {
                Some((name, v)) if *name == field.name => Value::String(v.clone()),
                _ => field
                    .value(col.map(|c| raw.cell(row, c)))
                    .ok_or(NormalizeError::MissingKey {
                        table: spec.name,
                        row,
                        field: field.name,
                    })?,
            };
            record.insert(field.name.to_string(), value);
        }
        out.push(record);
    }

    debug!(kept = out.len(), dropped = raw.len() - out.len(), "normalized");
    Ok(out)
}

/// `normalize`, then read each row into the destination record type.
pub fn normalize_as<T: DeserializeOwned>(
    raw: &RawTable,
    spec: &TableSpec,
) -> Result<Vec<T>, NormalizeError> {
    normalize(raw, spec)?
        .into_iter()
        .enumerate()
        .map(|(row, record)| {
            serde_json::from_value(Value::Object(record)).map_err(|source| NormalizeError::Record {
                table: spec.name,
                row,
                source,
            })
        })
        .collect()
}
