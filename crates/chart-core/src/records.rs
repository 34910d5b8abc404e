// File: crates/chart-core/src/records.rs
// Summary: Immutable tabular rows with typed field access and a CSV adapter.

use std::borrow::Cow;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::error::{ChartError, Result};

/// A single cell. CSV input always yields `Text`; in-memory callers may pass numbers directly.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self { FieldValue::Text(s.to_string()) }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self { FieldValue::Text(s) }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self { FieldValue::Number(v) }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self { FieldValue::Number(v as f64) }
}

/// One row keyed by column name. `row` is its zero-based position in the owning set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    row: usize,
    fields: HashMap<String, FieldValue>,
}

impl Record {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let fields = pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self { row: 0, fields }
    }

    pub fn row(&self) -> usize { self.row }

    pub fn get(&self, field: &str) -> Option<&FieldValue> { self.fields.get(field) }

    fn require(&self, field: &str) -> Result<&FieldValue> {
        self.get(field).ok_or_else(|| ChartError::MissingField {
            field: field.to_string(),
            row: self.row,
        })
    }

    /// Field as text; numbers are rendered with their shortest display form.
    pub fn text(&self, field: &str) -> Result<Cow<'_, str>> {
        match self.require(field)? {
            FieldValue::Text(s) => Ok(Cow::Borrowed(s.as_str())),
            FieldValue::Number(v) => Ok(Cow::Owned(v.to_string())),
        }
    }

    /// Field as a finite float. Surrounding whitespace is ignored; anything else
    /// that does not parse is reported rather than coerced.
    pub fn float(&self, field: &str) -> Result<f64> {
        let v = match self.require(field)? {
            FieldValue::Number(v) => Some(*v),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok(),
        };
        match v {
            Some(v) if v.is_finite() => Ok(v),
            _ => Err(self.non_numeric(field)),
        }
    }

    /// Field as a whole number, truncating any fractional part toward zero.
    pub fn int(&self, field: &str) -> Result<i64> {
        let v = self.float(field)?.trunc();
        if v < i64::MIN as f64 || v > i64::MAX as f64 {
            return Err(self.non_numeric(field));
        }
        Ok(v as i64)
    }

    fn non_numeric(&self, field: &str) -> ChartError {
        let value = match self.get(field) {
            Some(FieldValue::Text(s)) => s.clone(),
            Some(FieldValue::Number(v)) => v.to_string(),
            None => String::new(),
        };
        ChartError::NonNumericValue { field: field.to_string(), row: self.row, value }
    }
}

/// Loaded rows plus the header order. Never mutated after construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordSet {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl RecordSet {
    /// Build a set from in-memory rows; row indices are assigned in iteration order.
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        let records = records
            .into_iter()
            .enumerate()
            .map(|(row, mut r)| {
                r.row = row;
                r
            })
            .collect();
        Self { columns, records }
    }

    /// Read delimited text with a header row. Short rows are accepted here and
    /// surface as `MissingField` when a schema asks for the absent column.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let columns = rdr
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect::<Vec<_>>();
        debug!("csv headers: {:?}", columns);

        let mut records = Vec::new();
        for rec in rdr.records() {
            let rec = rec?;
            let pairs = columns.iter().zip(rec.iter()).map(|(c, v)| (c.clone(), v));
            records.push(Record::from_pairs(pairs));
        }
        debug!("csv loaded {} rows", records.len());
        Ok(Self::new(columns, records))
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref()).map_err(csv::Error::from)?;
        Self::from_csv_reader(file)
    }

    pub fn columns(&self) -> &[String] { &self.columns }

    pub fn records(&self) -> &[Record] { &self.records }

    pub fn len(&self) -> usize { self.records.len() }

    pub fn is_empty(&self) -> bool { self.records.is_empty() }
}
