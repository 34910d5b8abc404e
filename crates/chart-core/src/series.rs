// File: crates/chart-core/src/series.rs
// Summary: Series model and aggregation of tabular rows into per-entity series.
// Notes:
// - Dot-chart input is wide (one column per age group); line-chart input is long
//   (one row per region/year). Both end up as `Series` keyed by `AxisKey`.
// - Aggregation only borrows the record set; running it twice yields equal output.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use log::{debug, warn};
use serde::Serialize;

use crate::error::{ChartError, Result};
use crate::records::RecordSet;

/// Position of a point along the category/time axis.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum AxisKey {
    Category(String),
    Year(i64),
}

impl AxisKey {
    pub fn as_year(&self) -> Option<i64> {
        match self {
            AxisKey::Year(y) => Some(*y),
            AxisKey::Category(_) => None,
        }
    }

    pub fn as_category(&self) -> Option<&str> {
        match self {
            AxisKey::Category(c) => Some(c),
            AxisKey::Year(_) => None,
        }
    }
}

impl fmt::Display for AxisKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisKey::Category(c) => f.write_str(c),
            AxisKey::Year(y) => write!(f, "{y}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub key: AxisKey,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_value: Option<f64>,
}

impl SeriesPoint {
    pub fn new(key: AxisKey, value: f64) -> Self {
        Self { key, value, secondary_value: None }
    }
}

/// Ordered points for one entity; keys are unique and in axis order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Series {
    pub entity: String,
    pub points: Vec<SeriesPoint>,
}

impl Series {
    pub fn point(&self, key: &AxisKey) -> Option<&SeriesPoint> {
        self.points.iter().find(|p| &p.key == key)
    }

    /// (min, max) of point values, or None for an empty series.
    pub fn extent(&self) -> Option<(f64, f64)> {
        self.points.iter().fold(None, |acc, p| match acc {
            None => Some((p.value, p.value)),
            Some((lo, hi)) => Some((lo.min(p.value), hi.max(p.value))),
        })
    }
}

/// Columns of the wide survey table. `answer_field: None` means "first column",
/// whose header is the question text.
#[derive(Clone, Debug, PartialEq)]
pub struct DotChartSchema {
    pub answer_field: Option<String>,
    pub age_groups: Vec<String>,
}

impl Default for DotChartSchema {
    fn default() -> Self {
        Self {
            answer_field: None,
            age_groups: ["18-24", "25-34", "35-49", "50-64", "65+"].iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineChartSchema {
    pub region_field: String,
    pub year_field: String,
    pub value_field: String,
    pub secondary_field: Option<String>,
}

impl Default for LineChartSchema {
    fn default() -> Self {
        Self {
            region_field: "Region".into(),
            year_field: "Year".into(),
            value_field: "Proportion of households fuel poor (%)".into(),
            secondary_field: Some("Proportion of households fuel poor within region (%)".into()),
        }
    }
}

#[derive(Clone, Debug)]
pub enum ChartSchema {
    Dot(DotChartSchema),
    Line(LineChartSchema),
}

/// Survey answers broken down by age group. One series per age group, one
/// point per answer in row order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DotDataset {
    pub question: String,
    pub answers: Vec<String>,
    pub series: Vec<Series>,
}

/// Regional time series. `years` is the ascending union of all series keys.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineDataset {
    pub regions: Vec<String>,
    pub years: Vec<i64>,
    pub series: Vec<Series>,
}

/// Aggregate using whichever schema applies; returns just the series.
pub fn aggregate(records: &RecordSet, schema: &ChartSchema) -> Result<Vec<Series>> {
    match schema {
        ChartSchema::Dot(s) => aggregate_dot(records, s).map(|d| d.series),
        ChartSchema::Line(s) => aggregate_line(records, s).map(|d| d.series),
    }
}

pub fn aggregate_dot(records: &RecordSet, schema: &DotChartSchema) -> Result<DotDataset> {
    if records.is_empty() {
        return Err(ChartError::EmptyDataset);
    }
    let question = match &schema.answer_field {
        Some(f) => f.clone(),
        None => records.columns().first().cloned().ok_or(ChartError::EmptyDataset)?,
    };

    // Validate every row before building anything.
    let mut rows: Vec<(String, Vec<f64>)> = Vec::with_capacity(records.len());
    for rec in records.records() {
        let answer = rec.text(&question)?.into_owned();
        let values = schema
            .age_groups
            .iter()
            .map(|g| rec.int(g).map(|v| v as f64))
            .collect::<Result<Vec<_>>>()?;
        rows.push((answer, values));
    }

    let mut seen = BTreeSet::new();
    rows.retain(|(answer, _)| {
        let fresh = seen.insert(answer.clone());
        if !fresh {
            warn!("duplicate answer '{}' ignored; first row wins", answer);
        }
        fresh
    });

    let answers = rows.iter().map(|(a, _)| a.clone()).collect::<Vec<_>>();
    let series = schema
        .age_groups
        .iter()
        .enumerate()
        .map(|(gi, group)| Series {
            entity: group.clone(),
            points: rows
                .iter()
                .map(|(answer, values)| SeriesPoint::new(AxisKey::Category(answer.clone()), values[gi]))
                .collect(),
        })
        .collect::<Vec<_>>();

    debug!("dot dataset: {} answers x {} age groups", answers.len(), series.len());
    Ok(DotDataset { question, answers, series })
}

pub fn aggregate_line(records: &RecordSet, schema: &LineChartSchema) -> Result<LineDataset> {
    if records.is_empty() {
        return Err(ChartError::EmptyDataset);
    }

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Series> = Vec::new();
    for rec in records.records() {
        let region = rec.text(&schema.region_field)?.into_owned();
        let year = rec.int(&schema.year_field)?;
        let value = rec.float(&schema.value_field)?;
        let secondary_value = match &schema.secondary_field {
            Some(f) => Some(rec.float(f)?),
            None => None,
        };

        let gi = *index.entry(region.clone()).or_insert_with(|| {
            groups.push(Series { entity: region.clone(), points: Vec::new() });
            groups.len() - 1
        });
        let points = &mut groups[gi].points;
        let key = AxisKey::Year(year);
        if points.iter().any(|p| p.key == key) {
            warn!("duplicate row for region '{}' year {} ignored; first row wins", region, year);
            continue;
        }
        points.push(SeriesPoint { key, value, secondary_value });
    }

    for s in &mut groups {
        s.points.sort_by(|a, b| a.key.cmp(&b.key));
    }
    let years = groups
        .iter()
        .flat_map(|s| s.points.iter().filter_map(|p| p.key.as_year()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>();
    let regions = groups.iter().map(|s| s.entity.clone()).collect::<Vec<_>>();

    debug!("line dataset: {} regions over {} years", regions.len(), years.len());
    Ok(LineDataset { regions, years, series: groups })
}
