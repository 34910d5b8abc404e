// File: crates/chart-core/tests/aggregate.rs
// Purpose: Aggregation of wide survey tables and long regional tables, including load errors.

use survey_chart_core::{
    aggregate, aggregate_dot, aggregate_line, AxisKey, ChartError, ChartSchema, DotChartSchema, LineChartSchema,
    Record, RecordSet, SeriesPoint,
};

const SURVEY: &str = "\
How are you coping?,18-24,25-34,35-49,50-64,65+
Very well,12,42,20,18,25
Quite well,30,42,33,35,41
Not very well,28,42,27,25,19
Not at all well,20,42,12,14,9
Don't know,10,42,8,8,6
";

#[test]
fn fixed_age_group_column_yields_constant_series() {
    let set = RecordSet::from_csv_reader(SURVEY.as_bytes()).unwrap();
    let ds = aggregate_dot(&set, &DotChartSchema::default()).unwrap();

    assert_eq!(ds.question, "How are you coping?");
    assert_eq!(ds.answers.len(), 5);
    assert_eq!(ds.series.len(), 5);
    let group = ds.series.iter().find(|s| s.entity == "25-34").expect("age group present");
    assert_eq!(group.points.len(), 5);
    assert!(group.points.iter().all(|p| p.value == 42.0));
    assert_eq!(group.points[0].key, AxisKey::Category("Very well".into()));
}

#[test]
fn aggregation_is_idempotent() {
    let set = RecordSet::from_csv_reader(SURVEY.as_bytes()).unwrap();
    let snapshot = set.clone();
    let a = aggregate_dot(&set, &DotChartSchema::default()).unwrap();
    let b = aggregate_dot(&set, &DotChartSchema::default()).unwrap();
    assert_eq!(a, b);
    assert_eq!(set, snapshot);
}

#[test]
fn region_rows_become_one_series() {
    let schema = LineChartSchema { secondary_field: None, ..LineChartSchema::default() };
    let rows = vec![
        Record::from_pairs([("Region", "North"), ("Year", "2010"), (schema.value_field.as_str(), "12.3")]),
        Record::from_pairs([("Region", "North"), ("Year", "2011"), (schema.value_field.as_str(), "11.0")]),
    ];
    let set = RecordSet::new(vec![], rows);
    let series = aggregate(&set, &ChartSchema::Line(schema)).unwrap();

    assert_eq!(series.len(), 1);
    assert_eq!(series[0].entity, "North");
    assert_eq!(
        series[0].points,
        vec![SeriesPoint::new(AxisKey::Year(2010), 12.3), SeriesPoint::new(AxisKey::Year(2011), 11.0)]
    );
}

#[test]
fn secondary_value_is_carried() {
    let data = "\
Region,Year,Proportion of households fuel poor (%),Proportion of households fuel poor within region (%)
North,2012,11.5,14.2
";
    let set = RecordSet::from_csv_reader(data.as_bytes()).unwrap();
    let ds = aggregate_line(&set, &LineChartSchema::default()).unwrap();
    assert_eq!(ds.series[0].points[0].secondary_value, Some(14.2));
}

#[test]
fn missing_age_group_column_fails() {
    let data = "Q,18-24,25-34\nYes,1,2\n";
    let set = RecordSet::from_csv_reader(data.as_bytes()).unwrap();
    match aggregate_dot(&set, &DotChartSchema::default()) {
        Err(ChartError::MissingField { field, row }) => {
            assert_eq!(field, "35-49");
            assert_eq!(row, 0);
        }
        other => panic!("expected MissingField, got {other:?}"),
    }
}

#[test]
fn non_numeric_percentage_fails() {
    let data = "\
Region,Year,Proportion of households fuel poor (%),Proportion of households fuel poor within region (%)
North,2012,11.5,14.2
North,2013,n/a,14.0
";
    let set = RecordSet::from_csv_reader(data.as_bytes()).unwrap();
    match aggregate_line(&set, &LineChartSchema::default()) {
        Err(ChartError::NonNumericValue { field, row, value }) => {
            assert_eq!(field, "Proportion of households fuel poor (%)");
            assert_eq!(row, 1);
            assert_eq!(value, "n/a");
        }
        other => panic!("expected NonNumericValue, got {other:?}"),
    }
}

#[test]
fn duplicate_answer_keeps_first_row() {
    let data = "Q,18-24,25-34,35-49,50-64,65+\nYes,1,2,3,4,5\nYes,9,9,9,9,9\nNo,6,7,8,9,10\n";
    let set = RecordSet::from_csv_reader(data.as_bytes()).unwrap();
    let ds = aggregate_dot(&set, &DotChartSchema::default()).unwrap();
    assert_eq!(ds.answers, vec!["Yes", "No"]);
    assert_eq!(ds.series[0].points.len(), 2);
    assert_eq!(ds.series[0].points[0].value, 1.0);
    assert_eq!(ds.series[4].points[0].value, 5.0);
}

#[test]
fn non_numeric_age_group_cell_fails() {
    let data = "Q,18-24,25-34,35-49,50-64,65+\nYes,1,2,x,4,5\n";
    let set = RecordSet::from_csv_reader(data.as_bytes()).unwrap();
    match aggregate_dot(&set, &DotChartSchema::default()) {
        Err(ChartError::NonNumericValue { field, row, value }) => {
            assert_eq!(field, "35-49");
            assert_eq!(row, 0);
            assert_eq!(value, "x");
        }
        other => panic!("expected NonNumericValue, got {other:?}"),
    }
}
