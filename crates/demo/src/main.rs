// File: crates/demo/src/main.rs
// Summary: Demo loads the survey and fuel-poverty CSVs, replays scripted events and prints instructions as JSON lines.
// Usage: survey-chart-demo [survey.csv] [fuel-poverty.csv] [config.json]

use anyhow::{Context, Result};
use log::info;
use serde::Deserialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use survey_chart_core::{
    ChartController, ChartEvent, DotChartConfig, DotChartController, DotChartSchema, DrawInstruction,
    InteractiveChart, LineChartConfig, LineChartController, LineChartSchema, RecordSet,
};

const SURVEY_CSV: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/cost-of-living.csv");
const FUEL_CSV: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/fuel-poverty.csv");

/// Optional JSON overrides; missing keys keep the chart defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DemoConfig {
    dot: DotChartConfig,
    line: LineChartConfig,
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let survey_raw = args.next().unwrap_or_else(|| SURVEY_CSV.to_string());
    let fuel_raw = args.next().unwrap_or_else(|| FUEL_CSV.to_string());
    let config = match args.next() {
        Some(p) => load_config(Path::new(&p))?,
        None => DemoConfig::default(),
    };

    let survey_path = resolve_path(&survey_raw)?;
    let fuel_path = resolve_path(&fuel_raw)?;

    let survey = RecordSet::from_csv_path(&survey_path)
        .with_context(|| format!("failed to load CSV '{}'", survey_path.display()))?;
    info!("loaded {} survey rows from {}", survey.len(), survey_path.display());
    let dot = DotChartController::new(&survey, &DotChartSchema::default(), config.dot)
        .context("building dot chart")?;
    run_dot(InteractiveChart::new(dot))?;

    let fuel = RecordSet::from_csv_path(&fuel_path)
        .with_context(|| format!("failed to load CSV '{}'", fuel_path.display()))?;
    info!("loaded {} fuel-poverty rows from {}", fuel.len(), fuel_path.display());
    let line = LineChartController::new(&fuel, &LineChartSchema::default(), config.line)
        .context("building line chart")?;
    run_line(InteractiveChart::new(line))?;

    Ok(())
}

fn run_dot(mut chart: InteractiveChart<DotChartController>) -> Result<()> {
    emit(chart.controller().id(), "load", &chart.initial_render())?;

    let rows = chart.controller().dataset().series.len();
    let answers = chart.controller().dataset().answers.clone();
    for row in 0..rows {
        step(&mut chart, "hover", ChartEvent::PointerMove { x: 300.0, y: 0.0, row: Some(row) })?;
    }
    step(&mut chart, "leave", ChartEvent::PointerLeave)?;
    // Toggle every answer off; the last one resets to all.
    for a in &answers {
        step(&mut chart, "toggle", ChartEvent::LegendClick { category: a.clone() })?;
    }
    Ok(())
}

fn run_line(mut chart: InteractiveChart<LineChartController>) -> Result<()> {
    emit(chart.controller().id(), "load", &chart.initial_render())?;

    let years = chart.controller().dataset().years.clone();
    let regions = chart.controller().dataset().regions.clone();
    let xs = years
        .iter()
        .map(|y| chart.controller().x_scale().to_px(*y as f64))
        .collect::<Vec<_>>();

    for x in &xs {
        step(&mut chart, "move", ChartEvent::PointerMove { x: *x + 2.0, y: 120.0, row: None })?;
    }
    if let Some(first) = regions.first() {
        step(&mut chart, "toggle", ChartEvent::LegendClick { category: first.clone() })?;
        if let Some(x) = xs.last() {
            step(&mut chart, "move", ChartEvent::PointerMove { x: *x, y: 120.0, row: None })?;
        }
        step(&mut chart, "toggle", ChartEvent::LegendClick { category: first.clone() })?;
    }
    step(&mut chart, "leave", ChartEvent::PointerLeave)?;
    Ok(())
}

fn step<C: ChartController>(chart: &mut InteractiveChart<C>, label: &str, event: ChartEvent) -> Result<()> {
    let out = chart
        .handle(&event)
        .with_context(|| format!("{} chart: handling {:?}", chart.controller().id(), event))?;
    emit(chart.controller().id(), label, &out)
}

fn emit(chart: &str, step: &str, instructions: &[DrawInstruction]) -> Result<()> {
    for i in instructions {
        let line = json!({ "chart": chart, "step": step, "instruction": i });
        println!("{}", serde_json::to_string(&line)?);
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<DemoConfig> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading config '{}'", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing config '{}'", path.display()))
}

/// Resolve path, trying a .csv/.cvs swap if needed.
fn resolve_path(raw: &str) -> Result<PathBuf> {
    let p = Path::new(raw);
    if p.exists() {
        return Ok(p.to_path_buf());
    }
    if let Some(alt) = swap_ext(p) {
        if alt.exists() {
            info!("using {} (extension swapped between .csv/.cvs)", alt.display());
            return Ok(alt);
        }
    }
    anyhow::bail!("file not found: {}", p.display());
}

fn swap_ext(p: &Path) -> Option<PathBuf> {
    let mut alt = p.to_path_buf();
    let ext = p.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "cvs" => {
            alt.set_extension("csv");
            Some(alt)
        }
        "csv" => {
            alt.set_extension("cvs");
            Some(alt)
        }
        _ => None,
    }
}
