use anyhow::{Context, Result};
use autochart::csv_reader;
use autochart::layout::format_tick;
use autochart::recommend::recommend_chart_kind;
use autochart::{build_chart, ChartConfig, ChartKind, ChartOutput, Dataset, DEFAULT_HEIGHT_PX};
use clap::{Parser, ValueEnum};
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

#[derive(Parser, Debug)]
#[command(name = "autochart")]
#[command(about = "Turn tabular records on stdin into a chart descriptor", long_about = None)]
struct Args {
    /// Chart kind to build
    #[arg(short, long, value_enum, default_value_t = ChartKind::Bar)]
    kind: ChartKind,

    /// Display height in pixels passed through to the layout hint
    #[arg(long, default_value_t = DEFAULT_HEIGHT_PX)]
    height: u32,

    /// One series per year instead of one aggregated series
    #[arg(long)]
    year_pivot: bool,

    /// Format of the dataset on stdin
    #[arg(short, long, value_enum, default_value_t = InputFormat::Json)]
    input: InputFormat,

    /// Format written to stdout
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    output: OutputFormat,

    /// Print the recommended chart kind instead of a descriptor
    #[arg(long)]
    recommend: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let dataset = read_dataset(args.input).context("Failed to read dataset from stdin")?;
    tracing::info!(records = dataset.len(), "dataset loaded");

    let rendered = if args.recommend {
        serde_json::to_string_pretty(&recommend_chart_kind(&dataset))?
    } else {
        let config = ChartConfig::new(args.kind)
            .with_height(args.height)
            .with_year_pivot(args.year_pivot);
        let output = build_chart(&dataset, &config);
        match args.output {
            OutputFormat::Json => serde_json::to_string_pretty(&output)?,
            OutputFormat::Table => render_table(&output),
        }
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", rendered).context("Failed to write to stdout")?;
    handle.flush().context("Failed to flush stdout")?;

    Ok(())
}

fn read_dataset(format: InputFormat) -> Result<Dataset> {
    match format {
        InputFormat::Csv => Ok(Dataset::from_csv(csv_reader::read_csv_from_stdin()?)),
        InputFormat::Json => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            Dataset::from_json_str(&input).context("Input is not a JSON array of objects")
        }
    }
}

/// Plain-text view: one row per label, one column per series
fn render_table(output: &ChartOutput) -> String {
    let chart = match output.chart() {
        Some(chart) => chart,
        None => return "no data available for visualization".to_string(),
    };
    let desc = &chart.descriptor;

    let width = desc.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0).max(5);
    let mut lines = Vec::with_capacity(desc.labels.len() + 1);

    let mut header = format!("{:<width$}", "label", width = width);
    for series in &desc.series {
        header.push_str(&format!("  {}", series.name));
    }
    lines.push(header);

    for (idx, label) in desc.labels.iter().enumerate() {
        let mut line = format!("{:<width$}", label, width = width);
        for series in &desc.series {
            let cell = series.values.get(idx).map(|v| format_tick(*v)).unwrap_or_default();
            line.push_str(&format!("  {:>w$}", cell, w = series.name.chars().count()));
        }
        lines.push(line);
    }

    lines.join("\n")
}
