// Renders one polyline per year in a 3-D frame: x is the year, y the time
// slot within the month, z the irradiance. Missing readings break the line
// instead of being drawn as zero.

use anyhow::{anyhow, ensure, Context, Result};
use clap::Parser;
use plotters::prelude::*;
use plotters::style::colors::colormaps::ViridisRGB;
use std::error::Error;
use std::path::{Path, PathBuf};

use irradiance_fill::{xlsx, IrradianceTable};

// 10x8 inches at 300 dpi
const OUTPUT_WIDTH: u32 = 3000;
const OUTPUT_HEIGHT: u32 = 2400;
const IRRADIANCE_MAX: f64 = 5000.0;

#[derive(Debug, Parser)]
#[command(version, about = "Plot irradiance curves of all years side by side in 3-D")]
struct Cli {
    /// Workbook with one worksheet per month
    #[arg(long)]
    workbook: PathBuf,

    /// Worksheet to plot (defaults to the first one)
    #[arg(long)]
    sheet: Option<String>,

    /// Output image
    #[arg(long, default_value = "irradiance_behaviour_3d.png")]
    output: PathBuf,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = Cli::parse();

    let sheet = match args.sheet {
        Some(sheet) => sheet,
        None => {
            let names = xlsx::sheet_names(&args.workbook)?;
            let first = names.first().context("workbook has no sheets")?.clone();
            log::info!("no sheet given, using {first:?} (available: {names:?})");
            first
        }
    };

    let table = xlsx::load_sheet(&args.workbook, &sheet)?;
    ensure!(table.n_years() > 0, "sheet {sheet:?} has no year columns to plot");
    ensure!(table.n_slots() > 0, "sheet {sheet:?} has no data rows");

    // First quarter of the month, roughly 8 days of 5-minute slots.
    let slots = (table.n_slots() / 4).max(1);
    log::info!(
        "plotting {} of {} time slots for years {:?}",
        slots,
        table.n_slots(),
        table.year_labels
    );

    render(&table, slots, &args.output)
        .map_err(|e| anyhow!("failed to render {}: {e}", args.output.display()))?;
    log::info!("saved 3-D plot to {}", args.output.display());

    Ok(())
}

fn render(table: &IrradianceTable, slots: usize, out: &Path) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(out, (OUTPUT_WIDTH, OUTPUT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let n_years = table.n_years();
    let mut chart = ChartBuilder::on(&root)
        .margin(60)
        .caption("Irradiance Behavior Over 8 Days", ("sans-serif", 80))
        .build_cartesian_3d(
            -0.5..n_years as f64 - 0.5,
            0.0..slots as f64,
            0.0..IRRADIANCE_MAX,
        )?;

    chart.with_projection(|mut pb| {
        pb.pitch = 0.52; // ~30 degrees elevation
        pb.yaw = 2.1; // ~120 degrees azimuth
        pb.scale = 0.8;
        pb.into_matrix()
    });

    let year_labels = table.year_labels.clone();
    let x_fmt = |x: &f64| {
        let i = x.round() as i64;
        if (0..year_labels.len() as i64).contains(&i) {
            year_labels[i as usize].clone()
        } else {
            String::new()
        }
    };
    chart
        .configure_axes()
        .x_labels(n_years)
        .y_labels(0)
        .z_labels(5)
        .label_style(("sans-serif", 32))
        .x_formatter(&x_fmt)
        .draw()?;

    for (year_idx, year) in table.year_labels.iter().enumerate() {
        let shade = if n_years > 1 {
            year_idx as f64 / (n_years - 1) as f64
        } else {
            0.5
        };
        let color = ViridisRGB.get_color(shade);

        let series: Vec<Option<f64>> = table.year_series(year_idx).take(slots).collect();
        for (seg_idx, segment) in segments(&series).into_iter().enumerate() {
            let points = segment
                .into_iter()
                .map(|(slot, v)| (year_idx as f64, slot as f64, v));
            let anno = chart.draw_series(LineSeries::new(points, color.stroke_width(2)))?;
            if seg_idx == 0 {
                anno.label(year.clone()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 40, y)], color.stroke_width(3))
                });
            }
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperMiddle)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", 36))
        .draw()?;

    root.present()?;
    Ok(())
}

/// Splits one year's series into runs of consecutive present readings,
/// keeping the slot index of each reading.
fn segments(series: &[Option<f64>]) -> Vec<Vec<(usize, f64)>> {
    let mut out = Vec::new();
    let mut current: Vec<(usize, f64)> = Vec::new();
    for (slot, cell) in series.iter().enumerate() {
        match cell {
            Some(v) => current.push((slot, *v)),
            None => {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}
