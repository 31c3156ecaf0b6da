//! lucy - plot LUCY anthropogenic heat flux model outputs
//!
//! This is the main entry point for the lucy command-line tool.

use anyhow::Context;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing::info;

use lucy_postproc::batch::{frame_range, run_batch, BatchPlan, FrameTemplate};
use lucy_postproc::config::Command;
use lucy_postproc::inspect::Report;
use lucy_postproc::render::spatial::plot_spatial_file;
use lucy_postproc::render::{render_component_means, render_envelopes, render_timeseries, Envelope};
use lucy_postproc::statistics::{all_components, HourlyAxis};
use lucy_postproc::{
    init_tracing, log_error, log_operation_end, log_operation_start, Config, LucyError, PlotStyle,
    TemporalData,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<LucyError>() {
                Some(LucyError::MissingInput { path }) => {
                    println!("ERROR: {} does not exist. Exiting", path.display());
                }
                Some(err) => {
                    log_error(err, "lucy");
                    eprintln!("Error: {:#}", e);
                }
                None => eprintln!("Error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let (config, command) = Config::load()?;
    config.validate().context("Invalid configuration")?;

    init_tracing(&config.log_level);
    info!("Starting lucy v{}", env!("CARGO_PKG_VERSION"));

    let style = &config.style;
    match command {
        Command::Spatial { file, output } => {
            require_file(&file)?;
            let output = output.unwrap_or_else(|| default_output(&file, None));
            info!(file = %file.display(), "Opening file");

            let figure = plot_spatial_file(&file, style)
                .with_context(|| format!("Failed to plot {}", file.display()))?;
            figure.save(&output)?;
        }

        Command::Timeseries {
            file,
            column,
            output,
        } => {
            require_file(&file)?;
            let output = output.unwrap_or_else(|| default_output(&file, Some(&column)));

            let data = TemporalData::open(&file)?;
            let values = data
                .column(&column)
                .with_context(|| format!("Cannot plot {}", file.display()))?;
            render_timeseries(values, style)?.save(&output)?;
        }

        Command::Statistics {
            file,
            start_date,
            prefix,
        } => {
            require_file(&file)?;
            let prefix = prefix.unwrap_or_else(|| file_stem(&file));
            plot_statistics(&file, &start_date, &prefix, style)?;
        }

        Command::Batch {
            dir,
            template,
            start,
            count,
            prefix,
        } => {
            if !dir.is_dir() {
                return Err(LucyError::MissingInput { path: dir }.into());
            }
            let plan = BatchPlan {
                input_dir: dir,
                template: FrameTemplate::parse(&template)?,
                indices: frame_range(start, count)?,
                prefix,
                output_dir: PathBuf::new(),
            };
            run_batch(&plan, |path| plot_spatial_file(path, style)).context("Batch aborted")?;
        }

        Command::Inspect { file, json } => {
            require_file(&file)?;
            let report = Report::from_path(&file)?;
            if json {
                println!("{}", report.to_json()?);
            } else {
                println!("{}", report);
            }
        }
    }

    Ok(())
}

/// The three statistics figures: means, min/max envelopes, std bands
fn plot_statistics(
    file: &Path,
    start_date: &str,
    prefix: &str,
    style: &PlotStyle,
) -> anyhow::Result<()> {
    let start = Instant::now();
    log_operation_start("plot_statistics", Some(&file.display().to_string()));

    let data = TemporalData::open(file)?;
    let stats = all_components(data.table())
        .with_context(|| format!("{} is not a LUCY statistics file", file.display()))?;
    let axis = HourlyAxis::parse(start_date)?;

    render_component_means(&stats, &axis, style)?.save(format!("{}_means.png", prefix))?;
    for envelope in [Envelope::MinMax, Envelope::StdDev] {
        render_envelopes(&stats, &axis, envelope, style)?
            .save(format!("{}_{}.png", prefix, envelope.file_suffix()))?;
    }

    log_operation_end("plot_statistics", start, true);
    Ok(())
}

fn require_file(path: &Path) -> Result<(), LucyError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(LucyError::MissingInput {
            path: path.to_path_buf(),
        })
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "lucy".to_string())
}

/// `<stem>.png`, or `<stem>_<suffix>.png`, in the working directory
fn default_output(file: &Path, suffix: Option<&str>) -> PathBuf {
    let stem = file_stem(file);
    match suffix {
        Some(suffix) => PathBuf::from(format!("{}_{}.png", stem, suffix)),
        None => PathBuf::from(format!("{}.png", stem)),
    }
}
