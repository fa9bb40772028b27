//! One function per subcommand.

use std::path::Path;

use anyhow::{Context, Result, bail, ensure};
use clap::ColorChoice;
use comfy_table::Table as TextTable;
use serde::Serialize;
use tracing::{debug, info};

use csvise_cli::config::CsviseConfig;
use csvise_cli::render::{DisplayOptions, data_table, render_plain};
use csvise_cli::summary::{
    apply_color_choice, correlation_table, distribution_summary, distribution_table,
    outlier_summary, outlier_table, quality_table, stats_table,
};
use csvise_ingest::{DelimiterConfig, read_table, write_atomic, write_table};
use csvise_model::Table;
use csvise_stats::{
    OutlierMethod, StatsOptions, categorical_distributions, correlation_matrix, describe_all,
    detect_outliers, quality_report, value_distribution,
};
use csvise_transform::CleaningPipeline;
use csvise_validate::validate;

use crate::cli::{
    CleanArgs, Cli, Command, CorrelationArgs, DistributionArgs, OutlierMethodArg, OutliersArgs,
    QualityArgs, StatsArgs, ValidateArgs, ViewArgs,
};

/// Settings shared by every subcommand.
struct Session {
    config: CsviseConfig,
    delimiters: DelimiterConfig,
    color: ColorChoice,
}

impl Session {
    fn load(&self, path: &Path) -> Result<Table> {
        read_table(path, &self.delimiters).with_context(|| format!("load {}", path.display()))
    }

    fn print_table(&self, mut table: TextTable) {
        apply_color_choice(&mut table, self.color);
        println!("{table}");
    }
}

pub fn run(cli: &Cli) -> Result<()> {
    let config = CsviseConfig::load(cli.config.as_deref()).context("load configuration")?;
    let session = Session {
        delimiters: config.delimiter_config(cli.delimiter.clone()),
        config,
        color: cli.color.color,
    };
    match &cli.command {
        Command::View(args) => run_view(&session, args),
        Command::Validate(args) => run_validate(&session, args),
        Command::Clean(args) => run_clean(&session, args),
        Command::Stats(args) => run_stats(&session, args),
        Command::Correlation(args) => run_correlation(&session, args),
        Command::Outliers(args) => run_outliers(&session, args),
        Command::Distribution(args) => run_distribution(&session, args),
        Command::Quality(args) => run_quality(&session, args),
    }
}

fn run_view(session: &Session, args: &ViewArgs) -> Result<()> {
    let table = session.load(&args.input.file)?;
    let defaults = session.config.display_options();
    let options = DisplayOptions {
        start_index: args.start.map_or(defaults.start_index, |start| start.max(1)),
        row_limit: args.rows.or(defaults.row_limit),
        column_lines: args.column_lines || defaults.column_lines,
        row_lines: args.row_lines || defaults.row_lines,
        case: args.case.or(defaults.case),
    };
    let report = validate(&table, &session.config.validation_options());

    if let Some(path) = &args.save_to_file {
        let text = render_plain(&table, &options, args.report.then_some(&report));
        write_atomic(path, format!("{text}\n").as_bytes())
            .with_context(|| format!("save view to {}", path.display()))?;
        println!("Output saved to {}", path.display());
        return Ok(());
    }

    session.print_table(data_table(&table, &options, Some(&report)));
    if args.report {
        println!();
        println!("{}", report.render());
    }
    Ok(())
}

fn run_validate(session: &Session, args: &ValidateArgs) -> Result<()> {
    let table = session.load(&args.input.file)?;
    let mut options = session.config.validation_options();
    if args.no_type_check {
        options = options.with_type_checks(false);
    }
    let options = options.with_strict_numeric(args.strict_numeric);
    let report = validate(&table, &options);
    if report.is_clean() {
        info!(file = %args.input.file.display(), "no validation findings");
    }
    if args.json {
        print_json(&report)
    } else {
        println!("{}", report.render());
        Ok(())
    }
}

fn run_clean(session: &Session, args: &CleanArgs) -> Result<()> {
    let mut table = session.load(&args.input.file)?;
    let pipeline = CleaningPipeline::new(args.steps.clone());
    debug!(steps = pipeline.steps().len(), "running cleaning pipeline");
    let report = pipeline.run(&mut table);
    write_table(&table, &args.output, args.output_delimiter.as_deref())
        .with_context(|| format!("write cleaned table to {}", args.output.display()))?;
    info!(
        output = %args.output.display(),
        failed = report.has_failures(),
        "clean finished"
    );
    if args.json {
        return print_json(&report);
    }
    println!("{}", report.render());
    println!(
        "Wrote {} rows to {}",
        report.final_row_count,
        args.output.display()
    );
    Ok(())
}

fn run_stats(session: &Session, args: &StatsArgs) -> Result<()> {
    let table = session.load(&args.input.file)?;
    let options = if args.sample {
        StatsOptions::sample()
    } else {
        StatsOptions::default()
    };
    let stats = describe_all(&table, args.columns.as_deref(), &options)
        .context("compute column statistics")?;
    if args.json {
        return print_json(&stats);
    }
    session.print_table(stats_table(&stats));
    Ok(())
}

fn run_correlation(session: &Session, args: &CorrelationArgs) -> Result<()> {
    let table = session.load(&args.input.file)?;
    let matrix =
        correlation_matrix(&table, args.columns.as_deref()).context("compute correlations")?;
    if args.json {
        return print_json(&matrix);
    }
    if matrix.is_empty() {
        println!("No numeric columns to correlate");
        return Ok(());
    }
    session.print_table(correlation_table(&matrix));
    Ok(())
}

fn run_outliers(session: &Session, args: &OutliersArgs) -> Result<()> {
    if let Some(threshold) = args.threshold {
        ensure!(
            threshold.is_finite() && threshold > 0.0,
            "threshold must be a positive number, got {threshold}"
        );
    }
    let method = match args.method {
        OutlierMethodArg::Iqr => OutlierMethod::Iqr {
            k: args.threshold.unwrap_or(OutlierMethod::DEFAULT_IQR_K),
        },
        OutlierMethodArg::Zscore => OutlierMethod::ZScore {
            threshold: args.threshold.unwrap_or(OutlierMethod::DEFAULT_Z_THRESHOLD),
        },
    };
    let table = session.load(&args.input.file)?;
    let report = detect_outliers(&table, &args.column, method)
        .with_context(|| format!("detect outliers in '{}'", args.column))?;
    if args.json {
        return print_json(&report);
    }
    println!("{}", outlier_summary(&report));
    if !report.outliers().is_empty() {
        session.print_table(outlier_table(&report));
    }
    Ok(())
}

fn run_distribution(session: &Session, args: &DistributionArgs) -> Result<()> {
    if args.top == 0 {
        bail!("--top must be at least 1");
    }
    let table = session.load(&args.input.file)?;
    let distributions = match &args.column {
        Some(column) => vec![
            value_distribution(&table, column, args.top)
                .with_context(|| format!("value distribution of '{column}'"))?,
        ],
        None => categorical_distributions(&table, args.top),
    };
    if args.json {
        return print_json(&distributions);
    }
    if distributions.is_empty() {
        println!("No categorical columns");
    }
    for distribution in &distributions {
        println!("{}", distribution_summary(distribution));
        session.print_table(distribution_table(distribution));
    }
    Ok(())
}

fn run_quality(session: &Session, args: &QualityArgs) -> Result<()> {
    let table = session.load(&args.input.file)?;
    let report = quality_report(&table);
    if args.json {
        return print_json(&report);
    }
    session.print_table(quality_table(&report));
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{text}");
    Ok(())
}
