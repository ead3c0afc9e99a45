use clap::Parser;
use colored::*;
use docgrep::cli::Cli;
use docgrep::config::{Config, OutputFormat};
use docgrep::error::{DocgrepError, Result as DocgrepResult};
use docgrep::output::OutputFormatter;
use docgrep::progress::ProgressReporter;
use docgrep::{spawn_search, CancellationToken};
use env_logger::{Builder, Env, Target};
use log::{info, warn};
use std::fs;
use std::io::IsTerminal;
use std::time::Instant;

fn main() -> DocgrepResult<()> {
    let cli = Cli::parse();
    setup_logging(&cli)?;

    let start_time = Instant::now();
    let config = Config::load().unwrap_or_else(|e| {
        warn!("Ignoring configuration file: {e}");
        Config::default()
    });
    let search_config = cli.search_config(&config);
    let format = cli.output_format(&config);

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        ctrlc::set_handler(move || cancel.cancel())
            .map_err(|e| DocgrepError::Other(format!("Failed to install Ctrl-C handler: {e}")))?;
    }

    let mut progress = if std::io::stderr().is_terminal() {
        ProgressReporter::new()
    } else {
        ProgressReporter::hidden()
    };

    let handle = spawn_search(search_config, cancel);
    for event in handle.events() {
        progress.update(&event);
    }
    let summary = handle.join()?;
    let stats = progress.finish();
    info!(
        "Progress: {} files scanned, {} matched, {} matches, {} failed",
        stats.files_scanned, stats.files_matched, stats.matches_found, stats.failures
    );

    let formatter = OutputFormatter::new(format).with_summary(config.display.show_summary);
    print!("{}", formatter.format_summary(&summary)?);

    if format == OutputFormat::Text && !summary.diagnostics.is_empty() {
        eprintln!("\n{}", "Errors encountered during processing:".red().bold());
        for diagnostic in &summary.diagnostics {
            eprintln!(
                "{}",
                format!("{}: {}", diagnostic.path.display(), diagnostic.message).red()
            );
        }
    }

    info!(
        "Application finished. Total elapsed time: {:.2?}",
        start_time.elapsed()
    );
    Ok(())
}

fn setup_logging(cli: &Cli) -> DocgrepResult<()> {
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_level));

    builder.format(|buf, record| {
        use std::io::Write;
        writeln!(
            buf,
            "{} [{}] [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.module_path().unwrap_or("unknown"),
            record.args()
        )
    });

    if let Some(log_path) = &cli.log {
        if let Some(parent_dir) = log_path.parent() {
            if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
                fs::create_dir_all(parent_dir)?;
            }
        }
        let log_file = fs::File::create(log_path)?;
        builder.target(Target::Pipe(Box::new(log_file)));
    } else {
        builder.target(Target::Stderr);
    }

    builder
        .try_init()
        .map_err(|e| DocgrepError::Other(e.to_string()))?;
    Ok(())
}
