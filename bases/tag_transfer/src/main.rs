use clap::Parser;
use color_eyre::Result;

mod batch;
mod config;
mod export;
mod import;
mod index;
mod progress;
mod scan;

use batch::Failure;
use config::Task;
use metadata_table::{AppendOutcome, SkipReason};
use progress::TerminalBar;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // Parse CLI arguments
    let args = config::CliArgs::parse();
    let config = config::Config::from_args(args)?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.default_log_filter().into()),
        )
        .init();

    match &config.task {
        Task::Export(export_config) => {
            let summary = export::run(export_config, &mut TerminalBar::new("export")).await?;
            match &summary.outcome {
                AppendOutcome::Created { rows } => {
                    println!("Created {} with {} rows", export_config.csv.display(), rows)
                }
                AppendOutcome::Appended {
                    rows,
                    added_columns,
                } if added_columns.is_empty() => {
                    println!("Appended {} rows to {}", rows, export_config.csv.display())
                }
                AppendOutcome::Appended {
                    rows,
                    added_columns,
                } => println!(
                    "Appended {} rows to {} (new columns: {})",
                    rows,
                    export_config.csv.display(),
                    added_columns.join(", ")
                ),
                AppendOutcome::Skipped { reason } => {
                    let why = match reason {
                        SkipReason::NoRecords => "no file could be read",
                        SkipReason::NoSharedColumns => "it shares no columns with the tags",
                    };
                    println!("Nothing written to {}: {}", export_config.csv.display(), why)
                }
            }
            println!("Processed {}/{} files", summary.processed, summary.total);
            print_failures(&summary.failures);
        }

        Task::Import(import_config) => {
            let summary = import::run(import_config, &mut TerminalBar::new("import")).await?;
            println!("Updated {}/{} files", summary.updated, summary.total);
            if !summary.missing.is_empty() {
                println!(
                    "{} files not found in {}",
                    summary.missing.len(),
                    import_config.mp3_dir.display()
                );
            }
            if summary.skipped_rows > 0 {
                println!("{} table rows skipped", summary.skipped_rows);
            }
            print_failures(&summary.failures);
        }

        Task::Index(index_config) => {
            let summary = index::run(index_config)?;
            println!(
                "Wrote {} entries from {} tables to {}",
                summary.entries,
                summary.tables,
                summary.output.display()
            );
        }
    }

    Ok(())
}

fn print_failures(failures: &[Failure]) {
    if failures.is_empty() {
        return;
    }
    println!("{} files failed:", failures.len());
    for failure in failures {
        println!("  {}: {}", failure.path.display(), failure.error);
    }
}
