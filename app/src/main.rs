use std::path::PathBuf;

use clap::{Parser, Subcommand};
use common::config::Settings;
use eyre::Result;
use profiling::Extractor;
use tracing::error;
use tracing_subscriber::{
    EnvFilter,
    fmt::{layer, time::ChronoLocal},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::charts::Chart;

mod charts;

const MODULES: &[&str] = &["common", "plot_common", "bar_charts", "box_plot", "profiling"];

#[derive(Parser)]
#[command(version, about = "Render benchmark statistics into charts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Chart settings, defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Print the charts that would be written without drawing them
    #[arg(long, default_value_t = false)]
    dry_run: bool,
    #[arg(short, long)]
    log: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Bar charts of a central tendency statistic, per file and chain
    Bar {
        /// Directory containing the .json files
        directory: PathBuf,
        /// One of mean, median or total
        #[arg(short, long)]
        mode: String,
    },
    /// Box plots of the min/q25/median/q75/max statistics
    #[command(name = "box")]
    BoxPlot {
        /// Directory containing the .json files
        directory: PathBuf,
    },
    /// Extract statistics files from a profiling log
    Extract {
        /// Profiling log of timer entries
        file: PathBuf,
        #[arg(short, long, env = "NAME_PREFIX", default_value = "profiling")]
        name_prefix: String,
        #[arg(short, long, default_value = "outputs")]
        output_dir: PathBuf,
        #[arg(long, default_value_t = false)]
        no_progress: bool,
    },
}

fn main() -> Result<()> {
    let log_level = std::env::var("RUST_LOG").unwrap_or("warn".to_owned());
    let args = Cli::parse();
    let file_appender = tracing_appender::rolling::never(".", "log.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let mut env_filter = EnvFilter::new(format!("bench_charts={log_level}"));

    if !args.log.is_empty() {
        for log in &args.log {
            env_filter = env_filter.add_directive(log.parse()?);
        }
    }

    for module in MODULES {
        if !args.log.iter().any(|x| x.starts_with(module)) {
            env_filter = env_filter.add_directive(format!("{module}={log_level}").parse()?);
        }
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            layer()
                .with_timer(ChronoLocal::new("%v %k:%M:%S %z".to_owned()))
                .compact(),
        )
        .with(layer().with_writer(non_blocking))
        .init();

    let settings = match &args.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };

    let result = match args.command {
        Commands::Bar { directory, mode } => {
            charts::render_directory(&directory, &settings, &Chart::Bar(mode), args.dry_run)
        }
        Commands::BoxPlot { directory } => {
            charts::render_directory(&directory, &settings, &Chart::BoxPlot, args.dry_run)
        }
        Commands::Extract {
            file,
            name_prefix,
            output_dir,
            no_progress,
        } => Extractor {
            output_dir,
            name_prefix,
            progress: !no_progress,
        }
        .run(&file)
        .map(|written| {
            for path in written {
                println!("{}", path.display());
            }
        }),
    };

    if let Err(err) = result {
        error!("{err:#?}");
        return Err(err);
    }
    Ok(())
}
