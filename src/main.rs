mod calc;
mod cmd;
mod data;
mod grid;
mod logging;
mod ui;

use clap::{Parser, Subcommand};
use data::{resolve_locale, AppSettings, FeatureFlags};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "yearend", about = "countdown to the end of the year")]
struct Cli {
    /// Directory holding an optional config.yaml (default: ./config)
    #[arg(long, default_value = "./config")]
    config_dir: PathBuf,

    /// Locale for dates, e.g. en-US or fr_FR.UTF-8 (default: from LANG)
    #[arg(long)]
    locale: Option<String>,

    /// Show milliseconds and refresh every 50ms
    #[arg(long)]
    ms: bool,
    /// Show the year grid
    #[arg(long)]
    grid: bool,
    /// Draw grid cells as circles
    #[arg(long)]
    circles: bool,
    /// Highlight holidays on the grid
    #[arg(long)]
    holidays: bool,
    /// Highlight the longest and shortest days on the grid
    #[arg(long)]
    solstice: bool,
    /// Color the widget by season
    #[arg(long)]
    season: bool,

    /// Write logs to this file (RUST_LOG controls the level)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the holidays highlighted on the grid
    Holidays {
        /// Year to list (default: current year)
        #[arg(short, long)]
        year: Option<i32>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the countdown once and exit
    Status,
}

impl Cli {
    fn flags(&self) -> FeatureFlags {
        FeatureFlags {
            show_milliseconds: self.ms,
            show_grid: self.grid,
            show_circles: self.circles,
            show_holidays: self.holidays,
            show_solstice: self.solstice,
            style_season: self.season,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let target = logging::target_for(cli.command.is_none(), cli.log_file.clone());
    let _guard = logging::init(target)?;

    let settings = AppSettings::load_from(&cli.config_dir)?;
    let flags = settings.flags.union(cli.flags());
    let locale = resolve_locale(cli.locale.as_deref(), &settings, &data::env_locales());

    match cli.command {
        None => cmd::root::run(flags, &locale),
        Some(Commands::Holidays { year, json }) => cmd::holidays::run(year, json),
        Some(Commands::Status) => cmd::status::run(flags, &locale),
    }
}
