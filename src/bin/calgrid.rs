extern crate calgrid as lib;

use chrono::{Datelike, Local};
use flexi_logger::{Duplicate, FileSpec, Logger};
use lib::grid::{compute_grid, YearMonth};
use lib::view::{self, Theme};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "calgrid",
    author = "Julian Bigge <j.reedts@gmail.com>",
    about = "Month calendar grid with CSV export."
)]
pub struct Args {
    #[structopt(name = "MONTH", help = "month to show as YYYY-MM, defaults to the current month")]
    pub month: Option<YearMonth>,

    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(short = "e", long = "export", help = "write the grid as CSV file")]
    pub export: bool,

    #[structopt(
        short = "o",
        long = "output",
        help = "directory to export into",
        parse(from_os_str)
    )]
    pub output: Option<PathBuf>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .duplicate_to_stderr(Duplicate::Warn);
    }

    logger.start()?;

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;

    let today = Local::now().date_naive();
    let year_month = match args.month {
        Some(year_month) => year_month,
        None => YearMonth::new(today.year(), today.month())?,
    };

    let grid = compute_grid(year_month.year(), year_month.month())?;

    if args.export {
        let dir = args.output.unwrap_or_else(|| config.export_dir());
        let path = lib::export::write_csv(&grid, &dir)?;
        println!("{}", path.display());
    } else {
        print!("{}", view::render(&grid, &Theme::from(&config), Some(today)));
    }

    Ok(())
}
