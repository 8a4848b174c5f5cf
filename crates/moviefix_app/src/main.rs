mod command;
mod config;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use moviefix_core::FilterKey;
use moviefix_engine::{PagedFetcher, TmdbCatalog};
use moviefix_logging::{mf_info, LogDestination};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::command::Command;

/// Browse the movie catalog by release year and genre.
#[derive(Debug, Parser)]
#[command(name = "moviefix", version)]
struct Args {
    /// Only movies first released in this year.
    #[arg(long)]
    year: Option<i32>,
    /// Genre ids to require (comma separated or repeated).
    #[arg(long = "genre", value_delimiter = ',')]
    genres: Vec<i64>,
    /// Pages to load before printing (ignored with --interactive).
    #[arg(long, default_value_t = 1)]
    pages: u32,
    /// Read commands from stdin instead of printing once.
    #[arg(short, long)]
    interactive: bool,
    /// Print the view model as JSON.
    #[arg(long)]
    json: bool,
    /// Config file; defaults to ./moviefix.ron when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Debug logging (to the terminal unless --log-file is set).
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn log_destination(&self) -> LogDestination {
        match (&self.log_file, self.verbose) {
            (Some(path), _) => LogDestination::File(path.clone()),
            (None, true) => LogDestination::Terminal,
            (None, false) => LogDestination::Off,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    moviefix_logging::initialize(&args.log_destination(), level);

    let settings = config::load_settings(args.config.as_deref(), |key| std::env::var(key).ok())?;
    let image_base_url = settings.image_base_url.clone();
    let catalog = TmdbCatalog::new(settings).context(
        "catalog is not configured; set MOVIEFIX_API_KEY or api_key in moviefix.ron",
    )?;

    let filter = FilterKey::new(args.year, args.genres.iter().copied());
    mf_info!("starting with filters ({})", filter);
    let fetcher = PagedFetcher::with_filter(Arc::new(catalog), filter);
    fetcher.load_categories().await;

    let printer = Printer {
        json: args.json,
        image_base_url,
    };

    if args.interactive {
        fetcher.load_next().await;
        printer.print(&fetcher)?;
        return run_interactive(&fetcher, &printer).await;
    }

    for _ in 0..args.pages.max(1) {
        fetcher.load_next().await;
        let snapshot = fetcher.snapshot();
        if snapshot.error.is_some() || !snapshot.has_more {
            break;
        }
    }
    printer.print(&fetcher)?;

    match fetcher.snapshot().error {
        Some(err) => Err(anyhow::Error::new(err).context("failed to load movies")),
        None => Ok(()),
    }
}

struct Printer {
    json: bool,
    image_base_url: String,
}

impl Printer {
    fn print(&self, fetcher: &PagedFetcher) -> anyhow::Result<()> {
        let view = fetcher.view();
        if self.json {
            println!("{}", render::render_json(&view)?);
        } else {
            print!("{}", render::render_text(&view, &self.image_base_url));
        }
        Ok(())
    }
}

async fn retry_failed_categories(fetcher: &PagedFetcher) {
    if fetcher.categories_failed() {
        mf_info!("retrying category load");
        fetcher.load_categories().await;
    }
}

async fn run_interactive(fetcher: &PagedFetcher, printer: &Printer) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    eprintln!("type 'help' for commands");

    while let Some(line) = lines.next_line().await? {
        let command = match command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };

        match command {
            Command::Next => {
                retry_failed_categories(fetcher).await;
                fetcher.load_next().await;
            }
            Command::Year(year) => {
                fetcher.select_year(year);
                fetcher.load_next().await;
            }
            Command::Toggle(id) => {
                if fetcher.categories_loaded() && !fetcher.has_category(id) {
                    eprintln!("unknown genre id {id}");
                    continue;
                }
                fetcher.toggle_category(id);
                fetcher.load_next().await;
            }
            Command::Clear => {
                fetcher.reset(FilterKey::default());
                fetcher.load_next().await;
            }
            Command::Show => {
                retry_failed_categories(fetcher).await;
                printer.print(fetcher)?;
                continue;
            }
            Command::Help => {
                eprintln!("{}", command::HELP);
                continue;
            }
            Command::Quit => break,
        }

        if fetcher.consume_dirty() {
            printer.print(fetcher)?;
        }
    }
    Ok(())
}
