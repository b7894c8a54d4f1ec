use std::error::Error;
use std::process::ExitCode;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use bus_times::app::{FavouritesApp, Surface, UiEvent};
use bus_times::board::{BoardResult, board_json, build_board};
use bus_times::config::AppConfig;
use bus_times::domain::StopId;
use bus_times::gtfs::{StaticSchedule, StopDirectory};
use bus_times::storage::FileStore;
use bus_times::ui::{BusTimesPane, History, Navigation, PageModel, RefreshQueue};
use bus_times::web::render_page;

/// Bus arrival times and favourite stops.
#[derive(Debug, Parser)]
#[command(name = "bus-times", about = "Bus arrival times and favourite stops", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
enum Command {
    /// List favourite stops
    Favourites,
    /// Add or remove a favourite stop
    Toggle { stop_id: String },
    /// Find stops by name
    Search {
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Switch between light and dark
    Theme,
    /// Upcoming buses at a stop
    Board {
        stop_id: String,
        /// Print the board as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the page as HTML
    Render { stop_id: Option<String> },
}

fn main() -> ExitCode {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bus_times=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse().command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_env()?;
    execute(command, &config)
}

fn execute(command: Command, config: &AppConfig) -> Result<(), Box<dyn Error>> {
    let storage = FileStore::open(config.storage_path())?;
    let mut app = FavouritesApp::new(storage);

    let mut page = PageModel::new(app.theme());
    let mut history = History::default();
    let mut refresh = RefreshQueue::new();

    match command {
        Command::Favourites => {
            for entry in app.store().favourites().iter() {
                println!("{}\t{}", entry.stop_id, entry.stop_name);
            }
        }
        Command::Toggle { stop_id } => {
            let stops = StopDirectory::load(&config.gtfs_dir)?;
            let stop_id = StopId::parse(&stop_id)?;
            let stop = stops
                .lookup(&stop_id)
                .ok_or_else(|| format!("unknown stop: {}", stop_id))?;

            let event = UiEvent::ToggleFavourite {
                stop_id: stop.id.clone(),
                stop_name: stop.name.clone(),
            };
            app.handle(event, &mut surface(&mut page, &mut history, &mut refresh));

            let verb = if app.store().contains(&stop.id) {
                "Added"
            } else {
                "Removed"
            };
            println!("{} {} ({})", verb, stop.name, stop.id);
        }
        Command::Search { query } => {
            let stops = StopDirectory::load(&config.gtfs_dir)?;
            for stop in app.suggest(&stops, &query.join(" ")) {
                println!("{}\t{}", stop.id, stop.name);
            }
        }
        Command::Theme => {
            app.handle(
                UiEvent::ToggleTheme,
                &mut surface(&mut page, &mut history, &mut refresh),
            );
            println!("{}", app.theme());
        }
        Command::Board { stop_id, json } => {
            let feed = Feed::load(config)?;
            let board = feed.board(Some(stop_id.as_str()), now(config.timezone));
            if json {
                println!("{}", serde_json::to_string_pretty(&board_json(&board))?);
            } else {
                print_board(&board);
            }
        }
        Command::Render { stop_id } => {
            app.start(&mut surface(&mut page, &mut history, &mut refresh));

            if let Some(raw) = stop_id {
                let feed = Feed::load(config)?;
                let now = now(config.timezone);
                match StopId::parse(&raw) {
                    Ok(stop_id) => app.handle(
                        UiEvent::SelectSuggestion { stop_id },
                        &mut surface(&mut page, &mut history, &mut refresh),
                    ),
                    Err(_) => page.show_bus_times(BusTimesPane::from_board(
                        feed.board(Some(raw.as_str()), now),
                    )),
                }

                while let Some(stop_id) = refresh.pop() {
                    let board = feed.board(Some(stop_id.as_str()), now);
                    page.show_bus_times(BusTimesPane::from_board(board));
                    app.handle(
                        UiEvent::BusTimesRefreshed,
                        &mut surface(&mut page, &mut history, &mut refresh),
                    );
                }
            }

            let html = render_page(&page, config, history.current_stop_id().as_ref())?;
            println!("{}", html);
        }
    }

    Ok(())
}

/// The static feed tables a board is built from.
struct Feed {
    stops: StopDirectory,
    schedule: StaticSchedule,
}

impl Feed {
    fn load(config: &AppConfig) -> Result<Self, Box<dyn Error>> {
        let stops = StopDirectory::load(&config.gtfs_dir)?;
        let schedule = StaticSchedule::load(&config.gtfs_dir)?;
        info!(
            stops = stops.len(),
            routes = schedule.route_count(),
            trips = schedule.trip_count(),
            "loaded static feed"
        );
        Ok(Self { stops, schedule })
    }

    /// Realtime predictions come from a separate feed that is not wired in
    /// here, so every board is built from the timetable.
    fn board(&self, stop_id: Option<&str>, now: DateTime<Tz>) -> BoardResult {
        build_board(
            stop_id,
            &self.stops,
            None,
            |id| self.schedule.arrivals_at(id, now),
            now,
        )
    }
}

fn surface<'a>(
    page: &'a mut PageModel,
    history: &'a mut History,
    refresh: &'a mut RefreshQueue,
) -> Surface<'a> {
    Surface {
        page,
        navigation: history,
        refresh,
    }
}

fn now(tz: Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(&tz)
}

fn print_board(board: &BoardResult) {
    match board {
        Ok(board) => {
            println!("{} ({})", board.stop_name, board.stop_id);
            for bus in &board.buses {
                println!(
                    "  {:>4}  {:<24} {}  {} ({})",
                    bus.route_name,
                    bus.trip_headsign,
                    bus.arrival_time_formatted,
                    bus.countdown_text,
                    bus.arrival_type
                );
            }
        }
        Err(e) => println!("{}", e),
    }
}
