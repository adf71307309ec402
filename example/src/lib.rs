//! Terminal front end for chronogrid.
//!
//! Renders the picker's view model as text and drives it with typed
//! commands, one per line. Each option can also come from the environment:
//!
//! - `--zone` / `CHRONOGRID_ZONE`: `utc`, `local`, an offset such as `+05:30`
//!   or an IANA name such as `Europe/Berlin`
//! - `--start`, `--min`, `--max` / `CHRONOGRID_START`, `CHRONOGRID_MIN`,
//!   `CHRONOGRID_MAX`: granularity names
//! - `--first-weekday` / `CHRONOGRID_FIRST_WEEKDAY`: e.g. `mon`
//! - `RUST_LOG`: tracing filter, default `error,chronogrid=info`

mod command;
mod render;

use std::io::{self, BufRead, Write};

use chronogrid::{
    DateTimePicker, EnglishLabels, Granularity, LabelPattern, PickerChange, PickerConfig,
    PickerState, Weekday, Zone,
};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use command::{Command, HELP};
pub use render::render;

const DEFAULT_FILTER: &str = "error,chronogrid=info";

fn init_tracing() {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match EnvFilter::try_new(DEFAULT_FILTER) {
            Ok(filter) => filter,
            Err(_) => EnvFilter::new("error"),
        },
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Command line options.
#[derive(Debug, Parser)]
#[command(name = "chronogrid", version, about = "Terminal date/time picker", long_about = None)]
pub struct Cli {
    /// Zone used to read instants
    #[arg(long, env = "CHRONOGRID_ZONE")]
    pub zone: Option<Zone>,
    /// Granularity shown first
    #[arg(long, env = "CHRONOGRID_START")]
    pub start: Option<Granularity>,
    /// Finest granularity; activating a cell here commits the value
    #[arg(long, env = "CHRONOGRID_MIN")]
    pub min: Option<Granularity>,
    /// Coarsest granularity reachable with `up`
    #[arg(long, env = "CHRONOGRID_MAX")]
    pub max: Option<Granularity>,
    /// First column of the month grid
    #[arg(long, env = "CHRONOGRID_FIRST_WEEKDAY")]
    pub first_weekday: Option<Weekday>,
}

impl Cli {
    /// Builds the picker configuration, keeping defaults for unset options.
    pub fn into_config(self) -> PickerConfig {
        let mut config = PickerConfig::default();
        if let Some(zone) = self.zone {
            config = config.zone(zone);
        }
        if let Some(start) = self.start {
            config = config.start_granularity(start);
        }
        if let Some(min) = self.min {
            config = config.min_granularity(min);
        }
        if let Some(max) = self.max {
            config = config.max_granularity(max);
        }
        if let Some(weekday) = self.first_weekday {
            config = config.first_weekday(weekday);
        }
        config
    }
}

/// Runs the interactive loop on stdin and stdout.
pub fn run() -> io::Result<()> {
    let config = Cli::parse().into_config();
    init_tracing();

    info!(?config, "starting picker");
    let state = PickerState::new(DateTimePicker::new(config));
    let calendar = state.with(|picker| *picker.calendar());
    state.with_mut(|picker| {
        picker.on_change(move |change: PickerChange| match change.value {
            Some(value) => info!(
                value = %calendar.format(value, LabelPattern::LongDateTime, &EnglishLabels),
                "value changed"
            ),
            None => info!("value cleared"),
        });
    });

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "{HELP}")?;
    loop {
        write!(stdout, "\n{}> ", render(&state.view_model()))?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        let Some(command) = Command::parse(&line) else {
            writeln!(stdout, "unknown command, type `help`")?;
            continue;
        };
        match command {
            Command::Quit => return Ok(()),
            Command::Help => writeln!(stdout, "{HELP}")?,
            command => {
                if !state.with_mut(|picker| command.apply(picker)) {
                    writeln!(stdout, "nothing to do")?;
                }
            }
        }
    }
}
