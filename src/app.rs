use std::io::{BufRead, Write};

use anyhow::anyhow;

use crate::choices::{Choice, MenuSelection};
use crate::config::Config;
use crate::data::filter::{DayFilter, MonthFilter, TripFilter};
use crate::data::loader::load_data;
use crate::data::model::{City, TripTable};
use crate::error::{Error, Result};
use crate::export;
use crate::prompt::Prompter;
use crate::state::{AppState, Phase, Selection};
use crate::stats::{self, StatsKind};

const BANNER: &str = r#"
     __o
   _ \<_
  (_)/(_)

Hello! Let's explore some US bikeshare data!
"#;

const MENU: &str = "
    1 - All stats
    2 - Travel Time Stats
    3 - Popular Station Stats
    4 - Trip Duration Stats
    5 - User Stats
    6 - Data Errors

    Enter 'Exit' at any time to exit the program.";

const INVALID: &str = "That's not a valid selection! Please check and try again.";
const FAREWELL: &str = "Exiting Program.";

fn rule() -> String {
    "-".repeat(40)
}

// ---------------------------------------------------------------------------
// Menu controller
// ---------------------------------------------------------------------------

pub struct BikeshareApp<R, W> {
    pub config: Config,
    pub state: AppState,
    prompter: Prompter<R, W>,
}

impl<R: BufRead, W: Write> BikeshareApp<R, W> {
    pub fn new(config: Config, input: R, output: W) -> Self {
        Self {
            config,
            state: AppState::default(),
            prompter: Prompter::new(input, output),
        }
    }

    /// Run cycles until the user declines a restart or types `exit`.
    pub fn run(&mut self) -> Result<()> {
        match self.run_cycles() {
            Err(Error::Exit) => {
                log::debug!("exit requested in phase {:?}", self.state.phase);
                self.prompter.say(FAREWELL)
            }
            other => other,
        }
    }

    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    fn run_cycles(&mut self) -> Result<()> {
        loop {
            match self.state.phase {
                Phase::CollectingFilters => {
                    let selection = collect_filters(&mut self.prompter)?;
                    self.state.set_selection(selection);
                }
                Phase::LoadingData => {
                    let selection = self
                        .state
                        .selection
                        .ok_or_else(|| anyhow!("no filters collected"))?;
                    let table = load_data(&self.config.data_dir, selection.city, &selection.filter)?;
                    self.state.set_table(table);
                }
                Phase::SelectingStats => {
                    let table = self
                        .state
                        .table
                        .as_ref()
                        .ok_or_else(|| anyhow!("no trip table loaded"))?;
                    let choice = select_stats(&mut self.prompter)?;
                    for kind in choice.modules() {
                        run_module(&mut self.prompter, &self.config, kind, table)?;
                    }
                    self.state.phase = Phase::Restarting;
                }
                Phase::Restarting => {
                    if self
                        .prompter
                        .confirm("\nWould you like to restart? Enter Y or N.\n")?
                    {
                        self.state.restart();
                    } else {
                        self.state.phase = Phase::Exiting;
                    }
                }
                Phase::Exiting => return Ok(()),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// Filter collector: city, month and day, each re-asked until valid.
fn collect_filters<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<Selection> {
    prompter.say(BANNER)?;

    let city: City = prompter.choose(
        "What city would you like data for? Chicago(chi), New York City(nyc) or Washington(wtn): ",
        INVALID,
    )?;
    prompter.say(format_args!("Pulling data for {}.", city.key().to_uppercase()))?;

    let month: MonthFilter = prompter.choose(
        "What month would you like data for? Select All or a month from January to June: ",
        INVALID,
    )?;
    prompter.say(format_args!("Pulling data for {}.", month.to_string().to_uppercase()))?;

    let day: DayFilter = prompter.choose(
        "What day would you like data for? Select All or a day from Monday to Sunday: ",
        INVALID,
    )?;
    prompter.say(format_args!("Pulling data for {}.", day.to_string().to_uppercase()))?;

    prompter.say(rule())?;
    Ok(Selection {
        city,
        filter: TripFilter::new(month, day),
    })
}

/// Show the numeric menu; an empty answer is retried without a message.
fn select_stats<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<MenuSelection> {
    prompter.say(MENU)?;
    loop {
        let answer = prompter.ask("Please select required stats (enter number): ")?;
        if answer.is_empty() {
            continue;
        }
        match MenuSelection::parse_choice(&answer) {
            Some(selection) => return Ok(selection),
            None => prompter.say(INVALID)?,
        }
    }
}

fn run_module<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    config: &Config,
    kind: StatsKind,
    table: &TripTable,
) -> Result<()> {
    prompter.say(format_args!("\n{}\n", kind.banner()))?;
    let timed = stats::run(kind, table);
    prompter.say(&timed.body)?;
    prompter.say(format_args!(
        "\nThis took {:.6} seconds.",
        timed.elapsed.as_secs_f64()
    ))?;
    prompter.say(rule())?;
    export::offer(prompter, config, table)
}
