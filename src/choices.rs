//! Fixed vocabularies accepted at the console prompts.
//!
//! Every prompt answer is resolved through an alias table: the raw text is
//! trimmed, lowercased and looked up; anything not in the table is rejected.

use chrono::{Month, Weekday};

use crate::data::filter::{DayFilter, MonthFilter};
use crate::data::model::City;
use crate::stats::StatsKind;

/// A closed set of answers with case-insensitive aliases.
pub trait Choice: Sized + Copy + 'static {
    /// `(alias, value)` pairs. Aliases are lowercase.
    const ALIASES: &'static [(&'static str, Self)];

    /// Normalize `raw` to a value, or `None` when it is not in the table.
    fn parse_choice(raw: &str) -> Option<Self> {
        let needle = raw.trim().to_lowercase();
        Self::ALIASES
            .iter()
            .find(|(alias, _)| *alias == needle)
            .map(|(_, value)| *value)
    }
}

impl Choice for City {
    const ALIASES: &'static [(&'static str, Self)] = &[
        ("chicago", City::Chicago),
        ("chi", City::Chicago),
        ("new york city", City::NewYorkCity),
        ("nyc", City::NewYorkCity),
        ("washington", City::Washington),
        ("wtn", City::Washington),
    ];
}

impl Choice for MonthFilter {
    const ALIASES: &'static [(&'static str, Self)] = &[
        ("january", MonthFilter::Only(Month::January)),
        ("february", MonthFilter::Only(Month::February)),
        ("march", MonthFilter::Only(Month::March)),
        ("april", MonthFilter::Only(Month::April)),
        ("may", MonthFilter::Only(Month::May)),
        ("june", MonthFilter::Only(Month::June)),
        ("all", MonthFilter::All),
    ];
}

impl Choice for DayFilter {
    const ALIASES: &'static [(&'static str, Self)] = &[
        ("monday", DayFilter::Only(Weekday::Mon)),
        ("tuesday", DayFilter::Only(Weekday::Tue)),
        ("wednesday", DayFilter::Only(Weekday::Wed)),
        ("thursday", DayFilter::Only(Weekday::Thu)),
        ("friday", DayFilter::Only(Weekday::Fri)),
        ("saturday", DayFilter::Only(Weekday::Sat)),
        ("sunday", DayFilter::Only(Weekday::Sun)),
        ("all", DayFilter::All),
    ];
}

/// Entry of the numeric statistics menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuSelection {
    All,
    Single(StatsKind),
}

impl MenuSelection {
    /// Modules to run, in menu order.
    pub fn modules(self) -> Vec<StatsKind> {
        match self {
            MenuSelection::All => StatsKind::ALL.to_vec(),
            MenuSelection::Single(kind) => vec![kind],
        }
    }
}

impl Choice for MenuSelection {
    const ALIASES: &'static [(&'static str, Self)] = &[
        ("1", MenuSelection::All),
        ("2", MenuSelection::Single(StatsKind::Time)),
        ("3", MenuSelection::Single(StatsKind::Station)),
        ("4", MenuSelection::Single(StatsKind::Duration)),
        ("5", MenuSelection::Single(StatsKind::User)),
        ("6", MenuSelection::Single(StatsKind::Quality)),
    ];
}

/// Answer to the post-report sample/export offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleAction {
    Sample,
    Decline,
    Export,
}

impl Choice for SampleAction {
    const ALIASES: &'static [(&'static str, Self)] = &[
        ("y", SampleAction::Sample),
        ("n", SampleAction::Decline),
        ("export", SampleAction::Export),
    ];
}
