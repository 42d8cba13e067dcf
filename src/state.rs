use crate::data::filter::TripFilter;
use crate::data::model::{City, TripTable};

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Where the menu loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    CollectingFilters,
    LoadingData,
    SelectingStats,
    Restarting,
    Exiting,
}

/// The (city, month, day) triple chosen at the prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub city: City,
    pub filter: TripFilter,
}

/// Everything one run cycle holds, independent of console I/O.
#[derive(Debug)]
pub struct AppState {
    pub phase: Phase,

    /// Filters chosen this cycle (None until collected).
    pub selection: Option<Selection>,

    /// Filtered trips (None until loaded).
    pub table: Option<TripTable>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            phase: Phase::CollectingFilters,
            selection: None,
            table: None,
        }
    }
}

impl AppState {
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = Some(selection);
        self.table = None;
        self.phase = Phase::LoadingData;
    }

    /// Ingest the freshly loaded and filtered table.
    pub fn set_table(&mut self, table: TripTable) {
        self.table = Some(table);
        self.phase = Phase::SelectingStats;
    }

    /// Drop the current table and go back to the filter prompts.
    pub fn restart(&mut self) {
        *self = AppState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_resets_on_restart() {
        let mut state = AppState::default();
        state.set_selection(Selection {
            city: City::Chicago,
            filter: TripFilter::default(),
        });
        assert_eq!(state.phase, Phase::LoadingData);

        state.set_table(TripTable {
            city: City::Chicago,
            columns: Vec::new(),
            trips: Vec::new(),
        });
        assert_eq!(state.phase, Phase::SelectingStats);
        assert!(state.table.is_some());

        state.restart();
        assert_eq!(state.phase, Phase::CollectingFilters);
        assert!(state.selection.is_none());
        assert!(state.table.is_none());
    }
}
