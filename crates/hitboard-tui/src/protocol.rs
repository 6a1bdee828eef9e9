// Messages exchanged between the controller task and the TUI task.

use hitboard_core::summary::SeasonSummary;
use hitboard_stats::SeasonStats;

/// Updates pushed from the controller to the TUI.
#[derive(Debug, Clone)]
pub enum UiUpdate {
    /// A fetch for `season` has started.
    Loading { season: i32 },
    /// A fetch finished with records to draw.
    Loaded {
        stats: Box<SeasonStats>,
        summary: Box<SeasonSummary>,
    },
    /// A fetch finished but the data could not be used.
    Failed { season: i32, message: String },
}

/// Commands sent from the TUI to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Fetch and render the given season.
    Fetch { season: i32 },
    Quit,
}
