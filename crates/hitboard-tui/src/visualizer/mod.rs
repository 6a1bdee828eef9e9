// Visualizer: owns the live chart and the derived legend/table, and maps a
// list of player records onto them.
//
// State machine: Idle -> Loading -> Rendered. Every render replaces the
// previous chart wholesale; the old handle is destroyed before a new one is
// created so at most one chart is ever alive.

pub mod container;
pub mod engine;
pub mod hover;

use std::collections::BTreeMap;

use tracing::debug;

use hitboard_core::colors::{Rgba, TeamPalette};
use hitboard_core::config::ChartSettings;
use hitboard_core::record::{displayed_records, PlayerRecord, DISPLAY_LIMIT};

use container::{Container, Element, LegendEntry, TableRow};
use engine::{BarSpec, ChartConfig, ChartEngine, ChartHandle, ChartRegistry};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const LOADING_TEXT: &str = "Loading batting stats...";
pub const NO_DATA_TEXT: &str = "No batting data available for this season.";
const CHART_TITLE: &str = "Batting Average Leaders";

// ---------------------------------------------------------------------------
// Supporting types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualizerState {
    /// Nothing drawn yet, or cleared.
    Idle,
    /// Loading placeholder shown.
    Loading,
    /// Chart, legend and table (or the no-data message) shown.
    Rendered,
}

/// Table column the ranked table is ordered by (always descending).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    #[default]
    Avg,
    AtBats,
    Hits,
    HomeRuns,
    Rbi,
}

impl SortColumn {
    /// The next column in the `s` key cycle.
    pub fn next(self) -> Self {
        match self {
            SortColumn::Avg => SortColumn::AtBats,
            SortColumn::AtBats => SortColumn::Hits,
            SortColumn::Hits => SortColumn::HomeRuns,
            SortColumn::HomeRuns => SortColumn::Rbi,
            SortColumn::Rbi => SortColumn::Avg,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortColumn::Avg => "AVG",
            SortColumn::AtBats => "AB",
            SortColumn::Hits => "H",
            SortColumn::HomeRuns => "HR",
            SortColumn::Rbi => "RBI",
        }
    }
}

/// Everything needed to redraw or restore the current chart.
#[derive(Debug, Clone)]
pub struct ChartState {
    /// Displayed records, sorted by batting average descending.
    pub records: Vec<PlayerRecord>,
    pub handle: ChartHandle,
    /// Source-of-truth colors; hover fades are always computed from these.
    pub original_fill: Vec<Rgba>,
    pub original_border: Vec<Rgba>,
    /// Index of the bar under the pointer, if any.
    pub hovered: Option<usize>,
}

// ---------------------------------------------------------------------------
// Visualizer
// ---------------------------------------------------------------------------

pub struct Visualizer<E: ChartEngine = ChartRegistry> {
    engine: E,
    palette: TeamPalette,
    settings: ChartSettings,
    container: Container,
    chart: Option<ChartState>,
    state: VisualizerState,
    table_sort: SortColumn,
}

impl Visualizer<ChartRegistry> {
    pub fn new(palette: TeamPalette, settings: ChartSettings) -> Self {
        Self::with_engine(ChartRegistry::new(), palette, settings)
    }
}

impl<E: ChartEngine> Visualizer<E> {
    pub fn with_engine(engine: E, palette: TeamPalette, settings: ChartSettings) -> Self {
        Visualizer {
            engine,
            palette,
            settings,
            container: Container::new(),
            chart: None,
            state: VisualizerState::Idle,
            table_sort: SortColumn::default(),
        }
    }

    // -- accessors --

    pub fn state(&self) -> VisualizerState {
        self.state
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn chart_state(&self) -> Option<&ChartState> {
        self.chart.as_ref()
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    /// The live chart config, as the engine currently holds it.
    pub fn chart_config(&self) -> Option<&ChartConfig> {
        self.chart.as_ref().and_then(|c| self.engine.get(c.handle))
    }

    pub fn table_sort(&self) -> SortColumn {
        self.table_sort
    }

    /// Team of the hovered bar.
    pub fn hovered_team(&self) -> Option<&str> {
        let chart = self.chart.as_ref()?;
        chart
            .hovered
            .and_then(|i| chart.records.get(i))
            .map(|r| r.team.as_str())
    }

    /// Tooltip text for a bar: name, team and exact average.
    pub fn tooltip(&self, index: usize) -> Option<String> {
        let record = self.chart.as_ref()?.records.get(index)?;
        Some(format!(
            "{} ({}): {}",
            record.name,
            record.team,
            record.avg_display()
        ))
    }

    // -- transitions --

    /// Show the loading placeholder. Safe to call repeatedly.
    pub fn show_loading(&mut self) {
        self.release_chart();
        self.container.clear();
        self.container.push(Element::Placeholder(LOADING_TEXT.to_string()));
        self.state = VisualizerState::Loading;
    }

    /// Render records as chart + legend + table, replacing whatever was shown.
    pub fn update_visualization(&mut self, records: &[PlayerRecord]) {
        self.release_chart();
        self.container.clear();
        self.state = VisualizerState::Rendered;

        let shown = displayed_records(records, self.settings.max_bars.min(DISPLAY_LIMIT));
        if shown.is_empty() {
            self.container.push(Element::Message(NO_DATA_TEXT.to_string()));
            return;
        }

        let config = self.build_chart_config(&shown);
        let original_fill = config.fill.clone();
        let original_border = config.border.clone();
        let handle = self.engine.create(config);
        debug!(bars = shown.len(), ?handle, "Chart created");

        self.container.push(Element::Canvas(handle));
        self.container.push(Element::Legend(build_legend(&shown, &self.palette)));
        self.container
            .push(Element::Table(build_table(&shown, self.table_sort)));

        self.chart = Some(ChartState {
            records: shown,
            handle,
            original_fill,
            original_border,
            hovered: None,
        });
    }

    /// Release the chart and remove all derived content.
    pub fn clear_objects(&mut self) {
        self.release_chart();
        self.container.clear();
        self.state = VisualizerState::Idle;
    }

    /// Replace everything with a text message (used for fetch errors).
    pub fn show_message(&mut self, text: impl Into<String>) {
        self.release_chart();
        self.container.clear();
        self.container.push(Element::Message(text.into()));
        self.state = VisualizerState::Idle;
    }

    // -- hover --

    /// Highlight every bar on the same team as bar `index`. An index past the
    /// last bar ends the hover.
    pub fn hover_bar(&mut self, index: usize) {
        let Some(chart) = self.chart.as_mut() else {
            return;
        };
        let Some(record) = chart.records.get(index) else {
            self.hover_leave();
            return;
        };
        if chart.hovered == Some(index) {
            return;
        }

        let teams: Vec<&str> = chart.records.iter().map(|r| r.team.as_str()).collect();
        let fill = hover::highlight_team(&chart.original_fill, &teams, &record.team);
        let border = hover::highlight_team(&chart.original_border, &teams, &record.team);
        self.engine.set_colors(chart.handle, fill, border);
        chart.hovered = Some(index);
    }

    /// End any hover and restore the original colors exactly.
    pub fn hover_leave(&mut self) {
        let Some(chart) = self.chart.as_mut() else {
            return;
        };
        if chart.hovered.take().is_some() {
            self.engine.set_colors(
                chart.handle,
                chart.original_fill.clone(),
                chart.original_border.clone(),
            );
        }
    }

    /// Move the hover left (negative) or right (positive), starting from the
    /// first bar when nothing is hovered.
    pub fn hover_step(&mut self, delta: isize) {
        let Some(chart) = self.chart.as_ref() else {
            return;
        };
        let len = chart.records.len();
        if len == 0 {
            return;
        }
        let next = match chart.hovered {
            None => 0,
            Some(i) => (i as isize + delta).clamp(0, len as isize - 1) as usize,
        };
        self.hover_bar(next);
    }

    // -- table --

    /// Re-sort the ranked table. The chart keeps its batting-average order.
    pub fn set_table_sort(&mut self, column: SortColumn) {
        self.table_sort = column;
        if let Some(chart) = &self.chart {
            let rows = build_table(&chart.records, column);
            self.container.replace_table(rows);
        }
    }

    pub fn cycle_table_sort(&mut self) {
        self.set_table_sort(self.table_sort.next());
    }

    // -- internals --

    fn release_chart(&mut self) {
        if let Some(chart) = self.chart.take() {
            self.engine.destroy(chart.handle);
            debug!(handle = ?chart.handle, "Chart released");
        }
    }

    fn build_chart_config(&self, records: &[PlayerRecord]) -> ChartConfig {
        let mut bars = Vec::with_capacity(records.len());
        let mut fill = Vec::with_capacity(records.len());
        let mut border = Vec::with_capacity(records.len());
        for record in records {
            let colors = self.palette.colors_for(&record.team);
            bars.push(BarSpec {
                label: record.name.clone(),
                team: record.team.clone(),
                value: record.avg,
            });
            fill.push(colors.primary.opaque());
            border.push(colors.secondary.opaque());
        }
        ChartConfig {
            title: CHART_TITLE.to_string(),
            bars,
            fill,
            border,
            y_min: self.settings.y_min,
            y_max: self.settings.y_max,
        }
    }
}

// ---------------------------------------------------------------------------
// Derived content
// ---------------------------------------------------------------------------

/// One legend entry per team present, alphabetical by team name.
pub fn build_legend(records: &[PlayerRecord], palette: &TeamPalette) -> Vec<LegendEntry> {
    let teams: BTreeMap<&str, ()> = records.iter().map(|r| (r.team.as_str(), ())).collect();
    teams
        .into_keys()
        .map(|team| LegendEntry {
            team: team.to_string(),
            colors: palette.colors_for(team),
        })
        .collect()
}

/// Ranked table rows, sorted descending by `column` (stable).
pub fn build_table(records: &[PlayerRecord], column: SortColumn) -> Vec<TableRow> {
    let mut sorted: Vec<&PlayerRecord> = records.iter().collect();
    match column {
        SortColumn::Avg => sorted.sort_by(|a, b| b.avg.total_cmp(&a.avg)),
        SortColumn::AtBats => sorted.sort_by(|a, b| b.at_bats.cmp(&a.at_bats)),
        SortColumn::Hits => sorted.sort_by(|a, b| b.hits.cmp(&a.hits)),
        SortColumn::HomeRuns => sorted.sort_by(|a, b| b.home_runs.cmp(&a.home_runs)),
        SortColumn::Rbi => sorted.sort_by(|a, b| b.rbi.cmp(&a.rbi)),
    }
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, r)| TableRow {
            rank: i + 1,
            name: r.name.clone(),
            team: r.team.clone(),
            avg: r.avg_display(),
            at_bats: r.at_bats,
            hits: r.hits,
            home_runs: r.home_runs,
            rbi: r.rbi,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use hitboard_core::colors::Rgb;

    fn rec(name: &str, team: &str, avg: f64) -> PlayerRecord {
        PlayerRecord {
            id: None,
            name: name.to_string(),
            team: team.to_string(),
            avg,
            at_bats: 500,
            hits: (avg * 500.0) as u32,
            home_runs: 20,
            rbi: 80,
        }
    }

    fn visualizer() -> Visualizer {
        Visualizer::new(TeamPalette::mlb(), ChartSettings::default())
    }

    fn sample() -> Vec<PlayerRecord> {
        vec![
            rec("Mid", "Chicago Cubs", 0.300),
            rec("Top", "Boston Red Sox", 0.330),
            rec("Low", "Chicago Cubs", 0.270),
            rec("Odd", "Nowhere Nine", 0.280),
        ]
    }

    #[test]
    fn starts_idle_and_empty() {
        let v = visualizer();
        assert_eq!(v.state(), VisualizerState::Idle);
        assert!(v.container().is_empty());
        assert!(v.chart_state().is_none());
    }

    #[test]
    fn show_loading_is_idempotent() {
        let mut v = visualizer();
        v.show_loading();
        v.show_loading();
        v.show_loading();
        assert_eq!(v.state(), VisualizerState::Loading);
        assert_eq!(v.container().children().len(), 1);
        assert_eq!(v.container().text(), Some(LOADING_TEXT));
    }

    #[test]
    fn show_loading_releases_rendered_chart() {
        let mut v = visualizer();
        v.update_visualization(&sample());
        assert_eq!(v.engine().live_count(), 1);
        v.show_loading();
        assert_eq!(v.engine().live_count(), 0);
        assert!(v.chart_state().is_none());
    }

    #[test]
    fn update_builds_canvas_legend_table_in_order() {
        let mut v = visualizer();
        v.show_loading();
        v.update_visualization(&sample());
        assert_eq!(v.state(), VisualizerState::Rendered);

        let children = v.container().children();
        assert_eq!(children.len(), 3);
        assert!(matches!(children[0], Element::Canvas(_)));
        assert!(matches!(children[1], Element::Legend(_)));
        assert!(matches!(children[2], Element::Table(_)));
    }

    #[test]
    fn chart_bars_sorted_and_colored_by_team() {
        let mut v = visualizer();
        v.update_visualization(&sample());
        let config = v.chart_config().unwrap();
        let labels: Vec<&str> = config.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Top", "Mid", "Odd", "Low"]);
        assert_eq!(config.fill[0].rgb, Rgb::hex(0xBD3039));
        assert_eq!(config.border[0].rgb, Rgb::hex(0x0C2340));
        // Unknown team uses the fallback pair.
        assert_eq!(config.fill[2].rgb, TeamPalette::mlb().fallback().primary);
        assert_eq!(config.y_min, 0.250);
        assert_eq!(config.y_max, 0.350);
    }

    #[test]
    fn legend_is_deduplicated_and_alphabetical() {
        let mut v = visualizer();
        v.update_visualization(&sample());
        let teams: Vec<&str> = v
            .container()
            .legend()
            .unwrap()
            .iter()
            .map(|e| e.team.as_str())
            .collect();
        assert_eq!(teams, vec!["Boston Red Sox", "Chicago Cubs", "Nowhere Nine"]);
    }

    #[test]
    fn table_ranks_by_avg_with_three_decimals() {
        let mut v = visualizer();
        v.update_visualization(&sample());
        let table = v.container().table().unwrap();
        assert_eq!(table[0].rank, 1);
        assert_eq!(table[0].name, "Top");
        assert_eq!(table[0].avg, "0.330");
        assert_eq!(table[3].name, "Low");
    }

    #[test]
    fn truncates_to_thirty_and_orders_descending() {
        let records: Vec<PlayerRecord> = (0..45)
            .map(|i| rec(&format!("P{i}"), "Chicago Cubs", 0.250 + (i % 17) as f64 * 0.005))
            .collect();
        let mut v = visualizer();
        v.update_visualization(&records);

        let config = v.chart_config().unwrap();
        assert_eq!(config.bars.len(), 30);
        assert!(config.bars.windows(2).all(|w| w[0].value >= w[1].value));

        let table = v.container().table().unwrap();
        assert_eq!(table.len(), 30);
        let chart_names: Vec<&str> = config.bars.iter().map(|b| b.label.as_str()).collect();
        let table_names: Vec<&str> = table.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(chart_names, table_names);
    }

    #[test]
    fn oversized_max_bars_still_draws_at_most_thirty() {
        let records: Vec<PlayerRecord> = (0..45)
            .map(|i| rec(&format!("P{i}"), "Chicago Cubs", 0.300))
            .collect();
        let settings = ChartSettings {
            max_bars: 100,
            ..ChartSettings::default()
        };
        let mut v = Visualizer::new(TeamPalette::mlb(), settings);
        v.update_visualization(&records);

        assert_eq!(v.chart_config().unwrap().bars.len(), DISPLAY_LIMIT);
        assert_eq!(v.container().table().unwrap().len(), DISPLAY_LIMIT);
    }

    #[test]
    fn empty_records_render_no_data_message() {
        let mut v = visualizer();
        v.update_visualization(&[]);
        assert_eq!(v.state(), VisualizerState::Rendered);
        assert_eq!(v.container().text(), Some(NO_DATA_TEXT));
        assert_eq!(v.engine().live_count(), 0);
    }

    #[test]
    fn repeated_updates_keep_one_live_chart() {
        let mut v = visualizer();
        v.update_visualization(&sample());
        let first = v.container().canvas().unwrap();
        v.update_visualization(&sample());
        let second = v.container().canvas().unwrap();
        assert_ne!(first, second);
        assert_eq!(v.engine().live_count(), 1);
        assert!(v.engine().get(first).is_none());
        assert_eq!(v.container().children().len(), 3);
    }

    #[test]
    fn hover_highlights_team_and_restores_exactly() {
        let mut v = visualizer();
        v.update_visualization(&sample());
        let original_fill = v.chart_config().unwrap().fill.clone();
        let original_border = v.chart_config().unwrap().border.clone();

        // Bar 1 is "Mid" (Chicago Cubs); bar 3 "Low" is also a Cub.
        v.hover_bar(1);
        assert_eq!(v.hovered_team(), Some("Chicago Cubs"));
        let live = v.chart_config().unwrap();
        assert_eq!(live.fill[1], original_fill[1]);
        assert_eq!(live.fill[3], original_fill[3]);
        assert_eq!(live.fill[0].alpha, hover::FADED_ALPHA);
        assert_eq!(live.fill[0].rgb, original_fill[0].rgb);
        assert_eq!(live.border[2].alpha, hover::FADED_ALPHA);

        // Hovering a different team fades from originals, not from faded colors.
        v.hover_bar(0);
        let live = v.chart_config().unwrap();
        assert_eq!(live.fill[0], original_fill[0]);
        assert_eq!(live.fill[1].alpha, hover::FADED_ALPHA);
        assert_eq!(live.fill[1].rgb, original_fill[1].rgb);

        v.hover_leave();
        let live = v.chart_config().unwrap();
        assert_eq!(live.fill, original_fill);
        assert_eq!(live.border, original_border);
        assert_eq!(v.hovered_team(), None);
    }

    #[test]
    fn hover_out_of_range_ends_hover() {
        let mut v = visualizer();
        v.update_visualization(&sample());
        v.hover_bar(0);
        v.hover_bar(99);
        assert!(v.chart_state().unwrap().hovered.is_none());
    }

    #[test]
    fn hover_step_clamps_to_bars() {
        let mut v = visualizer();
        v.update_visualization(&sample());
        v.hover_step(1);
        assert_eq!(v.chart_state().unwrap().hovered, Some(0));
        v.hover_step(-1);
        assert_eq!(v.chart_state().unwrap().hovered, Some(0));
        v.hover_step(10);
        assert_eq!(v.chart_state().unwrap().hovered, Some(3));
    }

    #[test]
    fn hover_without_chart_is_noop() {
        let mut v = visualizer();
        v.hover_bar(0);
        v.hover_leave();
        v.hover_step(1);
        assert_eq!(v.state(), VisualizerState::Idle);
    }

    #[test]
    fn tooltip_shows_exact_average() {
        let mut v = visualizer();
        v.update_visualization(&[rec("Clipped", "Chicago Cubs", 0.402)]);
        assert_eq!(v.tooltip(0).unwrap(), "Clipped (Chicago Cubs): 0.402");
        assert!(v.tooltip(1).is_none());
    }

    #[test]
    fn clear_objects_releases_everything() {
        let mut v = visualizer();
        v.update_visualization(&sample());
        v.clear_objects();
        assert_eq!(v.state(), VisualizerState::Idle);
        assert!(v.container().is_empty());
        assert_eq!(v.engine().live_count(), 0);
    }

    #[test]
    fn show_message_replaces_chart() {
        let mut v = visualizer();
        v.update_visualization(&sample());
        v.show_message("boom");
        assert_eq!(v.container().text(), Some("boom"));
        assert_eq!(v.container().children().len(), 1);
        assert_eq!(v.engine().live_count(), 0);
    }

    #[test]
    fn table_sort_reorders_table_only() {
        let mut records = sample();
        records[2].home_runs = 45; // "Low"
        let mut v = visualizer();
        v.update_visualization(&records);
        v.set_table_sort(SortColumn::HomeRuns);

        let table = v.container().table().unwrap();
        assert_eq!(table[0].name, "Low");
        assert_eq!(table[0].rank, 1);
        assert_eq!(v.chart_config().unwrap().bars[0].label, "Top");

        // The choice survives the next render.
        v.update_visualization(&records);
        assert_eq!(v.container().table().unwrap()[0].name, "Low");
    }

    #[test]
    fn sort_column_cycle_wraps() {
        let mut col = SortColumn::Avg;
        for _ in 0..5 {
            col = col.next();
        }
        assert_eq!(col, SortColumn::Avg);
        assert_eq!(SortColumn::HomeRuns.label(), "HR");
    }
}
