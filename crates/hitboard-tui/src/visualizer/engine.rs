// Chart engine: accepts declarative chart configs and hands out handles.
//
// The terminal widgets draw whatever the registry holds for the live handle;
// the Visualizer is the only code that creates, recolors or destroys charts.

use std::collections::BTreeMap;

use hitboard_core::colors::Rgba;

/// Opaque reference to a chart owned by an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChartHandle(u64);

/// One bar of a bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSpec {
    pub label: String,
    /// Team the bar belongs to; drives hover grouping.
    pub team: String,
    pub value: f64,
}

/// Declarative description of a bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub title: String,
    pub bars: Vec<BarSpec>,
    /// Live fill color per bar (mutated by hover).
    pub fill: Vec<Rgba>,
    /// Live border color per bar (mutated by hover).
    pub border: Vec<Rgba>,
    /// Fixed y-axis range. Values outside it are clipped when drawn.
    pub y_min: f64,
    pub y_max: f64,
}

/// The charting capability the Visualizer drives.
pub trait ChartEngine {
    /// Build a chart and return its handle.
    fn create(&mut self, config: ChartConfig) -> ChartHandle;

    /// Replace a chart's live bar colors. Returns false for an unknown handle
    /// or mismatched lengths.
    fn set_colors(&mut self, handle: ChartHandle, fill: Vec<Rgba>, border: Vec<Rgba>) -> bool;

    /// Release a chart. Returns false if the handle was not live.
    fn destroy(&mut self, handle: ChartHandle) -> bool;

    fn get(&self, handle: ChartHandle) -> Option<&ChartConfig>;

    /// Number of charts currently alive.
    fn live_count(&self) -> usize;
}

// ---------------------------------------------------------------------------
// ChartRegistry
// ---------------------------------------------------------------------------

/// In-process engine backing the terminal chart widget.
#[derive(Debug, Default)]
pub struct ChartRegistry {
    next_id: u64,
    charts: BTreeMap<ChartHandle, ChartConfig>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChartEngine for ChartRegistry {
    fn create(&mut self, config: ChartConfig) -> ChartHandle {
        self.next_id += 1;
        let handle = ChartHandle(self.next_id);
        self.charts.insert(handle, config);
        handle
    }

    fn set_colors(&mut self, handle: ChartHandle, fill: Vec<Rgba>, border: Vec<Rgba>) -> bool {
        match self.charts.get_mut(&handle) {
            Some(chart) if fill.len() == chart.bars.len() && border.len() == chart.bars.len() => {
                chart.fill = fill;
                chart.border = border;
                true
            }
            _ => false,
        }
    }

    fn destroy(&mut self, handle: ChartHandle) -> bool {
        self.charts.remove(&handle).is_some()
    }

    fn get(&self, handle: ChartHandle) -> Option<&ChartConfig> {
        self.charts.get(&handle)
    }

    fn live_count(&self) -> usize {
        self.charts.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
