// The rendering surface the Visualizer injects into: an ordered list of
// elements (chart canvas, legend, table, or a single text block) that the
// terminal widgets lay out top to bottom.

use hitboard_core::colors::TeamColors;

use super::engine::ChartHandle;

/// One legend entry: a team and its swatch colors.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub team: String,
    pub colors: TeamColors,
}

/// One pre-formatted row of the ranked table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub rank: usize,
    pub name: String,
    pub team: String,
    /// Batting average formatted to three decimals.
    pub avg: String,
    pub at_bats: u32,
    pub hits: u32,
    pub home_runs: u32,
    pub rbi: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Canvas(ChartHandle),
    Legend(Vec<LegendEntry>),
    Table(Vec<TableRow>),
    /// Centered loading placeholder.
    Placeholder(String),
    /// Centered informational or error text.
    Message(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    children: Vec<Element>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub fn push(&mut self, element: Element) {
        self.children.push(element);
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// The chart handle currently attached, if any.
    pub fn canvas(&self) -> Option<ChartHandle> {
        self.children.iter().find_map(|e| match e {
            Element::Canvas(h) => Some(*h),
            _ => None,
        })
    }

    pub fn legend(&self) -> Option<&[LegendEntry]> {
        self.children.iter().find_map(|e| match e {
            Element::Legend(entries) => Some(entries.as_slice()),
            _ => None,
        })
    }

    pub fn table(&self) -> Option<&[TableRow]> {
        self.children.iter().find_map(|e| match e {
            Element::Table(rows) => Some(rows.as_slice()),
            _ => None,
        })
    }

    /// Replace the table element in place. Does nothing without a table.
    pub fn replace_table(&mut self, rows: Vec<TableRow>) {
        if let Some(slot) = self
            .children
            .iter_mut()
            .find(|e| matches!(e, Element::Table(_)))
        {
            *slot = Element::Table(rows);
        }
    }

    /// Text of a placeholder or message element, if one is shown.
    pub fn text(&self) -> Option<&str> {
        self.children.iter().find_map(|e| match e {
            Element::Placeholder(t) | Element::Message(t) => Some(t.as_str()),
            _ => None,
        })
    }
}
