//! Sheet-level tallies over a set of classified cells

use crate::inference::classifier::{CellRecord, ContentType};
use serde::Serialize;

/// Number of cells with one verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContentCount {
    /// The verdict
    pub content: ContentType,
    /// Cells with that verdict
    pub cells: usize,
}

/// Verdict counts and the most notable cells of a classified grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationSummary {
    /// All cells
    pub total_cells: usize,
    /// Cells not classified `Empty`
    pub content_cells: usize,
    /// Per-verdict counts, in `ContentType::ALL` order
    pub counts: Vec<ContentCount>,
    /// Indices of the highest-coverage non-empty cells, best first
    pub top_cells: Vec<usize>,
    /// Indices of cells containing furniture
    pub furniture_cells: Vec<usize>,
    /// Indices of cells with a figure and no furniture
    pub character_only_cells: Vec<usize>,
}

impl ClassificationSummary {
    /// Summarize `records`, keeping up to `top_n` best-covered cells
    pub fn from_records(records: &[CellRecord], top_n: usize) -> Self {
        let counts = ContentType::ALL
            .iter()
            .map(|&content| ContentCount {
                content,
                cells: records.iter().filter(|r| r.content == content).count(),
            })
            .collect();

        let mut non_empty: Vec<&CellRecord> = records
            .iter()
            .filter(|r| r.content != ContentType::Empty)
            .collect();
        let content_cells = non_empty.len();
        non_empty.sort_by(|a, b| b.coverage.total_cmp(&a.coverage));
        let top_cells = non_empty.iter().take(top_n).map(|r| r.index).collect();

        let indices_where = |keep: fn(ContentType) -> bool| -> Vec<usize> {
            records
                .iter()
                .filter(|r| keep(r.content))
                .map(|r| r.index)
                .collect()
        };

        Self {
            total_cells: records.len(),
            content_cells,
            counts,
            top_cells,
            furniture_cells: indices_where(ContentType::has_furniture),
            character_only_cells: indices_where(|c| c.has_character() && !c.has_furniture()),
        }
    }

    /// Number of cells with `content`
    pub fn count(&self, content: ContentType) -> usize {
        self.counts
            .iter()
            .find(|c| c.content == content)
            .map_or(0, |c| c.cells)
    }
}
