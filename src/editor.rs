use crate::args::CompareMode;
use crate::bit_grid::BitGrid;
use crate::codec::{self, Encoding};
use crate::diff::{PasteHistory, diff};
use crate::error::CompareError;
use crate::view_mode::ViewMode;

/// Everything the editor knows about the bitmap being drawn.
///
/// Cell edits only land while [`ViewMode::Editing`]; a diff has to exist
/// before the view can switch to [`ViewMode::ShowingDiff`].
#[derive(Debug, Default, Clone)]
pub struct EditorState {
    current: BitGrid,
    diff: Option<BitGrid>,
    view: ViewMode,
    // only kept when comparing against paste history
    history: Option<PasteHistory>,
}

impl EditorState {
    pub fn new(mode: CompareMode) -> Self {
        Self {
            history: match mode {
                CompareMode::History => Some(PasteHistory::default()),
                CompareMode::Panels => None,
            },
            ..Self::default()
        }
    }

    pub fn current(&self) -> &BitGrid {
        &self.current
    }

    pub fn diff_grid(&self) -> Option<&BitGrid> {
        self.diff.as_ref()
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn compare_mode(&self) -> CompareMode {
        if self.history.is_some() {
            CompareMode::History
        } else {
            CompareMode::Panels
        }
    }

    pub fn history_len(&self) -> usize {
        self.history.as_ref().map_or(0, PasteHistory::len)
    }

    /// The grid on screen: the diff while showing one, otherwise the bitmap.
    pub fn active_grid(&self) -> &BitGrid {
        match (self.view, &self.diff) {
            (ViewMode::ShowingDiff, Some(diff)) => diff,
            _ => &self.current,
        }
    }

    /// Sets one cell of the bitmap. Returns whether anything was applied.
    pub fn toggle_cell(&mut self, row: usize, col: usize, on: bool) -> bool {
        if self.view != ViewMode::Editing {
            return false;
        }
        self.current.set(row, col, on);
        true
    }

    pub fn reset(&mut self) {
        self.current = BitGrid::new();
        self.diff = None;
        self.view = ViewMode::Editing;
    }

    pub fn load(&mut self, grid: BitGrid) {
        self.current = grid;
        if let Some(history) = &mut self.history {
            history.record_paste(&grid);
        }
    }

    pub fn compute_diff(&mut self, a: &BitGrid, b: &BitGrid) {
        self.show_diff(diff(a, b));
    }

    /// Decodes both panel texts and diffs them. Nothing changes unless both decode.
    pub fn compare_texts(&mut self, first: &str, second: &str) -> Result<(), CompareError> {
        let decode = |panel: usize, text: &str| {
            codec::decode(text).map_err(|source| CompareError::InvalidPanel { panel, source })
        };
        let a = decode(1, first)?;
        let b = decode(2, second)?;
        self.compute_diff(&a, &b);
        Ok(())
    }

    pub fn compute_diff_from_history(&mut self) -> Result<(), CompareError> {
        let result = self
            .history
            .as_ref()
            .and_then(PasteHistory::diff_last_two)
            .ok_or(CompareError::NotEnoughHistory(self.history_len()))?;
        self.show_diff(result);
        Ok(())
    }

    /// Back to the bitmap. A computed diff is kept.
    pub fn show_editor(&mut self) {
        self.view = ViewMode::Editing;
    }

    pub fn export_text(&self, encoding: Encoding) -> String {
        encoding.encode(self.active_grid())
    }

    fn show_diff(&mut self, result: BitGrid) {
        self.diff = Some(result);
        self.view = ViewMode::ShowingDiff;
    }
}
