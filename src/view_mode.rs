#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ViewMode {
    Editing,
    ShowingDiff,
}

impl Default for ViewMode {
    fn default() -> Self {
        Self::Editing
    }
}
