use crate::codec::Encoding;

/// Grid position as (column, row).
pub type Cursor = (u16, u16);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// set the cell under the cursor on or off
    Paint(bool),
    Reset,
    Copy(Encoding),
    Paste,
    Upload,
    Compare,
    ShowEditor,
}
