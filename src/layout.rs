use crate::action::{Action, Cursor};
use crate::bit_grid::GRID_SIZE;
use crate::codec::Encoding;
use ratatui::layout::Rect;

/// Terminal columns per cell. Characters are about twice as tall as wide.
pub const CELL_WIDTH: u16 = 2;
pub const CELL_HEIGHT: u16 = 1;

pub const GRID_WIDTH: u16 = GRID_SIZE as u16 * CELL_WIDTH;
pub const GRID_HEIGHT: u16 = GRID_SIZE as u16 * CELL_HEIGHT;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Button {
    Reset,
    Copy,
    Copy32,
    Paste,
    Upload,
    Compare,
    Editor,
}

impl Button {
    pub const ALL: [Button; 7] = [
        Self::Reset,
        Self::Copy,
        Self::Copy32,
        Self::Paste,
        Self::Upload,
        Self::Compare,
        Self::Editor,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Reset => "Reset",
            Self::Copy => "Copy",
            Self::Copy32 => "Copy32",
            Self::Paste => "Paste",
            Self::Upload => "Upload",
            Self::Compare => "Compare",
            Self::Editor => "Editor",
        }
    }

    pub fn action(self) -> Action {
        match self {
            Self::Reset => Action::Reset,
            Self::Copy => Action::Copy(Encoding::ByteArray),
            Self::Copy32 => Action::Copy(Encoding::PackedRows),
            Self::Paste => Action::Paste,
            Self::Upload => Action::Upload,
            Self::Compare => Action::Compare,
            Self::Editor => Action::ShowEditor,
        }
    }
}

/// Where things sit on screen: the bordered board, the grid inside it, and
/// the button bar underneath.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScreenLayout {
    pub board: Rect,
    pub grid: Rect,
    pub buttons: Vec<(Button, Rect)>,
}

impl ScreenLayout {
    pub fn new(origin_x: u16, origin_y: u16) -> Self {
        let board = Rect::new(origin_x, origin_y, GRID_WIDTH + 2, GRID_HEIGHT + 2);
        let grid = Rect::new(origin_x + 1, origin_y + 1, GRID_WIDTH, GRID_HEIGHT);

        let mut buttons = Vec::with_capacity(Button::ALL.len());
        let mut x = origin_x;
        let y = board.bottom();
        for button in Button::ALL {
            // "[Label]"
            let width = button.label().len() as u16 + 2;
            buttons.push((button, Rect::new(x, y, width, 1)));
            x += width + 1;
        }

        Self {
            board,
            grid,
            buttons,
        }
    }

    /// Cell under a terminal position, if it is inside the grid.
    pub fn cell_at(&self, column: u16, row: u16) -> Option<Cursor> {
        if column < self.grid.x || row < self.grid.y {
            return None;
        }
        let x = (column - self.grid.x) / CELL_WIDTH;
        let y = (row - self.grid.y) / CELL_HEIGHT;
        if (x as usize) < GRID_SIZE && (y as usize) < GRID_SIZE {
            Some((x, y))
        } else {
            None
        }
    }

    pub fn button_at(&self, column: u16, row: u16) -> Option<Button> {
        self.buttons
            .iter()
            .find(|(_, rect)| {
                (rect.x..rect.right()).contains(&column) && (rect.y..rect.bottom()).contains(&row)
            })
            .map(|(button, _)| *button)
    }

    /// Top-left terminal position of a cell.
    pub fn cell_origin(&self, (x, y): Cursor) -> (u16, u16) {
        (self.grid.x + x * CELL_WIDTH, self.grid.y + y * CELL_HEIGHT)
    }
}

impl Default for ScreenLayout {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cells_map_by_integer_division() {
        let layout = ScreenLayout::new(0, 0);
        assert_eq!(layout.cell_at(1, 1), Some((0, 0)));
        assert_eq!(layout.cell_at(2, 1), Some((0, 0)));
        assert_eq!(layout.cell_at(3, 1), Some((1, 0)));
        assert_eq!(layout.cell_at(64, 32), Some((31, 31)));
        assert_eq!(layout.cell_at(21, 11), Some((10, 10)));
    }

    #[test]
    fn outside_the_grid_is_ignored() {
        let layout = ScreenLayout::new(0, 0);
        assert_eq!(layout.cell_at(0, 1), None);
        assert_eq!(layout.cell_at(1, 0), None);
        assert_eq!(layout.cell_at(65, 1), None);
        assert_eq!(layout.cell_at(1, 33), None);
        assert_eq!(layout.cell_at(500, 500), None);
    }

    #[test]
    fn offset_layout() {
        let layout = ScreenLayout::new(10, 4);
        assert_eq!(layout.cell_at(10, 5), None);
        assert_eq!(layout.cell_at(11, 5), Some((0, 0)));
        assert_eq!(layout.cell_origin((3, 2)), (17, 7));
    }

    #[test]
    fn buttons_sit_below_the_board() {
        let layout = ScreenLayout::new(0, 0);
        let (first, rect) = layout.buttons[0];
        assert_eq!(first, Button::Reset);
        assert_eq!(rect, Rect::new(0, 34, 7, 1));

        assert_eq!(layout.button_at(0, 34), Some(Button::Reset));
        assert_eq!(layout.button_at(6, 34), Some(Button::Reset));
        assert_eq!(layout.button_at(7, 34), None);
        assert_eq!(layout.button_at(8, 34), Some(Button::Copy));
        assert_eq!(layout.button_at(8, 33), None);

        let (_, last) = layout.buttons[layout.buttons.len() - 1];
        assert_eq!(layout.button_at(last.x, 34), Some(Button::Editor));
        assert!(last.right() <= layout.board.right() + 1);
    }

    #[test]
    fn buttons_map_to_actions() {
        assert_eq!(Button::Copy.action(), Action::Copy(Encoding::ByteArray));
        assert_eq!(Button::Copy32.action(), Action::Copy(Encoding::PackedRows));
        assert_eq!(Button::Editor.action(), Action::ShowEditor);
    }
}
