//! Modal dialogs. While one is open it receives every key and the grid none.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Modal {
    ImagePath(String),
    Compare(CompareDialog),
    Message {
        text: String,
        /// dialog to return to once the message is dismissed
        back: Option<CompareDialog>,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompareDialog {
    pub panels: [String; 2],
    pub focus: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalOutcome {
    Pending,
    Cancel,
    Dismiss,
    PasteClipboard,
    SubmitPath(PathBuf),
    SubmitCompare,
}

impl Modal {
    pub fn handle_key(&mut self, key: KeyEvent) -> ModalOutcome {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match self {
            Self::Message { .. } => ModalOutcome::Dismiss,
            Self::ImagePath(path) => match key.code {
                KeyCode::Esc => ModalOutcome::Cancel,
                KeyCode::Enter => ModalOutcome::SubmitPath(PathBuf::from(path.trim())),
                KeyCode::Backspace => {
                    path.pop();
                    ModalOutcome::Pending
                }
                KeyCode::Char(c) if !ctrl => {
                    path.push(c);
                    ModalOutcome::Pending
                }
                _ => ModalOutcome::Pending,
            },
            Self::Compare(dialog) => match (ctrl, key.code) {
                (_, KeyCode::Esc) => ModalOutcome::Cancel,
                (true, KeyCode::Char('s' | 'S')) | (_, KeyCode::F(2)) => ModalOutcome::SubmitCompare,
                (true, KeyCode::Char('v' | 'V')) => ModalOutcome::PasteClipboard,
                (_, KeyCode::Tab | KeyCode::BackTab) => {
                    dialog.focus = 1 - dialog.focus;
                    ModalOutcome::Pending
                }
                (_, KeyCode::Backspace) => {
                    dialog.focused_mut().pop();
                    ModalOutcome::Pending
                }
                (_, KeyCode::Enter) => {
                    dialog.focused_mut().push('\n');
                    ModalOutcome::Pending
                }
                (false, KeyCode::Char(c)) => {
                    dialog.focused_mut().push(c);
                    ModalOutcome::Pending
                }
                _ => ModalOutcome::Pending,
            },
        }
    }

    /// Text from a terminal paste or the clipboard.
    pub fn insert_text(&mut self, text: &str) {
        match self {
            Self::ImagePath(path) => path.push_str(text.lines().next().unwrap_or_default()),
            Self::Compare(dialog) => dialog.focused_mut().push_str(text),
            Self::Message { .. } => {}
        }
    }
}

impl CompareDialog {
    fn focused_mut(&mut self) -> &mut String {
        &mut self.panels[self.focus]
    }
}
