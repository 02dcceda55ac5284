use crate::action::{Action, Cursor};

#[derive(Default, Debug)]
pub struct InputState {
    pub cursor: Cursor,
    pub action: Option<Action>,
}
