use crate::models::EventEdit;

/// How a single event card is shown
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardState {
    Collapsed,
    Expanded,
    Editing,
}

/// The one expanded card of a dashboard. Holding a single key rather than
/// a set is what keeps at most one card open.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    pub key: String,
    pub edit: Option<EventEdit>,
}

impl Selection {
    pub fn expanded(key: &str) -> Self {
        Self {
            key: key.to_string(),
            edit: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    pub fn state(&self) -> CardState {
        if self.is_editing() {
            CardState::Editing
        } else {
            CardState::Expanded
        }
    }
}
