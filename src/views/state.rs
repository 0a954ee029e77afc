use serde::{Deserialize, Serialize};

/// Per-session UI state
///
/// The two flags are independent: expanding a recommendation does not touch
/// the searched movie's panel and vice versa.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectionState {
    pub searched_details_visible: bool,
    pub selected_recommendation: Option<usize>,
}

/// User interaction on the page
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// "Show details" on the searched movie
    ToggleSearchedDetails,
    /// "Show details" on the recommendation card at `index`
    ShowRecommendation { index: usize },
    /// Collapse the expanded recommendation
    Collapse,
}

impl SelectionState {
    /// Returns the state after `action`
    pub fn apply(self, action: Action) -> Self {
        match action {
            Action::ToggleSearchedDetails => Self {
                searched_details_visible: !self.searched_details_visible,
                ..self
            },
            Action::ShowRecommendation { index } => Self {
                selected_recommendation: Some(index),
                ..self
            },
            Action::Collapse => Self {
                selected_recommendation: None,
                ..self
            },
        }
    }
}
