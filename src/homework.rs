//! Optimistic homework-status toggling.
//!
//! A toggle flips the local view immediately, then the update request goes
//! out. A success acknowledgment confirms what is already shown; a failure
//! rolls the view back to the exact pre-toggle state, including the
//! dependent `completed` styling flag, and surfaces a notice.
//!
//! Each item carries a sequence counter so a late-arriving response for a
//! superseded toggle is discarded rather than overwriting a newer
//! optimistic state. Toggles are independent request/response cycles; no
//! queue.

use std::collections::BTreeMap;

use crate::models::{HomeworkItem, HomeworkStatus};

/// The local view of one homework item: the raw status plus the visual
/// classification derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeworkView {
    pub id: i64,
    pub status: HomeworkStatus,
    pub completed: bool,
}

impl HomeworkView {
    fn new(id: i64, status: HomeworkStatus) -> Self {
        Self {
            id,
            status,
            completed: status == HomeworkStatus::Completed,
        }
    }
}

/// Token for one in-flight toggle: which item, what was shown before the
/// flip, what was requested, and the sequence number that makes stale
/// responses detectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggle {
    pub item_id: i64,
    pub requested: HomeworkStatus,
    prior: HomeworkStatus,
    seq: u64,
}

/// Terminal state of a resolved toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The optimistic state is now confirmed; nothing more to do.
    Committed,
    /// The view was restored to the pre-toggle state; the message should
    /// be shown to the user.
    RolledBack(String),
    /// A newer toggle superseded this one; the response was ignored.
    Stale,
}

#[derive(Debug, Clone)]
struct ItemState {
    view: HomeworkView,
    seq: u64,
}

/// Holds the local view state for a list of homework items and applies
/// optimistic toggles against it.
#[derive(Debug, Clone, Default)]
pub struct ToggleController {
    items: BTreeMap<i64, ItemState>,
}

impl ToggleController {
    pub fn new(items: &[HomeworkItem]) -> Self {
        let items = items
            .iter()
            .map(|item| {
                (
                    item.id,
                    ItemState {
                        view: HomeworkView::new(item.id, item.status),
                        seq: 0,
                    },
                )
            })
            .collect();
        Self { items }
    }

    pub fn view(&self, item_id: i64) -> Option<HomeworkView> {
        self.items.get(&item_id).map(|s| s.view)
    }

    /// Flip an item's local state and return the token for resolving the
    /// backend response. Returns `None` for unknown items.
    pub fn begin_toggle(&mut self, item_id: i64) -> Option<Toggle> {
        let state = self.items.get_mut(&item_id)?;
        let prior = state.view.status;
        let requested = prior.toggled();
        state.view = HomeworkView::new(item_id, requested);
        state.seq += 1;
        Some(Toggle {
            item_id,
            requested,
            prior,
            seq: state.seq,
        })
    }

    /// Resolve a toggle with the backend outcome.
    ///
    /// A stale token (superseded by a later toggle on the same item) is
    /// ignored either way: its success confirms nothing and its failure
    /// must not clobber the newer optimistic state.
    pub fn resolve(&mut self, toggle: Toggle, outcome: Result<(), String>) -> ToggleOutcome {
        let Some(state) = self.items.get_mut(&toggle.item_id) else {
            return ToggleOutcome::Stale;
        };
        if state.seq != toggle.seq {
            return ToggleOutcome::Stale;
        }
        match outcome {
            Ok(()) => ToggleOutcome::Committed,
            Err(error) => {
                state.view = HomeworkView::new(toggle.item_id, toggle.prior);
                ToggleOutcome::RolledBack(format!(
                    "Failed to update status: {}. Please try again.",
                    error
                ))
            }
        }
    }
}
