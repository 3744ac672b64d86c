//! Drag-and-drop state for the roadmap board.
//!
//! The board only tracks which card is being dragged and which column it is
//! hovering; dropping a card is a plain status update on the roadmap store.

use crate::roadmap::{RoadmapItem, RoadmapPatch, RoadmapStore};
use crate::types::RoadmapStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        item_id: String,
    },
    Over {
        item_id: String,
        column: RoadmapStatus,
    },
}

impl DragState {
    pub fn item_id(&self) -> Option<&str> {
        match self {
            DragState::Idle => None,
            DragState::Dragging { item_id } | DragState::Over { item_id, .. } => Some(item_id),
        }
    }

    /// The column currently highlighted as a drop target.
    pub fn target(&self) -> Option<RoadmapStatus> {
        match self {
            DragState::Over { column, .. } => Some(*column),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        !matches!(self, DragState::Idle)
    }

    pub fn drag_start(&mut self, item_id: impl Into<String>) {
        *self = DragState::Dragging {
            item_id: item_id.into(),
        };
    }

    pub fn drag_over(&mut self, column: RoadmapStatus) {
        if let Some(id) = self.item_id() {
            *self = DragState::Over {
                item_id: id.to_string(),
                column,
            };
        }
    }

    pub fn drag_leave(&mut self) {
        if let DragState::Over { item_id, .. } = self {
            *self = DragState::Dragging {
                item_id: std::mem::take(item_id),
            };
        }
    }

    /// Cancel without moving anything.
    pub fn drag_end(&mut self) {
        *self = DragState::Idle;
    }

    /// Drop the dragged card on `column`. Returns the updated item, or `None`
    /// when nothing was being dragged or the item no longer exists.
    pub fn drop(&mut self, column: RoadmapStatus, store: &mut RoadmapStore) -> Option<RoadmapItem> {
        let state = std::mem::take(self);
        let item_id = state.item_id()?;
        move_item(store, item_id, column)
    }
}

/// Move an item to another column. Dropping onto its current column still
/// refreshes `updated_at`.
pub fn move_item(
    store: &mut RoadmapStore,
    item_id: &str,
    status: RoadmapStatus,
) -> Option<RoadmapItem> {
    let from = store.get(item_id)?.status;
    let moved = store.update_item(item_id, RoadmapPatch::status(status))?;
    tracing::debug!(id = item_id, %from, to = %status, "roadmap item moved");
    Some(moved)
}
