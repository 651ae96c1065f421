//! Workspace grid state and the adjacency query.
//!
//! [`WorkspaceGridState`] is a value type: every edit returns a new state and
//! never touches one a caller still holds. Panels are kept in a `BTreeMap`
//! so iteration (and therefore every derived result) is ordered by id.

use std::collections::BTreeMap;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use tessel_core::{Orientation, Rect, approx_eq};

use crate::error::GridError;
use crate::panel::{PanelGridState, PanelId};

bitflags! {
    /// Which shared-edge relations an adjacency query should report.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AdjacencyKind: u8 {
        /// Neighbor lies within the anchor's horizontal extent, directly
        /// above or below it.
        const SAME_COLUMN = 1 << 0;
        /// Neighbor lies within the anchor's vertical extent, directly left
        /// or right of it.
        const SAME_ROW = 1 << 1;
    }
}

/// Which edge of the anchor a neighbor touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AdjacentSide {
    /// Above (same column) or left (same row).
    Before,
    /// Below (same column) or right (same row).
    After,
}

/// One neighbor reported by [`WorkspaceGridState::adjacent_panels`].
///
/// `kind` always holds exactly one flag. A degenerate neighbor that matches
/// both relations is reported twice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjacentPanel {
    pub panel: PanelGridState,
    pub kind: AdjacencyKind,
    pub side: AdjacentSide,
}

/// Full set of panels in one workspace plus its orientation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "GridStateRecord", try_from = "GridStateRecord")]
pub struct WorkspaceGridState {
    orientation: Orientation,
    panels: BTreeMap<PanelId, Rect>,
}

impl WorkspaceGridState {
    /// The canonical empty state, used only before the first panel exists.
    #[must_use]
    pub fn empty(orientation: Orientation) -> Self {
        Self {
            orientation,
            panels: BTreeMap::new(),
        }
    }

    /// One panel covering the whole workspace.
    #[must_use]
    pub fn single(id: PanelId, orientation: Orientation) -> Self {
        Self::empty(orientation).with_panel(id, Rect::UNIT)
    }

    /// Build a state from explicit panels, rejecting repeated ids.
    pub fn from_panels(
        orientation: Orientation,
        panels: impl IntoIterator<Item = PanelGridState>,
    ) -> Result<Self, GridError> {
        let mut map = BTreeMap::new();
        for panel in panels {
            if map.insert(panel.id, panel.rect).is_some() {
                return Err(GridError::DuplicatePanel { panel: panel.id });
            }
        }
        Ok(Self {
            orientation,
            panels: map,
        })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[inline]
    #[must_use]
    pub fn is_horizontal(&self) -> bool {
        self.orientation.is_horizontal()
    }

    #[must_use]
    pub fn get(&self, id: PanelId) -> Option<Rect> {
        self.panels.get(&id).copied()
    }

    #[must_use]
    pub fn contains(&self, id: PanelId) -> bool {
        self.panels.contains_key(&id)
    }

    /// Panels in id order.
    pub fn iter(&self) -> impl Iterator<Item = PanelGridState> + '_ {
        self.panels
            .iter()
            .map(|(&id, &rect)| PanelGridState::new(id, rect))
    }

    pub fn ids(&self) -> impl Iterator<Item = PanelId> + '_ {
        self.panels.keys().copied()
    }

    #[must_use]
    pub fn total_area(&self) -> f64 {
        self.panels.values().map(Rect::area).sum()
    }

    /// Region of the panel a split created, if one is still unassigned.
    #[must_use]
    pub fn pending_panel(&self) -> Option<Rect> {
        self.get(PanelId::NEW)
    }

    /// Copy with `id` set to `rect` (inserted or replaced).
    #[must_use]
    pub fn with_panel(&self, id: PanelId, rect: Rect) -> Self {
        let mut next = self.clone();
        next.panels.insert(id, rect);
        next
    }

    /// Copy with `id` removed. Rects of other panels are untouched.
    #[must_use]
    pub fn without(&self, id: PanelId) -> Self {
        let mut next = self.clone();
        next.panels.remove(&id);
        next
    }

    /// Copy with every update applied, inserting or replacing by id.
    #[must_use]
    pub fn union_by_id(&self, updates: impl IntoIterator<Item = PanelGridState>) -> Self {
        let mut next = self.clone();
        for update in updates {
            next.panels.insert(update.id, update.rect);
        }
        next
    }

    /// Give the pending split panel its real id.
    pub fn assign_new_panel(&self, id: PanelId) -> Result<Self, GridError> {
        if id.is_new() {
            return Err(GridError::ZeroPanelId);
        }
        if self.contains(id) {
            return Err(GridError::DuplicatePanel { panel: id });
        }
        let Some(rect) = self.pending_panel() else {
            return Err(GridError::NoPendingPanel);
        };
        Ok(self.without(PanelId::NEW).with_panel(id, rect))
    }

    /// Same rectangles, ignoring which id owns which one.
    #[must_use]
    pub fn approx_eq_geometry(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let mut unmatched: Vec<Rect> = other.panels.values().copied().collect();
        for rect in self.panels.values() {
            let Some(pos) = unmatched.iter().position(|r| r.approx_eq(rect)) else {
                return false;
            };
            unmatched.swap_remove(pos);
        }
        true
    }

    /// Neighbors sharing an edge with `anchor`, restricted to `kinds`.
    ///
    /// A neighbor qualifies only if its extent along the shared edge lies
    /// inside the anchor's. `anchor` itself is never reported, even when it is
    /// part of this state.
    #[must_use]
    pub fn adjacent_panels(
        &self,
        anchor: PanelGridState,
        kinds: AdjacencyKind,
    ) -> Vec<AdjacentPanel> {
        let current = anchor.rect;
        let mut out = Vec::new();

        for other in self.iter() {
            if other.id == anchor.id {
                continue;
            }
            let rect = other.rect;

            // | a | x |  | b | x |
            // | b | x |  | a | x |
            if kinds.contains(AdjacencyKind::SAME_COLUMN)
                && current.contains_horizontal_extent(&rect)
            {
                let side = if approx_eq(rect.bottom(), current.top()) {
                    Some(AdjacentSide::Before)
                } else if approx_eq(rect.top(), current.bottom()) {
                    Some(AdjacentSide::After)
                } else {
                    None
                };
                if let Some(side) = side {
                    out.push(AdjacentPanel {
                        panel: other,
                        kind: AdjacencyKind::SAME_COLUMN,
                        side,
                    });
                }
            }

            // | a | b |  | b | a |
            // | x | x |  | x | x |
            if kinds.contains(AdjacencyKind::SAME_ROW) && current.contains_vertical_extent(&rect) {
                let side = if approx_eq(rect.right(), current.left()) {
                    Some(AdjacentSide::Before)
                } else if approx_eq(rect.left(), current.right()) {
                    Some(AdjacentSide::After)
                } else {
                    None
                };
                if let Some(side) = side {
                    out.push(AdjacentPanel {
                        panel: other,
                        kind: AdjacencyKind::SAME_ROW,
                        side,
                    });
                }
            }
        }

        out
    }
}

/// Serialized shape of a [`WorkspaceGridState`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GridStateRecord {
    #[serde(default)]
    orientation: Orientation,
    panels: Vec<PanelGridState>,
}

impl From<WorkspaceGridState> for GridStateRecord {
    fn from(state: WorkspaceGridState) -> Self {
        Self {
            orientation: state.orientation,
            panels: state.iter().collect(),
        }
    }
}

impl TryFrom<GridStateRecord> for WorkspaceGridState {
    type Error = GridError;

    fn try_from(record: GridStateRecord) -> Result<Self, Self::Error> {
        Self::from_panels(record.orientation, record.panels)
    }
}
