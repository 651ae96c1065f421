//! Resizer derivation: draggable handles on shared panel boundaries.
//!
//! Every pair of edge-sharing panels produces a handle at the middle of the
//! shared edge. Handles on the same boundary line of one panel share their
//! connected panels, and boundaries that cut across the workspace's primary
//! axis are unified per line so dragging one segment moves every panel on it.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tessel_core::{Orientation, Point, Rect, approx_eq};
use tracing::trace;

use crate::panel::{PanelGridState, PanelId};
use crate::state::{AdjacencyKind, WorkspaceGridState};

/// One draggable boundary handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResizerInfo {
    /// Orientation of the boundary line the handle sits on.
    pub orientation: Orientation,
    /// Middle of the shared edge, in unit space.
    pub position: Point,
    /// Panels with an edge on this boundary, in first-seen order.
    pub connected_panels: Vec<PanelId>,
}

impl ResizerInfo {
    /// Coordinate of the boundary line: `y` for horizontal, `x` for vertical.
    #[must_use]
    pub fn line_coordinate(&self) -> f64 {
        match self.orientation {
            Orientation::Horizontal => self.position.y,
            Orientation::Vertical => self.position.x,
        }
    }

    fn is_collinear(&self, other: &ResizerInfo) -> bool {
        self.orientation == other.orientation
            && approx_eq(self.line_coordinate(), other.line_coordinate())
    }
}

/// Derive every resizer for `state`.
///
/// `workspace` selects which boundaries get unified across the whole
/// workspace: vertical lines in a horizontal workspace, horizontal lines in
/// a vertical one. Handles at the same position collapse to the first one
/// found.
///
/// Handles are joined only when they have the same orientation and lie on the
/// same line. Sharing a single coordinate is not enough: the top and bottom
/// edges of a full-width panel stay two resizers, and a horizontal and a
/// vertical handle with equal `x` or `y` are never grouped.
#[must_use]
pub fn resizers(state: &WorkspaceGridState, workspace: Orientation) -> Vec<ResizerInfo> {
    let mut raw = Vec::with_capacity(state.len() * 2);

    for current in state.iter() {
        let local: Vec<ResizerInfo> = state
            .adjacent_panels(current, AdjacencyKind::all())
            .into_iter()
            .map(|adj| {
                let orientation = if adj.kind == AdjacencyKind::SAME_COLUMN {
                    Orientation::Horizontal
                } else {
                    Orientation::Vertical
                };
                raw_resizer(current, adj.panel, orientation)
            })
            .collect();

        // Segments on the same edge line of `current` move together.
        for info in &local {
            let mut connected = ConnectedPanels::from_slice(&info.connected_panels);
            for other in &local {
                if other.position.approx_eq(&info.position) || !info.is_collinear(other) {
                    continue;
                }
                connected.extend(&other.connected_panels);
            }
            raw.push(ResizerInfo {
                connected_panels: connected.into_vec(),
                ..info.clone()
            });
        }
    }

    let mut distinct: Vec<ResizerInfo> = Vec::with_capacity(raw.len());
    for info in raw {
        let seen = distinct
            .iter()
            .any(|d| d.orientation == info.orientation && d.position.approx_eq(&info.position));
        if !seen {
            distinct.push(info);
        }
    }

    unify_lines(&mut distinct, workspace.flipped());
    trace!(count = distinct.len(), "derived resizers");
    distinct
}

impl WorkspaceGridState {
    /// [`resizers`] using this state's own orientation.
    #[must_use]
    pub fn resizers(&self) -> Vec<ResizerInfo> {
        resizers(self, self.orientation())
    }
}

fn raw_resizer(current: PanelGridState, other: PanelGridState, orientation: Orientation) -> ResizerInfo {
    ResizerInfo {
        orientation,
        position: Rect::midpoint_between(&current.rect, &other.rect, orientation),
        connected_panels: vec![current.id, other.id],
    }
}

/// Give every `boundary` resizer on the same line the union of their panels.
fn unify_lines(resizers: &mut [ResizerInfo], boundary: Orientation) {
    let mut lines: Vec<(f64, Vec<usize>)> = Vec::new();
    for (index, info) in resizers.iter().enumerate() {
        if info.orientation != boundary {
            continue;
        }
        let coordinate = info.line_coordinate();
        match lines.iter_mut().find(|(c, _)| approx_eq(*c, coordinate)) {
            Some((_, members)) => members.push(index),
            None => lines.push((coordinate, vec![index])),
        }
    }

    for (_, members) in lines {
        if members.len() < 2 {
            continue;
        }
        let mut connected = ConnectedPanels::default();
        for &index in &members {
            connected.extend(&resizers[index].connected_panels);
        }
        let connected = connected.into_vec();
        for index in members {
            resizers[index].connected_panels = connected.clone();
        }
    }
}

/// Insertion-ordered set of panel ids.
#[derive(Default)]
struct ConnectedPanels {
    order: Vec<PanelId>,
    seen: FxHashSet<PanelId>,
}

impl ConnectedPanels {
    fn from_slice(ids: &[PanelId]) -> Self {
        let mut set = Self::default();
        set.extend(ids);
        set
    }

    fn extend(&mut self, ids: &[PanelId]) {
        for &id in ids {
            if self.seen.insert(id) {
                self.order.push(id);
            }
        }
    }

    fn into_vec(self) -> Vec<PanelId> {
        self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::state_without_panel;
    use crate::split::possible_next_states;

    fn id(raw: u64) -> PanelId {
        PanelId::new(raw).expect("test ID must be non-zero")
    }

    fn ids(raw: &[u64]) -> Vec<PanelId> {
        raw.iter().map(|&r| id(r)).collect()
    }

    fn state(orientation: Orientation, panels: &[(u64, Rect)]) -> WorkspaceGridState {
        WorkspaceGridState::from_panels(
            orientation,
            panels
                .iter()
                .map(|&(raw, rect)| PanelGridState::new(id(raw), rect)),
        )
        .expect("unique ids")
    }

    fn two_by_two(orientation: Orientation) -> WorkspaceGridState {
        state(
            orientation,
            &[
                (1, Rect::new(0.0, 0.0, 0.5, 0.5)),
                (2, Rect::new(0.5, 0.0, 0.5, 0.5)),
                (3, Rect::new(0.0, 0.5, 0.5, 0.5)),
                (4, Rect::new(0.5, 0.5, 0.5, 0.5)),
            ],
        )
    }

    fn find(resizers: &[ResizerInfo], x: f64, y: f64) -> &ResizerInfo {
        let target = Point::new(x, y);
        resizers
            .iter()
            .find(|r| r.position.approx_eq(&target))
            .expect("resizer at position")
    }

    #[test]
    fn side_by_side_split_has_one_vertical_resizer() {
        let grid = WorkspaceGridState::single(id(1), Orientation::Horizontal);
        let split = possible_next_states(&grid, 2, 2).expect("valid capacity");
        let committed = split[0].assign_new_panel(id(2)).expect("pending panel");

        let resizers = committed.resizers();
        assert_eq!(resizers.len(), 1);
        assert_eq!(resizers[0].orientation, Orientation::Vertical);
        assert!(resizers[0].position.approx_eq(&Point::new(0.5, 0.5)));
        assert_eq!(resizers[0].connected_panels, ids(&[1, 2]));
    }

    #[test]
    fn horizontal_workspace_unifies_vertical_lines() {
        let resizers = resizers(&two_by_two(Orientation::Horizontal), Orientation::Horizontal);
        assert_eq!(resizers.len(), 4);

        let upper = find(&resizers, 0.5, 0.25);
        assert_eq!(upper.orientation, Orientation::Vertical);
        assert_eq!(upper.connected_panels, ids(&[1, 2, 3, 4]));
        assert_eq!(find(&resizers, 0.5, 0.75).connected_panels, ids(&[1, 2, 3, 4]));

        let left = find(&resizers, 0.25, 0.5);
        assert_eq!(left.orientation, Orientation::Horizontal);
        assert_eq!(left.connected_panels, ids(&[1, 3]));
        assert_eq!(find(&resizers, 0.75, 0.5).connected_panels, ids(&[2, 4]));
    }

    #[test]
    fn vertical_workspace_unifies_horizontal_lines() {
        let resizers = resizers(&two_by_two(Orientation::Vertical), Orientation::Vertical);
        assert_eq!(resizers.len(), 4);
        assert_eq!(find(&resizers, 0.25, 0.5).connected_panels, ids(&[1, 3, 2, 4]));
        assert_eq!(find(&resizers, 0.75, 0.5).connected_panels, ids(&[1, 3, 2, 4]));
        assert_eq!(find(&resizers, 0.5, 0.25).connected_panels, ids(&[1, 2]));
        assert_eq!(find(&resizers, 0.5, 0.75).connected_panels, ids(&[3, 4]));
    }

    #[test]
    fn segments_of_one_panel_edge_share_panels() {
        // | 1 | 1 |
        // | 2 | 3 |
        let grid = state(
            Orientation::Horizontal,
            &[
                (1, Rect::new(0.0, 0.0, 1.0, 0.5)),
                (2, Rect::new(0.0, 0.5, 0.5, 0.5)),
                (3, Rect::new(0.5, 0.5, 0.5, 0.5)),
            ],
        );
        let resizers = grid.resizers();
        assert_eq!(resizers.len(), 3);
        assert_eq!(find(&resizers, 0.25, 0.5).connected_panels, ids(&[1, 2, 3]));
        assert_eq!(find(&resizers, 0.75, 0.5).connected_panels, ids(&[1, 3, 2]));

        let divider = find(&resizers, 0.5, 0.75);
        assert_eq!(divider.orientation, Orientation::Vertical);
        assert_eq!(divider.connected_panels, ids(&[2, 3]));
    }

    #[test]
    fn opposite_edges_of_a_panel_stay_separate() {
        let grid = state(
            Orientation::Horizontal,
            &[
                (1, Rect::new(0.0, 0.0, 1.0, 0.25)),
                (2, Rect::new(0.0, 0.25, 1.0, 0.5)),
                (3, Rect::new(0.0, 0.75, 1.0, 0.25)),
            ],
        );
        let resizers = grid.resizers();
        assert_eq!(resizers.len(), 2);
        assert_eq!(find(&resizers, 0.5, 0.25).connected_panels, ids(&[1, 2]));
        assert_eq!(find(&resizers, 0.5, 0.75).connected_panels, ids(&[2, 3]));
    }

    #[test]
    fn removing_a_panel_removes_its_resizers() {
        let grid = state(
            Orientation::Horizontal,
            &[
                (1, Rect::new(0.0, 0.0, 0.5, 1.0)),
                (2, Rect::new(0.5, 0.0, 0.5, 0.5)),
                (3, Rect::new(0.5, 0.5, 0.5, 0.5)),
            ],
        );
        let before = grid.resizers();
        assert!(before.iter().any(|r| r.connected_panels.contains(&id(2))));

        let after = state_without_panel(&grid, id(2)).expect("mergeable").resizers();
        assert_eq!(after.len(), 1);
        assert!(after.iter().all(|r| !r.connected_panels.contains(&id(2))));
        assert_eq!(after[0].connected_panels, ids(&[1, 3]));
    }

    #[test]
    fn single_panel_has_no_resizers() {
        let grid = WorkspaceGridState::single(id(1), Orientation::Horizontal);
        assert!(grid.resizers().is_empty());
    }

    #[test]
    fn resizers_serialize_to_json() {
        let grid = two_by_two(Orientation::Horizontal);
        let json = serde_json::to_value(grid.resizers()).expect("serialize");
        assert_eq!(json[0]["orientation"], "vertical");
        assert_eq!(json[0]["connected_panels"], serde_json::json!([1, 2, 3, 4]));
    }
}
