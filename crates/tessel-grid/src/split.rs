//! Split enumeration: every state reachable by halving one panel.
//!
//! Each candidate labels the new half with [`PanelId::NEW`]; the caller picks
//! one and gives it a real id with
//! [`WorkspaceGridState::assign_new_panel`](crate::WorkspaceGridState::assign_new_panel).
//!
//! # Occupancy counting
//!
//! A vertical cut adds a column to the panel's row, so it is allowed only
//! while [`column_count`] is below `max_columns` (rows are the transpose).
//! The count includes every panel with the same top edge, plus panels that
//! sit directly left or right of the panel without sharing its top edge:
//!
//! ```text
//! | 1 | 2 |  | 1 | 2 |
//! | 3 | 2 |  | 1 | 3 |
//! ```
//!
//! For panel `3`, both layouts count two columns.
//!
//! The count only looks at the panel's direct neighbors, so a cut is also
//! refused when some horizontal (vertical) line through the panel already
//! crosses `max_columns` (`max_rows`) panels anywhere in the workspace.

use tessel_core::{Orientation, Rect, approx_eq, approx_ge, approx_le};
use tracing::{debug, trace};

use crate::error::GridError;
use crate::panel::{PanelGridState, PanelId};
use crate::state::WorkspaceGridState;

/// Every state reachable by splitting exactly one panel in two.
///
/// Returns an empty list when the workspace is empty or already holds
/// `max_columns * max_rows` panels.
///
/// # Errors
///
/// - [`GridError::InvalidCapacity`] if either limit is zero.
/// - [`GridError::PendingPanel`] if `state` still carries a split result.
/// - [`GridError::CapacityExceeded`] if `state` holds more panels than allowed.
pub fn possible_next_states(
    state: &WorkspaceGridState,
    max_columns: u32,
    max_rows: u32,
) -> Result<Vec<WorkspaceGridState>, GridError> {
    if max_columns == 0 || max_rows == 0 {
        return Err(GridError::InvalidCapacity {
            max_columns,
            max_rows,
        });
    }
    if state.contains(PanelId::NEW) {
        return Err(GridError::PendingPanel);
    }

    let capacity = max_columns as usize * max_rows as usize;
    if state.len() > capacity {
        return Err(GridError::CapacityExceeded {
            panels: state.len(),
            capacity,
        });
    }
    if state.len() == capacity {
        debug!(capacity, "workspace full, no split candidates");
        return Ok(Vec::new());
    }

    let mut candidates = Vec::new();
    for panel in state.iter() {
        let columns = column_count(state, panel)
            .max(crossings(state, panel.rect, Orientation::Horizontal));
        if columns < max_columns as usize {
            push_split(&mut candidates, state, panel, Orientation::Vertical);
        }
        let rows =
            row_count(state, panel).max(crossings(state, panel.rect, Orientation::Vertical));
        if rows < max_rows as usize {
            push_split(&mut candidates, state, panel, Orientation::Horizontal);
        }
    }

    debug!(
        panels = state.len(),
        candidates = candidates.len(),
        "enumerated split candidates"
    );
    Ok(candidates)
}

/// Columns occupied in the row band of `panel`.
#[must_use]
pub fn column_count(state: &WorkspaceGridState, panel: PanelGridState) -> usize {
    let current = panel.rect;
    state
        .iter()
        .filter(|other| {
            let other = other.rect;
            if approx_eq(other.y, current.y) {
                return true;
            }
            let beside = approx_eq(other.left(), current.right())
                || approx_eq(other.right(), current.left());
            beside
                && (approx_ge(other.bottom(), current.y) || approx_le(other.top(), current.y))
        })
        .count()
}

/// Rows occupied in the column band of `panel`.
#[must_use]
pub fn row_count(state: &WorkspaceGridState, panel: PanelGridState) -> usize {
    let current = panel.rect;
    state
        .iter()
        .filter(|other| {
            let other = other.rect;
            if approx_eq(other.x, current.x) {
                return true;
            }
            let stacked = approx_eq(other.top(), current.bottom())
                || approx_eq(other.bottom(), current.top());
            stacked
                && (approx_ge(other.right(), current.x) || approx_le(other.left(), current.x))
        })
        .count()
}

/// Most panels crossed by one line of `line` orientation running through `rect`.
///
/// Lines are sampled between consecutive panel edges inside `rect`.
fn crossings(state: &WorkspaceGridState, rect: Rect, line: Orientation) -> usize {
    let span = |r: &Rect| match line {
        Orientation::Horizontal => (r.top(), r.bottom()),
        Orientation::Vertical => (r.left(), r.right()),
    };
    let (low, high) = span(&rect);

    let mut edges = vec![low, high];
    for other in state.iter() {
        let (start, end) = span(&other.rect);
        edges.extend([start, end].into_iter().filter(|&e| e > low && e < high));
    }
    edges.sort_by(f64::total_cmp);
    edges.dedup_by(|a, b| approx_eq(*a, *b));

    edges
        .windows(2)
        .map(|pair| {
            let at = (pair[0] + pair[1]) / 2.0;
            state
                .iter()
                .filter(|other| {
                    let (start, end) = span(&other.rect);
                    start < at && at < end
                })
                .count()
        })
        .max()
        .unwrap_or(0)
}

fn push_split(
    out: &mut Vec<WorkspaceGridState>,
    state: &WorkspaceGridState,
    panel: PanelGridState,
    cut: Orientation,
) {
    let (first, second) = panel.rect.split(cut);
    trace!(panel = %panel.id, ?cut, "split candidate");

    out.push(with_halves(state, panel.id, first, second));
    if !first.approx_eq(&second) {
        out.push(with_halves(state, panel.id, second, first));
    }
}

fn with_halves(
    state: &WorkspaceGridState,
    id: PanelId,
    kept: Rect,
    created: Rect,
) -> WorkspaceGridState {
    state.union_by_id([
        PanelGridState::new(id, kept),
        PanelGridState::new(PanelId::NEW, created),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invariants::is_perfect_grid;

    fn id(raw: u64) -> PanelId {
        PanelId::new(raw).expect("test ID must be non-zero")
    }

    fn state(panels: &[(u64, Rect)]) -> WorkspaceGridState {
        WorkspaceGridState::from_panels(
            Orientation::Horizontal,
            panels
                .iter()
                .map(|&(raw, rect)| PanelGridState::new(id(raw), rect)),
        )
        .expect("unique ids")
    }

    #[test]
    fn single_panel_yields_both_orderings_per_axis() {
        let grid = WorkspaceGridState::single(id(1), Orientation::Horizontal);
        let next = possible_next_states(&grid, 2, 2).expect("valid capacity");
        assert_eq!(next.len(), 4);

        // Vertical cut: the split panel keeps the left half, then the right.
        assert_eq!(next[0].get(id(1)), Some(Rect::new(0.0, 0.0, 0.5, 1.0)));
        assert_eq!(next[0].pending_panel(), Some(Rect::new(0.5, 0.0, 0.5, 1.0)));
        assert_eq!(next[1].get(id(1)), Some(Rect::new(0.5, 0.0, 0.5, 1.0)));
        assert_eq!(next[1].pending_panel(), Some(Rect::new(0.0, 0.0, 0.5, 1.0)));

        // Horizontal cut: top/bottom.
        assert_eq!(next[2].get(id(1)), Some(Rect::new(0.0, 0.0, 1.0, 0.5)));
        assert_eq!(next[3].pending_panel(), Some(Rect::new(0.0, 0.0, 1.0, 0.5)));

        assert!(next.iter().all(is_perfect_grid));
        assert!(next.iter().all(|s| s.len() == 2));
    }

    #[test]
    fn equal_sized_halves_are_not_suppressed() {
        // Halves of a real panel always differ in position.
        let grid = WorkspaceGridState::single(id(1), Orientation::Horizontal);
        let next = possible_next_states(&grid, 2, 1).expect("valid capacity");
        assert_eq!(next.len(), 2);
        assert!(next[0].approx_eq_geometry(&next[1]));
        assert_ne!(next[0], next[1]);
    }

    #[test]
    fn near_equal_halves_of_degenerate_panel_are_suppressed() {
        let grid = state(&[(1, Rect::UNIT), (2, Rect::new(1.0, 0.0, 0.0, 1.0))]);
        let next = possible_next_states(&grid, 4, 1).expect("valid capacity");
        let from_degenerate = next
            .iter()
            .filter(|s| s.get(id(1)) == Some(Rect::UNIT))
            .count();
        assert_eq!(from_degenerate, 1);
    }

    #[test]
    fn full_workspace_yields_nothing() {
        let grid = state(&[
            (1, Rect::new(0.0, 0.0, 0.5, 1.0)),
            (2, Rect::new(0.5, 0.0, 0.5, 1.0)),
        ]);
        assert!(possible_next_states(&grid, 2, 1).expect("at capacity").is_empty());
        assert!(
            possible_next_states(&WorkspaceGridState::empty(Orientation::Horizontal), 2, 2)
                .expect("empty")
                .is_empty()
        );
    }

    #[test]
    fn precondition_violations_are_errors() {
        let grid = state(&[
            (1, Rect::new(0.0, 0.0, 0.5, 1.0)),
            (2, Rect::new(0.5, 0.0, 0.5, 1.0)),
        ]);
        assert_eq!(
            possible_next_states(&grid, 1, 1),
            Err(GridError::CapacityExceeded {
                panels: 2,
                capacity: 1,
            })
        );
        assert_eq!(
            possible_next_states(&grid, 0, 3),
            Err(GridError::InvalidCapacity {
                max_columns: 0,
                max_rows: 3,
            })
        );
        let pending = grid.with_panel(PanelId::NEW, Rect::new(0.0, 0.0, 0.0, 0.0));
        assert_eq!(possible_next_states(&pending, 3, 3), Err(GridError::PendingPanel));
    }

    #[test]
    fn column_limit_blocks_vertical_cuts() {
        let grid = state(&[
            (1, Rect::new(0.0, 0.0, 0.5, 1.0)),
            (2, Rect::new(0.5, 0.0, 0.5, 1.0)),
        ]);
        let next = possible_next_states(&grid, 2, 2).expect("valid capacity");
        // Only horizontal cuts remain: two panels, two orderings each.
        assert_eq!(next.len(), 4);
        for candidate in &next {
            let pending = candidate.pending_panel().expect("pending half");
            assert!((pending.width - 0.5).abs() < 1e-12);
            assert!((pending.height - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn t_shaped_neighbor_counts_as_a_column() {
        // | 1 | 2 |
        // | 3 | 2 |
        let grid = state(&[
            (1, Rect::new(0.0, 0.0, 0.5, 0.5)),
            (2, Rect::new(0.5, 0.0, 0.5, 1.0)),
            (3, Rect::new(0.0, 0.5, 0.5, 0.5)),
        ]);
        let three = PanelGridState::new(id(3), Rect::new(0.0, 0.5, 0.5, 0.5));
        assert_eq!(column_count(&grid, three), 2);

        // | 1 | 3 |
        // | 2 | 2 |
        let grid = state(&[
            (1, Rect::new(0.0, 0.0, 0.5, 0.5)),
            (2, Rect::new(0.0, 0.5, 1.0, 0.5)),
            (3, Rect::new(0.5, 0.0, 0.5, 0.5)),
        ]);
        let three = PanelGridState::new(id(3), Rect::new(0.5, 0.0, 0.5, 0.5));
        assert_eq!(row_count(&grid, three), 2);
    }

    #[test]
    fn cut_is_refused_when_a_line_already_crosses_the_limit() {
        // | 1 | 3 | 4 |
        // | 2 | 3 | 4 |
        let grid = state(&[
            (1, Rect::new(0.0, 0.0, 0.5, 0.5)),
            (2, Rect::new(0.0, 0.5, 0.5, 0.5)),
            (3, Rect::new(0.5, 0.0, 0.25, 1.0)),
            (4, Rect::new(0.75, 0.0, 0.25, 1.0)),
        ]);
        let two = PanelGridState::new(id(2), Rect::new(0.0, 0.5, 0.5, 0.5));
        assert_eq!(column_count(&grid, two), 2);
        assert_eq!(crossings(&grid, two.rect, Orientation::Horizontal), 3);

        // Only 3 and 4 can still be cut, and only horizontally.
        let next = possible_next_states(&grid, 3, 2).expect("valid capacity");
        assert_eq!(next.len(), 4);
        for candidate in &next {
            assert_eq!(candidate.get(id(1)), grid.get(id(1)));
            assert_eq!(candidate.get(id(2)), grid.get(id(2)));
            let pending = candidate.pending_panel().expect("pending half");
            assert!((pending.width - 0.25).abs() < 1e-12);
            assert!((pending.height - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn input_state_is_untouched() {
        let grid = WorkspaceGridState::single(id(1), Orientation::Horizontal);
        let before = grid.clone();
        let _ = possible_next_states(&grid, 3, 3).expect("valid capacity");
        assert_eq!(grid, before);
    }
}
