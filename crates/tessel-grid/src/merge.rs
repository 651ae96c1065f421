//! Merge resolution: remove a panel and hand its area to its neighbors.
//!
//! Neighbors are grown along one axis only. A horizontal workspace tries the
//! panels directly above/below the removed one first and falls back to the
//! ones left/right of it; a vertical workspace does the reverse.
//!
//! Within an axis, a side (above/below or left/right) is usable only when
//! its neighbors cover the removed panel's entire shared edge.
//!
//! A usable side holding a single panel that pairs with the removed one into
//! an aligned rectangle (same size, union starting at a multiple of its own
//! extent) is the twin half of the split that created the panel, and is
//! taken first, on either axis. Otherwise the preferred axis decides and,
//! within it, the side with fewer panels wins, then the one with less total
//! area, then the side before.

use std::cmp::Ordering;

use tessel_core::{EPSILON, Rect, approx_eq};
use tracing::{debug, debug_span, warn};

use crate::error::GridError;
use crate::invariants::is_perfect_grid;
use crate::panel::{PanelGridState, PanelId};
use crate::state::{AdjacencyKind, AdjacentPanel, AdjacentSide, WorkspaceGridState};

/// The unique state without `panel`, its area redistributed to neighbors.
///
/// Removing the last panel yields the canonical empty state; removing the
/// second-to-last stretches the survivor over the whole workspace.
///
/// # Errors
///
/// - [`GridError::UnknownPanel`] if `panel` is not in `state`.
/// - [`GridError::NoAdjacentPanels`] if no side of the panel is fully
///   covered by neighbors. Layouts built by splits alone always have such a
///   side: the other half of the panel's last split.
pub fn state_without_panel(
    state: &WorkspaceGridState,
    panel: PanelId,
) -> Result<WorkspaceGridState, GridError> {
    let Some(removed) = state.get(panel) else {
        return Err(GridError::UnknownPanel { panel });
    };
    let _span = debug_span!("grid.merge", panel = %panel, panels = state.len()).entered();

    if state.len() == 1 {
        return Ok(WorkspaceGridState::empty(state.orientation()));
    }

    let rest = state.without(panel);
    if rest.len() == 1 {
        if let Some(survivor) = rest.ids().next() {
            debug!(survivor = %survivor, "last remaining panel fills workspace");
            return Ok(WorkspaceGridState::single(survivor, state.orientation()));
        }
    }

    let adjacent = rest.adjacent_panels(PanelGridState::new(panel, removed), AdjacencyKind::all());
    let preference = if state.is_horizontal() {
        [AdjacencyKind::SAME_COLUMN, AdjacencyKind::SAME_ROW]
    } else {
        [AdjacencyKind::SAME_ROW, AdjacencyKind::SAME_COLUMN]
    };

    let usable: Vec<(AdjacencyKind, Vec<SideGroup>)> = preference
        .into_iter()
        .map(|kind| (kind, usable_sides(&adjacent, removed, kind)))
        .collect();

    let twin = usable.iter().find_map(|(kind, sides)| {
        sides
            .iter()
            .find(|group| group.is_twin_of(removed, *kind))
            .map(|group| (*kind, group))
    });
    let chosen = twin.or_else(|| {
        usable.iter().find_map(|(kind, sides)| {
            sides
                .iter()
                .min_by(|a, b| {
                    a.panels
                        .len()
                        .cmp(&b.panels.len())
                        .then_with(|| compare_area(a.area, b.area))
                        .then(a.side.cmp(&b.side))
                })
                .map(|group| (*kind, group))
        })
    });

    if let Some((kind, group)) = chosen {
        debug!(
            ?kind,
            side = ?group.side,
            grown = group.panels.len(),
            twin = twin.is_some(),
            "merged panel into neighbors"
        );
        let next = rest.union_by_id(
            group
                .panels
                .iter()
                .map(|neighbor| PanelGridState::new(neighbor.id, grow(neighbor.rect, removed, kind))),
        );
        debug_assert!(
            !is_perfect_grid(state) || is_perfect_grid(&next),
            "merge broke a perfect grid"
        );
        return Ok(next);
    }

    warn!("no neighbor side covers the removed panel");
    Err(GridError::NoAdjacentPanels { panel })
}

struct SideGroup {
    side: AdjacentSide,
    panels: Vec<PanelGridState>,
    area: f64,
}

impl SideGroup {
    /// Single same-size panel whose union with `removed` is aligned to its
    /// own extent along the merge axis.
    fn is_twin_of(&self, removed: Rect, kind: AdjacencyKind) -> bool {
        let [panel] = self.panels.as_slice() else {
            return false;
        };
        let (start, extent, other_start, other_extent) = if kind == AdjacencyKind::SAME_COLUMN {
            (removed.y, removed.height, panel.rect.y, panel.rect.height)
        } else {
            (removed.x, removed.width, panel.rect.x, panel.rect.width)
        };
        if extent <= EPSILON || !approx_eq(extent, other_extent) {
            return false;
        }
        let slots = start.min(other_start) / (2.0 * extent);
        approx_eq(slots, slots.round())
    }
}

/// Sides of `removed` along `kind` whose neighbors cover the whole shared edge.
fn usable_sides(adjacent: &[AdjacentPanel], removed: Rect, kind: AdjacencyKind) -> Vec<SideGroup> {
    let edge = if kind == AdjacencyKind::SAME_COLUMN {
        removed.width
    } else {
        removed.height
    };

    [AdjacentSide::Before, AdjacentSide::After]
        .into_iter()
        .filter_map(|side| {
            let panels: Vec<_> = adjacent
                .iter()
                .filter(|adj| adj.kind == kind && adj.side == side)
                .map(|adj| adj.panel)
                .collect();
            let covered: f64 = panels
                .iter()
                .map(|p| {
                    if kind == AdjacencyKind::SAME_COLUMN {
                        p.rect.width
                    } else {
                        p.rect.height
                    }
                })
                .sum();
            if panels.is_empty() || !approx_eq(covered, edge) {
                return None;
            }
            let area = panels.iter().map(|p| p.rect.area()).sum();
            Some(SideGroup { side, panels, area })
        })
        .collect()
}

fn compare_area(a: f64, b: f64) -> Ordering {
    if approx_eq(a, b) {
        Ordering::Equal
    } else {
        a.total_cmp(&b)
    }
}

/// Extend `rect` over `removed` along the merge axis.
fn grow(rect: Rect, removed: Rect, kind: AdjacencyKind) -> Rect {
    if kind == AdjacencyKind::SAME_COLUMN {
        Rect::new(
            rect.x,
            rect.y.min(removed.y),
            rect.width,
            rect.height + removed.height,
        )
    } else {
        Rect::new(
            rect.x.min(removed.x),
            rect.y,
            rect.width + removed.width,
            rect.height,
        )
    }
}
