#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tessel_grid::{
    AdjacencyKind, AdjacentSide, GridConfig, GridError, Orientation, PanelGridState, PanelId,
    WorkspaceGridState, state_without_panel, validate,
};

#[derive(Debug, Arbitrary)]
enum Step {
    Split { candidate: u8 },
    Merge { panel: u8 },
}

#[derive(Debug, Arbitrary)]
struct Input {
    max_columns: u8,
    max_rows: u8,
    vertical: bool,
    steps: Vec<Step>,
}

/// Whether some side of `panel` is fully covered by neighbors.
fn has_covered_side(state: &WorkspaceGridState, panel: PanelId) -> bool {
    let Some(rect) = state.get(panel) else {
        return false;
    };
    let adjacent = state
        .without(panel)
        .adjacent_panels(PanelGridState::new(panel, rect), AdjacencyKind::all());
    [AdjacencyKind::SAME_COLUMN, AdjacencyKind::SAME_ROW]
        .into_iter()
        .any(|kind| {
            let edge = if kind == AdjacencyKind::SAME_COLUMN {
                rect.width
            } else {
                rect.height
            };
            [AdjacentSide::Before, AdjacentSide::After]
                .into_iter()
                .any(|side| {
                    let covered: f64 = adjacent
                        .iter()
                        .filter(|adj| adj.kind == kind && adj.side == side)
                        .map(|adj| {
                            if kind == AdjacencyKind::SAME_COLUMN {
                                adj.panel.rect.width
                            } else {
                                adj.panel.rect.height
                            }
                        })
                        .sum();
                    covered > 0.0 && (covered - edge).abs() < 1e-9
                })
        })
}

fuzz_target!(|input: Input| {
    // Keep the grid small so enumeration stays fast.
    let config = GridConfig {
        max_columns: u32::from(input.max_columns % 5) + 1,
        max_rows: u32::from(input.max_rows % 5) + 1,
        orientation: if input.vertical {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        },
    };
    let mut next_raw = 1_u64;
    let Ok(first) = PanelId::new(next_raw) else {
        return;
    };
    let mut state = config.initial_state(first);

    for step in input.steps.iter().take(256) {
        match *step {
            Step::Split { candidate } => {
                let candidates = config
                    .possible_next_states(&state)
                    .expect("committed states stay within capacity");
                if candidates.is_empty() {
                    continue;
                }
                let picked = &candidates[usize::from(candidate) % candidates.len()];
                validate(picked).expect("split candidates are perfect grids");
                next_raw += 1;
                let id = PanelId::new(next_raw).expect("non-zero");
                state = picked.assign_new_panel(id).expect("one pending panel");
            }
            Step::Merge { panel } => {
                let ids: Vec<PanelId> = state.ids().collect();
                if ids.len() <= 1 {
                    continue;
                }
                let target = ids[usize::from(panel) % ids.len()];
                match state_without_panel(&state, target) {
                    Ok(next) => {
                        assert_eq!(next.len(), state.len() - 1);
                        state = next;
                    }
                    Err(GridError::NoAdjacentPanels { .. })
                        if state.len() >= 5 && !has_covered_side(&state, target) => {}
                    Err(err) => panic!("merge of {target} failed: {err}"),
                }
            }
        }

        validate(&state).expect("state should remain a perfect grid");
        assert!(state.len() <= config.capacity());

        for resizer in state.resizers() {
            assert!(resizer.connected_panels.len() >= 2);
            assert!(resizer.connected_panels.iter().all(|id| state.contains(*id)));
        }
    }
});
