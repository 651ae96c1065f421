#![forbid(unsafe_code)]

//! Perfect-grid tiling engine.
//!
//! A workspace is the unit square partitioned into rectangular panels with no
//! gaps and no overlaps. The engine answers three questions about such a
//! partition:
//!
//! - which layouts can be reached by splitting one panel ([`possible_next_states`]),
//! - what the layout looks like after removing a panel ([`state_without_panel`]),
//! - where the draggable boundaries are and which panels each one moves
//!   ([`resizers`]).
//!
//! Every operation is a pure function from one [`WorkspaceGridState`] value to
//! another. Split results label the new half with [`PanelId::NEW`] until the
//! caller commits one with [`WorkspaceGridState::assign_new_panel`].
//!
//! ```
//! use tessel_grid::{GridConfig, PanelId, is_perfect_grid, state_without_panel};
//!
//! let config = GridConfig::default();
//! let first = PanelId::new(1).unwrap();
//! let grid = config.initial_state(first);
//!
//! let candidates = config.possible_next_states(&grid).unwrap();
//! let grid = candidates[0].assign_new_panel(PanelId::new(2).unwrap()).unwrap();
//! assert!(is_perfect_grid(&grid));
//! assert_eq!(grid.resizers().len(), 1);
//!
//! let grid = state_without_panel(&grid, first).unwrap();
//! assert_eq!(grid.len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod invariants;
pub mod merge;
pub mod panel;
pub mod resizer;
pub mod split;
pub mod state;

pub use tessel_core::{EPSILON, Orientation, Point, Rect};

pub use config::{ConfigError, GridConfig};
pub use error::{GridError, StructuralError};
pub use invariants::{
    GridInvariantCode, GridInvariantIssue, GridInvariantReport, GridInvariantSeverity,
    invariant_report, is_perfect_grid, validate,
};
pub use merge::state_without_panel;
pub use panel::{PanelGridState, PanelId};
pub use resizer::{ResizerInfo, resizers};
pub use split::{column_count, possible_next_states, row_count};
pub use state::{AdjacencyKind, AdjacentPanel, AdjacentSide, WorkspaceGridState};
