//! Error taxonomy for the grid engine.
//!
//! [`StructuralError`] means a state was never a perfect grid. [`GridError`]
//! covers precondition violations by the caller. Neither is retryable.

use tessel_core::Rect;
use thiserror::Error;

use crate::panel::PanelId;

/// A perfect-grid invariant does not hold.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StructuralError {
    #[error("panel {panel} is out of bounds: {rect:?}")]
    OutOfBounds { panel: PanelId, rect: Rect },
    #[error("panel {panel} intersects with panel {other}")]
    Overlap { panel: PanelId, other: PanelId },
    #[error("area of {total_area} doesn't match 1.0")]
    Coverage { total_area: f64 },
}

/// A grid operation was invoked outside its contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("panel id 0 is reserved for pending panels")]
    ZeroPanelId,
    #[error("panel {panel} is not part of the workspace")]
    UnknownPanel { panel: PanelId },
    #[error("panel {panel} appears more than once")]
    DuplicatePanel { panel: PanelId },
    #[error("grid capacity must be at least 1x1 (got {max_columns}x{max_rows})")]
    InvalidCapacity { max_columns: u32, max_rows: u32 },
    #[error("workspace holds {panels} panels but capacity is {capacity}")]
    CapacityExceeded { panels: usize, capacity: usize },
    #[error("workspace already contains a pending panel")]
    PendingPanel,
    #[error("workspace has no pending panel to assign")]
    NoPendingPanel,
    #[error("panel {panel} has no neighbor that can absorb its area")]
    NoAdjacentPanels { panel: PanelId },
    #[error(transparent)]
    Structural(#[from] StructuralError),
}
