//! Panel identity.

use std::fmt;

use serde::{Deserialize, Serialize};
use tessel_core::Rect;

use crate::error::GridError;

/// Caller-assigned identifier for a panel within one workspace.
///
/// `0` is reserved for [`PanelId::NEW`], the transient label of the region a
/// split just created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(u64);

impl PanelId {
    /// Sentinel for the panel produced by a split, pending a real id.
    pub const NEW: Self = Self(0);

    /// Create a panel ID, rejecting the reserved 0.
    pub fn new(raw: u64) -> Result<Self, GridError> {
        if raw == 0 {
            return Err(GridError::ZeroPanelId);
        }
        Ok(Self(raw))
    }

    /// Get the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn is_new(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_new() {
            f.write_str("<new>")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// One panel's identity and region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelGridState {
    pub id: PanelId,
    pub rect: Rect,
}

impl PanelGridState {
    #[inline]
    pub const fn new(id: PanelId, rect: Rect) -> Self {
        Self { id, rect }
    }
}
