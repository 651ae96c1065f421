//! Perfect-grid validation.
//!
//! A perfect grid keeps every panel inside the unit square, has no two
//! panels whose interiors overlap, and covers the whole workspace. [`validate`]
//! stops at the first violation; [`invariant_report`] collects all of them.

use serde::{Deserialize, Serialize};
use tessel_core::approx_eq;

use crate::error::StructuralError;
use crate::panel::PanelId;
use crate::state::WorkspaceGridState;

/// Check every perfect-grid invariant, failing on the first violation.
///
/// The canonical empty state is accepted.
pub fn validate(state: &WorkspaceGridState) -> Result<(), StructuralError> {
    if state.is_empty() {
        return Ok(());
    }

    let mut total_area = 0.0;
    for panel in state.iter() {
        if !panel.rect.is_within_unit() {
            return Err(StructuralError::OutOfBounds {
                panel: panel.id,
                rect: panel.rect,
            });
        }

        total_area += panel.rect.area();

        for other in state.iter() {
            if other.id == panel.id {
                continue;
            }
            if panel.rect.intersects(&other.rect) {
                return Err(StructuralError::Overlap {
                    panel: panel.id,
                    other: other.id,
                });
            }
        }
    }

    if !approx_eq(total_area, 1.0) {
        return Err(StructuralError::Coverage { total_area });
    }

    Ok(())
}

/// [`validate`] as a plain predicate.
#[must_use]
pub fn is_perfect_grid(state: &WorkspaceGridState) -> bool {
    validate(state).is_ok()
}

/// Severity for one invariant finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridInvariantSeverity {
    Error,
    Warning,
}

/// Stable code for invariant findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridInvariantCode {
    OutOfBounds,
    Overlap,
    Coverage,
    /// A split result whose new panel has not been given a real id yet.
    PendingPanel,
}

/// One finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridInvariantIssue {
    pub code: GridInvariantCode,
    pub severity: GridInvariantSeverity,
    pub panel: Option<PanelId>,
    pub related_panel: Option<PanelId>,
    pub message: String,
}

/// Every finding over one state, in panel order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GridInvariantReport {
    pub issues: Vec<GridInvariantIssue>,
}

impl GridInvariantReport {
    /// Return true if any error-level finding exists.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.severity == GridInvariantSeverity::Error)
    }

    #[must_use]
    pub fn codes(&self) -> Vec<GridInvariantCode> {
        self.issues.iter().map(|issue| issue.code).collect()
    }
}

/// Collect every invariant finding instead of stopping at the first.
///
/// Each overlapping pair is reported once.
#[must_use]
pub fn invariant_report(state: &WorkspaceGridState) -> GridInvariantReport {
    let mut report = GridInvariantReport::default();
    if state.is_empty() {
        return report;
    }

    let panels: Vec<_> = state.iter().collect();
    for (i, panel) in panels.iter().enumerate() {
        if panel.id.is_new() {
            report.issues.push(GridInvariantIssue {
                code: GridInvariantCode::PendingPanel,
                severity: GridInvariantSeverity::Warning,
                panel: Some(panel.id),
                related_panel: None,
                message: "split result still carries the pending panel id".to_string(),
            });
        }
        if !panel.rect.is_within_unit() {
            report.issues.push(GridInvariantIssue {
                code: GridInvariantCode::OutOfBounds,
                severity: GridInvariantSeverity::Error,
                panel: Some(panel.id),
                related_panel: None,
                message: format!("panel {} is out of bounds: {:?}", panel.id, panel.rect),
            });
        }
        for other in &panels[i + 1..] {
            if panel.rect.intersects(&other.rect) {
                report.issues.push(GridInvariantIssue {
                    code: GridInvariantCode::Overlap,
                    severity: GridInvariantSeverity::Error,
                    panel: Some(panel.id),
                    related_panel: Some(other.id),
                    message: format!("panel {} intersects with panel {}", panel.id, other.id),
                });
            }
        }
    }

    let total_area = state.total_area();
    if !approx_eq(total_area, 1.0) {
        report.issues.push(GridInvariantIssue {
            code: GridInvariantCode::Coverage,
            severity: GridInvariantSeverity::Error,
            panel: None,
            related_panel: None,
            message: format!("area of {total_area} doesn't match 1.0"),
        });
    }

    report
}
