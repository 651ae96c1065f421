#![forbid(unsafe_code)]

//! Core: normalized geometry and floating-point tolerance.
//!
//! # Role in Tessel
//! `tessel-core` is the leaf crate. It owns the unit-space [`Rect`] and
//! [`Point`] types, the workspace/boundary [`Orientation`], and the single
//! tolerance used by every comparison in the grid engine.
//!
//! # How it fits in the system
//! `tessel-grid` builds panel partitions out of these rectangles. Every
//! boundary comparison there goes through [`tolerance`] so that drift from
//! repeated halving and merging never produces a spurious gap or overlap.

pub mod geometry;
pub mod tolerance;

pub use geometry::{Orientation, Point, Rect};
pub use tolerance::{EPSILON, approx_eq, approx_ge, approx_gt, approx_le, approx_lt};
