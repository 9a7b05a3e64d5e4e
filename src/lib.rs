//! Two-point sphere fitting for fiducial point sets.
//!
//! The core is a set of pure operations in [`operations::fit`]: the center
//! of mass of a point set, the sphere whose diameter joins the first two
//! points, and [`operations::fit::Process`], which runs both and tessellates
//! the result into a styled triangle mesh. [`scene`] and [`module`] provide
//! an explicit host context and the interactive controller on top.

pub mod error;
pub mod geometry;
pub mod math;
pub mod module;
pub mod operations;
pub mod scene;
pub mod sink;
pub mod source;
pub mod tessellation;

pub use error::{Result, SphereFitError};
