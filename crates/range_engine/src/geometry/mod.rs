//! Triangle-soup geometry and curve sampling

mod coords;
mod spline;

pub use coords::{GeometryError, TriangleMesh};
pub use spline::CatmullRom3;
