//! Form-Rekonstruktion: Hull-Reduktion, Kurvenaufbau, Extrusion und Form-Zustand.

pub mod adjustable;
pub mod arena;
pub mod boundary;
pub mod curve;
pub mod error;
pub mod extrude;
pub mod tension;

pub use adjustable::{AdjustableShape, ShapeConfig, CURVE_LINE_NAME, SHAPE_GROUP_NAME, WALL_NAME};
pub use arena::ShapeArena;
pub use boundary::reduce_boundary;
pub use curve::{build_curve, CurveConfig, SampledCurve};
pub use error::{CurveError, ExtrudeError, ShapeError};
pub use extrude::{ExtrudeMode, MeshExtruder};
pub use tension::{SubscriptionId, Tension};

/// Stabile ID einer Form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub u64);

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
