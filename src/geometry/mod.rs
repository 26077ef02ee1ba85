pub mod curves;
pub mod frame;
pub mod mesh;
pub mod surface;

pub use frame::{SurfaceFrame, tangent_frame};
pub use mesh::{CurveMesh, TriangleMesh, polyline_segments, tessellate};
pub use surface::{ParametricSurface, PrincipalCurvatures, Shape, SurfaceKind};
