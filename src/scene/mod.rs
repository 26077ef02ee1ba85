pub mod batch;
pub mod clock;
pub mod engine;
pub mod graph;

pub use batch::{FrameBatch, LineVertex, SurfaceVertex};
pub use clock::AnimationClock;
pub use engine::{MeshEngine, MeshLibrary, MeshResult};
pub use graph::{Scene, SceneNode};
