use std::collections::HashMap;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::Mutex;

use crate::error::Error;
use crate::geometry::{SurfaceKind, TriangleMesh, tessellate};

pub enum MeshCommand {
    Build {
        kind: SurfaceKind,
        u_segments: usize,
        v_segments: usize,
    },
    Stop,
}

pub enum MeshResult {
    Built {
        kind: SurfaceKind,
        mesh: TriangleMesh,
    },
    Failed {
        kind: SurfaceKind,
        error: Error,
    },
}

/// Tessellates surfaces off the render thread.
pub struct MeshEngine {
    tx_cmd: Sender<MeshCommand>,
    rx_result: Receiver<MeshResult>,
    last_error: Arc<Mutex<Option<String>>>,
    thread_handle: Option<JoinHandle<()>>,
}

impl MeshEngine {
    pub fn new() -> Self {
        let (tx_cmd, rx_cmd) = channel::unbounded::<MeshCommand>();
        let (tx_result, rx_result) = channel::bounded::<MeshResult>(SurfaceKind::ALL.len());
        let last_error = Arc::new(Mutex::new(None));
        let last_error_clone = Arc::clone(&last_error);

        let thread_handle = thread::Builder::new()
            .name("mesh-worker".into())
            .spawn(move || mesh_thread(rx_cmd, tx_result, last_error_clone))
            .map_err(|e| tracing::error!("failed to spawn mesh worker: {e}"))
            .ok();

        Self {
            tx_cmd,
            rx_result,
            last_error,
            thread_handle,
        }
    }

    pub fn build(&self, kind: SurfaceKind, u_segments: usize, v_segments: usize) {
        let _ = self.tx_cmd.send(MeshCommand::Build {
            kind,
            u_segments,
            v_segments,
        });
    }

    pub fn try_recv_result(&self) -> Option<MeshResult> {
        self.rx_result.try_recv().ok()
    }

    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().clone()
    }

    pub fn stop(&self) {
        let _ = self.tx_cmd.send(MeshCommand::Stop);
    }
}

impl Drop for MeshEngine {
    fn drop(&mut self) {
        let _ = self.tx_cmd.send(MeshCommand::Stop);
        // disconnect results so a worker blocked on a full channel bails out
        let (_, closed) = channel::bounded(0);
        drop(std::mem::replace(&mut self.rx_result, closed));
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

fn mesh_thread(
    rx_cmd: Receiver<MeshCommand>,
    tx_result: Sender<MeshResult>,
    last_error: Arc<Mutex<Option<String>>>,
) {
    loop {
        let cmd = match rx_cmd.recv() {
            Ok(c) => c,
            Err(_) => return,
        };

        match cmd {
            MeshCommand::Build {
                kind,
                u_segments,
                v_segments,
            } => {
                let started = Instant::now();
                match tessellate(&kind.shape(), u_segments, v_segments) {
                    Ok(mesh) => {
                        tracing::info!(
                            ?kind,
                            vertices = mesh.vertex_count(),
                            triangles = mesh.triangle_count(),
                            degenerate = mesh.degenerate_triangles(),
                            radius = mesh.bounding_radius(),
                            elapsed_ms = started.elapsed().as_secs_f64() * 1e3,
                            "mesh built"
                        );
                        *last_error.lock() = None;
                        if tx_result.send(MeshResult::Built { kind, mesh }).is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        let error = Error::from(e);
                        tracing::warn!(?kind, %error, "mesh build failed");
                        *last_error.lock() = Some(format!("{kind:?}: {error}"));
                        if tx_result.send(MeshResult::Failed { kind, error }).is_err() {
                            return;
                        }
                    }
                }
            }
            MeshCommand::Stop => {
                tracing::debug!("mesh worker stopping");
                return;
            }
        }
    }
}

/// Finished meshes, shared with the scene nodes that draw them.
#[derive(Default)]
pub struct MeshLibrary {
    meshes: HashMap<SurfaceKind, Arc<TriangleMesh>>,
}

impl MeshLibrary {
    pub fn get(&self, kind: SurfaceKind) -> Option<Arc<TriangleMesh>> {
        self.meshes.get(&kind).cloned()
    }

    pub fn insert(&mut self, kind: SurfaceKind, mesh: TriangleMesh) {
        self.meshes.insert(kind, Arc::new(mesh));
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MeshError;
    use std::time::Duration;

    fn wait_for(engine: &MeshEngine) -> MeshResult {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(result) = engine.try_recv_result() {
                return result;
            }
            assert!(Instant::now() < deadline, "mesh worker did not answer");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn builds_meshes_in_the_background() {
        let engine = MeshEngine::new();
        engine.build(SurfaceKind::Torus, 16, 8);
        match wait_for(&engine) {
            MeshResult::Built { kind, mesh } => {
                assert_eq!(kind, SurfaceKind::Torus);
                assert_eq!(mesh.triangle_count(), 16 * 8 * 2);
            }
            MeshResult::Failed { error, .. } => panic!("unexpected error: {error}"),
        }
        assert_eq!(engine.last_error(), None);
    }

    #[test]
    fn reports_invalid_resolutions() {
        let engine = MeshEngine::new();
        engine.build(SurfaceKind::Cylinder, 1, 8);
        match wait_for(&engine) {
            MeshResult::Failed { kind, error } => {
                assert_eq!(kind, SurfaceKind::Cylinder);
                assert!(matches!(
                    error,
                    Error::Mesh(MeshError::TooFewSegments { axis: "u", got: 1, .. })
                ));
            }
            MeshResult::Built { .. } => panic!("a one-segment cylinder must be rejected"),
        }
        assert!(engine.last_error().is_some_and(|e| e.contains("Cylinder")));
    }

    #[test]
    fn library_shares_meshes() {
        let mut library = MeshLibrary::default();
        assert!(library.get(SurfaceKind::Sphere).is_none());
        library.insert(SurfaceKind::Sphere, TriangleMesh::default());
        let a = library.get(SurfaceKind::Sphere).unwrap();
        let b = library.get(SurfaceKind::Sphere).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(library.len(), 1);
        assert!(!library.is_empty());
    }
}
