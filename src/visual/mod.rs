//! Animated diagrams. Each one is a pure function of the clock and view state.

mod geodesics;
mod non_orientable;
mod normal_sections;
mod surface_frame;

use crate::geometry::SurfaceKind;
use crate::scene::{MeshLibrary, Scene};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VisualizationKind {
    SurfaceFrame,
    NonOrientable,
    Geodesics,
    NormalSections,
}

/// Local view state the diagrams read; mutated only by the control panel.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    pub frame_shape: SurfaceKind,
    pub strip_shape: SurfaceKind,
    pub section_shape: SurfaceKind,
    pub show_tangent_plane: bool,
    pub show_latitude: bool,
    pub geodesic_count: u32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            frame_shape: SurfaceKind::Sphere,
            strip_shape: SurfaceKind::MobiusStrip,
            section_shape: SurfaceKind::Cylinder,
            show_tangent_plane: true,
            show_latitude: false,
            geodesic_count: 6,
        }
    }
}

impl VisualizationKind {
    pub const ALL: [VisualizationKind; 4] = [
        VisualizationKind::SurfaceFrame,
        VisualizationKind::NonOrientable,
        VisualizationKind::Geodesics,
        VisualizationKind::NormalSections,
    ];

    /// Shapes the selector offers for this diagram.
    pub fn shape_choices(self) -> &'static [SurfaceKind] {
        match self {
            VisualizationKind::SurfaceFrame => {
                &[SurfaceKind::Sphere, SurfaceKind::Torus, SurfaceKind::Cylinder]
            }
            VisualizationKind::NonOrientable => &[SurfaceKind::MobiusStrip, SurfaceKind::KleinBottle],
            VisualizationKind::NormalSections => &[SurfaceKind::Sphere, SurfaceKind::Cylinder],
            VisualizationKind::Geodesics => &[],
        }
    }

    /// The selector slot in `ViewState` this diagram reads.
    pub fn selected_shape(self, view: &mut ViewState) -> Option<&mut SurfaceKind> {
        match self {
            VisualizationKind::SurfaceFrame => Some(&mut view.frame_shape),
            VisualizationKind::NonOrientable => Some(&mut view.strip_shape),
            VisualizationKind::NormalSections => Some(&mut view.section_shape),
            VisualizationKind::Geodesics => None,
        }
    }
}

/// A labelled number shown under the viewport. `key` is an i18n key.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Readout {
    pub key: &'static str,
    pub value: f32,
}

impl Readout {
    pub fn new(key: &'static str, value: f32) -> Self {
        Self { key, value }
    }
}

#[derive(Clone, Debug, Default)]
pub struct VisualOutput {
    pub scene: Scene,
    pub readouts: Vec<Readout>,
}

pub fn build(
    kind: VisualizationKind,
    time: f32,
    library: &MeshLibrary,
    view: &ViewState,
) -> VisualOutput {
    match kind {
        VisualizationKind::SurfaceFrame => surface_frame::build(time, library, view),
        VisualizationKind::NonOrientable => non_orientable::build(time, library, view),
        VisualizationKind::Geodesics => geodesics::build(time, library, view),
        VisualizationKind::NormalSections => normal_sections::build(time, library, view),
    }
}
