//! Key-based string lookup for the two supported locales.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    De,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::De];

    /// Name of the locale in its own language.
    pub fn native_name(self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::De => "Deutsch",
        }
    }

    fn column(self) -> usize {
        match self {
            Locale::En => 0,
            Locale::De => 1,
        }
    }
}

/// `(key, [en, de])`
const ENTRIES: &[(&str, [&str; 2])] = &[
    ("app.title", ["Submanifold Tour", "Untermannigfaltigkeiten"]),
    (
        "app.subtitle",
        [
            "An interactive tour of surfaces in space",
            "Ein interaktiver Rundgang durch Flächen im Raum",
        ],
    ),
    ("nav.chapters", ["CHAPTERS", "KAPITEL"]),
    ("nav.back", ["Back", "Zurück"]),
    ("ui.language", ["LANGUAGE", "SPRACHE"]),
    ("ui.animation", ["ANIMATION", "ANIMATION"]),
    ("ui.pause", ["Pause", "Pause"]),
    ("ui.resume", ["Resume", "Weiter"]),
    ("ui.reset", ["Reset", "Zurücksetzen"]),
    ("ui.speed", ["Speed", "Tempo"]),
    ("ui.shape", ["SHAPE", "FORM"]),
    ("ui.tangent_plane", ["Tangent plane", "Tangentialebene"]),
    ("ui.latitude", ["Latitude circle", "Breitenkreis"]),
    ("ui.geodesic_count", ["Geodesics", "Geodäten"]),
    ("ui.view", ["VIEW", "ANSICHT"]),
    ("ui.camera", ["Camera", "Kamera"]),
    ("ui.camera_orbital", ["Orbital", "Orbit"]),
    ("ui.camera_free", ["Free", "Frei"]),
    ("ui.grid", ["Grid", "Gitter"]),
    ("ui.vsync", ["VSync", "VSync"]),
    ("ui.readouts", ["READOUTS", "MESSWERTE"]),
    ("ui.loading", ["Building meshes…", "Netze werden erzeugt…"]),
    ("ui.mesh_error", ["Mesh error", "Netzfehler"]),
    ("notfound.title", ["Page not found", "Seite nicht gefunden"]),
    (
        "notfound.body",
        [
            "There is no chapter at this address.",
            "Unter dieser Adresse gibt es kein Kapitel.",
        ],
    ),
    ("notfound.home", ["Go to the introduction", "Zur Einführung"]),
    (
        "help.orbital",
        [
            "RMB+Drag - Orbit | Scroll - Zoom | C - Camera | Space - Pause",
            "RMT+Ziehen - Drehen | Mausrad - Zoom | C - Kamera | Leertaste - Pause",
        ],
    ),
    (
        "help.free",
        [
            "WASD - Move | RMB+Drag - Look | Scroll - Speed | C - Camera",
            "WASD - Bewegen | RMT+Ziehen - Umsehen | Mausrad - Tempo | C - Kamera",
        ],
    ),
    ("shape.sphere", ["Sphere", "Sphäre"]),
    ("shape.torus", ["Torus", "Torus"]),
    ("shape.cylinder", ["Cylinder", "Zylinder"]),
    ("shape.mobius", ["Möbius strip", "Möbiusband"]),
    ("shape.klein", ["Klein bottle", "Kleinsche Flasche"]),
    ("readout.u", ["u", "u"]),
    ("readout.v", ["v", "v"]),
    ("readout.k1", ["κ₁", "κ₁"]),
    ("readout.k2", ["κ₂", "κ₂"]),
    ("readout.kn", ["normal curvature κₙ", "Normalkrümmung κₙ"]),
    ("readout.gauss", ["Gaussian curvature K", "Gauß-Krümmung K"]),
    ("readout.mean", ["mean curvature H", "mittlere Krümmung H"]),
    ("readout.frame_error", ["frame error", "Rahmenfehler"]),
    ("readout.theta", ["direction θ", "Richtung θ"]),
    ("readout.lap", ["lap", "Runde"]),
    ("readout.orientation", ["normal vs. start", "Normale vs. Start"]),
    ("readout.euler", ["Euler characteristic χ", "Euler-Charakteristik χ"]),
    ("readout.arc_length", ["arc length s", "Bogenlänge s"]),
    ("readout.curvature", ["curvature κ", "Krümmung κ"]),
    ("readout.geodesic_curvature", ["geodesic curvature κ_g", "geodätische Krümmung κ_g"]),
    (
        "readout.latitude_curvature",
        ["κ_g of the latitude", "κ_g des Breitenkreises"],
    ),
    ("chapter.intro.title", ["Introduction", "Einführung"]),
    (
        "chapter.intro.p1",
        [
            "A submanifold is a smaller manifold sitting inside a larger space, the way a surface sits inside ordinary three-dimensional space.",
            "Eine Untermannigfaltigkeit ist eine kleinere Mannigfaltigkeit in einem größeren Raum, so wie eine Fläche im gewöhnlichen dreidimensionalen Raum liegt.",
        ],
    ),
    (
        "chapter.intro.p2",
        [
            "At every point of a surface we can attach a normal vector and two tangent vectors. Together they form a moving frame that follows the point.",
            "An jedem Punkt einer Fläche lassen sich ein Normalenvektor und zwei Tangentenvektoren anheften. Zusammen bilden sie ein mitbewegtes Bezugssystem.",
        ],
    ),
    (
        "chapter.intro.p3",
        [
            "The chapters that follow measure how a surface bends away from its tangent plane and what that bending tells us about its shape.",
            "Die folgenden Kapitel messen, wie sich eine Fläche von ihrer Tangentialebene wegkrümmt und was diese Krümmung über ihre Gestalt verrät.",
        ],
    ),
    ("chapter.submanifolds.title", ["Submanifolds", "Untermannigfaltigkeiten"]),
    (
        "chapter.submanifolds.p1",
        [
            "At a point p of a submanifold M the ambient space splits into the directions along M and the directions perpendicular to it.",
            "In einem Punkt p einer Untermannigfaltigkeit M zerfällt der umgebende Raum in Richtungen entlang M und Richtungen senkrecht dazu.",
        ],
    ),
    (
        "chapter.submanifolds.p2",
        [
            "For a surface in space the tangent space is a plane and the normal space is a line. Pick a shape below and watch the frame travel.",
            "Für eine Fläche im Raum ist der Tangentialraum eine Ebene und der Normalraum eine Gerade. Wähle unten eine Form und beobachte das wandernde Bezugssystem.",
        ],
    ),
    (
        "chapter.submanifolds.p3",
        [
            "The readouts show the principal curvatures at the moving point. On the sphere they agree everywhere; on the torus they change sign between the outer and inner rim.",
            "Die Messwerte zeigen die Hauptkrümmungen im bewegten Punkt. Auf der Sphäre stimmen sie überall überein; auf dem Torus wechseln sie zwischen Außen- und Innenrand das Vorzeichen.",
        ],
    ),
    ("chapter.sff.title", ["The second fundamental form", "Die zweite Fundamentalform"]),
    (
        "chapter.sff.p1",
        [
            "The second fundamental form h takes two tangent vectors and returns the normal part of the ambient derivative. It records how the surface curves inside space.",
            "Die zweite Fundamentalform h nimmt zwei Tangentenvektoren und liefert den Normalanteil der umgebenden Ableitung. Sie beschreibt, wie sich die Fläche im Raum krümmt.",
        ],
    ),
    (
        "chapter.sff.p2",
        [
            "Cutting a surface with a plane that contains the normal gives a normal section. Its curvature depends only on the direction, by Euler's formula.",
            "Schneidet man eine Fläche mit einer Ebene, die die Normale enthält, entsteht ein Normalschnitt. Seine Krümmung hängt nach der Eulerschen Formel nur von der Richtung ab.",
        ],
    ),
    (
        "chapter.sff.p3",
        [
            "The product and the average of the principal curvatures are the Gaussian and the mean curvature.",
            "Produkt und Mittelwert der Hauptkrümmungen sind die Gauß-Krümmung und die mittlere Krümmung.",
        ],
    ),
    ("chapter.geodesics.title", ["Geodesics", "Geodäten"]),
    (
        "chapter.geodesics.p1",
        [
            "A geodesic is a curve that never turns within the surface. On the sphere the geodesics are exactly the great circles.",
            "Eine Geodäte ist eine Kurve, die innerhalb der Fläche nie abbiegt. Auf der Sphäre sind die Geodäten genau die Großkreise.",
        ],
    ),
    (
        "chapter.geodesics.p2",
        [
            "A latitude circle away from the equator is not a geodesic. Its geodesic curvature measures how much it turns inside the sphere.",
            "Ein Breitenkreis abseits des Äquators ist keine Geodäte. Seine geodätische Krümmung misst, wie stark er innerhalb der Sphäre abbiegt.",
        ],
    ),
    ("chapter.contact.title", ["Contact number", "Kontaktzahl"]),
    (
        "chapter.contact.p1",
        [
            "A submanifold is isotropic when the normal curvature has the same length in every tangent direction at a point.",
            "Eine Untermannigfaltigkeit heißt isotrop, wenn die Normalkrümmung in einem Punkt für jede Tangentenrichtung dieselbe Länge hat.",
        ],
    ),
    (
        "chapter.contact.p2",
        [
            "The contact number counts to what order every normal section touches its osculating circle. Spheres have the highest possible contact.",
            "Die Kontaktzahl gibt an, bis zu welcher Ordnung jeder Normalschnitt seinen Schmiegkreis berührt. Sphären besitzen den höchstmöglichen Kontakt.",
        ],
    ),
    (
        "chapter.contact.p3",
        [
            "Compare the sphere with the cylinder: on the sphere the normal curvature stays fixed as the direction turns, on the cylinder it sweeps between zero and one over the radius.",
            "Vergleiche Sphäre und Zylinder: Auf der Sphäre bleibt die Normalkrümmung beim Drehen der Richtung gleich, auf dem Zylinder wandert sie zwischen null und dem Kehrwert des Radius.",
        ],
    ),
    ("chapter.nonorientable.title", ["Non-orientable surfaces", "Nicht orientierbare Flächen"]),
    (
        "chapter.nonorientable.p1",
        [
            "Carry a normal vector once around the centre line of a Möbius strip and it comes back pointing the other way. No continuous choice of normal exists.",
            "Trägt man einen Normalenvektor einmal um die Mittellinie eines Möbiusbandes, kommt er in Gegenrichtung zurück. Eine stetige Wahl der Normalen gibt es nicht.",
        ],
    ),
    (
        "chapter.nonorientable.p2",
        [
            "The Klein bottle is a closed surface with the same defect. In three dimensions it can only be drawn with self-intersections.",
            "Die Kleinsche Flasche ist eine geschlossene Fläche mit demselben Defekt. Im dreidimensionalen Raum lässt sie sich nur mit Selbstdurchdringungen darstellen.",
        ],
    ),
];

static TABLE: LazyLock<HashMap<&'static str, [&'static str; 2]>> =
    LazyLock::new(|| ENTRIES.iter().copied().collect());

/// Translates `key`. Unknown keys come back unchanged.
pub fn tr<'a>(locale: Locale, key: &'a str) -> &'a str {
    match TABLE.get(key) {
        Some(row) => row[locale.column()],
        None => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Block, Route, chapter};
    use crate::geometry::SurfaceKind;
    use crate::scene::MeshLibrary;
    use crate::visual::{self, ViewState, VisualizationKind};
    use std::collections::HashSet;

    #[test]
    fn every_key_is_translated_once() {
        let mut seen = HashSet::new();
        for (key, row) in ENTRIES {
            assert!(seen.insert(*key), "duplicate key {key}");
            for locale in Locale::ALL {
                assert!(!row[locale.column()].trim().is_empty(), "{key} empty in {locale:?}");
            }
        }
    }

    #[test]
    fn unknown_keys_fall_back() {
        assert_eq!(tr(Locale::De, "no.such.key"), "no.such.key");
        assert_eq!(tr(Locale::De, "nav.back"), "Zurück");
        assert_eq!(tr(Locale::En, "nav.back"), "Back");
    }

    fn readout_keys(
        kind: VisualizationKind,
        library: &MeshLibrary,
        view: &ViewState,
    ) -> Vec<&'static str> {
        visual::build(kind, 1.0, library, view)
            .readouts
            .iter()
            .map(|r| r.key)
            .collect()
    }

    #[test]
    fn content_keys_are_all_present() {
        let mut needed: Vec<&str> = SurfaceKind::ALL.iter().map(|k| k.label_key()).collect();
        for route in Route::ALL {
            let chapter = chapter(route);
            needed.push(chapter.title_key);
            needed.extend(chapter.blocks.iter().filter_map(|b| match b {
                Block::Paragraph(key) => Some(*key),
                _ => None,
            }));
        }

        let library = MeshLibrary::default();
        for kind in VisualizationKind::ALL {
            let mut view = ViewState {
                show_latitude: true,
                ..ViewState::default()
            };
            for &shape in kind.shape_choices() {
                if let Some(slot) = kind.selected_shape(&mut view) {
                    *slot = shape;
                }
                needed.extend(readout_keys(kind, &library, &view));
            }
            needed.extend(readout_keys(kind, &library, &view));
        }

        for key in needed {
            assert!(TABLE.contains_key(key), "missing translation for {key}");
        }
    }

    #[test]
    fn locale_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Locale::De).unwrap(), "\"de\"");
        assert_eq!(serde_json::from_str::<Locale>("\"en\"").unwrap(), Locale::En);
    }
}
