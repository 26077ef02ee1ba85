use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::content::Route;
use crate::error::{Error, Result};
use crate::geometry::SurfaceKind;
use crate::i18n::Locale;

const MIN_SEGMENTS: usize = 3;

/// Application settings, read from a JSON file and overridden from the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: Locale,
    /// Chapter path shown at startup.
    pub start_route: String,
    pub window: WindowConfig,
    pub vsync: bool,
    pub animation_speed: f32,
    pub mesh: MeshConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

/// `[u_segments, v_segments]` per surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    pub sphere: [usize; 2],
    pub torus: [usize; 2],
    pub cylinder: [usize; 2],
    pub mobius: [usize; 2],
    pub klein: [usize; 2],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::En,
            start_route: Route::Introduction.path().to_string(),
            window: WindowConfig::default(),
            vsync: true,
            animation_speed: 1.0,
            mesh: MeshConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 900,
        }
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            sphere: [32, 64],
            torus: [64, 32],
            cylinder: [64, 8],
            mobius: [96, 8],
            klein: [96, 48],
        }
    }
}

impl MeshConfig {
    pub fn resolution(&self, kind: SurfaceKind) -> [usize; 2] {
        match kind {
            SurfaceKind::Sphere => self.sphere,
            SurfaceKind::Torus => self.torus,
            SurfaceKind::Cylinder => self.cylinder,
            SurfaceKind::MobiusStrip => self.mobius,
            SurfaceKind::KleinBottle => self.klein,
        }
    }
}

impl Config {
    /// Loads `path`, or the defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        tracing::info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        for kind in SurfaceKind::ALL {
            let [u, v] = self.mesh.resolution(kind);
            if u < MIN_SEGMENTS || v < MIN_SEGMENTS {
                return Err(Error::Config(format!(
                    "mesh resolution for {kind:?} is {u}x{v}, both must be at least {MIN_SEGMENTS}"
                )));
            }
        }
        if !self.animation_speed.is_finite() || self.animation_speed < 0.0 {
            return Err(Error::Config(format!(
                "animation_speed must be finite and non-negative, got {}",
                self.animation_speed
            )));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(Error::Config("window size must be non-zero".into()));
        }
        Ok(())
    }

    /// Command-line flags win over file values.
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(route) = &cli.route {
            self.start_route = route.clone();
        }
        if let Some(locale) = cli.locale {
            self.locale = locale;
        }
        if let Some(speed) = cli.speed {
            self.animation_speed = speed;
        }
    }

    pub fn start_route(&self) -> Result<Route> {
        self.start_route.parse()
    }
}
