use crate::config::Config;
use crate::content::{Location, Router};
use crate::i18n::Locale;
use crate::renderer::CameraMode;
use crate::visual::ViewState;

pub struct UiState {
    pub router: Router,
    pub locale: Locale,
    pub view: ViewState,

    pub animation_speed: f32,

    pub camera_mode: CameraMode,
    pub show_grid: bool,
    pub vsync_enabled: bool,
    pub show_readouts: bool,
}

impl UiState {
    /// Unknown start paths land on the not-found page.
    pub fn from_config(config: &Config) -> Self {
        let start = match config.start_route() {
            Ok(route) => Location::Chapter(route),
            Err(e) => {
                tracing::warn!(error = %e, "showing not-found page at startup");
                Location::NotFound(config.start_route.clone())
            }
        };
        Self {
            router: Router::new(start),
            locale: config.locale,
            view: ViewState::default(),
            animation_speed: config.animation_speed,
            camera_mode: CameraMode::Orbital,
            show_grid: true,
            vsync_enabled: config.vsync,
            show_readouts: true,
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Route;

    #[test]
    fn takes_settings_from_config() {
        let config = Config {
            locale: Locale::De,
            start_route: "/geodesics".into(),
            vsync: false,
            animation_speed: 0.5,
            ..Config::default()
        };
        let state = UiState::from_config(&config);
        assert_eq!(state.locale, Locale::De);
        assert_eq!(state.router.current(), &Location::Chapter(Route::Geodesics));
        assert!(!state.vsync_enabled);
        assert_eq!(state.animation_speed, 0.5);
        assert!(!state.router.can_go_back());
    }

    #[test]
    fn bad_start_route_shows_not_found() {
        let config = Config {
            start_route: "/missing".into(),
            ..Config::default()
        };
        let state = UiState::from_config(&config);
        assert_eq!(state.router.current(), &Location::NotFound("/missing".into()));
    }
}
