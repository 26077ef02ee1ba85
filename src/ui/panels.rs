use egui::{Context, RichText, ScrollArea, Ui};

use crate::content::{Block, Location, Route, chapter, typeset};
use crate::i18n::{Locale, tr};
use crate::renderer::CameraMode;
use crate::ui::state::UiState;
use crate::ui::theme::*;
use crate::visual::{Readout, VisualizationKind};

#[derive(Debug, Default, PartialEq)]
pub struct UiActions {
    pub toggle_pause: bool,
    pub reset_clock: bool,
    pub reset_camera: bool,
    pub navigate: Option<String>,
    pub back: bool,
}

/// Chapter page on the left, controls and readouts on the right.
pub fn draw_panels(
    ctx: &Context,
    state: &mut UiState,
    readouts: &[Readout],
    mesh_error: &Option<String>,
    loading: bool,
    is_paused: bool,
) -> UiActions {
    let mut actions = UiActions::default();
    draw_chapter_panel(ctx, state, loading, &mut actions);
    draw_control_panel(ctx, state, readouts, mesh_error, is_paused, &mut actions);
    actions
}

fn draw_chapter_panel(ctx: &Context, state: &mut UiState, loading: bool, actions: &mut UiActions) {
    let locale = state.locale;

    egui::SidePanel::left("chapter_panel")
        .min_width(340.0)
        .max_width(560.0)
        .default_width(440.0)
        .frame(egui::Frame::default().fill(PAPER).inner_margin(20.0))
        .show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                ui.heading(RichText::new(tr(locale, "app.title")).strong().color(TEXT_STRONG));
                ui.add_space(2.0);
                ui.label(RichText::new(tr(locale, "app.subtitle")).color(TEXT_DIM).size(12.0));
                ui.add_space(14.0);

                chapter_list(ui, state, actions);
                ui.add_space(12.0);
                ui.separator();
                ui.add_space(12.0);

                match state.router.current().clone() {
                    Location::Chapter(route) => chapter_page(ui, state, route, loading),
                    Location::NotFound(path) => not_found_page(ui, locale, &path, actions),
                }
            });
        });
}

fn chapter_list(ui: &mut Ui, state: &UiState, actions: &mut UiActions) {
    let locale = state.locale;
    ui.horizontal(|ui| {
        section_header(ui, tr(locale, "nav.chapters"));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let back = egui::Button::new(format!("← {}", tr(locale, "nav.back")));
            if ui.add_enabled(state.router.can_go_back(), back).clicked() {
                actions.back = true;
            }
        });
    });

    let current = state.router.current().route();
    for (i, route) in Route::ALL.into_iter().enumerate() {
        let title = format!("{}. {}", i + 1, tr(locale, chapter(route).title_key));
        if ui.selectable_label(current == Some(route), title).clicked() && current != Some(route) {
            actions.navigate = Some(route.path().to_string());
        }
    }
}

fn chapter_page(ui: &mut Ui, state: &mut UiState, route: Route, loading: bool) {
    let locale = state.locale;
    let page = chapter(route);

    ui.label(RichText::new(tr(locale, page.title_key)).size(20.0).strong().color(TEXT_STRONG));
    ui.add_space(10.0);

    for block in page.blocks {
        match *block {
            Block::Paragraph(key) => {
                ui.label(tr(locale, key));
            }
            Block::Formula(tex) => formula(ui, tex),
            Block::Visualization(kind) => {
                if loading {
                    ui.label(RichText::new(tr(locale, "ui.loading")).color(GOLD).italics());
                }
                visualization_controls(ui, state, kind);
            }
        }
        ui.add_space(8.0);
    }
}

fn formula(ui: &mut Ui, tex: &str) {
    egui::Frame::default()
        .fill(FORMULA_BG)
        .stroke(egui::Stroke::new(1.0, EDGE))
        .rounding(6.0)
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(typeset(tex)).size(17.0).color(TEXT_STRONG));
            });
        });
}

fn visualization_controls(ui: &mut Ui, state: &mut UiState, kind: VisualizationKind) {
    let locale = state.locale;
    egui::Frame::default()
        .fill(WIDGET)
        .stroke(egui::Stroke::new(1.0, TEAL.gamma_multiply(0.5)))
        .rounding(6.0)
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());

            let choices = kind.shape_choices();
            if let Some(selected) = kind.selected_shape(&mut state.view) {
                ui.horizontal_wrapped(|ui| {
                    ui.label(RichText::new(tr(locale, "ui.shape")).color(TEXT_DIM));
                    for &shape in choices {
                        if ui.selectable_label(*selected == shape, tr(locale, shape.label_key())).clicked() {
                            *selected = shape;
                        }
                    }
                });
            }

            let view = &mut state.view;
            match kind {
                VisualizationKind::SurfaceFrame => {
                    ui.checkbox(&mut view.show_tangent_plane, tr(locale, "ui.tangent_plane"));
                }
                VisualizationKind::Geodesics => {
                    ui.horizontal(|ui| {
                        ui.label(tr(locale, "ui.geodesic_count"));
                        ui.add(egui::Slider::new(&mut view.geodesic_count, 1..=12));
                    });
                    ui.checkbox(&mut view.show_latitude, tr(locale, "ui.latitude"));
                }
                VisualizationKind::NonOrientable | VisualizationKind::NormalSections => {}
            }
        });
}

fn not_found_page(ui: &mut Ui, locale: Locale, path: &str, actions: &mut UiActions) {
    ui.label(RichText::new(tr(locale, "notfound.title")).size(20.0).strong().color(CORAL));
    ui.add_space(6.0);
    ui.label(tr(locale, "notfound.body"));
    ui.label(RichText::new(path).monospace().color(TEXT_DIM));
    ui.add_space(12.0);
    if ui
        .add(egui::Button::new(RichText::new(tr(locale, "notfound.home")).color(INK))
            .fill(TEAL)
            .min_size(egui::vec2(120.0, 30.0)))
        .clicked()
    {
        actions.navigate = Some(Route::Introduction.path().to_string());
    }
}

fn draw_control_panel(
    ctx: &Context,
    state: &mut UiState,
    readouts: &[Readout],
    mesh_error: &Option<String>,
    is_paused: bool,
    actions: &mut UiActions,
) {
    let locale = state.locale;

    egui::SidePanel::right("control_panel")
        .min_width(260.0)
        .max_width(380.0)
        .default_width(300.0)
        .frame(egui::Frame::default().fill(PAPER).inner_margin(16.0))
        .show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                section_header(ui, tr(locale, "ui.language"));
                ui.horizontal(|ui| {
                    for option in Locale::ALL {
                        if ui.selectable_label(state.locale == option, option.native_name()).clicked() {
                            state.locale = option;
                        }
                    }
                });
                ui.add_space(14.0);

                section_header(ui, tr(locale, "ui.animation"));
                ui.horizontal(|ui| {
                    let (text, color) = if is_paused {
                        (tr(locale, "ui.resume"), TEAL)
                    } else {
                        (tr(locale, "ui.pause"), GOLD)
                    };
                    if ui
                        .add(egui::Button::new(RichText::new(text).color(INK))
                            .fill(color)
                            .min_size(egui::vec2(90.0, 30.0)))
                        .clicked()
                    {
                        actions.toggle_pause = true;
                    }
                    if ui.button(tr(locale, "ui.reset")).clicked() {
                        actions.reset_clock = true;
                    }
                });
                ui.horizontal(|ui| {
                    ui.label(tr(locale, "ui.speed"));
                    ui.add(egui::Slider::new(&mut state.animation_speed, 0.0..=4.0).suffix("×"));
                });
                ui.add_space(14.0);

                section_header(ui, tr(locale, "ui.view"));
                camera_controls(ui, locale, &mut state.camera_mode);
                ui.horizontal(|ui| {
                    if ui.button(tr(locale, "ui.reset")).clicked() {
                        actions.reset_camera = true;
                    }
                    ui.checkbox(&mut state.show_grid, tr(locale, "ui.grid"));
                    ui.checkbox(&mut state.vsync_enabled, tr(locale, "ui.vsync"));
                });
                ui.add_space(14.0);

                if let Some(err) = mesh_error {
                    error_frame(ui, tr(locale, "ui.mesh_error"), err);
                    ui.add_space(14.0);
                }

                if !readouts.is_empty() {
                    ui.separator();
                    ui.add_space(10.0);
                    ui.horizontal(|ui| {
                        section_header(ui, tr(locale, "ui.readouts"));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.checkbox(&mut state.show_readouts, "");
                        });
                    });
                    if state.show_readouts {
                        readout_grid(ui, locale, readouts);
                    }
                }
            });
        });
}

fn section_header(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text.to_uppercase()).color(TEXT_DIM).size(11.0).strong());
    ui.add_space(4.0);
}

fn camera_controls(ui: &mut Ui, locale: Locale, mode: &mut CameraMode) {
    ui.horizontal(|ui| {
        ui.label(tr(locale, "ui.camera"));
        if ui.selectable_label(*mode == CameraMode::Orbital, tr(locale, "ui.camera_orbital")).clicked() {
            *mode = CameraMode::Orbital;
        }
        if ui.selectable_label(*mode == CameraMode::Free, tr(locale, "ui.camera_free")).clicked() {
            *mode = CameraMode::Free;
        }
    });
}

fn error_frame(ui: &mut Ui, title: &str, message: &str) {
    egui::Frame::default()
        .fill(ERROR_BG)
        .stroke(egui::Stroke::new(1.0, CORAL))
        .rounding(4.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.label(RichText::new(title).color(CORAL).strong().size(12.0));
            ui.label(RichText::new(message).color(CORAL).size(11.0));
        });
}

fn readout_grid(ui: &mut Ui, locale: Locale, readouts: &[Readout]) {
    egui::Frame::default()
        .fill(WIDGET)
        .stroke(egui::Stroke::new(1.0, EDGE))
        .rounding(6.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.style_mut().override_font_id = Some(egui::FontId::new(12.0, egui::FontFamily::Monospace));
            egui::Grid::new("readouts").num_columns(2).spacing([20.0, 4.0]).show(ui, |ui| {
                for readout in readouts {
                    ui.label(RichText::new(tr(locale, readout.key)).color(TEXT_DIM));
                    ui.label(RichText::new(format_value(readout.value)).color(SKY));
                    ui.end_row();
                }
            });
        });
}

/// Whole numbers (laps, signs, Euler characteristics) print without decimals.
fn format_value(value: f32) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e6 {
        format!("{value:.0}")
    } else {
        format!("{value:.3}")
    }
}

pub fn draw_help_overlay(ctx: &Context, locale: Locale, mode: CameraMode) {
    let key = match mode {
        CameraMode::Orbital => "help.orbital",
        CameraMode::Free => "help.free",
    };
    egui::Area::new(egui::Id::new("help_overlay"))
        .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -12.0))
        .show(ctx, |ui| {
            egui::Frame::default()
                .fill(INK.gamma_multiply(0.8))
                .rounding(6.0)
                .inner_margin(10.0)
                .show(ui, |ui| {
                    ui.style_mut().override_font_id = Some(egui::FontId::new(11.0, egui::FontFamily::Monospace));
                    ui.label(RichText::new(tr(locale, key)).color(TEXT_DIM));
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_readouts_drop_decimals() {
        assert_eq!(format_value(2.0), "2");
        assert_eq!(format_value(-1.0), "-1");
        assert_eq!(format_value(0.5), "0.500");
        assert_eq!(format_value(f32::NAN), "NaN");
    }

    fn run_panels(state: &mut UiState) -> UiActions {
        let ctx = Context::default();
        apply_theme(&ctx);
        let mut actions = UiActions::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            actions = draw_panels(ctx, state, &[Readout::new("readout.k1", 1.0)], &None, true, false);
            draw_help_overlay(ctx, state.locale, state.camera_mode);
        });
        actions
    }

    #[test]
    fn every_page_draws_without_input() {
        for route in Route::ALL {
            for locale in Locale::ALL {
                let mut state = UiState::default();
                state.locale = locale;
                state.router.navigate(route.path());
                assert_eq!(run_panels(&mut state), UiActions::default());
            }
        }
        let mut state = UiState::default();
        state.router.navigate("/no/such/page");
        assert_eq!(run_panels(&mut state), UiActions::default());
    }
}
