use egui::{Color32, FontFamily, FontId, Rounding, Stroke, TextStyle, Visuals};

pub const INK: Color32 = Color32::from_rgb(9, 11, 18);
pub const PAPER: Color32 = Color32::from_rgb(16, 19, 29);
pub const WIDGET: Color32 = Color32::from_rgb(26, 30, 44);
pub const WIDGET_HOVER: Color32 = Color32::from_rgb(36, 42, 61);
pub const WIDGET_ACTIVE: Color32 = Color32::from_rgb(46, 54, 78);
pub const FORMULA_BG: Color32 = Color32::from_rgb(12, 15, 24);

pub const TEXT: Color32 = Color32::from_rgb(196, 200, 212);
pub const TEXT_DIM: Color32 = Color32::from_rgb(122, 128, 146);
pub const TEXT_STRONG: Color32 = Color32::from_rgb(236, 238, 244);

pub const TEAL: Color32 = Color32::from_rgb(64, 196, 178);
pub const GOLD: Color32 = Color32::from_rgb(230, 184, 76);
pub const CORAL: Color32 = Color32::from_rgb(226, 98, 86);
pub const SKY: Color32 = Color32::from_rgb(108, 160, 236);

pub const EDGE: Color32 = Color32::from_rgb(44, 50, 70);
pub const EDGE_FOCUS: Color32 = TEAL;

pub const ERROR_BG: Color32 = Color32::from_rgb(46, 18, 20);

pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    let mut visuals = Visuals::dark();
    visuals.override_text_color = Some(TEXT);
    visuals.panel_fill = PAPER;
    visuals.window_fill = PAPER;
    visuals.window_stroke = Stroke::new(1.0, EDGE);
    visuals.window_rounding = Rounding::same(8.0);
    visuals.menu_rounding = Rounding::same(6.0);
    visuals.faint_bg_color = WIDGET;
    visuals.extreme_bg_color = INK;
    visuals.code_bg_color = FORMULA_BG;
    visuals.hyperlink_color = SKY;
    visuals.warn_fg_color = GOLD;
    visuals.error_fg_color = CORAL;
    visuals.selection.bg_fill = TEAL.gamma_multiply(0.35);
    visuals.selection.stroke = Stroke::new(1.0, TEAL);
    visuals.slider_trailing_fill = true;
    visuals.handle_shape = egui::style::HandleShape::Circle;

    let widgets = &mut visuals.widgets;
    for (state, fill, stroke) in [
        (&mut widgets.noninteractive, PAPER, Stroke::new(1.0, EDGE)),
        (&mut widgets.inactive, WIDGET, Stroke::new(1.0, EDGE)),
        (&mut widgets.hovered, WIDGET_HOVER, Stroke::new(1.0, EDGE_FOCUS)),
        (&mut widgets.active, WIDGET_ACTIVE, Stroke::new(1.5, TEAL)),
        (&mut widgets.open, WIDGET_ACTIVE, Stroke::new(1.0, EDGE_FOCUS)),
    ] {
        state.bg_fill = fill;
        state.weak_bg_fill = fill;
        state.bg_stroke = stroke;
        state.rounding = Rounding::same(5.0);
    }
    widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT_DIM);
    widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT);
    widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_STRONG);
    widgets.active.fg_stroke = Stroke::new(1.0, TEXT_STRONG);

    style.visuals = visuals;

    style.spacing.item_spacing = egui::vec2(8.0, 7.0);
    style.spacing.button_padding = egui::vec2(10.0, 4.0);
    style.spacing.slider_width = 180.0;

    style.text_styles = [
        (TextStyle::Small, FontId::new(11.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(15.0, FontFamily::Proportional)),
        (TextStyle::Button, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(22.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(14.0, FontFamily::Monospace)),
    ]
    .into();

    ctx.set_style(style);
}
