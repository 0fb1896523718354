//! Lightbox theme: blue-grey panels around the film, a cyan beam accent.

use eframe::egui::{self, Color32, FontFamily, FontId, Rounding, Stroke, TextStyle, Visuals};

/// Panel and text colors, tinted like a film viewer.
pub mod lightbox {
    use eframe::egui::Color32;

    pub const BACKDROP: Color32 = Color32::from_rgb(0x0e, 0x13, 0x1a);
    pub const PANEL: Color32 = Color32::from_rgb(0x16, 0x1d, 0x27);
    pub const FIELD: Color32 = Color32::from_rgb(0x21, 0x2b, 0x38);
    pub const EDGE: Color32 = Color32::from_rgb(0x2f, 0x3d, 0x4f);
    pub const TEXT: Color32 = Color32::from_rgb(0xd6, 0xe2, 0xee);
    pub const TEXT_DIM: Color32 = Color32::from_rgb(0x7a, 0x8c, 0xa0);
}

/// Highlight colors.
pub mod beam {
    use eframe::egui::Color32;

    /// Hover, selection and active widgets.
    pub const CYAN: Color32 = Color32::from_rgb(0x38, 0xc6, 0xe8);
    /// The expose action.
    pub const AMBER: Color32 = Color32::from_rgb(0xf2, 0xa5, 0x2b);
    /// Failures.
    pub const FAULT: Color32 = Color32::from_rgb(0xe5, 0x5a, 0x4f);
}

const CORNER: f32 = 2.0;

/// Install the lightbox visuals and a compact proportional type scale.
pub fn configure_style(ctx: &egui::Context) {
    ctx.set_visuals(lightbox_visuals());

    let mut style = (*ctx.style()).clone();
    style.text_styles = [
        (TextStyle::Small, 10.5, FontFamily::Proportional),
        (TextStyle::Body, 13.0, FontFamily::Proportional),
        (TextStyle::Button, 13.0, FontFamily::Proportional),
        (TextStyle::Heading, 15.0, FontFamily::Proportional),
        (TextStyle::Monospace, 12.0, FontFamily::Monospace),
    ]
    .into_iter()
    .map(|(text_style, size, family)| (text_style, FontId::new(size, family)))
    .collect();
    style.spacing.item_spacing = egui::vec2(6.0, 5.0);
    style.spacing.button_padding = egui::vec2(12.0, 5.0);
    style.spacing.slider_width = 170.0;
    ctx.set_style(style);
}

fn lightbox_visuals() -> Visuals {
    let mut visuals = Visuals::dark();
    visuals.panel_fill = lightbox::PANEL;
    visuals.window_fill = lightbox::PANEL;
    visuals.faint_bg_color = lightbox::BACKDROP;
    visuals.extreme_bg_color = lightbox::BACKDROP;
    visuals.override_text_color = Some(lightbox::TEXT);

    let widgets = &mut visuals.widgets;
    widgets.noninteractive.bg_stroke = Stroke::new(1.0, lightbox::EDGE);
    for (state, fill, edge) in [
        (&mut widgets.inactive, lightbox::FIELD, lightbox::EDGE),
        (&mut widgets.hovered, lightbox::EDGE, beam::CYAN),
        (&mut widgets.active, beam::CYAN.gamma_multiply(0.6), beam::CYAN),
    ] {
        state.bg_fill = fill;
        state.weak_bg_fill = fill;
        state.bg_stroke = Stroke::new(1.0, edge);
        state.rounding = Rounding::same(CORNER);
    }

    visuals.selection.bg_fill = beam::CYAN.gamma_multiply(0.25);
    visuals.selection.stroke = Stroke::new(1.0, beam::CYAN);
    visuals
}

/// The amber button that fires a new exposure.
pub fn expose_button(text: &str) -> egui::Button<'_> {
    egui::Button::new(egui::RichText::new(text).strong().color(lightbox::BACKDROP))
        .fill(beam::AMBER)
        .rounding(Rounding::same(CORNER))
}

/// Dimmed caption next to a control.
pub fn field_label(text: &str) -> egui::RichText {
    egui::RichText::new(text).small().color(lightbox::TEXT_DIM)
}

/// Heading over a group of controls.
pub fn group_heading(text: &str) -> egui::RichText {
    egui::RichText::new(text).heading().color(beam::CYAN)
}

/// Status line, in the fault color when `is_error`.
pub fn status(text: &str, is_error: bool) -> egui::RichText {
    let color = if is_error {
        beam::FAULT
    } else {
        lightbox::TEXT_DIM
    };
    egui::RichText::new(text).small().color(color)
}
