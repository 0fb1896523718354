//! Main view (central panel) rendering.

use eframe::egui;

use crate::app::XraySimApp;
use crate::util::usize_to_f32;

impl XraySimApp {
    /// Render the central panel with the current frame, scaled to fit.
    pub(crate) fn render_central_panel(&self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(tex) = &self.texture else {
                ui.centered_and_justified(|ui| ui.label("No Data"));
                return;
            };

            let available = ui.available_size();
            let side = available.x.min(available.y).max(1.0);
            ui.vertical_centered(|ui| {
                let sized = egui::load::SizedTexture::new(tex.id(), [side, side]);
                let response =
                    ui.add(egui::Image::new(sized).fit_to_exact_size(egui::vec2(side, side)));
                if let (Some(pos), Some(frame)) = (response.hover_pos(), &self.frame) {
                    let size = frame.size();
                    let scale = usize_to_f32(size) / response.rect.width();
                    let local = (pos - response.rect.min) * scale;
                    if local.x >= 0.0 && local.y >= 0.0 {
                        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                        let (col, row) = (local.x as usize, local.y as usize);
                        if let Some(value) = frame.get(row, col) {
                            response.on_hover_text(format!("({col}, {row}) = {value}"));
                        }
                    }
                }
            });
        });
    }
}
