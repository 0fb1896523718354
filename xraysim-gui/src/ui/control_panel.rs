//! Left control panel: exposure sliders, noise and display options.

use eframe::egui;

use crate::app::{XraySimApp, CURRENT_RANGE, IMAGE_SIZES, VOLTAGE_RANGE};
use crate::ui::theme;
use crate::viewer::Colormap;

impl XraySimApp {
    /// Render the left control panel.
    pub(crate) fn render_side_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("ctrl")
            .default_width(260.0)
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.label(theme::group_heading("Exposure"));
                self.render_tube_controls(ui);

                ui.add_space(8.0);
                egui::CollapsingHeader::new(theme::group_heading("Advanced"))
                    .default_open(false)
                    .show(ui, |ui| self.render_advanced_controls(ui));

                ui.add_space(8.0);
                ui.label(theme::group_heading("Display"));
                self.render_display_controls(ui, ctx);

                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    if ui.add(theme::expose_button("Generate")).clicked() {
                        self.dirty = true;
                    }
                    let save = ui.add_enabled(self.frame.is_some(), egui::Button::new("Save image…"));
                    if save.clicked() {
                        self.save_frame();
                    }
                });

                ui.add_space(8.0);
                ui.label(theme::status(&self.status_text, self.status_is_error));
            });
    }

    fn render_tube_controls(&mut self, ui: &mut egui::Ui) {
        ui.label(theme::field_label("Tube current (mA)"));
        if ui
            .add(egui::Slider::new(&mut self.current_ma, CURRENT_RANGE).suffix(" mA"))
            .changed()
        {
            self.dirty = true;
        }

        ui.label(theme::field_label("Tube voltage (kVp)"));
        if ui
            .add(egui::Slider::new(&mut self.voltage_kvp, VOLTAGE_RANGE).suffix(" kVp"))
            .changed()
        {
            self.dirty = true;
        }
    }

    fn render_advanced_controls(&mut self, ui: &mut egui::Ui) {
        let mut changed = false;

        egui::Grid::new("advanced_grid")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label(theme::field_label("Exposure"));
                changed |= ui
                    .add(
                        egui::DragValue::new(&mut self.exposure_ms)
                            .range(0.1..=1000.0)
                            .speed(0.5)
                            .suffix(" ms"),
                    )
                    .changed();
                ui.end_row();

                ui.label(theme::field_label("Dose exponent"));
                changed |= ui
                    .add(egui::Slider::new(&mut self.dose_exponent, 1.0..=3.0).step_by(0.05))
                    .changed();
                ui.end_row();

                ui.label(theme::field_label("Photon scale"));
                changed |= ui
                    .add(egui::Slider::new(&mut self.photon_scale, 1.0..=1.0e6).logarithmic(true))
                    .changed();
                ui.end_row();

                ui.label(theme::field_label("Beam width"));
                changed |= ui
                    .add(egui::Slider::new(&mut self.beam_std, 0.05..=2.0).step_by(0.01))
                    .changed();
                ui.end_row();

                ui.label(theme::field_label("Image size"));
                let before = self.image_size;
                egui::ComboBox::from_id_salt("image_size")
                    .selected_text(format!("{0} x {0}", self.image_size))
                    .show_ui(ui, |ui| {
                        for size in IMAGE_SIZES {
                            ui.selectable_value(&mut self.image_size, size, format!("{size} x {size}"));
                        }
                    });
                changed |= before != self.image_size;
                ui.end_row();
            });

        if changed {
            self.dirty = true;
        }
    }

    fn render_display_controls(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            if ui.checkbox(&mut self.fixed_seed, "Fixed seed").changed() {
                self.dirty = true;
            }
            if ui
                .add_enabled(
                    self.fixed_seed,
                    egui::DragValue::new(&mut self.seed).speed(1.0),
                )
                .changed()
            {
                self.dirty = true;
            }
        });

        let before = self.colormap;
        egui::ComboBox::from_label("Colormap")
            .selected_text(self.colormap.to_string())
            .show_ui(ui, |ui| {
                for cmap in Colormap::ALL {
                    ui.selectable_value(&mut self.colormap, cmap, cmap.to_string());
                }
            });
        if before != self.colormap {
            self.refresh_texture(ctx);
        }
    }
}
