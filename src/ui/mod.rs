//! egui rendering of the projector panel.

use egui::{Color32, ComboBox, DragValue, RichText, Slider, Ui};

use crate::calculator::{CalcField, CalcMode, ZOOM_MAX_PERCENT, ZOOM_MIN_PERCENT};
use crate::config::SHIFT_LIMIT_PERCENT;
use crate::panel::{ProjectorPanel, FORMULAS, FORMULA_LEGEND};
use crate::selection::SelectionChange;

const ACCENT: Color32 = Color32::from_rgb(6, 182, 212);
const MUTED: Color32 = Color32::from_gray(150);

/// Transient UI state that is not part of the saved settings.
pub struct UiState {
    /// Text buffer for the light colour field.
    pub color_text: String,
    /// Last validation message.
    pub message: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            color_text: "#ffffff".to_string(),
            message: None,
        }
    }
}

impl UiState {
    pub fn for_panel(panel: &ProjectorPanel) -> Self {
        Self {
            color_text: panel.settings().light.color.clone(),
            message: None,
        }
    }
}

/// Draw every section of the panel.
pub fn show(ui: &mut Ui, panel: &mut ProjectorPanel, state: &mut UiState) {
    projector_section(ui, panel, state);
    ui.add_space(8.0);

    if panel.settings().sections.specs && panel.selection().projector().is_some() {
        specs_section(ui, panel);
        ui.add_space(8.0);
    }

    image_section(ui, panel);
    ui.add_space(8.0);

    light_section(ui, panel, state);
    ui.add_space(8.0);

    if panel.settings().sections.advanced && panel.selection().is_complete() {
        adjustments_section(ui, panel);
        ui.add_space(8.0);
    }

    if panel.settings().sections.calculations && panel.projection_size().is_some() {
        calculations_section(ui, panel, state);
        ui.add_space(8.0);
    }

    display_section(ui, panel);
    ui.add_space(8.0);

    if panel.settings().sections.formulas && panel.selection().is_complete() {
        formulas_section(ui);
        ui.add_space(8.0);
    }

    sections_toggle(ui, panel);

    if let Some(message) = &state.message {
        ui.add_space(8.0);
        ui.label(RichText::new(message).color(Color32::from_rgb(220, 100, 100)));
    }
}

fn section_header(ui: &mut Ui, title: &str) {
    ui.label(RichText::new(title).strong());
    ui.separator();
}

fn projector_section(ui: &mut Ui, panel: &mut ProjectorPanel, state: &mut UiState) {
    section_header(ui, "Projector");

    let mut name = panel.settings().name.clone();
    ui.horizontal(|ui| {
        ui.label("Name:");
        if ui.text_edit_singleline(&mut name).changed() {
            panel.set_name(&name);
        }
    });

    let brands = panel.catalog().brands();
    let selection = *panel.selection();
    let mut change: Option<SelectionChange<'static>> = None;

    ui.horizontal(|ui| {
        ui.label("Brand:");
        ComboBox::from_id_salt("brand_selector")
            .selected_text(selection.brand().map(|b| b.name).unwrap_or("Choose..."))
            .show_ui(ui, |ui| {
                if ui.selectable_label(selection.brand().is_none(), "Choose...").clicked() {
                    change = Some(SelectionChange::Brand(None));
                }
                for brand in brands {
                    let selected = selection.brand().map(|b| b.id) == Some(brand.id);
                    if ui.selectable_label(selected, brand.name).clicked() {
                        change = Some(SelectionChange::Brand(Some(brand.id)));
                    }
                }
            });
    });

    ui.add_enabled_ui(selection.brand().is_some(), |ui| {
        ui.horizontal(|ui| {
            ui.label("Model:");
            ComboBox::from_id_salt("projector_selector")
                .selected_text(selection.projector().map(|p| p.name).unwrap_or("Choose..."))
                .show_ui(ui, |ui| {
                    if ui.selectable_label(selection.projector().is_none(), "Choose...").clicked() {
                        change = Some(SelectionChange::Projector(None));
                    }
                    for projector in selection.brand().map(|b| b.projectors).unwrap_or_default() {
                        let selected = selection.projector().map(|p| p.id) == Some(projector.id);
                        if ui.selectable_label(selected, projector.name).clicked() {
                            change = Some(SelectionChange::Projector(Some(projector.id)));
                        }
                    }
                });
        });
    });

    ui.add_enabled_ui(selection.projector().is_some(), |ui| {
        ui.horizontal(|ui| {
            ui.label("Lens:");
            ComboBox::from_id_salt("lens_selector")
                .selected_text(selection.lens().map(|l| l.name).unwrap_or("Choose..."))
                .show_ui(ui, |ui| {
                    if ui.selectable_label(selection.lens().is_none(), "Choose...").clicked() {
                        change = Some(SelectionChange::Lens(None));
                    }
                    for lens in selection.projector().map(|p| p.lenses).unwrap_or_default() {
                        let selected = selection.lens().map(|l| l.id) == Some(lens.id);
                        if ui.selectable_label(selected, lens.name).clicked() {
                            change = Some(SelectionChange::Lens(Some(lens.id)));
                        }
                    }
                });
        });
    });

    if let Some(change) = change {
        let result = match change {
            SelectionChange::Brand(id) => panel.select_brand(id),
            SelectionChange::Projector(id) => panel.select_projector(id),
            SelectionChange::Lens(id) => panel.select_lens(id),
        };
        state.message = result.err().map(|e| e.to_string());
    }
}

fn specs_section(ui: &mut Ui, panel: &mut ProjectorPanel) {
    ui.horizontal(|ui| {
        ui.label(RichText::new("Specifications").strong());
        if ui.small_button("Hide").clicked() {
            panel.sections_mut().specs = false;
        }
    });
    ui.separator();

    egui::Grid::new("specs_grid").num_columns(2).show(ui, |ui| {
        for (label, value) in panel.spec_rows() {
            ui.label(RichText::new(label).color(MUTED));
            ui.label(value);
            ui.end_row();
        }
    });
}

fn image_section(ui: &mut Ui, panel: &mut ProjectorPanel) {
    section_header(ui, "Parameters");

    let image = panel.settings().image.clone();
    let mut width = image.width;
    let mut height = image.height;
    let mut distance = image.distance;
    let mut texture = image.texture_path;

    let mut size_changed = false;
    ui.horizontal(|ui| {
        ui.label("Width:");
        size_changed |= ui
            .add(DragValue::new(&mut width).speed(1.0).range(0.0..=f64::MAX).suffix(" mm"))
            .changed();
        ui.label("Height:");
        size_changed |= ui
            .add(DragValue::new(&mut height).speed(1.0).range(0.0..=f64::MAX).suffix(" mm"))
            .changed();
    });
    if size_changed {
        panel.set_image_size(width, height);
    }

    ui.horizontal(|ui| {
        ui.label("Distance:");
        if ui
            .add(DragValue::new(&mut distance).speed(10.0).range(0.0..=f64::MAX).suffix(" mm"))
            .changed()
        {
            panel.set_distance(distance);
        }
    });

    ui.horizontal(|ui| {
        ui.label("Texture:");
        if ui.text_edit_singleline(&mut texture).changed() {
            panel.set_texture_path(&texture);
        }
    });

    ui.label(RichText::new(format!("Ratio: {}:1", panel.aspect_ratio_label())).color(MUTED));
}

fn light_section(ui: &mut Ui, panel: &mut ProjectorPanel, state: &mut UiState) {
    section_header(ui, "Light");

    let light = panel.settings().light.clone();
    let mut intensity = light.intensity;
    ui.horizontal(|ui| {
        ui.label("Intensity:");
        if ui
            .add(Slider::new(&mut intensity, 0.0..=100.0).suffix("%"))
            .changed()
        {
            panel.set_light_intensity(intensity);
        }
    });

    ui.horizontal(|ui| {
        ui.label("Colour:");
        let mut rgb = light.rgb().unwrap_or([255, 255, 255]);
        if ui.color_edit_button_srgb(&mut rgb).changed() {
            state.color_text = format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2]);
            state.message = panel.set_light_color(&state.color_text).err().map(|e| e.to_string());
        }
        if ui.text_edit_singleline(&mut state.color_text).lost_focus() {
            state.message = panel.set_light_color(&state.color_text).err().map(|e| e.to_string());
        }
    });

    let mut temperature = light.temperature;
    ui.horizontal(|ui| {
        ui.label("Temp.:");
        if ui
            .add(DragValue::new(&mut temperature).speed(100).range(1000..=20000).suffix(" K"))
            .changed()
        {
            panel.set_light_temperature(temperature);
        }
    });
}

fn adjustments_section(ui: &mut Ui, panel: &mut ProjectorPanel) {
    ui.horizontal(|ui| {
        ui.label(RichText::new("Lens adjustments").strong());
        if ui.small_button("Hide").clicked() {
            panel.sections_mut().advanced = false;
        }
    });
    ui.separator();

    let lens = panel.settings().lens.clone();
    let mut vertical = lens.shift_vertical;
    let mut horizontal = lens.shift_horizontal;
    let mut zoom = lens.zoom;

    let mut shift_changed = false;
    ui.horizontal(|ui| {
        ui.label("Shift vertical:");
        shift_changed |= ui
            .add(Slider::new(&mut vertical, -SHIFT_LIMIT_PERCENT..=SHIFT_LIMIT_PERCENT).suffix("%"))
            .changed();
    });
    ui.horizontal(|ui| {
        ui.label("Shift horizontal:");
        shift_changed |= ui
            .add(Slider::new(&mut horizontal, -SHIFT_LIMIT_PERCENT..=SHIFT_LIMIT_PERCENT).suffix("%"))
            .changed();
    });
    if shift_changed {
        panel.set_shift(horizontal, vertical);
    }

    ui.horizontal(|ui| {
        ui.label("Zoom:");
        if ui
            .add(Slider::new(&mut zoom, ZOOM_MIN_PERCENT..=ZOOM_MAX_PERCENT).suffix("%"))
            .changed()
        {
            panel.set_zoom(zoom);
        }
    });
}

fn calculations_section(ui: &mut Ui, panel: &mut ProjectorPanel, state: &mut UiState) {
    ui.horizontal(|ui| {
        ui.label(RichText::new("Calculations").strong());
        if ui.small_button("Hide").clicked() {
            panel.sections_mut().calculations = false;
        }
    });
    ui.separator();

    if let Some(size) = panel.projection_size() {
        ui.label(format!(
            "Projected size: {} x {} mm",
            size.width_mm(),
            size.height_mm()
        ));
    }

    let current = panel.calculator().mode();
    ui.horizontal(|ui| {
        ui.label("Solve for:");
        for mode in CalcMode::all() {
            if ui.selectable_label(current == *mode, mode.short_label()).clicked() {
                panel.set_calc_mode(*mode);
            }
        }
    });

    for field in CalcField::all() {
        let driven = panel.calculator().is_driven(*field);
        ui.horizontal(|ui| {
            ui.label(field.label());
            if driven {
                let shown = match panel.calculation() {
                    Some(result) => result.display(*field),
                    None => "-".to_string(),
                };
                ui.label(RichText::new(format!("{} (computed)", shown)).color(ACCENT).monospace());
            } else {
                let mut value = panel.calc_field_value(*field);
                let response = ui.add(
                    DragValue::new(&mut value)
                        .speed(field.step())
                        .range(0.0..=f64::MAX)
                        .custom_formatter(|v, _| field.format(v)),
                );
                if response.changed() {
                    state.message = panel.set_calc_field(*field, value).err().map(|e| e.to_string());
                }
            }
        });
    }

    if let Some(result) = panel.calculation() {
        let color = if result.feasible {
            Color32::from_rgb(74, 222, 128)
        } else {
            Color32::from_rgb(248, 113, 113)
        };
        ui.horizontal(|ui| {
            ui.label("Status:");
            ui.label(RichText::new(result.status_label()).color(color));
        });
    }
}

fn display_section(ui: &mut Ui, panel: &mut ProjectorPanel) {
    section_header(ui, "Viewport display");

    let display = panel.display_options_mut();
    ui.checkbox(&mut display.show_cone, "Projection cone");
    ui.checkbox(&mut display.show_zoom_range, "Zoom range");
    ui.checkbox(&mut display.camera_visible, "Camera visibility");
}

fn formulas_section(ui: &mut Ui) {
    section_header(ui, "Formulas");

    for (name, formula) in FORMULAS {
        ui.label(RichText::new(*name).color(MUTED));
        ui.label(RichText::new(*formula).color(ACCENT).monospace());
    }
    ui.label(RichText::new(FORMULA_LEGEND).small().color(MUTED));
}

fn sections_toggle(ui: &mut Ui, panel: &mut ProjectorPanel) {
    section_header(ui, "Sections");

    let sections = panel.sections_mut();
    ui.horizontal_wrapped(|ui| {
        ui.toggle_value(&mut sections.specs, "Specifications");
        ui.toggle_value(&mut sections.advanced, "Advanced settings");
        ui.toggle_value(&mut sections.calculations, "Calculations");
        ui.toggle_value(&mut sections.formulas, "Formulas");
    });
}
