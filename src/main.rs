use eframe::{App, Frame, CreationContext, egui};
use egui::{Ui, RichText, Align2, Layout, Align};
use egui_extras::DatePickerButton;
use tracing_subscriber::EnvFilter;

mod bridge;
mod chart;
mod config;
mod models;
mod progress;
mod store;
use bridge::{Bridge, HostBridge};
use config::{AppConfig, Palette};
use progress::{suggest, ProgressView};
use store::Store;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::resolve();
    let store = Store::new(config.store_path.clone());
    store.ensure_store();
    tracing::info!("Using data file {}", store.path().display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_title("Working Weight"),
        ..Default::default()
    };

    eframe::run_native(
        "Working Weight",
        options,
        Box::new(move |cc| {
            let bridge: Box<dyn Bridge> = Box::new(HostBridge::new(store));
            Ok(Box::new(WeightApp::new(cc, &config, bridge)))
        }),
    )
}

struct WeightApp {
    view: ProgressView,
    palette: Palette,
    alert: Option<String>,
}

impl WeightApp {
    fn new(cc: &CreationContext, config: &AppConfig, bridge: Box<dyn Bridge>) -> Self {
        apply_theme(&cc.egui_ctx, &config.palette);

        let mut view = ProgressView::new(bridge);
        view.load_and_render(None);

        WeightApp {
            view,
            palette: config.palette,
            alert: None,
        }
    }
}

fn apply_theme(ctx: &egui::Context, palette: &Palette) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = palette.background;
    visuals.window_fill = palette.background;
    visuals.extreme_bg_color = egui::Color32::from_rgb(0x24, 0x24, 0x24);
    visuals.override_text_color = Some(palette.text);
    visuals.hyperlink_color = palette.accent;
    visuals.selection.stroke.color = palette.accent;
    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.text_styles.insert(
        egui::TextStyle::Body,
        egui::FontId::new(16.0, egui::FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Button,
        egui::FontId::new(16.0, egui::FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Heading,
        egui::FontId::new(26.0, egui::FontFamily::Proportional),
    );
    ctx.set_style(style);
}

impl App for WeightApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // the alert blocks everything else until dismissed
        let enabled = self.alert.is_none();

        egui::TopBottomPanel::top("log_form").show(ctx, |ui| {
            ui.add_space(10.0);
            ui.add_enabled_ui(enabled, |ui| self.show_form(ui));
            ui.add_space(10.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(enabled, |ui| self.show_filter(ui));
            ui.separator();
            self.show_chart(ui);
        });

        self.show_alert(ctx);
    }
}

impl WeightApp {
    fn show_form(&mut self, ui: &mut Ui) {
        ui.label(
            RichText::new("Log Working Weight")
                .heading()
                .strong(),
        );
        ui.add_space(6.0);

        let mut submitted = false;
        ui.horizontal(|ui| {
            ui.label("Date");
            ui.add(DatePickerButton::new(&mut self.view.form.date).id_salt("entry_date"));

            ui.add_space(12.0);
            ui.label("Exercise");
            ui.add(
                egui::TextEdit::singleline(&mut self.view.form.exercise)
                    .hint_text("e.g. Squat")
                    .desired_width(200.0),
            );

            ui.add_space(12.0);
            ui.label("Weight");
            let weight = ui.add(
                egui::TextEdit::singleline(&mut self.view.form.weight)
                    .hint_text("0.0")
                    .desired_width(80.0),
            );
            if weight.changed() {
                self.view.form.weight.retain(|c| c.is_ascii_digit() || c == '.' || c == '-');
            }

            ui.add_space(12.0);
            let entered = weight.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button(RichText::new("Log Entry").strong()).clicked() || entered {
                submitted = true;
            }
        });

        let mut picked = None;
        let matches = suggest(self.view.exercises(), &self.view.form.exercise);
        if !matches.is_empty() {
            ui.horizontal_wrapped(|ui| {
                ui.label(RichText::new("Suggestions:").weak());
                for name in matches {
                    if ui.small_button(name).clicked() {
                        picked = Some(name.clone());
                    }
                }
            });
        }
        if let Some(name) = picked {
            self.view.form.exercise = name;
        }

        if submitted {
            if let Err(message) = self.view.on_submit() {
                self.alert = Some(message);
            }
        }
    }

    fn show_filter(&mut self, ui: &mut Ui) {
        let mut choice = None;
        ui.horizontal(|ui| {
            ui.label("Progress for");
            let selected_text = if self.view.exercises().contains(&self.view.filter) {
                self.view.filter.clone()
            } else {
                "Select Exercise...".to_string()
            };

            egui::ComboBox::from_id_salt("exercise_filter")
                .selected_text(selected_text)
                .width(220.0)
                .show_ui(ui, |ui| {
                    ui.add_enabled(false, egui::SelectableLabel::new(false, "Select Exercise..."));
                    for exercise in self.view.exercises() {
                        if ui.selectable_label(*exercise == self.view.filter, exercise).clicked() {
                            choice = Some(exercise.clone());
                        }
                    }
                });
        });

        if let Some(exercise) = choice {
            self.view.on_filter_change(&exercise);
        }
    }

    fn show_chart(&mut self, ui: &mut Ui) {
        if let Some(chart) = self.view.chart() {
            chart.show(ui, &self.palette);
        }
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.alert.clone() else {
            return;
        };

        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.button("OK").clicked() {
                        self.alert = None;
                    }
                });
            });
    }
}
