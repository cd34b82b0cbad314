#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use air_handling_toolbox::{
    air::{self, chart, ChartPath, Field, FormFields, ProcessConstants, ProcessError, ProcessInput},
    config, i18n, logging, report,
};
use eframe::{egui, App, Frame};
use egui_plot::{Line, Plot, PlotBounds, PlotPoint, PlotPoints, Points, Text};
use image::GenericImageView;
use rfd::FileDialog;
use std::{env, fs, path::Path};

fn main() -> Result<(), eframe::Error> {
    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en-us/de-de/ko-kr)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        }
        i += 1;
    }

    let mut app_cfg = config::load_or_default().unwrap_or_else(|e| {
        eprintln!("Config error, using defaults: {e}");
        config::Config::default()
    });
    logging::init(app_cfg.log_level_filter());
    if let Some(lang_cli) = cli_lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }

    let mut viewport = egui::ViewportBuilder::default().with_inner_size(egui::vec2(1100.0, 760.0));
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "Air Handling Toolbox",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                log::warn!(target: "gui", "font setup: {e}");
            }
            Box::new(GuiApp::new(app_cfg))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

/// 한국어 표시용 CJK 폰트를 시스템에서 찾아 기본 폰트 뒤에 붙인다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates: Vec<std::path::PathBuf> = vec![
        "assets/fonts/malgun.ttf".into(),
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc".into(),
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc".into(),
        "/System/Library/Fonts/AppleSDGothicNeo.ttc".into(),
    ];
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        candidates.extend(["malgun.ttf", "gulim.ttc"].iter().map(|f| fonts.join(f)));
    }
    for p in candidates {
        if p.exists() {
            let bytes = fs::read(&p)
                .map_err(|e| format!("Failed to read font file ({}): {e}", p.display()))?;
            apply_font_bytes(ctx, bytes, "cjk_font");
            return Ok(());
        }
    }
    Err("no CJK font found; Korean text may not render".into())
}

fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert(name.to_owned(), egui::FontData::from_owned(bytes));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts.families.entry(family).or_default().push(name.to_owned());
    }
    ctx.set_fonts(fonts);
}

/// 마지막 계산 결과. 오류가 나면 이전 결과와 그래프는 지우고 오류만 보여준다.
enum Outcome {
    Calculated { report: String, path: ChartPath },
    Failed(String),
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    fields: FormFields,
    outcome: Option<Outcome>,
    export_status: Option<String>,
    show_settings_modal: bool,
    lang_input: String,
    constants_input: ProcessConstants,
    settings_status: Option<String>,
}

fn default_fields() -> FormFields {
    FormFields {
        outdoor_temperature: "30".into(),
        outdoor_relative_humidity: "60".into(),
        supply_temperature: "22".into(),
        supply_relative_humidity: "50".into(),
        airflow: "5000".into(),
    }
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        log::info!(target: "gui", "GUI language resolved: {lang_code}");
        Self {
            lang_input: config.language.clone(),
            constants_input: config.process,
            config,
            tr,
            fields: default_fields(),
            outcome: None,
            export_status: None,
            show_settings_modal: false,
            settings_status: None,
        }
    }

    fn calculate(&mut self) {
        self.export_status = None;
        let computed = ProcessInput::parse(&self.fields)
            .map_err(ProcessError::from)
            .and_then(|input| air::compute_process(&input, &self.config.process));
        self.outcome = Some(match computed {
            Ok(result) => Outcome::Calculated {
                report: report::format_report(&result, &self.tr),
                path: ChartPath::from_result(&result),
            },
            Err(e) => {
                log::info!(target: "gui", "calculation rejected: {e}");
                Outcome::Failed(report::describe_error(&e, &self.tr))
            }
        });
    }

    fn apply_settings(&mut self) {
        let mut next = self.config.clone();
        next.language = self.lang_input.clone();
        next.process = self.constants_input;
        if let Err(e) = next.validate() {
            self.settings_status = Some(e.to_string());
            return;
        }
        self.config = next;
        let resolved = i18n::resolve_language(&self.config.language, None);
        self.tr = i18n::Translator::new_with_pack(&resolved, self.config.language_pack_dir.as_deref());
        self.settings_status = Some(match self.config.save() {
            Ok(()) => self.tr.t("gui.settings_saved"),
            Err(e) => format!("Save error: {e}"),
        });
        if self.outcome.is_some() {
            self.calculate();
        }
    }

    fn export_report(&mut self) {
        let Some(Outcome::Calculated { report, .. }) = &self.outcome else {
            return;
        };
        let Some(path) = FileDialog::new()
            .set_file_name("air_handling_report.txt")
            .add_filter("Text", &["txt"])
            .save_file()
        else {
            return;
        };
        self.export_status = Some(match fs::write(&path, report) {
            Ok(()) => format!("{} {}", self.tr.t("gui.export_done"), path.display()),
            Err(e) => format!("{} {e}", self.tr.t("gui.export_failed")),
        });
    }

    fn ui_form(&mut self, ui: &mut egui::Ui) {
        ui.heading(self.tr.t("gui.form_heading"));
        ui.separator();
        let mut submitted = false;
        egui::Grid::new("form_grid")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                for field in Field::ALL {
                    ui.label(self.tr.t(field.label_key()));
                    let resp = ui.add(
                        egui::TextEdit::singleline(self.fields.get_mut(field)).desired_width(90.0),
                    );
                    if resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        submitted = true;
                    }
                    ui.end_row();
                }
            });
        ui.add_space(8.0);
        if ui.button(self.tr.t("gui.calculate")).clicked() || submitted {
            self.calculate();
        }
    }

    fn ui_result(&mut self, ui: &mut egui::Ui) {
        let mut export_clicked = false;
        match &self.outcome {
            None => {
                ui.label(self.tr.t("gui.result_placeholder"));
            }
            Some(Outcome::Failed(msg)) => {
                ui.colored_label(
                    egui::Color32::from_rgb(200, 60, 60),
                    format!("{}: {msg}", self.tr.t(i18n::keys::ERROR_PREFIX)),
                );
            }
            Some(Outcome::Calculated { report, path }) => {
                chart_ui(ui, path, &self.tr);
                ui.separator();
                ui.horizontal(|ui| {
                    export_clicked = ui.button(self.tr.t("gui.export")).clicked();
                    if let Some(status) = &self.export_status {
                        ui.label(status);
                    }
                });
                ui.add(egui::Label::new(egui::RichText::new(report.as_str()).monospace()));
            }
        }
        if export_clicked {
            self.export_report();
        }
    }

    fn ui_settings(&mut self, ctx: &egui::Context) {
        let mut open = self.show_settings_modal;
        let mut save_clicked = false;
        egui::Window::new(self.tr.t("gui.settings"))
            .collapsible(false)
            .resizable(true)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(self.tr.t("gui.settings_language"));
                egui::ComboBox::from_id_source("lang_choice")
                    .selected_text(self.lang_input.as_str())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut self.lang_input, "auto".into(), self.tr.t("gui.settings_language_auto"));
                        ui.selectable_value(&mut self.lang_input, "en-us".into(), "English (US)");
                        ui.selectable_value(&mut self.lang_input, "de-de".into(), "Deutsch");
                        ui.selectable_value(&mut self.lang_input, "ko-kr".into(), "한국어");
                    });
                ui.separator();
                ui.label(self.tr.t("gui.settings_constants"));
                let c = &mut self.constants_input;
                egui::Grid::new("constants_grid").num_columns(2).show(ui, |ui| {
                    let rows: [(&str, &mut f64, &str, f64); 5] = [
                        (i18n::keys::CONSTANTS_COIL_EXIT_TEMPERATURE, &mut c.coil_exit_temperature_c, " °C", 0.1),
                        (i18n::keys::CONSTANTS_COOLING_WATER_DELTA_T, &mut c.cooling_water_delta_t_k, " K", 0.1),
                        (i18n::keys::CONSTANTS_HEATING_WATER_DELTA_T, &mut c.heating_water_delta_t_k, " K", 0.1),
                        (i18n::keys::CONSTANTS_WATER_SPECIFIC_HEAT, &mut c.water_specific_heat_kj_per_kg_k, " kJ/(kg·K)", 0.01),
                        (i18n::keys::CONSTANTS_AIR_DENSITY, &mut c.air_density_kg_per_m3, " kg/m³", 0.01),
                    ];
                    for (key, value, suffix, speed) in rows {
                        ui.label(self.tr.t(key));
                        ui.add(egui::DragValue::new(value).speed(speed).suffix(suffix));
                        ui.end_row();
                    }
                });
                ui.horizontal(|ui| {
                    if ui.button(self.tr.t("gui.settings_reset")).clicked() {
                        self.constants_input = ProcessConstants::default();
                    }
                    save_clicked = ui.button(self.tr.t("gui.settings_save")).clicked();
                });
                if let Some(msg) = &self.settings_status {
                    ui.label(msg);
                }
            });
        self.show_settings_modal = open;
        if save_clicked {
            self.apply_settings();
        }
    }
}

fn chart_ui(ui: &mut egui::Ui, path: &ChartPath, tr: &i18n::Translator) {
    let x_axis = chart::HUMIDITY_AXIS_G_PER_KG;
    let y_axis = chart::TEMPERATURE_AXIS_C;
    let xy = path.as_xy().to_vec();
    ui.strong(tr.t("gui.chart_title"));
    Plot::new("hx_chart")
        .height(320.0)
        .x_axis_label(tr.t("gui.chart_x_axis"))
        .y_axis_label(tr.t("gui.chart_y_axis"))
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [*x_axis.start(), *y_axis.start()],
                [*x_axis.end(), *y_axis.end()],
            ));
            plot_ui.line(
                Line::new(PlotPoints::from(xy.clone()))
                    .name(tr.t("gui.chart_path"))
                    .width(2.0),
            );
            plot_ui.points(Points::new(PlotPoints::from(xy)).radius(6.0));
            for p in path.points() {
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(p.absolute_humidity_g_per_kg, p.temperature_c),
                        tr.t(p.stage.label_key()),
                    )
                    .anchor(egui::Align2::LEFT_BOTTOM),
                );
            }
        });
    let clipped = path.clipped_stages();
    if !clipped.is_empty() {
        let names: Vec<String> = clipped.iter().map(|s| tr.t(s.label_key())).collect();
        ui.small(format!("{} {}", tr.t("gui.chart_clipped"), names.join(", ")));
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(self.tr.t(i18n::keys::APP_TITLE));
                ui.separator();
                if ui.button(self.tr.t("gui.settings")).clicked() {
                    self.show_settings_modal = true;
                    self.settings_status = None;
                }
            });
        });

        if self.show_settings_modal {
            self.ui_settings(ctx);
        }

        egui::SidePanel::left("form")
            .resizable(true)
            .min_width(260.0)
            .default_width(320.0)
            .show(ctx, |ui| self.ui_form(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| self.ui_result(ui));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> GuiApp {
        let cfg = config::Config {
            language: "en-us".into(),
            ..config::Config::default()
        };
        GuiApp::new(cfg)
    }

    #[test]
    fn default_form_calculates() {
        let mut app = app();
        app.calculate();
        assert!(matches!(app.outcome, Some(Outcome::Calculated { .. })));
    }

    #[test]
    fn failed_calculation_replaces_previous_result() {
        let mut app = app();
        app.calculate();
        app.fields.airflow = "abc".into();
        app.calculate();
        match &app.outcome {
            Some(Outcome::Failed(msg)) => assert!(msg.contains("Airflow"), "{msg}"),
            _ => panic!("expected failure outcome"),
        }
    }
}
