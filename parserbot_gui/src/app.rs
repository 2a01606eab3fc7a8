use eframe::{App, CreationContext, Frame};
use egui::{Color32, Margin, RichText, Stroke};
use parserbot_settings::Color;
use parserbot_shell::{ids, ElementId, LiveKind, LiveMenu, MenuEvent, Shell};
use serde_json::Value;

use crate::icons::IconCache;
use crate::services::{DialogTexts, GuiServices, ViewportTitle};

const ICON_SIZE: f32 = 16.0;
/// Key of the free-form notes stored in the project's `data` object.
const NOTES_KEY: &str = "notes";

pub struct ParserBotApp {
    shell: Shell,
    services: GuiServices,
    icons: IconCache,
    pending_theme_refresh: bool,
}

impl ParserBotApp {
    pub fn new(cc: &CreationContext<'_>, mut shell: Shell) -> Self {
        shell
            .context_mut()
            .project
            .attach_sink(Box::new(ViewportTitle(cc.egui_ctx.clone())));
        let mut app = Self {
            shell,
            services: GuiServices::default(),
            icons: IconCache::default(),
            pending_theme_refresh: true,
        };
        app.refresh_dialog_texts();
        app
    }

    fn text(&self, key: &str) -> String {
        self.shell.text(key)
    }

    fn refresh_dialog_texts(&mut self) {
        self.services.texts = DialogTexts {
            unsaved_title: self.text("dialog_unsaved_title"),
            unsaved_description: self.text("dialog_unsaved_description"),
            project_filter: self.text("dialog_project_filter"),
            default_project_name: self.text("new_project_default_name"),
        };
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if self.pending_theme_refresh || self.services.take_theme_change() {
            self.apply_active_theme(ctx);
            self.pending_theme_refresh = false;
        }
    }

    fn apply_active_theme(&mut self, ctx: &egui::Context) {
        let window = self.shell.window_style();
        let menu = *self.shell.menu().style();
        let mut visuals = if self.shell.context().theme.is_light() {
            egui::Visuals::light()
        } else {
            egui::Visuals::dark()
        };
        visuals.override_text_color = Some(color32_from_color(window.text));
        visuals.panel_fill = color32_from_color(window.background);
        visuals.window_fill = color32_from_color(menu.submenu_background);
        visuals.window_stroke = Stroke::new(1.0, color32_from_color(menu.submenu_border));
        visuals.widgets.hovered.weak_bg_fill = color32_from_color(menu.item_hover);
        visuals.widgets.active.weak_bg_fill = color32_from_color(menu.item_click);
        ctx.set_visuals(visuals);
    }

    fn activate(&mut self, ctx: &egui::Context, element: ElementId) {
        let outcome = self.shell.activate(element, &mut self.services);
        tracing::debug!(?element, ?outcome, "menu activation");
        self.after_dispatch(ctx);
    }

    fn dispatch(&mut self, ctx: &egui::Context, event: MenuEvent) {
        self.shell.dispatch(event, &mut self.services);
        self.after_dispatch(ctx);
    }

    fn after_dispatch(&mut self, ctx: &egui::Context) {
        if self.services.take_exit_request() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn toggle_language(&mut self) {
        if self.shell.toggle_language() {
            self.refresh_dialog_texts();
        }
    }

    fn show_menu_bar(&mut self, ctx: &egui::Context) {
        let style = *self.shell.menu().style();
        let mut clicked = None;
        let mut toggle_language = false;
        let language = self
            .shell
            .context()
            .localization
            .active_language()
            .to_uppercase();
        let language_hint = self.text("button_language_toggle");
        let menu = self.shell.menu();
        let icons = &mut self.icons;

        egui::TopBottomPanel::top("menu_bar")
            .resizable(false)
            .frame(
                egui::Frame::none()
                    .fill(color32_from_color(style.bar_background))
                    .inner_margin(Margin::symmetric(6.0, 2.0)),
            )
            .show(ctx, |ui| {
                egui::menu::bar(ui, |ui| {
                    for root in menu.roots() {
                        let Some(element) = menu.element(*root) else {
                            continue;
                        };
                        let title =
                            RichText::new(&element.label).color(color32_from_color(style.bar_text));
                        ui.menu_button(title, |ui| {
                            render_children(ui, menu, *root, icons, &mut clicked);
                        });
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .button(RichText::new(language).color(color32_from_color(style.bar_text)))
                            .on_hover_text(language_hint)
                            .clicked()
                        {
                            toggle_language = true;
                        }
                    });
                });
            });

        if let Some(element) = clicked {
            self.activate(ctx, element);
        }
        if toggle_language {
            self.toggle_language();
        }
    }

    fn show_workspace(&mut self, ctx: &egui::Context) {
        let not_saved = self.text("workspace_not_saved");
        let notes_hint = self.text("workspace_notes_hint");
        let mut edited = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            let context = self.shell.context();
            let state = context.project.state();
            ui.heading(state.name.as_str());
            match &state.path {
                Some(path) => ui.label(path.display().to_string()),
                None => ui.weak(not_saved),
            };
            ui.separator();
            let mut notes = context
                .document
                .data
                .get(NOTES_KEY)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let response = ui.add(
                egui::TextEdit::multiline(&mut notes)
                    .hint_text(notes_hint)
                    .desired_width(f32::INFINITY)
                    .desired_rows(24),
            );
            if response.changed() {
                edited = Some(notes);
            }
        });
        if let Some(notes) = edited {
            let data = &mut self.shell.context_mut().document.data;
            match data {
                Value::Object(map) => {
                    map.insert(NOTES_KEY.to_string(), Value::String(notes));
                }
                other => {
                    let mut map = serde_json::Map::new();
                    map.insert(NOTES_KEY.to_string(), Value::String(notes));
                    *other = Value::Object(map);
                }
            }
            self.shell.mark_modified();
        }
    }

    fn render_settings_window(&mut self, ctx: &egui::Context) {
        let Some(window) = self.services.settings_window.clone() else {
            return;
        };
        let mut open = true;
        let mut language_choice = None;
        let mut light_choice = None;
        let mut flag_changes = Vec::new();

        let flags: Vec<(&'static str, bool)> = self
            .shell
            .panel()
            .map(|panel| panel.flags().collect())
            .unwrap_or_default();
        let active_language = self
            .shell
            .context()
            .localization
            .active_language()
            .to_string();
        let languages: Vec<String> = self
            .shell
            .context()
            .localization
            .languages()
            .into_iter()
            .map(str::to_string)
            .collect();
        let mut light = self.shell.context().theme.is_light();

        egui::Window::new(self.text("settings_title"))
            .open(&mut open)
            .resizable(true)
            .default_size(window.size)
            .show(ctx, |ui| {
                ui.heading(self.text("settings_general"));
                ui.separator();
                egui::ComboBox::from_label(self.text("settings_language"))
                    .selected_text(self.text(&format!("language_{active_language}")))
                    .show_ui(ui, |ui| {
                        for code in &languages {
                            let label = self.text(&format!("language_{code}"));
                            if ui.selectable_label(*code == active_language, label).clicked() {
                                language_choice = Some(code.clone());
                            }
                        }
                    });
                if ui
                    .checkbox(&mut light, self.text(ids::LIGHT_THEME))
                    .changed()
                {
                    light_choice = Some(light);
                }
                ui.add_space(8.0);
                ui.heading(self.text("settings_workspace"));
                ui.separator();
                for (key, value) in &flags {
                    let mut value = *value;
                    if ui
                        .checkbox(&mut value, self.text(&format!("settings_{key}")))
                        .changed()
                    {
                        flag_changes.push((*key, value));
                    }
                }
            });

        for (key, value) in flag_changes {
            self.shell.panel_flag_changed(key, value);
        }
        if let Some(light) = light_choice {
            self.dispatch(ctx, MenuEvent::checkbox(ids::LIGHT_THEME, light));
        }
        if let Some(code) = language_choice {
            if self.shell.set_language(&code) {
                self.refresh_dialog_texts();
            }
        }
        if !open {
            self.services.settings_window = None;
            self.shell.close_settings_panel();
        }
    }

    fn render_about_window(&mut self, ctx: &egui::Context) {
        let Some(window) = self.services.about_window.clone() else {
            return;
        };
        let mut open = true;
        let app_name = self.shell.context().project.app_name().to_string();
        egui::Window::new(self.text("about_title"))
            .open(&mut open)
            .resizable(false)
            .default_size(window.size)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(app_name);
                    ui.label(format!(
                        "{} {}",
                        self.text("about_version"),
                        env!("CARGO_PKG_VERSION")
                    ));
                    ui.add_space(12.0);
                    ui.label(self.text("about_description"));
                });
            });
        if !open {
            self.services.about_window = None;
        }
    }

    fn render_new_project_window(&mut self, ctx: &egui::Context) {
        let Some(window) = self.services.new_project.window.clone() else {
            return;
        };
        let mut open = true;
        let mut create = false;
        let mut cancel = false;
        let name_label = self.text("new_project_name");
        let description_label = self.text("new_project_description");
        let description_hint = self.text("new_project_description_hint");
        let create_label = self.text("button_create");
        let cancel_label = self.text("button_cancel");
        let form = &mut self.services.new_project;
        egui::Window::new(self.shell.text("new_project_title"))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .default_size(window.size)
            .show(ctx, |ui| {
                ui.label(name_label);
                let response = ui.text_edit_singleline(&mut form.name);
                if response.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter)) {
                    create = true;
                }
                ui.label(description_label);
                ui.add(egui::TextEdit::singleline(&mut form.description).hint_text(description_hint));
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button(create_label).clicked() {
                        create = true;
                    }
                    if ui.button(cancel_label).clicked() {
                        cancel = true;
                    }
                });
            });
        if create {
            let form = std::mem::take(&mut self.services.new_project);
            self.shell.create_project(&form.name, &form.description);
        }
        if create || cancel || !open {
            self.services.new_project.window = None;
        }
    }
}

impl App for ParserBotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.apply_theme_if_needed(ctx);
        self.show_menu_bar(ctx);
        self.show_workspace(ctx);
        self.render_settings_window(ctx);
        self.render_about_window(ctx);
        self.render_new_project_window(ctx);
        // The theme may have changed from a click handled this frame.
        self.apply_theme_if_needed(ctx);
    }
}

fn render_children(
    ui: &mut egui::Ui,
    menu: &LiveMenu,
    parent: ElementId,
    icons: &mut IconCache,
    clicked: &mut Option<ElementId>,
) {
    for child in menu.children(parent) {
        let Some(element) = menu.element(*child) else {
            continue;
        };
        match &element.kind {
            LiveKind::Separator => {
                ui.separator();
            }
            LiveKind::Menu { .. } => {
                let texture = element
                    .icon
                    .as_deref()
                    .and_then(|path| icons.texture(ui.ctx(), path));
                ui.horizontal(|ui| {
                    if let Some(texture) = texture {
                        ui.add(egui::Image::new(egui::load::SizedTexture::new(
                            texture,
                            egui::vec2(ICON_SIZE, ICON_SIZE),
                        )));
                    }
                    ui.menu_button(element.label.as_str(), |ui| {
                        render_children(ui, menu, *child, icons, clicked);
                    });
                });
            }
            LiveKind::Checkbox { checked } => {
                let mut value = *checked;
                if ui.checkbox(&mut value, element.label.as_str()).clicked() {
                    *clicked = Some(*child);
                    ui.close_menu();
                }
            }
            LiveKind::Button { .. } => {
                let texture = element
                    .icon
                    .as_deref()
                    .and_then(|path| icons.texture(ui.ctx(), path));
                let button = match texture {
                    Some(texture) => egui::Button::image_and_text(
                        egui::load::SizedTexture::new(texture, egui::vec2(ICON_SIZE, ICON_SIZE)),
                        element.label.as_str(),
                    ),
                    None => egui::Button::new(element.label.as_str()),
                };
                if ui.add_enabled(element.enabled, button).clicked() {
                    *clicked = Some(*child);
                    ui.close_menu();
                }
            }
        }
    }
}

fn color32_from_color(color: Color) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}
