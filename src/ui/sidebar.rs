//! Sidebar with categories, document creation, and the data root

use eframe::egui;

use crate::app::WorldbookApp;
use crate::core::category::Category;
use crate::core::store::normalize_filename;

/// Left-hand navigation panel
pub struct SidebarPanel;

impl SidebarPanel {
    /// Show the sidebar
    pub fn show(ui: &mut egui::Ui, app: &mut WorldbookApp) {
        ui.vertical(|ui| {
            ui.heading("Categories");
            ui.separator();

            for category in Category::ALL {
                let label = if category.form().is_some() {
                    format!("{} \u{270E}", category.label())
                } else {
                    category.label().to_string()
                };
                if ui
                    .selectable_label(app.category == category, label)
                    .on_hover_text(category.folder_name())
                    .clicked()
                {
                    app.select_category(category);
                }
            }

            ui.separator();
            Self::show_create(ui, app);

            ui.separator();
            Self::show_data_root(ui, app);
        });
    }

    /// New document box
    fn show_create(ui: &mut egui::Ui, app: &mut WorldbookApp) {
        ui.label("New document");
        let response = ui.add(
            egui::TextEdit::singleline(&mut app.new_file_name).hint_text("e.g. new_file"),
        );

        let normalized = normalize_filename(&app.new_file_name).ok();
        let exists = normalized
            .as_ref()
            .map(|name| app.files.contains(name))
            .unwrap_or(false);

        if exists {
            if let Some(name) = &normalized {
                ui.colored_label(
                    egui::Color32::from_rgb(229, 192, 123),
                    format!("{} already exists", name),
                );
            }
        }

        let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let create = ui
            .add_enabled(normalized.is_some() && !exists, egui::Button::new("Create"))
            .clicked();
        if create || (enter && normalized.is_some() && !exists) {
            app.create_document();
        }
    }

    /// Data root location and folder actions
    fn show_data_root(ui: &mut egui::Ui, app: &mut WorldbookApp) {
        ui.label("Data folder");
        ui.label(
            egui::RichText::new(app.store.root().display().to_string())
                .small()
                .monospace(),
        );

        ui.horizontal(|ui| {
            if ui.button("Open...").clicked() {
                if let Some(path) = rfd::FileDialog::new().pick_folder() {
                    app.open_data_dir(path);
                }
            }
            if ui.button("Reveal").on_hover_text("Open in file manager").clicked() {
                let folder = app.store.folder_for(app.category);
                if let Err(e) = open::that(&folder) {
                    tracing::error!("Failed to open {}: {}", folder.display(), e);
                }
            }
        });

        if !app.config.recent_data_dirs.is_empty() {
            ui.collapsing("Recent", |ui| {
                let recent = app.config.recent_data_dirs.clone();
                for path in recent {
                    if ui.small_button(path.display().to_string()).clicked() {
                        app.open_data_dir(path);
                    }
                }
            });
        }
    }
}
