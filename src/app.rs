//! Main application state and UI coordination

use std::path::PathBuf;
use std::sync::Arc;

use eframe::egui;

use crate::core::category::Category;
use crate::core::config::AppConfig;
use crate::core::error::StoreError;
use crate::core::session::EditingSession;
use crate::core::store::DocumentStore;
use crate::ui::{editor::EditorPanel, sidebar::SidebarPanel};

/// Last message shown in the status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

/// Main application state
pub struct WorldbookApp {
    /// Application configuration
    pub config: AppConfig,
    /// Store over the current data root
    pub store: DocumentStore,
    /// Currently selected category
    pub category: Category,
    /// Documents in the selected category
    pub files: Vec<String>,
    /// Open document, if any
    pub session: Option<EditingSession>,
    /// Filename typed into the create box
    pub new_file_name: String,
    /// Literal paste buffers for the character form's mapping fields
    pub literal_inputs: [String; 2],
    /// Status line
    pub status: Option<Status>,
}

impl WorldbookApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Load config or use defaults
        let config = AppConfig::load().unwrap_or_else(|e| {
            tracing::warn!("Using default config: {:#}", e);
            AppConfig::default()
        });

        Self::configure_style(&cc.egui_ctx, &config);

        let mut app = Self {
            store: DocumentStore::new(config.resolve_data_dir()),
            config,
            category: Category::ALL[0],
            files: Vec::new(),
            session: None,
            new_file_name: String::new(),
            literal_inputs: Default::default(),
            status: None,
        };
        app.init_storage();
        app
    }

    /// Apply theme, font size and the optional extra font
    fn configure_style(ctx: &egui::Context, config: &AppConfig) {
        if config.ui.theme == "light" {
            ctx.set_visuals(egui::Visuals::light());
        } else {
            ctx.set_visuals(egui::Visuals::dark());
        }

        let size = config.editor.font_size;
        ctx.style_mut(|style| {
            for text_style in [egui::TextStyle::Body, egui::TextStyle::Monospace] {
                if let Some(font) = style.text_styles.get_mut(&text_style) {
                    font.size = size;
                }
            }
        });

        let Some(ref font_path) = config.ui.font_path else {
            return;
        };
        match std::fs::read(font_path) {
            Ok(bytes) => {
                let mut fonts = egui::FontDefinitions::default();
                fonts
                    .font_data
                    .insert("user".to_owned(), Arc::new(egui::FontData::from_owned(bytes)));
                for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
                    fonts.families.entry(family).or_default().push("user".to_owned());
                }
                ctx.set_fonts(fonts);
                tracing::info!("Loaded font: {}", font_path.display());
            }
            Err(e) => tracing::warn!("Failed to load font {}: {}", font_path.display(), e),
        }
    }

    /// Create the category folders and list the selected category
    fn init_storage(&mut self) {
        if let Err(e) = self.store.ensure_storage_layout() {
            self.report_error("Failed to prepare data folder", e);
        }
        self.refresh_files();
    }

    /// Switch to another data root
    pub fn open_data_dir(&mut self, path: PathBuf) {
        self.store = DocumentStore::new(path.clone());
        self.session = None;
        self.config.set_data_dir(path);
        if let Err(e) = self.config.save() {
            tracing::warn!("Failed to save config: {:#}", e);
        }
        self.init_storage();
    }

    /// Re-list the selected category's documents
    pub fn refresh_files(&mut self) {
        self.files = self.store.list_documents(self.category);
    }

    pub fn select_category(&mut self, category: Category) {
        if self.category == category {
            return;
        }
        self.category = category;
        self.session = None;
        self.refresh_files();
    }

    /// Open a document in the selected category
    pub fn open_document(&mut self, filename: &str) {
        match EditingSession::open(&self.store, self.category, filename) {
            Ok(session) => {
                self.session = Some(session);
                self.status = None;
            }
            Err(e) => self.report_error("Failed to open document", e),
        }
    }

    /// Create the document named in the create box and open it
    pub fn create_document(&mut self) {
        match self.store.create(self.category, &self.new_file_name) {
            Ok(filename) => {
                self.new_file_name.clear();
                self.refresh_files();
                self.open_document(&filename);
                self.status = Some(Status::Info(format!("Created {}", filename)));
            }
            Err(e) => self.report_error("Failed to create document", e),
        }
    }

    /// Save the raw YAML buffer
    pub fn save_raw(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.save_raw(&self.store) {
            Ok(()) => self.status = Some(Status::Info(format!("Saved {}", session.filename()))),
            Err(e) => self.report_error("Failed to save", e),
        }
    }

    /// Save the specialized form
    pub fn save_form(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.save_form(&self.store) {
            Ok(()) => self.status = Some(Status::Info(format!("Saved {}", session.filename()))),
            Err(e) => self.report_error("Failed to save", e),
        }
    }

    /// Re-read the open document and the file list
    pub fn reload(&mut self) {
        self.refresh_files();
        if let Some(session) = self.session.as_mut() {
            if let Err(e) = session.reload(&self.store) {
                self.session = None;
                self.report_error("Failed to reload", e);
            }
        }
    }

    pub fn report_error(&mut self, context: &str, error: StoreError) {
        tracing::error!("{}: {}", context, error);
        self.status = Some(Status::Error(format!("{}: {}", context, error)));
    }

    /// Render the top bar with actions and the status line
    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(self.category.label());
                if ui.button("\u{21BB}").on_hover_text("Reload").clicked() {
                    self.reload();
                }

                ui.separator();
                match &self.status {
                    Some(Status::Info(msg)) => {
                        ui.colored_label(egui::Color32::from_rgb(152, 195, 121), msg.as_str());
                    }
                    Some(Status::Error(msg)) => {
                        ui.colored_label(egui::Color32::from_rgb(224, 108, 117), msg.as_str());
                    }
                    None => {}
                }
            });
        });
    }
}

impl eframe::App for WorldbookApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle keyboard shortcuts
        let save_pressed = ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::S));
        if save_pressed {
            let (raw_dirty, form_dirty) = self
                .session
                .as_ref()
                .map(|s| (s.is_dirty(), s.form_is_dirty()))
                .unwrap_or_default();
            if raw_dirty {
                self.save_raw();
            } else if form_dirty {
                self.save_form();
            }
        }

        self.render_top_bar(ctx);

        egui::SidePanel::left("sidebar")
            .resizable(true)
            .default_width(self.config.ui.sidebar_width)
            .min_width(150.0)
            .show(ctx, |ui| {
                SidebarPanel::show(ui, self);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            EditorPanel::show(ui, self);
        });
    }
}
