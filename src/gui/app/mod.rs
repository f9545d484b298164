use std::{
    path::PathBuf,
    sync::Arc,
};

use eframe::egui;

use super::{
    actions::{
        ActionQueue,
        ExportRequest,
    },
    error_modal::ErrorModal,
    json_modal::{
        JsonModal,
        JsonModalResponse,
    },
    overview::analysis_panel,
    placeholder::placeholder_panel,
    sidebar::Sidebar,
    top_bar::TopBar,
};
use crate::{
    config::Settings,
    core::{
        export::{
            self,
            ClipboardSink,
        },
        tasks::TaskManager,
        Action,
        DatacleanError,
        Notice,
        ResultSet,
        Section,
        Session,
    },
    services::Services,
};

struct EguiClipboard<'a>(&'a egui::Context);

impl ClipboardSink for EguiClipboard<'_> {
    fn set_text(&mut self, text: String) {
        self.0.copy_text(text);
    }
}

pub struct DatacleanApp {
    session: Session,
    task_manager: TaskManager,
    actions: ActionQueue,
    json_modal: JsonModal,
}

impl DatacleanApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: &Settings) -> Result<Self, DatacleanError> {
        let services = Services::from_settings(settings)?;
        let repaint_ctx = cc.egui_ctx.clone();
        let task_manager =
            TaskManager::new(services)?.with_notifier(move || repaint_ctx.request_repaint());

        tracing::info!("Analysis service at {}", settings.api_base_url);

        Ok(Self {
            session: Session::new(settings.default_instruction.clone()),
            task_manager,
            actions: ActionQueue::new(),
            json_modal: JsonModal::new(),
        })
    }

    fn export(&mut self, ctx: &egui::Context, request: ExportRequest, results: &Arc<ResultSet>) {
        let Some(document) = self.json_modal.document(results) else {
            self.session.notify(Notice {
                title: "Export Failed".to_string(),
                message: "The results could not be converted to JSON.".to_string(),
                details: None,
            });
            return;
        };

        match request {
            ExportRequest::Copy => {
                export::to_clipboard(document, &mut EguiClipboard(ctx));
                self.json_modal.mark_copied();
            }
            ExportRequest::Download => {
                let Some(path) = pick_export_destination() else {
                    tracing::info!("Export cancelled");
                    return;
                };
                if let Err(e) = export::save_as(document, &path) {
                    tracing::error!("Failed to export results: {}", e);
                    self.session.notify(Notice {
                        title: "Export Failed".to_string(),
                        message: format!("Could not write {}", path.display()),
                        details: Some(e.to_string()),
                    });
                }
            }
        }
    }
}

fn pick_export_destination() -> Option<PathBuf> {
    let dir = dirs::download_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));
    let suggested = export::unique_export_path(&dir, chrono::Utc::now());
    let file_name = suggested.file_name().and_then(|name| name.to_str()).unwrap_or("results.json");

    rfd::FileDialog::new()
        .add_filter("JSON", &["json"])
        .set_directory(&dir)
        .set_file_name(file_name)
        .save_file()
}

impl eframe::App for DatacleanApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for result in self.task_manager.poll_results() {
            tracing::debug!("Handling {} result", result.task_type());
            self.session.handle_task_result(result);
        }

        let view = self.session.view();
        let mut export_request = TopBar::show(ctx, &view, &mut self.actions);
        Sidebar::show(ctx, &view, &mut self.actions);

        egui::CentralPanel::default().show(ctx, |ui| match view.view.active_section() {
            Section::Overview => analysis_panel(ui, &view, &mut self.actions),
            section => placeholder_panel(ui, section),
        });

        if view.view.json_modal_open() {
            match self.json_modal.show(ctx, view.results) {
                Some(JsonModalResponse::Close) => self.actions.push(Action::CloseJsonModal),
                Some(JsonModalResponse::Export(request)) => export_request = Some(request),
                None => {}
            }
        }

        if let Some(notice) = view.notice {
            if ErrorModal::show(ctx, notice) {
                self.actions.push(Action::DismissNotice);
            }
        }

        let results = Arc::clone(view.results);

        if let Some(request) = export_request {
            self.export(ctx, request, &results);
        }

        let had_actions = !self.actions.is_empty();
        for action in self.actions.drain() {
            self.session.apply(action, &self.task_manager);
        }

        if had_actions {
            ctx.request_repaint();
        }
    }
}
