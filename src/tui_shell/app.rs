use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::error::ConsoleError;
use crate::ingest::{
    ActivationKind, ActivationOptions, ActivationReport, ChunkFlow, Completion, IngestFlow,
    SchemeCommit, SchemeFlow, Ticket, ValidationOutcome, WizardStep,
};
use crate::model::{
    CarouselReport, ChunkListing, CommitAck, ConsoleConfig, SchemeListing, SchemeSummary,
    ServiceInfo, ServiceReport, StatusReport, SystemReport, UpdateCheck,
};
use crate::poll::PollingController;
use crate::remote::{BackendClient, ChunkAction, UpdateChecker, UploadFile};

use super::input::Input;
use super::modal;
use super::suggest::sort_scored_suggestions;
use super::view::{RenderCtx, View};
use super::views::{
    BrowseRow, CarouselView, DetailState, IngestView, ServiceDetail, ServicesView, SystemView,
};

mod cmd_browse;
mod cmd_dispatch;
mod cmd_ingest;
mod event_loop;
mod modal_output;
mod panels;
mod parse_utils;
mod render;
mod runtime;
mod tasks;
mod time_utils;
mod types;

use self::parse_utils::{parse_index, tokenize};
use self::tasks::{ConsoleFlow, TaskDone};
pub(in crate::tui_shell) use self::time_utils::now_ts;
pub(super) use self::types::{
    CommandDef, EntryKind, Modal, ModalKind, PendingAction, ScrollEntry, UiMode,
};

pub(super) fn run(config: ConsoleConfig) -> Result<()> {
    runtime::run(config)
}

pub(in crate::tui_shell) struct App {
    pub(in crate::tui_shell) config: ConsoleConfig,
    pub(in crate::tui_shell) runtime: tokio::runtime::Runtime,
    pub(in crate::tui_shell) client: BackendClient,
    pub(in crate::tui_shell) tasks_tx: mpsc::Sender<TaskDone>,
    pub(in crate::tui_shell) tasks_rx: mpsc::Receiver<TaskDone>,

    pub(in crate::tui_shell) mode: UiMode,
    pub(in crate::tui_shell) paused: bool,

    pub(in crate::tui_shell) services: ServicesView,
    pub(in crate::tui_shell) carousel: CarouselView,
    pub(in crate::tui_shell) system: SystemView,
    pub(in crate::tui_shell) chunks: IngestView<ChunkFlow>,
    pub(in crate::tui_shell) schemes: IngestView<SchemeFlow>,

    pub(in crate::tui_shell) services_poll: PollingController<StatusReport>,
    pub(in crate::tui_shell) carousel_poll: PollingController<CarouselReport>,
    pub(in crate::tui_shell) system_poll: PollingController<SystemReport>,
    pub(in crate::tui_shell) update: UpdateChecker,

    // Internal log (useful for debugging) but not the primary UI.
    pub(in crate::tui_shell) log: Vec<ScrollEntry>,
    pub(in crate::tui_shell) last_command: Option<String>,
    pub(in crate::tui_shell) last_result: Option<ScrollEntry>,

    pub(in crate::tui_shell) modal: Option<Modal>,

    pub(in crate::tui_shell) input: Input,
    pub(in crate::tui_shell) suggestions: Vec<CommandDef>,
    pub(in crate::tui_shell) suggestion_selected: usize,

    pub(in crate::tui_shell) quit: bool,
}

impl App {
    pub(in crate::tui_shell) fn load(config: ConsoleConfig) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .context("build tokio runtime")?;
        let client = BackendClient::new(&config)?;
        let handle = runtime.handle().clone();
        let timeouts = config.timeouts.clone();

        let c = client.clone();
        let services_poll =
            PollingController::new("services", handle.clone(), timeouts.services(), move || {
                let c = c.clone();
                async move { c.service_report().await.map(ServiceReport::into_status_report) }
            });
        let c = client.clone();
        let carousel_poll =
            PollingController::new("carousel", handle.clone(), timeouts.carousel(), move || {
                let c = c.clone();
                async move { c.carousel_report().await }
            });
        let c = client.clone();
        let system_poll = PollingController::new("system", handle, timeouts.system(), move || {
            let c = c.clone();
            async move { c.system_report().await }
        });

        let (tasks_tx, tasks_rx) = mpsc::channel();
        Ok(Self {
            services: ServicesView::new(config.max_columns),
            carousel: CarouselView::new(),
            system: SystemView::default(),
            chunks: IngestView::new("Data chunks"),
            schemes: IngestView::new("Schemes"),
            config,
            runtime,
            client,
            tasks_tx,
            tasks_rx,
            mode: UiMode::Services,
            paused: false,
            services_poll,
            carousel_poll,
            system_poll,
            update: UpdateChecker::default(),
            log: Vec::new(),
            last_command: None,
            last_result: None,
            modal: None,
            input: Input::default(),
            suggestions: Vec::new(),
            suggestion_selected: 0,
            quit: false,
        })
    }

    pub(in crate::tui_shell) fn mode(&self) -> UiMode {
        self.mode
    }

    pub(in crate::tui_shell) fn prompt(&self) -> &'static str {
        self.mode.prompt()
    }

    pub(in crate::tui_shell) fn view(&self) -> &dyn View {
        match self.mode {
            UiMode::Services => &self.services,
            UiMode::Carousel => &self.carousel,
            UiMode::System => &self.system,
            UiMode::Chunks => &self.chunks,
            UiMode::Schemes => &self.schemes,
        }
    }

    pub(in crate::tui_shell) fn view_mut(&mut self) -> &mut dyn View {
        match self.mode {
            UiMode::Services => &mut self.services,
            UiMode::Carousel => &mut self.carousel,
            UiMode::System => &mut self.system,
            UiMode::Chunks => &mut self.chunks,
            UiMode::Schemes => &mut self.schemes,
        }
    }

    pub(in crate::tui_shell) fn render_ctx(&self) -> RenderCtx {
        let loading = match self.mode {
            UiMode::Services => self.services_poll.is_in_flight(),
            UiMode::Carousel => self.carousel_poll.is_in_flight(),
            UiMode::System => self.system_poll.is_in_flight(),
            UiMode::Chunks => self.chunks.wizard.step() == WizardStep::Uploading,
            UiMode::Schemes => matches!(
                self.schemes.wizard.step(),
                WizardStep::Uploading | WizardStep::Committing
            ),
        };
        RenderCtx {
            paused: self.paused && self.mode.is_dashboard(),
            loading,
        }
    }

    /// Switch the visible view. Hidden dashboards stop polling and a wizard
    /// that is left behind loses its session.
    pub(in crate::tui_shell) fn set_mode(&mut self, mode: UiMode) {
        if self.mode == mode {
            return;
        }
        match self.mode {
            UiMode::Chunks => self.chunks.wizard.reset(),
            UiMode::Schemes => {
                self.schemes.wizard.reset();
                self.schemes.activation.clear();
            }
            _ => {}
        }
        self.mode = mode;
        self.sync_polling(Instant::now());
        match mode {
            UiMode::Chunks => self.refresh_chunk_list(),
            UiMode::Schemes => self.refresh_scheme_list(),
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "../tests/tui_shell/app_tests.rs"]
mod tests;
