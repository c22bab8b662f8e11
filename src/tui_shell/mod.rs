use anyhow::Result;

use crate::model::ConsoleConfig;

mod app;

mod commands;
mod input;
mod modal;
mod suggest;
mod view;
mod views;

// Make core TUI types/helpers available to submodules via `super::...`.
use app::{App, CommandDef, Modal, ModalKind, PendingAction, UiMode};

pub fn run(config: ConsoleConfig) -> Result<()> {
    app::run(config)
}
