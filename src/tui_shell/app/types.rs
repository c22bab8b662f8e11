use crate::ingest::ActivationOptions;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum UiMode {
    Services,
    Carousel,
    System,
    Chunks,
    Schemes,
}

impl UiMode {
    pub(in crate::tui_shell) const ALL: [UiMode; 5] = [
        UiMode::Services,
        UiMode::Carousel,
        UiMode::System,
        UiMode::Chunks,
        UiMode::Schemes,
    ];

    pub(in crate::tui_shell) fn prompt(self) -> &'static str {
        match self {
            UiMode::Services => "services>",
            UiMode::Carousel => "carousel>",
            UiMode::System => "system>",
            UiMode::Chunks => "chunks>",
            UiMode::Schemes => "schemes>",
        }
    }

    pub(in crate::tui_shell) fn name(self) -> &'static str {
        match self {
            UiMode::Services => "services",
            UiMode::Carousel => "carousel",
            UiMode::System => "system",
            UiMode::Chunks => "chunks",
            UiMode::Schemes => "schemes",
        }
    }

    pub(in crate::tui_shell) fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }

    /// Dashboards poll; ingestion views list on demand.
    pub(in crate::tui_shell) fn is_dashboard(self) -> bool {
        matches!(self, UiMode::Services | UiMode::Carousel | UiMode::System)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum EntryKind {
    Command,
    Output,
    Error,
}

#[derive(Clone, Debug)]
pub(in crate::tui_shell) struct ScrollEntry {
    pub(in crate::tui_shell) ts: String,
    pub(in crate::tui_shell) kind: EntryKind,
    pub(in crate::tui_shell) lines: Vec<String>,
}

#[derive(Clone, Debug)]
pub(in crate::tui_shell) struct CommandDef {
    pub(in crate::tui_shell) name: &'static str,
    pub(in crate::tui_shell) aliases: &'static [&'static str],
    pub(in crate::tui_shell) usage: &'static str,
    pub(in crate::tui_shell) help: &'static str,
}

/// An action held back until the operator confirms it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum PendingAction {
    DeleteChunk(String),
    DeleteScheme(String),
    Activate(ActivationOptions),
    Maintain(ActivationOptions),
}

#[derive(Debug)]
pub(in crate::tui_shell) enum ModalKind {
    Viewer,
    Confirm(PendingAction),
}

#[derive(Debug)]
pub(in crate::tui_shell) struct Modal {
    pub(in crate::tui_shell) title: String,
    pub(in crate::tui_shell) kind: ModalKind,
    pub(in crate::tui_shell) lines: Vec<String>,
    pub(in crate::tui_shell) scroll: usize,
}
