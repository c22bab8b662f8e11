use super::{CommandDef, UiMode};

pub(super) fn global_command_defs() -> Vec<CommandDef> {
    vec![
        CommandDef {
            name: "help",
            aliases: &["h", "?"],
            usage: "help [command]",
            help: "Show help",
        },
        CommandDef {
            name: "services",
            aliases: &[],
            usage: "services",
            help: "Service health grid",
        },
        CommandDef {
            name: "carousel",
            aliases: &[],
            usage: "carousel",
            help: "Transport-stream carousel",
        },
        CommandDef {
            name: "system",
            aliases: &[],
            usage: "system",
            help: "System modules and versions",
        },
        CommandDef {
            name: "chunks",
            aliases: &[],
            usage: "chunks",
            help: "Data chunk import and archive",
        },
        CommandDef {
            name: "schemes",
            aliases: &[],
            usage: "schemes",
            help: "Scheme import, archive and activation",
        },
        CommandDef {
            name: "refresh",
            aliases: &["r"],
            usage: "refresh",
            help: "Refresh the current view now",
        },
        CommandDef {
            name: "pause",
            aliases: &[],
            usage: "pause",
            help: "Stop polling",
        },
        CommandDef {
            name: "resume",
            aliases: &[],
            usage: "resume",
            help: "Resume polling",
        },
        CommandDef {
            name: "update",
            aliases: &[],
            usage: "update",
            help: "Check for (then apply) a software update",
        },
        CommandDef {
            name: "log",
            aliases: &[],
            usage: "log",
            help: "Show this session's output",
        },
        CommandDef {
            name: "quit",
            aliases: &["q"],
            usage: "quit",
            help: "Exit",
        },
    ]
}

fn services_command_defs() -> Vec<CommandDef> {
    vec![
        CommandDef {
            name: "open",
            aliases: &["o"],
            usage: "open <n>",
            help: "Toggle detail of service n",
        },
        CommandDef {
            name: "upload",
            aliases: &["u"],
            usage: "upload <path>",
            help: "Send a data file to the open service",
        },
        CommandDef {
            name: "export",
            aliases: &[],
            usage: "export <xml|csv|all> [path]",
            help: "Save the EPG of the open service, or of all services",
        },
    ]
}

fn wizard_command_defs() -> Vec<CommandDef> {
    vec![
        CommandDef {
            name: "upload",
            aliases: &["u"],
            usage: "upload <path>",
            help: "Upload a file for validation",
        },
        CommandDef {
            name: "new",
            aliases: &[],
            usage: "new",
            help: "Start a new import session",
        },
        CommandDef {
            name: "delete",
            aliases: &[],
            usage: "delete <n>",
            help: "Delete archived object n",
        },
    ]
}

fn chunks_command_defs() -> Vec<CommandDef> {
    let mut out = wizard_command_defs();
    out.extend([
        CommandDef {
            name: "commit",
            aliases: &["c"],
            usage: "commit",
            help: "Save the staged chunk",
        },
        CommandDef {
            name: "play",
            aliases: &[],
            usage: "play <n>",
            help: "Start playing chunk n",
        },
        CommandDef {
            name: "stop",
            aliases: &[],
            usage: "stop <n>",
            help: "Pause chunk n",
        },
        CommandDef {
            name: "preview",
            aliases: &["p"],
            usage: "preview <n>",
            help: "Show a decoded dump of chunk n",
        },
    ]);
    out
}

fn schemes_command_defs() -> Vec<CommandDef> {
    let mut out = wizard_command_defs();
    out.extend([
        CommandDef {
            name: "commit",
            aliases: &["c"],
            usage: "commit <description>",
            help: "Save the staged scheme",
        },
        CommandDef {
            name: "stage",
            aliases: &[],
            usage: "stage <n>",
            help: "Re-validate archived scheme n for activation",
        },
        CommandDef {
            name: "activate",
            aliases: &[],
            usage: "activate [flags]",
            help: "Load the committed or staged scheme",
        },
        CommandDef {
            name: "maintain",
            aliases: &[],
            usage: "maintain [flags]",
            help: "Run maintenance actions only",
        },
    ]);
    out
}

/// Commands specific to one view.
pub(super) fn mode_command_defs(mode: UiMode) -> Vec<CommandDef> {
    match mode {
        UiMode::Services => services_command_defs(),
        UiMode::Carousel | UiMode::System => Vec::new(),
        UiMode::Chunks => chunks_command_defs(),
        UiMode::Schemes => schemes_command_defs(),
    }
}
