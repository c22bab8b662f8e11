use anyhow::Result;

use crate::model::ConsoleConfig;

pub fn run(config: ConsoleConfig) -> Result<()> {
    crate::tui_shell::run(config)
}
