use std::io::{self, Write};
use std::sync::Weak;

use anyhow::anyhow;

use crate::command::Runner;
use crate::format::Style;
use crate::table::CommandTable;

/// Prints the listing of the table it was built into.
///
/// The table owns its help runner, so the runner only keeps a weak
/// reference back to it.
pub struct HelpRunner {
    table: Weak<CommandTable>,
    style: Style,
}

impl HelpRunner {
    pub(crate) fn new(table: Weak<CommandTable>, style: Style) -> Self {
        Self { table, style }
    }

    pub fn render(&self) -> anyhow::Result<String> {
        let table = self
            .table
            .upgrade()
            .ok_or_else(|| anyhow!("command table no longer available"))?;
        Ok(table.render_help(self.style))
    }
}

impl Runner for HelpRunner {
    fn run(&self, _args: Vec<String>) -> anyhow::Result<()> {
        let help = self.render()?;
        let mut out = io::stdout().lock();
        out.write_all(help.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}
