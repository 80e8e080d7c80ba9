use cmdproc::{CommandDefinition, parse_none, run_help};
use tokio::sync::mpsc;

/// The command set of the interactive console.
///
/// `quit` only notifies `quit_tx`; the caller owns the shutdown handle.
pub fn console_commands(quit_tx: mpsc::UnboundedSender<()>) -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("help")
            .short("h")
            .help("Show this help message")
            .parser(parse_none())
            .runner(run_help()),
        CommandDefinition::new("echo")
            .short("e")
            .args("<text>")
            .help("Print the text back")
            .parser(parse_rest)
            .runner(|args: Vec<String>| -> anyhow::Result<()> {
                println!("{}", args.join(" "));
                Ok(())
            }),
        CommandDefinition::new("time")
            .short("t")
            .help("Print the local date and time")
            .parser(parse_none())
            .runner(|_args: Vec<String>| -> anyhow::Result<()> {
                println!("{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
                Ok(())
            }),
        CommandDefinition::new("quit")
            .short("q")
            .help("Exit the console")
            .parser(parse_none())
            .runner(move |_args: Vec<String>| -> anyhow::Result<()> {
                quit_tx
                    .send(())
                    .map_err(|_| anyhow::anyhow!("console is already shutting down"))
            }),
    ]
}

/// Everything after the command name, as a single argument.
fn parse_rest(line: &str) -> anyhow::Result<Vec<String>> {
    match line.split_once(' ') {
        Some((_, rest)) if !rest.is_empty() => Ok(vec![rest.to_string()]),
        _ => anyhow::bail!("usage: echo <text>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_commands_validate() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let table = cmdproc::validate(console_commands(tx)).unwrap();

        assert_eq!(table.len(), 4);
        assert_eq!(table.help_name(), Some("h"));
        assert_eq!(table.select("q").unwrap().long_name(), "quit");
    }

    #[test]
    fn test_parse_rest() {
        assert_eq!(parse_rest("echo hello  there").unwrap(), vec!["hello  there"]);
        assert!(parse_rest("echo ").is_err());
    }

    #[test]
    fn test_quit_notifies() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let table = cmdproc::validate(console_commands(tx)).unwrap();

        table.select("quit").unwrap().runner().run(Vec::new()).unwrap();
        assert!(rx.try_recv().is_ok());

        drop(rx);
        assert!(table.select("q").unwrap().runner().run(Vec::new()).is_err());
    }
}
