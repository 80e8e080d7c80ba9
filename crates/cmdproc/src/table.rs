use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::command::{CommandDefinition, CommandRunner, Parser, Runner};
use crate::error::{ConfigError, DefinitionError, DispatchError};
use crate::format::Style;
use crate::help::HelpRunner;

/// A command that passed validation, with its names folded for lookup.
#[derive(Clone)]
pub struct ValidatedCommand {
    short_name: String,
    long_name: String,
    short_folded: String,
    long_folded: String,
    arg_description: String,
    help: String,
    is_help: bool,
    parser: Arc<dyn Parser>,
    runner: Arc<dyn Runner>,
}

impl ValidatedCommand {
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn long_name(&self) -> &str {
        &self.long_name
    }

    pub fn arg_description(&self) -> &str {
        &self.arg_description
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn is_help(&self) -> bool {
        self.is_help
    }

    pub fn parser(&self) -> &dyn Parser {
        self.parser.as_ref()
    }

    pub fn runner(&self) -> &dyn Runner {
        self.runner.as_ref()
    }
}

impl fmt::Debug for ValidatedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedCommand")
            .field("short_name", &self.short_name)
            .field("long_name", &self.long_name)
            .field("arg_description", &self.arg_description)
            .field("is_help", &self.is_help)
            .finish_non_exhaustive()
    }
}

/// The validated, read-only command set of one processor.
///
/// Commands keep their definition order for help listings; lookups go
/// through a map keyed by folded name.
#[derive(Debug)]
pub struct CommandTable {
    commands: Vec<ValidatedCommand>,
    index: HashMap<String, usize>,
}

impl CommandTable {
    pub fn commands(&self) -> &[ValidatedCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Resolves a normalized command name to its entry.
    pub fn select(&self, name: &str) -> Result<&ValidatedCommand, DispatchError> {
        self.index
            .get(name)
            .map(|&i| &self.commands[i])
            .ok_or_else(|| DispatchError::UnknownCommand {
                name: name.to_string(),
                help: self.help_name().map(str::to_string),
            })
    }

    /// Name to suggest when a command is unknown, preferring the short form.
    pub fn help_name(&self) -> Option<&str> {
        self.commands.iter().find(|c| c.is_help).map(|c| {
            if c.short_name.is_empty() {
                c.long_name.as_str()
            } else {
                c.short_name.as_str()
            }
        })
    }

    /// Renders the help listing in definition order.
    pub fn render_help(&self, style: Style) -> String {
        let mut help = format!("{}\n", style.header("Help :"));

        for cmd in &self.commands {
            let names = if cmd.short_name.is_empty() {
                style.entity(&cmd.long_name)
            } else {
                format!(
                    "{},{}",
                    style.entity(&cmd.short_name),
                    style.entity(&cmd.long_name)
                )
            };

            if cmd.arg_description.is_empty() {
                help.push_str(&format!("{}\n", names));
            } else {
                help.push_str(&format!(
                    "{} {}\n",
                    names,
                    style.secondary(&cmd.arg_description)
                ));
            }
            help.push_str(&format!("    {}\n", cmd.help));
        }

        help
    }
}

/// Checks every definition and builds the lookup table.
///
/// All problems across all definitions are collected into one error.
pub fn validate(defs: Vec<CommandDefinition>) -> Result<Arc<CommandTable>, ConfigError> {
    validate_styled(defs, Style::plain())
}

pub(crate) fn validate_styled(
    defs: Vec<CommandDefinition>,
    style: Style,
) -> Result<Arc<CommandTable>, ConfigError> {
    if defs.is_empty() {
        return Err(ConfigError::EmptyTable);
    }

    let mut problems = Vec::new();
    let mut owners: HashMap<String, usize> = HashMap::new();

    for (i, def) in defs.iter().enumerate() {
        let command = if def.long_name.is_empty() {
            i.to_string()
        } else {
            def.long_name.clone()
        };
        verify_definition(def, &command, &mut problems);

        for name in [&def.short_name, &def.long_name] {
            if name.is_empty() {
                continue;
            }
            let folded = name.to_lowercase();
            match owners.get(&folded) {
                Some(&owner) if owner != i => problems.push(DefinitionError::DuplicateName {
                    command: command.clone(),
                    name: name.clone(),
                    other: defs[owner].long_name.clone(),
                }),
                Some(_) => {}
                None => {
                    owners.insert(folded, i);
                }
            }
        }
    }

    if !problems.is_empty() {
        return Err(ConfigError::InvalidDefinitions(problems));
    }

    let mut entries = Vec::with_capacity(defs.len());
    for def in defs {
        let (Some(parser), Some(runner)) = (def.parser, def.runner) else {
            continue;
        };
        entries.push((
            def.short_name,
            def.long_name,
            def.arg_description,
            def.help,
            parser,
            runner,
        ));
    }

    // Help runners get the finished table injected as it is built.
    Ok(Arc::new_cyclic(|table| {
        let commands: Vec<ValidatedCommand> = entries
            .into_iter()
            .map(
                |(short_name, long_name, arg_description, help, parser, runner)| {
                    let (runner, is_help): (Arc<dyn Runner>, bool) = match runner {
                        CommandRunner::Custom(runner) => (runner, false),
                        CommandRunner::Help => {
                            let help: Arc<dyn Runner> =
                                Arc::new(HelpRunner::new(table.clone(), style));
                            (help, true)
                        }
                    };
                    ValidatedCommand {
                        short_folded: short_name.to_lowercase(),
                        long_folded: long_name.to_lowercase(),
                        short_name,
                        long_name,
                        arg_description,
                        help,
                        is_help,
                        parser,
                        runner,
                    }
                },
            )
            .collect();

        let mut index = HashMap::new();
        for (i, cmd) in commands.iter().enumerate() {
            if !cmd.short_folded.is_empty() {
                index.entry(cmd.short_folded.clone()).or_insert(i);
            }
            index.entry(cmd.long_folded.clone()).or_insert(i);
        }

        CommandTable { commands, index }
    }))
}

fn verify_definition(def: &CommandDefinition, command: &str, problems: &mut Vec<DefinitionError>) {
    let command = command.to_string();

    if def.long_name.is_empty() {
        problems.push(DefinitionError::MissingLongName {
            command: command.clone(),
        });
    } else if def.short_name.chars().count() > def.long_name.chars().count() {
        problems.push(DefinitionError::ShortNameTooLong {
            command: command.clone(),
        });
    }

    for name in [&def.short_name, &def.long_name] {
        if name.chars().any(char::is_whitespace) {
            problems.push(DefinitionError::NameContainsWhitespace {
                command: command.clone(),
                name: name.clone(),
            });
        }
    }

    if def.parser.is_none() {
        problems.push(DefinitionError::MissingParser {
            command: command.clone(),
        });
    }
    if def.runner.is_none() {
        problems.push(DefinitionError::MissingRunner {
            command: command.clone(),
        });
    }
    if def.help.trim().is_empty() {
        problems.push(DefinitionError::MissingHelp { command });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{parse_none, run_help};

    fn noop(_args: Vec<String>) -> anyhow::Result<()> {
        Ok(())
    }

    fn test_command() -> CommandDefinition {
        CommandDefinition::new("Test")
            .short("t")
            .help("Just a test function!")
            .parser(parse_none())
            .runner(noop)
    }

    #[test]
    fn test_empty_table_is_rejected() {
        let err = validate(Vec::new()).unwrap_err();
        assert_eq!(err, ConfigError::EmptyTable);
        assert!(err.to_string().contains("not defined"));
    }

    #[test]
    fn test_valid_table() {
        let table = validate(vec![test_command()]).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.commands()[0].long_name(), "Test");
        assert!(!table.commands()[0].is_help());
    }

    #[test]
    fn test_missing_long_name_uses_index() {
        let mut bad = test_command().short("x");
        bad.long_name = String::new();

        let err = validate(vec![test_command(), bad]).unwrap_err();
        assert_eq!(
            err.problems(),
            &[DefinitionError::MissingLongName {
                command: "1".to_string()
            }]
        );
        assert!(err.to_string().contains("for: 1"));
    }

    #[test]
    fn test_short_name_longer_than_long_name() {
        let err = validate(vec![test_command().short("Testing")]).unwrap_err();
        assert_eq!(
            err.problems(),
            &[DefinitionError::ShortNameTooLong {
                command: "Test".to_string()
            }]
        );
    }

    #[test]
    fn test_every_problem_is_accumulated() {
        let bare = CommandDefinition::new("bare");
        let mut no_help = test_command().short("n").help("");
        no_help.long_name = "nohelp".to_string();

        let err = validate(vec![bare, no_help]).unwrap_err();
        let problems = err.problems();

        assert!(problems.contains(&DefinitionError::MissingParser {
            command: "bare".to_string()
        }));
        assert!(problems.contains(&DefinitionError::MissingRunner {
            command: "bare".to_string()
        }));
        assert!(problems.contains(&DefinitionError::MissingHelp {
            command: "bare".to_string()
        }));
        assert!(problems.contains(&DefinitionError::MissingHelp {
            command: "nohelp".to_string()
        }));
        assert_eq!(problems.len(), 4);
    }

    #[test]
    fn test_duplicate_names_are_rejected_case_insensitively() {
        let other = CommandDefinition::new("TEST")
            .short("x")
            .help("Clashes with test")
            .parser(parse_none())
            .runner(noop);

        let err = validate(vec![test_command(), other]).unwrap_err();
        assert_eq!(
            err.problems(),
            &[DefinitionError::DuplicateName {
                command: "TEST".to_string(),
                name: "TEST".to_string(),
                other: "Test".to_string(),
            }]
        );
    }

    #[test]
    fn test_same_short_and_long_name_is_allowed() {
        let cmd = test_command().short("test");
        assert!(validate(vec![cmd]).is_ok());
    }

    #[test]
    fn test_whitespace_in_name() {
        let err = validate(vec![test_command().short("t t")]).unwrap_err();
        assert!(matches!(
            err.problems(),
            [DefinitionError::NameContainsWhitespace { command, .. }] if command == "Test"
        ));
    }

    #[test]
    fn test_select_is_case_insensitive() {
        let table = validate(vec![test_command()]).unwrap();

        assert_eq!(table.select("test").unwrap().long_name(), "Test");
        assert_eq!(table.select("t").unwrap().long_name(), "Test");
        assert!(table.select("TEST").is_err());
    }

    #[test]
    fn test_select_unknown_command() {
        let help = CommandDefinition::new("help")
            .short("h")
            .help("Show help")
            .parser(parse_none())
            .runner(run_help());
        let table = validate(vec![test_command(), help]).unwrap();

        let err = table.select("bogus").unwrap_err();
        assert!(err.to_string().contains("unknown command: 'bogus'"));
        assert!(err.to_string().contains("try 'h' for help"));
    }

    #[test]
    fn test_empty_name_selects_nothing() {
        let cmd = test_command().short("");
        let table = validate(vec![cmd]).unwrap();
        assert!(table.select("").is_err());
    }

    #[test]
    fn test_render_help_in_definition_order() {
        let help = CommandDefinition::new("help")
            .short("h")
            .help("Show help")
            .parser(parse_none())
            .runner(run_help());
        let run = CommandDefinition::new("run")
            .short("r")
            .args("<WhereTo>")
            .help("Run a test!")
            .parser(parse_none())
            .runner(noop);

        let table = validate(vec![help, run]).unwrap();
        assert!(table.commands()[0].is_help());

        assert_eq!(
            table.render_help(Style::plain()),
            "Help :\nh,help\n    Show help\nr,run <WhereTo>\n    Run a test!\n"
        );
    }
}
