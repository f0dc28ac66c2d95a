//! Driver command parsing
//!
//! One command per line, arguments separated by whitespace. `#` starts a
//! comment that runs to the end of the line.

use thiserror::Error;

/// Command parsing errors
#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("Unknown command '{name}'")]
    UnknownCommand { name: String },

    #[error("Command '{command}' requires {argument}")]
    MissingArgument { command: String, argument: String },

    #[error("Invalid {argument} for '{command}': {value}")]
    InvalidArgument {
        command: String,
        argument: String,
        value: String,
    },

    #[error("Command '{command}' takes at most {max} arguments")]
    TooManyArguments { command: String, max: usize },

    #[error("Unknown option '{name}'. Valid options: fail, length, show")]
    UnknownOption { name: String },
}

/// Tunable driver settings changed by `option`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverOption {
    /// Every n-th allocation fails; 0 disables
    FailInterval(usize),
    /// Capacity of the removal buffer
    RemoveBuffer(usize),
    /// Elements listed by `show`
    MaxShow(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New,
    Free,
    InsertHead { value: String, count: usize },
    InsertTail { value: String, count: usize },
    RemoveHead { expected: Option<String> },
    RemoveHeadQuiet,
    Size { repeat: usize },
    Reverse,
    Sort,
    Show,
    SetOption(DriverOption),
    Help,
    Quit,
}

/// Usage lines printed by `help`
pub const HELP: &[(&str, &str)] = &[
    ("new", "Create new queue"),
    ("free", "Delete queue"),
    ("ih str [n]", "Insert string str at head of queue n times (default n == 1)"),
    ("it str [n]", "Insert string str at tail of queue n times (default n == 1)"),
    ("rh [str]", "Remove from head of queue. Optionally compare to expected value str"),
    ("rhq", "Remove from head of queue without reporting value"),
    ("size [n]", "Compute queue size n times (default n == 1)"),
    ("reverse", "Reverse queue"),
    ("sort", "Sort queue in ascending order"),
    ("show", "Show queue contents"),
    ("option name value", "Set option: fail, length or show"),
    ("help", "Show documentation"),
    ("quit", "Exit program"),
];

impl Command {
    /// Parse one script line. Blank lines and comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let line = line.split('#').next().unwrap_or_default();
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = tokens.collect();

        let command = match name {
            "new" => no_args(name, &args, Command::New)?,
            "free" => no_args(name, &args, Command::Free)?,
            "ih" | "it" => {
                at_most(name, &args, 2)?;
                let value = required(name, &args, 0, "a string")?.to_string();
                let count = optional_count(name, &args, 1)?;
                if name == "ih" {
                    Command::InsertHead { value, count }
                } else {
                    Command::InsertTail { value, count }
                }
            }
            "rh" => {
                at_most(name, &args, 1)?;
                Command::RemoveHead {
                    expected: args.first().map(|s| s.to_string()),
                }
            }
            "rhq" => no_args(name, &args, Command::RemoveHeadQuiet)?,
            "size" => {
                at_most(name, &args, 1)?;
                Command::Size {
                    repeat: optional_count(name, &args, 0)?,
                }
            }
            "reverse" => no_args(name, &args, Command::Reverse)?,
            "sort" => no_args(name, &args, Command::Sort)?,
            "show" => no_args(name, &args, Command::Show)?,
            "option" => {
                at_most(name, &args, 2)?;
                let option = required(name, &args, 0, "an option name")?;
                let value = parse_number(name, "value", required(name, &args, 1, "a value")?)?;
                Command::SetOption(match option {
                    "fail" => DriverOption::FailInterval(value),
                    "length" => DriverOption::RemoveBuffer(value),
                    "show" => DriverOption::MaxShow(value),
                    _ => {
                        return Err(CommandError::UnknownOption {
                            name: option.to_string(),
                        })
                    }
                })
            }
            "help" => no_args(name, &args, Command::Help)?,
            "quit" => no_args(name, &args, Command::Quit)?,
            _ => {
                return Err(CommandError::UnknownCommand {
                    name: name.to_string(),
                })
            }
        };
        Ok(Some(command))
    }

    /// True for commands that change the queue and are followed by a listing
    pub fn shows_queue(&self) -> bool {
        matches!(
            self,
            Command::New
                | Command::InsertHead { .. }
                | Command::InsertTail { .. }
                | Command::RemoveHead { .. }
                | Command::RemoveHeadQuiet
                | Command::Reverse
                | Command::Sort
                | Command::Show
        )
    }
}

fn no_args(name: &str, args: &[&str], command: Command) -> Result<Command, CommandError> {
    at_most(name, args, 0)?;
    Ok(command)
}

fn at_most(name: &str, args: &[&str], max: usize) -> Result<(), CommandError> {
    if args.len() > max {
        return Err(CommandError::TooManyArguments {
            command: name.to_string(),
            max,
        });
    }
    Ok(())
}

fn required<'a>(name: &str, args: &[&'a str], index: usize, what: &str) -> Result<&'a str, CommandError> {
    args.get(index).copied().ok_or_else(|| CommandError::MissingArgument {
        command: name.to_string(),
        argument: what.to_string(),
    })
}

fn optional_count(name: &str, args: &[&str], index: usize) -> Result<usize, CommandError> {
    match args.get(index) {
        Some(raw) => match parse_number(name, "count", raw)? {
            0 => Err(CommandError::InvalidArgument {
                command: name.to_string(),
                argument: "count".to_string(),
                value: raw.to_string(),
            }),
            count => Ok(count),
        },
        None => Ok(1),
    }
}

fn parse_number(name: &str, argument: &str, raw: &str) -> Result<usize, CommandError> {
    raw.parse().map_err(|_| CommandError::InvalidArgument {
        command: name.to_string(),
        argument: argument.to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        Command::parse(line).unwrap().unwrap()
    }

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(Command::parse(""), Ok(None));
        assert_eq!(Command::parse("   \t"), Ok(None));
        assert_eq!(Command::parse("# just a note"), Ok(None));
    }

    #[test]
    fn test_insert_commands() {
        assert_eq!(
            parse("ih dolphin"),
            Command::InsertHead {
                value: "dolphin".to_string(),
                count: 1
            }
        );
        assert_eq!(
            parse("it gerbil 3   # three gerbils"),
            Command::InsertTail {
                value: "gerbil".to_string(),
                count: 3
            }
        );
        assert!(matches!(
            Command::parse("ih"),
            Err(CommandError::MissingArgument { .. })
        ));
        assert!(matches!(
            Command::parse("it x 0"),
            Err(CommandError::InvalidArgument { .. })
        ));
        assert!(matches!(
            Command::parse("it x y"),
            Err(CommandError::InvalidArgument { .. })
        ));
        assert!(matches!(
            Command::parse("it a 1 2"),
            Err(CommandError::TooManyArguments { max: 2, .. })
        ));
    }

    #[test]
    fn test_remove_commands() {
        assert_eq!(parse("rh"), Command::RemoveHead { expected: None });
        assert_eq!(
            parse("rh bear"),
            Command::RemoveHead {
                expected: Some("bear".to_string())
            }
        );
        assert_eq!(parse("rhq"), Command::RemoveHeadQuiet);
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse("new"), Command::New);
        assert_eq!(parse("free"), Command::Free);
        assert_eq!(parse("reverse"), Command::Reverse);
        assert_eq!(parse("sort"), Command::Sort);
        assert_eq!(parse("show"), Command::Show);
        assert_eq!(parse("size"), Command::Size { repeat: 1 });
        assert_eq!(parse("size 1000"), Command::Size { repeat: 1000 });
        assert_eq!(parse("quit"), Command::Quit);
        assert!(matches!(
            Command::parse("sort now"),
            Err(CommandError::TooManyArguments { max: 0, .. })
        ));
    }

    #[test]
    fn test_option_command() {
        assert_eq!(parse("option fail 10"), Command::SetOption(DriverOption::FailInterval(10)));
        assert_eq!(parse("option length 8"), Command::SetOption(DriverOption::RemoveBuffer(8)));
        assert_eq!(parse("option show 2"), Command::SetOption(DriverOption::MaxShow(2)));
        assert!(matches!(
            Command::parse("option colour 1"),
            Err(CommandError::UnknownOption { .. })
        ));
        assert!(Command::parse("option fail").is_err());
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            Command::parse("push x"),
            Err(CommandError::UnknownCommand {
                name: "push".to_string()
            })
        );
    }

    #[test]
    fn test_help_covers_every_command() {
        for (usage, _) in HELP {
            let name = usage.split_whitespace().next().unwrap();
            assert!(
                !matches!(Command::parse(name), Err(CommandError::UnknownCommand { .. })),
                "{} is documented but not parsed",
                name
            );
        }
    }
}
