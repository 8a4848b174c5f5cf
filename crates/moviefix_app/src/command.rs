use thiserror::Error;

/// One line typed in interactive mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Fetch the next page (the "scrolled to the end" gesture).
    Next,
    /// Select a release year; `None` clears the year filter.
    Year(Option<i32>),
    /// Toggle one genre chip by id.
    Toggle(i64),
    /// Clear year and genres.
    Clear,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command {0:?}; type 'help'")]
    Unknown(String),
    #[error("{command} expects {expected}")]
    BadArgument {
        command: &'static str,
        expected: &'static str,
    },
}

pub const HELP: &str = "\
commands:
  next | n            load the next page
  year <yyyy|all>     filter by release year
  genre <id>          toggle a genre
  clear               drop all filters
  show                print the current list
  help                this text
  quit | q            exit";

pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();

    let command = match head.to_ascii_lowercase().as_str() {
        "next" | "n" | "more" => Command::Next,
        "year" | "y" => match arg {
            Some("all") | Some("any") => Command::Year(None),
            Some(value) => Command::Year(Some(value.parse().map_err(|_| {
                CommandError::BadArgument {
                    command: "year",
                    expected: "a four digit year or 'all'",
                }
            })?)),
            None => {
                return Err(CommandError::BadArgument {
                    command: "year",
                    expected: "a four digit year or 'all'",
                })
            }
        },
        "genre" | "g" => {
            let id = arg
                .and_then(|value| value.parse().ok())
                .ok_or(CommandError::BadArgument {
                    command: "genre",
                    expected: "a numeric genre id",
                })?;
            Command::Toggle(id)
        }
        "clear" => Command::Clear,
        "show" | "ls" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::{parse, Command, CommandError};

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn parses_commands_and_aliases() {
        assert_eq!(parse("next"), Ok(Some(Command::Next)));
        assert_eq!(parse(" N "), Ok(Some(Command::Next)));
        assert_eq!(parse("year 2014"), Ok(Some(Command::Year(Some(2014)))));
        assert_eq!(parse("year all"), Ok(Some(Command::Year(None))));
        assert_eq!(parse("g 28"), Ok(Some(Command::Toggle(28))));
        assert_eq!(parse("quit"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(matches!(
            parse("year soon"),
            Err(CommandError::BadArgument { command: "year", .. })
        ));
        assert!(matches!(
            parse("genre"),
            Err(CommandError::BadArgument { command: "genre", .. })
        ));
        assert_eq!(
            parse("dance"),
            Err(CommandError::Unknown("dance".to_string()))
        );
    }
}
