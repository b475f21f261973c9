use crate::gui::ring::ArcStartLocation;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    SetProgress(i64),
    SetArcStartLocation(i64),
    SetAnimate(bool),
    SetLabel(bool),
    ConfigReload,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'{0}' expects an argument")]
    MissingArgument(&'static str),
    #[error("invalid argument '{arg}' for '{command}'")]
    InvalidArgument { command: &'static str, arg: String },
    #[error("unexpected trailing input '{0}'")]
    Trailing(String),
}

fn parse_switch(command: &'static str, arg: &str) -> Result<bool, CommandError> {
    match arg.to_ascii_lowercase().as_str() {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        _ => Err(CommandError::InvalidArgument {
            command,
            arg: arg.to_string(),
        }),
    }
}

/// Integer codes pass through untouched (the ring normalizes them); names map to their code.
fn parse_location(arg: &str) -> Result<i64, CommandError> {
    arg.parse::<i64>()
        .or_else(|_| ArcStartLocation::from_str(arg).map(|l| l.code() as i64))
        .map_err(|_| CommandError::InvalidArgument {
            command: "location",
            arg: arg.to_string(),
        })
}

impl FromStr for AppEvent {
    type Err = CommandError;

    /// Parses one line of the control protocol, e.g. `progress 40` or `label off`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().ok_or(CommandError::Empty)?;
        let arg = words.next();

        if let Some(extra) = words.next() {
            return Err(CommandError::Trailing(extra.to_string()));
        }

        let event = match command.to_ascii_lowercase().as_str() {
            "progress" => {
                let arg = arg.ok_or(CommandError::MissingArgument("progress"))?;
                let value = arg.parse().map_err(|_| CommandError::InvalidArgument {
                    command: "progress",
                    arg: arg.to_string(),
                })?;
                AppEvent::SetProgress(value)
            }
            "location" => {
                let arg = arg.ok_or(CommandError::MissingArgument("location"))?;
                AppEvent::SetArcStartLocation(parse_location(arg)?)
            }
            "animate" => {
                let arg = arg.ok_or(CommandError::MissingArgument("animate"))?;
                AppEvent::SetAnimate(parse_switch("animate", arg)?)
            }
            "label" => {
                let arg = arg.ok_or(CommandError::MissingArgument("label"))?;
                AppEvent::SetLabel(parse_switch("label", arg)?)
            }
            "reload" => match arg {
                Some(extra) => return Err(CommandError::Trailing(extra.to_string())),
                None => AppEvent::ConfigReload,
            },
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parsing() {
        let cases = vec![
            ("progress 40", AppEvent::SetProgress(40)),
            ("  progress   -7 ", AppEvent::SetProgress(-7)),
            ("PROGRESS 250", AppEvent::SetProgress(250)),
            ("location 2", AppEvent::SetArcStartLocation(2)),
            ("location 17", AppEvent::SetArcStartLocation(17)),
            ("location left", AppEvent::SetArcStartLocation(3)),
            ("location R", AppEvent::SetArcStartLocation(1)),
            ("animate on", AppEvent::SetAnimate(true)),
            ("animate OFF", AppEvent::SetAnimate(false)),
            ("label true", AppEvent::SetLabel(true)),
            ("label 0", AppEvent::SetLabel(false)),
            ("reload", AppEvent::ConfigReload),
        ];

        for (line, expected) in cases {
            assert_eq!(line.parse::<AppEvent>(), Ok(expected), "{line}");
        }
    }

    #[test]
    fn test_malformed_commands() {
        let cases = vec![
            ("", CommandError::Empty),
            ("   ", CommandError::Empty),
            ("spin", CommandError::Unknown("spin".to_string())),
            ("progress", CommandError::MissingArgument("progress")),
            (
                "progress half",
                CommandError::InvalidArgument {
                    command: "progress",
                    arg: "half".to_string(),
                },
            ),
            (
                "location north",
                CommandError::InvalidArgument {
                    command: "location",
                    arg: "north".to_string(),
                },
            ),
            (
                "animate maybe",
                CommandError::InvalidArgument {
                    command: "animate",
                    arg: "maybe".to_string(),
                },
            ),
            ("label on now", CommandError::Trailing("now".to_string())),
            ("reload now", CommandError::Trailing("now".to_string())),
        ];

        for (line, expected) in cases {
            assert_eq!(line.parse::<AppEvent>(), Err(expected), "{line}");
        }
    }
}
