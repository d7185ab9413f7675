// Pure line-protocol parsing (no I/O)

use crate::dock::CrossingDetail;
use thiserror::Error;

/// Where a drag ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPlace {
    Inside,
    Outside,
    /// Screen position; inside or outside is decided against the dock region
    At(i32, i32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    HoverEnter,
    HoverLeave(CrossingDetail),
    DragBegin(usize),
    Drop { source: usize, target: usize },
    DragEnd { slot: usize, place: DropPlace },
    Activate(usize),
    Notify,
    Reconcile,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?}")]
    Unknown(String),
    #[error("{0} is missing an argument")]
    MissingArgument(&'static str),
    #[error("invalid number {0:?}")]
    BadNumber(String),
    #[error("unexpected argument {0:?}")]
    Unexpected(String),
}

fn arg<'a, I: Iterator<Item = &'a str>>(args: &mut I, command: &'static str) -> Result<&'a str, ParseError> {
    args.next().ok_or(ParseError::MissingArgument(command))
}

fn number<T: std::str::FromStr>(s: &str) -> Result<T, ParseError> {
    s.parse().map_err(|_| ParseError::BadNumber(s.to_string()))
}

pub fn parse_line(line: &str) -> Result<UiCommand, ParseError> {
    let mut args = line.split_whitespace();
    let Some(command) = args.next() else {
        return Err(ParseError::Empty);
    };

    let parsed = match command {
        "hover_enter" => UiCommand::HoverEnter,
        "hover_leave" => match args.next() {
            None | Some("normal") => UiCommand::HoverLeave(CrossingDetail::Normal),
            Some("inferior") => UiCommand::HoverLeave(CrossingDetail::Inferior),
            Some(other) => return Err(ParseError::Unexpected(other.to_string())),
        },
        "drag_begin" => UiCommand::DragBegin(number(arg(&mut args, "drag_begin")?)?),
        "drop" => UiCommand::Drop {
            source: number(arg(&mut args, "drop")?)?,
            target: number(arg(&mut args, "drop")?)?,
        },
        "drag_end" => {
            let slot = number(arg(&mut args, "drag_end")?)?;
            let place = match arg(&mut args, "drag_end")? {
                "inside" => DropPlace::Inside,
                "outside" => DropPlace::Outside,
                x => DropPlace::At(number(x)?, number(arg(&mut args, "drag_end")?)?),
            };
            UiCommand::DragEnd { slot, place }
        }
        "activate" => UiCommand::Activate(number(arg(&mut args, "activate")?)?),
        "notify" => UiCommand::Notify,
        "reconcile" => UiCommand::Reconcile,
        other => return Err(ParseError::Unknown(other.to_string())),
    };

    match args.next() {
        Some(extra) => Err(ParseError::Unexpected(extra.to_string())),
        None => Ok(parsed),
    }
}
