use thiserror::Error;

/// Everything that can move the session forward: user input plus the flash timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    PopBubble(usize),
    ResetBubbles,
    ToggleLight(usize),
    ToggleSwitch(usize),
    ClickColorButton(usize),
    /// Raw slider input; the store clamps it.
    SetSlider(i64),
    ToggleSound,
    /// Timer wakeup: expire any finished color-button flashes.
    Tick,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("{command} needs a numeric argument")]
    MissingArgument { command: &'static str },
    #[error("invalid number for {command}: {value}")]
    InvalidNumber { command: &'static str, value: String },
}

impl Event {
    pub fn label(&self) -> &'static str {
        match self {
            Event::PopBubble(_) => "pop",
            Event::ResetBubbles => "reset",
            Event::ToggleLight(_) => "light",
            Event::ToggleSwitch(_) => "switch",
            Event::ClickColorButton(_) => "color",
            Event::SetSlider(_) => "slider",
            Event::ToggleSound => "sound",
            Event::Tick => "tick",
        }
    }

    /// Parse one line of the command language: `pop 3`, `reset`, `light 2`,
    /// `switch 1`, `color 0`, `slider 75`, `sound`, `tick`.
    pub fn parse(line: &str) -> Result<Event, EventParseError> {
        let mut parts = line.split_whitespace();
        let Some(cmd) = parts.next() else {
            return Err(EventParseError::Empty);
        };
        let arg = parts.next();

        match cmd.to_ascii_lowercase().as_str() {
            "pop" => Ok(Event::PopBubble(parse_index("pop", arg)?)),
            "reset" => Ok(Event::ResetBubbles),
            "light" => Ok(Event::ToggleLight(parse_index("light", arg)?)),
            "switch" => Ok(Event::ToggleSwitch(parse_index("switch", arg)?)),
            "color" => Ok(Event::ClickColorButton(parse_index("color", arg)?)),
            "slider" => {
                let raw = arg.ok_or(EventParseError::MissingArgument { command: "slider" })?;
                let v = raw
                    .parse::<i64>()
                    .map_err(|_| EventParseError::InvalidNumber {
                        command: "slider",
                        value: raw.to_string(),
                    })?;
                Ok(Event::SetSlider(v))
            }
            "sound" => Ok(Event::ToggleSound),
            "tick" => Ok(Event::Tick),
            other => Err(EventParseError::UnknownCommand(other.to_string())),
        }
    }
}

fn parse_index(command: &'static str, arg: Option<&str>) -> Result<usize, EventParseError> {
    let raw = arg.ok_or(EventParseError::MissingArgument { command })?;
    raw.parse::<usize>()
        .map_err(|_| EventParseError::InvalidNumber {
            command,
            value: raw.to_string(),
        })
}
