use std::path::PathBuf;

/// A line entered in the shell.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `:e [path]` - without a path the file picker is shown
    Open(Option<PathBuf>),
    /// `:w`
    Save,
    /// `:saveas [path]`
    SaveAs(Option<PathBuf>),
    /// `:goto <offset>`
    Goto(usize),
    /// `:p`
    Print,
    /// `:q`
    Quit,
    /// Any line not starting with `:` is appended to the buffer
    Append(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("Invalid offset: {0}")]
    InvalidOffset(String),
    #[error("Missing argument for :{0}")]
    MissingArgument(&'static str),
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let Some(command_line) = line.strip_prefix(':') else {
            return Ok(Command::Append(line.to_string()));
        };

        let trimmed = command_line.trim();
        let (name, arg) = match trimmed.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, Some(arg.trim()).filter(|a| !a.is_empty())),
            None => (trimmed, None),
        };

        match name {
            "e" | "edit" | "open" => Ok(Command::Open(arg.map(PathBuf::from))),
            "w" | "write" => Ok(Command::Save),
            "saveas" | "sav" => Ok(Command::SaveAs(arg.map(PathBuf::from))),
            "goto" | "go" => {
                let arg = arg.ok_or(CommandError::MissingArgument("goto"))?;
                arg.parse()
                    .map(Command::Goto)
                    .map_err(|_| CommandError::InvalidOffset(arg.to_string()))
            }
            "p" | "print" => Ok(Command::Print),
            "q" | "quit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
