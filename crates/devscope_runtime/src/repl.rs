//! The interactive trace browser.

use std::str::FromStr;

use devscope_view::SelectionChange;
use thiserror::Error;
use tracing::debug;

use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::format::{HumanFormatter, JsonFormatter, ViewFormatter};
use crate::session::Session;

/// Command words, in completion order.
pub const COMMANDS: &[&str] = &[
    "models",
    "model",
    "attributes",
    "attribute",
    "first",
    "prev",
    "next",
    "last",
    "time",
    "window",
    "view",
    "json",
    "detail",
    "help",
    "quit",
];

const HELP: &str = "\
Commands:
  models               list the model tree (* marks selectable models)
  attributes           list the attribute tree of the selected model
  model <name>         select a model (resets the attribute)
  attribute <path>     select an attribute of the selected model
  first | <<           move the cursor to time 0
  prev  | <            move to the previous event time
  next  | >            move to the next event time
  last  | >>           move to the last event time
  time <t>             move the cursor to time t
  window <w>           set the window width
  view                 show the current view
  json                 show the current view as JSON
  detail               show the events at the cursor
  help                 show this help
  quit                 leave
";

// =============================================================================
// Commands
// =============================================================================

/// One parsed REPL command.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// List the model tree.
    Models,
    /// List the attribute tree of the selected model.
    Attributes,
    /// Select a model.
    Model(String),
    /// Select an attribute.
    Attribute(String),
    /// Cursor to the origin.
    First,
    /// Cursor to the previous event.
    Prev,
    /// Cursor to the next event.
    Next,
    /// Cursor to the last event.
    Last,
    /// Cursor to an arbitrary time.
    Time(f64),
    /// Set the window width.
    Window(f64),
    /// Show the view.
    View,
    /// Show the view as JSON.
    Json,
    /// Show the transition detail.
    Detail,
    /// Show help.
    Help,
    /// Leave the REPL.
    Quit,
}

/// Errors from parsing or running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The first word is not a command.
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    /// A command that needs an argument got none.
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    /// A numeric argument did not parse.
    #[error("'{command}' expects a number, got '{text}'")]
    InvalidNumber {
        /// The command.
        command: &'static str,
        /// The offending argument.
        text: String,
    },

    /// A session operation failed.
    #[error(transparent)]
    Session(#[from] devscope_foundation::Error),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let argument = |command: &'static str| -> Result<String, CommandError> {
            if rest.is_empty() {
                Err(CommandError::MissingArgument(command))
            } else {
                Ok(rest.to_string())
            }
        };
        let number = |command: &'static str| -> Result<f64, CommandError> {
            let text = argument(command)?;
            text.parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or(CommandError::InvalidNumber { command, text })
        };

        Ok(match word {
            "models" => Self::Models,
            "attributes" | "attrs" => Self::Attributes,
            "model" => Self::Model(argument("model")?),
            "attribute" | "attr" => Self::Attribute(argument("attribute")?),
            "first" | "<<" => Self::First,
            "prev" | "<" => Self::Prev,
            "next" | ">" => Self::Next,
            "last" | ">>" => Self::Last,
            "time" => Self::Time(number("time")?),
            "window" => Self::Window(number("window")?),
            "view" => Self::View,
            "json" => Self::Json,
            "detail" => Self::Detail,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        })
    }
}

/// What the REPL should do after a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Print this text and continue.
    Output(String),
    /// Leave the loop.
    Quit,
}

// =============================================================================
// REPL
// =============================================================================

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Trace and browsing state.
    session: Session,

    /// Formatter for `view` and navigation output.
    human: HumanFormatter,

    /// Formatter for `json`.
    json: JsonFormatter,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(session: Session) -> devscope_foundation::Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor, session))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor.
    pub fn with_editor(mut editor: E, session: Session) -> Self {
        editor.set_names(session.completion_words());
        Self {
            editor,
            session,
            human: HumanFormatter::new(),
            json: JsonFormatter::new().pretty(),
            show_banner: true,
            prompt: "devscope> ".to_string(),
        }
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Runs the REPL loop until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails.
    pub fn run(&mut self) -> devscope_foundation::Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        loop {
            let line = match self.editor.read_line(&self.prompt)? {
                ReadResult::Line(line) => line,
                ReadResult::Interrupted => continue,
                ReadResult::Eof => break,
            };
            if line.trim().is_empty() {
                continue;
            }
            self.editor.add_history(&line);

            match self.eval(&line) {
                Ok(Reply::Output(text)) => print!("{text}"),
                Ok(Reply::Quit) => break,
                Err(e) => eprintln!("\x1b[31mError: {e}\x1b[0m"),
            }
        }
        Ok(())
    }

    /// Parses and executes one command line.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown commands, bad arguments, or a failed
    /// formatter.
    pub fn eval(&mut self, line: &str) -> Result<Reply, CommandError> {
        let command: Command = line.parse()?;
        debug!(?command, "executing");
        self.execute(command)
    }

    /// Executes one command.
    ///
    /// # Errors
    ///
    /// Returns an error if formatting the output fails.
    pub fn execute(&mut self, command: Command) -> Result<Reply, CommandError> {
        let text = match command {
            Command::Quit => return Ok(Reply::Quit),
            Command::Help => HELP.to_string(),
            Command::Models => self.session.models().render(),
            Command::Attributes => match self.session.attributes() {
                Some(paths) => paths.render(),
                None => "select a model first\n".to_string(),
            },
            Command::Model(name) => {
                let text = match self.session.select_model(&name) {
                    SelectionChange::Model => format!(
                        "model {name}\n{}",
                        self.session.attributes().map(|p| p.render()).unwrap_or_default()
                    ),
                    _ => format!("'{name}' is not a selectable model; selection cleared\n"),
                };
                self.editor.set_names(self.session.completion_words());
                text
            }
            Command::Attribute(path) => match self.session.select_attribute(&path) {
                SelectionChange::Attribute => self.render_view()?,
                _ if self.session.selection().model().is_none() => {
                    "select a model first\n".to_string()
                }
                _ => format!("'{path}' is not a selectable attribute\n"),
            },
            Command::First => self.moved(Session::first)?,
            Command::Prev => self.moved(Session::prev)?,
            Command::Next => self.moved(Session::next)?,
            Command::Last => self.moved(Session::last)?,
            Command::Time(t) => {
                self.session.set_time(t);
                self.render_view()?
            }
            Command::Window(w) => {
                self.session.set_window(w);
                self.render_view()?
            }
            Command::View => self.render_view()?,
            Command::Json => self.json.format_outcome(&self.session.view())?,
            Command::Detail => match self.session.detail() {
                Some(detail) => self.human.format_detail(&detail)?,
                None => "nothing selected\n".to_string(),
            },
        };
        Ok(Reply::Output(text))
    }

    fn moved(&mut self, step: fn(&mut Session) -> f64) -> Result<String, CommandError> {
        if !self.session.selection().is_active() {
            return Ok("nothing selected\n".to_string());
        }
        step(&mut self.session);
        self.render_view()
    }

    fn render_view(&self) -> Result<String, CommandError> {
        Ok(self.human.format_outcome(&self.session.view())?)
    }

    fn print_banner(&self) {
        let store = self.session.store();
        println!("devscope {}", env!("CARGO_PKG_VERSION"));
        if let Some(source) = self.session.source() {
            println!("trace: {}", source.display());
        }
        println!(
            "{} events across {} models. Type 'help' for commands.",
            store.len(),
            store.models_present().len()
        );
    }
}
