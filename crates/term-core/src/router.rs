//! Command router: normalizes single-shot commands and dispatches them to
//! host-registered handlers.
//!
//! Handlers never fail across this boundary: an `Err` from a handler is
//! rendered as one output line. A handler that fails must leave the
//! context untouched.

use std::collections::HashMap;
use term_types::CommandError;

/// Host-owned domain state. The engine borrows it for one call at a time.
pub trait CommandContext {
    /// Start time (ms) of the timed activity in progress, if any.
    fn active_since(&self) -> Option<i64> {
        None
    }

    /// Name of the timed activity, shown in the prompt marker.
    fn activity_label(&self) -> &str {
        "activity"
    }
}

/// What a command printed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CommandOutput {
    #[default]
    None,
    Line(String),
    Lines(Vec<String>),
}

impl CommandOutput {
    pub fn into_lines(self) -> Vec<String> {
        match self {
            CommandOutput::None => Vec::new(),
            CommandOutput::Line(line) => vec![line],
            CommandOutput::Lines(lines) => lines,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, CommandOutput::None)
    }
}

impl From<String> for CommandOutput {
    fn from(line: String) -> Self {
        CommandOutput::Line(line)
    }
}

impl From<&str> for CommandOutput {
    fn from(line: &str) -> Self {
        CommandOutput::Line(line.to_string())
    }
}

impl From<Vec<String>> for CommandOutput {
    fn from(lines: Vec<String>) -> Self {
        CommandOutput::Lines(lines)
    }
}

pub type CommandResult = Result<CommandOutput, CommandError>;

/// Receives the normalized (trimmed, lower-cased) argument string.
pub type CommandHandler<C> = Box<dyn Fn(&str, &mut C) -> CommandResult>;

struct Route<C> {
    usage: Vec<String>,
    handler: CommandHandler<C>,
}

const HELP_VERB: &str = "help";
const CLEAR_VERB: &str = "clear";

/// Verb table plus the built-in `help` and `clear`.
pub struct CommandRouter<C> {
    routes: HashMap<String, Route<C>>,
    /// Help blocks in registration order
    help: Vec<Vec<String>>,
}

impl<C> CommandRouter<C> {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            help: Vec::new(),
        }
    }

    /// Register `verb`. `usage` is printed by `help`. Re-registering a verb
    /// replaces its handler; the built-in verbs cannot be overridden.
    pub fn register<F>(&mut self, verb: &str, usage: &[&str], handler: F)
    where
        F: Fn(&str, &mut C) -> CommandResult + 'static,
    {
        let verb = verb.trim().to_lowercase();
        if verb == HELP_VERB || verb == CLEAR_VERB || verb.is_empty() {
            log::warn!("Refusing to register reserved verb '{}'", verb);
            return;
        }
        let usage: Vec<String> = usage.iter().map(|l| l.to_string()).collect();
        if let Some(previous) = self.routes.get(&verb) {
            self.help.retain(|block| *block != previous.usage);
        }
        self.help.push(usage.clone());
        self.routes.insert(
            verb,
            Route {
                usage,
                handler: Box::new(handler),
            },
        );
    }

    /// Add a help block for input that is not routed here, such as a
    /// prompt trigger.
    pub fn add_help(&mut self, lines: &[&str]) {
        self.help.push(lines.iter().map(|l| l.to_string()).collect());
    }

    /// Dispatch one command line.
    ///
    /// `on_clear` is the host's display reset, invoked by `clear`, which
    /// itself prints nothing.
    pub fn route(&self, raw: &str, ctx: &mut C, on_clear: &mut dyn FnMut()) -> CommandOutput {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return CommandOutput::None;
        }

        let (verb, args) = match normalized.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (normalized.as_str(), ""),
        };
        log::debug!("route verb='{}' args='{}'", verb, args);

        match verb {
            HELP_VERB => self.help_lines().into(),
            CLEAR_VERB => {
                on_clear();
                CommandOutput::None
            }
            _ => match self.routes.get(verb) {
                Some(route) => (route.handler)(args, ctx).unwrap_or_else(|e| {
                    log::debug!("'{}' rejected: {}", verb, e);
                    CommandOutput::Line(e.to_string())
                }),
                None => CommandOutput::Line(format!("Unknown command: {}", raw)),
            },
        }
    }

    fn help_lines(&self) -> Vec<String> {
        let mut lines = vec!["Available commands:".to_string(), String::new()];
        for block in &self.help {
            lines.extend(block.iter().cloned());
            lines.push(String::new());
        }
        lines.push("Terminal:".to_string());
        lines.push(format!("  {}", HELP_VERB));
        lines.push(format!("  {}", CLEAR_VERB));
        lines.push(String::new());
        lines
    }
}

impl<C> Default for CommandRouter<C> {
    fn default() -> Self {
        Self::new()
    }
}
