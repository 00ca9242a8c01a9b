//! Line engine: keystroke buffering, submission, echo, recall and
//! transcript recording.
//!
//! Each submitted line flows:
//! 1. echo with the current prompt marker
//! 2. push to the recall history
//! 3. record as an `input` transcript entry
//! 4. dispatch to the active prompt, a prompt trigger, or the router
//! 5. display and record every output line
//!
//! The engine borrows the host's [`CommandContext`] per call and never keeps
//! it. While the context reports a timed activity, a recurring tick
//! publishes [`EngineEvent::Tick`] on the event bus.

use std::rc::Rc;
use term_types::config::EngineConfig;
use term_types::event::EngineEvent;
use term_types::session::{EntryKind, Session, SessionEntry};
use term_types::workout::format_duration;
use crate::event_bus::EventBus;
use crate::history::{HistoryBuffer, HistoryStore};
use crate::ports::{Clock, StoragePort, TickHandle, Ticker};
use crate::prompt::{Prompt, PromptFactory};
use crate::router::{CommandContext, CommandRouter};
use crate::session_store::SessionStore;

pub const RESTORED_BANNER: &str = "[Session restored]";

/// A key as delivered by the input widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keystroke {
    Enter,
    Backspace,
    Up,
    Down,
    Char(char),
    Ignored,
}

impl Keystroke {
    /// Map a DOM `KeyboardEvent.key` name (or raw terminal data) to a keystroke.
    pub fn from_key(key: &str) -> Self {
        match key {
            "Enter" | "\r" | "\n" => Keystroke::Enter,
            "Backspace" | "\u{7f}" | "\u{8}" => Keystroke::Backspace,
            "ArrowUp" => Keystroke::Up,
            "ArrowDown" => Keystroke::Down,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_control() => Keystroke::Char(c),
                    _ => Keystroke::Ignored,
                }
            }
        }
    }
}

/// Platform services the engine runs on.
#[derive(Clone)]
pub struct EnginePorts {
    pub storage: Rc<dyn StoragePort>,
    pub clock: Rc<dyn Clock>,
    pub ticker: Rc<dyn Ticker>,
}

/// Rebuild the display for `transcript`.
///
/// Inputs are echoed under the marker recorded with them. Inputs without
/// one get the config marker in force at that point of the replay. A
/// `cleared` entry resets the display to `banner`, as it did live.
pub fn replay_transcript(transcript: &[SessionEntry], banner: &[String]) -> Vec<String> {
    let mut lines = banner.to_vec();
    let mut active_config: Option<&str> = None;

    for entry in transcript {
        match &entry.kind {
            EntryKind::Input { text, marker } => {
                let marker = match marker {
                    Some(marker) => marker.clone(),
                    None => marker_for(active_config, None),
                };
                lines.push(format!("{}{}", marker, text));
            }
            EntryKind::Output { text } | EntryKind::System { text } => lines.push(text.clone()),
            EntryKind::ConfigCreated { config_id } => active_config = Some(config_id.as_str()),
            EntryKind::Cleared => lines = banner.to_vec(),
        }
    }
    lines
}

fn marker_for(active_config: Option<&str>, activity: Option<&str>) -> String {
    match (active_config, activity) {
        (Some(config), _) => format!("[config: {}] > ", config),
        (None, Some(label)) => format!("({}) > ", label),
        (None, None) => "> ".to_string(),
    }
}

fn normalize_command(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub struct LineEngine<C> {
    config: EngineConfig,
    router: CommandRouter<C>,
    prompts: Vec<(String, PromptFactory)>,
    active_prompt: Option<Box<dyn Prompt>>,
    active_config: Option<String>,
    history_store: HistoryStore,
    history: HistoryBuffer,
    sessions: SessionStore,
    session: Session,
    lines: Vec<String>,
    input: String,
    focus_requested: bool,
    clock: Rc<dyn Clock>,
    ticker: Rc<dyn Ticker>,
    tick: Option<Box<dyn TickHandle>>,
    events: EventBus,
}

impl<C: CommandContext> LineEngine<C> {
    /// Build the engine and restore the stored session.
    ///
    /// A live session with a non-empty transcript is replayed into the
    /// display; otherwise the banner is shown and a fresh session is
    /// persisted right away.
    pub fn start(
        config: EngineConfig,
        ports: EnginePorts,
        router: CommandRouter<C>,
        events: EventBus,
    ) -> Self {
        let history_store = HistoryStore::new(
            ports.storage.clone(),
            config.storage.history_key.clone(),
            config.history_max_entries,
        );
        let sessions = SessionStore::new(
            ports.storage.clone(),
            ports.clock.clone(),
            config.storage.session_key.clone(),
            config.session_timeout_ms,
        );
        let history = HistoryBuffer::new(history_store.load());

        let (session, lines, active_config, restored) = match sessions.load() {
            Some(session) if !session.transcript.is_empty() => {
                let mut lines = vec![RESTORED_BANNER.to_string()];
                lines.extend(replay_transcript(&session.transcript, &config.banner));
                let active_config = session.latest_config().map(str::to_string);
                (session, lines, active_config, true)
            }
            _ => (sessions.create_new(), config.banner.clone(), None, false),
        };

        let mut engine = Self {
            router,
            prompts: Vec::new(),
            active_prompt: None,
            active_config,
            history_store,
            history,
            sessions,
            session,
            lines,
            input: String::new(),
            focus_requested: false,
            clock: ports.clock,
            ticker: ports.ticker,
            tick: None,
            events,
            config,
        };

        if restored {
            let entries = engine.session.transcript.len();
            engine.record(EntryKind::system(RESTORED_BANNER));
            log::info!("Restored session {} ({} entries)", engine.session.id, entries);
            engine.events.emit(EngineEvent::SessionRestored {
                id: engine.session.id.clone(),
                entries,
            });
        } else {
            engine.events.emit(EngineEvent::SessionStarted {
                id: engine.session.id.clone(),
            });
        }
        engine
    }

    /// Make `trigger` open a prompt built by `factory`. Triggers are matched
    /// case-insensitively before the router sees the line.
    pub fn register_prompt(&mut self, trigger: &str, factory: PromptFactory) {
        self.prompts.push((normalize_command(trigger), factory));
    }

    // ─── Input ───────────────────────────────────────────────

    pub fn on_keystroke(&mut self, key: Keystroke, ctx: &mut C) {
        match key {
            Keystroke::Enter => self.on_submit(ctx),
            Keystroke::Backspace => {
                self.input.pop();
            }
            Keystroke::Up => self.input = self.history.recall_previous(),
            Keystroke::Down => self.input = self.history.recall_next(),
            Keystroke::Char(c) => self.input.push(c),
            Keystroke::Ignored => {}
        }
    }

    /// Replace the whole buffer, e.g. with text pasted by the renderer.
    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
        self.history.reset_cursor();
    }

    /// Submit the current buffer. The buffer is empty afterwards whatever
    /// the outcome.
    pub fn on_submit(&mut self, ctx: &mut C) {
        let raw = std::mem::take(&mut self.input);
        let marker = self.prompt_marker(ctx);
        self.lines.push(format!("{}{}", marker, raw));

        let text = raw.trim();
        if text.is_empty() {
            self.history.reset_cursor();
            return;
        }

        self.history.replace(self.history_store.add(text));
        self.record(EntryKind::echoed(marker, text));

        let output = self.dispatch(text, ctx);
        for line in output {
            self.lines.push(line.clone());
            self.record(EntryKind::output(line));
        }

        self.sync_tick(ctx);
    }

    fn dispatch(&mut self, text: &str, ctx: &mut C) -> Vec<String> {
        if let Some(prompt) = self.active_prompt.as_mut() {
            let result = prompt.handle_input(text);
            if result.done {
                self.active_prompt = None;
            }
            if let Some(id) = result.created_id {
                self.record(EntryKind::config_created(id.clone()));
                self.active_config = Some(id.clone());
                log::info!("Created {}", id);
                self.events.emit(EngineEvent::ConfigCreated { id });
            }
            return result.output;
        }

        let normalized = normalize_command(text);
        if let Some((_, factory)) = self.prompts.iter().find(|(t, _)| *t == normalized) {
            let mut prompt = factory(self.session.configs_created());
            let lines = prompt.start();
            self.active_prompt = Some(prompt);
            return lines;
        }

        let mut cleared = false;
        let output = self.router.route(text, ctx, &mut || cleared = true);
        if cleared {
            self.clear();
        }
        output.into_lines()
    }

    fn record(&mut self, kind: EntryKind) {
        self.session = self.sessions.append(&self.session, kind);
    }

    // ─── Display ─────────────────────────────────────────────

    /// Reset the display to the banner. Earlier transcript entries are
    /// kept; a `cleared` entry marks the reset for replay.
    pub fn clear(&mut self) {
        self.lines = self.config.banner.clone();
        self.record(EntryKind::Cleared);
        self.events.emit(EngineEvent::Cleared);
    }

    /// Ask the renderer to focus the input widget.
    pub fn focus(&mut self) {
        self.focus_requested = true;
    }

    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    pub fn prompt_marker(&self, ctx: &C) -> String {
        let activity = ctx.active_since().map(|_| ctx.activity_label());
        marker_for(self.active_config.as_deref(), activity)
    }

    /// e.g. `WORKOUT ACTIVE - 3m 12s` while a timed activity runs.
    pub fn status_line(&self, ctx: &C) -> Option<String> {
        ctx.active_since().map(|since| {
            format!(
                "{} ACTIVE - {}",
                ctx.activity_label().to_uppercase(),
                format_duration(self.clock.now_ms() - since)
            )
        })
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn active_config(&self) -> Option<&str> {
        self.active_config.as_deref()
    }

    pub fn has_active_prompt(&self) -> bool {
        self.active_prompt.is_some()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ─── Session lifecycle ───────────────────────────────────

    /// Discard the stored transcript and start over with a fresh session.
    /// Recall history is kept.
    pub fn reset_session(&mut self) {
        self.sessions.clear();
        self.session = self.sessions.create_new();
        self.active_prompt = None;
        self.active_config = None;
        self.input.clear();
        self.lines = self.config.banner.clone();
        self.events.emit(EngineEvent::SessionStarted {
            id: self.session.id.clone(),
        });
    }

    // ─── Tick ────────────────────────────────────────────────

    /// Start or stop the elapsed-time tick to match the context.
    ///
    /// Called after every dispatch; hosts that change the context outside
    /// of a command call it themselves.
    pub fn sync_tick(&mut self, ctx: &C) {
        match (ctx.active_since(), self.tick.is_some()) {
            (Some(since), false) => self.start_tick(since),
            (None, true) => self.stop_tick(),
            _ => {}
        }
    }

    pub fn tick_active(&self) -> bool {
        self.tick.is_some()
    }

    fn start_tick(&mut self, since: i64) {
        let clock = self.clock.clone();
        let events = self.events.clone();
        let handle = self.ticker.every(
            self.config.tick_interval_ms,
            Box::new(move || {
                events.emit(EngineEvent::Tick {
                    elapsed_ms: clock.now_ms() - since,
                });
            }),
        );
        self.tick = Some(handle);
        log::debug!("Tick started ({}ms)", self.config.tick_interval_ms);
    }

    fn stop_tick(&mut self) {
        if let Some(handle) = self.tick.take() {
            handle.cancel();
            self.events.emit(EngineEvent::TickStopped);
            log::debug!("Tick stopped");
        }
    }

    /// Cancel the tick. The engine stays usable; the next dispatch restarts
    /// the tick if an activity is still running.
    pub fn teardown(&mut self) {
        self.stop_tick();
    }
}

impl<C> Drop for LineEngine<C> {
    fn drop(&mut self) {
        if let Some(handle) = self.tick.take() {
            handle.cancel();
        }
    }
}
