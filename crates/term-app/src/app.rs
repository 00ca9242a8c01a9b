//! JavaScript-facing terminal: owns the line engine and the workout state.

use std::rc::Rc;

use wasm_bindgen::prelude::*;

use term_core::engine::{EnginePorts, Keystroke, LineEngine};
use term_core::event_bus::EventBus;
use term_core::ports::{Clock, StoragePort};
use term_core::prompt::CreateConfigPrompt;
use term_core::router::CommandRouter;
use term_core::workout::{register_workout_commands, WorkoutSession};
use term_platform::storage::auto_detect_storage;
use term_platform::{IntervalTicker, SystemClock};
use term_types::config::{EngineConfig, StorageBackendType, StorageConfig};
use term_types::TermError;

const CONFIG_STORAGE_KEY: &str = "terminal:config";
const NEW_CONFIG_TRIGGER: &str = "new config";

/// Handle held by the renderer. Every method runs synchronously on the
/// main thread; the renderer re-reads `lines`, `input` and `prompt` after
/// each call and drains events on its own schedule.
#[wasm_bindgen]
pub struct WebTerminal {
    engine: LineEngine<WorkoutSession>,
    workout: WorkoutSession,
    events: EventBus,
}

#[wasm_bindgen]
impl WebTerminal {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebTerminal {
        let detected = auto_detect_storage(&StorageConfig::default());
        let config = Self::restore_config(detected.as_ref());
        let storage = match config.storage.backend {
            StorageBackendType::Memory => auto_detect_storage(&config.storage),
            _ => detected,
        };
        Self::save_config(storage.as_ref(), &config);

        let clock: Rc<dyn Clock> = Rc::new(SystemClock);
        let ports = EnginePorts {
            storage,
            clock: clock.clone(),
            ticker: Rc::new(IntervalTicker),
        };

        let mut router = CommandRouter::new();
        register_workout_commands(&mut router);
        router.add_help(&["Configuration:", "  new config"]);

        let events = EventBus::new();
        let mut engine = LineEngine::start(config, ports, router, events.clone());
        engine.register_prompt(NEW_CONFIG_TRIGGER, CreateConfigPrompt::factory());

        log::info!("Terminal ready ({} lines)", engine.lines().len());
        WebTerminal {
            engine,
            workout: WorkoutSession::new(clock),
            events,
        }
    }

    /// Feed one key (a `KeyboardEvent.key` name). Returns false for keys
    /// the terminal ignores, so the renderer can let them through.
    pub fn key(&mut self, key: &str) -> bool {
        let keystroke = Keystroke::from_key(key);
        if keystroke == Keystroke::Ignored {
            return false;
        }
        self.engine.on_keystroke(keystroke, &mut self.workout);
        true
    }

    /// Replace the buffer without submitting, e.g. after a paste.
    pub fn set_input(&mut self, text: &str) {
        self.engine.set_input(text);
    }

    /// Replace the buffer with `line` and press Enter.
    pub fn submit(&mut self, line: &str) {
        self.engine.set_input(line);
        self.engine.on_submit(&mut self.workout);
    }

    pub fn clear(&mut self) {
        self.engine.clear();
    }

    /// Ask the renderer to focus the input widget.
    pub fn focus(&mut self) {
        self.engine.focus();
    }

    /// True once per `focus` call; the renderer polls this after each
    /// update and focuses its input widget when set.
    pub fn take_focus_request(&mut self) -> bool {
        self.engine.take_focus_request()
    }

    pub fn lines(&self) -> Vec<String> {
        self.engine.lines().to_vec()
    }

    pub fn input(&self) -> String {
        self.engine.input().to_string()
    }

    pub fn prompt(&self) -> String {
        self.engine.prompt_marker(&self.workout)
    }

    pub fn status_line(&self) -> Option<String> {
        self.engine.status_line(&self.workout)
    }

    /// Pending engine events as a JSON array.
    pub fn drain_events(&self) -> String {
        let events = self.events.drain();
        serde_json::to_string(&events).unwrap_or_else(|e| {
            log::error!("Failed to serialize events: {}", e);
            "[]".to_string()
        })
    }

    pub fn reset_session(&mut self) {
        self.engine.reset_session();
    }

    /// Stop the tick. Call before dropping the handle from JavaScript.
    pub fn dispose(&mut self) {
        self.engine.teardown();
        log::info!("Terminal disposed");
    }
}

impl Default for WebTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl WebTerminal {
    /// Read the stored config. Missing or malformed records fall back to
    /// defaults.
    fn restore_config(storage: &dyn StoragePort) -> EngineConfig {
        let restored = storage.get(CONFIG_STORAGE_KEY).and_then(|data| {
            data.map(|json| {
                serde_json::from_str::<EngineConfig>(&json)
                    .map_err(|e| TermError::Config(e.to_string()))
            })
            .transpose()
        });
        match restored {
            Ok(Some(config)) => {
                log::info!("Config restored from storage");
                config
            }
            Ok(None) => EngineConfig::default(),
            Err(e) => {
                log::warn!("{}, using defaults", e);
                EngineConfig::default()
            }
        }
    }

    fn save_config(storage: &dyn StoragePort, config: &EngineConfig) {
        let result = serde_json::to_string(config)
            .map_err(TermError::from)
            .and_then(|json| storage.set(CONFIG_STORAGE_KEY, &json));
        match result {
            Ok(()) => log::info!("Config saved to storage"),
            Err(e) => log::warn!("Failed to save config: {}", e),
        }
    }
}
