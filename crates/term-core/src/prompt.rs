//! Multi-turn prompts that temporarily own input routing.
//!
//! While a prompt is active the line engine hands every submitted line to
//! [`Prompt::handle_input`] instead of the router, until the prompt reports
//! `done`. New flows are new implementations of the trait, registered on
//! the engine under a trigger command.

/// Outcome of one prompt turn.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PromptResult {
    pub done: bool,
    pub output: Vec<String>,
    /// Identifier of an entity the prompt created, surfaced as a domain event
    pub created_id: Option<String>,
}

impl PromptResult {
    pub fn pending(output: Vec<String>) -> Self {
        Self {
            done: false,
            output,
            created_id: None,
        }
    }

    pub fn finished(output: Vec<String>, created_id: Option<String>) -> Self {
        Self {
            done: true,
            output,
            created_id,
        }
    }
}

pub trait Prompt {
    /// Opening lines (question or menu). Consumes no input.
    fn start(&mut self) -> Vec<String>;

    fn handle_input(&mut self, input: &str) -> PromptResult;
}

/// Builds a prompt; receives how many entities the session has created so far.
pub type PromptFactory = Box<dyn Fn(usize) -> Box<dyn Prompt>>;

// ─── Create configuration ────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationType {
    Ramp,
    Stair,
    Platform,
    Handrail,
    Fortress,
}

impl ConfigurationType {
    pub fn all() -> &'static [ConfigurationType] {
        &[
            ConfigurationType::Ramp,
            ConfigurationType::Stair,
            ConfigurationType::Platform,
            ConfigurationType::Handrail,
            ConfigurationType::Fortress,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfigurationType::Ramp => "ramp",
            ConfigurationType::Stair => "stair",
            ConfigurationType::Platform => "platform",
            ConfigurationType::Handrail => "handrail",
            ConfigurationType::Fortress => "fortress",
        }
    }

    /// Case-insensitive lookup by label.
    pub fn parse(input: &str) -> Option<Self> {
        let wanted = input.trim().to_lowercase();
        Self::all().iter().copied().find(|t| t.label() == wanted)
    }
}

/// Asks for the type of a new configuration and creates it.
#[derive(Debug, Clone)]
pub struct CreateConfigPrompt {
    sequence: usize,
}

impl CreateConfigPrompt {
    /// `created_so_far` numbers the new id, so the first one is `<type>-1`.
    pub fn new(created_so_far: usize) -> Self {
        Self {
            sequence: created_so_far + 1,
        }
    }

    pub fn factory() -> PromptFactory {
        Box::new(|created| Box::new(CreateConfigPrompt::new(created)))
    }

    fn choices() -> impl Iterator<Item = String> {
        ConfigurationType::all()
            .iter()
            .map(|t| format!("  {}", t.label()))
    }
}

impl Prompt for CreateConfigPrompt {
    fn start(&mut self) -> Vec<String> {
        let mut lines = vec![
            "Creating new configuration".to_string(),
            String::new(),
            "What type of configuration is this?".to_string(),
        ];
        lines.extend(Self::choices());
        lines.push(String::new());
        lines
    }

    fn handle_input(&mut self, input: &str) -> PromptResult {
        let Some(kind) = ConfigurationType::parse(input) else {
            let mut lines = vec![
                format!("Invalid type: {}", input),
                "Please choose one of:".to_string(),
            ];
            lines.extend(Self::choices());
            lines.push(String::new());
            return PromptResult::pending(lines);
        };

        let config_id = format!("{}-{}", kind.label(), self.sequence);
        PromptResult::finished(
            vec![
                format!("✓ Configuration type set to: {}", kind.label()),
                format!("✓ Configuration created: {}", config_id),
                String::new(),
            ],
            Some(config_id),
        )
    }
}
