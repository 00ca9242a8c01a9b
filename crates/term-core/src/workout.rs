//! Sample domain: workout tracking on top of the router.
//!
//! `workout start|status|end` drives the timed activity and
//! `add <exercise> -w <weight> -s <sets> -r <reps>` records sets while it
//! runs. Rejections are plain output lines and never change state.

use std::rc::Rc;
use term_types::flags::{parse_count, parse_number, FlagDefinition};
use term_types::workout::{format_duration, format_number, AddSetInput, WorkoutSet, WorkoutSummary};
use term_types::CommandError;
use crate::flags::parse_flags;
use crate::ports::Clock;
use crate::router::{CommandContext, CommandResult, CommandRouter};

pub const WORKOUT_FLAGS: &[FlagDefinition] = &[
    FlagDefinition {
        key: "weight",
        short: "-w",
        long: "--weight",
        required: true,
        parse: parse_number,
    },
    FlagDefinition {
        key: "sets",
        short: "-s",
        long: "--sets",
        required: true,
        parse: parse_count,
    },
    FlagDefinition {
        key: "reps",
        short: "-r",
        long: "--reps",
        required: true,
        parse: parse_count,
    },
];

/// Domain operations the workout commands need from the host context.
pub trait WorkoutLog: CommandContext {
    fn started_at(&self) -> Option<i64>;

    /// Milliseconds since the workout started, if one is running.
    fn elapsed_ms(&self) -> Option<i64>;

    fn start_workout(&mut self);

    /// Finish the running workout, returning its aggregate and resetting
    /// the accumulated sets.
    fn end_workout(&mut self) -> WorkoutSummary;

    fn add_set(&mut self, set: AddSetInput);
}

/// In-memory workout state owned by the host.
pub struct WorkoutSession {
    clock: Rc<dyn Clock>,
    started_at: Option<i64>,
    sets: Vec<WorkoutSet>,
}

impl WorkoutSession {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            started_at: None,
            sets: Vec::new(),
        }
    }

    pub fn sets(&self) -> &[WorkoutSet] {
        &self.sets
    }
}

impl CommandContext for WorkoutSession {
    fn active_since(&self) -> Option<i64> {
        self.started_at
    }

    fn activity_label(&self) -> &str {
        "workout"
    }
}

impl WorkoutLog for WorkoutSession {
    fn started_at(&self) -> Option<i64> {
        self.started_at
    }

    fn elapsed_ms(&self) -> Option<i64> {
        self.started_at.map(|start| self.clock.now_ms() - start)
    }

    fn start_workout(&mut self) {
        self.started_at = Some(self.clock.now_ms());
    }

    fn end_workout(&mut self) -> WorkoutSummary {
        let duration = self.elapsed_ms().unwrap_or(0);
        let sets = std::mem::take(&mut self.sets);
        self.started_at = None;
        WorkoutSummary::from_sets(&sets, duration)
    }

    fn add_set(&mut self, set: AddSetInput) {
        self.sets.push(WorkoutSet {
            exercise: set.exercise,
            weight: set.weight,
            sets: set.sets,
            reps: set.reps,
            timestamp: self.clock.now_ms(),
        });
    }
}

/// Register `workout` and `add` on `router`.
pub fn register_workout_commands<C: WorkoutLog + 'static>(router: &mut CommandRouter<C>) {
    router.register(
        "workout",
        &["Workout:", "  workout start", "  workout status", "  workout end"],
        handle_workout,
    );
    router.register(
        "add",
        &["Exercises:", "  add <exercise> -w <weight> -s <sets> -r <reps>"],
        handle_add,
    );
}

fn handle_workout<C: WorkoutLog>(args: &str, ctx: &mut C) -> CommandResult {
    match args {
        "" => Ok("Workout command required.".into()),
        "start" => {
            if ctx.started_at().is_some() {
                return Ok("Workout already in progress.".into());
            }
            ctx.start_workout();
            Ok("Workout started.".into())
        }
        "status" => Ok(match ctx.elapsed_ms() {
            Some(elapsed) => format!("Workout in progress. Elapsed: {}", format_duration(elapsed)).into(),
            None => "No workout in progress.".into(),
        }),
        "end" => {
            if ctx.started_at().is_none() {
                return Ok("No active workout.".into());
            }
            Ok(ctx.end_workout().lines().into())
        }
        other => Ok(format!("Unknown workout command: {}", other).into()),
    }
}

fn handle_add<C: WorkoutLog>(args: &str, ctx: &mut C) -> CommandResult {
    if ctx.started_at().is_none() {
        return Ok("Start a workout before adding exercises.".into());
    }

    let tokens: Vec<&str> = args.split_whitespace().collect();
    let exercise = match tokens.first() {
        Some(name) if !name.starts_with('-') => *name,
        _ => return Err(CommandError::Invalid("Exercise name is required.".to_string())),
    };

    let flags = parse_flags(&tokens[1..], WORKOUT_FLAGS)?;
    let (Some(weight), Some(sets), Some(reps)) =
        (flags.number("weight"), flags.count("sets"), flags.count("reps"))
    else {
        return Err(CommandError::Invalid("Invalid workout flags.".to_string()));
    };

    ctx.add_set(AddSetInput {
        exercise: exercise.to_string(),
        weight,
        sets,
        reps,
    });
    Ok(format!("Added {}: {}x{} @ {}", exercise, sets, reps, format_number(weight)).into())
}
