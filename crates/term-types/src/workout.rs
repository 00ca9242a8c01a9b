use serde::{Deserialize, Serialize};

/// A recorded block of sets for one exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    pub exercise: String,
    pub weight: f64,
    pub sets: u64,
    pub reps: u64,
    pub timestamp: i64,
}

/// Input to `add`, before the timestamp is known
#[derive(Debug, Clone, PartialEq)]
pub struct AddSetInput {
    pub exercise: String,
    pub weight: f64,
    pub sets: u64,
    pub reps: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSummary {
    pub exercise: String,
    pub sets: u64,
    pub reps: u64,
    pub volume: f64,
}

/// Aggregate returned when a workout ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSummary {
    pub duration_ms: i64,
    pub total_sets: u64,
    pub total_reps: u64,
    pub total_volume: f64,
    /// Grouped by exercise, in the order each exercise was first added
    pub exercises: Vec<ExerciseSummary>,
}

impl WorkoutSummary {
    pub fn from_sets(sets: &[WorkoutSet], duration_ms: i64) -> Self {
        let mut exercises: Vec<ExerciseSummary> = Vec::new();
        let (mut total_sets, mut total_reps, mut total_volume) = (0u64, 0u64, 0.0);

        for entry in sets {
            // Sets that were stored unchecked must not overflow the totals.
            let reps = entry.sets.saturating_mul(entry.reps);
            let volume = reps as f64 * entry.weight;

            total_sets = total_sets.saturating_add(entry.sets);
            total_reps = total_reps.saturating_add(reps);
            total_volume += volume;

            match exercises.iter_mut().find(|e| e.exercise == entry.exercise) {
                Some(existing) => {
                    existing.sets = existing.sets.saturating_add(entry.sets);
                    existing.reps = existing.reps.saturating_add(reps);
                    existing.volume += volume;
                }
                None => exercises.push(ExerciseSummary {
                    exercise: entry.exercise.clone(),
                    sets: entry.sets,
                    reps,
                    volume,
                }),
            }
        }

        Self {
            duration_ms,
            total_sets,
            total_reps,
            total_volume,
            exercises,
        }
    }

    /// Human-readable lines, duration first.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "Workout complete. Duration: {}",
            format_duration(self.duration_ms)
        )];
        if self.exercises.is_empty() {
            lines.push("No exercises recorded.".to_string());
            return lines;
        }
        lines.push(format!(
            "Totals: {} sets, {} reps, {} volume",
            self.total_sets,
            self.total_reps,
            format_number(self.total_volume)
        ));
        for e in &self.exercises {
            lines.push(format!(
                "  {}: {} sets, {} reps, {} volume",
                e.exercise,
                e.sets,
                e.reps,
                format_number(e.volume)
            ));
        }
        lines
    }
}

/// `192_000` → `"3m 12s"`. Negative durations render as zero.
pub fn format_duration(ms: i64) -> String {
    let total_seconds = ms.max(0) / 1000;
    format!("{}m {}s", total_seconds / 60, total_seconds % 60)
}

/// Drop the fractional part when it is zero: `100.0` → `"100"`, `62.5` → `"62.5"`.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
