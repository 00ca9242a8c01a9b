#[cfg(test)]
mod tests {
    use crate::config::*;
    use crate::error::*;
    use crate::event::*;
    use crate::flags::*;
    use crate::session::*;
    use crate::workout::*;

    // ─── Session Tests ───────────────────────────────────────

    #[test]
    fn test_session_new() {
        let session = Session::new(1_000);
        assert!(!session.id.is_empty());
        assert_eq!(session.started_at, 1_000);
        assert_eq!(session.last_active_at, 1_000);
        assert!(session.transcript.is_empty());
    }

    #[test]
    fn test_session_ids_are_unique() {
        let a = Session::new(0);
        let b = Session::new(0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_session_appended_is_pure() {
        let session = Session::with_id("s1".to_string(), 1_000);
        let next = session.appended(EntryKind::input("help"), 2_000);

        assert!(session.transcript.is_empty());
        assert_eq!(session.last_active_at, 1_000);

        assert_eq!(next.transcript.len(), 1);
        assert_eq!(next.transcript[0].ts, 2_000);
        assert_eq!(next.last_active_at, 2_000);
        assert_eq!(next.started_at, 1_000);
        assert_eq!(next.id, "s1");
    }

    #[test]
    fn test_session_appended_never_moves_backwards() {
        let session = Session::with_id("s1".to_string(), 5_000);
        let next = session.appended(EntryKind::output("x"), 4_000);
        assert_eq!(next.last_active_at, 5_000);
        assert!(next.last_active_at >= next.started_at);
    }

    #[test]
    fn test_session_latest_config() {
        let session = Session::with_id("s1".to_string(), 0)
            .appended(EntryKind::config_created("ramp-1"), 1)
            .appended(EntryKind::output("ok"), 2)
            .appended(EntryKind::config_created("stair-2"), 3)
            .appended(EntryKind::output("ok"), 4);
        assert_eq!(session.latest_config(), Some("stair-2"));
        assert_eq!(session.configs_created(), 2);
    }

    #[test]
    fn test_session_serialization_layout() {
        let session = Session::with_id("s1".to_string(), 10)
            .appended(EntryKind::input("help"), 11);
        let json = serde_json::to_value(&session).unwrap();

        assert_eq!(json["id"], "s1");
        assert_eq!(json["startedAt"], 10);
        assert_eq!(json["lastActiveAt"], 11);
        assert_eq!(json["transcript"][0]["type"], "input");
        assert_eq!(json["transcript"][0]["text"], "help");
        assert_eq!(json["transcript"][0]["ts"], 11);
    }

    #[test]
    fn test_config_created_entry_layout() {
        let entry = SessionEntry {
            kind: EntryKind::config_created("ramp-1"),
            ts: 7,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains(r#""type":"config-created""#));
        assert!(json.contains(r#""configId":"ramp-1""#));

        let back: SessionEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_session_deserializes_stored_record() {
        let raw = r#"{
            "id": "abc",
            "startedAt": 100,
            "lastActiveAt": 200,
            "transcript": [
                {"type": "input", "text": "workout start", "ts": 150},
                {"type": "output", "text": "Workout started.", "ts": 151},
                {"type": "system", "text": "[Session restored]", "ts": 200}
            ]
        }"#;
        let session: Session = serde_json::from_str(raw).unwrap();
        assert_eq!(session.transcript.len(), 3);
        assert_eq!(session.transcript[0].kind, EntryKind::input("workout start"));
        assert_eq!(session.transcript[1].kind, EntryKind::output("Workout started."));
        assert!(matches!(session.transcript[2].kind, EntryKind::System { .. }));
    }

    #[test]
    fn test_echoed_input_and_clear_marker_layout() {
        let session = Session::with_id("s1".to_string(), 10)
            .appended(EntryKind::echoed("(workout) > ", "workout status"), 11)
            .appended(EntryKind::Cleared, 12);
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["transcript"][0]["marker"], "(workout) > ");
        assert_eq!(json["transcript"][1]["type"], "cleared");
        assert_eq!(json["transcript"][1]["ts"], 12);

        let back: Session = serde_json::from_value(json).unwrap();
        assert_eq!(back, session);
    }

    #[test]
    fn test_input_without_marker_omits_field() {
        let entry = SessionEntry {
            kind: EntryKind::input("help"),
            ts: 1,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("marker"));
    }

    #[test]
    fn test_unknown_entry_type_is_rejected() {
        let raw = r#"{"type": "bogus", "text": "x", "ts": 1}"#;
        assert!(serde_json::from_str::<SessionEntry>(raw).is_err());
    }

    // ─── Flag Tests ──────────────────────────────────────────

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("100"), Ok(FlagValue::Number(100.0)));
        assert_eq!(parse_number("62.5"), Ok(FlagValue::Number(62.5)));
        assert!(parse_number("abc").is_err());
        assert!(parse_number("NaN").is_err());
        assert!(parse_number("-5").is_err());
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("3"), Ok(FlagValue::Integer(3)));
        assert!(parse_count("3.5").is_err());
        assert!(parse_count("").is_err());
        assert_eq!(parse_count("4294967295"), Ok(FlagValue::Integer(MAX_COUNT)));
        assert_eq!(
            parse_count("4294967296"),
            Err("expected a whole number up to 4294967295".to_string())
        );
    }

    #[test]
    fn test_flag_value_accessors() {
        assert_eq!(FlagValue::Integer(4).as_f64(), Some(4.0));
        assert_eq!(FlagValue::Number(4.5).as_u64(), None);
        assert_eq!(FlagValue::Integer(4).as_u64(), Some(4));
    }

    #[test]
    fn test_flag_error_display() {
        let err = FlagError::MissingValue { flag: "-w".to_string() };
        assert_eq!(err.to_string(), "Missing value for -w");

        let err = FlagError::MissingRequired { short: "-w", long: "--weight" };
        assert_eq!(err.to_string(), "Missing required flag: -w --weight");

        let err = FlagError::InvalidValue {
            flag: "-s".to_string(),
            value: "x".to_string(),
            reason: "expected a whole number".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid value for -s: x (expected a whole number)");
    }

    // ─── Workout Tests ───────────────────────────────────────

    fn set(exercise: &str, weight: f64, sets: u64, reps: u64) -> WorkoutSet {
        WorkoutSet {
            exercise: exercise.to_string(),
            weight,
            sets,
            reps,
            timestamp: 0,
        }
    }

    #[test]
    fn test_workout_summary_totals() {
        let sets = vec![
            set("squat", 100.0, 3, 5),
            set("bench", 60.0, 2, 8),
            set("squat", 110.0, 1, 3),
        ];
        let summary = WorkoutSummary::from_sets(&sets, 60_000);

        assert_eq!(summary.duration_ms, 60_000);
        assert_eq!(summary.total_sets, 6);
        assert_eq!(summary.total_reps, 15 + 16 + 3);
        assert_eq!(summary.total_volume, 1500.0 + 960.0 + 330.0);

        assert_eq!(summary.exercises.len(), 2);
        assert_eq!(summary.exercises[0].exercise, "squat");
        assert_eq!(summary.exercises[0].sets, 4);
        assert_eq!(summary.exercises[0].reps, 18);
        assert_eq!(summary.exercises[0].volume, 1830.0);
        assert_eq!(summary.exercises[1].exercise, "bench");
    }

    #[test]
    fn test_workout_summary_empty() {
        let summary = WorkoutSummary::from_sets(&[], 5_000);
        assert_eq!(summary.total_sets, 0);
        assert!(summary.exercises.is_empty());
        assert_eq!(
            summary.lines(),
            vec!["Workout complete. Duration: 0m 5s", "No exercises recorded."]
        );
    }

    #[test]
    fn test_workout_summary_lines() {
        let summary = WorkoutSummary::from_sets(&[set("squat", 100.0, 3, 5)], 192_000);
        let lines = summary.lines();
        assert_eq!(lines[0], "Workout complete. Duration: 3m 12s");
        assert_eq!(lines[1], "Totals: 3 sets, 15 reps, 1500 volume");
        assert_eq!(lines[2], "  squat: 3 sets, 15 reps, 1500 volume");
    }

    #[test]
    fn test_workout_summary_saturates_instead_of_overflowing() {
        let sets = vec![
            set("squat", 1.0, u64::MAX, 2),
            set("squat", 1.0, MAX_COUNT, MAX_COUNT),
        ];
        let summary = WorkoutSummary::from_sets(&sets, 0);
        assert_eq!(summary.total_sets, u64::MAX);
        assert_eq!(summary.total_reps, u64::MAX);
        assert_eq!(summary.exercises[0].reps, u64::MAX);
        assert!(summary.total_volume.is_finite());
        assert_eq!(summary.lines().len(), 3);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0m 0s");
        assert_eq!(format_duration(999), "0m 0s");
        assert_eq!(format_duration(61_000), "1m 1s");
        assert_eq!(format_duration(-10), "0m 0s");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(62.5), "62.5");
    }

    // ─── Event Tests ─────────────────────────────────────────

    #[test]
    fn test_engine_event_serialization() {
        let event = EngineEvent::Tick { elapsed_ms: 3_000 };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"Tick""#));
        assert!(json.contains("3000"));

        let back: EngineEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.history_max_entries, 50);
        assert_eq!(config.session_timeout_ms, 1_800_000);
        assert_eq!(config.tick_interval_ms, 1000);
        assert_eq!(config.storage.backend, StorageBackendType::Auto);
        assert_eq!(config.storage.history_key, "terminal:history");
        assert_eq!(config.storage.session_key, "terminal:session");
        assert_eq!(config.banner[0], "Homelab Fitness Terminal");
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"history_max_entries": 10}"#).unwrap();
        assert_eq!(config.history_max_entries, 10);
        assert_eq!(config.tick_interval_ms, 1000);
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_storage_backend_labels() {
        assert_eq!(StorageBackendType::Memory.label(), "Memory");
        assert_eq!(StorageBackendType::LocalStorage.label(), "localStorage");
    }

    // ─── Error Tests ─────────────────────────────────────────

    #[test]
    fn test_error_display() {
        let err = TermError::Storage("quota exceeded".to_string());
        assert_eq!(err.to_string(), "Storage error: quota exceeded");

        let err = TermError::Config("bad".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad");
    }

    #[test]
    fn test_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{{invalid}}").unwrap_err();
        let err: TermError = serde_err.into();
        assert!(matches!(err, TermError::Serialization(_)));
    }

    #[test]
    fn test_command_error_is_transparent_for_flags() {
        let err: CommandError = FlagError::MissingValue { flag: "-r".to_string() }.into();
        assert_eq!(err.to_string(), "Missing value for -r");

        let err = CommandError::Invalid("Exercise name is required.".to_string());
        assert_eq!(err.to_string(), "Exercise name is required.");
    }
}
