#[cfg(test)]
mod tests {
    use crate::commands::PlayerCommand;
    use crate::config::{HoldRange, LevelConfig};
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::events::SessionEvent;
    use crate::state::GameStateSnapshot;
    use crate::types::{FrogId, Position, WorldRect};

    // ---- Geometry ----

    #[test]
    fn test_rect_from_any_corners() {
        let rect = WorldRect::from_corners(Position::new(3.0, -1.0), Position::new(-2.0, 4.0));
        assert_eq!(rect.min, Position::new(-2.0, -1.0));
        assert_eq!(rect.max, Position::new(3.0, 4.0));
        assert!((rect.width() - 5.0).abs() < 1e-12);
        assert!(!rect.is_degenerate());
    }

    #[test]
    fn test_rect_degenerate_when_flat() {
        let click = WorldRect::from_corners(Position::new(1.0, 1.0), Position::new(1.0, 1.0));
        assert!(click.is_degenerate());
        let line = WorldRect::from_corners(Position::new(0.0, 1.0), Position::new(5.0, 1.0));
        assert!(line.is_degenerate());
    }

    #[test]
    fn test_rect_circle_overlap() {
        let rect = WorldRect::from_corners(Position::new(0.0, 0.0), Position::new(2.0, 2.0));
        // Center inside
        assert!(rect.overlaps_circle(&Position::new(1.0, 1.0), 0.1));
        // Center outside, radius reaches the edge
        assert!(rect.overlaps_circle(&Position::new(2.5, 1.0), 0.6));
        // Center outside, radius falls short
        assert!(!rect.overlaps_circle(&Position::new(2.5, 1.0), 0.4));
        // Near a corner: distance to (2,2) is sqrt(0.5) ~= 0.707
        assert!(!rect.overlaps_circle(&Position::new(2.5, 2.5), 0.7));
        assert!(rect.overlaps_circle(&Position::new(2.5, 2.5), 0.71));
    }

    // ---- Colors ----

    #[test]
    fn test_color_classes_and_toggle() {
        assert_eq!(FrogColor::Red.class(), FrogClass::GreenRed);
        assert_eq!(FrogColor::Black.class(), FrogClass::YellowBlack);
        assert_eq!(FrogColor::Green.toggled(), FrogColor::Red);
        assert_eq!(FrogColor::Yellow.toggled(), FrogColor::Black);
        assert!(FrogClass::GreenRed.accepts(FrogColor::Red));
        assert!(!FrogClass::GreenRed.accepts(FrogColor::Yellow));
    }

    #[test]
    fn test_selection_kind_by_color() {
        assert_eq!(FrogColor::Yellow.selection_kind(), SelectionKind::Detonator);
        assert_eq!(FrogColor::Red.selection_kind(), SelectionKind::Damage);
        assert_eq!(FrogColor::Black.selection_kind(), SelectionKind::Black);
        assert_eq!(FrogColor::Green.selection_kind(), SelectionKind::Green);
    }

    // ---- Config ----

    #[test]
    fn test_default_config_is_valid() {
        let config = LevelConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.total_frogs(), 22);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = LevelConfig::from_json(
            r#"{ "initial_health": 5, "spawn": { "black": 0 }, "pacing": { "failure_grace_secs": 2.5 } }"#,
        )
        .unwrap();
        assert_eq!(config.initial_health, 5);
        assert_eq!(config.spawn.black, 0);
        assert_eq!(config.spawn.green, 12, "unlisted spawn counts keep their default");
        assert_eq!(config.pacing.failure_grace_secs, 2.5);
        assert_eq!(
            config.pacing.chain_wave_delay_secs,
            LevelConfig::default().pacing.chain_wave_delay_secs
        );
    }

    #[test]
    fn test_config_rejects_bad_values() {
        let err = LevelConfig::from_json(r#"{ "initial_health": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "initial_health",
                ..
            }
        ));

        let mut config = LevelConfig::default();
        config.cycle.red = HoldRange::new(2.0, 1.0);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cycle.red"), "got: {err}");

        config = LevelConfig::default();
        config.pacing.sequential_delay_secs = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_rejects_malformed_json() {
        let err = LevelConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    // ---- Wire shapes ----

    #[test]
    fn test_command_tagged_json() {
        let cmd: PlayerCommand =
            serde_json::from_str(r#"{ "type": "EndSelection", "x": 10.0, "y": 20.5 }"#).unwrap();
        assert!(matches!(cmd, PlayerCommand::EndSelection { x, y } if x == 10.0 && y == 20.5));

        let cmd: PlayerCommand =
            serde_json::from_str(r#"{ "type": "SetIsolated", "frog": 7, "isolated": true }"#)
                .unwrap();
        assert!(matches!(
            cmd,
            PlayerCommand::SetIsolated {
                frog: FrogId(7),
                isolated: true
            }
        ));
    }

    #[test]
    fn test_session_event_json_shape() {
        let json = serde_json::to_string(&SessionEvent::Failure {
            cause: FailureCause::HealthDepleted,
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"Failure","cause":"HealthDepleted"}"#);
    }

    #[test]
    fn test_default_snapshot_serializes() {
        let snapshot = GameStateSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.phase, GamePhase::MainMenu);
        assert_eq!(back.resolution_phase, ResolutionPhase::Idle);
        assert!(back.frogs.is_empty());
    }
}
