/*
 * Unit tests for the console
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - command parsing and parse errors
 * - text and JSON rendering of log entries and snapshots
 * - console lines drive the simulator
 * - floors and speed each change one setting and keep the other
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod console_tests {
    use crate::config::SimulatorConfig;
    use crate::console::{handle_line, render_entry, render_snapshot, Command, Flow, ParseError};
    use crate::elevator::{CarController, Simulator};
    use crate::shared::{Algorithm, Direction, FixedClock, FloorRequest, LogEntry, Snapshot};
    use crossbeam_channel::unbounded;
    use std::time::{Duration, UNIX_EPOCH};

    fn setup_simulator() -> Simulator {
        let (log_tx, _log_rx) = unbounded::<LogEntry>();
        let config = SimulatorConfig {
            n_floors: 10,
            tick_period: 500,
            algorithm: Algorithm::Fifo,
        };
        Simulator::new(CarController::new(&config, Box::new(FixedClock(UNIX_EPOCH)), log_tx))
    }

    #[test]
    fn test_parse_floor_calls() {
        assert_eq!("7".parse::<Command>(), Ok(Command::Call(7)));
        assert_eq!("call 12".parse::<Command>(), Ok(Command::Call(12)));
        assert_eq!("  0 ".parse::<Command>(), Ok(Command::Call(0)));
    }

    #[test]
    fn test_parse_settings() {
        assert_eq!("floors 5".parse::<Command>(), Ok(Command::Floors(5)));
        assert_eq!("speed 250".parse::<Command>(), Ok(Command::Speed(250)));
        assert_eq!(
            "algorithm direction-based".parse::<Command>(),
            Ok(Command::Algorithm(Algorithm::DirectionBased))
        );
        assert_eq!("ALGO Scan".parse::<Command>(), Ok(Command::Algorithm(Algorithm::Scan)));
        assert_eq!("basic".parse::<Command>(), Ok(Command::Basic));
        assert_eq!("step".parse::<Command>(), Ok(Command::Step));
        assert_eq!("configure 8 300".parse::<Command>(), Ok(Command::Configure(8, 300)));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(ParseError::Empty));
        assert_eq!("call".parse::<Command>(), Err(ParseError::MissingArgument("floor")));
        assert_eq!(
            "configure 8".parse::<Command>(),
            Err(ParseError::MissingArgument("tick period"))
        );
        assert_eq!(
            "300".parse::<Command>(),
            Err(ParseError::InvalidNumber("300".to_string()))
        );
        assert_eq!(
            "fly up".parse::<Command>(),
            Err(ParseError::Unknown("fly".to_string()))
        );
        assert!(matches!(
            "algorithm lifo".parse::<Command>(),
            Err(ParseError::InvalidAlgorithm(_))
        ));
    }

    #[test]
    fn test_render_entry() {
        // 1_700_000_000 is 22:13:20 UTC
        let entry = LogEntry::reached(4, UNIX_EPOCH + Duration::from_secs(1_700_000_000));

        assert_eq!(render_entry(&entry, false), "[22:13:20] Floor 4 reached");
        assert!(render_entry(&entry, true).contains("\"kind\":\"reached\""));
    }

    #[test]
    fn test_render_snapshot() {
        // Arrange
        let snapshot = Snapshot {
            current_floor: 3,
            direction: Direction::Up,
            target_floor: Some(6),
            running: true,
            paused: false,
            pending_requests: vec![
                FloorRequest { floor: 6, requested_at: UNIX_EPOCH },
                FloorRequest { floor: 2, requested_at: UNIX_EPOCH },
            ],
            n_floors: 10,
            tick_period: 500,
            algorithm: Algorithm::Scan,
        };

        // Act
        let text = render_snapshot(&snapshot, false);
        let json: serde_json::Value = serde_json::from_str(&render_snapshot(&snapshot, true)).unwrap();

        // Assert
        assert_eq!(
            text,
            "UP | floor 3/10 | direction UP | target 6 | pending [6, 2] (2) | scan @ 500 ms"
        );
        assert_eq!(json["direction"], "UP");
        assert_eq!(json["target_floor"], 6);
        assert_eq!(json["algorithm"], "scan");
    }

    #[test]
    fn test_handle_line_drives_simulator() {
        // Arrange
        let simulator = setup_simulator();

        // Act
        let flows = [
            handle_line("algorithm scan", &simulator, false),
            handle_line("6", &simulator, false),
            handle_line("step", &simulator, false),
            handle_line("floors 4", &simulator, false),
            handle_line("speed 50", &simulator, false),
            handle_line("jump", &simulator, false),
        ];

        // Assert
        assert!(flows.iter().all(|flow| *flow == Flow::Continue));
        let snapshot = simulator.snapshot();
        assert_eq!(snapshot.algorithm, Algorithm::Scan);
        assert_eq!(snapshot.current_floor, 2);
        assert_eq!(snapshot.n_floors, 4);
        assert_eq!(snapshot.tick_period, 500);
        assert!(snapshot.pending_requests.is_empty());
        assert_eq!(handle_line("quit", &simulator, false), Flow::Quit);
    }

    #[test]
    fn test_floors_and_speed_keep_the_other_setting() {
        // Purpose: Each command changes only the setting it names

        // Arrange
        let simulator = setup_simulator();

        // Act
        handle_line("speed 250", &simulator, false);
        handle_line("floors 6", &simulator, false);
        let after_single = simulator.snapshot();
        handle_line("configure 12 1500", &simulator, false);
        let after_both = simulator.snapshot();
        handle_line("configure 2 100", &simulator, false);

        // Assert
        assert_eq!((after_single.n_floors, after_single.tick_period), (6, 250));
        assert_eq!((after_both.n_floors, after_both.tick_period), (12, 1500));
        // Out-of-range floor count is ignored on its own
        let snapshot = simulator.snapshot();
        assert_eq!((snapshot.n_floors, snapshot.tick_period), (12, 100));
    }
}
