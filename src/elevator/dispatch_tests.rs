/*
 * Unit tests for the dispatch policies
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - FIFO serves the oldest call regardless of distance
 * - SCAN picks the nearest call when idle, sweeps, and reverses
 * - Direction-based differs from SCAN only in its final fallback
 * - All policies return no floor for an empty request list
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod dispatch_tests {
    use crate::elevator::dispatch::{policy_for, Decision, DirectionBased, DispatchPolicy, Fifo, Scan};
    use crate::shared::Direction::{Down, Idle, Up};
    use crate::shared::{Algorithm, FloorRequest};
    use std::time::{Duration, UNIX_EPOCH};

    fn requests(floors: &[u8]) -> Vec<FloorRequest> {
        floors
            .iter()
            .enumerate()
            .map(|(i, &floor)| FloorRequest {
                floor,
                requested_at: UNIX_EPOCH + Duration::from_secs(i as u64),
            })
            .collect()
    }

    #[test]
    fn test_fifo_serves_in_arrival_order() {
        // Purpose: Floors [5, 2, 8] are served in that order from floor 1

        // Arrange
        let mut pending = requests(&[5, 2, 8]);
        let mut current_floor = 1;
        let mut served = Vec::new();

        // Act
        while let Some(floor) = Fifo.next_floor(&pending, current_floor, Idle).floor {
            served.push(floor);
            current_floor = floor;
            pending.retain(|r| r.floor != floor);
        }

        // Assert
        assert_eq!(served, vec![5, 2, 8]);
    }

    #[test]
    fn test_fifo_keeps_direction_untouched() {
        let decision = Fifo.next_floor(&requests(&[2]), 9, Up);

        assert_eq!(decision, Decision { floor: Some(2), direction: Up });
    }

    #[test]
    fn test_scan_idle_picks_nearest_then_sweeps() {
        // Purpose: From floor 1 with calls {3, 7}, go to 3 first and keep going up to 7

        // Arrange
        let pending = requests(&[7, 3]);

        // Act
        let first = Scan.next_floor(&pending, 1, Idle);
        let second = Scan.next_floor(&requests(&[7]), 3, first.direction);

        // Assert
        assert_eq!(first, Decision { floor: Some(3), direction: Up });
        assert_eq!(second, Decision { floor: Some(7), direction: Up });
    }

    #[test]
    fn test_scan_serves_nearest_ahead_not_oldest() {
        let decision = Scan.next_floor(&requests(&[9, 4, 6]), 2, Up);

        assert_eq!(decision, Decision { floor: Some(4), direction: Up });
    }

    #[test]
    fn test_scan_reverses_when_nothing_ahead() {
        // Purpose: At floor 5 going up with only floor 2 pending, reverse and go down

        let decision = Scan.next_floor(&requests(&[2]), 5, Up);

        assert_eq!(decision, Decision { floor: Some(2), direction: Down });
    }

    #[test]
    fn test_scan_continues_past_calls_behind() {
        let decision = Scan.next_floor(&requests(&[1, 2, 8]), 5, Down);

        assert_eq!(decision, Decision { floor: Some(2), direction: Down });
    }

    #[test]
    fn test_scan_idle_tie_goes_to_first_arrival() {
        // Purpose: Equal distances are broken by arrival order

        let above_first = Scan.next_floor(&requests(&[7, 3]), 5, Idle);
        let below_first = Scan.next_floor(&requests(&[3, 7]), 5, Idle);

        assert_eq!(above_first, Decision { floor: Some(7), direction: Up });
        assert_eq!(below_first, Decision { floor: Some(3), direction: Down });
    }

    #[test]
    fn test_scan_idle_same_floor_call_heads_down() {
        // Purpose: A call at the current floor makes an idle SCAN car head down,
        // so a call below is swept before the one at the car

        let decision = Scan.next_floor(&requests(&[4, 2]), 4, Idle);

        assert_eq!(decision, Decision { floor: Some(2), direction: Down });
    }

    #[test]
    fn test_scan_only_current_floor_left() {
        let going_up = Scan.next_floor(&requests(&[4]), 4, Up);
        let going_down = Scan.next_floor(&requests(&[4]), 4, Down);

        assert_eq!(going_up, Decision { floor: Some(4), direction: Down });
        assert_eq!(going_down, Decision { floor: Some(4), direction: Up });
    }

    #[test]
    fn test_direction_based_idle_goes_straight_to_nearest() {
        let decision = DirectionBased.next_floor(&requests(&[4, 2]), 4, Idle);

        assert_eq!(decision, Decision { floor: Some(4), direction: Down });
    }

    #[test]
    fn test_direction_based_continues_then_reverses() {
        // Arrange
        let pending = requests(&[1, 6]);

        // Act
        let ahead = DirectionBased.next_floor(&pending, 3, Up);
        let reversed = DirectionBased.next_floor(&requests(&[2]), 5, Up);

        // Assert
        assert_eq!(ahead, Decision { floor: Some(6), direction: Up });
        assert_eq!(reversed, Decision { floor: Some(2), direction: Down });
    }

    #[test]
    fn test_direction_based_fallback_recomputes_direction() {
        // Purpose: With only the current floor pending the direction flips twice
        // (down -> up -> down); only the final value is reported

        let decision = DirectionBased.next_floor(&requests(&[4]), 4, Down);

        assert_eq!(decision, Decision { floor: Some(4), direction: Down });
    }

    #[test]
    fn test_empty_requests_yield_no_floor() {
        for algorithm in [Algorithm::Fifo, Algorithm::Scan, Algorithm::DirectionBased] {
            let decision = policy_for(algorithm).next_floor(&[], 3, Up);

            assert_eq!(decision, Decision { floor: None, direction: Up });
        }
    }

    #[test]
    fn test_policy_for_selects_by_algorithm() {
        // Purpose: The same input tells the three policies apart

        let pending = requests(&[8, 3]);

        let fifo = policy_for(Algorithm::Fifo).next_floor(&pending, 4, Idle);
        let scan = policy_for(Algorithm::Scan).next_floor(&pending, 4, Idle);

        assert_eq!(fifo.floor, Some(8));
        assert_eq!(scan.floor, Some(3));
    }
}
