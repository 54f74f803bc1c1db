/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{Algorithm, Direction, FloorRequest};

/***************************************/
/*       Public data structures        */
/***************************************/

/// What a policy recommends: the floor to serve next and the direction it reasoned with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub floor: Option<u8>,
    pub direction: Direction,
}

impl Decision {
    fn none(direction: Direction) -> Decision {
        Decision {
            floor: None,
            direction,
        }
    }

    fn to(floor: u8, direction: Direction) -> Decision {
        Decision {
            floor: Some(floor),
            direction,
        }
    }
}

/**
 * Chooses the next floor to serve.
 *
 * Implementations are pure: they read the pending requests (oldest first), the
 * car's floor and its direction, and return a recommendation. Committing the
 * result is up to the caller.
 */
pub trait DispatchPolicy {
    fn next_floor(
        &self,
        requests: &[FloorRequest],
        current_floor: u8,
        direction: Direction,
    ) -> Decision;
}

pub struct Fifo;
pub struct Scan;
pub struct DirectionBased;

pub fn policy_for(algorithm: Algorithm) -> &'static dyn DispatchPolicy {
    match algorithm {
        Algorithm::Fifo => &Fifo,
        Algorithm::Scan => &Scan,
        Algorithm::DirectionBased => &DirectionBased,
    }
}

/***************************************/
/*              Policies               */
/***************************************/
impl DispatchPolicy for Fifo {
    fn next_floor(
        &self,
        requests: &[FloorRequest],
        _current_floor: u8,
        direction: Direction,
    ) -> Decision {
        match requests.first() {
            Some(oldest) => Decision::to(oldest.floor, direction),
            None => Decision::none(direction),
        }
    }
}

impl DispatchPolicy for Scan {
    fn next_floor(
        &self,
        requests: &[FloorRequest],
        current_floor: u8,
        direction: Direction,
    ) -> Decision {
        let nearest = match nearest(requests, current_floor) {
            Some(floor) => floor,
            None => return Decision::none(direction),
        };

        // An idle car heads for the nearest call
        let mut direction = direction;
        if direction == Direction::Idle {
            direction = heading_for(nearest, current_floor);
        }

        if let Some(floor) = nearest_ahead(requests, current_floor, direction) {
            return Decision::to(floor, direction);
        }

        direction = direction.reversed();
        if let Some(floor) = nearest_ahead(requests, current_floor, direction) {
            return Decision::to(floor, direction);
        }

        // Only calls at the current floor remain
        Decision::to(nearest, direction)
    }
}

impl DispatchPolicy for DirectionBased {
    fn next_floor(
        &self,
        requests: &[FloorRequest],
        current_floor: u8,
        direction: Direction,
    ) -> Decision {
        let nearest = match nearest(requests, current_floor) {
            Some(floor) => floor,
            None => return Decision::none(direction),
        };

        if direction == Direction::Idle {
            return Decision::to(nearest, heading_for(nearest, current_floor));
        }

        // Keep going while anything is ahead
        if let Some(floor) = nearest_ahead(requests, current_floor, direction) {
            return Decision::to(floor, direction);
        }

        let reversed = direction.reversed();
        if let Some(floor) = nearest_ahead(requests, current_floor, reversed) {
            return Decision::to(floor, reversed);
        }

        // Direction is recomputed from the fallback floor, not kept from the reversal
        Decision::to(nearest, heading_for(nearest, current_floor))
    }
}

/***************************************/
/*          Private functions          */
/***************************************/

/// First request, in arrival order, with the smallest distance to `current_floor`.
fn nearest(requests: &[FloorRequest], current_floor: u8) -> Option<u8> {
    requests
        .iter()
        .map(|r| r.floor)
        .min_by_key(|&floor| floor.abs_diff(current_floor))
}

/// Closest request strictly ahead of the car in `direction`.
fn nearest_ahead(requests: &[FloorRequest], current_floor: u8, direction: Direction) -> Option<u8> {
    let floors = requests.iter().map(|r| r.floor);
    match direction {
        Direction::Up => floors.filter(|&f| f > current_floor).min(),
        Direction::Down => floors.filter(|&f| f < current_floor).max(),
        Direction::Idle => None,
    }
}

/// Up when `floor` is above the car, down otherwise (including the same floor).
fn heading_for(floor: u8, current_floor: u8) -> Direction {
    if floor > current_floor {
        Direction::Up
    } else {
        Direction::Down
    }
}
