/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::collections::HashSet;
use std::time::SystemTime;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::FloorRequest;

/**
 * Outstanding floor calls, kept in arrival order.
 *
 * At most one request per floor; every floor lies within `1..=n_floors`.
 *
 * # Fields
 * - `requests`:    Pending requests, oldest first.
 * - `floors`:      Membership index over `requests`.
 * - `n_floors`:    Highest floor a request may name.
 */
#[derive(Debug, Clone)]
pub struct RequestSet {
    requests: Vec<FloorRequest>,
    floors: HashSet<u8>,
    n_floors: u8,
}

impl RequestSet {
    pub fn new(n_floors: u8) -> RequestSet {
        RequestSet {
            requests: Vec::new(),
            floors: HashSet::new(),
            n_floors,
        }
    }

    /// Appends a request unless the floor is out of range or already pending.
    pub fn submit(&mut self, floor: u8, now: SystemTime) -> bool {
        if floor < 1 || floor > self.n_floors || self.contains(floor) {
            return false;
        }
        self.floors.insert(floor);
        self.requests.push(FloorRequest {
            floor,
            requested_at: now,
        });
        true
    }

    pub fn remove(&mut self, floor: u8) {
        if self.floors.remove(&floor) {
            self.requests.retain(|r| r.floor != floor);
        }
    }

    pub fn contains(&self, floor: u8) -> bool {
        self.floors.contains(&floor)
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// All pending requests, oldest first.
    pub fn all(&self) -> &[FloorRequest] {
        &self.requests
    }

    pub fn prune_above(&mut self, max_floor: u8) {
        self.requests.retain(|r| r.floor <= max_floor);
        self.floors.retain(|&f| f <= max_floor);
    }

    /// Changes the accepted range and drops requests that fall outside it.
    pub fn set_n_floors(&mut self, n_floors: u8) {
        self.n_floors = n_floors;
        self.prune_above(n_floors);
    }

    pub fn clear(&mut self) {
        self.requests.clear();
        self.floors.clear();
    }
}
