/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, info, warn};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::{self, SimulatorConfig, DEFAULT_FLOORS, DEFAULT_TICK_PERIOD};
use crate::elevator::dispatch::{policy_for, Decision};
use crate::elevator::requests::RequestSet;
use crate::shared::{Algorithm, Clock, Direction, LogEntry, Snapshot};

/// Most log entries kept in memory; older ones are dropped first.
pub const HISTORY_LIMIT: usize = 1000;

/**
 * Drives a single elevator car one floor per tick.
 *
 * The `CarController` owns the car state and the pending requests. On every tick it
 * either moves the car one floor toward its target or, when it has no target or has
 * just arrived, clears the served request and asks the active dispatch policy where
 * to go next. It is the only place car state is committed.
 *
 * # Fields
 * - `current_floor`:   Floor the car is at, 1-based.
 * - `direction`:       Current direction of travel.
 * - `target_floor`:    Floor being travelled to, always a pending request.
 * - `running`:         Whether ticks advance the car.
 * - `paused`:          Whether ticks are suspended while running.
 * - `requests`:        Pending floor calls in arrival order.
 * - `algorithm`:       Dispatch policy used for the next decision.
 * - `n_floors`:        Number of floors served.
 * - `tick_period`:     Milliseconds between ticks, read by the driver.
 * - `clock`:           Timestamp source for requests and log entries.
 * - `log_tx`:          Receives a `LogEntry` for every accepted request and arrival.
 * - `history`:         Most recent entries since start or the last reset, at most `HISTORY_LIMIT`.
 */
pub struct CarController {
    current_floor: u8,
    direction: Direction,
    target_floor: Option<u8>,
    running: bool,
    paused: bool,
    requests: RequestSet,
    algorithm: Algorithm,
    n_floors: u8,
    tick_period: u64,
    clock: Box<dyn Clock>,
    log_tx: cbc::Sender<LogEntry>,
    history: Vec<LogEntry>,
}

impl CarController {
    pub fn new(
        config: &SimulatorConfig,
        clock: Box<dyn Clock>,
        log_tx: cbc::Sender<LogEntry>,
    ) -> CarController {
        CarController {
            current_floor: 1,
            direction: Direction::Idle,
            target_floor: None,
            running: false,
            paused: false,
            requests: RequestSet::new(config.n_floors),
            algorithm: config.algorithm,
            n_floors: config.n_floors,
            tick_period: config.tick_period,
            clock,
            log_tx,
            history: Vec::new(),
        }
    }

    /// Queues a call for `floor`, starting an idle car. Returns whether it was accepted.
    pub fn submit_request(&mut self, floor: u8) -> bool {
        let now = self.clock.now();
        if !self.requests.submit(floor, now) {
            warn!(
                "Rejected request for floor {} (valid floors 1..={}, pending {:?})",
                floor,
                self.n_floors,
                self.pending_floors()
            );
            return false;
        }

        info!("Floor {} requested", floor);
        self.emit(LogEntry::requested(floor, now));

        if !self.running && !self.paused {
            self.start();
        }
        true
    }

    pub fn start(&mut self) {
        if self.running && !self.paused {
            return;
        }
        self.running = true;
        self.paused = false;
        debug!("Car started at floor {}", self.current_floor);
    }

    /// Suspends ticks. Target, direction and requests are kept for the next `start`.
    pub fn pause(&mut self) {
        self.paused = true;
        debug!("Car paused at floor {}", self.current_floor);
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.paused = false;
        self.current_floor = 1;
        self.direction = Direction::Idle;
        self.target_floor = None;
        self.requests.clear();
        self.history.clear();
        info!("Simulator reset");
    }

    pub fn tick(&mut self) {
        if self.paused || !self.running {
            return;
        }

        if self.target_floor.map_or(true, |target| target == self.current_floor) {
            if let Some(target) = self.target_floor.take() {
                self.requests.remove(target);
                info!("Floor {} reached", target);
                let now = self.clock.now();
                self.emit(LogEntry::reached(target, now));
            }

            // Policies are only consulted with something pending
            let decision = if self.requests.is_empty() {
                None
            } else {
                Some(policy_for(self.algorithm).next_floor(
                    self.requests.all(),
                    self.current_floor,
                    self.direction,
                ))
            };

            let (next_floor, heading) = match decision {
                Some(Decision {
                    floor: Some(floor),
                    direction,
                }) => (floor, direction),
                _ => {
                    self.direction = Direction::Idle;
                    self.running = false;
                    debug!("No pending requests, car idle at floor {}", self.current_floor);
                    return;
                }
            };

            // Matches the policy's recommendation except for a same-floor target, which is idle
            self.target_floor = Some(next_floor);
            self.direction = Direction::towards(self.current_floor, next_floor);
            debug!(
                "Next target floor {} ({} recommends {}, moving {})",
                next_floor, self.algorithm, heading, self.direction
            );
        }

        if let Some(target) = self.target_floor {
            if self.current_floor < target {
                self.current_floor += 1;
            } else if self.current_floor > target {
                self.current_floor -= 1;
            }
            debug!("Car at floor {} heading {}", self.current_floor, self.direction);
        }
    }

    /// Applies each setting that is within bounds; an invalid one is ignored on its own.
    pub fn configure(&mut self, n_floors: u8, tick_period: u64) {
        if config::floors_in_range(n_floors) {
            self.n_floors = n_floors;
        } else {
            warn!(
                "Ignoring floor count {} (must be within {}..={})",
                n_floors,
                config::MIN_FLOORS,
                config::MAX_FLOORS
            );
        }

        if config::tick_period_in_range(tick_period) {
            self.tick_period = tick_period;
        } else {
            warn!(
                "Ignoring tick period {} ms (must be within {}..={})",
                tick_period,
                config::MIN_TICK_PERIOD,
                config::MAX_TICK_PERIOD
            );
        }

        self.fit_to_floors();
        info!(
            "Configured {} floors, {} ms per floor",
            self.n_floors, self.tick_period
        );
    }

    /// Restores 10 floors at 500 ms per floor and resets the car.
    pub fn apply_basic_settings(&mut self) {
        self.n_floors = DEFAULT_FLOORS;
        self.tick_period = DEFAULT_TICK_PERIOD;
        self.requests.set_n_floors(self.n_floors);
        self.reset();
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
        info!("Dispatch algorithm set to {}", algorithm);
    }

    pub fn tick_period(&self) -> u64 {
        self.tick_period
    }

    pub fn n_floors(&self) -> u8 {
        self.n_floors
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            current_floor: self.current_floor,
            direction: self.direction,
            target_floor: self.target_floor,
            running: self.running,
            paused: self.paused,
            pending_requests: self.requests.all().to_vec(),
            n_floors: self.n_floors,
            tick_period: self.tick_period,
            algorithm: self.algorithm,
        }
    }

    /// Up to `HISTORY_LIMIT` latest entries since start or the last reset, oldest first.
    pub fn history(&self) -> &[LogEntry] {
        &self.history
    }

    fn fit_to_floors(&mut self) {
        if self.current_floor > self.n_floors {
            self.current_floor = self.n_floors;
        }
        self.requests.set_n_floors(self.n_floors);

        // A pruned target is no longer pending; re-dispatch on the next tick
        if let Some(target) = self.target_floor {
            if !self.requests.contains(target) {
                self.target_floor = None;
            }
        }
    }

    fn emit(&mut self, entry: LogEntry) {
        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push(entry.clone());
        let _ = self.log_tx.send(entry);
    }

    fn pending_floors(&self) -> Vec<u8> {
        self.requests.all().iter().map(|r| r.floor).collect()
    }
}
