/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::info;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{Builder, JoinHandle};
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::elevator::CarController;
use crate::shared::{Algorithm, LogEntry, Snapshot};

/**
 * Thread-safe handle to a `CarController`.
 *
 * Every call takes the controller lock once, so ticks, submissions and
 * reconfiguration never interleave. Clones share the same controller.
 */
#[derive(Clone)]
pub struct Simulator {
    controller: Arc<Mutex<CarController>>,
}

impl Simulator {
    pub fn new(controller: CarController) -> Simulator {
        Simulator {
            controller: Arc::new(Mutex::new(controller)),
        }
    }

    // Every transition leaves the controller consistent, so a poisoned lock is still usable
    fn lock(&self) -> MutexGuard<'_, CarController> {
        self.controller
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn submit_request(&self, floor: u8) -> bool {
        self.lock().submit_request(floor)
    }

    pub fn tick(&self) {
        self.lock().tick();
    }

    pub fn start(&self) {
        self.lock().start();
    }

    pub fn pause(&self) {
        self.lock().pause();
    }

    pub fn reset(&self) {
        self.lock().reset();
    }

    pub fn configure(&self, n_floors: u8, tick_period: u64) {
        self.lock().configure(n_floors, tick_period);
    }

    /// Changes the floor count and keeps the current tick period.
    pub fn configure_floors(&self, n_floors: u8) {
        let mut controller = self.lock();
        let tick_period = controller.tick_period();
        controller.configure(n_floors, tick_period);
    }

    /// Changes the tick period and keeps the current floor count.
    pub fn configure_tick_period(&self, tick_period: u64) {
        let mut controller = self.lock();
        let n_floors = controller.n_floors();
        controller.configure(n_floors, tick_period);
    }

    pub fn apply_basic_settings(&self) {
        self.lock().apply_basic_settings();
    }

    pub fn set_algorithm(&self, algorithm: Algorithm) {
        self.lock().set_algorithm(algorithm);
    }

    pub fn tick_period(&self) -> u64 {
        self.lock().tick_period()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    pub fn history(&self) -> Vec<LogEntry> {
        self.lock().history().to_vec()
    }
}

/**
 * Paces the simulation by ticking the controller once per tick period.
 *
 * The period is read from the controller before each wait, so a reconfigured
 * period applies from the next scheduled tick.
 *
 * # Fields
 * - `simulator`:       Controller handle shared with the rest of the program.
 * - `terminate_rx`:    Stops the loop when a message arrives or the sender is dropped.
 */
pub struct Driver {
    simulator: Simulator,
    terminate_rx: cbc::Receiver<()>,
}

impl Driver {
    pub fn new(simulator: Simulator, terminate_rx: cbc::Receiver<()>) -> Driver {
        Driver {
            simulator,
            terminate_rx,
        }
    }

    pub fn spawn(self) -> std::io::Result<JoinHandle<()>> {
        Builder::new()
            .name("tick_driver".into())
            .spawn(move || self.run())
    }

    pub fn run(self) {
        info!("Tick driver started");
        loop {
            let period = Duration::from_millis(self.simulator.tick_period());
            cbc::select! {
                recv(self.terminate_rx) -> _ => break,
                default(period) => self.simulator.tick(),
            }
        }
        info!("Tick driver stopped");
    }
}
