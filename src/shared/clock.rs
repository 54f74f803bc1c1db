/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::time::SystemTime;

/***************************************/
/*             Public API              */
/***************************************/

/// Source of request and log timestamps.
pub trait Clock: Send {
    fn now(&self) -> SystemTime;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

#[cfg(test)]
/// Always reports the same instant. Keeps replays of a call sequence identical.
pub struct FixedClock(pub SystemTime);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> SystemTime {
        self.0
    }
}
