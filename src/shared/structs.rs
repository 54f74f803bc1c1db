/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
    Idle,
}

impl Direction {
    /// Direction of travel needed to get from `from` to `to`.
    pub fn towards(from: u8, to: u8) -> Direction {
        if to > from {
            Direction::Up
        } else if to < from {
            Direction::Down
        } else {
            Direction::Idle
        }
    }

    pub fn reversed(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Idle => Direction::Idle,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Direction::Up => write!(f, "UP"),
            Direction::Down => write!(f, "DOWN"),
            Direction::Idle => write!(f, "IDLE"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    #[serde(rename = "fifo")]
    Fifo,
    #[serde(rename = "scan")]
    Scan,
    #[serde(rename = "direction-based")]
    DirectionBased,
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::Fifo
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Algorithm::Fifo => write!(f, "fifo"),
            Algorithm::Scan => write!(f, "scan"),
            Algorithm::DirectionBased => write!(f, "direction-based"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fifo" => Ok(Algorithm::Fifo),
            "scan" => Ok(Algorithm::Scan),
            "direction-based" | "direction" => Ok(Algorithm::DirectionBased),
            other => Err(format!(
                "unknown algorithm '{}' (expected fifo, scan or direction-based)",
                other
            )),
        }
    }
}

/**
 * A pending call for the car to visit a floor.
 *
 * # Fields
 * - `floor`:           The requested floor, 1-based.
 * - `requested_at`:    When the request was accepted.
 */
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FloorRequest {
    pub floor: u8,
    pub requested_at: SystemTime,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    Requested,
    Reached,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub kind: LogKind,
    pub floor: u8,
    pub timestamp: SystemTime,
}

impl LogEntry {
    pub fn requested(floor: u8, timestamp: SystemTime) -> LogEntry {
        LogEntry {
            kind: LogKind::Requested,
            floor,
            timestamp,
        }
    }

    pub fn reached(floor: u8, timestamp: SystemTime) -> LogEntry {
        LogEntry {
            kind: LogKind::Reached,
            floor,
            timestamp,
        }
    }

    pub fn message(&self) -> String {
        match self.kind {
            LogKind::Requested => format!("Floor {} requested", self.floor),
            LogKind::Reached => format!("Floor {} reached", self.floor),
        }
    }

    /// Wall-clock time of day as `HH:MM:SS` (UTC).
    pub fn time_of_day(&self) -> String {
        let secs = self
            .timestamp
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let secs_of_day = secs % 86_400;
        format!(
            "{:02}:{:02}:{:02}",
            secs_of_day / 3600,
            (secs_of_day / 60) % 60,
            secs_of_day % 60
        )
    }
}

/// Status line shown to the user, derived from a `Snapshot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Paused,
    Processing,
    Moving(Direction),
    Stopped,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Status::Paused => write!(f, "PAUSED"),
            Status::Processing => write!(f, "PROCESSING"),
            Status::Moving(direction) => write!(f, "{}", direction),
            Status::Stopped => write!(f, "STOPPED"),
        }
    }
}

/**
 * Read-only view of the car for rendering and logging.
 */
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub current_floor: u8,
    pub direction: Direction,
    pub target_floor: Option<u8>,
    pub running: bool,
    pub paused: bool,
    pub pending_requests: Vec<FloorRequest>,
    pub n_floors: u8,
    pub tick_period: u64,
    pub algorithm: Algorithm,
}

impl Snapshot {
    pub fn status(&self) -> Status {
        if self.paused {
            Status::Paused
        } else if self.running {
            match self.direction {
                Direction::Idle => Status::Processing,
                direction => Status::Moving(direction),
            }
        } else {
            Status::Stopped
        }
    }
}
