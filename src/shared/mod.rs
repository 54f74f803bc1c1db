pub mod clock;
pub mod macros;
pub mod structs;

pub use clock::{Clock, SystemClock};
#[cfg(test)]
pub use clock::FixedClock;
pub use structs::Algorithm;
pub use structs::Direction;
pub use structs::FloorRequest;
pub use structs::LogEntry;
pub use structs::LogKind;
pub use structs::Snapshot;
pub use structs::Status;
