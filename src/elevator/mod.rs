pub mod controller;
pub mod dispatch;
pub mod driver;
pub mod requests;

mod dispatch_tests;

pub use controller::CarController;
pub use driver::{Driver, Simulator};
pub use requests::RequestSet;
