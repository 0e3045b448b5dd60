pub mod error;
pub mod rounding;
pub mod timezone;

pub use error::{AppError, Result};
pub use timezone::SalonClock;
