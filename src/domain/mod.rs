pub mod availability;
pub mod calendar;
pub mod date;
pub mod date_range;
pub mod error;
pub mod rental;
pub mod unavailable_date;

pub use availability::*;
pub use calendar::*;
pub use date::*;
pub use date_range::*;
pub use error::*;
pub use rental::*;
pub use unavailable_date::*;
