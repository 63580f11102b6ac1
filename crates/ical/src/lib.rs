pub mod ics;
pub mod traits;

pub use ics::IcsSerializer;
pub use traits::{CalendarSerializer, IcalError};
