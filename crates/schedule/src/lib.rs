pub mod alarm;
pub mod builder;
pub mod event;

pub use alarm::alarm_for;
pub use builder::{ReminderSchedule, ReminderScheduleBuilder, ScheduleError};
pub use event::*;
