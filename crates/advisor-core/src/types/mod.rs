//! Domain types.

mod assumptions;
mod date;
mod schedule;

pub use assumptions::{MarketAssumptions, BOND_YEAR_DAYS, CALENDAR_YEAR_DAYS};
pub use date::{Date, NO_DATE};
pub use schedule::{CashFlowSchedule, ScheduleEntry, ScheduleKind};
