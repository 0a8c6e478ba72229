//! Work-calendar resolution.
//!
//! This module determines the business days of a month: Monday through
//! Friday, excluding the holidays listed for that year in the
//! [`HolidayCalendar`].

mod business_days;
mod holiday_calendar;

pub use business_days::{
    BusinessDayResolution, DayKind, PUBLIC_HOLIDAYS_REF, business_dates, classify_date,
    count_business_days, count_selected_days, resolve_business_days,
};
pub use holiday_calendar::HolidayCalendar;
