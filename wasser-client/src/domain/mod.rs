mod month;
mod monthly_record;

pub use month::{month_name, MONTH_NAMES};
pub use monthly_record::{MonthlyRecord, NewMonthlyRecord};
