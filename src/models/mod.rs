pub mod absence;
pub mod balance;
pub mod calendar_day;
pub mod employment;
pub mod work_amount;
pub mod work_log;
