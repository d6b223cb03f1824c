pub mod colors;
pub mod date;
pub mod formatting;
pub mod period;
pub mod table;
pub mod time;
