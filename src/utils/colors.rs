/// ANSI color helpers for terminal output.
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";

/// Balance color:
/// \>0 → green
/// \<0 → red
/// 0 → reset
pub fn color_for_surplus(hours: f64) -> &'static str {
    // below a minute counts as even
    if hours >= 1.0 / 60.0 {
        GREEN
    } else if hours <= -1.0 / 60.0 {
        RED
    } else {
        RESET
    }
}

/// Workdays plain, holidays yellow, weekends grey.
pub fn color_for_day(workday: bool, weekend: bool) -> &'static str {
    if workday {
        GREEN
    } else if weekend {
        GREY
    } else {
        YELLOW
    }
}
