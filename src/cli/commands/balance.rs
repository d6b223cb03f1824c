use crate::cli::commands::connect;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::Core;
use crate::errors::AppResult;
use crate::ui::messages::{header, success, warning};
use crate::utils::colors::{RESET, color_for_surplus};
use crate::utils::date::to_portal_date;
use crate::utils::time::hours2readable;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Balance { months } = cmd {
        let session = connect(cfg)?;
        let balance = Core::balance_for_months(&session, *months, cfg.daily_hours)?;

        header(format!("Balance over the last {} months", months));
        println!("Needed hours: {:.2}", balance.needed_hours);
        println!("Actual hours: {:.2}", balance.actual_hours);

        let surplus = balance.surplus_hours();
        println!(
            "Difference:   {}{}{}",
            color_for_surplus(surplus),
            hours2readable(surplus),
            RESET
        );

        if balance.missing_days.is_empty() {
            success("No missing days");
        } else {
            let days: Vec<String> = balance
                .missing_days
                .iter()
                .map(|d| to_portal_date(*d))
                .collect();
            warning(format!(
                "Missing days ({}): {}",
                days.len(),
                days.join(", ")
            ));
        }
    }
    Ok(())
}
