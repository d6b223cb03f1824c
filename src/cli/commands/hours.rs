use crate::cli::commands::connect;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::date::to_portal_date;
use crate::utils::formatting::mins2readable;
use crate::utils::period::resolve_period;
use crate::utils::table::{Column, Table};
use crate::utils::time::hours2readable;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Hours { period } = cmd {
        let (start, end) = resolve_period(period)?;
        let session = connect(cfg)?;

        let amounts = session.daily_work_amount(session.employments(), start, end)?;
        if amounts.is_empty() {
            info(format!(
                "No hours recorded between {} and {}",
                to_portal_date(start),
                to_portal_date(end)
            ));
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("DATE", 10),
            Column::new("WORKED", 8),
            Column::new("ENTRIES", 7),
            Column::new("LUNCH", 8),
        ]);
        let mut total = 0.0;
        for wa in &amounts {
            total += wa.hours();
            table.add_row(vec![
                to_portal_date(wa.date),
                hours2readable(wa.hours()),
                wa.entry_count.to_string(),
                mins2readable(wa.lunch_break.num_minutes()),
            ]);
        }
        print!("{}", table.render());
        println!("Total: {}", hours2readable(total));
    }
    Ok(())
}
