use crate::cli::commands::connect;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::date::to_portal_date;
use crate::utils::period::resolve_period;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Absences { period } = cmd {
        let (start, end) = resolve_period(period)?;
        let session = connect(cfg)?;

        let absences = session.absences(session.employments(), start, end)?;
        if absences.is_empty() {
            info(format!(
                "No absences between {} and {}",
                to_portal_date(start),
                to_portal_date(end)
            ));
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("ID", 10),
            Column::new("START", 10),
            Column::new("END", 10),
            Column::new("DAYS", 4),
            Column::new("INFO", 30),
        ]);
        for a in &absences {
            table.add_row(vec![
                a.id.clone(),
                to_portal_date(a.start_date),
                to_portal_date(a.end_date),
                a.days().len().to_string(),
                a.info.clone(),
            ]);
        }
        print!("{}", table.render());
    }
    Ok(())
}
