//! Homepage statistics command handlers.
//!
//! The board is one array: every edit loads it, changes it locally, and
//! saves the whole thing back.

use tabled::Tabled;

use realty_core::{Console, StatisticField, StatisticsBoard};

use crate::cli::{GlobalOpts, StatsArgs, StatsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Icon")]
    icon: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Description")]
    description: String,
}

fn render(board: &StatisticsBoard, global: &GlobalOpts) -> String {
    let data = board.entries();
    output::render_list(
        &global.output,
        data,
        |s| StatRow {
            // Rows are built from `data` itself, so the address identifies the slot.
            index: data.iter().position(|other| std::ptr::eq(other, s)).unwrap_or_default(),
            icon: s.icon.clone(),
            value: s.value.clone(),
            label: s.label.clone(),
            description: s.description.clone(),
        },
        |s| format!("{}\t{}", s.value, s.label),
    )
}

fn parse_field(raw: &str) -> Result<StatisticField, CliError> {
    raw.parse().map_err(|_| CliError::Validation {
        field: "field".into(),
        reason: format!("expected icon, value, label, or description, got '{raw}'"),
    })
}

pub async fn handle(console: &Console, args: StatsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let stats = console.statistics();
    let mut notices = console.notices();

    match args.command {
        StatsCommand::Show => {
            stats.load().await?;
        }

        StatsCommand::Set {
            index,
            field,
            value,
        } => {
            let field = parse_field(&field)?;
            stats.load().await?;
            stats.edit(|board| board.set_field(index, field, value))?;
            stats.save().await?;
        }

        StatsCommand::Reset => {
            if !util::confirm("Replace the statistics with the defaults?", global.yes)? {
                return Ok(());
            }
            stats.reset();
            stats.save().await?;
        }
    }

    util::flush_notices(&mut notices, global);
    output::print_output(&render(&stats.value(), global), global.quiet);
    Ok(())
}
