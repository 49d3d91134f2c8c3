use crate::args::OutputFormat;
use crate::workspace::Workspace;
use anyhow::Result;
use catalog_page::ConsoleNotifier;
use catalog_types::ProductRecord;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::path::Path;

pub fn handle(
    workspace: &Workspace,
    search: Option<&str>,
    page: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let mut session = workspace.open_page(page, ConsoleNotifier)?;
    let term = search.unwrap_or("");
    session.search_submit(term);

    let visible = session.visible_records();
    let shown = visible.len();
    let total = session.records().len();

    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "term": term,
                "total": total,
                "visible": shown,
                "records": visible,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Plain => print_table(&visible, total, term),
    }
    Ok(())
}

fn print_table(records: &[&ProductRecord], total: usize, term: &str) {
    if records.is_empty() {
        if term.trim().is_empty() {
            println!("No products.");
        } else {
            println!("No products match \"{}\".", term.trim());
        }
        return;
    }

    let color = std::io::stdout().is_terminal();
    let id_width = records.iter().map(|r| r.id.as_str().chars().count()).max().unwrap_or(0);
    let name_width = records.iter().map(|r| r.name.chars().count()).max().unwrap_or(0);

    for record in records {
        let id = format!("{:<width$}", record.id.as_str(), width = id_width);
        let name = format!("{:<width$}", record.name, width = name_width);
        if color {
            println!("{}  {}  {}", id.dimmed(), name.bold(), record.price.green());
        } else {
            println!("{}  {}  {}", id, name, record.price);
        }
    }

    if records.len() < total {
        println!();
        println!("{} of {} product(s) shown", records.len(), total);
    }
}
