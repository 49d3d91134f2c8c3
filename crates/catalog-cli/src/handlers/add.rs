use crate::args::OutputFormat;
use crate::workspace::Workspace;
use anyhow::Result;
use catalog_page::{ConsoleNotifier, FormField, SubmitOutcome};
use catalog_store::PersistOutcome;
use std::path::Path;
use tracing::warn;

/// Values typed into the add-product form
#[derive(Debug, Clone, Default)]
pub struct AddArgs {
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
}

pub fn handle(
    workspace: &Workspace,
    args: AddArgs,
    search: Option<&str>,
    page: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let mut session = workspace.open_page(page, ConsoleNotifier)?;
    if let Some(term) = search {
        session.search_input(term);
    }

    session.toggle_form();
    session.set_field(FormField::Name, args.name);
    session.set_field(FormField::Description, args.description);
    session.set_field(FormField::Price, args.price);
    session.set_field(FormField::ImageUrl, args.image_url);

    let (id, persisted) = match session.submit_form() {
        SubmitOutcome::Added { id, persisted } => (id, persisted),
        // The notifier already showed the message
        SubmitOutcome::Rejected { .. } => anyhow::bail!("Product not added"),
    };

    let shown = session.visible_records().iter().any(|r| r.id == id);
    if let PersistOutcome::Failed(reason) = &persisted {
        warn!(id = %id, reason = %reason, "product added for this run only");
    }

    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "id": id,
                "persisted": persisted.is_saved(),
                "visible": shown,
                "total": session.records().len(),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Plain => {
            println!("Added {}", id);
            if !persisted.is_saved() {
                println!("Warning: the catalog could not be saved; the product is lost on exit");
            }
            if !shown {
                println!("Hidden by the current search");
            }
        }
    }
    Ok(())
}
