use crate::args::OutputFormat;
use crate::workspace::Workspace;
use anyhow::Result;
use catalog_store::PersistOutcome;

pub fn handle(workspace: &Workspace, format: OutputFormat) -> Result<()> {
    let mut store = workspace.store()?;

    if let PersistOutcome::Failed(reason) = store.clear() {
        anyhow::bail!("Failed to clear catalog: {}", reason);
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "cleared": store.key() })),
        OutputFormat::Plain => println!("Cleared catalog \"{}\"", store.key()),
    }
    Ok(())
}
