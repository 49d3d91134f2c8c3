use crate::args::OutputFormat;
use crate::config::Backend;
use crate::handlers::describe_load;
use crate::workspace::Workspace;
use anyhow::{Context, Result};
use catalog_page::{ConsoleNotifier, ValidationPolicy};
use catalog_store::LoadOutcome;
use std::path::PathBuf;

pub fn handle(
    data_dir: PathBuf,
    page: Option<PathBuf>,
    backend: Option<Backend>,
    validation: Option<ValidationPolicy>,
    format: OutputFormat,
) -> Result<()> {
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

    let mut workspace = Workspace::open(data_dir)?;
    {
        let config = workspace.config_mut();
        if let Some(backend) = backend {
            config.storage.backend = backend;
        }
        if let Some(validation) = validation {
            config.form.validation = validation;
        }
        if let Some(page) = page {
            // Later commands run from other directories
            let page = std::fs::canonicalize(&page)
                .with_context(|| format!("Failed to read page: {}", page.display()))?;
            config.page.path = Some(page);
        }
    }
    workspace.save_config()?;

    let session = workspace.open_page(None, ConsoleNotifier)?;
    let outcome = session.load_outcome();
    let config = workspace.config();

    match format {
        OutputFormat::Json => {
            let loaded = match outcome {
                LoadOutcome::Restored(_) => "restored",
                LoadOutcome::Seeded(_) => "seeded",
            };
            let value = serde_json::json!({
                "data_dir": workspace.data_dir(),
                "backend": config.storage.backend.to_string(),
                "key": config.storage.key,
                "validation": config.form.validation.to_string(),
                "loaded": loaded,
                "count": outcome.count(),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Plain => {
            println!("Data directory: {}", workspace.data_dir().display());
            println!("Config: {}", workspace.config_path().display());
            println!(
                "Storage: {} (key \"{}\")",
                config.storage.backend, config.storage.key
            );
            println!("{}", describe_load(outcome));
        }
    }

    Ok(())
}
