use crate::workspace::Workspace;
use anyhow::{Context, Result};
use catalog_page::ConsoleNotifier;
use std::io::Write;
use std::path::Path;
use tracing::info;

pub fn handle(
    workspace: &Workspace,
    search: Option<&str>,
    page: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let mut session = workspace.open_page(page, ConsoleNotifier)?;
    if let Some(term) = search {
        session.search_submit(term);
    }

    let html = session.to_html();

    match output {
        Some(path) => {
            std::fs::write(path, &html)
                .with_context(|| format!("Failed to write page: {}", path.display()))?;
            info!(path = %path.display(), count = session.records().len(), "rendered catalog page");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
