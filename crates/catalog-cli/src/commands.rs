use super::args::{Cli, Commands};
use super::handlers;
use crate::config::resolve_data_dir;
use crate::workspace::Workspace;
use anyhow::Result;
use std::path::Path;

pub fn run(cli: Cli) -> Result<()> {
    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    let format = cli.format;

    let Some(command) = cli.command else {
        show_guidance(&data_dir);
        return Ok(());
    };

    match command {
        Commands::Init {
            page,
            backend,
            validation,
        } => handlers::init::handle(data_dir, page, backend, validation, format),

        Commands::List { search, page } => handlers::list::handle(
            &Workspace::open(data_dir)?,
            search.as_deref(),
            page.as_deref(),
            format,
        ),

        Commands::Add {
            name,
            desc,
            price,
            img,
            search,
            page,
        } => handlers::add::handle(
            &Workspace::open(data_dir)?,
            handlers::add::AddArgs {
                name,
                description: desc,
                price,
                image_url: img,
            },
            search.as_deref(),
            page.as_deref(),
            format,
        ),

        Commands::Render {
            search,
            page,
            output,
        } => handlers::render::handle(
            &Workspace::open(data_dir)?,
            search.as_deref(),
            page.as_deref(),
            output.as_deref(),
        ),

        Commands::Clear => handlers::clear::handle(&Workspace::open(data_dir)?, format),
    }
}

fn show_guidance(data_dir: &Path) {
    println!("catalog - product catalog backed by a local key/value mirror\n");

    if !data_dir.join(crate::config::CONFIG_FILE).exists() {
        println!("Get started:");
        println!("  catalog init --page index.html\n");
        println!("The init command will:");
        println!("  1. Create {}", data_dir.display());
        println!("  2. Save storage and form settings");
        println!("  3. Restore the catalog, or seed it from the page's product markup\n");
    } else {
        println!("Quick commands:");
        println!("  catalog list                       # Show every product");
        println!("  catalog list --search rust         # Filter by name");
        println!("  catalog add --name \"Sách B\"        # Add a product");
        println!("  catalog render -o index.html       # Write the page\n");
    }

    println!("For more commands:");
    println!("  catalog --help");
}
