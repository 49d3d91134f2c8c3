// NOTE: catalog CLI
//
// Each invocation is one page visit: open the configured mirror, load (or
// seed from page markup), run a single handler, exit. The store is the only
// writer of the mirror and always writes the whole catalog.

mod args;
mod commands;
pub mod config;
mod handlers;
pub mod logging;
pub mod workspace;

pub use args::{Cli, Commands, LogLevel, OutputFormat};
pub use commands::run;
