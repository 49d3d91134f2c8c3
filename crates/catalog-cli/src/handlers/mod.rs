pub mod add;
pub mod clear;
pub mod init;
pub mod list;
pub mod render;

use catalog_store::LoadOutcome;

pub(crate) fn describe_load(outcome: LoadOutcome) -> String {
    match outcome {
        LoadOutcome::Restored(n) => format!("Restored {} product(s) from the mirror", n),
        LoadOutcome::Seeded(n) => format!("Seeded {} product(s) from page markup", n),
    }
}
