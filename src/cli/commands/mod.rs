//! Command implementations for the listing loader CLI
//!
//! Each command is implemented in its own module:
//! - `load`: extract the export and append it to SQLite in one transaction
//! - `inspect`: extract and print records without storage
//! - `schema`: create the `exchange_rates` table

pub mod inspect;
pub mod load;
pub mod schema;
pub mod shared;

use crate::Result;
use crate::cli::args::{Args, Commands};
use tokio_util::sync::CancellationToken;

/// Main command runner
///
/// `cancellation_token` is cancelled by the signal handler; only `load`
/// observes it, since it is the only command with uncommitted work.
pub async fn run(args: Args, cancellation_token: CancellationToken) -> Result<()> {
    match args.get_command()? {
        Commands::Load(load_args) => load::run_load(load_args, cancellation_token).await,
        Commands::Inspect(inspect_args) => inspect::run_inspect(inspect_args).await,
        Commands::Schema(schema_args) => schema::run_schema(schema_args).await,
    }
}
