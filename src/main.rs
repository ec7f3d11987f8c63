use clap::Parser;
use exrates_loader::cli::{args::Args, commands};
use exrates_loader::constants::exit_codes;
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(exit_codes::SUCCESS);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(exit_codes::IO_FAILURE);
    });

    let result = runtime.block_on(async {
        let cancellation_token = CancellationToken::new();
        let command = commands::run(args, cancellation_token.clone());
        tokio::pin!(command);

        tokio::select! {
            result = &mut command => result,
            signal = tokio::signal::ctrl_c() => {
                if signal.is_ok() {
                    eprintln!("\nReceived CTRL+C, stopping before the next line...");
                    cancellation_token.cancel();
                }
                // Let an in-flight load roll back before exiting
                command.await
            }
        }
    });

    match result {
        Ok(()) => process::exit(exit_codes::SUCCESS),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(error.exit_code());
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("exrates - Exchange-Rate Listing Loader");
    println!("======================================");
    println!();
    println!("Extract P2P exchange-rate listings from a flat text export and load");
    println!("them into the exchange_rates table of a SQLite database.");
    println!();
    println!("USAGE:");
    println!("    exrates <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    load        Extract every line and load it into the database (main command)");
    println!("    inspect     Extract every line and print the records without storage");
    println!("    schema      Create the exchange_rates table if it does not exist");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Load ./results into ./db.sqlite:");
    println!("    exrates load");
    println!();
    println!("    # Load a specific export, keeping empty lines as NULL rows:");
    println!("    exrates load -i export.txt -d rates.sqlite --empty-lines nulls");
    println!();
    println!("    # Print the extracted records as JSON lines:");
    println!("    exrates inspect -i export.txt --output-format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    exrates <COMMAND> --help");
}
