use anyhow::Context;
use clap::{Parser, Subcommand};
use order_desk::{OrderDocument, TotalsReport, setup_environment};
use shared::session::Role;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "order-desk", version, about = "Order pricing tools for the store back office")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print subtotal and final total of an order document
    Totals {
        /// JSON file with `items`, `catalog` and `charges`
        file: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = setup_environment()?;
    let session = config.session()?;

    match cli.command {
        Command::Totals { file, json } => {
            session.require_role(Role::Cashier)?;
            tracing::debug!(file = %file.display(), store_id = ?session.store_id, "Computing totals");

            let doc = OrderDocument::load(&file)?;
            let report = TotalsReport::build(&doc, &session, &config.currency_format());

            if json {
                let out = serde_json::to_string_pretty(&report)
                    .context("failed to serialize totals report")?;
                println!("{}", out);
            } else {
                print!("{}", report.render());
            }
        }
    }

    Ok(())
}
