//! FIL Forwarder CLI
//!
//! Send Filecoin from an Ethereum wallet to any Filecoin address, via the
//! FilForwarder bridging contract:
//!
//! - `filforwarder validate <address>` - check a destination offline
//! - `filforwarder balance`            - show the signer's FIL balance
//! - `filforwarder send <dest> <amt>`  - forward FIL to a Filecoin address

mod config;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result};
use tracing_subscriber::EnvFilter;

use filforwarder_rs::{
    build_transfer_intent, format_fil, parse_fil, settle_submission, validate_address,
    ForwarderClient, Network, TransactionOutcome,
};

use config::Config;

#[derive(Parser)]
#[command(name = "filforwarder")]
#[command(about = "Send FIL from an Ethereum wallet to any Filecoin address", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a Filecoin address and print its canonical byte encoding
    Validate {
        /// The address to check (f0/f1/f2/f3/f4, or t-prefixed)
        address: String,

        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the signer's native FIL balance
    Balance,

    /// Forward FIL to a Filecoin address
    Send {
        /// Destination Filecoin address
        destination: String,

        /// Amount to send, in FIL (decimal)
        amount: String,

        /// Interpret the amount as raw attoFIL instead of FIL
        #[arg(long)]
        atto: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Validate { address, json } => {
            let parsed = validate_address(&address)
                .map_err(|e| eyre!("{address} is not a valid Filecoin address: {e}"))?;
            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "protocol": parsed.protocol() as u8,
                        "bytes": format!("0x{}", hex::encode(parsed.to_bytes())),
                        "mainnet": parsed.to_display(Network::Mainnet),
                        "testnet": parsed.to_display(Network::Testnet),
                    })
                );
            } else {
                println!("protocol:  {}", parsed.protocol() as u8);
                println!("bytes:     0x{}", hex::encode(parsed.to_bytes()));
                println!("mainnet:   {}", parsed.to_display(Network::Mainnet));
                println!("testnet:   {}", parsed.to_display(Network::Testnet));
            }
            Ok(())
        }

        Commands::Balance => {
            let config = Config::load()?;
            let client =
                ForwarderClient::connect(&config.rpc_url, config.chain_id, &config.private_key)?;
            let balance = client.balance().await?;
            println!("account:  {}", client.signer_address());
            println!("balance:  {} FIL ({} attoFIL)", format_fil(balance), balance);
            Ok(())
        }

        Commands::Send {
            destination,
            amount,
            atto,
        } => send(&destination, &amount, atto).await,
    }
}

/// The full forwarding flow: validate, check balance, build intent, submit.
async fn send(destination: &str, amount: &str, atto: bool) -> Result<()> {
    let config = Config::load()?;
    let network = Network::for_chain_id(config.chain_id);

    // Validate inputs before touching the network
    let parsed = validate_address(destination)
        .map_err(|e| eyre!("{destination} is not a valid Filecoin address: {e}"))?;
    let value = if atto {
        alloy::primitives::U256::from_str_radix(amount, 10)
            .map_err(|e| eyre!("invalid attoFIL amount {amount}: {e}"))?
    } else {
        parse_fil(amount)?
    };

    let client =
        ForwarderClient::connect(&config.rpc_url, config.chain_id, &config.private_key)?;
    let balance = client.balance().await?;

    let call = build_transfer_intent(&parsed, value, balance, config.forwarder_address)?;
    tracing::info!(
        destination = %parsed.to_display(network),
        value_fil = %format_fil(value),
        forwarder = %call.to,
        "Submitting forward"
    );

    let outcome = settle_submission(
        client.submit(&call),
        |hash| println!("forwarded {} FIL to {destination}: {hash}", format_fil(value)),
        |reason| eprintln!("forward failed: {reason}"),
    )
    .await;

    match outcome {
        TransactionOutcome::Confirmed { .. } => Ok(()),
        // Reason already reported through the on_error callback
        TransactionOutcome::Failed { .. } => Err(eyre!("submission failed")),
        // settle_submission only returns terminal outcomes
        TransactionOutcome::Pending => unreachable!(),
    }
}
