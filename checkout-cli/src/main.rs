//! Checkout CLI
//!
//! Command-line interface for the Checkout API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use checkout_client::{CheckoutClient, DEFAULT_LOCALE_HEADER};

#[derive(Parser)]
#[command(name = "checkout")]
#[command(author, version, about = "Checkout API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Checkout API
    #[arg(
        long,
        env = "CHECKOUT_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    /// Header carrying the territory signal
    #[arg(long, env = "LOCALE_HEADER", default_value = DEFAULT_LOCALE_HEADER)]
    locale_header: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a checkout and print the payment link
    Pay {
        /// Payer phone number
        #[arg(long)]
        phone: Option<String>,
        /// Territory to simulate (e.g. TZ, KE)
        #[arg(long)]
        locale: Option<String>,
    },
    /// Show the price for a territory
    Quote {
        /// Territory to simulate (e.g. TZ, KE)
        #[arg(long)]
        locale: Option<String>,
    },
    /// Check API health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = CheckoutClient::new(&cli.api_url).with_locale_header(cli.locale_header);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Pay { phone, locale } => {
            let resp = client.pay(phone.as_deref(), locale.as_deref()).await?;
            println!("{}", serde_json::to_string_pretty(&resp)?);
        }

        Commands::Quote { locale } => {
            let quote = client.quote(locale.as_deref()).await?;
            println!("{} {}", quote.amount, quote.currency);
        }
    }

    Ok(())
}
