use clap::Parser;
use dotenvy::dotenv;

mod shopify;

use shopify::{handle_shopify_command, ShopifyCommand};

#[derive(Parser, Debug)]
#[command(version, about = "Command-line queries against the Shopify store watched by the price watch server")]
pub struct Arguments {
    #[command(subcommand)]
    command: ShopifyCommand,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    let cli = Arguments::parse();
    if let Err(e) = handle_shopify_command(cli.command).await {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
