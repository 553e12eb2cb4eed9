//! Obtains a user token and secret for a registered Twitter application.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use log::{LevelFilter, Log, Metadata, Record};
use twitter_oauth1::{console_prompt, AuthorizationFlow, Client, Config, Credentials};

#[derive(Parser, Debug)]
#[command(name = "twitter-auth", about = "Get your Twitter token.")]
struct Args {
    /// Consumer key
    #[arg(long, default_value = "")]
    key: String,
    /// Consumer secret
    #[arg(long, default_value = "")]
    secret: String,
    /// Log requests and responses
    #[arg(long)]
    debug: bool,
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        eprintln!("[{}] {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn main() -> Result<()> {
    let args = Args::parse();
    if args.debug {
        log::set_logger(&LOGGER).map_err(|err| anyhow::anyhow!("{}", err))?;
        log::set_max_level(LevelFilter::Debug);
    }

    if args.key.is_empty() || args.secret.is_empty() {
        println!("Get your Twitter token.\n");
        println!("1. Register your app at http://dev.twitter.com.");
        println!("2. Run this program with --key $CONSUMER_KEY --secret $CONSUMER_SECRET.\n");
        Args::command().print_help()?;
        return Ok(());
    }

    let config = Config::default().with_debug(args.debug);
    let client = Client::with_config(Credentials::new(args.key, args.secret), config)
        .context("failed to build HTTP client")?;

    let access = AuthorizationFlow::new(&client)
        .run(console_prompt)
        .context("authorization failed")?;

    println!("\nHere's your data:\n");
    println!("Token: {}", access.identifier);
    println!("Secret: {}", access.secret);
    Ok(())
}
