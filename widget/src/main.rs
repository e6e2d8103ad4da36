//! Ratewatch Binary
//!
//! Terminal front end for the USD/INR converter widget.

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ratewatch_common::Currency;
use ratewatch_widget::command::{Command, Outcome, ParseCommandError, HELP};
use ratewatch_widget::{view, ConverterApp, WidgetConfig};

/// USD/INR currency converter
#[derive(Parser, Debug)]
#[command(name = "ratewatch")]
#[command(about = "Convert between USD and INR with a live exchange rate")]
struct Args {
    /// Initial amount
    #[arg(short, long)]
    amount: Option<String>,

    /// Initial source currency (USD or INR)
    #[arg(short, long)]
    from: Option<Currency>,

    /// Seconds between automatic rate refreshes
    #[arg(long)]
    refresh_secs: Option<u64>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_logging(config: &WidgetConfig) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone()),
    );

    if config.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Environment first, flags override
    let mut config = WidgetConfig::from_env();
    if let Some(amount) = args.amount {
        config.initial_amount = amount;
    }
    if let Some(from) = args.from {
        config.initial_from = from;
    }
    if let Some(secs) = args.refresh_secs {
        config.refresh_interval = std::time::Duration::from_secs(secs);
    }
    config.json_logs |= args.json_logs;

    init_logging(&config);

    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return Err(anyhow::anyhow!("Configuration error: {}", e));
    }

    info!("Starting ratewatch");

    let app = ConverterApp::mount_http(&config)?;
    let widget = app.widget().clone();

    // Redraw on every state change
    let mut updates = widget.subscribe();
    let renderer = tokio::spawn(async move {
        loop {
            let panel = view::render(&updates.borrow_and_update());
            println!("\n{}", panel);
            if updates.changed().await.is_err() {
                break;
            }
        }
    });

    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };

                match line.parse::<Command>() {
                    Ok(command) => match command.apply(&widget) {
                        Outcome::Continue => {}
                        Outcome::Print(text) => println!("{}", text),
                        Outcome::Quit => break,
                    },
                    Err(ParseCommandError::Empty) => {}
                    Err(e) => println!("{}", e),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    app.unmount().await;
    renderer.abort();

    info!("ratewatch stopped");
    Ok(())
}
