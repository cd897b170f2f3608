use anyhow::Result;
use clap::Parser;
use indicator_listener::{interrupt_flag, Listener, ListenerConfig, PrintMode, Stop};
use std::io;
use tracing_subscriber::EnvFilter;

/// Print every UDP datagram received on HOST:PORT.
#[derive(Parser, Debug)]
#[command(name = "listener", version, about)]
struct Cli {
    host: String,

    port: u16,

    /// Print each datagram as a record with its sender, readable by `tabulate`.
    #[arg(long)]
    raw: bool,

    /// Stop after N datagrams.
    #[arg(long, value_name = "N")]
    count: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let interrupted = interrupt_flag()?;

    let mut config = ListenerConfig::new(cli.host, cli.port);
    config.count = cli.count;
    if cli.raw {
        config.mode = PrintMode::Raw;
    }

    // Bind and receive failures are reported on stdout and end the run
    // normally.
    let listener = match Listener::bind(config) {
        Ok(listener) => listener,
        Err(err) => {
            println!("{}", err);
            return Ok(());
        }
    };
    println!("Bound");

    match listener.run(io::stdout().lock(), &interrupted) {
        Ok(Stop::Interrupted) => println!("interrupted"),
        Ok(Stop::Count(_)) => {}
        Err(err) => println!("{}", err),
    }
    Ok(())
}
