use std::path::PathBuf;

use back_tap::config::{load_config, save_config, Config};
use back_tap::local::{client, process_file, server};
use back_tap::Result;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "back-tap")]
#[command(about = "Accelerometer tap and multi-tap detection")]
struct Cli {
    /// YAML config file. Defaults are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Detect taps in a CSV recording.
    Process(ProcessArgs),
    /// Stream a simulated accelerometer over TCP.
    Server(NetworkArgs),
    /// Run the live detector against a server.
    Client(ClientArgs),
    /// Write the default configuration to a file.
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
struct ProcessArgs {
    #[arg(long)]
    input: PathBuf,
    #[arg(long)]
    output: Option<PathBuf>,
    #[arg(long)]
    plot: bool,
}

#[derive(Debug, Args)]
struct NetworkArgs {
    #[arg(long)]
    address: Option<String>,
}

#[derive(Debug, Args)]
struct ClientArgs {
    #[command(flatten)]
    network: NetworkArgs,
    #[arg(long)]
    plot: bool,
    #[arg(long)]
    event_log: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ConfigArgs {
    #[arg(long, default_value = "back_tap.yaml")]
    output: PathBuf,
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Process(args) => {
            config.plot.enabled |= args.plot;
            process_file::run(&args.input, args.output.as_deref(), &config)
        }
        Commands::Server(args) => {
            if let Some(address) = args.address {
                config.network.address = address;
            }
            server::run(&config)
        }
        Commands::Client(args) => {
            if let Some(address) = args.network.address {
                config.network.address = address;
            }
            config.plot.enabled |= args.plot;
            if args.event_log.is_some() {
                config.event_log = args.event_log;
            }
            client::run(&config)
        }
        Commands::Config(args) => {
            save_config(&config, &args.output)?;
            log::info!("wrote config to {}", args.output.display());
            Ok(())
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        log::error!("{}", err);
        std::process::exit(1);
    }
}
