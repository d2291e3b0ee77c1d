use clap::{Parser, Subcommand, ValueEnum};
use dboard::logging::{self, CLIENT};
use dboard::{BoardConfig, CancelToken, DiscoveryClient, EnvStore, FileEeprom, InfoRequest, Service};
use log::warn;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "dboard", about = "DevelBoard identity and network service discovery")]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show information about this board
    IdentityInfo {
        /// Print revision only
        #[arg(short = 'r')]
        revision_only: bool,

        /// Store the human-readable model string in variable VAR
        #[arg(short = 'v', value_name = "VAR")]
        var: Option<String>,
    },
    /// Discover network services exposed by the dboard tool
    Discover {
        #[arg(value_enum)]
        service: ServiceArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ServiceArg {
    Nfs,
    Tftp,
}

impl From<ServiceArg> for Service {
    fn from(arg: ServiceArg) -> Self {
        match arg {
            ServiceArg::Nfs => Service::Nfs,
            ServiceArg::Tftp => Service::Tftp,
        }
    }
}

fn identity_info(config: &BoardConfig, request: InfoRequest) -> Result<(), String> {
    let eeprom = FileEeprom::new(&config.eeprom.device_a, &config.eeprom.device_b);
    // Only the store request touches the persistent variables
    let mut env = match &request {
        InfoRequest::StoreModel(_) => EnvStore::open(&config.environment)
            .map_err(|e| format!("cannot open environment {}: {}", config.environment.display(), e))?,
        _ => EnvStore::in_memory(),
    };

    if let Some(text) = dboard::identity_info(&eeprom, &mut env, &request).map_err(|e| e.to_string())? {
        print!("{}", text);
    }
    Ok(())
}

fn discover(config: &BoardConfig, service: Service) -> Result<(), String> {
    let mut client = DiscoveryClient::from_config(config)
        .map_err(|e| format!("cannot open environment {}: {}", config.environment.display(), e))?;

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_token.cancel()) {
        warn!(target: CLIENT, "cannot install interrupt handler: {}", e);
    }

    let server = client.discover(service, &cancel).map_err(|e| e.to_string())?;
    println!("Found server IP: {}", server.ip());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(if cli.debug { "debug" } else { "info" });

    let config = match &cli.config {
        Some(path) => match BoardConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => BoardConfig::default(),
    };

    let result = match cli.command {
        Command::IdentityInfo { revision_only, var } => {
            identity_info(&config, InfoRequest::from_flags(revision_only, var))
        }
        Command::Discover { service } => discover(&config, service.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("error: {}", msg);
            ExitCode::FAILURE
        }
    }
}
