use clap::{Args, Parser, Subcommand};
use ferrous_recursor_domain::CliOverrides;
use ferrous_recursor_infrastructure::dns::DnsServerHandler;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "ferrous-recursor")]
#[command(version)]
#[command(about = "Ferrous Recursor - iterative DNS resolver with a TTL-bounded cache")]
struct Cli {
    /// Configuration file path
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a hostname and print its aliases and addresses
    Resolve {
        /// Hostname to resolve
        hostname: String,

        #[command(flatten)]
        cache: CacheArgs,
    },
    /// Answer A queries from local clients
    Serve {
        /// Listen port
        #[arg(short = 'p', long)]
        port: Option<u16>,

        /// Bind address
        #[arg(short = 'b', long)]
        bind: Option<String>,

        #[command(flatten)]
        cache: CacheArgs,
    },
}

#[derive(Args)]
struct CacheArgs {
    /// Enable the record cache
    #[arg(short = 'c', long)]
    caching: bool,

    /// TTL in seconds forced onto cached records (0 keeps their own)
    #[arg(short = 't', long, value_name = "SECONDS")]
    ttl: Option<i64>,

    /// Cache file path
    #[arg(long, value_name = "FILE")]
    cache_file: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        let (port, bind_address, cache) = match &self.command {
            Command::Resolve { cache, .. } => (None, None, cache),
            Command::Serve { port, bind, cache } => (*port, bind.clone(), cache),
        };

        CliOverrides {
            port,
            bind_address,
            caching: cache.caching,
            ttl: cache.ttl,
            cache_path: cache.cache_file.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;
    bootstrap::init_logging(&config);

    let services = di::ResolverServices::new(&config)?;
    services.load_cache().await;

    match cli.command {
        Command::Resolve { hostname, .. } => {
            let result = services.resolve_hostname.execute(&hostname).await;
            services.persist_cache();

            let (hostname, aliases, addresses) = result?.into_triple();
            println!("{}", hostname);
            println!("{:?}", aliases);
            println!("{:?}", addresses);
        }
        Command::Serve { .. } => {
            info!("Starting Ferrous Recursor v{}", env!("CARGO_PKG_VERSION"));

            let dns_addr = format!("{}:{}", config.server.bind_address, config.server.port);
            let handler = DnsServerHandler::new(services.resolve_hostname.clone());

            tokio::select! {
                result = server::start_dns_server(dns_addr, handler) => {
                    if let Err(e) = result {
                        error!(error = %e, "DNS server error");
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown requested");
                }
            }

            services.persist_cache();
            info!("Server shutdown complete");
        }
    }

    Ok(())
}
