mod app;

use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::warn;

use poolscout::domain::pools::{PoolFilter, SortBy};
use poolscout::shared::config::ConfigLoader;
use poolscout::shared::types::BotConfig;

#[derive(Parser, Debug)]
#[command(version, about = "Cross-chain DEX liquidity pool aggregator CLI")]
struct Args {
    /// Path to config file
    #[arg(long, default_value = "Config.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List top pools with filtering and sorting
    Pools {
        /// Protocol to query (hyperion, bluefin); all when omitted
        #[arg(long)]
        protocol: Option<String>,

        /// Sort key: tvl, volume, apr or fees
        #[arg(long, default_value = "tvl")]
        sort_by: String,

        /// Minimum TVL in USD
        #[arg(long, default_value = "100000")]
        min_tvl: f64,

        /// Minimum 24h volume in USD
        #[arg(long)]
        min_volume: Option<f64>,

        /// Fee tiers to keep (100, 500, 2500, 10000); repeatable
        #[arg(long)]
        fee_tier: Vec<u32>,

        /// Only pools with active farming
        #[arg(long)]
        farms_only: bool,

        /// Maximum number of results
        #[arg(long, default_value = "10")]
        limit: usize,

        /// Bypass the cache and refetch from upstream
        #[arg(long)]
        refresh: bool,
    },

    /// Search pools by token ("APT") or pair ("APT-USDT", "APT/USDT")
    Search { query: String },

    /// Resolve an on-chain token address to a display symbol
    Resolve { address: String },

    /// Market statistics per protocol
    Stats {
        /// Bypass the cache and refetch from upstream
        #[arg(long)]
        refresh: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let config = if Path::new(&args.config).exists() {
        ConfigLoader::load_config(&args.config)?
    } else {
        warn!("Config file {} not found, using defaults", args.config);
        BotConfig::default()
    };

    let command = match args.command {
        Command::Pools {
            protocol,
            sort_by,
            min_tvl,
            min_volume,
            fee_tier,
            farms_only,
            limit,
            refresh,
        } => {
            let sort_by: SortBy = sort_by.parse().map_err(anyhow::Error::msg)?;
            app::AppCommand::Pools {
                protocol,
                filter: PoolFilter {
                    min_tvl,
                    min_volume,
                    fee_tiers: if fee_tier.is_empty() {
                        None
                    } else {
                        Some(fee_tier)
                    },
                    has_farm: if farms_only { Some(true) } else { None },
                    sort_by,
                    limit: Some(limit),
                },
                refresh,
            }
        }
        Command::Search { query } => app::AppCommand::Search { query },
        Command::Resolve { address } => app::AppCommand::Resolve { address },
        Command::Stats { refresh } => app::AppCommand::Stats { refresh },
    };

    app::run(config, command).await
}
