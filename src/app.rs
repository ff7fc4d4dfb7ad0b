// src/app.rs
use anyhow::Result;
use tracing::info;

use poolscout::domain::pools::PoolFilter;
use poolscout::shared::types::{BotConfig, PoolRecord};
use poolscout::PoolService;

/// Команда верхнего уровня (уже разобранная из CLI)
#[derive(Debug, Clone)]
pub enum AppCommand {
    Pools {
        protocol: Option<String>,
        filter: PoolFilter,
        refresh: bool,
    },
    Search {
        query: String,
    },
    Resolve {
        address: String,
    },
    Stats {
        refresh: bool,
    },
}

pub async fn run(config: BotConfig, command: AppCommand) -> Result<()> {
    let service = PoolService::new(&config);

    match command {
        AppCommand::Pools {
            protocol,
            filter,
            refresh,
        } => {
            let pools = service
                .top_pools(protocol.as_deref(), &filter, refresh)
                .await?;
            info!("✅ {} pools after filtering", pools.len());

            if pools.is_empty() {
                println!("No pools matched the filters");
                return Ok(());
            }
            for (i, pool) in pools.iter().enumerate() {
                println!("{:>3}. {}", i + 1, format_pool_line(pool));
            }
        }

        AppCommand::Search { query } => {
            let result = service.search(&query).await?;
            println!(
                "Search '{}': {} pools found",
                result.token, result.total_pools
            );

            for chain in &result.blockchains {
                println!(
                    "\n{} — {} pools, TVL ${:.0}, best APR {:.2}%",
                    chain.chain_name, chain.pool_count, chain.total_tvl, chain.best_apr
                );
                for protocol in &chain.protocols {
                    println!(
                        "  {} — {} pools, TVL ${:.0}",
                        protocol.protocol_name, protocol.pool_count, protocol.total_tvl
                    );
                    for pool in &protocol.pools {
                        println!("    {}", format_pool_line(pool));
                    }
                }
            }
        }

        AppCommand::Resolve { address } => {
            println!("{} -> {}", address, service.resolve(&address));
        }

        AppCommand::Stats { refresh } => {
            let overview = service.market_overview(refresh).await?;
            for (name, stats) in overview {
                println!(
                    "{}: {} active pools, TVL ${:.0}, Vol 24H ${:.0}, Fees 24H ${:.0}, CE {:.3}",
                    name,
                    stats.active_pools,
                    stats.total_value_locked,
                    stats.volume_24h,
                    stats.fees_24h,
                    stats.capital_efficiency
                );
            }
        }
    }

    Ok(())
}

fn format_pool_line(pool: &PoolRecord) -> String {
    let farm_mark = if pool.has_farm { " 🚜" } else { "" };
    format!(
        "[{}] {} | TVL ${:.0} | Vol 24H ${:.0} | APR {:.2}% | Fee {}{}",
        pool.protocol,
        pool.pool_name(),
        pool.tvl_usd,
        pool.volume_24h,
        pool.total_apr,
        pool.fee_tier_display(),
        farm_mark
    )
}
