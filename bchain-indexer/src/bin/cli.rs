use std::{path::PathBuf, sync::Arc, time::Duration, time::Instant};

use bchain_indexer::{
    config::Config,
    network::Network,
    params::Coin,
    rpc::{ChainSetup, NodeClient, RpcClient},
    storage::TxStore,
    BlockIndexer, Registry, Result,
};
use bitcoin::BlockHash;
use clap::Parser;
use log::{info, warn};

#[derive(Parser, Debug)]
#[command(version = "0.1", about = "Indexes node blocks into packed transaction records")]
struct Cli {
    /// Reads settings from a JSON file; flags take precedence
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Sets a custom data directory
    #[arg(long, value_name = "DATADIR")]
    datadir: Option<PathBuf>,

    /// Sets the RPC server address
    #[arg(long, value_name = "RPCADDRESS")]
    rpcaddress: Option<String>,

    /// Sets the RPC username
    #[arg(long, value_name = "USERNAME")]
    user: Option<String>,

    /// Sets the RPC password
    #[arg(long, value_name = "PASSWORD")]
    pass: Option<String>,

    /// Network family of the node (dash, bcd)
    #[arg(long, value_name = "COIN")]
    coin: Option<Coin>,

    /// Expected network; startup warns when the node reports another one
    #[arg(long, value_name = "NETWORK")]
    network: Option<Network>,

    /// Height to start from on an empty index
    #[arg(long, value_name = "HEIGHT")]
    start_height: Option<u32>,

    /// Delay between tip polls once synced
    #[arg(long, value_name = "MILLISECONDS")]
    poll_interval: Option<u64>,

    /// Logs throughput every N blocks
    #[arg(
        long,
        value_name = "BENCHFREQUENCY",
        default_value = "10000",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    bench_frequency: u32,
}

impl Cli {
    fn overrides(&self) -> Config {
        Config {
            datadir: self.datadir.clone(),
            rpcaddress: self.rpcaddress.clone(),
            user: self.user.clone(),
            pass: self.pass.clone(),
            coin: self.coin,
            network: self.network,
            start_height: self.start_height,
            poll_interval_ms: self.poll_interval,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    }
    .merge(cli.overrides());

    let client = RpcClient::new(config.rpcaddress()?, config.auth())?;
    let registry = Arc::new(Registry::new());
    let setup = ChainSetup::initialize(&client, &registry, config.coin()).await?;
    if let Some(expected) = config.network {
        if expected != setup.params.net {
            warn!("Expected {expected} but node runs {}", setup.params.net);
        }
    }
    info!("Network {} (testnet: {})", setup.network, setup.testnet);

    let store = TxStore::new(config.datadir()?)?;
    store.log_sizes()?;
    let indexer = BlockIndexer::new(store, setup.codec());
    let parser = setup.parser();
    let poll = Duration::from_millis(config.poll_interval_ms());

    let mut next_height = indexer
        .highest_height()?
        .map_or(config.start_height.unwrap_or(0), |h| h + 1);
    let mut last_hash: Option<BlockHash> = None;
    let mut indexed_block = 0;
    let mut start_time = Instant::now();

    loop {
        let best_height = match client.get_best_block_height().await {
            Ok(height) => height,
            Err(e) => {
                warn!("Failed to get chain tip: {e}");
                tokio::time::sleep(poll).await;
                continue;
            }
        };
        if next_height > best_height {
            tokio::time::sleep(poll).await;
            continue;
        }

        let hash = client.get_block_hash(next_height).await?;
        let raw = client.get_raw_block(&hash).await?;
        let block = parser.parse_block(&raw)?;

        if let Some(previous) = last_hash {
            if block.prev_hash != previous && next_height > 0 {
                warn!("Reorg detected at height {next_height}, rolling back");
                next_height -= 1;
                indexer.invalidate_block(next_height)?;
                last_hash = None;
                continue;
            }
        }

        indexer.index_block(&block, next_height)?;
        last_hash = Some(hash);
        next_height += 1;

        indexed_block += 1;
        if indexed_block % cli.bench_frequency == 0 {
            info!(
                "Processed {} blocks in {:?}, at height {}",
                cli.bench_frequency,
                start_time.elapsed(),
                next_height - 1
            );
            start_time = Instant::now();
        }
    }
}
