use std::sync::Arc;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use bitcoin::BlockHash;
use jsonrpsee::{
    core::client::ClientT,
    http_client::{HeaderMap, HeaderValue, HttpClient, HttpClientBuilder},
    rpc_params,
};
use log::info;
use serde::Deserialize;

use crate::{
    codec::TxCodec,
    params::{Coin, ParameterSet, Registry},
    parser::TxParser,
    Error, Result,
};

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChainInfo {
    pub chain: String,
    pub blocks: u32,
    #[serde(rename = "bestblockhash")]
    pub best_block_hash: BlockHash,
}

/// Source of chain metadata and raw blocks.
#[async_trait]
pub trait NodeClient: Send + Sync {
    async fn get_chain_info(&self) -> Result<ChainInfo>;
    async fn get_best_block_height(&self) -> Result<u32>;
    async fn get_block_hash(&self, height: u32) -> Result<BlockHash>;
    async fn get_raw_block(&self, hash: &BlockHash) -> Result<Vec<u8>>;
}

/// JSON-RPC client for a full node.
#[derive(Debug, Clone)]
pub struct RpcClient {
    client: HttpClient,
}

impl RpcClient {
    pub fn new(url: &str, auth: Option<(&str, &str)>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some((user, pass)) = auth {
            let token = STANDARD.encode(format!("{user}:{pass}"));
            let value = HeaderValue::from_str(&format!("Basic {token}"))
                .map_err(|e| Error::Other(e.into()))?;
            headers.insert("Authorization", value);
        }
        let client = HttpClientBuilder::default().set_headers(headers).build(url)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl NodeClient for RpcClient {
    async fn get_chain_info(&self) -> Result<ChainInfo> {
        Ok(self
            .client
            .request("getblockchaininfo", rpc_params![])
            .await?)
    }

    async fn get_best_block_height(&self) -> Result<u32> {
        Ok(self.client.request("getblockcount", rpc_params![]).await?)
    }

    async fn get_block_hash(&self, height: u32) -> Result<BlockHash> {
        Ok(self
            .client
            .request("getblockhash", rpc_params![height])
            .await?)
    }

    async fn get_raw_block(&self, hash: &BlockHash) -> Result<Vec<u8>> {
        let raw: String = self
            .client
            .request("getblock", rpc_params![hash.to_string(), 0])
            .await?;
        Ok(hex::decode(raw)?)
    }
}

/// Chain selection made once at startup from what the node reports.
#[derive(Debug, Clone)]
pub struct ChainSetup {
    pub params: Arc<ParameterSet>,
    pub testnet: bool,
    pub network: &'static str,
}

impl ChainSetup {
    pub async fn initialize<C>(client: &C, registry: &Registry, coin: Coin) -> Result<Self>
    where
        C: NodeClient + ?Sized,
    {
        let family = coin.family();
        registry.ensure_registered(&family)?;

        let chain_info = client.get_chain_info().await?;
        let params = registry.resolve(&family, &chain_info.chain)?;
        info!("rpc: block chain {}", params.name);

        Ok(Self {
            testnet: params.net.is_testnet(),
            network: params.net.label(),
            params,
        })
    }

    pub fn parser(&self) -> TxParser {
        TxParser::with_special_txs(Arc::clone(&self.params))
    }

    pub fn codec(&self) -> TxCodec {
        TxCodec::new(Arc::clone(&self.params))
    }
}
