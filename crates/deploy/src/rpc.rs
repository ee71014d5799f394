//! Ethereum JSON-RPC plumbing.

use std::{future::Future, time::Duration};

use alloy_core::primitives::{Address, B256, Bytes, U64, U256, aliases::U128};
use anyhow::Context;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use url::Url;

use crate::{
    DeployError,
    wallet::{LegacyTransaction, LocalWallet},
};

/// Default timeout for RPC requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Interval between receipt polls.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Headroom added to `eth_estimateGas` for locally signed transactions, in percent.
const GAS_LIMIT_MARGIN: u64 = 20;

/// Create an HTTP client configured for JSON-RPC requests.
pub fn create_client() -> Result<reqwest::Client, anyhow::Error> {
    reqwest::Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .build()
        .context("Failed to create HTTP client")
}

/// Make a JSON-RPC call and deserialize the result.
pub async fn json_rpc_call<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &Url,
    method: &str,
    params: Vec<Value>,
) -> Result<T, anyhow::Error> {
    let response = client
        .post(url.clone())
        .json(&serde_json::json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        }))
        .send()
        .await
        .with_context(|| format!("Failed to send {} request", method))?;

    let result: Value = response
        .json()
        .await
        .with_context(|| format!("Failed to parse {} response", method))?;

    if let Some(error) = result.get("error") {
        anyhow::bail!(
            "RPC error in {}: {}",
            method,
            error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown")
        );
    }

    let result_value = result
        .get("result")
        .context("No result in response")?
        .clone();

    serde_json::from_value(result_value)
        .with_context(|| format!("Failed to deserialize {} result", method))
}

/// Poll `check_fn` until it yields a value or `timeout` elapses.
pub async fn poll_until<T, F, Fut>(
    name: &str,
    timeout: Duration,
    check_fn: F,
) -> Result<T, anyhow::Error>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<Option<T>, anyhow::Error>>,
{
    let start = tokio::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            anyhow::bail!("Timeout waiting for {}", name);
        }

        match check_fn().await {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => tracing::trace!(waiting_for = %name, "Not ready yet, polling again..."),
            Err(e) => tracing::trace!(error = %e, waiting_for = %name, "Poll failed, retrying..."),
        }

        tokio::time::sleep(DEFAULT_POLL_INTERVAL).await;
    }
}

/// The subset of a transaction receipt the tooling reads.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: B256,
    /// `0x1` on success, `0x0` on revert.
    pub status: Option<U64>,
    pub contract_address: Option<Address>,
}

impl TransactionReceipt {
    pub fn succeeded(&self) -> bool {
        self.status.is_none_or(|status| status == U64::from(1u64))
    }
}

/// Submits transactions and waits for them to be mined.
pub trait TransactionSender: Sync {
    /// Submit a transaction; `to = None` creates a contract.
    fn send_transaction(
        &self,
        to: Option<Address>,
        data: Bytes,
    ) -> impl Future<Output = Result<B256, anyhow::Error>> + Send;

    /// Receipt of `tx_hash` once it is mined, whatever its status.
    fn mined_receipt(
        &self,
        tx_hash: B256,
    ) -> impl Future<Output = Result<TransactionReceipt, anyhow::Error>> + Send;

    /// Wait until the transaction is mined; a reverted receipt is an error.
    fn wait_for_receipt(
        &self,
        tx_hash: B256,
    ) -> impl Future<Output = Result<TransactionReceipt, anyhow::Error>> + Send {
        async move {
            let receipt = self.mined_receipt(tx_hash).await?;
            if !receipt.succeeded() {
                return Err(DeployError::TransactionFailed(tx_hash).into());
            }

            tracing::debug!(%tx_hash, "Transaction mined");
            Ok(receipt)
        }
    }
}

/// A JSON-RPC endpoint plus the account transactions are sent from.
///
/// With a [`LocalWallet`] transactions are signed here and submitted through
/// `eth_sendRawTransaction`. Without one they go through `eth_sendTransaction`,
/// so the node (or a signing proxy in front of it) holds the key for `from`.
#[derive(Debug, Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    url: Url,
    from: Address,
    wallet: Option<LocalWallet>,
    receipt_timeout: Duration,
}

impl RpcClient {
    /// Connect to `url`.
    ///
    /// The sender is the wallet's address when one is given, otherwise `from`,
    /// otherwise the node's first account.
    pub async fn connect(
        url: Url,
        from: Option<Address>,
        wallet: Option<LocalWallet>,
        receipt_timeout: Duration,
    ) -> Result<Self, anyhow::Error> {
        let http = create_client()?;

        let from = match (&wallet, from) {
            (Some(wallet), Some(from)) if wallet.address() != from => {
                anyhow::bail!(
                    "Configured deployer {} does not match the private key address {}",
                    from,
                    wallet.address()
                );
            }
            (Some(wallet), _) => wallet.address(),
            (None, Some(from)) => from,
            (None, None) => {
                let accounts: Vec<Address> = json_rpc_call(&http, &url, "eth_accounts", vec![])
                    .await
                    .context("Failed to fetch node accounts")?;
                accounts
                    .first()
                    .copied()
                    .context("Node exposes no accounts and no deployer was configured")?
            }
        };

        Ok(Self {
            http,
            url,
            from,
            wallet,
            receipt_timeout,
        })
    }

    pub fn from(&self) -> Address {
        self.from
    }

    /// Whether transactions are signed locally.
    pub fn signs_locally(&self) -> bool {
        self.wallet.is_some()
    }

    pub async fn chain_id(&self) -> Result<u64, anyhow::Error> {
        let chain_id: U64 = json_rpc_call(&self.http, &self.url, "eth_chainId", vec![]).await?;
        Ok(chain_id.to::<u64>())
    }

    /// `eth_call` against the latest block.
    pub async fn eth_call(&self, to: Address, data: &Bytes) -> Result<Bytes, anyhow::Error> {
        json_rpc_call(
            &self.http,
            &self.url,
            "eth_call",
            vec![
                serde_json::json!({ "from": self.from, "to": to, "data": data }),
                serde_json::json!("latest"),
            ],
        )
        .await
    }

    fn call_object(&self, to: Option<Address>, data: &Bytes) -> Value {
        let mut tx = serde_json::json!({ "from": self.from, "data": data });
        if let Some(to) = to {
            tx["to"] = serde_json::json!(to);
        }
        tx
    }

    /// Fill in nonce, gas price and gas limit, sign, and submit.
    async fn send_signed(
        &self,
        wallet: &LocalWallet,
        to: Option<Address>,
        data: Bytes,
    ) -> Result<B256, anyhow::Error> {
        let nonce: U64 = json_rpc_call(
            &self.http,
            &self.url,
            "eth_getTransactionCount",
            vec![serde_json::json!(self.from), serde_json::json!("pending")],
        )
        .await?;
        let gas_price: U128 =
            json_rpc_call(&self.http, &self.url, "eth_gasPrice", vec![]).await?;
        let gas: U64 = json_rpc_call(
            &self.http,
            &self.url,
            "eth_estimateGas",
            vec![self.call_object(to, &data)],
        )
        .await
        .context("Failed to estimate gas")?;

        let gas = gas.to::<u64>();
        let tx = LegacyTransaction {
            chain_id: self.chain_id().await?,
            nonce: nonce.to::<u64>(),
            gas_price: gas_price.to::<u128>(),
            gas_limit: gas + gas * GAS_LIMIT_MARGIN / 100,
            to,
            value: U256::ZERO,
            input: data,
        };
        tracing::trace!(nonce = tx.nonce, gas_limit = tx.gas_limit, "Signing transaction");

        let raw = wallet.sign(&tx)?;
        json_rpc_call(
            &self.http,
            &self.url,
            "eth_sendRawTransaction",
            vec![serde_json::json!(raw)],
        )
        .await
    }
}

impl TransactionSender for RpcClient {
    async fn send_transaction(
        &self,
        to: Option<Address>,
        data: Bytes,
    ) -> Result<B256, anyhow::Error> {
        let sent = match &self.wallet {
            Some(wallet) => self.send_signed(wallet, to, data).await,
            None => {
                json_rpc_call(
                    &self.http,
                    &self.url,
                    "eth_sendTransaction",
                    vec![self.call_object(to, &data)],
                )
                .await
            }
        };
        sent.context("Failed to send transaction")
    }

    async fn mined_receipt(&self, tx_hash: B256) -> Result<TransactionReceipt, anyhow::Error> {
        poll_until(
            &format!("receipt of {tx_hash}"),
            self.receipt_timeout,
            || async move {
                json_rpc_call::<Option<TransactionReceipt>>(
                    &self.http,
                    &self.url,
                    "eth_getTransactionReceipt",
                    vec![serde_json::json!(tx_hash)],
                )
                .await
            },
        )
        .await
    }
}
