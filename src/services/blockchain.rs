//! Reward vault client for on-chain payouts
//!
//! Submits batch reward distributions and single-recipient claims to the
//! vault contract and waits for the transaction receipt. Behind a trait so
//! the reconciliation engine and tests can run against a mock chain.

use alloy::{
    network::EthereumWallet,
    primitives::{Address, U256},
    providers::ProviderBuilder,
    signers::local::PrivateKeySigner,
    sol,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::AppConfig;

/// Payout token precision (USDC-style, 6 decimals)
const TOKEN_DECIMALS: u32 = 6;

// Reward vault contract interface
sol! {
    #[sol(rpc)]
    interface IRewardVault {
        function distributeRewards(address[] calldata recipients, uint256[] calldata amounts) external;
        function claimReward(uint256 rewardId, address recipient) external;
    }
}

/// Confirmed transaction details returned to the caller
#[derive(Debug, Clone)]
pub struct TxOutcome {
    pub tx_hash: String,
    pub block_number: Option<i64>,
}

#[derive(Debug, Error)]
pub enum BlockchainError {
    #[error("provider error: {0}")]
    Provider(String),
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("transaction failed: {0}")]
    Transaction(String),
}

#[async_trait]
pub trait BlockchainClient: Send + Sync {
    /// One batch transfer; every recipient receives the matching amount.
    async fn distribute_rewards(
        &self,
        recipients: Vec<String>,
        amounts: Vec<Decimal>,
    ) -> Result<TxOutcome, BlockchainError>;

    /// Single-recipient claim for the on-demand path.
    async fn claim_reward(
        &self,
        reward_id: i32,
        recipient: &str,
    ) -> Result<TxOutcome, BlockchainError>;
}

/// Production client backed by the vault contract
pub struct VaultClient {
    rpc_url: String,
    vault_address: Address,
    signer: PrivateKeySigner,
}

impl VaultClient {
    pub fn new(config: &AppConfig) -> Result<Self, BlockchainError> {
        let vault_address = Address::from_str(&config.vault_address).map_err(|e| {
            BlockchainError::InvalidAddress(format!("Invalid vault address: {}", e))
        })?;

        let signer = PrivateKeySigner::from_str(&config.distributor_private_key)
            .map_err(|e| BlockchainError::Provider(format!("Invalid distributor key: {}", e)))?;

        info!(
            vault_address = %vault_address,
            distributor = %signer.address(),
            "VaultClient initialized"
        );

        Ok(Self {
            rpc_url: config.rpc_url.clone(),
            vault_address,
            signer,
        })
    }
}

#[async_trait]
impl BlockchainClient for VaultClient {
    async fn distribute_rewards(
        &self,
        recipients: Vec<String>,
        amounts: Vec<Decimal>,
    ) -> Result<TxOutcome, BlockchainError> {
        let recipient_addrs = recipients
            .iter()
            .map(|r| {
                Address::from_str(r).map_err(|e| {
                    BlockchainError::InvalidAddress(format!("Invalid recipient {}: {}", r, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let unit_amounts = amounts
            .iter()
            .map(|a| to_token_units(*a))
            .collect::<Result<Vec<_>, _>>()?;

        let wallet = EthereumWallet::from(self.signer.clone());
        let provider = ProviderBuilder::new()
            .with_recommended_fillers()
            .wallet(wallet)
            .on_http(self.rpc_url.parse().map_err(|e| {
                BlockchainError::Provider(format!("Invalid RPC URL: {}", e))
            })?);

        let vault = IRewardVault::new(self.vault_address, &provider);
        let pending = vault
            .distributeRewards(recipient_addrs, unit_amounts)
            .send()
            .await
            .map_err(|e| BlockchainError::Transaction(format!("distributeRewards: {}", e)))?;

        let receipt = pending.get_receipt().await.map_err(|e| {
            // Broadcast may have gone through; the caller retries and must
            // tolerate at-least-once submission.
            warn!(error = %e, "Distribution receipt not confirmed");
            BlockchainError::Transaction(format!("distributeRewards receipt: {}", e))
        })?;

        info!(
            tx_hash = %receipt.transaction_hash,
            recipients = recipients.len(),
            "Batch distribution confirmed"
        );

        Ok(TxOutcome {
            tx_hash: format!("{:#x}", receipt.transaction_hash),
            block_number: receipt.block_number.map(|n| n as i64),
        })
    }

    async fn claim_reward(
        &self,
        reward_id: i32,
        recipient: &str,
    ) -> Result<TxOutcome, BlockchainError> {
        let recipient_addr = Address::from_str(recipient).map_err(|e| {
            BlockchainError::InvalidAddress(format!("Invalid recipient {}: {}", recipient, e))
        })?;

        let wallet = EthereumWallet::from(self.signer.clone());
        let provider = ProviderBuilder::new()
            .with_recommended_fillers()
            .wallet(wallet)
            .on_http(self.rpc_url.parse().map_err(|e| {
                BlockchainError::Provider(format!("Invalid RPC URL: {}", e))
            })?);

        let vault = IRewardVault::new(self.vault_address, &provider);
        let pending = vault
            .claimReward(U256::from(reward_id.unsigned_abs()), recipient_addr)
            .send()
            .await
            .map_err(|e| BlockchainError::Transaction(format!("claimReward: {}", e)))?;

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| BlockchainError::Transaction(format!("claimReward receipt: {}", e)))?;

        info!(
            tx_hash = %receipt.transaction_hash,
            reward_id = reward_id,
            recipient = %recipient_addr,
            "Reward claim confirmed"
        );

        Ok(TxOutcome {
            tx_hash: format!("{:#x}", receipt.transaction_hash),
            block_number: receipt.block_number.map(|n| n as i64),
        })
    }
}

/// Convert a decimal token amount into smallest on-chain units.
fn to_token_units(amount: Decimal) -> Result<U256, BlockchainError> {
    if amount.is_sign_negative() {
        return Err(BlockchainError::InvalidAmount(format!(
            "negative amount: {}",
            amount
        )));
    }

    let scale = Decimal::from(10u64.pow(TOKEN_DECIMALS));
    let scaled = amount
        .checked_mul(scale)
        .ok_or_else(|| BlockchainError::InvalidAmount(format!("amount overflow: {}", amount)))?;

    let integral = scaled.trunc().normalize().to_string();
    U256::from_str(&integral)
        .map_err(|e| BlockchainError::InvalidAmount(format!("amount {}: {}", amount, e)))
}
