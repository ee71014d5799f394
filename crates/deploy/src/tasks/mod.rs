//! Post-deployment administrative tasks.
//!
//! The loops here are strictly sequential: read, maybe write, wait, next item.
//! Nothing is retried; the first failing call aborts the task.

pub mod operator;
pub mod strategy;
pub mod upgrade;

use std::{future::Future, time::Duration};

use alloy_core::primitives::B256;

pub use operator::set_operators;
pub use strategy::{DEFAULT_CONFIG, configure_strategies};
pub use upgrade::{deploy_implementation, upgrade};

/// Waits between consecutive write transactions.
pub trait Pacer: Sync {
    fn pause(&self) -> impl Future<Output = ()> + Send;
}

/// Sleeps for a fixed duration after each write.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

impl Pacer for FixedDelay {
    async fn pause(&self) {
        tokio::time::sleep(self.0).await;
    }
}

/// What a task did for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Already in the desired state.
    Unchanged,
    /// A transaction was sent.
    Sent(B256),
}

/// Per-item result, filled in by the final read-only pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStatus {
    pub item: String,
    pub action: Action,
    /// Whether the final read shows the item in the desired state.
    pub confirmed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fixed_delay_sleeps() {
        let start = tokio::time::Instant::now();
        FixedDelay(Duration::from_secs(1)).pause().await;
        assert!(start.elapsed() >= Duration::from_secs(1));
    }
}
