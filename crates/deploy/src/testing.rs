//! In-memory collaborators for unit tests.

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use alloy_core::{
    primitives::{Address, B256, Bytes},
    sol_types::SolCall,
};
use anyhow::Result;

use crate::{
    DeployArgs, DeployRequest,
    abi::{IOperator, ISimpleOracleStrategy, IUUPSUpgradeable},
    client::ContractClient,
    deployer::ContractDeployer,
    steps::DeployContext,
    tasks::Pacer,
    store::{DeploymentRecord, DeploymentStore, implementation_name},
};

/// Deployment records kept in a shared map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<HashMap<String, DeploymentRecord>>>,
}

impl MemoryStore {
    pub fn with(self, name: &str, address: Address) -> Self {
        self.save(name, &DeploymentRecord::new(address, DeployArgs::default()))
            .unwrap();
        self
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.records.lock().unwrap().keys().cloned().collect();
        names.sort();
        names
    }
}

impl DeploymentStore for MemoryStore {
    fn get_or_null(&self, name: &str) -> Result<Option<DeploymentRecord>> {
        Ok(self.records.lock().unwrap().get(name).cloned())
    }

    fn save(&self, name: &str, record: &DeploymentRecord) -> Result<()> {
        self.records
            .lock()
            .unwrap()
            .insert(name.to_string(), record.clone());
        Ok(())
    }
}

/// Deployer that hands out sequential addresses and remembers every request.
#[derive(Debug, Clone)]
pub struct RecordingDeployer {
    store: MemoryStore,
    requests: Arc<Mutex<Vec<DeployRequest>>>,
    implementations: Arc<Mutex<Vec<(String, DeployArgs)>>>,
}

impl RecordingDeployer {
    pub fn new(store: MemoryStore) -> Self {
        Self {
            store,
            requests: Default::default(),
            implementations: Default::default(),
        }
    }

    pub fn requests(&self) -> Vec<DeployRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn implementations(&self) -> Vec<(String, DeployArgs)> {
        self.implementations.lock().unwrap().clone()
    }

    fn next_address(&self) -> Address {
        let sent = self.requests.lock().unwrap().len() + self.implementations.lock().unwrap().len();
        Address::with_last_byte(0xd0 + sent as u8)
    }
}

impl ContractDeployer for RecordingDeployer {
    async fn deploy_with_verify(&self, request: DeployRequest) -> Result<Address> {
        if let Some(existing) = self.store.get_or_null(&request.name)? {
            return Ok(existing.address);
        }

        let address = self.next_address();
        self.store
            .save(&request.name, &DeploymentRecord::new(address, request.args.clone()))?;
        self.requests.lock().unwrap().push(request);
        Ok(address)
    }

    async fn deploy_implementation(&self, name: &str, args: DeployArgs) -> Result<Address> {
        let address = self.next_address();
        self.store
            .save(&implementation_name(name), &DeploymentRecord::new(address, args.clone()))?;
        self.implementations
            .lock()
            .unwrap()
            .push((name.to_string(), args));
        Ok(address)
    }
}

#[derive(Debug, Default)]
struct ChainState {
    operators: HashSet<Address>,
    configs: HashMap<B256, ISimpleOracleStrategy::Config>,
    reads: usize,
    writes: Vec<(Address, Bytes)>,
}

/// A fake chain that understands the Operator, strategy and UUPS interfaces.
#[derive(Debug, Clone)]
pub struct MockContracts {
    signer: Address,
    owner: Address,
    fail_writes_after: Option<usize>,
    state: Arc<Mutex<ChainState>>,
}

impl MockContracts {
    pub fn new(signer: Address) -> Self {
        Self {
            signer,
            owner: signer,
            fail_writes_after: None,
            state: Default::default(),
        }
    }

    pub fn with_operator(self, operator: Address) -> Self {
        self.state.lock().unwrap().operators.insert(operator);
        self
    }

    pub fn with_config(self, key: B256, config: ISimpleOracleStrategy::Config) -> Self {
        self.state.lock().unwrap().configs.insert(key, config);
        self
    }

    /// Reject every write once `count` writes have succeeded.
    pub fn failing_writes_after(mut self, count: usize) -> Self {
        self.fail_writes_after = Some(count);
        self
    }

    pub fn reads(&self) -> usize {
        self.state.lock().unwrap().reads
    }

    pub fn writes(&self) -> Vec<(Address, Bytes)> {
        self.state.lock().unwrap().writes.clone()
    }

    pub fn is_operator(&self, operator: Address) -> bool {
        self.state.lock().unwrap().operators.contains(&operator)
    }

    pub fn config(&self, key: B256) -> Option<ISimpleOracleStrategy::Config> {
        self.state.lock().unwrap().configs.get(&key).cloned()
    }
}

fn selector(data: &[u8]) -> [u8; 4] {
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&data[..4]);
    selector
}

impl ContractClient for MockContracts {
    fn signer(&self) -> Address {
        self.signer
    }

    async fn call(&self, _to: Address, data: Bytes) -> Result<Bytes> {
        let mut state = self.state.lock().unwrap();
        state.reads += 1;

        let encoded = match selector(&data) {
            IOperator::ownerCall::SELECTOR => {
                IOperator::ownerCall::abi_encode_returns(&(self.owner,))
            }
            IOperator::isOperatorCall::SELECTOR => {
                let call = IOperator::isOperatorCall::abi_decode(&data, true)?;
                let is_operator = state.operators.contains(&call.operator);
                IOperator::isOperatorCall::abi_encode_returns(&(is_operator,))
            }
            ISimpleOracleStrategy::getConfigCall::SELECTOR => {
                let call = ISimpleOracleStrategy::getConfigCall::abi_decode(&data, true)?;
                let config = state.configs.get(&call.key).cloned().unwrap_or_default();
                ISimpleOracleStrategy::getConfigCall::abi_encode_returns(&(config,))
            }
            other => anyhow::bail!("unexpected call selector {other:?}"),
        };

        Ok(encoded.into())
    }

    async fn send(&self, to: Address, data: Bytes) -> Result<B256> {
        let mut state = self.state.lock().unwrap();
        if self
            .fail_writes_after
            .is_some_and(|limit| state.writes.len() >= limit)
        {
            anyhow::bail!("execution reverted");
        }

        match selector(&data) {
            IOperator::setOperatorCall::SELECTOR => {
                let call = IOperator::setOperatorCall::abi_decode(&data, true)?;
                if call.status {
                    state.operators.insert(call.operator);
                } else {
                    state.operators.remove(&call.operator);
                }
            }
            ISimpleOracleStrategy::setConfigCall::SELECTOR => {
                let call = ISimpleOracleStrategy::setConfigCall::abi_decode(&data, true)?;
                state.configs.insert(call.key, call.config);
            }
            IUUPSUpgradeable::upgradeToAndCallCall::SELECTOR => {}
            other => anyhow::bail!("unexpected transaction selector {other:?}"),
        }

        state.writes.push((to, data));
        Ok(B256::with_last_byte(state.writes.len() as u8))
    }
}

/// The three collaborators wired together around one signer.
#[derive(Debug, Clone)]
pub struct Harness {
    pub store: MemoryStore,
    pub deployer: RecordingDeployer,
    pub contracts: MockContracts,
}

impl Harness {
    pub fn new(signer: Address) -> Self {
        let store = MemoryStore::default();
        Self {
            deployer: RecordingDeployer::new(store.clone()),
            contracts: MockContracts::new(signer),
            store,
        }
    }

    pub fn with_record(self, name: &str, address: Address) -> Self {
        self.store
            .save(name, &DeploymentRecord::new(address, DeployArgs::default()))
            .unwrap();
        self
    }

    pub fn with_contracts(mut self, f: impl FnOnce(MockContracts) -> MockContracts) -> Self {
        self.contracts = f(self.contracts);
        self
    }

    pub fn context(
        &self,
        chain_id: u64,
    ) -> DeployContext<'_, MemoryStore, RecordingDeployer, MockContracts> {
        DeployContext::new(chain_id, &self.store, &self.deployer, &self.contracts)
    }
}

/// Pacer that only counts how often it was asked to wait.
#[derive(Debug, Default)]
pub struct CountingPacer {
    pauses: std::sync::atomic::AtomicUsize,
}

impl CountingPacer {
    pub fn pauses(&self) -> usize {
        self.pauses.load(std::sync::atomic::Ordering::SeqCst)
    }
}

impl Pacer for CountingPacer {
    async fn pause(&self) {
        self.pauses
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}
