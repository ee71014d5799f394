//! Inputs handed to the deploy-and-verify collaborator.

use alloy_core::{
    dyn_abi::DynSolValue,
    hex,
    primitives::{Address, Bytes, U256, keccak256},
};
use derive_more::{Deref, From};
use serde::{Deserialize, Serialize};

/// A single constructor or initializer argument.
///
/// Persisted the way hardhat-deploy writes `args`: a plain JSON value per
/// argument, with integers as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawArg", into = "RawArg")]
pub enum DeployArg {
    Address(Address),
    Uint(U256),
    String(String),
    Bytes(Bytes),
}

/// JSON shapes found in deployment records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawArg {
    Text(String),
    Number(u64),
    /// ethers `BigNumber`: `{ "type": "BigNumber", "hex": "0x64" }`.
    BigNumber { hex: U256 },
}

impl From<RawArg> for DeployArg {
    fn from(raw: RawArg) -> Self {
        match raw {
            RawArg::Number(value) => DeployArg::Uint(U256::from(value)),
            RawArg::BigNumber { hex } => DeployArg::Uint(hex),
            RawArg::Text(text) => DeployArg::parse_text(text),
        }
    }
}

impl From<DeployArg> for RawArg {
    fn from(arg: DeployArg) -> Self {
        RawArg::Text(match arg {
            DeployArg::Address(address) => address.to_checksum(None),
            DeployArg::Uint(value) => value.to_string(),
            DeployArg::String(value) => value,
            DeployArg::Bytes(value) => value.to_string(),
        })
    }
}

impl DeployArg {
    /// Solidity type name, as used in function signatures.
    pub fn sol_type(&self) -> &'static str {
        match self {
            DeployArg::Address(_) => "address",
            DeployArg::Uint(_) => "uint256",
            DeployArg::String(_) => "string",
            DeployArg::Bytes(_) => "bytes",
        }
    }

    /// Infer the argument kind of a stored string.
    ///
    /// 20-byte hex is an address, other hex is bytes, digits are an integer.
    fn parse_text(text: String) -> Self {
        if let Some(digits) = text.strip_prefix("0x") {
            if let Ok(decoded) = hex::decode(digits) {
                return match Address::try_from(decoded.as_slice()) {
                    Ok(address) => DeployArg::Address(address),
                    Err(_) => DeployArg::Bytes(decoded.into()),
                };
            }
        } else if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(value) = U256::from_str_radix(&text, 10) {
                return DeployArg::Uint(value);
            }
        }
        DeployArg::String(text)
    }

    fn to_sol_value(&self) -> DynSolValue {
        match self {
            DeployArg::Address(address) => DynSolValue::Address(*address),
            DeployArg::Uint(value) => DynSolValue::Uint(*value, 256),
            DeployArg::String(value) => DynSolValue::String(value.clone()),
            DeployArg::Bytes(value) => DynSolValue::Bytes(value.to_vec()),
        }
    }
}

impl From<Address> for DeployArg {
    fn from(address: Address) -> Self {
        DeployArg::Address(address)
    }
}

impl From<U256> for DeployArg {
    fn from(value: U256) -> Self {
        DeployArg::Uint(value)
    }
}

impl From<u64> for DeployArg {
    fn from(value: u64) -> Self {
        DeployArg::Uint(U256::from(value))
    }
}

impl From<&str> for DeployArg {
    fn from(value: &str) -> Self {
        DeployArg::String(value.to_string())
    }
}

impl From<Bytes> for DeployArg {
    fn from(value: Bytes) -> Self {
        DeployArg::Bytes(value)
    }
}

/// Ordered argument list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Deref, From)]
#[serde(transparent)]
pub struct DeployArgs(Vec<DeployArg>);

impl DeployArgs {
    /// ABI-encode the arguments as a parameter list (constructor encoding).
    pub fn abi_encode(&self) -> Vec<u8> {
        if self.0.is_empty() {
            return Vec::new();
        }
        DynSolValue::Tuple(self.0.iter().map(DeployArg::to_sol_value).collect()).abi_encode_params()
    }

    /// Canonical signature of `method` called with these arguments.
    pub fn signature(&self, method: &str) -> String {
        let types: Vec<&str> = self.0.iter().map(DeployArg::sol_type).collect();
        format!("{}({})", method, types.join(","))
    }

    /// Selector-prefixed calldata for `method` called with these arguments.
    pub fn calldata(&self, method: &str) -> Bytes {
        let selector = &keccak256(self.signature(method).as_bytes())[..4];
        let mut data = selector.to_vec();
        data.extend(self.abi_encode());
        data.into()
    }
}

/// Build a [`DeployArgs`] from heterogeneous values.
#[macro_export]
macro_rules! deploy_args {
    ($($arg:expr),* $(,)?) => {
        $crate::DeployArgs::from(vec![$($crate::DeployArg::from($arg)),*])
    };
}

/// Upgradeable proxy flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum ProxyKind {
    #[serde(rename = "UUPS")]
    #[strum(serialize = "UUPS")]
    Uups,
}

/// Initializer invoked through the proxy on deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Execute {
    pub method_name: String,
    pub args: DeployArgs,
}

/// Proxy deployment descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyOptions {
    pub proxy_contract: ProxyKind,
    pub execute: Execute,
}

impl ProxyOptions {
    /// A UUPS proxy initialised with `initialize(args...)`.
    pub fn uups_initialize(args: DeployArgs) -> Self {
        Self {
            proxy_contract: ProxyKind::Uups,
            execute: Execute {
                method_name: "initialize".to_string(),
                args,
            },
        }
    }

    /// Calldata passed to the proxy constructor.
    pub fn init_calldata(&self) -> Bytes {
        self.execute.args.calldata(&self.execute.method_name)
    }
}

/// Everything the deploy-and-verify collaborator needs for one contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployRequest {
    /// Contract (and deployment record) name.
    pub name: String,
    pub args: DeployArgs,
    pub proxy: Option<ProxyOptions>,
}

impl DeployRequest {
    pub fn new(name: impl Into<String>, args: DeployArgs) -> Self {
        Self {
            name: name.into(),
            args,
            proxy: None,
        }
    }

    pub fn with_proxy(mut self, proxy: ProxyOptions) -> Self {
        self.proxy = Some(proxy);
        self
    }
}

/// What a deployment step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A record already existed; nothing was sent.
    AlreadyDeployed(Address),
    Deployed(Address),
    /// The chain uses a contract this tool does not deploy.
    NotRequired,
}

impl StepOutcome {
    pub fn address(&self) -> Option<Address> {
        match self {
            StepOutcome::AlreadyDeployed(address) | StepOutcome::Deployed(address) => {
                Some(*address)
            }
            StepOutcome::NotRequired => None,
        }
    }
}
