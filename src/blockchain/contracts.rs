//! Contract bindings for the three deployed contracts.
//!
//! Each binding pairs a fixed address with a fixed interface definition and
//! the session's shared transport. Interfaces are kept as human-readable
//! signatures and parsed into a [`JsonAbi`] when a session connects.

use alloy::contract::{ContractInstance, Interface};
use alloy::dyn_abi::{DynSolValue, Specifier};
use alloy::json_abi::JsonAbi;
use alloy::primitives::Address;
use alloy::providers::DynProvider;

use crate::blockchain::client::RpcTransport;
use crate::blockchain::types::{ConnectionError, ConnectionResult, ContractName};
use crate::config::ContractsConfig;

/// Read surface of the agent identity registry.
pub const IDENTITY_REGISTRY_ABI: &[&str] = &[
    "function totalAgents() view returns (uint256)",
    "function ownerOf(uint256 agentId) view returns (address)",
    "function tokenURI(uint256 agentId) view returns (string)",
    "function isVerifier(uint256 agentId) view returns (bool)",
    "function getClients(uint256 agentId) view returns (address[])",
    "function balanceOf(address owner) view returns (uint256)",
];

/// Read surface of the jobs module.
pub const JOBS_MODULE_ABI: &[&str] = &[
    "function jobCount() view returns (uint256)",
    "function getJob(uint256 jobId) view returns (string, uint8, uint256, uint256, address, uint256)",
    "function multihopJobCount() view returns (uint256)",
    "function getMultihopJob(uint256 multihopId) view returns (uint8, address, uint256)",
    "function token() view returns (address)",
];

/// Read surface of the HYPT ERC-20 token.
pub const HYPT_TOKEN_ABI: &[&str] = &[
    "function name() view returns (string)",
    "function symbol() view returns (string)",
    "function decimals() view returns (uint8)",
    "function totalSupply() view returns (uint256)",
    "function balanceOf(address account) view returns (uint256)",
    "function allowance(address owner, address spender) view returns (uint256)",
];

/// Interface signatures for a contract.
pub fn interface_signatures(name: ContractName) -> &'static [&'static str] {
    match name {
        ContractName::IdentityRegistry => IDENTITY_REGISTRY_ABI,
        ContractName::JobsModule => JOBS_MODULE_ABI,
        ContractName::HyptToken => HYPT_TOKEN_ABI,
    }
}

/// Parse a contract's interface into a JSON ABI.
pub fn parse_interface(name: ContractName) -> ConnectionResult<JsonAbi> {
    JsonAbi::parse(interface_signatures(name).iter().copied()).map_err(|e| {
        ConnectionError::Interface {
            contract: name,
            reason: e.to_string(),
        }
    })
}

/// Parsed contract addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractAddresses {
    pub identity_registry: Address,
    pub jobs_module: Address,
    pub hypt_token: Address,
}

impl ContractAddresses {
    pub fn from_config(config: &ContractsConfig) -> ConnectionResult<Self> {
        Ok(Self {
            identity_registry: parse_address(
                ContractName::IdentityRegistry,
                &config.identity_registry,
            )?,
            jobs_module: parse_address(ContractName::JobsModule, &config.jobs_module)?,
            hypt_token: parse_address(ContractName::HyptToken, &config.hypt_token)?,
        })
    }

    pub fn get(&self, name: ContractName) -> Address {
        match name {
            ContractName::IdentityRegistry => self.identity_registry,
            ContractName::JobsModule => self.jobs_module,
            ContractName::HyptToken => self.hypt_token,
        }
    }
}

fn parse_address(contract: ContractName, value: &str) -> ConnectionResult<Address> {
    value
        .trim()
        .parse()
        .map_err(|e| ConnectionError::Interface {
            contract,
            reason: format!("invalid address '{value}': {e}"),
        })
}

/// A read-only client for one contract.
#[derive(Clone)]
pub struct ContractBinding {
    name: ContractName,
    instance: ContractInstance<DynProvider>,
}

impl ContractBinding {
    /// Bind `address` to the named contract's interface over `transport`.
    pub fn new(
        name: ContractName,
        address: Address,
        transport: &RpcTransport,
    ) -> ConnectionResult<Self> {
        let abi = parse_interface(name)?;
        let instance =
            ContractInstance::new(address, transport.provider().clone(), Interface::new(abi));
        Ok(Self { name, instance })
    }

    pub fn name(&self) -> ContractName {
        self.name
    }

    pub fn address(&self) -> Address {
        *self.instance.address()
    }

    pub fn abi(&self) -> &JsonAbi {
        self.instance.abi()
    }

    /// Issue an `eth_call` against `function` with already-typed arguments.
    pub async fn call(
        &self,
        function: &str,
        args: &[DynSolValue],
    ) -> ConnectionResult<Vec<DynSolValue>> {
        let call = self
            .instance
            .function(function, args)
            .map_err(|e| self.call_error(function, e))?;

        let values = call.call().await.map_err(|e| self.call_error(function, e))?;

        tracing::debug!(
            contract = %self.name,
            function = function,
            outputs = values.len(),
            "Contract read completed"
        );
        Ok(values)
    }

    /// Like [`call`](Self::call), coercing string arguments to the
    /// function's declared input types.
    pub async fn call_str(
        &self,
        function: &str,
        args: &[String],
    ) -> ConnectionResult<Vec<DynSolValue>> {
        let values = self.coerce_args(function, args)?;
        self.call(function, &values).await
    }

    fn coerce_args(&self, function: &str, args: &[String]) -> ConnectionResult<Vec<DynSolValue>> {
        let overloads = self.abi().function(function).ok_or_else(|| ConnectionError::Call {
            contract: self.name,
            function: function.to_string(),
            reason: "no such function in interface".to_string(),
        })?;

        let func = overloads
            .iter()
            .find(|f| f.inputs.len() == args.len())
            .ok_or_else(|| ConnectionError::Call {
                contract: self.name,
                function: function.to_string(),
                reason: format!("no overload takes {} argument(s)", args.len()),
            })?;

        func.inputs
            .iter()
            .zip(args)
            .map(|(param, raw)| {
                let ty = param.resolve().map_err(|e| self.call_error(function, e))?;
                ty.coerce_str(raw).map_err(|e| self.call_error(function, e))
            })
            .collect()
    }

    fn call_error(&self, function: &str, err: impl std::fmt::Display) -> ConnectionError {
        ConnectionError::Call {
            contract: self.name,
            function: function.to_string(),
            reason: err.to_string(),
        }
    }
}

impl std::fmt::Debug for ContractBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractBinding")
            .field("name", &self.name)
            .field("address", &self.address())
            .field("functions", &self.abi().functions.len())
            .finish()
    }
}

/// The full set of bindings owned by a connected session.
#[derive(Clone, Debug)]
pub struct Bindings {
    identity_registry: ContractBinding,
    jobs_module: ContractBinding,
    hypt_token: ContractBinding,
}

impl Bindings {
    /// Bind every configured contract to the shared transport.
    pub fn bind(addresses: &ContractAddresses, transport: &RpcTransport) -> ConnectionResult<Self> {
        Ok(Self {
            identity_registry: ContractBinding::new(
                ContractName::IdentityRegistry,
                addresses.identity_registry,
                transport,
            )?,
            jobs_module: ContractBinding::new(
                ContractName::JobsModule,
                addresses.jobs_module,
                transport,
            )?,
            hypt_token: ContractBinding::new(
                ContractName::HyptToken,
                addresses.hypt_token,
                transport,
            )?,
        })
    }

    pub fn get(&self, name: ContractName) -> &ContractBinding {
        match name {
            ContractName::IdentityRegistry => &self.identity_registry,
            ContractName::JobsModule => &self.jobs_module,
            ContractName::HyptToken => &self.hypt_token,
        }
    }

    pub fn identity_registry(&self) -> &ContractBinding {
        &self.identity_registry
    }

    pub fn jobs_module(&self) -> &ContractBinding {
        &self.jobs_module
    }

    pub fn hypt_token(&self) -> &ContractBinding {
        &self.hypt_token
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContractBinding> {
        ContractName::ALL.into_iter().map(move |name| self.get(name))
    }

    pub fn len(&self) -> usize {
        ContractName::ALL.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}
