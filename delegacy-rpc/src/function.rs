//! Entry points of the delegation program and the request bodies that
//! carry them.

use delegacy_common::prelude::*;
use delegacy_common::PROGRAM_MODULE;
use serde_json::Value;
use std::fmt;

/// Callable entry points of the `delegate` module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryPoint {
    /// `is_vault_registered(address) -> bool`
    IsVaultRegistered,
    /// `is_delegate_registered(address) -> bool`
    IsDelegateRegistered,
    /// `get_delegates_by_vault(address) -> vector<DelegationInfo>`
    GetDelegatesByVault,
    /// `register_vault()`
    RegisterVault,
    /// `register_delegate()`
    RegisterDelegate,
    /// `delegate_for_all(address, bool)`
    DelegateForAll,
}

impl EntryPoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IsVaultRegistered => "is_vault_registered",
            Self::IsDelegateRegistered => "is_delegate_registered",
            Self::GetDelegatesByVault => "get_delegates_by_vault",
            Self::RegisterVault => "register_vault",
            Self::RegisterDelegate => "register_delegate",
            Self::DelegateForAll => "delegate_for_all",
        }
    }

    /// View functions are read-only; everything else needs a signer
    pub fn is_view(&self) -> bool {
        matches!(
            self,
            Self::IsVaultRegistered | Self::IsDelegateRegistered | Self::GetDelegatesByVault
        )
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully qualified function, `<program>::delegate::<entry>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionId {
    pub program: Address,
    pub entry: EntryPoint,
}

impl FunctionId {
    pub fn new(program: Address, entry: EntryPoint) -> Self {
        Self { program, entry }
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.program, PROGRAM_MODULE, self.entry)
    }
}

/// Body of `POST /view`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewRequest {
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<Value>,
}

impl ViewRequest {
    pub fn new(function: &FunctionId, arguments: Vec<Value>) -> Self {
        Self {
            function: function.to_string(),
            type_arguments: Vec::new(),
            arguments,
        }
    }
}

/// Payload handed to the wallet for signing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryFunctionPayload {
    #[serde(rename = "type")]
    pub payload_type: String,
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<Value>,
}

impl EntryFunctionPayload {
    pub const PAYLOAD_TYPE: &'static str = "entry_function_payload";

    pub fn new(function: &FunctionId, arguments: Vec<Value>) -> Self {
        Self {
            payload_type: Self::PAYLOAD_TYPE.to_string(),
            function: function.to_string(),
            type_arguments: Vec::new(),
            arguments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_function_id_format() {
        let id = FunctionId::new(Address::from("0xcafe"), EntryPoint::DelegateForAll);
        assert_eq!(id.to_string(), "0xcafe::delegate::delegate_for_all");
    }

    #[test]
    fn test_view_entry_points() {
        assert!(EntryPoint::GetDelegatesByVault.is_view());
        assert!(!EntryPoint::RegisterVault.is_view());
    }

    #[test]
    fn test_view_request_shape() {
        let id = FunctionId::new(Address::from("0xcafe"), EntryPoint::IsVaultRegistered);
        let req = ViewRequest::new(&id, vec![json!("0x1")]);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "function": "0xcafe::delegate::is_vault_registered",
                "type_arguments": [],
                "arguments": ["0x1"]
            })
        );
    }

    #[test]
    fn test_entry_payload_shape() {
        let id = FunctionId::new(Address::from("0xcafe"), EntryPoint::DelegateForAll);
        let payload = EntryFunctionPayload::new(&id, vec![json!("0x2"), json!(true)]);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "type": "entry_function_payload",
                "function": "0xcafe::delegate::delegate_for_all",
                "type_arguments": [],
                "arguments": ["0x2", true]
            })
        );
    }
}
