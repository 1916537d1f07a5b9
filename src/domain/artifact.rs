//! Contract build artifacts.
//!
//! An artifact is the JSON file a contract toolchain writes for each compiled
//! contract. Only the `abi` field is kept; everything else (bytecode, AST,
//! deployment records) is dropped.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Key holding the ABI in a build artifact
const ABI_KEY: &str = "abi";

/// Key holding the contract name in Truffle-style artifacts
const CONTRACT_NAME_KEY: &str = "contractName";

/// Errors that can occur while reading a single artifact
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Invalid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Missing top-level `abi` key")]
    KeyMissing,

    #[error("Failed to serialize ABI: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// A parsed build artifact, reduced to the parts we export
#[derive(Debug, Clone, PartialEq)]
pub struct ContractArtifact {
    /// Contract name, when the toolchain recorded one
    pub contract_name: Option<String>,

    /// The ABI value, passed through untouched
    abi: Value,
}

impl ContractArtifact {
    /// Parse artifact text and extract its ABI
    pub fn parse(content: &str) -> Result<Self, ArtifactError> {
        // Nesting depth is bounded only by memory; the stack grows on demand
        let mut deserializer = serde_json::Deserializer::from_str(content);
        deserializer.disable_recursion_limit();
        let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))
            .map_err(ArtifactError::Parse)?;
        deserializer.end().map_err(ArtifactError::Parse)?;

        // Non-object documents have no keys, so they are missing `abi` too
        let Value::Object(mut fields) = value else {
            return Err(ArtifactError::KeyMissing);
        };

        let abi = fields.remove(ABI_KEY).ok_or(ArtifactError::KeyMissing)?;
        let contract_name = fields
            .get(CONTRACT_NAME_KEY)
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(Self { contract_name, abi })
    }

    /// The extracted ABI
    pub fn abi(&self) -> &Value {
        &self.abi
    }

    /// Compact JSON text of the ABI
    pub fn abi_json(&self) -> Result<String, ArtifactError> {
        serde_json::to_string(&self.abi).map_err(ArtifactError::Serialize)
    }
}

/// Output file name for an artifact file name
pub fn abi_file_name(file_name: &str) -> String {
    file_name.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_abi_and_drops_other_fields() {
        let artifact = ContractArtifact::parse(
            r#"{"abi": [{"type":"function","name":"bar"}], "bytecode": "0x600160..."}"#,
        )
        .unwrap();

        assert_eq!(
            artifact.abi_json().unwrap(),
            r#"[{"type":"function","name":"bar"}]"#
        );
        assert!(artifact.contract_name.is_none());
    }

    #[test]
    fn test_preserves_key_order() {
        let artifact = ContractArtifact::parse(
            r#"{"abi": [{"outputs": [], "name": "z", "inputs": [], "type": "function"}]}"#,
        )
        .unwrap();

        assert_eq!(
            artifact.abi_json().unwrap(),
            r#"[{"outputs":[],"name":"z","inputs":[],"type":"function"}]"#
        );
    }

    #[test]
    fn test_contract_name() {
        let artifact =
            ContractArtifact::parse(r#"{"contractName": "MasterChef", "abi": []}"#).unwrap();

        assert_eq!(artifact.contract_name.as_deref(), Some("MasterChef"));
        assert_eq!(artifact.abi(), &Value::Array(Vec::new()));
    }

    #[test]
    fn test_null_abi_is_present() {
        let artifact = ContractArtifact::parse(r#"{"abi": null}"#).unwrap();
        assert_eq!(artifact.abi_json().unwrap(), "null");
    }

    #[test]
    fn test_large_integers_keep_their_digits() {
        let artifact = ContractArtifact::parse(
            r#"{"abi": [{"type":"constructor","gas":115792089237316195423570985008687907853269984665640564039457584007913129639935,"ratio":1.50}]}"#,
        )
        .unwrap();

        assert_eq!(
            artifact.abi_json().unwrap(),
            r#"[{"type":"constructor","gas":115792089237316195423570985008687907853269984665640564039457584007913129639935,"ratio":1.50}]"#
        );
    }

    #[test]
    fn test_deeply_nested_abi() {
        let depth = 300;
        let nested = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
        let artifact = ContractArtifact::parse(&format!(r#"{{"abi": {}}}"#, nested)).unwrap();

        assert_eq!(artifact.abi_json().unwrap(), nested);
    }

    #[test]
    fn test_trailing_content_is_invalid() {
        let result = ContractArtifact::parse(r#"{"abi": []} {"abi": []}"#);
        assert!(matches!(result, Err(ArtifactError::Parse(_))));
    }

    #[test]
    fn test_invalid_json() {
        let result = ContractArtifact::parse("{not json");
        assert!(matches!(result, Err(ArtifactError::Parse(_))));
    }

    #[test]
    fn test_missing_abi() {
        let result = ContractArtifact::parse(r#"{"bytecode": "0x00"}"#);
        assert!(matches!(result, Err(ArtifactError::KeyMissing)));

        // Top-level array has no `abi` key either
        let result = ContractArtifact::parse(r#"[{"abi": []}]"#);
        assert!(matches!(result, Err(ArtifactError::KeyMissing)));
    }

    #[test]
    fn test_abi_file_name() {
        assert_eq!(abi_file_name("MyContract.json"), "mycontract.json");
        assert_eq!(abi_file_name("IERC20.JSON"), "ierc20.json");
        assert_eq!(abi_file_name("token.json"), "token.json");
    }
}
