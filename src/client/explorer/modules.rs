//! Module reads for ExplorerClient.

use serde::Deserialize;
use serde_json::json;

use super::ExplorerClient;
use crate::domain::{MoveModuleBytecode, NormalizedError, QueryResult};

const ACCOUNT_MODULE_QUERY: &str = r"
  query AccountModule($address: String, $name: String) {
    move_modules(
      where: {address: {_eq: $address}, name: {_eq: $name}}
      limit: 1
    ) {
      bytecode
      abi
    }
  }
";

const ACCOUNT_MODULES_QUERY: &str = r"
  query AccountModules($address: String) {
    move_modules(where: {address: {_eq: $address}}) {
      bytecode
      abi
    }
  }
";

#[derive(Debug, Deserialize)]
struct ModulesResponse {
    #[serde(default)]
    move_modules: Vec<MoveModuleBytecode>,
}

impl ExplorerClient {
    /// Fetches the module `module_name` published under `address`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a malformed address, `NotFound` when no such module
    /// exists, otherwise whatever the gateway reports.
    pub async fn account_module(
        &self,
        address: &str,
        module_name: &str,
    ) -> QueryResult<MoveModuleBytecode> {
        let address = Self::standardize(address)?;

        let response: ModulesResponse = self
            .indexer
            .fetch_graphql(
                self.network(),
                ACCOUNT_MODULE_QUERY,
                json!({ "address": address, "name": module_name }),
            )
            .await?;

        response
            .move_modules
            .into_iter()
            .next()
            .ok_or_else(NormalizedError::not_found)
    }

    /// Fetches all modules published under `address`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a malformed address, otherwise whatever the gateway
    /// reports. An account without modules yields an empty list.
    pub async fn account_modules(&self, address: &str) -> QueryResult<Vec<MoveModuleBytecode>> {
        let address = Self::standardize(address)?;

        let response: ModulesResponse = self
            .indexer
            .fetch_graphql(
                self.network(),
                ACCOUNT_MODULES_QUERY,
                json!({ "address": address }),
            )
            .await?;

        Ok(response.move_modules)
    }
}
