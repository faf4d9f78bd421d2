//! Coin balance read for ExplorerClient, served by the node.

use serde_json::{Value, json};

use super::ExplorerClient;
use crate::client::node::ViewRequest;
use crate::domain::QueryResult;

/// Coin whose balance is read when the caller names none.
pub const DEFAULT_COIN_TYPE: &str = "0x1::libra2_coin::Libra2Coin";

const BALANCE_FUNCTION: &str = "0x1::coin::balance";

impl ExplorerClient {
    /// Reads the balance of `coin_type` (default [`DEFAULT_COIN_TYPE`]) held
    /// by `address`, as the node's decimal string.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a malformed address, otherwise the classified node
    /// failure (`NotFound` on 404).
    pub async fn account_balance(
        &self,
        address: &str,
        coin_type: Option<&str>,
    ) -> QueryResult<String> {
        let address = Self::standardize(address)?;

        let request = ViewRequest {
            function: BALANCE_FUNCTION.to_string(),
            type_arguments: vec![coin_type.unwrap_or(DEFAULT_COIN_TYPE).to_string()],
            arguments: vec![json!(address)],
        };

        let result = self.node.view(self.network(), &request).await?;
        Ok(first_value_as_string(&result))
    }
}

/// First element of a view result array as a string, `"0"` when absent.
fn first_value_as_string(result: &Value) -> String {
    match result.as_array().and_then(|values| values.first()) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "0".to_string(),
        Some(other) => other.to_string(),
    }
}
