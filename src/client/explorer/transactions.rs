//! Transaction history reads for ExplorerClient.

use serde::Deserialize;
use serde_json::json;

use super::ExplorerClient;
use crate::domain::QueryResult;

const ACCOUNT_TRANSACTIONS_COUNT_QUERY: &str = r"
  query AccountTransactionsCount($address: String) {
    move_resources_aggregate(
      where: {address: {_eq: $address}}
      distinct_on: transaction_version
    ) {
      aggregate {
        count
      }
    }
  }
";

const ACCOUNT_TRANSACTIONS_QUERY: &str = r"
  query AccountTransactionsData($address: String, $limit: Int, $offset: Int) {
    account_transactions(
      where: {account_address: {_eq: $address}}
      order_by: {transaction_version: desc}
      limit: $limit
      offset: $offset
    ) {
      transaction_version
    }
  }
";

#[derive(Debug, Deserialize)]
struct CountResponse {
    #[serde(default)]
    move_resources_aggregate: Option<Aggregate>,
}

#[derive(Debug, Deserialize)]
struct Aggregate {
    #[serde(default)]
    aggregate: Option<Count>,
}

#[derive(Debug, Deserialize)]
struct Count {
    count: u64,
}

#[derive(Debug, Deserialize)]
struct VersionsResponse {
    #[serde(default)]
    account_transactions: Vec<VersionRow>,
}

#[derive(Debug, Deserialize)]
struct VersionRow {
    transaction_version: u64,
}

impl ExplorerClient {
    /// Counts the distinct transactions that touched resources of `address`.
    ///
    /// A response without an aggregate counts as zero.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a malformed address, otherwise whatever the gateway
    /// reports.
    pub async fn account_transaction_count(&self, address: &str) -> QueryResult<u64> {
        let address = Self::standardize(address)?;

        let response: CountResponse = self
            .indexer
            .fetch_graphql(
                self.network(),
                ACCOUNT_TRANSACTIONS_COUNT_QUERY,
                json!({ "address": address }),
            )
            .await?;

        Ok(response
            .move_resources_aggregate
            .and_then(|a| a.aggregate)
            .map_or(0, |c| c.count))
    }

    /// Lists transaction versions of `address`, newest first.
    ///
    /// `limit` and `offset` go to the indexer untouched; it owns the bounds.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a malformed address, otherwise whatever the gateway
    /// reports.
    pub async fn account_transaction_versions(
        &self,
        address: &str,
        limit: u32,
        offset: Option<u32>,
    ) -> QueryResult<Vec<u64>> {
        let address = Self::standardize(address)?;

        let mut variables = json!({ "address": address, "limit": limit });
        if let Some(offset) = offset {
            variables["offset"] = json!(offset);
        }

        let response: VersionsResponse = self
            .indexer
            .fetch_graphql(self.network(), ACCOUNT_TRANSACTIONS_QUERY, variables)
            .await?;

        Ok(response
            .account_transactions
            .into_iter()
            .map(|row| row.transaction_version)
            .collect())
    }
}
