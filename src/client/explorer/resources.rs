//! Resource reads for ExplorerClient.

use serde::Deserialize;
use serde_json::json;

use super::ExplorerClient;
use crate::domain::{
    MoveResource, NormalizedError, PACKAGE_REGISTRY_TYPE, PackageMetadata, QueryResult,
    packages_from_registry,
};

const ACCOUNT_RESOURCE_QUERY: &str = r"
  query AccountResource($address: String, $type: String) {
    move_resources(
      where: {address: {_eq: $address}, type: {_eq: $type}}
      limit: 1
    ) {
      type
      data
    }
  }
";

const ACCOUNT_RESOURCES_QUERY: &str = r"
  query AccountResources($address: String) {
    move_resources(where: {address: {_eq: $address}}) {
      type
      data
    }
  }
";

#[derive(Debug, Deserialize)]
struct ResourcesResponse {
    #[serde(default)]
    move_resources: Vec<MoveResource>,
}

impl ExplorerClient {
    /// Fetches one resource of `resource_type` stored under `address`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a malformed address, `NotFound` when the account
    /// holds no such resource, otherwise whatever the gateway reports.
    pub async fn account_resource(
        &self,
        address: &str,
        resource_type: &str,
    ) -> QueryResult<MoveResource> {
        let address = Self::standardize(address)?;

        let response: ResourcesResponse = self
            .indexer
            .fetch_graphql(
                self.network(),
                ACCOUNT_RESOURCE_QUERY,
                json!({ "address": address, "type": resource_type }),
            )
            .await?;

        response
            .move_resources
            .into_iter()
            .next()
            .ok_or_else(NormalizedError::not_found)
    }

    /// Fetches every resource stored under `address`. An empty list is a
    /// valid result.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a malformed address, otherwise whatever the gateway
    /// reports.
    pub async fn account_resources(&self, address: &str) -> QueryResult<Vec<MoveResource>> {
        let address = Self::standardize(address)?;

        let response: ResourcesResponse = self
            .indexer
            .fetch_graphql(
                self.network(),
                ACCOUNT_RESOURCES_QUERY,
                json!({ "address": address }),
            )
            .await?;

        Ok(response.move_resources)
    }

    /// Lists the packages published under `address`, sorted by name.
    ///
    /// Built on the `PackageRegistry` resource; its error is returned as is.
    ///
    /// # Errors
    ///
    /// Same as [`ExplorerClient::account_resource`].
    pub async fn account_packages(&self, address: &str) -> QueryResult<Vec<PackageMetadata>> {
        let registry = self
            .account_resource(address, PACKAGE_REGISTRY_TYPE)
            .await?;
        Ok(packages_from_registry(&registry))
    }
}
