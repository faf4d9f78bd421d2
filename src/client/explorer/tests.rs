use std::sync::Arc;

use rstest::rstest;
use serde_json::json;

use super::ExplorerClient;
use crate::domain::{ErrorKind, NormalizedError, PACKAGE_REGISTRY_TYPE};
use crate::test_utils::{MockTransport, NetworkMother, PayloadMother, ResponseMother};

const CANONICAL_0X123: &str = "0x0000000000000000000000000000000000000000000000000000000000000123";

fn client(transport: &Arc<MockTransport>) -> ExplorerClient {
    ExplorerClient::new(NetworkMother::with_indexer(), transport.clone())
}

fn responding(response: crate::client::HttpResponse) -> Arc<MockTransport> {
    Arc::new(MockTransport::new().with_response(response))
}

// ========================================================================
// Input validation
// ========================================================================

#[rstest]
#[case::resource("resource")]
#[case::resources("resources")]
#[case::module("module")]
#[case::modules("modules")]
#[case::packages("packages")]
#[case::count("count")]
#[case::versions("versions")]
#[case::balance("balance")]
#[tokio::test]
async fn test_invalid_address_never_reaches_backend(#[case] read: &str) {
    let transport = Arc::new(MockTransport::new());
    let client = client(&transport);
    let bad = "0xnot-hex";

    let err = match read {
        "resource" => client.account_resource(bad, "0x1::a::B").await.unwrap_err(),
        "resources" => client.account_resources(bad).await.unwrap_err(),
        "module" => client.account_module(bad, "coin").await.unwrap_err(),
        "modules" => client.account_modules(bad).await.unwrap_err(),
        "packages" => client.account_packages(bad).await.unwrap_err(),
        "count" => client.account_transaction_count(bad).await.unwrap_err(),
        "versions" => client
            .account_transaction_versions(bad, 25, None)
            .await
            .unwrap_err(),
        "balance" => client.account_balance(bad, None).await.unwrap_err(),
        other => panic!("unknown read {other}"),
    };

    assert_eq!(err, NormalizedError::invalid_input("Invalid address '0xnot-hex'"));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_address_is_standardized_before_sending() {
    let transport = responding(ResponseMother::data(json!({ "move_modules": [] })));

    client(&transport).account_modules("0x123").await.unwrap();

    assert_eq!(
        transport.calls()[0].body["variables"]["address"],
        CANONICAL_0X123
    );
}

// ========================================================================
// Capability gate
// ========================================================================

#[tokio::test]
async fn test_network_without_indexer_fails_without_io() {
    let transport = Arc::new(MockTransport::new());
    let client = ExplorerClient::new(NetworkMother::without_indexer(), transport.clone());

    assert!(!client.supports_indexer());
    let err = client.account_resources("0x1").await.unwrap_err();
    assert_eq!(err, NormalizedError::indexer_unavailable());
    let err = client.account_transaction_count("0x1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IndexerUnavailable);
    assert_eq!(transport.call_count(), 0);
}

// ========================================================================
// Resources
// ========================================================================

#[tokio::test]
async fn test_account_resource_returns_first_row() {
    let transport = responding(ResponseMother::data(json!({
        "move_resources": [PayloadMother::resource("0x1::account::Account", json!({"sequence_number": "7"}))]
    })));

    let resource = client(&transport)
        .account_resource("0x1", "0x1::account::Account")
        .await
        .unwrap();

    assert_eq!(resource.resource_type, "0x1::account::Account");
    assert_eq!(resource.data["sequence_number"], "7");
    let body = &transport.calls()[0].body;
    assert_eq!(body["variables"]["type"], "0x1::account::Account");
    assert!(body["query"].as_str().unwrap().contains("limit: 1"));
}

#[tokio::test]
async fn test_account_resource_empty_is_not_found() {
    let transport = responding(ResponseMother::data(json!({ "move_resources": [] })));
    let err = client(&transport)
        .account_resource("0x1", "0x1::account::Account")
        .await
        .unwrap_err();
    assert_eq!(err, NormalizedError::not_found());
}

#[tokio::test]
async fn test_account_resources_empty_is_ok() {
    let transport = responding(ResponseMother::data(json!({ "move_resources": [] })));
    let resources = client(&transport).account_resources("0x1").await.unwrap();
    assert!(resources.is_empty());
}

#[tokio::test]
async fn test_account_resources_lists_all() {
    let transport = responding(ResponseMother::data(json!({
        "move_resources": [
            PayloadMother::resource("0x1::account::Account", json!({})),
            PayloadMother::resource("0x1::coin::CoinStore<0x1::libra2_coin::Libra2Coin>", json!({})),
        ]
    })));
    let resources = client(&transport).account_resources("0x1").await.unwrap();
    assert_eq!(resources.len(), 2);
}

// ========================================================================
// Modules
// ========================================================================

#[tokio::test]
async fn test_account_module_found() {
    let transport = responding(ResponseMother::data(json!({
        "move_modules": [PayloadMother::module("coin")]
    })));

    let module = client(&transport).account_module("0x1", "coin").await.unwrap();

    assert_eq!(module.name(), Some("coin"));
    assert_eq!(transport.calls()[0].body["variables"]["name"], "coin");
}

#[tokio::test]
async fn test_account_module_empty_is_not_found() {
    let transport = responding(ResponseMother::data(json!({ "move_modules": [] })));
    let err = client(&transport)
        .account_module("0x1", "missing")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_account_modules_empty_is_ok() {
    let transport = responding(ResponseMother::data(json!({ "move_modules": [] })));
    assert!(client(&transport).account_modules("0x1").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_backend_errors_propagate_from_reads() {
    let transport = responding(ResponseMother::errors(&["db indexer reader is not available"]));
    let err = client(&transport).account_modules("0x1").await.unwrap_err();
    assert_eq!(err, NormalizedError::indexer_unavailable());

    let transport = responding(ResponseMother::errors(&["unexpected null"]));
    let err = client(&transport).account_modules("0x1").await.unwrap_err();
    assert_eq!(err, NormalizedError::unhandled("unexpected null"));
}

// ========================================================================
// Packages
// ========================================================================

#[tokio::test]
async fn test_account_packages_sorted() {
    let transport = responding(ResponseMother::data(json!({
        "move_resources": [PayloadMother::resource(
            PACKAGE_REGISTRY_TYPE,
            json!({ "packages": [
                PayloadMother::package("MoveStdlib", &["vector", "bcs"]),
                PayloadMother::package("Libra2Framework", &["coin", "account"]),
            ]})
        )]
    })));

    let packages = client(&transport).account_packages("0x1").await.unwrap();

    let names: Vec<_> = packages.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Libra2Framework", "MoveStdlib"]);
    let modules: Vec<_> = packages[1].modules.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(modules, ["bcs", "vector"]);
    assert_eq!(
        transport.calls()[0].body["variables"]["type"],
        PACKAGE_REGISTRY_TYPE
    );
}

#[tokio::test]
async fn test_account_packages_forwards_underlying_error() {
    let transport = responding(ResponseMother::data(json!({ "move_resources": [] })));
    let err = client(&transport).account_packages("0x1").await.unwrap_err();
    assert_eq!(err, NormalizedError::not_found());

    let transport = responding(ResponseMother::status(429, String::new()));
    let err = client(&transport).account_packages("0x1").await.unwrap_err();
    assert_eq!(err, NormalizedError::too_many_requests());
    assert_eq!(transport.call_count(), 1);
}

// ========================================================================
// Transactions
// ========================================================================

#[tokio::test]
async fn test_transaction_count() {
    let transport = responding(ResponseMother::data(json!({
        "move_resources_aggregate": { "aggregate": { "count": 42 } }
    })));
    assert_eq!(
        client(&transport).account_transaction_count("0x1").await,
        Ok(42)
    );
}

#[tokio::test]
async fn test_transaction_count_without_aggregate_is_zero() {
    let transport = responding(ResponseMother::data(json!({})));
    assert_eq!(
        client(&transport).account_transaction_count("0x1").await,
        Ok(0)
    );
}

#[tokio::test]
async fn test_transaction_versions_pass_pagination_through() {
    let transport = responding(ResponseMother::data(json!({
        "account_transactions": [
            { "transaction_version": 900 },
            { "transaction_version": 12 }
        ]
    })));

    let versions = client(&transport)
        .account_transaction_versions("0x1", 2, Some(40))
        .await
        .unwrap();

    assert_eq!(versions, [900, 12]);
    let variables = &transport.calls()[0].body["variables"];
    assert_eq!(variables["limit"], 2);
    assert_eq!(variables["offset"], 40);
}

#[tokio::test]
async fn test_transaction_versions_without_offset() {
    let transport = responding(ResponseMother::data(json!({ "account_transactions": [] })));

    let versions = client(&transport)
        .account_transaction_versions("0x1", 0, None)
        .await
        .unwrap();

    assert!(versions.is_empty());
    let variables = &transport.calls()[0].body["variables"];
    assert_eq!(variables["limit"], 0);
    assert!(variables.get("offset").is_none());
}

// ========================================================================
// Balance
// ========================================================================

#[tokio::test]
async fn test_account_balance_default_coin() {
    let transport = responding(ResponseMother::ok_json(json!(["100000000"])));

    let balance = client(&transport).account_balance("0x123", None).await.unwrap();

    assert_eq!(balance, "100000000");
    let call = &transport.calls()[0];
    assert_eq!(call.url, format!("{}/view", NetworkMother::NODE_URL));
    assert_eq!(call.body["type_arguments"][0], super::DEFAULT_COIN_TYPE);
    assert_eq!(call.body["arguments"][0], CANONICAL_0X123);
}

#[tokio::test]
async fn test_account_balance_custom_coin_and_errors() {
    let transport = responding(ResponseMother::ok_json(json!([])));
    let balance = client(&transport)
        .account_balance("0x1", Some("0xcafe::usd::USD"))
        .await
        .unwrap();
    assert_eq!(balance, "0");
    assert_eq!(
        transport.calls()[0].body["type_arguments"][0],
        "0xcafe::usd::USD"
    );

    let transport = responding(ResponseMother::status(
        404,
        json!({ "message": "Resource not found" }).to_string(),
    ));
    let err = client(&transport).account_balance("0x1", None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_balance_does_not_need_indexer() {
    let transport = responding(ResponseMother::ok_json(json!(["5"])));
    let client = ExplorerClient::new(NetworkMother::without_indexer(), transport.clone());
    assert_eq!(client.account_balance("0x1", None).await, Ok("5".to_string()));
}
