//! Cart and favorites persistence across simulated restarts.

#![allow(clippy::unwrap_used)]

use bramblefig_client::models::Product;
use bramblefig_core::ProductId;
use bramblefig_integration_tests::TestContext;
use rust_decimal::Decimal;

fn product(id: &str, price: f64) -> Product {
    serde_json::from_value(serde_json::json!({
        "_id": id,
        "name": format!("Product {id}"),
        "image": format!("/images/{id}.jpg"),
        "price": price,
        "countInStock": 10
    }))
    .unwrap()
}

#[tokio::test]
async fn cart_survives_restart() {
    let ctx = TestContext::new().await;

    ctx.storefront
        .cart()
        .add_item(&product("p1", 10.0), 2)
        .unwrap();

    let reopened = ctx.reopen();
    let lines = reopened.cart().lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].product, ProductId::new("p1"));
    assert_eq!(lines[0].qty, 2);
    assert_eq!(lines[0].price, Decimal::from(10));
}

#[tokio::test]
async fn favorites_survive_restart() {
    let ctx = TestContext::new().await;

    ctx.storefront
        .favorites()
        .toggle(&product("p1", 10.0))
        .unwrap();
    ctx.storefront
        .favorites()
        .toggle(&product("p2", 5.5))
        .unwrap();

    let reopened = ctx.reopen();
    assert!(reopened.favorites().is_favorite(&ProductId::new("p1")));
    assert!(reopened.favorites().is_favorite(&ProductId::new("p2")));
    assert_eq!(reopened.favorites().entries().len(), 2);
}

#[tokio::test]
async fn session_survives_restart() {
    let ctx = TestContext::new().await;

    let session = serde_json::from_value(serde_json::json!({
        "_id": "u-1",
        "name": "Fern",
        "email": "fern@example.com",
        "isAdmin": false,
        "token": "tok-1"
    }))
    .unwrap();
    ctx.storefront.login(session).unwrap();

    let reopened = ctx.reopen();
    assert!(reopened.session().is_logged_in());
    assert_eq!(reopened.session().token().as_deref(), Some("tok-1"));
}

#[tokio::test]
async fn corrupt_state_slot_loads_as_empty() {
    let ctx = TestContext::new().await;

    ctx.storefront
        .cart()
        .add_item(&product("p1", 10.0), 1)
        .unwrap();

    // Clobber the persisted slot with junk.
    let cart_path = ctx.storefront.config().state_dir.join("cart.json");
    std::fs::write(&cart_path, "]]]not json[[[").unwrap();

    let reopened = ctx.reopen();
    assert!(reopened.cart().is_empty());
}

/// Two live handles over one state directory overwrite each other's slots:
/// last write wins, exactly like two browser tabs sharing local storage.
/// Known non-goal - there is no cross-process coordination.
#[tokio::test]
async fn concurrent_handles_are_last_write_wins() {
    let ctx = TestContext::new().await;
    let tab_a = ctx.reopen();
    let tab_b = ctx.reopen();

    tab_a.cart().add_item(&product("p1", 10.0), 1).unwrap();
    // tab_b hydrated before p1 existed; its write clobbers tab_a's.
    tab_b.cart().add_item(&product("p2", 5.0), 1).unwrap();

    let reopened = ctx.reopen();
    let lines = reopened.cart().lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].product, ProductId::new("p2"));
}
