//! Cart persistence across store instances backed by a file store.

use rocket_cache::{Cache, FileStore};
use rocket_commerce::{Cart, Product, ProductId};
use rocket_data::FixtureCatalog;
use rocket_store::{CartStore, StoreConfig};
use std::path::{Path, PathBuf};

const DB: &str = r#"{
    "stock": [
        { "id": 1, "amount": 3 },
        { "id": 2, "amount": 5 },
        { "id": 3, "amount": 2 }
    ],
    "products": [
        { "id": 1, "title": "Tênis de Caminhada", "price": 179.9, "image": "https://img.test/1.jpg" },
        { "id": 2, "title": "Tênis VR Caminhada", "price": 139.9, "image": "https://img.test/2.jpg", "brand": "Rocket" },
        { "id": 3, "title": "Tênis Adidas Duramo", "price": 219.9, "image": "https://img.test/3.jpg" }
    ]
}"#;

fn temp_root(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("rocket-store-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn open(root: &Path) -> CartStore<FixtureCatalog> {
    let cache = Cache::new(FileStore::open(root).unwrap());
    CartStore::open(
        FixtureCatalog::from_json(DB).unwrap(),
        cache,
        StoreConfig::default(),
    )
    .unwrap()
}

#[tokio::test]
async fn cart_survives_reopen() {
    let root = temp_root("reopen");

    let expected = {
        let store = open(&root);
        store.add_product(ProductId::new(2)).await.unwrap();
        store.add_product(ProductId::new(1)).await.unwrap();
        store.add_product(ProductId::new(2)).await.unwrap();
        store.add_product(ProductId::new(3)).await.unwrap();
        store.remove_product(ProductId::new(1)).await.unwrap();
        store
            .update_product_amount(ProductId::new(2), 4)
            .await
            .unwrap();
        store.cart()
    };

    let reopened = open(&root);
    assert_eq!(reopened.cart(), expected);

    let ids: Vec<i64> = reopened.cart().iter().map(|p| p.id.get()).collect();
    assert_eq!(ids, vec![2, 3]);
    assert_eq!(reopened.cart().amount_of(ProductId::new(2)), 4);

    let _ = std::fs::remove_dir_all(&root);
}

#[tokio::test]
async fn display_fields_round_trip() {
    let root = temp_root("fields");

    {
        let store = open(&root);
        store.add_product(ProductId::new(2)).await.unwrap();
    }

    let reopened = open(&root);
    let cart = reopened.cart();
    let product: &Product = cart.get(ProductId::new(2)).unwrap();
    assert_eq!(product.title, "Tênis VR Caminhada");
    assert_eq!(product.extra.get("brand"), Some(&serde_json::json!("Rocket")));
    assert_eq!(product.amount, 1);

    let _ = std::fs::remove_dir_all(&root);
}

#[tokio::test]
async fn slot_holds_plain_product_array() {
    let root = temp_root("format");

    {
        let store = open(&root);
        store.add_product(ProductId::new(1)).await.unwrap();
    }

    let cache = Cache::new(FileStore::open(&root).unwrap());
    let raw = cache.get_raw("@RocketShoes:cart").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    assert_eq!(value[0]["id"], 1);
    assert_eq!(value[0]["amount"], 1);

    let cart: Cart = serde_json::from_value(value).unwrap();
    assert_eq!(cart.len(), 1);

    let _ = std::fs::remove_dir_all(&root);
}

#[tokio::test]
async fn cleared_slot_reopens_empty() {
    let root = temp_root("cleared");

    {
        let store = open(&root);
        store.add_product(ProductId::new(1)).await.unwrap();
        store.clear().await.unwrap();
    }

    assert!(open(&root).cart().is_empty());

    let _ = std::fs::remove_dir_all(&root);
}
