//! End-to-end shopper sessions against on-disk storage.

use boutique_sdk::prelude::*;
use std::time::Duration;

fn config_for(dir: &std::path::Path) -> StorefrontConfig {
    StorefrontConfig::default().with_storage_dir(dir)
}

#[test]
fn cart_and_wishlist_survive_a_new_session() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut store = Storefront::from_config(config_for(dir.path())).unwrap();
        let tee = VariantSelection::new().with_size("M").with_color("Blanc");
        store.add_to_cart(&ProductId::new("1"), &tee).unwrap();
        store.add_to_cart(&ProductId::new("1"), &tee).unwrap();
        store
            .add_to_cart(&ProductId::new("4"), &VariantSelection::new().with_color("Naturel"))
            .unwrap();
        store.toggle_wishlist(&ProductId::new("6")).unwrap();
    }

    let store = Storefront::from_config(config_for(dir.path())).unwrap();
    let items = store.cart().items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].product_id.as_str(), "1");
    assert_eq!(items[0].size, "M");
    assert_eq!(items[0].color, "Blanc");
    assert_eq!(items[0].quantity, 2);
    // The only size is picked automatically.
    assert_eq!(items[1].size, "Unique");
    assert_eq!(store.cart().item_count(), 3);
    // 2 × 29.90 + 45.00
    assert_eq!(store.cart().subtotal().unwrap().amount_cents, 10_480);

    assert!(store.wishlist().contains(&ProductId::new("6")));
    // Toasts are not persisted.
    assert!(store.toasts().is_empty());
}

#[test]
fn corrupt_cart_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("boutique_cart.json"), "{ not json").unwrap();

    let store = Storefront::from_config(config_for(dir.path())).unwrap();
    assert!(store.cart().is_empty());
    assert!(!dir.path().join("boutique_cart.json").exists());
}

#[test]
fn non_utf8_cart_file_is_purged() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("boutique_cart.json"), [0xff, 0xfe, 0x5b]).unwrap();

    let mut store = Storefront::from_config(config_for(dir.path())).unwrap();
    assert!(store.cart().is_empty());
    assert!(!dir.path().join("boutique_cart.json").exists());

    // The slot is usable again.
    store
        .add_to_cart(&ProductId::new("4"), &VariantSelection::new().with_color("Noir"))
        .unwrap();
    assert!(dir.path().join("boutique_cart.json").exists());
}

#[test]
fn catalog_loaded_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(
        &path,
        r#"[{
            "id": "p1",
            "name": "Écharpe",
            "price": 35.0,
            "category": "unisex",
            "type": "accessories",
            "sizes": ["Unique"],
            "colors": ["Gris"]
        }]"#,
    )
    .unwrap();

    let mut config = StorefrontConfig::default();
    config.catalog.path = Some(path);
    let store = Storefront::from_config(config).unwrap();

    assert_eq!(store.catalog().len(), 1);
    let accessories = store.browse(&CategorySelector::Accessories, &FilterConfiguration::new());
    assert_eq!(accessories.len(), 1);
    assert_eq!(accessories[0].primary_image(), boutique_sdk::commerce::catalog::PLACEHOLDER_IMAGE);
}

#[test]
fn invalid_catalog_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, r#"[{"id": "p1", "name": "Vide", "price": 10.0, "category": "homme", "type": "hauts", "sizes": [], "colors": ["Noir"]}]"#).unwrap();

    let mut config = StorefrontConfig::default();
    config.catalog.path = Some(path);
    assert!(Storefront::from_config(config).is_err());
}

#[tokio::test(start_paused = true)]
async fn confirmation_toast_expires() {
    let mut store = Storefront::from_config(StorefrontConfig::default()).unwrap();
    let mut updates = store.toasts().subscribe();

    store
        .add_to_cart(
            &ProductId::new("3"),
            &VariantSelection::new().with_size("L").with_color("Bleu ciel"),
        )
        .unwrap();
    assert_eq!(store.toasts().len(), 1);
    assert!(updates.has_changed().unwrap());
    updates.borrow_and_update();

    tokio::time::sleep(Duration::from_millis(2999)).await;
    assert_eq!(store.toasts().len(), 1);

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert!(store.toasts().is_empty());
    assert!(updates.borrow_and_update().is_empty());
}

#[tokio::test(start_paused = true)]
async fn toast_capacity_follows_config() {
    let config = StorefrontConfig::from_toml_str("[toasts]\ncapacity = 2\ndefault_duration_ms = 0").unwrap();
    let mut store = Storefront::from_config(config).unwrap();

    for id in ["1", "2", "4"] {
        store.toggle_wishlist(&ProductId::new(id)).unwrap();
    }
    let texts: Vec<_> = store.toasts().visible().into_iter().map(|t| t.text).collect();
    assert_eq!(texts.len(), 2);
    assert!(texts[0].starts_with("Jean"));

    // Sticky toasts stay until dismissed.
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(store.toasts().len(), 2);
}
