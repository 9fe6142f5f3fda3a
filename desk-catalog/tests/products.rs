mod common;

use common::{png, Harness};
use desk_blob::AssetUpload;
use desk_catalog::{ProductCategory, ProductInput, ProductsService};
use desk_core::{DeskError, ErrorKind};

fn service(h: &Harness) -> ProductsService {
    ProductsService::new(h.records(), h.adapter.clone())
}

#[tokio::test]
async fn test_create_writes_every_text_field() {
    let h = Harness::new();
    let products = service(&h);

    let input = ProductInput::new("Shea butter", 850.0)
        .with_category(ProductCategory::Butter)
        .with_stock("12");
    let product = products
        .create(&h.ctx, input, Some(png("My Soap (1).png")))
        .await
        .unwrap()
        .value;

    assert_eq!(product.str_field("category"), Some("butter"));
    assert_eq!(product.str_field("benefits"), Some(""));
    assert_eq!(product.str_field("stock"), Some("12"));
    assert!(product.get("slug").is_none());

    let keys = h.stored_keys().await;
    assert_eq!(keys.len(), 1);
    assert!(keys[0].starts_with(&format!("products/{}-", product.id)));
    assert!(keys[0].ends_with("-my-soap-1-.png"));
}

#[tokio::test]
async fn test_negative_price_is_rejected() {
    let h = Harness::new();

    let err = service(&h)
        .create(&h.ctx, ProductInput::new("Bar", -1.0), None)
        .await
        .unwrap_err();

    let desk = DeskError::from_anyhow(&err).unwrap();
    assert_eq!(desk.kind, ErrorKind::Unprocessable);
    assert!(desk.errors.as_ref().unwrap().get("price").is_some());
    assert_eq!(h.records.create_count(), 0);
}

#[tokio::test]
async fn test_nan_price_never_reaches_the_store() {
    let h = Harness::new();

    let err = service(&h)
        .create(&h.ctx, ProductInput::new("Bar", f64::NAN), Some(png("bar.png")))
        .await
        .unwrap_err();

    let desk = DeskError::from_anyhow(&err).unwrap();
    assert_eq!(desk.kind, ErrorKind::Unprocessable);
    assert_eq!(desk.errors.as_ref().unwrap()["price"][0], "price must be a number");
    assert_eq!(h.records.create_count(), 0);
    assert_eq!(h.assets.put_count(), 0);
}

#[tokio::test]
async fn test_new_image_replaces_and_cleans_up_old_one() {
    let h = Harness::new();
    let products = service(&h);

    let created = products
        .create(&h.ctx, ProductInput::new("Bar", 100.0), Some(png("old.png")))
        .await
        .unwrap()
        .value;
    let old = created.str_field("image").unwrap().to_string();

    let edit = ProductInput::new("Bar", 120.0).with_image(old.clone());
    let replacement = AssetUpload::new(&b"new"[..]).with_filename("new.webp");
    let outcome = products.update(&h.ctx, &created.id, edit, Some(replacement)).await.unwrap();

    assert!(outcome.is_clean());
    assert_ne!(outcome.value.str_field("image"), Some(old.as_str()));
    assert_eq!(outcome.value.get("price").and_then(|v| v.as_f64()), Some(120.0));

    let keys = h.stored_keys().await;
    assert_eq!(keys.len(), 1);
    assert!(keys[0].ends_with("-new.webp"));
    assert_eq!(h.assets.delete_count(), 1);
}

#[tokio::test]
async fn test_edit_without_image_keeps_existing_one() {
    let h = Harness::new();
    let products = service(&h);

    let created = products
        .create(&h.ctx, ProductInput::new("Bar", 100.0), Some(png("a.png")))
        .await
        .unwrap()
        .value;

    let outcome = products
        .update(&h.ctx, &created.id, ProductInput::new("Bar v2", 100.0), None)
        .await
        .unwrap();

    assert_eq!(outcome.value.str_field("image"), created.str_field("image"));
    assert_eq!(outcome.value.str_field("name"), Some("Bar v2"));
    assert_eq!(h.assets.delete_count(), 0);
}

#[tokio::test]
async fn test_non_image_upload_is_refused() {
    let h = Harness::new();

    let upload = AssetUpload::new(&b"%PDF"[..]).with_filename("invoice.pdf");
    let err = service(&h)
        .create(&h.ctx, ProductInput::new("Bar", 1.0), Some(upload))
        .await
        .unwrap_err();

    assert_eq!(DeskError::kind_of(&err), ErrorKind::Unprocessable);
    assert_eq!(h.records.create_count(), 0);
}
