mod common;

use std::time::Duration;

use products_api::db::PRODUCT_ID_START;
use rust_decimal::Decimal;

use common::{new_product, setup_service};

#[tokio::test]
async fn create_assigns_id_and_stamps_timestamps() -> anyhow::Result<()> {
    let service = setup_service().await?;

    let created = service
        .create(new_product("Test Product1", Decimal::new(1000, 2), 50))
        .await?;

    assert_eq!(created.id, PRODUCT_ID_START);
    assert_eq!(created.name, "Test Product1");
    assert_eq!(created.description, "Test Product1 description");
    assert_eq!(created.price, Decimal::new(10, 0));
    assert_eq!(created.stock, 50);
    assert_eq!(created.created_at, created.updated_at);

    let second = service
        .create(new_product("Test Product2", Decimal::new(5, 0), 1))
        .await?;
    assert!(second.id > created.id);

    Ok(())
}

#[tokio::test]
async fn get_by_id_returns_existing_product() -> anyhow::Result<()> {
    let service = setup_service().await?;
    let created = service
        .create(new_product("Existing Product", Decimal::new(20, 0), 100))
        .await?;

    let fetched = service.get_by_id(created.id).await?.expect("product exists");
    assert_eq!(fetched, created);

    Ok(())
}

#[tokio::test]
async fn get_by_id_returns_none_when_missing() -> anyhow::Result<()> {
    let service = setup_service().await?;

    assert!(service.get_by_id(999).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn repeated_reads_are_identical() -> anyhow::Result<()> {
    let service = setup_service().await?;
    assert!(service.get_all().await?.is_empty());

    let first = service
        .create(new_product("First", Decimal::new(1, 0), 1))
        .await?;
    service
        .create(new_product("Second", Decimal::new(2, 0), 2))
        .await?;

    let all = service.get_all().await?;
    assert_eq!(all.len(), 2);
    assert_eq!(all, service.get_all().await?);
    assert_eq!(
        service.get_by_id(first.id).await?,
        service.get_by_id(first.id).await?
    );

    Ok(())
}

#[tokio::test]
async fn update_overwrites_fields_and_advances_updated_at() -> anyhow::Result<()> {
    let service = setup_service().await?;
    let created = service
        .create(new_product("Initial Name", Decimal::new(100, 0), 20))
        .await?;

    tokio::time::sleep(Duration::from_millis(10)).await;

    let mut changed = created.clone();
    changed.name = "Updated Name".into();
    changed.description = "Updated Description".into();
    changed.price = Decimal::new(150, 0);
    changed.stock = 30;
    assert!(service.update(changed).await?);

    let updated = service.get_by_id(created.id).await?.expect("product exists");
    assert_eq!(updated.name, "Updated Name");
    assert_eq!(updated.description, "Updated Description");
    assert_eq!(updated.price, Decimal::new(150, 0));
    assert_eq!(updated.stock, 30);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    Ok(())
}

#[tokio::test]
async fn update_of_missing_product_returns_false() -> anyhow::Result<()> {
    let service = setup_service().await?;
    let created = service
        .create(new_product("Ghost", Decimal::new(1, 0), 1))
        .await?;

    let mut ghost = created.clone();
    ghost.id = 999;
    assert!(!service.update(ghost).await?);

    let untouched = service.get_by_id(created.id).await?.expect("product exists");
    assert_eq!(untouched, created);

    Ok(())
}

#[tokio::test]
async fn delete_removes_product() -> anyhow::Result<()> {
    let service = setup_service().await?;
    let created = service
        .create(new_product("Product to Delete", Decimal::ZERO, 10))
        .await?;

    assert!(service.delete(created.id).await?);
    assert!(service.get_by_id(created.id).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn delete_of_missing_product_leaves_store_unchanged() -> anyhow::Result<()> {
    let service = setup_service().await?;
    service
        .create(new_product("Keeper", Decimal::new(3, 0), 3))
        .await?;
    let before = service.get_all().await?;

    assert!(!service.delete(999).await?);
    assert_eq!(service.get_all().await?, before);

    Ok(())
}

#[tokio::test]
async fn decrement_stock_reduces_stock() -> anyhow::Result<()> {
    let service = setup_service().await?;
    let created = service
        .create(new_product("Test Stock", Decimal::ZERO, 50))
        .await?;

    tokio::time::sleep(Duration::from_millis(10)).await;

    assert!(service.decrement_stock(created.id, 20).await?);

    let updated = service.get_by_id(created.id).await?.expect("product exists");
    assert_eq!(updated.stock, 30);
    assert!(updated.updated_at > created.updated_at);
    assert_eq!(updated.created_at, created.created_at);

    Ok(())
}

#[tokio::test]
async fn decrement_stock_fails_when_not_enough_stock() -> anyhow::Result<()> {
    let service = setup_service().await?;
    let created = service
        .create(new_product("Test Stock", Decimal::new(100, 0), 5))
        .await?;

    assert!(!service.decrement_stock(created.id, 10).await?);

    let unchanged = service.get_by_id(created.id).await?.expect("product exists");
    assert_eq!(unchanged.stock, 5);
    assert_eq!(unchanged.updated_at, created.updated_at);

    Ok(())
}

#[tokio::test]
async fn decrement_stock_to_exactly_zero_succeeds() -> anyhow::Result<()> {
    let service = setup_service().await?;
    let created = service
        .create(new_product("Last Units", Decimal::new(1, 0), 7))
        .await?;

    assert!(service.decrement_stock(created.id, 7).await?);
    let drained = service.get_by_id(created.id).await?.expect("product exists");
    assert_eq!(drained.stock, 0);

    assert!(!service.decrement_stock(created.id, 1).await?);

    Ok(())
}

#[tokio::test]
async fn decrement_stock_fails_for_missing_product() -> anyhow::Result<()> {
    let service = setup_service().await?;

    assert!(!service.decrement_stock(999, 1).await?);

    Ok(())
}

#[tokio::test]
async fn increment_stock_increases_stock() -> anyhow::Result<()> {
    let service = setup_service().await?;
    let created = service
        .create(new_product("Test Stock Increase", Decimal::new(200, 0), 30))
        .await?;

    tokio::time::sleep(Duration::from_millis(10)).await;

    assert!(service.increment_stock(created.id, 10).await?);

    let updated = service.get_by_id(created.id).await?.expect("product exists");
    assert_eq!(updated.stock, 40);
    assert!(updated.updated_at > created.updated_at);

    Ok(())
}

#[tokio::test]
async fn increment_stock_fails_for_missing_product() -> anyhow::Result<()> {
    let service = setup_service().await?;

    assert!(!service.increment_stock(999, 5).await?);
    assert!(service.get_all().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn increment_stock_refuses_to_overflow() -> anyhow::Result<()> {
    let service = setup_service().await?;
    let created = service
        .create(new_product("Near Limit", Decimal::new(100, 0), 1))
        .await?;

    let before = service.get_by_id(created.id).await?.expect("product exists");
    assert!(!service.increment_stock(created.id, i32::MAX).await?);
    let unchanged = service.get_by_id(created.id).await?.expect("product exists");
    assert_eq!(unchanged, before);
    assert_eq!(unchanged.stock, 1);

    // Landing exactly on the maximum is still allowed.
    assert!(service.increment_stock(created.id, i32::MAX - 1).await?);
    let full = service.get_by_id(created.id).await?.expect("product exists");
    assert_eq!(full.stock, i32::MAX);

    assert!(!service.increment_stock(created.id, 1).await?);
    assert_eq!(service.get_all().await?.len(), 1);

    Ok(())
}

// create(stock 50) -> decrement 20 -> 30 -> decrement 40 rejected, still 30.
#[tokio::test]
async fn stock_flow_keeps_stock_non_negative() -> anyhow::Result<()> {
    let service = setup_service().await?;
    let created = service
        .create(new_product("Test Stock", Decimal::new(999, 2), 50))
        .await?;

    assert!(service.decrement_stock(created.id, 20).await?);
    let after_first = service.get_by_id(created.id).await?.expect("product exists");
    assert_eq!(after_first.stock, 30);

    assert!(!service.decrement_stock(created.id, 40).await?);
    let after_second = service.get_by_id(created.id).await?.expect("product exists");
    assert_eq!(after_second.stock, 30);
    assert_eq!(after_second, after_first);

    Ok(())
}
