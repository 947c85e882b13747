use products_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    models::NewProduct,
    services::product_service::ProductService,
};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    let service = ProductService::new(orm);
    let existing: Vec<String> = service
        .get_all()
        .await?
        .into_iter()
        .map(|p| p.name)
        .collect();

    let products = vec![
        ("Axum Hoodie", "Warm hoodie for Rustaceans", Decimal::new(5500, 2), 50),
        ("Ferris Mug", "Coffee tastes better with Ferris", Decimal::new(1200, 2), 100),
        ("Rust Sticker Pack", "Decorate your laptop", Decimal::new(500, 2), 200),
        ("E-book: Async Rust", "Learn async Rust patterns", Decimal::new(2500, 2), 75),
    ];

    for (name, desc, price, stock) in products {
        if existing.iter().any(|n| n == name) {
            println!("Skipping {name}, already present");
            continue;
        }
        let product = service
            .create(NewProduct {
                name: name.to_string(),
                description: desc.to_string(),
                price,
                stock,
            })
            .await?;
        println!("Seeded {} (id={})", product.name, product.id);
    }

    Ok(())
}
