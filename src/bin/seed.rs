use onhardware_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    models::ProductFields,
    store::{OrmProductCatalog, ProductCatalog},
};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(config.require_database_url()?).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    let catalog = OrmProductCatalog::new(orm);
    seed_products(&catalog).await?;

    println!("Seed completed");
    Ok(())
}

async fn seed_products(catalog: &impl ProductCatalog) -> anyhow::Result<()> {
    if !catalog.find_all().await?.is_empty() {
        println!("Catalog already has products, skipping");
        return Ok(());
    }

    let products = vec![
        ("Ryzen 7 7800X3D", "AMD", "100-100000910WOF", "8 cores, 16 threads, 96MB L3 cache, AM5", Decimal::new(219990, 2)),
        ("GeForce RTX 4070 Super", "NVIDIA", "RTX4070S-12G", "12GB GDDR6X, PCIe 4.0", Decimal::new(459900, 2)),
        ("Vengeance DDR5 32GB", "Corsair", "CMK32GX5M2B5600C36", "2x16GB, 5600MHz, CL36", Decimal::new(69990, 2)),
        ("990 PRO 2TB", "Samsung", "MZ-V9P2T0BW", "NVMe M.2 PCIe 4.0, 7450MB/s read", Decimal::new(129900, 2)),
    ];

    for (name, brand, model, specification, price) in products {
        let product = catalog
            .insert(ProductFields {
                name: name.to_string(),
                brand: brand.to_string(),
                model: model.to_string(),
                specification: specification.to_string(),
                price,
            })
            .await?;
        println!("Seeded product {} ({})", product.name, product.id);
    }

    Ok(())
}
