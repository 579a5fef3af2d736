use onhardware_api::{
    db::{create_orm_conn, run_migrations},
    dto::{
        cart::{CreateCartRequest, FinalizeCartRequest},
        products::ProductRequest,
    },
    error::AppError,
    models::CartStatus,
    services::{cart_service, product_service},
    state::AppState,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ConnectionTrait, Statement};

// Integration flow against PostgreSQL: create -> merge -> remove -> finalize -> delete.
#[tokio::test]
async fn cart_aggregate_round_trips_through_postgres() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run the postgres flow test."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;

    let cpu = product_service::create_product(
        &state,
        ProductRequest {
            name: "Core i5-14600K".into(),
            brand: "Intel".into(),
            model: "BX8071514600K".into(),
            specification: "14 cores, 20 threads, LGA1700".into(),
            price: dec!(10.00),
        },
    )
    .await?
    .data
    .unwrap();

    let cart = cart_service::create_cart(&state, CreateCartRequest::default())
        .await?
        .data
        .unwrap();
    assert_eq!(cart.total, Decimal::ZERO);

    cart_service::add_or_merge_item(&state, cart.id, cpu.id, 2).await?;
    let merged = cart_service::add_or_merge_item(&state, cart.id, cpu.id, 3)
        .await?
        .data
        .unwrap();
    assert_eq!(merged.items.len(), 1);
    assert_eq!(merged.items[0].quantity, 5);
    assert_eq!(merged.total, dec!(50.00));

    // Reload to make sure the stored rows carry the same aggregate.
    let stored = cart_service::get_cart(&state, cart.id).await?.data.unwrap();
    assert_eq!(stored.items.len(), 1);
    assert_eq!(stored.total, dec!(50.00));

    let blocked = product_service::delete_product(&state, cpu.id).await;
    assert!(matches!(blocked, Err(AppError::Validation(_))));

    let removed = cart_service::remove_item(&state, cart.id, stored.items[0].id)
        .await?
        .data
        .unwrap();
    assert!(removed.items.is_empty());
    assert_eq!(removed.total, Decimal::ZERO);
    assert_eq!(state.carts.count_line_items_for_product(cpu.id).await?, 0);

    cart_service::add_or_merge_item(&state, cart.id, cpu.id, 1).await?;
    let finalized =
        cart_service::finalize_cart(&state, cart.id, FinalizeCartRequest { confirmation: true })
            .await?
            .data
            .unwrap();
    assert_eq!(finalized.status, CartStatus::Finalized);
    assert!(matches!(
        cart_service::add_or_merge_item(&state, cart.id, cpu.id, 1).await,
        Err(AppError::CartFinalized(_))
    ));

    let listed = cart_service::list_carts(&state).await?.data.unwrap();
    assert_eq!(listed.items.len(), 1);
    assert_eq!(listed.items[0].items.len(), 1);

    let loaded = state.carts.find_by_id(cart.id).await?.expect("stored cart");
    cart_service::delete_cart(&state, cart.id).await?;
    assert_eq!(state.carts.count_line_items_for_product(cpu.id).await?, 0);
    assert!(matches!(
        state.carts.save(loaded).await,
        Err(AppError::CartNotFound(id)) if id == cart.id
    ));
    assert!(matches!(
        cart_service::get_cart(&state, cart.id).await,
        Err(AppError::CartNotFound(_))
    ));

    product_service::delete_product(&state, cpu.id).await?;
    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE cart_line_items, carts, products RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(AppState::with_orm(orm))
}
