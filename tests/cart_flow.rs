mod common;

use common::{create_tool, open_shop, register};
use repair_marketplace_api::{
    domain::users::UserType,
    dto::cart::AddToCartRequest,
    middleware::auth::AuthUser,
    services::cart_service,
};

// Two adds of the same tool racing on an empty cart must both count.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_adds_accumulate() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let _db = common::lock_db().await;
    let state = common::setup_state(&database_url).await?;

    let (owner, _) = open_shop(&state, "owner@example.com", "Fix-It Garage").await?;
    let tool_id = create_tool(&state, &owner, "Socket Set", "Automotive", 4999).await?;
    let customer =
        AuthUser::customer(register(&state, "customer@example.com", UserType::Customer, None).await?);

    for round in 0..20 {
        let adds: Vec<_> = (0..2)
            .map(|_| {
                let state = state.clone();
                let customer = customer.clone();
                tokio::spawn(async move {
                    cart_service::add_to_cart(
                        &state,
                        &customer,
                        AddToCartRequest {
                            tool_id,
                            quantity: Some(2),
                        },
                    )
                    .await
                })
            })
            .collect();
        for add in adds {
            add.await??;
        }

        let cart = cart_service::list_cart(&state, &customer)
            .await?
            .data
            .expect("cart");
        assert_eq!(cart.items.len(), 1, "round {round}");
        assert_eq!(cart.items[0].quantity, 4, "round {round}");

        cart_service::remove_from_cart(&state, &customer, tool_id).await?;
    }

    // Racing past the cap still stops at five
    let adds: Vec<_> = (0..3)
        .map(|_| {
            let state = state.clone();
            let customer = customer.clone();
            tokio::spawn(async move {
                cart_service::add_to_cart(
                    &state,
                    &customer,
                    AddToCartRequest {
                        tool_id,
                        quantity: Some(3),
                    },
                )
                .await
            })
        })
        .collect();
    for add in adds {
        add.await??;
    }
    let cart = cart_service::list_cart(&state, &customer)
        .await?
        .data
        .expect("cart");
    assert_eq!(cart.items[0].quantity, 5);

    Ok(())
}
