mod common;

use common::{open_shop, register};
use repair_marketplace_api::{
    domain::users::UserType,
    dto::tutorials::{CreateTutorialRequest, UpdateTutorialRequest},
    error::AppError,
    middleware::auth::AuthUser,
    routes::params::{CatalogQuery, CategoryQuery},
    services::{shop_service, tutorial_service},
};

fn tutorial(title: &str, category: &str) -> CreateTutorialRequest {
    CreateTutorialRequest {
        title: title.into(),
        category: category.into(),
        duration: "20 min".into(),
        tools: "Socket Set, Torque Wrench".into(),
        description: "Step by step".into(),
        video_url: Some("https://videos.example.com/brakes.mp4".into()),
        image_url: None,
    }
}

#[tokio::test]
async fn owner_manages_tutorials() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let _db = common::lock_db().await;
    let state = common::setup_state(&database_url).await?;

    let (owner, shop) = open_shop(&state, "owner@example.com", "Fix-It Garage").await?;
    let (rival, _) = open_shop(&state, "rival@example.com", "Rival Repairs").await?;
    let customer =
        AuthUser::customer(register(&state, "customer@example.com", UserType::Customer, None).await?);

    let not_owner =
        tutorial_service::create_tutorial(&state, &customer, tutorial("Oil Change", "Automotive"))
            .await;
    assert!(matches!(not_owner, Err(AppError::Forbidden)));

    let blank = tutorial_service::create_tutorial(&state, &owner, tutorial(" ", "Automotive")).await;
    assert!(matches!(blank, Err(AppError::BadRequest(_))));

    let brakes =
        tutorial_service::create_tutorial(&state, &owner, tutorial("Brake Pads", "Automotive"))
            .await?
            .data
            .expect("tutorial");
    assert_eq!(brakes.shop_id, shop);
    tutorial_service::create_tutorial(&state, &owner, tutorial("Leaky Tap", "Plumbing")).await?;

    let automotive = tutorial_service::list_tutorials(
        &state,
        CatalogQuery {
            category: Some("Automotive".into()),
            shop_id: Some(shop),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("tutorials");
    assert_eq!(automotive.items.len(), 1);
    assert_eq!(automotive.items[0].id, brakes.id);

    let catalog = shop_service::shop_catalog(
        &state,
        shop,
        CategoryQuery {
            category: Some("All".into()),
        },
    )
    .await?
    .data
    .expect("catalog");
    assert_eq!(catalog.tutorials.len(), 2);

    let updated = tutorial_service::update_tutorial(
        &state,
        &owner,
        brakes.id,
        UpdateTutorialRequest {
            duration: Some("35 min".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("tutorial");
    assert_eq!(updated.duration, "35 min");
    assert_eq!(updated.title, "Brake Pads");

    let hijack = tutorial_service::update_tutorial(
        &state,
        &rival,
        brakes.id,
        UpdateTutorialRequest {
            title: Some("Ours now".into()),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(hijack, Err(AppError::Forbidden)));

    let rival_delete = tutorial_service::delete_tutorial(&state, &rival, brakes.id).await;
    assert!(matches!(rival_delete, Err(AppError::Forbidden)));

    tutorial_service::delete_tutorial(&state, &owner, brakes.id).await?;
    let gone = tutorial_service::get_tutorial(&state, brakes.id).await;
    assert!(matches!(gone, Err(AppError::NotFound)));

    Ok(())
}
