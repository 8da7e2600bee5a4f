mod common;

use repair_marketplace_api::{
    domain::users::UserType,
    dto::auth::{LoginRequest, RegisterRequest, UpdateProfileRequest},
    error::AppError,
    middleware::auth::{AuthUser, decode_token},
    services::auth_service,
};

fn registration(email: &str, user_type: UserType, shop_name: Option<&str>) -> RegisterRequest {
    RegisterRequest {
        name: "Jamie".into(),
        email: email.into(),
        mobile: "5551234567".into(),
        address: "12 Bolt Street".into(),
        photo_url: None,
        user_type,
        shop_name: shop_name.map(Into::into),
        password: "secret123".into(),
    }
}

#[tokio::test]
async fn register_login_and_edit_profile() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let _db = common::lock_db().await;
    let state = common::setup_state(&database_url).await?;

    let user = auth_service::register_user(
        &state,
        registration("Jamie@Example.com", UserType::Customer, None),
    )
    .await?
    .data
    .expect("registered user");
    assert_eq!(user.email, "jamie@example.com");
    assert_eq!(user.user_type, "customer");

    let duplicate = auth_service::register_user(
        &state,
        registration("jamie@example.com", UserType::Customer, None),
    )
    .await;
    assert!(matches!(duplicate, Err(AppError::BadRequest(_))));

    let missing_shop = auth_service::register_user(
        &state,
        registration("owner@example.com", UserType::Business, None),
    )
    .await;
    assert!(matches!(missing_shop, Err(AppError::BadRequest(_))));

    let bad_password = auth_service::login_user(
        &state,
        LoginRequest {
            email: "jamie@example.com".into(),
            password: "wrong-password".into(),
        },
    )
    .await;
    assert!(matches!(bad_password, Err(AppError::Unauthorized(_))));

    let login = auth_service::login_user(
        &state,
        LoginRequest {
            email: "jamie@example.com".into(),
            password: "secret123".into(),
        },
    )
    .await?
    .data
    .expect("login response");
    assert_eq!(login.user_type, "customer");

    let token = login
        .token
        .strip_prefix("Bearer ")
        .expect("bearer prefix");
    let auth_user = decode_token(token, &state.jwt.secret)?;
    assert_eq!(auth_user.user_id, user.id);
    assert_eq!(auth_user.role, "customer");

    let updated = auth_service::update_profile(
        &state,
        &AuthUser::customer(user.id),
        UpdateProfileRequest {
            mobile: Some("5559876543".into()),
            address: Some("99 Gear Lane".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("updated profile");
    assert_eq!(updated.mobile, "5559876543");
    assert_eq!(updated.address, "99 Gear Lane");
    assert_eq!(updated.name, "Jamie");

    let invalid_mobile = auth_service::update_profile(
        &state,
        &AuthUser::customer(user.id),
        UpdateProfileRequest {
            mobile: Some("12345".into()),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(invalid_mobile, Err(AppError::BadRequest(_))));

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_registrations_with_one_email_yield_one_account() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let _db = common::lock_db().await;
    let state = common::setup_state(&database_url).await?;

    for round in 0..10 {
        let email = format!("race{round}@example.com");
        let first = tokio::spawn({
            let state = state.clone();
            let request = registration(&email, UserType::Customer, None);
            async move { auth_service::register_user(&state, request).await }
        });
        let second = tokio::spawn({
            let state = state.clone();
            let request = registration(&email, UserType::Customer, None);
            async move { auth_service::register_user(&state, request).await }
        });
        let results = [first.await?, second.await?];

        let created = results.iter().filter(|result| result.is_ok()).count();
        let rejected = results
            .iter()
            .filter(|result| matches!(result, Err(AppError::BadRequest(_))))
            .count();
        assert_eq!((created, rejected), (1, 1), "round {round}");
    }

    Ok(())
}
