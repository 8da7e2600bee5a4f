use repair_marketplace_api::{
    config::AppConfig,
    db::create_pool,
    domain::users::UserType,
    services::auth_service::hash_password,
};
use uuid::Uuid;

struct DemoUser<'a> {
    name: &'a str,
    email: &'a str,
    mobile: &'a str,
    password: &'a str,
    user_type: UserType,
    shop_name: Option<&'a str>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let owner_id = ensure_user(
        &pool,
        DemoUser {
            name: "Demo Owner",
            email: "owner@example.com",
            mobile: "5550001111",
            password: "owner123",
            user_type: UserType::Business,
            shop_name: Some("Fix-It Garage"),
        },
    )
    .await?;
    let customer_id = ensure_user(
        &pool,
        DemoUser {
            name: "Demo Customer",
            email: "customer@example.com",
            mobile: "5550002222",
            password: "customer123",
            user_type: UserType::Customer,
            shop_name: None,
        },
    )
    .await?;

    let shop_id = ensure_shop(&pool, owner_id).await?;
    seed_tools(&pool, owner_id, shop_id).await?;
    seed_tutorial(&pool, owner_id, shop_id).await?;

    println!("Seed completed. Owner ID: {owner_id}, Customer ID: {customer_id}, Shop ID: {shop_id}");
    Ok(())
}

async fn ensure_user(pool: &sqlx::PgPool, user: DemoUser<'_>) -> anyhow::Result<Uuid> {
    let password_hash = hash_password(user.password)?;

    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, name, email, mobile, address, user_type, shop_name, password_hash)
        VALUES ($1, $2, $3, $4, '', $5, $6, $7)
        ON CONFLICT (email) DO UPDATE SET user_type = EXCLUDED.user_type
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.name)
    .bind(user.email)
    .bind(user.mobile)
    .bind(user.user_type.as_str())
    .bind(user.shop_name)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    println!("Ensured user {} ({})", user.email, user.user_type.as_str());
    Ok(id)
}

async fn ensure_shop(pool: &sqlx::PgPool, owner_id: Uuid) -> anyhow::Result<Uuid> {
    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO repair_shops
            (id, user_id, shop_name, category, description, owner_name, hourly_rate, tag, contact)
        VALUES ($1, $2, 'Fix-It Garage', 'Automotive', 'Brakes, tyres and general servicing',
                'Demo Owner', 4500, 'Top Rated', '5550001111')
        ON CONFLICT (user_id) DO UPDATE SET updated_at = now()
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(owner_id)
    .fetch_one(pool)
    .await?;

    println!("Ensured shop {id}");
    Ok(id)
}

async fn seed_tools(pool: &sqlx::PgPool, owner_id: Uuid, shop_id: Uuid) -> anyhow::Result<()> {
    let tools = [
        ("Torque Wrench", "Automotive", 8999_i64, "1/2 inch drive, 20-150 Nm"),
        ("Socket Set", "Automotive", 4999, "40 piece metric set"),
        ("Cordless Drill", "Electrical", 12999, "18V with two batteries"),
        ("Pipe Wrench", "Plumbing", 2599, "14 inch cast iron"),
    ];

    for (name, category, price, description) in tools {
        sqlx::query(
            r#"
            INSERT INTO tools (id, user_id, shop_id, name, category, price, description)
            SELECT $1, $2, $3, $4, $5, $6, $7
            WHERE NOT EXISTS (SELECT 1 FROM tools WHERE shop_id = $3 AND name = $4)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(shop_id)
        .bind(name)
        .bind(category)
        .bind(price)
        .bind(description)
        .execute(pool)
        .await?;
    }

    println!("Seeded tools");
    Ok(())
}

async fn seed_tutorial(pool: &sqlx::PgPool, owner_id: Uuid, shop_id: Uuid) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO tutorials (id, user_id, shop_id, title, category, duration, tools, description)
        SELECT $1, $2, $3, 'Changing Brake Pads', 'Automotive', '25 min',
               'Torque Wrench, Socket Set', 'Step by step front brake pad replacement'
        WHERE NOT EXISTS (
            SELECT 1 FROM tutorials WHERE shop_id = $3 AND title = 'Changing Brake Pads'
        )
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(owner_id)
    .bind(shop_id)
    .execute(pool)
    .await?;

    println!("Seeded tutorial");
    Ok(())
}
