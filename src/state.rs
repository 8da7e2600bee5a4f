use crate::db::{DbPool, OrmConn, orm_from_pool};

#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub ttl_hours: i64,
}

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub jwt: JwtSettings,
}

impl AppState {
    pub fn new(pool: DbPool, jwt: JwtSettings) -> Self {
        let orm = orm_from_pool(&pool);
        Self { pool, orm, jwt }
    }
}
