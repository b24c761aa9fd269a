use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxProfileRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxProjectRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxCategoryRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxNewsletterRepo {
    pub pool: PgPool,
}
