use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxUserRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxCareerRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxProfileRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxEventRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxDashboardRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxMentorshipRepo {
    pub pool: PgPool,
}
