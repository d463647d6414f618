use sqlx::SqlitePool;

#[derive(Clone)]
pub struct SqlxProjectRepo {
    pub pool: SqlitePool,
}

#[derive(Clone)]
pub struct SqlxDevLogRepo {
    pub pool: SqlitePool,
}

#[derive(Clone)]
pub struct SqlxMediaRepo {
    pub pool: SqlitePool,
}

#[derive(Clone)]
pub struct SqlxActivityRepo {
    pub pool: SqlitePool,
}

#[derive(Clone)]
pub struct SqlxAdminUserRepo {
    pub pool: SqlitePool,
}

#[derive(Clone)]
pub struct SqlxSphereConfigRepo {
    pub pool: SqlitePool,
}
