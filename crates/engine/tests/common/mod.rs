use engine::Engine;
use migration::MigratorTrait;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

pub async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();

    let backend = db.get_database_backend();
    for (username, token) in [("alice", "alice-token"), ("bob", "bob-token")] {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO users (username, token) VALUES (?, ?)",
            vec![username.into(), token.into()],
        ))
        .await
        .unwrap();
    }

    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}
