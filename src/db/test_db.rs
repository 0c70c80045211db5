// src/db/test_db.rs

// Banco real para os testes de repositório. Sem DATABASE_URL o teste é pulado.

use sqlx::{PgPool, postgres::PgPoolOptions};
use uuid::Uuid;

pub async fn pool() -> Option<PgPool> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL não definida, teste de banco pulado");
        return None;
    };

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("não foi possível conectar ao banco de testes");

    // O migrator segura um advisory lock, então testes em paralelo não se atropelam
    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("falha ao aplicar as migrações de teste");

    Some(pool)
}

/// Cria um usuário descartável (e-mail aleatório) e devolve o id.
pub async fn create_user(pool: &PgPool) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (email, password_hash) VALUES ($1, 'x') RETURNING id",
    )
    .bind(format!("{}@teste.local", Uuid::new_v4()))
    .fetch_one(pool)
    .await
    .expect("falha ao criar usuário de teste")
}
