//! Schema bootstrap for the books table

use sqlx::PgPool;

/// Create the `books` table if it does not exist yet.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running booklist migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id SERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            year TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Booklist migrations complete");
    Ok(())
}
