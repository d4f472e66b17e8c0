//! Postgres post database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres};
use std::time::Duration;
use tamed_core::models::{Art, Post, Tags, User};
use tamed_core::AppError;

use super::traits::{check_post_id, PostStore, ViewStore};

const CONNECT_TIMEOUT_SECS: u64 = 30;

const DROP_STATEMENTS: &[&str] = &[
    "DROP TABLE IF EXISTS arts",
    "DROP TABLE IF EXISTS users",
    "DROP TABLE IF EXISTS posts",
];

const CREATE_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS posts (
        post_id TEXT PRIMARY KEY,
        create_time TIMESTAMPTZ NOT NULL,
        tags TEXT[] NOT NULL DEFAULT '{}',
        link TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users (
        user_name TEXT PRIMARY KEY,
        display_name TEXT NOT NULL,
        create_time TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS arts (
        art_id TEXT PRIMARY KEY,
        post_id TEXT NOT NULL REFERENCES posts (post_id),
        title TEXT NOT NULL,
        author TEXT NOT NULL,
        tags TEXT[] NOT NULL DEFAULT '{}',
        create_time TIMESTAMPTZ NOT NULL
    )
    "#,
];

/// Statements that bring the schema up, dropping existing tables first when `reset`
pub(crate) fn schema_statements(reset: bool) -> Vec<&'static str> {
    let mut statements = Vec::with_capacity(DROP_STATEMENTS.len() + CREATE_STATEMENTS.len());
    if reset {
        statements.extend_from_slice(DROP_STATEMENTS);
    }
    statements.extend_from_slice(CREATE_STATEMENTS);
    statements
}

/// Row type for the posts table
#[derive(Debug, sqlx::FromRow)]
pub struct PostRow {
    pub post_id: String,
    pub create_time: DateTime<Utc>,
    pub tags: Vec<String>,
    pub link: String,
}

impl PostRow {
    pub fn into_post(self) -> Post {
        Post {
            post_id: self.post_id,
            create_time: self.create_time,
            tags: self.tags.into_iter().collect(),
            link: self.link,
        }
    }
}

/// Row type for the arts table
#[derive(Debug, sqlx::FromRow)]
pub struct ArtRow {
    pub art_id: String,
    pub post_id: String,
    pub title: String,
    pub author: String,
    pub tags: Vec<String>,
    pub create_time: DateTime<Utc>,
}

impl ArtRow {
    pub fn into_art(self) -> Art {
        Art {
            art_id: self.art_id,
            post_id: self.post_id,
            title: self.title,
            author: self.author,
            tags: self.tags.into_iter().collect::<Tags>(),
            create_time: self.create_time,
        }
    }
}

/// Row type for the users table
#[derive(Debug, sqlx::FromRow)]
pub struct UserRow {
    pub user_name: String,
    pub display_name: String,
    pub create_time: DateTime<Utc>,
}

impl UserRow {
    pub fn into_user(self) -> User {
        User {
            user_name: self.user_name,
            display_name: self.display_name,
            create_time: self.create_time,
        }
    }
}

/// Post and view store backed by Postgres
#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect, then create the schema (after dropping it when `reset` is set)
    pub async fn connect(url: &str, max_connections: u32, reset: bool) -> Result<Self, AppError> {
        tracing::info!("Connecting to database...");
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .connect(url)
            .await?;

        tracing::info!(max_connections, "Database connected successfully");

        let store = Self::new(pool);
        store.ensure_schema(reset).await?;
        Ok(store)
    }

    /// Create the tables if missing; with `reset`, drop them first
    pub async fn ensure_schema(&self, reset: bool) -> Result<(), AppError> {
        if reset {
            tracing::warn!("PG_RESET set, dropping post database tables");
        }
        let mut tx = self.pool.begin().await?;
        for statement in schema_statements(reset) {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        tracing::info!("Post database schema ready");
        Ok(())
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    #[tracing::instrument(skip(self, post), fields(db.table = "posts"))]
    async fn create(&self, id: &str, post: &Post) -> Result<(), AppError> {
        check_post_id(id, post)?;
        let tags: Vec<String> = post.tags.iter().map(str::to_string).collect();

        sqlx::query(
            r#"
            INSERT INTO posts (post_id, create_time, tags, link)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id)
        .bind(post.create_time)
        .bind(&tags)
        .bind(&post.link)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(db.table = "posts"))]
    async fn get(&self, id: &str) -> Result<Option<Post>, AppError> {
        let row: Option<PostRow> = sqlx::query_as::<Postgres, PostRow>(
            "SELECT post_id, create_time, tags, link FROM posts WHERE post_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(PostRow::into_post))
    }
}

#[async_trait]
impl ViewStore for PgPostStore {
    #[tracing::instrument(skip(self), fields(db.table = "arts"))]
    async fn get_art(&self, art_id: &str) -> Result<Option<Art>, AppError> {
        let row: Option<ArtRow> = sqlx::query_as::<Postgres, ArtRow>(
            r#"
            SELECT art_id, post_id, title, author, tags, create_time
            FROM arts
            WHERE art_id = $1
            "#,
        )
        .bind(art_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(ArtRow::into_art))
    }

    #[tracing::instrument(skip(self), fields(db.table = "users"))]
    async fn get_user(&self, user_name: &str) -> Result<Option<User>, AppError> {
        let row: Option<UserRow> = sqlx::query_as::<Postgres, UserRow>(
            "SELECT user_name, display_name, create_time FROM users WHERE user_name = $1",
        )
        .bind(user_name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(UserRow::into_user))
    }
}
