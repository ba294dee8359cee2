/// User model and database operations
///
/// This module provides the User model and the read operations the API
/// surface needs. Users are created through registration or admin action
/// and are never deleted in normal flow, so the store has no delete
/// operation.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE user_role AS ENUM ('employee', 'admin');
///
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     email VARCHAR(255) NOT NULL UNIQUE,
///     role user_role NOT NULL DEFAULT 'employee',
///     password_hash VARCHAR(255) NOT NULL,
///     hire_date TIMESTAMPTZ,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::models::user::{CreateUser, User, UserRole};
/// use taskdeck_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(&pool, CreateUser {
///     name: "John Doe".to_string(),
///     email: "john@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     role: UserRole::Employee,
///     hire_date: None,
/// }).await?;
///
/// let employees = User::list_by_role(&pool, UserRole::Employee).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Account role flag
///
/// A closed enum rather than a free-form string, so role predicates are
/// exhaustive and checked at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular staff account, shown in assignment pickers
    Employee,

    /// Administrative account, excluded from assignment pickers
    Admin,
}

impl UserRole {
    /// Converts role to string for display and storage
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Employee => "employee",
            UserRole::Admin => "admin",
        }
    }

    /// Parses a wire string into a role
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "employee" => Some(UserRole::Employee),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Employee
    }
}

/// User model representing an account record
///
/// `password_hash` is opaque credential material owned by an external
/// credential service. It is never serialized into API responses.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID, assigned on creation
    pub id: i64,

    /// Display name
    pub name: String,

    /// Email address, unique across all users
    pub email: String,

    /// Account role
    pub role: UserRole,

    /// Opaque credential hash, hidden from all responses
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// When the employee was hired (None for accounts without one)
    pub hire_date: Option<DateTime<Utc>>,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

/// Restricted projection of a user embedded in task responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name
    pub name: String,

    /// Email address (must be unique)
    pub email: String,

    /// Pre-hashed credential material (never a plaintext password)
    pub password_hash: String,

    /// Account role (defaults to employee)
    #[serde(default)]
    pub role: UserRole,

    /// Optional hire date
    pub hire_date: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a new user in the database
    ///
    /// # Errors
    ///
    /// Returns an error if the email already exists (unique constraint
    /// violation) or the database operation fails.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, role, password_hash, hire_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, role, password_hash, hire_date, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.email)
        .bind(data.role)
        .bind(data.password_hash)
        .bind(data.hire_date)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, role, password_hash, hire_date, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Fetches the restricted projection of a user for embedding in task
    /// responses
    pub async fn find_summary(pool: &PgPool, id: i64) -> Result<Option<UserSummary>, sqlx::Error> {
        let summary = sqlx::query_as::<_, UserSummary>(
            "SELECT id, name, email, role FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(summary)
    }

    /// Checks whether a user with the given ID exists
    ///
    /// Used by the task API to validate owner references at write time.
    pub async fn exists(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;

        Ok(exists)
    }

    /// Lists all users with the given role, in insertion order
    pub async fn list_by_role(pool: &PgPool, role: UserRole) -> Result<Vec<Self>, sqlx::Error> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, role, password_hash, hire_date, created_at, updated_at
            FROM users
            WHERE role = $1
            ORDER BY id
            "#,
        )
        .bind(role)
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Returns the first user in the store, if any
    ///
    /// The public-access deployment uses this as the stand-in for the
    /// current viewer.
    pub async fn first(pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, role, password_hash, hire_date, created_at, updated_at
            FROM users
            ORDER BY id
            LIMIT 1
            "#,
        )
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }
}
