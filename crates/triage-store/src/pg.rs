//! PostgreSQL storage implementation.
//!
//! This module provides the [`PgStore`] implementation of the [`Store`]
//! trait over a bounded sqlx connection pool. Relevance ranking uses the
//! built-in full-text machinery (`plainto_tsquery` / `ts_rank`); every
//! statement binds its parameters.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use triage_core::{
    Category, CategoryId, Faq, FaqHit, FaqId, FaqSummary, FormId, LogEntry, LogId, LogStatus,
    NewFaq, NewLog, NewUser, User, UserId, UserRole,
};

use crate::error::{Result, StoreError};
use crate::Store;

/// PostgreSQL-backed storage implementation.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to the database with a bounded pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unreachable.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|e| StoreError::database(&e))?;
        Ok(Self { pool })
    }

    /// Run embedded schema migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if a migration fails to apply.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;
        tracing::debug!("Schema migrations applied");
        Ok(())
    }
}

fn user_from_row(row: &PgRow) -> Result<User> {
    let role: String = row.try_get("role").map_err(|e| StoreError::database(&e))?;
    let role = UserRole::parse(&role)
        .ok_or_else(|| StoreError::Database(format!("unknown user role: {role}")))?;
    Ok(User {
        user_id: UserId::new(row.try_get("user_id").map_err(|e| StoreError::database(&e))?),
        full_name: row
            .try_get("full_name")
            .map_err(|e| StoreError::database(&e))?,
        username: row
            .try_get("username")
            .map_err(|e| StoreError::database(&e))?,
        email: row.try_get("email").map_err(|e| StoreError::database(&e))?,
        phone: row.try_get("phone").map_err(|e| StoreError::database(&e))?,
        password_hash: row
            .try_get("password_hash")
            .map_err(|e| StoreError::database(&e))?,
        role,
        user_type: row
            .try_get("user_type")
            .map_err(|e| StoreError::database(&e))?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| StoreError::database(&e))?,
    })
}

fn category_from_row(row: &PgRow) -> Result<Category> {
    Ok(Category {
        category_id: CategoryId::new(
            row.try_get("category_id")
                .map_err(|e| StoreError::database(&e))?,
        ),
        name: row.try_get("name").map_err(|e| StoreError::database(&e))?,
    })
}

fn faq_summary_from_row(row: &PgRow) -> Result<FaqSummary> {
    Ok(FaqSummary {
        faq_id: FaqId::new(row.try_get("faq_id").map_err(|e| StoreError::database(&e))?),
        question: row
            .try_get("question")
            .map_err(|e| StoreError::database(&e))?,
        answer: row.try_get("answer").map_err(|e| StoreError::database(&e))?,
        category_id: CategoryId::new(
            row.try_get("category_id")
                .map_err(|e| StoreError::database(&e))?,
        ),
        category_name: row
            .try_get("category_name")
            .map_err(|e| StoreError::database(&e))?,
    })
}

fn log_from_row(row: &PgRow) -> Result<LogEntry> {
    let status: String = row.try_get("status").map_err(|e| StoreError::database(&e))?;
    let status = LogStatus::parse(&status)
        .ok_or_else(|| StoreError::Database(format!("unknown log status: {status}")))?;
    Ok(LogEntry {
        log_id: LogId::new(row.try_get("log_id").map_err(|e| StoreError::database(&e))?),
        user_id: row
            .try_get::<Option<i64>, _>("user_id")
            .map_err(|e| StoreError::database(&e))?
            .map(UserId::new),
        category_id: row
            .try_get::<Option<i64>, _>("category_id")
            .map_err(|e| StoreError::database(&e))?
            .map(CategoryId::new),
        faq_id: row
            .try_get::<Option<i64>, _>("faq_id")
            .map_err(|e| StoreError::database(&e))?
            .map(FaqId::new),
        query: row.try_get("query").map_err(|e| StoreError::database(&e))?,
        response: row
            .try_get("response")
            .map_err(|e| StoreError::database(&e))?,
        status,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| StoreError::database(&e))?,
    })
}

#[async_trait]
impl Store for PgStore {
    // =========================================================================
    // User Operations
    // =========================================================================

    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        sqlx::query("SELECT * FROM users WHERE user_id = $1")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::database(&e))?
            .as_ref()
            .map(user_from_row)
            .transpose()
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        sqlx::query("SELECT * FROM users WHERE email = $1 LIMIT 1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::database(&e))?
            .as_ref()
            .map(user_from_row)
            .transpose()
    }

    async fn find_user_by_email_or_name(
        &self,
        email: &str,
        full_name: &str,
    ) -> Result<Option<User>> {
        sqlx::query(
            "SELECT * FROM users WHERE email = $1 OR full_name = $2 ORDER BY user_id LIMIT 1",
        )
        .bind(email)
        .bind(full_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::database(&e))?
        .as_ref()
        .map(user_from_row)
        .transpose()
    }

    async fn insert_user(&self, user: &NewUser) -> Result<User> {
        let row = sqlx::query(
            "INSERT INTO users (full_name, username, email, phone, password_hash, role, user_type) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(&user.full_name)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(&user.user_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::DuplicateEmail(user.email.clone())
            }
            _ => StoreError::database(&e),
        })?;
        user_from_row(&row)
    }

    async fn random_admin(&self) -> Result<Option<User>> {
        // Random so one staff member does not absorb every escalation.
        sqlx::query("SELECT * FROM users WHERE role = 'Admin' ORDER BY random() LIMIT 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::database(&e))?
            .as_ref()
            .map(user_from_row)
            .transpose()
    }

    // =========================================================================
    // Category Operations
    // =========================================================================

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>> {
        sqlx::query("SELECT category_id, name FROM categories WHERE category_id = $1")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::database(&e))?
            .as_ref()
            .map(category_from_row)
            .transpose()
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query("SELECT category_id, name FROM categories ORDER BY category_id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::database(&e))?;
        rows.iter().map(category_from_row).collect()
    }

    async fn insert_category(&self, name: &str) -> Result<Category> {
        let row = sqlx::query("INSERT INTO categories (name) VALUES ($1) RETURNING category_id, name")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::database(&e))?;
        category_from_row(&row)
    }

    async fn categories_for_matching_faqs(&self, query: &str, limit: i64) -> Result<Vec<Category>> {
        let rows = sqlx::query(
            "SELECT DISTINCT c.category_id, c.name \
             FROM faqs f \
             JOIN categories c ON c.category_id = f.category_id \
             WHERE to_tsvector('english', f.question || ' ' || f.answer) \
                   @@ plainto_tsquery('english', $1) \
             ORDER BY c.category_id \
             LIMIT $2",
        )
        .bind(query)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::database(&e))?;
        rows.iter().map(category_from_row).collect()
    }

    async fn categories_by_name(&self, fragment: &str, limit: i64) -> Result<Vec<Category>> {
        let rows = sqlx::query(
            "SELECT category_id, name FROM categories \
             WHERE name ILIKE '%' || $1 || '%' \
             ORDER BY category_id \
             LIMIT $2",
        )
        .bind(fragment)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::database(&e))?;
        rows.iter().map(category_from_row).collect()
    }

    async fn other_categories(&self, exclude: CategoryId, limit: i64) -> Result<Vec<Category>> {
        let rows = sqlx::query(
            "SELECT category_id, name FROM categories \
             WHERE category_id <> $1 \
             ORDER BY category_id \
             LIMIT $2",
        )
        .bind(exclude.get())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::database(&e))?;
        rows.iter().map(category_from_row).collect()
    }

    // =========================================================================
    // FAQ Operations
    // =========================================================================

    async fn search_faqs(&self, query: &str, limit: i64) -> Result<Vec<FaqHit>> {
        let rows = sqlx::query(
            "SELECT f.faq_id, f.question, f.answer, f.category_id, c.name AS category_name, \
                    ts_rank(to_tsvector('english', f.question || ' ' || f.answer), \
                            plainto_tsquery('english', $1)) AS relevance \
             FROM faqs f \
             JOIN categories c ON c.category_id = f.category_id \
             WHERE to_tsvector('english', f.question || ' ' || f.answer) \
                   @@ plainto_tsquery('english', $1) \
             ORDER BY relevance DESC \
             LIMIT $2",
        )
        .bind(query)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::database(&e))?;

        rows.iter()
            .map(|row| {
                let relevance: f32 = row
                    .try_get("relevance")
                    .map_err(|e| StoreError::database(&e))?;
                Ok(FaqHit {
                    faq: faq_summary_from_row(row)?,
                    relevance: f64::from(relevance),
                })
            })
            .collect()
    }

    async fn faqs_in_category(&self, category: CategoryId) -> Result<Vec<FaqSummary>> {
        let rows = sqlx::query(
            "SELECT f.faq_id, f.question, f.answer, f.category_id, c.name AS category_name \
             FROM faqs f \
             JOIN categories c ON c.category_id = f.category_id \
             WHERE c.category_id = $1 \
             ORDER BY f.faq_id",
        )
        .bind(category.get())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::database(&e))?;
        rows.iter().map(faq_summary_from_row).collect()
    }

    async fn insert_faq(&self, faq: &NewFaq) -> Result<Faq> {
        let row = sqlx::query(
            "INSERT INTO faqs \
             (question, answer, category_id, form_id, escalation_contact_id, target_user_type) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING faq_id, last_updated",
        )
        .bind(&faq.question)
        .bind(&faq.answer)
        .bind(faq.category_id.get())
        .bind(faq.form_id.map(FormId::get))
        .bind(faq.escalation_contact_id.map(UserId::get))
        .bind(&faq.target_user_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::database(&e))?;

        Ok(Faq {
            faq_id: FaqId::new(row.try_get("faq_id").map_err(|e| StoreError::database(&e))?),
            question: faq.question.clone(),
            answer: faq.answer.clone(),
            category_id: faq.category_id,
            form_id: faq.form_id,
            escalation_contact_id: faq.escalation_contact_id,
            target_user_type: faq.target_user_type.clone(),
            last_updated: row
                .try_get::<DateTime<Utc>, _>("last_updated")
                .map_err(|e| StoreError::database(&e))?,
        })
    }

    // =========================================================================
    // Log Operations
    // =========================================================================

    async fn insert_log(&self, log: &NewLog) -> Result<LogId> {
        let row = sqlx::query(
            "INSERT INTO logs (user_id, category_id, faq_id, query, response, status) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING log_id",
        )
        .bind(log.user_id.map(UserId::get))
        .bind(log.category_id.map(CategoryId::get))
        .bind(log.faq_id.map(FaqId::get))
        .bind(&log.query)
        .bind(&log.response)
        .bind(log.status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::database(&e))?;

        Ok(LogId::new(
            row.try_get("log_id").map_err(|e| StoreError::database(&e))?,
        ))
    }

    async fn update_log_outcome(&self, id: LogId, response: &str, status: LogStatus) -> Result<()> {
        let result = sqlx::query("UPDATE logs SET response = $2, status = $3 WHERE log_id = $1")
            .bind(id.get())
            .bind(response)
            .bind(status.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::database(&e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                entity: "log",
                id: id.get(),
            });
        }
        Ok(())
    }

    async fn get_log(&self, id: LogId) -> Result<Option<LogEntry>> {
        sqlx::query("SELECT * FROM logs WHERE log_id = $1")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::database(&e))?
            .as_ref()
            .map(log_from_row)
            .transpose()
    }

    async fn list_logs(&self, limit: i64, offset: i64) -> Result<Vec<LogEntry>> {
        let rows = sqlx::query("SELECT * FROM logs ORDER BY log_id DESC LIMIT $1 OFFSET $2")
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::database(&e))?;
        rows.iter().map(log_from_row).collect()
    }
}
