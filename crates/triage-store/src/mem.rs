//! In-memory storage implementation.
//!
//! [`MemStore`] mirrors the PostgreSQL backend's semantics without a
//! database: row ids are handed out from per-table counters, "store order"
//! is insertion order, and relevance ranking uses the scorer from
//! `triage_core::relevance`. Integration tests and local development run
//! against this backend.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use rand::seq::SliceRandom;

use triage_core::{
    relevance, Category, CategoryId, Faq, FaqHit, FaqId, FaqSummary, LogEntry, LogId, LogStatus,
    NewFaq, NewLog, NewUser, User, UserId, UserRole,
};

use crate::error::{Result, StoreError};
use crate::Store;

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    categories: Vec<Category>,
    faqs: Vec<Faq>,
    logs: Vec<LogEntry>,
    next_user_id: i64,
    next_category_id: i64,
    next_faq_id: i64,
    next_log_id: i64,
}

impl Inner {
    fn category_name(&self, id: CategoryId) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.category_id == id)
            .map(|c| c.name.as_str())
    }

    fn faq_summary(&self, faq: &Faq) -> FaqSummary {
        FaqSummary {
            faq_id: faq.faq_id,
            question: faq.question.clone(),
            answer: faq.answer.clone(),
            category_id: faq.category_id,
            category_name: self
                .category_name(faq.category_id)
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// In-memory storage implementation.
#[derive(Default)]
pub struct MemStore {
    inner: RwLock<Inner>,
}

impl MemStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| StoreError::Database("store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| StoreError::Database("store lock poisoned".into()))
    }
}

#[async_trait]
impl Store for MemStore {
    // =========================================================================
    // User Operations
    // =========================================================================

    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.read()?.users.iter().find(|u| u.user_id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.read()?.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_email_or_name(
        &self,
        email: &str,
        full_name: &str,
    ) -> Result<Option<User>> {
        // First row in store order, matching either field.
        Ok(self
            .read()?
            .users
            .iter()
            .find(|u| u.email == email || u.full_name == full_name)
            .cloned())
    }

    async fn insert_user(&self, user: &NewUser) -> Result<User> {
        let mut inner = self.write()?;
        if inner.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateEmail(user.email.clone()));
        }
        inner.next_user_id += 1;
        let stored = User {
            user_id: UserId::new(inner.next_user_id),
            full_name: user.full_name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            password_hash: user.password_hash.clone(),
            role: user.role,
            user_type: user.user_type.clone(),
            created_at: Utc::now(),
        };
        inner.users.push(stored.clone());
        Ok(stored)
    }

    async fn random_admin(&self) -> Result<Option<User>> {
        let inner = self.read()?;
        let admins: Vec<&User> = inner
            .users
            .iter()
            .filter(|u| u.role == UserRole::Admin)
            .collect();
        Ok(admins.choose(&mut rand::thread_rng()).map(|u| (*u).clone()))
    }

    // =========================================================================
    // Category Operations
    // =========================================================================

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>> {
        Ok(self
            .read()?
            .categories
            .iter()
            .find(|c| c.category_id == id)
            .cloned())
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        Ok(self.read()?.categories.clone())
    }

    async fn insert_category(&self, name: &str) -> Result<Category> {
        let mut inner = self.write()?;
        inner.next_category_id += 1;
        let category = Category {
            category_id: CategoryId::new(inner.next_category_id),
            name: name.to_string(),
        };
        inner.categories.push(category.clone());
        Ok(category)
    }

    async fn categories_for_matching_faqs(&self, query: &str, limit: i64) -> Result<Vec<Category>> {
        let inner = self.read()?;
        let mut out: Vec<Category> = Vec::new();
        for faq in &inner.faqs {
            let text = format!("{} {}", faq.question, faq.answer);
            if !relevance::matches(query, &text) {
                continue;
            }
            if out.iter().any(|c| c.category_id == faq.category_id) {
                continue;
            }
            if let Some(name) = inner.category_name(faq.category_id) {
                out.push(Category {
                    category_id: faq.category_id,
                    name: name.to_string(),
                });
            }
            if out.len() >= usize::try_from(limit).unwrap_or(usize::MAX) {
                break;
            }
        }
        Ok(out)
    }

    async fn categories_by_name(&self, fragment: &str, limit: i64) -> Result<Vec<Category>> {
        let fragment = fragment.to_lowercase();
        Ok(self
            .read()?
            .categories
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&fragment))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn other_categories(&self, exclude: CategoryId, limit: i64) -> Result<Vec<Category>> {
        Ok(self
            .read()?
            .categories
            .iter()
            .filter(|c| c.category_id != exclude)
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    // =========================================================================
    // FAQ Operations
    // =========================================================================

    async fn search_faqs(&self, query: &str, limit: i64) -> Result<Vec<FaqHit>> {
        let inner = self.read()?;
        let mut hits: Vec<FaqHit> = inner
            .faqs
            .iter()
            .filter_map(|faq| {
                let text = format!("{} {}", faq.question, faq.answer);
                let score = relevance::score(query, &text);
                (score > 0.0).then(|| FaqHit {
                    faq: inner.faq_summary(faq),
                    relevance: score,
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            b.relevance
                .partial_cmp(&a.relevance)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.faq.faq_id.cmp(&b.faq.faq_id))
        });
        hits.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(hits)
    }

    async fn faqs_in_category(&self, category: CategoryId) -> Result<Vec<FaqSummary>> {
        let inner = self.read()?;
        Ok(inner
            .faqs
            .iter()
            .filter(|f| f.category_id == category)
            .map(|f| inner.faq_summary(f))
            .collect())
    }

    async fn insert_faq(&self, faq: &NewFaq) -> Result<Faq> {
        let mut inner = self.write()?;
        if inner.category_name(faq.category_id).is_none() {
            return Err(StoreError::NotFound {
                entity: "category",
                id: faq.category_id.get(),
            });
        }
        inner.next_faq_id += 1;
        let stored = Faq {
            faq_id: FaqId::new(inner.next_faq_id),
            question: faq.question.clone(),
            answer: faq.answer.clone(),
            category_id: faq.category_id,
            form_id: faq.form_id,
            escalation_contact_id: faq.escalation_contact_id,
            target_user_type: faq.target_user_type.clone(),
            last_updated: Utc::now(),
        };
        inner.faqs.push(stored.clone());
        Ok(stored)
    }

    // =========================================================================
    // Log Operations
    // =========================================================================

    async fn insert_log(&self, log: &NewLog) -> Result<LogId> {
        let mut inner = self.write()?;
        inner.next_log_id += 1;
        let id = LogId::new(inner.next_log_id);
        inner.logs.push(LogEntry {
            log_id: id,
            user_id: log.user_id,
            category_id: log.category_id,
            faq_id: log.faq_id,
            query: log.query.clone(),
            response: log.response.clone(),
            status: log.status,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn update_log_outcome(&self, id: LogId, response: &str, status: LogStatus) -> Result<()> {
        let mut inner = self.write()?;
        let entry = inner
            .logs
            .iter_mut()
            .find(|l| l.log_id == id)
            .ok_or(StoreError::NotFound {
                entity: "log",
                id: id.get(),
            })?;
        entry.response = Some(response.to_string());
        entry.status = status;
        Ok(())
    }

    async fn get_log(&self, id: LogId) -> Result<Option<LogEntry>> {
        Ok(self.read()?.logs.iter().find(|l| l.log_id == id).cloned())
    }

    async fn list_logs(&self, limit: i64, offset: i64) -> Result<Vec<LogEntry>> {
        let inner = self.read()?;
        Ok(inner
            .logs
            .iter()
            .rev()
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }
}
