//! Persistence for categories and questions.
//!
//! Handlers never talk to a database directly; they go through [`TriviaStore`],
//! which has a MongoDB implementation for deployments and an in-memory one
//! used by tests and `STORE_BACKEND=memory`.

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Category, NewQuestion, Question};

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

#[async_trait]
pub trait TriviaStore: Send + Sync {
    /// Cheap round-trip used by the health check.
    async fn ping(&self) -> Result<()>;

    /// All categories, ordered by id.
    async fn list_categories(&self) -> Result<Vec<Category>>;

    async fn get_category(&self, id: i64) -> Result<Option<Category>>;

    /// Questions ordered by id ascending, optionally restricted to one category.
    async fn list_questions(&self, category: Option<i64>) -> Result<Vec<Question>>;

    /// Questions whose text contains `term`, ignoring case, ordered by id.
    async fn search_questions(&self, term: &str) -> Result<Vec<Question>>;

    /// Inserts a question and returns it with its newly allocated id.
    async fn insert_question(&self, question: NewQuestion) -> Result<Question>;

    /// Returns `false` when no question had that id.
    async fn delete_question(&self, id: i64) -> Result<bool>;
}
