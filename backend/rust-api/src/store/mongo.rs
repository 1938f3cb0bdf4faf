use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::ReturnDocument,
    Collection, Database,
};

use super::TriviaStore;
use crate::metrics::track_db_operation;
use crate::models::{Category, NewQuestion, Question, QuestionDocument};

const QUESTIONS: &str = "questions";
const CATEGORIES: &str = "categories";
const COUNTERS: &str = "counters";

fn category_filter(category: Option<i64>) -> Document {
    match category {
        Some(id) => doc! { "category": id },
        None => doc! {},
    }
}

/// Literal, case-insensitive substring match on the question text.
fn search_filter(term: &str) -> Document {
    doc! {
        "question": { "$regex": regex::escape(term), "$options": "i" }
    }
}

/// Questions and categories are keyed by integer `_id`; new question ids come
/// from the `counters` collection (`{_id: "questions", seq}`).
#[derive(Clone)]
pub struct MongoStore {
    mongo: Database,
}

impl MongoStore {
    /// Wraps the database and aligns the id counter with existing questions,
    /// so rows imported from elsewhere never collide with new inserts.
    pub async fn new(mongo: Database) -> Result<Self> {
        let store = Self { mongo };
        store.sync_question_counter().await?;
        Ok(store)
    }

    fn questions(&self) -> Collection<QuestionDocument> {
        self.mongo.collection(QUESTIONS)
    }

    fn categories(&self) -> Collection<Category> {
        self.mongo.collection(CATEGORIES)
    }

    fn counters(&self) -> Collection<Document> {
        self.mongo.collection(COUNTERS)
    }

    async fn sync_question_counter(&self) -> Result<()> {
        let highest = self
            .questions()
            .find_one(doc! {})
            .sort(doc! { "_id": -1 })
            .await
            .context("Failed to read highest question id")?
            .map(|q| q.id)
            .unwrap_or(0);

        self.counters()
            .update_one(
                doc! { "_id": QUESTIONS },
                doc! { "$max": { "seq": highest } },
            )
            .upsert(true)
            .await
            .context("Failed to initialise question id counter")?;

        tracing::debug!("Question id counter synced at {}", highest);
        Ok(())
    }

    async fn next_question_id(&self) -> Result<i64> {
        let counter = self
            .counters()
            .find_one_and_update(doc! { "_id": QUESTIONS }, doc! { "$inc": { "seq": 1_i64 } })
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
            .context("Failed to allocate question id")?
            .context("Question id counter missing after upsert")?;

        counter
            .get_i64("seq")
            .or_else(|_| counter.get_i32("seq").map(i64::from))
            .context("Question id counter has a non-integer seq")
    }

    async fn find_questions(&self, filter: Document) -> Result<Vec<Question>> {
        let cursor = self
            .questions()
            .find(filter)
            .sort(doc! { "_id": 1 })
            .await
            .context("Failed to query questions")?;

        let docs: Vec<QuestionDocument> = cursor
            .try_collect()
            .await
            .context("Failed to collect question documents")?;

        Ok(docs.into_iter().map(Question::from).collect())
    }
}

#[async_trait]
impl TriviaStore for MongoStore {
    async fn ping(&self) -> Result<()> {
        self.mongo
            .run_command(doc! { "ping": 1 })
            .await
            .context("MongoDB ping failed")?;
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        track_db_operation("find", CATEGORIES, async {
            let cursor = self
                .categories()
                .find(doc! {})
                .sort(doc! { "_id": 1 })
                .await
                .context("Failed to query categories")?;
            cursor
                .try_collect()
                .await
                .context("Failed to collect categories")
        })
        .await
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>> {
        track_db_operation("find_one", CATEGORIES, async {
            self.categories()
                .find_one(doc! { "_id": id })
                .await
                .context("Failed to fetch category")
        })
        .await
    }

    async fn list_questions(&self, category: Option<i64>) -> Result<Vec<Question>> {
        track_db_operation("find", QUESTIONS, self.find_questions(category_filter(category)))
            .await
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>> {
        track_db_operation("search", QUESTIONS, self.find_questions(search_filter(term))).await
    }

    async fn insert_question(&self, question: NewQuestion) -> Result<Question> {
        track_db_operation("insert_one", QUESTIONS, async {
            let id = self.next_question_id().await?;
            let question = question.with_id(id);
            self.questions()
                .insert_one(QuestionDocument::from(question.clone()))
                .await
                .context("Failed to insert question")?;
            Ok(question)
        })
        .await
    }

    async fn delete_question(&self, id: i64) -> Result<bool> {
        track_db_operation("delete_one", QUESTIONS, async {
            let result = self
                .questions()
                .delete_one(doc! { "_id": id })
                .await
                .context("Failed to delete question")?;
            Ok(result.deleted_count > 0)
        })
        .await
    }
}
