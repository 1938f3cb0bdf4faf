pub mod category;
pub mod question;
pub mod quiz;

pub use category::{category_map, CategoriesResponse, Category, CategoryMap};
pub use question::{
    CreateQuestionRequest, CreateQuestionResponse, DeleteQuestionResponse, NewQuestion, PageQuery,
    Question, QuestionDocument, QuestionListResponse, SearchRequest, QUESTIONS_PER_PAGE,
};
pub use quiz::{CategoryFilter, QuizRequest, QuizResponse};
