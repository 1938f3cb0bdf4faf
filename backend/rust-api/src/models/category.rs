use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

/// `{"<id>": "<type>"}` as returned to clients.
pub type CategoryMap = BTreeMap<String, String>;

pub fn category_map(categories: &[Category]) -> CategoryMap {
    categories
        .iter()
        .map(|category| (category.id.to_string(), category.kind.clone()))
        .collect()
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: CategoryMap,
}
