use crate::entities::ItemKind;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub kind: ItemKind,
    #[schema(example = "JPA1 BOOK")]
    pub name: String,
    #[schema(example = 10000)]
    pub price: i32,
    #[schema(example = 100)]
    pub stock_quantity: i32,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub etc: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub actor: Option<String>,
}

impl CreateItemRequest {
    pub fn book(name: &str, price: i32, stock_quantity: i32) -> Self {
        Self {
            kind: ItemKind::Book,
            name: name.to_string(),
            price,
            stock_quantity,
            author: None,
            isbn: None,
            artist: None,
            etc: None,
            director: None,
            actor: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub name: String,
    pub price: i32,
    pub stock_quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateItemResponse {
    pub id: i64,
}
