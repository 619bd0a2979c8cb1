//! Wire types for the hosted leaderboard store (Firestore REST API).

use serde::{Deserialize, Serialize};

/// A Firestore string field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringValue {
    #[serde(rename = "stringValue")]
    pub string_value: String,
}

/// A Firestore integer field. int64 values travel as JSON strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegerValue {
    #[serde(rename = "integerValue")]
    pub integer_value: String,
}

/// Fields of one score document. Either may be missing on documents written by other clients.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<StringValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<IntegerValue>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDocument {
    /// Resource name, assigned by the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: ScoreFields,
}

impl ScoreDocument {
    pub fn new(player_name: &str, score: u32) -> Self {
        Self {
            name: None,
            fields: ScoreFields {
                name: Some(StringValue {
                    string_value: player_name.to_owned(),
                }),
                score: Some(IntegerValue {
                    integer_value: score.to_string(),
                }),
            },
        }
    }

    pub fn player_name(&self) -> Option<&str> {
        self.fields.name.as_ref().map(|value| value.string_value.as_str())
    }

    pub fn score(&self) -> Option<u32> {
        self.fields.score.as_ref()?.integer_value.parse().ok()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldReference {
    pub field_path: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub field: FieldReference,
    pub direction: Direction,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSelector {
    pub collection_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredQuery {
    pub from: Vec<CollectionSelector>,
    pub order_by: Vec<Order>,
    pub limit: u32,
}

/// Body of a `documents:runQuery` request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunQueryRequest {
    pub structured_query: StructuredQuery,
}

impl RunQueryRequest {
    /// Highest scores first, at most `limit` documents.
    pub fn top_scores(collection: &str, limit: u32) -> Self {
        Self {
            structured_query: StructuredQuery {
                from: vec![CollectionSelector {
                    collection_id: collection.to_owned(),
                }],
                order_by: vec![Order {
                    field: FieldReference {
                        field_path: "score".to_owned(),
                    },
                    direction: Direction::Descending,
                }],
                limit,
            },
        }
    }
}

/// One element of the `runQuery` response array. Elements without a document only carry progress metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunQueryResponseItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<ScoreDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
}
