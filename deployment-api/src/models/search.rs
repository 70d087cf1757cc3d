use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Body of a deployments search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<QueryContainer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl SearchRequest {
    pub fn match_all() -> Self {
        Self {
            query: Some(QueryContainer::match_all()),
            ..Default::default()
        }
    }

    pub fn query_string(query: impl Into<String>) -> Self {
        Self {
            query: Some(QueryContainer::query_string(query)),
            ..Default::default()
        }
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }
}

/// A single query clause. Only one member is expected to be set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryContainer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_all: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_string: Option<QueryStringQuery>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<HashMap<String, TermQuery>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exists: Option<ExistsQuery>,
    #[serde(rename = "bool", skip_serializing_if = "Option::is_none")]
    pub bool_query: Option<Box<BoolQuery>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nested: Option<Box<NestedQuery>>,
}

impl QueryContainer {
    pub fn match_all() -> Self {
        Self {
            match_all: Some(Value::Object(Default::default())),
            ..Default::default()
        }
    }

    pub fn query_string(query: impl Into<String>) -> Self {
        Self {
            query_string: Some(QueryStringQuery {
                query: query.into(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    pub fn term(field: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut term = HashMap::new();
        term.insert(
            field.into(),
            TermQuery {
                value: value.into(),
            },
        );
        Self {
            term: Some(term),
            ..Default::default()
        }
    }

    pub fn exists(field: impl Into<String>) -> Self {
        Self {
            exists: Some(ExistsQuery {
                field: field.into(),
            }),
            ..Default::default()
        }
    }

    pub fn bool_query(query: BoolQuery) -> Self {
        Self {
            bool_query: Some(Box::new(query)),
            ..Default::default()
        }
    }

    pub fn nested(path: impl Into<String>, query: QueryContainer) -> Self {
        Self {
            nested: Some(Box::new(NestedQuery {
                path: path.into(),
                query,
            })),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryStringQuery {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_operator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyze_wildcard: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermQuery {
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistsQuery {
    pub field: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoolQuery {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub must: Vec<QueryContainer>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub should: Vec<QueryContainer>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<QueryContainer>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub must_not: Vec<QueryContainer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_should_match: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedQuery {
    pub path: String,
    pub query: QueryContainer,
}
