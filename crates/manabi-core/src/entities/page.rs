use serde::{Deserialize, Serialize};

/// Paginated collection envelope.
///
/// Accepts both `items`/`total` and the Spring-style `content`/`totalElements`
/// field names the backend emits on some endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(alias = "content")]
    pub items: Vec<T>,
    #[serde(default, alias = "totalElements")]
    pub total: u64,
    #[serde(default, alias = "number")]
    pub page: u32,
    #[serde(default, alias = "size")]
    pub page_size: u32,
}

impl<T> Page<T> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
