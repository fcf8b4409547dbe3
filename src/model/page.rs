use serde::de::DeserializeOwned;
use serde_json::Value;

/// One page of a list response.
///
/// The wire shape is `{ "<listKey>": [...], "totalPages": n }` where both
/// fields may be missing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Raw `totalPages` as sent by the server.
    pub total_pages: Option<u32>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_pages: None,
        }
    }
}

impl<T: DeserializeOwned> Page<T> {
    pub fn from_value(mut value: Value, list_key: &str) -> Result<Self, serde_json::Error> {
        let items = match value.get_mut(list_key).map(Value::take) {
            None | Some(Value::Null) => Vec::new(),
            Some(list) => serde_json::from_value(list)?,
        };
        let total_pages = value
            .get("totalPages")
            .and_then(Value::as_u64)
            .map(|n| n.min(u32::MAX as u64) as u32);

        Ok(Self { items, total_pages })
    }
}

impl<T> Page<T> {
    /// Page count shown to the user: the server value, or 1 when absent or zero.
    pub fn page_count(&self) -> u32 {
        self.total_pages.filter(|n| *n > 0).unwrap_or(1)
    }
}
