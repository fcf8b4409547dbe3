use std::marker::PhantomData;

use reqwest::Url;
use serde_json::{Map, Value};
use tracing::debug;

use crate::entity::{Entity, Id, LinkOp};
use crate::model::Page;

use super::{ApiClient, ApiError};

/// Page size used when a query does not set one.
pub const DEFAULT_LIMIT: u32 = 10;

/// Pagination and search for a list call.
///
/// `page` is 1-based. With no page, paged resources ask for page 1 and
/// the others ask for everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    /// Query parameter for `search`; falls back to the resource's default field.
    pub search_by: Option<String>,
}

impl ListQuery {
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn search(mut self, value: impl Into<String>) -> Self {
        self.search = Some(value.into());
        self
    }

    pub fn search_by(mut self, field: impl Into<String>) -> Self {
        self.search_by = Some(field.into());
        self
    }

    /// Query string pairs in wire order: `offset`, `limit`, then the search field.
    pub fn pairs<E: Entity>(&self) -> Result<Vec<(String, String)>, ApiError> {
        let mut pairs = Vec::new();

        let page = match self.page {
            Some(page) => Some(page),
            None if E::PAGED_BY_DEFAULT => Some(1),
            None => None,
        };
        if let Some(page) = page {
            let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
            let offset = page.saturating_sub(1).saturating_mul(limit);
            pairs.push(("offset".to_string(), offset.to_string()));
            pairs.push(("limit".to_string(), limit.to_string()));
        }

        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            let field = self
                .search_by
                .as_deref()
                .or(E::SEARCH_FIELD)
                .ok_or(ApiError::Unsupported("search without a field"))?;
            pairs.push((field.to_string(), search.to_string()));
        }

        Ok(pairs)
    }
}

/// REST calls for one entity type.
pub struct ResourceClient<'a, E> {
    api: &'a ApiClient,
    _entity: PhantomData<E>,
}

impl<'a, E: Entity> ResourceClient<'a, E> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self {
            api,
            _entity: PhantomData,
        }
    }

    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut all = Vec::with_capacity(segments.len() + 1);
        all.push(E::PATH);
        all.extend_from_slice(segments);
        self.api.url(&all)
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Page<E>, ApiError> {
        let mut url = self.url(&[])?;
        let pairs = query.pairs::<E>()?;
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        debug!(%url, "list");

        let context = format!("GET /{}", E::PATH);
        let request = self.api.authorized(self.api.client().get(url));
        let value = self.api.send(request, &context).await?;
        Page::from_value(value, E::LIST_KEY).map_err(|source| ApiError::Decode { context, source })
    }

    pub async fn get(&self, id: Id) -> Result<E, ApiError> {
        let id = id.to_string();
        let mut request = self.api.client().get(self.url(&[id.as_str()])?);
        if !E::PUBLIC_DETAIL {
            request = self.api.authorized(request);
        }
        self.api
            .send_as(request, &format!("GET /{}/{}", E::PATH, id))
            .await
    }

    pub async fn create(&self, data: &E::Create) -> Result<E, ApiError> {
        let request = self
            .api
            .authorized(self.api.client().post(self.url(&[])?).json(data));
        self.api
            .send_as(request, &format!("POST /{}", E::PATH))
            .await
    }

    /// Full replace of the record.
    pub async fn update(&self, id: Id, data: &E::Update) -> Result<E, ApiError> {
        let id = id.to_string();
        let request = self
            .api
            .authorized(self.api.client().put(self.url(&[id.as_str()])?).json(data));
        self.api
            .send_as(request, &format!("PUT /{}/{}", E::PATH, id))
            .await
    }

    pub async fn delete(&self, id: Id) -> Result<(), ApiError> {
        let id = id.to_string();
        let request = self
            .api
            .authorized(self.api.client().delete(self.url(&[id.as_str()])?));
        self.api
            .send(request, &format!("DELETE /{}/{}", E::PATH, id))
            .await
            .map(drop)
    }

    /// Adds or removes a many-to-many association owned by `owner`.
    pub async fn link(&self, op: LinkOp, owner: Id, target: Id) -> Result<(), ApiError> {
        let spec = E::LINK.ok_or(ApiError::Unsupported("relation change"))?;
        let path = spec.path(op);

        let mut body = Map::new();
        body.insert(spec.owner_field.to_string(), Value::from(owner));
        body.insert(spec.target_field.to_string(), Value::from(target));

        let request = self
            .api
            .authorized(self.api.client().post(self.url(&[path])?).json(&body));
        self.api
            .send(request, &format!("POST /{}/{}", E::PATH, path))
            .await
            .map(drop)
    }
}
