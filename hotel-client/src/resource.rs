//! Typed access to one collection
//!
//! `GET/POST /api/{collection}` and `GET/PUT/DELETE /api/{collection}/{id}`.
//! Create and update payloads are validated before anything is sent.

use std::marker::PhantomData;

use serde::Deserialize;
use shared::Resource;
use shared::resource::{collection_path, record_path};
use shared::validation;

use crate::client::HttpClient;
use crate::error::ClientResult;

/// List endpoints answer either a bare array or `{ "data": [...] }`
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody<T> {
    Items(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListBody<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            ListBody::Items(items) | ListBody::Wrapped { data: items } => items,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResourceApi<C, T> {
    client: C,
    _resource: PhantomData<fn() -> T>,
}

impl<C: HttpClient, T: Resource> ResourceApi<C, T> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// All records, unpaginated, in server order
    pub async fn list(&self) -> ClientResult<Vec<T>> {
        let body: ListBody<T> = self.client.get(&collection_path::<T>()).await?;
        Ok(body.into_items())
    }

    pub async fn get(&self, id: &str) -> ClientResult<T> {
        self.client.get(&record_path::<T>(id)).await
    }

    pub async fn create(&self, payload: &T::Create) -> ClientResult<T> {
        validation::check(payload)?;
        let created: T = self.client.post(&collection_path::<T>(), payload).await?;
        tracing::info!(resource = T::LABEL, id = created.id(), "Created");
        Ok(created)
    }

    pub async fn update(&self, id: &str, patch: &T::Update) -> ClientResult<T> {
        validation::check(patch)?;
        let updated: T = self.client.put(&record_path::<T>(id), patch).await?;
        tracing::info!(resource = T::LABEL, id, "Updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        let _: serde_json::Value = self.client.delete(&record_path::<T>(id)).await?;
        tracing::info!(resource = T::LABEL, id, "Deleted");
        Ok(())
    }
}
