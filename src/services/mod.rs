//! Per-resource services
//!
//! Thin pass-through wrappers over `ApiClient`, one per collection. Each call
//! is logged; nothing is cached or retried. Deletion is not offered here:
//! it goes through `DestructiveActionWorkflow`.

use std::marker::PhantomData;

use tracing::info;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{Discipline, Resource, ResourceId, SchoolClass, Student, Teacher};

pub struct ResourceService<R: Resource> {
    client: ApiClient,
    _resource: PhantomData<R>,
}

impl<R: Resource> ResourceService<R> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    pub async fn list(&self) -> Result<Vec<R>, ApiError> {
        let path = ApiClient::resource_path(R::KIND, None)?;
        let records: Vec<R> = self.client.get(&path).await?;
        info!("Fetched {} {} record(s)", records.len(), R::KIND);
        Ok(records)
    }

    pub async fn get(&self, id: &ResourceId) -> Result<R, ApiError> {
        let path = ApiClient::resource_path(R::KIND, Some(id))?;
        let record = self.client.get(&path).await?;
        info!("Fetched {} #{}", R::KIND, id);
        Ok(record)
    }

    pub async fn create(&self, record: &R) -> Result<R, ApiError> {
        let path = ApiClient::resource_path(R::KIND, None)?;
        let created = self.client.post(&path, record).await?;
        info!("Created {}", R::KIND);
        Ok(created)
    }

    pub async fn update(&self, id: &ResourceId, record: &R) -> Result<R, ApiError> {
        let path = ApiClient::resource_path(R::KIND, Some(id))?;
        let updated = self.client.put(&path, record).await?;
        info!("Updated {} #{}", R::KIND, id);
        Ok(updated)
    }
}

pub fn students(client: ApiClient) -> ResourceService<Student> {
    ResourceService::new(client)
}

pub fn teachers(client: ApiClient) -> ResourceService<Teacher> {
    ResourceService::new(client)
}

pub fn disciplines(client: ApiClient) -> ResourceService<Discipline> {
    ResourceService::new(client)
}

pub fn classes(client: ApiClient) -> ResourceService<SchoolClass> {
    ResourceService::new(client)
}
