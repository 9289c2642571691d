//! REST gateway to the restaurant backend.
//!
//! One `reqwest` client serves every entity kind; the four operations map
//! one-to-one onto the backend's conventional collection/resource routes.

pub mod config;

pub use config::ConnectionConfig;

use reqwest::StatusCode;
use serde_json::{Map, Value};
use tracing::debug;

use crate::core::{ClientError, Record, Result};
use crate::schema::EntityDescriptor;

/// HTTP gateway shared by every entity kind.
pub struct RestGateway {
    base_url: String,
    http: reqwest::Client,
}

impl RestGateway {
    /// Build a gateway from connection settings.
    pub fn connect(config: &ConnectionConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| ClientError::Network(err.to_string()))?;

        Ok(Self {
            base_url: config.base_url.clone(),
            http,
        })
    }

    /// `GET {path}`: the backend's current collection for one kind.
    pub async fn fetch_all(&self, descriptor: &EntityDescriptor) -> Result<Vec<Record>> {
        let response = self
            .http
            .get(self.collection_url(descriptor))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(unexpected(descriptor, "fetch", status));
        }

        let records: Vec<Record> = response.json().await?;
        debug!(entity = descriptor.noun, rows = records.len(), "collection fetched");
        Ok(records)
    }

    /// `POST {path}` with the creation payload.
    pub async fn create(
        &self,
        descriptor: &EntityDescriptor,
        payload: &Map<String, Value>,
    ) -> Result<()> {
        let response = self
            .http
            .post(self.collection_url(descriptor))
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(unexpected(descriptor, "create", status));
        }

        debug!(entity = descriptor.noun, "created");
        Ok(())
    }

    /// `PUT {path}/{id}` with the full editable-field mapping.
    pub async fn update(
        &self,
        descriptor: &EntityDescriptor,
        id: i64,
        payload: &Map<String, Value>,
    ) -> Result<()> {
        let response = self
            .http
            .put(self.resource_url(descriptor, id))
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(unexpected(descriptor, "update", status));
        }

        debug!(entity = descriptor.noun, id, "updated");
        Ok(())
    }

    /// `DELETE {path}/{id}`.
    ///
    /// `Ok(false)` means the backend no longer had the record; callers are
    /// expected to refresh either way.
    pub async fn delete(&self, descriptor: &EntityDescriptor, id: i64) -> Result<bool> {
        let response = self
            .http
            .delete(self.resource_url(descriptor, id))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!(entity = descriptor.noun, id, "deleted");
            Ok(true)
        } else if status == StatusCode::NOT_FOUND {
            Ok(false)
        } else {
            Err(unexpected(descriptor, "delete", status))
        }
    }

    fn collection_url(&self, descriptor: &EntityDescriptor) -> String {
        format!("{}{}", self.base_url, descriptor.resource_path)
    }

    fn resource_url(&self, descriptor: &EntityDescriptor, id: i64) -> String {
        format!("{}{}/{}", self.base_url, descriptor.resource_path, id)
    }
}

fn unexpected(descriptor: &EntityDescriptor, op: &str, status: StatusCode) -> ClientError {
    ClientError::UnexpectedResponse(format!(
        "{op} {} returned {status}",
        descriptor.resource_path
    ))
}
