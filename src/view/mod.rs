//! Collection view controller.
//!
//! Owns the fetch-and-render cycle for one entity kind. A refresh replaces
//! the whole rendering from the backend's current collection state; there is
//! no incremental patching and no client-held copy between renders.

use std::sync::Arc;

use tracing::warn;

use crate::connection::RestGateway;
use crate::core::{ClientError, Record, Result, display_cell, record_id};
use crate::schema::EntityDescriptor;

/// Fully materialized rendering of one backend collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTable {
    pub columns: Vec<String>,
    pub rows: Vec<RenderedRow>,
}

/// One rendered record.
///
/// `id` is the argument bound to the row's edit and delete affordances: the
/// host invokes `update(id)` / `delete(id)` for whichever row the operator
/// picked, with no ambient lookup in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub id: i64,
    pub cells: Vec<String>,
}

pub struct CollectionView {
    descriptor: Arc<EntityDescriptor>,
    gateway: Arc<RestGateway>,
    render: RenderedTable,
}

impl CollectionView {
    pub fn new(descriptor: Arc<EntityDescriptor>, gateway: Arc<RestGateway>) -> Self {
        let render = RenderedTable {
            columns: header(&descriptor),
            rows: Vec::new(),
        };
        Self {
            descriptor,
            gateway,
            render,
        }
    }

    /// Replace the rendering with the backend's current collection.
    ///
    /// The replacement table is built in full before it is swapped in; any
    /// failure (transport, non-success status, malformed body) leaves the
    /// previous rendering untouched and is only reported to the log.
    /// Returns whether the rendering was replaced.
    pub async fn refresh(&mut self) -> bool {
        match self.build().await {
            Ok(render) => {
                self.render = render;
                true
            }
            Err(err) => {
                warn!(
                    entity = self.descriptor.noun,
                    error = %err,
                    "refresh failed, keeping previous rendering"
                );
                false
            }
        }
    }

    pub fn render(&self) -> &RenderedTable {
        &self.render
    }

    pub fn descriptor(&self) -> &EntityDescriptor {
        &self.descriptor
    }

    async fn build(&self) -> Result<RenderedTable> {
        let records = self.gateway.fetch_all(&self.descriptor).await?;

        let mut rows = Vec::with_capacity(records.len());
        for record in &records {
            rows.push(self.build_row(record)?);
        }

        Ok(RenderedTable {
            columns: header(&self.descriptor),
            rows,
        })
    }

    fn build_row(&self, record: &Record) -> Result<RenderedRow> {
        let id = record_id(record).ok_or_else(|| {
            ClientError::UnexpectedResponse(format!(
                "record from {} is missing an id",
                self.descriptor.resource_path
            ))
        })?;

        let cells = std::iter::once(id.to_string())
            .chain(self.descriptor.display_fields().map(|field| {
                record
                    .get(field.key)
                    .map(display_cell)
                    .unwrap_or_default()
            }))
            .collect();

        Ok(RenderedRow { id, cells })
    }
}

fn header(descriptor: &EntityDescriptor) -> Vec<String> {
    std::iter::once("ID".to_string())
        .chain(descriptor.display_fields().map(|f| f.label.to_string()))
        .collect()
}
