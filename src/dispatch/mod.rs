//! Mutation dispatcher.
//!
//! Create, update, and delete for one entity kind, each followed by a
//! refresh of the collection view on success. Backend and transport
//! failures go to the log and nowhere else: the view keeps its last
//! known-good rendering and the operator re-triggers the action by hand.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::connection::RestGateway;
use crate::core::{ClientError, Result};
use crate::interact::Interact;
use crate::schema::EntityDescriptor;
use crate::view::CollectionView;

/// Creation-form state for one entity kind: one text buffer per create
/// field, in declared field order.
#[derive(Debug, Clone)]
pub struct CreateForm {
    fields: Vec<FormField>,
}

#[derive(Debug, Clone)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
}

impl CreateForm {
    pub fn new(descriptor: &EntityDescriptor) -> Self {
        Self {
            fields: descriptor
                .create_fields()
                .map(|field| FormField {
                    key: field.key,
                    label: field.label,
                    value: String::new(),
                })
                .collect(),
        }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn value(&self, index: usize) -> &str {
        &self.fields[index].value
    }

    pub fn set_value(&mut self, index: usize, value: String) {
        self.fields[index].value = value;
    }

    /// Fill a field only if it is still blank.
    pub fn prefill(&mut self, key: &str, value: String) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.key == key) {
            if field.value.is_empty() {
                field.value = value;
            }
        }
    }

    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
    }

    fn payload(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|field| (field.key.to_string(), Value::String(field.value.clone())))
            .collect()
    }
}

/// Values collected for one update: built in full before any request is
/// sent, dropped as soon as the operation finishes.
#[derive(Debug)]
pub struct PendingEdit {
    pub id: i64,
    pub values: Map<String, Value>,
}

/// What became of a requested mutation, for the host's status line.
///
/// Failure detail goes to the log, not the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The backend accepted the mutation and the view was refreshed.
    Applied,
    /// The user cancelled; nothing was sent.
    Abandoned,
    /// The backend or transport failed; the view kept its last rendering.
    Failed,
}

pub struct MutationDispatcher {
    descriptor: Arc<EntityDescriptor>,
    gateway: Arc<RestGateway>,
}

impl MutationDispatcher {
    pub fn new(descriptor: Arc<EntityDescriptor>, gateway: Arc<RestGateway>) -> Self {
        Self {
            descriptor,
            gateway,
        }
    }

    /// POST the creation form, then refresh.
    ///
    /// The form is cleared only on success; on failure it stays populated so
    /// the entry can be corrected and resubmitted.
    pub async fn create(
        &self,
        form: &mut CreateForm,
        view: &mut CollectionView,
    ) -> MutationOutcome {
        match self.gateway.create(&self.descriptor, &form.payload()).await {
            Ok(()) => {
                info!(entity = self.descriptor.noun, "create accepted");
                form.clear();
                view.refresh().await;
                MutationOutcome::Applied
            }
            Err(err) => {
                warn!(entity = self.descriptor.noun, error = %err, "create failed");
                MutationOutcome::Failed
            }
        }
    }

    /// Collect one value per editable field, then PUT the full mapping.
    ///
    /// Cancelling any prompt abandons the whole edit before a single
    /// request goes out; values typed at earlier prompts are discarded.
    pub async fn update(
        &self,
        id: i64,
        prompts: &mut dyn Interact,
        view: &mut CollectionView,
    ) -> MutationOutcome {
        // Collection can only fail by cancellation.
        let Ok(edit) = self.collect_edit(id, prompts) else {
            return MutationOutcome::Abandoned;
        };

        match self.gateway.update(&self.descriptor, edit.id, &edit.values).await {
            Ok(()) => {
                info!(entity = self.descriptor.noun, id, "update accepted");
                view.refresh().await;
                MutationOutcome::Applied
            }
            Err(err) => {
                warn!(entity = self.descriptor.noun, id, error = %err, "update failed");
                MutationOutcome::Failed
            }
        }
    }

    /// Confirm, then DELETE and refresh.
    ///
    /// A declined confirmation is a no-op with no network call. The refresh
    /// happens whether or not the backend still had the record.
    pub async fn delete(
        &self,
        id: i64,
        prompts: &mut dyn Interact,
        view: &mut CollectionView,
    ) -> MutationOutcome {
        if !prompts.ask_confirm(self.descriptor.delete_confirm) {
            return MutationOutcome::Abandoned;
        }

        match self.gateway.delete(&self.descriptor, id).await {
            Ok(existed) => {
                if existed {
                    info!(entity = self.descriptor.noun, id, "delete accepted");
                } else {
                    warn!(entity = self.descriptor.noun, id, "record was already gone");
                }
                view.refresh().await;
                MutationOutcome::Applied
            }
            Err(err) => {
                warn!(entity = self.descriptor.noun, id, error = %err, "delete failed");
                MutationOutcome::Failed
            }
        }
    }

    fn collect_edit(&self, id: i64, prompts: &mut dyn Interact) -> Result<PendingEdit> {
        let mut values = Map::new();
        for field in self.descriptor.update_fields() {
            let value = prompts
                .ask_text(field.prompt)
                .ok_or(ClientError::Cancelled)?;
            values.insert(field.key.to_string(), Value::String(value));
        }
        Ok(PendingEdit { id, values })
    }
}
