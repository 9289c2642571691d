//! High-level console facade.
//!
//! [`AdminConsole`] is the recommended entry point: it wires one station
//! (view + form + dispatcher) per registered entity kind over a shared
//! gateway and performs the initial fetch for all of them.

use std::sync::Arc;

use crate::connection::{ConnectionConfig, RestGateway};
use crate::core::Result;
use crate::dispatch::{CreateForm, MutationDispatcher, MutationOutcome};
use crate::interact::Interact;
use crate::schema::{EntityDescriptor, EntityKind, Registry};
use crate::view::{CollectionView, RenderedTable};

/// One fully wired entity kind.
pub struct EntityStation {
    descriptor: Arc<EntityDescriptor>,
    view: CollectionView,
    form: CreateForm,
    dispatcher: MutationDispatcher,
}

impl EntityStation {
    fn new(descriptor: EntityDescriptor, gateway: Arc<RestGateway>) -> Self {
        let descriptor = Arc::new(descriptor);
        Self {
            view: CollectionView::new(descriptor.clone(), gateway.clone()),
            form: CreateForm::new(&descriptor),
            dispatcher: MutationDispatcher::new(descriptor.clone(), gateway),
            descriptor,
        }
    }

    pub fn descriptor(&self) -> &EntityDescriptor {
        &self.descriptor
    }

    pub fn render(&self) -> &RenderedTable {
        self.view.render()
    }

    pub fn form(&self) -> &CreateForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CreateForm {
        &mut self.form
    }

    /// Re-fetch and re-render this kind's collection.
    pub async fn refresh(&mut self) -> bool {
        self.view.refresh().await
    }

    /// Submit the creation form.
    pub async fn submit_create(&mut self) -> MutationOutcome {
        self.dispatcher.create(&mut self.form, &mut self.view).await
    }

    /// Edit the record with the given id, collecting values via `prompts`.
    pub async fn update(&mut self, id: i64, prompts: &mut dyn Interact) -> MutationOutcome {
        self.dispatcher.update(id, prompts, &mut self.view).await
    }

    /// Delete the record with the given id after confirmation.
    pub async fn delete(&mut self, id: i64, prompts: &mut dyn Interact) -> MutationOutcome {
        self.dispatcher.delete(id, prompts, &mut self.view).await
    }
}

/// The admin client: every entity kind wired over one backend connection.
///
/// # Examples
///
/// ```no_run
/// use bistro_admin::{AdminConsole, ConnectionConfig};
///
/// # async fn run() -> bistro_admin::Result<()> {
/// let config = ConnectionConfig::new("http://localhost:5000");
/// let mut console = AdminConsole::connect(&config)?;
///
/// // Initial fetch for every entity kind.
/// console.refresh_all().await;
/// # Ok(())
/// # }
/// ```
pub struct AdminConsole {
    stations: Vec<EntityStation>,
}

impl AdminConsole {
    /// Wire a station for every kind in the standard registry.
    pub fn connect(config: &ConnectionConfig) -> Result<Self> {
        Self::with_registry(Registry::standard(), config)
    }

    /// Wire a station for every entry of a caller-supplied registry.
    pub fn with_registry(registry: Registry, config: &ConnectionConfig) -> Result<Self> {
        let gateway = Arc::new(RestGateway::connect(config)?);
        let stations = registry
            .into_entries()
            .into_iter()
            .map(|descriptor| EntityStation::new(descriptor, gateway.clone()))
            .collect();
        Ok(Self { stations })
    }

    /// Fetch every kind's collection concurrently.
    ///
    /// No kind's load depends on another's completion; referential validity
    /// across kinds is the backend's concern.
    pub async fn refresh_all(&mut self) {
        futures::future::join_all(self.stations.iter_mut().map(|s| s.refresh())).await;
    }

    pub fn stations(&self) -> &[EntityStation] {
        &self.stations
    }

    pub fn stations_mut(&mut self) -> &mut [EntityStation] {
        &mut self.stations
    }

    pub fn station(&self, kind: EntityKind) -> Option<&EntityStation> {
        self.stations.iter().find(|s| s.descriptor.kind == kind)
    }

    pub fn station_mut(&mut self, kind: EntityKind) -> Option<&mut EntityStation> {
        self.stations.iter_mut().find(|s| s.descriptor.kind == kind)
    }
}
