// ============================================================================
// Bistro Admin Library
// ============================================================================
//
// Generic CRUD synchronization engine for a restaurant-operations REST
// backend. Seven entity kinds share one pattern: fetch-and-render a
// collection, submit a creation form, mutate a single record by id, and
// re-fetch so the view reflects server state. The pattern is implemented
// once, parameterized by an entity descriptor; the terminal front end in
// `src/cli` is one host for it.

pub mod connection;
pub mod core;
pub mod dispatch;
pub mod facade;
pub mod interact;
pub mod schema;
pub mod view;

// Re-export the main types for convenience
pub use connection::{ConnectionConfig, RestGateway};
pub use core::{ClientError, Record, Result};
pub use dispatch::{CreateForm, MutationDispatcher, MutationOutcome, PendingEdit};
pub use facade::{AdminConsole, EntityStation};
pub use interact::{Interact, ScriptedInteract};
pub use schema::{EntityDescriptor, EntityKind, FieldDescriptor, Registry};
pub use view::{CollectionView, RenderedRow, RenderedTable};
