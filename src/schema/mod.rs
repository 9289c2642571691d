//! Entity schema registry.
//!
//! Static description of every entity kind the restaurant backend serves.
//! All generic machinery (gateway, view, dispatcher) is parameterized by
//! these descriptors; supporting a new kind means adding one descriptor to
//! [`Registry::standard`], nothing else.

use crate::core::{ClientError, Result};

/// The entity kinds the backend exposes, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Person,
    Customer,
    FoodItem,
    Employee,
    Order,
    OrderDetail,
    Payment,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Person,
        EntityKind::Customer,
        EntityKind::FoodItem,
        EntityKind::Employee,
        EntityKind::Order,
        EntityKind::OrderDetail,
        EntityKind::Payment,
    ];
}

/// One field of an entity.
///
/// `key` must match the backend's field naming exactly. Field order in the
/// descriptor fixes both the display-column order and the order values are
/// collected for payloads.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub key: &'static str,
    /// Column header and creation-form label.
    pub label: &'static str,
    /// Question asked when collecting a new value during an edit.
    pub prompt: &'static str,
    /// Rendered as a table column.
    pub on_display: bool,
    /// Part of the creation payload.
    pub on_create: bool,
    /// Part of the update payload.
    pub on_update: bool,
}

impl FieldDescriptor {
    /// A regular field: displayed, created, and editable.
    pub fn new(key: &'static str, label: &'static str, prompt: &'static str) -> Self {
        Self {
            key,
            label,
            prompt,
            on_display: true,
            on_create: true,
            on_update: true,
        }
    }

    /// A backend-computed, display-only column. Never part of any payload.
    pub fn derived(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            prompt: "",
            on_display: true,
            on_create: false,
            on_update: false,
        }
    }

    /// Drop the field from update payloads (set once at creation).
    pub fn create_only(mut self) -> Self {
        self.on_update = false;
        self
    }

    /// Drop the field from the rendered table.
    pub fn hidden(mut self) -> Self {
        self.on_display = false;
        self
    }
}

/// Static description of one entity kind.
#[derive(Debug, Clone)]
pub struct EntityDescriptor {
    pub kind: EntityKind,
    /// Tab title, e.g. "Food Items".
    pub title: &'static str,
    /// Lowercase singular, for log lines and status messages.
    pub noun: &'static str,
    /// Collection path on the backend, e.g. "/fooditems".
    pub resource_path: &'static str,
    /// Question asked before a delete.
    pub delete_confirm: &'static str,
    pub fields: Vec<FieldDescriptor>,
}

impl EntityDescriptor {
    pub fn display_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.on_display)
    }

    pub fn create_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.on_create)
    }

    pub fn update_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.on_update)
    }
}

/// Lookup table of entity descriptors.
///
/// Must be fully populated before the console is wired; lookups are pure
/// and side-effect free.
#[derive(Debug, Clone)]
pub struct Registry {
    entries: Vec<EntityDescriptor>,
}

impl Registry {
    /// The seven entity kinds of the restaurant backend.
    pub fn standard() -> Self {
        use FieldDescriptor as F;

        Self::with_entries(vec![
            EntityDescriptor {
                kind: EntityKind::Person,
                title: "Persons",
                noun: "person",
                resource_path: "/persons",
                delete_confirm: "Are you sure you want to delete this person?",
                fields: vec![
                    F::new("name", "Name", "Enter new name:"),
                    F::new("age", "Age", "Enter new age:"),
                    F::new("gender", "Gender", "Enter new gender:"),
                    F::new("contact", "Contact", "Enter new contact:"),
                ],
            },
            EntityDescriptor {
                kind: EntityKind::Customer,
                title: "Customers",
                noun: "customer",
                resource_path: "/customers",
                delete_confirm: "Are you sure you want to delete this customer?",
                fields: vec![
                    F::derived("name", "Customer Name"),
                    F::new("person_id", "Person ID", "Enter new Person ID:"),
                ],
            },
            EntityDescriptor {
                kind: EntityKind::FoodItem,
                title: "Food Items",
                noun: "food item",
                resource_path: "/fooditems",
                delete_confirm: "Are you sure you want to delete this food item?",
                fields: vec![
                    F::new("name", "Name", "Enter new name:"),
                    F::new("price", "Price", "Enter new price:"),
                    F::new("availability", "Availability", "Is it available? (true/false):"),
                ],
            },
            EntityDescriptor {
                kind: EntityKind::Employee,
                title: "Employees",
                noun: "employee",
                resource_path: "/employees",
                delete_confirm: "Are you sure you want to delete this employee?",
                fields: vec![
                    F::derived("name", "Employee Name"),
                    // The person link is fixed at hire time and the backend
                    // renders the joined name instead of the raw id.
                    F::new("person_id", "Person ID", "").create_only().hidden(),
                    F::new("shift", "Shift", "Enter new shift:"),
                    F::new("role", "Role", "Enter new role:"),
                ],
            },
            EntityDescriptor {
                kind: EntityKind::Order,
                title: "Orders",
                noun: "order",
                resource_path: "/orders",
                delete_confirm: "Are you sure you want to delete this order?",
                fields: vec![
                    F::new("customer_id", "Customer ID", "Enter new Customer ID:"),
                    F::new("order_date", "Date", "Enter new date:"),
                    F::new("order_time", "Time", "Enter new time:"),
                ],
            },
            EntityDescriptor {
                kind: EntityKind::OrderDetail,
                title: "Order Details",
                noun: "order detail",
                resource_path: "/orderdetails",
                delete_confirm: "Are you sure you want to delete these order details?",
                fields: vec![
                    F::new("order_id", "Order ID", "").create_only(),
                    F::new("food_id", "Food ID", "Enter new Food ID:"),
                    F::new("quantity", "Quantity", "Enter new quantity:"),
                ],
            },
            EntityDescriptor {
                kind: EntityKind::Payment,
                title: "Payments",
                noun: "payment",
                resource_path: "/payments",
                delete_confirm: "Are you sure you want to delete this payment?",
                fields: vec![
                    F::new("order_id", "Order ID", "").create_only(),
                    F::new("payment_type", "Type", "Enter new payment type:"),
                    F::new("total_amount", "Amount", "Enter new total amount:"),
                ],
            },
        ])
    }

    pub fn with_entries(entries: Vec<EntityDescriptor>) -> Self {
        Self { entries }
    }

    /// Descriptor for a kind, failing if the kind was never registered.
    pub fn describe(&self, kind: EntityKind) -> Result<&EntityDescriptor> {
        self.entries
            .iter()
            .find(|d| d.kind == kind)
            .ok_or_else(|| ClientError::UnknownEntity(format!("{kind:?}")))
    }

    /// Descriptor for a resource path, e.g. "/persons".
    pub fn describe_path(&self, path: &str) -> Result<&EntityDescriptor> {
        self.entries
            .iter()
            .find(|d| d.resource_path == path)
            .ok_or_else(|| ClientError::UnknownEntity(path.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityDescriptor> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> Vec<EntityDescriptor> {
        self.entries
    }
}
