//! Customer entity models and DTOs, including the nested org-unit tree.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskdesk_core::types::{DbId, Timestamp};

/// A customer row from the `customers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Customer {
    pub id: DbId,
    pub name: String,
    pub short_name: Option<String>,
    pub product_type: Option<String>,
    pub other_product_description: Option<String>,
    pub product_description: Option<String>,
    pub website_url: Option<String>,
    pub registration_status: Option<String>,
    pub portal_username: Option<String>,
    pub portal_password: Option<String>,
    pub last_action_description: Option<String>,
    pub inquiry_portal: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub created_at: Timestamp,
}

/// An organizational unit row from the `customer_units` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CustomerUnit {
    pub id: DbId,
    pub customer_id: DbId,
    pub unit_number: Option<String>,
    pub boss_name: Option<String>,
    pub admin_name: Option<String>,
    pub watcher_name: Option<String>,
}

/// A worker row from the `customer_workers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CustomerWorker {
    pub id: DbId,
    pub unit_id: DbId,
    pub name: String,
}

/// DTO for creating a new customer.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomer {
    pub name: String,
    pub short_name: Option<String>,
    pub product_type: Option<String>,
    pub other_product_description: Option<String>,
    pub product_description: Option<String>,
    pub website_url: Option<String>,
    pub registration_status: Option<String>,
    pub portal_username: Option<String>,
    pub portal_password: Option<String>,
    pub last_action_description: Option<String>,
    pub inquiry_portal: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
}

/// DTO for updating an existing customer's own fields. All optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCustomer {
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub product_type: Option<String>,
    pub other_product_description: Option<String>,
    pub product_description: Option<String>,
    pub website_url: Option<String>,
    pub registration_status: Option<String>,
    pub portal_username: Option<String>,
    pub portal_password: Option<String>,
    pub last_action_description: Option<String>,
    pub inquiry_portal: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
}

/// One unit in a full-replace submission. Worker names may arrive
/// comma-separated inside a single entry; they are normalized before insert.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitSpec {
    pub unit_number: Option<String>,
    pub boss_name: Option<String>,
    pub admin_name: Option<String>,
    pub watcher_name: Option<String>,
    #[serde(default)]
    pub worker_names: Vec<String>,
}

/// A unit with its workers, for read-back.
#[derive(Debug, Clone, Serialize)]
pub struct UnitWithWorkers {
    #[serde(flatten)]
    pub unit: CustomerUnit,
    pub workers: Vec<CustomerWorker>,
}

/// A customer with its full org-unit tree.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerWithUnits {
    #[serde(flatten)]
    pub customer: Customer,
    pub units: Vec<UnitWithWorkers>,
}

/// Optional, AND-combined filters for the customer listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerFilters {
    /// Substring match on name.
    pub search: Option<String>,
    /// Exact match on product type.
    pub product_type: Option<String>,
    /// Exact match on registration status.
    pub registration_status: Option<String>,
}
