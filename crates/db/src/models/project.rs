//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskdesk_core::types::{Date, DbId, Timestamp};

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub internal_number: String,
    pub customer: Option<String>,
    pub request_number: Option<String>,
    pub notification_date: Option<Date>,
    pub delivery_date: Option<Date>,
    pub description: String,
    pub weight_kg: Option<f64>,
    pub expert: Option<String>,
    pub operator: Option<String>,
    pub warranty_pp: Option<String>,
    pub tech_office_status: Option<String>,
    pub purchasing_status: Option<String>,
    pub production_status: Option<String>,
    pub inspection_status: Option<String>,
    pub shipment_date: Option<Date>,
    pub invoice_date: Option<Date>,
    pub payment_amount: Option<f64>,
    pub payment_date: Option<Date>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub internal_number: String,
    pub customer: Option<String>,
    pub request_number: Option<String>,
    pub notification_date: Option<Date>,
    pub delivery_date: Option<Date>,
    pub description: String,
    pub weight_kg: Option<f64>,
    pub expert: Option<String>,
    pub operator: Option<String>,
    pub warranty_pp: Option<String>,
    pub tech_office_status: Option<String>,
    pub purchasing_status: Option<String>,
    pub production_status: Option<String>,
    pub inspection_status: Option<String>,
    pub shipment_date: Option<Date>,
    pub invoice_date: Option<Date>,
    pub payment_amount: Option<f64>,
    pub payment_date: Option<Date>,
    pub status: String,
    pub notes: Option<String>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub internal_number: Option<String>,
    pub customer: Option<String>,
    pub request_number: Option<String>,
    pub notification_date: Option<Date>,
    pub delivery_date: Option<Date>,
    pub description: Option<String>,
    pub weight_kg: Option<f64>,
    pub expert: Option<String>,
    pub operator: Option<String>,
    pub warranty_pp: Option<String>,
    pub tech_office_status: Option<String>,
    pub purchasing_status: Option<String>,
    pub production_status: Option<String>,
    pub inspection_status: Option<String>,
    pub shipment_date: Option<Date>,
    pub invoice_date: Option<Date>,
    pub payment_amount: Option<f64>,
    pub payment_date: Option<Date>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// Optional, AND-combined filters for the project listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFilters {
    /// Exact match on status.
    pub status: Option<String>,
    /// Substring match on the customer field.
    pub customer: Option<String>,
    /// Substring match on description or internal number.
    pub search: Option<String>,
    /// Substring match on the expert field.
    pub expert: Option<String>,
}
