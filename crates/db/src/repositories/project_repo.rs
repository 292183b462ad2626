//! Repository for the `projects` table.

use sqlx::PgPool;
use taskdesk_core::types::DbId;

use crate::models::project::{CreateProject, Project, ProjectFilters, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, internal_number, customer, request_number, notification_date, \
     delivery_date, description, weight_kg, expert, operator, warranty_pp, \
     tech_office_status, purchasing_status, production_status, inspection_status, \
     shipment_date, invoice_date, payment_amount, payment_date, status, notes, created_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// A duplicate internal number violates `uq_projects_internal_number`.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (internal_number, customer, request_number, notification_date,
                                   delivery_date, description, weight_kg, expert, operator,
                                   warranty_pp, tech_office_status, purchasing_status,
                                   production_status, inspection_status, shipment_date,
                                   invoice_date, payment_amount, payment_date, status, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                     $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.internal_number)
            .bind(&input.customer)
            .bind(&input.request_number)
            .bind(input.notification_date)
            .bind(input.delivery_date)
            .bind(&input.description)
            .bind(input.weight_kg)
            .bind(&input.expert)
            .bind(&input.operator)
            .bind(&input.warranty_pp)
            .bind(&input.tech_office_status)
            .bind(&input.purchasing_status)
            .bind(&input.production_status)
            .bind(&input.inspection_status)
            .bind(input.shipment_date)
            .bind(input.invoice_date)
            .bind(input.payment_amount)
            .bind(input.payment_date)
            .bind(&input.status)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List projects with optional AND-combined filters, ordered by internal
    /// number. Substring filters are case-insensitive (ILIKE).
    pub async fn list(pool: &PgPool, filters: &ProjectFilters) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE ($1::TEXT IS NULL OR status = $1)
               AND ($2::TEXT IS NULL OR customer ILIKE '%' || $2 || '%')
               AND ($3::TEXT IS NULL
                    OR description ILIKE '%' || $3 || '%'
                    OR internal_number ILIKE '%' || $3 || '%')
               AND ($4::TEXT IS NULL OR expert ILIKE '%' || $4 || '%')
             ORDER BY internal_number"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&filters.status)
            .bind(&filters.customer)
            .bind(&filters.search)
            .bind(&filters.expert)
            .fetch_all(pool)
            .await
    }

    /// Apply a project patch. Only non-`None` fields are applied. Returns
    /// `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                internal_number = COALESCE($2, internal_number),
                customer = COALESCE($3, customer),
                request_number = COALESCE($4, request_number),
                notification_date = COALESCE($5, notification_date),
                delivery_date = COALESCE($6, delivery_date),
                description = COALESCE($7, description),
                weight_kg = COALESCE($8, weight_kg),
                expert = COALESCE($9, expert),
                operator = COALESCE($10, operator),
                warranty_pp = COALESCE($11, warranty_pp),
                tech_office_status = COALESCE($12, tech_office_status),
                purchasing_status = COALESCE($13, purchasing_status),
                production_status = COALESCE($14, production_status),
                inspection_status = COALESCE($15, inspection_status),
                shipment_date = COALESCE($16, shipment_date),
                invoice_date = COALESCE($17, invoice_date),
                payment_amount = COALESCE($18, payment_amount),
                payment_date = COALESCE($19, payment_date),
                status = COALESCE($20, status),
                notes = COALESCE($21, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.internal_number)
            .bind(&input.customer)
            .bind(&input.request_number)
            .bind(input.notification_date)
            .bind(input.delivery_date)
            .bind(&input.description)
            .bind(input.weight_kg)
            .bind(&input.expert)
            .bind(&input.operator)
            .bind(&input.warranty_pp)
            .bind(&input.tech_office_status)
            .bind(&input.purchasing_status)
            .bind(&input.production_status)
            .bind(&input.inspection_status)
            .bind(input.shipment_date)
            .bind(input.invoice_date)
            .bind(input.payment_amount)
            .bind(input.payment_date)
            .bind(&input.status)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project by ID. Returns `true` if a row was removed. Tasks
    /// linked to it keep existing with `project_id` cleared (FK SET NULL).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
