//! Repository for customers and their nested org-unit tree.
//!
//! Units and workers are never patched: every write is a full replace of the
//! subtree, executed in the same transaction as the customer's own fields.
//! Deletes cascade explicitly (workers -> units -> customer), not via FK.

use std::collections::HashMap;

use sqlx::{PgPool, Postgres, Transaction};
use taskdesk_core::org_units::clean_worker_names;
use taskdesk_core::types::DbId;

use crate::models::customer::{
    CreateCustomer, Customer, CustomerFilters, CustomerUnit, CustomerWithUnits, CustomerWorker,
    UnitSpec, UnitWithWorkers, UpdateCustomer,
};

/// Column list for `customers` queries.
const COLUMNS: &str = "id, name, short_name, product_type, other_product_description, \
     product_description, website_url, registration_status, portal_username, \
     portal_password, last_action_description, inquiry_portal, address1, address2, created_at";

/// Column list for `customer_units` queries.
const UNIT_COLUMNS: &str = "id, customer_id, unit_number, boss_name, admin_name, watcher_name";

/// Provides CRUD operations for customers, units, and workers.
pub struct CustomerRepo;

impl CustomerRepo {
    /// Insert a customer together with its initial units and workers in one
    /// transaction, returning the created customer row.
    pub async fn create_with_units(
        pool: &PgPool,
        input: &CreateCustomer,
        units: &[UnitSpec],
    ) -> Result<Customer, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO customers (name, short_name, product_type, other_product_description,
                                    product_description, website_url, registration_status,
                                    portal_username, portal_password, last_action_description,
                                    inquiry_portal, address1, address2)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        let customer = sqlx::query_as::<_, Customer>(&query)
            .bind(&input.name)
            .bind(&input.short_name)
            .bind(&input.product_type)
            .bind(&input.other_product_description)
            .bind(&input.product_description)
            .bind(&input.website_url)
            .bind(&input.registration_status)
            .bind(&input.portal_username)
            .bind(&input.portal_password)
            .bind(&input.last_action_description)
            .bind(&input.inquiry_portal)
            .bind(&input.address1)
            .bind(&input.address2)
            .fetch_one(&mut *tx)
            .await?;

        insert_units(&mut tx, customer.id, units).await?;
        tx.commit().await?;
        Ok(customer)
    }

    /// Find a customer row by its internal ID, without the unit tree.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE id = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch a customer with its full unit/worker tree.
    pub async fn fetch_with_units(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CustomerWithUnits>, sqlx::Error> {
        let Some(customer) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let unit_query = format!(
            "SELECT {UNIT_COLUMNS} FROM customer_units WHERE customer_id = $1 ORDER BY id"
        );
        let units = sqlx::query_as::<_, CustomerUnit>(&unit_query)
            .bind(id)
            .fetch_all(pool)
            .await?;

        let unit_ids: Vec<DbId> = units.iter().map(|u| u.id).collect();
        let workers = sqlx::query_as::<_, CustomerWorker>(
            "SELECT id, unit_id, name FROM customer_workers WHERE unit_id = ANY($1) ORDER BY id",
        )
        .bind(&unit_ids)
        .fetch_all(pool)
        .await?;

        let mut by_unit: HashMap<DbId, Vec<CustomerWorker>> = HashMap::new();
        for worker in workers {
            by_unit.entry(worker.unit_id).or_default().push(worker);
        }

        let units = units
            .into_iter()
            .map(|unit| {
                let workers = by_unit.remove(&unit.id).unwrap_or_default();
                UnitWithWorkers { unit, workers }
            })
            .collect();

        Ok(Some(CustomerWithUnits { customer, units }))
    }

    /// List customers with optional AND-combined filters, newest first.
    /// The name filter is a case-insensitive substring match.
    pub async fn list(
        pool: &PgPool,
        filters: &CustomerFilters,
    ) -> Result<Vec<Customer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM customers
             WHERE ($1::TEXT IS NULL OR name ILIKE '%' || $1 || '%')
               AND ($2::TEXT IS NULL OR product_type = $2)
               AND ($3::TEXT IS NULL OR registration_status = $3)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(&filters.search)
            .bind(&filters.product_type)
            .bind(&filters.registration_status)
            .fetch_all(pool)
            .await
    }

    /// Apply a customer-field patch and replace the whole unit tree, in one
    /// transaction. Prior units and workers are discarded regardless of
    /// content; the new units are inserted in input order.
    ///
    /// Returns `None` (and writes nothing) if no customer with `id` exists.
    pub async fn update_with_units(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCustomer,
        units: &[UnitSpec],
    ) -> Result<Option<Customer>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE customers SET
                name = COALESCE($2, name),
                short_name = COALESCE($3, short_name),
                product_type = COALESCE($4, product_type),
                other_product_description = COALESCE($5, other_product_description),
                product_description = COALESCE($6, product_description),
                website_url = COALESCE($7, website_url),
                registration_status = COALESCE($8, registration_status),
                portal_username = COALESCE($9, portal_username),
                portal_password = COALESCE($10, portal_password),
                last_action_description = COALESCE($11, last_action_description),
                inquiry_portal = COALESCE($12, inquiry_portal),
                address1 = COALESCE($13, address1),
                address2 = COALESCE($14, address2)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let customer = sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.short_name)
            .bind(&input.product_type)
            .bind(&input.other_product_description)
            .bind(&input.product_description)
            .bind(&input.website_url)
            .bind(&input.registration_status)
            .bind(&input.portal_username)
            .bind(&input.portal_password)
            .bind(&input.last_action_description)
            .bind(&input.inquiry_portal)
            .bind(&input.address1)
            .bind(&input.address2)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(customer) = customer else {
            tx.rollback().await?;
            return Ok(None);
        };

        delete_units(&mut tx, id).await?;
        insert_units(&mut tx, id, units).await?;
        tx.commit().await?;
        Ok(Some(customer))
    }

    /// Delete a customer and its whole subtree in one transaction:
    /// workers, then units, then the customer row. Returns `true` if the
    /// customer existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        delete_units(&mut tx, id).await?;
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Remove every worker and unit belonging to `customer_id`.
async fn delete_units(
    tx: &mut Transaction<'_, Postgres>,
    customer_id: DbId,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "DELETE FROM customer_workers
         WHERE unit_id IN (SELECT id FROM customer_units WHERE customer_id = $1)",
    )
    .bind(customer_id)
    .execute(&mut **tx)
    .await?;

    sqlx::query("DELETE FROM customer_units WHERE customer_id = $1")
        .bind(customer_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Insert units in input order, each with its normalized worker names.
async fn insert_units(
    tx: &mut Transaction<'_, Postgres>,
    customer_id: DbId,
    units: &[UnitSpec],
) -> Result<(), sqlx::Error> {
    for unit in units {
        let unit_id: DbId = sqlx::query_scalar(
            "INSERT INTO customer_units (customer_id, unit_number, boss_name, admin_name, watcher_name)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(customer_id)
        .bind(&unit.unit_number)
        .bind(&unit.boss_name)
        .bind(&unit.admin_name)
        .bind(&unit.watcher_name)
        .fetch_one(&mut **tx)
        .await?;

        for name in clean_worker_names(&unit.worker_names) {
            sqlx::query("INSERT INTO customer_workers (unit_id, name) VALUES ($1, $2)")
                .bind(unit_id)
                .bind(&name)
                .execute(&mut **tx)
                .await?;
        }
    }
    Ok(())
}
