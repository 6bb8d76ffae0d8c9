//! # Employee Repository
//!
//! Employees are only ever listed and added; there is no edit or delete.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use super::generate_id;
use crate::collection::Collection;
use crate::error::DbResult;
use nimbus_core::{Employee, NewEmployee};

const SELECT_EMPLOYEE: &str = r#"
    SELECT id, emp_id, name, national_id, hiring_date,
           address, phone_number, photo_url, created_at
    FROM employees
"#;

/// Repository for employee database operations.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        EmployeeRepository { pool }
    }

    /// Lists all employees ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Employee>> {
        let sql = format!("{SELECT_EMPLOYEE} ORDER BY name COLLATE NOCASE, emp_id");
        let employees = sqlx::query_as::<_, Employee>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = employees.len(), "Listed employees");
        Ok(employees)
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Employee>> {
        let sql = format!("{SELECT_EMPLOYEE} WHERE id = ?1");
        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(employee)
    }

    /// Inserts a validated employee.
    ///
    /// ## Returns
    /// * `Ok(Employee)` - The stored record with its generated id
    /// * `Err(DbError::UniqueViolation)` - `emp_id` already taken
    pub async fn insert(&self, employee: &NewEmployee) -> DbResult<Employee> {
        let record = Employee {
            id: generate_id(),
            emp_id: employee.emp_id.clone(),
            name: employee.name.clone(),
            national_id: employee.national_id.clone(),
            hiring_date: employee.hiring_date,
            address: employee.address.clone(),
            phone_number: employee.phone_number.clone(),
            photo_url: employee.photo_url.clone(),
            created_at: Utc::now(),
        };

        debug!(id = %record.id, emp_id = %record.emp_id, "Inserting employee");

        sqlx::query(
            r#"
            INSERT INTO employees (
                id, emp_id, name, national_id, hiring_date,
                address, phone_number, photo_url, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&record.id)
        .bind(&record.emp_id)
        .bind(&record.name)
        .bind(&record.national_id)
        .bind(record.hiring_date)
        .bind(&record.address)
        .bind(&record.phone_number)
        .bind(&record.photo_url)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn count(&self) -> DbResult<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}", Collection::Employees.table_name());
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(count as u64)
    }
}
