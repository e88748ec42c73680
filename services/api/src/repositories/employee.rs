//! Employee repository for database operations

use anyhow::Result;
use chrono::Utc;
use common::models::EmployeeData;
use sqlx::SqlitePool;
use tracing::info;

use super::{hash_password, verify_password};
use crate::models::Employee;

/// Username of the built-in administrator
pub const ADMIN_USERNAME: &str = "admin";

/// Employee repository
#[derive(Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    /// Create a new employee repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create an employee account
    pub async fn create(&self, username: &str, name: &str, password: &str) -> Result<Employee> {
        info!("Creating employee: {}", username);

        let employee = Employee {
            username: username.to_string(),
            name: name.to_string(),
            password_hash: hash_password(password)?,
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO employees (username, name, password_hash, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&employee.username)
        .bind(&employee.name)
        .bind(&employee.password_hash)
        .bind(employee.created_at)
        .execute(&self.pool)
        .await?;

        Ok(employee)
    }

    /// Make sure the `admin` account exists; returns true if it was created
    pub async fn ensure_admin(&self, password: &str) -> Result<bool> {
        if self.find(ADMIN_USERNAME).await?.is_some() {
            return Ok(false);
        }

        self.create(ADMIN_USERNAME, "Administrator", password)
            .await?;
        Ok(true)
    }

    /// Find an employee by username
    pub async fn find(&self, username: &str) -> Result<Option<Employee>> {
        let employee = sqlx::query_as(
            "SELECT username, name, password_hash, created_at FROM employees WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    /// Every employee, without password hashes
    pub async fn list(&self) -> Result<Vec<EmployeeData>> {
        let employees: Vec<Employee> = sqlx::query_as(
            "SELECT username, name, password_hash, created_at FROM employees ORDER BY created_at, username",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(employees.iter().map(Employee::employee_data).collect())
    }

    /// Check credentials; `None` when the username is unknown or the password wrong
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Option<Employee>> {
        let Some(employee) = self.find(username).await? else {
            return Ok(None);
        };

        if verify_password(&employee.password_hash, password)? {
            Ok(Some(employee))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support;

    #[tokio::test]
    async fn test_ensure_admin_runs_once() {
        let repo = EmployeeRepository::new(test_support::pool().await);
        assert!(repo.ensure_admin("admin123").await.unwrap());
        assert!(!repo.ensure_admin("other").await.unwrap());

        assert!(repo.authenticate("admin", "admin123").await.unwrap().is_some());
        assert!(repo.authenticate("admin", "other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_employees() {
        let repo = EmployeeRepository::new(test_support::pool().await);
        repo.ensure_admin("admin123").await.unwrap();
        repo.create("ravi", "Ravi Kumar", "secret1").await.unwrap();

        let usernames: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.username)
            .collect();
        assert_eq!(usernames, vec!["admin", "ravi"]);
    }
}
