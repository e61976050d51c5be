use crate::error::{DatastoreError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeOffRequest {
    pub start_day: NaiveDate,
    pub days: i64,
    pub filed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub balance: i64,
    #[serde(default)]
    pub requests: Vec<TimeOffRequest>,
}

impl EmployeeRecord {
    pub fn with_balance(balance: i64) -> Self {
        Self {
            balance,
            requests: Vec::new(),
        }
    }
}

/// Employee time-off ledger
///
/// In memory by default. When opened from a file the whole ledger is written
/// back after every accepted request.
#[derive(Debug)]
pub struct TimeOffDatastore {
    employees: RwLock<BTreeMap<String, EmployeeRecord>>,
    path: Option<PathBuf>,
}

impl Default for TimeOffDatastore {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeOffDatastore {
    /// In-memory ledger with the demo employees
    pub fn new() -> Self {
        Self::with_employees(Self::seed())
    }

    pub fn with_employees(employees: BTreeMap<String, EmployeeRecord>) -> Self {
        Self {
            employees: RwLock::new(employees),
            path: None,
        }
    }

    /// File-backed ledger; a missing file is seeded and created
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let employees = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let employees: BTreeMap<String, EmployeeRecord> = serde_json::from_slice(&bytes)?;
                validate_ledger(&employees)?;
                employees
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "ledger file missing, seeding demo employees");
                let seed = Self::seed();
                write_ledger(&path, &seed).await?;
                seed
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            employees: RwLock::new(employees),
            path: Some(path),
        })
    }

    fn seed() -> BTreeMap<String, EmployeeRecord> {
        [("Alice", 20), ("Bob", 15), ("Charlie", 10)]
            .into_iter()
            .map(|(name, balance)| (name.to_string(), EmployeeRecord::with_balance(balance)))
            .collect()
    }

    pub async fn get_timeoff_balance(&self, employee_name: &str) -> Option<i64> {
        self.employees
            .read()
            .await
            .get(employee_name)
            .map(|record| record.balance)
    }

    /// File a request and deduct it from the balance; returns the new balance
    pub async fn add_timeoff_request(
        &self,
        employee_name: &str,
        start_day: NaiveDate,
        days: i64,
    ) -> Result<i64> {
        if days <= 0 {
            return Err(DatastoreError::InvalidDays(days));
        }

        let mut employees = self.employees.write().await;
        let record = employees
            .get_mut(employee_name)
            .ok_or_else(|| DatastoreError::EmployeeNotFound(employee_name.to_string()))?;

        if days > record.balance {
            return Err(DatastoreError::InsufficientBalance {
                requested: days,
                available: record.balance,
            });
        }

        record.balance -= days;
        record.requests.push(TimeOffRequest {
            start_day,
            days,
            filed_at: Utc::now(),
        });
        let remaining = record.balance;

        // Persist under the write lock so file order matches ledger order
        if let Some(path) = &self.path {
            if let Err(e) = write_ledger(path, &employees).await {
                tracing::error!(path = %path.display(), error = %e, "failed to persist ledger, rolling back");
                if let Some(record) = employees.get_mut(employee_name) {
                    record.balance += days;
                    record.requests.pop();
                }
                return Err(e);
            }
        }

        tracing::info!(employee = %employee_name, %start_day, days, remaining, "time off request filed");
        Ok(remaining)
    }

    pub async fn requests(&self, employee_name: &str) -> Option<Vec<TimeOffRequest>> {
        self.employees
            .read()
            .await
            .get(employee_name)
            .map(|record| record.requests.clone())
    }

    pub async fn employee_names(&self) -> Vec<String> {
        self.employees.read().await.keys().cloned().collect()
    }
}

fn validate_ledger(employees: &BTreeMap<String, EmployeeRecord>) -> Result<()> {
    match employees.iter().find(|(_, record)| record.balance < 0) {
        Some((employee, record)) => Err(DatastoreError::NegativeBalance {
            employee: employee.clone(),
            balance: record.balance,
        }),
        None => Ok(()),
    }
}

async fn write_ledger(path: &Path, employees: &BTreeMap<String, EmployeeRecord>) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(employees)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}
