use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::AccountProfile;
use crate::account::models::EmailAddress;
use crate::account::models::FullName;
use crate::account::models::Role;
use crate::account::models::Vehicle;
use crate::account::models::VehicleType;
use crate::account::ports::AccountRepository;

const SELECT_COLUMNS: &str = r#"
    SELECT id, role, firstname, lastname, email, password_hash,
           vehicle_color, vehicle_plate, vehicle_capacity, vehicle_type, created_at
    FROM accounts
"#;

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AccountRow {
    id: Uuid,
    role: String,
    firstname: String,
    lastname: Option<String>,
    email: String,
    password_hash: String,
    vehicle_color: Option<String>,
    vehicle_plate: Option<String>,
    vehicle_capacity: Option<i32>,
    vehicle_type: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let role: Role = row.role.parse().map_err(AccountError::DatabaseError)?;

        let profile = match role {
            Role::User => AccountProfile::User,
            Role::Captain => {
                let (Some(color), Some(plate), Some(capacity), Some(vehicle_type)) = (
                    row.vehicle_color,
                    row.vehicle_plate,
                    row.vehicle_capacity,
                    row.vehicle_type,
                ) else {
                    return Err(AccountError::DatabaseError(format!(
                        "captain {} has no vehicle",
                        row.id
                    )));
                };
                let vehicle_type: VehicleType = vehicle_type.parse()?;
                AccountProfile::Captain(Vehicle::new(color, plate, capacity, vehicle_type)?)
            }
        };

        Ok(Account {
            id: AccountId(row.id),
            fullname: FullName::new(row.firstname, row.lastname)?,
            email: EmailAddress::new(row.email)?,
            password_hash: row.password_hash,
            profile,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        let vehicle = account.vehicle();

        sqlx::query(
            r#"
            INSERT INTO accounts (
                id, role, firstname, lastname, email, password_hash,
                vehicle_color, vehicle_plate, vehicle_capacity, vehicle_type, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(account.id.0)
        .bind(account.role().as_str())
        .bind(account.fullname.firstname())
        .bind(account.fullname.lastname())
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .bind(vehicle.map(|v| v.color()))
        .bind(vehicle.map(|v| v.plate()))
        .bind(vehicle.map(|v| v.capacity()))
        .bind(vehicle.map(|v| v.vehicle_type().as_str()))
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("accounts_role_email_key")
                {
                    return AccountError::EmailAlreadyExists(account.email.as_str().to_string());
                }
            }
            AccountError::DatabaseError(e.to_string())
        })?;

        Ok(account)
    }

    async fn find_by_id(&self, role: Role, id: &AccountId) -> Result<Option<Account>, AccountError> {
        sqlx::query_as::<_, AccountRow>(&format!("{SELECT_COLUMNS} WHERE role = $1 AND id = $2"))
            .bind(role.as_str())
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?
            .map(Account::try_from)
            .transpose()
    }

    async fn find_by_email(
        &self,
        role: Role,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountError> {
        sqlx::query_as::<_, AccountRow>(&format!("{SELECT_COLUMNS} WHERE role = $1 AND email = $2"))
            .bind(role.as_str())
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?
            .map(Account::try_from)
            .transpose()
    }
}
