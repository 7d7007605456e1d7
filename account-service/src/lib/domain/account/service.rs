use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::LoginCommand;
use crate::account::models::Password;
use crate::account::models::RegisterAccountCommand;
use crate::account::models::Role;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;

/// Domain service implementation for account operations.
///
/// Password hashing and checking run on the blocking pool so request tasks keep moving.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    password_hasher: PasswordHasher,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `password_hasher` - Hashing scheme for new passwords
    pub fn new(repository: Arc<AR>, password_hasher: PasswordHasher) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }

    async fn hash_password(&self, password: &Password) -> Result<String, AccountError> {
        let hasher = self.password_hasher;
        let plaintext = password.as_str().to_owned();

        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| AccountError::Unknown(format!("Password hashing task failed: {}", e)))?
            .map_err(AccountError::from)
    }

    async fn verify_password(
        &self,
        password: &Password,
        password_hash: &str,
    ) -> Result<bool, AccountError> {
        let hasher = self.password_hasher;
        let plaintext = password.as_str().to_owned();
        let password_hash = password_hash.to_owned();

        tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &password_hash))
            .await
            .map_err(|e| AccountError::Unknown(format!("Password check task failed: {}", e)))
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn register(&self, command: RegisterAccountCommand) -> Result<Account, AccountError> {
        let role = command.role();

        if self
            .repository
            .find_by_email(role, &command.email)
            .await?
            .is_some()
        {
            return Err(AccountError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        let password_hash = self.hash_password(&command.password).await?;

        let account = Account {
            id: AccountId::new(),
            fullname: command.fullname,
            email: command.email,
            password_hash,
            profile: command.profile,
            created_at: Utc::now(),
        };

        let created = self.repository.create(account).await?;
        tracing::info!(account_id = %created.id, role = %role, "Account registered");

        Ok(created)
    }

    async fn login(&self, command: LoginCommand) -> Result<Account, AccountError> {
        let account = self
            .repository
            .find_by_email(command.role, &command.email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        if !self
            .verify_password(&command.password, &account.password_hash)
            .await?
        {
            tracing::warn!(account_id = %account.id, role = %command.role, "Password mismatch");
            return Err(AccountError::InvalidCredentials);
        }

        Ok(account)
    }

    async fn get_account(&self, role: Role, id: &AccountId) -> Result<Account, AccountError> {
        self.repository
            .find_by_id(role, id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::account::models::AccountProfile;
    use crate::account::models::EmailAddress;
    use crate::account::models::FullName;
    use crate::account::models::Vehicle;
    use crate::account::models::VehicleType;

    mock! {
        pub TestAccountRepository {}

        #[async_trait]
        impl AccountRepository for TestAccountRepository {
            async fn create(&self, account: Account) -> Result<Account, AccountError>;
            async fn find_by_id(&self, role: Role, id: &AccountId) -> Result<Option<Account>, AccountError>;
            async fn find_by_email(&self, role: Role, email: &EmailAddress) -> Result<Option<Account>, AccountError>;
        }
    }

    fn service(repository: MockTestAccountRepository) -> AccountService<MockTestAccountRepository> {
        AccountService::new(Arc::new(repository), PasswordHasher::bcrypt(4))
    }

    fn register_command(profile: AccountProfile) -> RegisterAccountCommand {
        RegisterAccountCommand::new(
            FullName::new("Alice".to_string(), Some("Smith".to_string())).unwrap(),
            EmailAddress::new("alice@example.com".to_string()).unwrap(),
            Password::for_registration("secret1".to_string()).unwrap(),
            profile,
        )
    }

    fn stored_account(password: &str) -> Account {
        Account {
            id: AccountId::new(),
            fullname: FullName::new("Alice".to_string(), None).unwrap(),
            email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
            password_hash: PasswordHasher::bcrypt(4).hash(password).unwrap(),
            profile: AccountProfile::User,
            created_at: Utc::now(),
        }
    }

    fn login_command(password: &str) -> LoginCommand {
        LoginCommand {
            role: Role::User,
            email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
            password: Password::for_login(password.to_string()).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_email()
            .withf(|role, email| *role == Role::User && email.as_str() == "alice@example.com")
            .times(1)
            .returning(|_, _| Ok(None));

        repository
            .expect_create()
            .withf(|account| {
                account.password_hash.starts_with("$2b$")
                    && account.password_hash != "secret1"
                    && account.role() == Role::User
            })
            .times(1)
            .returning(|account| Ok(account));

        let account = service(repository)
            .register(register_command(AccountProfile::User))
            .await
            .expect("Registration failed");

        assert_eq!(account.email.as_str(), "alice@example.com");
        assert!(PasswordHasher::new().verify("secret1", &account.password_hash));
    }

    #[tokio::test]
    async fn test_register_captain_keeps_vehicle() {
        let mut repository = MockTestAccountRepository::new();
        let vehicle = Vehicle::new("red".into(), "KA01AB".into(), 4, VehicleType::Car).unwrap();

        repository
            .expect_find_by_email()
            .withf(|role, _| *role == Role::Captain)
            .times(1)
            .returning(|_, _| Ok(None));
        repository
            .expect_create()
            .times(1)
            .returning(|account| Ok(account));

        let account = service(repository)
            .register(register_command(AccountProfile::Captain(vehicle.clone())))
            .await
            .unwrap();

        assert_eq!(account.role(), Role::Captain);
        assert_eq!(account.vehicle(), Some(&vehicle));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_, _| Ok(Some(stored_account("secret1"))));
        repository.expect_create().times(0);

        let result = service(repository)
            .register(register_command(AccountProfile::User))
            .await;

        assert!(matches!(result, Err(AccountError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_register_hashing_failure_is_internal() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_, _| Ok(None));
        repository.expect_create().times(0);

        let service = AccountService::new(Arc::new(repository), PasswordHasher::bcrypt(99));
        let result = service.register(register_command(AccountProfile::User)).await;

        assert!(matches!(result, Err(AccountError::Password(_))));
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut repository = MockTestAccountRepository::new();
        let stored = stored_account("secret1");
        let expected_id = stored.id;

        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_, _| Ok(Some(stored.clone())));

        let account = service(repository)
            .login(login_command("secret1"))
            .await
            .expect("Login failed");

        assert_eq!(account.id, expected_id);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut repository = MockTestAccountRepository::new();
        let stored = stored_account("secret1");

        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_, _| Ok(Some(stored.clone())));

        let result = service(repository).login(login_command("secret2")).await;

        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_, _| Ok(None));

        let result = service(repository).login(login_command("secret1")).await;

        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_corrupt_hash_is_invalid_credentials() {
        let mut repository = MockTestAccountRepository::new();
        let mut stored = stored_account("secret1");
        stored.password_hash = "not-a-hash".to_string();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_, _| Ok(Some(stored.clone())));

        let result = service(repository).login(login_command("secret1")).await;

        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_get_account_success() {
        let mut repository = MockTestAccountRepository::new();
        let stored = stored_account("secret1");
        let account_id = stored.id;

        repository
            .expect_find_by_id()
            .withf(move |role, id| *role == Role::User && *id == account_id)
            .times(1)
            .returning(move |_, _| Ok(Some(stored.clone())));

        let account = service(repository)
            .get_account(Role::User, &account_id)
            .await
            .unwrap();

        assert_eq!(account.id, account_id);
    }

    #[tokio::test]
    async fn test_get_account_not_found() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_, _| Ok(None));

        let result = service(repository)
            .get_account(Role::Captain, &AccountId::new())
            .await;

        assert!(matches!(result, Err(AccountError::NotFound(_))));
    }
}
