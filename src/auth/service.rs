//! Auth application service: register, authenticate, issue and resolve tokens.

use std::sync::Arc;
use tracing::{debug, info};

use super::{PasswordHasher, TokenIssuer};
use crate::error::{AppError, AppResult, INCORRECT_LOGIN};
use crate::models::{LoginForm, Token, User, UserCreate};
use crate::store::UserStore;

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, hasher: PasswordHasher, tokens: TokenIssuer) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    /// Hash the password and insert the user. A duplicate email is a Conflict,
    /// decided by the store's insert alone.
    pub async fn register(&self, input: UserCreate) -> AppResult<User> {
        let hashed_password = self.hasher.hash(&input.password)?;
        let user = self
            .store
            .insert(User {
                email: input.email,
                hashed_password,
            })
            .await?;
        info!(email = %user.email, "user registered");
        Ok(user)
    }

    /// `None` for an unknown email or a wrong password.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<Option<User>> {
        let Some(user) = self.store.find_by_email(email).await? else {
            debug!(email = %email, "authentication failed: unknown email");
            return Ok(None);
        };
        if !self.hasher.verify(password, &user.hashed_password)? {
            debug!(email = %email, "authentication failed: password mismatch");
            return Ok(None);
        }
        Ok(Some(user))
    }

    pub fn issue_token(&self, subject: &str) -> AppResult<String> {
        self.tokens.issue(subject)
    }

    /// Authenticate and mint a bearer token.
    pub async fn login(&self, form: &LoginForm) -> AppResult<Token> {
        let user = self
            .authenticate(&form.username, &form.password)
            .await?
            .ok_or_else(|| AppError::Unauthorized(INCORRECT_LOGIN.to_string()))?;
        let access_token = self.issue_token(&user.email)?;
        info!(email = %user.email, "login succeeded");
        Ok(Token::bearer(access_token))
    }

    /// Validate the token and load its subject. All failures are the same Unauthorized.
    pub async fn resolve_current_user(&self, token: &str) -> AppResult<User> {
        let data = self.tokens.validate(token)?;
        self.store
            .find_by_email(&data.email)
            .await?
            .ok_or_else(|| {
                debug!(email = %data.email, "token rejected: subject not found");
                AppError::invalid_credentials()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Claims, PasswordParams, TokenConfig};
    use crate::error::{EMAIL_TAKEN, INVALID_CREDENTIALS};
    use crate::store::MemoryUserStore;
    use jsonwebtoken::Algorithm;

    const SECRET: &str = "service-test-secret-service-test";

    fn token_config(secret: &str) -> TokenConfig {
        TokenConfig {
            secret: secret.to_string(),
            algorithm: Algorithm::HS256,
            ttl: chrono::Duration::minutes(30),
        }
    }

    fn service_with(store: MemoryUserStore, secret: &str) -> AuthService {
        let hasher = PasswordHasher::new(PasswordParams {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();
        AuthService::new(
            Arc::new(store),
            hasher,
            TokenIssuer::new(&token_config(secret)),
        )
    }

    fn create(email: &str, password: &str) -> UserCreate {
        UserCreate {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn register_stores_hash_not_plaintext() {
        let store = MemoryUserStore::new();
        let service = service_with(store.clone(), SECRET);
        let user = service.register(create("u@x.com", "pw123")).await.unwrap();
        assert_eq!(user.email, "u@x.com");
        assert_ne!(user.hashed_password, "pw123");

        let stored = store.find_by_email("u@x.com").await.unwrap().unwrap();
        assert_eq!(stored.hashed_password, user.hashed_password);
    }

    #[tokio::test]
    async fn register_twice_conflicts() {
        let store = MemoryUserStore::new();
        let service = service_with(store.clone(), SECRET);
        service.register(create("u@x.com", "pw123")).await.unwrap();
        let err = service
            .register(create("u@x.com", "other"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref msg) if msg == EMAIL_TAKEN));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn authenticate_outcomes() {
        let service = service_with(MemoryUserStore::new(), SECRET);
        service.register(create("u@x.com", "pw123")).await.unwrap();

        let ok = service.authenticate("u@x.com", "pw123").await.unwrap();
        assert_eq!(ok.map(|u| u.email).as_deref(), Some("u@x.com"));
        assert!(service.authenticate("u@x.com", "nope").await.unwrap().is_none());
        assert!(service
            .authenticate("ghost@x.com", "pw123")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn issued_token_resolves_to_user() {
        let service = service_with(MemoryUserStore::new(), SECRET);
        service.register(create("a@b.com", "pw")).await.unwrap();
        let token = service.issue_token("a@b.com").unwrap();
        let user = service.resolve_current_user(&token).await.unwrap();
        assert_eq!(user.email, "a@b.com");
    }

    #[tokio::test]
    async fn login_rejects_bad_password() {
        let service = service_with(MemoryUserStore::new(), SECRET);
        service.register(create("a@b.com", "pw")).await.unwrap();
        let form = LoginForm {
            username: "a@b.com".to_string(),
            password: "bad".to_string(),
        };
        let err = service.login(&form).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(ref msg) if msg == INCORRECT_LOGIN));

        let form = LoginForm {
            username: "a@b.com".to_string(),
            password: "pw".to_string(),
        };
        let token = service.login(&form).await.unwrap();
        assert_eq!(token.token_type, "bearer");
    }

    async fn assert_rejected(service: &AuthService, token: &str) {
        let err = service.resolve_current_user(token).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(ref msg) if msg == INVALID_CREDENTIALS));
    }

    #[tokio::test]
    async fn resolve_rejects_uniformly() {
        let store = MemoryUserStore::new();
        let service = service_with(store.clone(), SECRET);
        service.register(create("a@b.com", "pw")).await.unwrap();

        // unknown subject, valid signature
        let ghost = service.issue_token("ghost@b.com").unwrap();
        assert_rejected(&service, &ghost).await;

        // expired
        let tokens = TokenIssuer::new(&token_config(SECRET));
        let now = chrono::Utc::now().timestamp();
        let expired = tokens
            .sign(&Claims {
                sub: Some("a@b.com".to_string()),
                exp: now - 10,
                iat: now - 100,
            })
            .unwrap();
        assert_rejected(&service, &expired).await;

        // other secret
        let foreign = service_with(store, "another-secret-another-secret-xx")
            .issue_token("a@b.com")
            .unwrap();
        assert_rejected(&service, &foreign).await;

        assert_rejected(&service, "garbage").await;
    }
}
