/// Authentication service - HTTP Basic credentials and password handling
use crate::{
    config::{AuthSettings, Role},
    error::{Result, ServerError},
};
use base64::{engine::general_purpose::STANDARD, Engine};
use std::collections::{BTreeSet, HashMap};

/// Identity established for a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    pub roles: BTreeSet<Role>,
}

impl Principal {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

#[derive(Debug, Clone)]
struct Account {
    password_hash: String,
    roles: BTreeSet<Role>,
}

/// In-memory account directory
///
/// Only bcrypt hashes are kept; clear-text passwords are hashed as accounts
/// are registered.
#[derive(Debug, Clone)]
pub struct AuthService {
    realm: String,
    cost: u32,
    accounts: HashMap<String, Account>,
}

impl AuthService {
    pub fn new(realm: impl Into<String>, cost: u32) -> Self {
        Self {
            realm: realm.into(),
            cost,
            accounts: HashMap::new(),
        }
    }

    /// Build the directory from configuration, hashing every password
    pub fn from_settings(settings: &AuthSettings) -> Result<Self> {
        let mut service = Self::new(settings.realm.clone(), settings.bcrypt_cost);
        for account in &settings.accounts {
            service.register(&account.username, &account.password, &account.roles)?;
        }
        tracing::info!("Registered {} account(s)", service.accounts.len());
        Ok(service)
    }

    /// Realm announced in authentication challenges
    pub fn realm(&self) -> &str {
        &self.realm
    }

    /// Add or replace an account
    pub fn register(&mut self, username: &str, password: &str, roles: &[Role]) -> Result<()> {
        let password_hash = self.hash_password(password)?;
        self.accounts.insert(
            username.to_string(),
            Account {
                password_hash,
                roles: roles.iter().copied().collect(),
            },
        );
        Ok(())
    }

    /// Hash a password using bcrypt
    pub fn hash_password(&self, password: &str) -> Result<String> {
        bcrypt::hash(password, self.cost).map_err(ServerError::from)
    }

    /// Verify a password against a hash
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash).map_err(ServerError::from)
    }

    /// Check a username/password pair
    ///
    /// Returns `Ok(None)` for an unknown user or a wrong password.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Option<Principal>> {
        let Some(account) = self.accounts.get(username) else {
            return Ok(None);
        };

        if !self.verify_password(password, &account.password_hash)? {
            return Ok(None);
        }

        Ok(Some(Principal {
            username: username.to_string(),
            roles: account.roles.clone(),
        }))
    }

    /// Authenticate the value of an `Authorization` header
    pub fn authenticate_header(&self, header: &str) -> Result<Option<Principal>> {
        match parse_basic_credentials(header) {
            Some((username, password)) => self.authenticate(&username, &password),
            None => Ok(None),
        }
    }
}

/// Decode `Basic <base64(username:password)>`
///
/// The scheme is matched ignoring case. Returns `None` for other schemes and
/// malformed values.
pub fn parse_basic_credentials(header: &str) -> Option<(String, String)> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some((username.to_string(), password.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(credentials: &str) -> String {
        format!("Basic {}", STANDARD.encode(credentials))
    }

    #[test]
    fn test_password_hashing() {
        let auth = AuthService::new("test", 4);
        let password = "my_secure_password";

        let hash = auth.hash_password(password).unwrap();
        assert!(auth.verify_password(password, &hash).unwrap());
        assert!(!auth.verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_parse_basic_credentials() {
        assert_eq!(
            parse_basic_credentials(&basic("user:user123")),
            Some(("user".to_string(), "user123".to_string()))
        );

        // Passwords may contain colons
        assert_eq!(
            parse_basic_credentials(&basic("user:a:b")),
            Some(("user".to_string(), "a:b".to_string()))
        );

        assert_eq!(
            parse_basic_credentials(&format!("basic {}", STANDARD.encode("u:p"))),
            Some(("u".to_string(), "p".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_malformed_headers() {
        assert!(parse_basic_credentials("Bearer abc.def").is_none());
        assert!(parse_basic_credentials("Basic !!!not-base64").is_none());
        assert!(parse_basic_credentials(&basic("no-colon")).is_none());
        assert!(parse_basic_credentials("Basic").is_none());
    }

    #[test]
    fn test_authenticate_returns_roles() {
        let mut auth = AuthService::new("test", 4);
        auth.register("admin", "admin123", &[Role::User, Role::Admin])
            .unwrap();

        let principal = auth
            .authenticate_header(&basic("admin:admin123"))
            .unwrap()
            .expect("valid credentials");

        assert_eq!(principal.username, "admin");
        assert!(principal.has_role(Role::Admin));
        assert!(principal.has_role(Role::User));

        assert!(auth
            .authenticate_header(&basic("admin:wrong"))
            .unwrap()
            .is_none());
        assert!(auth
            .authenticate_header(&basic("ghost:admin123"))
            .unwrap()
            .is_none());
    }
}
