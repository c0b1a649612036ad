//! Mock authentication: the two demo accounts, bearer tokens, and the role gate.

use bcrypt::{hash, verify};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

use crate::error::{Result, StayError};
use crate::models::{AuthPayload, Role, User};

pub use bcrypt::DEFAULT_COST;

const DEMO_PASSWORD: &str = "password123";

pub fn hash_password(password: &str, cost: u32) -> Result<String> {
    Ok(hash(password, cost)?)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    Ok(verify(password, hash)?)
}

struct Account {
    user: User,
    password_hash: String,
}

/// Hardcoded account table. Registrations are never added to it.
pub struct UserDirectory {
    accounts: Vec<Account>,
}

impl UserDirectory {
    /// The owner and traveller demo accounts, passwords hashed at `cost`
    pub fn demo(cost: u32) -> Result<Self> {
        let accounts = vec![
            Account {
                user: User {
                    id: 1,
                    email: "owner@example.com".to_string(),
                    name: "John Doe".to_string(),
                    role: Role::HotelOwner,
                },
                password_hash: hash_password(DEMO_PASSWORD, cost)?,
            },
            Account {
                user: User {
                    id: 2,
                    email: "traveller@example.com".to_string(),
                    name: "Jane Smith".to_string(),
                    role: Role::Traveller,
                },
                password_hash: hash_password(DEMO_PASSWORD, cost)?,
            },
        ];
        Ok(Self { accounts })
    }

    fn find(&self, email: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|a| a.user.email.eq_ignore_ascii_case(email.trim()))
    }

    /// Email is matched case-insensitively and ignoring surrounding blanks,
    /// password exactly
    pub fn login(&self, email: &str, password: &str) -> Result<User> {
        let account = self.find(email).ok_or_else(|| {
            warn!(%email, "login for unknown email");
            StayError::InvalidCredentials
        })?;
        if !verify_password(password, &account.password_hash)? {
            warn!(%email, "login with wrong password");
            return Err(StayError::InvalidCredentials);
        }
        info!(user_id = account.user.id, role = account.user.role.as_str(), "user logged in");
        Ok(account.user.clone())
    }

    /// Rejects emails already in the table, otherwise returns the new user
    /// without storing it. Ids are `table size + 1` for every registration.
    pub fn register(&self, email: &str, name: &str, role: Role) -> Result<User> {
        if self.find(email).is_some() {
            warn!(%email, "registration with existing email");
            return Err(StayError::DuplicateEmail);
        }
        let user = User {
            id: self.accounts.len() as u32 + 1,
            email: email.trim().to_string(),
            name: name.trim().to_string(),
            role,
        };
        info!(user_id = user.id, role = role.as_str(), "user registered");
        Ok(user)
    }
}

/// HS256 keys plus token lifetime
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
}

impl TokenKeys {
    pub fn new(secret: &[u8], ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_secs,
        }
    }

    pub fn create_jwt(&self, user: &User) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();

        let claims = AuthPayload {
            sub: user.email.clone(),
            uid: user.id,
            name: user.name.clone(),
            role: user.role,
            exp: (now + self.ttl_secs) as usize,
        };

        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    pub fn validate_jwt(&self, token: &str) -> Result<AuthPayload> {
        let token_data = decode::<AuthPayload>(
            token,
            &self.decoding,
            &Validation::new(Algorithm::HS256),
        )?;
        Ok(token_data.claims)
    }
}

/// Gate for protected pages: a session is required, and a matching role when one is named.
pub fn authorize(session: Option<&User>, required: Option<Role>) -> Result<&User> {
    let user = session.ok_or(StayError::LoginRequired)?;
    match required {
        Some(role) if user.role != role => Err(StayError::AccessDenied(role)),
        _ => Ok(user),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum bcrypt cost keeps the tests fast
    fn directory() -> UserDirectory {
        UserDirectory::demo(4).unwrap()
    }

    #[test]
    fn demo_accounts_log_in_with_their_roles() {
        let dir = directory();
        let owner = dir.login("owner@example.com", "password123").unwrap();
        assert_eq!(owner.role, Role::HotelOwner);
        assert_eq!(owner.name, "John Doe");

        let traveller = dir.login("Traveller@Example.com", "password123").unwrap();
        assert_eq!(traveller.role, Role::Traveller);
        assert_eq!(traveller.id, 2);
    }

    #[test]
    fn wrong_password_or_email_fails() {
        let dir = directory();
        for (email, password) in [
            ("owner@example.com", "Password123"),
            ("owner@example.com", ""),
            ("nobody@example.com", "password123"),
        ] {
            let err = dir.login(email, password).unwrap_err();
            assert_eq!(err.to_string(), "Invalid email or password");
        }
    }

    #[test]
    fn email_padding_is_ignored_but_password_is_exact() {
        let dir = directory();
        let user = dir.login("  Traveller@Example.com ", "password123").unwrap();
        assert_eq!(user.email, "traveller@example.com");
        assert!(dir.login("traveller@example.com", " password123").is_err());
        assert!(matches!(
            dir.register(" owner@example.com ", "Dup", Role::Traveller),
            Err(StayError::DuplicateEmail)
        ));
    }

    #[test]
    fn register_rejects_existing_email() {
        let dir = directory();
        let err = dir
            .register("OWNER@example.com", "Someone", Role::Traveller)
            .unwrap_err();
        assert!(matches!(err, StayError::DuplicateEmail));
    }

    #[test]
    fn register_returns_user_with_submitted_role_but_does_not_persist() {
        let dir = directory();
        let user = dir.register("new@example.com", "New Person", Role::HotelOwner).unwrap();
        assert_eq!(user.id, 3);
        assert_eq!(user.role, Role::HotelOwner);

        // never added to the table
        assert!(dir.register("new@example.com", "Again", Role::Traveller).is_ok());
        assert!(dir.login("new@example.com", "anything").is_err());
    }

    #[test]
    fn token_round_trip_carries_user() {
        let keys = TokenKeys::new(b"test-secret", 3600);
        let user = directory().login("owner@example.com", "password123").unwrap();
        let token = keys.create_jwt(&user).unwrap();
        let claims = keys.validate_jwt(&token).unwrap();
        assert_eq!(claims.user(), user);

        let other = TokenKeys::new(b"other-secret", 3600);
        assert!(other.validate_jwt(&token).is_err());
    }

    #[test]
    fn authorize_checks_session_and_role() {
        let traveller = User {
            id: 2,
            email: "traveller@example.com".to_string(),
            name: "Jane Smith".to_string(),
            role: Role::Traveller,
        };
        assert!(matches!(authorize(None, None), Err(StayError::LoginRequired)));
        assert!(authorize(Some(&traveller), None).is_ok());
        assert!(authorize(Some(&traveller), Some(Role::Traveller)).is_ok());
        let err = authorize(Some(&traveller), Some(Role::HotelOwner)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Access denied: You need to be a hotel owner to view this page"
        );
    }
}
