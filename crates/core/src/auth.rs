use serde::{Deserialize, Serialize};

/// Identity fields signed into every session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimsPayload {
    subject: String,
    email: String,
    first_name: String,
    last_name: String,
    roles: Vec<String>,
}

impl ClaimsPayload {
    /// Creates a claims payload from user identity data.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        roles: Vec<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            roles,
        }
    }

    /// Returns the user id the token was issued for.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the normalized email of the user.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Returns the first name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    /// Returns the last name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    /// Returns the role tags held at issuance time.
    #[must_use]
    pub fn roles(&self) -> &[String] {
        self.roles.as_slice()
    }
}

/// Verified claims attached to an authenticated request.
///
/// Claims are never stored server-side; a role change only takes effect
/// for a caller once a new token is issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    payload: ClaimsPayload,
    issued_at: i64,
    expires_at: i64,
}

impl SessionClaims {
    /// Creates session claims from a payload and its validity window (unix seconds).
    #[must_use]
    pub fn new(payload: ClaimsPayload, issued_at: i64, expires_at: i64) -> Self {
        Self {
            payload,
            issued_at,
            expires_at,
        }
    }

    /// Returns the signed identity payload.
    #[must_use]
    pub fn payload(&self) -> &ClaimsPayload {
        &self.payload
    }

    /// Returns the user id the token was issued for.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.payload.subject()
    }

    /// Returns the caller's email as signed into the token.
    #[must_use]
    pub fn email(&self) -> &str {
        self.payload.email()
    }

    /// Returns the caller's role tags.
    #[must_use]
    pub fn roles(&self) -> &[String] {
        self.payload.roles()
    }

    /// Returns whether the caller holds the given role tag.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.payload.roles().iter().any(|value| value == role)
    }

    /// Issued-at timestamp in unix seconds.
    #[must_use]
    pub fn issued_at(&self) -> i64 {
        self.issued_at
    }

    /// Expiry timestamp in unix seconds.
    #[must_use]
    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::{ClaimsPayload, SessionClaims};

    #[test]
    fn has_role_matches_exact_tag() {
        let claims = SessionClaims::new(
            ClaimsPayload::new("id-1", "a@x.com", "Ada", "L", vec!["user".to_owned()]),
            0,
            60,
        );

        assert!(claims.has_role("user"));
        assert!(!claims.has_role("admin"));
        assert!(!claims.has_role("USER"));
    }
}
