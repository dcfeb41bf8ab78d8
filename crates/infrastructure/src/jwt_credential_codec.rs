//! HS256 bearer credentials.
//!
//! The payload keeps the claim names existing clients read:
//! `idUserToken`, `idEmpresaToken` or `idLojaToken`, `permissoesToken`,
//! `iat` and `exp`. Only the tenant claim of the configured kind is written
//! and accepted.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dealerdesk_application::{CredentialCodec, IssuedCredential};
use dealerdesk_core::{AppError, AppResult, Principal, TenantId, UserId};
use dealerdesk_domain::TenantKind;

/// Minimum accepted length of the signing secret.
pub const MIN_SECRET_LENGTH: usize = 32;

#[derive(Debug, Serialize, Deserialize)]
struct CredentialClaims {
    #[serde(rename = "idUserToken")]
    user_id: Uuid,
    #[serde(
        rename = "idEmpresaToken",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    company_id: Option<Uuid>,
    #[serde(
        rename = "idLojaToken",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    store_id: Option<Uuid>,
    #[serde(rename = "permissoesToken", default)]
    permissions: Vec<String>,
    iat: i64,
    exp: i64,
}

impl CredentialClaims {
    fn tenant_claim(&self, kind: TenantKind) -> Option<Uuid> {
        match kind {
            TenantKind::Company => self.company_id,
            TenantKind::Store => self.store_id,
        }
    }
}

/// `jsonwebtoken` implementation of the credential codec port.
#[derive(Clone)]
pub struct JwtCredentialCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    tenant_kind: TenantKind,
    time_to_live: Duration,
}

impl JwtCredentialCodec {
    /// Creates a codec signing with `secret`.
    pub fn new(secret: &str, tenant_kind: TenantKind, time_to_live: Duration) -> AppResult<Self> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(AppError::Validation(format!(
                "credential secret must be at least {MIN_SECRET_LENGTH} characters"
            )));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            tenant_kind,
            time_to_live,
        })
    }
}

impl CredentialCodec for JwtCredentialCodec {
    fn issue(&self, principal: &Principal) -> AppResult<IssuedCredential> {
        let issued_at = Utc::now();
        let expires_at = issued_at + self.time_to_live;
        let tenant_id = principal.tenant_id().as_uuid();

        let claims = CredentialClaims {
            user_id: principal.user_id().as_uuid(),
            company_id: (self.tenant_kind == TenantKind::Company).then_some(tenant_id),
            store_id: (self.tenant_kind == TenantKind::Store).then_some(tenant_id),
            permissions: principal.role_claims().to_vec(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|error| AppError::Internal(format!("failed to sign credential: {error}")))?;

        Ok(IssuedCredential { token, expires_at })
    }

    fn decode(&self, token: &str) -> AppResult<Principal> {
        let claims = decode::<CredentialClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|error| AppError::InvalidCredential(error.to_string()))?
            .claims;

        let tenant_id = claims.tenant_claim(self.tenant_kind).ok_or_else(|| {
            AppError::InvalidCredential(format!(
                "credential is missing the '{}' claim",
                self.tenant_kind.claim_name()
            ))
        })?;

        Ok(Principal::new(
            UserId::from_uuid(claims.user_id),
            TenantId::from_uuid(tenant_id),
            claims.permissions,
        ))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use dealerdesk_application::CredentialCodec;
    use dealerdesk_core::{AppError, AppResult, Principal, TenantId, UserId};
    use dealerdesk_domain::TenantKind;

    use super::JwtCredentialCodec;

    const SECRET: &str = "a-very-long-signing-secret-for-tests";

    fn codec(kind: TenantKind, time_to_live: Duration) -> JwtCredentialCodec {
        JwtCredentialCodec::new(SECRET, kind, time_to_live)
            .unwrap_or_else(|error| panic!("codec construction failed: {error}"))
    }

    fn principal() -> Principal {
        Principal::new(
            UserId::new(),
            TenantId::new(),
            vec!["Staff".to_owned(), "clients:read".to_owned()],
        )
    }

    #[test]
    fn decodes_the_principal_it_issued() -> AppResult<()> {
        let codec = codec(TenantKind::Company, Duration::hours(8));
        let principal = principal();

        let credential = codec.issue(&principal)?;

        assert_eq!(codec.decode(&credential.token)?, principal);
        Ok(())
    }

    #[test]
    fn expired_credential_is_invalid() -> AppResult<()> {
        let codec = codec(TenantKind::Company, Duration::minutes(-5));
        let credential = codec.issue(&principal())?;

        assert!(matches!(
            codec.decode(&credential.token),
            Err(AppError::InvalidCredential(_))
        ));
        Ok(())
    }

    #[test]
    fn credential_signed_with_another_secret_is_invalid() -> AppResult<()> {
        let issuer = JwtCredentialCodec::new(
            "another-signing-secret-of-enough-length",
            TenantKind::Company,
            Duration::hours(1),
        )?;
        let credential = issuer.issue(&principal())?;

        assert!(matches!(
            codec(TenantKind::Company, Duration::hours(1)).decode(&credential.token),
            Err(AppError::InvalidCredential(_))
        ));
        Ok(())
    }

    #[test]
    fn credential_of_the_other_tenant_kind_is_invalid() -> AppResult<()> {
        let store_credential = codec(TenantKind::Store, Duration::hours(1)).issue(&principal())?;

        let result = codec(TenantKind::Company, Duration::hours(1)).decode(&store_credential.token);

        assert!(
            matches!(result, Err(AppError::InvalidCredential(message)) if message.contains("idEmpresaToken"))
        );
        Ok(())
    }

    #[test]
    fn garbage_is_invalid() {
        assert!(matches!(
            codec(TenantKind::Store, Duration::hours(1)).decode("not.a.token"),
            Err(AppError::InvalidCredential(_))
        ));
    }

    #[test]
    fn short_secret_is_rejected() {
        assert!(matches!(
            JwtCredentialCodec::new("short", TenantKind::Company, Duration::hours(1)),
            Err(AppError::Validation(_))
        ));
    }
}
