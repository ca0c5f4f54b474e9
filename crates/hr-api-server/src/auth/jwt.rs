use anyhow::Result;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // User ID (Subject)
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    pub roles: Vec<String>,
    pub iat: usize,
    pub exp: usize,
}

pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl_hours: u64,
}

impl JwtManager {
    pub fn new(secret: &str, token_ttl_hours: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl_hours,
        }
    }

    pub fn generate_token(
        &self,
        user_id: Uuid,
        tenant_id: Uuid,
        roles: Vec<String>,
    ) -> Result<String> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;
        let expiration = now + (self.token_ttl_hours * 3600) as usize;

        let claims = Claims {
            sub: user_id.to_string(),
            tenant_id: tenant_id.to_string(),
            roles,
            iat: now,
            exp: expiration,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(token)
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip_preserves_claims() {
        let manager = JwtManager::new("test-secret", 24);
        let user_id = Uuid::new_v4();
        let tenant_id = Uuid::new_v4();

        let token = manager
            .generate_token(user_id, tenant_id, vec!["ADMIN".to_string()])
            .unwrap();
        let claims = manager.validate_token(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.tenant_id, tenant_id.to_string());
        assert_eq!(claims.roles, vec!["ADMIN".to_string()]);
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let manager = JwtManager::new("secret-a", 24);
        let other = JwtManager::new("secret-b", 24);

        let token = manager
            .generate_token(Uuid::new_v4(), Uuid::new_v4(), vec![])
            .unwrap();
        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        let manager = JwtManager::new("test-secret", 24);
        assert!(manager.validate_token("not.a.token").is_err());
    }
}
