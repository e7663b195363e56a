//! Authentication service for account registration, login, and tokens

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::Claims;
use shared::{validation, LoginInput, RegisterBusinessInput, RegisterUserInput, UserType};

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
    jwt_secret: String,
    access_token_expiry: i64,
}

/// Response after successful registration or login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_id: Option<Uuid>,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// User profile view
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub user_type: String,
    pub verification_status: String,
    pub contact_info: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// User info from database
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub user_type: String,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            jwt_secret: config.jwt.secret.clone(),
            access_token_expiry: config.jwt.access_token_expiry,
        }
    }

    /// Register a new investor account
    pub async fn register_user(&self, input: RegisterUserInput) -> AppResult<AuthResponse> {
        Self::validate_account_fields(&input.username, &input.email, &input.password)?;
        self.ensure_email_available(&input.email).await?;

        let password_hash = hash(&input.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let user_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO users (username, email, password_hash, user_type, contact_info, address)
            VALUES ($1, $2, $3, 'user', $4, $5)
            RETURNING id
            "#,
        )
        .bind(&input.username)
        .bind(&input.email)
        .bind(&password_hash)
        .bind(&input.contact_info)
        .bind(&input.address)
        .fetch_one(&self.db)
        .await?;

        let access_token = self.generate_token(user_id, &input.email, UserType::User)?;

        Ok(AuthResponse {
            user_id,
            business_id: None,
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }

    /// Register a business together with its owner account.
    ///
    /// The business starts in 'pending' status and only becomes visible to
    /// investors once the platform admin approves it.
    pub async fn register_business(
        &self,
        input: RegisterBusinessInput,
    ) -> AppResult<AuthResponse> {
        Self::validate_account_fields(&input.owner_username, &input.email, &input.password)?;
        validation::validate_business_name(&input.business_name).map_err(|msg| {
            AppError::Validation {
                field: "business_name".to_string(),
                message: msg.to_string(),
            }
        })?;
        self.ensure_email_available(&input.email).await?;

        let password_hash = hash(&input.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let mut tx = self.db.begin().await?;

        // Business owners do not go through investor verification; their
        // account is marked agreed from the start
        let user_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO users (username, email, password_hash, user_type,
                               verification_status, contact_info)
            VALUES ($1, $2, $3, 'business', 'agreed', $4)
            RETURNING id
            "#,
        )
        .bind(&input.owner_username)
        .bind(&input.email)
        .bind(&password_hash)
        .bind(&input.contact_info)
        .fetch_one(&mut *tx)
        .await?;

        let business_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO businesses (owner_id, business_name, description, industry_type,
                                    registered_address, contact_info, minimum_investment,
                                    investment_details, franchise_opportunities)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(&input.business_name)
        .bind(&input.description)
        .bind(&input.industry_type)
        .bind(&input.registered_address)
        .bind(&input.contact_info)
        .bind(input.minimum_investment)
        .bind(&input.investment_details)
        .bind(&input.franchise_opportunities)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        let access_token = self.generate_token(user_id, &input.email, UserType::Business)?;

        Ok(AuthResponse {
            user_id,
            business_id: Some(business_id),
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }

    /// Authenticate with email and password
    pub async fn login(&self, input: LoginInput) -> AppResult<AuthResponse> {
        let user = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, password_hash, user_type FROM users WHERE email = $1",
        )
        .bind(&input.email)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

        let valid = verify(&input.password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;
        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        let user_type = user
            .user_type
            .parse::<UserType>()
            .map_err(|_| AppError::Internal("Unknown user type on account".to_string()))?;

        let business_id = match user_type {
            UserType::Business => {
                sqlx::query_scalar::<_, Uuid>("SELECT id FROM businesses WHERE owner_id = $1")
                    .bind(user.id)
                    .fetch_optional(&self.db)
                    .await?
            }
            _ => None,
        };

        let access_token = self.generate_token(user.id, &user.email, user_type)?;

        Ok(AuthResponse {
            user_id: user.id,
            business_id,
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }

    /// Get a user's profile
    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<UserProfile> {
        let profile = sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT id, username, email, user_type, verification_status,
                   contact_info, address, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        Ok(profile)
    }

    fn validate_account_fields(username: &str, email: &str, password: &str) -> AppResult<()> {
        validation::validate_username(username).map_err(|msg| AppError::Validation {
            field: "username".to_string(),
            message: msg.to_string(),
        })?;
        validation::validate_email(email).map_err(|msg| AppError::Validation {
            field: "email".to_string(),
            message: msg.to_string(),
        })?;
        validation::validate_password(password).map_err(|msg| AppError::Validation {
            field: "password".to_string(),
            message: msg.to_string(),
        })?;
        Ok(())
    }

    async fn ensure_email_available(&self, email: &str) -> AppResult<()> {
        let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = $1")
            .bind(email)
            .fetch_one(&self.db)
            .await?;

        if existing > 0 {
            return Err(AppError::DuplicateEntry("email".to_string()));
        }
        Ok(())
    }

    /// Generate a signed access token
    fn generate_token(&self, user_id: Uuid, email: &str, user_type: UserType) -> AppResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.access_token_expiry);

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            user_type: user_type.as_str().to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
    }
}
