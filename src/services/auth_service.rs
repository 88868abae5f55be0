use sea_orm::DatabaseConnection;
use uuid::Uuid;

use super::{conflict_on_duplicate, require_text};
use crate::config::JWT_EXPRIED_TIME;
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::user;
use crate::error::{AppError, AppResult};
use crate::repositories::{UserRepository, UserUpdate};
use crate::utils::jwt::JwtManager;

const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: RoleEnum,
}

#[derive(Debug)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Debug)]
pub struct Session {
    pub access_token: String,
    pub expires_in: i64,
    pub user: user::Model,
}

fn normalize_email(email: &str) -> AppResult<String> {
    let email = email.trim().to_lowercase();
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid {
        return Err(AppError::Validation("Email address is invalid".to_string()));
    }
    Ok(email)
}

fn check_password(password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn hash_password(password: &str) -> AppResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to hash password: {e}")))
}

fn issue_token(jwt: &JwtManager, user: user::Model) -> AppResult<Session> {
    let access_token = jwt
        .create_jwt(user.user_id, &user.email, user.role, JWT_EXPRIED_TIME)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create token: {e}")))?;

    Ok(Session {
        access_token,
        expires_in: JWT_EXPRIED_TIME,
        user,
    })
}

pub async fn register(
    db: &DatabaseConnection,
    jwt: &JwtManager,
    registration: Registration,
) -> AppResult<Session> {
    require_text("Name", &registration.name)?;
    let email = normalize_email(&registration.email)?;
    check_password(&registration.password)?;

    let user_repo = UserRepository::new(db);
    if user_repo.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("Email is already registered".to_string()));
    }

    let password_hash = hash_password(&registration.password)?;
    let user = user_repo
        .create(
            registration.name.trim().to_string(),
            email,
            password_hash,
            registration.role,
        )
        .await
        .map_err(|e| conflict_on_duplicate(e, "Email is already registered"))?;

    tracing::info!(user_id = %user.user_id, role = user.role.as_str(), "user registered");
    issue_token(jwt, user)
}

pub async fn login(
    db: &DatabaseConnection,
    jwt: &JwtManager,
    email: &str,
    password: &str,
) -> AppResult<Session> {
    let invalid = || AppError::Unauthenticated("Invalid email or password".to_string());

    let email = email.trim().to_lowercase();
    let user = UserRepository::new(db)
        .find_by_email(&email)
        .await?
        .ok_or_else(invalid)?;

    let password_valid = bcrypt::verify(password, &user.password)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid());
    }
    if !user.is_active {
        return Err(AppError::Forbidden("Account is deactivated".to_string()));
    }

    issue_token(jwt, user)
}

pub async fn get_profile(db: &DatabaseConnection, user_id: Uuid) -> AppResult<user::Model> {
    UserRepository::new(db)
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))
}

pub async fn update_profile(
    db: &DatabaseConnection,
    user_id: Uuid,
    changes: ProfileChanges,
) -> AppResult<user::Model> {
    let user = get_profile(db, user_id).await?;

    if let Some(name) = &changes.name {
        require_text("Name", name)?;
    }

    let password = match changes.new_password {
        Some(new_password) => {
            let current = changes.current_password.ok_or_else(|| {
                AppError::Validation("Current password is required".to_string())
            })?;
            let matches = bcrypt::verify(&current, &user.password).map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Password verification error: {e}"))
            })?;
            if !matches {
                return Err(AppError::Validation(
                    "Current password is incorrect".to_string(),
                ));
            }
            check_password(&new_password)?;
            Some(hash_password(&new_password)?)
        }
        None => None,
    };

    let updates = UserUpdate {
        name: changes.name.map(|n| n.trim().to_string()),
        bio: changes.bio,
        avatar: changes.avatar,
        password,
    };
    Ok(UserRepository::new(db).update(user, updates).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email("  Ada@Example.COM ").unwrap(),
            "ada@example.com"
        );
        assert!(normalize_email("no-at-sign").is_err());
        assert!(normalize_email("@example.com").is_err());
        assert!(normalize_email("ada@localhost").is_err());
    }

    #[test]
    fn test_password_length() {
        assert!(check_password("12345").is_err());
        assert!(check_password("123456").is_ok());
    }
}
