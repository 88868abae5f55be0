mod common;

use course_service::entities::sea_orm_active_enums::RoleEnum;
use course_service::error::AppError;
use course_service::services::auth_service::{self, ProfileChanges, Registration};
use course_service::utils::jwt::JwtManager;
use test_log::test;

use crate::common::setup_db;

fn registration(email: &str) -> Registration {
    Registration {
        name: "Grace".to_string(),
        email: email.to_string(),
        password: "correct horse".to_string(),
        role: RoleEnum::Student,
    }
}

#[test(tokio::test)]
async fn test_register_then_login_issues_verifiable_tokens() {
    let db = setup_db().await;
    let jwt = JwtManager::new("integration-secret");

    let session = auth_service::register(&db, &jwt, registration("Grace@Example.com"))
        .await
        .unwrap();
    assert_eq!(session.user.email, "grace@example.com");
    let claims = jwt.decode_jwt(&session.access_token).unwrap();
    assert_eq!(claims.user_id, session.user.user_id);
    assert_eq!(claims.role, RoleEnum::Student);

    let login = auth_service::login(&db, &jwt, "grace@example.com", "correct horse")
        .await
        .unwrap();
    assert_eq!(login.user.user_id, session.user.user_id);

    let err = auth_service::login(&db, &jwt, "grace@example.com", "wrong horse")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthenticated(_)));

    let err = auth_service::register(&db, &jwt, registration("grace@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[test(tokio::test)]
async fn test_password_change_requires_current_password() {
    let db = setup_db().await;
    let jwt = JwtManager::new("integration-secret");
    let session = auth_service::register(&db, &jwt, registration("ada@example.com"))
        .await
        .unwrap();
    let user_id = session.user.user_id;

    let err = auth_service::update_profile(
        &db,
        user_id,
        ProfileChanges {
            name: None,
            bio: None,
            avatar: None,
            current_password: Some("not it".to_string()),
            new_password: Some("brand new secret".to_string()),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let updated = auth_service::update_profile(
        &db,
        user_id,
        ProfileChanges {
            name: Some("Ada Lovelace".to_string()),
            bio: Some("Analyst".to_string()),
            avatar: None,
            current_password: None,
            new_password: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.name, "Ada Lovelace");
    assert_eq!(updated.bio.as_deref(), Some("Analyst"));
}
