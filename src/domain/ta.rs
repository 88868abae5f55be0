//! Deciding what happens to the account behind a TA assignment.

use uuid::Uuid;

use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::user;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaAccountPlan {
    /// No account exists for the email; one is created with role `ta`.
    Materialise,
    /// A student account is promoted to `ta`.
    Promote(Uuid),
    /// Already a TA.
    Keep(Uuid),
}

pub fn plan_ta_account(existing: Option<&user::Model>) -> AppResult<TaAccountPlan> {
    let Some(user) = existing else {
        return Ok(TaAccountPlan::Materialise);
    };

    match user.role {
        RoleEnum::Student => Ok(TaAccountPlan::Promote(user.user_id)),
        RoleEnum::Ta => Ok(TaAccountPlan::Keep(user.user_id)),
        RoleEnum::Educator | RoleEnum::IndustryExpert => Err(AppError::Validation(format!(
            "A user with role {} cannot be assigned as a TA",
            user.role.as_str()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user_with_role(role: RoleEnum) -> user::Model {
        let now = Utc::now().naive_utc();
        user::Model {
            user_id: Uuid::new_v4(),
            name: "Someone".to_string(),
            email: "someone@example.com".to_string(),
            password: "hash".to_string(),
            role,
            is_active: true,
            bio: None,
            avatar: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_unknown_email_materialises_account() {
        assert_eq!(plan_ta_account(None).unwrap(), TaAccountPlan::Materialise);
    }

    #[test]
    fn test_student_is_promoted() {
        let student = user_with_role(RoleEnum::Student);
        assert_eq!(
            plan_ta_account(Some(&student)).unwrap(),
            TaAccountPlan::Promote(student.user_id)
        );
    }

    #[test]
    fn test_existing_ta_is_kept() {
        let ta = user_with_role(RoleEnum::Ta);
        assert_eq!(
            plan_ta_account(Some(&ta)).unwrap(),
            TaAccountPlan::Keep(ta.user_id)
        );
    }

    #[test]
    fn test_educator_and_expert_rejected() {
        assert!(plan_ta_account(Some(&user_with_role(RoleEnum::Educator))).is_err());
        assert!(plan_ta_account(Some(&user_with_role(RoleEnum::IndustryExpert))).is_err());
    }
}
