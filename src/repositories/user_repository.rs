use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::user;

pub struct UserRepository<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find_by_id(&self, user_id: Uuid) -> Result<Option<user::Model>, DbErr> {
        user::Entity::find_by_id(user_id).one(self.conn).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, DbErr> {
        user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.conn)
            .await
    }

    pub async fn find_by_ids(&self, user_ids: Vec<Uuid>) -> Result<Vec<user::Model>, DbErr> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        user::Entity::find()
            .filter(user::Column::UserId.is_in(user_ids))
            .order_by_asc(user::Column::Name)
            .all(self.conn)
            .await
    }

    pub async fn create(
        &self,
        name: String,
        email: String,
        password_hash: String,
        role: RoleEnum,
    ) -> Result<user::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let user = user::ActiveModel {
            user_id: Set(Uuid::new_v4()),
            name: Set(name),
            email: Set(email),
            password: Set(password_hash),
            role: Set(role),
            is_active: Set(true),
            bio: Set(None),
            avatar: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        user.insert(self.conn).await
    }

    pub async fn update(&self, user: user::Model, updates: UserUpdate) -> Result<user::Model, DbErr> {
        let mut active_model: user::ActiveModel = user.into();

        if let Some(name) = updates.name {
            active_model.name = Set(name);
        }
        if let Some(bio) = updates.bio {
            active_model.bio = Set(Some(bio));
        }
        if let Some(avatar) = updates.avatar {
            active_model.avatar = Set(Some(avatar));
        }
        if let Some(password) = updates.password {
            active_model.password = Set(password);
        }

        active_model.updated_at = Set(Utc::now().naive_utc());
        active_model.update(self.conn).await
    }

    pub async fn set_role(&self, user_id: Uuid, role: RoleEnum) -> Result<user::Model, DbErr> {
        let user = user::ActiveModel {
            user_id: sea_orm::ActiveValue::Unchanged(user_id),
            role: Set(role),
            updated_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };
        user.update(self.conn).await
    }
}

#[derive(Debug, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub password: Option<String>,
}
