use anyhow::Result;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
};
use uuid::Uuid;

use crate::entities::{prelude::*, users};
use boggle_types::User;

pub struct UserRepository<'c, C> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> UserRepository<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    fn model_to_user(model: users::Model) -> User {
        User {
            user_token: model.token,
            nickname: model.nickname,
        }
    }

    pub async fn find_by_token(&self, token: &str) -> Result<Option<User>> {
        let user_model = Users::find_by_id(token.to_string()).one(self.conn).await?;
        Ok(user_model.map(Self::model_to_user))
    }

    pub async fn exists(&self, token: &str) -> Result<bool> {
        let count = Users::find()
            .filter(users::Column::Token.eq(token))
            .count(self.conn)
            .await?;

        Ok(count > 0)
    }

    /// Register `nickname` under a freshly generated token. A token that
    /// collides with an existing user is discarded and regenerated.
    pub async fn create_user(&self, nickname: &str) -> Result<User> {
        let token = loop {
            let candidate = Uuid::new_v4().to_string();
            if !self.exists(&candidate).await? {
                break candidate;
            }
        };

        let user_model = users::ActiveModel {
            token: ActiveValue::Set(token.clone()),
            nickname: ActiveValue::Set(nickname.to_string()),
        };
        Users::insert(user_model)
            .exec_without_returning(self.conn)
            .await?;

        Ok(User {
            user_token: token,
            nickname: nickname.to_string(),
        })
    }
}
