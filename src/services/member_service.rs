use crate::database::DbPool;
use crate::entities::member_entity as members;
use crate::error::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

#[derive(Clone)]
pub struct MemberService {
    pool: DbPool,
}

impl MemberService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// 会员注册, 返回新会员 id
    pub async fn join(&self, member: members::Model) -> AppResult<i64> {
        let name = validate_name(&member.name)?;
        self.validate_duplicate_member(&name).await?;

        let saved = members::ActiveModel {
            name: Set(name),
            city: Set(member.city),
            street: Set(member.street),
            zipcode: Set(member.zipcode),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await?;

        log::info!("Member joined: id={}, name={}", saved.id, saved.name);
        Ok(saved.id)
    }

    pub async fn find_members(&self) -> AppResult<Vec<members::Model>> {
        Ok(members::Entity::find()
            .order_by_asc(members::Column::Id)
            .all(self.pool.as_ref())
            .await?)
    }

    pub async fn find_one(&self, member_id: i64) -> AppResult<members::Model> {
        members::Entity::find_by_id(member_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Member {member_id} not found")))
    }

    /// 修改会员名
    pub async fn update(&self, member_id: i64, name: &str) -> AppResult<()> {
        let name = validate_name(name)?;
        let mut model = self.find_one(member_id).await?.into_active_model();
        model.name = Set(name);
        model.update(self.pool.as_ref()).await?;
        Ok(())
    }

    async fn validate_duplicate_member(&self, name: &str) -> AppResult<()> {
        let exists = members::Entity::find()
            .filter(members::Column::Name.eq(name))
            .count(self.pool.as_ref())
            .await?;
        if exists > 0 {
            return Err(AppError::DuplicateMember(name.to_string()));
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            "Member name must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}
