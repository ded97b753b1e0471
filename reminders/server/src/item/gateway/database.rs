use super::{GatewayError, NewTask, StoredTask, TaskGateway, TaskPatch};
use crate::entities::*;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::*;

impl From<task::Model> for StoredTask {
    fn from(model: task::Model) -> Self {
        StoredTask {
            id: model.id,
            title: model.title,
            completed: model.completed,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

/// Gateway backed by a sea-orm connection (PostgreSQL or SQLite).
#[derive(Clone, Debug)]
pub struct DatabaseTaskGateway {
    db: DatabaseConnection,
}

impl DatabaseTaskGateway {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TaskGateway for DatabaseTaskGateway {
    #[tracing::instrument(skip(self))]
    async fn list_newest_first(&self) -> Result<Vec<StoredTask>, GatewayError> {
        let tasks = task::Entity::find()
            .order_by_desc(task::Column::CreatedAt)
            .order_by_desc(task::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(StoredTask::from)
            .collect();
        Ok(tasks)
    }

    #[tracing::instrument(skip(self))]
    async fn insert(&self, new_task: NewTask) -> Result<StoredTask, GatewayError> {
        let now = Utc::now().fixed_offset();
        let active_model = task::ActiveModel {
            title: ActiveValue::Set(new_task.title),
            completed: ActiveValue::Set(new_task.completed),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };
        let created_model = active_model.insert(&self.db).await?;
        Ok(StoredTask::from(created_model))
    }

    #[tracing::instrument(skip(self))]
    async fn update(&self, id: i32, patch: TaskPatch) -> Result<Option<StoredTask>, GatewayError> {
        let active_model = task::ActiveModel {
            id: ActiveValue::Unchanged(id),
            title: patch.title.map_or(ActiveValue::NotSet, ActiveValue::Set),
            completed: patch.completed.map_or(ActiveValue::NotSet, ActiveValue::Set),
            updated_at: ActiveValue::Set(patch.updated_at.fixed_offset()),
            ..Default::default()
        };
        match active_model.update(&self.db).await {
            Ok(updated_model) => Ok(Some(StoredTask::from(updated_model))),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: i32) -> Result<(), GatewayError> {
        let result = task::Entity::delete_by_id(id).exec(&self.db).await?;
        tracing::debug!("Deleted {} row(s) for task {}", result.rows_affected, id);
        Ok(())
    }
}
