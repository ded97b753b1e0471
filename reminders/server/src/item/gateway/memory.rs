use super::{GatewayError, NewTask, StoredTask, TaskGateway, TaskPatch};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

#[derive(Debug)]
struct MemoryTable {
    rows: Vec<StoredTask>,
    next_id: i32,
}

/// Gateway keeping rows in process memory. Contents are lost on restart.
#[derive(Debug)]
pub struct MemoryTaskGateway {
    table: Mutex<MemoryTable>,
}

impl Default for MemoryTaskGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTaskGateway {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(MemoryTable {
                rows: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

#[async_trait]
impl TaskGateway for MemoryTaskGateway {
    async fn list_newest_first(&self) -> Result<Vec<StoredTask>, GatewayError> {
        let table = self.table.lock().await;
        let mut rows = table.rows.clone();
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(rows)
    }

    async fn insert(&self, new_task: NewTask) -> Result<StoredTask, GatewayError> {
        let mut table = self.table.lock().await;
        let now = Utc::now();
        let row = StoredTask {
            id: table.next_id,
            title: new_task.title,
            completed: new_task.completed,
            created_at: now,
            updated_at: now,
        };
        table.next_id += 1;
        table.rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, patch: TaskPatch) -> Result<Option<StoredTask>, GatewayError> {
        let mut table = self.table.lock().await;
        let Some(row) = table.rows.iter_mut().find(|row| row.id == id) else {
            return Ok(None);
        };
        *row = patch.apply(row.clone());
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i32) -> Result<(), GatewayError> {
        let mut table = self.table.lock().await;
        table.rows.retain(|row| row.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_task(title: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            completed: false,
        }
    }

    fn completed_patch(completed: bool) -> TaskPatch {
        TaskPatch {
            title: None,
            completed: Some(completed),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn can_list_newest_first() {
        let gateway = MemoryTaskGateway::new();
        gateway.insert(new_task("A")).await.unwrap();
        gateway.insert(new_task("B")).await.unwrap();
        gateway.insert(new_task("C")).await.unwrap();

        let titles: Vec<String> = gateway
            .list_newest_first()
            .await
            .unwrap()
            .into_iter()
            .map(|row| row.title)
            .collect();

        assert_eq!(titles, vec!["C", "B", "A"]);
    }

    #[tokio::test]
    async fn assigns_increasing_ids() {
        let gateway = MemoryTaskGateway::new();
        let first = gateway.insert(new_task("A")).await.unwrap();
        let second = gateway.insert(new_task("B")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn update_of_missing_row_reports_none() {
        let gateway = MemoryTaskGateway::new();

        let result = gateway.update(42, completed_patch(true)).await.unwrap();

        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn update_keeps_created_at() {
        let gateway = MemoryTaskGateway::new();
        let created = gateway.insert(new_task("A")).await.unwrap();

        let updated = gateway
            .update(created.id, completed_patch(true))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.completed);
        assert_eq!(updated.title, "A");
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let gateway = MemoryTaskGateway::new();
        let created = gateway.insert(new_task("A")).await.unwrap();

        gateway.delete(created.id).await.unwrap();
        gateway.delete(created.id).await.unwrap();

        assert!(gateway.list_newest_first().await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_updates_leave_a_whole_record() {
        let gateway = Arc::new(MemoryTaskGateway::new());
        let created = gateway.insert(new_task("Race")).await.unwrap();

        let first = {
            let gateway = gateway.clone();
            tokio::spawn(async move { gateway.update(created.id, completed_patch(true)).await })
        };
        let second = {
            let gateway = gateway.clone();
            tokio::spawn(async move { gateway.update(created.id, completed_patch(false)).await })
        };
        let first = first.await.unwrap().unwrap().unwrap();
        let second = second.await.unwrap().unwrap().unwrap();

        let rows = gateway.list_newest_first().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Race");
        assert_eq!(rows[0].id, created.id);
        // Whichever write landed last is what remains.
        assert!(rows[0] == first || rows[0] == second);
    }
}
