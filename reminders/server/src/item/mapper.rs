//! Conversions between stored rows and the public item shape.

use super::gateway::{StoredTask, TaskPatch};
use chrono::{DateTime, Utc};
use reminders_core::{Item, ItemPatch};

/// Drops the timestamps and exposes `title` as `text`.
pub fn to_item(task: StoredTask) -> Item {
    Item {
        id: task.id,
        text: task.title,
        completed: task.completed,
    }
}

/// Turns an item patch into column changes stamped with `updated_at`.
/// Fields that are not present stay `None`.
pub fn to_patch(patch: ItemPatch, updated_at: DateTime<Utc>) -> TaskPatch {
    TaskPatch {
        title: patch.text.into_option(),
        completed: patch.completed.into_option(),
        updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn stored(id: i32, title: &str, completed: bool) -> StoredTask {
        let created_at = Utc.with_ymd_and_hms(2025, 10, 1, 9, 30, 0).unwrap();
        StoredTask {
            id,
            title: title.to_string(),
            completed,
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn can_map_stored_task_to_item() {
        let item = to_item(stored(7, "Water plants", true));

        assert_eq!(item, Item::new(7, "Water plants", true));
    }

    #[test]
    fn can_map_text_to_title() {
        let now = Utc::now();
        let patch = to_patch(ItemPatch::with_text("Renamed"), now);

        assert_eq!(patch.title.as_deref(), Some("Renamed"));
        assert_eq!(patch.completed, None);
        assert_eq!(patch.updated_at, now);
    }

    #[test]
    fn leaves_absent_fields_out_of_the_patch() {
        let patch = to_patch(ItemPatch::default(), Utc::now());

        assert_eq!(patch.title, None);
        assert_eq!(patch.completed, None);
    }

    #[test]
    fn completed_only_patch_round_trips_text() {
        let original = stored(3, "Pay rent", false);
        let updated_at = Utc.with_ymd_and_hms(2025, 10, 2, 8, 0, 0).unwrap();

        let merged = to_patch(ItemPatch::with_completed(true), updated_at).apply(original.clone());
        let item = to_item(merged.clone());

        assert_eq!(item, Item::new(3, "Pay rent", true));
        assert_eq!(merged.created_at, original.created_at);
        assert_eq!(merged.updated_at, updated_at);
    }
}
