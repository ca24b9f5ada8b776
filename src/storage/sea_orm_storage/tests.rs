//! 存储层集成测试（内存 SQLite）

use std::sync::Arc;

use super::SeaOrmStorage;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::events::entities::{Event, EventStatus};
use crate::models::events::requests::{CreateEventRequest, UpdateEventRequest};
use crate::models::feedback::entities::Tone;
use crate::models::profiles::entities::ProfileRole;
use crate::models::profiles::requests::CreateProfileRequest;
use crate::storage::Storage;

async fn new_storage() -> SeaOrmStorage {
    SeaOrmStorage::new_in_memory()
        .await
        .expect("failed to create in-memory storage")
}

/// 准备一个教师 + 课程 + open 活动
async fn seed_event(storage: &SeaOrmStorage) -> Event {
    let profile = storage
        .create_profile(CreateProfileRequest {
            username: "teacher01".to_string(),
            email: "teacher01@example.com".to_string(),
            password: "argon2-hash-placeholder".to_string(),
            role: ProfileRole::Teacher,
            display_name: Some("Teacher One".to_string()),
            department: Some("Mathematics".to_string()),
        })
        .await
        .expect("create profile");

    let course = storage
        .create_course(CreateCourseRequest {
            teacher_id: Some(profile.id),
            name: "Linear Algebra".to_string(),
            description: None,
            semester: Some("2025S1".to_string()),
        })
        .await
        .expect("create course");

    storage
        .create_event(CreateEventRequest {
            course_id: course.id,
            event_date: chrono::Utc::now(),
        })
        .await
        .expect("create event")
}

fn assert_counters(event: &Event, positive: i32, negative: i32, neutral: i32, total: i32) {
    assert_eq!(event.positive_feedback_count, positive);
    assert_eq!(event.negative_feedback_count, negative);
    assert_eq!(event.neutral_feedback_count, neutral);
    assert_eq!(event.total_feedback_count, total);
    // 不变式：总数恒等于三个分量之和
    assert_eq!(
        event.total_feedback_count,
        event.positive_feedback_count
            + event.negative_feedback_count
            + event.neutral_feedback_count
    );
}

#[tokio::test]
async fn test_new_event_counters_start_at_zero() {
    let storage = new_storage().await;
    let event = seed_event(&storage).await;

    assert_counters(&event, 0, 0, 0, 0);
    assert_eq!(event.status, EventStatus::Open);
    assert_eq!(event.entry_code.len(), 4);
    assert!(
        event
            .entry_code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    );
}

#[tokio::test]
async fn test_submission_and_deletion_scenario() {
    let storage = new_storage().await;
    let event = seed_event(&storage).await;

    // 第一条正面反馈
    let first = storage
        .create_feedback(event.id, "Great lecture!", Tone::Positive)
        .await
        .expect("submit positive feedback");
    assert_eq!(first.event_id, event.id);
    assert_eq!(first.tone, Tone::Positive);
    assert!(!first.is_reviewed);

    let after_first = storage.get_event_by_id(event.id).await.unwrap().unwrap();
    assert_counters(&after_first, 1, 0, 0, 1);

    // 第二条负面反馈
    storage
        .create_feedback(event.id, "Confusing assignment", Tone::Negative)
        .await
        .expect("submit negative feedback");

    let after_second = storage.get_event_by_id(event.id).await.unwrap().unwrap();
    assert_counters(&after_second, 1, 1, 0, 2);

    // 删除第一条
    let deleted = storage.delete_feedback(first.id).await.unwrap();
    assert!(deleted);

    let after_delete = storage.get_event_by_id(event.id).await.unwrap().unwrap();
    assert_counters(&after_delete, 0, 1, 0, 1);

    // 计数与反馈行数一致
    let remaining = storage.list_event_feedback(event.id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].content, "Confusing assignment");
}

#[tokio::test]
async fn test_concurrent_submissions_no_lost_updates() {
    let storage = Arc::new(new_storage().await);
    let event = seed_event(&storage).await;

    // 10 正面 + 12 负面 + 8 中性，并发提交
    let mut tones = Vec::new();
    tones.extend(std::iter::repeat_n(Tone::Positive, 10));
    tones.extend(std::iter::repeat_n(Tone::Negative, 12));
    tones.extend(std::iter::repeat_n(Tone::Neutral, 8));

    let mut handles = Vec::new();
    for (i, tone) in tones.into_iter().enumerate() {
        let storage = storage.clone();
        let event_id = event.id;
        handles.push(tokio::spawn(async move {
            storage
                .create_feedback(event_id, &format!("feedback {i}"), tone)
                .await
                .expect("concurrent submit")
        }));
    }

    for handle in handles {
        handle.await.expect("task panicked");
    }

    let after = storage.get_event_by_id(event.id).await.unwrap().unwrap();
    assert_counters(&after, 10, 12, 8, 30);

    let rows = storage.list_event_feedback(event.id).await.unwrap();
    assert_eq!(rows.len(), 30);
}

#[tokio::test]
async fn test_double_delete_fails_without_touching_counters() {
    let storage = new_storage().await;
    let event = seed_event(&storage).await;

    let feedback = storage
        .create_feedback(event.id, "One-time feedback", Tone::Neutral)
        .await
        .unwrap();

    assert!(storage.delete_feedback(feedback.id).await.unwrap());

    let after_first_delete = storage.get_event_by_id(event.id).await.unwrap().unwrap();
    assert_counters(&after_first_delete, 0, 0, 0, 0);

    // 第二次删除同一 ID：返回 false，计数保持不变
    assert!(!storage.delete_feedback(feedback.id).await.unwrap());

    let after_second_delete = storage.get_event_by_id(event.id).await.unwrap().unwrap();
    assert_counters(&after_second_delete, 0, 0, 0, 0);
}

#[tokio::test]
async fn test_decrement_clamps_at_zero() {
    let storage = new_storage().await;
    let event = seed_event(&storage).await;

    // 对计数为 0 的活动直接递减：不报错，计数保持 0
    storage
        .decrement_event_counters(event.id, Tone::Positive)
        .await
        .expect("clamped decrement should not fail");

    let after = storage.get_event_by_id(event.id).await.unwrap().unwrap();
    assert_counters(&after, 0, 0, 0, 0);
}

#[tokio::test]
async fn test_counter_ops_on_missing_event() {
    let storage = new_storage().await;

    let increment = storage.increment_event_counters(9999, Tone::Positive).await;
    assert!(increment.is_err());

    let decrement = storage.decrement_event_counters(9999, Tone::Positive).await;
    assert!(decrement.is_err());

    let recount = storage.recount_event_counters(9999).await;
    assert!(recount.is_err());
}

#[tokio::test]
async fn test_code_resolution_scoped_to_open_events() {
    let storage = new_storage().await;
    let event = seed_event(&storage).await;
    let code = event.entry_code.clone();

    // open 状态可解析
    let resolved = storage.get_open_event_by_code(&code).await.unwrap();
    assert_eq!(resolved.map(|e| e.id), Some(event.id));

    // 关闭后同一码不再解析
    storage
        .update_event(
            event.id,
            UpdateEventRequest {
                event_date: None,
                status: Some(EventStatus::Closed),
            },
        )
        .await
        .unwrap();

    assert!(
        storage
            .get_open_event_by_code(&code)
            .await
            .unwrap()
            .is_none()
    );

    // 完全不存在的码
    assert!(
        storage
            .get_open_event_by_code("ZZZZ")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_recount_corrects_drift() {
    let storage = new_storage().await;
    let event = seed_event(&storage).await;

    storage
        .create_feedback(event.id, "Helpful examples", Tone::Positive)
        .await
        .unwrap();
    storage
        .create_feedback(event.id, "Too fast", Tone::Negative)
        .await
        .unwrap();

    // 人为制造漂移：多递增一次
    storage
        .increment_event_counters(event.id, Tone::Neutral)
        .await
        .unwrap();

    let drifted = storage.get_event_by_id(event.id).await.unwrap().unwrap();
    assert_eq!(drifted.total_feedback_count, 3);

    // 对账后计数回到与反馈行一致
    let corrected = storage.recount_event_counters(event.id).await.unwrap();
    assert_eq!(corrected.positive_feedback_count, 1);
    assert_eq!(corrected.negative_feedback_count, 1);
    assert_eq!(corrected.neutral_feedback_count, 0);
    assert_eq!(corrected.total_feedback_count, 2);

    let after = storage.get_event_by_id(event.id).await.unwrap().unwrap();
    assert_counters(&after, 1, 1, 0, 2);
}

#[tokio::test]
async fn test_reset_entry_code() {
    let storage = new_storage().await;
    let event = seed_event(&storage).await;
    let old_code = event.entry_code.clone();

    let updated = storage
        .reset_entry_code(event.id)
        .await
        .unwrap()
        .expect("event exists");

    assert_eq!(updated.entry_code.len(), 4);
    // 旧码失效，新码可解析（同码重抽的概率为 1/36^4，忽略）
    assert_ne!(updated.entry_code, old_code);
    assert!(
        storage
            .get_open_event_by_code(&old_code)
            .await
            .unwrap()
            .is_none()
    );
    assert_eq!(
        storage
            .get_open_event_by_code(&updated.entry_code)
            .await
            .unwrap()
            .map(|e| e.id),
        Some(event.id)
    );
}

#[tokio::test]
async fn test_event_status_transitions_persist() {
    let storage = new_storage().await;
    let event = seed_event(&storage).await;

    let closed = storage
        .update_event(
            event.id,
            UpdateEventRequest {
                event_date: None,
                status: Some(EventStatus::Closed),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(closed.status, EventStatus::Closed);

    let archived = storage
        .update_event(
            event.id,
            UpdateEventRequest {
                event_date: None,
                status: Some(EventStatus::Archived),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(archived.status, EventStatus::Archived);
}

#[tokio::test]
async fn test_delete_event_cascades_feedback() {
    let storage = new_storage().await;
    let event = seed_event(&storage).await;

    let feedback = storage
        .create_feedback(event.id, "Will be cascaded", Tone::Neutral)
        .await
        .unwrap();

    assert!(storage.delete_event(event.id).await.unwrap());

    // 活动与其反馈一并消失
    assert!(storage.get_event_by_id(event.id).await.unwrap().is_none());
    assert!(
        storage
            .get_feedback_by_id(feedback.id)
            .await
            .unwrap()
            .is_none()
    );
}
