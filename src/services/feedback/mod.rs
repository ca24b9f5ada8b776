pub mod delete;
pub mod list;
pub mod review;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::feedback::requests::{
    FeedbackQueryParams, ReviewFeedbackRequest, SubmitFeedbackRequest,
};
pub(crate) use crate::services::events::ensure_event_access;
use crate::services::sentiment::SentimentClassifier;
use crate::storage::Storage;

pub struct FeedbackService {
    storage: Option<Arc<dyn Storage>>,
}

impl FeedbackService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_classifier(&self, request: &HttpRequest) -> Arc<dyn SentimentClassifier> {
        request
            .app_data::<actix_web::web::Data<Arc<dyn SentimentClassifier>>>()
            .expect("Sentiment classifier not found in app data")
            .get_ref()
            .clone()
    }

    // 匿名提交反馈（学生端，无需认证）
    pub async fn submit_feedback(
        &self,
        request: &HttpRequest,
        submit_data: SubmitFeedbackRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_feedback(self, request, submit_data).await
    }

    // 通过入口码查询活动公开信息（学生端，无需认证）
    pub async fn lookup_entry_code(
        &self,
        request: &HttpRequest,
        code: String,
    ) -> ActixResult<HttpResponse> {
        submit::lookup_entry_code(self, request, code).await
    }

    // 列出活动的反馈
    pub async fn list_event_feedback(
        &self,
        request: &HttpRequest,
        event_id: i64,
        query: FeedbackQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_event_feedback(self, request, event_id, query).await
    }

    // 标记反馈已读/未读
    pub async fn review_feedback(
        &self,
        request: &HttpRequest,
        feedback_id: i64,
        review_data: ReviewFeedbackRequest,
    ) -> ActixResult<HttpResponse> {
        review::review_feedback(self, request, feedback_id, review_data).await
    }

    // 删除反馈（同步递减计数器）
    pub async fn delete_feedback(
        &self,
        request: &HttpRequest,
        feedback_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_feedback(self, request, feedback_id).await
    }
}
