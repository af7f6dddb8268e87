//! REST client for the school management API
//!
//! Every endpoint method returns a `'static` [`ResponseFuture`], so it can be
//! handed straight to [`AsyncOperation::bind`](crate::operation::AsyncOperation::bind).

use super::transport::{ApiRequest, Method, Transport};
use crate::models::{
    AttendancePeriod, ClassUpdate, Credentials, NewAnnouncement, NewClass, NewMessage,
    NewSubject, NewTeacher, SettingsDocument, SubjectUpdate, TeacherUpdate,
};
use crate::operation::{ResponseFuture, TransportFault};
use futures::FutureExt;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;

/// Entry point to all endpoint groups
#[derive(Clone)]
pub struct SchoolApi {
    transport: Arc<dyn Transport>,
}

impl SchoolApi {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Send a prepared request
    pub fn send(&self, request: ApiRequest) -> ResponseFuture {
        let transport = Arc::clone(&self.transport);
        async move { transport.send(request).await }.boxed()
    }

    fn send_json<B: Serialize>(&self, method: Method, path: String, body: &B) -> ResponseFuture {
        match serde_json::to_value(body) {
            Ok(value) => self.send(ApiRequest::new(method, path).with_body(value)),
            Err(e) => futures::future::ready(Err(TransportFault::new(format!(
                "Failed to encode request body for {}: {}",
                path, e
            ))))
            .boxed(),
        }
    }

    pub fn auth(&self) -> AuthApi {
        AuthApi { api: self.clone() }
    }

    pub fn classes(&self) -> ClassesApi {
        CollectionApi::new(self.clone(), "/classes")
    }

    pub fn teachers(&self) -> TeachersApi {
        CollectionApi::new(self.clone(), "/teachers")
    }

    pub fn subjects(&self) -> SubjectsApi {
        CollectionApi::new(self.clone(), "/subjects")
    }

    pub fn communication(&self) -> CommunicationApi {
        CommunicationApi { api: self.clone() }
    }

    pub fn analytics(&self) -> AnalyticsApi {
        AnalyticsApi { api: self.clone() }
    }

    pub fn settings(&self) -> SettingsApi {
        SettingsApi { api: self.clone() }
    }
}

/// Authentication endpoints
#[derive(Clone)]
pub struct AuthApi {
    api: SchoolApi,
}

impl AuthApi {
    pub fn login(&self, credentials: &Credentials) -> ResponseFuture {
        self.api
            .send_json(Method::Post, "/auth/login".to_string(), credentials)
    }

    pub fn logout(&self) -> ResponseFuture {
        self.api.send(ApiRequest::post("/auth/logout"))
    }

    pub fn current_user(&self) -> ResponseFuture {
        self.api.send(ApiRequest::get("/auth/me"))
    }
}

/// CRUD endpoints of one collection (`/classes`, `/teachers`, `/subjects`)
///
/// `N` is the creation body and `U` the partial update body.
pub struct CollectionApi<N, U> {
    api: SchoolApi,
    path: &'static str,
    _bodies: PhantomData<fn() -> (N, U)>,
}

pub type ClassesApi = CollectionApi<NewClass, ClassUpdate>;
pub type TeachersApi = CollectionApi<NewTeacher, TeacherUpdate>;
pub type SubjectsApi = CollectionApi<NewSubject, SubjectUpdate>;

impl<N, U> Clone for CollectionApi<N, U> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            path: self.path,
            _bodies: PhantomData,
        }
    }
}

impl<N: Serialize, U: Serialize> CollectionApi<N, U> {
    fn new(api: SchoolApi, path: &'static str) -> Self {
        Self {
            api,
            path,
            _bodies: PhantomData,
        }
    }

    pub fn get_all(&self) -> ResponseFuture {
        self.api.send(ApiRequest::get(self.path))
    }

    pub fn get_by_id(&self, id: u64) -> ResponseFuture {
        self.api.send(ApiRequest::get(format!("{}/{}", self.path, id)))
    }

    pub fn create(&self, body: &N) -> ResponseFuture {
        self.api
            .send_json(Method::Post, self.path.to_string(), body)
    }

    pub fn update(&self, id: u64, changes: &U) -> ResponseFuture {
        self.api
            .send_json(Method::Put, format!("{}/{}", self.path, id), changes)
    }

    pub fn delete(&self, id: u64) -> ResponseFuture {
        self.api
            .send(ApiRequest::delete(format!("{}/{}", self.path, id)))
    }
}

/// Announcements and messaging endpoints
#[derive(Clone)]
pub struct CommunicationApi {
    api: SchoolApi,
}

impl CommunicationApi {
    pub fn announcements(&self) -> ResponseFuture {
        self.api.send(ApiRequest::get("/announcements"))
    }

    pub fn create_announcement(&self, announcement: &NewAnnouncement) -> ResponseFuture {
        self.api
            .send_json(Method::Post, "/announcements".to_string(), announcement)
    }

    pub fn conversations(&self) -> ResponseFuture {
        self.api.send(ApiRequest::get("/messages/conversations"))
    }

    pub fn conversation(&self, id: u64) -> ResponseFuture {
        self.api
            .send(ApiRequest::get(format!("/messages/conversations/{}", id)))
    }

    pub fn messages(&self, conversation_id: u64) -> ResponseFuture {
        self.api.send(ApiRequest::get(format!(
            "/messages/conversations/{}/messages",
            conversation_id
        )))
    }

    pub fn send_message(&self, message: &NewMessage) -> ResponseFuture {
        self.api
            .send_json(Method::Post, "/messages".to_string(), message)
    }
}

/// Chart data endpoints
#[derive(Clone)]
pub struct AnalyticsApi {
    api: SchoolApi,
}

impl AnalyticsApi {
    pub fn performance(&self, class_id: Option<u64>) -> ResponseFuture {
        self.api
            .send(with_class_filter(
                ApiRequest::get("/analytics/performance"),
                class_id,
            ))
    }

    pub fn attendance(&self, period: AttendancePeriod) -> ResponseFuture {
        self.api.send(
            ApiRequest::get("/analytics/attendance").with_query("period", period.as_str()),
        )
    }

    pub fn subject_performance(&self) -> ResponseFuture {
        self.api
            .send(ApiRequest::get("/analytics/subjects-performance"))
    }

    pub fn class_comparison(&self) -> ResponseFuture {
        self.api.send(ApiRequest::get("/analytics/class-comparison"))
    }

    pub fn student_trends(&self, class_id: Option<u64>) -> ResponseFuture {
        self.api
            .send(with_class_filter(
                ApiRequest::get("/analytics/student-trends"),
                class_id,
            ))
    }
}

// Id 0 means "all classes", same as no filter
fn with_class_filter(request: ApiRequest, class_id: Option<u64>) -> ApiRequest {
    match class_id {
        Some(id) if id != 0 => request.with_query("classId", id),
        _ => request,
    }
}

/// General and per-user settings endpoints
#[derive(Clone)]
pub struct SettingsApi {
    api: SchoolApi,
}

impl SettingsApi {
    pub fn general(&self) -> ResponseFuture {
        self.api.send(ApiRequest::get("/settings/general"))
    }

    pub fn update_general(&self, settings: &SettingsDocument) -> ResponseFuture {
        self.api
            .send_json(Method::Put, "/settings/general".to_string(), settings)
    }

    pub fn user(&self) -> ResponseFuture {
        self.api.send(ApiRequest::get("/settings/user"))
    }

    pub fn update_user(&self, settings: &SettingsDocument) -> ResponseFuture {
        self.api
            .send_json(Method::Put, "/settings/user".to_string(), settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::MockTransport;
    use crate::operation::RawResponse;
    use mockall::predicate::eq;
    use serde_json::json;

    fn api_with(mock: MockTransport) -> SchoolApi {
        SchoolApi::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn test_get_by_id_path() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .with(eq(ApiRequest::get("/teachers/4")))
            .times(1)
            .returning(|_| Ok(RawResponse::json(200, "OK", &json!({"id": 4}))));

        let resp = api_with(mock).teachers().get_by_id(4).await.unwrap();
        assert_eq!(resp.status, 200);
    }

    #[tokio::test]
    async fn test_create_class_sends_json_body() {
        let expected = json!({"name": "Class 7-A", "teacher": "Mr. Lee", "subjects": [1, 3]});
        let mut mock = MockTransport::new();
        mock.expect_send()
            .withf(move |req| {
                req.method == Method::Post
                    && req.path == "/classes"
                    && req.body.as_ref() == Some(&expected)
            })
            .times(1)
            .returning(|_| Ok(RawResponse::json(201, "Created", &json!({"id": 7}))));

        let body = NewClass {
            name: "Class 7-A".to_string(),
            teacher: "Mr. Lee".to_string(),
            subjects: vec![1, 3],
            students: None,
        };
        let resp = api_with(mock).classes().create(&body).await.unwrap();
        assert_eq!(resp.status, 201);
    }

    #[test]
    fn test_class_filter_skips_zero() {
        let base = || ApiRequest::get("/analytics/performance");
        assert!(with_class_filter(base(), Some(0)).query.is_empty());
        assert!(with_class_filter(base(), None).query.is_empty());
        assert_eq!(
            with_class_filter(base(), Some(4)).query,
            vec![("classId".to_string(), "4".to_string())]
        );
    }

    #[tokio::test]
    async fn test_analytics_query_parameters() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .withf(|req| {
                req.path == "/analytics/performance"
                    && req.query == vec![("classId".to_string(), "3".to_string())]
            })
            .times(1)
            .returning(|_| Ok(RawResponse::json(200, "OK", &json!([]))));
        mock.expect_send()
            .withf(|req| req.path == "/analytics/student-trends" && req.query.is_empty())
            .times(1)
            .returning(|_| Ok(RawResponse::json(200, "OK", &json!([]))));
        mock.expect_send()
            .withf(|req| {
                req.path == "/analytics/attendance"
                    && req.query == vec![("period".to_string(), "month".to_string())]
            })
            .times(1)
            .returning(|_| Ok(RawResponse::json(200, "OK", &json!([]))));

        let analytics = api_with(mock).analytics();
        analytics.performance(Some(3)).await.unwrap();
        analytics.student_trends(None).await.unwrap();
        analytics
            .attendance(AttendancePeriod::Month)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_transport_fault_passes_through() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .returning(|_| Err(TransportFault::new("network down")));

        let err = api_with(mock).auth().current_user().await.unwrap_err();
        assert_eq!(err.message(), "network down");
    }

    #[tokio::test]
    async fn test_message_endpoints() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .with(eq(ApiRequest::get("/messages/conversations/2/messages")))
            .times(1)
            .returning(|_| Ok(RawResponse::json(200, "OK", &json!([]))));
        mock.expect_send()
            .withf(|req| req.method == Method::Post && req.path == "/messages")
            .times(1)
            .returning(|_| Ok(RawResponse::json(201, "Created", &json!({}))));

        let comms = api_with(mock).communication();
        comms.messages(2).await.unwrap();
        comms
            .send_message(&NewMessage {
                conversation_id: 2,
                content: "See you at 9".to_string(),
                sender_id: 1,
            })
            .await
            .unwrap();
    }
}
