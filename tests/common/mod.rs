//! Shared test helpers: an in-memory transport and sample payloads

#![allow(dead_code)]

use async_trait::async_trait;
use schoolboard::api::{ApiRequest, Transport};
use schoolboard::{RawResponse, SchoolApi, TransportFault};
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

type Reply = Result<RawResponse, TransportFault>;

/// Transport answering from a table of canned replies
///
/// Routes are keyed by "METHOD /path". When several replies are queued for a
/// route they are handed out in order; the last one repeats. Unknown routes
/// answer 404.
#[derive(Default)]
pub struct FixtureTransport {
    routes: Mutex<HashMap<String, VecDeque<Reply>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FixtureTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, route: &str, reply: Reply) {
        self.routes
            .lock()
            .unwrap()
            .entry(route.to_string())
            .or_default()
            .push_back(reply);
    }

    pub fn ok(&self, route: &str, body: Value) {
        self.reply(route, Ok(RawResponse::json(200, "OK", &body)));
    }

    pub fn status(&self, route: &str, status: u16, status_text: &str) {
        self.reply(route, Ok(RawResponse::new(status, status_text, Vec::new())));
    }

    pub fn fault(&self, route: &str, message: &str) {
        self.reply(route, Err(TransportFault::new(message)));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, route: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| format!("{} {}", r.method.as_str(), r.path) == route)
            .count()
    }
}

#[async_trait]
impl Transport for FixtureTransport {
    async fn send(&self, request: ApiRequest) -> Reply {
        let key = format!("{} {}", request.method.as_str(), request.path);
        self.requests.lock().unwrap().push(request);

        let mut routes = self.routes.lock().unwrap();
        match routes.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap(),
            None => Ok(RawResponse::new(404, "Not Found", Vec::new())),
        }
    }
}

pub fn api(transport: &Arc<FixtureTransport>) -> SchoolApi {
    SchoolApi::new(transport.clone())
}

pub fn sample_classes() -> Value {
    json!([
        { "id": 1, "name": "Class 1-A", "students": 32, "subjects": 6, "teacher": "Ms. Johnson" },
        { "id": 2, "name": "Class 2-B", "students": 28, "subjects": 7, "teacher": "Mr. Smith" },
        { "id": 3, "name": "Class 3-C", "students": 35, "subjects": 8, "teacher": "Mrs. Davis" },
        { "id": 4, "name": "Class 4-A", "students": 30, "subjects": 9, "teacher": "Mr. Wilson" },
        { "id": 5, "name": "Class 5-B", "students": 33, "subjects": 9, "teacher": "Ms. Brown" },
        { "id": 6, "name": "Class 6-C", "students": 29, "subjects": 10, "teacher": "Mr. Taylor" }
    ])
}

pub fn sample_teachers() -> Value {
    json!([
        { "id": 1, "name": "Sarah Johnson", "subjects": ["Mathematics", "Science"], "classes": 2 },
        { "id": 2, "name": "Robert Smith", "subjects": ["English", "History"], "classes": 3 },
        { "id": 3, "name": "Laura Davis", "subjects": ["Science", "Geography"], "classes": 2 },
        { "id": 4, "name": "Michael Wilson", "subjects": ["Physical Education", "Health"], "classes": 4 },
        { "id": 5, "name": "Jennifer Brown", "subjects": ["Art", "Music"], "classes": 5 },
        { "id": 6, "name": "Thomas Taylor", "subjects": ["Computer Science", "Mathematics"], "classes": 2 }
    ])
}

pub fn sample_subjects() -> Value {
    json!([
        { "id": 1, "name": "Mathematics", "teachers": 3, "classes": 6 },
        { "id": 2, "name": "Science", "teachers": 2, "classes": 5 },
        { "id": 3, "name": "English", "teachers": 2, "classes": 6 },
        { "id": 4, "name": "History", "teachers": 1, "classes": 4 },
        { "id": 5, "name": "Geography", "teachers": 1, "classes": 3 },
        { "id": 6, "name": "Physical Education", "teachers": 2, "classes": 6 },
        { "id": 7, "name": "Art", "teachers": 1, "classes": 5 },
        { "id": 8, "name": "Music", "teachers": 1, "classes": 4 },
        { "id": 9, "name": "Computer Science", "teachers": 1, "classes": 3 }
    ])
}

pub fn sample_announcements() -> Value {
    json!([
        {
            "id": 1,
            "title": "Annual Sports Day",
            "content": "The annual sports day will be held on April 22nd.",
            "sender": "Principal",
            "date": "Apr 10",
            "target": "All"
        },
        {
            "id": 2,
            "title": "Parent Teacher Meeting",
            "content": "PTM will be conducted on April 15th from 2:00 PM to 5:00 PM.",
            "sender": "Vice Principal",
            "date": "Apr 8",
            "target": "Parents"
        }
    ])
}

pub fn sample_attendance() -> Value {
    json!([
        { "name": "Mon", "students": 95, "teachers": 100 },
        { "name": "Tue", "students": 92, "teachers": 98 },
        { "name": "Wed", "students": 90, "teachers": 100 },
        { "name": "Thu", "students": 93, "teachers": 97 },
        { "name": "Fri", "students": 88, "teachers": 99 }
    ])
}

pub fn sample_performance() -> Value {
    json!([
        { "name": "Class 1", "score": 85 },
        { "name": "Class 2", "score": 78 },
        { "name": "Class 3", "score": 92 }
    ])
}
