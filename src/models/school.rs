//! Classes, teachers and subjects

use serde::{Deserialize, Serialize};

/// Class as listed by `GET /classes`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSummary {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub students: u32,
    /// Number of subjects taught in the class
    #[serde(default)]
    pub subjects: u32,
    pub teacher: String,
}

impl ClassSummary {
    /// Case-insensitive match on class name or class teacher
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term) || self.teacher.to_lowercase().contains(&term)
    }
}

/// Body of `POST /classes`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClass {
    pub name: String,
    pub teacher: String,
    /// Subject ids
    pub subjects: Vec<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub students: Option<u32>,
}

/// Partial body of `PUT /classes/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subjects: Option<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub students: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherSummary {
    pub id: u64,
    pub name: String,
    /// Subject names
    #[serde(default)]
    pub subjects: Vec<String>,
    /// Number of classes taught
    #[serde(default)]
    pub classes: u32,
}

impl TeacherSummary {
    /// Case-insensitive match on teacher name or any subject
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self
                .subjects
                .iter()
                .any(|s| s.to_lowercase().contains(&term))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTeacher {
    pub name: String,
    pub subjects: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classes: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subjects: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectSummary {
    pub id: u64,
    pub name: String,
    /// Number of teachers
    #[serde(default)]
    pub teachers: u32,
    /// Number of classes
    #[serde(default)]
    pub classes: u32,
}

impl SubjectSummary {
    pub fn matches(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.to_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubject {
    pub name: String,
    pub teachers: u32,
    pub classes: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teachers: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classes: Option<u32>,
}
