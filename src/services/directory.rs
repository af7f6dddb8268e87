//! Classes, teachers and subjects browsing
//!
//! Three list bindings loaded together, a client-side search over whatever
//! is loaded, and class creation followed by a refresh of the class list.

use super::{ServiceError, require_filled};
use crate::api::SchoolApi;
use crate::models::{ClassSummary, NewClass, SubjectSummary, TeacherSummary};
use crate::operation::{AsyncOperation, LoadState, SettlePolicy};
use serde::de::IgnoredAny;

/// Filtered view of the directory lists
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryView {
    pub classes: LoadState<Vec<ClassSummary>>,
    pub teachers: LoadState<Vec<TeacherSummary>>,
    pub subjects: LoadState<Vec<SubjectSummary>>,
}

pub struct DirectoryService {
    classes: AsyncOperation<(), Vec<ClassSummary>>,
    teachers: AsyncOperation<(), Vec<TeacherSummary>>,
    subjects: AsyncOperation<(), Vec<SubjectSummary>>,
    class: AsyncOperation<u64, ClassSummary>,
    teacher: AsyncOperation<u64, TeacherSummary>,
    subject: AsyncOperation<u64, SubjectSummary>,
    create_class: AsyncOperation<NewClass, serde_json::Value>,
    delete_class: AsyncOperation<u64, IgnoredAny>,
}

impl DirectoryService {
    pub fn new(api: &SchoolApi, policy: SettlePolicy) -> Self {
        let classes = api.classes();
        let teachers = api.teachers();
        let subjects = api.subjects();

        Self {
            classes: AsyncOperation::bind_with_policy(
                {
                    let classes = classes.clone();
                    move |()| classes.get_all()
                },
                policy,
            ),
            teachers: AsyncOperation::bind_with_policy(
                {
                    let teachers = teachers.clone();
                    move |()| teachers.get_all()
                },
                policy,
            ),
            subjects: AsyncOperation::bind_with_policy(
                {
                    let subjects = subjects.clone();
                    move |()| subjects.get_all()
                },
                policy,
            ),
            class: AsyncOperation::bind_with_policy(
                {
                    let classes = classes.clone();
                    move |id| classes.get_by_id(id)
                },
                policy,
            ),
            teacher: AsyncOperation::bind_with_policy(move |id| teachers.get_by_id(id), policy),
            subject: AsyncOperation::bind_with_policy(move |id| subjects.get_by_id(id), policy),
            create_class: AsyncOperation::bind_with_policy(
                {
                    let classes = classes.clone();
                    move |body: NewClass| classes.create(&body)
                },
                policy,
            ),
            delete_class: AsyncOperation::bind_with_policy(move |id| classes.delete(id), policy),
        }
    }

    /// Load all three lists concurrently
    ///
    /// Every list settles into its own state; the first failure (in class,
    /// teacher, subject order) is returned.
    pub async fn load_all(&self) -> Result<(), ServiceError> {
        let (classes, teachers, subjects) = futures::join!(
            self.classes.invoke(()),
            self.teachers.invoke(()),
            self.subjects.invoke(())
        );

        let failures = [classes.err(), teachers.err(), subjects.err()];
        for err in failures.iter().flatten() {
            tracing::warn!("Error loading directory data: {}", err);
        }
        match failures.into_iter().flatten().next() {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    pub async fn refresh_classes(&self) -> Result<Vec<ClassSummary>, ServiceError> {
        Ok(self.classes.invoke(()).await?)
    }

    pub async fn class(&self, id: u64) -> Result<ClassSummary, ServiceError> {
        Ok(self.class.invoke(id).await?)
    }

    pub async fn teacher(&self, id: u64) -> Result<TeacherSummary, ServiceError> {
        Ok(self.teacher.invoke(id).await?)
    }

    pub async fn subject(&self, id: u64) -> Result<SubjectSummary, ServiceError> {
        Ok(self.subject.invoke(id).await?)
    }

    /// Create a class, then refresh the class list
    ///
    /// Name and teacher must be non-blank. A failed refresh does not undo the
    /// creation; it is logged and left in the class list's error state.
    pub async fn add_class(&self, class: NewClass) -> Result<serde_json::Value, ServiceError> {
        require_filled(&[("name", &class.name), ("teacher", &class.teacher)])?;

        let created = self.create_class.invoke(class).await?;
        tracing::info!("Class created");

        if let Err(e) = self.classes.invoke(()).await {
            tracing::warn!("Failed to refresh classes: {}", e);
        }
        Ok(created)
    }

    /// Delete a class, then refresh the class list
    pub async fn remove_class(&self, id: u64) -> Result<(), ServiceError> {
        self.delete_class.invoke(id).await?;
        tracing::info!("Class {} deleted", id);

        if let Err(e) = self.classes.invoke(()).await {
            tracing::warn!("Failed to refresh classes: {}", e);
        }
        Ok(())
    }

    /// Current lists filtered by a search term
    ///
    /// Classes match on name or teacher, teachers on name or any subject,
    /// subjects on name. Matching is case-insensitive.
    pub fn search(&self, term: &str) -> DirectoryView {
        DirectoryView {
            classes: filter(self.classes.load_state(), |c| c.matches(term)),
            teachers: filter(self.teachers.load_state(), |t| t.matches(term)),
            subjects: filter(self.subjects.load_state(), |s| s.matches(term)),
        }
    }

    pub fn classes(&self) -> &AsyncOperation<(), Vec<ClassSummary>> {
        &self.classes
    }

    pub fn teachers(&self) -> &AsyncOperation<(), Vec<TeacherSummary>> {
        &self.teachers
    }

    pub fn subjects(&self) -> &AsyncOperation<(), Vec<SubjectSummary>> {
        &self.subjects
    }

    pub fn create_class_state(&self) -> &AsyncOperation<NewClass, serde_json::Value> {
        &self.create_class
    }
}

fn filter<T>(state: LoadState<Vec<T>>, keep: impl Fn(&T) -> bool) -> LoadState<Vec<T>> {
    match state {
        LoadState::Success(items) => {
            LoadState::Success(items.into_iter().filter(|i| keep(i)).collect())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_only_touches_success() {
        let state = LoadState::Success(vec![1, 2, 3, 4]);
        assert_eq!(filter(state, |n| n % 2 == 0), LoadState::Success(vec![2, 4]));

        let state: LoadState<Vec<u8>> = LoadState::Pending;
        assert_eq!(filter(state, |_| false), LoadState::Pending);
    }
}
