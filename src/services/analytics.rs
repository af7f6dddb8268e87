//! Analytics charts

use super::ServiceError;
use crate::api::SchoolApi;
use crate::models::{AttendancePeriod, AttendancePoint, ScorePoint, SeriesPoint};
use crate::operation::{AsyncOperation, LoadState, SettlePolicy};

/// Every chart of the analytics page in one snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsOverview {
    pub performance: LoadState<Vec<ScorePoint>>,
    pub attendance: LoadState<Vec<AttendancePoint>>,
    pub subject_performance: LoadState<Vec<ScorePoint>>,
    pub class_comparison: LoadState<Vec<SeriesPoint>>,
    pub student_trends: LoadState<Vec<SeriesPoint>>,
}

pub struct AnalyticsService {
    performance: AsyncOperation<Option<u64>, Vec<ScorePoint>>,
    attendance: AsyncOperation<AttendancePeriod, Vec<AttendancePoint>>,
    subject_performance: AsyncOperation<(), Vec<ScorePoint>>,
    class_comparison: AsyncOperation<(), Vec<SeriesPoint>>,
    student_trends: AsyncOperation<Option<u64>, Vec<SeriesPoint>>,
}

impl AnalyticsService {
    pub fn new(api: &SchoolApi, policy: SettlePolicy) -> Self {
        let analytics = api.analytics();

        let performance = {
            let analytics = analytics.clone();
            AsyncOperation::bind_with_policy(
                move |class_id| analytics.performance(class_id),
                policy,
            )
        };
        let attendance = {
            let analytics = analytics.clone();
            AsyncOperation::bind_with_policy(move |period| analytics.attendance(period), policy)
        };
        let subject_performance = {
            let analytics = analytics.clone();
            AsyncOperation::bind_with_policy(move |()| analytics.subject_performance(), policy)
        };
        let class_comparison = {
            let analytics = analytics.clone();
            AsyncOperation::bind_with_policy(move |()| analytics.class_comparison(), policy)
        };
        let student_trends = AsyncOperation::bind_with_policy(
            move |class_id| analytics.student_trends(class_id),
            policy,
        );

        Self {
            performance,
            attendance,
            subject_performance,
            class_comparison,
            student_trends,
        }
    }

    pub async fn performance(
        &self,
        class_id: Option<u64>,
    ) -> Result<Vec<ScorePoint>, ServiceError> {
        Ok(self.performance.invoke(class_id).await?)
    }

    pub async fn attendance(
        &self,
        period: AttendancePeriod,
    ) -> Result<Vec<AttendancePoint>, ServiceError> {
        Ok(self.attendance.invoke(period).await?)
    }

    pub async fn subject_performance(&self) -> Result<Vec<ScorePoint>, ServiceError> {
        Ok(self.subject_performance.invoke(()).await?)
    }

    pub async fn class_comparison(&self) -> Result<Vec<SeriesPoint>, ServiceError> {
        Ok(self.class_comparison.invoke(()).await?)
    }

    pub async fn student_trends(
        &self,
        class_id: Option<u64>,
    ) -> Result<Vec<SeriesPoint>, ServiceError> {
        Ok(self.student_trends.invoke(class_id).await?)
    }

    /// Load every chart concurrently and return what each one ended up with
    ///
    /// Individual failures do not abort the others; they show up as
    /// `LoadState::Failed` in the overview.
    pub async fn load_overview(
        &self,
        class_id: Option<u64>,
        period: AttendancePeriod,
    ) -> AnalyticsOverview {
        let (performance, attendance, subjects, comparison, trends) = futures::join!(
            self.performance.invoke(class_id),
            self.attendance.invoke(period),
            self.subject_performance.invoke(()),
            self.class_comparison.invoke(()),
            self.student_trends.invoke(class_id),
        );

        let failures = [
            ("performance", performance.err()),
            ("attendance", attendance.err()),
            ("subject performance", subjects.err()),
            ("class comparison", comparison.err()),
            ("student trends", trends.err()),
        ];
        for (chart, err) in failures {
            if let Some(err) = err {
                tracing::warn!("Error loading {} chart: {}", chart, err);
            }
        }
        self.overview()
    }

    pub fn overview(&self) -> AnalyticsOverview {
        AnalyticsOverview {
            performance: self.performance.load_state(),
            attendance: self.attendance.load_state(),
            subject_performance: self.subject_performance.load_state(),
            class_comparison: self.class_comparison.load_state(),
            student_trends: self.student_trends.load_state(),
        }
    }
}
