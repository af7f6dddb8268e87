//! Typed payloads exchanged with the school management API

pub mod account;
pub mod analytics;
pub mod communication;
pub mod school;

pub use account::{Credentials, CurrentUser, Session, SettingsDocument};
pub use analytics::{AttendancePeriod, AttendancePoint, ScorePoint, SeriesPoint};
pub use communication::{Announcement, Conversation, Message, NewAnnouncement, NewMessage};
pub use school::{
    ClassSummary, ClassUpdate, NewClass, NewSubject, NewTeacher, SubjectSummary, SubjectUpdate,
    TeacherSummary, TeacherUpdate,
};
