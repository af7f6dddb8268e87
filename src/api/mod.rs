//! REST client module
//!
//! `Transport` is the seam between endpoint definitions and the network:
//! `HttpTransport` talks to the real API, tests plug in their own.

mod client;
mod transport;

pub use client::{
    AnalyticsApi, AuthApi, ClassesApi, CollectionApi, CommunicationApi, SchoolApi, SettingsApi,
    SubjectsApi, TeachersApi,
};
pub use transport::{ApiRequest, HttpTransport, Method, Transport};
