//! Authentication and settings

use super::{ServiceError, require_filled};
use crate::api::SchoolApi;
use crate::models::{Credentials, CurrentUser, Session, SettingsDocument};
use crate::operation::{AsyncOperation, SettlePolicy};
use serde::de::IgnoredAny;

pub struct AccountService {
    login: AsyncOperation<Credentials, Session>,
    logout: AsyncOperation<(), IgnoredAny>,
    current_user: AsyncOperation<(), CurrentUser>,
    general_settings: AsyncOperation<(), SettingsDocument>,
    update_general: AsyncOperation<SettingsDocument, serde_json::Value>,
    user_settings: AsyncOperation<(), SettingsDocument>,
    update_user: AsyncOperation<SettingsDocument, serde_json::Value>,
}

impl AccountService {
    pub fn new(api: &SchoolApi, policy: SettlePolicy) -> Self {
        let auth = api.auth();
        let settings = api.settings();

        Self {
            login: AsyncOperation::bind_with_policy(
                {
                    let auth = auth.clone();
                    move |creds: Credentials| auth.login(&creds)
                },
                policy,
            ),
            logout: AsyncOperation::bind_with_policy(
                {
                    let auth = auth.clone();
                    move |()| auth.logout()
                },
                policy,
            ),
            current_user: AsyncOperation::bind_with_policy(move |()| auth.current_user(), policy),
            general_settings: AsyncOperation::bind_with_policy(
                {
                    let settings = settings.clone();
                    move |()| settings.general()
                },
                policy,
            ),
            update_general: AsyncOperation::bind_with_policy(
                {
                    let settings = settings.clone();
                    move |doc: SettingsDocument| settings.update_general(&doc)
                },
                policy,
            ),
            user_settings: AsyncOperation::bind_with_policy(
                {
                    let settings = settings.clone();
                    move |()| settings.user()
                },
                policy,
            ),
            update_user: AsyncOperation::bind_with_policy(
                move |doc: SettingsDocument| settings.update_user(&doc),
                policy,
            ),
        }
    }

    pub async fn login(&self, credentials: Credentials) -> Result<Session, ServiceError> {
        require_filled(&[
            ("email", &credentials.email),
            ("password", &credentials.password),
        ])?;
        tracing::debug!("Logging in as {}", credentials.email);
        Ok(self.login.invoke(credentials).await?)
    }

    pub async fn logout(&self) -> Result<(), ServiceError> {
        self.logout.invoke(()).await?;
        Ok(())
    }

    pub async fn current_user(&self) -> Result<CurrentUser, ServiceError> {
        Ok(self.current_user.invoke(()).await?)
    }

    pub async fn general_settings(&self) -> Result<SettingsDocument, ServiceError> {
        Ok(self.general_settings.invoke(()).await?)
    }

    /// Save general settings and reload them
    pub async fn update_general_settings(
        &self,
        settings: SettingsDocument,
    ) -> Result<SettingsDocument, ServiceError> {
        self.update_general.invoke(settings).await?;
        self.general_settings().await
    }

    pub async fn user_settings(&self) -> Result<SettingsDocument, ServiceError> {
        Ok(self.user_settings.invoke(()).await?)
    }

    /// Save user settings and reload them
    pub async fn update_user_settings(
        &self,
        settings: SettingsDocument,
    ) -> Result<SettingsDocument, ServiceError> {
        self.update_user.invoke(settings).await?;
        self.user_settings().await
    }

    pub fn current_user_state(&self) -> &AsyncOperation<(), CurrentUser> {
        &self.current_user
    }
}
