use super::*;
use super::types::flag;
use crate::model::{Announcement, AnnouncementSet, MaintenanceResult, UpdateCheck};

const NO_FIELDS: &[(&str, String)] = &[];

/// Result of the last update check, as far as the console can tell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateState {
    Unknown,
    UpToDate(String),
    /// An update exists; the next check applies it.
    Available(String),
    Failed(String),
}

/// Two-phase software update: the first check reports whether an update is
/// available, the follow-up check asks the backend to apply it.
#[derive(Debug)]
pub struct UpdateChecker {
    apply_next: bool,
    state: UpdateState,
}

impl Default for UpdateChecker {
    fn default() -> Self {
        Self {
            apply_next: false,
            state: UpdateState::Unknown,
        }
    }
}

impl UpdateChecker {
    pub fn state(&self) -> &UpdateState {
        &self.state
    }

    pub fn will_apply(&self) -> bool {
        self.apply_next
    }

    pub fn record(&mut self, result: Result<UpdateCheck, ConsoleError>) -> &UpdateState {
        self.state = match result {
            Ok(check) => match check.success {
                1 => {
                    self.apply_next = false;
                    UpdateState::UpToDate(check.message)
                }
                2 => {
                    self.apply_next = true;
                    UpdateState::Available(check.message)
                }
                _ => {
                    self.apply_next = false;
                    UpdateState::Failed(check.message)
                }
            },
            Err(err) => {
                self.apply_next = false;
                tracing::warn!(error = %err, "update check failed");
                UpdateState::Failed("Connection error".to_string())
            }
        };
        &self.state
    }
}

impl BackendClient {
    pub async fn check_update(&self, apply: bool) -> Result<UpdateCheck, ConsoleError> {
        self.post_form(
            "update check",
            "/git",
            &[("update", flag(apply))],
            self.timeouts.update(),
        )
        .await
    }

    pub async fn maintenance(&self, file: &UploadFile) -> Result<MaintenanceResult, ConsoleError> {
        self.post_multipart("maintenance", "/maintenance", file.form(), self.timeouts.upload())
            .await
    }

    pub async fn announcement(&self) -> Result<Announcement, ConsoleError> {
        self.post_form("announcement", "/announce", NO_FIELDS, self.timeouts.announce())
            .await
    }

    pub async fn save_announcement(
        &self,
        set: &AnnouncementSet,
    ) -> Result<Announcement, ConsoleError> {
        let form = [
            ("present_publish", flag(set.present.publish)),
            ("present", set.present.text.clone()),
            ("following_publish", flag(set.following.publish)),
            ("following", set.following.text.clone()),
        ];
        self.post_form("save announcement", "/announce", &form, self.timeouts.announce())
            .await
    }
}

#[cfg(test)]
#[path = "../tests/remote/system_tests.rs"]
mod tests;
