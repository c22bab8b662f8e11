use super::*;
use crate::model::{CarouselReport, CommitAck, ServiceInfo, ServiceReport, SystemReport};

const NO_FIELDS: &[(&str, String)] = &[];

/// Shape of an EPG export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    /// XMLTV of one service.
    Xml,
    /// CSV of one service.
    Csv,
    /// XMLTV of every service.
    All,
}

impl ExportFormat {
    pub fn parse(word: &str) -> Result<Self, ConsoleError> {
        match word.to_ascii_lowercase().as_str() {
            "xml" => Ok(ExportFormat::Xml),
            "csv" => Ok(ExportFormat::Csv),
            "all" => Ok(ExportFormat::All),
            other => Err(ConsoleError::invalid(format!(
                "unknown export format {:?} (xml, csv or all)",
                other
            ))),
        }
    }

    /// Whether the export is tied to one service.
    pub fn needs_channel(self) -> bool {
        self != ExportFormat::All
    }

    /// File name the backend serves the export under.
    pub fn file_name(self, channel_id: &str) -> String {
        match self {
            ExportFormat::Xml => format!("{}.xml", channel_id),
            ExportFormat::Csv => format!("{}.csv", channel_id),
            ExportFormat::All => "all.xml".to_string(),
        }
    }
}

impl BackendClient {
    pub async fn service_report(&self) -> Result<ServiceReport, ConsoleError> {
        self.post_form("poll services", "/ebudget", NO_FIELDS, self.timeouts.services())
            .await
    }

    pub async fn carousel_report(&self) -> Result<CarouselReport, ConsoleError> {
        self.post_form("poll carousel", "/carousel", NO_FIELDS, self.timeouts.carousel())
            .await
    }

    pub async fn system_report(&self) -> Result<SystemReport, ConsoleError> {
        self.post_form("poll system", "/status", NO_FIELDS, self.timeouts.system())
            .await
    }

    /// Detail lookup for one service. This request is session-bearing: a
    /// transport failure here means the console session should be reset.
    pub async fn service_info(&self, id: &str) -> Result<ServiceInfo, ConsoleError> {
        self.post_form(
            "service info",
            "/service/info",
            &[("id", id.to_string())],
            self.timeouts.detail(),
        )
        .await
    }

    /// Push a data file directly into one service's import queue.
    pub async fn ingest_service_data(
        &self,
        id: &str,
        file: &UploadFile,
    ) -> Result<CommitAck, ConsoleError> {
        let form = file.form().text("id", id.to_string());
        self.post_multipart("service ingest", "/service/ingest", form, self.timeouts.upload())
            .await
    }

    /// Programme guide export. `channel_id` is ignored for [`ExportFormat::All`].
    pub async fn export_epg(
        &self,
        format: ExportFormat,
        channel_id: &str,
    ) -> Result<Vec<u8>, ConsoleError> {
        if format.needs_channel() && channel_id.trim().is_empty() {
            return Err(ConsoleError::invalid("export needs a service channel id"));
        }
        let path = format!("/export/{}", format.file_name(channel_id.trim()));
        self.get_bytes("epg export", &path, self.timeouts.browse())
            .await
    }
}

#[cfg(test)]
#[path = "../tests/remote/dashboards_tests.rs"]
mod tests;
