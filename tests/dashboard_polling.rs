mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use epg_console::error::ConsoleError;
use epg_console::layout::GridLayout;
use epg_console::model::{Entry, EntryId, OverallState, StatusReport};
use epg_console::poll::PollingController;
use epg_console::reconcile::{PanelSurface, ReconcileOutcome, ReportReconciler};
use epg_console::remote::BackendClient;

/// Surface that only remembers what it was asked to draw.
#[derive(Default)]
struct Recorder {
    cells: Vec<EntryId>,
    patched: Vec<String>,
    banner: Option<(OverallState, String)>,
    header: Option<OverallState>,
}

impl PanelSurface for Recorder {
    type Handle = usize;

    fn clear(&mut self) {
        self.cells.clear();
        self.header = None;
    }

    fn begin_grid(&mut self, layout: &GridLayout) {
        self.cells = Vec::with_capacity(layout.len());
    }

    fn create_cell(&mut self, _column: usize, _row: usize, id: &EntryId) -> usize {
        self.cells.push(id.clone());
        self.cells.len() - 1
    }

    fn patch_cell(&mut self, handle: &usize, entry: &Entry) {
        self.patched.push(format!("{}:{}", handle, entry.id));
    }

    fn set_header(&mut self, overall: OverallState, _timestamp: &str) {
        self.header = Some(overall);
    }

    fn show_banner(&mut self, overall: OverallState, message: &str) {
        self.banner = Some((overall, message.to_string()));
    }

    fn clear_banner(&mut self) {
        self.banner = None;
    }
}

fn services_poller(client: &BackendClient, timeout: Duration) -> PollingController<StatusReport> {
    let client = client.clone();
    PollingController::new(
        "services",
        tokio::runtime::Handle::current(),
        timeout,
        move || {
            let client = client.clone();
            async move {
                client
                    .service_report()
                    .await
                    .map(|r| r.into_status_report())
            }
        },
    )
}

async fn next_result<T: Send + 'static>(
    poller: &mut PollingController<T>,
) -> Result<T, ConsoleError> {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(result) = poller.tick(Instant::now()) {
            return result;
        }
        assert!(Instant::now() < deadline, "{} poll never completed", poller.name());
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

async fn poll_once(
    poller: &mut PollingController<StatusReport>,
    panel: &mut ReportReconciler<Recorder>,
) -> Result<ReconcileOutcome> {
    assert!(poller.refresh());
    let report = next_result(poller).await?;
    Ok(panel.on_report(&report))
}

#[test]
fn cardinality_change_rebuilds_and_steady_state_patches() -> Result<()> {
    let stub = common::spawn_stub()?;
    let client = stub.client()?;
    let rt = common::runtime()?;

    rt.block_on(async {
        let mut poller = services_poller(&client, Duration::from_secs(2));
        let mut panel = ReportReconciler::new(Recorder::default(), 6);

        assert_eq!(poll_once(&mut poller, &mut panel).await?, ReconcileOutcome::Rebuilt);
        assert_eq!(panel.layout().column_heights(), vec![2, 2, 1, 1, 1, 1]);
        assert_eq!(panel.surface().cells.len(), 8);
        assert_eq!(panel.surface().header, Some(OverallState::Ok));
        let first_layout = Arc::clone(panel.layout());

        assert_eq!(poll_once(&mut poller, &mut panel).await?, ReconcileOutcome::Patched);
        assert!(Arc::ptr_eq(&first_layout, panel.layout()));
        assert_eq!(panel.rebuild_count(), 1);
        assert_eq!(panel.surface().patched.len(), 16);

        stub.control(&[("count", "11")]).await?;
        assert_eq!(poll_once(&mut poller, &mut panel).await?, ReconcileOutcome::Rebuilt);
        assert_eq!(panel.rebuild_count(), 2);
        assert_eq!(panel.layout().len(), 11);
        assert_eq!(panel.layout().column_heights(), vec![2, 2, 2, 2, 2, 1]);
        assert_eq!(panel.id_at(10).map(String::as_str), Some("110"));
        assert!(panel.handle_of("110").is_some());

        stub.control(&[("count", "0")]).await?;
        assert_eq!(poll_once(&mut poller, &mut panel).await?, ReconcileOutcome::Rebuilt);
        assert!(panel.layout().is_empty());
        assert!(panel.surface().cells.is_empty());
        Ok::<(), anyhow::Error>(())
    })
}

#[test]
fn fatal_report_clears_panel_until_next_report() -> Result<()> {
    let stub = common::spawn_stub()?;
    let client = stub.client()?;
    let rt = common::runtime()?;

    rt.block_on(async {
        let mut poller = services_poller(&client, Duration::from_secs(2));
        let mut panel = ReportReconciler::new(Recorder::default(), 4);
        poll_once(&mut poller, &mut panel).await?;

        stub.control(&[("status", "3")]).await?;
        assert_eq!(poll_once(&mut poller, &mut panel).await?, ReconcileOutcome::Fatal);
        assert!(panel.surface().cells.is_empty());
        assert!(panel.layout().is_empty());
        let (severity, message) = panel.surface().banner.clone().unwrap();
        assert_eq!(severity, OverallState::Fatal);
        assert!(message.contains("database"));

        // Recovery rebuilds even though the entry count never changed.
        stub.control(&[("status", "0")]).await?;
        assert_eq!(poll_once(&mut poller, &mut panel).await?, ReconcileOutcome::Rebuilt);
        assert!(panel.surface().banner.is_none());
        assert_eq!(panel.surface().cells.len(), 8);
        Ok::<(), anyhow::Error>(())
    })
}

#[test]
fn slow_backend_times_out_and_keeps_the_grid() -> Result<()> {
    let stub = common::spawn_stub()?;
    let client = stub.client()?;
    let rt = common::runtime()?;

    rt.block_on(async {
        let mut poller = services_poller(&client, Duration::from_millis(150));
        let mut panel = ReportReconciler::new(Recorder::default(), 6);
        poll_once(&mut poller, &mut panel).await?;

        stub.control(&[("delay_ms", "1000")]).await?;
        assert!(poller.refresh());
        // Single flight: nothing else goes out while the slow request runs.
        assert!(!poller.refresh());
        let err = next_result(&mut poller).await.unwrap_err();
        assert_eq!(
            err,
            ConsoleError::NetworkTimeout {
                op: "services".to_string()
            }
        );
        assert!(!poller.is_in_flight());

        panel.on_failure(&err);
        assert_eq!(panel.layout().len(), 8);
        assert_eq!(
            panel.surface().banner.as_ref().map(|b| b.0),
            Some(OverallState::Degraded)
        );

        stub.control(&[("delay_ms", "0")]).await?;
        assert_eq!(poll_once(&mut poller, &mut panel).await?, ReconcileOutcome::Patched);
        assert!(panel.surface().banner.is_none());
        Ok::<(), anyhow::Error>(())
    })
}

#[test]
fn started_poller_refreshes_on_its_own() -> Result<()> {
    let stub = common::spawn_stub()?;
    let client = stub.client()?;
    let rt = common::runtime()?;

    rt.block_on(async {
        let mut poller = services_poller(&client, Duration::from_secs(2));
        poller.start(Duration::from_millis(30), Instant::now());
        assert!(poller.is_running());

        let mut reports = 0;
        let deadline = Instant::now() + Duration::from_secs(5);
        while reports < 3 {
            if let Some(result) = poller.tick(Instant::now()) {
                result?;
                reports += 1;
            }
            assert!(Instant::now() < deadline, "poller stalled after {} reports", reports);
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        poller.stop();
        assert!(!poller.is_running());
        Ok::<(), anyhow::Error>(())
    })
}

#[test]
fn carousel_and_system_reports_parse() -> Result<()> {
    let stub = common::spawn_stub()?;
    let client = stub.client()?;
    let rt = common::runtime()?;

    rt.block_on(async {
        let carousel = client.carousel_report().await?;
        assert_eq!(carousel.streams.len(), 1);
        let report = carousel.to_status_report();
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].id, "239.1.1.1:1234");
        // Stream bitrate only; nothing is playing yet.
        assert_eq!(report.entries[0].series.len(), 1);

        let system = client.system_report().await?;
        let rows = system.module_rows();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].0, "EPG");
        assert!(system.version_labels().iter().any(|v| v == "playout: -"));
        assert!(rows[3].1.detail_lines().contains(&"services:8".to_string()));
        Ok::<(), anyhow::Error>(())
    })
}
