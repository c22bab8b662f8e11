mod common;

use anyhow::Result;
use epg_console::model::{AnnouncementSet, AnnouncementSlot};
use epg_console::remote::{ExportFormat, UpdateChecker, UpdateState, UploadFile};

#[test]
fn update_is_offered_then_applied() -> Result<()> {
    let stub = common::spawn_stub_with(&["--update-available"])?;
    let client = stub.client()?;
    let rt = common::runtime()?;

    rt.block_on(async {
        let mut checker = UpdateChecker::default();
        assert_eq!(checker.state(), &UpdateState::Unknown);

        let state = checker.record(client.check_update(checker.will_apply()).await);
        assert!(matches!(state, UpdateState::Available(_)));
        assert!(checker.will_apply());

        let state = checker.record(client.check_update(checker.will_apply()).await);
        assert_eq!(state, &UpdateState::UpToDate("update installed".to_string()));
        assert!(!checker.will_apply());

        let state = checker.record(client.check_update(checker.will_apply()).await);
        assert!(matches!(state, UpdateState::UpToDate(_)));
        Ok::<(), anyhow::Error>(())
    })
}

#[test]
fn unreachable_backend_marks_update_check_failed() -> Result<()> {
    let stub = common::spawn_stub()?;
    let client = stub.client()?;
    drop(stub);
    let rt = common::runtime()?;

    rt.block_on(async {
        let mut checker = UpdateChecker::default();
        let state = checker.record(client.check_update(false).await);
        assert_eq!(state, &UpdateState::Failed("Connection error".to_string()));
        Ok::<(), anyhow::Error>(())
    })
}

#[test]
fn announcements_round_trip() -> Result<()> {
    let stub = common::spawn_stub()?;
    let client = stub.client()?;
    let rt = common::runtime()?;

    rt.block_on(async {
        let initial = client.announcement().await?;
        assert!(initial.success);
        assert!(initial.announce.is_some());

        let set = AnnouncementSet {
            present: AnnouncementSlot {
                publish: true,
                text: "Live: election night".to_string(),
            },
            following: AnnouncementSlot {
                publish: false,
                text: String::new(),
            },
        };
        let saved = client.save_announcement(&set).await?;
        let saved = saved.announce.unwrap();
        assert_eq!(saved.present, set.present);
        assert_eq!(saved.following, set.following);

        let reread = client.announcement().await?.announce.unwrap();
        assert_eq!(reread.present.text, "Live: election night");
        assert!(reread.present.publish);
        Ok::<(), anyhow::Error>(())
    })
}

#[test]
fn maintenance_upload_returns_report() -> Result<()> {
    let stub = common::spawn_stub()?;
    let client = stub.client()?;
    let rt = common::runtime()?;

    rt.block_on(async {
        let ok = client
            .maintenance(&UploadFile::new("fix.tar", b"patch\n".to_vec()))
            .await?;
        assert!(ok.success);
        assert_eq!(ok.pod.as_deref(), Some("epg-0"));
        assert!(ok.content.unwrap().contains("file: fix.tar"));

        let bad = client
            .maintenance(&UploadFile::new("fix.tar", b"error: wrong pod\n".to_vec()))
            .await?;
        assert!(!bad.success);
        assert_eq!(bad.message.as_deref(), Some("wrong pod"));
        Ok::<(), anyhow::Error>(())
    })
}

#[test]
fn service_detail_and_direct_ingest() -> Result<()> {
    let stub = common::spawn_stub()?;
    let client = stub.client()?;
    let rt = common::runtime()?;

    rt.block_on(async {
        let info = client.service_info("101").await?;
        assert_eq!(info.name.as_deref(), Some("Channel 2"));
        assert_eq!(info.channel_id.as_str(), "101");
        assert_eq!(info.events.len(), 2);

        // Unknown ids come back without a name rather than as an HTTP error.
        let unknown = client.service_info("999").await?;
        assert!(unknown.name.is_none());

        let file = UploadFile::new("guide.xml", b"<tv/>\n".to_vec());
        let ack = client.ingest_service_data("101", &file).await?;
        assert!(ack.success);
        let ack = client.ingest_service_data("999", &file).await?;
        assert!(!ack.success);
        Ok::<(), anyhow::Error>(())
    })
}

#[test]
fn epg_export_per_service_and_all() -> Result<()> {
    let stub = common::spawn_stub()?;
    let client = stub.client()?;
    let rt = common::runtime()?;

    rt.block_on(async {
        let xml = String::from_utf8(client.export_epg(ExportFormat::Xml, "101").await?)?;
        assert!(xml.contains("<display-name>Channel 2</display-name>"));
        assert!(!xml.contains("Channel 3"));

        let csv = String::from_utf8(client.export_epg(ExportFormat::Csv, "101").await?)?;
        assert!(csv.starts_with("channel,start,stop,title"));
        assert!(csv.contains("101,2000,2045,News"));

        let all = String::from_utf8(client.export_epg(ExportFormat::All, "").await?)?;
        assert!(all.contains("Channel 1"));
        assert!(all.contains("Channel 8"));

        assert!(client.export_epg(ExportFormat::Xml, "999").await.is_err());
        Ok::<(), anyhow::Error>(())
    })
}
