//! End-to-end pipeline tests over an in-memory connector.
//!
//! These drive the full sequence (authenticate → resolve → fetch → group →
//! render → delete) exactly as the binary does, with a mock connector and a
//! pinned clock so results are deterministic.

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};

use teletolo::prelude::*;

/// In-memory connector: serves a fixed batch, echoes downloads, records
/// deletions.
struct MockConnector {
    messages: Vec<RawMessage>,
    deleted: Mutex<Vec<i64>>,
    fail_downloads: bool,
}

impl MockConnector {
    fn with_messages(messages: Vec<RawMessage>) -> Self {
        Self {
            messages,
            deleted: Mutex::new(Vec::new()),
            fail_downloads: false,
        }
    }

    fn deleted_ids(&self) -> Vec<i64> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl Connector for MockConnector {
    async fn authenticate(&self) -> Result<()> {
        Ok(())
    }

    async fn resolve_channel(&self, channel_id: &str) -> Result<ChannelRef> {
        Ok(ChannelRef {
            id: 1,
            name: channel_id.to_string(),
        })
    }

    async fn fetch_messages(
        &self,
        _channel: &ChannelRef,
        cutoff: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<RawMessage>> {
        // Honors the fetch contract: newest-first, stop at the cutoff.
        let mut result = Vec::new();
        for msg in &self.messages {
            if msg.timestamp < cutoff || result.len() >= limit {
                break;
            }
            result.push(msg.clone());
        }
        Ok(result)
    }

    async fn download_media(&self, _media: &MediaPayload, dest_hint: &str) -> Result<PathBuf> {
        if self.fail_downloads {
            return Err(TeletoloError::Api {
                operation: "download media",
                description: "simulated transport failure".to_string(),
            });
        }
        Ok(PathBuf::from(dest_hint))
    }

    async fn delete_messages(&self, _channel: &ChannelRef, ids: &[i64]) -> Result<()> {
        self.deleted.lock().unwrap().extend_from_slice(ids);
        Ok(())
    }
}

fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

fn utc_offset() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

#[tokio::test]
async fn report_mode_prints_header_and_block_for_todays_message() {
    let now = noon(2024, 6, 15);
    let conn = MockConnector::with_messages(vec![RawMessage::new(
        1,
        now - Duration::hours(2),
        "remember the milk",
    )]);
    let cfg = Config::default().with_days_back(7);

    let summary = run_at(&conn, &cfg, now, utc_offset()).await.unwrap();

    assert_eq!(summary.stats, JournalStats { entries: 1, dates: 1 });
    let report = summary.report.unwrap();
    assert_eq!(
        report,
        "## 2024-06-15 Saturday\n    - **10:00**  remember the milk\n"
    );
}

#[tokio::test]
async fn message_older_than_window_yields_empty_run() {
    let now = noon(2024, 6, 15);
    let conn =
        MockConnector::with_messages(vec![RawMessage::new(1, now - Duration::days(30), "stale")]);
    let cfg = Config::default().with_days_back(7);

    let summary = run_at(&conn, &cfg, now, utc_offset()).await.unwrap();

    assert_eq!(summary.stats, JournalStats { entries: 0, dates: 0 });
    assert_eq!(summary.report, None);
    assert!(!summary.deleted);
    assert_eq!(
        summary.summary_line(),
        "0 messages downloaded for 0 different dates"
    );
}

#[tokio::test]
async fn geolocation_message_renders_map_with_both_coordinates() {
    let now = noon(2024, 6, 15);
    let conn = MockConnector::with_messages(vec![
        RawMessage::new(1, now - Duration::hours(1), "")
            .with_media(MediaPayload::Geo { lat: 40.0, long: -3.0 }),
    ]);

    let summary = run_at(&conn, &Config::default(), now, utc_offset())
        .await
        .unwrap();

    let report = summary.report.unwrap();
    assert!(report.contains("maps.google.com/maps?q=40.0,-3.0&"));
    assert!(report.contains(":iframe"));
}

#[tokio::test]
async fn youtube_link_preview_gets_embed_after_title_and_description() {
    let now = noon(2024, 6, 15);
    let conn = MockConnector::with_messages(vec![
        RawMessage::new(1, now - Duration::hours(1), "watch this").with_media(
            MediaPayload::WebPage(Some(LinkPreview {
                url: "https://www.youtube.com/watch?v=xyz".into(),
                title: "A Talk".into(),
                description: "Worth an hour.".into(),
            })),
        ),
    ]);

    let summary = run_at(&conn, &Config::default(), now, utc_offset())
        .await
        .unwrap();

    let report = summary.report.unwrap();
    let title_pos = report.find("[A Talk](https://www.youtube.com/watch?v=xyz)").unwrap();
    let descr_pos = report.find("Worth an hour.").unwrap();
    let embed_pos = report
        .find("{{youtube https://www.youtube.com/watch?v=xyz}}")
        .unwrap();
    assert!(title_pos < descr_pos);
    assert!(descr_pos < embed_pos);
}

#[tokio::test]
async fn append_mode_writes_dated_journal_file() {
    let dir = tempfile::tempdir().unwrap();
    let now = noon(2024, 6, 15);
    let conn = MockConnector::with_messages(vec![
        RawMessage::new(2, now - Duration::hours(1), "later note"),
        RawMessage::new(1, now - Duration::hours(3), "earlier note"),
    ]);
    let cfg = Config::default()
        .with_append_to_journal(true)
        .with_journal_folder(dir.path().to_str().unwrap());

    let summary = run_at(&conn, &cfg, now, utc_offset()).await.unwrap();

    assert_eq!(summary.stats, JournalStats { entries: 2, dates: 1 });
    assert_eq!(summary.report, None);

    let content = std::fs::read_to_string(dir.path().join("2024_06_15.md")).unwrap();
    assert_eq!(
        content,
        "\n- **09:00**  earlier note\n- **11:00**  later note"
    );
}

#[tokio::test]
async fn delete_after_download_removes_only_consumed_ids() {
    let now = noon(2024, 6, 15);
    let conn = MockConnector::with_messages(vec![
        RawMessage::new(3, now - Duration::hours(1), "kept"),
        // renders empty: skipped, must never be deleted
        RawMessage::new(2, now - Duration::hours(2), ""),
        RawMessage::new(1, now - Duration::hours(3), "also kept"),
    ]);
    let mut cfg = Config::default();
    cfg.delete_after_download = true;

    let summary = run_at(&conn, &cfg, now, utc_offset()).await.unwrap();

    assert!(summary.deleted);
    assert_eq!(conn.deleted_ids(), vec![3, 1]);
}

#[tokio::test]
async fn without_delete_flag_nothing_is_deleted() {
    let now = noon(2024, 6, 15);
    let conn = MockConnector::with_messages(vec![RawMessage::new(1, now, "note")]);

    let summary = run_at(&conn, &Config::default(), now, utc_offset())
        .await
        .unwrap();

    assert!(!summary.deleted);
    assert!(conn.deleted_ids().is_empty());
}

#[tokio::test]
async fn empty_run_never_calls_delete() {
    let now = noon(2024, 6, 15);
    let conn = MockConnector::with_messages(vec![]);
    let mut cfg = Config::default();
    cfg.delete_after_download = true;

    let summary = run_at(&conn, &cfg, now, utc_offset()).await.unwrap();

    assert!(!summary.deleted);
    assert!(conn.deleted_ids().is_empty());
}

#[tokio::test]
async fn failed_media_download_aborts_the_run() {
    let now = noon(2024, 6, 15);
    let mut conn = MockConnector::with_messages(vec![
        RawMessage::new(1, now - Duration::hours(1), "pic").with_media(MediaPayload::Photo {
            file_id: "f".into(),
            mime: "image/jpeg".into(),
        }),
    ]);
    conn.fail_downloads = true;

    let result = run_at(&conn, &Config::default(), now, utc_offset()).await;
    assert!(result.is_err());
    assert!(conn.deleted_ids().is_empty());
}

#[tokio::test]
async fn photo_message_embeds_downloaded_asset_in_report() {
    let now = noon(2024, 6, 15);
    let conn = MockConnector::with_messages(vec![
        RawMessage::new(1, Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap(), "sunset")
            .with_media(MediaPayload::Photo {
                file_id: "f".into(),
                mime: "image/jpeg".into(),
            }),
    ]);

    let summary = run_at(&conn, &Config::default(), now, utc_offset())
        .await
        .unwrap();

    let report = summary.report.unwrap();
    assert!(report.contains("sunset\n![](image_1718445600.0.jpg)"));
}

#[tokio::test]
async fn messages_spanning_days_produce_one_section_per_date() {
    let now = noon(2024, 6, 16);
    let conn = MockConnector::with_messages(vec![
        RawMessage::new(2, noon(2024, 6, 16) - Duration::hours(1), "today"),
        RawMessage::new(1, noon(2024, 6, 15), "yesterday"),
    ]);

    let summary = run_at(&conn, &Config::default(), now, utc_offset())
        .await
        .unwrap();

    assert_eq!(summary.stats, JournalStats { entries: 2, dates: 2 });
    let report = summary.report.unwrap();
    assert!(report.contains("## 2024-06-15 Saturday\n"));
    assert!(report.contains("## 2024-06-16 Sunday\n"));
}
