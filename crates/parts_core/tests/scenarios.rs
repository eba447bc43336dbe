use async_trait::async_trait;
use parts_core::model::PLACEHOLDER_PART_NAME;
use parts_core::provider::oil_filter;
use parts_core::{
    Capabilities, DEFAULT_ANALYSIS_DELAY, FixedProvider, Notification, PartAnalyzerPage,
    PartIdentification, RecognitionError, RecognitionProvider, RecordId, Slot, Tab,
};
use std::fs::File;
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::runtime::Handle;

fn page(capabilities: Capabilities) -> PartAnalyzerPage {
    PartAnalyzerPage::new(
        capabilities,
        Handle::current(),
        Arc::new(FixedProvider::default()),
    )
}

async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn scenario_upload_then_identify() -> anyhow::Result<()> {
    // Given a fresh page with the two seed records
    // When the user uploads F1
    // Then F1 is shown first as "being analyzed"
    // And after 2000 ms it is identified as an oil filter
    let dir = tempfile::tempdir()?;
    let f1 = dir.path().join("f1.png");
    File::create(&f1)?.write_all(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A])?;

    let mut page = page(Capabilities::default());
    let today = chrono::Utc::now().date_naive();
    let t1 = page.upload_file(&f1)?;

    let history = page.session().history();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].id, t1);
    assert_eq!(history[0].part_name, PLACEHOLDER_PART_NAME);
    assert_eq!(history[0].date, today);
    assert!(history[0].image.starts_with("data:image/png;base64,"));
    assert_eq!(history[1].id, RecordId::new("1"));
    assert_eq!(history[2].id, RecordId::new("2"));

    settle().await;
    tokio::time::advance(DEFAULT_ANALYSIS_DELAY - Duration::from_millis(1)).await;
    settle().await;
    assert!(page.poll().is_empty(), "no notification before the delay");

    tokio::time::advance(Duration::from_millis(1)).await;
    settle().await;
    let notes = page.poll();
    assert_eq!(notes, vec![Notification::analysis_complete()]);
    assert!(page.poll().is_empty(), "notification fires once");

    let first = &page.session().history()[0];
    assert_eq!(first.part_name, "Масляный фильтр");
    assert_eq!(first.part_number, "OF-4521-MNN");
    assert_eq!(first.compatibility.len(), 3);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn scenario_two_uploads_keep_insertion_order() {
    let mut page = page(Capabilities::default());
    let a = page.upload_bytes(b"photo a", Some("image/jpeg"));
    assert_eq!(page.session().history()[0].id, a);
    let b = page.upload_bytes(b"photo b", Some("image/jpeg"));
    assert_ne!(a, b);

    let order: Vec<_> = page.session().history()[..2]
        .iter()
        .map(|r| r.id.clone())
        .collect();
    assert_eq!(order, vec![b.clone(), a.clone()]);

    assert!(page.next_notification().await.is_some());
    assert!(page.next_notification().await.is_some());
    assert!(!page.is_busy());
    assert_eq!(page.session().pending(), 0);
    assert_eq!(page.session().history()[0].id, b);
    assert_eq!(page.session().history()[1].id, a);
}

#[tokio::test(start_paused = true)]
async fn scenario_unreadable_file_adds_nothing() {
    let mut page = page(Capabilities::default());
    let result = page.upload_file("/definitely/not/here.jpg");
    assert!(result.is_err());
    assert_eq!(page.session().history().len(), 2);
    assert!(!page.is_busy());
}

#[tokio::test(start_paused = true)]
async fn scenario_shutdown_before_delay_leaves_record_pending() {
    let mut page = page(Capabilities::default());
    let id = page.upload_bytes(b"photo", None);
    page.shutdown();

    tokio::time::advance(DEFAULT_ANALYSIS_DELAY * 3).await;
    settle().await;
    assert!(page.poll().is_empty());
    assert!(page.session().record(&id).unwrap().is_pending());
}

/// Counts the recognitions that ran to completion.
struct CountingProvider {
    finished: Arc<AtomicUsize>,
}

#[async_trait]
impl RecognitionProvider for CountingProvider {
    fn name(&self) -> &'static str {
        "counting"
    }

    async fn recognize(&self, _image: &[u8]) -> Result<PartIdentification, RecognitionError> {
        tokio::time::sleep(DEFAULT_ANALYSIS_DELAY).await;
        self.finished.fetch_add(1, Ordering::SeqCst);
        Ok(oil_filter())
    }
}

#[tokio::test(start_paused = true)]
async fn scenario_dropping_the_page_cancels_running_analyses() {
    let finished = Arc::new(AtomicUsize::new(0));
    let mut page = PartAnalyzerPage::new(
        Capabilities::default(),
        Handle::current(),
        Arc::new(CountingProvider {
            finished: Arc::clone(&finished),
        }),
    );
    page.upload_bytes(b"photo a", Some("image/jpeg"));
    page.upload_bytes(b"photo b", Some("image/jpeg"));
    settle().await;
    assert!(page.is_busy());

    drop(page);
    tokio::time::advance(Duration::from_secs(10)).await;
    settle().await;
    assert_eq!(finished.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn scenario_compare_panel_follows_slots() {
    let mut page = page(Capabilities::default());
    assert!(page.session_mut().select_tab(Tab::Compare));

    page.load_slot_bytes(Slot::Source, b"blue car", Some("image/jpeg"));
    assert!(page.session().comparison().is_none());
    page.load_slot_bytes(Slot::Target, b"red car", Some("image/jpeg"));
    assert!(page.session().comparison().is_some());

    assert!(page.session_mut().select_tab(Tab::History));
    assert!(page.session().comparison().is_some());
    assert_eq!(page.session().history().len(), 2);

    page.session_mut().clear_slot(Slot::Target);
    assert!(page.session().comparison().is_none());
}

#[tokio::test(start_paused = true)]
async fn scenario_reduced_variant_has_no_compare_tab() {
    let mut page = page(Capabilities {
        has_compare_tab: false,
    });
    assert_eq!(page.session().tabs(), vec![Tab::Upload, Tab::History]);
    assert!(!page.session_mut().select_tab(Tab::Compare));
}
