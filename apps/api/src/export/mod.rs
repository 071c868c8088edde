//! Export pipeline — turns a document into a downloadable PDF artifact.
//!
//! One export runs at a time per gate; a second request while the first is
//! in flight is rejected with `ExportError::Busy` rather than queued. The
//! pre-export draft save is fired as a detached task and its failure never
//! blocks or fails the export itself.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::draft::DraftStore;
use crate::model::ResumeDocument;
use crate::render::canvas::CanvasError;
use crate::render::lopdf_canvas::LopdfCanvas;
use crate::render::pdf::{derive_filename, render_pdf};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("an export is already in progress")]
    Busy,

    #[error("render failed: {0}")]
    Render(#[from] CanvasError),

    #[error("render task failed: {0}")]
    Join(String),
}

/// A finished export: the suggested download filename and the PDF bytes.
#[derive(Debug)]
pub struct ExportArtifact {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Single-flight gate for exports. Holds no queue; callers that lose the
/// race get `None` and must retry after the current export settles.
#[derive(Default)]
pub struct ExportGate {
    busy: AtomicBool,
}

impl ExportGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the gate. The returned permit releases it on drop, so the
    /// gate reopens on both the success and the failure path.
    pub fn acquire(self: &Arc<Self>) -> Option<ExportPermit> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            Some(ExportPermit {
                gate: Arc::clone(self),
            })
        } else {
            None
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

pub struct ExportPermit {
    gate: Arc<ExportGate>,
}

impl Drop for ExportPermit {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}

/// Runs a full export: claim the gate, kick off the draft save, render the
/// PDF on a blocking thread, and derive the download filename.
pub async fn export_resume(
    doc: ResumeDocument,
    template_id: String,
    gate: &Arc<ExportGate>,
    save: Option<(Arc<dyn DraftStore>, Uuid)>,
) -> Result<ExportArtifact, ExportError> {
    let _permit = gate.acquire().ok_or(ExportError::Busy)?;

    // Best-effort save of the document being exported. Runs detached; the
    // export does not wait for it and ignores its outcome.
    if let Some((store, user_id)) = save {
        let saved = doc.clone();
        tokio::spawn(async move {
            if let Err(e) = store.upsert(user_id, &saved).await {
                warn!("pre-export draft save failed for {user_id}: {e}");
            }
        });
    }

    let filename = derive_filename(&doc.personal.full_name);
    let bytes = tokio::task::spawn_blocking(move || {
        let mut canvas = LopdfCanvas::a4();
        render_pdf(&doc, &template_id, &mut canvas)?;
        canvas.finish()
    })
    .await
    .map_err(|e| ExportError::Join(e.to_string()))??;

    Ok(ExportArtifact { filename, bytes })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::DraftError;
    use crate::model::PersonalInfo;
    use async_trait::async_trait;

    fn doc() -> ResumeDocument {
        ResumeDocument {
            personal: PersonalInfo {
                full_name: "Jane Doe".to_string(),
                ..Default::default()
            },
            summary: "Engineer.".to_string(),
            ..Default::default()
        }
    }

    /// Store whose saves always fail, for exercising the detached-save path.
    struct FailingDraftStore;

    #[async_trait]
    impl DraftStore for FailingDraftStore {
        async fn get(&self, _user_id: Uuid) -> Result<Option<ResumeDocument>, DraftError> {
            Ok(None)
        }

        async fn upsert(&self, _user_id: Uuid, _doc: &ResumeDocument) -> Result<(), DraftError> {
            Err(DraftError::Database(sqlx::Error::PoolClosed))
        }
    }

    #[test]
    fn test_gate_rejects_second_acquire_until_released() {
        let gate = Arc::new(ExportGate::new());
        let permit = gate.acquire().expect("first acquire succeeds");
        assert!(gate.acquire().is_none());
        assert!(gate.is_busy());

        drop(permit);
        assert!(!gate.is_busy());
        assert!(gate.acquire().is_some());
    }

    #[tokio::test]
    async fn test_export_produces_pdf_bytes_and_filename() {
        let gate = Arc::new(ExportGate::new());
        let artifact = export_resume(doc(), "modern".to_string(), &gate, None)
            .await
            .unwrap();
        assert_eq!(artifact.filename, "jane_doe_resume.pdf");
        assert!(artifact.bytes.starts_with(b"%PDF"));
        // The gate reopens once the export settles.
        assert!(!gate.is_busy());
    }

    #[tokio::test]
    async fn test_concurrent_export_is_rejected_as_busy() {
        let gate = Arc::new(ExportGate::new());
        let _permit = gate.acquire().unwrap();
        let err = export_resume(doc(), "modern".to_string(), &gate, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::Busy));
    }

    #[tokio::test]
    async fn test_failed_draft_save_does_not_fail_the_export() {
        let gate = Arc::new(ExportGate::new());
        let store: Arc<dyn DraftStore> = Arc::new(FailingDraftStore);
        let artifact = export_resume(
            doc(),
            "modern".to_string(),
            &gate,
            Some((store, Uuid::new_v4())),
        )
        .await
        .unwrap();
        assert!(artifact.bytes.starts_with(b"%PDF"));
    }
}
