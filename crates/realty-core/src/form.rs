// ── Form sessions ──
//
// One add-or-edit session per screen. A session is Idle, Adding a new
// entity, or Editing an existing one; only one may be open at a time.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CoreError;
use crate::model::{Draft, EntityId, Job, JobListField};
use crate::store::{OptimisticCollectionStore, ResourceBackend};

/// What the form is currently doing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Idle,
    Adding,
    Editing(EntityId),
}

impl fmt::Display for FormMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Adding => f.write_str("adding"),
            Self::Editing(id) => write!(f, "editing {id}"),
        }
    }
}

/// When a submitted form is closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubmitPolicy {
    /// Close the form as soon as validation passes, before the backend
    /// answers. A rejected mutation is reported but the input is gone.
    #[default]
    ResetEagerly,
    /// Keep the form open until the mutation settles; close only on success.
    KeepUntilSettled,
}

/// Working copy of one entity plus the session mode.
#[derive(Debug, Clone)]
pub struct FormSession<T: Draft> {
    mode: FormMode,
    draft: T,
    policy: SubmitPolicy,
}

impl<T: Draft> Default for FormSession<T> {
    fn default() -> Self {
        Self::new(SubmitPolicy::default())
    }
}

impl<T: Draft> FormSession<T> {
    pub fn new(policy: SubmitPolicy) -> Self {
        Self {
            mode: FormMode::Idle,
            draft: T::default(),
            policy,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_idle(&self) -> bool {
        self.mode == FormMode::Idle
    }

    pub fn policy(&self) -> SubmitPolicy {
        self.policy
    }

    pub fn draft(&self) -> &T {
        &self.draft
    }

    /// Mutable access to the working copy of an open session.
    pub fn draft_mut(&mut self) -> Result<&mut T, CoreError> {
        if self.is_idle() {
            return Err(CoreError::FormIdle);
        }
        Ok(&mut self.draft)
    }

    /// Open a blank draft.
    pub fn begin_add(&mut self) -> Result<&mut T, CoreError> {
        self.ensure_idle()?;
        self.draft = T::default();
        self.mode = FormMode::Adding;
        Ok(&mut self.draft)
    }

    /// Open a verbatim copy of `entity` for editing.
    pub fn begin_edit(&mut self, entity: &T) -> Result<&mut T, CoreError> {
        self.ensure_idle()?;
        let id = entity
            .id()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| CoreError::Validation { missing: vec!["id"] })?;
        self.mode = FormMode::Editing(EntityId::from(id));
        self.draft = entity.clone();
        Ok(&mut self.draft)
    }

    /// Discard the draft and return to Idle.
    pub fn cancel(&mut self) {
        self.reset();
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let missing = self.draft.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation { missing })
        }
    }

    /// Validate, then create or update through `store`.
    ///
    /// A validation failure leaves the session and draft untouched and
    /// sends nothing.
    pub async fn submit<B: ResourceBackend<T>>(
        &mut self,
        store: &OptimisticCollectionStore<T, B>,
    ) -> Result<Arc<T>, CoreError> {
        if self.is_idle() {
            return Err(CoreError::FormIdle);
        }
        self.validate()?;
        debug!(mode = %self.mode, policy = ?self.policy, "submitting form");

        match self.policy {
            SubmitPolicy::ResetEagerly => {
                let mode = std::mem::take(&mut self.mode);
                let draft = std::mem::take(&mut self.draft);
                dispatch(store, mode, draft).await
            }
            SubmitPolicy::KeepUntilSettled => {
                let saved = dispatch(store, self.mode.clone(), self.draft.clone()).await?;
                self.reset();
                Ok(saved)
            }
        }
    }

    fn ensure_idle(&self) -> Result<(), CoreError> {
        if self.is_idle() {
            Ok(())
        } else {
            Err(CoreError::FormBusy)
        }
    }

    fn reset(&mut self) {
        self.mode = FormMode::Idle;
        self.draft = T::default();
    }
}

async fn dispatch<T: Draft, B: ResourceBackend<T>>(
    store: &OptimisticCollectionStore<T, B>,
    mode: FormMode,
    draft: T,
) -> Result<Arc<T>, CoreError> {
    match mode {
        FormMode::Adding => store.create_optimistic(draft).await,
        FormMode::Editing(id) => store.update_optimistic(id.as_str(), draft.to_patch()).await,
        FormMode::Idle => Err(CoreError::FormIdle),
    }
}

// ── Job list fields ──────────────────────────────────────────────────

impl FormSession<Job> {
    /// Newline-joined text of a list field in the draft.
    pub fn lines(&self, field: JobListField) -> String {
        self.draft.lines(field)
    }

    pub fn set_lines(&mut self, field: JobListField, text: &str) -> Result<(), CoreError> {
        self.draft_mut()?.set_lines(field, text);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::ContentPage;
    use crate::store::LocalBackend;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn job_without_title_stays_adding() {
        let store = OptimisticCollectionStore::new(LocalBackend::<Job>::new());
        let mut form: FormSession<Job> = FormSession::default();
        form.begin_add().unwrap().description = "Show homes to buyers.".into();
        form.set_lines(JobListField::Requirements, "Driving licence\n\nCRM experience")
            .unwrap();
        let before = form.draft().clone();

        let err = form.submit(&store).await.unwrap_err();
        assert_eq!(
            err,
            CoreError::Validation {
                missing: vec!["title"]
            }
        );
        assert_eq!(form.mode(), &FormMode::Adding);
        assert_eq!(form.draft(), &before);
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn eager_submit_resets_and_creates() {
        let store = OptimisticCollectionStore::new(LocalBackend::<Job>::new());
        let mut form: FormSession<Job> = FormSession::default();
        let draft = form.begin_add().unwrap();
        draft.title = "Agent".into();
        draft.description = "Sell houses.".into();

        let saved = form.submit(&store).await.unwrap();
        assert!(form.is_idle());
        assert!(form.draft().title.is_empty());
        assert_eq!(saved.job_type, "Full-time");
        assert_eq!(store.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn edit_submits_update() {
        let page = ContentPage {
            title: "About".into(),
            slug: "about".into(),
            ..ContentPage::default()
        };
        let store = OptimisticCollectionStore::new(LocalBackend::with_items([page]));
        store.refresh().await.unwrap();
        let existing = store.snapshot().items()[0].clone();

        let mut form: FormSession<ContentPage> = FormSession::new(SubmitPolicy::KeepUntilSettled);
        form.begin_edit(&existing).unwrap().published = true;
        let saved = form.submit(&store).await.unwrap();

        assert!(saved.published);
        assert!(form.is_idle());
        assert!(store.snapshot().items()[0].published);
    }

    #[test]
    fn one_session_at_a_time() {
        let mut form: FormSession<ContentPage> = FormSession::default();
        form.begin_add().unwrap();
        assert_eq!(form.begin_add().unwrap_err(), CoreError::FormBusy);

        let existing = ContentPage {
            id: Some("p1".into()),
            ..ContentPage::default()
        };
        assert_eq!(form.begin_edit(&existing).unwrap_err(), CoreError::FormBusy);

        form.cancel();
        assert!(form.is_idle());
        assert_eq!(
            form.begin_edit(&existing).unwrap().id.as_deref(),
            Some("p1")
        );
        assert_eq!(form.mode(), &FormMode::Editing(EntityId::from("p1")));
    }

    #[test]
    fn edit_requires_an_id() {
        let mut form: FormSession<ContentPage> = FormSession::default();
        let err = form.begin_edit(&ContentPage::default()).unwrap_err();
        assert!(err.is_validation());
        assert!(form.is_idle());
    }

    #[tokio::test]
    async fn submit_while_idle() {
        let store = OptimisticCollectionStore::new(LocalBackend::<ContentPage>::new());
        let mut form: FormSession<ContentPage> = FormSession::default();
        assert_eq!(form.submit(&store).await.unwrap_err(), CoreError::FormIdle);
        assert_eq!(form.draft_mut().unwrap_err(), CoreError::FormIdle);
    }
}
