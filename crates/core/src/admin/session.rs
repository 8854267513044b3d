use std::time::{Duration, Instant};

use crate::collection::ItemCollection;
use crate::error::CoreError;
use crate::filter::{category_options, CategoryFilter, ViewMode, ViewState};
use crate::image_intake::{CompressionOptions, SelectedFile, DEFAULT_COMPRESSION_TIMEOUT_SECS};
use crate::portfolio::{PortfolioItem, ENTITY_NAME};
use crate::store::PortfolioStore;
use crate::types::DbId;

use super::form::PortfolioForm;
use super::notification::Notification;

/// The admin panel: item collection, filter state, the add/edit form and
/// the delete confirmation.
///
/// Actions take `&mut self`, so a second submit cannot start while one is
/// awaiting.
pub struct AdminSession<S> {
    store: S,
    collection: ItemCollection,
    view: ViewState,
    form: Option<PortfolioForm>,
    pending_delete: Option<DbId>,
    notification: Option<Notification>,
    compression: CompressionOptions,
    compression_timeout: Duration,
}

impl<S: PortfolioStore> AdminSession<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            collection: ItemCollection::new(),
            view: ViewState::default(),
            form: None,
            pending_delete: None,
            notification: None,
            compression: CompressionOptions::default(),
            compression_timeout: Duration::from_secs(DEFAULT_COMPRESSION_TIMEOUT_SECS),
        }
    }

    pub fn with_compression(mut self, options: CompressionOptions, timeout: Duration) -> Self {
        self.compression = options;
        self.compression_timeout = timeout;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // -- collection ----------------------------------------------------------

    /// Fetch the full list and replace the local copy.
    ///
    /// On failure the previous items stay and an error notification is raised.
    pub async fn reload(&mut self) -> Result<(), CoreError> {
        match self.store.list().await {
            Ok(items) => {
                tracing::debug!(count = items.len(), "Portfolio items loaded");
                self.collection.replace_all(items);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load portfolio items");
                self.notification = Some(Notification::for_error("load portfolio items", &err));
                Err(err)
            }
        }
    }

    pub fn items(&self) -> &[PortfolioItem] {
        self.collection.items()
    }

    // -- view ----------------------------------------------------------------

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.view.search = search.into();
    }

    pub fn set_category(&mut self, category: impl Into<CategoryFilter>) {
        self.view.category = category.into();
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view.view_mode = mode;
    }

    /// Items passing the current search and category filters.
    pub fn visible_items(&self) -> Vec<&PortfolioItem> {
        self.view.apply(self.collection.items())
    }

    pub fn visible_count(&self) -> usize {
        self.visible_items().len()
    }

    pub fn category_options(&self) -> Vec<String> {
        category_options(self.collection.items())
    }

    // -- form ----------------------------------------------------------------

    pub fn open_create(&mut self) {
        self.form = Some(self.prepare(PortfolioForm::for_create()));
    }

    /// Open the form for an item in the local collection.
    pub fn open_edit(&mut self, id: DbId) -> Result<(), CoreError> {
        let item = self.collection.get(id).ok_or(CoreError::NotFound {
            entity: ENTITY_NAME,
            id,
        })?;
        let form = PortfolioForm::for_edit(item);
        self.form = Some(self.prepare(form));
        Ok(())
    }

    fn prepare(&self, mut form: PortfolioForm) -> PortfolioForm {
        form.image = form
            .image
            .with_compression(self.compression.clone(), self.compression_timeout);
        form
    }

    /// Close the form, discarding unsaved input.
    pub fn close_form(&mut self) {
        self.form = None;
    }

    pub fn form(&self) -> Option<&PortfolioForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut PortfolioForm> {
        self.form.as_mut()
    }

    /// Attach a user-picked image to the open form and build its preview.
    ///
    /// Size/type rejection happens before any other work.
    pub async fn select_image(&mut self, file: SelectedFile) -> Result<(), CoreError> {
        let result = match self.form.as_mut() {
            Some(form) => match form.select_image(file) {
                Ok(()) => form.image.load_preview().await.map(|_| ()),
                Err(err) => Err(err),
            },
            None => Err(no_form()),
        };
        if let Err(err) = &result {
            self.notification = Some(Notification::for_error("attach the image", err));
        }
        result
    }

    /// Discard the selected image, restoring the persisted one (if editing).
    pub fn clear_image(&mut self) {
        if let Some(form) = self.form.as_mut() {
            form.image.clear();
        }
    }

    /// Validate, compress the new image if any, persist, patch the local
    /// collection, close the form.
    ///
    /// Any failure leaves the form open with its data intact.
    pub async fn submit(&mut self) -> Result<PortfolioItem, CoreError> {
        let validation = match self.form.as_ref() {
            Some(form) => form.validate(),
            None => return Err(no_form()),
        };
        if let Err(err) = validation {
            self.notification = Some(Notification::for_error("save the portfolio item", &err));
            return Err(err);
        }

        let result = match self.form.as_mut() {
            Some(form) => save(&self.store, form).await,
            None => Err(no_form()),
        };

        match result {
            Ok((saved, was_edit)) => {
                if was_edit {
                    tracing::info!(id = saved.id, "Portfolio item updated");
                    self.collection.apply_updated(saved.clone());
                    self.notification = Some(Notification::success("Portfolio item updated"));
                } else {
                    tracing::info!(id = saved.id, "Portfolio item created");
                    self.collection.insert_created(saved.clone());
                    self.notification = Some(Notification::success("Portfolio item added"));
                }
                self.form = None;
                Ok(saved)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to save portfolio item");
                self.notification = Some(Notification::for_error("save the portfolio item", &err));
                Err(err)
            }
        }
    }

    // -- delete --------------------------------------------------------------

    /// Ask for confirmation before deleting `id`.
    pub fn request_delete(&mut self, id: DbId) {
        self.pending_delete = Some(id);
    }

    pub fn pending_delete(&self) -> Option<DbId> {
        self.pending_delete
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the item awaiting confirmation. Without one this is a no-op.
    pub async fn confirm_delete(&mut self) -> Result<(), CoreError> {
        let Some(id) = self.pending_delete.take() else {
            return Ok(());
        };

        match self.store.delete(id).await {
            Ok(()) => {
                tracing::info!(id, "Portfolio item deleted");
                self.collection.remove(id);
                self.notification = Some(Notification::success("Portfolio item deleted"));
                Ok(())
            }
            Err(err) => {
                tracing::warn!(id, error = %err, "Failed to delete portfolio item");
                self.notification = Some(Notification::for_error("delete the portfolio item", &err));
                Err(err)
            }
        }
    }

    // -- notifications -------------------------------------------------------

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    /// Drop the notification once its display time has passed.
    pub fn expire_notification(&mut self, now: Instant) {
        if self.notification.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notification = None;
        }
    }
}

fn no_form() -> CoreError {
    CoreError::Validation("No portfolio form is open".into())
}

/// Persist the form; returns the stored item and whether it was an edit.
async fn save<S: PortfolioStore>(
    store: &S,
    form: &mut PortfolioForm,
) -> Result<(PortfolioItem, bool), CoreError> {
    let image = form.image.finalize().await?;
    match form.editing_id() {
        Some(id) => store.update(id, form.to_patch(image)).await.map(|item| (item, true)),
        None => store.create(form.to_new_item(image)).await.map(|item| (item, false)),
    }
}
