//! Duty Management State
//!
//! Headless model of the duty administration screen. Paging and sorting live
//! in a URL query string so a view can be bookmarked and restored; every
//! change to it triggers a re-fetch.

use tracing::{debug, warn};
use url::form_urlencoded;
use uuid::Uuid;

use super::{ClientError, DutyService, GetDutiesParams};
use crate::models::{Duty, DutyPage};
use crate::query::DEFAULT_LIMIT;

/// Shown when the list cannot be loaded
pub const LIST_ERROR_DESCRIPTION: &str = "Could not load the list of duties.";

// == Notifications ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A message meant for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub description: String,
}

impl Notification {
    fn success(description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: "Success".to_string(),
            description: description.into(),
        }
    }

    fn error(description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: "API Error".to_string(),
            description: description.into(),
        }
    }
}

// == List View ==
/// Direction chosen by clicking a column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascend,
    Descend,
}

/// Paging and sorting state as carried in the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub page: i64,
    pub limit: i64,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

impl Default for ListView {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
            sort_by: None,
            order: None,
        }
    }
}

impl ListView {
    /// Reads `page`, `sortBy` and `order` from a query string (with or
    /// without the leading `?`). The page size is fixed.
    pub fn from_query_string(query: &str) -> Self {
        let mut view = Self::default();
        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            match key.as_ref() {
                "page" => {
                    view.page = value.parse::<i64>().ok().filter(|page| *page > 0).unwrap_or(1);
                }
                "sortBy" if !value.is_empty() => view.sort_by = Some(value.into_owned()),
                "order" if !value.is_empty() => view.order = Some(value.into_owned()),
                _ => {}
            }
        }
        view
    }

    pub fn to_query_string(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("page", &self.page.to_string());
        if let Some(sort_by) = &self.sort_by {
            query.append_pair("sortBy", sort_by);
        }
        if let Some(order) = &self.order {
            query.append_pair("order", order);
        }
        query.finish()
    }

    /// Request parameters; sorting is sent only when both halves are set.
    pub fn params(&self) -> GetDutiesParams {
        let params = GetDutiesParams::new(self.page, self.limit);
        match (&self.sort_by, &self.order) {
            (Some(sort_by), Some(order)) => params.sorted(sort_by, order),
            _ => params,
        }
    }
}

// == State Machine ==
pub struct DutyManagement<S> {
    service: S,
    view: ListView,
    data: Option<DutyPage>,
    loading: bool,
    modal_visible: bool,
    editing: Option<Duty>,
    form_name: String,
    form_valid: bool,
    action_loading: bool,
    notifications: Vec<Notification>,
}

impl<S: DutyService> DutyManagement<S> {
    /// Creates the state for the view described by `query`. Nothing is
    /// fetched until [`DutyManagement::fetch`] runs.
    pub fn new(service: S, query: &str) -> Self {
        Self {
            service,
            view: ListView::from_query_string(query),
            data: None,
            loading: false,
            modal_visible: false,
            editing: None,
            form_name: String::new(),
            form_valid: false,
            action_loading: false,
            notifications: Vec::new(),
        }
    }

    // == Accessors ==
    pub fn view(&self) -> &ListView {
        &self.view
    }

    pub fn query_string(&self) -> String {
        self.view.to_query_string()
    }

    pub fn data(&self) -> Option<&DutyPage> {
        self.data.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_modal_visible(&self) -> bool {
        self.modal_visible
    }

    /// The duty being edited; `None` while the modal is in create mode.
    pub fn editing(&self) -> Option<&Duty> {
        self.editing.as_ref()
    }

    pub fn form_name(&self) -> &str {
        &self.form_name
    }

    pub fn is_form_valid(&self) -> bool {
        self.form_valid
    }

    pub fn is_action_loading(&self) -> bool {
        self.action_loading
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Hands pending notifications to the caller.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    // == List ==
    /// Loads the current page. The loading flag is cleared whatever the outcome.
    pub async fn fetch(&mut self) -> Result<(), ClientError> {
        self.loading = true;
        let result = self.service.get_duties(&self.view.params()).await;
        self.loading = false;

        match result {
            Ok(page) => {
                debug!(total = page.total_count, page = self.view.page, "Duties loaded");
                self.data = Some(page);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Could not load duties");
                self.notifications.push(Notification::error(LIST_ERROR_DESCRIPTION));
                Err(err)
            }
        }
    }

    /// Replaces the whole view from a query string, as on URL navigation.
    pub async fn navigate(&mut self, query: &str) -> Result<(), ClientError> {
        self.view = ListView::from_query_string(query);
        self.fetch().await
    }

    pub async fn change_page(&mut self, page: i64) -> Result<(), ClientError> {
        self.view.page = page.max(1);
        self.fetch().await
    }

    /// Applies a column header click: back to page 1, with the given sort or
    /// none when either half is missing.
    pub async fn change_sort(
        &mut self,
        field: Option<&str>,
        direction: Option<SortDirection>,
    ) -> Result<(), ClientError> {
        let (sort_by, order) = match (field, direction) {
            (Some(field), Some(direction)) => {
                let order = match direction {
                    SortDirection::Ascend => "asc",
                    SortDirection::Descend => "desc",
                };
                (Some(field.to_string()), Some(order.to_string()))
            }
            _ => (None, None),
        };

        self.view = ListView {
            page: 1,
            limit: self.view.limit,
            sort_by,
            order,
        };
        self.fetch().await
    }

    // == Modal ==
    pub fn show_add_modal(&mut self) {
        self.editing = None;
        self.form_name.clear();
        self.form_valid = false;
        self.modal_visible = true;
    }

    pub fn show_edit_modal(&mut self, duty: Duty) {
        self.form_name = duty.name.clone();
        self.form_valid = !duty.name.is_empty();
        self.editing = Some(duty);
        self.modal_visible = true;
    }

    pub fn form_changed(&mut self, name: &str) {
        self.form_name = name.to_string();
        self.form_valid = !name.is_empty();
    }

    pub fn cancel(&mut self) {
        self.modal_visible = false;
        self.editing = None;
        self.form_name.clear();
        self.form_valid = false;
    }

    /// Creates or updates depending on the modal mode.
    ///
    /// On success the list is re-fetched and the modal closes; on failure the
    /// modal stays open with the form intact. Returns `Ok(None)` without
    /// calling the service when the form is invalid.
    pub async fn submit(&mut self) -> Result<Option<Duty>, ClientError> {
        if !self.form_valid {
            return Ok(None);
        }

        self.action_loading = true;
        let result = match &self.editing {
            Some(duty) => self.service.update_duty(duty.id, &self.form_name).await,
            None => self.service.create_duty(&self.form_name).await,
        };
        self.action_loading = false;

        match result {
            Ok(duty) => {
                let verb = if self.editing.is_some() { "updated" } else { "created" };
                self.notifications
                    .push(Notification::success(format!("Duty successfully {}.", verb)));
                // A failed refresh is already reported and does not undo the write
                let _ = self.fetch().await;
                self.cancel();
                Ok(Some(duty))
            }
            Err(err) => {
                warn!(error = %err, "Could not save duty");
                self.notifications.push(Notification::error(err.to_string()));
                Err(err)
            }
        }
    }

    // == Delete ==
    /// Deletes a duty, stepping back a page when it was the only row on a
    /// page beyond the first.
    pub async fn delete(&mut self, id: Uuid) -> Result<(), ClientError> {
        self.action_loading = true;
        let result = self.service.delete_duty(id).await;
        self.action_loading = false;

        if let Err(err) = result {
            warn!(error = %err, %id, "Could not delete duty");
            self.notifications.push(Notification::error(err.to_string()));
            return Err(err);
        }

        self.notifications
            .push(Notification::success("Duty successfully deleted."));

        let last_on_page = self
            .data
            .as_ref()
            .map_or(false, |page| page.duties.len() == 1);
        // A failed refresh is already reported and does not undo the delete
        let _ = if last_on_page && self.view.page > 1 {
            self.change_page(self.view.page - 1).await
        } else {
            self.fetch().await
        };

        Ok(())
    }
}
