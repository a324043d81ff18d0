use std::time::Duration;

use crate::adapters::transport::Transport;
use crate::app::services::ApiClient;
use crate::domain::errors::ClientError;
use crate::domain::models::DatasetId;
use crate::view::alerts::AlertLevel;
use crate::view::chart::{ChartSurface, ColorSource, render_chart};
use crate::view::map::{DEFAULT_FOCUS_ZOOM, MapSurface, render_map};
use crate::view::pages::{DashboardPage, Redirect};
use crate::view::table::render_table;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this dataset?";

/// Asks the operator to approve a destructive action.
pub trait Confirmation {
    fn confirm(&mut self, prompt: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSettings {
    pub map_zoom: u8,
    pub date_format: String,
    pub upload_path: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            map_zoom: DEFAULT_FOCUS_ZOOM,
            date_format: "%Y-%m-%d".to_string(),
            upload_path: "/upload".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(usize),
    Failed(ClientError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailsOutcome {
    Shown(DatasetId),
    Failed(ClientError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Declined,
    Deleted,
    Failed(ClientError),
}

pub struct DashboardController<T, S> {
    api: ApiClient<T>,
    settings: DashboardSettings,
    colors: S,
}

impl<T, S> DashboardController<T, S>
where
    T: Transport,
    S: ColorSource,
{
    pub fn new(api: ApiClient<T>, settings: DashboardSettings, colors: S) -> Self {
        Self {
            api,
            settings,
            colors,
        }
    }

    pub fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    /// Fetches every dataset and redraws table, map and chart. On failure the page keeps
    /// what it showed before.
    pub async fn load_datasets<M, C>(&self, page: &mut DashboardPage<M, C>) -> LoadOutcome
    where
        M: MapSurface,
        C: ChartSurface,
    {
        let datasets = match self.api.list_results().await {
            Ok(datasets) => datasets,
            Err(error) => {
                tracing::error!(error = %error, "failed to load datasets");
                page.alerts.show("Error loading datasets", AlertLevel::Danger);
                return LoadOutcome::Failed(error);
            }
        };

        render_table(&datasets, &mut page.table, &self.settings.date_format);
        let markers = render_map(&datasets, &mut page.map, self.settings.map_zoom);
        if let Err(error) = render_chart(&datasets, &mut page.chart, &self.colors) {
            tracing::error!(error = %error, "chart update failed");
        }

        tracing::info!(count = datasets.len(), markers, "datasets loaded");
        LoadOutcome::Loaded(datasets.len())
    }

    pub async fn show_details<M, C>(
        &self,
        id: &DatasetId,
        page: &mut DashboardPage<M, C>,
    ) -> DetailsOutcome {
        match self.api.get_result(id).await {
            Ok(dataset) => {
                page.modal.show(&dataset);
                tracing::debug!(dataset_id = %id, "details shown");
                DetailsOutcome::Shown(dataset.id)
            }
            Err(error) => {
                tracing::error!(dataset_id = %id, error = %error, "failed to load dataset details");
                page.alerts
                    .show("Error loading dataset details", AlertLevel::Danger);
                DetailsOutcome::Failed(error)
            }
        }
    }

    /// Deletes after confirmation and reloads the listing once. Declining sends nothing.
    pub async fn delete_dataset<M, C, K>(
        &self,
        id: &DatasetId,
        confirmation: &mut K,
        page: &mut DashboardPage<M, C>,
    ) -> DeleteOutcome
    where
        M: MapSurface,
        C: ChartSurface,
        K: Confirmation + ?Sized,
    {
        if !confirmation.confirm(DELETE_PROMPT) {
            tracing::debug!(dataset_id = %id, "delete declined");
            return DeleteOutcome::Declined;
        }

        match self.api.delete_dataset(id).await {
            Ok(()) => {
                tracing::info!(dataset_id = %id, "dataset deleted");
                page.alerts
                    .show("Dataset deleted successfully", AlertLevel::Success);
                self.load_datasets(page).await;
                DeleteOutcome::Deleted
            }
            Err(error) => {
                tracing::error!(dataset_id = %id, error = %error, "failed to delete dataset");
                page.alerts.show("Error deleting dataset", AlertLevel::Danger);
                DeleteOutcome::Failed(error)
            }
        }
    }

    pub fn open_upload<M, C>(&self, page: &mut DashboardPage<M, C>) {
        page.redirect = Some(Redirect {
            path: self.settings.upload_path.clone(),
            delay: Duration::ZERO,
        });
    }
}
