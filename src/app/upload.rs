use std::time::Duration;

use crate::adapters::transport::{Transport, UploadForm};
use crate::app::services::ApiClient;
use crate::domain::errors::ClientError;
use crate::domain::format::station_label;
use crate::domain::models::DatasetId;
use crate::view::alerts::AlertLevel;
use crate::view::pages::{Redirect, SelectOption, UploadPage};

pub const UPLOAD_SUCCESS_MESSAGE: &str = "File uploaded and processed successfully";
pub const UPLOAD_FALLBACK_MESSAGE: &str = "Error uploading file";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSettings {
    pub dashboard_path: String,
    pub redirect_delay: Duration,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            dashboard_path: "/dashboard".to_string(),
            redirect_delay: Duration::from_millis(1500),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StationLoad {
    Loaded(usize),
    Failed(ClientError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Completed(DatasetId),
    Failed(ClientError),
}

pub struct UploadController<T> {
    api: ApiClient<T>,
    settings: UploadSettings,
}

impl<T> UploadController<T>
where
    T: Transport,
{
    pub fn new(api: ApiClient<T>, settings: UploadSettings) -> Self {
        Self { api, settings }
    }

    pub fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    /// Fills the station selector. Failures leave whatever options are already there.
    pub async fn load_base_stations(&self, page: &mut UploadPage) -> StationLoad {
        match self.api.list_base_stations().await {
            Ok(stations) => {
                page.station_options
                    .extend(stations.iter().map(|station| SelectOption {
                        value: station.id.clone(),
                        label: station_label(&station.name, station.latitude, station.longitude),
                    }));
                tracing::info!(count = stations.len(), "base stations loaded");
                StationLoad::Loaded(stations.len())
            }
            Err(error) => {
                tracing::warn!(error = %error, "failed to load base stations");
                page.alerts.show(
                    format!("Error loading base stations: {error}"),
                    AlertLevel::Warning,
                );
                StationLoad::Failed(error)
            }
        }
    }

    /// Uploads the file, then triggers processing of the dataset it produced.
    pub async fn submit(&self, form: UploadForm, page: &mut UploadPage) -> UploadOutcome {
        let file_name = form.file_name.clone();
        page.progress.start();

        match self.upload_and_process(form, page).await {
            Ok(dataset_id) => {
                page.progress.advance(100);
                page.alerts.show(UPLOAD_SUCCESS_MESSAGE, AlertLevel::Success);
                page.redirect = Some(Redirect {
                    path: self.settings.dashboard_path.clone(),
                    delay: self.settings.redirect_delay,
                });
                tracing::info!(
                    file = %file_name,
                    dataset_id = %dataset_id,
                    "dataset uploaded and processed"
                );
                UploadOutcome::Completed(dataset_id)
            }
            Err(error) => {
                tracing::error!(file = %file_name, error = %error, "upload workflow failed");
                let message = error.to_string();
                let message = if message.trim().is_empty() {
                    UPLOAD_FALLBACK_MESSAGE.to_string()
                } else {
                    message
                };
                page.alerts.show(message, AlertLevel::Danger);
                page.progress.reset();
                UploadOutcome::Failed(error)
            }
        }
    }

    async fn upload_and_process(
        &self,
        form: UploadForm,
        page: &mut UploadPage,
    ) -> Result<DatasetId, ClientError> {
        let receipt = self.api.upload(form).await?;
        page.progress.advance(50);
        tracing::debug!(dataset_id = %receipt.dataset_id, "upload accepted, processing");

        self.api.process(&receipt.dataset_id).await?;
        Ok(receipt.dataset_id)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::json;

    use super::{StationLoad, UploadController, UploadOutcome, UploadSettings};
    use crate::adapters::replay::{ReplayEvent, ReplayScript, ReplayTransport};
    use crate::adapters::transport::{ApiRequest, Endpoint};
    use crate::app::services::ApiClient;
    use crate::domain::errors::ClientError;
    use crate::domain::models::DatasetId;
    use crate::test_support::{upload_form, upload_page};
    use crate::view::alerts::AlertLevel;
    use crate::view::pages::{Redirect, SelectOption};

    fn controller(script: ReplayScript) -> (UploadController<Arc<ReplayTransport>>, Arc<ReplayTransport>) {
        let transport = Arc::new(ReplayTransport::from_script(script));
        (
            UploadController::new(ApiClient::new(Arc::clone(&transport)), UploadSettings::default()),
            transport,
        )
    }

    #[tokio::test]
    async fn successful_upload_and_process_schedules_redirect() {
        let (controller, transport) = controller(
            ReplayScript::default()
                .respond(
                    Endpoint::Upload,
                    ReplayEvent::json(200, json!({"success": true, "dataset_id": 42})),
                )
                .respond(Endpoint::Process, ReplayEvent::json(200, json!({"success": true}))),
        );
        let mut page = upload_page();

        let outcome = controller.submit(upload_form(), &mut page).await;

        assert_eq!(outcome, UploadOutcome::Completed(DatasetId::new("42")));
        assert_eq!(page.progress.percent(), 100);
        assert!(page.progress.is_visible());
        let alert = page.alerts.latest().expect("alert should be shown");
        assert_eq!(alert.level, AlertLevel::Success);
        assert_eq!(alert.message, "File uploaded and processed successfully");
        assert_eq!(
            page.redirect,
            Some(Redirect {
                path: "/dashboard".to_string(),
                delay: Duration::from_millis(1500),
            })
        );
        assert_eq!(
            transport.requests()[1],
            ApiRequest::Process(DatasetId::new("42"))
        );
    }

    #[tokio::test]
    async fn rejected_upload_shows_server_message_and_skips_processing() {
        let (controller, transport) = controller(
            ReplayScript::default()
                .respond(
                    Endpoint::Upload,
                    ReplayEvent::json(400, json!({"error": "unsupported format"})),
                )
                .respond(Endpoint::Process, ReplayEvent::json(200, json!({"success": true}))),
        );
        let mut page = upload_page();

        let outcome = controller.submit(upload_form(), &mut page).await;

        assert_eq!(
            outcome,
            UploadOutcome::Failed(ClientError::UploadFailed("unsupported format".to_string()))
        );
        let alert = page.alerts.latest().expect("alert should be shown");
        assert_eq!(alert.message, "unsupported format");
        assert_eq!(alert.level, AlertLevel::Danger);
        assert!(!page.progress.is_visible());
        assert_eq!(page.progress.percent(), 0);
        assert_eq!(page.redirect, None);
        assert_eq!(transport.request_count(Endpoint::Process), 0);
    }

    #[tokio::test]
    async fn error_field_with_ok_status_stops_before_processing() {
        let (controller, transport) = controller(
            ReplayScript::default()
                .respond(
                    Endpoint::Upload,
                    ReplayEvent::json(200, json!({"error": "No file selected"})),
                )
                .respond(Endpoint::Process, ReplayEvent::json(200, json!({"success": true}))),
        );
        let mut page = upload_page();

        let outcome = controller.submit(upload_form(), &mut page).await;

        assert!(matches!(outcome, UploadOutcome::Failed(ClientError::UploadFailed(_))));
        assert_eq!(transport.request_count(Endpoint::Process), 0);
    }

    #[tokio::test]
    async fn upload_without_dataset_id_never_triggers_processing() {
        let (controller, transport) = controller(
            ReplayScript::default()
                .respond(Endpoint::Upload, ReplayEvent::json(200, json!({"success": true})))
                .respond(Endpoint::Process, ReplayEvent::json(200, json!({"success": true}))),
        );
        let mut page = upload_page();

        let outcome = controller.submit(upload_form(), &mut page).await;

        assert!(matches!(outcome, UploadOutcome::Failed(ClientError::InvalidFormat(_))));
        assert_eq!(transport.request_count(Endpoint::Process), 0);
    }

    #[tokio::test]
    async fn malformed_upload_body_resets_progress() {
        let (controller, transport) = controller(
            ReplayScript::default()
                .respond(Endpoint::Upload, ReplayEvent::text(200, "<html>login</html>")),
        );
        let mut page = upload_page();

        let outcome = controller.submit(upload_form(), &mut page).await;

        assert_eq!(outcome, UploadOutcome::Failed(ClientError::MalformedResponse));
        assert_eq!(
            page.alerts.latest().map(|alert| alert.message.as_str()),
            Some("Server returned invalid JSON/response")
        );
        assert!(!page.progress.is_visible());
        assert_eq!(page.progress.percent(), 0);
        assert_eq!(transport.request_count(Endpoint::Process), 0);
    }

    #[tokio::test]
    async fn malformed_process_body_fails_after_half_progress() {
        let (controller, _) = controller(
            ReplayScript::default()
                .respond(Endpoint::Upload, ReplayEvent::json(200, json!({"dataset_id": 5})))
                .respond(Endpoint::Process, ReplayEvent::text(500, "Internal Server Error")),
        );
        let mut page = upload_page();

        let outcome = controller.submit(upload_form(), &mut page).await;

        assert_eq!(outcome, UploadOutcome::Failed(ClientError::MalformedResponse));
        assert!(!page.progress.is_visible());
        assert_eq!(page.progress.percent(), 0);
        assert_eq!(page.redirect, None);
    }

    #[tokio::test]
    async fn processing_failure_uses_default_message_when_server_is_silent() {
        let (controller, _) = controller(
            ReplayScript::default()
                .respond(Endpoint::Upload, ReplayEvent::json(200, json!({"dataset_id": 5})))
                .respond(Endpoint::Process, ReplayEvent::json(200, json!({"success": false}))),
        );
        let mut page = upload_page();

        controller.submit(upload_form(), &mut page).await;

        assert_eq!(
            page.alerts.latest().map(|alert| alert.message.as_str()),
            Some("Processing failed")
        );
    }

    #[tokio::test]
    async fn network_failure_is_reported_without_retry() {
        let (controller, transport) = controller(
            ReplayScript::default().respond(Endpoint::Upload, ReplayEvent::failure("connection_refused")),
        );
        let mut page = upload_page();

        let outcome = controller.submit(upload_form(), &mut page).await;

        assert!(matches!(outcome, UploadOutcome::Failed(ClientError::NetworkFailure(_))));
        assert_eq!(transport.request_count(Endpoint::Upload), 1);
        assert_eq!(
            page.alerts.latest().map(|alert| alert.level),
            Some(AlertLevel::Danger)
        );
    }

    #[tokio::test]
    async fn loads_station_options_with_six_decimal_labels() {
        let (controller, _) = controller(ReplayScript::default().respond(
            Endpoint::BaseStations,
            ReplayEvent::json(
                200,
                json!([
                    {"id": 1, "name": "Alpha", "latitude": 12.345678, "longitude": 98.765432},
                    {"id": null, "name": "Ghost", "latitude": 0.0, "longitude": 0.0}
                ]),
            ),
        ));
        let mut page = upload_page();

        let outcome = controller.load_base_stations(&mut page).await;

        assert_eq!(outcome, StationLoad::Loaded(1));
        assert_eq!(
            page.station_options,
            vec![SelectOption {
                value: "1".to_string(),
                label: "Alpha (12.345678, 98.765432)".to_string(),
            }]
        );
        assert!(page.alerts.latest().is_none());
    }

    #[tokio::test]
    async fn station_listing_with_wrong_shape_warns_and_keeps_existing_options() {
        let (controller, _) = controller(ReplayScript::default().respond(
            Endpoint::BaseStations,
            ReplayEvent::json(200, json!({"stations": []})),
        ));
        let mut page = upload_page();
        page.station_options.push(SelectOption {
            value: String::new(),
            label: "Select a base station".to_string(),
        });

        let outcome = controller.load_base_stations(&mut page).await;

        assert!(matches!(outcome, StationLoad::Failed(ClientError::InvalidFormat(_))));
        assert_eq!(page.station_options.len(), 1);
        let alert = page.alerts.latest().expect("warning should be shown");
        assert_eq!(alert.level, AlertLevel::Warning);
        assert!(alert.message.starts_with("Error loading base stations: invalid response format"));
    }
}
