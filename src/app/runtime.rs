use std::sync::Arc;

use crate::adapters::http::HttpTransport;
use crate::adapters::replay::ReplayTransport;
use crate::adapters::transport::{Transport, UploadForm};
use crate::app::AppError;
use crate::app::cli::Command;
use crate::app::config::{ClientConfig, TransportConfig};
use crate::app::dashboard::{DashboardController, DeleteOutcome, DetailsOutcome, LoadOutcome};
use crate::app::output::{
    TerminalConfirmation, chart_summary, details_panel, map_summary, print_alerts, results_table,
    stations_table,
};
use crate::app::services::ApiClient;
use crate::app::upload::{StationLoad, UploadController, UploadOutcome};
use crate::domain::clock::{Clock, SystemClock};
use crate::domain::models::DatasetId;
use crate::view::alerts::AlertBoard;
use crate::view::chart::{MemoryChart, RandomColors};
use crate::view::map::MemoryMap;
use crate::view::pages::{DashboardPage, UploadPage};

type SharedTransport = Arc<dyn Transport>;
type Dashboard = DashboardController<SharedTransport, RandomColors>;
type TerminalPage = DashboardPage<MemoryMap, MemoryChart>;

pub fn run(config: ClientConfig, command: Command) -> Result<(), AppError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(AppError::runtime)?;

    runtime.block_on(execute(config, command))
}

fn build_transport(config: &TransportConfig) -> Result<SharedTransport, AppError> {
    match config {
        TransportConfig::Http { base_url, timeout } => {
            let transport = HttpTransport::new(base_url, *timeout).map_err(AppError::runtime)?;
            Ok(Arc::new(transport))
        }
        TransportConfig::Replay { script_path } => {
            let transport = ReplayTransport::from_file(script_path).map_err(AppError::config)?;
            tracing::warn!(script = %script_path, "answering from replay script, backend is not contacted");
            Ok(Arc::new(transport))
        }
    }
}

async fn execute(config: ClientConfig, command: Command) -> Result<(), AppError> {
    let transport = build_transport(&config.transport)?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let alerts = || AlertBoard::new(Arc::clone(&clock), config.alert_lifetime());

    let dashboard = DashboardController::new(
        ApiClient::new(Arc::clone(&transport)),
        config.dashboard_settings(),
        RandomColors,
    );
    let mut dashboard_page = DashboardPage::new(MemoryMap::default(), MemoryChart::default(), alerts());

    match command {
        Command::Stations => {
            let controller =
                UploadController::new(ApiClient::new(transport), config.upload_settings());
            let mut page = UploadPage::new(alerts());

            let outcome = controller.load_base_stations(&mut page).await;
            print_alerts(page.alerts.active());
            match outcome {
                StationLoad::Loaded(_) => {
                    println!("{}", stations_table(&page.station_options));
                    Ok(())
                }
                StationLoad::Failed(error) => Err(AppError::workflow(error)),
            }
        }
        Command::Upload { file, base_station } => {
            let form = UploadForm::from_path(&file, base_station)
                .map_err(|error| AppError::io(file.display().to_string(), error))?;
            let controller =
                UploadController::new(ApiClient::new(transport), config.upload_settings());
            let mut page = UploadPage::new(alerts());

            let outcome = controller.submit(form, &mut page).await;
            print_alerts(page.alerts.active());
            match outcome {
                UploadOutcome::Completed(dataset_id) => {
                    println!("Dataset {dataset_id} is ready");
                    if let Some(redirect) = page.redirect.take() {
                        tokio::time::sleep(redirect.delay).await;
                        tracing::info!(path = %redirect.path, "opening dashboard");
                        show_dashboard(&dashboard, &mut dashboard_page).await?;
                    }
                    Ok(())
                }
                UploadOutcome::Failed(error) => Err(AppError::workflow(error)),
            }
        }
        Command::Dashboard => show_dashboard(&dashboard, &mut dashboard_page).await,
        Command::Details { id } => {
            let outcome = dashboard
                .show_details(&DatasetId::new(id), &mut dashboard_page)
                .await;
            print_alerts(dashboard_page.alerts.active());
            match outcome {
                DetailsOutcome::Shown(_) => {
                    if let Some(details) = &dashboard_page.modal.details {
                        println!("{}", details_panel(details));
                    }
                    Ok(())
                }
                DetailsOutcome::Failed(error) => Err(AppError::workflow(error)),
            }
        }
        Command::Delete { id, yes } => {
            let mut confirmation = TerminalConfirmation { assume_yes: yes };
            let outcome = dashboard
                .delete_dataset(&DatasetId::new(id), &mut confirmation, &mut dashboard_page)
                .await;
            print_alerts(dashboard_page.alerts.active());
            match outcome {
                DeleteOutcome::Declined => {
                    println!("Nothing deleted");
                    Ok(())
                }
                DeleteOutcome::Deleted => {
                    println!("{}", results_table(&dashboard_page.table));
                    Ok(())
                }
                DeleteOutcome::Failed(error) => Err(AppError::workflow(error)),
            }
        }
    }
}

async fn show_dashboard(dashboard: &Dashboard, page: &mut TerminalPage) -> Result<(), AppError> {
    let outcome = dashboard.load_datasets(page).await;
    print_alerts(page.alerts.active());

    match outcome {
        LoadOutcome::Loaded(_) => {
            println!("{}", results_table(&page.table));
            println!("{}", map_summary(&page.map));
            println!("{}", chart_summary(&page.chart));
            Ok(())
        }
        LoadOutcome::Failed(error) => Err(AppError::workflow(error)),
    }
}
