use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};

use crate::adapters::transport::UploadForm;
use crate::app::dashboard::Confirmation;
use crate::domain::clock::{Clock, TimestampMs};
use crate::domain::models::Dataset;
use crate::view::alerts::{AlertBoard, DEFAULT_ALERT_LIFETIME};
use crate::view::chart::{ColorSource, MemoryChart};
use crate::view::map::MemoryMap;
use crate::view::pages::{DashboardPage, UploadPage};

#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicI64,
}

impl ManualClock {
    pub fn new(now_ms: i64) -> Self {
        Self {
            now_ms: AtomicI64::new(now_ms),
        }
    }

    pub fn advance(&self, duration: Duration) {
        let millis = i64::try_from(duration.as_millis()).expect("duration fits in i64");
        self.now_ms.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> TimestampMs {
        TimestampMs(self.now_ms.load(Ordering::SeqCst))
    }
}

/// Deterministic colors: `#000001`, `#000002`, ...
#[derive(Debug, Default)]
pub struct SequenceColors {
    next: AtomicU32,
}

impl ColorSource for SequenceColors {
    fn next_color(&self) -> String {
        let value = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        format!("#{value:06X}")
    }
}

#[derive(Debug, Default)]
pub struct ScriptedConfirmation {
    pub answer: bool,
    pub prompts: Vec<String>,
}

impl ScriptedConfirmation {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: Vec::new(),
        }
    }
}

impl Confirmation for ScriptedConfirmation {
    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        self.answer
    }
}

pub fn alert_board() -> AlertBoard {
    AlertBoard::new(Arc::new(ManualClock::new(0)), DEFAULT_ALERT_LIFETIME)
}

pub fn upload_page() -> UploadPage {
    UploadPage::new(alert_board())
}

pub fn dashboard_page() -> DashboardPage<MemoryMap, MemoryChart> {
    DashboardPage::new(MemoryMap::default(), MemoryChart::default(), alert_board())
}

pub fn upload_form() -> UploadForm {
    UploadForm {
        file_name: "rover.nmea".to_string(),
        content: b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\n".to_vec(),
        base_station_id: Some("1".to_string()),
    }
}

pub fn sample_dataset_json(id: u64, name: &str, horizontal_rmse: f64, vertical_rmse: f64) -> Value {
    let format_type = name
        .rsplit_once('.')
        .map(|(_, extension)| extension)
        .unwrap_or("nmea");

    json!({
        "id": id,
        "name": name,
        "upload_date": "2024-03-01T10:00:00",
        "format_type": format_type,
        "results": {
            "horizontal": {
                "rmse": horizontal_rmse,
                "std": 0.01,
                "mean": 0.02,
                "max": 0.05,
                "min": 0.002
            },
            "vertical": {
                "rmse": vertical_rmse,
                "std": 0.02,
                "mean": 0.03,
                "max": 0.09,
                "min": 0.001
            },
            "reference_position": {
                "latitude": 52.5,
                "longitude": 13.4,
                "altitude": 34.0
            },
            "reference_mode": "fixed",
            "num_points": 120
        }
    })
}

pub fn sample_dataset(id: u64, name: &str, horizontal_rmse: f64, vertical_rmse: f64) -> Dataset {
    serde_json::from_value(sample_dataset_json(id, name, horizontal_rmse, vertical_rmse))
        .expect("sample dataset should decode")
}

pub fn sample_dataset_at(id: u64, name: &str, latitude: f64, longitude: f64) -> Dataset {
    let mut dataset = sample_dataset(id, name, 0.1, 0.2);
    dataset.results.reference_position.latitude = latitude;
    dataset.results.reference_position.longitude = longitude;
    dataset
}
