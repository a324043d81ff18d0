use crate::domain::format::{fixed, meters};
use crate::domain::models::{AxisStats, Dataset, DatasetId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatLines {
    pub rmse: String,
    pub std: String,
    pub mean: String,
    pub max: String,
    pub min: String,
}

impl From<&AxisStats> for StatLines {
    fn from(stats: &AxisStats) -> Self {
        Self {
            rmse: meters(stats.rmse),
            std: meters(stats.std),
            mean: meters(stats.mean),
            max: meters(stats.max),
            min: meters(stats.min),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisDetails {
    pub dataset_id: DatasetId,
    pub dataset_name: String,
    pub horizontal: StatLines,
    pub vertical: StatLines,
    pub latitude: String,
    pub longitude: String,
    pub altitude: String,
    pub reference_mode: String,
}

impl From<&Dataset> for AnalysisDetails {
    fn from(dataset: &Dataset) -> Self {
        let results = &dataset.results;
        Self {
            dataset_id: dataset.id.clone(),
            dataset_name: dataset.name.clone(),
            horizontal: StatLines::from(&results.horizontal),
            vertical: StatLines::from(&results.vertical),
            latitude: fixed(results.reference_position.latitude, 7),
            longitude: fixed(results.reference_position.longitude, 7),
            altitude: meters(results.reference_position.altitude),
            reference_mode: results.reference_mode.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailsModal {
    pub details: Option<AnalysisDetails>,
    pub visible: bool,
}

impl DetailsModal {
    pub fn show(&mut self, dataset: &Dataset) {
        self.details = Some(AnalysisDetails::from(dataset));
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }
}
