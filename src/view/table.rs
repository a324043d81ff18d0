use crate::domain::format::{format_upload_date, meters};
use crate::domain::models::{Dataset, DatasetId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    Details(DatasetId),
    Delete(DatasetId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub dataset_id: DatasetId,
    pub name: String,
    pub uploaded: String,
    pub format_type: String,
    pub horizontal_rmse: String,
    pub vertical_rmse: String,
    pub num_points: String,
    pub actions: [RowAction; 2],
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsTable {
    pub rows: Vec<TableRow>,
}

pub fn render_table(datasets: &[Dataset], table: &mut ResultsTable, date_format: &str) {
    table.rows = datasets
        .iter()
        .map(|dataset| TableRow {
            dataset_id: dataset.id.clone(),
            name: dataset.name.clone(),
            uploaded: format_upload_date(&dataset.upload_date, date_format),
            format_type: dataset.format_type.clone(),
            horizontal_rmse: meters(dataset.results.horizontal.rmse),
            vertical_rmse: meters(dataset.results.vertical.rmse),
            num_points: dataset.results.num_points.to_string(),
            actions: [
                RowAction::Details(dataset.id.clone()),
                RowAction::Delete(dataset.id.clone()),
            ],
        })
        .collect();
}
