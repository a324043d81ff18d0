use std::time::Duration;

use crate::view::alerts::AlertBoard;
use crate::view::chart::ChartSurface;
use crate::view::details::DetailsModal;
use crate::view::map::MapSurface;
use crate::view::table::ResultsTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressBar {
    visible: bool,
    percent: u8,
}

impl ProgressBar {
    pub fn start(&mut self) {
        self.visible = true;
        self.percent = 0;
    }

    pub fn advance(&mut self, percent: u8) {
        self.percent = percent.min(100);
    }

    pub fn reset(&mut self) {
        self.visible = false;
        self.percent = 0;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub path: String,
    pub delay: Duration,
}

pub struct UploadPage {
    pub progress: ProgressBar,
    pub station_options: Vec<SelectOption>,
    pub alerts: AlertBoard,
    pub redirect: Option<Redirect>,
}

impl UploadPage {
    pub fn new(alerts: AlertBoard) -> Self {
        Self {
            progress: ProgressBar::default(),
            station_options: Vec::new(),
            alerts,
            redirect: None,
        }
    }
}

/// The dashboard owns its map and chart handles for the lifetime of the page.
pub struct DashboardPage<M, C> {
    pub table: ResultsTable,
    pub map: M,
    pub chart: C,
    pub modal: DetailsModal,
    pub alerts: AlertBoard,
    pub redirect: Option<Redirect>,
}

impl<M, C> DashboardPage<M, C>
where
    M: MapSurface,
    C: ChartSurface,
{
    pub fn new(map: M, chart: C, alerts: AlertBoard) -> Self {
        Self {
            table: ResultsTable::default(),
            map,
            chart,
            modal: DetailsModal::default(),
            alerts,
            redirect: None,
        }
    }
}
