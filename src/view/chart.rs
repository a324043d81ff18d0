use rand::Rng;

use crate::domain::format::upload_timestamp_ms;
use crate::domain::models::Dataset;
use crate::view::ViewError;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    /// Upload time in epoch milliseconds; `None` when the date could not be read.
    pub x: Option<i64>,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<ChartPoint>,
    pub color: String,
}

pub trait ChartSurface {
    fn replace_series(&mut self, series: Vec<Series>);
    fn redraw(&mut self) -> Result<(), ViewError>;
}

pub trait ColorSource {
    fn next_color(&self) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomColors;

impl ColorSource for RandomColors {
    fn next_color(&self) -> String {
        let mut rng = rand::rng();
        let mut color = String::with_capacity(7);
        color.push('#');
        for _ in 0..6 {
            color.push(char::from(HEX_DIGITS[rng.random_range(0..HEX_DIGITS.len())]));
        }
        color
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryChart {
    pub series: Vec<Series>,
    pub redraws: usize,
}

impl ChartSurface for MemoryChart {
    fn replace_series(&mut self, series: Vec<Series>) {
        self.series = series;
    }

    fn redraw(&mut self) -> Result<(), ViewError> {
        self.redraws += 1;
        Ok(())
    }
}

pub fn render_chart<C, S>(
    datasets: &[Dataset],
    chart: &mut C,
    colors: &S,
) -> Result<(), ViewError>
where
    C: ChartSurface,
    S: ColorSource + ?Sized,
{
    let series = datasets
        .iter()
        .map(|dataset| Series {
            label: dataset.name.clone(),
            points: vec![ChartPoint {
                x: upload_timestamp_ms(&dataset.upload_date),
                y: dataset.results.horizontal.rmse,
            }],
            color: colors.next_color(),
        })
        .collect();

    chart.replace_series(series);
    chart.redraw()
}
