//! Price and volume charts over trade index.
//!
//! Both panels share the x domain `0..N-1`: the position of the trade in
//! the log, not its timestamp.

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;
use textplots::{Chart, Plot, Shape};

use crate::error::AnalyzerError;
use crate::table::TradeTable;

pub const PRICE_TITLE: &str = "trade price dynamics";
pub const VOLUME_TITLE: &str = "trade volume (quantity)";
pub const INDEX_LABEL: &str = "trade index";
pub const PRICE_LABEL: &str = "price";
pub const QUANTITY_LABEL: &str = "quantity";

const SVG_SIZE: (u32, u32) = (1000, 600);
const TEXT_WIDTH: u32 = 160;
const TEXT_HEIGHT: u32 = 50;

/// Series shared by every chart renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub prices: Vec<(f64, f64)>,
    pub quantities: Vec<(f64, f64)>,
}

impl ChartData {
    pub fn from_table(table: &TradeTable) -> Self {
        Self {
            prices: table.prices(),
            quantities: table
                .quantities()
                .into_iter()
                .enumerate()
                .map(|(i, q)| (i as f64, q as f64))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// `[0, N-1]`, widened to `[0, 1]` for a single trade.
    pub fn x_bounds(&self) -> [f64; 2] {
        let last = self.len().saturating_sub(1) as f64;
        [0.0, last.max(1.0)]
    }

    /// Price range with 5% headroom on each side.
    pub fn price_bounds(&self) -> [f64; 2] {
        let min = self.prices.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let max = self.prices.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);

        if !min.is_finite() || !max.is_finite() {
            return [0.0, 1.0];
        }

        let padding = if max > min { (max - min) * 0.05 } else { 1.0 };
        [(min - padding).max(0.0), max + padding]
    }

    pub fn max_quantity(&self) -> f64 {
        self.quantities.iter().map(|q| q.1).fold(1.0, f64::max)
    }
}

/// Both panels as braille text plots, price above volume.
pub fn render_text(data: &ChartData) -> String {
    let [xmin, xmax] = data.x_bounds();
    let (xmin, xmax) = (xmin as f32, xmax as f32);

    let prices: Vec<(f32, f32)> = data.prices.iter().map(|&(x, y)| (x as f32, y as f32)).collect();
    let quantities: Vec<(f32, f32)> = data.quantities.iter().map(|&(x, y)| (x as f32, y as f32)).collect();
    let price_points = Shape::Points(&prices);
    let price_line = Shape::Lines(&prices);
    let volume_bars = Shape::Bars(&quantities);

    let price_panel = {
        let mut chart = Chart::new(TEXT_WIDTH, TEXT_HEIGHT, xmin, xmax);
        let chart = chart.lineplot(&price_points).lineplot(&price_line);
        chart.axis();
        chart.figures();
        chart.to_string()
    };

    let volume_panel = {
        let mut chart = Chart::new(TEXT_WIDTH, TEXT_HEIGHT, xmin, xmax);
        let chart = chart.lineplot(&volume_bars);
        chart.axis();
        chart.figures();
        chart.to_string()
    };

    format!(
        "{} ({} / {})\n{}\n{} ({} / {})\n{}",
        PRICE_TITLE, INDEX_LABEL, PRICE_LABEL, price_panel, VOLUME_TITLE, INDEX_LABEL, QUANTITY_LABEL, volume_panel
    )
}

pub fn print_text(data: &ChartData) {
    println!("{}", render_text(data));
}

/// Writes the two-panel figure to an SVG file.
pub fn render_svg(path: impl AsRef<Path>, data: &ChartData) -> Result<(), AnalyzerError> {
    let path = path.as_ref();
    draw_figure(path, data).map_err(|source| AnalyzerError::Chart {
        path: path.to_path_buf(),
        source,
    })
}

fn draw_figure(path: &Path, data: &ChartData) -> Result<(), Box<dyn Error + Send + Sync>> {
    let root = SVGBackend::new(path, SVG_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let panels = root.split_evenly((2, 1));
    let [xmin, xmax] = data.x_bounds();
    let [ymin, ymax] = data.price_bounds();

    let mut price_chart = ChartBuilder::on(&panels[0])
        .caption(PRICE_TITLE, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d(xmin - 0.5..xmax + 0.5, ymin..ymax)?;

    price_chart
        .configure_mesh()
        .x_desc(INDEX_LABEL)
        .y_desc(PRICE_LABEL)
        .draw()?;

    price_chart.draw_series(LineSeries::new(data.prices.iter().copied(), &BLUE))?;
    price_chart.draw_series(
        data.prices
            .iter()
            .map(|&point| Circle::new(point, 3, BLUE.filled())),
    )?;

    let mut volume_chart = ChartBuilder::on(&panels[1])
        .caption(VOLUME_TITLE, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d(xmin - 0.5..xmax + 0.5, 0.0..data.max_quantity() * 1.05)?;

    volume_chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(INDEX_LABEL)
        .y_desc(QUANTITY_LABEL)
        .draw()?;

    volume_chart.draw_series(
        data.quantities
            .iter()
            .map(|&(x, q)| Rectangle::new([(x - 0.4, 0.0), (x + 0.4, q)], GREEN.filled())),
    )?;

    root.present()?;
    Ok(())
}
