//! Grouped bar charts: one per tracked statistic, teams on the x-axis, one
//! bar per season.

use crate::{
    storage::BlobStore,
    types::{CleanedDataset, Kpi, Year},
    Result,
};
use anyhow::Context;
use plotters::prelude::*;
use plotters::style::FontTransform;
use std::{collections::HashMap, sync::Arc};
use tracing::{error, info, warn};


const CHART_HEIGHT: u32 = 700;
const MIN_CHART_WIDTH: u32 = 1400;
const PIXELS_PER_TEAM: u32 = 70;
/// Horizontal gap on each side of a team's bar group, in team-slot units.
const GROUP_PAD: f64 = 0.1;

/// `<statistic>_by_team_and_year.svg`
pub fn chart_file_name(kpi: Kpi) -> String {
    format!("{}_by_team_and_year.svg", kpi.as_str())
}

/// Values for one chart, teams already ranked.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub kpi: Kpi,
    /// Teams by descending multi-season mean.
    pub teams: Vec<String>,
    pub seasons: Vec<Year>,
    /// `values[team][season]`, `None` where the team did not play that season.
    pub values: Vec<Vec<Option<f64>>>,
}

impl ChartData {
    pub fn max_value(&self) -> f64 {
        self.values
            .iter()
            .flatten()
            .flatten()
            .copied()
            .fold(0.0, f64::max)
    }
}

/// Sum per (team, season), average per team across seasons, rank teams by
/// that mean descending. Ties keep the dataset's first-seen team order.
pub fn chart_data(dataset: &CleanedDataset, kpi: Kpi) -> ChartData {
    let seasons: Vec<Year> = dataset.years().into_iter().collect();

    let mut teams: Vec<String> = Vec::new();
    let mut totals: HashMap<(&str, Year), f64> = HashMap::new();
    for record in dataset.records() {
        if !teams.iter().any(|t| *t == record.team_name) {
            teams.push(record.team_name.clone());
        }
        *totals
            .entry((record.team_name.as_str(), record.year))
            .or_default() += record.stat(kpi);
    }

    let mean = |team: &str| {
        let per_season: Vec<f64> = seasons
            .iter()
            .filter_map(|year| totals.get(&(team, *year)).copied())
            .collect();
        per_season.iter().sum::<f64>() / per_season.len().max(1) as f64
    };

    let mut ranked: Vec<(String, f64)> = teams
        .into_iter()
        .map(|team| {
            let m = mean(&team);
            (team, m)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let values = ranked
        .iter()
        .map(|(team, _)| {
            seasons
                .iter()
                .map(|year| totals.get(&(team.as_str(), *year)).copied())
                .collect()
        })
        .collect();

    ChartData {
        kpi,
        teams: ranked.into_iter().map(|(team, _)| team).collect(),
        seasons,
        values,
    }
}

/// Draw one grouped bar chart as an SVG document.
pub fn render_svg(data: &ChartData) -> anyhow::Result<String> {
    let team_count = data.teams.len().max(1);
    let season_count = data.seasons.len().max(1);
    let width = MIN_CHART_WIDTH.max(PIXELS_PER_TEAM * team_count as u32 + 200);
    let y_max = (data.max_value() * 1.1).max(1.0);
    let bar_width = (1.0 - 2.0 * GROUP_PAD) / season_count as f64;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(format!("{} by Team and Year", data.kpi), ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(180)
            .y_label_area_size(60)
            .build_cartesian_2d(0f64..team_count as f64, 0f64..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(0)
            .y_desc(data.kpi.as_str())
            .draw()
            .context("drawing mesh")?;

        for (s, season) in data.seasons.iter().enumerate() {
            let color = Palette99::pick(s).to_rgba();
            let bars = data.values.iter().enumerate().filter_map(|(t, row)| {
                let value = row.get(s).copied().flatten()?;
                let x0 = t as f64 + GROUP_PAD + s as f64 * bar_width;
                Some(Rectangle::new([(x0, 0.0), (x0 + bar_width, value)], color.filled()))
            });

            chart
                .draw_series(bars)
                .with_context(|| format!("drawing season {season}"))?
                .label(season.to_string())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));
        }

        let label_style = TextStyle::from(("sans-serif", 13).into_font())
            .transform(FontTransform::Rotate90)
            .color(&BLACK);
        for (t, team) in data.teams.iter().enumerate() {
            let (px, py) = chart.backend_coord(&(t as f64 + 0.5, 0.0));
            root.draw(&Text::new(team.clone(), (px, py + 8), label_style.clone()))?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .context("drawing legend")?;

        root.present()?;
    }

    Ok(svg)
}

/// Which statistics were rendered and which failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderReport {
    pub rendered: Vec<(Kpi, String)>,
    pub failed: Vec<(Kpi, String)>,
}

/// Renders every tracked statistic into a [`BlobStore`].
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    store: Arc<dyn BlobStore>,
}

impl ChartRenderer {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    /// Render one chart per statistic. A failing statistic is logged and
    /// skipped; no dataset means no charts.
    pub async fn render_all(&self, dataset: Option<&CleanedDataset>) -> RenderReport {
        let mut report = RenderReport::default();
        let Some(dataset) = dataset.filter(|d| !d.is_empty()) else {
            error!("no data available for plotting");
            return report;
        };

        for kpi in Kpi::ALL {
            match self.render_one(dataset, kpi).await {
                Ok(location) => {
                    info!(%kpi, %location, "saved chart");
                    report.rendered.push((kpi, location));
                }
                Err(e) => {
                    warn!(%kpi, error = %e, "error creating chart");
                    report.failed.push((kpi, e.to_string()));
                }
            }
        }
        report
    }

    async fn render_one(&self, dataset: &CleanedDataset, kpi: Kpi) -> Result<String> {
        let data = chart_data(dataset, kpi);
        let svg = render_svg(&data)?;
        let key = chart_file_name(kpi);
        self.store.put(&key, svg.into_bytes()).await?;
        Ok(self.store.location(&key))
    }
}
