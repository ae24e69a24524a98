use crate::catalog::CatalogSource;
use crate::config::ChartConfig;
use crate::model::{MoleculeId, MoleculeSummary};
use tracing::{debug, error, info, warn};

pub const ENERGY_AXIS_TITLE: &str = "Free Energy (kcal/mol)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotProjection {
    #[default]
    Scatter,
    Bar,
}

impl PlotProjection {
    /// Unknown names fall back to scatter.
    pub fn from_query(value: Option<&str>) -> Self {
        match value.unwrap_or("scatter").trim().to_lowercase().as_str() {
            "bar" => PlotProjection::Bar,
            _ => PlotProjection::Scatter,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlotProjection::Scatter => "scatter",
            PlotProjection::Bar => "bar",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AxisScale {
    Linear { label_every_tick: bool },
    Category { labels: Vec<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub title: &'static str,
    pub scale: AxisScale,
}

/// Which axes respond to pan and zoom gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanZoom {
    BothAxes,
    YOnly,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
    pub tooltip: String,
}

/// Everything a chart backend needs to draw one projection. Points are in
/// catalog order, so a point index is also an index into the data source.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub projection: PlotProjection,
    pub dataset_label: &'static str,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub points: Vec<ChartPoint>,
    pub color: String,
    pub show_legend: bool,
    pub pan_zoom: PanZoom,
}

pub fn scatter_tooltip(m: &MoleculeSummary) -> String {
    format!(
        "ID {} • ΔG: {:.6} • {} — {}",
        m.id, m.free_energy, m.formula, m.name
    )
}

pub fn bar_tooltip(m: &MoleculeSummary) -> String {
    format!("ΔG: {:.6} • {} — {}", m.free_energy, m.formula, m.name)
}

pub fn chart_spec(projection: PlotProjection, molecules: &[MoleculeSummary], color: &str) -> ChartSpec {
    let energy_axis = Axis {
        title: ENERGY_AXIS_TITLE,
        scale: AxisScale::Linear {
            label_every_tick: false,
        },
    };

    match projection {
        PlotProjection::Scatter => ChartSpec {
            projection,
            dataset_label: "Molecules",
            x_axis: Axis {
                title: "Molecule ID",
                scale: AxisScale::Linear {
                    label_every_tick: true,
                },
            },
            y_axis: energy_axis,
            points: molecules
                .iter()
                .map(|m| ChartPoint {
                    x: m.id.0 as f64,
                    y: m.free_energy,
                    tooltip: scatter_tooltip(m),
                })
                .collect(),
            color: color.to_string(),
            show_legend: false,
            pan_zoom: PanZoom::BothAxes,
        },
        PlotProjection::Bar => ChartSpec {
            projection,
            dataset_label: ENERGY_AXIS_TITLE,
            x_axis: Axis {
                title: "Molecule",
                scale: AxisScale::Category {
                    labels: molecules.iter().map(|m| format!("ID {}", m.id)).collect(),
                },
            },
            y_axis: energy_axis,
            points: molecules
                .iter()
                .enumerate()
                .map(|(i, m)| ChartPoint {
                    x: i as f64,
                    y: m.free_energy,
                    tooltip: bar_tooltip(m),
                })
                .collect(),
            color: color.to_string(),
            show_legend: false,
            pan_zoom: PanZoom::YOnly,
        },
    }
}

/// A live chart instance.
pub trait ChartHandle {
    /// Tears the instance down. Consumes the handle so a disposed chart
    /// cannot be drawn to again.
    fn dispose(self);
}

/// The canvas a chart is drawn on.
pub trait ChartBackend {
    type Chart: ChartHandle;

    fn create(&mut self, spec: &ChartSpec) -> Self::Chart;
}

/// Owns the one chart instance and the catalog data behind it. Clicks
/// resolve to molecule ids for the caller to act on; selections made
/// elsewhere never reach the chart.
pub struct ChartController<B: ChartBackend> {
    backend: B,
    chart: Option<B::Chart>,
    molecules: Vec<MoleculeSummary>,
    projection: PlotProjection,
    point_color: String,
    initialized: bool,
}

impl<B: ChartBackend> ChartController<B> {
    pub fn new(backend: B, config: &ChartConfig) -> Self {
        Self {
            backend,
            chart: None,
            molecules: Vec::new(),
            projection: PlotProjection::default(),
            point_color: config.point_color.clone(),
            initialized: false,
        }
    }

    /// Fetches the chart data once and draws the default projection. A
    /// failed or empty fetch leaves the canvas blank.
    pub async fn initialize<C: CatalogSource>(&mut self, catalog: &C) {
        if self.initialized {
            warn!("Chart already initialized, keeping existing data");
            return;
        }
        self.initialized = true;

        match catalog.fetch_chart_data().await {
            Ok(molecules) => {
                info!("Loaded {} molecules for the chart", molecules.len());
                self.molecules = molecules;
            }
            Err(err) => {
                error!("Chart data load error: {err}");
                return;
            }
        }

        if self.molecules.is_empty() {
            warn!("Chart catalog is empty, nothing to draw");
            return;
        }
        self.render(PlotProjection::default());
    }

    /// Redraws from the data already fetched.
    pub fn switch_projection(&mut self, name: &str) {
        if self.molecules.is_empty() {
            debug!("Ignoring projection switch to {name:?}: no chart data");
            return;
        }
        self.render(PlotProjection::from_query(Some(name)));
    }

    fn render(&mut self, projection: PlotProjection) {
        if let Some(chart) = self.chart.take() {
            debug!("Disposing {} chart", self.projection.as_str());
            chart.dispose();
        }
        let spec = chart_spec(projection, &self.molecules, &self.point_color);
        self.chart = Some(self.backend.create(&spec));
        self.projection = projection;
        debug!("Rendered {} chart", projection.as_str());
    }

    /// Resolves the first hit to the molecule under it. Misses and stale
    /// indices resolve to nothing.
    pub fn handle_click(&self, hits: &[usize]) -> Option<MoleculeId> {
        if self.chart.is_none() {
            return None;
        }
        let index = *hits.first()?;
        let Some(molecule) = self.molecules.get(index) else {
            warn!("Chart click on index {index} outside of {} points", self.molecules.len());
            return None;
        };
        debug!(molecule = %molecule.id, "chart point selected");
        Some(molecule.id)
    }

    pub fn projection(&self) -> PlotProjection {
        self.projection
    }

    pub fn molecules(&self) -> &[MoleculeSummary] {
        &self.molecules
    }

    pub fn is_rendered(&self) -> bool {
        self.chart.is_some()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: ChartBackend> Drop for ChartController<B> {
    fn drop(&mut self) {
        if let Some(chart) = self.chart.take() {
            chart.dispose();
        }
    }
}
