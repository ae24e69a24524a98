//! Keeps a molecule dropdown, a 3D structure viewer and a free-energy chart
//! in agreement about which molecule is selected.
//!
//! The rendering surfaces are traits ([`dashboard::SelectionList`],
//! [`viewer::ViewerHost`], [`details::DetailsPanel`], [`chart::ChartBackend`])
//! so the selection logic runs the same against a browser bridge, a terminal
//! or test fakes.

pub mod catalog;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod details;
pub mod error;
pub mod event;
pub mod logging;
pub mod model;
pub mod viewer;

pub use catalog::{CatalogSource, HttpCatalog};
pub use chart::{ChartBackend, ChartController, ChartHandle, ChartSpec, PlotProjection};
pub use config::DashboardConfig;
pub use dashboard::{Dashboard, DropdownOption, SelectionList, SelectionState, Surfaces};
pub use details::{DetailField, DetailsPanel};
pub use error::{DashboardError, NetworkError};
pub use event::{DashboardEvent, EventReceiver, EventSender};
pub use model::{MoleculeDetail, MoleculeId, MoleculeListing, MoleculeSummary, StructurePayload};
pub use viewer::{ViewerController, ViewerHost, ViewerWidget};
