use crate::catalog::CatalogSource;
use crate::chart::{ChartBackend, ChartController};
use crate::config::ChartConfig;
use crate::details::DetailsPanel;
use crate::event::{self, DashboardEvent, EventReceiver, EventSender};
use crate::model::MoleculeId;
use crate::viewer::{ViewerController, ViewerHost};
use std::ops::ControlFlow;
use tracing::{debug, error, info, warn};

pub const LIST_PLACEHOLDER: &str = "Failed to load list";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOption {
    pub id: MoleculeId,
    pub label: String,
}

/// The molecule dropdown.
pub trait SelectionList {
    fn set_options(&mut self, options: &[DropdownOption]);

    /// Replaces all options with one disabled entry showing `text`.
    fn show_placeholder(&mut self, text: &str);

    fn set_value(&mut self, id: MoleculeId);

    fn value(&self) -> Option<MoleculeId>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Uninitialized,
    ListLoaded,
    Selected(MoleculeId),
}

/// The four mount points the dashboard draws into.
pub struct Surfaces<L, H, P, B> {
    pub dropdown: L,
    pub viewer: H,
    pub details: P,
    pub chart: B,
}

/// Routes every selection source through one path so the dropdown and the
/// viewer always agree on the active molecule.
pub struct Dashboard<C, L, H, P, B>
where
    C: CatalogSource,
    L: SelectionList,
    H: ViewerHost,
    P: DetailsPanel,
    B: ChartBackend,
{
    catalog: C,
    dropdown: L,
    viewer: ViewerController<H, P>,
    chart: ChartController<B>,
    state: SelectionState,
    booted: bool,
    events: EventSender,
}

impl<C, L, H, P, B> Dashboard<C, L, H, P, B>
where
    C: CatalogSource,
    L: SelectionList,
    H: ViewerHost,
    P: DetailsPanel,
    B: ChartBackend,
{
    /// Returns the dashboard and the receiving end of its event channel.
    /// Hand the receiver to [`Dashboard::run`].
    pub fn new(catalog: C, surfaces: Surfaces<L, H, P, B>, chart_config: &ChartConfig) -> (Self, EventReceiver) {
        let (tx, rx) = event::channel();
        let dashboard = Self {
            catalog,
            dropdown: surfaces.dropdown,
            viewer: ViewerController::new(surfaces.viewer, surfaces.details),
            chart: ChartController::new(surfaces.chart, chart_config),
            state: SelectionState::Uninitialized,
            booted: false,
            events: tx,
        };
        (dashboard, rx)
    }

    /// Fills the dropdown, selects the first molecule and draws the chart.
    pub async fn boot(&mut self) {
        if self.booted {
            warn!("Dashboard already booted");
            return;
        }
        self.booted = true;

        if let Some(first) = self.populate_dropdown().await {
            self.activate(first).await;
        }

        self.chart.initialize(&self.catalog).await;
    }

    async fn populate_dropdown(&mut self) -> Option<MoleculeId> {
        let listings = match self.catalog.fetch_summary_list().await {
            Ok(listings) => listings,
            Err(err) => {
                error!("Dropdown load error: {err}");
                self.dropdown.show_placeholder(LIST_PLACEHOLDER);
                return None;
            }
        };

        let Some(first) = listings.first() else {
            warn!("Molecule list is empty");
            self.dropdown.show_placeholder(LIST_PLACEHOLDER);
            return None;
        };

        let options: Vec<DropdownOption> = listings
            .iter()
            .map(|m| DropdownOption {
                id: m.id,
                label: m.name.clone(),
            })
            .collect();
        self.dropdown.set_options(&options);
        self.state = SelectionState::ListLoaded;
        info!("Loaded {} molecules into the dropdown", options.len());
        Some(first.id)
    }

    /// Makes `id` the active selection everywhere except the chart.
    async fn activate(&mut self, id: MoleculeId) {
        debug!(molecule = %id, "activating selection");
        self.dropdown.set_value(id);
        self.state = SelectionState::Selected(id);
        self.viewer.select_molecule(&self.catalog, Some(id)).await;
    }

    pub async fn handle_event(&mut self, event: DashboardEvent) -> ControlFlow<()> {
        match event {
            DashboardEvent::DropdownChanged(Some(id)) => self.activate(id).await,
            DashboardEvent::DropdownChanged(None) => {
                self.viewer.select_molecule(&self.catalog, None).await;
            }
            // Activated in place so a later queued event still wins.
            DashboardEvent::ChartClicked(hits) => {
                if let Some(id) = self.chart.handle_click(&hits) {
                    self.activate(id).await;
                }
            }
            DashboardEvent::PointSelected(id) => self.activate(id).await,
            DashboardEvent::ProjectionRequested(name) => self.chart.switch_projection(&name),
            DashboardEvent::Shutdown => {
                info!("Dashboard shutting down");
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    /// Handles events until [`DashboardEvent::Shutdown`] arrives. The
    /// dashboard keeps a sender of its own, so the channel never closes
    /// underneath it.
    pub async fn run(&mut self, mut events: EventReceiver) {
        while let Some(event) = events.recv().await {
            if self.handle_event(event).await.is_break() {
                break;
            }
        }
    }

    /// Sender for dropdown, click and projection events.
    pub fn events(&self) -> EventSender {
        self.events.clone()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn dropdown(&self) -> &L {
        &self.dropdown
    }

    pub fn viewer(&self) -> &ViewerController<H, P> {
        &self.viewer
    }

    pub fn chart(&self) -> &ChartController<B> {
        &self.chart
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }
}
