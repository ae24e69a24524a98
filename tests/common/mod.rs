#![allow(dead_code)]

use molecule_dashboard::chart::{ChartBackend, ChartHandle, ChartSpec, PlotProjection};
use molecule_dashboard::config::ChartConfig;
use molecule_dashboard::dashboard::Surfaces;
use molecule_dashboard::{
    CatalogSource, Dashboard, DashboardEvent, DetailField, DetailsPanel, DropdownOption,
    EventReceiver, MoleculeDetail, MoleculeId, MoleculeListing, MoleculeSummary, NetworkError,
    SelectionList, StructurePayload, ViewerHost, ViewerWidget,
};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum Fetch {
    List,
    Chart,
    Structure(MoleculeId),
    Detail(MoleculeId),
}

/// In-memory catalog that records every request it serves.
#[derive(Default)]
pub struct FakeCatalog {
    pub listings: Vec<MoleculeListing>,
    pub summaries: Vec<MoleculeSummary>,
    pub details: HashMap<MoleculeId, MoleculeDetail>,
    pub fail_list: bool,
    pub fail_chart: bool,
    pub failing_structures: RefCell<HashSet<MoleculeId>>,
    pub failing_details: RefCell<HashSet<MoleculeId>>,
    pub fetches: RefCell<Vec<Fetch>>,
}

fn server_error(path: String) -> NetworkError {
    NetworkError::Status {
        url: format!("http://fake/api/{path}"),
        status: 500,
    }
}

fn not_found(path: String) -> NetworkError {
    NetworkError::Status {
        url: format!("http://fake/api/{path}"),
        status: 404,
    }
}

pub fn xyz_for(id: MoleculeId) -> String {
    format!("1\nmolecule {id}\nC 0.0 0.0 {id}.0\n")
}

impl FakeCatalog {
    pub fn count(&self, fetch: &Fetch) -> usize {
        self.fetches.borrow().iter().filter(|f| *f == fetch).count()
    }

    pub fn structure_fetches(&self) -> usize {
        self.fetches
            .borrow()
            .iter()
            .filter(|f| matches!(f, Fetch::Structure(_)))
            .count()
    }
}

impl CatalogSource for FakeCatalog {
    async fn fetch_summary_list(&self) -> Result<Vec<MoleculeListing>, NetworkError> {
        self.fetches.borrow_mut().push(Fetch::List);
        if self.fail_list {
            return Err(server_error("molecules".to_string()));
        }
        Ok(self.listings.clone())
    }

    async fn fetch_chart_data(&self) -> Result<Vec<MoleculeSummary>, NetworkError> {
        self.fetches.borrow_mut().push(Fetch::Chart);
        if self.fail_chart {
            return Err(server_error("molecules/chart".to_string()));
        }
        Ok(self.summaries.clone())
    }

    async fn fetch_structure(&self, id: MoleculeId) -> Result<StructurePayload, NetworkError> {
        self.fetches.borrow_mut().push(Fetch::Structure(id));
        if self.failing_structures.borrow().contains(&id) {
            return Err(server_error(format!("molecule/{id}")));
        }
        if !self.details.contains_key(&id) {
            return Err(not_found(format!("molecule/{id}")));
        }
        Ok(StructurePayload::new(xyz_for(id)))
    }

    async fn fetch_detail(&self, id: MoleculeId) -> Result<MoleculeDetail, NetworkError> {
        self.fetches.borrow_mut().push(Fetch::Detail(id));
        if self.failing_details.borrow().contains(&id) {
            return Err(server_error(format!("molecule/{id}/details")));
        }
        self.details
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(format!("molecule/{id}/details")))
    }
}

fn summary(id: i64, name: &str, formula: &str, energy: f64) -> MoleculeSummary {
    MoleculeSummary {
        id: MoleculeId(id),
        name: name.to_string(),
        formula: formula.to_string(),
        free_energy: energy,
    }
}

/// Three molecules. The list endpoint sorts by name, the chart by id, so the
/// first dropdown entry is Ethanol (12) while chart index 1 is Water (7).
pub fn sample_catalog() -> FakeCatalog {
    let summaries = vec![
        summary(3, "Methane", "CH4", -40.518),
        summary(7, "Water", "H2O", -12.5),
        summary(12, "Ethanol", "C2H6O", -76.2591234567),
    ];
    let mut listings: Vec<MoleculeListing> = summaries
        .iter()
        .map(|s| MoleculeListing {
            id: s.id,
            name: s.name.clone(),
        })
        .collect();
    listings.sort_by(|a, b| a.name.cmp(&b.name));

    let details = summaries
        .iter()
        .map(|s| {
            let detail = MoleculeDetail {
                id: s.id,
                name: s.name.clone(),
                formula: Some(s.formula.clone()),
                molecular_weight: (s.id.0 != 7).then_some(s.id.0 as f64 * 3.5),
                free_energy: Some(s.free_energy),
                pubchem_cid: Some(format!("{}", 1000 + s.id.0)),
            };
            (s.id, detail)
        })
        .collect();

    FakeCatalog {
        listings,
        summaries,
        details,
        ..FakeCatalog::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiCall {
    Options(Vec<MoleculeId>),
    Placeholder(String),
    DropdownValue(MoleculeId),
    WidgetCreated,
    Script(String),
    ViewerError(String),
    ViewerRestored,
    Details(Vec<DetailField>),
    DetailsError(String),
    ChartCreated(PlotProjection),
    ChartDisposed(PlotProjection),
}

/// Shared, ordered record of everything the fake surfaces were asked to do.
#[derive(Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<UiCall>>>);

impl Journal {
    fn push(&self, call: UiCall) {
        self.0.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<UiCall> {
        self.0.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&UiCall) -> bool) -> usize {
        self.0.borrow().iter().filter(|c| pred(c)).count()
    }

    pub fn chart_calls(&self) -> Vec<UiCall> {
        self.0
            .borrow()
            .iter()
            .filter(|c| matches!(c, UiCall::ChartCreated(_) | UiCall::ChartDisposed(_)))
            .cloned()
            .collect()
    }

    pub fn last_details(&self) -> Option<UiCall> {
        self.0
            .borrow()
            .iter()
            .rev()
            .find(|c| matches!(c, UiCall::Details(_) | UiCall::DetailsError(_)))
            .cloned()
    }
}

pub struct FakeDropdown {
    journal: Journal,
    value: Option<MoleculeId>,
}

impl SelectionList for FakeDropdown {
    fn set_options(&mut self, options: &[DropdownOption]) {
        self.journal
            .push(UiCall::Options(options.iter().map(|o| o.id).collect()));
    }

    fn show_placeholder(&mut self, text: &str) {
        self.value = None;
        self.journal.push(UiCall::Placeholder(text.to_string()));
    }

    fn set_value(&mut self, id: MoleculeId) {
        self.value = Some(id);
        self.journal.push(UiCall::DropdownValue(id));
    }

    fn value(&self) -> Option<MoleculeId> {
        self.value
    }
}

pub struct FakeViewer {
    journal: Journal,
}

pub struct FakeWidget {
    journal: Journal,
}

impl ViewerWidget for FakeWidget {
    fn script(&self, command: &str) {
        self.journal.push(UiCall::Script(command.to_string()));
    }
}

impl ViewerHost for FakeViewer {
    type Widget = FakeWidget;

    fn create_widget(&mut self) -> FakeWidget {
        self.journal.push(UiCall::WidgetCreated);
        FakeWidget {
            journal: self.journal.clone(),
        }
    }

    fn show_widget(&mut self, _widget: &FakeWidget) {
        self.journal.push(UiCall::ViewerRestored);
    }

    fn show_error(&mut self, message: &str) {
        self.journal.push(UiCall::ViewerError(message.to_string()));
    }
}

pub struct FakeDetails {
    journal: Journal,
}

impl DetailsPanel for FakeDetails {
    fn show_fields(&mut self, fields: &[DetailField]) {
        self.journal.push(UiCall::Details(fields.to_vec()));
    }

    fn show_error(&mut self, message: &str) {
        self.journal.push(UiCall::DetailsError(message.to_string()));
    }
}

pub struct FakeChart {
    journal: Journal,
}

pub struct FakeChartHandle {
    journal: Journal,
    projection: PlotProjection,
}

impl ChartHandle for FakeChartHandle {
    fn dispose(self) {
        self.journal.push(UiCall::ChartDisposed(self.projection));
    }
}

impl ChartBackend for FakeChart {
    type Chart = FakeChartHandle;

    fn create(&mut self, spec: &ChartSpec) -> FakeChartHandle {
        self.journal.push(UiCall::ChartCreated(spec.projection));
        FakeChartHandle {
            journal: self.journal.clone(),
            projection: spec.projection,
        }
    }
}

pub type TestDashboard<C> = Dashboard<C, FakeDropdown, FakeViewer, FakeDetails, FakeChart>;

pub fn dashboard_with<C: CatalogSource>(catalog: C) -> (TestDashboard<C>, EventReceiver, Journal) {
    let journal = Journal::default();
    let surfaces = Surfaces {
        dropdown: FakeDropdown {
            journal: journal.clone(),
            value: None,
        },
        viewer: FakeViewer {
            journal: journal.clone(),
        },
        details: FakeDetails {
            journal: journal.clone(),
        },
        chart: FakeChart {
            journal: journal.clone(),
        },
    };
    let (dashboard, rx) = Dashboard::new(catalog, surfaces, &ChartConfig::default());
    (dashboard, rx, journal)
}

/// Handles every queued event, including ones emitted while handling.
pub async fn drain<C: CatalogSource>(dashboard: &mut TestDashboard<C>, rx: &mut EventReceiver) {
    while let Ok(event) = rx.try_recv() {
        let _ = dashboard.handle_event(event).await;
    }
}

pub fn assert_in_sync<C: CatalogSource>(dashboard: &TestDashboard<C>, expected: MoleculeId) {
    assert_eq!(dashboard.dropdown().value(), Some(expected));
    assert_eq!(
        dashboard.state(),
        molecule_dashboard::SelectionState::Selected(expected)
    );
}

pub fn select(id: i64) -> DashboardEvent {
    DashboardEvent::DropdownChanged(Some(MoleculeId(id)))
}
