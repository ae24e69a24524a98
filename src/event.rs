use crate::model::MoleculeId;
use tokio::sync::mpsc;

/// Everything that can change what the dashboard shows. The coordinator is
/// the only consumer and handles events one at a time, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// The user picked an entry in the dropdown. `None` when the raw value
    /// did not name a molecule.
    DropdownChanged(Option<MoleculeId>),
    /// Element indices the chart backend reports under a click, nearest first.
    ChartClicked(Vec<usize>),
    /// A chart point the host's chart library already resolved to a molecule.
    PointSelected(MoleculeId),
    /// Projection switch, by name (`scatter`, `bar`).
    ProjectionRequested(String),
    Shutdown,
}

pub type EventSender = mpsc::UnboundedSender<DashboardEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<DashboardEvent>;

pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
