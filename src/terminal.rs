//! Text-mode surfaces: every redraw is printed to stdout.

use molecule_dashboard::chart::{AxisScale, ChartBackend, ChartHandle, ChartSpec};
use molecule_dashboard::{
    DashboardEvent, DetailField, DetailsPanel, DropdownOption, MoleculeId, SelectionList,
    ViewerHost, ViewerWidget,
};

pub const HELP: &str = "commands: select <id> | click <index> | plot <scatter|bar> | quit";

#[derive(Default)]
pub struct TerminalDropdown {
    options: Vec<DropdownOption>,
    value: Option<MoleculeId>,
}

impl SelectionList for TerminalDropdown {
    fn set_options(&mut self, options: &[DropdownOption]) {
        self.options = options.to_vec();
        self.value = None;
        println!("[molecules]");
        for option in options {
            println!("  {:>6}  {}", option.id, option.label);
        }
    }

    fn show_placeholder(&mut self, text: &str) {
        self.options.clear();
        self.value = None;
        println!("[molecules] ({text})");
    }

    fn set_value(&mut self, id: MoleculeId) {
        self.value = Some(id);
        match self.options.iter().find(|o| o.id == id) {
            Some(option) => println!("[molecules] selected {} ({})", option.label, id),
            None => println!("[molecules] selected {id}"),
        }
    }

    fn value(&self) -> Option<MoleculeId> {
        self.value
    }
}

pub struct TerminalViewer {
    background: String,
}

impl TerminalViewer {
    pub fn new(background: impl Into<String>) -> Self {
        Self {
            background: background.into(),
        }
    }
}

pub struct TerminalWidget;

impl ViewerWidget for TerminalWidget {
    fn script(&self, command: &str) {
        let verb = command.split_whitespace().take(2).collect::<Vec<_>>().join(" ");
        println!("[viewer] {verb} ({} lines)", command.lines().count());
    }
}

impl ViewerHost for TerminalViewer {
    type Widget = TerminalWidget;

    fn create_widget(&mut self) -> TerminalWidget {
        println!("[viewer] mounted (background {})", self.background);
        TerminalWidget
    }

    fn show_widget(&mut self, _widget: &TerminalWidget) {
        println!("[viewer] restored");
    }

    fn show_error(&mut self, message: &str) {
        println!("[viewer] {message}");
    }
}

pub struct TerminalDetails;

impl DetailsPanel for TerminalDetails {
    fn show_fields(&mut self, fields: &[DetailField]) {
        println!("[details]");
        for field in fields {
            println!("  {:<17} {}", format!("{}:", field.label), field.value);
        }
    }

    fn show_error(&mut self, message: &str) {
        println!("[details] {message}");
    }
}

#[derive(Default)]
pub struct TerminalChart {
    created: usize,
}

pub struct TerminalChartHandle {
    serial: usize,
}

impl ChartHandle for TerminalChartHandle {
    fn dispose(self) {
        println!("[chart #{}] disposed", self.serial);
    }
}

impl ChartBackend for TerminalChart {
    type Chart = TerminalChartHandle;

    fn create(&mut self, spec: &ChartSpec) -> TerminalChartHandle {
        self.created += 1;
        println!(
            "[chart #{}] {} of {} vs {}",
            self.created,
            spec.projection.as_str(),
            spec.y_axis.title,
            spec.x_axis.title
        );
        for (index, point) in spec.points.iter().enumerate() {
            let x = match &spec.x_axis.scale {
                AxisScale::Category { labels } => labels.get(index).cloned().unwrap_or_default(),
                AxisScale::Linear { .. } => point.x.to_string(),
            };
            println!("  {index:>4}  {x:<10} {}", point.tooltip);
        }
        TerminalChartHandle {
            serial: self.created,
        }
    }
}

/// Maps one line of stdin to an event. `None` for blank or unknown input.
pub fn parse_command(line: &str) -> Option<DashboardEvent> {
    let mut words = line.split_whitespace();
    let command = words.next()?;
    let arg = words.next();
    match command {
        "select" => Some(DashboardEvent::DropdownChanged(arg.and_then(MoleculeId::parse))),
        "click" => {
            let hits = arg.and_then(|a| a.parse().ok()).into_iter().collect();
            Some(DashboardEvent::ChartClicked(hits))
        }
        "plot" => Some(DashboardEvent::ProjectionRequested(
            arg.unwrap_or("scatter").to_string(),
        )),
        "quit" | "exit" => Some(DashboardEvent::Shutdown),
        _ => None,
    }
}
