use crate::catalog::CatalogSource;
use crate::details::{render_details, DetailsPanel};
use crate::model::{MoleculeId, StructurePayload};
use once_cell::unsync::OnceCell;
use tracing::{debug, error, info};

pub const VIEWER_ERROR: &str = "Failed to load molecule.";

/// Handle to a mounted 3D viewer. Commands go through the rendering engine,
/// so a shared reference is enough to drive it.
pub trait ViewerWidget {
    fn script(&self, command: &str);
}

/// The container the viewer widget lives in.
pub trait ViewerHost {
    type Widget: ViewerWidget;

    /// Builds the widget and mounts it. Expensive; the controller calls this
    /// at most once.
    fn create_widget(&mut self) -> Self::Widget;

    /// Puts the mounted widget back after an error message replaced it.
    fn show_widget(&mut self, widget: &Self::Widget);

    /// Replaces the container content with a visible message.
    fn show_error(&mut self, message: &str);
}

/// Script command that loads `payload` in place of the current structure.
pub fn inline_load_command(payload: &StructurePayload) -> String {
    let escaped = payload.as_str().replace('\\', "\\\\").replace('"', "\\\"");
    format!("load inline \"{escaped}\"")
}

pub struct ViewerController<H: ViewerHost, P: DetailsPanel> {
    host: H,
    widget: OnceCell<H::Widget>,
    details: P,
    showing_error: bool,
    loaded: Option<MoleculeId>,
}

impl<H: ViewerHost, P: DetailsPanel> ViewerController<H, P> {
    pub fn new(host: H, details: P) -> Self {
        Self {
            host,
            widget: OnceCell::new(),
            details,
            showing_error: false,
            loaded: None,
        }
    }

    /// Loads the structure for `id` into the viewer, then refreshes the
    /// details panel. A failed structure fetch shows an error in the viewer
    /// container and skips the details refresh for this id.
    pub async fn select_molecule<C: CatalogSource>(&mut self, catalog: &C, id: Option<MoleculeId>) {
        let Some(id) = id else {
            debug!("Ignoring selection without a molecule id");
            return;
        };

        let host = &mut self.host;
        let widget = self.widget.get_or_init(|| {
            info!("Mounting structure viewer");
            host.create_widget()
        });

        let payload = match catalog.fetch_structure(id).await {
            Ok(payload) => payload,
            Err(err) => {
                error!(molecule = %id, "Viewer load error: {err}");
                self.host.show_error(VIEWER_ERROR);
                self.showing_error = true;
                return;
            }
        };

        if self.showing_error {
            self.host.show_widget(widget);
            self.showing_error = false;
        }
        debug!(
            molecule = %id,
            atoms = ?payload.declared_atom_count(),
            "loading structure"
        );
        widget.script(&inline_load_command(&payload));
        self.loaded = Some(id);

        render_details(catalog, &mut self.details, id).await;
    }

    /// Id of the structure currently in the widget.
    pub fn loaded(&self) -> Option<MoleculeId> {
        self.loaded
    }

    pub fn is_mounted(&self) -> bool {
        self.widget.get().is_some()
    }

    pub fn is_showing_error(&self) -> bool {
        self.showing_error
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn details(&self) -> &P {
        &self.details
    }
}
