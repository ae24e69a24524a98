use crate::catalog::CatalogSource;
use crate::model::{MoleculeDetail, MoleculeId};
use tracing::{debug, error};

pub const NOT_AVAILABLE: &str = "N/A";
pub const DETAILS_ERROR: &str = "Failed to load molecule details";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailField {
    pub label: &'static str,
    pub value: String,
}

/// Mount point for the property list next to the viewer.
pub trait DetailsPanel {
    /// Replaces the panel content with the field list.
    fn show_fields(&mut self, fields: &[DetailField]);

    /// Replaces the panel content with a single inline message.
    fn show_error(&mut self, message: &str);
}

pub fn format_molecular_weight(weight: Option<f64>) -> String {
    match weight {
        Some(w) => format!("{w:.3} g/mol"),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_free_energy(energy: Option<f64>) -> String {
    match energy {
        Some(e) => format!("{e:.6} kcal/mol"),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn detail_fields(detail: &MoleculeDetail) -> Vec<DetailField> {
    let text = |value: &Option<String>| value.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string());
    vec![
        DetailField {
            label: "Name",
            value: detail.name.clone(),
        },
        DetailField {
            label: "Formula",
            value: text(&detail.formula),
        },
        DetailField {
            label: "Molecular Weight",
            value: format_molecular_weight(detail.molecular_weight),
        },
        DetailField {
            label: "Free Energy",
            value: format_free_energy(detail.free_energy),
        },
        DetailField {
            label: "PubChem CID",
            value: text(&detail.pubchem_cid),
        },
    ]
}

/// Fetches the detail record for `id` and redraws the panel. A failed fetch
/// leaves an inline message in the panel and touches nothing else.
pub async fn render_details<C, P>(catalog: &C, panel: &mut P, id: MoleculeId)
where
    C: CatalogSource,
    P: DetailsPanel,
{
    match catalog.fetch_detail(id).await {
        Ok(detail) => {
            debug!(molecule = %id, "rendering details for {}", detail.name);
            panel.show_fields(&detail_fields(&detail));
        }
        Err(err) => {
            error!(molecule = %id, "Details load error: {err}");
            panel.show_error(DETAILS_ERROR);
        }
    }
}
