use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoleculeId(pub i64);

impl MoleculeId {
    /// Parses a raw dropdown value. Empty or non-numeric input means no
    /// molecule is selected.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse().ok().map(MoleculeId)
    }
}

impl fmt::Display for MoleculeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of the dropdown list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoleculeListing {
    #[serde(rename = "molecule_id")]
    pub id: MoleculeId,
    #[serde(rename = "molecule_name")]
    pub name: String,
}

/// One data point of the catalog chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoleculeSummary {
    #[serde(rename = "molecule_id")]
    pub id: MoleculeId,
    #[serde(rename = "molecule_name")]
    pub name: String,
    #[serde(rename = "molecular_formula")]
    pub formula: String,
    pub free_energy: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoleculeDetail {
    pub id: MoleculeId,
    pub name: String,
    pub formula: Option<String>,
    pub molecular_weight: Option<f64>,
    pub free_energy: Option<f64>,
    pub pubchem_cid: Option<String>,
}

/// Body of `/molecule/{id}/details`. The id is taken from the request, and
/// any extra columns the server sends are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct DetailRecord {
    molecule_name: String,
    #[serde(default, deserialize_with = "non_empty_text")]
    molecular_formula: Option<String>,
    #[serde(default)]
    molecular_weight: Option<f64>,
    #[serde(default)]
    free_energy: Option<f64>,
    #[serde(default, deserialize_with = "text_or_integer")]
    pubchem_cid: Option<String>,
}

impl MoleculeDetail {
    pub(crate) fn from_record(id: MoleculeId, record: DetailRecord) -> Self {
        Self {
            id,
            name: record.molecule_name,
            formula: record.molecular_formula,
            molecular_weight: record.molecular_weight,
            free_energy: record.free_energy,
            pubchem_cid: record.pubchem_cid,
        }
    }
}

fn non_empty_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrInteger {
    Text(String),
    Integer(i64),
}

// PubChem CIDs are stored as integers by some catalogs and as text by others.
fn text_or_integer<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<TextOrInteger>::deserialize(deserializer)?;
    Ok(value
        .map(|v| match v {
            TextOrInteger::Text(s) => s,
            TextOrInteger::Integer(n) => n.to_string(),
        })
        .filter(|s| !s.trim().is_empty()))
}

/// Raw XYZ text for one molecule, passed to the viewer untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructurePayload(String);

impl StructurePayload {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Atom count declared on the first line of an XYZ file, if it parses.
    pub fn declared_atom_count(&self) -> Option<usize> {
        self.0
            .lines()
            .find(|line| !line.trim().is_empty())
            .and_then(|line| line.trim().parse().ok())
    }
}
