//! Record classification and lenient typed views.
//!
//! Upstream sources may be mislabeled, so classification is two-stage:
//! source identity first, then structural sniffing on the record itself.
//! The outcome is a closed variant set; `Generic` is the terminal
//! fallback, never an error.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Literature,
    Protein,
    Molecule,
    Generic,
}

/// Classify one record. Source identity wins; structure breaks ties.
pub fn classify(source: &str, record: &Value) -> RecordKind {
    let source = source.to_lowercase();
    if source.contains("pubmed") {
        return RecordKind::Literature;
    }
    if source.contains("uniprot") {
        return RecordKind::Protein;
    }
    if source.contains("swissadme") {
        return RecordKind::Molecule;
    }

    let has = |key: &str| record.get(key).is_some();
    if has("pmid") || has("abstract") {
        RecordKind::Literature
    } else if has("accession") || has("protein_name") {
        RecordKind::Protein
    } else if has("smiles") || has("physicochemical_properties") {
        RecordKind::Molecule
    } else {
        RecordKind::Generic
    }
}

/// Literature record (PubMed-like). Every field is optional; absence is
/// an omission, never a failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LiteratureRecord {
    pub title: Option<String>,
    pub authors: Vec<String>,
    pub journal: Option<String>,
    pub publication_date: Option<String>,
    pub pmid: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub url: Option<String>,
}

/// Protein record (UniProt-like).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProteinRecord {
    pub protein_name: Option<String>,
    pub accession: Option<String>,
    pub organism: Option<String>,
    pub sequence_length: Option<u64>,
    pub reviewed: Option<bool>,
    pub gene_names: Vec<String>,
    pub keywords: Vec<String>,
    #[serde(rename = "function")]
    pub function_text: Option<String>,
    pub url: Option<String>,
}

pub type PropertyMap = IndexMap<String, IndexMap<String, Value>>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MoleculeImages {
    pub mol_structure_img_src: Option<String>,
    pub radar_image: Option<String>,
}

/// Molecule-property record (SwissADME-like). The six property maps and
/// the image map are all keyed by the molecule line notation from
/// `smiles`; individual maps may omit identifiers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MoleculeRecord {
    pub smiles: Vec<String>,
    pub boiled_egg_plot: Option<String>,
    pub physicochemical_properties: PropertyMap,
    pub lipophilicity: PropertyMap,
    pub water_solubility: PropertyMap,
    pub pharmacokinetics: PropertyMap,
    pub druglikeness: PropertyMap,
    pub medicinal_chemistry: PropertyMap,
    pub images: IndexMap<String, MoleculeImages>,
}

impl MoleculeRecord {
    /// Molecule identifiers to render, with the synthetic placeholder
    /// when the record lists none.
    pub fn molecule_ids(&self) -> Vec<String> {
        if self.smiles.is_empty() {
            vec!["Unknown".to_string()]
        } else {
            self.smiles.clone()
        }
    }

    /// The six property maps in fixed presentation order.
    pub fn property_groups(&self) -> [(&'static str, &PropertyMap); 6] {
        [
            ("Physicochemical Properties", &self.physicochemical_properties),
            ("Lipophilicity", &self.lipophilicity),
            ("Water Solubility", &self.water_solubility),
            ("Pharmacokinetics", &self.pharmacokinetics),
            ("Drug Likeness", &self.druglikeness),
            ("Medicinal Chemistry", &self.medicinal_chemistry),
        ]
    }
}

/// Pull one field out of a record, falling back to that field's default
/// when it is absent or malformed. Leniency is per field: one bad field
/// never discards its well-formed neighbors.
fn pick<T>(record: &Value, key: &str) -> T
where
    T: serde::de::DeserializeOwned + Default,
{
    record
        .get(key)
        .map(|v| serde_json::from_value(v.clone()).unwrap_or_default())
        .unwrap_or_default()
}

impl LiteratureRecord {
    pub fn from_value(value: &Value) -> Self {
        Self {
            title: pick(value, "title"),
            authors: pick(value, "authors"),
            journal: pick(value, "journal"),
            publication_date: pick(value, "publication_date"),
            pmid: pick(value, "pmid"),
            abstract_text: pick(value, "abstract"),
            url: pick(value, "url"),
        }
    }
}

impl ProteinRecord {
    pub fn from_value(value: &Value) -> Self {
        Self {
            protein_name: pick(value, "protein_name"),
            accession: pick(value, "accession"),
            organism: pick(value, "organism"),
            sequence_length: pick(value, "sequence_length"),
            reviewed: pick(value, "reviewed"),
            gene_names: pick(value, "gene_names"),
            keywords: pick(value, "keywords"),
            function_text: pick(value, "function"),
            url: pick(value, "url"),
        }
    }
}

impl MoleculeRecord {
    pub fn from_value(value: &Value) -> Self {
        Self {
            smiles: pick(value, "smiles"),
            boiled_egg_plot: pick(value, "boiled_egg_plot"),
            physicochemical_properties: pick(value, "physicochemical_properties"),
            lipophilicity: pick(value, "lipophilicity"),
            water_solubility: pick(value, "water_solubility"),
            pharmacokinetics: pick(value, "pharmacokinetics"),
            druglikeness: pick(value, "druglikeness"),
            medicinal_chemistry: pick(value, "medicinal_chemistry"),
            images: pick(value, "images"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn source_identity_wins_over_structure() {
        // A record that looks like a protein but arrives under a pubmed
        // source is still literature.
        let rec = json!({"accession": "P01116"});
        assert_eq!(classify("pubmed", &rec), RecordKind::Literature);
        assert_eq!(classify("pubmed_eu", &rec), RecordKind::Literature);
    }

    #[test]
    fn structural_sniffing_covers_mislabeled_sources() {
        assert_eq!(
            classify("mystery", &json!({"pmid": "123"})),
            RecordKind::Literature
        );
        assert_eq!(
            classify("mystery", &json!({"abstract": "..."})),
            RecordKind::Literature
        );
        assert_eq!(
            classify("mystery", &json!({"protein_name": "KRAS"})),
            RecordKind::Protein
        );
        assert_eq!(
            classify("mystery", &json!({"smiles": ["CCO"]})),
            RecordKind::Molecule
        );
        assert_eq!(
            classify("mystery", &json!({"anything": 1})),
            RecordKind::Generic
        );
    }

    #[test]
    fn molecule_ids_fall_back_to_placeholder() {
        let rec = MoleculeRecord::default();
        assert_eq!(rec.molecule_ids(), vec!["Unknown"]);

        let rec = MoleculeRecord::from_value(&json!({"smiles": ["CCO", "c1ccccc1"]}));
        assert_eq!(rec.molecule_ids(), vec!["CCO", "c1ccccc1"]);
    }

    #[test]
    fn one_malformed_field_keeps_the_rest() {
        // authors arrives as a bare string instead of an array; every
        // other field must survive.
        let rec = LiteratureRecord::from_value(&json!({
            "title": "CRISPR screens",
            "authors": "Smith J",
            "pmid": "12345"
        }));
        assert_eq!(rec.title.as_deref(), Some("CRISPR screens"));
        assert!(rec.authors.is_empty());
        assert_eq!(rec.pmid.as_deref(), Some("12345"));

        let rec = ProteinRecord::from_value(&json!({
            "protein_name": "GTPase KRas",
            "sequence_length": "not a number",
            "keywords": ["k1"]
        }));
        assert_eq!(rec.protein_name.as_deref(), Some("GTPase KRas"));
        assert!(rec.sequence_length.is_none());
        assert_eq!(rec.keywords, vec!["k1"]);

        let rec = MoleculeRecord::from_value(&json!({
            "smiles": ["CCO"],
            "lipophilicity": "corrupt",
            "physicochemical_properties": {"CCO": {"molecular_weight": 46.07}}
        }));
        assert_eq!(rec.smiles, vec!["CCO"]);
        assert!(rec.lipophilicity.is_empty());
        assert_eq!(rec.physicochemical_properties.len(), 1);
    }

    #[test]
    fn lenient_deserialization_ignores_junk() {
        let rec = LiteratureRecord::from_value(&json!({
            "title": "CRISPR",
            "authors": ["A", "B"],
            "unexpected": {"nested": true}
        }));
        assert_eq!(rec.title.as_deref(), Some("CRISPR"));
        assert_eq!(rec.authors.len(), 2);
        assert!(rec.pmid.is_none());
    }
}
