//! Result Normalizer — raw per-source records to presentation fields.
//!
//! Given one record, its source name, and its position, produce the
//! stable ordered field list that every output medium (web view, PDF,
//! TXT, CSV) renders from. Dispatch is identity-then-structure via
//! [`bioquery_common::classify`]; absent fields are omitted, never an
//! error.

use serde_json::Value;

use bioquery_common::classify::{
    classify, LiteratureRecord, MoleculeRecord, ProteinRecord, RecordKind,
};

use crate::units::{format_property, humanize_key};

/// Output medium. Export renderings carry longer excerpts than the
/// on-screen view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget {
    Screen,
    Export,
}

impl RenderTarget {
    /// Maximum abstract / function-text length before the ellipsis.
    pub fn excerpt_limit(self) -> usize {
        match self {
            RenderTarget::Screen => 200,
            RenderTarget::Export => 300,
        }
    }

    /// Number of keywords shown.
    pub fn keyword_limit(self) -> usize {
        match self {
            RenderTarget::Screen => 5,
            RenderTarget::Export => 8,
        }
    }
}

const GENERIC_PREVIEW_LIMIT: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRow {
    pub name: String,
    pub value: String,
}

/// One presentation field, independent of the output medium.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// Numbered record heading, export renderings only.
    RecordHeading(usize),
    Title(String),
    /// Pipe-joined meta line ("Authors: ... | Journal: ...").
    Meta(String),
    /// Free text (abstract, function description).
    Text(String),
    KeyValue { key: String, value: String },
    Link { label: String, url: String },
    /// Composite diagram, emitted once per record, not per molecule.
    Diagram { label: String, url: String },
    MoleculeHeader { index: usize, smiles: String },
    PropertyGroup { name: String, rows: Vec<PropertyRow> },
    ImageNote(String),
}

/// Truncate to `limit` characters with an ellipsis suffix when longer.
pub fn truncate_with_ellipsis(text: &str, limit: usize) -> String {
    if text.chars().count() > limit {
        let cut: String = text.chars().take(limit).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

/// Normalize one record into its ordered presentation fields.
pub fn normalize_record(source: &str, record: &Value, index: usize, target: RenderTarget) -> Vec<Field> {
    let mut fields = Vec::new();
    if target == RenderTarget::Export {
        fields.push(Field::RecordHeading(index + 1));
    }
    match classify(source, record) {
        RecordKind::Literature => literature_fields(&LiteratureRecord::from_value(record), target, &mut fields),
        RecordKind::Protein => protein_fields(&ProteinRecord::from_value(record), target, &mut fields),
        RecordKind::Molecule => molecule_fields(&MoleculeRecord::from_value(record), &mut fields),
        RecordKind::Generic => generic_fields(record, &mut fields),
    }
    fields
}

fn literature_fields(item: &LiteratureRecord, target: RenderTarget, fields: &mut Vec<Field>) {
    let title = item
        .title
        .clone()
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "No title available".to_string());
    fields.push(Field::Title(title));

    let mut meta = Vec::new();
    if !item.authors.is_empty() {
        let mut authors = item.authors.iter().take(3).cloned().collect::<Vec<_>>().join(", ");
        if item.authors.len() > 3 {
            authors.push_str(" et al.");
        }
        meta.push(format!("Authors: {}", authors));
    }
    if let Some(journal) = &item.journal {
        meta.push(format!("Journal: {}", journal));
    }
    if let Some(date) = &item.publication_date {
        meta.push(format!("Date: {}", date));
    }
    if let Some(pmid) = &item.pmid {
        meta.push(format!("PMID: {}", pmid));
    }
    if !meta.is_empty() {
        fields.push(Field::Meta(meta.join(" | ")));
    }

    if let Some(abstract_text) = &item.abstract_text {
        fields.push(Field::Text(truncate_with_ellipsis(abstract_text, target.excerpt_limit())));
    }
    if let Some(url) = &item.url {
        fields.push(Field::Link { label: "View Article".to_string(), url: url.clone() });
    }
}

fn protein_fields(item: &ProteinRecord, target: RenderTarget, fields: &mut Vec<Field>) {
    let name = item
        .protein_name
        .clone()
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Unknown protein".to_string());
    fields.push(Field::Title(name));

    let mut meta = Vec::new();
    if let Some(accession) = &item.accession {
        meta.push(format!("Accession: {}", accession));
    }
    if let Some(organism) = &item.organism {
        meta.push(format!("Organism: {}", organism));
    }
    if let Some(length) = item.sequence_length {
        meta.push(format!("Length: {} aa", length));
    }
    if let Some(reviewed) = item.reviewed {
        meta.push(format!("Reviewed: {}", if reviewed { "Yes" } else { "No" }));
    }
    if !meta.is_empty() {
        fields.push(Field::Meta(meta.join(" | ")));
    }

    if !item.gene_names.is_empty() {
        fields.push(Field::KeyValue {
            key: "Gene names".to_string(),
            value: item.gene_names.join(", "),
        });
    }
    if !item.keywords.is_empty() {
        fields.push(Field::KeyValue {
            key: "Keywords".to_string(),
            value: item
                .keywords
                .iter()
                .take(target.keyword_limit())
                .cloned()
                .collect::<Vec<_>>()
                .join(", "),
        });
    }
    if let Some(function_text) = &item.function_text {
        fields.push(Field::Text(truncate_with_ellipsis(function_text, target.excerpt_limit())));
    }
    if let Some(url) = &item.url {
        fields.push(Field::Link { label: "View Protein".to_string(), url: url.clone() });
    }
}

fn molecule_fields(item: &MoleculeRecord, fields: &mut Vec<Field>) {
    if let Some(plot) = &item.boiled_egg_plot {
        fields.push(Field::Diagram {
            label: "Boiled Egg Plot (ADME Properties)".to_string(),
            url: plot.clone(),
        });
    }

    for (i, molecule_id) in item.molecule_ids().iter().enumerate() {
        fields.push(Field::MoleculeHeader {
            index: i + 1,
            smiles: molecule_id.clone(),
        });

        for (group_name, map) in item.property_groups() {
            // A group appears only when this molecule has an entry in
            // that map; other molecules' entries do not leak in.
            if let Some(props) = map.get(molecule_id) {
                let rows = props
                    .iter()
                    .filter(|(_, value)| !value.is_null())
                    .map(|(key, value)| PropertyRow {
                        name: humanize_key(key),
                        value: format_property(key, value),
                    })
                    .collect();
                fields.push(Field::PropertyGroup {
                    name: group_name.to_string(),
                    rows,
                });
            }
        }

        if item.images.contains_key(molecule_id) {
            fields.push(Field::ImageNote(
                "Molecular structure images and radar plots available in the web interface"
                    .to_string(),
            ));
        }
    }
}

fn generic_fields(record: &Value, fields: &mut Vec<Field>) {
    match record.as_object() {
        Some(map) => {
            for (key, value) in map {
                if value.is_null() {
                    continue;
                }
                let preview = match value {
                    Value::String(s) => s.clone(),
                    Value::Object(_) | Value::Array(_) => {
                        let dump = serde_json::to_string(value).unwrap_or_default();
                        truncate_with_ellipsis(&dump, GENERIC_PREVIEW_LIMIT)
                    }
                    other => other.to_string(),
                };
                fields.push(Field::KeyValue { key: key.clone(), value: preview });
            }
        }
        None => {
            fields.push(Field::Text(record.to_string()));
        }
    }
}
