//! Resource catalog loading.
//!
//! The catalog is a directory of JSON records. Each record names its type in a
//! `"type"` field; `LimbFactorySettings` and `EntityTemplate` records are
//! collected and everything else is skipped. Records are read in sorted path
//! order and the first settings record wins; later settings records are only
//! read as far as their tag.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Deserialize;

use super::{LimbFactorySettings, SettingsError};
use crate::template::{EntityTemplate, TemplateCatalog};
use crate::RECORD_EXTENSION;

/// `"type"` tag of settings records.
const SETTINGS_RECORD: &str = "LimbFactorySettings";

#[derive(Deserialize)]
struct RecordHeader {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum Record {
    LimbFactorySettings(LimbFactorySettings),
    EntityTemplate(EntityTemplate),
    #[serde(other)]
    Other,
}

/// Everything the factory needs from the resource catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// The selected settings record.
    pub settings: LimbFactorySettings,
    /// All template records.
    pub templates: TemplateCatalog,
}

/// Loads the catalog from the `*.json` records in `catalog_dir`.
///
/// # Errors
///
/// Returns [`SettingsError::Io`] when the directory or a record cannot be
/// read, [`SettingsError::Parse`] for a malformed record, and
/// [`SettingsError::MissingSettings`] when no settings record exists. The
/// selected settings are validated before returning.
pub fn load_dir(catalog_dir: impl AsRef<Path>) -> Result<Catalog, SettingsError> {
    let dir = catalog_dir.as_ref();
    let io_error = |path: &Path, source| SettingsError::Io {
        path: path.display().to_string(),
        source,
    };

    let mut paths = fs::read_dir(dir)
        .map_err(|e| io_error(dir, e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<PathBuf>, _>>()
        .map_err(|e| io_error(dir, e))?;
    paths.retain(|path| {
        path.extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(RECORD_EXTENSION))
    });
    paths.sort();

    let mut records = Vec::with_capacity(paths.len());
    for path in paths {
        let text = fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;
        records.push((path.display().to_string(), text));
    }

    parse_records(dir.display().to_string(), records)
}

/// Builds a catalog from `(origin, json)` pairs in scan order.
///
/// `catalog_origin` names the catalog in the missing-settings error.
///
/// # Errors
///
/// See [`load_dir`]; additionally fails with
/// [`SettingsError::DuplicateTemplate`] when two templates share an id.
pub fn parse_records<I, O, T>(
    catalog_origin: impl Into<String>,
    records: I,
) -> Result<Catalog, SettingsError>
where
    I: IntoIterator<Item = (O, T)>,
    O: Into<String>,
    T: AsRef<str>,
{
    let mut settings: Option<LimbFactorySettings> = None;
    let mut templates = TemplateCatalog::default();

    for (record_origin, text) in records {
        let origin: String = record_origin.into();
        let parse_error = |source: serde_json::Error| SettingsError::Parse {
            origin: origin.clone(),
            source,
        };
        if settings.is_some() {
            let header: RecordHeader =
                serde_json::from_str(text.as_ref()).map_err(parse_error)?;
            if header.kind == SETTINGS_RECORD {
                debug!("ignoring additional settings record in {origin}");
                continue;
            }
        }
        let record: Record = serde_json::from_str(text.as_ref()).map_err(parse_error)?;
        match record {
            Record::LimbFactorySettings(found) => {
                debug!("using settings record from {origin}");
                settings = Some(found);
            }
            Record::EntityTemplate(template) => {
                let id = template.id.clone();
                if templates.insert(template).is_some() {
                    return Err(SettingsError::DuplicateTemplate(id));
                }
            }
            Record::Other => debug!("skipping unrelated record in {origin}"),
        }
    }

    let Some(selected) = settings else {
        return Err(SettingsError::MissingSettings {
            origin: catalog_origin.into(),
        });
    };
    selected.validate()?;

    for id in [&selected.limb_template, &selected.weapon_template] {
        if !templates.contains(id) {
            warn!("settings reference template {id}, which the catalog does not define");
        }
    }

    Ok(Catalog {
        settings: selected,
        templates,
    })
}
