//! Schema command implementation

use serde::Serialize;

use crate::cli::error::CliError;
use crate::schema::{ClassId, ClassInfo, FeatureInfo, schema};

/// One class with its inherited features resolved
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClassDump<'a> {
    #[serde(flatten)]
    class: &'a ClassInfo,
    all_features: Vec<&'a FeatureInfo>,
}

/// Handle the schema command
///
/// Dumps the whole registry, or one class looked up by short, schema or XML
/// type name.
pub fn handle_schema(class: Option<&str>) -> Result<(), CliError> {
    let registry = schema();
    let json = match class {
        Some(name) => {
            let info = name
                .parse::<ClassId>()
                .ok()
                .map(|id| registry.class(id))
                .or_else(|| registry.class_by_xml_name(name))
                .ok_or_else(|| CliError::InvalidArgument(format!("Unknown class: {name}")))?;
            serde_json::to_string_pretty(&ClassDump {
                class: info,
                all_features: registry.all_features(info.id),
            })
        }
        None => serde_json::to_string_pretty(registry),
    }
    .map_err(|e| CliError::SerializationError(e.to_string()))?;

    println!("{json}");
    Ok(())
}
