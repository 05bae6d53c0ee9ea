//! Page bootstrap document for the terminal driver.
//!
//! Stands in for the server-rendered page: the path it was served under, the
//! current field values and the hidden tag/itinerary fields.
//!
//! ```json
//! {
//!   "pagePath": "/grupos/editar/12",
//!   "draft": { "nombreViaje": "Ruta del sol", "fechaInicio": "2025-06-01" },
//!   "etiquetas": ["playa", "sol"],
//!   "diasItinerarioJson": "[{\"diaNumero\":1,\"titulo\":\"Llegada\"}]"
//! }
//! ```

use std::{fs, path::Path};

use serde::Deserialize;
use serde_json::Value;

use crate::cli::core::CommandError;
use crate::domain::GroupDraft;
use crate::wizard::InitialData;

pub const DEFAULT_PAGE_PATH: &str = "/grupos/crear";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefillDocument {
    #[serde(default = "default_page_path")]
    pub page_path: String,
    #[serde(default)]
    pub draft: Option<GroupDraft>,
    #[serde(default)]
    pub etiquetas: Option<Value>,
    #[serde(default)]
    pub dias_itinerario_json: Option<Value>,
}

fn default_page_path() -> String {
    DEFAULT_PAGE_PATH.to_string()
}

impl Default for PrefillDocument {
    fn default() -> Self {
        Self {
            page_path: default_page_path(),
            draft: None,
            etiquetas: None,
            dias_itinerario_json: None,
        }
    }
}

impl PrefillDocument {
    pub fn load(path: &Path) -> Result<Self, CommandError> {
        let raw = fs::read_to_string(path)?;
        let document = serde_json::from_str(&raw)?;
        tracing::info!(path = %path.display(), "loaded prefill document");
        Ok(document)
    }

    /// Splits the document into the page path and the controller's initial
    /// data. Hidden fields may be given as JSON text or as inline JSON.
    pub fn into_parts(self) -> (String, InitialData) {
        let initial = InitialData {
            draft: self.draft,
            tags_json: self.etiquetas.map(hidden_text),
            itinerary_json: self.dias_itinerario_json.map(hidden_text),
        };
        (self.page_path, initial)
    }
}

fn hidden_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}
