// src/directive/application.rs

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::config::Settings;
use crate::paths::norm_path;
use crate::types::DocType;

/// Application-specific fields carried by a [`ProgramDirective`](super::ProgramDirective).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ApplicationKind {
    #[default]
    Generic,

    /// SAS writes a listing file next to its log; `lst` is where it goes.
    Sas { lst: Option<PathBuf> },

    Lyx {
        doc_type: DocType,
        pdf_output_dir: PathBuf,
    },
}

impl ApplicationKind {
    /// Default payload for an application named in the metadata table:
    /// SAS and LyX get their wrappers with nothing overridden, everything
    /// else is generic.
    pub fn for_application(application: &str, settings: &Settings) -> Self {
        match application {
            "sas" => ApplicationKind::sas(None),
            "lyx" => ApplicationKind::lyx("", None, settings),
            _ => ApplicationKind::Generic,
        }
    }

    pub fn sas(lst: Option<PathBuf>) -> Self {
        ApplicationKind::Sas {
            lst: lst.filter(|p| !p.as_os_str().is_empty()),
        }
    }

    /// LyX payload from raw caller input.
    ///
    /// An unknown `doc_type` is not an error: it is logged and replaced by
    /// the plain document type.
    pub fn lyx(doc_type: &str, pdf_output_dir: Option<PathBuf>, settings: &Settings) -> Self {
        let doc_type = validate_doc_type(doc_type);
        let pdf_output_dir = resolve_pdf_output_dir(doc_type, pdf_output_dir, settings);
        ApplicationKind::Lyx {
            doc_type,
            pdf_output_dir,
        }
    }

    pub fn lst(&self) -> Option<&Path> {
        match self {
            ApplicationKind::Sas { lst } => lst.as_deref(),
            _ => None,
        }
    }

    pub fn doc_type(&self) -> Option<DocType> {
        match self {
            ApplicationKind::Lyx { doc_type, .. } => Some(*doc_type),
            _ => None,
        }
    }

    pub fn pdf_output_dir(&self) -> Option<&Path> {
        match self {
            ApplicationKind::Lyx { pdf_output_dir, .. } => Some(pdf_output_dir),
            _ => None,
        }
    }
}

fn validate_doc_type(raw: &str) -> DocType {
    raw.parse().unwrap_or_else(|_| {
        warn!(doc_type = raw, "document type unrecognized; reverting to default");
        DocType::Plain
    })
}

/// Handout and comments builds always go to the temp directory, whatever the
/// caller asked for.
fn resolve_pdf_output_dir(
    doc_type: DocType,
    requested: Option<PathBuf>,
    settings: &Settings,
) -> PathBuf {
    let dir = if doc_type.is_plain() {
        requested
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| settings.output_dir.clone())
    } else {
        settings.temp_dir.clone()
    };
    norm_path(dir)
}
