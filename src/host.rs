use std::future::Future;
use std::path::{Path, PathBuf};

use crate::error::KiCadError;
use crate::model::board::Footprint;
use crate::model::common::DocumentSpecifier;

const BOARD_EXTENSION: &str = "kicad_pcb";

/// Which board a pass should operate on.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BoardTarget {
    /// The single PCB document open in the host.
    Current,
    /// The open PCB document backed by this file.
    File(PathBuf),
}

impl BoardTarget {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => Self::File(path),
            None => Self::Current,
        }
    }

    /// Checks a file target on disk. Runs before the host is contacted.
    pub fn validate(&self) -> Result<(), KiCadError> {
        let Self::File(path) = self else {
            return Ok(());
        };

        if !path.is_file() {
            return Err(KiCadError::BoardFileMissing { path: path.clone() });
        }

        if path.extension().and_then(|ext| ext.to_str()) != Some(BOARD_EXTENSION) {
            return Err(KiCadError::NotABoardFile { path: path.clone() });
        }

        Ok(())
    }
}

/// An explicit reference to one open board document.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BoardHandle {
    document: DocumentSpecifier,
}

impl BoardHandle {
    pub fn new(document: DocumentSpecifier) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &DocumentSpecifier {
        &self.document
    }
}

impl std::fmt::Display for BoardHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.document.display_name())
    }
}

/// The slice of a CAD host that the adjuster needs.
pub trait BoardHost {
    fn open_board(
        &self,
        target: &BoardTarget,
    ) -> impl Future<Output = Result<BoardHandle, KiCadError>>;

    /// Footprints on `board`, in host order.
    fn footprints(
        &self,
        board: &BoardHandle,
    ) -> impl Future<Output = Result<Vec<Footprint>, KiCadError>>;

    fn update_footprints(
        &self,
        board: &BoardHandle,
        footprints: &[Footprint],
    ) -> impl Future<Output = Result<(), KiCadError>>;
}

/// Picks the document for `target` out of the host's open PCB documents.
pub(crate) fn select_board<'a>(
    docs: &'a [DocumentSpecifier],
    target: &BoardTarget,
) -> Result<&'a DocumentSpecifier, KiCadError> {
    match target {
        BoardTarget::Current => select_single_board_document(docs),
        BoardTarget::File(path) => select_board_by_path(docs, path),
    }
}

fn select_single_board_document(
    docs: &[DocumentSpecifier],
) -> Result<&DocumentSpecifier, KiCadError> {
    match docs {
        [] => Err(KiCadError::BoardNotOpen),
        [only] => Ok(only),
        _ => Err(KiCadError::AmbiguousBoardSelection {
            boards: docs.iter().map(DocumentSpecifier::display_name).collect(),
        }),
    }
}

fn select_board_by_path<'a>(
    docs: &'a [DocumentSpecifier],
    path: &Path,
) -> Result<&'a DocumentSpecifier, KiCadError> {
    let wanted = normalize(path);
    docs.iter()
        .find(|doc| doc.board_path().is_some_and(|candidate| normalize(&candidate) == wanted))
        .ok_or_else(|| KiCadError::BoardNotFound {
            path: path.to_path_buf(),
            open: docs.iter().map(DocumentSpecifier::display_name).collect(),
        })
}

fn normalize(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
