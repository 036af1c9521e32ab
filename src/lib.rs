//! # kicad-refsize
//!
//! Restyles the reference-designator labels of every footprint on a KiCad board
//! through KiCad's IPC API: every label gets the same glyph size and stroke
//! width (2.0 mm × 2.0 mm, 0.3 mm by default).
//!
//! The board is always an explicit [`BoardHandle`], resolved from a
//! [`BoardTarget`]: either the single PCB open in KiCad, or the open PCB backed
//! by a given `.kicad_pcb` file. The pass itself only needs a [`BoardHost`], so
//! it can run against anything that can list and update footprints.
//!
//! ## Quickstart (async)
//!
//! ```no_run
//! use kicad_refsize::{adjust_reference_labels, AdjustOptions, BoardHost, BoardTarget, KiCadClient};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), kicad_refsize::KiCadError> {
//!     let client = KiCadClient::connect().await?;
//!     let board = client.open_board(&BoardTarget::Current).await?;
//!     let report =
//!         adjust_reference_labels(&client, &board, AdjustOptions::default(), &mut std::io::stdout())
//!             .await?;
//!     eprintln!("restyled {} footprints on {}", report.footprints, report.board);
//!     Ok(())
//! }
//! ```
//!
//! ## Quickstart (blocking)
//!
//! ```no_run
//! # #[cfg(feature = "blocking")]
//! # fn run() -> Result<(), kicad_refsize::KiCadError> {
//! use kicad_refsize::{AdjustOptions, BoardTarget, KiCadClientBlocking};
//! let client = KiCadClientBlocking::connect()?;
//! let board = client.open_board(&BoardTarget::from_path(Some("demo.kicad_pcb".into())))?;
//! client.adjust_reference_labels(&board, AdjustOptions::default(), &mut std::io::stdout())?;
//! # Ok(())
//! # }
//! ```
//!
//! Architecture layers:
//! - transport
//! - envelope / wire
//! - high-level client
//! - adjuster

#![warn(missing_docs)]

/// Reference-label restyling pass.
pub mod adjust;
/// High-level async client and request/response convenience methods.
pub mod client;
/// Envelope helpers for command/response packing and unpacking.
pub(crate) mod envelope;
/// Error types returned by this crate.
pub mod error;
/// Host abstraction and board selection.
pub mod host;
/// Stable data models used by typed client APIs.
pub mod model;
/// IPC transport implementation details.
pub(crate) mod transport;
pub(crate) mod wire;

#[cfg(feature = "blocking")]
/// Blocking wrapper over the async client.
pub mod blocking;

pub(crate) mod proto;

pub use crate::adjust::{adjust_reference_labels, AdjustOptions, AdjustReport};
#[cfg(feature = "blocking")]
pub use crate::blocking::{KiCadClientBlocking, KiCadClientBlockingBuilder};
pub use crate::client::{ClientBuilder, KiCadClient};
pub use crate::error::KiCadError;
pub use crate::host::{BoardHandle, BoardHost, BoardTarget};
pub use crate::model::board::{
    layer_name, Footprint, LabelStyle, ReferenceLabel, SizedText, Vector2Nm,
};
pub use crate::model::common::{DocumentSpecifier, DocumentType, ProjectInfo, VersionInfo};
pub use crate::model::units::{from_mm, to_mm};
