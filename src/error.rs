use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KiCadError {
    #[error("invalid configuration: {reason}")]
    Config { reason: String },

    #[error("KiCad IPC socket not available at `{socket_uri}`. Open KiCad and open a board first.")]
    SocketUnavailable { socket_uri: String },

    #[error("connection failed for `{socket_uri}`: {reason}")]
    Connection { socket_uri: String, reason: String },

    #[error("transport send failed: {reason}")]
    TransportSend { reason: String },

    #[error("transport receive failed: {reason}")]
    TransportReceive { reason: String },

    #[error("transport task is unavailable")]
    TransportClosed,

    #[error("request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("API status error `{code}`: {message}")]
    ApiStatus { code: String, message: String },

    #[error("item request status error `{code}`")]
    ItemStatus { code: String },

    #[error("item update rejected with `{code}`: {message}")]
    ItemUpdate { code: String, message: String },

    #[error("API response missing payload for `{expected_type_url}`")]
    MissingPayload { expected_type_url: String },

    #[error("unexpected payload type; expected `{expected_type_url}`, got `{actual_type_url}`")]
    UnexpectedPayloadType {
        expected_type_url: String,
        actual_type_url: String,
    },

    #[error("protobuf decode failed: {0}")]
    ProtobufDecode(String),

    #[error("runtime setup failed: {0}")]
    Runtime(String),

    #[error("mutex poisoned")]
    InternalPoisoned,

    #[error("no open PCB document found; open a board in KiCad first")]
    BoardNotOpen,

    #[error("multiple PCB documents are open; pass a board path to choose one: {boards:?}")]
    AmbiguousBoardSelection { boards: Vec<String> },

    #[error("board file `{}` does not exist", .path.display())]
    BoardFileMissing { path: PathBuf },

    #[error("`{}` is not a KiCad board file (expected a .kicad_pcb extension)", .path.display())]
    NotABoardFile { path: PathBuf },

    #[error("board `{}` is not open in KiCad; open boards: {open:?}", .path.display())]
    BoardNotFound { path: PathBuf, open: Vec<String> },

    #[error("footprint `{reference}` carries no KiCad item data and cannot be written back")]
    DetachedFootprint { reference: String },

    #[error("failed to write diagnostic output: {0}")]
    Output(#[from] std::io::Error),
}
