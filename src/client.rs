use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use prost::Message;

use crate::envelope;
use crate::error::KiCadError;
use crate::host::{self, BoardHandle, BoardHost, BoardTarget};
use crate::model::board::{Footprint, ReferenceLabel, Vector2Nm};
use crate::model::common::{DocumentSpecifier, DocumentType, ProjectInfo, VersionInfo};
use crate::proto::kiapi::board::types as board_types;
use crate::proto::kiapi::common::commands as common_commands;
use crate::proto::kiapi::common::ApiResponse;
use crate::proto::kiapi::common::types as common_types;
use crate::transport::Transport;
use crate::wire;

const KICAD_API_SOCKET_ENV: &str = "KICAD_API_SOCKET";
const KICAD_API_TOKEN_ENV: &str = "KICAD_API_TOKEN";

const CMD_PING: &str = "kiapi.common.commands.Ping";
const CMD_GET_VERSION: &str = "kiapi.common.commands.GetVersion";
const CMD_GET_OPEN_DOCUMENTS: &str = "kiapi.common.commands.GetOpenDocuments";
const CMD_GET_ITEMS: &str = "kiapi.common.commands.GetItems";
const CMD_UPDATE_ITEMS: &str = "kiapi.common.commands.UpdateItems";

const RES_GET_VERSION: &str = "kiapi.common.commands.GetVersionResponse";
const RES_GET_OPEN_DOCUMENTS: &str = "kiapi.common.commands.GetOpenDocumentsResponse";
const RES_GET_ITEMS_RESPONSE: &str = "kiapi.common.commands.GetItemsResponse";
const RES_UPDATE_ITEMS_RESPONSE: &str = "kiapi.common.commands.UpdateItemsResponse";

const ITEM_FOOTPRINT_INSTANCE: &str = "kiapi.board.types.FootprintInstance";

/// Path from a `FootprintInstance` down to its reference label's `TextAttributes`.
const REFERENCE_ATTRIBUTES_PATH: [u32; 4] = [
    board_types::FootprintInstance::REFERENCE_FIELD_TAG,
    board_types::Field::TEXT_TAG,
    board_types::BoardText::TEXT_TAG,
    common_types::Text::ATTRIBUTES_TAG,
];

#[derive(Clone, Debug)]
pub struct KiCadClient {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    transport: Transport,
    token: Mutex<String>,
    client_name: String,
}

#[derive(Clone, Debug)]
struct ClientConfig {
    timeout: Duration,
    socket_uri: Option<String>,
    token: Option<String>,
    client_name: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3_000);

    pub fn new() -> Self {
        Self {
            config: ClientConfig {
                timeout: Self::DEFAULT_TIMEOUT,
                socket_uri: None,
                token: None,
                client_name: None,
            },
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn socket_path(mut self, socket_path: impl Into<String>) -> Self {
        self.config.socket_uri = Some(socket_path.into());
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(token.into());
        self
    }

    pub fn client_name(mut self, client_name: impl Into<String>) -> Self {
        self.config.client_name = Some(client_name.into());
        self
    }

    pub async fn connect(self) -> Result<KiCadClient, KiCadError> {
        let socket_uri = resolve_socket_uri(self.config.socket_uri.as_deref());
        if is_missing_ipc_socket(&socket_uri) {
            return Err(KiCadError::SocketUnavailable { socket_uri });
        }

        let transport = Transport::connect(&socket_uri, self.config.timeout)?;
        tracing::debug!(%socket_uri, "connected to KiCad IPC socket");

        let token = self
            .config
            .token
            .or_else(|| std::env::var(KICAD_API_TOKEN_ENV).ok())
            .unwrap_or_default();

        let client_name = self.config.client_name.unwrap_or_else(default_client_name);

        Ok(KiCadClient {
            inner: Arc::new(ClientInner {
                transport,
                token: Mutex::new(token),
                client_name,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl KiCadClient {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub async fn connect() -> Result<Self, KiCadError> {
        ClientBuilder::new().connect().await
    }

    pub async fn ping(&self) -> Result<(), KiCadError> {
        let command = envelope::pack_any(&common_commands::Ping {}, CMD_PING);
        self.send_command(command).await?;
        Ok(())
    }

    pub async fn get_version(&self) -> Result<VersionInfo, KiCadError> {
        let command = envelope::pack_any(&common_commands::GetVersion {}, CMD_GET_VERSION);
        let response = self.send_command(command).await?;

        version_from_response(&response)
    }

    pub async fn get_open_documents(
        &self,
        document_type: DocumentType,
    ) -> Result<Vec<DocumentSpecifier>, KiCadError> {
        let command = common_commands::GetOpenDocuments {
            r#type: document_type.to_proto(),
        };

        let response = self
            .send_command(envelope::pack_any(&command, CMD_GET_OPEN_DOCUMENTS))
            .await?;

        let payload: common_commands::GetOpenDocumentsResponse =
            envelope::unpack_any(&response, RES_GET_OPEN_DOCUMENTS)?;

        let docs: Vec<DocumentSpecifier> = payload
            .documents
            .into_iter()
            .filter_map(map_document_specifier)
            .collect();
        tracing::debug!(%document_type, count = docs.len(), "listed open documents");
        Ok(docs)
    }

    pub async fn get_footprints(&self, board: &BoardHandle) -> Result<Vec<Footprint>, KiCadError> {
        let items = self
            .get_items_raw(
                board,
                vec![common_types::KiCadObjectType::KotPcbFootprint as i32],
            )
            .await?;

        items.iter().map(footprint_from_item).collect()
    }

    /// Pushes the reference label style of each footprint back to KiCad in one request.
    pub async fn update_footprints(
        &self,
        board: &BoardHandle,
        footprints: &[Footprint],
    ) -> Result<(), KiCadError> {
        let items = footprints
            .iter()
            .map(footprint_to_item)
            .collect::<Result<Vec<_>, _>>()?;

        let command = common_commands::UpdateItems {
            header: Some(item_header(board)),
            items,
        };

        let response = self
            .send_command(envelope::pack_any(&command, CMD_UPDATE_ITEMS))
            .await?;

        check_update_response(&response)?;

        tracing::debug!(count = footprints.len(), board = %board, "updated footprints");
        Ok(())
    }

    async fn send_command(&self, command: prost_types::Any) -> Result<ApiResponse, KiCadError> {
        let token = self
            .inner
            .token
            .lock()
            .map_err(|_| KiCadError::InternalPoisoned)?
            .clone();

        tracing::debug!(command = %command.type_url, "sending KiCad command");
        let request_bytes = envelope::encode_request(&token, &self.inner.client_name, command);
        let response_bytes = self.inner.transport.roundtrip(request_bytes).await?;

        let response = envelope::decode_response(&response_bytes)?;

        if let Some(err) = envelope::status_error(&response) {
            return Err(err);
        }

        if token.is_empty() {
            if let Some(header) = response.header.as_ref() {
                if !header.kicad_token.is_empty() {
                    let mut guard = self
                        .inner
                        .token
                        .lock()
                        .map_err(|_| KiCadError::InternalPoisoned)?;
                    *guard = header.kicad_token.clone();
                }
            }
        }

        Ok(response)
    }

    async fn get_items_raw(
        &self,
        board: &BoardHandle,
        types: Vec<i32>,
    ) -> Result<Vec<prost_types::Any>, KiCadError> {
        let command = common_commands::GetItems {
            header: Some(item_header(board)),
            types,
        };

        let response = self
            .send_command(envelope::pack_any(&command, CMD_GET_ITEMS))
            .await?;

        let payload: common_commands::GetItemsResponse =
            envelope::unpack_any(&response, RES_GET_ITEMS_RESPONSE)?;

        if let Some(err) = envelope::item_request_error(payload.status) {
            return Err(err);
        }

        Ok(payload.items)
    }
}

impl BoardHost for KiCadClient {
    async fn open_board(&self, target: &BoardTarget) -> Result<BoardHandle, KiCadError> {
        target.validate()?;
        let docs = self.get_open_documents(DocumentType::Pcb).await?;
        board_from_documents(&docs, target)
    }

    async fn footprints(&self, board: &BoardHandle) -> Result<Vec<Footprint>, KiCadError> {
        self.get_footprints(board).await
    }

    async fn update_footprints(
        &self,
        board: &BoardHandle,
        footprints: &[Footprint],
    ) -> Result<(), KiCadError> {
        KiCadClient::update_footprints(self, board, footprints).await
    }
}

fn version_from_response(response: &ApiResponse) -> Result<VersionInfo, KiCadError> {
    let payload: common_commands::GetVersionResponse =
        envelope::unpack_any(response, RES_GET_VERSION)?;

    let version = payload.version.ok_or_else(|| KiCadError::MissingPayload {
        expected_type_url: "kiapi.common.types.KiCadVersion".to_string(),
    })?;

    Ok(VersionInfo {
        major: version.major,
        minor: version.minor,
        patch: version.patch,
        full_version: version.full_version,
    })
}

/// Fails on the request-level status first, then on the first rejected item.
fn check_update_response(response: &ApiResponse) -> Result<(), KiCadError> {
    let payload: common_commands::UpdateItemsResponse =
        envelope::unpack_any(response, RES_UPDATE_ITEMS_RESPONSE)?;

    if let Some(err) = envelope::item_request_error(payload.status) {
        return Err(err);
    }

    for result in &payload.updated_items {
        if let Some(err) = envelope::item_update_error(result.status.as_ref()) {
            return Err(err);
        }
    }

    Ok(())
}

fn board_from_documents(
    docs: &[DocumentSpecifier],
    target: &BoardTarget,
) -> Result<BoardHandle, KiCadError> {
    let selected = host::select_board(docs, target)?;
    Ok(BoardHandle::new(selected.clone()))
}

fn item_header(board: &BoardHandle) -> common_types::ItemHeader {
    common_types::ItemHeader {
        document: Some(model_document_to_proto(board.document())),
        container: None,
    }
}

fn map_document_specifier(source: common_types::DocumentSpecifier) -> Option<DocumentSpecifier> {
    let document_type = DocumentType::from_proto(source.r#type)?;
    let board_filename = match source.identifier {
        Some(common_types::document_specifier::Identifier::BoardFilename(filename)) => {
            Some(filename)
        }
        None => None,
    };

    let project = source.project.unwrap_or_default();

    Some(DocumentSpecifier {
        document_type,
        board_filename,
        project: ProjectInfo {
            name: (!project.name.is_empty()).then_some(project.name),
            path: (!project.path.is_empty()).then(|| PathBuf::from(project.path)),
        },
    })
}

fn model_document_to_proto(document: &DocumentSpecifier) -> common_types::DocumentSpecifier {
    let identifier = document.board_filename.as_ref().map(|filename| {
        common_types::document_specifier::Identifier::BoardFilename(filename.clone())
    });

    let project = common_types::ProjectSpecifier {
        name: document.project.name.clone().unwrap_or_default(),
        path: document
            .project
            .path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_default(),
    };

    common_types::DocumentSpecifier {
        r#type: document.document_type.to_proto(),
        identifier,
        project: Some(project),
    }
}

fn footprint_from_item(item: &prost_types::Any) -> Result<Footprint, KiCadError> {
    let footprint =
        envelope::decode_item::<board_types::FootprintInstance>(item, ITEM_FOOTPRINT_INSTANCE)?;

    let label_text = footprint
        .reference_field
        .as_ref()
        .and_then(|field| field.text.as_ref());
    let text = label_text.and_then(|board_text| board_text.text.as_ref());
    let attributes = text.and_then(|text| text.attributes.as_ref());

    Ok(Footprint {
        id: footprint.id.map(|id| id.value),
        reference: text.map(|text| text.text.clone()).unwrap_or_default(),
        layer: footprint.layer,
        reference_label: ReferenceLabel {
            layer: label_text.map_or(0, |board_text| board_text.layer),
            size_nm: attributes
                .and_then(|attributes| attributes.size)
                .map(|size| Vector2Nm {
                    x_nm: size.x_nm,
                    y_nm: size.y_nm,
                }),
            thickness_nm: attributes
                .and_then(|attributes| attributes.stroke_width)
                .map(|width| width.value_nm),
        },
        encoded: item.value.clone(),
    })
}

/// Re-encodes a footprint as KiCad sent it, with only the reference label's
/// size and stroke width replaced.
fn footprint_to_item(footprint: &Footprint) -> Result<prost_types::Any, KiCadError> {
    if footprint.encoded.is_empty() {
        return Err(KiCadError::DetachedFootprint {
            reference: footprint.reference.clone(),
        });
    }

    let label = &footprint.reference_label;
    let value = wire::edit_path(&footprint.encoded, &REFERENCE_ATTRIBUTES_PATH, |attributes| {
        let mut attributes = attributes.to_vec();
        if let Some(size) = label.size_nm {
            let size = common_types::Vector2 {
                x_nm: size.x_nm,
                y_nm: size.y_nm,
            };
            attributes = wire::set_field(
                &attributes,
                common_types::TextAttributes::SIZE_TAG,
                &size.encode_to_vec(),
            )?;
        }
        if let Some(thickness) = label.thickness_nm {
            let width = common_types::Distance {
                value_nm: thickness,
            };
            attributes = wire::set_field(
                &attributes,
                common_types::TextAttributes::STROKE_WIDTH_TAG,
                &width.encode_to_vec(),
            )?;
        }
        Ok(attributes)
    })?;

    Ok(prost_types::Any {
        type_url: envelope::type_url(ITEM_FOOTPRINT_INSTANCE),
        value,
    })
}

fn resolve_socket_uri(explicit: Option<&str>) -> String {
    if let Some(socket) = explicit {
        return normalize_socket_uri(socket);
    }

    if let Ok(socket) = std::env::var(KICAD_API_SOCKET_ENV) {
        if !socket.is_empty() {
            return normalize_socket_uri(&socket);
        }
    }

    normalize_socket_uri(default_socket_path().to_string_lossy().as_ref())
}

fn default_socket_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        return std::env::temp_dir().join("kicad").join("api.sock");
    }

    #[cfg(not(target_os = "windows"))]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let flatpak = PathBuf::from(home)
                .join(".var")
                .join("app")
                .join("org.kicad.KiCad")
                .join("cache")
                .join("tmp")
                .join("kicad")
                .join("api.sock");
            if flatpak.exists() {
                return flatpak;
            }
        }

        PathBuf::from("/tmp/kicad/api.sock")
    }
}

fn normalize_socket_uri(socket: &str) -> String {
    if socket.contains("://") {
        return socket.to_string();
    }

    format!("ipc://{socket}")
}

fn is_missing_ipc_socket(socket_uri: &str) -> bool {
    socket_uri
        .strip_prefix("ipc://")
        .is_some_and(|path| !PathBuf::from(path).exists())
}

fn default_client_name() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis())
        .unwrap_or(0);

    format!("kicad-refsize-{}-{millis}", std::process::id())
}
