use prost::Message;
use prost_types::Any;

use crate::error::KiCadError;
use crate::proto::kiapi::common::commands::{ItemStatus, ItemStatusCode};
use crate::proto::kiapi::common::types::ItemRequestStatus;
use crate::proto::kiapi::common::{ApiRequest, ApiRequestHeader, ApiResponse, ApiStatusCode};

pub(crate) fn type_url(type_name: &str) -> String {
    format!("type.googleapis.com/{type_name}")
}

pub(crate) fn pack_any<T: Message>(message: &T, type_name: &str) -> Any {
    Any {
        type_url: type_url(type_name),
        value: message.encode_to_vec(),
    }
}

/// Decodes an item payload, rejecting anything that is not `expected_type_name`.
pub(crate) fn decode_item<T: Message + Default>(
    payload: &Any,
    expected_type_name: &str,
) -> Result<T, KiCadError> {
    let expected_type_url = type_url(expected_type_name);
    if payload.type_url != expected_type_url {
        return Err(KiCadError::UnexpectedPayloadType {
            expected_type_url,
            actual_type_url: payload.type_url.clone(),
        });
    }

    T::decode(payload.value.as_slice()).map_err(|err| KiCadError::ProtobufDecode(err.to_string()))
}

pub(crate) fn unpack_any<T: Message + Default>(
    response: &ApiResponse,
    expected_type_name: &str,
) -> Result<T, KiCadError> {
    let payload = response
        .message
        .as_ref()
        .ok_or_else(|| KiCadError::MissingPayload {
            expected_type_url: type_url(expected_type_name),
        })?;

    decode_item(payload, expected_type_name)
}

pub(crate) fn encode_request(token: &str, client_name: &str, command: Any) -> Vec<u8> {
    ApiRequest {
        header: Some(ApiRequestHeader {
            kicad_token: token.to_string(),
            client_name: client_name.to_string(),
        }),
        message: Some(command),
    }
    .encode_to_vec()
}

pub(crate) fn decode_response(bytes: &[u8]) -> Result<ApiResponse, KiCadError> {
    ApiResponse::decode(bytes).map_err(|err| KiCadError::ProtobufDecode(err.to_string()))
}

pub(crate) fn status_error(response: &ApiResponse) -> Option<KiCadError> {
    let status = response.status.as_ref()?;
    let code = ApiStatusCode::try_from(status.status).unwrap_or(ApiStatusCode::AsUnknown);

    if code == ApiStatusCode::AsOk {
        return None;
    }

    Some(KiCadError::ApiStatus {
        code: code.as_str_name().to_string(),
        message: status.error_message.clone(),
    })
}

pub(crate) fn item_request_error(status: i32) -> Option<KiCadError> {
    let code = ItemRequestStatus::try_from(status).unwrap_or(ItemRequestStatus::IrsUnknown);
    if code == ItemRequestStatus::IrsOk {
        return None;
    }

    Some(KiCadError::ItemStatus {
        code: code.as_str_name().to_string(),
    })
}

/// A missing per-item status counts as success; KiCad omits it on some builds.
pub(crate) fn item_update_error(status: Option<&ItemStatus>) -> Option<KiCadError> {
    let status = status?;
    let code = ItemStatusCode::try_from(status.code).unwrap_or(ItemStatusCode::IscUnknown);
    if code == ItemStatusCode::IscOk {
        return None;
    }

    Some(KiCadError::ItemUpdate {
        code: code.as_str_name().to_string(),
        message: status.error_message.clone(),
    })
}

#[cfg(test)]
mod tests {
    use crate::error::KiCadError;
    use crate::proto::kiapi::common::commands::{GetVersionResponse, ItemStatus};
    use crate::proto::kiapi::common::types::KiCadVersion;
    use crate::proto::kiapi::common::{ApiResponse, ApiResponseStatus};

    use super::{item_request_error, item_update_error, pack_any, status_error, unpack_any};

    #[test]
    fn status_error_returns_none_for_ok() {
        let response = ApiResponse {
            header: None,
            status: Some(ApiResponseStatus {
                status: 1,
                error_message: String::new(),
            }),
            message: None,
        };

        assert!(status_error(&response).is_none());
    }

    #[test]
    fn status_error_returns_error_for_non_ok() {
        let response = ApiResponse {
            header: None,
            status: Some(ApiResponseStatus {
                status: 6,
                error_message: "token mismatch".to_string(),
            }),
            message: None,
        };

        let err = status_error(&response)
            .expect("non-ok API status should map to KiCadError::ApiStatus");
        let message = err.to_string();
        assert!(message.contains("AS_TOKEN_MISMATCH"));
    }

    #[test]
    fn unpack_any_rejects_wrong_payload_type() {
        let response = ApiResponse {
            header: None,
            status: None,
            message: Some(pack_any(
                &GetVersionResponse { version: None },
                "kiapi.common.commands.GetVersionResponse",
            )),
        };

        let result: Result<KiCadVersion, _> =
            unpack_any(&response, "kiapi.common.types.KiCadVersion");
        assert!(matches!(
            result,
            Err(KiCadError::UnexpectedPayloadType { .. })
        ));
    }

    #[test]
    fn unpack_any_reports_missing_payload() {
        let response = ApiResponse::default();
        let result: Result<GetVersionResponse, _> =
            unpack_any(&response, "kiapi.common.commands.GetVersionResponse");
        assert!(matches!(result, Err(KiCadError::MissingPayload { .. })));
    }

    #[test]
    fn item_request_error_maps_document_not_found() {
        assert!(item_request_error(1).is_none());
        let err = item_request_error(2).expect("IRS_DOCUMENT_NOT_FOUND should be an error");
        assert!(err.to_string().contains("IRS_DOCUMENT_NOT_FOUND"));
    }

    #[test]
    fn item_update_error_maps_immutable_items() {
        assert!(item_update_error(None).is_none());
        let status = ItemStatus {
            code: 5,
            error_message: "item is locked".to_string(),
        };
        let err = item_update_error(Some(&status)).expect("ISC_IMMUTABLE should be an error");
        match err {
            KiCadError::ItemUpdate { code, message } => {
                assert_eq!(code, "ISC_IMMUTABLE");
                assert_eq!(message, "item is locked");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
