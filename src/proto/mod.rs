//! Subset of the KiCad IPC API schema (`kiapi.*`) spoken by this crate.
//!
//! Messages are declared with prost derives instead of being generated from the
//! `.proto` tree. Only the fields this crate reads are declared; anything else
//! on the wire is skipped on decode. Messages that are sent back to KiCad after
//! a read are edited through [`crate::wire`] so undeclared fields survive.

pub(crate) mod kiapi {
    #[allow(dead_code)]
    pub mod common {
        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct ApiRequestHeader {
            #[prost(string, tag = "1")]
            pub kicad_token: String,
            #[prost(string, tag = "2")]
            pub client_name: String,
        }

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct ApiRequest {
            #[prost(message, optional, tag = "1")]
            pub header: Option<ApiRequestHeader>,
            #[prost(message, optional, tag = "2")]
            pub message: Option<::prost_types::Any>,
        }

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct ApiResponseHeader {
            #[prost(string, tag = "1")]
            pub kicad_token: String,
        }

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct ApiResponseStatus {
            #[prost(enumeration = "ApiStatusCode", tag = "1")]
            pub status: i32,
            #[prost(string, tag = "2")]
            pub error_message: String,
        }

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct ApiResponse {
            #[prost(message, optional, tag = "1")]
            pub header: Option<ApiResponseHeader>,
            #[prost(message, optional, tag = "2")]
            pub status: Option<ApiResponseStatus>,
            #[prost(message, optional, tag = "3")]
            pub message: Option<::prost_types::Any>,
        }

        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
        #[repr(i32)]
        pub enum ApiStatusCode {
            AsUnknown = 0,
            AsOk = 1,
            AsTimeout = 2,
            AsBadRequest = 3,
            AsNotReady = 4,
            AsUnhandled = 5,
            AsTokenMismatch = 6,
            AsBusy = 7,
            AsUnimplemented = 8,
        }

        impl ApiStatusCode {
            pub fn as_str_name(&self) -> &'static str {
                match self {
                    Self::AsUnknown => "AS_UNKNOWN",
                    Self::AsOk => "AS_OK",
                    Self::AsTimeout => "AS_TIMEOUT",
                    Self::AsBadRequest => "AS_BAD_REQUEST",
                    Self::AsNotReady => "AS_NOT_READY",
                    Self::AsUnhandled => "AS_UNHANDLED",
                    Self::AsTokenMismatch => "AS_TOKEN_MISMATCH",
                    Self::AsBusy => "AS_BUSY",
                    Self::AsUnimplemented => "AS_UNIMPLEMENTED",
                }
            }
        }

        pub mod types {
            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct KiCadVersion {
                #[prost(uint32, tag = "1")]
                pub major: u32,
                #[prost(uint32, tag = "2")]
                pub minor: u32,
                #[prost(uint32, tag = "3")]
                pub patch: u32,
                #[prost(string, tag = "4")]
                pub full_version: String,
            }

            #[derive(
                Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration,
            )]
            #[repr(i32)]
            pub enum DocumentType {
                DoctypeUnknown = 0,
                DoctypeSchematic = 1,
                DoctypeSymbol = 2,
                DoctypePcb = 3,
                DoctypeFootprint = 4,
                DoctypeDrawingSheet = 5,
                DoctypeProject = 6,
            }

            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct ProjectSpecifier {
                #[prost(string, tag = "1")]
                pub name: String,
                #[prost(string, tag = "2")]
                pub path: String,
            }

            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct DocumentSpecifier {
                #[prost(enumeration = "DocumentType", tag = "1")]
                pub r#type: i32,
                #[prost(oneof = "document_specifier::Identifier", tags = "4")]
                pub identifier: Option<document_specifier::Identifier>,
                #[prost(message, optional, tag = "5")]
                pub project: Option<ProjectSpecifier>,
            }

            pub mod document_specifier {
                #[derive(Clone, PartialEq, ::prost::Oneof)]
                pub enum Identifier {
                    #[prost(string, tag = "4")]
                    BoardFilename(String),
                }
            }

            #[derive(
                Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration,
            )]
            #[repr(i32)]
            pub enum KiCadObjectType {
                KotUnknown = 0,
                KotPcbFootprint = 1,
                KotPcbPad = 2,
                KotPcbShape = 3,
                KotPcbReferenceImage = 4,
                KotPcbField = 5,
                KotPcbGenerator = 6,
                KotPcbText = 7,
                KotPcbTextbox = 8,
            }

            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct Kiid {
                #[prost(string, tag = "1")]
                pub value: String,
            }

            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct ItemHeader {
                #[prost(message, optional, tag = "1")]
                pub document: Option<DocumentSpecifier>,
                #[prost(message, optional, tag = "2")]
                pub container: Option<Kiid>,
            }

            #[derive(
                Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration,
            )]
            #[repr(i32)]
            pub enum ItemRequestStatus {
                IrsUnknown = 0,
                IrsOk = 1,
                IrsDocumentNotFound = 2,
                IrsFieldMaskInvalid = 3,
            }

            impl ItemRequestStatus {
                pub fn as_str_name(&self) -> &'static str {
                    match self {
                        Self::IrsUnknown => "IRS_UNKNOWN",
                        Self::IrsOk => "IRS_OK",
                        Self::IrsDocumentNotFound => "IRS_DOCUMENT_NOT_FOUND",
                        Self::IrsFieldMaskInvalid => "IRS_FIELD_MASK_INVALID",
                    }
                }
            }

            #[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
            pub struct Vector2 {
                #[prost(int64, tag = "1")]
                pub x_nm: i64,
                #[prost(int64, tag = "2")]
                pub y_nm: i64,
            }

            #[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
            pub struct Distance {
                #[prost(int64, tag = "1")]
                pub value_nm: i64,
            }

            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct TextAttributes {
                #[prost(message, optional, tag = "6")]
                pub stroke_width: Option<Distance>,
                #[prost(message, optional, tag = "14")]
                pub size: Option<Vector2>,
            }

            impl TextAttributes {
                pub const STROKE_WIDTH_TAG: u32 = 6;
                pub const SIZE_TAG: u32 = 14;
            }

            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct Text {
                #[prost(message, optional, tag = "1")]
                pub position: Option<Vector2>,
                #[prost(message, optional, tag = "2")]
                pub attributes: Option<TextAttributes>,
                #[prost(string, tag = "3")]
                pub text: String,
            }

            impl Text {
                pub const ATTRIBUTES_TAG: u32 = 2;
            }
        }

        pub mod commands {
            use super::types;

            #[derive(Clone, Copy, PartialEq, ::prost::Message)]
            pub struct Ping {}

            #[derive(Clone, Copy, PartialEq, ::prost::Message)]
            pub struct GetVersion {}

            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct GetVersionResponse {
                #[prost(message, optional, tag = "1")]
                pub version: Option<types::KiCadVersion>,
            }

            #[derive(Clone, Copy, PartialEq, ::prost::Message)]
            pub struct GetOpenDocuments {
                #[prost(enumeration = "types::DocumentType", tag = "1")]
                pub r#type: i32,
            }

            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct GetOpenDocumentsResponse {
                #[prost(message, repeated, tag = "1")]
                pub documents: Vec<types::DocumentSpecifier>,
            }

            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct GetItems {
                #[prost(message, optional, tag = "1")]
                pub header: Option<types::ItemHeader>,
                #[prost(enumeration = "types::KiCadObjectType", repeated, tag = "2")]
                pub types: Vec<i32>,
            }

            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct GetItemsResponse {
                #[prost(message, optional, tag = "1")]
                pub header: Option<types::ItemHeader>,
                #[prost(enumeration = "types::ItemRequestStatus", tag = "2")]
                pub status: i32,
                #[prost(message, repeated, tag = "3")]
                pub items: Vec<::prost_types::Any>,
            }

            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct UpdateItems {
                #[prost(message, optional, tag = "1")]
                pub header: Option<types::ItemHeader>,
                #[prost(message, repeated, tag = "2")]
                pub items: Vec<::prost_types::Any>,
            }

            #[derive(
                Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration,
            )]
            #[repr(i32)]
            pub enum ItemStatusCode {
                IscUnknown = 0,
                IscOk = 1,
                IscInvalidType = 2,
                IscExisting = 3,
                IscNonexistent = 4,
                IscImmutable = 5,
                IscInvalidData = 7,
            }

            impl ItemStatusCode {
                pub fn as_str_name(&self) -> &'static str {
                    match self {
                        Self::IscUnknown => "ISC_UNKNOWN",
                        Self::IscOk => "ISC_OK",
                        Self::IscInvalidType => "ISC_INVALID_TYPE",
                        Self::IscExisting => "ISC_EXISTING",
                        Self::IscNonexistent => "ISC_NONEXISTENT",
                        Self::IscImmutable => "ISC_IMMUTABLE",
                        Self::IscInvalidData => "ISC_INVALID_DATA",
                    }
                }
            }

            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct ItemStatus {
                #[prost(enumeration = "ItemStatusCode", tag = "1")]
                pub code: i32,
                #[prost(string, tag = "2")]
                pub error_message: String,
            }

            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct ItemUpdateResult {
                #[prost(message, optional, tag = "1")]
                pub status: Option<ItemStatus>,
                #[prost(message, optional, tag = "2")]
                pub item: Option<::prost_types::Any>,
            }

            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct UpdateItemsResponse {
                #[prost(message, optional, tag = "1")]
                pub header: Option<types::ItemHeader>,
                #[prost(enumeration = "types::ItemRequestStatus", tag = "2")]
                pub status: i32,
                #[prost(message, repeated, tag = "3")]
                pub updated_items: Vec<ItemUpdateResult>,
            }
        }
    }

    #[allow(dead_code)]
    pub mod board {
        pub mod types {
            use crate::proto::kiapi::common::types as common_types;

            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct BoardText {
                #[prost(message, optional, tag = "1")]
                pub id: Option<common_types::Kiid>,
                #[prost(message, optional, tag = "2")]
                pub text: Option<common_types::Text>,
                #[prost(int32, tag = "3")]
                pub layer: i32,
            }

            impl BoardText {
                pub const TEXT_TAG: u32 = 2;
            }

            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct Field {
                #[prost(string, tag = "2")]
                pub name: String,
                #[prost(message, optional, tag = "3")]
                pub text: Option<BoardText>,
                #[prost(bool, tag = "4")]
                pub visible: bool,
            }

            impl Field {
                pub const TEXT_TAG: u32 = 3;
            }

            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct FootprintInstance {
                #[prost(message, optional, tag = "1")]
                pub id: Option<common_types::Kiid>,
                #[prost(message, optional, tag = "2")]
                pub position: Option<common_types::Vector2>,
                #[prost(int32, tag = "4")]
                pub layer: i32,
                #[prost(message, optional, tag = "7")]
                pub reference_field: Option<Field>,
            }

            impl FootprintInstance {
                pub const REFERENCE_FIELD_TAG: u32 = 7;
            }
        }
    }
}
