use crate::error::KiCadError;
use crate::model::units::{from_mm, to_mm};

/// `kiapi.board.types.BoardLayer` codes for the outer copper and silkscreen layers.
pub const LAYER_F_CU: i32 = 3;
pub const LAYER_B_CU: i32 = 34;
pub const LAYER_F_SILKS: i32 = 40;
pub const LAYER_B_SILKS: i32 = 39;

const TECHNICAL_LAYERS: [&str; 18] = [
    "B.Adhes",
    "F.Adhes",
    "B.Paste",
    "F.Paste",
    "B.SilkS",
    "F.SilkS",
    "B.Mask",
    "F.Mask",
    "Dwgs.User",
    "Cmts.User",
    "Eco1.User",
    "Eco2.User",
    "Edge.Cuts",
    "Margin",
    "B.CrtYd",
    "F.CrtYd",
    "B.Fab",
    "F.Fab",
];

const LAYER_RESCUE: i32 = 62;

/// Canonical KiCad name (`F.Cu`, `In2.Cu`, `B.SilkS`, ...) for a board layer code.
///
/// KiCad 9 numbers `User.1`..`User.9` before `Rescue` and `User.10`..`User.45` after it.
pub fn layer_name(layer_id: i32) -> String {
    match layer_id {
        LAYER_F_CU => "F.Cu".to_string(),
        4..=33 => format!("In{}.Cu", layer_id - 3),
        LAYER_B_CU => "B.Cu".to_string(),
        35..=52 => TECHNICAL_LAYERS[(layer_id - 35) as usize].to_string(),
        53..=61 => format!("User.{}", layer_id - 52),
        LAYER_RESCUE => "Rescue".to_string(),
        63..=98 => format!("User.{}", layer_id - 53),
        _ => format!("UNKNOWN_LAYER({layer_id})"),
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Vector2Nm {
    pub x_nm: i64,
    pub y_nm: i64,
}

/// A board text element whose glyph size and stroke can be restyled.
pub trait SizedText {
    fn layer(&self) -> i32;

    fn size(&self) -> Option<Vector2Nm>;

    fn thickness(&self) -> Option<i64>;

    fn set_size(&mut self, size: Vector2Nm);

    fn set_thickness(&mut self, thickness_nm: i64);
}

/// The reference-designator text of a footprint.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReferenceLabel {
    pub layer: i32,
    pub size_nm: Option<Vector2Nm>,
    pub thickness_nm: Option<i64>,
}

impl SizedText for ReferenceLabel {
    fn layer(&self) -> i32 {
        self.layer
    }

    fn size(&self) -> Option<Vector2Nm> {
        self.size_nm
    }

    fn thickness(&self) -> Option<i64> {
        self.thickness_nm
    }

    fn set_size(&mut self, size: Vector2Nm) {
        self.size_nm = Some(size);
    }

    fn set_thickness(&mut self, thickness_nm: i64) {
        self.thickness_nm = Some(thickness_nm);
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Footprint {
    pub id: Option<String>,
    pub reference: String,
    pub layer: i32,
    pub reference_label: ReferenceLabel,
    /// `FootprintInstance` bytes as KiCad sent them.
    pub(crate) encoded: Vec<u8>,
}

impl Footprint {
    /// A footprint built outside the IPC client, e.g. by a custom [`crate::BoardHost`].
    ///
    /// It has no KiCad item data attached, so [`crate::KiCadClient`] refuses to
    /// push it back with [`KiCadError::DetachedFootprint`].
    pub fn new(
        id: Option<String>,
        reference: impl Into<String>,
        layer: i32,
        reference_label: ReferenceLabel,
    ) -> Self {
        Self {
            id,
            reference: reference.into(),
            layer,
            reference_label,
            encoded: Vec::new(),
        }
    }
}

/// Target glyph size and stroke for reference labels.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LabelStyle {
    pub width_nm: i64,
    pub height_nm: i64,
    pub thickness_nm: i64,
}

impl LabelStyle {
    pub const DEFAULT_SIZE_MM: f64 = 2.0;
    pub const DEFAULT_THICKNESS_MM: f64 = 0.3;

    pub fn from_mm(width_mm: f64, height_mm: f64, thickness_mm: f64) -> Result<Self, KiCadError> {
        for (name, value) in [
            ("width", width_mm),
            ("height", height_mm),
            ("thickness", thickness_mm),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(KiCadError::Config {
                    reason: format!("label {name} must be a positive length in mm, got {value}"),
                });
            }
        }

        Ok(Self {
            width_nm: from_mm(width_mm),
            height_nm: from_mm(height_mm),
            thickness_nm: from_mm(thickness_mm),
        })
    }

    pub fn apply(&self, label: &mut impl SizedText) {
        label.set_size(Vector2Nm {
            x_nm: self.width_nm,
            y_nm: self.height_nm,
        });
        label.set_thickness(self.thickness_nm);
    }
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            width_nm: from_mm(Self::DEFAULT_SIZE_MM),
            height_nm: from_mm(Self::DEFAULT_SIZE_MM),
            thickness_nm: from_mm(Self::DEFAULT_THICKNESS_MM),
        }
    }
}

impl std::fmt::Display for LabelStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{} mm, {} mm stroke",
            to_mm(self.width_nm),
            to_mm(self.height_nm),
            to_mm(self.thickness_nm)
        )
    }
}
