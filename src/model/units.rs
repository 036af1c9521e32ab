//! KiCad stores every length as a signed count of nanometres.

pub const NM_PER_MM: f64 = 1_000_000.0;

/// Converts millimetres to KiCad internal units, rounding to the nearest nanometre.
pub fn from_mm(mm: f64) -> i64 {
    (mm * NM_PER_MM).round() as i64
}

pub fn to_mm(nm: i64) -> f64 {
    nm as f64 / NM_PER_MM
}
