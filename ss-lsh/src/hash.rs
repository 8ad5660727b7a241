use ss_core::errors::LshError;

use crate::planes::PlaneSet;

/// Compute one hash code per table for `v`. `v` is normalized to unit
/// length first (the planes are already unit rows, so the resulting sign
/// pattern is exactly the sign of cosine similarity against each row).
/// Bit convention: `dot >= 0 => 1`, `dot < 0 => 0`, packed little-endian
/// (bit 0 is the least-significant bit, from row `b = 0`).
pub fn hash_vector(planes: &PlaneSet, v: &[f64]) -> Result<Vec<u32>, LshError> {
    if v.len() != planes.dim {
        return Err(LshError::DimensionMismatch {
            expected: planes.dim,
            actual: v.len(),
        });
    }
    let norm: f64 = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm == 0.0 {
        return Err(LshError::ZeroNormVector);
    }
    let normalized: Vec<f64> = v.iter().map(|x| x / norm).collect();

    let mut codes = Vec::with_capacity(planes.tables);
    for t in 0..planes.tables {
        let mut code: u32 = 0;
        for b in 0..planes.bits_per_table {
            let row = planes.row(t, b);
            let dot: f64 = row.iter().zip(normalized.iter()).map(|(a, x)| a * x).sum();
            if dot >= 0.0 {
                code |= 1 << b;
            }
        }
        codes.push(code);
    }
    Ok(codes)
}
