use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use ss_core::errors::LshError;
use ss_core::ids::TenantId;

/// A tenant's hyperplane set, shape `[T, B, D]`, stored flat and row-major
/// (`planes[t * B * D + b * D + d]`). Generated once at `initialize` from
/// a seed derived deterministically from the tenant id, so client and
/// server always agree bit-for-bit without exchanging the seed itself.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneSet {
    pub tables: usize,
    pub bits_per_table: usize,
    pub dim: usize,
    data: Vec<f64>,
}

const PLANE_FORMAT_VERSION: u32 = 1;

impl PlaneSet {
    /// Deterministically derive a tenant's planes. The seed is the first
    /// 8 bytes of `blake3(tenant_id)`, matching the convention the
    /// embedding cache and session manager use elsewhere for content
    /// addressing. Each `[b, :]` row is normalized to unit length so
    /// later dot products directly reflect cosine similarity sign.
    pub fn generate(
        tenant_id: &TenantId,
        tables: usize,
        bits_per_table: usize,
        dim: usize,
    ) -> Result<Self, LshError> {
        if tables == 0 || bits_per_table == 0 || dim == 0 {
            return Err(LshError::InvalidConfig {
                reason: "tables, bits_per_table, and dim must all be positive".into(),
            });
        }

        let hash = blake3::hash(tenant_id.as_str().as_bytes());
        let seed = u64::from_le_bytes(hash.as_bytes()[0..8].try_into().unwrap());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mut data = Vec::with_capacity(tables * bits_per_table * dim);
        for _ in 0..(tables * bits_per_table) {
            let mut row: Vec<f64> = (0..dim).map(|_| rng.gen_range(-1.0..1.0)).collect();
            let norm: f64 = row.iter().map(|x| x * x).sum::<f64>().sqrt();
            let norm = if norm > 0.0 { norm } else { 1.0 };
            for x in row.iter_mut() {
                *x /= norm;
            }
            data.extend(row);
        }

        Ok(Self {
            tables,
            bits_per_table,
            dim,
            data,
        })
    }

    /// The hyperplane normal for table `t`, bit `b`.
    pub fn row(&self, t: usize, b: usize) -> &[f64] {
        let start = (t * self.bits_per_table + b) * self.dim;
        &self.data[start..start + self.dim]
    }

    /// Little-endian byte format: a `(version, tables, bits_per_table,
    /// dim)` header of four `u32`s, followed by `tables * bits_per_table *
    /// dim` little-endian IEEE-754 doubles, row-major.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out =
            Vec::with_capacity(16 + self.data.len() * std::mem::size_of::<f64>());
        out.extend_from_slice(&PLANE_FORMAT_VERSION.to_le_bytes());
        out.extend_from_slice(&(self.tables as u32).to_le_bytes());
        out.extend_from_slice(&(self.bits_per_table as u32).to_le_bytes());
        out.extend_from_slice(&(self.dim as u32).to_le_bytes());
        for v in &self.data {
            out.extend_from_slice(&v.to_le_bytes());
        }
        out
    }

    pub fn deserialize(bytes: &[u8]) -> Result<Self, LshError> {
        if bytes.len() < 16 {
            return Err(LshError::PlaneDeserializationFailed {
                reason: "payload shorter than the 16-byte header".into(),
            });
        }
        let version = u32::from_le_bytes(bytes[0..4].try_into().unwrap());
        if version != PLANE_FORMAT_VERSION {
            return Err(LshError::PlaneDeserializationFailed {
                reason: format!("unsupported plane format version {version}"),
            });
        }
        let tables = u32::from_le_bytes(bytes[4..8].try_into().unwrap()) as usize;
        let bits_per_table = u32::from_le_bytes(bytes[8..12].try_into().unwrap()) as usize;
        let dim = u32::from_le_bytes(bytes[12..16].try_into().unwrap()) as usize;

        let expected_doubles = tables * bits_per_table * dim;
        let expected_len = 16 + expected_doubles * std::mem::size_of::<f64>();
        if bytes.len() != expected_len {
            return Err(LshError::PlaneDeserializationFailed {
                reason: format!(
                    "expected {expected_len} bytes for [{tables},{bits_per_table},{dim}], got {}",
                    bytes.len()
                ),
            });
        }

        let mut data = Vec::with_capacity(expected_doubles);
        for chunk in bytes[16..].chunks_exact(8) {
            data.push(f64::from_le_bytes(chunk.try_into().unwrap()));
        }

        Ok(Self {
            tables,
            bits_per_table,
            dim,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_deterministic_for_the_same_tenant() {
        let tenant: TenantId = "tenant-a".into();
        let a = PlaneSet::generate(&tenant, 4, 8, 16).unwrap();
        let b = PlaneSet::generate(&tenant, 4, 8, 16).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_tenants_get_different_planes() {
        let a = PlaneSet::generate(&"tenant-a".into(), 4, 8, 16).unwrap();
        let b = PlaneSet::generate(&"tenant-b".into(), 4, 8, 16).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn rows_are_unit_length() {
        let planes = PlaneSet::generate(&"tenant-norm".into(), 2, 3, 32).unwrap();
        for t in 0..2 {
            for b in 0..3 {
                let norm: f64 = planes.row(t, b).iter().map(|x| x * x).sum::<f64>().sqrt();
                assert!((norm - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn serialize_deserialize_roundtrip() {
        let planes = PlaneSet::generate(&"tenant-ser".into(), 3, 5, 12).unwrap();
        let bytes = planes.serialize();
        let back = PlaneSet::deserialize(&bytes).unwrap();
        assert_eq!(planes, back);
    }

    #[test]
    fn deserialize_rejects_truncated_payload() {
        let planes = PlaneSet::generate(&"tenant-trunc".into(), 2, 2, 4).unwrap();
        let mut bytes = planes.serialize();
        bytes.truncate(bytes.len() - 4);
        assert!(PlaneSet::deserialize(&bytes).is_err());
    }

    #[test]
    fn zero_tables_is_rejected() {
        assert!(PlaneSet::generate(&"tenant-zero".into(), 0, 8, 16).is_err());
    }
}
