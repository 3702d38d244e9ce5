use std::collections::HashMap;
use std::fmt;

use glam::{Mat4, Vec4};

/// Type of a field in a program's uniform block.
///
/// Offsets follow the WGSL uniform address-space rules: scalars align to 4
/// bytes, `vec4`/`mat4x4` and array elements align to 16. Integer arrays are
/// declared in WGSL as `array<vec4<i32>, N>` and only the `.x` lane is used.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UniformKind {
    Int,
    IntArray(usize),
    Float,
    Vec4,
    Mat4,
}

impl UniformKind {
    /// Stride of one `IntArray` element.
    pub const ARRAY_STRIDE: usize = 16;

    pub const fn align(self) -> usize {
        match self {
            UniformKind::Int | UniformKind::Float => 4,
            UniformKind::IntArray(_) | UniformKind::Vec4 | UniformKind::Mat4 => 16,
        }
    }

    pub const fn size(self) -> usize {
        match self {
            UniformKind::Int | UniformKind::Float => 4,
            UniformKind::IntArray(n) => n * Self::ARRAY_STRIDE,
            UniformKind::Vec4 => 16,
            UniformKind::Mat4 => 64,
        }
    }
}

impl fmt::Display for UniformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniformKind::Int => f.write_str("i32"),
            UniformKind::IntArray(n) => write!(f, "array<vec4<i32>, {n}>"),
            UniformKind::Float => f.write_str("f32"),
            UniformKind::Vec4 => f.write_str("vec4<f32>"),
            UniformKind::Mat4 => f.write_str("mat4x4<f32>"),
        }
    }
}

/// Declaration of one uniform, in WGSL struct order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UniformField<'a> {
    pub name: &'a str,
    pub kind: UniformKind,
}

impl<'a> UniformField<'a> {
    pub const fn new(name: &'a str, kind: UniformKind) -> Self {
        Self { name, kind }
    }
}

/// Resolved position of a uniform inside the block.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UniformLocation {
    pub offset: usize,
    pub kind: UniformKind,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UniformError {
    #[error("no uniform named '{0}'")]
    UnknownName(String),

    #[error("uniform '{0}' declared twice")]
    Duplicate(String),

    #[error("uniform '{name}' is {declared}, not {requested}")]
    KindMismatch {
        name: String,
        declared: UniformKind,
        requested: UniformKind,
    },

    #[error("uniform '{name}' holds {capacity} elements, got {len}")]
    ArrayTooLong {
        name: String,
        len: usize,
        capacity: usize,
    },
}

/// Host-side copy of a uniform block with name-addressed setters.
///
/// Names are resolved to byte offsets once, when the block is built. Setters
/// write into the staging bytes and mark the block dirty; the owner uploads
/// it before drawing.
#[derive(Debug, Clone)]
pub struct UniformBlock {
    locations: HashMap<String, UniformLocation>,
    data: Vec<u8>,
    dirty: bool,
}

impl UniformBlock {
    /// Smallest block size handed to the GPU.
    pub const MIN_SIZE: usize = 16;

    pub fn new(fields: &[UniformField<'_>]) -> Result<Self, UniformError> {
        let mut locations = HashMap::with_capacity(fields.len());
        let mut cursor = 0usize;

        for field in fields {
            let offset = cursor.next_multiple_of(field.kind.align());
            cursor = offset + field.kind.size();

            let loc = UniformLocation {
                offset,
                kind: field.kind,
            };
            if locations.insert(field.name.to_owned(), loc).is_some() {
                return Err(UniformError::Duplicate(field.name.to_owned()));
            }
        }

        let size = cursor.next_multiple_of(16).max(Self::MIN_SIZE);

        Ok(Self {
            locations,
            data: vec![0; size],
            dirty: true,
        })
    }

    pub fn location(&self, name: &str) -> Option<UniformLocation> {
        self.locations.get(name).copied()
    }

    /// Size of the block in bytes (a multiple of 16).
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns whether the block changed since the last call, clearing the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub fn set_int(&mut self, name: &str, value: i32) -> Result<(), UniformError> {
        let offset = self.resolve(name, UniformKind::Int)?;
        self.write(offset, bytemuck::bytes_of(&value));
        Ok(())
    }

    /// Writes `values` starting at element 0; trailing elements keep their value.
    pub fn set_int_array(&mut self, name: &str, values: &[i32]) -> Result<(), UniformError> {
        let loc = self
            .location(name)
            .ok_or_else(|| UniformError::UnknownName(name.to_owned()))?;
        let UniformKind::IntArray(capacity) = loc.kind else {
            return Err(UniformError::KindMismatch {
                name: name.to_owned(),
                declared: loc.kind,
                requested: UniformKind::IntArray(values.len()),
            });
        };
        if values.len() > capacity {
            return Err(UniformError::ArrayTooLong {
                name: name.to_owned(),
                len: values.len(),
                capacity,
            });
        }

        for (i, v) in values.iter().enumerate() {
            self.write(
                loc.offset + i * UniformKind::ARRAY_STRIDE,
                bytemuck::bytes_of(v),
            );
        }
        Ok(())
    }

    pub fn set_float(&mut self, name: &str, value: f32) -> Result<(), UniformError> {
        let offset = self.resolve(name, UniformKind::Float)?;
        self.write(offset, bytemuck::bytes_of(&value));
        Ok(())
    }

    pub fn set_vec4(&mut self, name: &str, value: Vec4) -> Result<(), UniformError> {
        let offset = self.resolve(name, UniformKind::Vec4)?;
        self.write(offset, bytemuck::cast_slice(&value.to_array()));
        Ok(())
    }

    /// Writes a column-major 4x4 matrix.
    pub fn set_mat4(&mut self, name: &str, value: &Mat4) -> Result<(), UniformError> {
        let offset = self.resolve(name, UniformKind::Mat4)?;
        self.write(offset, bytemuck::cast_slice(&value.to_cols_array()));
        Ok(())
    }

    fn resolve(&self, name: &str, requested: UniformKind) -> Result<usize, UniformError> {
        let loc = self
            .location(name)
            .ok_or_else(|| UniformError::UnknownName(name.to_owned()))?;
        if loc.kind != requested {
            return Err(UniformError::KindMismatch {
                name: name.to_owned(),
                declared: loc.kind,
                requested,
            });
        }
        Ok(loc.offset)
    }

    fn write(&mut self, offset: usize, bytes: &[u8]) {
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> UniformBlock {
        UniformBlock::new(&[
            UniformField::new("u_mvp", UniformKind::Mat4),
            UniformField::new("u_textures", UniformKind::IntArray(2)),
            UniformField::new("u_time", UniformKind::Float),
            UniformField::new("u_tint", UniformKind::Vec4),
            UniformField::new("u_mode", UniformKind::Int),
        ])
        .expect("valid block")
    }

    fn word(b: &UniformBlock, offset: usize) -> [u8; 4] {
        b.bytes()[offset..offset + 4].try_into().expect("4 bytes")
    }

    fn read_i32(b: &UniformBlock, offset: usize) -> i32 {
        i32::from_ne_bytes(word(b, offset))
    }

    fn read_f32(b: &UniformBlock, offset: usize) -> f32 {
        f32::from_ne_bytes(word(b, offset))
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn offsets_follow_wgsl_alignment() {
        let b = block();
        assert_eq!(b.location("u_mvp").map(|l| l.offset), Some(0));
        assert_eq!(b.location("u_textures").map(|l| l.offset), Some(64));
        assert_eq!(b.location("u_time").map(|l| l.offset), Some(96));
        // vec4 after a scalar realigns to 16.
        assert_eq!(b.location("u_tint").map(|l| l.offset), Some(112));
        assert_eq!(b.location("u_mode").map(|l| l.offset), Some(128));
        assert_eq!(b.size(), 144);
    }

    #[test]
    fn empty_block_has_minimum_size() {
        let b = UniformBlock::new(&[]).expect("empty block");
        assert_eq!(b.size(), UniformBlock::MIN_SIZE);
    }

    #[test]
    fn duplicate_names_rejected() {
        let err = UniformBlock::new(&[
            UniformField::new("u_a", UniformKind::Float),
            UniformField::new("u_a", UniformKind::Int),
        ])
        .unwrap_err();
        assert_eq!(err, UniformError::Duplicate("u_a".into()));
    }

    // ── setters ───────────────────────────────────────────────────────────

    #[test]
    fn set_mat4_writes_column_major() {
        let mut b = block();
        let m = Mat4::from_cols_array(&std::array::from_fn(|i| i as f32));
        b.set_mat4("u_mvp", &m).expect("set");
        for i in 0..16 {
            assert_eq!(read_f32(&b, i * 4), i as f32);
        }
    }

    #[test]
    fn set_int_array_uses_sixteen_byte_stride() {
        let mut b = block();
        b.set_int_array("u_textures", &[0, 1]).expect("set");
        assert_eq!(read_i32(&b, 64), 0);
        assert_eq!(read_i32(&b, 80), 1);
    }

    #[test]
    fn set_int_array_rejects_overflow() {
        let mut b = block();
        let err = b.set_int_array("u_textures", &[0, 1, 2]).unwrap_err();
        assert!(matches!(err, UniformError::ArrayTooLong { len: 3, capacity: 2, .. }));
    }

    #[test]
    fn scalar_and_vector_setters() {
        let mut b = block();
        b.set_float("u_time", 2.5).expect("float");
        b.set_int("u_mode", -7).expect("int");
        b.set_vec4("u_tint", Vec4::new(0.1, 0.2, 0.3, 0.4)).expect("vec4");
        assert_eq!(read_f32(&b, 96), 2.5);
        assert_eq!(read_i32(&b, 128), -7);
        assert_eq!(read_f32(&b, 112), 0.1);
        assert_eq!(read_f32(&b, 124), 0.4);
    }

    #[test]
    fn unknown_name_and_kind_mismatch_are_errors() {
        let mut b = block();
        assert_eq!(
            b.set_float("u_missing", 1.0),
            Err(UniformError::UnknownName("u_missing".into()))
        );
        assert!(matches!(
            b.set_int("u_time", 1),
            Err(UniformError::KindMismatch {
                declared: UniformKind::Float,
                requested: UniformKind::Int,
                ..
            })
        ));
        assert!(matches!(
            b.set_int_array("u_mode", &[1]),
            Err(UniformError::KindMismatch { .. })
        ));
    }

    #[test]
    fn dirty_flag_tracks_writes() {
        let mut b = block();
        assert!(b.take_dirty());
        assert!(!b.is_dirty());
        b.set_float("u_time", 1.0).expect("set");
        assert!(b.take_dirty());
        assert!(!b.take_dirty());
    }
}
