use brick_octree_core::Point3i;

/// Everything that can go wrong while compiling or decoding a `SparseVoxelOctree`. Queries on a built octree never fail.
#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub enum SvoError {
    #[error("no source model was provided")]
    MissingModel,

    #[error("model shape {0:?} does not fit in 16-bit dimensions")]
    InvalidShape(Point3i),

    #[error("octree needs {0} nodes, but a child base index only has 23 bits")]
    NodeIndexOverflow(usize),

    #[error("octree needs {0} brick payloads, but a payload index only has 30 bits")]
    PayloadIndexOverflow(usize),

    #[error("texture of {actual} bytes is smaller than the {expected} bytes its header requires")]
    TextureTooSmall { expected: usize, actual: usize },

    #[error("texture of {0} bytes is not a square, power-of-two RGBA8 image")]
    TextureNotSquare(usize),

    #[error("texture header declares max depth {declared}, but the declared size needs {expected}")]
    TextureHeaderMismatch { declared: u8, expected: u8 },
}

pub type SvoResult<T> = Result<T, SvoError>;
