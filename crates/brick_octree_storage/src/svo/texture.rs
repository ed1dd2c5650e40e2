//! Packing a `SparseVoxelOctree` into a square RGBA8 texture, for GPUs where a storage buffer isn't available.
//!
//! Every 32-bit word becomes one pixel, stored little-endian. The first 4 pixels are a `TextureHeader`, followed by the node
//! array and then the payload array, with each `u64` payload split into its low and high words. The rest of the texture is
//! zero.

use super::{max_depth_for_size, SparseVoxelOctree};
use crate::{SvoError, SvoResult};

const BYTES_PER_PIXEL: usize = 4;

/// The number of pixels occupied by the header.
pub const TEXTURE_HEADER_PIXELS: usize = 4;

/// The first 4 pixels of an `SvoTexture`.
///
/// ```text
/// pixel 0: node count
/// pixel 1: payload count
/// pixel 2: size.x | size.y << 16
/// pixel 3: size.z | max_depth << 16
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TextureHeader {
    pub node_count: u32,
    pub payload_count: u32,
    pub size: [u16; 3],
    pub max_depth: u8,
}

impl TextureHeader {
    pub fn for_octree(svo: &SparseVoxelOctree) -> Self {
        Self {
            node_count: svo.nodes().len() as u32,
            payload_count: svo.payloads().len() as u32,
            size: svo.size(),
            max_depth: svo.max_depth(),
        }
    }

    pub fn to_words(&self) -> [u32; 4] {
        let [x, y, z] = self.size;

        [
            self.node_count,
            self.payload_count,
            x as u32 | (y as u32) << 16,
            z as u32 | (self.max_depth as u32) << 16,
        ]
    }

    pub fn from_words(words: [u32; 4]) -> Self {
        Self {
            node_count: words[0],
            payload_count: words[1],
            size: [words[2] as u16, (words[2] >> 16) as u16, words[3] as u16],
            max_depth: (words[3] >> 16) as u8,
        }
    }

    /// The number of pixels needed for the header, nodes, and payloads.
    pub fn pixel_count(&self) -> usize {
        TEXTURE_HEADER_PIXELS + self.node_count as usize + 2 * self.payload_count as usize
    }
}

/// The smallest power of 2 `w` such that `w * w >= pixel_count`.
pub fn texture_width_for_pixels(pixel_count: usize) -> usize {
    let mut side = (pixel_count as f64).sqrt().ceil() as usize;
    while side * side < pixel_count {
        side += 1;
    }

    side.max(1).next_power_of_two()
}

/// A square RGBA8 image holding a whole `SparseVoxelOctree`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SvoTexture {
    width: usize,
    bytes: Vec<u8>,
}

impl SvoTexture {
    pub fn pack(svo: &SparseVoxelOctree) -> Self {
        let header = TextureHeader::for_octree(svo);
        let pixel_count = header.pixel_count();
        let width = texture_width_for_pixels(pixel_count);
        tracing::trace!(pixel_count, width, "packing octree texture");

        let mut bytes = vec![0; width * width * BYTES_PER_PIXEL];
        let header_words = header.to_words();
        let words = header_words
            .iter()
            .copied()
            .chain(svo.nodes().iter().copied())
            .chain(
                svo.payloads()
                    .iter()
                    .flat_map(|p| [*p as u32, (*p >> 32) as u32]),
            );
        for (pixel, word) in bytes.chunks_exact_mut(BYTES_PER_PIXEL).zip(words) {
            pixel.copy_from_slice(&word.to_le_bytes());
        }

        Self { width, bytes }
    }

    /// Wrap raw RGBA8 bytes. The byte length must be `4 * w * w` for some power of 2 `w`.
    pub fn from_bytes(bytes: Vec<u8>) -> SvoResult<Self> {
        let len = bytes.len();
        if len % BYTES_PER_PIXEL != 0 {
            return Err(SvoError::TextureNotSquare(len));
        }
        let pixels = len / BYTES_PER_PIXEL;
        let width = texture_width_for_pixels(pixels);
        if width * width != pixels {
            return Err(SvoError::TextureNotSquare(len));
        }

        Ok(Self { width, bytes })
    }

    /// Width and height in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    fn word(&self, pixel: usize) -> u32 {
        let start = pixel * BYTES_PER_PIXEL;
        let mut word = [0; BYTES_PER_PIXEL];
        word.copy_from_slice(&self.bytes[start..start + BYTES_PER_PIXEL]);

        u32::from_le_bytes(word)
    }

    pub fn header(&self) -> SvoResult<TextureHeader> {
        let required = TEXTURE_HEADER_PIXELS * BYTES_PER_PIXEL;
        if self.bytes.len() < required {
            return Err(SvoError::TextureTooSmall {
                expected: required,
                actual: self.bytes.len(),
            });
        }

        Ok(TextureHeader::from_words([
            self.word(0),
            self.word(1),
            self.word(2),
            self.word(3),
        ]))
    }

    /// Read the octree back out of the texture.
    pub fn unpack(&self) -> SvoResult<SparseVoxelOctree> {
        let header = self.header()?;

        let expected = header.pixel_count() * BYTES_PER_PIXEL;
        if self.bytes.len() < expected {
            return Err(SvoError::TextureTooSmall {
                expected,
                actual: self.bytes.len(),
            });
        }
        let expected_depth = max_depth_for_size(header.size);
        if header.max_depth != expected_depth {
            return Err(SvoError::TextureHeaderMismatch {
                declared: header.max_depth,
                expected: expected_depth,
            });
        }

        let node_start = TEXTURE_HEADER_PIXELS;
        let payload_start = node_start + header.node_count as usize;
        let nodes = (node_start..payload_start).map(|i| self.word(i)).collect();
        let payloads = (0..header.payload_count as usize)
            .map(|i| {
                let lo = self.word(payload_start + 2 * i) as u64;
                let hi = self.word(payload_start + 2 * i + 1) as u64;
                lo | hi << 32
            })
            .collect();

        Ok(SparseVoxelOctree::from_raw_parts(
            nodes,
            payloads,
            header.size,
            header.max_depth,
        ))
    }
}

impl SparseVoxelOctree {
    pub fn to_texture(&self) -> SvoTexture {
        SvoTexture::pack(self)
    }

    pub fn from_texture(texture: &SvoTexture) -> SvoResult<Self> {
        texture.unpack()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SparseVoxelModel;

    use brick_octree_core::prelude::*;
    use pretty_assertions::assert_eq;
    use utilities::data_sets::{checkerboard, random_voxels};

    #[test]
    fn width_is_smallest_covering_power_of_two() {
        assert_eq!(texture_width_for_pixels(1), 1);
        assert_eq!(texture_width_for_pixels(4), 2);
        assert_eq!(texture_width_for_pixels(5), 4);
        assert_eq!(texture_width_for_pixels(16), 4);
        assert_eq!(texture_width_for_pixels(17), 8);
        assert_eq!(texture_width_for_pixels(65), 16);
    }

    #[test]
    fn checkerboard_texture_layout() {
        let model = SparseVoxelModel::fill_with(Point3i::fill(4), checkerboard(1, 2));
        let svo = SparseVoxelOctree::from_model(&model).unwrap();

        let texture = svo.to_texture();

        // 4 header + 9 nodes + 16 payload words = 29 pixels.
        assert_eq!(texture.width(), 8);
        assert_eq!(texture.bytes().len(), 8 * 8 * 4);
        assert_eq!(
            texture.header().unwrap(),
            TextureHeader {
                node_count: 9,
                payload_count: 8,
                size: [4, 4, 4],
                max_depth: 2,
            }
        );
        assert_eq!(&texture.bytes()[..4], &[9, 0, 0, 0]);
        assert_eq!(&texture.bytes()[8..12], &[4, 0, 4, 0]);
        assert_eq!(&texture.bytes()[12..16], &[4, 0, 2, 0]);
        assert_eq!(&texture.bytes()[16..20], &svo.nodes()[0].to_le_bytes());
        assert!(texture.bytes()[29 * 4..].iter().all(|b| *b == 0));

        let payload_words = &texture.bytes()[13 * 4..29 * 4];
        assert_eq!(&payload_words[..8], &svo.payloads()[0].to_le_bytes());
    }

    #[test]
    fn texture_round_trip() {
        let shape = PointN([40, 3, 17]);
        let mut model = SparseVoxelModel::new(shape);
        for (p, m) in random_voxels(shape, 0.2, 9) {
            model.insert(p, m);
        }
        let svo = SparseVoxelOctree::from_model(&model).unwrap();

        let bytes = svo.to_texture().into_bytes();
        let texture = SvoTexture::from_bytes(bytes).unwrap();

        assert_eq!(SparseVoxelOctree::from_texture(&texture).unwrap(), svo);
    }

    #[test]
    fn empty_octree_texture() {
        let svo = SparseVoxelOctree::from_model(&SparseVoxelModel::new(Point3i::fill(2))).unwrap();

        let texture = svo.to_texture();

        assert_eq!(texture.width(), 4);
        assert_eq!(texture.unpack().unwrap(), svo);
    }

    #[test]
    fn malformed_textures_are_rejected() {
        assert_eq!(
            SvoTexture::from_bytes(vec![0; 3 * 3 * 4]),
            Err(SvoError::TextureNotSquare(36))
        );
        assert_eq!(
            SvoTexture::from_bytes(vec![0; 10]),
            Err(SvoError::TextureNotSquare(10))
        );

        // Header claims more nodes than fit.
        let mut bytes = vec![0; 4 * 4 * 4];
        bytes[..4].copy_from_slice(&100u32.to_le_bytes());
        bytes[12..16].copy_from_slice(&(1u32 << 16).to_le_bytes());
        let texture = SvoTexture::from_bytes(bytes).unwrap();
        assert_eq!(
            texture.unpack(),
            Err(SvoError::TextureTooSmall {
                expected: 104 * 4,
                actual: 64
            })
        );

        // Size and depth disagree.
        let mut bytes = vec![0; 4 * 4 * 4];
        bytes[..4].copy_from_slice(&1u32.to_le_bytes());
        bytes[8..12].copy_from_slice(&(16u32 | 16 << 16).to_le_bytes());
        bytes[12..16].copy_from_slice(&(16u32 | 2 << 16).to_le_bytes());
        let texture = SvoTexture::from_bytes(bytes).unwrap();
        assert_eq!(
            texture.unpack(),
            Err(SvoError::TextureHeaderMismatch {
                declared: 2,
                expected: 4
            })
        );
    }
}
