use serde::{Deserialize, Serialize};

/// Row-major RGBA bytes, stride = width * 4.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl PixelBuffer {
    /// A fresh buffer starts fully transparent black.
    pub fn new(width: usize, height: usize) -> PixelBuffer {
        PixelBuffer {
            width,
            height,
            data: vec![0u8; width * height * 4],
        }
    }

    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> PixelBuffer {
        assert!(
            data.len() == width * height * 4,
            "buffer length {} does not match dimensions {}x{}",
            data.len(),
            width,
            height
        );
        PixelBuffer {
            width,
            height,
            data,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn index_of(&self, x: usize, y: usize) -> usize {
        4 * (y * self.width + x)
    }

    /// Square root of the summed squared per-byte differences, truncated to
    /// an integer. Alpha counts like any other channel. Zero only when the
    /// content is identical.
    pub fn diff(&self, other: &PixelBuffer) -> u64 {
        assert!(
            self.width == other.width && self.height == other.height,
            "buffer dimensions differ: {}x{} vs {}x{}",
            self.width,
            self.height,
            other.width,
            other.height
        );
        // matching dimensions do not guarantee matching lengths once a
        // buffer has been deserialized; zip would silently truncate
        assert!(
            self.data.len() == other.data.len(),
            "buffer lengths differ: {} vs {}",
            self.data.len(),
            other.data.len()
        );

        let mut total: u64 = 0;
        for (a, b) in self.data.iter().zip(other.data.iter()) {
            // can't subtract u8 from u8 -> potential underflow
            let d = *a as i32 - *b as i32;
            total += (d * d) as u64;
        }
        f64::sqrt(total as f64) as u64
    }
}
