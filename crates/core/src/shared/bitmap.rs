/// A decoded raster: contiguous RGB bytes in row-major order, upright.
///
/// This is what engines receive. The pixel data is opaque to the mapping
/// and normalization layers; only the dimensions are read outside engines.
#[derive(Clone, Debug)]
pub struct Bitmap {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Bitmap {
    pub const CHANNELS: usize = 3;

    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * Self::CHANNELS,
            "data length must equal width * height * 3"
        );
        Self {
            data,
            width,
            height,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGB triple at (`x`, `y`), or `None` outside the raster.
    #[cfg(test)]
    pub(crate) fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = ((y as usize) * (self.width as usize) + x as usize) * Self::CHANNELS;
        Some([
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let bitmap = Bitmap::new(data.clone(), 2, 2);
        assert_eq!(bitmap.width(), 2);
        assert_eq!(bitmap.height(), 2);
        assert_eq!(bitmap.data(), &data[..]);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * 3")]
    fn test_mismatched_data_length_panics_in_debug() {
        Bitmap::new(vec![0u8; 10], 2, 2);
    }

    #[test]
    fn test_pixel_access_row_major() {
        // 2x2 RGB: pixel (x=0, y=1) is red
        let mut data = vec![0u8; 12];
        data[6] = 255;
        let bitmap = Bitmap::new(data, 2, 2);
        assert_eq!(bitmap.pixel(0, 1), Some([255, 0, 0]));
        assert_eq!(bitmap.pixel(1, 1), Some([0, 0, 0]));
    }

    #[test]
    fn test_pixel_out_of_bounds() {
        let bitmap = Bitmap::new(vec![0u8; 12], 2, 2);
        assert_eq!(bitmap.pixel(2, 0), None);
        assert_eq!(bitmap.pixel(0, 2), None);
    }
}
