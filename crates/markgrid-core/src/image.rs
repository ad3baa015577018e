/// Row-major grayscale page buffer with intensity in `[0, 1]`, 0 = black.
///
/// Scanned pages arrive from an external rasterizer; the scanner and the
/// decision engine treat the buffer as immutable. The annotation renderer
/// works on its own mutable copy.
#[derive(Clone, Debug, PartialEq)]
pub struct PageImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f32>, // row-major, len = w*h
}

impl PageImage {
    pub fn new(width: usize, height: usize, data: Vec<f32>) -> Self {
        assert_eq!(data.len(), width * height, "buffer length mismatch");
        Self {
            width,
            height,
            data,
        }
    }

    /// All-white page.
    pub fn white(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![1.0; width * height],
        }
    }

    pub fn from_luma8(img: &image::GrayImage) -> Self {
        Self {
            width: img.width() as usize,
            height: img.height() as usize,
            data: img.as_raw().iter().map(|&v| v as f32 / 255.0).collect(),
        }
    }

    pub fn to_luma8(&self) -> image::GrayImage {
        let raw: Vec<u8> = self
            .data
            .iter()
            .map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
            .collect();
        image::GrayImage::from_raw(self.width as u32, self.height as u32, raw)
            .expect("dimensions match buffer length")
    }

    /// Intensity at `(row, col)`; positions outside the page read as white so
    /// window statistics near borders degrade instead of panicking.
    #[inline]
    pub fn get(&self, row: isize, col: isize) -> f32 {
        if row < 0 || col < 0 || row >= self.height as isize || col >= self.width as isize {
            return 1.0;
        }
        self.data[row as usize * self.width + col as usize]
    }

    /// A pixel is "ink" when its intensity is below `gray_level`.
    #[inline]
    pub fn ink(&self, row: isize, col: isize, gray_level: f32) -> bool {
        self.get(row, col) < gray_level
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        if row < self.height && col < self.width {
            self.data[row * self.width + col] = value;
        }
    }
}
