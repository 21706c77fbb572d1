//! Atlas sheets

use image::{Rgb, RgbImage, imageops};

use crate::error::{AtlasError, Result};
use crate::geometry::{CELL_DIM, SHEET_DIM, SlotPosition};

/// Background color of unused cells
pub const BACKGROUND: Rgb<u8> = Rgb([0xFF, 0xFF, 0xFF]);

/// One 1024x1024 atlas page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    image: RgbImage,
}

impl Sheet {
    /// Create a white sheet
    pub fn blank() -> Self {
        Self {
            image: RgbImage::from_pixel(SHEET_DIM, SHEET_DIM, BACKGROUND),
        }
    }

    /// Adopt an existing image as sheet `index`
    pub fn from_image(index: usize, image: RgbImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        if (width, height) != (SHEET_DIM, SHEET_DIM) {
            return Err(AtlasError::InvalidSheetSize {
                index,
                width,
                height,
            });
        }
        Ok(Self { image })
    }

    /// Paint a 48x48 bitmap into the cell at `position`
    pub fn paint(&mut self, position: SlotPosition, bitmap: &RgbImage) {
        let (x, y) = position.origin();
        imageops::replace(&mut self.image, bitmap, i64::from(x), i64::from(y));
    }

    /// Copy out the cell at `position`
    pub fn cell(&self, position: SlotPosition) -> RgbImage {
        let (x, y) = position.origin();
        imageops::crop_imm(&self.image, x, y, CELL_DIM, CELL_DIM).to_image()
    }

    /// Underlying image
    pub fn image(&self) -> &RgbImage {
        &self.image
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Slot;

    #[test]
    fn test_blank_sheet_is_white() {
        let sheet = Sheet::blank();
        assert_eq!(sheet.image().dimensions(), (SHEET_DIM, SHEET_DIM));
        assert!(sheet.image().pixels().all(|p| *p == BACKGROUND));
    }

    #[test]
    fn test_paint_then_cell() {
        let mut sheet = Sheet::blank();
        let bitmap = RgbImage::from_fn(CELL_DIM, CELL_DIM, |x, y| Rgb([x as u8, y as u8, 7]));
        let position = Slot::new(22).position();

        sheet.paint(position, &bitmap);
        assert_eq!(sheet.cell(position), bitmap);
        assert_eq!(sheet.image().get_pixel(48, 48).0, [0, 0, 7]);
        // Neighbouring cells untouched
        assert!(sheet.cell(Slot::new(21).position()).pixels().all(|p| *p == BACKGROUND));
        assert!(sheet.cell(Slot::new(23).position()).pixels().all(|p| *p == BACKGROUND));
    }

    #[test]
    fn test_last_cell_stays_inside_sheet() {
        let mut sheet = Sheet::blank();
        let bitmap = RgbImage::from_pixel(CELL_DIM, CELL_DIM, Rgb([1, 2, 3]));
        let position = Slot::new(440).position();

        sheet.paint(position, &bitmap);
        assert_eq!(sheet.image().get_pixel(1007, 1007).0, [1, 2, 3]);
        assert_eq!(sheet.image().get_pixel(1008, 1008).0, BACKGROUND.0);
    }

    #[test]
    fn test_from_image_checks_size() {
        assert!(Sheet::from_image(0, RgbImage::new(SHEET_DIM, SHEET_DIM)).is_ok());
        assert!(matches!(
            Sheet::from_image(3, RgbImage::new(512, 1024)),
            Err(AtlasError::InvalidSheetSize {
                index: 3,
                width: 512,
                height: 1024
            })
        ));
    }
}
