//! Tiled RGB565 pixel buffers
//!
//! Icons are stored as 8x8 tiles laid out left to right, top to bottom. Inside
//! a tile the 64 pixels follow [`TILE_ORDER`], a Z-order curve, rather than
//! raster order. Pixels are 16-bit little-endian RGB565 with red in the high
//! bits.

use image::{Rgb, RgbImage};

use super::error::{IdbeError, IdbeResult};

/// Tile edge length in pixels
pub const TILE_DIM: u32 = 8;

/// Pixels per tile
pub const TILE_PIXELS: usize = 64;

/// Position inside a tile (`y * 8 + x`) for the k-th stored pixel
pub const TILE_ORDER: [u8; TILE_PIXELS] = [
    0, 1, 8, 9, 2, 3, 10, 11, 16, 17, 24, 25, 18, 19, 26, 27, 4, 5, 12, 13, 6, 7, 14, 15, 20, 21,
    28, 29, 22, 23, 30, 31, 32, 33, 40, 41, 34, 35, 42, 43, 48, 49, 56, 57, 50, 51, 58, 59, 36, 37,
    44, 45, 38, 39, 46, 47, 52, 53, 60, 61, 54, 55, 62, 63,
];

/// Expand RGB565 to 8 bits per channel by bit replication
pub const fn rgb565_to_rgb888(value: u16) -> [u8; 3] {
    let r = ((value >> 11) & 0x1F) as u8;
    let g = ((value >> 5) & 0x3F) as u8;
    let b = (value & 0x1F) as u8;
    [r << 3 | r >> 2, g << 2 | g >> 4, b << 3 | b >> 2]
}

/// Truncate an 8-bit-per-channel color to RGB565
pub const fn rgb888_to_rgb565(rgb: [u8; 3]) -> u16 {
    ((rgb[0] as u16 >> 3) << 11) | ((rgb[1] as u16 >> 2) << 5) | (rgb[2] as u16 >> 3)
}

/// Output coordinates of the k-th pixel of tile `tile`
pub fn tile_position(tile: u32, k: usize, tiles_per_row: u32) -> (u32, u32) {
    let order = u32::from(TILE_ORDER[k % TILE_PIXELS]);
    (
        TILE_DIM * (tile % tiles_per_row) + order % TILE_DIM,
        TILE_DIM * (tile / tiles_per_row) + order / TILE_DIM,
    )
}

/// Byte length of a tiled RGB565 buffer for the given dimensions
pub const fn tiled_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 2
}

fn check_dimensions(width: u32, height: u32) -> IdbeResult<()> {
    if width == 0 || height == 0 || width % TILE_DIM != 0 || height % TILE_DIM != 0 {
        return Err(IdbeError::InvalidIconDimensions { width, height });
    }
    Ok(())
}

/// Rebuild a raster image from a tiled RGB565 buffer
pub fn untile_rgb565(data: &[u8], width: u32, height: u32) -> IdbeResult<RgbImage> {
    check_dimensions(width, height)?;
    let expected = tiled_len(width, height);
    if data.len() != expected {
        return Err(IdbeError::InvalidIconData {
            expected,
            actual: data.len(),
        });
    }

    let tiles_per_row = width / TILE_DIM;
    let mut image = RgbImage::new(width, height);
    for (index, pair) in data.chunks_exact(2).enumerate() {
        let tile = (index / TILE_PIXELS) as u32;
        let (x, y) = tile_position(tile, index % TILE_PIXELS, tiles_per_row);
        let value = u16::from_le_bytes([pair[0], pair[1]]);
        image.put_pixel(x, y, Rgb(rgb565_to_rgb888(value)));
    }
    Ok(image)
}

/// Tile a raster image into an RGB565 buffer
///
/// Inverse of [`untile_rgb565`] for images whose channels are already
/// representable in RGB565; other colors are truncated.
pub fn tile_rgb565(image: &RgbImage) -> IdbeResult<Vec<u8>> {
    let (width, height) = image.dimensions();
    check_dimensions(width, height)?;

    let tiles_per_row = width / TILE_DIM;
    let pixel_count = width as usize * height as usize;
    let mut out = Vec::with_capacity(tiled_len(width, height));
    for index in 0..pixel_count {
        let tile = (index / TILE_PIXELS) as u32;
        let (x, y) = tile_position(tile, index % TILE_PIXELS, tiles_per_row);
        let value = rgb888_to_rgb565(image.get_pixel(x, y).0);
        out.extend_from_slice(&value.to_le_bytes());
    }
    Ok(out)
}
