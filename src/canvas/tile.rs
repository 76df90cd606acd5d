use crate::geometry::Rectangle;

use super::TILE_SIZE;

const TILE_AREA: usize = (TILE_SIZE * TILE_SIZE) as usize;

/// An 8x8 cell of the canvas.
///
/// Pixels hold the inverted luminance (`255 - luma`), so a zeroed tile reads
/// back as background exactly like a missing one.
#[derive(Clone)]
pub struct Tile {
    min_x: i32,
    min_y: i32,
    pixels: [u8; TILE_AREA],
}

impl Tile {
    fn new(min_x: i32, min_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            pixels: [0; TILE_AREA],
        }
    }

    pub fn min_x(&self) -> i32 {
        self.min_x
    }

    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(
            self.min_x,
            self.min_y,
            self.min_x + TILE_SIZE,
            self.min_y + TILE_SIZE,
        )
    }

    /// Index of `(x, y)` in `pixels`, `None` when the pixel is not in this
    /// tile.
    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if !self.bounds().contains(x, y) {
            return None;
        }
        let column = (x - self.min_x) as usize;
        let row = (y - self.min_y) as usize;
        Some(row * TILE_SIZE as usize + column)
    }

    /// Luminance stored for `(x, y)`, `None` for pixels of other cells.
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        self.offset(x, y).map(|offset| u8::MAX - self.pixels[offset])
    }

    pub(super) fn set(&mut self, x: i32, y: i32, luma: u8) {
        if let Some(offset) = self.offset(x, y) {
            self.pixels[offset] = u8::MAX - luma;
        }
    }
}

/// One 8 row stripe of the canvas. Tiles are kept sorted by `min_x`.
#[derive(Clone)]
pub struct Band {
    min_y: i32,
    tiles: Vec<Tile>,
}

impl Band {
    pub(super) fn new(min_y: i32) -> Self {
        Self {
            min_y,
            tiles: Vec::new(),
        }
    }

    pub fn min_y(&self) -> i32 {
        self.min_y
    }

    pub fn max_y(&self) -> i32 {
        self.min_y + TILE_SIZE
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Horizontal extent of the allocated tiles.
    pub fn bounds(&self) -> Rectangle {
        match (self.tiles.first(), self.tiles.last()) {
            (Some(first), Some(last)) => {
                Rectangle::new(first.min_x, self.min_y, last.bounds().max.x, self.max_y())
            }
            _ => Rectangle::default(),
        }
    }

    pub(super) fn find_tile(&self, x: i32) -> Option<&Tile> {
        let min_x = super::cell_origin(x);
        self.tiles
            .binary_search_by_key(&min_x, Tile::min_x)
            .ok()
            .map(|index| &self.tiles[index])
    }

    /// Returns the tile starting at `min_x`, splicing a new one into sorted
    /// position when the cell has not been written yet.
    pub(super) fn tile_mut(&mut self, min_x: i32) -> &mut Tile {
        let index = match self.tiles.binary_search_by_key(&min_x, Tile::min_x) {
            Ok(index) => index,
            Err(index) => {
                log::trace!("allocating tile at ({}, {})", min_x, self.min_y);
                self.tiles.insert(index, Tile::new(min_x, self.min_y));
                index
            }
        };
        &mut self.tiles[index]
    }
}
