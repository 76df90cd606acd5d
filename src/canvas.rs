//! Sparse "paper" surface.
//!
//! The canvas never allocates a dense buffer. Written pixels land in 8x8
//! tiles which are grouped into row-bands of 8 pixel rows. Bands are kept
//! sorted top to bottom and the tiles of a band left to right, so a lookup is
//! two binary searches. Cells that were never written read as background.

use log::{debug, trace, warn};

use crate::color::{luminance, Color, RGBAColorFormat};
use crate::error::Error;
use crate::geometry::Rectangle;
use crate::image::{DrawTarget, ImageSource};
use crate::theme::Theme;

mod tile;
mod view;

pub use tile::{Band, Tile};
pub use view::{CanvasView, RenderMode};

pub const TILE_SIZE: i32 = 8;

/// Start of the grid cell containing `coordinate`, rounding towards negative
/// infinity.
const fn cell_origin(coordinate: i32) -> i32 {
    coordinate.div_euclid(TILE_SIZE) * TILE_SIZE
}

/// Origin of the partial cell at the top of the `i32` range. Its exclusive end
/// is not representable, so no tile is ever placed there.
const UNADDRESSABLE_CELL: i32 = cell_origin(i32::MAX);

fn is_addressable(x: i32, y: i32) -> bool {
    x < UNADDRESSABLE_CELL && y < UNADDRESSABLE_CELL
}

fn cell_bounds(x: i32, y: i32) -> Rectangle {
    let min_x = cell_origin(x);
    let min_y = cell_origin(y);
    Rectangle::new(min_x, min_y, min_x + TILE_SIZE, min_y + TILE_SIZE)
}

#[derive(Clone)]
pub struct SparseCanvas {
    theme: Theme,
    bounds: Rectangle,
    bands: Vec<Band>,
    /// Union of all tile bounds.
    occupied: Rectangle,
}

impl SparseCanvas {
    pub fn new(theme: Theme, width: u32, height: u32) -> Self {
        let width = i32::try_from(width).unwrap_or(i32::MAX);
        let height = i32::try_from(height).unwrap_or(i32::MAX);
        Self {
            theme,
            bounds: Rectangle::with_size(width, height),
            bands: Vec::new(),
            occupied: Rectangle::default(),
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    /// Area covered by allocated tiles. Empty until the first write.
    pub fn occupied(&self) -> Rectangle {
        self.occupied
    }

    pub fn bands(&self) -> impl Iterator<Item = &Band> {
        self.bands.iter()
    }

    pub fn band_count(&self) -> usize {
        self.bands.len()
    }

    pub fn tile_count(&self) -> usize {
        self.bands.iter().map(|band| band.tiles().len()).sum()
    }

    /// Moves the right edge by `extra` pixels.
    ///
    /// Negative values are allowed as long as the bounds keep containing every
    /// written tile; otherwise the bounds stay untouched and
    /// [`Error::CanvasShrinkBelowTiles`] is returned.
    pub fn extend_width(&mut self, extra: i32) -> crate::Result<()> {
        let mut requested = self.bounds;
        requested.max.x = requested.max.x.saturating_add(extra);
        self.resize(requested)
    }

    /// Moves the bottom edge by `extra` pixels. See [`Self::extend_width`].
    pub fn extend_height(&mut self, extra: i32) -> crate::Result<()> {
        let mut requested = self.bounds;
        requested.max.y = requested.max.y.saturating_add(extra);
        self.resize(requested)
    }

    fn resize(&mut self, requested: Rectangle) -> crate::Result<()> {
        let inverted = requested.max.x < requested.min.x || requested.max.y < requested.min.y;
        if inverted || !requested.contains_rectangle(&self.occupied) {
            return Err(Error::CanvasShrinkBelowTiles {
                requested,
                occupied: self.occupied,
            });
        }
        debug!("canvas bounds {} -> {}", self.bounds, requested);
        self.bounds = requested;
        Ok(())
    }

    fn grow_to(&mut self, cell: &Rectangle) {
        if self.bounds.contains_rectangle(cell) {
            return;
        }
        let grown = Rectangle::new(
            self.bounds.min.x.min(cell.min.x),
            self.bounds.min.y.min(cell.min.y),
            self.bounds.max.x.max(cell.max.x),
            self.bounds.max.y.max(cell.max.y),
        );
        debug!("canvas bounds {} grown to {}", self.bounds, grown);
        self.bounds = grown;
    }

    fn find_band(&self, y: i32) -> Option<&Band> {
        let min_y = cell_origin(y);
        self.bands
            .binary_search_by_key(&min_y, Band::min_y)
            .ok()
            .map(|index| &self.bands[index])
    }

    fn band_mut(&mut self, min_y: i32) -> &mut Band {
        let index = match self.bands.binary_search_by_key(&min_y, Band::min_y) {
            Ok(index) => index,
            Err(index) => {
                trace!("allocating band at y = {}", min_y);
                self.bands.insert(index, Band::new(min_y));
                index
            }
        };
        &mut self.bands[index]
    }

    /// Raw luminance at `(x, y)`. Unwritten or out of bounds pixels are 255.
    pub fn luminance(&self, x: i32, y: i32) -> u8 {
        if !self.bounds.contains(x, y) {
            return u8::MAX;
        }
        self.find_band(y)
            .and_then(|band| band.find_tile(x))
            .and_then(|tile| tile.get(x, y))
            .unwrap_or(u8::MAX)
    }

    /// Themed color at `(x, y)`.
    pub fn at(&self, x: i32, y: i32) -> RGBAColorFormat {
        self.theme.resolve(self.luminance(x, y))
    }

    /// Stores the luminance of `color` at `(x, y)`.
    ///
    /// Writes outside the current bounds grow the bounds to include the 8x8
    /// cell of the written pixel. Pixels in the last, partial cell of the
    /// `i32` range (`x` or `y` at or above `i32::MAX - 7`) can not be backed by
    /// a whole tile and are dropped.
    pub fn set<C: Color + ?Sized>(&mut self, x: i32, y: i32, color: &C) {
        if !is_addressable(x, y) {
            warn!("dropping write at ({}, {}), outside the addressable area", x, y);
            return;
        }
        let luma = luminance(color);
        let cell = cell_bounds(x, y);
        self.grow_to(&cell);
        self.band_mut(cell.min.y).tile_mut(cell.min.x).set(x, y, luma);
        self.occupied = self.occupied.union(&cell);
    }

    pub fn view(&self, mode: RenderMode) -> CanvasView<'_> {
        CanvasView::new(self, mode)
    }

    /// Grayscale view of the stored luminance, without theme tinting.
    pub fn mask(&self) -> CanvasView<'_> {
        self.view(RenderMode::Mask)
    }
}

impl ImageSource for SparseCanvas {
    type Pixel = RGBAColorFormat;

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn at(&self, x: i32, y: i32) -> Self::Pixel {
        SparseCanvas::at(self, x, y)
    }
}

impl DrawTarget for SparseCanvas {
    fn set<C: Color + ?Sized>(&mut self, x: i32, y: i32, color: &C) {
        SparseCanvas::set(self, x, y, color)
    }
}

#[cfg(test)]
mod test {
    use super::{SparseCanvas, TILE_SIZE};
    use crate::color::{GrayColorFormat, RGBAColorFormat};
    use crate::error::Error;
    use crate::geometry::Rectangle;
    use crate::theme::Theme;

    const BLACK_TO_WHITE: Theme = Theme::new(
        RGBAColorFormat::opaque(0, 0, 0),
        RGBAColorFormat::opaque(255, 255, 255),
    );
    const WHITE: RGBAColorFormat = RGBAColorFormat::opaque(255, 255, 255);
    const BLACK: RGBAColorFormat = RGBAColorFormat::opaque(0, 0, 0);

    /// Small xorshift generator so the ordering checks see scattered writes.
    struct Scatter(u32);

    impl Scatter {
        fn next(&mut self, range: i32) -> i32 {
            self.0 ^= self.0 << 13;
            self.0 ^= self.0 >> 17;
            self.0 ^= self.0 << 5;
            (self.0 % range as u32) as i32
        }
    }

    fn assert_structure_is_ordered(canvas: &SparseCanvas) {
        let mut previous_band_max_y = i32::MIN;
        for band in canvas.bands() {
            assert_eq!(band.min_y() % TILE_SIZE, 0, "band not grid aligned");
            assert!(
                band.min_y() >= previous_band_max_y,
                "band at {} overlaps its predecessor",
                band.min_y()
            );
            assert!(!band.tiles().is_empty(), "band without tiles");
            previous_band_max_y = band.max_y();
            let mut previous_tile_max_x = i32::MIN;
            for tile in band.tiles() {
                let bounds = tile.bounds();
                assert_eq!(bounds.width(), TILE_SIZE as u32);
                assert_eq!(bounds.height(), TILE_SIZE as u32);
                assert_eq!(bounds.min.x % TILE_SIZE, 0, "tile not grid aligned");
                assert_eq!(bounds.min.y, band.min_y());
                assert!(
                    bounds.min.x >= previous_tile_max_x,
                    "tile at {} overlaps its predecessor",
                    bounds
                );
                assert!(
                    canvas.bounds().contains_rectangle(&bounds),
                    "tile {} outside canvas bounds {}",
                    bounds,
                    canvas.bounds()
                );
                previous_tile_max_x = bounds.max.x;
            }
        }
    }

    #[test]
    fn fresh_canvas_reads_background() {
        let canvas = SparseCanvas::new(Theme::SEPIA, 10, 10);
        assert_eq!(canvas.at(5, 5), Theme::SEPIA.resolve(255));
        assert_eq!(canvas.bounds(), Rectangle::with_size(10, 10));
        assert_eq!(canvas.tile_count(), 0);
    }

    #[test]
    fn out_of_bounds_reads_background() {
        let mut canvas = SparseCanvas::new(Theme::NIGHT, 10, 10);
        assert_eq!(canvas.at(10, 10), Theme::NIGHT.background());
        assert_eq!(canvas.luminance(10, 10), 255);
        canvas.set(0, 0, &BLACK);
        canvas.set(9, 9, &BLACK);
        let background = Theme::NIGHT.resolve(255);
        assert_eq!(canvas.at(-1, -1), background);
        assert_eq!(canvas.at(10_000, 3), background);
        assert_eq!(canvas.at(3, -20), background);
    }

    #[test]
    fn write_is_idempotent() {
        let color = RGBAColorFormat::opaque(120, 30, 200);
        let mut once = SparseCanvas::new(Theme::NOSTALGIA, 16, 16);
        once.set(4, 7, &color);
        let mut twice = SparseCanvas::new(Theme::NOSTALGIA, 16, 16);
        twice.set(4, 7, &color);
        twice.set(4, 7, &color);
        assert_eq!(once.at(4, 7), twice.at(4, 7));
        assert_eq!(twice.tile_count(), 1);
    }

    #[test]
    fn gray_round_trips_through_identity_theme() {
        let mut canvas = SparseCanvas::new(BLACK_TO_WHITE, 16, 16);
        canvas.set(2, 2, &RGBAColorFormat::opaque(128, 128, 128));
        assert_eq!(canvas.at(2, 2), RGBAColorFormat::opaque(128, 128, 128));
        for value in 0..=255_u8 {
            canvas.set(5, 5, &GrayColorFormat { luma: value });
            let color = canvas.at(5, 5);
            assert!(
                (color.red as i32 - value as i32).abs() <= 1,
                "gray {} came back as {}",
                value,
                color
            );
        }
    }

    #[test]
    fn white_and_black_map_to_theme_endpoints() {
        let mut canvas = SparseCanvas::new(BLACK_TO_WHITE, 16, 16);
        canvas.set(3, 3, &WHITE);
        assert_eq!(canvas.at(3, 3), WHITE);
        canvas.set(3, 3, &BLACK);
        assert_eq!(canvas.at(3, 3), BLACK);
    }

    #[test]
    fn writes_stay_in_their_cell() {
        let mut canvas = SparseCanvas::new(Theme::MODERN, 16, 16);
        canvas.set(0, 0, &BLACK);
        let background = Theme::MODERN.resolve(255);
        assert_eq!(canvas.at(0, 0), Theme::MODERN.resolve(0));
        assert_eq!(canvas.at(1, 0), background);
        assert_eq!(canvas.at(8, 0), background);
        assert_eq!(canvas.at(0, 8), background);
        assert_eq!(canvas.band_count(), 1);
        assert_eq!(canvas.tile_count(), 1);
    }

    #[test]
    fn bands_and_tiles_are_inserted_in_order() {
        let mut canvas = SparseCanvas::new(Theme::MODERN, 64, 64);
        for (x, y) in [(40, 40), (3, 40), (20, 2), (60, 2), (0, 17), (21, 3)] {
            canvas.set(x, y, &BLACK);
        }
        let bands: Vec<i32> = canvas.bands().map(|band| band.min_y()).collect();
        assert_eq!(bands, vec![0, 16, 40]);
        let top_band = canvas.bands().next().expect("canvas should have a top band");
        let top_row: Vec<i32> = top_band.tiles().iter().map(|tile| tile.min_x()).collect();
        assert_eq!(top_row, vec![16, 56]);
        assert_eq!(canvas.tile_count(), 5);
        assert_structure_is_ordered(&canvas);
    }

    #[test]
    fn scattered_writes_keep_structure_ordered() {
        let mut canvas = SparseCanvas::new(Theme::SEPIA, 200, 120);
        let mut scatter = Scatter(0x2545_F491);
        let mut written = Vec::new();
        for _ in 0..2_000 {
            let x = scatter.next(260) - 30;
            let y = scatter.next(180) - 30;
            let luma = scatter.next(256) as u8;
            canvas.set(x, y, &GrayColorFormat { luma });
            written.push((x, y, luma));
        }
        assert_structure_is_ordered(&canvas);
        let last_write = written
            .iter()
            .rev()
            .find(|(x, y, _)| (*x, *y) == (written[0].0, written[0].1))
            .copied()
            .unwrap();
        assert_eq!(canvas.luminance(last_write.0, last_write.1), last_write.2);
    }

    #[test]
    fn writes_grow_bounds_to_their_cell() {
        let mut canvas = SparseCanvas::new(Theme::MODERN, 10, 10);
        canvas.set(9, 9, &BLACK);
        assert_eq!(canvas.bounds(), Rectangle::with_size(16, 16));
        canvas.set(30, 2, &BLACK);
        assert_eq!(canvas.bounds(), Rectangle::with_size(32, 16));
        canvas.set(-1, 40, &BLACK);
        assert_eq!(canvas.bounds(), Rectangle::new(-8, 0, 32, 48));
        assert_eq!(canvas.at(-1, 40), Theme::MODERN.resolve(0));
        assert_structure_is_ordered(&canvas);
    }

    #[test]
    fn writes_at_range_edges_keep_whole_tiles() {
        let mut canvas = SparseCanvas::new(Theme::MODERN, 10, 10);
        canvas.set(i32::MIN, 0, &BLACK);
        canvas.set(i32::MAX - 8, 0, &BLACK);
        assert_eq!(canvas.at(i32::MIN, 0), Theme::MODERN.primary());
        assert_eq!(canvas.at(i32::MAX - 8, 0), Theme::MODERN.primary());
        assert_eq!(canvas.bounds(), Rectangle::new(i32::MIN, 0, i32::MAX - 7, 10));
        assert_eq!(canvas.bounds().width(), u32::MAX - 7);
        assert_structure_is_ordered(&canvas);

        canvas.set(i32::MAX, 0, &BLACK);
        canvas.set(0, i32::MAX - 7, &BLACK);
        assert_eq!(canvas.tile_count(), 2);
        assert_eq!(canvas.at(i32::MAX, 0), Theme::MODERN.background());
        assert_eq!(canvas.bounds().max.x, i32::MAX - 7);
    }

    #[test]
    fn tiles_only_answer_for_their_own_pixels() {
        let mut canvas = SparseCanvas::new(Theme::MODERN, 16, 8);
        canvas.set(0, 1, &BLACK);
        let tile = &canvas.bands().next().unwrap().tiles()[0];
        assert_eq!(tile.get(0, 1), Some(0));
        assert_eq!(tile.get(1, 0), Some(255));
        assert_eq!(tile.get(8, 0), None);
        assert_eq!(tile.get(-1, 1), None);
        assert_eq!(tile.get(0, 8), None);
        assert_eq!(canvas.luminance(8, 0), 255);
    }

    #[test]
    fn bounds_contain_every_written_cell() {
        let mut canvas = SparseCanvas::new(Theme::MODERN, 0, 0);
        let mut scatter = Scatter(7);
        let mut cells = Vec::new();
        for step in 0..300 {
            let x = scatter.next(100) - 20;
            let y = scatter.next(100) - 20;
            canvas.set(x, y, &BLACK);
            cells.push(super::cell_bounds(x, y));
            if step % 50 == 0 {
                canvas.extend_width(3).unwrap();
                canvas.extend_height(5).unwrap();
            }
            for cell in &cells {
                assert!(canvas.bounds().contains_rectangle(cell));
            }
        }
    }

    #[test]
    fn extend_grows_right_and_bottom_edges() {
        let mut canvas = SparseCanvas::new(Theme::MODERN, 10, 20);
        canvas.extend_width(6).unwrap();
        canvas.extend_height(4).unwrap();
        assert_eq!(canvas.bounds(), Rectangle::with_size(16, 24));
        canvas.extend_width(-16).unwrap();
        assert_eq!(canvas.bounds(), Rectangle::with_size(0, 24));
    }

    #[test]
    fn extend_rejects_shrinking_below_tiles() {
        let mut canvas = SparseCanvas::new(Theme::MODERN, 32, 32);
        canvas.set(12, 20, &BLACK);
        canvas.extend_width(-16).unwrap();
        assert_eq!(canvas.bounds(), Rectangle::with_size(16, 32));
        let result = canvas.extend_width(-1);
        if let Err(Error::CanvasShrinkBelowTiles { occupied, .. }) = result {
            assert_eq!(occupied, Rectangle::new(8, 16, 16, 24));
        } else {
            panic!("Shrinking below written tiles not detected");
        }
        assert!(canvas.extend_height(-9).is_err());
        assert_eq!(canvas.bounds(), Rectangle::with_size(16, 32));
    }

    #[test]
    fn extend_rejects_inverted_bounds() {
        let mut canvas = SparseCanvas::new(Theme::MODERN, 4, 4);
        assert!(canvas.extend_height(-5).is_err());
        assert_eq!(canvas.bounds(), Rectangle::with_size(4, 4));
    }

    #[test]
    fn luminance_uses_bt601_weights() {
        let mut canvas = SparseCanvas::new(Theme::NIGHT, 8, 8);
        canvas.set(1, 1, &RGBAColorFormat::opaque(255, 0, 0));
        assert_eq!(canvas.luminance(1, 1), 76);
        assert_eq!(canvas.at(1, 1), Theme::NIGHT.resolve(76));
    }
}
