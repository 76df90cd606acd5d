use crate::color::{Color, ColorModel, RangeColorFormat};
use crate::geometry::{Point, Rectangle};

pub mod reader;
pub mod writer;

/// Anything that can be read pixel by pixel.
pub trait ImageSource {
    type Pixel: Color;

    fn bounds(&self) -> Rectangle;

    /// Color at `(x, y)`. Points outside [`Self::bounds`] return whatever the
    /// source considers its background.
    fn at(&self, x: i32, y: i32) -> Self::Pixel;

    fn color_model(&self) -> ColorModel {
        ColorModel::Rgb
    }
}

/// Anything that accepts single pixel writes.
pub trait DrawTarget {
    fn set<C: Color + ?Sized>(&mut self, x: i32, y: i32, color: &C);
}

pub trait ImageReader {
    fn read_image(&mut self) -> crate::Result<Image>;
}

pub trait ImageWriter {
    fn write_image(&mut self) -> crate::Result<()>;
}

/// Decoded image, dense and row-major.
pub struct Image {
    width: u16,
    height: u16,
    max_value: u16,
    dots: Vec<RangeColorFormat<u16>>,
}

impl Image {
    pub fn new(
        width: u16,
        height: u16,
        max_value: u16,
        dots: Vec<RangeColorFormat<u16>>,
    ) -> crate::Result<Self> {
        if dots.len() != width as usize * height as usize {
            return Err(crate::Error::MismatchOfSizeBetweenHeaderAndValues);
        }
        Ok(Self {
            width,
            height,
            max_value,
            dots,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn max_value(&self) -> u16 {
        self.max_value
    }
}

impl ImageSource for Image {
    type Pixel = RangeColorFormat<u16>;

    fn bounds(&self) -> Rectangle {
        Rectangle::with_size(self.width as i32, self.height as i32)
    }

    fn at(&self, x: i32, y: i32) -> Self::Pixel {
        if !self.bounds().contains(x, y) {
            return RangeColorFormat::black(self.max_value);
        }
        self.dots[y as usize * self.width as usize + x as usize]
    }
}

/// Restricts a source to a rectangle.
pub struct SubImage<'a, S> {
    source: &'a S,
    bounds: Rectangle,
}

impl<'a, S: ImageSource> SubImage<'a, S> {
    pub fn new(source: &'a S, bounds: Rectangle) -> Self {
        let bounds = source.bounds().intersect(&bounds);
        Self { source, bounds }
    }
}

impl<S: ImageSource> ImageSource for SubImage<'_, S> {
    type Pixel = S::Pixel;

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn at(&self, x: i32, y: i32) -> Self::Pixel {
        self.source.at(x, y)
    }

    fn color_model(&self) -> ColorModel {
        self.source.color_model()
    }
}

/// Copies `source` onto `target` for every point of `rect`, row by row.
///
/// `source_origin` is the source point aligned with `rect.min`. The rectangle
/// is clipped to the part the source can supply; whatever the target does with
/// writes beyond its own bounds is up to the target.
pub fn draw<T, S>(target: &mut T, rect: Rectangle, source: &S, source_origin: Point)
where
    T: DrawTarget + ?Sized,
    S: ImageSource + ?Sized,
{
    let offset = Point::new(source_origin.x - rect.min.x, source_origin.y - rect.min.y);
    let source_area = source.bounds().translate(Point::new(-offset.x, -offset.y));
    let clipped = rect.intersect(&source_area);
    log::debug!("drawing {} from source offset ({}, {})", clipped, offset.x, offset.y);
    for point in clipped.points() {
        let color = source.at(point.x + offset.x, point.y + offset.y);
        target.set(point.x, point.y, &color);
    }
}
