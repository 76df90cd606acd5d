use std::fmt::Display;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis aligned rectangle covering `[min.x, max.x) x [min.y, max.y)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rectangle {
    pub min: Point,
    pub max: Point,
}

impl Rectangle {
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min: Point::new(min_x, min_y),
            max: Point::new(max_x, max_y),
        }
    }

    pub fn with_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Horizontal extent, `0` for inverted rectangles. Spans the whole `i32`
    /// range without overflowing.
    pub fn width(&self) -> u32 {
        if self.max.x <= self.min.x {
            return 0;
        }
        self.max.x.abs_diff(self.min.x)
    }

    pub fn height(&self) -> u32 {
        if self.max.y <= self.min.y {
            return 0;
        }
        self.max.y.abs_diff(self.min.y)
    }

    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.min.x <= x && x < self.max.x && self.min.y <= y && y < self.max.y
    }

    pub fn contains_rectangle(&self, other: &Rectangle) -> bool {
        if other.is_empty() {
            return true;
        }
        self.min.x <= other.min.x
            && other.max.x <= self.max.x
            && self.min.y <= other.min.y
            && other.max.y <= self.max.y
    }

    /// Smallest rectangle containing both. Empty rectangles are neutral.
    pub fn union(&self, other: &Rectangle) -> Rectangle {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        Rectangle::new(
            self.min.x.min(other.min.x),
            self.min.y.min(other.min.y),
            self.max.x.max(other.max.x),
            self.max.y.max(other.max.y),
        )
    }

    pub fn intersect(&self, other: &Rectangle) -> Rectangle {
        let result = Rectangle::new(
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.max.x.min(other.max.x),
            self.max.y.min(other.max.y),
        );
        if result.is_empty() {
            return Rectangle::default();
        }
        result
    }

    pub fn translate(&self, offset: Point) -> Rectangle {
        Rectangle::new(
            self.min.x + offset.x,
            self.min.y + offset.y,
            self.max.x + offset.x,
            self.max.y + offset.y,
        )
    }

    /// Row-major iterator over every point inside the rectangle.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let rect = *self;
        let (xs, ys) = if rect.is_empty() {
            (0..0, 0..0)
        } else {
            (rect.min.x..rect.max.x, rect.min.y..rect.max.y)
        };
        ys.flat_map(move |y| xs.clone().map(move |x| Point::new(x, y)))
    }
}

impl Display for Rectangle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({},{})-({},{})",
            self.min.x, self.min.y, self.max.x, self.max.y
        )
    }
}
