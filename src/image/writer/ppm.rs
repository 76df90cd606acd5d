use std::io::Write;

use crate::color::{Color, ColorModel};
use crate::image::{ImageSource, ImageWriter};
use crate::Error;

const MAX_VALUE: u8 = u8::MAX;

/// Writes any [`ImageSource`] as binary netpbm.
///
/// Color sources become P6 pixmaps, gray sources P5 graymaps. The written
/// area is the source bounds, with `bounds.min` as the top left pixel.
pub struct PPMImageWriter<'a, T: Write, S: ImageSource> {
    writer: T,
    source: &'a S,
}

impl<'a, T: Write, S: ImageSource> PPMImageWriter<'a, T, S> {
    pub fn new(writer: T, source: &'a S) -> Self {
        Self { writer, source }
    }

    fn write_header(&mut self) -> crate::Result<()> {
        let bounds = self.source.bounds();
        let magic_number = match self.source.color_model() {
            ColorModel::Rgb => "P6",
            ColorModel::Gray => "P5",
        };
        write!(
            self.writer,
            "{}\n{} {}\n{}\n",
            magic_number,
            bounds.width(),
            bounds.height(),
            MAX_VALUE
        )
        .map_err(Error::FailedToWriteHeader)
    }

    fn write_rows(&mut self) -> crate::Result<()> {
        let bounds = self.source.bounds();
        let color_model = self.source.color_model();
        let samples_per_pixel = match color_model {
            ColorModel::Rgb => 3,
            ColorModel::Gray => 1,
        };
        let mut row = Vec::with_capacity(bounds.width() as usize * samples_per_pixel);
        for y in bounds.min.y..bounds.max.y {
            row.clear();
            for x in bounds.min.x..bounds.max.x {
                let [red, green, blue] = self.source.at(x, y).rgb8();
                match color_model {
                    ColorModel::Rgb => row.extend_from_slice(&[red, green, blue]),
                    ColorModel::Gray => row.push(red),
                }
            }
            self.writer
                .write_all(&row)
                .map_err(Error::FailedToWriteImageData)?;
        }
        Ok(())
    }
}

impl<T: Write, S: ImageSource> ImageWriter for PPMImageWriter<'_, T, S> {
    fn write_image(&mut self) -> crate::Result<()> {
        self.write_header()?;
        self.write_rows()?;
        self.writer.flush().map_err(Error::FailedToWriteImageData)
    }
}
