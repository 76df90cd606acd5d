use std::io::Read;

use super::super::Image;
use super::super::ImageReader;
use crate::color::RangeColorFormat;
use crate::Error;

pub struct PPMImageReader<T: Read> {
    reader: T,
}

impl<T: Read> PPMImageReader<T> {
    pub fn new(reader: T) -> Self {
        Self { reader }
    }
}

impl<T: Read> ImageReader for PPMImageReader<T> {
    fn read_image(&mut self) -> crate::Result<Image> {
        let mut tokenizer = PPMTokenizer::new(&mut self.reader);
        let mut parser = PPMParser::new(&mut tokenizer);
        parser.parse_tokens()
    }
}

struct PPMTokenizer<'a, R: Read> {
    reader: &'a mut R,
    buffer: Vec<u8>,
}

impl<'a, R: Read> PPMTokenizer<'a, R> {
    pub fn new(reader: &'a mut R) -> Self {
        PPMTokenizer {
            reader,
            buffer: Vec::new(),
        }
    }

    /// Reads `length` bytes following the last token verbatim.
    fn read_raw(&mut self, length: usize) -> crate::Result<Vec<u8>> {
        let mut raw = Vec::with_capacity(length);
        (&mut *self.reader)
            .take(length as u64)
            .read_to_end(&mut raw)
            .map_err(Error::FailedToReadImageData)?;
        if raw.len() != length {
            return Err(Error::UnexpectedEndOfPixelData(raw.len()));
        }
        Ok(raw)
    }
}

impl<R: Read> Iterator for PPMTokenizer<'_, R> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        let mut byte = [0; 1];
        let mut in_comment = false;

        while self.reader.read(&mut byte).unwrap_or(0) > 0 {
            if in_comment {
                if byte[0] == b'\n' {
                    in_comment = false;
                }
                continue;
            }
            if byte[0] == b'#' {
                in_comment = true;
                continue;
            }
            if byte[0].is_ascii_whitespace() {
                if !self.buffer.is_empty() {
                    break;
                }
            } else {
                self.buffer.push(byte[0]);
            }
        }

        if self.buffer.is_empty() {
            return None;
        }

        Some(String::from_utf8_lossy(&self.buffer).into_owned())
    }
}

const MAGIC_NUMBER_TOKEN_NAME: &str = "Magic Number Header";
const WIDTH_HEADER_TOKEN_NAME: &str = "Width Header";
const HEIGHT_HEADER_TOKEN_NAME: &str = "Height Header";
const MAX_VALUE_HEADER_TOKEN_NAME: &str = "Max Value Header";
const COLOR_COMPONENT_VALUE_TOKEN_NAME: &str = "Color Component Value";

#[derive(Clone, Copy, Debug, PartialEq)]
enum Encoding {
    /// P3, whitespace separated decimal samples.
    Plain,
    /// P6, binary samples of one or two bytes.
    Raw,
}

#[derive(Clone, Copy)]
struct Dot {
    buffer: [u16; 3],
    index: usize,
}

impl Dot {
    fn new() -> Self {
        Self {
            buffer: [u16::default(); 3],
            index: 0,
        }
    }

    fn red(&self) -> u16 {
        self.buffer[0]
    }

    fn green(&self) -> u16 {
        self.buffer[1]
    }

    fn blue(&self) -> u16 {
        self.buffer[2]
    }

    fn push_color_component(&mut self, component: u16) {
        if self.is_complete() {
            return;
        }
        self.buffer[self.index] = component;
        self.index += 1;
    }

    fn is_complete(&self) -> bool {
        self.index == 3
    }

    fn reset(&mut self) {
        self.index = 0;
    }

    fn is_empty(&self) -> bool {
        self.index == 0
    }
}

struct PPMParser<'a, 'r, R: Read> {
    tokenizer: &'a mut PPMTokenizer<'r, R>,
}

impl<'a, 'r, R: Read> PPMParser<'a, 'r, R> {
    fn new(tokenizer: &'a mut PPMTokenizer<'r, R>) -> Self {
        Self { tokenizer }
    }

    fn parse_tokens(&mut self) -> crate::Result<Image> {
        let encoding = self.parse_magic_number()?;
        let width = self.parse_width()?;
        let height = self.parse_height()?;
        let max_value = self.parse_max_value()?;
        let dots = match encoding {
            Encoding::Plain => self.parse_all_dots()?,
            Encoding::Raw => self.read_raw_dots(width, height, max_value)?,
        };
        Self::check_parsed_dots_length_match_header_information(&dots, width, height)?;
        log::debug!(
            "parsed {:?} PPM image of {}x{} with max value {}",
            encoding,
            width,
            height,
            max_value
        );
        let dots = dots
            .into_iter()
            .map(|d| RangeColorFormat::new(max_value, d.red(), d.green(), d.blue()))
            .collect::<crate::Result<Vec<RangeColorFormat<u16>>>>()?;
        Image::new(width, height, max_value, dots)
    }

    fn check_parsed_dots_length_match_header_information(
        dots: &[Dot],
        width: u16,
        height: u16,
    ) -> crate::Result<()> {
        let expected_number_of_dots = width as usize * height as usize;
        if dots.len() != expected_number_of_dots {
            return Err(Error::MismatchOfSizeBetweenHeaderAndValues);
        }
        Ok(())
    }

    fn parse_magic_number(&mut self) -> crate::Result<Encoding> {
        let magic = self
            .tokenizer
            .next()
            .ok_or(Error::PPMFileDoesNotContainRequiredToken(
                MAGIC_NUMBER_TOKEN_NAME,
            ))?;
        match magic.as_str() {
            "P3" => Ok(Encoding::Plain),
            "P6" => Ok(Encoding::Raw),
            _ => Err(Error::UnsupportedMagicNumber(magic)),
        }
    }

    fn parse_width(&mut self) -> crate::Result<u16> {
        self.tokenizer
            .next()
            .ok_or(Error::PPMFileDoesNotContainRequiredToken(
                WIDTH_HEADER_TOKEN_NAME,
            ))?
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(WIDTH_HEADER_TOKEN_NAME))
    }

    fn parse_height(&mut self) -> crate::Result<u16> {
        self.tokenizer
            .next()
            .ok_or(Error::PPMFileDoesNotContainRequiredToken(
                HEIGHT_HEADER_TOKEN_NAME,
            ))?
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(HEIGHT_HEADER_TOKEN_NAME))
    }

    fn parse_max_value(&mut self) -> crate::Result<u16> {
        let max_value: u16 = self
            .tokenizer
            .next()
            .ok_or(Error::PPMFileDoesNotContainRequiredToken(
                MAX_VALUE_HEADER_TOKEN_NAME,
            ))?
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(MAX_VALUE_HEADER_TOKEN_NAME))?;
        if max_value == 0 {
            return Err(Error::ParsingOfTokenFailed(MAX_VALUE_HEADER_TOKEN_NAME));
        }
        Ok(max_value)
    }

    fn parse_all_dots(&mut self) -> crate::Result<Vec<Dot>> {
        let mut current_dot = Dot::new();
        let mut dots = Vec::new();
        for token in self.tokenizer.by_ref() {
            let component = Self::parse_color_value(&token)?;
            current_dot.push_color_component(component);
            if current_dot.is_complete() {
                dots.push(current_dot);
                current_dot.reset();
            }
        }
        Self::check_pixel_was_complete(&current_dot)?;
        Ok(dots)
    }

    fn read_raw_dots(&mut self, width: u16, height: u16, max_value: u16) -> crate::Result<Vec<Dot>> {
        let bytes_per_sample = if max_value > u8::MAX as u16 { 2 } else { 1 };
        let number_of_samples = width as usize * height as usize * 3;
        let raw = self
            .tokenizer
            .read_raw(number_of_samples * bytes_per_sample)?;
        let mut current_dot = Dot::new();
        let mut dots = Vec::with_capacity(width as usize * height as usize);
        for sample in raw.chunks_exact(bytes_per_sample) {
            let component = if bytes_per_sample == 2 {
                u16::from_be_bytes([sample[0], sample[1]])
            } else {
                sample[0] as u16
            };
            current_dot.push_color_component(component);
            if current_dot.is_complete() {
                dots.push(current_dot);
                current_dot.reset();
            }
        }
        Ok(dots)
    }

    fn check_pixel_was_complete(dot: &Dot) -> crate::Result<()> {
        if !dot.is_empty() {
            return Err(Error::IncompletePixelParsed(dot.index));
        }
        Ok(())
    }

    fn parse_color_value(token: &str) -> crate::Result<u16> {
        token
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(COLOR_COMPONENT_VALUE_TOKEN_NAME))
    }
}
