use std::fmt::Display;

use crate::geometry::Rectangle;

#[derive(Debug)]
pub enum Error {
    PPMFileDoesNotContainRequiredToken(&'static str),
    ParsingOfTokenFailed(&'static str),
    UnsupportedMagicNumber(String),
    IncompletePixelParsed(usize),
    MismatchOfSizeBetweenHeaderAndValues,
    ColorValueExceedsMaximum(String),
    UnexpectedEndOfPixelData(usize),
    FailedToReadImageData(std::io::Error),
    UnableToOpenInputFileForReading(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    UnableToCreateOutputDirectory(String, std::io::Error),
    FailedToWriteHeader(std::io::Error),
    FailedToWriteImageData(std::io::Error),
    UnknownTheme(String),
    CanvasShrinkBelowTiles {
        requested: Rectangle,
        occupied: Rectangle,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PPMFileDoesNotContainRequiredToken(token_name) => {
                write!(f, "Expected token '{}' not found in PPM file", token_name)
            }
            Self::ParsingOfTokenFailed(token_name) => {
                write!(f, "Parsing of token '{}' failed", token_name)
            }
            Self::UnsupportedMagicNumber(magic) => {
                write!(
                    f,
                    "Unsupported magic number '{}'. Expected P3 or P6.",
                    magic
                )
            }
            Self::IncompletePixelParsed(number_of_tokens_parsed) => {
                write!(
                    f,
                    "Incomplete pixel parsed. Expected 3 components, but got {}.",
                    number_of_tokens_parsed
                )
            }
            Self::MismatchOfSizeBetweenHeaderAndValues => {
                write!(
                    f,
                    "Number of pixels do not match the size, provided in header"
                )
            }
            Self::ColorValueExceedsMaximum(max) => {
                write!(f, "Color value must not be greater than max value of {}", max)
            }
            Self::UnexpectedEndOfPixelData(bytes_read) => {
                write!(
                    f,
                    "Pixel data ended unexpectedly after {} bytes",
                    bytes_read
                )
            }
            Self::FailedToReadImageData(error) => {
                write!(f, "Failed to read image data: {}", error)
            }
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::UnableToCreateOutputDirectory(path, error) => {
                write!(
                    f,
                    "Unable to create output directory '{}': {}",
                    path, error
                )
            }
            Self::FailedToWriteHeader(error) => {
                write!(f, "Failed to write image header: {}", error)
            }
            Self::FailedToWriteImageData(error) => {
                write!(f, "Failed to write image data: {}", error)
            }
            Self::UnknownTheme(name) => write!(f, "Unknown theme '{}'", name),
            Self::CanvasShrinkBelowTiles {
                requested,
                occupied,
            } => {
                write!(
                    f,
                    "Canvas bounds {} would not contain the written area {}",
                    requested, occupied
                )
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnableToOpenInputFileForReading(_, error)
            | Self::UnableToOpenOutputFileForWriting(_, error)
            | Self::UnableToCreateOutputDirectory(_, error)
            | Self::FailedToReadImageData(error)
            | Self::FailedToWriteHeader(error)
            | Self::FailedToWriteImageData(error) => Some(error),
            _ => None,
        }
    }
}
