use std::{
    fs::{self, File, OpenOptions},
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

pub use canvas::{RenderMode, SparseCanvas};
pub use cli::CLIParser;
pub use color::{Color, GrayColorFormat, RGBAColorFormat};
pub use error::Error;
pub use geometry::{Point, Rectangle};
pub use theme::{Theme, ThemeRegistry};

use image::{
    draw, reader::ppm::PPMImageReader, writer::ppm::PPMImageWriter, ImageReader, ImageSource,
    ImageWriter, SubImage,
};

pub mod canvas;
mod cli;
pub mod color;
pub mod error;
pub mod geometry;
pub mod image;
mod logger;
pub mod theme;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct Arguments {
    input_file: PathBuf,
    output_directory: PathBuf,
    themes: Vec<String>,
    write_mask: bool,
}

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path).map_err(|e| {
        Error::UnableToOpenInputFileForReading(file_path.display().to_string(), e)
    })
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| {
            Error::UnableToOpenOutputFileForWriting(file_path.display().to_string(), e)
        })
}

fn create_output_directory(directory: &Path) -> Result<()> {
    fs::create_dir_all(directory).map_err(|e| {
        Error::UnableToCreateOutputDirectory(directory.display().to_string(), e)
    })
}

fn write_ppm<S: ImageSource>(file_path: &Path, source: &S) -> Result<()> {
    let output_file = open_output_file(file_path)?;
    let mut writer = PPMImageWriter::new(BufWriter::new(&output_file), source);
    writer.write_image()
}

/// Draws `source` onto a fresh canvas of the same size.
pub fn paint<S: ImageSource>(source: &S, theme: Theme) -> SparseCanvas {
    let bounds = source.bounds();
    let mut canvas = SparseCanvas::new(theme, bounds.width(), bounds.height());
    let target = canvas.bounds();
    draw(&mut canvas, target, source, bounds.min);
    logger::log_canvas_layout(&canvas);
    canvas
}

fn output_file_name(input_file: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input_file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("paper"));
    PathBuf::from(format!("{}-{}.{}", stem, suffix, extension))
}

/// Renders every requested theme of the input image into the output
/// directory and returns the written files in order.
pub fn render_themes(arguments: &Arguments) -> Result<Vec<PathBuf>> {
    let registry = ThemeRegistry::with_presets();
    let themes = arguments
        .themes
        .iter()
        .map(|name| registry.lookup(name).map(|theme| (name.as_str(), theme)))
        .collect::<Result<Vec<(&str, Theme)>>>()?;

    let input_file = open_input_file(&arguments.input_file)?;
    let image = PPMImageReader::new(BufReader::new(&input_file)).read_image()?;
    log::info!(
        "read {} ({}x{})",
        arguments.input_file.display(),
        image.width(),
        image.height()
    );
    create_output_directory(&arguments.output_directory)?;

    let mut written = Vec::with_capacity(themes.len() + 1);
    let mut last_canvas = None;
    for (name, theme) in themes {
        let canvas = paint(&image, theme);
        let file_path = arguments
            .output_directory
            .join(output_file_name(&arguments.input_file, name, "ppm"));
        write_ppm(&file_path, &SubImage::new(&canvas, image.bounds()))?;
        log::info!("wrote {} theme to {}", name, file_path.display());
        written.push(file_path);
        last_canvas = Some(canvas);
    }

    if arguments.write_mask {
        // stored luminance does not depend on the theme
        let canvas = last_canvas.unwrap_or_else(|| paint(&image, Theme::MODERN));
        let mask = canvas.mask();
        let file_path = arguments
            .output_directory
            .join(output_file_name(&arguments.input_file, "mask", "pgm"));
        write_ppm(&file_path, &SubImage::new(&mask, image.bounds()))?;
        log::info!("wrote mask to {}", file_path.display());
        written.push(file_path);
    }
    Ok(written)
}
