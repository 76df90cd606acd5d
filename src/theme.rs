use std::collections::BTreeMap;

use crate::color::RGBAColorFormat;
use crate::error::Error;

/// Two color gradient a luminance byte is mapped through.
///
/// `0` resolves to the primary ("ink") color, `255` to the background
/// ("paper") color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    primary: RGBAColorFormat,
    background: RGBAColorFormat,
}

impl Theme {
    pub const MODERN: Theme = Theme::new(
        RGBAColorFormat::opaque(21, 21, 21),
        RGBAColorFormat::opaque(221, 221, 221),
    );
    pub const NOSTALGIA: Theme = Theme::new(
        RGBAColorFormat::opaque(45, 40, 14),
        RGBAColorFormat::opaque(227, 218, 189),
    );
    pub const SEPIA: Theme = Theme::new(
        RGBAColorFormat::opaque(52, 36, 36),
        RGBAColorFormat::opaque(190, 155, 118),
    );
    pub const NIGHT: Theme = Theme::new(
        RGBAColorFormat::opaque(221, 221, 221),
        RGBAColorFormat::opaque(21, 21, 21),
    );

    pub const fn new(primary: RGBAColorFormat, background: RGBAColorFormat) -> Self {
        Self {
            primary: RGBAColorFormat::opaque(primary.red, primary.green, primary.blue),
            background: RGBAColorFormat::opaque(background.red, background.green, background.blue),
        }
    }

    pub fn primary(&self) -> RGBAColorFormat {
        self.primary
    }

    pub fn background(&self) -> RGBAColorFormat {
        self.background
    }

    pub fn resolve(&self, value: u8) -> RGBAColorFormat {
        RGBAColorFormat::opaque(
            mix(self.primary.red, self.background.red, value),
            mix(self.primary.green, self.background.green, value),
            mix(self.primary.blue, self.background.blue, value),
        )
    }
}

fn mix(primary: u8, background: u8, value: u8) -> u8 {
    let ink = (u8::MAX - value) as u32 * primary as u32;
    let paper = value as u32 * background as u32;
    ((ink + paper) / u8::MAX as u32) as u8
}

/// Named themes, built once and handed to whoever renders.
#[derive(Clone, Debug, Default)]
pub struct ThemeRegistry {
    themes: BTreeMap<String, Theme>,
}

pub const PRESET_NAMES: [&str; 4] = ["modern", "nostalgia", "sepia", "night"];

impl ThemeRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_presets() -> Self {
        Self::empty()
            .with_theme("modern", Theme::MODERN)
            .with_theme("nostalgia", Theme::NOSTALGIA)
            .with_theme("sepia", Theme::SEPIA)
            .with_theme("night", Theme::NIGHT)
    }

    pub fn with_theme(mut self, name: &str, theme: Theme) -> Self {
        self.themes.insert(name.to_owned(), theme);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    pub fn lookup(&self, name: &str) -> crate::Result<Theme> {
        self.get(name)
            .copied()
            .ok_or_else(|| Error::UnknownTheme(name.to_owned()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}
