//! File exports: the static website and the rating histogram.
//!
//! # Responsibility
//! - Serialize the collection into a fixed HTML template.
//! - Bucket ratings and draw them as a PNG bar chart.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod histogram;
pub mod html;

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Debug)]
pub enum RenderError {
    /// Template lacks a required placeholder.
    MissingPlaceholder(&'static str),
    Io(std::io::Error),
    Image(image::ImageError),
}

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingPlaceholder(placeholder) => {
                write!(f, "the placeholder {placeholder} is not in the template")
            }
            Self::Io(err) => write!(f, "{err}"),
            Self::Image(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingPlaceholder(_) => None,
            Self::Io(err) => Some(err),
            Self::Image(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for RenderError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<image::ImageError> for RenderError {
    fn from(value: image::ImageError) -> Self {
        Self::Image(value)
    }
}
