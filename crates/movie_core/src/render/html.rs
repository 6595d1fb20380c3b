//! Static website generation.
//!
//! # Invariants
//! - Both placeholders must be present before anything is written.
//! - Every interpolated value is HTML-escaped.

use crate::model::movie::Movie;
use crate::render::{RenderError, RenderResult};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

pub const TITLE_PLACEHOLDER: &str = "__TEMPLATE_TITLE__";
pub const GRID_PLACEHOLDER: &str = "__TEMPLATE_MOVIE_GRID__";
pub const WEBSITE_FILE_NAME: &str = "index.html";

/// Template shipped with the crate.
pub const DEFAULT_TEMPLATE: &str = include_str!("../../static/index_template.html");

/// Reads a template from disk, or returns [`DEFAULT_TEMPLATE`] for `None`.
pub fn load_template(path: Option<&Path>) -> RenderResult<String> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => Ok(DEFAULT_TEMPLATE.to_string()),
    }
}

/// Serializes one movie into a grid list item.
pub fn serialize_movie(movie: &Movie) -> String {
    let poster = movie.poster_url.as_deref().unwrap_or_default();
    format!(
        "<li>\n<div class='movie'>\n<img class='movie-poster'\nsrc='{}'/>\n<div class='movie-title'>{}</div>\n<div class='movie-year'>{}</div>\n</div>\n</li>\n",
        escape_html(poster),
        escape_html(&movie.title),
        movie.year
    )
}

/// Fills `template` with the page title and one grid item per movie.
///
/// # Errors
/// - `MissingPlaceholder` when either placeholder is absent.
pub fn render_page(template: &str, page_title: &str, movies: &[Movie]) -> RenderResult<String> {
    for placeholder in [TITLE_PLACEHOLDER, GRID_PLACEHOLDER] {
        if !template.contains(placeholder) {
            return Err(RenderError::MissingPlaceholder(placeholder));
        }
    }

    let grid = movies.iter().fold(String::new(), |mut grid, movie| {
        let _ = write!(grid, "{}", serialize_movie(movie));
        grid
    });

    Ok(template
        .replace(TITLE_PLACEHOLDER, &escape_html(page_title))
        .replace(GRID_PLACEHOLDER, &grid))
}

/// Renders the page and writes `index.html` into `output_dir`.
///
/// Returns the written file path.
pub fn write_website(
    template: &str,
    page_title: &str,
    movies: &[Movie],
    output_dir: &Path,
) -> RenderResult<PathBuf> {
    let page = render_page(template, page_title, movies)?;
    std::fs::create_dir_all(output_dir)?;
    let target = output_dir.join(WEBSITE_FILE_NAME);
    std::fs::write(&target, page)?;
    Ok(target)
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{escape_html, serialize_movie};
    use crate::model::movie::Movie;

    #[test]
    fn escape_html_handles_markup_and_quotes() {
        assert_eq!(
            escape_html("Tom & Jerry's <Movie>"),
            "Tom &amp; Jerry&#39;s &lt;Movie&gt;"
        );
    }

    #[test]
    fn serialize_movie_without_poster_leaves_src_empty() {
        let html = serialize_movie(&Movie::new("Heat", 1995, 8.3, None));
        assert!(html.contains("src=''"));
        assert!(html.contains("<div class='movie-title'>Heat</div>"));
        assert!(html.contains("<div class='movie-year'>1995</div>"));
    }
}
