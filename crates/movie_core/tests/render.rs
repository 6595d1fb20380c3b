use movie_core::render::html::{write_website, GRID_PLACEHOLDER, TITLE_PLACEHOLDER};
use movie_core::{load_template, render_page, Movie, RatingHistogram, RenderError, DEFAULT_TEMPLATE};

fn collection() -> Vec<Movie> {
    vec![
        Movie::new(
            "Heat",
            1995,
            8.3,
            Some("https://img.example/heat.jpg".to_string()),
        ),
        Movie::new("Tom & Jerry <The Movie>", 1992, 5.4, None),
    ]
}

#[test]
fn default_template_has_both_placeholders() {
    assert!(DEFAULT_TEMPLATE.contains(TITLE_PLACEHOLDER));
    assert!(DEFAULT_TEMPLATE.contains(GRID_PLACEHOLDER));
}

#[test]
fn rendered_page_lists_movies_in_order_and_escapes_text() {
    let page = render_page(DEFAULT_TEMPLATE, "Films & Co", &collection()).unwrap();

    assert!(!page.contains(TITLE_PLACEHOLDER));
    assert!(!page.contains(GRID_PLACEHOLDER));
    assert!(page.contains("<h1>Films &amp; Co</h1>"));
    assert!(page.contains("src='https://img.example/heat.jpg'"));
    assert!(page.contains("Tom &amp; Jerry &lt;The Movie&gt;"));

    let heat = page.find("Heat").unwrap();
    let tom = page.find("Tom &amp; Jerry").unwrap();
    assert!(heat < tom);
}

#[test]
fn template_without_placeholder_is_rejected() {
    let err = render_page("<h1>__TEMPLATE_TITLE__</h1>", "Title", &collection()).unwrap_err();
    assert!(matches!(err, RenderError::MissingPlaceholder(p) if p == GRID_PLACEHOLDER));
}

#[test]
fn website_is_written_into_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("site");

    let target = write_website(DEFAULT_TEMPLATE, "Mine", &collection(), &output).unwrap();

    assert_eq!(target, output.join("index.html"));
    let html = std::fs::read_to_string(target).unwrap();
    assert!(html.contains("<div class='movie-year'>1995</div>"));
}

#[test]
fn custom_template_is_loaded_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.html");
    std::fs::write(&path, "<b>__TEMPLATE_TITLE__</b>__TEMPLATE_MOVIE_GRID__").unwrap();

    let template = load_template(Some(&path)).unwrap();
    let page = render_page(&template, "T", &[]).unwrap();
    assert_eq!(page, "<b>T</b>");

    let missing = load_template(Some(&dir.path().join("absent.html")));
    assert!(matches!(missing, Err(RenderError::Io(_))));
}

#[test]
fn histogram_png_has_chart_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ratings.png");
    let histogram = RatingHistogram::from_ratings(&[8.3, 5.4, 9.0, 9.0], 30).unwrap();

    histogram.render_png(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    assert_eq!(histogram.counts.len(), 30);
    assert_eq!(histogram.total(), 4);
}
