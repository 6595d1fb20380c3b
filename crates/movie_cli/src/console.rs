//! Interactive menu loop.
//!
//! # Responsibility
//! - Read menu choices and per-command answers from the terminal.
//! - Dispatch to `MovieService` and print results or one-line errors.
//!
//! # Invariants
//! - Command errors never end the loop; only `0` or end of input does.
//! - Rating prompts repeat until the answer is valid.

use crate::menu::{menu_text, parse_choice, MenuChoice};
use log::warn;
use movie_core::{
    parse_rating, FilterCriteria, MatchKind, MetadataSource, Movie, MovieRepository,
    MovieService, MovieServiceError, RemoteMovie, SortField, SortOrder,
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Export settings the console hands to the service.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub template: String,
    pub site_title: String,
    pub output_dir: PathBuf,
}

/// Menu-driven front end over terminal-like streams.
pub struct Console<R: MovieRepository, S: MetadataSource, I: BufRead, O: Write> {
    service: MovieService<R>,
    source: S,
    export: ExportSettings,
    input: I,
    output: O,
}

enum Flow {
    Continue,
    Exit,
}

impl<R, S, I, O> Console<R, S, I, O>
where
    R: MovieRepository,
    S: MetadataSource,
    I: BufRead,
    O: Write,
{
    pub fn new(
        service: MovieService<R>,
        source: S,
        export: ExportSettings,
        input: I,
        output: O,
    ) -> Self {
        Self {
            service,
            source,
            export,
            input,
            output,
        }
    }

    /// Runs until the user picks `0` or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "********** My Movies Database **********\n")?;
        loop {
            write!(self.output, "{}", menu_text())?;
            let Some(answer) = self.prompt("Enter choice (0-12): ")? else {
                break;
            };

            let choice = match parse_choice(&answer) {
                Ok(choice) => choice,
                Err(err) => {
                    writeln!(self.output, "{err}")?;
                    continue;
                }
            };

            if let Flow::Exit = self.dispatch(choice)? {
                break;
            }
            if self.prompt("\nPress enter to continue")?.is_none() {
                break;
            }
        }
        writeln!(self.output, "Bye!")?;
        Ok(())
    }

    fn dispatch(&mut self, choice: MenuChoice) -> io::Result<Flow> {
        let result = match choice {
            MenuChoice::Exit => return Ok(Flow::Exit),
            MenuChoice::List => self.list_movies(),
            MenuChoice::Add => self.add_movie(),
            MenuChoice::Delete => self.delete_movie(),
            MenuChoice::Update => self.update_movie(),
            MenuChoice::Stats => self.show_stats(),
            MenuChoice::Random => self.random_movie(),
            MenuChoice::Search => self.search_movie(),
            MenuChoice::SortByRating => self.sort_by_rating(),
            MenuChoice::SortByYear => self.sort_by_year(),
            MenuChoice::Histogram => self.create_histogram(),
            MenuChoice::Filter => self.filter_movies(),
            MenuChoice::Website => self.generate_website(),
        };

        match result {
            Ok(()) => Ok(Flow::Continue),
            Err(CommandError::Io(err)) => Err(err),
            Err(CommandError::Service(err)) => {
                warn!("event=command_failed module=cli status=error choice={choice:?}");
                writeln!(self.output, "Error: {err}")?;
                Ok(Flow::Continue)
            }
            Err(CommandError::Cancelled) => Ok(Flow::Continue),
        }
    }

    fn list_movies(&mut self) -> CommandResult {
        let movies = self.service.list_movies()?;
        writeln!(self.output, "{} movies in total", movies.len())?;
        self.print_movies(&movies)
    }

    fn add_movie(&mut self) -> CommandResult {
        let query = self.require_answer("Enter new movie title: ")?;
        let remote = self.service.fetch_candidate(&self.source, &query)?;
        self.describe_ratings(&remote)?;

        let year = match remote.year {
            Some(year) => year,
            None => self.ask_year()?,
        };
        let rating = self.ask_rating(remote.suggested_rating())?;
        let movie = Movie::new(remote.title, year, rating, remote.poster_url);
        self.service.add_movie(&movie)?;
        writeln!(self.output, "Movie '{}' added successfully.", movie.title)?;
        Ok(())
    }

    fn delete_movie(&mut self) -> CommandResult {
        let title = self.require_answer("Enter movie title to delete: ")?;
        self.service.delete_movie(&title)?;
        writeln!(self.output, "Movie '{title}' deleted successfully.")?;
        Ok(())
    }

    fn update_movie(&mut self) -> CommandResult {
        let title = self.require_answer("Enter existing movie title: ")?;
        let current = self.service.require_existing(&title)?;
        writeln!(self.output, "Current rating: {}", current.rating)?;
        let rating = self.ask_rating(None)?;
        self.service.update_rating(&title, rating)?;
        writeln!(self.output, "Movie '{title}' updated successfully.")?;
        Ok(())
    }

    fn show_stats(&mut self) -> CommandResult {
        let stats = self.service.stats()?;
        writeln!(self.output, "{stats}")?;
        Ok(())
    }

    fn random_movie(&mut self) -> CommandResult {
        let movie = self.service.random_movie()?;
        writeln!(
            self.output,
            "Your movie for tonight: {}, it's rated {}",
            movie.title, movie.rating
        )?;
        Ok(())
    }

    fn search_movie(&mut self) -> CommandResult {
        let query = self.require_answer("Enter part of movie title: ")?;
        let result = self.service.search(&query)?;
        if result.kind == MatchKind::NoMatch {
            writeln!(self.output, "No match for {query}.")?;
            return Ok(());
        }
        for movie in &result.movies {
            writeln!(self.output, "Did you mean: {}", movie.title)?;
        }
        Ok(())
    }

    fn sort_by_rating(&mut self) -> CommandResult {
        let movies = self
            .service
            .sorted(SortField::Rating, SortOrder::Descending)?;
        self.print_movies(&movies)
    }

    fn sort_by_year(&mut self) -> CommandResult {
        let answer = self.require_answer("Do you want the latest movie first? (Y/N): ")?;
        let order = latest_first_order(&answer).ok_or_else(|| {
            MovieServiceError::Validation(format!("please answer Y or N, got `{answer}`"))
        })?;
        let movies = self.service.sorted(SortField::Year, order)?;
        self.print_movies(&movies)
    }

    fn create_histogram(&mut self) -> CommandResult {
        let stem = self.require_answer(
            "Enter file title for saving the histogram (without extension): ",
        )?;
        let path = histogram_path(&self.export.output_dir, &stem)?;
        self.service.export_histogram(&path)?;
        writeln!(
            self.output,
            "The histogram was saved to the file {}",
            path.display()
        )?;
        Ok(())
    }

    fn filter_movies(&mut self) -> CommandResult {
        let min_rating =
            self.answer("Enter minimum rating (leave blank for no minimum rating): ")?;
        let start_year = self.answer("Enter start year (leave blank for no start year): ")?;
        let end_year = self.answer("Enter end year (leave blank for no end year): ")?;

        let criteria = FilterCriteria::from_raw_today(&min_rating, &start_year, &end_year)
            .map_err(MovieServiceError::from)?;
        let movies = self.service.filter(&criteria)?;
        self.print_movies(&movies)
    }

    fn generate_website(&mut self) -> CommandResult {
        let target = self.service.generate_website(
            &self.export.template,
            &self.export.site_title,
            &self.export.output_dir,
        )?;
        writeln!(
            self.output,
            "Website was generated successfully: {}",
            target.display()
        )?;
        Ok(())
    }

    fn describe_ratings(&mut self, remote: &RemoteMovie) -> CommandResult {
        if remote.ratings.is_empty() {
            writeln!(self.output, "The movie {} has no rating.", remote.title)?;
            return Ok(());
        }
        writeln!(
            self.output,
            "Different sources rate the movie {} at:",
            remote.title
        )?;
        for rating in &remote.ratings {
            writeln!(self.output, "  {}: {}", rating.source, rating.value)?;
        }
        Ok(())
    }

    /// Repeats until a valid rating is entered. A blank answer takes
    /// `suggested` when there is one.
    fn ask_rating(&mut self, suggested: Option<f64>) -> Result<f64, CommandError> {
        let label = match suggested {
            Some(value) => format!("Enter your rating value (blank keeps {value}): "),
            None => "Enter your rating value: ".to_string(),
        };
        loop {
            let answer = self.answer(&label)?;
            if let (Some(value), true) = (suggested, answer.trim().is_empty()) {
                return Ok(value);
            }
            match parse_rating(&answer) {
                Ok(rating) => return Ok(rating),
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    fn ask_year(&mut self) -> Result<i32, CommandError> {
        writeln!(self.output, "Year of the movie is not valid.")?;
        loop {
            let answer = self.answer("Enter the year of the movie manually: ")?;
            match answer.trim().parse::<i32>() {
                Ok(year) => return Ok(year),
                Err(_) => writeln!(self.output, "Invalid year.")?,
            }
        }
    }

    fn print_movies(&mut self, movies: &[Movie]) -> CommandResult {
        for movie in movies {
            writeln!(
                self.output,
                "{} ({}): {}",
                movie.title, movie.year, movie.rating
            )?;
        }
        Ok(())
    }

    /// Reads one answer; end of input cancels the current command.
    fn answer(&mut self, label: &str) -> Result<String, CommandError> {
        self.prompt(label)?.ok_or(CommandError::Cancelled)
    }

    /// Like [`Console::answer`], but the line must not be blank. Surrounding
    /// whitespace is dropped.
    fn require_answer(&mut self, label: &str) -> Result<String, CommandError> {
        let answer = self.answer(label)?;
        if answer.trim().is_empty() {
            return Err(MovieServiceError::Validation(
                "empty input is not allowed".to_string(),
            )
            .into());
        }
        Ok(answer.trim().to_string())
    }

    /// Prints `label` and reads one line without its line ending.
    /// `None` means end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Maps a "latest first?" answer to a year order.
///
/// Any answer containing `y` means latest first; otherwise one containing
/// `n` means oldest first.
fn latest_first_order(answer: &str) -> Option<SortOrder> {
    let answer = answer.to_lowercase();
    if answer.contains('y') {
        Some(SortOrder::Descending)
    } else if answer.contains('n') {
        Some(SortOrder::Ascending)
    } else {
        None
    }
}

/// Resolves the histogram file inside `output_dir`; the stem must be a
/// plain file name.
fn histogram_path(output_dir: &Path, stem: &str) -> Result<PathBuf, MovieServiceError> {
    if stem.contains(['/', '\\']) || stem == "." || stem == ".." {
        return Err(MovieServiceError::Validation(format!(
            "`{stem}` is not a plain file name"
        )));
    }
    Ok(output_dir.join(format!("{stem}.png")))
}

type CommandResult = Result<(), CommandError>;

enum CommandError {
    Service(MovieServiceError),
    Io(io::Error),
    Cancelled,
}

impl From<MovieServiceError> for CommandError {
    fn from(value: MovieServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<io::Error> for CommandError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{histogram_path, latest_first_order, Console, ExportSettings};
    use movie_core::db::open_db_in_memory;
    use movie_core::{
        MetadataSource, Movie, MovieRepository, MovieService, RatingSource, RemoteMovie,
        SortOrder, SqliteMovieRepository, DEFAULT_TEMPLATE,
    };
    use std::io::Cursor;
    use std::path::Path;

    struct FakeSource;

    impl MetadataSource for FakeSource {
        fn fetch_movie(&self, title: &str) -> movie_core::remote::RemoteResult<Option<RemoteMovie>> {
            if !title.eq_ignore_ascii_case("inception") {
                return Ok(None);
            }
            Ok(Some(RemoteMovie {
                title: "Inception".to_string(),
                year: Some(2010),
                ratings: vec![RatingSource {
                    source: "Internet Movie Database".to_string(),
                    value: "8.8/10".to_string(),
                }],
                poster_url: Some("https://example.com/inception.jpg".to_string()),
            }))
        }
    }

    fn run_script(repo: SqliteMovieRepository<'_>, output_dir: &Path, script: &str) -> String {
        let export = ExportSettings {
            template: DEFAULT_TEMPLATE.to_string(),
            site_title: "Test Movies".to_string(),
            output_dir: output_dir.to_path_buf(),
        };
        let mut output = Vec::new();
        let mut console = Console::new(
            MovieService::new(repo),
            FakeSource,
            export,
            Cursor::new(script.as_bytes().to_vec()),
            &mut output,
        );
        console.run().unwrap();
        drop(console);
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn add_accepts_suggested_rating_and_lists_movie() {
        let conn = open_db_in_memory().unwrap();
        let dir = tempfile::tempdir().unwrap();

        let output = run_script(
            SqliteMovieRepository::new(&conn),
            dir.path(),
            "2\ninception\n\n\n1\n\n0\n",
        );

        assert!(output.contains("Movie 'Inception' added successfully."));
        assert!(output.contains("1 movies in total"));
        assert!(output.contains("Inception (2010): 8.8"));
        assert!(!output.contains("Error:"));
        assert!(output.ends_with("Bye!\n"));
    }

    #[test]
    fn invalid_choices_and_ratings_are_reported_without_leaving_the_loop() {
        let conn = open_db_in_memory().unwrap();
        SqliteMovieRepository::new(&conn)
            .insert(&Movie::new("Heat", 1995, 8.3, None))
            .unwrap();
        let dir = tempfile::tempdir().unwrap();

        let output = run_script(
            SqliteMovieRepository::new(&conn),
            dir.path(),
            "abc\n42\n4\nHeat\neleven\n11\n9\n\n0\n",
        );

        assert!(output.contains("Command `abc` was not a number!"));
        assert!(output.contains("Not supported number for a command: 42"));
        assert!(output.contains("rating value must be a number"));
        assert!(output.contains("out of range"));
        assert!(output.contains("Movie 'Heat' updated successfully."));

        let stored = SqliteMovieRepository::new(&conn)
            .get_movie("Heat")
            .unwrap()
            .unwrap();
        assert_eq!(stored.rating, 9.0);
    }

    #[test]
    fn deleting_unknown_title_prints_one_error_line() {
        let conn = open_db_in_memory().unwrap();
        let dir = tempfile::tempdir().unwrap();

        let output = run_script(SqliteMovieRepository::new(&conn), dir.path(), "3\nAlien\n\n0\n");

        assert!(output.contains("Error: movie `Alien` doesn't exist"));
    }

    #[test]
    fn website_is_written_to_output_dir() {
        let conn = open_db_in_memory().unwrap();
        SqliteMovieRepository::new(&conn)
            .insert(&Movie::new("Heat", 1995, 8.3, None))
            .unwrap();
        let dir = tempfile::tempdir().unwrap();

        let output = run_script(SqliteMovieRepository::new(&conn), dir.path(), "12\n\n0\n");

        assert!(output.contains("Website was generated successfully"));
        let page = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert!(page.contains("<h1>Test Movies</h1>"));
        assert!(page.contains("Heat"));
    }

    #[test]
    fn end_of_input_exits_cleanly() {
        let conn = open_db_in_memory().unwrap();
        let dir = tempfile::tempdir().unwrap();

        let output = run_script(SqliteMovieRepository::new(&conn), dir.path(), "2\n");

        assert!(output.ends_with("Bye!\n"));
    }

    #[test]
    fn search_prints_suggestions_for_both_match_kinds() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteMovieRepository::new(&conn);
        repo.insert(&Movie::new("The Lord of the Rings", 2001, 8.9, None))
            .unwrap();
        repo.insert(&Movie::new("Heat", 1995, 8.3, None)).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let output = run_script(
            SqliteMovieRepository::new(&conn),
            dir.path(),
            "7\nlord\n\n7\nLord Rings\n\n7\nZzyzx\n\n0\n",
        );

        assert_eq!(
            output
                .matches("Did you mean: The Lord of the Rings")
                .count(),
            2
        );
        assert!(!output.contains("The Lord of the Rings (2001)"));
        assert!(output.contains("No match for Zzyzx."));
    }

    #[test]
    fn latest_first_answer_is_lenient() {
        assert_eq!(latest_first_order("Y"), Some(SortOrder::Descending));
        assert_eq!(latest_first_order("yes please"), Some(SortOrder::Descending));
        assert_eq!(latest_first_order("nope"), Some(SortOrder::Ascending));
        assert_eq!(latest_first_order("N"), Some(SortOrder::Ascending));
        assert_eq!(latest_first_order("maybe"), Some(SortOrder::Descending));
        assert_eq!(latest_first_order("ok"), None);
    }

    #[test]
    fn sort_by_year_prints_oldest_first_on_no() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteMovieRepository::new(&conn);
        repo.insert(&Movie::new("Heat", 1995, 8.3, None)).unwrap();
        repo.insert(&Movie::new("Alien", 1979, 8.5, None)).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let output = run_script(SqliteMovieRepository::new(&conn), dir.path(), "9\nNo\n\n0\n");

        let alien = output.find("Alien (1979)").unwrap();
        let heat = output.find("Heat (1995)").unwrap();
        assert!(alien < heat);
    }

    #[test]
    fn histogram_stem_must_stay_inside_output_dir() {
        let dir = Path::new("/srv/movies");

        assert_eq!(
            histogram_path(dir, "ratings").unwrap(),
            dir.join("ratings.png")
        );
        for stem in ["../ratings", "/tmp/ratings", "charts/ratings", "..\\ratings", ".."] {
            assert!(histogram_path(dir, stem).is_err(), "{stem} was accepted");
        }
    }

    #[test]
    fn histogram_with_escaping_stem_writes_nothing() {
        let conn = open_db_in_memory().unwrap();
        SqliteMovieRepository::new(&conn)
            .insert(&Movie::new("Heat", 1995, 8.3, None))
            .unwrap();
        let root = tempfile::tempdir().unwrap();
        let output_dir = root.path().join("out");

        let output = run_script(
            SqliteMovieRepository::new(&conn),
            &output_dir,
            "10\n../escaped\n\n10\nratings\n\n0\n",
        );

        assert!(output.contains("Error: `../escaped` is not a plain file name"));
        assert!(!root.path().join("escaped.png").exists());
        assert!(output_dir.join("ratings.png").exists());
    }
}
