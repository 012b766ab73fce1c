//! Movie records and their business validation rules.

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use super::runtime::Runtime;
use super::validator::{Validator, unique};

/// Maximum title length in bytes.
pub const TITLE_MAX_BYTES: usize = 500;
/// Year of the earliest surviving motion picture.
pub const EARLIEST_YEAR: i32 = 1888;
/// Maximum number of genres per movie.
pub const GENRES_MAX: usize = 5;

/// Caller-supplied movie fields, before an id is assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieDraft {
    pub title: String,
    pub year: i32,
    pub runtime: Runtime,
    pub genres: Vec<String>,
}

/// Stored movie record.
///
/// `created_at` is internal bookkeeping and never serialised; a zero runtime
/// is omitted from the JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movie {
    pub id: i64,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub year: i32,
    #[serde(skip_serializing_if = "Runtime::is_zero")]
    pub runtime: Runtime,
    pub genres: Vec<String>,
    pub version: i32,
}

impl Movie {
    /// Build a record from a validated draft.
    pub fn from_draft(id: i64, created_at: DateTime<Utc>, draft: MovieDraft) -> Self {
        let MovieDraft {
            title,
            year,
            runtime,
            genres,
        } = draft;
        Self {
            id,
            created_at,
            title,
            year,
            runtime,
            genres,
            version: 1,
        }
    }

    /// Overwrite the caller-editable fields with `draft`.
    pub fn apply(&mut self, draft: MovieDraft) {
        self.title = draft.title;
        self.year = draft.year;
        self.runtime = draft.runtime;
        self.genres = draft.genres;
    }

    /// Editable fields as a draft, for re-validation.
    pub fn to_draft(&self) -> MovieDraft {
        MovieDraft {
            title: self.title.clone(),
            year: self.year,
            runtime: self.runtime,
            genres: self.genres.clone(),
        }
    }
}

/// Record every rule `draft` breaks in `v`.
pub fn validate_movie(v: &mut Validator, draft: &MovieDraft) {
    validate_movie_at(v, draft, Utc::now().year());
}

fn validate_movie_at(v: &mut Validator, draft: &MovieDraft, current_year: i32) {
    v.check(!draft.title.is_empty(), "title", "must be provided");
    v.check(
        draft.title.len() <= TITLE_MAX_BYTES,
        "title",
        "must not be more than 500 bytes long",
    );

    v.check(draft.year != 0, "year", "must be provided");
    v.check(
        draft.year >= EARLIEST_YEAR,
        "year",
        "must be greater than 1888",
    );
    v.check(
        draft.year <= current_year,
        "year",
        "must not be in the future",
    );

    v.check(!draft.runtime.is_zero(), "runtime", "must be provided");
    v.check(
        draft.runtime.minutes() > 0,
        "runtime",
        "must be a positive integer",
    );

    v.check(!draft.genres.is_empty(), "genres", "must contain at least 1 genre");
    v.check(
        draft.genres.len() <= GENRES_MAX,
        "genres",
        "must not contain more than 5 genres",
    );
    v.check(
        unique(&draft.genres),
        "genres",
        "must not contain duplicate values",
    );
}

#[cfg(test)]
mod tests {
    //! Regression coverage for movie validation.

    use super::*;
    use rstest::{fixture, rstest};

    const THIS_YEAR: i32 = 2024;

    #[fixture]
    fn draft() -> MovieDraft {
        MovieDraft {
            title: "Moana".to_owned(),
            year: 2016,
            runtime: Runtime::new(107),
            genres: vec!["animation".to_owned(), "adventure".to_owned()],
        }
    }

    fn errors_for(draft: &MovieDraft) -> Validator {
        let mut v = Validator::new();
        validate_movie_at(&mut v, draft, THIS_YEAR);
        v
    }

    #[rstest]
    fn accepts_complete_draft(draft: MovieDraft) {
        assert!(errors_for(&draft).valid());
    }

    #[rstest]
    fn empty_draft_reports_every_field() {
        let v = errors_for(&MovieDraft::default());
        let errors = v.errors();
        assert_eq!(errors["title"], "must be provided");
        assert_eq!(errors["year"], "must be provided");
        assert_eq!(errors["runtime"], "must be provided");
        assert_eq!(errors["genres"], "must contain at least 1 genre");
    }

    #[rstest]
    #[case::too_early(1887, "must be greater than 1888")]
    #[case::future(THIS_YEAR + 1, "must not be in the future")]
    fn year_bounds(mut draft: MovieDraft, #[case] year: i32, #[case] message: &str) {
        draft.year = year;
        assert_eq!(errors_for(&draft).errors()["year"], message);
    }

    #[rstest]
    fn negative_runtime_is_rejected(mut draft: MovieDraft) {
        draft.runtime = Runtime::new(-5);
        assert_eq!(
            errors_for(&draft).errors()["runtime"],
            "must be a positive integer"
        );
    }

    #[rstest]
    fn long_title_is_rejected(mut draft: MovieDraft) {
        draft.title = "x".repeat(TITLE_MAX_BYTES + 1);
        assert_eq!(
            errors_for(&draft).errors()["title"],
            "must not be more than 500 bytes long"
        );
    }

    #[rstest]
    fn duplicate_genres_are_rejected(mut draft: MovieDraft) {
        draft.genres = vec!["drama".to_owned(), "drama".to_owned()];
        assert_eq!(
            errors_for(&draft).errors()["genres"],
            "must not contain duplicate values"
        );
    }

    #[rstest]
    fn too_many_genres_are_rejected(mut draft: MovieDraft) {
        draft.genres = (0..=GENRES_MAX).map(|i| format!("genre-{i}")).collect();
        assert_eq!(
            errors_for(&draft).errors()["genres"],
            "must not contain more than 5 genres"
        );
    }

    #[rstest]
    fn serialised_movie_hides_internal_fields(draft: MovieDraft) {
        let mut movie = Movie::from_draft(1, Utc::now(), draft);
        let json = serde_json::to_value(&movie).expect("serialise movie");
        assert!(json.get("created_at").is_none());
        assert_eq!(json["runtime"], "107 mins");

        movie.runtime = Runtime::default();
        let json = serde_json::to_value(&movie).expect("serialise movie");
        assert!(json.get("runtime").is_none());
    }
}
