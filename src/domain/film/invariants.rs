use super::entity::Film;
use crate::domain::record::{require_reference, require_text};
use crate::domain::{DomainError, DomainResult};

/// Validates all Film invariants
pub fn validate_film(film: &Film) -> DomainResult<()> {
    require_text("title", &film.title)?;
    require_text("description", &film.description)?;
    require_reference("language", film.language.meta.id)?;
    validate_numbers(film)?;
    Ok(())
}

/// Release year and rental duration are positive, money is never negative
fn validate_numbers(film: &Film) -> DomainResult<()> {
    if film.release_year <= 0 {
        return Err(DomainError::InvariantViolation(format!(
            "Release year must be positive, got {}",
            film.release_year
        )));
    }
    if film.rental_duration <= 0 {
        return Err(DomainError::InvariantViolation(format!(
            "Rental duration must be positive, got {}",
            film.rental_duration
        )));
    }
    if film.rental_rate < 0.0 || film.replacement_cost < 0.0 {
        return Err(DomainError::InvariantViolation(
            "Rental rate and replacement cost cannot be negative".to_string(),
        ));
    }
    if let Some(length) = film.length {
        if length <= 0 {
            return Err(DomainError::InvariantViolation(format!(
                "Length must be positive, got {}",
                length
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::film::FilmRating;
    use crate::domain::Language;

    fn english() -> Language {
        Language::reference(1, "English")
    }

    #[test]
    fn test_valid_film() {
        let film = Film::new("ACADEMY DINOSAUR", "An epic drama", 2006, english());
        assert!(validate_film(&film).is_ok());
    }

    #[test]
    fn test_zero_release_year_fails() {
        let film = Film::new("ACADEMY DINOSAUR", "An epic drama", 0, english());
        assert!(validate_film(&film).is_err());
    }

    #[test]
    fn test_missing_language_fails() {
        let film = Film::new("ACADEMY DINOSAUR", "An epic drama", 2006, Language::new("English"));
        assert!(validate_film(&film).is_err());
    }

    #[test]
    fn test_blank_description_fails() {
        let film = Film::new("ACADEMY DINOSAUR", "", 2006, english());
        assert!(validate_film(&film).is_err());
    }

    #[test]
    fn test_rating_parses_both_spellings() {
        assert_eq!("pg-13".parse::<FilmRating>().unwrap(), FilmRating::PG13);
        assert_eq!("NC17".parse::<FilmRating>().unwrap(), FilmRating::NC17);
        assert!("X".parse::<FilmRating>().is_err());
        assert_eq!(FilmRating::NC17.to_string(), "NC-17");
    }

    #[test]
    fn test_special_features_column() {
        let mut film = Film::new("A", "B", 2006, english());
        assert_eq!(film.special_features_column(), None);

        film.special_features = Film::parse_special_features(Some("Trailers, Deleted Scenes"));
        assert_eq!(film.special_features, vec!["Trailers", "Deleted Scenes"]);
        assert_eq!(
            film.special_features_column().as_deref(),
            Some("Trailers,Deleted Scenes")
        );
    }
}
