// src/console/films.rs

use std::io::{BufRead, Write};

use super::{Console, Repositories};
use crate::domain::{Film, FilmRating, Language};
use crate::error::AppResult;

impl<R: BufRead, W: Write> Console<R, W> {
    pub(super) fn films_menu(&mut self) -> AppResult<()> {
        loop {
            let Some(choice) = self.menu(
                "FILMS",
                &[
                    "List all",
                    "Find by id",
                    "Search",
                    "Add",
                    "Update",
                    "Delete",
                    "Cast of a film",
                    "Statistics",
                ],
            )?
            else {
                return Ok(());
            };

            match choice.as_str() {
                "1" => self.list_records(Repositories::films)?,
                "2" => self.find_record(Repositories::films)?,
                "3" => self.search_records(Repositories::films)?,
                "4" => self.add_film()?,
                "5" => self.update_film()?,
                "6" => self.delete_record(Repositories::films)?,
                "7" => self.film_cast()?,
                "8" => self.film_statistics()?,
                "0" => return Ok(()),
                _ => writeln!(self.output, "Invalid option, try again.")?,
            }
        }
    }

    fn add_film(&mut self) -> AppResult<()> {
        let Some(title) = self.prompt("Title")? else {
            return Ok(());
        };
        let Some(description) = self.prompt("Description")? else {
            return Ok(());
        };
        let Some(release_year) = self.prompt_parsed::<i32>("Release year")? else {
            return Ok(());
        };
        let Some(language_id) = self.prompt_id("Language id")? else {
            return Ok(());
        };
        let Some(rating) = self.prompt_keep_parsed("Rating", FilmRating::default())? else {
            return Ok(());
        };

        let mut film = Film::new(
            title,
            description,
            release_year,
            Language::reference(language_id, ""),
        );
        film.rating = rating;

        let ok = self.repos.films().create(&mut film);
        let message = format!("Film created with id {}.", film.meta.id);
        self.report_outcome(ok, &message)
    }

    fn update_film(&mut self) -> AppResult<()> {
        let Some(id) = self.prompt_id("Id")? else {
            return Ok(());
        };
        let Some(mut film) = self.repos.films().get_by_id(id) else {
            writeln!(self.output, "No film with id {}.", id)?;
            return Ok(());
        };

        let Some(title) = self.prompt_keep("Title", &film.title)? else {
            return Ok(());
        };
        let Some(description) = self.prompt_keep("Description", &film.description)? else {
            return Ok(());
        };
        let Some(release_year) = self.prompt_keep_parsed("Release year", film.release_year)? else {
            return Ok(());
        };
        let Some(rating) = self.prompt_keep_parsed("Rating", film.rating)? else {
            return Ok(());
        };
        let Some(rental_rate) = self.prompt_keep_parsed("Rental rate", film.rental_rate)? else {
            return Ok(());
        };

        film.title = title;
        film.description = description;
        film.release_year = release_year;
        film.rating = rating;
        film.rental_rate = rental_rate;

        let ok = self.repos.films().update(&mut film);
        self.report_outcome(ok, "Film updated.")
    }

    fn film_cast(&mut self) -> AppResult<()> {
        let Some(id) = self.prompt_id("Film id")? else {
            return Ok(());
        };
        let actors = self.repos.films().actors_of_film(id);
        self.print_records(&actors)
    }

    fn film_statistics(&mut self) -> AppResult<()> {
        let stats = self.repos.films().statistics();

        writeln!(self.output, "Total films: {}", stats.total_films)?;
        writeln!(self.output, "By rating:")?;
        for entry in &stats.by_rating {
            writeln!(self.output, "  {}: {}", entry.label, entry.film_count)?;
        }
        writeln!(self.output, "By category:")?;
        for entry in &stats.by_category {
            writeln!(self.output, "  {}: {}", entry.label, entry.film_count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::console::tests::{seeded, session};

    #[test]
    fn test_add_and_delete_film() {
        let db = seeded();
        let out = session(
            &db,
            "3\n4\nNEW FILM\nA Quiet Story\n2024\n1\nPG-13\n6\n5\ny\n0\n0\n",
        );

        assert!(out.contains("Film created with id 5."));
        assert!(out.contains("Delete #5 NEW FILM (2024) [PG-13]"));
        assert!(out.contains("Deleted."));
    }

    #[test]
    fn test_film_with_copies_cannot_be_deleted() {
        let db = seeded();
        let out = session(&db, "3\n6\n4\ny\n0\n0\n");
        assert!(out.contains("Operation failed. See the log for details."));
    }

    #[test]
    fn test_bad_year_is_reported() {
        let db = seeded();
        let out = session(&db, "3\n4\nNEW FILM\nA Quiet Story\nsoon\n0\n0\n");
        assert!(out.contains("'soon' is not a valid value."));
    }

    #[test]
    fn test_cast_and_statistics() {
        let db = seeded();
        let out = session(&db, "3\n7\n1\n8\n0\n0\n");

        assert!(out.contains("JENNIFER DAVIS"));
        assert!(out.contains("PENELOPE GUINESS"));
        assert!(out.contains("Total films: 4"));
        assert!(out.contains("  Action: 2"));
    }
}
