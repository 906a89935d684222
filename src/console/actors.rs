// src/console/actors.rs

use std::io::{BufRead, Write};

use super::{Console, Repositories};
use crate::domain::Actor;
use crate::error::AppResult;

impl<R: BufRead, W: Write> Console<R, W> {
    pub(super) fn actors_menu(&mut self) -> AppResult<()> {
        loop {
            let Some(choice) = self.menu(
                "ACTORS",
                &[
                    "List all",
                    "Find by id",
                    "Search",
                    "Add",
                    "Update",
                    "Delete",
                    "Statistics",
                ],
            )?
            else {
                return Ok(());
            };

            match choice.as_str() {
                "1" => self.list_records(Repositories::actors)?,
                "2" => self.find_record(Repositories::actors)?,
                "3" => self.search_records(Repositories::actors)?,
                "4" => self.add_actor()?,
                "5" => self.update_actor()?,
                "6" => self.delete_record(Repositories::actors)?,
                "7" => self.actor_statistics()?,
                "0" => return Ok(()),
                _ => writeln!(self.output, "Invalid option, try again.")?,
            }
        }
    }

    fn add_actor(&mut self) -> AppResult<()> {
        let Some(first_name) = self.prompt("First name")? else {
            return Ok(());
        };
        let Some(last_name) = self.prompt("Last name")? else {
            return Ok(());
        };

        let mut actor = Actor::new(first_name, last_name);
        let ok = self.repos.actors().create(&mut actor);
        let message = format!("Actor created with id {}.", actor.meta.id);
        self.report_outcome(ok, &message)
    }

    fn update_actor(&mut self) -> AppResult<()> {
        let Some(id) = self.prompt_id("Id")? else {
            return Ok(());
        };
        let Some(mut actor) = self.repos.actors().get_by_id(id) else {
            writeln!(self.output, "No actor with id {}.", id)?;
            return Ok(());
        };

        let Some(first_name) = self.prompt_keep("First name", &actor.first_name)? else {
            return Ok(());
        };
        let Some(last_name) = self.prompt_keep("Last name", &actor.last_name)? else {
            return Ok(());
        };
        actor.first_name = first_name;
        actor.last_name = last_name;

        let ok = self.repos.actors().update(&mut actor);
        self.report_outcome(ok, "Actor updated.")
    }

    fn actor_statistics(&mut self) -> AppResult<()> {
        let stats = self.repos.actors().statistics();

        writeln!(self.output, "Total actors: {}", stats.total_actors)?;
        writeln!(self.output, "Most credited:")?;
        for entry in &stats.top_actors {
            writeln!(
                self.output,
                "  #{} {} {}: {} films",
                entry.actor_id, entry.first_name, entry.last_name, entry.film_count
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::console::tests::{seeded, session};

    #[test]
    fn test_add_then_find_actor() {
        let db = seeded();
        let out = session(&db, "1\n4\nJOHN\nDOE\n2\n5\n0\n0\n");

        assert!(out.contains("Actor created with id 5."));
        assert!(out.contains("#5 JOHN DOE"));
    }

    #[test]
    fn test_update_keeps_blank_fields() {
        let db = seeded();
        let out = session(&db, "1\n5\n3\n\nCHASEN\n0\n0\n");
        assert!(out.contains("Actor updated."));

        let last: String = db
            .connection()
            .query_row("SELECT last_name FROM actor WHERE actor_id = 3", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(last, "CHASEN");
    }

    #[test]
    fn test_blank_name_fails_generically() {
        let db = seeded();
        let out = session(&db, "1\n4\n\nDOE\n0\n0\n");
        assert!(out.contains("Operation failed. See the log for details."));
    }

    #[test]
    fn test_search_and_statistics() {
        let db = seeded();
        let out = session(&db, "1\n3\nnick davis\n7\n0\n0\n");

        assert!(out.contains("#2 NICK WAHLBERG"));
        assert!(out.contains("#4 JENNIFER DAVIS"));
        assert!(out.contains("(2 records)"));
        assert!(out.contains("Total actors: 4"));
        assert!(out.contains("#4 JENNIFER DAVIS: 3 films"));
    }

    #[test]
    fn test_missing_actor() {
        let db = seeded();
        let out = session(&db, "1\n2\n99\n0\n0\n");
        assert!(out.contains("No actor with id 99."));
    }
}
