// src/console/places.rs
//
// Cities and countries

use std::io::{BufRead, Write};

use super::{Console, Repositories};
use crate::domain::{City, Country};
use crate::error::AppResult;

impl<R: BufRead, W: Write> Console<R, W> {
    pub(super) fn cities_menu(&mut self) -> AppResult<()> {
        loop {
            let Some(choice) = self.menu(
                "CITIES",
                &[
                    "List all",
                    "Find by id",
                    "Search",
                    "Add",
                    "Update",
                    "Delete",
                    "Cities of a country",
                    "Statistics",
                ],
            )?
            else {
                return Ok(());
            };

            match choice.as_str() {
                "1" => self.list_records(Repositories::cities)?,
                "2" => self.find_record(Repositories::cities)?,
                "3" => self.search_records(Repositories::cities)?,
                "4" => self.add_city()?,
                "5" => self.update_city()?,
                "6" => self.delete_record(Repositories::cities)?,
                "7" => self.cities_of_country()?,
                "8" => self.city_statistics()?,
                "0" => return Ok(()),
                _ => writeln!(self.output, "Invalid option, try again.")?,
            }
        }
    }

    pub(super) fn countries_menu(&mut self) -> AppResult<()> {
        loop {
            let Some(choice) = self.menu(
                "COUNTRIES",
                &["List all", "Find by id", "Search", "Add", "Update", "Delete"],
            )?
            else {
                return Ok(());
            };

            match choice.as_str() {
                "1" => self.list_records(Repositories::countries)?,
                "2" => self.find_record(Repositories::countries)?,
                "3" => self.search_records(Repositories::countries)?,
                "4" => self.add_country()?,
                "5" => self.update_country()?,
                "6" => self.delete_record(Repositories::countries)?,
                "0" => return Ok(()),
                _ => writeln!(self.output, "Invalid option, try again.")?,
            }
        }
    }

    /// Pick a country by id, reporting an unknown one
    fn select_country(&mut self, label: &str) -> AppResult<Option<Country>> {
        let Some(country_id) = self.prompt_id(label)? else {
            return Ok(None);
        };
        let country = self.repos.countries().get_by_id(country_id);
        if country.is_none() {
            writeln!(self.output, "No country with id {}.", country_id)?;
        }
        Ok(country)
    }

    fn add_city(&mut self) -> AppResult<()> {
        let Some(name) = self.prompt("Name")? else {
            return Ok(());
        };
        let Some(country) = self.select_country("Country id")? else {
            return Ok(());
        };

        let mut city = City::new(name, country);
        let ok = self.repos.cities().create(&mut city);
        let message = format!("City created with id {}.", city.meta.id);
        self.report_outcome(ok, &message)
    }

    fn update_city(&mut self) -> AppResult<()> {
        let Some(id) = self.prompt_id("Id")? else {
            return Ok(());
        };
        let Some(mut city) = self.repos.cities().get_by_id(id) else {
            writeln!(self.output, "No city with id {}.", id)?;
            return Ok(());
        };

        let Some(name) = self.prompt_keep("Name", &city.name)? else {
            return Ok(());
        };
        let Some(country_id) = self.prompt_keep_parsed("Country id", city.country.meta.id)? else {
            return Ok(());
        };
        if country_id != city.country.meta.id {
            let Some(country) = self.repos.countries().get_by_id(country_id) else {
                writeln!(self.output, "No country with id {}.", country_id)?;
                return Ok(());
            };
            city.country = country;
        }
        city.name = name;

        let ok = self.repos.cities().update(&mut city);
        self.report_outcome(ok, "City updated.")
    }

    fn cities_of_country(&mut self) -> AppResult<()> {
        let Some(country_id) = self.prompt_id("Country id")? else {
            return Ok(());
        };
        let cities = self.repos.cities().cities_by_country(country_id);
        self.print_records(&cities)
    }

    fn city_statistics(&mut self) -> AppResult<()> {
        let stats = self.repos.cities().statistics();

        writeln!(self.output, "Total cities: {}", stats.total_cities)?;
        for entry in &stats.by_country {
            writeln!(self.output, "  {}: {}", entry.country, entry.city_count)?;
        }
        Ok(())
    }

    fn add_country(&mut self) -> AppResult<()> {
        let Some(name) = self.prompt("Name")? else {
            return Ok(());
        };

        let mut country = Country::new(name);
        let ok = self.repos.countries().create(&mut country);
        let message = format!("Country created with id {}.", country.meta.id);
        self.report_outcome(ok, &message)
    }

    fn update_country(&mut self) -> AppResult<()> {
        let Some(id) = self.prompt_id("Id")? else {
            return Ok(());
        };
        let Some(mut country) = self.repos.countries().get_by_id(id) else {
            writeln!(self.output, "No country with id {}.", id)?;
            return Ok(());
        };
        let Some(name) = self.prompt_keep("Name", &country.name)? else {
            return Ok(());
        };

        country.name = name;
        let ok = self.repos.countries().update(&mut country);
        self.report_outcome(ok, "Country updated.")
    }
}

#[cfg(test)]
mod tests {
    use crate::console::tests::{seeded, session};

    #[test]
    fn test_add_city_in_known_country() {
        let db = seeded();
        let out = session(&db, "7\n4\nOsaka\n3\n7\n3\n0\n0\n");

        assert!(out.contains("City created with id 5."));
        assert!(out.contains("#5 Osaka (Japan)"));
    }

    #[test]
    fn test_add_city_in_unknown_country() {
        let db = seeded();
        let out = session(&db, "7\n4\nAtlantis\n999\n0\n0\n");
        assert!(out.contains("No country with id 999."));
    }

    #[test]
    fn test_move_city_to_other_country() {
        let db = seeded();
        let out = session(&db, "7\n5\n2\n\n1\n2\n2\n0\n0\n");

        assert!(out.contains("City updated."));
        assert!(out.contains("#2 Woodridge (Canada)"));
    }

    #[test]
    fn test_country_in_use_is_not_deleted() {
        let db = seeded();
        let out = session(&db, "8\n6\n1\ny\n0\n0\n");
        assert!(out.contains("Operation failed. See the log for details."));
    }

    #[test]
    fn test_country_lifecycle() {
        let db = seeded();
        let out = session(&db, "8\n4\nPeru\n5\n4\nPerú\n6\n4\ny\n1\n0\n0\n");

        assert!(out.contains("Country created with id 4."));
        assert!(out.contains("Country updated."));
        assert!(out.contains("Delete #4 Perú?"));
        assert!(out.contains("Deleted."));
        assert!(out.contains("(3 records)"));
    }

    #[test]
    fn test_city_statistics() {
        let db = seeded();
        let out = session(&db, "7\n8\n0\n0\n");

        assert!(out.contains("Total cities: 4"));
        assert!(out.contains("  Canada: 2"));
    }
}
