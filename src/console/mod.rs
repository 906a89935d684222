// src/console/mod.rs
//
// Menu-driven console
//
// PRINCIPLES:
// - Generic over input/output so sessions can be scripted in tests
// - Repositories never report errors here: a false / None / empty result
//   is shown as a generic failure, details go to the log
// - End of input leaves every menu

mod actors;
mod customers;
mod films;
mod inventory;
mod places;
mod prompt;
mod reporting;

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::db::SharedConnection;
use crate::domain::{DeleteMode, Record};
use crate::error::AppResult;
use crate::repositories::{
    ActorRepository, CacheSettings, CityRepository, CountryRepository, CustomerRepository,
    FilmRepository, InventoryRepository, RecordStore, Repository,
};

const FAILURE: &str = "Operation failed. See the log for details.";

/// One repository per kind, all on the same connection
pub struct Repositories {
    actors: ActorRepository,
    customers: CustomerRepository,
    films: FilmRepository,
    inventory: InventoryRepository,
    cities: CityRepository,
    countries: CountryRepository,
}

impl Repositories {
    pub fn sqlite(conn: SharedConnection, settings: CacheSettings) -> Self {
        Self {
            actors: ActorRepository::sqlite(conn.clone(), settings),
            customers: CustomerRepository::sqlite(conn.clone(), settings),
            films: FilmRepository::sqlite(conn.clone(), settings),
            inventory: InventoryRepository::sqlite(conn.clone(), settings),
            cities: CityRepository::sqlite(conn.clone(), settings),
            countries: CountryRepository::sqlite(conn, settings),
        }
    }

    pub fn actors(&mut self) -> &mut ActorRepository {
        &mut self.actors
    }

    pub fn customers(&mut self) -> &mut CustomerRepository {
        &mut self.customers
    }

    pub fn films(&mut self) -> &mut FilmRepository {
        &mut self.films
    }

    pub fn inventory(&mut self) -> &mut InventoryRepository {
        &mut self.inventory
    }

    pub fn cities(&mut self) -> &mut CityRepository {
        &mut self.cities
    }

    pub fn countries(&mut self) -> &mut CountryRepository {
        &mut self.countries
    }
}

pub struct Console<R, W> {
    input: R,
    output: W,
    repos: Repositories,
    conn: SharedConnection,
    report_dir: PathBuf,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(
        input: R,
        output: W,
        conn: SharedConnection,
        settings: CacheSettings,
        report_dir: PathBuf,
    ) -> Self {
        Self {
            input,
            output,
            repos: Repositories::sqlite(conn.clone(), settings),
            conn,
            report_dir,
        }
    }

    /// Give back the output sink (used to inspect scripted sessions)
    pub fn into_output(self) -> W {
        self.output
    }

    /// Main menu loop, until `0` or end of input
    pub fn run(&mut self) -> AppResult<()> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "===== SAKILA DATABASE =====")?;
            writeln!(self.output, "1. Actors")?;
            writeln!(self.output, "2. Customers")?;
            writeln!(self.output, "3. Films")?;
            writeln!(self.output, "4. Inventory")?;
            writeln!(self.output, "5. Custom queries")?;
            writeln!(self.output, "6. Reports")?;
            writeln!(self.output, "7. Cities")?;
            writeln!(self.output, "8. Countries")?;
            writeln!(self.output, "0. Exit")?;

            let Some(choice) = self.prompt("Select an option")? else {
                return Ok(());
            };

            match choice.as_str() {
                "1" => self.actors_menu()?,
                "2" => self.customers_menu()?,
                "3" => self.films_menu()?,
                "4" => self.inventory_menu()?,
                "5" => self.custom_queries_menu()?,
                "6" => self.reports_menu()?,
                "7" => self.cities_menu()?,
                "8" => self.countries_menu()?,
                "0" => {
                    writeln!(self.output, "Goodbye.")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid option, try again.")?,
            }
        }
    }

    /// Print a submenu and read the choice. `None` at end of input.
    fn menu(&mut self, title: &str, options: &[&str]) -> AppResult<Option<String>> {
        writeln!(self.output)?;
        writeln!(self.output, "=== {} ===", title)?;
        for (idx, option) in options.iter().enumerate() {
            writeln!(self.output, "{}. {}", idx + 1, option)?;
        }
        writeln!(self.output, "0. Back")?;
        self.prompt("Select an option")
    }

    fn print_records<T: Display>(&mut self, records: &[T]) -> AppResult<()> {
        if records.is_empty() {
            writeln!(self.output, "No records found.")?;
            return Ok(());
        }
        for record in records {
            writeln!(self.output, "{}", record)?;
        }
        writeln!(self.output, "({} records)", records.len())?;
        Ok(())
    }

    fn report_outcome(&mut self, ok: bool, success: &str) -> AppResult<()> {
        if ok {
            writeln!(self.output, "{}", success)?;
        } else {
            writeln!(self.output, "{}", FAILURE)?;
        }
        Ok(())
    }

    fn list_records<T, S>(
        &mut self,
        select: fn(&mut Repositories) -> &mut Repository<T, S>,
    ) -> AppResult<()>
    where
        T: Record + Display + 'static,
        S: RecordStore<T>,
    {
        let records = select(&mut self.repos).get_all();
        self.print_records(&records)
    }

    fn find_record<T, S>(
        &mut self,
        select: fn(&mut Repositories) -> &mut Repository<T, S>,
    ) -> AppResult<()>
    where
        T: Record + Display + 'static,
        S: RecordStore<T>,
    {
        let Some(id) = self.prompt_id("Id")? else {
            return Ok(());
        };
        match select(&mut self.repos).get_by_id(id) {
            Some(record) => writeln!(self.output, "{}", record)?,
            None => writeln!(self.output, "No {} with id {}.", T::KIND, id)?,
        }
        Ok(())
    }

    fn search_records<T, S>(
        &mut self,
        select: fn(&mut Repositories) -> &mut Repository<T, S>,
    ) -> AppResult<()>
    where
        T: Record + Display + 'static,
        S: RecordStore<T>,
    {
        let Some(line) = self.prompt("Search terms (space separated)")? else {
            return Ok(());
        };
        let terms: Vec<&str> = line.split_whitespace().collect();
        if terms.is_empty() {
            writeln!(self.output, "Enter at least one term.")?;
            return Ok(());
        }
        let records = select(&mut self.repos).search(&terms);
        self.print_records(&records)
    }

    fn delete_record<T, S>(
        &mut self,
        select: fn(&mut Repositories) -> &mut Repository<T, S>,
    ) -> AppResult<()>
    where
        T: Record + Display + 'static,
        S: RecordStore<T>,
    {
        let Some(id) = self.prompt_id("Id")? else {
            return Ok(());
        };
        let Some(record) = select(&mut self.repos).get_by_id(id) else {
            writeln!(self.output, "No {} with id {}.", T::KIND, id)?;
            return Ok(());
        };

        let verb = match T::DELETE_MODE {
            DeleteMode::Hard => "Delete",
            DeleteMode::Soft => "Deactivate",
        };
        if !self.confirm(&format!("{} {}?", verb, record))? {
            writeln!(self.output, "Cancelled.")?;
            return Ok(());
        }

        let ok = select(&mut self.repos).delete(id);
        let done = match T::DELETE_MODE {
            DeleteMode::Hard => "Deleted.",
            DeleteMode::Soft => "Deactivated.",
        };
        self.report_outcome(ok, done)
    }
}
