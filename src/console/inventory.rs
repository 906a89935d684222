// src/console/inventory.rs

use std::io::{BufRead, Write};

use super::{Console, Repositories};
use crate::domain::{Inventory, Store};
use crate::error::AppResult;

impl<R: BufRead, W: Write> Console<R, W> {
    pub(super) fn inventory_menu(&mut self) -> AppResult<()> {
        loop {
            let Some(choice) = self.menu(
                "INVENTORY",
                &[
                    "List",
                    "Find by id",
                    "Search by film title",
                    "Add copy",
                    "Move copy to another store",
                    "Delete",
                    "Count copies in a store",
                ],
            )?
            else {
                return Ok(());
            };

            match choice.as_str() {
                "1" => self.list_records(Repositories::inventory)?,
                "2" => self.find_record(Repositories::inventory)?,
                "3" => self.search_records(Repositories::inventory)?,
                "4" => self.add_inventory()?,
                "5" => self.move_inventory()?,
                "6" => self.delete_record(Repositories::inventory)?,
                "7" => self.count_inventory()?,
                "0" => return Ok(()),
                _ => writeln!(self.output, "Invalid option, try again.")?,
            }
        }
    }

    fn add_inventory(&mut self) -> AppResult<()> {
        let Some(film_id) = self.prompt_id("Film id")? else {
            return Ok(());
        };
        let Some(film) = self.repos.films().get_by_id(film_id) else {
            writeln!(self.output, "No film with id {}.", film_id)?;
            return Ok(());
        };
        let Some(store_id) = self.prompt_id("Store id")? else {
            return Ok(());
        };

        let mut copy = Inventory::new(film, Store::reference(store_id));
        let ok = self.repos.inventory().create(&mut copy);
        let message = format!("Inventory created with id {}.", copy.meta.id);
        self.report_outcome(ok, &message)
    }

    fn move_inventory(&mut self) -> AppResult<()> {
        let Some(id) = self.prompt_id("Id")? else {
            return Ok(());
        };
        let Some(mut copy) = self.repos.inventory().get_by_id(id) else {
            writeln!(self.output, "No inventory with id {}.", id)?;
            return Ok(());
        };
        let Some(store_id) = self.prompt_keep_parsed("Store id", copy.store.meta.id)? else {
            return Ok(());
        };

        copy.store = Store::reference(store_id);
        let ok = self.repos.inventory().update(&mut copy);
        self.report_outcome(ok, "Inventory updated.")
    }

    fn count_inventory(&mut self) -> AppResult<()> {
        let Some(store_id) = self.prompt_id("Store id")? else {
            return Ok(());
        };
        let count = self.repos.inventory().count_by_store(store_id);
        writeln!(self.output, "Store {} holds {} copies.", store_id, count)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::console::tests::{seeded, session};

    #[test]
    fn test_add_copy_of_known_film() {
        let db = seeded();
        let out = session(&db, "4\n4\n2\n2\n7\n2\n0\n0\n");

        assert!(out.contains("Inventory created with id 7."));
        assert!(out.contains("Store 2 holds 4 copies."));
    }

    #[test]
    fn test_add_copy_of_unknown_film() {
        let db = seeded();
        let out = session(&db, "4\n4\n77\n0\n0\n");
        assert!(out.contains("No film with id 77."));
    }

    #[test]
    fn test_move_copy() {
        let db = seeded();
        let out = session(&db, "4\n5\n6\n1\n7\n1\n0\n0\n");

        assert!(out.contains("Inventory updated."));
        assert!(out.contains("Store 1 holds 4 copies."));
    }

    #[test]
    fn test_search_by_title() {
        let db = seeded();
        let out = session(&db, "4\n3\nacademy\n0\n0\n");
        assert!(out.contains("(3 records)"));
    }
}
