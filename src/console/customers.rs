// src/console/customers.rs
//
// Customers are deactivated rather than deleted.

use std::io::{BufRead, Write};

use super::{Console, Repositories};
use crate::domain::{Address, Customer, Store};
use crate::error::AppResult;
use crate::validation;

impl<R: BufRead, W: Write> Console<R, W> {
    pub(super) fn customers_menu(&mut self) -> AppResult<()> {
        loop {
            let Some(choice) = self.menu(
                "CUSTOMERS",
                &[
                    "List all",
                    "Find by id",
                    "Search",
                    "Add",
                    "Update",
                    "Deactivate",
                    "Rental history",
                    "Statistics",
                ],
            )?
            else {
                return Ok(());
            };

            match choice.as_str() {
                "1" => self.list_records(Repositories::customers)?,
                "2" => self.find_record(Repositories::customers)?,
                "3" => self.search_records(Repositories::customers)?,
                "4" => self.add_customer()?,
                "5" => self.update_customer()?,
                "6" => self.delete_record(Repositories::customers)?,
                "7" => self.customer_rentals()?,
                "8" => self.customer_statistics()?,
                "0" => return Ok(()),
                _ => writeln!(self.output, "Invalid option, try again.")?,
            }
        }
    }

    /// Read an optional email; a malformed one is reported and yields `None`
    fn prompt_email(&mut self, label: &str) -> AppResult<Option<Option<String>>> {
        let Some(email) = self.prompt_optional(label)? else {
            return Ok(None);
        };
        if let Some(value) = &email {
            if !validation::is_valid_email(value) {
                writeln!(self.output, "'{}' is not a valid email.", value)?;
                return Ok(None);
            }
        }
        Ok(Some(email))
    }

    fn add_customer(&mut self) -> AppResult<()> {
        let Some(store_id) = self.prompt_id("Store id")? else {
            return Ok(());
        };
        let Some(first_name) = self.prompt("First name")? else {
            return Ok(());
        };
        let Some(last_name) = self.prompt("Last name")? else {
            return Ok(());
        };
        let Some(email) = self.prompt_email("Email (optional)")? else {
            return Ok(());
        };
        let Some(address_id) = self.prompt_id("Address id")? else {
            return Ok(());
        };

        let mut customer = Customer::new(
            Store::reference(store_id),
            first_name,
            last_name,
            email,
            Address::reference(address_id, ""),
        );
        let ok = self.repos.customers().create(&mut customer);
        if ok {
            // Load the address line the store joins in.
            self.repos.customers().refresh(customer.meta.id);
        }
        let message = format!("Customer created with id {}.", customer.meta.id);
        self.report_outcome(ok, &message)
    }

    fn update_customer(&mut self) -> AppResult<()> {
        let Some(id) = self.prompt_id("Id")? else {
            return Ok(());
        };
        let Some(mut customer) = self.repos.customers().get_by_id(id) else {
            writeln!(self.output, "No customer with id {}.", id)?;
            return Ok(());
        };

        let Some(first_name) = self.prompt_keep("First name", &customer.first_name)? else {
            return Ok(());
        };
        let Some(last_name) = self.prompt_keep("Last name", &customer.last_name)? else {
            return Ok(());
        };
        let current_email = customer.email.clone().unwrap_or_default();
        let Some(email) = self.prompt_email(&format!("Email [{}]", current_email))? else {
            return Ok(());
        };
        let Some(store_id) = self.prompt_keep_parsed("Store id", customer.store.meta.id)? else {
            return Ok(());
        };
        let Some(address_id) =
            self.prompt_keep_parsed("Address id", customer.address.meta.id)?
        else {
            return Ok(());
        };

        customer.first_name = first_name;
        customer.last_name = last_name;
        if email.is_some() {
            customer.email = email;
        }
        if store_id != customer.store.meta.id {
            customer.store = Store::reference(store_id);
        }
        if address_id != customer.address.meta.id {
            customer.address = Address::reference(address_id, "");
        }

        let ok = self.repos.customers().update(&mut customer);
        if ok {
            self.repos.customers().refresh(id);
        }
        self.report_outcome(ok, "Customer updated.")
    }

    fn customer_rentals(&mut self) -> AppResult<()> {
        let Some(id) = self.prompt_id("Customer id")? else {
            return Ok(());
        };
        let rentals = self.repos.customers().rentals_of_customer(id);
        if rentals.is_empty() {
            writeln!(self.output, "No rentals found.")?;
            return Ok(());
        }

        for rental in &rentals {
            writeln!(
                self.output,
                "#{} {} {} | returned: {} | paid: {}",
                rental.rental_id,
                rental.rental_date,
                rental.film_title,
                rental.return_date.as_deref().unwrap_or("not yet"),
                rental
                    .amount
                    .map(|amount| format!("{:.2}", amount))
                    .unwrap_or_else(|| "-".to_string())
            )?;
        }
        Ok(())
    }

    fn customer_statistics(&mut self) -> AppResult<()> {
        let stats = self.repos.customers().statistics();

        writeln!(self.output, "Total customers: {}", stats.total_customers)?;
        writeln!(self.output, "Active: {}", stats.active_customers)?;
        writeln!(self.output, "Inactive: {}", stats.inactive_customers)?;
        for (store_id, count) in &stats.by_store {
            writeln!(self.output, "  store {}: {} customers", store_id, count)?;
        }
        Ok(())
    }
}
