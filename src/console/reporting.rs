// src/console/reporting.rs
//
// Custom queries are shown on screen, reports can also be exported.

use std::io::{BufRead, Write};

use log::error;

use super::{Console, FAILURE};
use crate::error::AppResult;
use crate::reports::{export_report, ExportFormat, QueryResult, Report};

impl<R: BufRead, W: Write> Console<R, W> {
    pub(super) fn custom_queries_menu(&mut self) -> AppResult<()> {
        loop {
            let Some(choice) = self.menu(
                "CUSTOM QUERIES",
                &[
                    Report::TopRentedFilms.title(),
                    Report::TopCustomers.title(),
                    Report::RevenueByCategory.title(),
                    Report::FilmsByActor(0).title(),
                    Report::CustomersByCountry.title(),
                ],
            )?
            else {
                return Ok(());
            };

            let report = match choice.as_str() {
                "1" => Report::TopRentedFilms,
                "2" => Report::TopCustomers,
                "3" => Report::RevenueByCategory,
                "4" => {
                    let Some(actor_id) = self.prompt_id("Actor id")? else {
                        continue;
                    };
                    Report::FilmsByActor(actor_id)
                }
                "5" => Report::CustomersByCountry,
                "0" => return Ok(()),
                _ => {
                    writeln!(self.output, "Invalid option, try again.")?;
                    continue;
                }
            };

            self.run_report(report)?;
        }
    }

    pub(super) fn reports_menu(&mut self) -> AppResult<()> {
        let titles: Vec<&str> = Report::REPORTS.iter().map(|report| report.title()).collect();

        loop {
            let Some(choice) = self.menu("REPORTS", &titles)? else {
                return Ok(());
            };
            if choice == "0" {
                return Ok(());
            }

            let report = choice
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|idx| Report::REPORTS.get(idx).copied());
            let Some(report) = report else {
                writeln!(self.output, "Invalid option, try again.")?;
                continue;
            };

            if let Some(result) = self.run_report(report)? {
                self.offer_export(report, &result)?;
            }
        }
    }

    /// Run and print a report. A failed query is logged and yields `None`.
    fn run_report(&mut self, report: Report) -> AppResult<Option<QueryResult>> {
        let result = match report.run(&self.conn) {
            Ok(result) => result,
            Err(err) => {
                error!("Report '{}' failed: {}", report.title(), err);
                writeln!(self.output, "{}", FAILURE)?;
                return Ok(None);
            }
        };

        writeln!(self.output)?;
        writeln!(self.output, "--- {} ---", report.title())?;
        if result.is_empty() {
            writeln!(self.output, "No rows.")?;
        } else {
            write!(self.output, "{}", result.render_table())?;
        }
        Ok(Some(result))
    }

    fn offer_export(&mut self, report: Report, result: &QueryResult) -> AppResult<()> {
        let Some(choice) = self.prompt("Export? (1. CSV, 2. JSON, 0. No)")? else {
            return Ok(());
        };
        let format = match choice.as_str() {
            "1" => ExportFormat::Csv,
            "2" => ExportFormat::Json,
            _ => return Ok(()),
        };

        match export_report(result, format, &self.report_dir, report.file_base()) {
            Ok(path) => writeln!(self.output, "Report saved to {}", path.display())?,
            Err(err) => {
                error!("Export of '{}' failed: {}", report.title(), err);
                writeln!(self.output, "{}", FAILURE)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::console::tests::{seeded, session};
    use crate::console::Console;
    use crate::repositories::CacheSettings;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_custom_query_prints_table() {
        let db = seeded();
        let out = session(&db, "5\n3\n0\n0\n");

        assert!(out.contains("--- Revenue by category ---"));
        assert!(out.contains("category"));
        assert!(out.contains("Documentary"));
        assert!(out.contains("8.97"));
    }

    #[test]
    fn test_films_by_actor_asks_for_actor() {
        let db = seeded();
        let out = session(&db, "5\n4\n2\n0\n0\n");
        assert!(out.contains("ADAPTATION HOLES"));

        let out = session(&db, "5\n4\n99\n0\n0\n");
        assert!(out.contains("No rows."));
    }

    #[test]
    fn test_report_export_to_csv() {
        let db = seeded();
        let dir = TempDir::new().unwrap();
        let mut console = Console::new(
            Cursor::new(b"6\n1\n1\n0\n0\n".to_vec()),
            Vec::new(),
            db.connection(),
            CacheSettings::default(),
            dir.path().join("reports"),
        );
        console.run().unwrap();
        let out = String::from_utf8(console.into_output()).unwrap();

        assert!(out.contains("--- Films by category ---"));
        assert!(out.contains("Report saved to"));

        let files: Vec<_> = std::fs::read_dir(dir.path().join("reports"))
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(files.len(), 1);
        let name = files[0].file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("films_by_category_"));
        assert!(name.ends_with(".csv"));
        let content = std::fs::read_to_string(&files[0]).unwrap();
        assert!(content.starts_with("name,total\n"));
        assert!(content.contains("Action,2\n"));
    }

    #[test]
    fn test_report_without_export() {
        let db = seeded();
        let out = session(&db, "6\n3\n0\n0\n0\n");

        assert!(out.contains("--- Revenue by month ---"));
        assert!(!out.contains("Report saved to"));
    }
}
