//! Interactive menu over a catalog.
//!
//! Input is read line by line; every prompt repeats until the answer is
//! valid. Running out of input ends the session as if Exit was chosen.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing::debug;

use super::table;
use crate::config::DisplaySettings;
use crate::domain::{Format, Item, MediaId, MediaKind, PublicationYear, DEFAULT_DISC_SIZE_MB};
use crate::library::{Catalog, RentOutcome};

const MENU: &str = "\
Menu:
1. Add Media
2. Find Media
3. Remove Media
4. Rent Media
5. Modify Media
6. Display One Media
7. Display All Media of One Type
8. Display Whole Library
9. Exit";

/// Whether the loop keeps going after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Menu session bound to a catalog, an input and an output
pub struct Menu<'a, R, W> {
    catalog: &'a mut Catalog,
    input: R,
    output: W,
    display: DisplaySettings,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(catalog: &'a mut Catalog, input: R, output: W, display: DisplaySettings) -> Self {
        Self {
            catalog,
            input,
            output,
            display,
        }
    }

    /// Run until the user exits or input ends
    pub fn run(mut self) -> Result<()> {
        if self.display.on_start {
            self.display_all()?;
        }

        loop {
            let flow = match self.step() {
                Ok(flow) => flow,
                Err(e) if is_end_of_input(&e) => {
                    debug!("Input closed");
                    self.exit()?
                }
                Err(e) => return Err(e),
            };

            if flow == Flow::Exit {
                return Ok(());
            }
        }
    }

    fn step(&mut self) -> Result<Flow> {
        writeln!(self.output, "\n{}", MENU)?;
        let choice = self.ask("Enter your choice: ")?;

        match choice.trim() {
            "1" => self.add()?,
            "2" | "6" => self.display_one()?,
            "3" => self.remove()?,
            "4" => self.rent()?,
            "5" => self.modify()?,
            "7" => self.display_kind()?,
            "8" => self.display_all()?,
            "9" => return self.exit(),
            _ => writeln!(self.output, "Invalid choice. Please try again.")?,
        }

        Ok(Flow::Continue)
    }

    fn exit(&mut self) -> Result<Flow> {
        writeln!(self.output, "Exiting...")?;
        if self.display.on_exit {
            self.display_all()?;
        }
        self.output.flush()?;
        Ok(Flow::Exit)
    }

    /// Print a prompt and read one line (without the line ending)
    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Ask until `parse` accepts the answer
    fn ask_until<T>(
        &mut self,
        prompt: &str,
        invalid: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<T> {
        loop {
            let answer = self.ask(prompt)?;
            if let Some(value) = parse(answer.trim()) {
                return Ok(value);
            }
            writeln!(self.output, "{}", invalid)?;
        }
    }

    fn ask_id(&mut self) -> Result<MediaId> {
        self.ask_until(
            "Enter Media ID (5 digits): ",
            "Invalid input. Please enter exactly 5 digits.",
            |s| s.parse().ok(),
        )
    }

    fn ask_year(&mut self) -> Result<PublicationYear> {
        self.ask_until(
            "Enter Year Published (4 digits): ",
            "Invalid input. Please enter exactly 4 digits.",
            |s| s.parse().ok(),
        )
    }

    fn ask_kind(&mut self, prompt: &str) -> Result<MediaKind> {
        self.ask_until(
            prompt,
            "Invalid input. Please enter E for Ebook, C for CD, or D for DVD.",
            |s| {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => MediaKind::from_code(c.to_ascii_uppercase()),
                    _ => None,
                }
            },
        )
    }

    fn ask_scope(&mut self, kind: MediaKind) -> Result<i32> {
        self.ask_until(
            &format!("Enter {}: ", kind.scope_label()),
            "Invalid input. Please enter a whole number.",
            |s| s.parse().ok(),
        )
    }

    fn add(&mut self) -> Result<()> {
        let id = self.ask_id()?;
        let rented = self.ask_until(
            "Enter Rent Status (0 for not rented, 1 for rented): ",
            "Invalid input. Please enter 0 for not rented or 1 for rented.",
            |s| match s {
                "0" => Some(false),
                "1" => Some(true),
                _ => None,
            },
        )?;
        let kind = self.ask_kind("Enter Media Model (E for Ebook, C for CD, D for DVD): ")?;
        let title = self.ask("Enter Title: ")?;
        let year = self.ask_year()?;
        let scope = match kind {
            MediaKind::MovieDisc => DEFAULT_DISC_SIZE_MB,
            _ => self.ask_scope(kind)?,
        };

        if self.catalog.contains(&id) {
            writeln!(
                self.output,
                "Note: media ID {} already exists; lookups will use the first entry.",
                id
            )?;
        }

        let item = Item::new(id, title.trim(), year, Format::new(kind, scope)).with_rented(rented);
        self.catalog.add(item);
        writeln!(self.output, "\nMedia added successfully.")?;
        Ok(())
    }

    fn display_one(&mut self) -> Result<()> {
        let id = self.ask_id()?;
        table::write_header(&mut self.output)?;
        match self.catalog.find(&id) {
            Some(item) => table::write_row(&mut self.output, item)?,
            None => writeln!(self.output, "Media not found.")?,
        }
        Ok(())
    }

    fn remove(&mut self) -> Result<()> {
        let id = self.ask_id()?;
        if self.catalog.remove(&id) {
            writeln!(self.output, "\nMedia removed successfully.")?;
        } else {
            writeln!(self.output, "\nMedia not found.")?;
        }
        Ok(())
    }

    fn rent(&mut self) -> Result<()> {
        let id = self.ask_id()?;
        let message = match self.catalog.rent(&id) {
            RentOutcome::Changed => "Media rental status changed to 'Rented'.",
            RentOutcome::AlreadyRented => "This media is already rented.",
            RentOutcome::NotFound => "Media not found.",
        };
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    fn modify(&mut self) -> Result<()> {
        let id = self.ask_id()?;
        let kind = match self.catalog.find(&id) {
            Some(item) => item.kind(),
            None => {
                writeln!(self.output, "Media not found.")?;
                return Ok(());
            }
        };

        let scope = match kind {
            MediaKind::MovieDisc => None,
            _ => Some(self.ask_scope(kind)?),
        };
        let year = self.ask_year()?;

        let fee = self.catalog.update(&id, scope, year)?;
        writeln!(self.output, "Rental fee updated to: {:.2}", fee)?;
        writeln!(self.output, "Media information updated.")?;
        Ok(())
    }

    fn display_kind(&mut self) -> Result<()> {
        let kind = self.ask_kind("Enter Media Type (E for Ebook, C for CD, D for DVD): ")?;
        table::write_table(&mut self.output, &self.catalog.list_by_kind(kind))?;
        Ok(())
    }

    fn display_all(&mut self) -> Result<()> {
        table::write_table(&mut self.output, &self.catalog.list())?;
        Ok(())
    }
}

fn is_end_of_input(e: &anyhow::Error) -> bool {
    e.downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == io::ErrorKind::UnexpectedEof)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn quiet() -> DisplaySettings {
        DisplaySettings {
            on_start: false,
            on_exit: false,
        }
    }

    fn run_script(catalog: &mut Catalog, script: &str) -> String {
        let mut output = Vec::new();
        Menu::new(catalog, Cursor::new(script.to_string()), &mut output, quiet())
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    fn seeded() -> Catalog {
        [
            Item::ebook("11111".parse().unwrap(), "Book", "2010".parse().unwrap(), 10),
            Item::movie_disc("33333".parse().unwrap(), "Movie", "2019".parse().unwrap(), 1),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_add_reprompts_until_valid() {
        let mut catalog = Catalog::new();
        let out = run_script(
            &mut catalog,
            "1\n123\n12345\n2\n0\nx\ne\nMy Book\n20\n2020\nten\n10\n9\n",
        );

        assert!(out.contains("Please enter exactly 5 digits."));
        assert!(out.contains("Please enter 0 for not rented or 1 for rented."));
        assert!(out.contains("Please enter E for Ebook, C for CD, or D for DVD."));
        assert!(out.contains("Please enter exactly 4 digits."));
        assert!(out.contains("Please enter a whole number."));
        assert!(out.contains("Media added successfully."));

        let item = catalog.find(&"12345".parse().unwrap()).unwrap();
        assert_eq!(item.title, "My Book");
        assert_eq!(item.kind(), MediaKind::EBook);
        assert_eq!(item.scope(), 10);
        assert!(!item.rented);
    }

    #[test]
    fn test_add_movie_disc_skips_scope_prompt() {
        let mut catalog = Catalog::new();
        let out = run_script(&mut catalog, "1\n44444\n1\nD\nHeat\n1995\n9\n");

        assert!(!out.contains("size in megabytes"));
        let item = catalog.find(&"44444".parse().unwrap()).unwrap();
        assert_eq!(item.scope(), DEFAULT_DISC_SIZE_MB);
        assert!(item.rented);
    }

    #[test]
    fn test_add_duplicate_prints_notice() {
        let mut catalog = seeded();
        let out = run_script(&mut catalog, "1\n11111\n0\nC\nAlbum\n2000\n40\n9\n");

        assert!(out.contains("already exists"));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_rent_twice() {
        let mut catalog = seeded();
        let out = run_script(&mut catalog, "4\n11111\n4\n11111\n4\n99999\n9\n");

        assert!(out.contains("Media rental status changed to 'Rented'."));
        assert!(out.contains("This media is already rented."));
        assert!(out.contains("Media not found."));
    }

    #[test]
    fn test_modify_movie_disc_only_asks_year() {
        let mut catalog = seeded();
        let out = run_script(&mut catalog, "5\n33333\n2020\n9\n");

        assert!(out.contains("Rental fee updated to: 5.00"));
        let item = catalog.find(&"33333".parse().unwrap()).unwrap();
        assert_eq!(item.scope(), 1);
        assert_eq!(item.publication_year.value(), 2020);
    }

    #[test]
    fn test_modify_ebook() {
        let mut catalog = seeded();
        let out = run_script(&mut catalog, "5\n11111\n20\n2016\n9\n");

        assert!(out.contains("Enter number of chapters: "));
        assert!(out.contains("Rental fee updated to: 4.50"));
    }

    #[test]
    fn test_remove_then_find() {
        let mut catalog = seeded();
        let out = run_script(&mut catalog, "3\n11111\n2\n11111\n9\n");

        assert!(out.contains("Media removed successfully."));
        assert!(out.contains("Media not found."));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_display_by_kind() {
        let mut catalog = seeded();
        let out = run_script(&mut catalog, "7\nd\n9\n");

        assert!(out.contains("Movie"));
        assert!(!out.contains("Book "));
    }

    #[test]
    fn test_invalid_choice_and_end_of_input() {
        let mut catalog = seeded();
        let out = run_script(&mut catalog, "42\n4\n");

        assert!(out.contains("Invalid choice. Please try again."));
        assert!(out.ends_with("Exiting...\n"));
    }

    #[test]
    fn test_display_on_exit() {
        let mut catalog = seeded();
        let mut output = Vec::new();
        let display = DisplaySettings {
            on_start: false,
            on_exit: true,
        };
        Menu::new(&mut catalog, Cursor::new("9\n"), &mut output, display)
            .run()
            .unwrap();
        let out = String::from_utf8(output).unwrap();

        let exit_at = out.find("Exiting...").unwrap();
        assert!(out[exit_at..].contains("Movie"));
    }
}
