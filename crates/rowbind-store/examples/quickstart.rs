//! Declare an entity, create its table, insert and read back rows.
//!
//! Run with `RUST_LOG=rowbind=debug` to see the operation events.

use rowbind_core::logging_facility::{init, Profile};
use rowbind_core::{Column, Columns, Entity, EntityBase, Value};
use rowbind_store::{connect, StoreConfig};
use std::sync::OnceLock;

struct Book {
    base: EntityBase<Book>,
    isbn: String,
    title: String,
    pages: Option<i64>,
}

impl Default for Book {
    fn default() -> Self {
        Self {
            base: EntityBase::new("books"),
            isbn: String::new(),
            title: String::new(),
            pages: None,
        }
    }
}

impl Entity for Book {
    fn declared_columns() -> &'static Columns<Self> {
        static COLUMNS: OnceLock<Columns<Book>> = OnceLock::new();
        COLUMNS.get_or_init(|| {
            let isbn = Column::<Book>::new("isbn")
                .with_doc("ISBN-13")
                .with_getter(|b| Value::from(b.isbn.as_str()))
                .with_setter(|b, v| {
                    b.isbn = v.decode()?;
                    Ok(())
                });
            let title = Column::<Book>::new("title")
                .with_getter(|b| Value::from(b.title.as_str()))
                .with_setter(|b, v| {
                    b.title = v.decode()?;
                    Ok(())
                });
            let pages = Column::<Book>::new("pages")
                .with_getter(|b| Value::from(b.pages))
                .with_setter(|b, v| {
                    b.pages = v.decode()?;
                    Ok(())
                })
                .with_deleter(|b| {
                    b.pages = None;
                    Ok(())
                });

            Columns::new()
                .declare(isbn.with_column_type(|_| "text primary key"))
                .declare(title.with_column_type(|_| "text not null"))
                .declare(pages.with_column_type(|_| "int"))
        })
    }

    fn base(&self) -> &EntityBase<Self> {
        &self.base
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init(Profile::Development);

    let db = connect(&StoreConfig::in_memory())?;
    db.create(&Book::default())?;

    for (isbn, title, pages) in [
        ("9780262510875", "Structure and Interpretation of Computer Programs", Some(657_i64)),
        ("9781593278281", "The Rust Programming Language", None),
    ] {
        let mut book = Book::default();
        book.set("isbn", isbn.into())?;
        book.set("title", title.into())?;
        book.set("pages", Value::from(pages))?;
        db.insert(&book)?;
    }

    for book in db.select::<Book>()? {
        let pages = book
            .pages
            .map_or_else(|| "?".to_string(), |p| p.to_string());
        println!("{} {} ({} pages)", book.isbn, book.title, pages);
    }

    db.close()?;
    Ok(())
}
