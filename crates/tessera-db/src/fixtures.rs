//! Sample records shared by the crate's tests.

use native_db::*;
use native_model::{native_model, Model};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tessera_core::{Convertible, Record, RecordId, Relation};

pub static MODELS: LazyLock<Models> = LazyLock::new(|| {
    let mut models = Models::new();
    models.define::<Book>().unwrap();
    models.define::<Shelf>().unwrap();
    models
});

/// Child record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[native_model(id = 1, version = 1)]
#[native_db]
pub struct Book {
    #[primary_key]
    pub key: String,
    pub title: String,
    pub year: u16,
}

pub struct BookDto {
    pub title: Option<String>,
    pub year: u16,
}

impl Record for Book {
    const KIND: &'static str = "book";

    fn key(&self) -> &str {
        &self.key
    }

    fn set_key(&mut self, key: String) {
        self.key = key;
    }
}

impl Convertible for Book {
    type Dto = BookDto;

    fn convert(dto: &BookDto) -> Option<Self> {
        let title = dto.title.clone().filter(|t| !t.is_empty())?;
        Some(Self {
            key: String::new(),
            title,
            year: dto.year,
        })
    }

    fn update_from(&mut self, other: &Self) {
        self.title = other.title.clone();
        self.year = other.year;
    }
}

/// Parent record with two relationships to books.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[native_model(id = 2, version = 1)]
#[native_db]
pub struct Shelf {
    #[primary_key]
    pub key: String,
    pub name: String,
    pub books: Vec<RecordId>,
    pub featured: Vec<RecordId>,
}

pub struct ShelfDto {
    pub name: Option<String>,
}

impl Record for Shelf {
    const KIND: &'static str = "shelf";

    fn key(&self) -> &str {
        &self.key
    }

    fn set_key(&mut self, key: String) {
        self.key = key;
    }
}

impl Convertible for Shelf {
    type Dto = ShelfDto;

    fn convert(dto: &ShelfDto) -> Option<Self> {
        Some(Self {
            key: String::new(),
            name: dto.name.clone()?,
            books: Vec::new(),
            featured: Vec::new(),
        })
    }

    fn update_from(&mut self, other: &Self) {
        self.name = other.name.clone();
    }
}

pub fn shelf_books() -> Relation<Shelf, Book> {
    Relation::new("books", |s| &s.books, |s| &mut s.books)
}

pub fn shelf_featured() -> Relation<Shelf, Book> {
    Relation::new("featured", |s| &s.featured, |s| &mut s.featured)
}

pub fn book(title: &str, year: u16) -> Book {
    Book {
        key: String::new(),
        title: title.to_string(),
        year,
    }
}

pub fn book_dto(title: &str, year: u16) -> BookDto {
    BookDto {
        title: Some(title.to_string()),
        year,
    }
}

pub fn shelf_dto(name: &str) -> ShelfDto {
    ShelfDto {
        name: Some(name.to_string()),
    }
}
