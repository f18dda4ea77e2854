//! Book management service

use validator::Validate;

use crate::{
    error::AppResult,
    models::book::{derive_available, Book, BookQuery, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a new book. Availability is derived from the copy count;
    /// a client-sent `available` flag is ignored.
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()?;
        let available = derive_available(book.copies);
        self.repository.books.create(&book, available).await
    }

    /// List books with filter, sorting and limit
    pub async fn list_books(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        self.repository.books.find(query).await
    }

    /// Get book by ID
    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Apply a partial update. Present fields pass the same constraints
    /// as on create; availability is then recomputed from the stored copy
    /// count and persisted as a second write.
    pub async fn update_book(&self, id: i32, update: UpdateBook) -> AppResult<Book> {
        update.validate()?;

        let mut book = self.repository.books.get_by_id(id).await?;
        if let Some(title) = update.title {
            book.title = title;
        }
        if let Some(author) = update.author {
            book.author = author;
        }
        if let Some(genre) = update.genre {
            book.genre = genre;
        }
        if let Some(isbn) = update.isbn {
            book.isbn = isbn;
        }
        if let Some(description) = update.description {
            book.description = Some(description);
        }
        if let Some(copies) = update.copies {
            book.copies = copies;
        }
        // update.available is intentionally not applied

        let mut updated = self.repository.books.update(id, &book).await?;

        let available = derive_available(updated.copies);
        self.repository.books.set_available(id, available).await?;
        updated.available = available;

        Ok(updated)
    }

    /// Delete a book, returning its last-known data
    pub async fn delete_book(&self, id: i32) -> AppResult<Book> {
        self.repository.books.delete(id).await
    }
}
