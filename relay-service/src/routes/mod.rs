pub mod books;
pub mod status;
