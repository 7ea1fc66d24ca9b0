pub mod db;
mod documents;
pub mod models;
mod subjects;
mod tables;

pub use db::{Database, DatabaseError};
pub use tables::*;
