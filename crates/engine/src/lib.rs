pub mod document;
pub mod history;
pub mod search;
pub mod sort;
