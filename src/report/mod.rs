pub mod csv;
pub mod format;
pub mod match_card;
pub mod table;
