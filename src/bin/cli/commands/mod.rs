pub mod add;
pub mod answer;
pub mod categories;
pub mod due;
pub mod export;
pub mod import;
pub mod reset;
pub mod stats;
pub mod study;
