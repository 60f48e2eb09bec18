pub mod io;
pub mod tad;
