pub mod washout;

pub use washout::WashoutFilter;
