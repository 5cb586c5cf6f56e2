pub mod chart;
pub mod forecast;
pub mod performance;
pub mod signals;

pub use chart::*;
pub use forecast::*;
pub use performance::*;
pub use signals::*;
