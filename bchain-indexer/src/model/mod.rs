mod block;
mod transaction;
mod vin;
mod vout;

pub use block::*;
pub use transaction::*;
pub use vin::*;
pub use vout::*;
