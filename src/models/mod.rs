mod device;
mod system;

pub use device::*;
pub use system::*;
