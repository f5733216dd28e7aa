pub mod clock;
pub mod error;
pub mod types;

pub use clock::{Clock, SystemClock};
#[doc(hidden)]
pub use clock::SteppingClock;
pub use error::{Result, StoreError};
pub use types::{Recipe, RecipeFields};
