//! Cards: runtime card values and the templates that produce them.

pub mod card;
pub mod template;

pub use card::{Card, CardId};
pub use template::{CardOverrides, CardTemplate};
