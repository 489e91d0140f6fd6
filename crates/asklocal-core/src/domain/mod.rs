//! Domain entities - the core business objects.

mod answer;
mod category;
mod country;
mod filter;
mod location;
mod question;
mod recommendation;
mod record;
mod user;

pub use answer::{Answer, NewAnswer};
pub use category::Category;
pub use country::Country;
pub use filter::{FilterTarget, FilterValue, Predicate, QuestionFilter};
pub use location::{Location, NewLocation};
pub use question::{NewQuestion, Question};
pub use recommendation::{NewRecommendation, Recommendation};
pub use record::{Entity, FieldValue, Record};
pub use user::{NewUser, User};

/// Minimum number of characters in a question or answer body.
pub const MIN_BODY_CHARS: usize = 20;
