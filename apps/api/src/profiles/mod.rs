// User skill profiles: storage behind a trait, plus the HTTP surface over it.
// The roadmap pipeline never touches the store; handlers wire the two together.

pub mod handlers;
pub mod requests;
pub mod store;
