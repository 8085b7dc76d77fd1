// ABOUTME: External collaborator clients
// ABOUTME: Outbound transactional email for recipe reports

mod mailer;

pub use mailer::{HttpMailer, Mailer, NoopMailer, RecipeReport};
