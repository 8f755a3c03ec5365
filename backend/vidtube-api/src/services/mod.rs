/// Business-logic helpers shared by handlers
pub mod media;
