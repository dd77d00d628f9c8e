//! Domain records shared by the service layer, the HTTP server and the client.

pub mod errors;
pub mod site;

pub use site::{Site, SiteFields, SiteInput};
