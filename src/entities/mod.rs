//! Domain records served by the news backend

pub mod article;
pub mod company;

pub use article::{Article, Feed, ReadingLevel};
pub use company::{Company, CompanyDraft, CompanyStatus};
