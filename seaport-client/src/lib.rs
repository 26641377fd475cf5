#![deny(warnings)]
#![deny(rust_2018_idioms)]

mod client;
mod error;
mod request;
mod response;
mod seaport;

pub use reqwest::StatusCode;

pub use client::{HttpClient, HttpClientBuilder};
pub use error::{Error, Result};
pub use request::RequestBuilder;
pub use response::Response;
pub use seaport::{SeaportSettings, SeaportZoneClient};
