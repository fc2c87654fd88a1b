//! `exchange-hub-common` defines the data transfer types shared by consumers
//! of the Produce Exchange Hub marketplace API.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod access_token;
pub mod culture;
pub mod model;
