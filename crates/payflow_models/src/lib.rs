//! Typed views over Payflow gateway responses.
//!
//! A gateway reply is decoded into a [`bag::ResponseBag`], then each view pulls the
//! parameters it owns out of the bag. Whatever is left over belongs to some other
//! consumer, or to nobody.

pub mod bag;
pub mod configs;
pub mod consts;
pub mod errors;
pub mod extractor;
pub mod logger;
pub mod response;
pub mod types;

pub use bag::ResponseBag;
pub use consts::ParamKey;
pub use errors::{CustomResult, DataObjectError, DomainError};
pub use extractor::ResponseView;
pub use response::{ExpressCheckoutFields, Response, ResponseShape};
