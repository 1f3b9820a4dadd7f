//! Request and response body types

mod fields;
mod http_body;
mod multipart;

pub use fields::MultiValuedMap;
pub use http_body::{BodyContent, FORM_URLENCODED, HttpBody, MULTIPART_FORM_DATA};
pub use multipart::MultiPartItem;
