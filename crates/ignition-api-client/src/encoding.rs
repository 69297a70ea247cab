//! Endpoint paths of the gateway API.
//!
//! All paths live under the fixed `/data/api/v1` prefix. Dynamic segments
//! (module, type, name, signature) are percent-encoded so that names with
//! spaces or reserved characters cannot alter the path structure.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Fixed prefix of every endpoint.
pub const API_PREFIX: &str = "/data/api/v1";

/// Characters that must be percent-encoded inside a path segment.
const SEGMENT_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'\\');

/// Percent-encode one path segment.
///
/// # Examples
///
/// ```
/// use ignition_api_client::encoding::encode_segment;
///
/// assert_eq!(encode_segment("main-db"), "main-db");
/// assert_eq!(encode_segment("Plant A/Line 1"), "Plant%20A%2FLine%201");
/// ```
#[must_use]
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT_ESCAPE).to_string()
}

/// `GET` path for a named resource, or for the singleton when `name` is empty.
#[must_use]
pub fn find_resource_path(module: &str, kind: &str, name: &str) -> String {
    let base = format!(
        "{API_PREFIX}/resources/find/{}/{}",
        encode_segment(module),
        encode_segment(kind)
    );
    if name.is_empty() {
        base
    } else {
        format!("{base}/{}", encode_segment(name))
    }
}

/// `POST`/`PUT` path for a resource collection.
#[must_use]
pub fn resource_collection_path(module: &str, kind: &str) -> String {
    format!(
        "{API_PREFIX}/resources/{}/{}",
        encode_segment(module),
        encode_segment(kind)
    )
}

/// `DELETE` path for one revision of a resource.
#[must_use]
pub fn delete_resource_path(module: &str, kind: &str, name: &str, signature: &str) -> String {
    format!(
        "{}/{}/{}",
        resource_collection_path(module, kind),
        encode_segment(name),
        encode_segment(signature)
    )
}

/// `GET` path for a project.
#[must_use]
pub fn find_project_path(name: &str) -> String {
    format!("{API_PREFIX}/projects/find/{}", encode_segment(name))
}

/// `POST` path for project creation.
#[must_use]
pub fn project_collection_path() -> String {
    format!("{API_PREFIX}/projects")
}

/// `PUT`/`DELETE` path for a project.
#[must_use]
pub fn project_path(name: &str) -> String {
    format!("{API_PREFIX}/projects/{}", encode_segment(name))
}

/// Secret encryption endpoint.
#[must_use]
pub fn encrypt_path() -> String {
    format!("{API_PREFIX}/encryption/encrypt")
}

/// Redundancy settings endpoint.
#[must_use]
pub fn redundancy_path() -> String {
    format!("{API_PREFIX}/redundancy/config")
}
