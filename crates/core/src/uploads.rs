//! Upload enumerations, MIME rules and storage key layout.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::types::DbId;
use crate::validation::check_one_of;

pub const ENTITY_VEHICLE: &str = "vehicle";
pub const ENTITY_EVENT: &str = "event";
pub const ENTITY_TYPES: &[&str] = &[ENTITY_VEHICLE, ENTITY_EVENT];

pub const CATEGORY_PHOTO: &str = "photo";
pub const CATEGORY_DOCUMENT: &str = "document";
pub const FILE_CATEGORIES: &[&str] = &[CATEGORY_PHOTO, CATEGORY_DOCUMENT];

pub const IMAGE_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/svg+xml",
    "image/heic",
    "image/heif",
];

pub const DOCUMENT_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "text/plain",
    "text/csv",
];

/// Largest object a client may register (50 MiB).
pub const MAX_FILE_SIZE_BYTES: i64 = 50 * 1024 * 1024;

/// Lifetime of presigned download URLs (seconds).
pub const DOWNLOAD_URL_EXPIRY_SECS: u64 = 900;

const MAX_SAFE_NAME_LEN: usize = 200;

static UNSAFE_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9._-]").expect("unsafe-chars regex is valid"));
static UNDERSCORE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_{2,}").expect("underscore regex is valid"));

pub fn check_entity_type(entity_type: &str) -> Result<(), CoreError> {
    check_one_of("entityType", entity_type, ENTITY_TYPES)
}

pub fn check_category(category: &str) -> Result<(), CoreError> {
    check_one_of("category", category, FILE_CATEGORIES)
}

/// The MIME type must be known, and must belong to the subset the
/// declared category accepts.
pub fn check_mime_for_category(mime_type: &str, category: &str) -> Result<(), CoreError> {
    let is_image = IMAGE_MIME_TYPES.contains(&mime_type);
    let is_document = DOCUMENT_MIME_TYPES.contains(&mime_type);

    if !is_image && !is_document {
        return Err(CoreError::Validation("Unsupported file type.".to_string()));
    }

    match category {
        CATEGORY_PHOTO if !is_image => Err(CoreError::Validation(format!(
            "For category \"{CATEGORY_PHOTO}\", only image MIME types are accepted."
        ))),
        CATEGORY_DOCUMENT if !is_document => Err(CoreError::Validation(format!(
            "For category \"{CATEGORY_DOCUMENT}\", only document MIME types are accepted."
        ))),
        _ => Ok(()),
    }
}

/// Make a client file name safe for use inside an object key.
pub fn sanitize_file_name(file_name: &str) -> String {
    let replaced = UNSAFE_CHARS_RE.replace_all(file_name, "_");
    let collapsed = UNDERSCORE_RUN_RE.replace_all(&replaced, "_");
    collapsed.chars().take(MAX_SAFE_NAME_LEN).collect()
}

/// Key prefix every object of an entity lives under, e.g. `vehicles/<id>/`.
pub fn entity_prefix(entity_type: &str, entity_id: DbId) -> String {
    format!("{entity_type}s/{entity_id}/")
}

/// `<entityType>s/<entityId>/<category>s/<uuid>_<safeName>`.
pub fn build_file_key(entity_type: &str, entity_id: DbId, category: &str, file_name: &str) -> String {
    format!(
        "{}{category}s/{}_{}",
        entity_prefix(entity_type, entity_id),
        uuid::Uuid::new_v4(),
        sanitize_file_name(file_name)
    )
}

/// Reject confirmations for keys that were not issued for this entity.
pub fn check_key_belongs(file_key: &str, entity_type: &str, entity_id: DbId) -> Result<(), CoreError> {
    if file_key.starts_with(&entity_prefix(entity_type, entity_id)) && !file_key.contains("..") {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "fileKey does not belong to the given entity.".to_string(),
        ))
    }
}

/// Public URL for `key`: the configured base when present, otherwise the
/// virtual-hosted AWS form.
pub fn build_public_url(public_base: Option<&str>, bucket: &str, region: &str, key: &str) -> String {
    match public_base {
        Some(base) if !base.is_empty() => format!("{}/{key}", base.trim_end_matches('/')),
        _ => format!("https://{bucket}.s3.{region}.amazonaws.com/{key}"),
    }
}
