use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::ContentBundle;

/// Resolution result, shared between the local and HTTP providers. An
/// invalid pincode is not an error: it comes back as `success = false` with
/// a human-readable message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ContentBundle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ContentResponse {
    fn denied(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    fn granted(data: ContentBundle) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}

/// A local content manifest: the pincode allow-list plus the bundle it
/// unlocks. Pincodes may be authored as numbers or strings.
#[derive(Debug, Deserialize)]
struct Manifest {
    pincode: Pincode,
    content: ContentBundle,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Pincode {
    Number(u64),
    Text(String),
}

impl Pincode {
    fn matches(&self, entered: &str) -> bool {
        match self {
            Pincode::Number(n) => entered.trim().parse::<u64>() == Ok(*n),
            Pincode::Text(s) => s.trim() == entered.trim(),
        }
    }
}

/// Resolve a pincode against a content source: a manifest file on disk, or
/// an HTTP endpoint that answers `POST {"pincode": ...}` with a
/// `ContentResponse`. Transport failures are folded into a denied response
/// rather than propagated.
pub fn resolve(source: &str, pincode: &str) -> ContentResponse {
    if is_remote(source) {
        resolve_remote(source, pincode)
    } else {
        match resolve_local(Path::new(source), pincode) {
            Ok(response) => response,
            Err(e) => {
                log::error!("content resolution failed: {e:#}");
                ContentResponse::denied(format!("Failed to fetch content: {e}"))
            }
        }
    }
}

pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

fn resolve_remote(url: &str, pincode: &str) -> ContentResponse {
    let payload = serde_json::json!({ "pincode": pincode });
    match ureq::post(url).send_json(&payload) {
        Ok(mut response) => match response.body_mut().read_json::<ContentResponse>() {
            Ok(parsed) => parsed,
            Err(e) => {
                log::error!("malformed provider response from {url}: {e}");
                ContentResponse::denied("Failed to fetch content: malformed response")
            }
        },
        Err(e) => {
            log::error!("provider request to {url} failed: {e}");
            ContentResponse::denied(format!("Failed to fetch content: {e}"))
        }
    }
}

fn resolve_local(path: &Path, pincode: &str) -> Result<ContentResponse> {
    let manifest = read_manifest(path)?;
    if manifest.pincode.matches(pincode) {
        Ok(ContentResponse::granted(manifest.content))
    } else {
        Ok(ContentResponse::denied("Invalid pincode"))
    }
}

fn read_manifest(path: &Path) -> Result<Manifest> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    parse_by_extension(path, &raw)
}

fn parse_by_extension<T: serde::de::DeserializeOwned>(path: &Path, raw: &str) -> Result<T> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let parsed = match ext.as_str() {
        "json" => serde_json::from_str(raw)
            .with_context(|| format!("invalid JSON in {}", path.display()))?,
        _ => serde_yaml::from_str(raw)
            .with_context(|| format!("invalid YAML in {}", path.display()))?,
    };
    Ok(parsed)
}

/// Load the bundle from a local source without checking its pincode, for
/// offline inspection (`validate`, `preload`). Accepts both a manifest and
/// a bare bundle file.
pub fn load_bundle_for_inspection(path: &Path) -> Result<ContentBundle> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    if let Ok(manifest) = parse_by_extension::<Manifest>(path, &raw) {
        return Ok(manifest.content);
    }
    parse_by_extension::<ContentBundle>(path, &raw)
}
