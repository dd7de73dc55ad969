use anyhow::Context;
use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::Path;
use uuid::Uuid;

/// Teacher signature shown on the performance card. Held in memory only and
/// stored as-is; the print surface decides what it can display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureImage {
    pub id: String,
    pub file_name: String,
    pub mime: &'static str,
    pub sha256: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureMeta<'a> {
    pub id: &'a str,
    pub file_name: &'a str,
    pub mime: &'static str,
    pub sha256: &'a str,
    pub byte_len: usize,
}

impl SignatureImage {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read image {}", path.to_string_lossy()))?;
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("signature")
            .to_string();
        Ok(Self::from_bytes(file_name, bytes))
    }

    pub fn from_bytes(file_name: String, bytes: Vec<u8>) -> Self {
        let mime = sniff_mime(&bytes, &file_name);
        let sha256: String = Sha256::digest(&bytes)
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect();
        Self {
            id: Uuid::new_v4().to_string(),
            file_name,
            mime,
            sha256,
            bytes,
        }
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, B64.encode(&self.bytes))
    }

    /// Name used when the image travels inside an export bundle.
    pub fn bundle_entry_name(&self) -> String {
        format!("assets/signature.{}", extension_for(self.mime))
    }

    pub fn meta(&self) -> SignatureMeta<'_> {
        SignatureMeta {
            id: &self.id,
            file_name: &self.file_name,
            mime: self.mime,
            sha256: &self.sha256,
            byte_len: self.bytes.len(),
        }
    }
}

/// Unrecognised bytes are still handed to the renderer as an image.
const GENERIC_IMAGE_MIME: &str = "image/*";

fn sniff_mime(bytes: &[u8], file_name: &str) -> &'static str {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        return "image/png";
    }
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return "image/jpeg";
    }
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        return "image/gif";
    }
    if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return "image/webp";
    }
    if bytes.starts_with(b"BM") {
        return "image/bmp";
    }
    if bytes.starts_with(b"II*\0") || bytes.starts_with(b"MM\0*") {
        return "image/tiff";
    }
    if bytes.starts_with(&[0, 0, 1, 0]) {
        return "image/x-icon";
    }
    if bytes.len() >= 12 && &bytes[4..8] == b"ftyp" {
        match &bytes[8..12] {
            b"avif" | b"avis" => return "image/avif",
            b"heic" | b"heix" | b"mif1" => return "image/heic",
            _ => {}
        }
    }
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "ico" => "image/x-icon",
        "avif" => "image/avif",
        "heic" => "image/heic",
        _ => GENERIC_IMAGE_MIME,
    }
}

fn extension_for(mime: &str) -> &'static str {
    match mime {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/bmp" => "bmp",
        "image/svg+xml" => "svg",
        "image/tiff" => "tiff",
        "image/x-icon" => "ico",
        "image/avif" => "avif",
        "image/heic" => "heic",
        _ => "bin",
    }
}
