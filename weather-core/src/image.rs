//! Decorative image links for weather cards.

use reqwest::Url;

pub const DEFAULT_IMAGE_BASE: &str = "https://image.pollinations.ai";
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://via.placeholder.com/800x600?text=Image+Not+Available";

/// Build the image-generation URL for a location and its weather description.
///
/// The URL is never fetched here; a client renders it directly. If the result
/// is not a valid URL the placeholder is returned instead.
pub fn image_url(base: &str, location: &str, description: &str) -> String {
    let prompt = format!("{location} cityscape, {description}, professional photograph");
    let candidate = format!(
        "{}/prompt/{}?width=800&height=600&nologo=true",
        base.trim_end_matches('/'),
        urlencoding::encode(&prompt)
    );

    match Url::parse(&candidate) {
        Ok(_) => candidate,
        Err(err) => {
            tracing::warn!(%err, base, "Could not build image URL, using placeholder");
            PLACEHOLDER_IMAGE_URL.to_string()
        }
    }
}
