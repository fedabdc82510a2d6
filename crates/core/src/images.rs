//! Image URL construction for the TMDB CDN.
//!
//! A full image URL is `<image base>/<size token>/<path fragment>`. The
//! size token depends on both the image category and the requested
//! size; the path fragment comes back from the API and may be null, in
//! which case there is no URL and the caller renders a placeholder.

/// What kind of image a path fragment refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageCategory {
    Poster,
    Backdrop,
    Profile,
}

/// Requested rendition size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    Small,
    Medium,
    Large,
    Original,
}

/// CDN size token for a category/size pair.
pub fn size_token(category: ImageCategory, size: ImageSize) -> &'static str {
    match (category, size) {
        (ImageCategory::Poster, ImageSize::Small) => "w185",
        (ImageCategory::Poster, ImageSize::Medium) => "w342",
        (ImageCategory::Poster, ImageSize::Large) => "w500",
        (ImageCategory::Backdrop, ImageSize::Small) => "w300",
        (ImageCategory::Backdrop, ImageSize::Medium) => "w780",
        (ImageCategory::Backdrop, ImageSize::Large) => "w1280",
        (ImageCategory::Profile, ImageSize::Small) => "w45",
        (ImageCategory::Profile, ImageSize::Medium) => "w185",
        (ImageCategory::Profile, ImageSize::Large) => "h632",
        (_, ImageSize::Original) => "original",
    }
}

/// Build the full CDN URL for an image path fragment.
///
/// Returns `None` when the API reported no image (`path` is `None`).
/// The fragment already carries its leading slash.
pub fn image_url(
    image_base_url: &str,
    category: ImageCategory,
    size: ImageSize,
    path: Option<&str>,
) -> Option<String> {
    let path = path?;
    Some(format!(
        "{}/{}{}",
        image_base_url,
        size_token(category, size),
        path
    ))
}
