use serde::Deserialize;

// --- Social mirror API payloads ---

/// Envelope returned by the mirror API for a status lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct MirrorResponse {
    pub code: Option<u16>,
    pub message: Option<String>,
    pub tweet: Option<MirrorPost>,
}

/// A single post as rendered by the mirror.
#[derive(Debug, Clone, Deserialize)]
pub struct MirrorPost {
    pub text: Option<String>,
    pub author: Option<MirrorAuthor>,
    pub media: Option<MirrorMedia>,
}

/// Author info nested inside a post.
#[derive(Debug, Clone, Deserialize)]
pub struct MirrorAuthor {
    pub name: Option<String>,
    pub screen_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MirrorMedia {
    pub photos: Option<Vec<MirrorPhoto>>,
    pub videos: Option<Vec<MirrorVideo>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MirrorPhoto {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MirrorVideo {
    pub thumbnail_url: Option<String>,
}

impl MirrorPost {
    pub fn content(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    /// Display name, else handle, else empty.
    pub fn author_label(&self) -> &str {
        let Some(author) = self.author.as_ref() else {
            return "";
        };
        non_blank(author.name.as_deref())
            .or_else(|| non_blank(author.screen_name.as_deref()))
            .unwrap_or_default()
    }

    /// First photo URL, else first video thumbnail, else empty.
    pub fn preview_image(&self) -> &str {
        let Some(media) = self.media.as_ref() else {
            return "";
        };
        let photo = media
            .photos
            .as_deref()
            .and_then(|p| p.first())
            .and_then(|p| non_blank(p.url.as_deref()));
        let thumbnail = || {
            media
                .videos
                .as_deref()
                .and_then(|v| v.first())
                .and_then(|v| non_blank(v.thumbnail_url.as_deref()))
        };
        photo.or_else(thumbnail).unwrap_or_default()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
