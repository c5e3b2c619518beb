use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::message::{MessageEntity, ParseMode};
use crate::{
    decode::{tagged_union, wire_record},
    ids::{FileId, FileUniqueId, Seconds},
};

/// A file reference in an outgoing request.
///
/// On the wire this is a bare string: an `http(s)://` URL, an
/// `attach://<name>` reference to a multipart part, or a file id already on
/// the server.
const URL_SCHEMES: [&str; 3] = ["http://", "https://", "attach://"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputFile {
    Url(String),
    Id(FileId),
}

impl InputFile {
    /// `None` unless `url` starts with `http://`, `https://` or `attach://`;
    /// anything else reads back from the wire as a file id.
    pub fn url(url: impl Into<String>) -> Option<Self> {
        match InputFile::classify(url.into()) {
            url @ InputFile::Url(_) => Some(url),
            InputFile::Id(_) => None,
        }
    }

    pub fn id(id: FileId) -> Self {
        InputFile::Id(id)
    }

    pub fn as_wire(&self) -> &str {
        match self {
            InputFile::Url(url) => url,
            InputFile::Id(id) => id.as_str(),
        }
    }

    fn classify(raw: String) -> Self {
        let is_url = URL_SCHEMES
            .iter()
            .any(|scheme| raw.starts_with(scheme));
        if is_url {
            InputFile::Url(raw)
        } else {
            InputFile::Id(FileId::new(raw))
        }
    }
}

impl fmt::Display for InputFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFile::Url(url) => f.write_str(url),
            InputFile::Id(id) => write!(f, "{id}"),
        }
    }
}

impl Serialize for InputFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for InputFile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(InputFile::classify)
    }
}

impl From<FileId> for InputFile {
    fn from(id: FileId) -> Self {
        InputFile::Id(id)
    }
}

tagged_union! {
    /// One item of a `sendMediaGroup` album.
    pub enum InputMedia in "type" {
        "photo" => Photo(InputMediaPhoto),
        "video" => Video(InputMediaVideo),
        "animation" => Animation(InputMediaAnimation),
        "audio" => Audio(InputMediaAudio),
        "document" => Document(InputMediaDocument),
    }
}

impl InputMedia {
    pub fn media(&self) -> &InputFile {
        match self {
            InputMedia::Photo(m) => &m.media,
            InputMedia::Video(m) => &m.media,
            InputMedia::Animation(m) => &m.media,
            InputMedia::Audio(m) => &m.media,
            InputMedia::Document(m) => &m.media,
        }
    }

    pub fn photo(media: impl Into<InputFile>) -> Self {
        InputMedia::Photo(InputMediaPhoto {
            media: media.into(),
            caption: None,
            parse_mode: None,
            caption_entities: Vec::new(),
            has_spoiler: false,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputMediaPhoto {
    pub media: InputFile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub caption_entities: Vec<MessageEntity>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub has_spoiler: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputMediaVideo {
    pub media: InputFile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<InputFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Seconds>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub supports_streaming: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputMediaAnimation {
    pub media: InputFile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Seconds>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputMediaAudio {
    pub media: InputFile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Seconds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputMediaDocument {
    pub media: InputFile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disable_content_type_detection: bool,
}

/// Returned by `getFile`; `file_path` is valid for at least one hour.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub file_id: FileId,
    pub file_unique_id: FileUniqueId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

impl File {
    /// `<api_url>/file/bot<token>/<file_path>`.
    pub fn download_url(&self, api_url: &str, token: &str) -> Option<String> {
        let path = self.file_path.as_deref()?;
        Some(format!(
            "{}/file/bot{token}/{path}",
            api_url.trim_end_matches('/')
        ))
    }
}

wire_record!(File);
