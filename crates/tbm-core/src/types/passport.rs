use serde::{Deserialize, Serialize};

use crate::decode::tagged_union;

tagged_union! {
    /// An error in Telegram Passport data submitted by a user, discriminated
    /// by `source`. Every payload also names the element `type` it refers to.
    pub enum PassportElementError in "source" {
        "data" => DataField(PassportElementErrorDataField),
        "front_side" => FrontSide(PassportElementErrorFile),
        "reverse_side" => ReverseSide(PassportElementErrorFile),
        "selfie" => Selfie(PassportElementErrorFile),
        "file" => File(PassportElementErrorFile),
        "files" => Files(PassportElementErrorFiles),
        "translation_file" => TranslationFile(PassportElementErrorFile),
        "translation_files" => TranslationFiles(PassportElementErrorFiles),
        "unspecified" => Unspecified(PassportElementErrorUnspecified),
    }
}

impl PassportElementError {
    pub fn message(&self) -> &str {
        match self {
            PassportElementError::DataField(e) => &e.message,
            PassportElementError::FrontSide(e)
            | PassportElementError::ReverseSide(e)
            | PassportElementError::Selfie(e)
            | PassportElementError::File(e)
            | PassportElementError::TranslationFile(e) => &e.message,
            PassportElementError::Files(e) | PassportElementError::TranslationFiles(e) => {
                &e.message
            }
            PassportElementError::Unspecified(e) => &e.message,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassportElementErrorDataField {
    #[serde(rename = "type")]
    pub kind: String,
    pub field_name: String,
    pub data_hash: String,
    pub message: String,
}

/// Shared by every single-file source (front side, selfie, ...).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassportElementErrorFile {
    #[serde(rename = "type")]
    pub kind: String,
    pub file_hash: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassportElementErrorFiles {
    #[serde(rename = "type")]
    pub kind: String,
    pub file_hashes: Vec<String>,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassportElementErrorUnspecified {
    #[serde(rename = "type")]
    pub kind: String,
    pub element_hash: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::decode::{assert_round_trips, FromWire};

    #[test]
    fn shared_payload_keeps_its_source() {
        let selfie = PassportElementError::Selfie(PassportElementErrorFile {
            kind: "passport".to_string(),
            file_hash: "abc".to_string(),
            message: "blurry".to_string(),
        });
        let encoded = serde_json::to_value(&selfie).unwrap();
        assert_eq!(
            encoded,
            json!({"source": "selfie", "type": "passport", "file_hash": "abc", "message": "blurry"})
        );
        let decoded = PassportElementError::from_wire(encoded).unwrap();
        assert_eq!(decoded.variant_name(), "Selfie");
        assert_eq!(decoded.message(), "blurry");
    }

    #[test]
    fn every_source_round_trips() {
        let file = |source: &str| {
            json!({"source": source, "type": "passport", "file_hash": "h", "message": "m"})
        };
        let files = |source: &str| {
            json!({"source": source, "type": "passport", "file_hashes": ["a", "b"], "message": "m"})
        };
        assert_round_trips(
            PassportElementError::table(),
            vec![
                json!({"source": "data", "type": "passport", "field_name": "number",
                    "data_hash": "d", "message": "m"}),
                file("front_side"),
                file("reverse_side"),
                file("selfie"),
                file("file"),
                files("files"),
                file("translation_file"),
                files("translation_files"),
                json!({"source": "unspecified", "type": "passport", "element_hash": "e", "message": "m"}),
            ],
        );
    }
}
