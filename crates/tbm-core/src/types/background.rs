use serde::{Deserialize, Serialize};

use super::message::Document;
use crate::decode::tagged_union;

/// Service payload for "chat background set".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatBackground {
    #[serde(rename = "type")]
    pub kind: BackgroundType,
}

tagged_union! {
    pub enum BackgroundType in "type" {
        "fill" => Fill(BackgroundTypeFill),
        "wallpaper" => Wallpaper(BackgroundTypeWallpaper),
        "pattern" => Pattern(BackgroundTypePattern),
        "chat_theme" => ChatTheme(BackgroundTypeChatTheme),
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackgroundTypeFill {
    pub fill: BackgroundFill,
    pub dark_theme_dimming: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackgroundTypeWallpaper {
    pub document: Document,
    pub dark_theme_dimming: u8,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_blurred: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_moving: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackgroundTypePattern {
    pub document: Document,
    pub fill: BackgroundFill,
    pub intensity: u8,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_inverted: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_moving: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackgroundTypeChatTheme {
    pub theme_name: String,
}

tagged_union! {
    /// Colors are RGB24 integers.
    pub enum BackgroundFill in "type" {
        "solid" => Solid(BackgroundFillSolid),
        "gradient" => Gradient(BackgroundFillGradient),
        "freeform_gradient" => FreeformGradient(BackgroundFillFreeformGradient),
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackgroundFillSolid {
    pub color: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackgroundFillGradient {
    pub top_color: u32,
    pub bottom_color: u32,
    pub rotation_angle: u16,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackgroundFillFreeformGradient {
    pub colors: Vec<u32>,
}
