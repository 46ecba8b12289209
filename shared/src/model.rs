use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoStaticStr};

use crate::error::InputError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, EnumIter)]
pub enum AcquisitionMode {
    #[default]
    Upload,
    Camera,
}

/// Which physical camera a capture session targets. The string form is the
/// `facingMode` constraint understood by `getUserMedia`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    strum::Display,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
pub enum CameraFacing {
    #[default]
    #[strum(serialize = "user")]
    #[serde(rename = "user")]
    Front,
    #[strum(serialize = "environment")]
    #[serde(rename = "environment")]
    Back,
}

impl CameraFacing {
    pub fn toggled(self) -> Self {
        match self {
            CameraFacing::Front => CameraFacing::Back,
            CameraFacing::Back => CameraFacing::Front,
        }
    }

    pub fn facing_mode(self) -> &'static str {
        self.into()
    }

    pub fn label(self) -> &'static str {
        match self {
            CameraFacing::Front => "Front",
            CameraFacing::Back => "Back",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[display(fmt = "{}x{}", width, height)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    Upload { name: String },
    Camera(CameraFacing),
}

/// The single still image under consideration, held as a base64 data URL.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage {
    data_url: String,
    source: ImageSource,
}

const DATA_URL_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

impl SelectedImage {
    pub fn from_data_url(data_url: String, source: ImageSource) -> Result<Self, InputError> {
        let (mime, payload) = split_data_url(&data_url)?;
        if !mime.starts_with("image/") {
            return Err(InputError::UnsupportedType(mime.to_string()));
        }
        if payload.is_empty() {
            return Err(InputError::MalformedDataUrl);
        }
        Ok(Self { data_url, source })
    }

    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    pub fn mime_type(&self) -> &str {
        split_data_url(&self.data_url)
            .map(|(mime, _)| mime)
            .unwrap_or_default()
    }

    /// Raw encoded bytes of the image, as sent to the classifier.
    pub fn payload(&self) -> Result<Vec<u8>, InputError> {
        let (_, payload) = split_data_url(&self.data_url)?;
        Ok(STANDARD.decode(payload)?)
    }
}

fn split_data_url(data_url: &str) -> Result<(&str, &str), InputError> {
    let rest = data_url
        .strip_prefix(DATA_URL_PREFIX)
        .ok_or(InputError::MalformedDataUrl)?;
    let (mime, payload) = rest
        .split_once(BASE64_MARKER)
        .ok_or(InputError::MalformedDataUrl)?;
    Ok((mime, payload))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub score: f64,
}

impl Prediction {
    pub fn percentage(&self) -> f64 {
        self.score * 100.0
    }

    pub fn percentage_label(&self) -> String {
        format!("{:.1}%", self.percentage())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deref)]
pub struct PredictionList(Vec<Prediction>);

impl PredictionList {
    /// Orders by descending score; ties keep the order the server sent.
    pub fn ranked(mut predictions: Vec<Prediction>) -> Self {
        predictions.sort_by(|a, b| b.score.total_cmp(&a.score));
        Self(predictions)
    }

    pub fn top(&self) -> Option<&Prediction> {
        self.0.first()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::testing::jpeg_data_url;

    fn prediction(label: &str, score: f64) -> Prediction {
        Prediction {
            label: label.to_string(),
            score,
        }
    }

    #[test]
    fn facing_uses_media_constraint_names() {
        assert_eq!(CameraFacing::Front.facing_mode(), "user");
        assert_eq!(CameraFacing::Back.to_string(), "environment");
        assert_eq!(
            CameraFacing::from_str("environment").unwrap(),
            CameraFacing::Back
        );
        assert_eq!(CameraFacing::Front.toggled().toggled(), CameraFacing::Front);
    }

    #[test]
    fn ranked_sorts_by_descending_score() {
        let list = PredictionList::ranked(vec![
            prediction("tomato", 0.05),
            prediction("apple", 0.92),
            prediction("cherry", 0.03),
        ]);

        let labels: Vec<&str> = list.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["apple", "tomato", "cherry"]);
        assert_eq!(list.top().unwrap().percentage_label(), "92.0%");
    }

    #[test]
    fn ranked_keeps_server_order_for_ties() {
        let list = PredictionList::ranked(vec![prediction("a", 0.5), prediction("b", 0.5)]);
        assert_eq!(list[0].label, "a");
        assert_eq!(list[1].label, "b");
    }

    #[test]
    fn data_url_round_trips_payload() {
        let image = SelectedImage::from_data_url(
            jpeg_data_url(&[0xFF, 0xD8, 0xFF]),
            ImageSource::Upload {
                name: "red.jpg".into(),
            },
        )
        .unwrap();

        assert_eq!(image.mime_type(), "image/jpeg");
        assert_eq!(image.payload().unwrap(), vec![0xFF, 0xD8, 0xFF]);
    }

    #[test]
    fn rejects_non_image_data_urls() {
        let source = ImageSource::Upload {
            name: "notes.txt".into(),
        };
        assert_eq!(
            SelectedImage::from_data_url("data:text/plain;base64,aGk=".into(), source.clone()),
            Err(InputError::UnsupportedType("text/plain".into()))
        );
        assert_eq!(
            SelectedImage::from_data_url("data:image/png;base64,".into(), source.clone()),
            Err(InputError::MalformedDataUrl)
        );
        assert_eq!(
            SelectedImage::from_data_url("not a data url".into(), source),
            Err(InputError::MalformedDataUrl)
        );
    }

    #[test]
    fn empty_frame_size() {
        assert!(FrameSize::default().is_empty());
        assert!(FrameSize::new(640, 0).is_empty());
        assert!(!FrameSize::new(640, 480).is_empty());
        assert_eq!(FrameSize::new(640, 480).to_string(), "640x480");
    }
}
