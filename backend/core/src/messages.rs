//! User-facing copy, one catalogue per locale.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    En,
    Ko,
}

#[derive(Debug, Error)]
#[error("unknown locale: {0} (expected \"en\" or \"ko\")")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "english" => Ok(Locale::En),
            "ko" | "ko-kr" | "kr" | "korean" => Ok(Locale::Ko),
            other => Err(UnknownLocale(other.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => f.write_str("en"),
            Locale::Ko => f.write_str("ko"),
        }
    }
}

impl Locale {
    pub fn messages(self) -> &'static Messages {
        match self {
            Locale::En => &EN,
            Locale::Ko => &KO,
        }
    }
}

/// Every string the UI shows to the user.
#[derive(Debug)]
pub struct Messages {
    pub app_title: &'static str,
    pub app_subtitle: &'static str,
    pub input_title: &'static str,
    pub output_title: &'static str,
    pub dropzone: &'static str,
    pub accepted_types: &'static str,
    pub picker_title: &'static str,
    pub analyze: &'static str,
    pub analyzing: &'static str,
    pub loading: &'static str,
    pub error_title: &'static str,
    pub placeholder: &'static str,
    pub placeholder_detail: &'static str,
    pub no_selection: &'static str,
    pub extraction_failed: &'static str,
    pub unsupported_type: &'static str,
    pub read_failed: &'static str,
    pub oversized: &'static str,
    pub key_hints: &'static str,
}

pub static EN: Messages = Messages {
    app_title: "Gemini Image Text Extractor",
    app_subtitle: "Reads the characters and digits in an image with AI.",
    input_title: "Image input",
    output_title: "Result",
    dropzone: "Type or paste an image path below and press Enter",
    accepted_types: "PNG, JPG, WEBP (max 10MB)",
    picker_title: "Image path",
    analyze: "Start analysis",
    analyzing: "Analyzing...",
    loading: "Gemini is analyzing the image...",
    error_title: "Error",
    placeholder: "Upload an image to start the analysis.",
    placeholder_detail: "The result will appear here.",
    no_selection: "Please select an image to analyze first.",
    extraction_failed: "Something went wrong while analyzing the image. Please try again shortly.",
    unsupported_type: "Unsupported file type. Use PNG, JPG or WEBP.",
    read_failed: "Could not read that file.",
    oversized: "Larger than 10MB; the analysis may fail.",
    key_hints: "Enter: load path / analyze   Ctrl+R: analyze   Esc: quit",
};

pub static KO: Messages = Messages {
    app_title: "Gemini 이미지 텍스트 추출기",
    app_subtitle: "이미지 속 문자 및 숫자를 AI로 분석합니다.",
    input_title: "이미지 입력",
    output_title: "분석 결과",
    dropzone: "아래에 이미지 경로를 입력하고 Enter를 누르세요",
    accepted_types: "PNG, JPG, WEBP (최대 10MB)",
    picker_title: "이미지 경로",
    analyze: "분석 시작",
    analyzing: "분석 중...",
    loading: "Gemini가 이미지를 분석하고 있습니다...",
    error_title: "오류 발생",
    placeholder: "분석을 시작하려면 이미지를 업로드하세요.",
    placeholder_detail: "결과가 여기에 표시됩니다.",
    no_selection: "분석할 이미지를 먼저 선택해주세요.",
    extraction_failed: "이미지 분석 중 오류가 발생했습니다. 잠시 후 다시 시도해주세요.",
    unsupported_type: "지원하지 않는 파일 형식입니다. PNG, JPG, WEBP를 사용하세요.",
    read_failed: "파일을 읽을 수 없습니다.",
    oversized: "10MB를 초과합니다. 분석이 실패할 수 있습니다.",
    key_hints: "Enter: 경로 불러오기 / 분석   Ctrl+R: 분석   Esc: 종료",
};
