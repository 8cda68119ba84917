//! 檔名解析模組
//!
//! 從原始檔名推斷電影（片名、年份）或影集（劇名、季、集、標題）身分。
//! 每個解析器都是一組有順序的樣式，第一個成功的樣式決定結果。

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// 可接受的最小電影年份
pub const MIN_MOVIE_YEAR: u16 = 1900;

/// 可接受的最大電影年份
pub const MAX_MOVIE_YEAR: u16 = 2026;

/// 電影身分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieIdentity {
    pub title: String,
    pub year: u16,
}

/// 影集單集身分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TvIdentity {
    pub show: String,
    pub season: u32,
    pub episode: u32,
    /// 單集標題，檔名沒有標題時為 `Episode {episode}`
    pub episode_title: String,
}

/// 電影檔名樣式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoviePattern {
    /// `Title.1999.1080p.mkv`：年份前後都有分隔字元
    SeparatedYear,
    /// `Title (1999).mkv`：年份可加括號，前面可不接分隔字元
    ParenthesizedYear,
}

/// 影集檔名樣式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TvPattern {
    /// `Show.S01E02.Title.mkv`
    SeasonEpisode,
    /// `Show.1x02.Title.mkv`
    CrossNotation,
}

static REGEX_BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\[\]]").expect("Invalid regex"));

static REGEX_SEPARATED_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?P<title>.+?)[. _-]+(?P<year>[0-9]{4})[. _]").expect("Invalid regex")
});

static REGEX_PARENTHESIZED_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?P<title>.+?)[. _]*\(?(?P<year>[0-9]{4})\)?[. _]").expect("Invalid regex")
});

static REGEX_SEASON_EPISODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?P<show>.+?)[. _-]+S(?P<season>[0-9]+)[. _]*E(?P<episode>[0-9]+)(?P<rest>.*?)\.[[:alnum:]]+$",
    )
    .expect("Invalid regex")
});

static REGEX_CROSS_NOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?P<show>.+?)[. _-]+(?P<season>[0-9]+)x(?P<episode>[0-9]+)(?P<rest>.*?)\.[[:alnum:]]+$",
    )
    .expect("Invalid regex")
});

/// 發行資訊標記，出現後的內容不屬於單集標題
static REGEX_RELEASE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:2160p|1080p|720p|576p|480p|4k|web-?dl|webrip|bluray|bdrip|brrip|hdtv|dvdrip|x26[45]|h\.?26[45]|hevc|xvid)\b",
    )
    .expect("Invalid regex")
});

impl MoviePattern {
    /// 依優先順序排列的所有電影樣式
    pub const ALL: [Self; 2] = [Self::SeparatedYear, Self::ParenthesizedYear];

    fn regex(self) -> &'static Regex {
        match self {
            Self::SeparatedYear => &REGEX_SEPARATED_YEAR,
            Self::ParenthesizedYear => &REGEX_PARENTHESIZED_YEAR,
        }
    }

    /// 只用此樣式解析（檔名需已移除方括號）
    ///
    /// 年份超出範圍或片名為空時視為不符合。
    #[must_use]
    pub fn parse(self, filename: &str) -> Option<MovieIdentity> {
        let captures = self.regex().captures(filename)?;
        let year: u16 = captures["year"].parse().ok()?;
        if !(MIN_MOVIE_YEAR..=MAX_MOVIE_YEAR).contains(&year) {
            return None;
        }

        let title = normalize_name(&captures["title"]);
        if title.is_empty() {
            return None;
        }

        Some(MovieIdentity { title, year })
    }
}

impl TvPattern {
    /// 依優先順序排列的所有影集樣式
    pub const ALL: [Self; 2] = [Self::SeasonEpisode, Self::CrossNotation];

    fn regex(self) -> &'static Regex {
        match self {
            Self::SeasonEpisode => &REGEX_SEASON_EPISODE,
            Self::CrossNotation => &REGEX_CROSS_NOTATION,
        }
    }

    /// 只用此樣式解析（檔名需已移除方括號）
    #[must_use]
    pub fn parse(self, filename: &str) -> Option<TvIdentity> {
        let captures = self.regex().captures(filename)?;
        extract_tv_identity(&captures)
    }
}

fn extract_tv_identity(captures: &Captures<'_>) -> Option<TvIdentity> {
    let show = normalize_name(&captures["show"]);
    if show.is_empty() {
        return None;
    }

    let season: u32 = captures["season"].parse().ok()?;
    let episode: u32 = captures["episode"].parse().ok()?;
    let episode_title = captures
        .name("rest")
        .map(|rest| normalize_episode_title(rest.as_str()))
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| format!("Episode {episode}"));

    Some(TvIdentity {
        show,
        season,
        episode,
        episode_title,
    })
}

/// 移除方括號
fn strip_brackets(filename: &str) -> String {
    REGEX_BRACKETS.replace_all(filename, "").into_owned()
}

/// 修剪前後的 `.`、`-`、空白，再將 `.`、`_` 換成空白
fn normalize_name(raw: &str) -> String {
    raw.trim_matches(['.', '-', ' '])
        .replace(['.', '_'], " ")
        .trim()
        .to_string()
}

/// 截掉發行資訊後整理單集標題
fn normalize_episode_title(raw: &str) -> String {
    let without_tags = REGEX_RELEASE_TAG
        .find(raw)
        .map_or(raw, |tag| &raw[..tag.start()]);

    normalize_name(without_tags.trim_matches(['.', '-', '_', ' ']))
}

/// 解析電影檔名，依序嘗試各樣式，第一個成功的樣式決定結果
#[must_use]
pub fn parse_movie(filename: &str) -> Option<MovieIdentity> {
    let filename = strip_brackets(filename);
    MoviePattern::ALL
        .iter()
        .find_map(|pattern| pattern.parse(&filename))
}

/// 解析影集檔名，依序嘗試各樣式，第一個成功的樣式決定結果
#[must_use]
pub fn parse_tv(filename: &str) -> Option<TvIdentity> {
    let filename = strip_brackets(filename);
    TvPattern::ALL
        .iter()
        .find_map(|pattern| pattern.parse(&filename))
}
