use serde::{Deserialize, Deserializer, Serialize};

/// Archive image service used when a record carries no explicit thumbnail.
pub const THUMBNAIL_SERVICE: &str = "https://archive.org/services/img";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub identifier: String,
    #[serde(default, deserialize_with = "text")]
    pub title: String,
    #[serde(default, deserialize_with = "opt_text")]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub stars: Option<f64>,
    #[serde(default)]
    pub num_reviews: Option<u64>,
    #[serde(default)]
    pub files_count: Option<u64>,
}

impl Collection {
    pub fn thumbnail(&self) -> String {
        thumbnail_or_fallback(self.thumbnail_url.as_deref(), &self.identifier)
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.identifier
        } else {
            &self.title
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackUrl {
    #[serde(default = "unknown_format")]
    pub format: String,
    #[serde(default)]
    pub url: String,
}

fn unknown_format() -> String {
    "Unknown".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub identifier: String,
    #[serde(default, deserialize_with = "text")]
    pub title: String,
    #[serde(default, deserialize_with = "opt_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub creator: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub date: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub playback_urls: Vec<PlaybackUrl>,
    /// Archive `subject` values, de-duplicated in first-seen order.
    #[serde(default, rename = "subject", deserialize_with = "string_set")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "string_set")]
    pub collection: Vec<String>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl Video {
    pub fn thumbnail(&self) -> String {
        thumbnail_or_fallback(self.thumbnail_url.as_deref(), &self.identifier)
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.identifier
        } else {
            &self.title
        }
    }

    /// The source a player should open first.
    pub fn primary_playback_url(&self) -> Option<&str> {
        self.playback_urls
            .iter()
            .map(|p| p.url.as_str())
            .find(|u| !u.is_empty())
    }

    pub fn published(&self) -> Option<time::Date> {
        self.date.as_deref().and_then(parse_archive_date)
    }
}

/// Body of the collection-list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionListing {
    #[serde(rename = "numFound")]
    pub num_found: u64,
    pub docs: Vec<Collection>,
}

/// Body of the per-collection video endpoint.
///
/// The backend names the item array `films`; some responses only carry `docs`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoListing {
    #[serde(default, deserialize_with = "opt_text")]
    pub title: Option<String>,
    #[serde(default)]
    pub films: Option<Vec<Video>>,
    #[serde(default)]
    pub docs: Option<Vec<Video>>,
}

impl VideoListing {
    pub fn into_videos(self) -> Vec<Video> {
        match self.films {
            Some(films) if !films.is_empty() => films,
            _ => self.docs.unwrap_or_default(),
        }
    }
}

fn thumbnail_or_fallback(explicit: Option<&str>, identifier: &str) -> String {
    match explicit {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => format!(
            "{}/{}",
            THUMBNAIL_SERVICE,
            urlencoding::encode(identifier)
        ),
    }
}

/// Archive dates show up as RFC 3339 timestamps or bare `YYYY-MM-DD` (sometimes
/// followed by more text).
pub fn parse_archive_date(raw: &str) -> Option<time::Date> {
    let raw = raw.trim();
    if let Ok(dt) = time::OffsetDateTime::parse(raw, &time::format_description::well_known::Rfc3339) {
        return Some(dt.date());
    }
    let head = raw.get(..10)?;
    time::Date::parse(head, time::macros::format_description!("[year]-[month]-[day]")).ok()
}

pub fn format_date(date: time::Date) -> String {
    date.format(time::macros::format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn opt_text<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<OneOrMany>::deserialize(d)?;
    Ok(v.map(|v| match v {
        OneOrMany::One(s) => s,
        OneOrMany::Many(parts) => parts.join("\n"),
    })
    .filter(|s| !s.trim().is_empty()))
}

fn text<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_text(d)?.unwrap_or_default())
}

fn string_set<'de, D>(d: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Option::<OneOrMany>::deserialize(d)? {
        None => Vec::new(),
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
    };
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for s in raw {
        let s = s.trim();
        if !s.is_empty() && !out.iter().any(|o| o == s) {
            out.push(s.to_string());
        }
    }
    Ok(out)
}
