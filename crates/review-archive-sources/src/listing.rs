use crate::error::SourceError;
use chrono::{Datelike, NaiveDate, NaiveTime, Utc};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

/// Fields extracted from one review block, before name resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReview {
    pub app_id: u32,
    pub content: String,
    pub posted_on: NaiveDate,
    pub edited_on: Option<NaiveDate>,
    pub total_playtime: String,
    pub playtime_at_review: Option<String>,
}

static POSTED_RE: OnceLock<Regex> = OnceLock::new();
static HOURS_RE: OnceLock<Regex> = OnceLock::new();
static YEAR_RE: OnceLock<Regex> = OnceLock::new();

fn posted_re() -> &'static Regex {
    POSTED_RE.get_or_init(|| {
        Regex::new(r"Posted (?P<posted>.*?)\.(\s*Last edited (?P<edited>.*?)\.)?").unwrap()
    })
}

fn hours_re() -> &'static Regex {
    HOURS_RE.get_or_init(|| {
        Regex::new(r"(?P<total>.*?) hrs on record(\s*\((?P<at_review>.*?) hrs at review time\))?")
            .unwrap()
    })
}

fn year_re() -> &'static Regex {
    YEAR_RE.get_or_init(|| Regex::new(r"\b\d{4}\b").unwrap())
}

/// Extract every review block from one listing page.
///
/// An empty result is not an error: listing pages past the last review (and
/// profiles without reviews) simply contain no review boxes.
pub fn parse_listing_page(html: &str) -> Result<Vec<ParsedReview>, SourceError> {
    let document = Html::parse_document(html);
    let review_box = Selector::parse("div.review_box").unwrap();
    let today = Utc::now().date_naive();

    let mut reviews = Vec::new();
    for block in document.select(&review_box) {
        reviews.push(parse_review_block(block, today)?);
    }
    Ok(reviews)
}

fn parse_review_block(block: ElementRef<'_>, today: NaiveDate) -> Result<ParsedReview, SourceError> {
    let capsule = Selector::parse("a.game_capsule_ctn").unwrap();
    let posted = Selector::parse("div.posted").unwrap();
    let hours = Selector::parse("div.hours").unwrap();
    let content = Selector::parse("div.content").unwrap();

    let capsule_link = block
        .select(&capsule)
        .next()
        .ok_or_else(|| SourceError::Parse("review block has no game capsule link".to_string()))?;
    let href = capsule_link
        .value()
        .attr("href")
        .ok_or_else(|| SourceError::Parse("game capsule link has no href".to_string()))?;
    // The app id is the trailing path segment of the capsule link.
    let app_id = href
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .parse::<u32>()
        .map_err(|_| SourceError::Parse(format!("no numeric app id in capsule link {:?}", href)))?;

    let posted_text = block
        .select(&posted)
        .next()
        .ok_or_else(|| SourceError::Parse(format!("review {} has no posted date element", app_id)))?
        .text()
        .collect::<String>();
    let (posted_on, edited_on) = parse_posted_dates(posted_text.trim(), today)?;

    let hours_text = block
        .select(&hours)
        .next()
        .ok_or_else(|| SourceError::Parse(format!("review {} has no hours element", app_id)))?
        .text()
        .collect::<String>();
    let (total_playtime, playtime_at_review) = parse_playtime(hours_text.trim())?;

    let content_html = block
        .select(&content)
        .next()
        .ok_or_else(|| SourceError::Parse(format!("review {} has no content element", app_id)))?
        .inner_html();
    let content = html2md::parse_html(&content_html).trim().to_string();

    Ok(ParsedReview {
        app_id,
        content,
        posted_on,
        edited_on,
        total_playtime,
        playtime_at_review,
    })
}

/// Find exactly one match of `re` in `text`.
///
/// Zero matches and more than one match are both parse failures; a second
/// match means the markup no longer looks the way this parser assumes.
fn single_match<'t>(
    re: &Regex,
    text: &'t str,
    what: &str,
) -> Result<regex::Captures<'t>, SourceError> {
    let mut matches = re.captures_iter(text);
    let first = matches
        .next()
        .ok_or_else(|| SourceError::Parse(format!("no {} in {:?}", what, text)))?;
    if matches.next().is_some() {
        return Err(SourceError::Parse(format!("ambiguous {} in {:?}", what, text)));
    }
    Ok(first)
}

/// Parse `Posted <phrase>.( Last edited <phrase>.)?` into dates.
///
/// An edited phrase identical to the posted phrase counts as not edited;
/// Steam emits such markers for edits that changed nothing visible.
fn parse_posted_dates(
    text: &str,
    today: NaiveDate,
) -> Result<(NaiveDate, Option<NaiveDate>), SourceError> {
    let caps = single_match(posted_re(), text, "posted date")?;
    let posted_phrase = caps.name("posted").map_or("", |m| m.as_str()).trim();
    let edited_phrase = caps.name("edited").map(|m| m.as_str().trim());

    let posted_on = parse_date_phrase(posted_phrase, today)?;
    let edited_on = match edited_phrase {
        Some(phrase) if phrase != posted_phrase => Some(parse_date_phrase(phrase, today)?),
        _ => None,
    };

    Ok((posted_on, edited_on))
}

/// Parse `<total> hrs on record( (<at-review> hrs at review time))?`.
///
/// Both figures stay verbatim strings; Steam's formatting (thousands
/// separators included) is preserved as-is.
fn parse_playtime(text: &str) -> Result<(String, Option<String>), SourceError> {
    let caps = single_match(hours_re(), text, "playtime")?;
    let total = caps.name("total").map_or("", |m| m.as_str()).trim().to_string();
    let at_review = caps.name("at_review").map(|m| m.as_str().trim().to_string());
    Ok((total, at_review))
}

/// Turn a natural-language date phrase into a calendar date.
///
/// Steam omits the year on dates from the current calendar year, so phrases
/// without one get `today`'s year appended before parsing. The two formats
/// Steam actually emits are tried directly; anything else goes through the
/// lenient parser.
fn parse_date_phrase(phrase: &str, today: NaiveDate) -> Result<NaiveDate, SourceError> {
    let trimmed = phrase.trim();
    let dated = if year_re().is_match(trimmed) {
        trimmed.to_string()
    } else {
        format!("{}, {}", trimmed, today.year())
    };

    let plain = dated.replace(',', "");
    for format in ["%d %B %Y", "%B %d %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(&plain, format) {
            return Ok(date);
        }
    }

    dateparser::parse_with(&dated, &Utc, NaiveTime::MIN)
        .map(|moment| moment.date_naive())
        .map_err(|e| SourceError::Parse(format!("unrecognized date {:?}: {}", phrase, e)))
}
