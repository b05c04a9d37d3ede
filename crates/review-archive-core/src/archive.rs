use anyhow::{Context, Result};
use review_archive_models::Review;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Console rendering of one review, dashed separator included.
pub fn format_review(review: &Review) -> String {
    let review_date = match &review.edited_on {
        Some(edited) => format!(
            "{} (last updated: {})",
            review.posted_on.format("%Y-%m-%d"),
            edited.format("%Y-%m-%d")
        ),
        None => review.posted_on.format("%Y-%m-%d").to_string(),
    };
    let playtime = match &review.playtime_at_review {
        Some(at_review) => format!("{} (at review: {})", review.total_playtime, at_review),
        None => review.total_playtime.clone(),
    };

    format!(
        "Game: {}\nSteam Link: {} / {}\nReview Date: {}\nPlaytime: {}\nReview: {}\n{}",
        review.app_name,
        review.steam_link,
        review.review_link,
        review_date,
        playtime,
        review.content,
        "-".repeat(50),
    )
}

/// Front matter block for one review, delimiters included.
///
/// Line order is fixed; `last_updated` and `playtime_at_review` only appear
/// when the review carries them.
pub fn render_front_matter(review: &Review) -> String {
    let mut lines = vec![
        "---".to_string(),
        format!("title: \"{}\"", review.app_name),
        format!("steam_link: {}", review.steam_link),
        format!("review_link: {}", review.review_link),
        format!("date: {}", review.posted_on.format("%Y-%m-%d")),
    ];
    if let Some(edited) = &review.edited_on {
        lines.push(format!("last_updated: {}", edited.format("%Y-%m-%d")));
    }
    lines.push(format!("total_playtime: {}", review.total_playtime));
    if let Some(at_review) = &review.playtime_at_review {
        lines.push(format!("playtime_at_review: {}", at_review));
    }
    lines.push("---".to_string());
    lines.join("\n")
}

/// Write one review to `<app_id>.md` under `dir`, front matter first and the
/// body after a blank line. An existing file is overwritten.
pub fn write_review(review: &Review, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let path = dir.join(format!("{}.md", review.app_id));
    let document = format!("{}\n\n{}\n", render_front_matter(review), review.content);
    std::fs::write(&path, document)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    debug!("Wrote {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn review() -> Review {
        Review {
            app_id: 570,
            app_name: "Dota 2".to_string(),
            steam_link: "https://store.steampowered.com/app/570".to_string(),
            review_link: "https://steamcommunity.com/id/some_user/recommended/570/".to_string(),
            content: "Great game.\n\nWould **recommend**.".to_string(),
            posted_on: NaiveDate::from_ymd_opt(2014, 6, 2).unwrap(),
            edited_on: None,
            total_playtime: "100.0".to_string(),
            playtime_at_review: None,
        }
    }

    fn edited_review() -> Review {
        Review {
            edited_on: Some(NaiveDate::from_ymd_opt(2014, 6, 8).unwrap()),
            playtime_at_review: Some("4.1".to_string()),
            ..review()
        }
    }

    #[test]
    fn test_format_review_without_edit() {
        let text = format_review(&review());

        assert!(text.starts_with("Game: Dota 2\n"));
        assert!(text.contains(
            "Steam Link: https://store.steampowered.com/app/570 / https://steamcommunity.com/id/some_user/recommended/570/\n"
        ));
        assert!(text.contains("Review Date: 2014-06-02\n"));
        assert!(!text.contains("last updated"));
        assert!(text.contains("Playtime: 100.0\n"));
        assert!(text.ends_with(&"-".repeat(50)));
    }

    #[test]
    fn test_format_review_with_edit_and_review_playtime() {
        let text = format_review(&edited_review());

        assert!(text.contains("Review Date: 2014-06-02 (last updated: 2014-06-08)\n"));
        assert!(text.contains("Playtime: 100.0 (at review: 4.1)\n"));
    }

    #[test]
    fn test_front_matter_full() {
        let block = render_front_matter(&edited_review());

        assert_eq!(
            block,
            "---\n\
             title: \"Dota 2\"\n\
             steam_link: https://store.steampowered.com/app/570\n\
             review_link: https://steamcommunity.com/id/some_user/recommended/570/\n\
             date: 2014-06-02\n\
             last_updated: 2014-06-08\n\
             total_playtime: 100.0\n\
             playtime_at_review: 4.1\n\
             ---"
        );
    }

    #[test]
    fn test_write_review_skips_absent_fields_and_separates_the_body() {
        let dir = tempfile::tempdir().unwrap();

        let path = write_review(&review(), dir.path()).unwrap();

        assert_eq!(path, dir.path().join("570.md"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "---\n\
             title: \"Dota 2\"\n\
             steam_link: https://store.steampowered.com/app/570\n\
             review_link: https://steamcommunity.com/id/some_user/recommended/570/\n\
             date: 2014-06-02\n\
             total_playtime: 100.0\n\
             ---\n\
             \n\
             Great game.\n\
             \n\
             Would **recommend**.\n"
        );
    }

    #[test]
    fn test_write_review_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let first = review();
        let second = Review {
            content: "Changed my mind.".to_string(),
            ..review()
        };

        write_review(&first, dir.path()).unwrap();
        let path = write_review(&second, dir.path()).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("Changed my mind."));
        assert!(!written.contains("Great game."));
    }

    #[test]
    fn test_write_review_creates_the_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("reviews").join("steam");

        let path = write_review(&review(), &nested).unwrap();

        assert!(path.exists());
    }
}
