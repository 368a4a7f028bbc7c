//! Interactive terminal menu and result display.

use anyhow::{Context, Result};
use colored::Colorize;
use meownime_scraper::export::{export_csv, export_json};
use meownime_scraper::AnimeScraper;
use shared::{AnimeDetail, AnimeRecord, CategorizedSet, ExportPaths, ScrapeStatistics, SessionData};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

const TITLE_WIDTH: usize = 50;
const URL_WIDTH: usize = 40;

type Input = Lines<BufReader<Stdin>>;

fn print_header() {
    println!("{}", "═".repeat(60).bright_blue().bold());
    println!("{}", "  MEOWNIME ANIME SCRAPER".bright_white().bold());
    println!("{}", "═".repeat(60).bright_blue().bold());
}

fn print_menu() {
    println!();
    println!("{}", "MENU OPTIONS".bright_cyan().bold());
    println!("  1. Scrape home page (categories)");
    println!("  2. Scrape complete anime list");
    println!("  3. Filter anime by letter");
    println!("  4. Search anime");
    println!("  5. Get anime details");
    println!("  6. Export data");
    println!("  7. Exit");
}

/// Print a prompt and read one trimmed line; `None` on end of input
async fn prompt(input: &mut Input, message: &str) -> Result<Option<String>> {
    print!("{} ", message.yellow().bold());
    std::io::stdout().flush().context("Failed to flush stdout")?;

    let line = input.next_line().await.context("Failed to read from stdin")?;
    Ok(line.map(|l| l.trim().to_string()))
}

fn error(message: &str) {
    println!("{} {}", "✗".red().bold(), message);
}

fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// A single ASCII letter, uppercased
pub fn parse_letter(input: &str) -> Option<String> {
    let mut chars = input.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_alphabetic() => Some(c.to_uppercase().to_string()),
        _ => None,
    }
}

/// Run the interactive menu until the user exits or input ends
pub async fn run(scraper: &AnimeScraper, export_paths: &ExportPaths) -> Result<()> {
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut session = SessionData::default();

    print_header();

    loop {
        print_menu();
        let Some(choice) = prompt(&mut input, "\nEnter your choice (1-7):").await? else {
            break;
        };

        match choice.as_str() {
            "1" => {
                let home = scraper.home().await;
                display_home(&home);
                session.home = Some(home);
            }
            "2" => {
                let list = scraper.anime_list(None).await;
                display_anime_list(&list, "Complete Anime List");
                session.list = Some(list);
            }
            "3" => {
                let Some(raw) = prompt(&mut input, "Enter letter (A-Z):").await? else {
                    break;
                };
                match parse_letter(&raw) {
                    Some(letter) => {
                        let list = scraper.anime_list(Some(&letter)).await;
                        display_anime_list(&list, &format!("Anime starting with '{}'", letter));
                        session.list = Some(list);
                    }
                    None => error("Please enter a valid single letter!"),
                }
            }
            "4" => {
                let Some(query) = prompt(&mut input, "Enter search term:").await? else {
                    break;
                };
                if query.is_empty() {
                    error("Please enter a search term!");
                } else {
                    let results = scraper.search(&query).await;
                    display_anime_list(&results, &format!("Search Results for '{}'", query));
                }
            }
            "5" => {
                let Some(url) = prompt(&mut input, "Enter anime URL:").await? else {
                    break;
                };
                if url.is_empty() {
                    error("Please enter a valid URL!");
                } else {
                    let details = scraper.anime_details(&url).await;
                    display_anime_details(details.as_ref());
                    if let Some(details) = details {
                        session.details.insert(url, details);
                    }
                }
            }
            "6" => {
                if !export_menu(&mut input, &session, export_paths).await? {
                    break;
                }
            }
            "7" => {
                println!("\n{}", "Thank you for using the anime scraper. Sayonara!".green().bold());
                break;
            }
            _ => error("Invalid choice! Please enter 1-7."),
        }
    }

    Ok(())
}

/// Export prompt; returns false when input ended
async fn export_menu(input: &mut Input, session: &SessionData, paths: &ExportPaths) -> Result<bool> {
    if session.is_empty() {
        error("No data to export! Please scrape some data first.");
        return Ok(true);
    }

    println!("\n{}", "EXPORT OPTIONS".bright_cyan().bold());
    println!("  1. Export to JSON");
    println!("  2. Export to CSV");

    let Some(choice) = prompt(input, "Choose export format (1-2):").await? else {
        return Ok(false);
    };

    match choice.as_str() {
        "1" => {
            let Some(stem) = prompt(input, "Enter filename (without extension):").await? else {
                return Ok(false);
            };
            let path = paths.json_file(&stem);
            match export_json(&path, session) {
                Ok(()) => success(&format!("Data saved to {}", path.display())),
                Err(e) => error(&format!("Error saving to JSON: {}", e)),
            }
        }
        "2" => {
            let Some(list) = session.list.as_ref() else {
                error("No anime list data available for CSV export!");
                return Ok(true);
            };
            let Some(stem) = prompt(input, "Enter filename (without extension):").await? else {
                return Ok(false);
            };
            let path = paths.csv_file(&stem);
            match export_csv(&path, list) {
                Ok(()) => success(&format!("Data saved to {}", path.display())),
                Err(e) => error(&format!("Error saving to CSV: {}", e)),
            }
        }
        _ => error("Invalid choice!"),
    }

    Ok(true)
}

/// Truncate to `width` characters, marking the cut with "..."
pub fn ellipsize(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        format!("{}...", text.chars().take(width).collect::<String>())
    } else {
        text.to_string()
    }
}

pub fn display_home(home: &CategorizedSet) {
    display_anime_list(&home.ongoing, "Ongoing Anime");
    display_anime_list(&home.completed, "Completed Anime");
    display_anime_list(&home.movies, "Anime Movies");
}

pub fn display_anime_list(records: &[AnimeRecord], title: &str) {
    if records.is_empty() {
        error(&format!("{}: no anime found!", title));
        return;
    }

    println!(
        "\n{} {}",
        title.green().bold(),
        format!("({} items)", records.len()).dimmed()
    );
    println!("{}", "-".repeat(100).cyan());
    println!("{:>4}  {:<53}  {}", "#".bold(), "Title".bold(), "URL".bold());
    println!("{}", "-".repeat(100).cyan());

    for (i, record) in records.iter().enumerate() {
        println!(
            "{:>4}  {:<53}  {}",
            i + 1,
            ellipsize(&record.title, TITLE_WIDTH),
            ellipsize(&record.url, URL_WIDTH).bright_blue()
        );
    }
}

pub fn display_anime_details(details: Option<&AnimeDetail>) {
    let Some(details) = details else {
        error("No details available!");
        return;
    };

    println!("\n{}", "ANIME DETAILS".green().bold());
    println!("{}", "=".repeat(80).cyan());
    println!("{} {}", "Title:".yellow().bold(), details.title);
    println!("{} {}", "URL:".yellow().bold(), details.url);

    let metadata = &details.metadata;
    if !metadata.genre.is_empty() {
        println!("{} {}", "Genre:".yellow().bold(), metadata.genre.join(", "));
    }
    if let Some(year) = &metadata.year {
        println!("{} {}", "Year:".yellow().bold(), year);
    }
    if let Some(status) = &metadata.status {
        println!("{} {}", "Status:".yellow().bold(), status);
    }
    if let Some(episodes) = &metadata.episodes {
        println!("{} {}", "Episodes:".yellow().bold(), episodes);
    }

    println!("{}", "-".repeat(80).cyan());
    println!("{}", "Synopsis:".yellow().bold());
    println!("{}", details.synopsis);

    if details.download_links.is_empty() {
        error("No download links found!");
        return;
    }

    println!("{}", "-".repeat(80).cyan());
    println!(
        "{}",
        format!("Download Links ({} found):", details.download_links.len())
            .green()
            .bold()
    );
    for (i, link) in details.download_links.iter().enumerate() {
        println!("{}. {}", i + 1, link.text.yellow());
        println!("   Type: {}", link.link_type);
        println!("   URL: {}", link.url.bright_blue());
        println!();
    }
}

pub fn display_statistics(stats: &ScrapeStatistics) {
    println!("\n{}", "STATISTICS".green().bold());
    println!("{}", "-".repeat(40).cyan());
    println!("Total anime:     {}", stats.total_anime);
    println!("Ongoing:         {}", stats.ongoing_count);
    println!("Completed:       {}", stats.completed_count);
    println!("Movies:          {}", stats.movies_count);
    println!("Cached pages:    {}", stats.cache_size);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_letter() {
        assert_eq!(parse_letter("a"), Some("A".to_string()));
        assert_eq!(parse_letter(" Z "), Some("Z".to_string()));
        assert_eq!(parse_letter("ab"), None);
        assert_eq!(parse_letter("1"), None);
        assert_eq!(parse_letter(""), None);
    }

    #[test]
    fn test_ellipsize() {
        assert_eq!(ellipsize("short", 50), "short");
        assert_eq!(ellipsize(&"a".repeat(51), 50), format!("{}...", "a".repeat(50)));
        assert_eq!(ellipsize("ふりーれん", 2), "ふり...");
    }
}
