//! Video commands.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::Subcommand;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use console::style;

use rt_api::{PlayOptions, UploadParams};
use rt_core::config::ClientConfig;
use rt_core::constants::DEFAULT_UPLOAD_CATEGORY;
use rt_core::error::{RtError, RtResult};
use rt_models::{Model, VideoInfo};

use crate::OutputFormat;

#[derive(Subcommand)]
pub enum VideoAction {
    /// Upload a video from a URL.
    Upload {
        /// Source file URL the API downloads from.
        url: String,
        /// Video title.
        #[arg(short, long)]
        title: Option<String>,
        /// Video description.
        #[arg(short, long)]
        description: Option<String>,
        /// Publish immediately instead of uploading hidden.
        #[arg(long)]
        public: bool,
        /// Category id.
        #[arg(long, default_value_t = DEFAULT_UPLOAD_CATEGORY)]
        category: i64,
        /// URL notified when processing finishes.
        #[arg(long)]
        callback_url: Option<String>,
    },
    /// Show video details.
    Get {
        /// Video id.
        id: String,
    },
    /// Delete a video.
    Delete {
        /// Video id.
        id: String,
    },
    /// Upload a thumbnail image.
    Thumb {
        /// Video id.
        id: String,
        /// Image file.
        file: PathBuf,
    },
    /// Show, schedule or cancel a delayed publication.
    Publication {
        /// Video id.
        id: String,
        /// Publication time as YYYY-MM-DDTHH:MM:SS.
        #[arg(long, conflicts_with = "cancel")]
        at: Option<String>,
        /// Cancel the scheduled publication.
        #[arg(long)]
        cancel: bool,
    },
    /// Show player options for a viewer.
    Play {
        /// Video id.
        id: String,
        /// Requested quality.
        #[arg(long)]
        quality: Option<String>,
        /// Viewer's user agent.
        #[arg(long)]
        user_agent: Option<String>,
        /// Viewer's IP address.
        #[arg(long)]
        ip: Option<String>,
        /// Page embedding the player.
        #[arg(long)]
        referer: Option<String>,
    },
}

pub fn run(config: &ClientConfig, action: VideoAction, format: OutputFormat) -> RtResult<()> {
    let client = super::create_client(config)?;
    let video = client.video();

    match action {
        VideoAction::Upload {
            url,
            title,
            description,
            public,
            category,
            callback_url,
        } => {
            let mut params = UploadParams::new(url);
            params.title = title;
            params.description = description;
            params.is_hidden = !public;
            params.category_id = category;
            params.callback_url = callback_url;

            let pb = super::spinner("Uploading...");
            let result = video.upload(&params);
            pb.finish_and_clear();
            let id = result?;

            match format {
                OutputFormat::Json => super::print_json(&serde_json::json!({ "video_id": id })),
                OutputFormat::Text => match id {
                    Some(id) => println!("  {} Upload accepted: {}", style("OK").green().bold(), style(id).cyan()),
                    None => println!("  {} Upload accepted.", style("OK").green().bold()),
                },
            }
        }
        VideoAction::Get { id } => {
            let info = video.get_video(&id)?;
            match format {
                OutputFormat::Json => super::print_json(&info.to_json()),
                OutputFormat::Text => print_video(&info),
            }
        }
        VideoAction::Delete { id } => {
            let deleted = video.delete_video(&id)?;
            match format {
                OutputFormat::Json => super::print_json(&serde_json::json!({ "deleted": deleted })),
                OutputFormat::Text if deleted => {
                    println!("  {} Video {id} deleted.", style("OK").green().bold())
                }
                OutputFormat::Text => {
                    println!("  {} Delete of {id} was not confirmed.", style("WARNING").yellow().bold())
                }
            }
        }
        VideoAction::Thumb { id, file } => {
            let pb = super::spinner("Uploading thumbnail...");
            let result = video.add_thumb(&id, &file);
            pb.finish_and_clear();
            let url = result?;

            match format {
                OutputFormat::Json => super::print_json(&serde_json::json!({ "thumbnail_url": url })),
                OutputFormat::Text => println!(
                    "  {} Thumbnail: {}",
                    style("OK").green().bold(),
                    url.as_deref().unwrap_or("(no url returned)")
                ),
            }
        }
        VideoAction::Publication { id, at, cancel } => {
            if cancel {
                video.delete_publication(&id)?;
                if let OutputFormat::Text = format {
                    println!("  {} Publication cancelled.", style("OK").green().bold());
                }
                return Ok(());
            }

            let publication = match at {
                Some(at) => Some(video.add_publication(&id, parse_timestamp(&at)?)?),
                None => video.get_publication(&id)?,
            };
            match (format, publication) {
                (OutputFormat::Json, Some(p)) => super::print_json(&p.to_json()),
                (OutputFormat::Json, None) => super::print_json(&serde_json::Value::Null),
                (OutputFormat::Text, Some(p)) => println!(
                    "  Opens at {}",
                    p.timestamp()
                        .map(|t| t.to_string())
                        .unwrap_or_else(|| p.get_str("timestamp").unwrap_or("?").to_string())
                ),
                (OutputFormat::Text, None) => println!("No delayed publication."),
            }
        }
        VideoAction::Play {
            id,
            quality,
            user_agent,
            ip,
            referer,
        } => {
            let options = PlayOptions {
                quality,
                user_agent,
                user_ip: ip,
                referer,
            };
            let result = video.get_play_options(&id, &options)?;
            super::print_json(&result.to_json());
        }
    }

    Ok(())
}

fn parse_timestamp(raw: &str) -> RtResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .map_err(|e| RtError::InvalidArgument(format!("bad timestamp {raw}: {e}")))
}

fn print_video(info: &VideoInfo) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let tags: Vec<String> = info
        .all_tags()
        .iter()
        .filter_map(|t| t.get_str("name").map(str::to_owned))
        .collect();

    table.add_row(vec!["ID", info.id().unwrap_or("")]);
    table.add_row(vec!["Title", super::truncate(info.title().unwrap_or(""), 60).as_str()]);
    table.add_row(vec![
        "Author",
        info.author().and_then(|a| a.get_str("name").map(str::to_owned)).as_deref().unwrap_or(""),
    ]);
    table.add_row(vec![
        "Category",
        info.category().and_then(|c| c.get_str("name").map(str::to_owned)).as_deref().unwrap_or(""),
    ]);
    table.add_row(vec!["Hidden", if info.is_hidden() { "yes" } else { "no" }]);
    table.add_row(vec!["URL", info.video_url().unwrap_or("")]);
    table.add_row(vec!["Tags", tags.join(", ").as_str()]);

    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp() {
        let t = parse_timestamp("2024-05-01T18:30:00").unwrap();
        assert_eq!(t.to_string(), "2024-05-01 18:30:00");
        assert!(parse_timestamp("2024-05-01 18:30:00").is_ok());
        assert!(matches!(parse_timestamp("tomorrow"), Err(RtError::InvalidArgument(_))));
    }
}
