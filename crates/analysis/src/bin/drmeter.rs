use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use drmeter_analysis::rate_track;
use drmeter_audio::AudioDecoder;
use drmeter_domain::{album_rating, format_rating, ChannelDr, DomainError, TrackRating};

#[derive(Parser, Debug)]
#[command(author, version, about = "Compute dynamic-range (DR) ratings for audio tracks", long_about = None)]
struct Cli {
    /// Audio files to rate
    #[arg(required = true)]
    files: Vec<PathBuf>,
    /// Emit the report as JSON instead of plain text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct TrackReport {
    file: String,
    #[serde(flatten)]
    rating: TrackRating,
    label: String,
}

#[derive(Debug, Serialize)]
struct Report {
    tracks: Vec<TrackReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    album_rating: Option<String>,
}

/// Raw decibel values print with six fractional digits; full f32
/// precision is noise in a report.
fn format_raw_dr(value: f32) -> String {
    format!("{value:.6}")
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Probe and validate every input before any decode or rating work
    // starts; the expensive decode happens inside the parallel map below.
    for file in &cli.files {
        let info = AudioDecoder::probe(file)?;
        if info.channels == 0 || info.channels > 2 {
            return Err(DomainError::UnsupportedChannelCount(info.channels).into());
        }
    }

    info!(count = cli.files.len(), "rating tracks");
    let ratings: Vec<(String, TrackRating)> = cli
        .files
        .par_iter()
        .map(|file| -> Result<(String, TrackRating)> {
            let mut source = AudioDecoder::open(file)?.into_source();
            Ok((file.display().to_string(), rate_track(&mut source)))
        })
        .collect::<Result<Vec<_>>>()?;

    let album = if ratings.len() > 1 {
        let only_ratings: Vec<TrackRating> = ratings.iter().map(|(_, r)| *r).collect();
        Some(album_rating(&only_ratings))
    } else {
        None
    };

    if cli.json {
        let report = Report {
            tracks: ratings
                .into_iter()
                .map(|(file, rating)| TrackReport {
                    file,
                    label: rating.label(),
                    rating,
                })
                .collect(),
            album_rating: album.map(format_rating),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for (name, rating) in &ratings {
        println!("{name}:");
        match rating.channels {
            ChannelDr::Mono(dr) => println!("\tRaw DR: {}", format_raw_dr(dr)),
            ChannelDr::Stereo { left, right } => {
                println!("\tLeft DR: {}", format_raw_dr(left));
                println!("\tRight DR: {}", format_raw_dr(right));
            }
        }
        println!("\tTrack rating: {}", rating.label());
    }

    if let Some(album) = album {
        println!();
        println!("Album rating: {}", format_rating(album));
    }

    Ok(())
}
