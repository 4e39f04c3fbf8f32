use std::error::Error;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;

pub const API_BASE: &str = "https://api.themoviedb.org/3";
pub const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/original";
const WATCH_BASE: &str = "https://www.youtube.com/watch?v=";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MoviePage {
    pub page: u32,
    pub results: Vec<Movie>,
    pub total_pages: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Video {
    pub id: String,
    pub key: String,
    pub name: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
}

#[derive(Deserialize)]
struct VideoList {
    results: Vec<Video>,
}

fn api_client(bearer: &str) -> Result<reqwest::blocking::Client, Box<dyn Error>> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", bearer))?,
    );

    Ok(reqwest::blocking::Client::builder()
        .default_headers(headers)
        .build()?)
}

/// Searches TMDB for movies matching the query, one page at a time
pub fn search_movies(bearer: &str, query: &str, page: u32) -> Result<MoviePage, Box<dyn Error>> {
    let url = format!(
        "{}/search/movie?query={}&include_adult=false&language=en-US&page={}",
        API_BASE,
        urlencoding::encode(query),
        page
    );

    let response = api_client(bearer)?.get(&url).send()?;

    if !response.status().is_success() {
        return Err(format!("search request failed with status: {}", response.status()).into());
    }

    Ok(response.json()?)
}

/// Fetches the video list for a movie (trailers, teasers, clips)
pub fn fetch_trailers(bearer: &str, movie_id: u64) -> Result<Vec<Video>, Box<dyn Error>> {
    let url = format!("{}/movie/{}/videos?language=en-US", API_BASE, movie_id);

    let response = api_client(bearer)?.get(&url).send()?;

    if !response.status().is_success() {
        return Err(format!("video request failed with status: {}", response.status()).into());
    }

    let list: VideoList = response.json()?;
    Ok(list.results)
}

/// Picks the best playable video: a YouTube "Trailer" if one exists,
/// otherwise any YouTube video
pub fn pick_trailer(videos: &[Video]) -> Option<&Video> {
    videos
        .iter()
        .find(|v| v.site == "YouTube" && v.video_type == "Trailer")
        .or_else(|| videos.iter().find(|v| v.site == "YouTube"))
}

pub fn backdrop_url(path: &str) -> String {
    format!("{}{}", IMAGE_BASE, path)
}

pub fn watch_url(key: &str) -> String {
    format!("{}{}", WATCH_BASE, key)
}

/// Downloads and decodes a backdrop image for terminal rendering
pub fn download_backdrop(url: &str) -> Result<image::DynamicImage, Box<dyn Error>> {
    let response = reqwest::blocking::get(url)?;

    if !response.status().is_success() {
        return Err(format!("failed to download backdrop: status {}", response.status()).into());
    }

    let bytes = response.bytes()?;
    Ok(image::load_from_memory(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(site: &str, video_type: &str, key: &str) -> Video {
        Video {
            id: key.to_string(),
            key: key.to_string(),
            name: format!("{} {}", site, video_type),
            site: site.to_string(),
            video_type: video_type.to_string(),
        }
    }

    #[test]
    fn picks_exact_youtube_trailer_first() {
        let videos = vec![
            video("YouTube", "Teaser", "teaser"),
            video("Vimeo", "Trailer", "vimeo"),
            video("YouTube", "Trailer", "trailer"),
        ];
        assert_eq!(pick_trailer(&videos).map(|v| v.key.as_str()), Some("trailer"));
    }

    #[test]
    fn falls_back_to_any_youtube_video() {
        let videos = vec![
            video("Vimeo", "Trailer", "vimeo"),
            video("YouTube", "Teaser", "X"),
        ];
        assert_eq!(pick_trailer(&videos).map(|v| v.key.as_str()), Some("X"));
    }

    #[test]
    fn no_youtube_video_means_no_trailer() {
        let videos = vec![video("Vimeo", "Trailer", "vimeo")];
        assert!(pick_trailer(&videos).is_none());
        assert!(pick_trailer(&[]).is_none());
    }

    #[test]
    fn derives_backdrop_and_watch_urls() {
        assert_eq!(
            backdrop_url("/abc.jpg"),
            "https://image.tmdb.org/t/p/original/abc.jpg"
        );
        assert_eq!(watch_url("dQw4w9WgXcQ"), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }

    #[test]
    fn deserializes_search_page() {
        let json = r#"{
            "page": 1,
            "results": [
                {
                    "id": 550,
                    "title": "Fight Club",
                    "overview": "A ticking-time-bomb insomniac...",
                    "release_date": "1999-10-15",
                    "backdrop_path": "/hZkgoQYus5vegHoetLkCJzb17zJ.jpg",
                    "vote_average": 8.4
                },
                {
                    "id": 551,
                    "title": "Obscure Short",
                    "backdrop_path": null
                }
            ],
            "total_pages": 3,
            "total_results": 42
        }"#;

        let page: MoviePage = serde_json::from_str(json).expect("valid page json");
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].title, "Fight Club");
        assert!(page.results[1].backdrop_path.is_none());
        assert_eq!(page.results[1].vote_average, 0.0);
    }

    #[test]
    fn deserializes_video_with_renamed_type_field() {
        let json = r#"{
            "id": "abc",
            "key": "dQw4w9WgXcQ",
            "name": "Official Trailer",
            "site": "YouTube",
            "type": "Trailer"
        }"#;

        let video: Video = serde_json::from_str(json).expect("valid video json");
        assert_eq!(video.video_type, "Trailer");
        assert_eq!(video.key, "dQw4w9WgXcQ");
    }
}
