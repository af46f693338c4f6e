use serde::{Deserialize, Serialize};

use super::reaction::Reaction;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    #[serde(default)]
    pub center: Coordinate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: City,
    #[serde(default)]
    pub verified: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationInfo {
    pub location_name: String,
    pub location_start_point: Coordinate,
    #[serde(default)]
    pub location_details: String,
    #[serde(default)]
    pub path: Vec<Coordinate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TakeWithYouInfo {
    #[serde(default)]
    pub posters_motivation: String,
    #[serde(default)]
    pub posters: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Details {
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub slogans: Vec<String>,
    #[serde(default)]
    pub strategy: Vec<String>,
}

/// A published or pending meetup.
///
/// `date` is stored as `YYYY-MM-DD HH:MM` so that string order is
/// chronological.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: String,
    #[serde(default)]
    pub city_name: String,
    #[serde(default)]
    pub creator_id: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub required_people_count: u32,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location_info: LocationInfo,
    #[serde(default)]
    pub take_with_you_info: TakeWithYouInfo,
    #[serde(default)]
    pub details: Details,
    #[serde(default)]
    pub telegram: String,
    #[serde(default)]
    pub reaction: Reaction,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub id: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub viewers: Vec<String>,
}
