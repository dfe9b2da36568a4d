use clap::{Args, Parser, Subcommand};
use picnic_core::{
    entities::{Amenity, MapPoint},
    usecases::MaxDistance,
    util::sort::SortOrder,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Discover and share picnic places", long_about = None)]
pub struct Cli {
    /// Configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Browse, add and edit places
    #[command(subcommand)]
    Places(PlacesCommand),
    /// Reviews of a place
    #[command(subcommand)]
    Reviews(ReviewsCommand),
    /// Questions and answers about a place
    #[command(subcommand)]
    Questions(QuestionsCommand),
    /// Photos of a place
    #[command(subcommand)]
    Photos(PhotosCommand),
    /// Show the account of this device
    Whoami,
    /// Change the nickname of this device's account
    Nickname { nickname: String },
}

/// Where to search: a position or an address to geocode.
#[derive(Args, Debug, Default)]
pub struct Location {
    /// Reference position as "<lat>,<lng>"
    #[arg(long, value_name = "LAT,LNG", allow_hyphen_values = true)]
    pub at: Option<MapPoint>,
    /// Reference address, resolved with the geocoding gateway
    #[arg(long, conflicts_with = "at")]
    pub address: Option<String>,
}

#[derive(Args, Debug)]
pub struct PlaceFields {
    /// Description of the place
    #[arg(long)]
    pub description: Option<String>,
    /// Kind of view, e.g. "Parc" or "Rivière"
    #[arg(long)]
    pub view_type: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum PlacesCommand {
    /// List places matching the filters
    List {
        /// Text to search in title, description and view type
        #[arg(short, long)]
        query: Option<String>,
        /// Only places with a matching view type
        #[arg(long)]
        view_type: Option<String>,
        #[command(flatten)]
        location: Location,
        /// Max. distance in km from the reference location or "none"
        #[arg(long, allow_hyphen_values = true)]
        max_distance: Option<MaxDistance>,
        /// Required amenities, e.g. "shade,toilets"
        #[arg(long = "with", value_delimiter = ',')]
        amenities: Vec<Amenity>,
        #[arg(long, default_value_t)]
        sort: SortOrder,
    },
    /// Show a place with its reviews, questions and photos
    Show { id: String },
    /// Add a new place
    Add {
        title: String,
        /// Position as "<lat>,<lng>"
        #[arg(long, value_name = "LAT,LNG", allow_hyphen_values = true)]
        at: MapPoint,
        #[command(flatten)]
        fields: PlaceFields,
        /// Available amenities, e.g. "shade,parking"
        #[arg(long = "with", value_delimiter = ',')]
        amenities: Vec<Amenity>,
    },
    /// Change a place you own
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        /// Position as "<lat>,<lng>"
        #[arg(long, value_name = "LAT,LNG", allow_hyphen_values = true)]
        at: Option<MapPoint>,
        #[command(flatten)]
        fields: PlaceFields,
        /// Replaces all amenities, e.g. "shade,parking"
        #[arg(long = "with", value_delimiter = ',')]
        amenities: Option<Vec<Amenity>>,
    },
    /// Delete a place you own
    Delete { id: String },
    /// Your places with their unanswered questions
    Mine,
    /// Count the places around a location
    Nearby {
        #[command(flatten)]
        location: Location,
        /// Radius in km
        #[arg(long)]
        radius_km: Option<f64>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReviewsCommand {
    /// List the reviews of a place
    List { place_id: String },
    /// Review a place
    Add {
        place_id: String,
        /// Rating from 1 to 5
        #[arg(short, long)]
        rating: u8,
        text: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum QuestionsCommand {
    /// List the questions of a place with their answers
    List { place_id: String },
    /// Ask a question about a place
    Ask { place_id: String, text: String },
    /// Answer a question
    Answer { question_id: String, text: String },
}

#[derive(Subcommand, Debug)]
pub enum PhotosCommand {
    /// List the photos of a place
    List { place_id: String },
    /// Upload a JPEG photo of a place
    Upload { place_id: String, file: PathBuf },
    /// Delete a photo of a place you own
    Delete { photo_id: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_list_filters() {
        let cli = Cli::try_parse_from([
            "picnicdb",
            "places",
            "list",
            "-q",
            "parc",
            "--at",
            "45.7772,4.8559",
            "--max-distance",
            "none",
            "--with",
            "shade,toilets",
            "--sort",
            "distance",
        ])
        .unwrap();
        let Command::Places(PlacesCommand::List {
            query,
            location,
            max_distance,
            amenities,
            sort,
            ..
        }) = cli.command
        else {
            panic!("Unexpected command");
        };
        assert_eq!(query.as_deref(), Some("parc"));
        assert_eq!(location.at, Some(MapPoint::from_lat_lng_deg(45.7772, 4.8559)));
        assert_eq!(max_distance, Some(MaxDistance::Unlimited));
        assert_eq!(amenities, vec![Amenity::Shade, Amenity::Toilets]);
        assert_eq!(sort, SortOrder::Distance);
    }

    #[test]
    fn parse_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "picnicdb", "places", "add", "Hyde Park", "--at", "-33.87,151.21", "--with", "shade",
        ])
        .unwrap();
        let Command::Places(PlacesCommand::Add { at, title, .. }) = cli.command else {
            panic!("Unexpected command");
        };
        assert_eq!(title, "Hyde Park");
        assert_eq!(at, MapPoint::from_lat_lng_deg(-33.87, 151.21));
    }

    #[test]
    fn reject_unknown_amenity() {
        assert!(Cli::try_parse_from(["picnicdb", "places", "list", "--with", "pool"]).is_err());
    }
}
