use std::{cell::OnceCell, collections::HashMap, fs};

use anyhow::{anyhow, Context as _, Result};
use clap::Parser;
use picnic_core::{
    entities::*,
    gateways::photo_storage::PhotoStorage,
    rating::Rated,
    repositories::*,
    usecases::{self, AmenityFilters, NewPlace, NewReview, PlaceFilter, PlaceUpdate},
    util::sort::SortOrder,
};
use picnic_gateways::{
    device::HostDevice,
    key_value::JsonFileStore,
    opencage::OpenCage,
    placeholder::PlaceholderStore,
    rest::{RestStore, RestStoreConfig},
};

use crate::config::{self, Config};

mod args;
mod output;

use self::args::*;

/// Everything a command needs to access the store.
trait Backend: PlaceRepo + UserRepo + ReviewRepo + QuestionRepo + PhotoRepo + PhotoStorage {}

impl<T> Backend for T where
    T: PlaceRepo + UserRepo + ReviewRepo + QuestionRepo + PhotoRepo + PhotoStorage
{
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let cfg = Config::try_load_from_file_or_default(cli.config.as_ref())?;
    let ctx = Context::new(&cfg);
    match &cfg.backend {
        Some(backend) => {
            let config::Backend {
                url,
                anon_key,
                photo_bucket,
                request_timeout,
            } = backend;
            log::debug!("Connecting to backend at {url}");
            let store = RestStore::try_new(RestStoreConfig {
                base_url: url.clone(),
                anon_key: anon_key.clone(),
                photo_bucket: photo_bucket.clone(),
                request_timeout: *request_timeout,
            })?;
            execute(&store, &ctx, cli.command)
        }
        None => {
            log::warn!("No backend configured: showing placeholder data");
            execute(&PlaceholderStore, &ctx, cli.command)
        }
    }
}

struct Context<'a> {
    cfg: &'a Config,
    geocoder: Option<OpenCage>,
    user: OnceCell<User>,
}

impl<'a> Context<'a> {
    fn new(cfg: &'a Config) -> Self {
        let geocoder = cfg.geocoding.gateway.as_ref().map(|gw| match gw {
            config::GeocodingGateway::OpenCage { api_key } => OpenCage::new(Some(api_key.clone())),
        });
        Self {
            cfg,
            geocoder,
            user: OnceCell::new(),
        }
    }

    /// The user of this device, created on first use.
    fn current_user<B: Backend>(&self, backend: &B) -> Result<&User> {
        if let Some(user) = self.user.get() {
            return Ok(user);
        }
        let config::Identity {
            data_dir,
            device_id,
        } = &self.cfg.identity;
        let device = HostDevice::new(device_id.clone());
        let kv = JsonFileStore::try_new(data_dir)
            .with_context(|| format!("Unable to open data directory {}", data_dir.display()))?;
        let user = usecases::bootstrap_user(backend, &device, &kv)?;
        log::debug!("Current user: {}", user.id);
        Ok(self.user.get_or_init(|| user))
    }

    fn reference_point(&self, location: &Location) -> Result<Option<MapPoint>> {
        let Location { at, address } = location;
        if let Some(point) = at {
            return Ok(Some(*point));
        }
        let Some(address) = address else {
            return Ok(None);
        };
        let geocoder = self
            .geocoder
            .as_ref()
            .ok_or_else(|| anyhow!("No geocoding gateway configured"))?;
        let point = usecases::resolve_search_location(geocoder, address)
            .ok_or_else(|| anyhow!("Unable to find '{address}'"))?;
        log::info!("Searching around {point}");
        Ok(Some(point))
    }
}

fn execute<B: Backend>(backend: &B, ctx: &Context, command: Command) -> Result<()> {
    match command {
        Command::Places(cmd) => places(backend, ctx, cmd),
        Command::Reviews(cmd) => reviews(backend, ctx, cmd),
        Command::Questions(cmd) => questions(backend, ctx, cmd),
        Command::Photos(cmd) => photos(backend, ctx, cmd),
        Command::Whoami => {
            let user = ctx.current_user(backend)?;
            println!("{}", output::user(user));
            Ok(())
        }
        Command::Nickname { nickname } => {
            let user_id = ctx.current_user(backend)?.id.clone();
            let user = usecases::change_nickname(backend, &user_id, &nickname)?;
            println!("{}", output::user(&user));
            Ok(())
        }
    }
}

fn amenity_flags(amenities: Vec<Amenity>) -> Amenities {
    if amenities.contains(&Amenity::View) {
        log::warn!("The view of a place is derived from its view type");
    }
    amenities.into_iter().collect()
}

fn places<B: Backend>(backend: &B, ctx: &Context, cmd: PlacesCommand) -> Result<()> {
    match cmd {
        PlacesCommand::List {
            query,
            view_type,
            location,
            max_distance,
            amenities,
            sort,
        } => {
            let reference_point = ctx.reference_point(&location)?;
            let filter = PlaceFilter {
                text: query,
                view_type,
                reference_point,
                max_distance: max_distance.unwrap_or(ctx.cfg.search.default_max_distance),
                amenities: amenities.into_iter().collect::<AmenityFilters>(),
            };
            let all_places = usecases::load_places(backend)?;
            let mut places = usecases::filter_places(&all_places, &filter);
            // one request per place
            let avg_ratings = (sort == SortOrder::Rating)
                .then(|| usecases::load_avg_ratings(backend, &places));
            usecases::sort_places(
                &mut places,
                sort,
                avg_ratings.as_ref().unwrap_or(&HashMap::new()),
                reference_point,
            );
            let active = filter.active_filter_count();
            if active > 0 {
                println!(
                    "{} of {} places ({active} active filters)",
                    places.len(),
                    all_places.len()
                );
            } else {
                println!("{} places", places.len());
            }
            for p in &places {
                let distance = reference_point.and_then(|r| MapPoint::distance(p.pos, r));
                let avg = avg_ratings.as_ref().map(|r| r.get(&p.id).copied());
                println!("{}", output::place_line(p, avg, distance));
            }
        }
        PlacesCommand::Show { id } => {
            let place = usecases::load_place(backend, &id)?;
            let reviews = usecases::load_reviews_of_place(backend, &id)?;
            let questions = usecases::load_questions_with_answers(backend, &id)?;
            let photos = usecases::load_photos_of_place(backend, &id)?;
            println!("{}", output::place_details(&place, place.avg_rating(&reviews)));
            if !reviews.is_empty() {
                println!("\nReviews:");
                for r in &reviews {
                    println!("  {}", output::review_line(r));
                }
            }
            if !questions.is_empty() {
                println!("\nQuestions:");
                for q in &questions {
                    println!("  {}", output::question_block(q));
                }
            }
            if !photos.is_empty() {
                println!("\nPhotos:");
                for p in &photos {
                    println!("  {}", output::photo_line(p));
                }
            }
        }
        PlacesCommand::Add {
            title,
            at,
            fields,
            amenities,
        } => {
            let owner = ctx.current_user(backend)?.id.clone();
            let (lat, lng) = at.to_lat_lng_deg();
            let new_place = NewPlace {
                title,
                description: fields.description,
                view_type: fields.view_type,
                lat,
                lng,
                amenities: amenity_flags(amenities),
            };
            let place = usecases::create_new_place(backend, &owner, new_place)?;
            log::info!("Created place {}", place.id);
            println!("{}", output::place_line(&place, None, None));
        }
        PlacesCommand::Update {
            id,
            title,
            at,
            fields,
            amenities,
        } => {
            let user_id = ctx.current_user(backend)?.id.clone();
            let update = PlaceUpdate {
                title,
                description: fields.description,
                view_type: fields.view_type,
                lat_lng: at.map(MapPoint::to_lat_lng_deg),
                amenities: amenities.map(amenity_flags),
            };
            let place = usecases::update_place(backend, &user_id, &id, update)?;
            log::info!("Updated place {}", place.id);
            println!("{}", output::place_line(&place, None, None));
        }
        PlacesCommand::Delete { id } => {
            let user_id = ctx.current_user(backend)?.id.clone();
            usecases::delete_place(backend, &user_id, &id)?;
            log::info!("Deleted place {id}");
        }
        PlacesCommand::Mine => {
            let owner = ctx.current_user(backend)?.id.clone();
            let own_places = usecases::load_places_of_owner(backend, &owner)?;
            if own_places.is_empty() {
                println!("You have not added any places yet");
            }
            for p in &own_places {
                println!("{}", output::own_place(p));
            }
        }
        PlacesCommand::Nearby {
            location,
            radius_km,
        } => {
            let center = ctx
                .reference_point(&location)?
                .ok_or_else(|| anyhow!("Missing location: use --at or --address"))?;
            let radius = match radius_km {
                Some(km) if km.is_finite() && km > 0.0 => Distance::from_km(km),
                Some(km) => return Err(anyhow!("Invalid radius: {km}")),
                None => ctx.cfg.search.nearby_radius,
            };
            let places = usecases::load_places(backend)?;
            let count = usecases::count_nearby_places(&places, center, radius);
            println!("{count} places within {radius}");
        }
    }
    Ok(())
}

fn reviews<B: Backend>(backend: &B, ctx: &Context, cmd: ReviewsCommand) -> Result<()> {
    match cmd {
        ReviewsCommand::List { place_id } => {
            let reviews = usecases::load_reviews_of_place(backend, &place_id)?;
            let place = usecases::load_place(backend, &place_id)?;
            println!("{}: {}", place.title, output::rating(place.avg_rating(&reviews)));
            for r in &reviews {
                println!("{}", output::review_line(r));
            }
        }
        ReviewsCommand::Add {
            place_id,
            rating,
            text,
        } => {
            let author = ctx.current_user(backend)?;
            let new_review = NewReview {
                place_id,
                rating,
                text,
            };
            let review = usecases::rate_place(backend, author, new_review)?;
            println!("{}", output::review_line(&review));
            if let Some(avg) = usecases::avg_rating(backend, review.place_id.as_str())? {
                println!("New average rating: {}", output::rating(Some(avg)));
            }
        }
    }
    Ok(())
}

fn questions<B: Backend>(backend: &B, ctx: &Context, cmd: QuestionsCommand) -> Result<()> {
    match cmd {
        QuestionsCommand::List { place_id } => {
            let questions = usecases::load_questions_with_answers(backend, &place_id)?;
            if questions.is_empty() {
                println!("No questions yet");
            }
            for q in &questions {
                println!("{}", output::question_block(q));
            }
        }
        QuestionsCommand::Ask { place_id, text } => {
            let author = ctx.current_user(backend)?;
            let question = usecases::ask_question(backend, author, &place_id, &text)?;
            println!("Asked question {}", question.id);
        }
        QuestionsCommand::Answer { question_id, text } => {
            let author = ctx.current_user(backend)?;
            let answer = usecases::answer_question(backend, author, &question_id, &text)?;
            println!("Answered question {}", answer.question_id);
        }
    }
    Ok(())
}

fn photos<B: Backend>(backend: &B, ctx: &Context, cmd: PhotosCommand) -> Result<()> {
    match cmd {
        PhotosCommand::List { place_id } => {
            for p in usecases::load_photos_of_place(backend, &place_id)? {
                println!("{}", output::photo_line(&p));
            }
        }
        PhotosCommand::Upload { place_id, file } => {
            let content =
                fs::read(&file).with_context(|| format!("Unable to read {}", file.display()))?;
            let photo = usecases::upload_photo(backend, backend, &place_id, &content)?;
            println!("{}", output::photo_line(&photo));
        }
        PhotosCommand::Delete { photo_id } => {
            let user_id = ctx.current_user(backend)?.id.clone();
            usecases::delete_photo(backend, backend, &user_id, &photo_id)?;
            log::info!("Deleted photo {photo_id}");
        }
    }
    Ok(())
}
