use crate::models::InterestCategory;

/// Maps a raw place type from the external places taxonomy to an interest
/// category. Total and deterministic; unknown types fall into `Etc`.
pub fn category_of(place_type: &str) -> InterestCategory {
    match place_type {
        "bakery" | "bar" | "cafe" | "meal_delivery" | "meal_takeaway" | "restaurant" => {
            InterestCategory::Food
        }
        "amusement_park" | "aquarium" | "bowling_alley" | "campground" | "casino" | "gym"
        | "movie_theater" | "night_club" | "stadium" | "zoo" | "rv_park" => {
            InterestCategory::Activities
        }
        "art_gallery" | "book_store" | "library" | "museum" | "hindu_temple" | "mosque"
        | "church" | "synagogue" => InterestCategory::CultureArts,
        "spa" => InterestCategory::Healing,
        "park" | "tourist_attraction" => InterestCategory::Nature,
        "clothing_store" | "department_store" | "electronics_store" | "florist"
        | "furniture_store" | "hardware_store" | "home_goods_store" | "jewelry_store"
        | "shoe_store" | "shopping_mall" | "store" | "supermarket" | "convenience_store"
        | "liquor_store" => InterestCategory::Shopping,
        _ => InterestCategory::Etc,
    }
}
