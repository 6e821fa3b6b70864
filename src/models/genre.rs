//! TMDb movie genre ids used by discovery and expansion.

pub const ACTION: u32 = 28;
pub const ADVENTURE: u32 = 12;
pub const ANIMATION: u32 = 16;
pub const COMEDY: u32 = 35;
pub const DRAMA: u32 = 18;
pub const FAMILY: u32 = 10751;
pub const FANTASY: u32 = 14;
pub const SCIENCE_FICTION: u32 = 878;

/// Movie genres the catalog knows about
pub const MOVIE_GENRES: &[(u32, &str)] = &[
    (ACTION, "Action"),
    (ADVENTURE, "Adventure"),
    (ANIMATION, "Animation"),
    (COMEDY, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (DRAMA, "Drama"),
    (FAMILY, "Family"),
    (FANTASY, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (SCIENCE_FICTION, "Science Fiction"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

pub fn is_known_movie_genre(id: u32) -> bool {
    MOVIE_GENRES.iter().any(|(known, _)| *known == id)
}

/// Broad genres for a child's age band, used when nothing specific matched
pub fn age_band_genres(age: u8) -> &'static [u32] {
    match age {
        0..=7 => &[ANIMATION, FAMILY],
        8..=12 => &[FAMILY, ADVENTURE, ANIMATION, COMEDY],
        _ => &[ADVENTURE, FANTASY, SCIENCE_FICTION, COMEDY, DRAMA],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_bands() {
        assert_eq!(age_band_genres(4), &[ANIMATION, FAMILY]);
        assert_eq!(age_band_genres(7), &[ANIMATION, FAMILY]);
        assert_eq!(age_band_genres(8), &[FAMILY, ADVENTURE, ANIMATION, COMEDY]);
        assert_eq!(age_band_genres(12), &[FAMILY, ADVENTURE, ANIMATION, COMEDY]);
        assert!(age_band_genres(13).contains(&SCIENCE_FICTION));
        assert!(age_band_genres(18).contains(&DRAMA));
    }

    #[test]
    fn test_known_genres() {
        assert!(is_known_movie_genre(FAMILY));
        assert!(!is_known_movie_genre(10759));
        assert!(!is_known_movie_genre(0));
    }
}
