//! Rental fee calculation.
//!
//! Fees are computed at full `f64` precision; rounding to cents is a
//! display concern.

use super::item::{Format, Item};

/// Base fee shared by e-books and music discs
const BASE_FEE: f64 = 1.50;

const EBOOK_PER_CHAPTER: f64 = 0.10;
const EBOOK_RECENT_AFTER: u16 = 2015;
const EBOOK_RECENT_SURCHARGE: f64 = 1.00;

const MUSIC_PER_MINUTE: f64 = 0.045;
const MUSIC_RECENT_AFTER: u16 = 2014;
const MUSIC_RECENT_SURCHARGE: f64 = 2.00;

const MOVIE_FEE: f64 = 3.25 + 1.50;
const MOVIE_RECENT_AFTER: u16 = 2019;
/// Replaces the regular movie fee for recent releases
const MOVIE_RECENT_FEE: f64 = 5.00;

/// Compute the rental fee for an item
pub fn rental_fee(item: &Item) -> f64 {
    let year = item.publication_year.value();

    match *item.format() {
        Format::EBook { chapters } => {
            let mut fee = BASE_FEE + f64::from(chapters) * EBOOK_PER_CHAPTER;
            if year > EBOOK_RECENT_AFTER {
                fee += EBOOK_RECENT_SURCHARGE;
            }
            fee
        }
        Format::MusicDisc { minutes } => {
            let mut fee = BASE_FEE + f64::from(minutes) * MUSIC_PER_MINUTE;
            if year > MUSIC_RECENT_AFTER {
                fee += MUSIC_RECENT_SURCHARGE;
            }
            fee
        }
        // Size never affects the price.
        Format::MovieDisc { .. } => {
            if year > MOVIE_RECENT_AFTER {
                MOVIE_RECENT_FEE
            } else {
                MOVIE_FEE
            }
        }
    }
}
